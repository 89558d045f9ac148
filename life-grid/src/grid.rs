use log::debug;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::rngs::SmallRng;
use rand_distr::Bernoulli;
use std::mem;
use std::ops::{Index, IndexMut};

pub type CellAge = u8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, size: GridSize) -> Option<usize> {
        if self.row < size.height && self.col < size.width {
            Some(self.row as usize * size.width as usize + self.col as usize)
        } else {
            None
        }
    }
}

/// Double-buffered grid of cell ages. `cells` is the current generation;
/// `next_cells` is scratch space that [`AgeGrid::step`] writes into before
/// the two are swapped.
#[derive(Clone, Debug)]
pub struct AgeGrid {
    cells: AgeCells,
    next_cells: AgeCells,
}

impl AgeGrid {
    pub fn new(size: GridSize) -> Self {
        let size = Self::at_least_one_cell(size);
        Self {
            cells: AgeCells::new(size),
            next_cells: AgeCells::new(size),
        }
    }

    pub fn size(&self) -> GridSize {
        self.cells.size
    }

    pub fn width(&self) -> u32 {
        self.cells.size.width
    }

    pub fn height(&self) -> u32 {
        self.cells.size.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.ages.len()
    }

    pub fn num_live_cells(&self) -> usize {
        self.cells.ages.iter().filter(|&&age| age != 0).count()
    }

    pub fn age(&self, loc: Loc) -> Option<CellAge> {
        self.cells.cell(loc).copied()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &CellAge> + Clone {
        self.cells.ages.iter()
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (Loc, CellAge)> + '_ {
        let width = self.width() as usize;
        self.cells
            .ages
            .iter()
            .enumerate()
            .filter(|(_, age)| **age != 0)
            .map(move |(index, &age)| {
                (Loc::new((index / width) as u32, (index % width) as u32), age)
            })
    }

    /// Reallocates both buffers, keeping the overlapping top-left region of
    /// the current generation. Dimensions below one are raised to one.
    pub fn resize(&mut self, new_size: GridSize) {
        let new_size = Self::at_least_one_cell(new_size);
        let old_size = self.size();
        if new_size == old_size && self.cells.ages.len() == old_size.area() {
            return;
        }

        let mut new_cells = AgeCells::new(new_size);
        if old_size.width > 0 && old_size.height > 0 && self.cells.ages.len() == old_size.area()
        {
            let copy_width = old_size.width.min(new_size.width) as usize;
            for row in 0..old_size.height.min(new_size.height) {
                let from = row as usize * old_size.width as usize;
                let to = row as usize * new_size.width as usize;
                new_cells.ages[to..to + copy_width]
                    .copy_from_slice(&self.cells.ages[from..from + copy_width]);
            }
        }

        debug!(
            "Resized grid from {}x{} to {}x{}",
            old_size.width, old_size.height, new_size.width, new_size.height
        );
        self.cells = new_cells;
        self.next_cells = AgeCells::new(new_size);
    }

    pub fn randomize(&mut self, density: f64, rand: &mut Random) {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let Ok(alive) = Bernoulli::new(density) else {
            return;
        };
        for age in self.cells.ages.iter_mut() {
            *age = if rand.sample(&alive) { 1 } else { 0 };
        }
    }

    /// Paints (age 1) or erases (age 0) the cell at column `x`, row `y`,
    /// discarding any age it had. Coordinates off the grid are ignored.
    pub fn set_cell(&mut self, x: i64, y: i64, alive: bool) {
        let (Ok(col), Ok(row)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(age) = self.cells.cell_mut(Loc::new(row, col)) {
            *age = if alive { 1 } else { 0 };
        }
    }

    pub fn count_neighbors(&self, loc: Loc, wrap: bool) -> u32 {
        let mut result = 0;
        Neighborhood::new(&self.cells, loc, wrap).for_neighbor_cells(|age| {
            if age != 0 {
                result += 1;
            }
        });
        result
    }

    /// Advances one generation under B3/S23. Survivors age by one up to
    /// `max_age` (clamped to 1..=255); newborns start at age 1.
    pub fn step(&mut self, wrap: bool, max_age: u32) {
        let cap = max_age.clamp(1, CellAge::MAX as u32) as CellAge;
        for row in 0..self.height() {
            for col in 0..self.width() {
                let loc = Loc::new(row, col);
                let neighbors = self.count_neighbors(loc, wrap);
                self.next_cells[loc] = Self::next_age(self.cells[loc], neighbors, cap);
            }
        }
        mem::swap(&mut self.cells, &mut self.next_cells);
    }

    fn next_age(age: CellAge, neighbors: u32, cap: CellAge) -> CellAge {
        match (age, neighbors) {
            (0, 3) => 1,
            (0, _) => 0,
            (age, 2..=3) => age.saturating_add(1).min(cap),
            _ => 0,
        }
    }

    fn at_least_one_cell(size: GridSize) -> GridSize {
        GridSize::new(size.width.max(1), size.height.max(1))
    }
}

#[derive(Clone, Debug)]
struct AgeCells {
    ages: Vec<CellAge>,
    size: GridSize,
}

impl AgeCells {
    fn new(size: GridSize) -> Self {
        Self {
            ages: vec![0; size.area()],
            size,
        }
    }

    fn cell(&self, loc: Loc) -> Option<&CellAge> {
        loc.grid_index(self.size).map(|index| &self.ages[index])
    }

    fn cell_mut(&mut self, loc: Loc) -> Option<&mut CellAge> {
        loc.grid_index(self.size).map(|index| &mut self.ages[index])
    }
}

impl Index<Loc> for AgeCells {
    type Output = CellAge;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl IndexMut<Loc> for AgeCells {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.cell_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

/// The eight cells around a center. Without wrapping, neighbors past an edge
/// are absent rather than dead.
struct Neighborhood<'a> {
    cells: &'a AgeCells,
    rows: [Option<u32>; 3],
    cols: [Option<u32>; 3],
}

impl<'a> Neighborhood<'a> {
    fn new(cells: &'a AgeCells, center: Loc, wrap: bool) -> Self {
        let (row_above, row_below) = Self::adjacent_indexes(center.row, cells.size.height, wrap);
        let (col_left, col_right) = Self::adjacent_indexes(center.col, cells.size.width, wrap);
        Self {
            cells,
            rows: [row_above, Some(center.row), row_below],
            cols: [col_left, Some(center.col), col_right],
        }
    }

    fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(CellAge),
    {
        for row in 0..3 {
            for col in 0..3 {
                if row != 1 || col != 1 {
                    self.for_cell(row, col, &mut f);
                }
            }
        }
    }

    fn for_cell<F>(&self, row: usize, col: usize, f: &mut F)
    where
        F: FnMut(CellAge),
    {
        if let (Some(row), Some(col)) = (self.rows[row], self.cols[col]) {
            f(self.cells[Loc::new(row, col)]);
        }
    }

    fn adjacent_indexes(cell_index: u32, max: u32, wrap: bool) -> (Option<u32>, Option<u32>) {
        let below = cell_index as i64 - 1;
        let above = cell_index as i64 + 1;
        if wrap {
            (Some(Self::modulo(below, max)), Some(Self::modulo(above, max)))
        } else {
            (Self::in_range(below, max), Self::in_range(above, max))
        }
    }

    fn modulo(val: i64, max: u32) -> u32 {
        val.rem_euclid(max as i64) as u32
    }

    fn in_range(val: i64, max: u32) -> Option<u32> {
        (0..max as i64).contains(&val).then_some(val as u32)
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn sample<T, D>(&mut self, distribution: &D) -> T
    where
        D: Distribution<T>,
    {
        distribution.sample(&mut self.rng)
    }
}

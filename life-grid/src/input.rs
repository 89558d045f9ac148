use crate::grid::AgeGrid;
use arrayvec::ArrayVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellEdit {
    Paint { x: i64, y: i64 },
    Erase { x: i64, y: i64 },
}

impl CellEdit {
    pub fn apply(self, grid: &mut AgeGrid) {
        match self {
            CellEdit::Paint { x, y } => grid.set_cell(x, y, true),
            CellEdit::Erase { x, y } => grid.set_cell(x, y, false),
        }
    }
}

/// Edits caused by one pointer event. Paint comes before erase, so holding
/// both buttons leaves the cell dead.
pub type PointerEdits = ArrayVec<CellEdit, 2>;

/// Turns pointer state into grid edits: the left button paints, the right
/// button erases. Position is only known from motion events, so a press
/// before the pointer first moves paints nothing.
#[derive(Clone, Debug)]
pub struct InputMapper {
    cell_px: u32,
    left_pressed: bool,
    right_pressed: bool,
    position: Option<(f64, f64)>,
}

impl InputMapper {
    pub fn new(cell_px: u32) -> Self {
        Self {
            cell_px: cell_px.max(1),
            left_pressed: false,
            right_pressed: false,
            position: None,
        }
    }

    pub fn left_pressed(&self) -> bool {
        self.left_pressed
    }

    pub fn right_pressed(&self) -> bool {
        self.right_pressed
    }

    pub fn on_button(&mut self, button: PointerButton, pressed: bool) -> PointerEdits {
        match button {
            PointerButton::Left => self.left_pressed = pressed,
            PointerButton::Right => self.right_pressed = pressed,
            PointerButton::Other => {}
        }
        if pressed {
            self.edits_under_pointer()
        } else {
            PointerEdits::new()
        }
    }

    pub fn on_moved(&mut self, x: f64, y: f64) -> PointerEdits {
        self.position = Some((x, y));
        self.edits_under_pointer()
    }

    pub fn pointer_cell(&self) -> Option<(i64, i64)> {
        self.position
            .map(|(x, y)| (self.pixel_to_cell(x), self.pixel_to_cell(y)))
    }

    fn edits_under_pointer(&self) -> PointerEdits {
        let mut result = PointerEdits::new();
        if let Some((x, y)) = self.pointer_cell() {
            if self.left_pressed {
                result.push(CellEdit::Paint { x, y });
            }
            if self.right_pressed {
                result.push(CellEdit::Erase { x, y });
            }
        }
        result
    }

    fn pixel_to_cell(&self, pixel: f64) -> i64 {
        (pixel / self.cell_px as f64).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridSize, Loc};

    #[test]
    fn no_edits_without_buttons() {
        let mut input = InputMapper::new(16);
        assert!(input.on_moved(40.0, 40.0).is_empty());
    }

    #[test]
    fn left_drag_paints_cells_under_pointer() {
        let mut input = InputMapper::new(16);
        input.on_moved(17.0, 33.5);
        let edits = input.on_button(PointerButton::Left, true);
        assert_eq!(edits.as_slice(), &[CellEdit::Paint { x: 1, y: 2 }]);

        let edits = input.on_moved(47.9, 0.0);
        assert_eq!(edits.as_slice(), &[CellEdit::Paint { x: 2, y: 0 }]);

        assert!(input.on_button(PointerButton::Left, false).is_empty());
        assert!(input.on_moved(100.0, 100.0).is_empty());
    }

    #[test]
    fn press_before_any_motion_does_nothing() {
        let mut input = InputMapper::new(8);
        assert!(input.on_button(PointerButton::Right, true).is_empty());
        assert!(input.right_pressed());
        let edits = input.on_moved(9.0, 9.0);
        assert_eq!(edits.as_slice(), &[CellEdit::Erase { x: 1, y: 1 }]);
    }

    #[test]
    fn erase_wins_when_both_buttons_held() {
        let mut grid = crate::AgeGrid::new(GridSize::new(4, 4));
        let mut input = InputMapper::new(10);
        input.on_moved(15.0, 25.0);
        input.on_button(PointerButton::Left, true);
        let edits = input.on_button(PointerButton::Right, true);
        assert_eq!(
            edits.as_slice(),
            &[CellEdit::Paint { x: 1, y: 2 }, CellEdit::Erase { x: 1, y: 2 }]
        );
        for edit in edits {
            edit.apply(&mut grid);
        }
        assert_eq!(grid.age(Loc::new(2, 1)), Some(0));
    }

    #[test]
    fn negative_positions_map_off_grid() {
        let mut input = InputMapper::new(16);
        input.on_moved(-3.0, 5.0);
        assert_eq!(input.pointer_cell(), Some((-1, 0)));
    }

    #[test]
    fn other_buttons_do_not_edit() {
        let mut input = InputMapper::new(4);
        input.on_moved(1.0, 1.0);
        assert!(input.on_button(PointerButton::Other, true).is_empty());
        assert!(!input.left_pressed() && !input.right_pressed());
    }
}

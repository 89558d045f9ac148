use error_iter::ErrorIter as _;
use life_grid::{DrawSink, SurfaceSize};
use log::error;
use pixels::Pixels;

/// Draws frames into a `pixels` RGBA buffer of `size` pixels.
pub struct PixelsSink<'a> {
    pixels: &'a mut Pixels<'static>,
    size: SurfaceSize,
}

impl<'a> PixelsSink<'a> {
    pub fn new(pixels: &'a mut Pixels<'static>, size: SurfaceSize) -> Self {
        Self { pixels, size }
    }
}

impl DrawSink for PixelsSink<'_> {
    fn clear(&mut self, rgba: [u8; 4]) {
        clear_rgba(self.pixels.frame_mut(), rgba);
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]) {
        fill_rect_rgba(self.pixels.frame_mut(), self.size, x, y, width, height, rgba);
    }

    fn present(&mut self) {
        if let Err(err) = self.pixels.render() {
            error!("pixels.render() failed: {err}");
            for source in err.sources().skip(1) {
                error!("  Caused by: {source}");
            }
        }
    }
}

pub fn clear_rgba(frame: &mut [u8], rgba: [u8; 4]) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&rgba);
    }
}

/// Fills a rectangle of an RGBA frame `size` pixels large, clipped to the
/// frame.
pub fn fill_rect_rgba(
    frame: &mut [u8],
    size: SurfaceSize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rgba: [u8; 4],
) {
    let frame_width = size.width as usize;
    if frame_width == 0 {
        return;
    }
    let frame_height = (size.height as usize).min(frame.len() / (4 * frame_width));

    let left = (x as usize).min(frame_width);
    let right = (x as usize + width as usize).min(frame_width);
    let top = (y as usize).min(frame_height);
    let bottom = (y as usize + height as usize).min(frame_height);

    for row in top..bottom {
        let start = 4 * (row * frame_width + left);
        let end = 4 * (row * frame_width + right);
        clear_rgba(&mut frame[start..end], rgba);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [0xff, 0, 0, 0xff];
    const BLACK: [u8; 4] = [0, 0, 0, 0xff];

    fn frame(width: u32, height: u32) -> Vec<u8> {
        let mut result = vec![0; 4 * width as usize * height as usize];
        clear_rgba(&mut result, BLACK);
        result
    }

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let start = 4 * (y * width + x) as usize;
        [frame[start], frame[start + 1], frame[start + 2], frame[start + 3]]
    }

    #[test]
    fn fills_inside_rect_only() {
        let size = SurfaceSize::new(6, 5);
        let mut buffer = frame(6, 5);
        fill_rect_rgba(&mut buffer, size, 2, 1, 2, 3, RED);
        for y in 0..5 {
            for x in 0..6 {
                let inside = (2..4).contains(&x) && (1..4).contains(&y);
                let expected = if inside { RED } else { BLACK };
                assert_eq!(pixel(&buffer, 6, x, y), expected, "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn clips_rect_to_frame() {
        let size = SurfaceSize::new(4, 4);
        let mut buffer = frame(4, 4);
        fill_rect_rgba(&mut buffer, size, 3, 3, 16, 16, RED);
        assert_eq!(pixel(&buffer, 4, 3, 3), RED);
        assert_eq!(pixel(&buffer, 4, 2, 3), BLACK);

        fill_rect_rgba(&mut buffer, size, 10, 0, 4, 4, RED);
        fill_rect_rgba(&mut buffer, size, u32::MAX, u32::MAX, u32::MAX, u32::MAX, RED);
        let reds = buffer.chunks_exact(4).filter(|p| *p == RED).count();
        assert_eq!(reds, 1);
    }

    #[test]
    fn tolerates_short_frame() {
        let size = SurfaceSize::new(4, 4);
        let mut buffer = frame(4, 2);
        fill_rect_rgba(&mut buffer, size, 0, 0, 4, 4, RED);
        assert!(buffer.chunks_exact(4).all(|p| p == RED));
    }
}

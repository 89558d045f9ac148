use crate::grid::CellAge;

pub const BACKGROUND_RGBA: [u8; 4] = [0x00, 0x00, 0x00, 0xff];

const YOUNG_HUE: f32 = 200.0;
const OLD_VALUE: f32 = 0.35;

/// Color for a cell of the given age. Dead cells get the background;
/// live cells sweep from blue-cyan toward a dimmer red as they near `max_age`.
pub fn color_for_age(age: CellAge, max_age: u32) -> [u8; 4] {
    if age == 0 {
        return BACKGROUND_RGBA;
    }

    let cap = max_age.max(1);
    let t = if cap == 1 {
        0.0
    } else {
        (u32::from(age).min(cap) - 1) as f32 / (cap - 1) as f32
    };

    let hue = YOUNG_HUE * (1.0 - t);
    let value = 1.0 - (1.0 - OLD_VALUE) * t;
    hsv_to_rgba(hue, 1.0, value)
}

pub fn hsv_to_rgba(hue_deg: f32, saturation: f32, value: f32) -> [u8; 4] {
    let hue = hue_deg.rem_euclid(360.0);

    let chroma = value * saturation;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match hue {
        h if h < 60.0 => (chroma, x, 0.0),
        h if h < 120.0 => (x, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, x),
        h if h < 240.0 => (0.0, x, chroma),
        h if h < 300.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [to_byte(r + m), to_byte(g + m), to_byte(b + m), 0xff]
}

fn to_byte(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}

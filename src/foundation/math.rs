/// Beat grid resolution: positions snap to 1/48 of a beat.
pub(crate) const GRID_DIVISIONS: f64 = 48.0;

/// Round `x` to the nearest multiple of `1 / divisions`, ties toward +inf.
pub(crate) fn quantize(x: f64, divisions: f64) -> f64 {
    (x * divisions + 0.5).floor() / divisions
}

/// Whether `a` and `b` fall on the same grid position.
pub(crate) fn same_grid_position(a: f64, b: f64) -> bool {
    ((a - b) * GRID_DIVISIONS).abs() < 1e-6
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

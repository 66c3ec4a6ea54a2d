pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Scale a 0..=100 percentage to a 0..=255 channel value.
pub(crate) fn percent_to_u8(percent: u8) -> u8 {
    ((u32::from(percent.min(100)) * 255 + 50) / 100) as u8
}

/// Integer division that floors toward negative infinity, matching `(int)` of a
/// non-negative quotient and staying stable for negative overflow amounts.
pub(crate) fn div_floor(a: i32, b: i32) -> i32 {
    if b == 0 {
        return 0;
    }
    a.div_euclid(b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

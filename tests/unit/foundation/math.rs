use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
    assert_eq!(mul_div255_u16(100, 128), 50);
}

#[test]
fn percent_maps_endpoints_and_midpoint() {
    assert_eq!(percent_to_u8(0), 0);
    assert_eq!(percent_to_u8(100), 255);
    assert_eq!(percent_to_u8(50), 128);
    assert_eq!(percent_to_u8(250), 255);
}

#[test]
fn div_floor_handles_zero_divisor_and_negatives() {
    assert_eq!(div_floor(7, 2), 3);
    assert_eq!(div_floor(-7, 2), -4);
    assert_eq!(div_floor(5, 0), 0);
}

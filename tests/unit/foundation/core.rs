use super::*;

#[test]
fn size_from_i32_clamps_negatives() {
    assert_eq!(Size::from_i32(-4, 7), Size::new(0, 7));
    assert!(Size::from_i32(-4, 7).is_empty());
}

#[test]
fn size_aspect_handles_zero_height() {
    assert_eq!(Size::new(200, 100).aspect(), 2.0);
    assert_eq!(Size::new(5, 0).aspect(), 1.0);
}

#[test]
fn position_offset_is_additive() {
    assert_eq!(Position::new(3, -2).offset(1, 1), Position::new(4, -1));
    assert_eq!(Position::origin(), Position::default());
}

use super::*;

#[test]
fn block_measure_is_proportional_to_length_and_size() {
    let mut t = BlockTypesetter::new();
    let r = t.measure(&TextRun::new("Ada", "any.ttf", 10.0)).unwrap();
    assert_eq!(r, Rect::new(0.0, 0.0, 18.0, 10.0));
    assert_eq!(advance(r), 18);
    let empty = t.measure(&TextRun::new("", "any.ttf", 10.0)).unwrap();
    assert_eq!(advance(empty), 0);
    assert_eq!(t.measured(), 2);
}

#[test]
fn block_draw_paints_boxes_and_skips_spaces() {
    let mut t = BlockTypesetter::new();
    let mut target = Raster::transparent(Size::new(40, 12));
    t.draw(
        &mut target,
        &TextRun::new("a b", "any.ttf", 10.0),
        Color::rgb(255, 255, 255),
        Position::new(1, 1),
    )
    .unwrap();
    assert_eq!(target.pixel(1, 1), Some([255, 255, 255, 255]));
    // Space cell stays empty.
    assert_eq!(target.pixel(8, 5), Some([0, 0, 0, 0]));
    // Third glyph starts at 1 + 2 * 6.
    assert_eq!(target.pixel(13, 5), Some([255, 255, 255, 255]));
    assert_eq!(t.drawn(), 1);
}

#[test]
fn parley_reports_missing_fonts_as_asset_errors() {
    let mut t = ParleyTypesetter::new(std::env::temp_dir().join("statcard_no_fonts_here"));
    let err = t
        .measure(&TextRun::new("x", "missing.ttf", 8.0))
        .unwrap_err();
    assert!(matches!(err, CardError::AssetLoad(_)));
}

#[test]
fn parley_rejects_non_positive_sizes() {
    let mut t = ParleyTypesetter::new(".");
    assert!(matches!(
        t.measure(&TextRun::new("x", "missing.ttf", 0.0)),
        Err(CardError::Render(_))
    ));
}

#[test]
fn parley_brush_carries_no_color() {
    assert_eq!(std::mem::size_of::<TextBrush>(), 0);
    assert_eq!(TextBrush::default(), TextBrush);
}

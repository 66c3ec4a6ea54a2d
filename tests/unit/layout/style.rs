use serde_json::json;

use super::*;

#[test]
fn canvas_is_clamped_to_minimum_extent() {
    for opts in [
        json!({}),
        json!({"width": 0, "height": -30}),
        json!({"width": "3", "height": 9}),
        json!({"width": "wide", "height": [1, 2]}),
    ] {
        let s = StyleTokens::from_options(&Tree::new(opts));
        assert!(s.size.width >= MIN_EXTENT && s.size.height >= MIN_EXTENT);
    }
    let s = StyleTokens::from_options(&Tree::new(json!({"width": 300, "height": "80"})));
    assert_eq!(s.size, Size::new(300, 80));
}

#[test]
fn stock_defaults_apply_when_options_are_absent() {
    let s = StyleTokens::from_options(&Tree::default());
    assert_eq!(s.card_padding, 1);
    assert_eq!(s.area_padding, 4);
    assert_eq!(s.item_margin, 8);
    assert_eq!(s.background_color, Color::rgb(0, 0, 0));
    assert_eq!(s.background.fit, FitMode::Cover);
    assert_eq!(s.background.h_align, HAlign::Left);
    assert_eq!(s.background.v_align, VAlign::Center);
    assert_eq!(s.grid.border_size, 1);
    assert_eq!(s.grid.margin, 1);
    assert_eq!(s.text.size, 8);
    assert_eq!(s.text.icon_size, 10);
    assert_eq!(s.text.label_size, 5);
    assert_eq!(s.text.bold_font, s.text.font);
    assert!(s.text.shadow);
    assert_eq!(s.scheme, Color::rgb(0x66, 0x99, 0xcc));
}

#[test]
fn wrong_types_fall_back_instead_of_failing() {
    let s = StyleTokens::from_options(&Tree::new(json!({
        "color": "not-a-color",
        "areaPadding": -5,
        "background": {"alpha": 400, "color": "#fff"},
        "text": {"shadow": "false", "size": "12"}
    })));
    assert_eq!(s.scheme, Color::rgb(0x66, 0x99, 0xcc));
    assert_eq!(s.area_padding, 0);
    assert_eq!(s.background_color, Color::rgb(255, 255, 255));
    assert!(!s.text.shadow);
    assert_eq!(s.text.size, 12);
}

#[test]
fn layout_defaults_are_honoured() {
    let defaults = StyleDefaults {
        size: Size::new(300, 80),
        font_size: 14,
        ..StyleDefaults::default()
    };
    let s = StyleTokens::resolve(&Tree::default(), &defaults);
    assert_eq!(s.size, Size::new(300, 80));
    assert_eq!(s.text.size, 14);
}

use serde_json::json;

use super::*;

#[test]
fn parses_overrides_and_defaults() {
    let e = Element::from_value(&json!({
        "type": "text-vertical",
        "data": "steam.games",
        "label": "Games",
        "icon": "\u{f11b}",
        "alpha": "60",
        "shadow": "false",
        "fontSize": 12,
        "span": 2,
        "align": "right",
        "vertical": "bottom"
    }))
    .unwrap();
    assert_eq!(e.kind, ElementKind::TextVertical);
    assert_eq!(e.data.as_deref(), Some("steam.games"));
    assert_eq!(e.label.as_deref(), Some("Games"));
    assert_eq!(e.alpha, 60);
    assert_eq!(e.shadow, Some(false));
    assert_eq!(e.font_size, Some(12));
    assert_eq!(e.span, 2);
    assert_eq!(e.rows, 1);
    assert_eq!(e.align, HAlign::Right);
    assert_eq!(e.vertical, VAlign::Bottom);

    let d = Element::from_value(&json!({})).unwrap();
    assert_eq!(d.kind, ElementKind::Text);
    assert_eq!(d.alpha, 100);
    assert_eq!(d.span, 1);
    assert_eq!(d.align, HAlign::Center);
    assert_eq!(d.vertical, VAlign::Center);
    assert!(Element::from_value(&json!("text")).is_none());
}

#[test]
fn literal_value_wins_over_data_path() {
    let data = Tree::new(json!({"name": "Ada", "level": 42}));
    let literal = Element::from_value(&json!({"value": "Grace", "data": "name"})).unwrap();
    assert_eq!(literal.text(&data).as_deref(), Some("Grace"));

    let bound = Element::from_value(&json!({"data": "level"})).unwrap();
    assert_eq!(bound.text(&data).as_deref(), Some("42"));

    let missing = Element::from_value(&json!({"data": "nope", "value": ""})).unwrap();
    assert_eq!(missing.text(&data), None);
}

#[test]
fn grid_items_come_from_items_or_data() {
    let data = Tree::new(json!({"badges": [{"image": "a.png"}], "empty": []}));
    let from_data = Element::from_value(&json!({"data": "badges"})).unwrap();
    assert_eq!(from_data.grid_items(&data).unwrap().len(), 1);

    let literal =
        Element::from_value(&json!({"items": [{"image": "b.png"}, {"image": "c.png"}]})).unwrap();
    assert_eq!(literal.grid_items(&data).unwrap().len(), 2);

    let empty = Element::from_value(&json!({"data": "empty"})).unwrap();
    assert!(empty.grid_items(&data).is_none());
}

#[test]
fn unknown_types_and_non_map_entries() {
    assert_eq!(ElementKind::parse("sparkline"), ElementKind::Text);
    let list = Element::list_from(&[json!({"type": "image"}), json!(3), json!({"type": "grid"})]);
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].kind, ElementKind::Grid);
}

#[test]
fn alignment_defaults_to_center() {
    let e = Element::from_value(&json!({"align": "middle", "vertical": "uppercenter"})).unwrap();
    assert_eq!(e.align, HAlign::Center);
    assert_eq!(e.vertical, VAlign::Center);
    let e = Element::from_value(&json!({"align": "left", "vertical": "top"})).unwrap();
    assert_eq!(e.align, HAlign::Left);
    assert_eq!(e.vertical, VAlign::Top);
}

use serde_json::{Value, json};

use super::*;
use crate::assets::loader::MemoryAssetLoader;
use crate::assets::text::BlockTypesetter;
use crate::tree::resolve::Tree;

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn draw(options: Value, data: Value) -> Raster {
    let options = Tree::new(options);
    let data = Tree::new(data);
    let mut assets = MemoryAssetLoader::new()
        .with("sq.png", Raster::new(Size::new(8, 8), Color::rgb(0, 0, 255)))
        .with("bg.png", Raster::new(Size::new(10, 10), Color::rgb(255, 0, 0)));
    let mut text = BlockTypesetter::new();
    let mut ctx = RenderContext {
        options: &options,
        data: &data,
        assets: &mut assets,
        text: &mut text,
    };
    Classic.draw(&mut ctx).unwrap()
}

#[test]
fn canvas_is_clamped_to_minimum() {
    let canvas = draw(json!({"width": 3}), json!({}));
    assert_eq!(canvas.size(), Size::new(10, 10));
}

#[test]
fn right_corner_aligns_by_trimmed_width() {
    let canvas = draw(
        json!({
            "width": 100, "height": 60,
            "text": {"shadow": false},
            "areas": {"top": {"right": [{"value": "AB"}]}}
        }),
        json!({}),
    );
    // 20px trimmed area (4 + 12 + 4) pasted flush right inside 1px card padding.
    assert_eq!(canvas.pixel(83, 11), Some(WHITE));
    assert_ne!(canvas.pixel(5, 11), Some(WHITE));
}

#[test]
fn bottom_corner_aligns_by_trimmed_height() {
    let canvas = draw(
        json!({
            "width": 100, "height": 60,
            "text": {"shadow": false},
            "areas": {"bottom": {"left": [{"data": "name"}]}}
        }),
        json!({"name": "A"}),
    );
    assert_eq!(canvas.pixel(5, 47), Some(WHITE));
}

#[test]
fn center_columns_align_grids() {
    let canvas = draw(
        json!({
            "width": 100, "height": 100,
            "background": {"color": "#FFFFFF"},
            "areas": {"center": [
                [{"data": "badges"}],
                [{"items": [{"image": "sq.png"}], "align": "right", "vertical": "top"}]
            ]}
        }),
        json!({"badges": [{"image": "sq.png"}]}),
    );
    // column 0: 42px cell centered in a 50x45 region starting at y=35
    assert_eq!(canvas.pixel(3, 36), Some(WHITE));
    assert_eq!(canvas.pixel(4, 36), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(5, 37), Some([0, 0, 255, 255]));
    // column 1: right-aligned, top-aligned
    assert_eq!(canvas.pixel(54, 35), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(55, 36), Some([0, 0, 255, 255]));
    assert_eq!(canvas.pixel(95, 36), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(96, 36), Some(WHITE));
}

#[test]
fn background_comes_from_the_data_path() {
    let canvas = draw(
        json!({"width": 100, "height": 60, "background": {"data": "bg"}}),
        json!({"bg": "bg.png"}),
    );
    assert_eq!(canvas.pixel(50, 35), Some([255, 0, 0, 255]));

    let missing = draw(
        json!({"width": 100, "height": 60, "background": {"value": "gone.png"}}),
        json!({}),
    );
    assert_eq!(missing.pixel(50, 35), Some([0, 0, 0, 255]));
}

#[test]
fn header_gradient_is_tinted() {
    let canvas = draw(json!({"width": 100, "height": 60}), json!({}));
    assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
    let header = canvas.pixel(50, 2).unwrap();
    assert!(header[0] > 0 || header[1] > 0 || header[2] > 0);
    assert_eq!(canvas.pixel(50, 35), Some([0, 0, 0, 255]));
}

#[test]
fn center_text_elements_render_as_single_areas() {
    let canvas = draw(
        json!({
            "width": 100, "height": 100,
            "text": {"shadow": false},
            "areas": {"center": [[{"value": "Hi"}]]}
        }),
        json!({}),
    );
    let drawn = (35..80)
        .flat_map(|y| (0..100).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.pixel(x, y) == Some(WHITE))
        .count();
    assert!(drawn > 0);
}

#[test]
fn band_heights_are_limited_to_the_canvas() {
    let canvas = draw(
        json!({
            "width": 40, "height": 20,
            "topAreaHeight": 2147483647, "bottomAreaHeight": 2147483647,
            "text": {"shadow": false},
            "areas": {
                "top": {"left": [{"value": "A"}]},
                "center": [[{"value": "B"}]]
            }
        }),
        json!({}),
    );
    assert_eq!(canvas.size(), Size::new(40, 20));
    assert_eq!(canvas.pixel(6, 8), Some(WHITE));
}

#[test]
fn span_is_limited_to_the_column_count() {
    let canvas = draw(
        json!({
            "width": 100, "height": 100,
            "background": {"color": "#FFFFFF"},
            "areas": {"center": [[{"data": "badges", "span": 2147483648u64}], []]}
        }),
        json!({"badges": [{"image": "sq.png"}]}),
    );
    // centered across both columns
    assert_eq!(canvas.pixel(28, 36), Some(WHITE));
    assert_eq!(canvas.pixel(29, 36), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(30, 37), Some([0, 0, 255, 255]));
}

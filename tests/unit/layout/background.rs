use super::*;

fn solid(size: Size, rgba: [u8; 4]) -> Raster {
    Raster::from_image(image::RgbaImage::from_pixel(
        size.width,
        size.height,
        image::Rgba(rgba),
    ))
}

fn spec(fit: FitMode, h_align: HAlign, v_align: VAlign) -> BackgroundSpec {
    BackgroundSpec {
        fit,
        h_align,
        v_align,
        darken: false,
        colorize: false,
        blur: false,
    }
}

#[test]
fn cover_wide_source_fits_height_and_crops_width() {
    let p = place_background(
        Size::new(200, 100),
        Size::new(100, 100),
        FitMode::Cover,
        HAlign::Left,
        VAlign::Top,
    );
    assert_eq!(p.resized, Size::new(200, 100));
    assert_eq!(p.crop, Some((Position::new(0, 0), Size::new(100, 100))));
    assert_eq!(p.position, Position::origin());
}

#[test]
fn cover_tall_source_fits_width_and_crops_height() {
    let p = place_background(
        Size::new(100, 200),
        Size::new(100, 100),
        FitMode::Cover,
        HAlign::Left,
        VAlign::Top,
    );
    assert_eq!(p.resized.width, 100);
    assert_eq!(p.crop.unwrap().1, Size::new(100, 100));
}

#[test]
fn cover_vertical_anchor_picks_proportional_crop_offsets() {
    let offset = |v| {
        place_background(
            Size::new(100, 400),
            Size::new(100, 100),
            FitMode::Cover,
            HAlign::Left,
            v,
        )
        .crop
        .unwrap()
        .0
        .y
    };
    assert_eq!(offset(VAlign::Top), 0);
    assert_eq!(offset(VAlign::UpperCenter), 100);
    assert_eq!(offset(VAlign::Center), 150);
    assert_eq!(offset(VAlign::LowerCenter), 200);
    assert_eq!(offset(VAlign::Bottom), 300);
}

#[test]
fn cover_horizontal_anchor_picks_crop_offsets() {
    let offset = |h| {
        place_background(
            Size::new(300, 100),
            Size::new(100, 100),
            FitMode::Cover,
            h,
            VAlign::Top,
        )
        .crop
        .unwrap()
        .0
        .x
    };
    assert_eq!(offset(HAlign::Left), 0);
    assert_eq!(offset(HAlign::Center), 100);
    assert_eq!(offset(HAlign::Right), 200);
}

#[test]
fn contain_fits_inside_and_aligns_the_margin() {
    let p = place_background(
        Size::new(200, 100),
        Size::new(100, 100),
        FitMode::Contain,
        HAlign::Left,
        VAlign::Center,
    );
    assert_eq!(p.resized, Size::new(100, 50));
    assert_eq!(p.crop, None);
    assert_eq!(p.position, Position::new(0, 25));

    let p = place_background(
        Size::new(50, 100),
        Size::new(100, 100),
        FitMode::Contain,
        HAlign::Right,
        VAlign::Bottom,
    );
    assert_eq!(p.resized, Size::new(50, 100));
    assert_eq!(p.position, Position::new(50, 0));
}

#[test]
fn unknown_tokens_fall_back() {
    assert_eq!(FitMode::parse("stretch"), FitMode::Natural);
    assert_eq!(HAlign::parse("middle"), HAlign::Left);
    assert_eq!(VAlign::parse(""), VAlign::Top);
}

#[test]
fn cover_output_fills_the_whole_canvas() {
    let mut canvas = Raster::transparent(Size::new(40, 20));
    let source = solid(Size::new(10, 30), [200, 10, 10, 255]);
    apply_background(
        &mut canvas,
        &source,
        &spec(FitMode::Cover, HAlign::Left, VAlign::Center),
        Color::rgb(0, 0, 0),
    )
    .unwrap();
    for (x, y) in [(0, 0), (39, 0), (0, 19), (39, 19)] {
        assert_eq!(canvas.pixel(x, y).unwrap()[3], 255);
    }
}

#[test]
fn contain_right_leaves_the_left_margin_untouched() {
    let mut canvas = Raster::transparent(Size::new(40, 20));
    let source = solid(Size::new(10, 10), [10, 200, 10, 255]);
    apply_background(
        &mut canvas,
        &source,
        &spec(FitMode::Contain, HAlign::Right, VAlign::Top),
        Color::rgb(0, 0, 0),
    )
    .unwrap();
    assert_eq!(canvas.pixel(0, 10), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(19, 10), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(20, 10), Some([10, 200, 10, 255]));
    assert_eq!(canvas.pixel(39, 19), Some([10, 200, 10, 255]));
}

#[test]
fn darken_and_colorize_stack_their_overlays() {
    let source = solid(Size::new(10, 10), [255, 255, 255, 255]);
    let mut plain = Raster::new(Size::new(10, 10), Color::rgb(0, 0, 0));
    apply_background(
        &mut plain,
        &source,
        &spec(FitMode::Cover, HAlign::Left, VAlign::Top),
        Color::rgb(0, 0, 255),
    )
    .unwrap();
    assert_eq!(plain.pixel(5, 5), Some([255, 255, 255, 255]));

    let mut darkened = Raster::new(Size::new(10, 10), Color::rgb(0, 0, 0));
    let mut s = spec(FitMode::Cover, HAlign::Left, VAlign::Top);
    s.darken = true;
    apply_background(&mut darkened, &source, &s, Color::rgb(0, 0, 255)).unwrap();
    let d = darkened.pixel(5, 5).unwrap();
    assert!(d[0] < 255 && d[0] == d[2]);

    s.colorize = true;
    let mut both = Raster::new(Size::new(10, 10), Color::rgb(0, 0, 0));
    apply_background(&mut both, &source, &s, Color::rgb(0, 0, 255)).unwrap();
    let b = both.pixel(5, 5).unwrap();
    assert!(b[2] > b[0]);
}

#[test]
fn blurred_background_is_still_deterministic() {
    let source = solid(Size::new(16, 8), [90, 90, 90, 255]);
    let mut s = spec(FitMode::Cover, HAlign::Center, VAlign::Center);
    s.blur = true;
    let mut a = Raster::transparent(Size::new(8, 8));
    let mut b = Raster::transparent(Size::new(8, 8));
    apply_background(&mut a, &source, &s, Color::rgb(0, 0, 0)).unwrap();
    apply_background(&mut b, &source, &s, Color::rgb(0, 0, 0)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.pixel(4, 4), Some([90, 90, 90, 255]));
}

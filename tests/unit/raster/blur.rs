use super::*;

fn image(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn taps_sum_to_one_and_peak_in_the_middle() {
    for (radius, sigma) in [(1, 1.0), (2, 0.5), (4, 3.0)] {
        let k = Kernel::gaussian(radius, sigma).unwrap();
        assert_eq!(k.taps().len(), 2 * radius as usize + 1);
        assert_eq!(k.taps().iter().sum::<u32>(), ONE);
        let mid = k.taps()[radius as usize];
        assert!(k.taps().iter().all(|&t| t <= mid));
    }
}

#[test]
fn radius_0_is_identity() {
    let k = Kernel::gaussian(0, 1.0).unwrap();
    assert_eq!(k.taps(), &[ONE]);
    let mut img = image(1, 2, [1, 2, 3, 4]);
    img.put_pixel(0, 1, image::Rgba([5, 6, 7, 8]));
    let before = img.clone();
    k.apply(&mut img);
    assert_eq!(img, before);
}

#[test]
fn constant_image_is_unchanged() {
    let mut img = image(4, 3, [10, 20, 30, 40]);
    Kernel::gaussian(1, 1.0).unwrap().apply(&mut img);
    assert_eq!(img, image(4, 3, [10, 20, 30, 40]));
}

#[test]
fn spreads_a_single_pixel_to_its_neighbours() {
    let mut img = image(5, 5, [0, 0, 0, 0]);
    img.put_pixel(2, 2, image::Rgba([255, 255, 255, 255]));
    Kernel::gaussian(1, 1.0).unwrap().apply(&mut img);

    let nonzero = img.pixels().filter(|p| p.0[3] != 0).count();
    assert_eq!(nonzero, 9);
    let sum_a: i32 = img.pixels().map(|p| i32::from(p.0[3])).sum();
    assert!((sum_a - 255).abs() <= 4);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn rejects_bad_sigma() {
    assert!(Kernel::gaussian(1, 0.0).is_err());
    assert!(Kernel::gaussian(1, f32::NAN).is_err());
}

use std::io::Cursor;

use super::*;
use crate::foundation::core::Size;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "statcard_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn fs_loader_decodes_each_reference_once() {
    let dir = temp_dir("loader_once");
    std::fs::create_dir_all(dir.join("icons")).unwrap();
    std::fs::write(dir.join("icons/a.png"), png_bytes()).unwrap();

    let mut loader = FsAssetLoader::new(&dir);
    let img = loader.load("icons/a.png").unwrap();
    loader.load("icons/a.png").unwrap();
    assert_eq!(img.size(), Size::new(2, 1));
    assert_eq!(loader.decode_count("icons/a.png"), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn fs_loader_reports_missing_broken_and_remote_assets() {
    let dir = temp_dir("loader_errors");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("broken.png"), b"nope").unwrap();

    let mut loader = FsAssetLoader::new(&dir);
    assert!(matches!(
        loader.load("missing.png"),
        Err(CardError::AssetLoad(_))
    ));
    assert!(matches!(
        loader.load("broken.png"),
        Err(CardError::AssetLoad(_))
    ));
    assert!(matches!(
        loader.load("https://example.com/a.png"),
        Err(CardError::AssetLoad(_))
    ));
    assert!(loader.load("../escape.png").is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn normalize_rel_path_cleans_separators() {
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn memory_loader_serves_registered_images() {
    let mut loader =
        MemoryAssetLoader::new().with("a", Raster::transparent(Size::new(3, 3)));
    assert_eq!(loader.load("a").unwrap().size(), Size::new(3, 3));
    assert!(loader.load("b").is_err());
    assert_eq!(loader.loads(), 1);
}

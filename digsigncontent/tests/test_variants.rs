use digsigncontent::{ContentError, ContentItem, ImageRef, ImageResizer, ImageVariants};
use image::{Rgb, RgbImage};
use tempfile::TempDir;

fn item_with_image(slug: &str, path: Option<std::path::PathBuf>) -> ContentItem {
    ContentItem {
        slug: slug.to_string(),
        title: "Menu".to_string(),
        permalink: "https://example.org/news/menu".to_string(),
        body_html: String::new(),
        image: Some(ImageRef { path, url: None }),
    }
}

#[tokio::test]
async fn test_variant_generated_once_and_fitted() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("menu.png");
    RgbImage::from_pixel(800, 400, Rgb([200, 30, 30]))
        .save(&source)
        .unwrap();

    let media = temp_dir.path().join("media");
    let variants = ImageVariants::new(&media, "http://localhost:8080/media");
    let item = item_with_image("menu", Some(source));

    let url = variants.ensure_size(&item, 400, 400).await.unwrap();
    assert_eq!(url, "http://localhost:8080/media/menu-400x400.webp");

    let path = variants.variant_path("menu", 400, 400);
    assert_eq!(image::image_dimensions(&path).unwrap(), (400, 200));

    // Réutilisation: la source peut disparaître
    let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
    std::fs::remove_file(temp_dir.path().join("menu.png")).unwrap();
    let again = variants.ensure_size(&item, 400, 400).await.unwrap();
    assert_eq!(again, url);
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);
}

#[tokio::test]
async fn test_missing_source_image() {
    let temp_dir = TempDir::new().unwrap();
    let variants = ImageVariants::new(temp_dir.path(), "/media");

    let no_path = item_with_image("remote", None);
    assert!(matches!(
        variants.ensure_size(&no_path, 100, 100).await,
        Err(ContentError::NoSourceImage(_))
    ));

    let broken = item_with_image("broken", Some(temp_dir.path().join("missing.jpg")));
    assert!(variants.ensure_size(&broken, 100, 100).await.is_err());
}

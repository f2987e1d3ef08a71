use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};

use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn ingest_downscales_to_max_edge_preserving_aspect() {
    let src = SourceImage::new(png_bytes(1200, 600), "image/png");
    let img = ingest(src, &IngestPolicy::default()).unwrap();
    assert_eq!((img.width(), img.height()), (600, 300));
    assert_eq!(img.pixels().dimensions(), (600, 300));
}

#[test]
fn ingest_passes_small_images_through() {
    let src = SourceImage::new(png_bytes(40, 25), "image/png");
    let img = ingest(src, &IngestPolicy::default()).unwrap();
    assert_eq!(img.size(), Size::new(40, 25).unwrap());
    assert_eq!(
        img.sample(3, 7).unwrap().color,
        Rgba8::new(3, 7, 128, 255)
    );
}

#[test]
fn ingest_respects_custom_max_edge() {
    let policy = IngestPolicy {
        max_edge: 50,
        ..IngestPolicy::default()
    };
    let img = ingest(SourceImage::new(png_bytes(80, 200), "image/png"), &policy).unwrap();
    assert_eq!((img.width(), img.height()), (20, 50));
}

#[test]
fn sample_outside_image_is_none() {
    let img = ingest(
        SourceImage::new(png_bytes(4, 4), "image/png"),
        &IngestPolicy::default(),
    )
    .unwrap();
    assert!(img.sample(4, 0).is_none());
    assert!(img.sample(0, 4).is_none());
    let s = img.sample(1, 2).unwrap();
    assert_eq!((s.x, s.y), (1, 2));
}

#[test]
fn encoded_form_is_a_decodable_jpeg_data_url() {
    let img = ingest(
        SourceImage::new(png_bytes(30, 20), "image/png"),
        &IngestPolicy::default(),
    )
    .unwrap();

    let decoded = image::load_from_memory_with_format(img.encoded(), image::ImageFormat::Jpeg)
        .unwrap();
    assert_eq!((decoded.width(), decoded.height()), (30, 20));

    let url = img.to_data_url();
    let b64 = url.strip_prefix("data:image/jpeg;base64,").unwrap();
    assert_eq!(general_purpose::STANDARD.decode(b64).unwrap(), img.encoded());
}

#[test]
fn decode_rejects_garbage_and_empty_input() {
    let err = decode_source(&SourceImage::new(b"not an image".to_vec(), "image/png")).unwrap_err();
    assert!(matches!(err, PollockError::Decode(_)));

    let err = decode_source(&SourceImage::new(Vec::new(), "image/png")).unwrap_err();
    assert!(matches!(err, PollockError::Decode(_)));
}

#[test]
fn flatten_composites_transparent_pixels_onto_white() {
    let img = RgbaImage::from_raw(2, 1, vec![0, 0, 0, 0, 10, 20, 30, 255]).unwrap();
    let flat = flatten_onto(&img, Rgba8::WHITE);
    assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30]);
}

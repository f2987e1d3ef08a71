use super::*;

#[test]
fn size_rejects_zero_dimensions() {
    assert!(Size::new(0, 10).is_err());
    assert!(Size::new(10, 0).is_err());
    assert_eq!(Size::new(1, 1).unwrap().longer_edge(), 1);
}

#[test]
fn fit_within_shrinks_longer_edge_to_bound() {
    let s = Size::new(1200, 600).unwrap().fit_within(600);
    assert_eq!(s, Size::new(600, 300).unwrap());

    let s = Size::new(600, 1200).unwrap().fit_within(600);
    assert_eq!(s, Size::new(300, 600).unwrap());
}

#[test]
fn fit_within_passes_small_sizes_through() {
    let s = Size::new(400, 250).unwrap();
    assert_eq!(s.fit_within(600), s);
    assert_eq!(s.fit_within(400), s);
}

#[test]
fn fit_within_keeps_thin_images_at_least_one_pixel() {
    let s = Size::new(5000, 2).unwrap().fit_within(600);
    assert_eq!(s.width, 600);
    assert_eq!(s.height, 1);
}

#[test]
fn fit_within_rounds_shorter_edge() {
    // 1000x333 -> 600x199.8 -> 600x200
    let s = Size::new(1000, 333).unwrap().fit_within(600);
    assert_eq!(s, Size::new(600, 200).unwrap());
}

#[test]
fn to_u16_rejects_oversized_surfaces() {
    assert_eq!(Size::new(600, 300).unwrap().to_u16().unwrap(), (600, 300));
    assert!(Size::new(70_000, 1).unwrap().to_u16().is_err());
}

#[test]
fn parses_hex_short_long_and_alpha() {
    assert_eq!(Rgba8::parse_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::parse_hex("#ff3366").unwrap(),
        Rgba8::new(0xff, 0x33, 0x66, 255)
    );
    assert_eq!(
        Rgba8::parse_hex("0000ff80").unwrap(),
        Rgba8::new(0, 0, 255, 0x80)
    );
    assert!(Rgba8::parse_hex("#12345").is_err());
    assert!(Rgba8::parse_hex("#gggggg").is_err());
    assert!(Rgba8::parse_hex("#+f+f+f").is_err());
    assert!(Rgba8::parse_hex("+ff").is_err());
    assert!(Rgba8::parse_hex("#-1ffff").is_err());
}

#[test]
fn rgba8_serde_accepts_hex_and_arrays() {
    let c: Rgba8 = serde_json::from_str("\"#000\"").unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 0, 255));

    let c: Rgba8 = serde_json::from_str("[10, 20, 30]").unwrap();
    assert_eq!(c, Rgba8::new(10, 20, 30, 255));

    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());

    let json = serde_json::to_string(&Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(json, "\"#01020304\"");
}

mod common;

use webshot_pdf::{
    Density, Error, Flowable, ImageCodec, PageCursor, PngCodec, chunk_image, scale_to_width,
};

fn cursor_with_header(header: f32) -> PageCursor {
    let mut c = PageCursor::new(684.0, Density::default()).expect("cursor");
    c.advance(header);
    c
}

#[test]
fn wide_screenshot_is_scaled_down_to_the_width_budget() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = common::solid_png(dir.path(), "wide.png", 3000, 1000);

    let codec = PngCodec::new(dir.path().join("bands"));
    let img = codec.open(&path).expect("open");
    let scaled = scale_to_width(&codec, img, 435.0, Density::default()).expect("scale");

    // 3000 px at 300 px/in is 10 in, the budget 435 pt is 6.042 in:
    // scale = 0.60417, truncated like the crop boundaries
    assert_eq!(codec.dimensions(&scaled), (1812, 604));
}

#[test]
fn narrow_screenshot_is_left_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = common::solid_png(dir.path(), "narrow.png", 600, 900);

    let codec = PngCodec::new(dir.path().join("bands"));
    let img = codec.open(&path).expect("open");
    let scaled = scale_to_width(&codec, img, 435.0, Density::default()).expect("scale");

    assert_eq!(codec.dimensions(&scaled), (600, 900));
}

#[test]
fn scaler_never_enlarges() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = PngCodec::new(dir.path().join("bands"));
    for (w, h) in [(100, 50), (900, 2000), (3000, 400), (1813, 1)] {
        let path = common::solid_png(dir.path(), &format!("s{w}x{h}.png"), w, h);
        let img = codec.open(&path).expect("open");
        let scaled = scale_to_width(&codec, img, 435.0, Density::default()).expect("scale");
        let (sw, sh) = codec.dimensions(&scaled);
        assert!(sw <= w && sh <= h, "{w}x{h} grew to {sw}x{sh}");
    }
}

#[test]
fn tall_screenshot_chunks_into_persisted_bands() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = common::solid_png(dir.path(), "tall.png", 600, 3000);

    let mut codec = PngCodec::new(dir.path().join("bands"));
    let mut cursor = cursor_with_header(40.0);
    let bands =
        chunk_image(&mut codec, &path, 435.0, &mut cursor, Density::default()).expect("chunk");

    // 3000 px = 10 std units against 8.944 on page one, 9.5 afterwards
    assert_eq!(bands.len(), 2);
    let mut total_px = 0u32;
    for band in &bands {
        let Flowable::ImageBand { path, height, .. } = band else {
            panic!("expected an image band, got {band:?}");
        };
        assert!(*height > 0.0);
        let stored = image::open(path).expect("band file readable");
        assert_eq!(stored.width(), 600);
        total_px += stored.height();
    }
    assert_eq!(total_px, 3000);
}

#[test]
fn short_screenshot_stays_in_one_band() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = common::solid_png(dir.path(), "short.png", 900, 2000);

    let mut codec = PngCodec::new(dir.path().join("bands"));
    let mut cursor = cursor_with_header(40.0);
    let bands =
        chunk_image(&mut codec, &path, 435.0, &mut cursor, Density::default()).expect("chunk");

    assert_eq!(bands.len(), 1);
    let Flowable::ImageBand { path, width, height } = &bands[0] else {
        panic!("expected an image band");
    };
    let stored = image::open(path).expect("band file readable");
    assert_eq!((stored.width(), stored.height()), (900, 2000));
    // 900 px / 300 px/in * 72 pt/in
    assert!((*width - 216.0).abs() <= 1.0);
    // 2000 px / 300 px/in * 72 pt/in
    assert!((*height - 480.0).abs() <= 1.0);
}

#[test]
fn undecodable_screenshot_is_an_invalid_image_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("not-a-png.png");
    std::fs::write(&path, b"definitely not image data").expect("write");

    let mut codec = PngCodec::new(dir.path().join("bands"));
    let mut cursor = cursor_with_header(40.0);
    let result = chunk_image(&mut codec, &path, 435.0, &mut cursor, Density::default());
    assert!(matches!(result, Err(Error::InvalidImage(_))));
}

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Write a solid-color PNG fixture and return its path.
pub fn solid_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255]));
    img.save(&path).expect("write fixture png");
    path
}

/// Count the image-band flowables in a story.
pub fn band_count(story: &[webshot_pdf::Flowable]) -> usize {
    story
        .iter()
        .filter(|f| matches!(f, webshot_pdf::Flowable::ImageBand { .. }))
        .count()
}

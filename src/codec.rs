use std::path::{Path, PathBuf};

use image::DynamicImage;
use image::imageops::FilterType;

use crate::error::Error;

/// Raster operations the layout engine needs from an image backend.
///
/// `save` must persist the band before returning its path; the layout never
/// hands out a descriptor for a band that is not yet on disk. Cleanup of the
/// saved files belongs to whoever persists the final document.
pub trait ImageCodec {
    type Image;

    fn open(&self, path: &Path) -> Result<Self::Image, Error>;
    fn dimensions(&self, image: &Self::Image) -> (u32, u32);
    fn resize(&self, image: &Self::Image, width: u32, height: u32) -> Result<Self::Image, Error>;
    fn crop(
        &self,
        image: &Self::Image,
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
    ) -> Result<Self::Image, Error>;
    fn save(&mut self, image: &Self::Image) -> Result<PathBuf, Error>;
}

/// PNG-backed codec writing numbered band files into one directory.
pub struct PngCodec {
    band_dir: PathBuf,
    next_band: u32,
}

impl PngCodec {
    pub fn new(band_dir: impl Into<PathBuf>) -> Self {
        Self {
            band_dir: band_dir.into(),
            next_band: 0,
        }
    }

    pub fn band_dir(&self) -> &Path {
        &self.band_dir
    }
}

impl ImageCodec for PngCodec {
    type Image = DynamicImage;

    fn open(&self, path: &Path) -> Result<DynamicImage, Error> {
        let img = image::open(path)
            .map_err(|e| Error::InvalidImage(format!("{}: {e}", path.display())))?;
        if img.width() == 0 || img.height() == 0 {
            return Err(Error::InvalidImage(format!(
                "{}: zero-sized image ({}x{})",
                path.display(),
                img.width(),
                img.height()
            )));
        }
        Ok(img)
    }

    fn dimensions(&self, image: &DynamicImage) -> (u32, u32) {
        (image.width(), image.height())
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage(format!(
                "cannot resize to {width}x{height}"
            )));
        }
        Ok(image.resize_exact(width, height, FilterType::Lanczos3))
    }

    fn crop(
        &self,
        image: &DynamicImage,
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
    ) -> Result<DynamicImage, Error> {
        if right <= left || bottom <= top || right > image.width() || bottom > image.height() {
            return Err(Error::InvalidImage(format!(
                "crop box [{left}, {top}, {right}, {bottom}] outside {}x{} image",
                image.width(),
                image.height()
            )));
        }
        Ok(image.crop_imm(left, top, right - left, bottom - top))
    }

    fn save(&mut self, image: &DynamicImage) -> Result<PathBuf, Error> {
        std::fs::create_dir_all(&self.band_dir)
            .map_err(|e| Error::Resource(format!("{}: {e}", self.band_dir.display())))?;
        let path = self.band_dir.join(format!("band-{:04}.png", self.next_band));
        self.next_band += 1;
        image
            .save(&path)
            .map_err(|e| Error::Resource(format!("{}: {e}", path.display())))?;
        Ok(path)
    }
}

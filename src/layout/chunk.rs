use std::path::Path;

use crate::codec::ImageCodec;
use crate::error::Error;
use crate::layout::cursor::PageCursor;
use crate::model::Flowable;
use crate::units::Density;

/// One horizontal slice of a screenshot: the pixel rows it crops from the
/// source and the size it renders at, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub top_px: u32,
    pub bottom_px: u32,
    pub width_pts: f32,
    pub height_pts: f32,
}

/// Shrink `image` until it fits `width_pts`, keeping the aspect ratio.
///
/// The image's pixel width and the budget are both compared in standard
/// units; when the image is wider, one scale factor (< 1) is applied to both
/// dimensions through the codec's antialiased resize. Images that already
/// fit are returned untouched — this never enlarges.
pub fn scale_to_width<C: ImageCodec>(
    codec: &C,
    image: C::Image,
    width_pts: f32,
    density: Density,
) -> Result<C::Image, Error> {
    let (w, h) = codec.dimensions(&image);
    let image_std = density.px_to_std(w as f32);
    let target_std = density.points_to_std(width_pts);
    if image_std <= target_std {
        return Ok(image);
    }
    let scale = target_std / image_std;
    let new_w = ((scale * w as f32) as u32).max(1);
    let new_h = ((scale * h as f32) as u32).max(1);
    codec.resize(&image, new_w, new_h)
}

/// Split a `width_px` x `height_px` image into page-fitting bands.
///
/// Pure geometry: pulls available space from the cursor once per band and
/// tracks the cumulative standard-unit offset so crop boundaries floor
/// consistently. The final band closes exactly on the image's bottom row, so
/// the union of all bands always covers the full pixel height with no
/// overlap.
pub fn plan_bands(
    width_px: u32,
    height_px: u32,
    cursor: &mut PageCursor,
    density: Density,
) -> Result<Vec<Band>, Error> {
    if width_px == 0 || height_px == 0 {
        return Err(Error::InvalidImage(format!(
            "cannot paginate a {width_px}x{height_px} image"
        )));
    }

    let width_pts = density.std_to_points(density.px_to_std(width_px as f32)).floor();
    let mut remaining = density.px_to_std(height_px as f32);
    let mut consumed = 0.0f32;
    let mut bottom: u32 = 0;
    let mut bands = Vec::new();

    while remaining > 0.0 {
        let available = cursor.next().unwrap_or(0.0);
        remaining -= available;
        // A negative remainder means the image ends inside this page: shrink
        // the band to the exact leftover instead of overshooting.
        let clawback = if remaining < 0.0 { remaining } else { 0.0 };
        let band_std = available + clawback;
        consumed += band_std;

        let top = bottom;
        bottom = if remaining <= 0.0 {
            height_px
        } else {
            (density.std_to_px(consumed).floor() as u32).min(height_px)
        };

        bands.push(Band {
            top_px: top,
            bottom_px: bottom,
            width_pts,
            height_pts: density.std_to_points(band_std).floor(),
        });
    }

    Ok(bands)
}

/// Scale a screenshot to the width budget, split it against the cursor's
/// page budget, and persist each band through the codec.
///
/// Each band file is on disk before its flowable is produced; a failed save
/// aborts the remaining bands and leaves the ones already persisted valid.
pub fn chunk_image<C: ImageCodec>(
    codec: &mut C,
    path: &Path,
    width_budget_pts: f32,
    cursor: &mut PageCursor,
    density: Density,
) -> Result<Vec<Flowable>, Error> {
    let img = codec.open(path)?;
    let img = scale_to_width(codec, img, width_budget_pts, density)?;
    let (w, h) = codec.dimensions(&img);
    let bands = plan_bands(w, h, cursor, density)?;

    log::debug!(
        "chunking {} ({}x{}px) into {} band(s)",
        path.display(),
        w,
        h,
        bands.len()
    );

    let mut flowables = Vec::with_capacity(bands.len());
    for band in bands {
        let slice = codec.crop(&img, 0, band.top_px, w, band.bottom_px)?;
        let stored = codec.save(&slice)?;
        flowables.push(Flowable::ImageBand {
            path: stored,
            width: band.width_pts,
            height: band.height_pts,
        });
    }
    Ok(flowables)
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{ASCENDER_RATIO, FontEntry, register_font, to_winansi_bytes};
use crate::model::{Flowable, ReportConfig, ReportStyles};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN_LEFT: f32 = 72.0;

fn embed_band(
    path: &Path,
    pdf: &mut Pdf,
    image_xobjects: &mut Vec<(String, Ref)>,
    alloc: &mut dyn FnMut() -> Ref,
) -> Result<String, Error> {
    let decoded = image::open(path)
        .map_err(|e| Error::Resource(format!("band {}: {e}", path.display())))?;
    let rgba: image::RgbaImage = decoded.to_rgba8();
    let (w, h) = (rgba.width(), rgba.height());
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

    let rgb_data: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
    let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

    let smask_ref = if has_alpha {
        let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
        let mask_ref = alloc();
        let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(w as i32);
        mask.height(h as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        Some(mask_ref)
    } else {
        None
    };

    let xobj_ref = alloc();
    let pdf_name = format!("Im{}", image_xobjects.len() + 1);
    let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(w as i32);
    xobj.height(h as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
    drop(xobj);

    image_xobjects.push((pdf_name.clone(), xobj_ref));
    Ok(pdf_name)
}

/// Render the assembled flowables into PDF bytes.
///
/// The flowable heights were budgeted against `config.page_capacity`, which
/// this renderer centers vertically on a 612x792 pt letter page. An implicit
/// page break still guards against content taller than the remaining slot so
/// nothing is ever drawn below the bottom margin.
pub fn render(
    flowables: &[Flowable],
    styles: &ReportStyles,
    config: &ReportConfig,
) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let heading_font = register_font(&mut pdf, &styles.heading.font_name, "F1".into(), &mut alloc);
    let body_font = register_font(&mut pdf, &styles.body.font_name, "F2".into(), &mut alloc);

    // Phase 1: embed each band image once, keyed by its stored path
    let mut image_names: HashMap<PathBuf, String> = HashMap::new();
    let mut image_xobjects: Vec<(String, Ref)> = Vec::new();
    for flowable in flowables {
        if let Flowable::ImageBand { path, .. } = flowable {
            if !image_names.contains_key(path) {
                let name = embed_band(path, &mut pdf, &mut image_xobjects, &mut alloc)?;
                image_names.insert(path.clone(), name);
            }
        }
    }
    let t_images = t0.elapsed();

    // Phase 2: place flowables top-down, one content stream per page
    let margin_top = ((PAGE_HEIGHT - config.page_capacity) / 2.0).max(0.0);
    let margin_bottom = PAGE_HEIGHT - margin_top - config.page_capacity;
    let page_top = PAGE_HEIGHT - margin_top;

    let mut all_contents: Vec<Content> = Vec::new();
    let mut current_content = Content::new();
    let mut slot_top = page_top;
    let mut page_dirty = false;

    for flowable in flowables {
        if let Flowable::PageBreak = flowable {
            all_contents.push(std::mem::replace(&mut current_content, Content::new()));
            slot_top = page_top;
            page_dirty = false;
            continue;
        }

        let height = flowable.height();
        if page_dirty && slot_top - height < margin_bottom - 0.5 {
            all_contents.push(std::mem::replace(&mut current_content, Content::new()));
            slot_top = page_top;
            page_dirty = false;
        }

        match flowable {
            Flowable::Heading { text, .. } | Flowable::Text { text, .. } => {
                let (entry, font_size): (&FontEntry, f32) =
                    if matches!(flowable, Flowable::Heading { .. }) {
                        (&heading_font, styles.heading.font_size)
                    } else {
                        (&body_font, styles.body.font_size)
                    };
                if !text.is_empty() {
                    let baseline_y = slot_top - font_size * ASCENDER_RATIO;
                    current_content
                        .begin_text()
                        .set_font(Name(entry.pdf_name.as_bytes()), font_size)
                        .next_line(MARGIN_LEFT, baseline_y)
                        .show(Str(&to_winansi_bytes(text)))
                        .end_text();
                }
                slot_top -= height;
                page_dirty = true;
            }
            Flowable::ImageBand {
                path,
                width,
                height,
            } => {
                let name = &image_names[path];
                let y_bottom = slot_top - height;
                current_content.save_state();
                current_content.transform([*width, 0.0, 0.0, *height, MARGIN_LEFT, y_bottom]);
                current_content.x_object(Name(name.as_bytes()));
                current_content.restore_state();
                slot_top -= height;
                page_dirty = true;
            }
            Flowable::Spacer { height } => {
                slot_top -= height;
                page_dirty = true;
            }
            // handled above
            Flowable::PageBreak => {}
        }
    }
    if page_dirty {
        all_contents.push(current_content);
    }
    let t_layout = t0.elapsed();

    // Phase 3: allocate page and content IDs now that page count is known
    let n = all_contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in all_contents.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let font_pairs = [
        (heading_font.pdf_name.as_str(), heading_font.font_ref),
        (body_font.pdf_name.as_str(), body_font.font_ref),
    ];

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        {
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                for (name, font_ref) in &font_pairs {
                    fonts.pair(Name(name.as_bytes()), *font_ref);
                }
            }
            if !image_xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &image_xobjects {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }
    }

    log::info!(
        "Render phases: images={:.1}ms, layout={:.1}ms, assembly={:.1}ms ({n} pages)",
        t_images.as_secs_f64() * 1000.0,
        (t_layout - t_images).as_secs_f64() * 1000.0,
        (t0.elapsed() - t_layout).as_secs_f64() * 1000.0,
    );

    Ok(pdf.finish())
}

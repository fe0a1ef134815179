use pdf_writer::{Name, Pdf, Ref};

/// A base-14 font registered in the output PDF.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
}

/// Fraction of the font size sitting above the baseline. Report text uses
/// the standard base-14 faces, so one approximation covers all of them.
pub(crate) const ASCENDER_RATIO: f32 = 0.75;

/// Normalize a style's font name to the base-14 PostScript name the viewer
/// resolves without embedding. Unknown names fall back to Helvetica.
fn base14_name(name: &str) -> &'static str {
    let norm = name
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .to_ascii_lowercase();
    match norm.as_str() {
        "helvetica" => "Helvetica",
        "helvetica-bold" => "Helvetica-Bold",
        "helvetica-oblique" => "Helvetica-Oblique",
        "helvetica-boldoblique" => "Helvetica-BoldOblique",
        "times-roman" | "times" => "Times-Roman",
        "times-bold" => "Times-Bold",
        "times-italic" => "Times-Italic",
        "times-bolditalic" => "Times-BoldItalic",
        "courier" => "Courier",
        "courier-bold" => "Courier-Bold",
        "courier-oblique" => "Courier-Oblique",
        "courier-boldoblique" => "Courier-BoldOblique",
        "symbol" => "Symbol",
        "zapfdingbats" => "ZapfDingbats",
        _ => {
            log::warn!("font not in the base-14 set: {name} — using Helvetica");
            "Helvetica"
        }
    }
}

pub(crate) fn register_font(
    pdf: &mut Pdf,
    font_name: &str,
    pdf_name: String,
    alloc: &mut impl FnMut() -> Ref,
) -> FontEntry {
    let font_ref = alloc();
    pdf.type1_font(font_ref)
        .base_font(Name(base14_name(font_name).as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    FontEntry { pdf_name, font_ref }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

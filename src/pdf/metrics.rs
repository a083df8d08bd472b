//! Glyph advance widths for the two built-in fonts the PDF uses.
//!
//! Values are the AFM widths (1/1000 em) of Helvetica and Helvetica-Bold
//! for the printable ASCII range. Characters outside it are measured as
//! a digit, which is close to the average Latin glyph.

/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Font weight of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Bold,
}

impl FontStyle {
    /// Resource name of the font inside the page's resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontStyle::Normal => "F1",
            FontStyle::Bold => "F2",
        }
    }

    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontStyle::Normal => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
        }
    }
}

fn glyph_width(c: char, style: FontStyle) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        let index = (code - 32) as usize;
        // Bold is never measured narrower than regular ('@' is the one
        // glyph where the AFM says otherwise)
        match style {
            FontStyle::Normal => HELVETICA[index],
            FontStyle::Bold => HELVETICA_BOLD[index].max(HELVETICA[index]),
        }
    } else if c.is_whitespace() {
        HELVETICA[0]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in glyph units (1/1000 em).
pub fn text_units(text: &str, style: FontStyle) -> u32 {
    text.chars().map(|c| glyph_width(c, style) as u32).sum()
}

/// Convert glyph units at `size_pt` to millimetres.
pub fn units_to_mm(units: u32, size_pt: f32) -> f32 {
    units as f32 / 1000.0 * size_pt * PT_TO_MM
}

/// Width of `text` in millimetres at `size_pt`.
pub fn text_width(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    units_to_mm(text_units(text, style), size_pt)
}

//! Serializes a [`LayoutDocument`] into PDF bytes with lopdf.

use super::layout::{Color, DrawOp, LayoutDocument};
use super::metrics::FontStyle;
use crate::error::PdfError;
use image::codecs::jpeg::JpegEncoder;
use image::GenericImageView;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

const MM_TO_PT: f32 = 72.0 / 25.4;
const IMAGE_NAME: &str = "Im1";
const JPEG_QUALITY: u8 = 85;
/// Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// A cover image prepared for embedding: center-cropped to 3:4 and
/// re-encoded as baseline JPEG.
#[derive(Debug, Clone)]
pub struct CoverImage {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

impl CoverImage {
    /// Decode any supported format (JPEG, PNG, GIF, WebP).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let decoded = image::load_from_memory(bytes)?;
        let (width, height) = decoded.dimensions();

        // Crop to 3:4 like `object-fit: cover`
        let (crop_width, crop_height) = if width * 4 > height * 3 {
            (height * 3 / 4, height)
        } else {
            (width, width * 4 / 3)
        };
        let crop_width = crop_width.max(1);
        let crop_height = crop_height.max(1);
        let cropped = decoded.crop_imm(
            (width - crop_width.min(width)) / 2,
            (height - crop_height.min(height)) / 2,
            crop_width,
            crop_height,
        );

        let rgb = cropped.to_rgb8();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&rgb)?;

        Ok(Self {
            jpeg,
            width: rgb.width(),
            height: rgb.height(),
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn pt(mm: f32) -> Object {
    Object::from(mm * MM_TO_PT)
}

fn color_operands(color: Color) -> Vec<Object> {
    [color.0, color.1, color.2]
        .iter()
        .map(|c| Object::from(*c as f32 / 255.0))
        .collect()
}

/// Encode text for a WinAnsiEncoding simple font. Characters with no
/// WinAnsi code point become '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{20ac}' => 0x80,
            c if c.is_whitespace() => b' ',
            _ => b'?',
        })
        .collect()
}

struct PageWriter {
    page_height: f32,
    operations: Vec<Operation>,
    annotations: Vec<Object>,
}

impl PageWriter {
    /// Flip a top-left millimetre y into PDF user space points.
    fn y(&self, y: f32) -> Object {
        pt(self.page_height - y)
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn draw(&mut self, op: &DrawOp, has_image: bool) {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                style,
                size,
                color,
            } => {
                self.op("BT", vec![]);
                self.op("rg", color_operands(*color));
                self.op(
                    "Tf",
                    vec![style.resource_name().into(), Object::from(*size)],
                );
                let baseline = self.y(*y);
                self.op("Td", vec![pt(*x), baseline]);
                self.op("Tj", vec![Object::string_literal(win_ansi(text))]);
                self.op("ET", vec![]);
            }
            DrawOp::Link {
                x,
                y,
                width,
                height,
                url,
            } => {
                let rect = vec![pt(*x), self.y(y + height), pt(x + width), self.y(*y)];
                self.annotations.push(Object::Dictionary(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => rect,
                    "Border" => vec![0.into(), 0.into(), 0.into()],
                    "A" => dictionary! {
                        "S" => "URI",
                        "URI" => Object::string_literal(url.as_bytes().to_vec()),
                    },
                }));
            }
            DrawOp::Circle {
                cx,
                cy,
                radius,
                color,
            } => {
                let (cx, cy, r) = (*cx, *cy, *radius);
                let k = r * KAPPA;
                // Four cubic segments, counter-clockwise from the right-most point
                let points = [
                    ((cx + r, cy), (cx + r, cy - k), (cx + k, cy - r), (cx, cy - r)),
                    ((cx, cy - r), (cx - k, cy - r), (cx - r, cy - k), (cx - r, cy)),
                    ((cx - r, cy), (cx - r, cy + k), (cx - k, cy + r), (cx, cy + r)),
                    ((cx, cy + r), (cx + k, cy + r), (cx + r, cy + k), (cx + r, cy)),
                ];
                self.op("rg", color_operands(*color));
                let start = points[0].0;
                let start_y = self.y(start.1);
                self.op("m", vec![pt(start.0), start_y]);
                for (_, c1, c2, end) in points {
                    let operands = vec![
                        pt(c1.0),
                        self.y(c1.1),
                        pt(c2.0),
                        self.y(c2.1),
                        pt(end.0),
                        self.y(end.1),
                    ];
                    self.op("c", operands);
                }
                self.op("f", vec![]);
            }
            DrawOp::Rule { x1, x2, y, color } => {
                let line_y = self.y(*y);
                self.op("RG", color_operands(*color));
                self.op("w", vec![Object::from(0.5f32)]);
                self.op("m", vec![pt(*x1), line_y.clone()]);
                self.op("l", vec![pt(*x2), line_y]);
                self.op("S", vec![]);
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
            } => {
                if !has_image {
                    return;
                }
                let bottom = self.y(y + height);
                self.op("q", vec![]);
                self.op(
                    "cm",
                    vec![pt(*width), 0.into(), 0.into(), pt(*height), pt(*x), bottom],
                );
                self.op("Do", vec![IMAGE_NAME.into()]);
                self.op("Q", vec![]);
            }
        }
    }
}

fn font(document: &mut Document, style: FontStyle) -> ObjectId {
    document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Build the whole PDF in memory. Nothing is returned unless every page
/// was written.
pub fn render_pdf(
    layout: &LayoutDocument,
    cover: Option<&CoverImage>,
    title: &str,
) -> Result<Vec<u8>, PdfError> {
    let geometry = layout.geometry;
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let mut fonts = Dictionary::new();
    for style in [FontStyle::Normal, FontStyle::Bold] {
        let id = font(&mut document, style);
        fonts.set(style.resource_name(), id);
    }
    let mut resources = dictionary! { "Font" => fonts };

    if let Some(cover) = cover {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => cover.width as i64,
                "Height" => cover.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            cover.jpeg.clone(),
        )
        .with_compression(false);
        let image_id = document.add_object(image);
        resources.set("XObject", dictionary! { IMAGE_NAME => image_id });
    }
    let resources_id = document.add_object(resources);

    let mut kids = Vec::with_capacity(layout.pages.len());
    for ops in &layout.pages {
        let mut writer = PageWriter {
            page_height: geometry.height,
            operations: Vec::new(),
            annotations: Vec::new(),
        };
        for op in ops {
            writer.draw(op, cover.is_some());
        }

        let content = Content {
            operations: writer.operations,
        };
        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if !writer.annotations.is_empty() {
            page.set("Annots", writer.annotations);
        }
        kids.push(Object::Reference(document.add_object(page)));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), pt(geometry.width), pt(geometry.height)],
    };
    document.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = document.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(title)),
        "Producer" => Object::string_literal("tiktok-recipe"),
    });
    document.trailer.set("Root", catalog_id);
    document.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    document.save_to(&mut bytes)?;
    Ok(bytes)
}

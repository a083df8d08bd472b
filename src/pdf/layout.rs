//! Page layout for recipe PDFs.
//!
//! Layout is a pure function from a [`Recipe`] to a list of positioned
//! drawing operations per page. All coordinates are millimetres measured
//! from the top-left corner of the page; [`super::render`] flips them into
//! PDF user space.
//!
//! A single [`Cursor`] is threaded through the sections in order
//! (title, description, metadata, ingredients with the cover image,
//! instructions). Before every line is written the cursor checks whether
//! the line still fits above the bottom margin and otherwise moves to a
//! fresh page, so `cursor.y <= page_height - margin` holds after every
//! write.

use super::markup::{parse_spans, tokenize, Span, Token};
use super::metrics::{text_units, text_width, units_to_mm, FontStyle};
use crate::model::Recipe;

const TITLE_SIZE: f32 = 20.0;
const TITLE_LINE: f32 = 9.0;
const DESCRIPTION_SIZE: f32 = 10.0;
const DESCRIPTION_LINE: f32 = 5.0;
const META_SIZE: f32 = 9.0;
const META_LINE: f32 = 5.0;
const HEADER_SIZE: f32 = 14.0;
const HEADER_LINE: f32 = 8.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LINE: f32 = 5.0;

/// Fraction of the content width given to the ingredient columns when a
/// cover image is shown.
const INGREDIENTS_SHARE: f32 = 0.75;
const COLUMN_GAP: f32 = 6.0;
/// Text of an ingredient starts this far right of its column edge.
const BULLET_INDENT: f32 = 4.0;
const BULLET_OFFSET: f32 = 1.5;
const BULLET_RADIUS: f32 = 0.7;
/// Instruction bodies start this far right of the left margin.
const ORDINAL_INDENT: f32 = 9.0;
const ORDINAL_GAP: f32 = 1.5;
/// Cover image width:height.
const COVER_ASPECT: f32 = 3.0 / 4.0;

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

const HEADING: Color = Color(17, 24, 39);
const BODY: Color = Color(55, 65, 81);
const MUTED: Color = Color(107, 114, 128);
const ACCENT: Color = Color(249, 115, 22);
const RULE: Color = Color(209, 213, 219);

/// Fixed page size and margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// A4 portrait with 15 mm margins.
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 15.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y any content may reach.
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4
    }
}

/// Everything the layout needs besides the recipe itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutConfig {
    pub geometry: PageGeometry,
    /// Whether a cover image will be available to the renderer. Without
    /// one no image slot is reserved and the ingredients use the full width.
    pub with_cover: bool,
}

/// A positioned drawing operation. `y` is the text baseline for
/// [`DrawOp::Text`] and the top edge for boxes.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: FontStyle,
        size: f32,
        color: Color,
    },
    Link {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        url: String,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        color: Color,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// The laid out document: one list of operations per page.
#[derive(Debug, Clone, Default)]
pub struct LayoutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Vec<DrawOp>>,
}

impl LayoutDocument {
    pub fn ops(&self) -> impl Iterator<Item = (usize, &DrawOp)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(page, ops)| ops.iter().map(move |op| (page, op)))
    }
}

/// Vertical position and page index of the next write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub y: f32,
    pub page: usize,
}

impl Cursor {
    /// Whichever cursor is further down the document.
    fn furthest(self, other: Cursor) -> Cursor {
        if (other.page, other.y) > (self.page, self.y) {
            other
        } else {
            self
        }
    }
}

/// One wrapped line: consecutive tokens of equal style merged into runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub runs: Vec<Token>,
    /// Width in millimetres
    pub width: f32,
}

impl Line {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Default)]
struct LineBuffer {
    runs: Vec<Token>,
    units: u32,
}

impl LineBuffer {
    fn push(&mut self, token: &Token, units: u32) {
        match self.runs.last_mut() {
            Some(last) if last.style == token.style => last.text.push_str(&token.text),
            _ => self.runs.push(token.clone()),
        }
        self.units += units;
    }

    fn finish(&mut self, size: f32) -> Line {
        let buffer = std::mem::take(self);
        Line {
            runs: buffer.runs,
            width: units_to_mm(buffer.units, size),
        }
    }
}

/// Greedy line wrapping with per-token measurement.
///
/// Lines only break between a word and a whitespace run; tokens split by
/// an emphasis boundary alone (`<strong>oil</strong>,`) move together.
/// A unit that would overflow `max_width` starts a new line unless the
/// current line is still empty, so a word wider than the column sits on a
/// line of its own. The buffered tail is always emitted.
pub fn wrap_tokens(tokens: &[Token], max_width: f32, size: f32) -> Vec<Line> {
    // Compare in whole glyph units so equal text always wraps identically
    let em = units_to_mm(1000, size);
    let max_units = if em > 0.0 {
        (max_width / em * 1000.0).max(0.0) as u32
    } else {
        0
    };

    let mut lines = Vec::new();
    let mut line = LineBuffer::default();
    let mut start = 0;

    while start < tokens.len() {
        let blank = tokens[start].is_whitespace();
        let end = tokens[start..]
            .iter()
            .position(|token| token.is_whitespace() != blank)
            .map_or(tokens.len(), |offset| start + offset);
        let unit = &tokens[start..end];
        let widths: Vec<u32> = unit
            .iter()
            .map(|token| text_units(&token.text, token.style))
            .collect();
        let unit_units: u32 = widths.iter().sum();

        if !line.runs.is_empty() && line.units + unit_units > max_units {
            lines.push(line.finish(size));
        }
        for (token, units) in unit.iter().zip(widths) {
            line.push(token, units);
        }
        start = end;
    }
    if !line.runs.is_empty() {
        lines.push(line.finish(size));
    }

    lines
}

/// Wrap a string of inline markup.
pub fn wrap_markup(source: &str, max_width: f32, size: f32) -> Vec<Line> {
    wrap_tokens(&tokenize(&parse_spans(source)), max_width, size)
}

/// Wrap plain text set entirely in `style`.
pub fn wrap_plain(text: &str, style: FontStyle, max_width: f32, size: f32) -> Vec<Line> {
    let spans = [Span {
        text: text.to_string(),
        emphasized: style == FontStyle::Bold,
    }];
    wrap_tokens(&tokenize(&spans), max_width, size)
}

/// Split ingredients into the left and right column.
pub fn split_columns<T>(items: &[T]) -> (&[T], &[T]) {
    items.split_at(items.len().div_ceil(2))
}

/// Position of a written line, handed to decorations such as bullets.
#[derive(Debug, Clone, Copy)]
struct LinePlacement {
    page: usize,
    top: f32,
    baseline: f32,
}

struct Layout {
    geometry: PageGeometry,
    pages: Vec<Vec<DrawOp>>,
}

impl Layout {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Vec::new()],
        }
    }

    fn push(&mut self, page: usize, op: DrawOp) {
        while self.pages.len() <= page {
            self.pages.push(Vec::new());
        }
        self.pages[page].push(op);
    }

    /// Page-break check: make room for a block `height` mm tall.
    fn ensure(&mut self, cursor: &mut Cursor, height: f32) {
        if cursor.y + height > self.geometry.bottom() {
            cursor.page += 1;
            cursor.y = self.geometry.margin;
            while self.pages.len() <= cursor.page {
                self.pages.push(Vec::new());
            }
        }
    }

    /// Vertical spacing; never pushes the cursor below the bottom margin.
    fn skip(&self, cursor: &mut Cursor, gap: f32) {
        cursor.y = (cursor.y + gap).min(self.geometry.bottom());
    }

    /// Write wrapped lines at `x`, breaking pages per line. Returns where
    /// the first line landed.
    fn write_lines(
        &mut self,
        cursor: &mut Cursor,
        lines: &[Line],
        x: f32,
        size: f32,
        line_height: f32,
        color: Color,
    ) -> Option<LinePlacement> {
        let mut first = None;
        for line in lines {
            self.ensure(cursor, line_height);
            let placement = LinePlacement {
                page: cursor.page,
                top: cursor.y,
                baseline: cursor.y + line_height * 0.75,
            };

            let mut run_x = x;
            for run in &line.runs {
                self.push(
                    placement.page,
                    DrawOp::Text {
                        x: run_x,
                        y: placement.baseline,
                        text: run.text.clone(),
                        style: run.style,
                        size,
                        color,
                    },
                );
                run_x += text_width(&run.text, run.style, size);
            }

            cursor.y += line_height;
            if first.is_none() {
                first = Some(placement);
            }
        }
        first
    }

    fn title(&mut self, cursor: &mut Cursor, recipe: &Recipe) {
        let lines = wrap_plain(
            &recipe.title,
            FontStyle::Bold,
            self.geometry.content_width(),
            TITLE_SIZE,
        );
        let x = self.geometry.margin;

        for (index, line) in lines.iter().enumerate() {
            let placement = self.write_lines(
                cursor,
                std::slice::from_ref(line),
                x,
                TITLE_SIZE,
                TITLE_LINE,
                HEADING,
            );
            if let (0, Some(url), Some(placement)) = (index, recipe.source_link(), placement) {
                self.push(
                    placement.page,
                    DrawOp::Link {
                        x,
                        y: placement.top,
                        width: line.width,
                        height: TITLE_LINE,
                        url: url.to_string(),
                    },
                );
            }
        }
    }

    fn header(&mut self, cursor: &mut Cursor, recipe: &Recipe) {
        self.title(cursor, recipe);

        let width = self.geometry.content_width();
        let x = self.geometry.margin;

        if !recipe.description.trim().is_empty() {
            self.skip(cursor, 1.0);
            let lines = wrap_plain(&recipe.description, FontStyle::Normal, width, DESCRIPTION_SIZE);
            self.write_lines(cursor, &lines, x, DESCRIPTION_SIZE, DESCRIPTION_LINE, BODY);
        }

        let mut meta = Vec::new();
        if let Some(cook_time) = recipe.cook_time.as_deref().filter(|s| !s.trim().is_empty()) {
            meta.push(format!("Cook time: {}", cook_time.trim()));
        }
        if let Some(servings) = recipe.servings.as_deref().filter(|s| !s.trim().is_empty()) {
            meta.push(format!("Servings: {}", servings.trim()));
        }
        if !meta.is_empty() {
            self.skip(cursor, 1.0);
            let lines = wrap_plain(&meta.join("    "), FontStyle::Normal, width, META_SIZE);
            self.write_lines(cursor, &lines, x, META_SIZE, META_LINE, MUTED);
        }

        self.skip(cursor, 2.0);
        self.push(
            cursor.page,
            DrawOp::Rule {
                x1: x,
                x2: x + width,
                y: cursor.y,
                color: RULE,
            },
        );
        self.skip(cursor, 5.0);
    }

    fn section_title(&mut self, cursor: &mut Cursor, title: &str) {
        let lines = wrap_plain(title, FontStyle::Bold, self.geometry.content_width(), HEADER_SIZE);
        self.write_lines(
            cursor,
            &lines,
            self.geometry.margin,
            HEADER_SIZE,
            HEADER_LINE,
            HEADING,
        );
    }

    /// One ingredient column. Returns the cursor after its last line.
    fn ingredient_column(
        &mut self,
        start: Cursor,
        items: &[String],
        x: f32,
        width: f32,
    ) -> Cursor {
        let mut cursor = start;
        for item in items {
            let lines = wrap_markup(item, width - BULLET_INDENT, BODY_SIZE);
            let text_x = x + BULLET_INDENT;
            if let Some(first) =
                self.write_lines(&mut cursor, &lines, text_x, BODY_SIZE, BODY_LINE, BODY)
            {
                self.push(
                    first.page,
                    DrawOp::Circle {
                        cx: x + BULLET_OFFSET,
                        cy: first.top + BODY_LINE * 0.5,
                        radius: BULLET_RADIUS,
                        color: ACCENT,
                    },
                );
            }
            self.skip(&mut cursor, 1.0);
        }
        cursor
    }

    fn ingredients(&mut self, cursor: &mut Cursor, recipe: &Recipe, with_cover: bool) {
        self.section_title(cursor, "Ingredients");
        self.skip(cursor, 1.0);

        let content = self.geometry.content_width();
        let text_area = if with_cover {
            content * INGREDIENTS_SHARE
        } else {
            content
        };
        let column_width = (text_area - COLUMN_GAP) / 2.0;
        let left_x = self.geometry.margin;
        let right_x = left_x + column_width + COLUMN_GAP;

        let (left, right) = split_columns(&recipe.ingredients);
        let start = *cursor;
        let left_end = self.ingredient_column(start, left, left_x, column_width);
        let right_end = self.ingredient_column(start, right, right_x, column_width);
        let mut end = left_end.furthest(right_end);

        if with_cover {
            let bottom = self.geometry.bottom();
            let height_on_start_page = |end: Cursor| {
                if end.page == start.page {
                    end.y - start.y
                } else {
                    bottom - start.y
                }
            };
            let slot_x = self.geometry.margin + text_area;
            let slot_width = content - text_area;

            let mut height = height_on_start_page(left_end).max(height_on_start_page(right_end));
            let mut width = height * COVER_ASPECT;
            if width > slot_width {
                width = slot_width;
                height = width / COVER_ASPECT;
            }

            if height > 0.0 {
                self.push(
                    start.page,
                    DrawOp::Image {
                        x: slot_x + (slot_width - width) / 2.0,
                        y: start.y,
                        width,
                        height,
                    },
                );
                end = end.furthest(Cursor {
                    y: start.y + height,
                    page: start.page,
                });
            }
        }

        *cursor = end;
    }

    fn instructions(&mut self, cursor: &mut Cursor, recipe: &Recipe) {
        self.section_title(cursor, "Instructions");
        self.skip(cursor, 1.0);

        let body_x = self.geometry.margin + ORDINAL_INDENT;
        let body_width = self.geometry.content_width() - ORDINAL_INDENT;

        for (index, step) in recipe.instructions.iter().enumerate() {
            let lines = wrap_markup(step, body_width, BODY_SIZE);
            if let Some(first) =
                self.write_lines(cursor, &lines, body_x, BODY_SIZE, BODY_LINE, BODY)
            {
                let ordinal = format!("{}.", index + 1);
                let ordinal_width = text_width(&ordinal, FontStyle::Bold, BODY_SIZE);
                self.push(
                    first.page,
                    DrawOp::Text {
                        x: body_x - ORDINAL_GAP - ordinal_width,
                        y: first.baseline,
                        text: ordinal,
                        style: FontStyle::Bold,
                        size: BODY_SIZE,
                        color: HEADING,
                    },
                );
            }
            self.skip(cursor, 2.0);
        }
    }
}

/// Lay out `recipe` onto pages.
pub fn layout_recipe(recipe: &Recipe, config: &LayoutConfig) -> LayoutDocument {
    let mut layout = Layout::new(config.geometry);
    let mut cursor = Cursor {
        y: config.geometry.margin,
        page: 0,
    };

    layout.header(&mut cursor, recipe);
    layout.ingredients(&mut cursor, recipe, config.with_cover);
    layout.skip(&mut cursor, 4.0);
    layout.instructions(&mut cursor, recipe);

    LayoutDocument {
        geometry: config.geometry,
        pages: layout.pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::markup::strip_emphasis;

    fn sample_recipe() -> Recipe {
        Recipe {
            title: "Easy Creamy Chicken Tortilla Soup".to_string(),
            description: "A rich and hearty soup packed with shredded chicken, beans and corn in a spiced tomato broth.".to_string(),
            ingredients: vec![
                "1 T olive oil".to_string(),
                "1 T butter".to_string(),
                "2 chicken breasts".to_string(),
                "1 onion, diced".to_string(),
                "8-10 cloves garlic, minced".to_string(),
            ],
            instructions: vec![
                "Coat the <strong>chicken breasts</strong> (2 large) with <strong>olive oil</strong>.".to_string(),
                "Melt the <strong>butter</strong> (1 T) in a large pot over medium-high heat.".to_string(),
            ],
            cook_time: Some("40 minutes".to_string()),
            servings: Some("4-6 servings".to_string()),
            cover_image: Some("https://example.com/cover.jpg".to_string()),
            source_url: Some("https://www.tiktok.com/@cook/video/1".to_string()),
        }
    }

    fn long_recipe() -> Recipe {
        let mut recipe = sample_recipe();
        recipe.ingredients = (1..=45)
            .map(|i| format!("{} cups of <strong>ingredient number {}</strong>, finely chopped", i, i))
            .collect();
        recipe.instructions = (1..=40)
            .map(|i| {
                format!(
                    "Step {}: stir the <strong>broth</strong> and the <strong>crushed tomatoes</strong> together, then simmer gently for a few minutes until everything is heated through.",
                    i
                )
            })
            .collect();
        recipe
    }

    fn config(with_cover: bool) -> LayoutConfig {
        LayoutConfig {
            geometry: PageGeometry::A4,
            with_cover,
        }
    }

    #[test]
    fn test_split_columns_uses_ceiling() {
        for n in 0..12usize {
            let items: Vec<usize> = (0..n).collect();
            let (left, right) = split_columns(&items);
            assert_eq!(left.len(), n.div_ceil(2));
            assert_eq!(left.len() + right.len(), n);
        }
    }

    #[test]
    fn test_wrap_never_emits_empty_lines() {
        let lines = wrap_markup("Supercalifragilisticexpialidocious soup", 5.0, BODY_SIZE);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| !line.runs.is_empty()));
        assert_eq!(lines[0].text(), "Supercalifragilisticexpialidocious");
        assert!(wrap_markup("", 50.0, BODY_SIZE).is_empty());
    }

    #[test]
    fn test_wrap_keeps_all_text() {
        let source = "Pour in the <strong>chicken broth</strong> (4 cups), <strong>crushed tomatoes</strong> (24 oz can) and stir to combine.";
        let lines = wrap_markup(source, 40.0, BODY_SIZE);
        assert!(lines.len() > 1);
        let joined: String = lines.iter().map(|line| line.text()).collect();
        assert_eq!(joined, strip_emphasis(source));
        assert!(lines.iter().all(|line| line.width <= 40.0 || line.runs.len() == 1));
    }

    #[test]
    fn test_styled_wrap_never_uses_fewer_lines_than_plain() {
        for step in long_recipe().instructions.iter().chain(sample_recipe().instructions.iter()) {
            for width in [30.0, 60.0, 120.0, 171.0] {
                let styled = wrap_markup(step, width, BODY_SIZE);
                let plain = wrap_plain(&strip_emphasis(step), FontStyle::Normal, width, BODY_SIZE);
                assert!(styled.len() >= plain.len(), "{} at {}", step, width);
            }
        }
    }

    #[test]
    fn test_nothing_crosses_bottom_margin() {
        let document = layout_recipe(&long_recipe(), &config(true));
        let bottom = document.geometry.bottom();
        assert!(document.pages.len() > 2);

        for (page, op) in document.ops() {
            let lowest = match op {
                DrawOp::Text { y, .. } | DrawOp::Rule { y, .. } => *y,
                DrawOp::Circle { cy, radius, .. } => cy + radius,
                DrawOp::Link { y, height, .. } | DrawOp::Image { y, height, .. } => y + height,
            };
            assert!(lowest <= bottom + 1e-3, "op on page {} at {}: {:?}", page, lowest, op);
        }
    }

    #[test]
    fn test_instruction_lines_stay_in_text_column() {
        let document = layout_recipe(&long_recipe(), &config(true));
        let body_x = PageGeometry::A4.margin + ORDINAL_INDENT;
        let mut ordinals = 0;

        for (_, op) in document.ops() {
            if let DrawOp::Text { x, text, style, .. } = op {
                if text.ends_with('.') && text[..text.len() - 1].parse::<usize>().is_ok() && *style == FontStyle::Bold {
                    ordinals += 1;
                    let right_edge = x + text_width(text, FontStyle::Bold, BODY_SIZE);
                    assert!(right_edge <= body_x - ORDINAL_GAP + 1e-3);
                }
            }
        }
        assert_eq!(ordinals, 40);
    }

    #[test]
    fn test_without_cover_no_image_and_full_width_columns() {
        let recipe = Recipe {
            cover_image: None,
            ..sample_recipe()
        };
        let document = layout_recipe(&recipe, &config(false));

        assert!(!document.ops().any(|(_, op)| matches!(op, DrawOp::Image { .. })));

        let content = PageGeometry::A4.content_width();
        let right_column_x = PageGeometry::A4.margin + (content - COLUMN_GAP) / 2.0 + COLUMN_GAP;
        let has_right_column_bullet = document.ops().any(|(_, op)| {
            matches!(op, DrawOp::Circle { cx, .. } if (cx - (right_column_x + BULLET_OFFSET)).abs() < 1e-3)
        });
        assert!(has_right_column_bullet);
    }

    #[test]
    fn test_cover_image_matches_taller_column() {
        let document = layout_recipe(&sample_recipe(), &config(true));
        let content = PageGeometry::A4.content_width();
        let slot_x = PageGeometry::A4.margin + content * INGREDIENTS_SHARE;
        let slot_width = content - content * INGREDIENTS_SHARE;

        let images: Vec<&DrawOp> = document
            .ops()
            .filter_map(|(_, op)| matches!(op, DrawOp::Image { .. }).then_some(op))
            .collect();
        assert_eq!(images.len(), 1);

        if let DrawOp::Image { x, width, height, .. } = images[0] {
            assert!((width / height - COVER_ASPECT).abs() < 1e-3);
            assert!(*width <= slot_width + 1e-3);
            // centered in the slot
            let left_gap = x - slot_x;
            let right_gap = slot_x + slot_width - (x + width);
            assert!((left_gap - right_gap).abs() < 1e-3);
            // three ingredients in the left column, each one line plus spacing
            assert!((height - 3.0 * (BODY_LINE + 1.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_title_link_only_on_first_line() {
        let recipe = Recipe {
            title: "An Extraordinarily Long Recipe Title That Certainly Needs More Than One Line To Fit".to_string(),
            ..sample_recipe()
        };
        let document = layout_recipe(&recipe, &config(true));

        let links: Vec<&DrawOp> = document
            .ops()
            .filter_map(|(_, op)| matches!(op, DrawOp::Link { .. }).then_some(op))
            .collect();
        assert_eq!(links.len(), 1);
        if let DrawOp::Link { y, url, .. } = links[0] {
            assert_eq!(*y, PageGeometry::A4.margin);
            assert_eq!(url, "https://www.tiktok.com/@cook/video/1");
        }

        let title_lines = document
            .ops()
            .filter(|(_, op)| matches!(op, DrawOp::Text { size, .. } if *size == TITLE_SIZE))
            .count();
        assert!(title_lines > 1);
    }

    #[test]
    fn test_no_link_without_source_url() {
        let recipe = Recipe {
            source_url: None,
            ..sample_recipe()
        };
        let document = layout_recipe(&recipe, &config(true));
        assert!(!document.ops().any(|(_, op)| matches!(op, DrawOp::Link { .. })));
    }

    #[test]
    fn test_emphasis_drawn_in_bold() {
        let document = layout_recipe(&sample_recipe(), &config(true));
        let bold_runs: Vec<String> = document
            .ops()
            .filter_map(|(_, op)| match op {
                DrawOp::Text { text, style: FontStyle::Bold, size, .. } if *size == BODY_SIZE => {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect();
        assert!(bold_runs.iter().any(|run| run == "chicken breasts"));
        assert!(bold_runs.iter().any(|run| run == "butter"));
    }
}

//! Server-rendered HTML for the recipe view and the page shell.

mod page;

pub use page::{page_shell, Creator, PageState, EXAMPLE_CREATORS};

use crate::model::Recipe;
use crate::pdf::markup::parse_spans;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Inline markup as HTML: plain runs escaped, emphasized runs wrapped in
/// `<strong>`. Model output is never inserted verbatim.
pub fn markup_to_html(source: &str) -> String {
    let mut html = String::new();
    for span in parse_spans(source) {
        let text = encode_text(&span.text);
        if span.emphasized {
            let _ = write!(html, "<strong>{}</strong>", text);
        } else {
            html.push_str(&text);
        }
    }
    html
}

/// Render a recipe: header, ingredients next to the cover, then the
/// numbered instructions.
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut html = String::from("<article class=\"recipe\">\n<header class=\"recipe-header\">\n");

    match recipe.source_link() {
        Some(url) => {
            let _ = writeln!(
                html,
                "<h2><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h2>",
                encode_double_quoted_attribute(url),
                encode_text(&recipe.title)
            );
        }
        None => {
            let _ = writeln!(html, "<h2>{}</h2>", encode_text(&recipe.title));
        }
    }

    if !recipe.description.trim().is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"description\">{}</p>",
            encode_text(&recipe.description)
        );
    }

    let cook_time = recipe.cook_time.as_deref().filter(|s| !s.trim().is_empty());
    let servings = recipe.servings.as_deref().filter(|s| !s.trim().is_empty());
    if cook_time.is_some() || servings.is_some() {
        html.push_str("<div class=\"meta\">");
        if let Some(cook_time) = cook_time {
            let _ = write!(html, "<span>&#9201; {}</span>", encode_text(cook_time));
        }
        if let Some(servings) = servings {
            let _ = write!(html, "<span>&#128101; {}</span>", encode_text(servings));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</header>\n");

    html.push_str("<div class=\"ingredients-grid\">\n<section class=\"recipe-section\">\n<h3>Ingredients</h3>\n<ul>\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(
            html,
            "<li><span class=\"bullet\">&bull;</span><span>{}</span></li>",
            markup_to_html(ingredient)
        );
    }
    html.push_str("</ul>\n</section>\n");
    if let Some(cover) = recipe.cover_image_url() {
        let _ = writeln!(
            html,
            "<div class=\"cover\"><img src=\"{}\" alt=\"{}\"></div>",
            encode_double_quoted_attribute(cover),
            encode_double_quoted_attribute(&recipe.title)
        );
    }
    html.push_str("</div>\n");

    html.push_str("<section class=\"instructions\">\n<h3>Instructions</h3>\n<ol>\n");
    for (index, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(
            html,
            "<li><span class=\"ordinal\">{}.</span><span>{}</span></li>",
            index + 1,
            markup_to_html(step)
        );
    }
    html.push_str("</ol>\n</section>\n</article>\n");

    html
}

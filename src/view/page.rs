use super::render_recipe;
use crate::model::Recipe;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// A creator profile shown as an example source of recipe videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creator {
    pub username: &'static str,
    /// Profile picture path under `/creators`
    pub image: &'static str,
    pub description: &'static str,
}

impl Creator {
    pub fn profile_url(&self) -> String {
        format!("https://www.tiktok.com/@{}", self.username)
    }
}

pub const EXAMPLE_CREATORS: [Creator; 3] = [
    Creator {
        username: "majasrecipes",
        image: "/creators/majasrecipes.jpeg",
        description: "comfort classics like lasagna, chicken pot pie • cheese croquettes • cinnamon roll cake bars",
    },
    Creator {
        username: "stealth_health_life",
        image: "/creators/stealth_health_life.jpeg",
        description: "macro-friendly meal prep • high-protein frozen burritos • sheet pan breakfast sandwiches",
    },
    Creator {
        username: "heresyourbite",
        image: "/creators/heresyourbite.jpeg",
        description: "caramel apple snickerdoodles • 15-min dinners • creative fusion dishes",
    },
];

/// What the page shows below the form.
#[derive(Debug, Default)]
pub struct PageState<'a> {
    pub url: &'a str,
    pub recipe: Option<&'a Recipe>,
    pub error: Option<&'a str>,
}

const STYLE: &str = r#"
body { font-family: Helvetica, Arial, sans-serif; margin: 0; background: #fafafa; color: #222; }
main { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem; }
h1 { margin-bottom: 0.25rem; }
.subtitle { color: #666; margin-top: 0; }
form.extract { display: flex; gap: 0.5rem; margin: 1.5rem 0; }
form.extract input[type=url] { flex: 1; padding: 0.6rem; border: 1px solid #ccc; border-radius: 6px; }
button { padding: 0.6rem 1rem; border: 0; border-radius: 6px; background: #fe2c55; color: #fff; cursor: pointer; }
button.secondary { background: #eee; color: #222; }
button:disabled { opacity: 0.6; cursor: wait; }
.error { background: #fde8e8; color: #9b1c1c; padding: 0.75rem 1rem; border-radius: 6px; }
.creators { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1rem; }
.creator img { width: 3rem; height: 3rem; border-radius: 50%; object-fit: cover; float: left; margin-right: 0.75rem; }
.creator { display: block; padding: 1rem; background: #fff; border-radius: 8px; color: inherit; text-decoration: none; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.recipe { background: #fff; padding: 1.5rem; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.recipe h2 a { color: #e11d48; }
.meta { display: flex; gap: 1.5rem; color: #666; font-size: 0.9rem; }
.ingredients-grid { display: grid; grid-template-columns: 3fr 1fr; gap: 1.5rem; }
.recipe ul, .recipe ol { list-style: none; padding: 0; }
.recipe li { display: flex; gap: 0.5rem; margin-bottom: 0.4rem; }
.bullet { color: #e11d48; }
.ordinal { font-weight: bold; min-width: 1.5rem; }
.cover img { width: 100%; aspect-ratio: 3 / 4; object-fit: cover; border-radius: 8px; }
"#;

const SCRIPT: &str = r#"
document.getElementById('paste').addEventListener('click', async () => {
  try {
    const text = await navigator.clipboard.readText();
    document.getElementById('url').value = text;
  } catch (e) {
    console.error('Failed to read clipboard:', e);
  }
});
document.querySelector('form.extract').addEventListener('submit', () => {
  const button = document.getElementById('submit');
  button.disabled = true;
  button.textContent = 'Extracting Recipe...';
});
"#;

const PDF_SCRIPT: &str = r#"
document.getElementById('pdf-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const form = event.currentTarget;
  const button = document.getElementById('pdf-button');
  const label = button.textContent;
  button.disabled = true;
  button.textContent = 'Generating PDF...';
  try {
    const response = await fetch('/api/recipe-pdf', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: form.elements.recipe.value,
    });
    if (!response.ok) {
      throw new Error('PDF request failed with status ' + response.status);
    }
    const disposition = response.headers.get('Content-Disposition') || '';
    const match = disposition.match(/filename="([^"]+)"/);
    const link = document.createElement('a');
    link.href = URL.createObjectURL(await response.blob());
    link.download = match ? match[1] : 'recipe.pdf';
    document.body.appendChild(link);
    link.click();
    link.remove();
    URL.revokeObjectURL(link.href);
  } catch (e) {
    console.error('Error generating PDF:', e);
    alert('Failed to generate PDF. Please try again.');
  } finally {
    button.disabled = false;
    button.textContent = label;
  }
});
"#;

fn creator_cards(html: &mut String) {
    html.push_str("<section>\n<h2>Try a recipe from these creators</h2>\n<div class=\"creators\">\n");
    for creator in &EXAMPLE_CREATORS {
        let _ = writeln!(
            html,
            "<a class=\"creator\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"><img src=\"{}\" alt=\"\" loading=\"lazy\"><strong>@{}</strong><p>{}</p></a>",
            encode_double_quoted_attribute(&creator.profile_url()),
            encode_double_quoted_attribute(creator.image),
            encode_text(creator.username),
            encode_text(creator.description)
        );
    }
    html.push_str("</div>\n</section>\n");
}

/// Download form that posts the recipe back as JSON. Without scripts it
/// submits to `/recipe/pdf`; with them `PDF_SCRIPT` takes over.
fn download_form(html: &mut String, recipe: &Recipe) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string(recipe)?;
    let _ = writeln!(
        html,
        "<form id=\"pdf-form\" method=\"post\" action=\"/recipe/pdf\"><input type=\"hidden\" name=\"recipe\" value=\"{}\"><button id=\"pdf-button\" type=\"submit\">Download PDF</button></form>",
        encode_double_quoted_attribute(&json)
    );
    Ok(())
}

/// The full page: title, URL form, then an error, a recipe, or the
/// example creators.
pub fn page_shell(state: &PageState<'_>) -> Result<String, serde_json::Error> {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>TikTok Recipe Extractor</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n<h1>TikTok Recipe Extractor</h1>\n<p class=\"subtitle\">Turn any TikTok recipe into a formatted PDF</p>\n");

    let _ = writeln!(
        html,
        "<form class=\"extract\" method=\"post\" action=\"/recipe\"><input id=\"url\" type=\"url\" name=\"url\" placeholder=\"https://www.tiktok.com/@user/video/...\" value=\"{}\" required><button id=\"paste\" class=\"secondary\" type=\"button\">Paste</button><button id=\"submit\" type=\"submit\">Extract Recipe</button></form>",
        encode_double_quoted_attribute(state.url)
    );

    if let Some(error) = state.error {
        let _ = writeln!(
            html,
            "<div class=\"error\" role=\"alert\">Error: {}</div>",
            encode_text(error)
        );
    }

    match state.recipe {
        Some(recipe) => {
            download_form(&mut html, recipe)?;
            html.push_str(&render_recipe(recipe));
        }
        None => creator_cards(&mut html),
    }

    html.push_str("</main>\n<script>");
    html.push_str(SCRIPT);
    if state.recipe.is_some() {
        html.push_str(PDF_SCRIPT);
    }
    html.push_str("</script>\n</body>\n</html>\n");
    Ok(html)
}

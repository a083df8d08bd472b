/// The prompt sent alongside the video when asking the model for a recipe.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains a `{{CAPTION}}` placeholder that is replaced by
/// [`build_extraction_prompt`].
pub const RECIPE_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Build the prompt, embedding the video caption when there is one.
pub fn build_extraction_prompt(caption: &str) -> String {
    let caption = caption.trim();
    let caption_line = if caption.is_empty() {
        String::new()
    } else {
        format!("\nVideo caption/description: \"{}\"\n", caption)
    };
    RECIPE_EXTRACTION_PROMPT.replace("{{CAPTION}}", &caption_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_EXTRACTION_PROMPT.is_empty());
        assert!(RECIPE_EXTRACTION_PROMPT.contains("{{CAPTION}}"));
        assert!(RECIPE_EXTRACTION_PROMPT.contains("\"cookTime\""));
        assert!(RECIPE_EXTRACTION_PROMPT.contains("<strong>ingredient name</strong>"));
    }

    #[test]
    fn test_build_prompt_embeds_caption() {
        let prompt = build_extraction_prompt("Creamy tortilla soup #dinner");
        assert!(prompt.contains("Video caption/description: \"Creamy tortilla soup #dinner\""));
        assert!(!prompt.contains("{{CAPTION}}"));
    }

    #[test]
    fn test_build_prompt_without_caption() {
        let prompt = build_extraction_prompt("   ");
        assert!(!prompt.contains("Video caption"));
        assert!(!prompt.contains("{{CAPTION}}"));
    }
}

use crate::error::ExtractError;
use crate::model::Recipe;
use serde_json::Value;

/// Remove markdown code fence markers (```` ```json ```` and ```` ``` ````)
/// wherever they appear, then trim.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse the model's text response into a validated [`Recipe`].
///
/// The cover image and source URL are left unset; the pipeline fills them in.
pub fn parse_recipe_response(text: &str) -> Result<Recipe, ExtractError> {
    let cleaned = strip_code_fences(text);
    let json: Value = serde_json::from_str(&cleaned).map_err(|source| ExtractError::ParseError {
        raw: text.to_string(),
        source,
    })?;

    let title = string_field(&json, "title").unwrap_or_default();
    let ingredients = string_list(&json["ingredients"]);
    let instructions = string_list(&json["instructions"]);

    if title.trim().is_empty() || ingredients.is_none() || instructions.is_none() {
        return Err(ExtractError::IncompleteRecipe);
    }

    Ok(Recipe {
        title: title.trim().to_string(),
        description: string_field(&json, "description").unwrap_or_default(),
        ingredients: ingredients.unwrap_or_default(),
        instructions: instructions.unwrap_or_default(),
        cook_time: string_field(&json, "cookTime"),
        servings: string_field(&json, "servings"),
        cover_image: None,
        source_url: None,
    })
}

/// Read a scalar as a string; models occasionally answer `"servings": 4`.
fn string_field(json: &Value, key: &str) -> Option<String> {
    match &json[key] {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a list of strings. A single string is treated as one item; any
/// other shape counts as missing.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(s) if !s.trim().is_empty() => Some(vec![s.trim().to_string()]),
        _ => None,
    }
}

use lopdf::Document;
use tiktok_recipe::pdf::{generate_pdf, layout_recipe, pdf_file_name, LayoutConfig, PageGeometry};
use tiktok_recipe::Recipe;

fn long_recipe() -> Recipe {
    Recipe {
        title: "Slow Cooker Chicken Tikka Masala".to_string(),
        description: "A rich, creamy curry that cooks itself while you are at work.".to_string(),
        ingredients: (1..=30)
            .map(|i| format!("<strong>ingredient {}</strong> ({} tablespoons)", i, i))
            .collect(),
        instructions: (1..=40)
            .map(|i| {
                format!(
                    "Step {}: stir the <strong>sauce</strong> gently and let it simmer until the <strong>chicken</strong> is tender and fully coated.",
                    i
                )
            })
            .collect(),
        cook_time: Some("6 hours".to_string()),
        servings: Some("6".to_string()),
        cover_image: None,
        source_url: Some("https://www.tiktok.com/@stealth_health_life/video/1".to_string()),
    }
}

#[test]
fn test_long_recipe_spans_multiple_pages() {
    let recipe = long_recipe();
    let config = LayoutConfig {
        geometry: PageGeometry::A4,
        with_cover: false,
    };
    let layout = layout_recipe(&recipe, &config);
    assert!(layout.pages.len() > 1);

    let bytes = generate_pdf(&recipe, None).unwrap();
    let document = Document::load_mem(&bytes).unwrap();
    assert_eq!(document.get_pages().len(), layout.pages.len());
}

#[test]
fn test_file_name_for_long_recipe() {
    assert_eq!(
        pdf_file_name(&long_recipe().title),
        "slow_cooker_chicken_tikka_masala_recipe.pdf"
    );
}

use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use tiktok_recipe::config::GeminiConfig;
use tiktok_recipe::fetchers::{RequestFetcher, TikwmFetcher};
use tiktok_recipe::providers::{GoogleProvider, LlmProvider};
use tiktok_recipe::{ExtractError, RecipeExtractor};

const VIDEO_URL: &str = "https://www.tiktok.com/@majasrecipes/video/7301234567890";

fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" }
        }]
    })
    .to_string()
}

fn extractor(server: &mockito::Server) -> RecipeExtractor {
    let config = GeminiConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.url(),
        ..Default::default()
    };
    let provider: Arc<dyn LlmProvider> = Arc::new(GoogleProvider::new(&config, None).unwrap());
    RecipeExtractor::new(
        TikwmFetcher::new(&server.url(), None).unwrap(),
        RequestFetcher::new(None).unwrap(),
        Some(provider),
    )
}

async fn mock_tikwm(server: &mut mockito::Server) -> mockito::Mock {
    let body = json!({
        "code": 0,
        "msg": "success",
        "data": {
            "title": "Cheesy garlic bread in 10 minutes #recipe",
            "play": format!("{}/video/sd.mp4", server.url()),
            "hdplay": format!("{}/video/hd.mp4", server.url()),
            "cover": format!("{}/cover.jpg", server.url()),
            "duration": 42
        }
    });
    server
        .mock("POST", "/api/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_extract_recipe_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let tikwm = mock_tikwm(&mut server).await;
    let video = server
        .mock("GET", "/video/hd.mp4")
        .with_status(200)
        .with_body(b"\x00\x00\x00\x18ftypmp42")
        .create_async()
        .await;
    let model_text = "```json\n{\"title\":\"Cheesy Garlic Bread\",\"description\":\"Crispy and gooey.\",\"ingredients\":[\"<strong>baguette</strong> (1)\",\"<strong>butter</strong> (4 tbsp)\"],\"instructions\":[\"Spread the <strong>butter</strong> on the <strong>baguette</strong>.\",\"Bake for 10 minutes.\"],\"cookTime\":\"10 minutes\",\"servings\":\"4\"}\n```";
    let gemini = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::Regex("Cheesy garlic bread in 10 minutes".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(model_text))
        .create_async()
        .await;

    let recipe = extractor(&server).extract(VIDEO_URL).await.unwrap();

    tikwm.assert_async().await;
    video.assert_async().await;
    gemini.assert_async().await;

    assert_eq!(recipe.title, "Cheesy Garlic Bread");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.instructions.len(), 2);
    assert_eq!(recipe.cook_time.as_deref(), Some("10 minutes"));
    assert_eq!(recipe.source_url.as_deref(), Some(VIDEO_URL));
    assert_eq!(
        recipe.cover_image,
        Some(format!("{}/cover.jpg", server.url()))
    );
}

#[tokio::test]
async fn test_unparseable_model_reply_keeps_raw_text() {
    let mut server = mockito::Server::new_async().await;
    let _tikwm = mock_tikwm(&mut server).await;
    let _video = server
        .mock("GET", "/video/hd.mp4")
        .with_status(200)
        .with_body(b"video")
        .create_async()
        .await;
    let _gemini = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply("Sorry, I could not find a recipe in this video."))
        .create_async()
        .await;

    match extractor(&server).extract(VIDEO_URL).await {
        Err(ExtractError::ParseError { raw, .. }) => {
            assert_eq!(raw, "Sorry, I could not find a recipe in this video.");
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reply_without_instructions_is_incomplete() {
    let mut server = mockito::Server::new_async().await;
    let _tikwm = mock_tikwm(&mut server).await;
    let _video = server
        .mock("GET", "/video/hd.mp4")
        .with_status(200)
        .with_body(b"video")
        .create_async()
        .await;
    let _gemini = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(
            r#"{"title":"Garlic Bread","ingredients":["bread"]}"#,
        ))
        .create_async()
        .await;

    let result = extractor(&server).extract(VIDEO_URL).await;
    assert!(matches!(result, Err(ExtractError::IncompleteRecipe)));
}

#[tokio::test]
async fn test_video_download_failure_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let _tikwm = mock_tikwm(&mut server).await;
    let _video = server
        .mock("GET", "/video/hd.mp4")
        .with_status(403)
        .create_async()
        .await;

    let result = extractor(&server).extract(VIDEO_URL).await;
    assert!(matches!(result, Err(ExtractError::FetchError(_))));
}

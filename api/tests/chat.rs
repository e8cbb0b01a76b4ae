mod common;

use axum::http::StatusCode;
use common::{MenuChatContext, candidate};
use serde_json::{Value, json};
use test_context::test_context;

fn question(content: &str) -> Value {
    json!({ "messages": [{ "role": "user", "content": content }] })
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_rejects_empty_conversation(ctx: &mut MenuChatContext) {
    let response = ctx
        .server
        .post("/api/chat")
        .json(&json!({ "messages": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.gemini_requests(":streamGenerateContent").await.is_empty());
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_without_menu_streams_data_protocol(ctx: &mut MenuChatContext) {
    ctx.mock_chat_chunks(&["Hello", " there \"friend\""]).await;

    let response = ctx.server.post("/api/chat").json(&question("Hi")).await;

    response.assert_status_ok();
    assert_eq!(response.header("x-vercel-ai-data-stream"), "v1");
    assert_eq!(
        response.text(),
        "0:\"Hello\"\n0:\" there \\\"friend\\\"\"\nd:{\"finishReason\":\"stop\"}\n"
    );

    let requests = ctx.gemini_requests(":streamGenerateContent").await;
    assert_eq!(requests.len(), 1);
    let system = requests[0]["system_instruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(system.contains("No menu has been uploaded yet"));
    assert_eq!(requests[0]["contents"][0]["role"], "user");
    assert_eq!(requests[0]["contents"][0]["parts"][0]["text"], "Hi");
    assert_eq!(requests[0]["generation_config"]["max_output_tokens"], 2048);
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_is_grounded_in_analyzed_menu(ctx: &mut MenuChatContext) {
    ctx.upload_png("bistro.png").await;
    ctx.mock_vision_response(candidate("MAINS\nRisotto 14.00")).await;
    ctx.analyze_latest().await.assert_status_ok();
    ctx.mock_chat_chunks(&["Risotto costs 14.00"]).await;

    let response = ctx
        .server
        .post("/api/chat")
        .json(&json!({
            "messages": [
                { "role": "user", "content": "Hi" },
                { "role": "assistant", "content": "Hello! Ask me about the menu." },
                { "role": "user", "content": "How much is the risotto?" }
            ]
        }))
        .await;

    response.assert_status_ok();
    assert!(response.text().starts_with("0:\"Risotto costs 14.00\"\n"));

    let requests = ctx.gemini_requests(":streamGenerateContent").await;
    let system = requests[0]["system_instruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(system.contains("MAINS\nRisotto 14.00"));
    assert!(system.contains("bistro.png"));
    let roles: Vec<&str> = requests[0]["contents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|content| content["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, ["user", "model", "user"]);
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_provider_failure_before_streaming(ctx: &mut MenuChatContext) {
    ctx.mock_chat_failure(500).await;

    let response = ctx.server.post("/api/chat").json(&question("Hi")).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Failed to process chat request"
    );
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_mid_stream_error_is_framed(ctx: &mut MenuChatContext) {
    ctx.mock_chat_events(vec![
        candidate("Partial"),
        json!({ "error": { "code": 429, "message": "quota" } }),
    ])
    .await;

    let response = ctx.server.post("/api/chat").json(&question("Hi")).await;

    response.assert_status_ok();
    assert_eq!(
        response.text(),
        "0:\"Partial\"\n3:\"External service error: LLM API returned error: quota\"\n"
    );
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_events_stream(ctx: &mut MenuChatContext) {
    ctx.mock_chat_chunks(&["Hello", " world"]).await;

    let response = ctx.server.post("/api/chat/sse").json(&question("Hi")).await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );
    let body = response.text();
    let hello = body.find("data: {\"delta\":\"Hello\"}").unwrap();
    let world = body.find("data: {\"delta\":\" world\"}").unwrap();
    let done = body.find("data: [DONE]").unwrap();
    assert!(hello < world && world < done);
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_events_mid_stream_error(ctx: &mut MenuChatContext) {
    ctx.mock_chat_events(vec![
        candidate("Partial"),
        json!({ "error": { "code": 429, "message": "quota" } }),
    ])
    .await;

    let response = ctx.server.post("/api/chat/sse").json(&question("Hi")).await;

    response.assert_status_ok();
    let body = response.text();
    let partial = body.find("data: {\"delta\":\"Partial\"}").unwrap();
    let error = body.find("event: error").unwrap();
    let done = body.find("data: [DONE]").unwrap();
    assert!(partial < error && error < done);
    assert!(body.contains("LLM API returned error: quota"));
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_chat_failure_does_not_expose_api_key(ctx: &mut MenuChatContext) {
    ctx.mock_chat_failure(500).await;

    let response = ctx.server.post("/api/chat").json(&question("Hi")).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("test-key"));

    let requests = ctx.gemini.received_requests().await.unwrap();
    for request in requests {
        assert!(!request.url.as_str().contains("test-key"));
        assert_eq!(request.headers.get("x-goog-api-key").unwrap(), "test-key");
    }
}

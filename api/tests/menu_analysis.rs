mod common;

use axum::http::StatusCode;
use base64::{Engine as _, engine::general_purpose};
use common::{MenuChatContext, PNG_BYTES, candidate, one_line_pdf};
use serde_json::{Value, json};
use test_context::test_context;

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_analyze_without_upload_is_not_found(ctx: &mut MenuChatContext) {
    let response = ctx.analyze_latest().await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "No recently uploaded menu found!"
    );
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_analyze_image_transcribes_with_vision_model(ctx: &mut MenuChatContext) {
    let record = ctx.upload_png("dinner.png").await;
    ctx.mock_vision_response(candidate("PIZZA 10.00\nPASTA 12.00"))
        .await;

    let response = ctx.analyze_latest().await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["menuId"], record["menuId"]);
    assert_eq!(body["menuUrl"], record["filePath"]);
    assert_eq!(body["analysis"], "PIZZA 10.00\nPASTA 12.00");
    assert_eq!(body["message"], "Menu successfully analyzed");

    let requests = ctx.gemini_requests(":generateContent").await;
    assert_eq!(requests.len(), 1);
    let parts = &requests[0]["contents"][0]["parts"];
    assert!(parts[0]["text"].as_str().unwrap().contains("restaurant menu"));
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
    assert_eq!(
        parts[1]["inline_data"]["data"],
        general_purpose::STANDARD.encode(PNG_BYTES)
    );
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_analyze_image_without_candidates_uses_placeholder(ctx: &mut MenuChatContext) {
    ctx.upload_png("dinner.png").await;
    ctx.mock_vision_response(json!({ "candidates": [] })).await;

    let response = ctx.analyze_latest().await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["analysis"], "Image analysis failed.");
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_analyze_surfaces_vision_failure(ctx: &mut MenuChatContext) {
    ctx.upload_png("dinner.png").await;
    ctx.mock_vision_failure(503).await;

    let response = ctx.analyze_latest().await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Menu analysis failed!");
    assert!(body["details"].as_str().unwrap().contains("503"));
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_analyze_unknown_menu_id(ctx: &mut MenuChatContext) {
    ctx.upload_png("dinner.png").await;

    let response = ctx
        .server
        .post("/api/analyze-menu")
        .json(&json!({ "menuId": "0192f0c4-0000-7000-8000-000000000000" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Menu not found with provided ID!"
    );
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_analyze_explicit_menu_id_reaches_older_upload(ctx: &mut MenuChatContext) {
    let first = ctx.upload_png("first.png").await;
    ctx.upload_png("second.png").await;
    ctx.mock_vision_response(candidate("SALAD 7.00")).await;

    let response = ctx
        .server
        .post("/api/analyze-menu")
        .json(&json!({ "menuId": first["menuId"] }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["menuId"], first["menuId"]);

    let status = ctx.server.get("/api/check-menu-status").await.json::<Value>();
    assert_eq!(status["menuData"]["menuName"], "first.png");
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_analyze_rejects_malformed_body(ctx: &mut MenuChatContext) {
    let response = ctx
        .server
        .post("/api/analyze-menu")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_menu_status_before_and_after_analysis(ctx: &mut MenuChatContext) {
    let before = ctx.server.get("/api/check-menu-status").await;
    before.assert_status_ok();
    assert_eq!(
        before.json::<Value>(),
        json!({ "hasMenu": false, "menuData": null })
    );

    let record = ctx.upload_png("dinner.png").await;
    ctx.mock_vision_response(candidate("SOUP 4.50")).await;
    ctx.analyze_latest().await.assert_status_ok();

    let after = ctx.server.get("/api/check-menu-status").await.json::<Value>();
    assert_eq!(after["hasMenu"], true);
    assert_eq!(after["menuData"]["menuId"], record["menuId"]);
    assert_eq!(after["menuData"]["menuName"], "dinner.png");
    assert_eq!(after["menuData"]["menuUrl"], record["filePath"]);
    assert_eq!(after["menuData"]["mimeType"], "image/png");
    assert_eq!(after["menuData"]["menuContent"], "SOUP 4.50");
    assert!(after["menuData"]["analyzedAt"].is_string());
    assert_eq!(after["menuData"]["uploadedAt"], after["menuData"]["analyzedAt"]);
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_menu_status_with_corrupt_analysis_is_server_error(ctx: &mut MenuChatContext) {
    std::fs::write(ctx.uploads.path().join("menuAnalysis.json"), "{").unwrap();

    let response = ctx.server.get("/api/check-menu-status").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_get_menu_analysis_by_id(ctx: &mut MenuChatContext) {
    let record = ctx.upload_png("dinner.png").await;
    let url = format!("/api/menus/{}/analysis", record["menuId"].as_str().unwrap());

    ctx.server
        .get(&url)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.mock_vision_response(candidate("TEA 2.00")).await;
    ctx.analyze_latest().await.assert_status_ok();

    let response = ctx.server.get(&url).await;
    response.assert_status_ok();
    let analysis = response.json::<Value>();
    assert_eq!(analysis["menuContent"], "TEA 2.00");
    assert_eq!(analysis["originalName"], "dinner.png");
}

#[test_context(MenuChatContext)]
#[tokio::test]
async fn test_pdf_menu_upload_analyze_and_status(ctx: &mut MenuChatContext) {
    let upload = ctx
        .upload("menu.pdf", "application/pdf", &one_line_pdf("Soup 4.50"))
        .await;
    upload.assert_status_ok();
    let record = upload.json::<Value>();
    let menu_id = record["menuId"].as_str().unwrap();
    assert_eq!(record["filePath"], format!("/uploads/{menu_id}.pdf"));
    assert_eq!(record["mimeType"], "application/pdf");

    let response = ctx
        .server
        .post("/api/analyze-menu")
        .json(&json!({ "menuId": menu_id }))
        .await;

    response.assert_status_ok();
    let analysis = response.json::<Value>();
    assert_eq!(analysis["menuId"], menu_id);
    let text = analysis["analysis"].as_str().unwrap();
    assert!(text.contains("Soup 4.50"), "extracted {text:?}");
    assert!(ctx.gemini_requests(":generateContent").await.is_empty());

    let status = ctx.server.get("/api/check-menu-status").await.json::<Value>();
    assert_eq!(status["hasMenu"], true);
    assert_eq!(status["menuData"]["menuContent"], text);
}

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Path as UrlPath,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use platelens_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LlmArgs, LogArgs, ServerArgs, StorageArgs},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use uuid::Uuid;

const ANALYSIS: &str = "## 🍽️ Food Analysis\n• Pasta carbonara - 650 calories\n• Total Calories: 650\n\n## 💪 Exercise to Burn These Calories\n• Running: 60 minutes\n\n## 🏥 Health Assessment\n• Healthiness Score: 5/10\n\n## 💡 Recommendations\n• Add a side salad";

const CHAT_ANSWER: &str = "Yes, in moderation.";

/// Stands in for `POST /v1beta/models/{model}:generateContent`.
async fn gemini_stub(UrlPath(model_action): UrlPath<String>, Json(body): Json<Value>) -> Response {
    let parts = &body["contents"][0]["parts"];
    assert!(parts[0]["text"].is_string(), "prompt must come first");
    assert!(
        parts[1]["inline_data"]["data"].is_string(),
        "image must be sent inline"
    );

    if model_action.starts_with("broken-model") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let text = if model_action.starts_with("chat-model") {
        CHAT_ANSWER
    } else {
        ANALYSIS
    };

    Json(json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}

async fn spawn_gemini_stub() -> String {
    let app = Router::new().route("/v1beta/models/{model_action}", post(gemini_stub));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    format!("http://{addr}")
}

fn args(data_dir: &Path, base_url: String, api_key: Option<&str>, model: &str) -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        llm: LlmArgs {
            gemini_api_key: api_key.map(str::to_string),
            gemini_model: model.to_string(),
            gemini_chat_model: "chat-model".to_string(),
            gemini_base_url: base_url,
            max_retries: 3,
            retry_delay_ms: 1,
            request_timeout_secs: 5,
        },
        storage: StorageArgs {
            data_dir: data_dir.to_path_buf(),
        },
        log: LogArgs {
            filter: "info".to_string(),
            json: false,
        },
    }
}

async fn test_server(args: Args) -> TestServer {
    let app_state = state(Arc::new(args)).await.unwrap();
    TestServer::new(router(app_state).unwrap()).unwrap()
}

async fn default_server(dir: &TempDir) -> TestServer {
    let base_url = spawn_gemini_stub().await;
    test_server(args(dir.path(), base_url, Some("test-key"), "vision-model")).await
}

fn png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 3, image::Rgb([200, 120, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn photo_form() -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "image",
            Part::bytes(png())
                .file_name("dinner.png")
                .mime_type("image/png"),
        )
        .add_text("source", "camera")
        .add_text("custom_prompt", "I'm watching my cholesterol")
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc = response.json::<Value>();
    assert!(doc["paths"]["/users/{user_id}/analyses"].is_object());
    assert!(doc["paths"]["/users/{user_id}/analyses/{analysis_id}/chat"].is_object());

    let report_content =
        &doc["paths"]["/users/{user_id}/analyses/{analysis_id}/report"]["get"]["responses"]["200"]
            ["content"];
    assert!(report_content["application/pdf"].is_object());
    assert!(report_content["text/markdown"].is_object());
}

#[tokio::test]
async fn test_analyze_history_report_and_chat() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let response = server
        .post("/users/alice/analyses")
        .multipart(photo_form())
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let record = &body["data"]["record"];
    let analysis_id = record["id"].as_str().unwrap().to_string();
    assert_eq!(record["user_id"], "alice");
    assert_eq!(record["model"], "vision-model");
    assert_eq!(record["total_calories"], 650);
    assert_eq!(record["custom_prompt"], "I'm watching my cholesterol");
    assert_eq!(record["image"]["source"], "camera");
    assert_eq!(record["image"]["mime_type"], "image/png");

    let kinds: Vec<&str> = body["data"]["report"]["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "food_analysis",
            "exercise",
            "health_assessment",
            "recommendations"
        ]
    );

    assert!(dir.path().join("history").join("alice.json").exists());

    let history = server.get("/users/alice/analyses").await;
    history.assert_status_ok();
    let history = history.json::<Value>();
    assert_eq!(history["data"].as_array().unwrap().len(), 1);
    assert_eq!(history["data"][0]["id"], analysis_id.as_str());

    let single = server
        .get(&format!("/users/alice/analyses/{analysis_id}"))
        .await;
    single.assert_status_ok();
    assert_eq!(
        single.json::<Value>()["data"]["record"]["raw_response"],
        ANALYSIS
    );

    let pdf = server
        .get(&format!("/users/alice/analyses/{analysis_id}/report"))
        .await;
    pdf.assert_status_ok();
    assert_eq!(pdf.header("content-type"), "application/pdf");
    assert!(
        pdf.header("content-disposition")
            .to_str()
            .unwrap()
            .contains("health_analysis.pdf")
    );
    assert!(pdf.as_bytes().starts_with(b"%PDF"));

    let markdown = server
        .get(&format!("/users/alice/analyses/{analysis_id}/report"))
        .add_query_param("format", "markdown")
        .await;
    markdown.assert_status_ok();
    let text = markdown.text();
    assert!(text.starts_with("# Health Analysis Report"));
    assert!(text.contains("Pasta carbonara - 650 calories"));

    let reply = server
        .post(&format!("/users/alice/analyses/{analysis_id}/chat"))
        .json(&json!({ "question": "Is this okay for a diabetic?" }))
        .await;
    reply.assert_status_ok();
    let reply = reply.json::<Value>();
    assert_eq!(reply["data"]["reply"]["content"], CHAT_ANSWER);
    assert_eq!(reply["data"]["reply"]["role"], "assistant");
    assert_eq!(reply["data"]["transcript"].as_array().unwrap().len(), 2);

    let transcript = server
        .get(&format!("/users/alice/analyses/{analysis_id}/chat"))
        .await;
    transcript.assert_status_ok();
    let transcript = transcript.json::<Value>();
    assert_eq!(transcript["data"][0]["role"], "user");
    assert_eq!(
        transcript["data"][0]["content"],
        "Is this okay for a diabetic?"
    );
}

#[tokio::test]
async fn test_analyses_accumulate_in_order() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let response = server
            .post("/users/bob/analyses")
            .multipart(photo_form())
            .await;
        response.assert_status(StatusCode::CREATED);
        ids.push(response.json::<Value>()["data"]["record"]["id"].clone());
    }

    let history = server.get("/users/bob/analyses").await.json::<Value>();
    let listed: Vec<Value> = history["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(listed, ids);

    let page = server
        .get("/users/bob/analyses")
        .add_query_param("offset", 1)
        .add_query_param("limit", 1)
        .await
        .json::<Value>();
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"][0]["id"], ids[1]);
}

#[tokio::test]
async fn test_missing_image_is_rejected() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let response = server
        .post("/users/alice/analyses")
        .multipart(MultipartForm::new().add_text("custom_prompt", "anything"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "E_BAD_REQUEST");
    assert_eq!(body["message"], "Please upload an image first");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected_with_size_message() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let response = server
        .post("/users/alice/analyses")
        .multipart(MultipartForm::new().add_part(
            "image",
            Part::bytes(vec![0u8; 11 * 1024 * 1024])
                .file_name("huge.png")
                .mime_type("image/png"),
        ))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "E_PAYLOAD_TOO_LARGE");
    assert_eq!(
        body["message"],
        "Please upload a smaller image (less than 10MB)"
    );
    assert!(!dir.path().join("history").join("alice.json").exists());
}

#[tokio::test]
async fn test_non_image_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let response = server
        .post("/users/alice/analyses")
        .multipart(MultipartForm::new().add_part(
            "image",
            Part::bytes(b"just some text".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Please upload a JPG or PNG image"
    );
    assert!(!dir.path().join("history").join("alice.json").exists());
}

#[tokio::test]
async fn test_invalid_user_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;

    let response = server.get("/users/bad.user/analyses").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_analysis_is_not_found() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;
    let id = Uuid::new_v4();

    let response = server.get(&format!("/users/alice/analyses/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "E_NOT_FOUND");

    let response = server
        .get(&format!("/users/alice/analyses/{id}/report"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .post(&format!("/users/alice/analyses/{id}/chat"))
        .json(&json!({ "question": "Hello?" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let dir = TempDir::new().unwrap();
    let server = default_server(&dir).await;
    let id = Uuid::new_v4();

    let response = server
        .post(&format!("/users/alice/analyses/{id}/chat"))
        .json(&json!({ "question": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_api_key_is_service_unavailable() {
    let dir = TempDir::new().unwrap();
    let base_url = spawn_gemini_stub().await;
    let server = test_server(args(dir.path(), base_url, None, "vision-model")).await;

    let response = server
        .post("/users/alice/analyses")
        .multipart(photo_form())
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>()["message"],
        "Missing API key: set GOOGLE_API_KEY"
    );

    let history = server.get("/users/alice/analyses").await.json::<Value>();
    assert!(history["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway_and_not_recorded() {
    let dir = TempDir::new().unwrap();
    let base_url = spawn_gemini_stub().await;
    let server = test_server(args(dir.path(), base_url, Some("test-key"), "broken-model")).await;

    let response = server
        .post("/users/alice/analyses")
        .multipart(photo_form())
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let message = response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.starts_with("Analysis failed:"), "{message}");

    let history = server.get("/users/alice/analyses").await.json::<Value>();
    assert!(history["data"].as_array().unwrap().is_empty());
}

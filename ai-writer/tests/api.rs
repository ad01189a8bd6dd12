use std::sync::Arc;

use ai_writer::{AppContext, router};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use futures::stream;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use writer_adapters::GenerationGateway;
use writer_adapters::traits::{
    AdapterError, AdapterMetadata, AdapterResult, AdapterStream, CompletionRequest,
    InferenceChunk, ModelAdapter, ModelDetails, ModelLoader,
};
use writer_config::WriterConfig;

/// Replies with the prompt followed by a fixed body, like a raw completion.
struct StaticAdapter {
    metadata: AdapterMetadata,
    body: Option<&'static str>,
}

#[async_trait]
impl ModelAdapter for StaticAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn infer(&self, request: CompletionRequest) -> AdapterResult<AdapterStream> {
        let Some(body) = self.body else {
            return Err(AdapterError::response("backend exploded"));
        };
        let chunks = vec![
            Ok::<_, AdapterError>(InferenceChunk::new(request.prompt().to_owned(), false)),
            Ok(InferenceChunk::new(body, true)),
        ];
        Ok(Box::pin(stream::iter(chunks)))
    }
}

struct StaticLoader {
    body: Option<&'static str>,
}

#[async_trait]
impl ModelLoader for StaticLoader {
    async fn load(&self, model: &str) -> AdapterResult<Arc<dyn ModelAdapter>> {
        let details = ModelDetails {
            model_type: Some("gpt2".to_owned()),
            parameter_size: Some("124M".to_owned()),
            ..ModelDetails::default()
        };
        Ok(Arc::new(StaticAdapter {
            metadata: AdapterMetadata::new("static", model).with_details(details),
            body: self.body,
        }))
    }
}

async fn app_with(body: Option<&'static str>, loaded: bool) -> Router {
    let config = WriterConfig::default();
    let gateway = Arc::new(GenerationGateway::new(
        Arc::new(StaticLoader { body }),
        config.model_name.clone(),
    ));
    if loaded {
        gateway.initialize().await.unwrap();
    }
    router(AppContext::new(config, gateway))
}

async fn app() -> Router {
    app_with(Some(" Tea is a calm drink. It suits every season."), true).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn home_lists_endpoints() {
    let (status, json) = send(app().await, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "AI Writer API is running");
    assert_eq!(json["status"], "online");
    assert_eq!(json["endpoints"]["generate"], "/api/generate [POST]");
    assert_eq!(json["endpoints"]["health"], "/api/health [GET]");
}

#[tokio::test]
async fn health_reports_model_state() {
    let (status, json) = send(app().await, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model_loaded"], true);
    assert_eq!(json["model_name"], "gpt2");

    let (status, json) = send(app_with(None, false).await, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["model_loaded"], false);
    assert!(json["model_name"].is_null());
}

#[tokio::test]
async fn generates_blog_content() {
    let body = json!({
        "input": "benefits of green tea",
        "type": "blog",
        "max_length": 300,
        "temperature": 0.5
    });
    let (status, json) = send(app().await, post_json("/api/generate", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["type"], "blog");
    assert_eq!(json["content"], "Tea is a calm drink. It suits every season.");
    assert_eq!(json["input_length"], 21);
    assert_eq!(json["output_length"], 43);
}

#[tokio::test]
async fn unknown_type_is_reported_as_content() {
    let body = json!({"input": "green tea", "type": "limerick"});
    let (status, json) = send(app().await, post_json("/api/generate", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "content");
}

#[tokio::test]
async fn email_output_gets_subject_line() {
    let body = json!({"input": "refund request", "type": "email"});
    let (status, json) = send(app().await, post_json("/api/generate", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        json["content"]
            .as_str()
            .unwrap()
            .starts_with("Subject: Re: Your Inquiry\n\n")
    );
}

#[tokio::test]
async fn invalid_bodies_are_unprocessable() {
    let cases = [
        json!({"type": "blog"}),
        json!({"input": ""}),
        json!({"input": "tea", "max_length": 10}),
        json!({"input": "tea", "max_length": 5000}),
        json!({"input": "tea", "temperature": 1.5}),
        json!({"input": "tea", "temperature": 0.0}),
    ];

    for body in cases {
        let (status, json) = send(app().await, post_json("/api/generate", &body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
        assert_eq!(json["success"], false);
    }
}

#[tokio::test]
async fn malformed_json_is_unprocessable() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = send(app().await, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "Invalid request");
}

#[tokio::test]
async fn generate_without_model_is_unavailable() {
    let body = json!({"input": "green tea", "type": "blog"});
    let (status, json) = send(app_with(None, false).await, post_json("/api/generate", &body)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Model not loaded");
}

#[tokio::test]
async fn backend_failure_is_internal_error() {
    let body = json!({"input": "green tea", "type": "seo"});
    let (status, json) = send(app_with(None, true).await, post_json("/api/generate", &body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Generation failed");
    assert!(json["message"].as_str().unwrap().contains("backend exploded"));
}

#[tokio::test]
async fn model_info_describes_loaded_model() {
    let (status, json) = send(app().await, get("/api/model-info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["model_info"]["model"], "gpt2");
    assert_eq!(json["model_info"]["provider"], "static");
    assert_eq!(json["model_info"]["model_type"], "gpt2");
    assert_eq!(json["model_info"]["device"], "CPU");

    let (status, _) = send(app_with(None, false).await, get("/api/model-info")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn lists_content_types() {
    let (status, json) = send(app().await, get("/api/content-types")).await;

    assert_eq!(status, StatusCode::OK);
    let types: Vec<&str> = json["content_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        ["blog", "email", "copy", "seo", "video", "summarize", "content"]
    );
}

#[tokio::test]
async fn create_template_echoes_variables() {
    let body = json!({
        "templateName": "launch",
        "templateContent": "Announce {{product}} to {{audience}} with {{product}} pricing"
    });
    let (status, json) = send(app().await, post_json("/api/create-template", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Template created successfully");
    assert_eq!(json["template"]["name"], "launch");
    assert_eq!(json["template"]["variables"], json!(["product", "audience"]));
    assert!(json["template"]["created_at"].is_string());
}

#[tokio::test]
async fn create_template_requires_fields() {
    let cases = [
        json!({"templateName": "", "templateContent": "x"}),
        json!({"templateName": "x", "templateContent": ""}),
        json!({"templateName": "x"}),
    ];

    for body in cases {
        let (status, _) = send(app().await, post_json("/api/create-template", &body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
    }
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let (status, json) = send(app().await, get("/api/does-not-exist")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        json!({
            "success": false,
            "error": "Route not found",
            "message": "The requested endpoint does not exist"
        })
    );
}

use std::any::Any;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use writer_config::CorsOrigins;
use writer_primitives::ContentType;
use writer_prompts::CustomTemplate;
use writer_telemetry::HealthReport;

use crate::dto::{
    ContentTypeInfo, ContentTypesResponse, GenerateBody, GenerateResponse, ModelInfo,
    ModelInfoResponse, TemplateBody, TemplateResponse,
};
use crate::{ApiError, AppContext};

/// A route advertised by the home endpoint and the startup banner.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    /// Key in the home route's `endpoints` map.
    pub key: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Request path.
    pub path: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Every route the service serves.
pub const ENDPOINTS: [Endpoint; 6] = [
    Endpoint {
        key: "home",
        method: "GET",
        path: "/",
        description: "Home",
    },
    Endpoint {
        key: "health",
        method: "GET",
        path: "/api/health",
        description: "Health check",
    },
    Endpoint {
        key: "model_info",
        method: "GET",
        path: "/api/model-info",
        description: "Model information",
    },
    Endpoint {
        key: "content_types",
        method: "GET",
        path: "/api/content-types",
        description: "Supported content types",
    },
    Endpoint {
        key: "generate",
        method: "POST",
        path: "/api/generate",
        description: "Generate content",
    },
    Endpoint {
        key: "create_template",
        method: "POST",
        path: "/api/create-template",
        description: "Create template",
    },
];

/// Builds the application router.
pub fn router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.config().cors());

    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health))
        .route("/api/model-info", get(model_info))
        .route("/api/content-types", get(content_types))
        .route("/api/generate", post(generate))
        .route("/api/create-template", post(create_template))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(ctx)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter(|origin| origin.as_str() != "*")
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        warn!(origin, error = %err, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(CorsAny)
                .allow_headers(CorsAny)
        }
    }
}

async fn home(State(ctx): State<AppContext>) -> Json<Value> {
    let config = ctx.config();
    let endpoints: Map<String, Value> = ENDPOINTS
        .iter()
        .filter(|endpoint| endpoint.path != "/")
        .map(|endpoint| {
            (
                endpoint.key.to_owned(),
                Value::String(format!("{} [{}]", endpoint.path, endpoint.method)),
            )
        })
        .collect();

    Json(json!({
        "message": format!("{} is running", config.api_title),
        "description": config.api_description,
        "version": config.api_version,
        "status": "online",
        "endpoints": endpoints,
    }))
}

async fn health(State(ctx): State<AppContext>) -> Json<HealthReport> {
    Json(HealthReport::from_model(ctx.gateway().model_name().await))
}

async fn model_info(State(ctx): State<AppContext>) -> Result<Json<ModelInfoResponse>, ApiError> {
    let metadata = ctx.gateway().model_info().await?;
    let device = if ctx.config().use_gpu { "GPU" } else { "CPU" };

    Ok(Json(ModelInfoResponse {
        success: true,
        model_info: ModelInfo { metadata, device },
    }))
}

async fn content_types() -> Json<ContentTypesResponse> {
    Json(ContentTypesResponse {
        success: true,
        content_types: ContentType::ALL.into_iter().map(ContentTypeInfo::from).collect(),
    })
}

async fn generate(
    State(ctx): State<AppContext>,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request(ctx.config())?;
    let result = ctx.handler().handle(&request).await?;
    Ok(Json(result.into()))
}

async fn create_template(
    payload: Result<Json<TemplateBody>, JsonRejection>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let Json(body) = payload?;
    let template = CustomTemplate::new(body.template_name, body.template_content)?;
    info!(
        name = template.name(),
        variables = ?template.variables(),
        "template created"
    );

    Ok(Json(TemplateResponse {
        success: true,
        message: "Template created successfully",
        template: template.into(),
    }))
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "request handler panicked");
    ApiError::internal("Something went wrong on the server").into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn panics_become_internal_errors() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn endpoints_are_unique() {
        for (index, endpoint) in ENDPOINTS.iter().enumerate() {
            assert!(
                ENDPOINTS[index + 1..]
                    .iter()
                    .all(|other| other.path != endpoint.path)
            );
        }
    }
}

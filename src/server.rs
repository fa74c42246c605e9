//! HTTP surface — the JSON API consumed by the marketing front-end.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::chat::{ChatAssistant, ChatTurn};
use crate::contact::{ContactRelay, ContactSubmission};
use crate::error::{ConfigError, Error};
use crate::intake::{IntakeRecord, QAPair, QuestionSet};
use crate::mailer::{Recipient, ReportMailer};
use crate::report::{AutomationReport, ReportGenerator};

/// Shared handles for the route handlers.
///
/// Each service is optional: absent configuration disables the feature and
/// its routes answer with a configuration error rather than failing startup.
#[derive(Clone, Default)]
pub struct AppState {
    pub generator: Option<Arc<ReportGenerator>>,
    pub chat: Option<Arc<ChatAssistant>>,
    pub mailer: Option<Arc<dyn ReportMailer>>,
    pub contact: Option<Arc<ContactRelay>>,
}

/// Build the API router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze-initial", post(analyze_initial))
        .route("/api/analyze-final", post(analyze_final))
        .route("/api/send-report", post(send_report))
        .route("/api/chat", post(chat))
        .route("/api/contact", post(contact))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Error wrapper that maps service errors onto HTTP responses.
struct ApiError(Error);

impl<E: Into<Error>> From<E> for ApiError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Config(_)
            | Error::Generation(_)
            | Error::Dispatch(_)
            | Error::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();
        if status.is_server_error() {
            error!(%status, "Request failed: {message}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn generator(state: &AppState) -> Result<&Arc<ReportGenerator>, ApiError> {
    state.generator.as_ref().ok_or_else(|| {
        ConfigError::ServiceUnavailable("generation is not configured".to_string()).into()
    })
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
struct QuestionsResponse {
    questions: QuestionSet,
}

/// First analysis call: intake form in, follow-up questions out.
async fn analyze_initial(
    State(state): State<AppState>,
    Json(intake): Json<IntakeRecord>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    // Reject bad input before touching the generative service.
    intake.validate()?;
    let generator = generator(&state)?;

    info!(company = ?intake.company_name, "Initial analysis requested");
    let questions = generator.derive_follow_up_questions(&intake).await?;
    Ok(Json(QuestionsResponse { questions }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinalAnalysisRequest {
    #[serde(flatten)]
    intake: IntakeRecord,
    qa_pairs: Vec<QAPair>,
}

/// Second analysis call: intake + answered questions in, full report out.
async fn analyze_final(
    State(state): State<AppState>,
    Json(request): Json<FinalAnalysisRequest>,
) -> Result<Json<AutomationReport>, ApiError> {
    request.intake.validate()?;
    let generator = generator(&state)?;

    info!(
        company = ?request.intake.company_name,
        pairs = request.qa_pairs.len(),
        "Final analysis requested"
    );
    let report = generator
        .derive_automation_report(&request.intake, &request.qa_pairs)
        .await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendReportRequest {
    recipient: Recipient,
    #[serde(default)]
    intake: IntakeRecord,
    report: AutomationReport,
}

/// Deliver a generated report by email to the lead and the business.
async fn send_report(
    State(state): State<AppState>,
    Json(request): Json<SendReportRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mailer = state.mailer.as_ref().ok_or_else(|| {
        ApiError::from(ConfigError::ServiceUnavailable(
            "email dispatch is not configured".to_string(),
        ))
    })?;

    mailer
        .send_report(&request.recipient, &request.intake, &request.report)
        .await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    messages: Vec<ChatTurn>,
}

/// Demo chat widget endpoint.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let assistant = state.chat.as_ref().ok_or_else(|| {
        ApiError::from(ConfigError::ServiceUnavailable(
            "chat is not configured".to_string(),
        ))
    })?;

    let message = assistant.reply(&request.messages).await?;
    Ok(Json(json!({ "message": message })))
}

/// Contact-form relay endpoint.
async fn contact(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let relay = state.contact.as_ref().ok_or_else(|| {
        ApiError::from(ConfigError::ServiceUnavailable(
            "contact relay is not configured".to_string(),
        ))
    })?;

    let success = relay.submit(&submission).await?;
    Ok(Json(json!({ "success": success })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::llm::{CompletionRequest, CompletionResponse, LlmProvider};
    use crate::report::GeneratorConfig;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct CannedProvider {
        content: String,
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, GenerationError> {
            Ok(CompletionResponse {
                content: self.content.clone(),
                input_tokens: 0,
                output_tokens: 0,
            })
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let app = api_routes(AppState::default());
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_intake_is_rejected_before_configuration_check() {
        // No generator configured, but validation must win anyway.
        let app = api_routes(AppState::default());
        let response = app
            .oneshot(post_json(
                "/api/analyze-initial",
                r#"{"email": "not-an-email", "phone": "12345"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn missing_generator_is_a_server_error() {
        let app = api_routes(AppState::default());
        let response = app
            .oneshot(post_json(
                "/api/analyze-initial",
                r#"{"email": "a@b.com", "phone": "12345"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn analyze_initial_returns_questions() {
        let provider = Arc::new(CannedProvider {
            content: r#"{"questions": ["Q1?", "Q2?", "Q3?"]}"#.to_string(),
        });
        let state = AppState {
            generator: Some(Arc::new(ReportGenerator::new(
                provider,
                GeneratorConfig::default(),
            ))),
            ..Default::default()
        };
        let app = api_routes(state);
        let response = app
            .oneshot(post_json(
                "/api/analyze-initial",
                r#"{"email": "a@b.com", "phone": "12345", "companyName": "Acme"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["questions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn analyze_final_flattens_intake_and_pairs() {
        let provider = Arc::new(CannedProvider {
            content: r#"{"scope_title": "Automation Roadmap", "executive_summary": "S"}"#
                .to_string(),
        });
        let state = AppState {
            generator: Some(Arc::new(ReportGenerator::new(
                provider,
                GeneratorConfig::default(),
            ))),
            ..Default::default()
        };
        let app = api_routes(state);
        let response = app
            .oneshot(post_json(
                "/api/analyze-final",
                r#"{
                    "email": "a@b.com",
                    "phone": "12345",
                    "qaPairs": [{"question": "Q?", "answer": "A"}]
                }"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["scope_title"], "Automation Roadmap");
    }

    #[tokio::test]
    async fn chat_without_provider_is_a_server_error() {
        let app = api_routes(AppState::default());
        let response = app
            .oneshot(post_json("/api/chat", r#"{"messages": []}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn chat_proxies_the_reply() {
        let provider = Arc::new(CannedProvider {
            content: "We automate invoices!".to_string(),
        });
        let state = AppState {
            chat: Some(Arc::new(ChatAssistant::new(provider))),
            ..Default::default()
        };
        let app = api_routes(state);
        let response = app
            .oneshot(post_json(
                "/api/chat",
                r#"{"messages": [{"type": "user", "message": "What do you automate?"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "We automate invoices!");
    }

    #[tokio::test]
    async fn send_report_without_mailer_is_a_server_error() {
        let app = api_routes(AppState::default());
        let response = app
            .oneshot(post_json(
                "/api/send-report",
                r#"{
                    "recipient": {"email": "a@b.com", "name": "Ada"},
                    "report": {"scope_title": "T"}
                }"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

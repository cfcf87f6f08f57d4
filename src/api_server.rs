// Axum server module
//
// Serves the MyFit form page plus a small JSON surface over the same
// assessment pipeline. The fitted predictor is the only shared state.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Form, Router,
};

use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::assessment::{assess, Assessment, MeasurementForm};
use crate::errors::AssessmentError;
use crate::predictor::CategoryPredictor;
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    /// Fit once at startup, read-only afterwards
    pub predictor: Arc<CategoryPredictor>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        tracing::info!("Fitting category predictor...");
        let predictor = CategoryPredictor::from_training_set()?;
        Ok(Self::with_predictor(predictor))
    }

    pub fn with_predictor(predictor: CategoryPredictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Form page (HTML)
        .route("/", get(pages::index_page).post(pages::submit_form))

        // Health check
        .route("/health", get(health_check))

        // Assessment endpoint (JSON)
        .route("/api/assess", post(assess_measurements))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Same fields as the HTML form; responds with the result bundle as JSON.
async fn assess_measurements(
    State(state): State<AppState>,
    form: Result<Form<MeasurementForm>, FormRejection>,
) -> Result<Json<Assessment>, AppError> {
    let Form(form) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let assessment = assess(&form, &state.predictor)?;
    Ok(Json(assessment))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Validation(AssessmentError),
}

impl From<AssessmentError> for AppError {
    fn from(err: AssessmentError) -> Self {
        AppError::Validation(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// Page handlers for HTML rendering with Askama

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse},
    Form,
};
use askama::Template;

use crate::api_server::AppState;
use crate::assessment::{assess, Assessment, MeasurementForm};
use crate::errors::AssessmentError;
use crate::predictor::PredictedCategory;

// ============================================================================
// Form Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub weight: String,
    pub height: String,
    pub age: String,
    pub gender: String,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

/// Display-ready slice of an `Assessment`.
pub struct ResultView {
    pub bmi: f64,
    pub category: &'static str,
    pub category_class: &'static str,
    pub ai_category: &'static str,
    pub ai_category_class: &'static str,
    pub chart_index: usize,
    pub recommendations: Vec<&'static str>,
}

impl From<Assessment> for ResultView {
    fn from(assessment: Assessment) -> Self {
        let status_class = |healthy: bool| if healthy { "text-success" } else { "text-danger" };
        Self {
            bmi: assessment.bmi,
            category: assessment.category.label(),
            category_class: status_class(assessment.category.is_healthy()),
            ai_category: assessment.ai_category.display_label(),
            ai_category_class: status_class(assessment.ai_category == PredictedCategory::Normal),
            chart_index: assessment.category.chart_index(),
            recommendations: assessment.recommendations,
        }
    }
}

impl IndexTemplate {
    /// Empty form, nothing submitted yet.
    pub fn awaiting_input() -> Self {
        Self {
            title: "MyFit AI".to_string(),
            weight: String::new(),
            height: String::new(),
            age: String::new(),
            gender: "male".to_string(),
            error: None,
            result: None,
        }
    }

    /// Form echoing the submitted values, with either an error or a result.
    pub fn with_outcome(form: &MeasurementForm, outcome: Result<Assessment, AssessmentError>) -> Self {
        let echo = |field: &Option<String>| field.clone().unwrap_or_default();
        let (error, result) = match outcome {
            Ok(assessment) => (None, Some(ResultView::from(assessment))),
            Err(err) => (Some(err.to_string()), None),
        };

        Self {
            title: "MyFit AI".to_string(),
            weight: echo(&form.weight),
            height: echo(&form.height),
            age: echo(&form.age),
            gender: form.gender.clone().unwrap_or_else(|| "male".to_string()),
            error,
            result,
        }
    }
}

fn render_page(template: IndexTemplate) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Failed to render index page: {}", e);
        format!("Template error: {}", e)
    }))
}

pub async fn index_page() -> impl IntoResponse {
    render_page(IndexTemplate::awaiting_input())
}

/// Always answers 200; problems show up as a banner above the form.
pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<MeasurementForm>, FormRejection>,
) -> impl IntoResponse {
    let template = match form {
        Ok(Form(form)) => {
            let outcome = assess(&form, &state.predictor);
            IndexTemplate::with_outcome(&form, outcome)
        }
        Err(rejection) => {
            tracing::warn!("Unreadable form submission: {}", rejection.body_text());
            let form = MeasurementForm::default();
            IndexTemplate::with_outcome(&form, Err(AssessmentError::InvalidInput { field: "form" }))
        }
    };
    render_page(template)
}

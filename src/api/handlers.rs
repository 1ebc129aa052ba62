use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::service::{LookupOutcome, NO_CSV_FILES_MESSAGE, PresentationPayload, TraceService};

use super::error::ApiError;
use super::types::LookupForm;

const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const RESULT_TEMPLATE: &str = include_str!("../../templates/result.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn result(
    State(service): State<Arc<TraceService>>,
    headers: HeaderMap,
    Form(form): Form<LookupForm>,
) -> Result<Response, ApiError> {
    let outcome = service.handle_lookup_request(&form.barcode).await?;

    let wants_json = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    match outcome {
        LookupOutcome::NoSourceFiles => {
            Ok(Json(json!({"error": NO_CSV_FILES_MESSAGE})).into_response())
        }
        LookupOutcome::Page(payload) if wants_json => Ok(Json(payload).into_response()),
        LookupOutcome::Page(payload) => Ok(Html(result_page(&payload)).into_response()),
    }
}

fn result_page(payload: &PresentationPayload) -> String {
    RESULT_TEMPLATE
        .replace("{{ result_data }}", &payload.table_html)
        .replace("{{ graph_data }}", &payload.chart_html)
}

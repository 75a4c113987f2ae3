// src/api/handlers/submit.rs
use actix_web::{web, HttpResponse, Result};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use crate::api::AppState;
use crate::models::Submission;

#[derive(Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub id_problem: Option<String>,
    #[serde(default)]
    pub id_user: Option<String>,
    /// Standard base64 of the UTF-8 source.
    #[serde(default)]
    pub code_encoded: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub points: i64,
    pub feedback: String,
}

impl SubmitRequest {
    /// `None` when a field is missing or empty, or the code does not decode.
    fn into_submission(self) -> Option<Submission> {
        let id_problem = self.id_problem.filter(|s| !s.trim().is_empty())?;
        let id_user = self.id_user.filter(|s| !s.trim().is_empty())?;
        let code_encoded = self.code_encoded.filter(|s| !s.trim().is_empty())?;

        let bytes = BASE64_STANDARD.decode(code_encoded.trim()).ok()?;
        let code = String::from_utf8(bytes).ok()?;

        Some(Submission::new(id_problem, id_user, code))
    }
}

fn bad_request() -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"error": "Bad Request"}))
}

/// POST /api/v1/submit - Grade a submission and record the points it earned
pub async fn submit(
    state: web::Data<AppState>,
    req: web::Json<SubmitRequest>,
) -> Result<HttpResponse> {
    let Some(submission) = req.into_inner().into_submission() else {
        return Ok(bad_request());
    };

    let Some(options) = state.catalog.get(&submission.id_problem) else {
        log::warn!("Submission for unknown problem '{}'", submission.id_problem);
        return Ok(bad_request());
    };

    match state.grader.submit(&state.db_pool, &submission, options).await {
        Ok(verdict) => Ok(HttpResponse::Ok().json(SubmitResponse {
            points: verdict.points(),
            feedback: verdict.feedback,
        })),
        Err(e) => {
            log::error!("Failed to record points for submission {}: {}", submission.id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to record points"
            })))
        }
    }
}

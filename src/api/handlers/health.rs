// src/api/handlers/health.rs
use actix_web::{HttpResponse, Result};
use serde_json::json;

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "apl-grader",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(json!({"error": "Not Found"})))
}

pub async fn method_not_allowed() -> Result<HttpResponse> {
    Ok(HttpResponse::MethodNotAllowed().json(json!({"error": "Method Not Allowed"})))
}

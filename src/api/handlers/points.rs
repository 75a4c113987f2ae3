// src/api/handlers/points.rs
use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use crate::api::AppState;
use crate::database;
use crate::models::UserTotal;

#[derive(Serialize)]
pub struct PointsResponse {
    pub points: Vec<UserTotal>,
}

/// GET /api/v1/points - Point totals for every user
pub async fn get_points(state: web::Data<AppState>) -> Result<HttpResponse> {
    match database::get_user_totals(&state.db_pool).await {
        Ok(points) => Ok(HttpResponse::Ok().json(PointsResponse { points })),
        Err(e) => {
            log::error!("Failed to fetch point totals: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch point totals"
            })))
        }
    }
}

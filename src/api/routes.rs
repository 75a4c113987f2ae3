// src/api/routes.rs
use actix_web::{error, web, HttpResponse};
use serde_json::json;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        let response = match &err {
            error::JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType()
                .json(json!({"error": "Unsupported Media Type"})),
            _ => HttpResponse::BadRequest().json(json!({"error": "Bad Request"})),
        };
        error::InternalError::from_response(err, response).into()
    }))
    .service(
        web::scope("/api/v1")
            .service(json_resource("/health").route(web::get().to(handlers::health_check)))
            .service(json_resource("/submit").route(web::post().to(handlers::submit)))
            .service(json_resource("/points").route(web::get().to(handlers::get_points))),
    )
    // Paths served by the previous Python backend.
    .service(json_resource("/submit").route(web::post().to(handlers::submit)))
    .service(json_resource("/get").route(web::get().to(handlers::get_points)));
}

/// A resource that answers a wrong method with a JSON 405.
fn json_resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(handlers::method_not_allowed))
}

use std::io::ErrorKind;
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use log::{debug, error};

use crate::models::AppState;

/// Handler for the health check
pub async fn health_handler() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}

/// Handler serving the last published config verbatim
pub async fn config_handler(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    let path = app_state.output_path();
    match tokio::fs::read(path).await {
        Ok(content) => HttpResponse::Ok()
            .content_type("application/yaml")
            .body(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} requested before first publish", path);
            HttpResponse::NotFound()
                .content_type("text/plain")
                .body("config.yaml not found")
        }
        Err(e) => {
            error!("Failed to read {}: {}", path, e);
            HttpResponse::InternalServerError()
                .content_type("text/plain")
                .body(format!("Failed to read config: {}", e))
        }
    }
}

/// Register the API endpoints with Actix Web
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health_handler))
        .route("/config.yaml", web::get().to(config_handler));
}

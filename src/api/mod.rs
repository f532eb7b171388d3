pub mod health;
pub mod swagger;
pub mod users;

use actix_web::{web, HttpResponse};

use crate::{models::Envelope, utils::AppError};

/// Route table for the whole service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/users", web::get().to(users::list_users))
        .route("/users/top", web::get().to(users::list_top_users))
        .route("/user", web::post().to(users::create_user))
        .route("/user/{userId}", web::get().to(users::get_user))
        .route("/user/{userId}", web::put().to(users::edit_user))
        .route("/user/{userId}", web::delete().to(users::delete_user))
        .default_service(web::to(route_not_found));
}

/// Body parse failures go through AppError so they keep the `{data}` shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Envelope::new("Route not found"))
}

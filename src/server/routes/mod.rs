//! HTTP route modules

pub mod chat;
pub mod health;

use actix_web::web;

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .configure(chat::configure_routes);
}

// Route exports
pub mod browse;

use actix_web::web;

pub use browse::{AppState, Engine};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(browse::configure),
    );
}

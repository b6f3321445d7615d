pub mod define_handler;
pub mod health_handler;
pub mod simplify_handler;

use actix_web::web;

use crate::errors::AppError;

pub use define_handler::define;
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use simplify_handler::simplify;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(simplify)
        .service(define)
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready);
}

/// Malformed JSON bodies get the same `{ error, code }` shape as other errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

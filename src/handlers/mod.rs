pub mod employee;

use actix_web::web;
use crate::errors::{AppError, PlainTextError};

/// Registers the employee routes, including the legacy script paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let form_config = web::FormConfig::default().error_handler(|err, _req| {
        PlainTextError(AppError::BadRequest(err.to_string())).into()
    });

    cfg.app_data(form_config)
        .service(
            web::resource("/v1/employee")
                .route(web::get().to(employee::get_employees))
                .route(web::post().to(employee::create_employee)),
        )
        .service(
            web::resource("/get-employees")
                .route(web::get().to(employee::get_employees)),
        )
        .service(
            web::resource("/submit-form")
                .route(web::post().to(employee::create_employee)),
        );
}

pub mod event;
pub mod report;

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use log::warn;

use crate::{db::Store, errors::ServiceError, models::ReportBasis, service::auth::AuthMiddleware};

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        warn!("bad json body on {}: {}", req.path(), err);
        ServiceError::Invalid.into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        warn!("bad path {}: {}", req.path(), err);
        ServiceError::NotFound.into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        warn!("bad query on {}: {}", req.path(), err);
        ServiceError::Invalid.into()
    })
}

pub fn init_app(
    cfg: &mut web::ServiceConfig,
    store: web::Data<dyn Store>,
    jwt_secret: &str,
    report_basis: ReportBasis,
) {
    cfg.app_data(store)
        .app_data(web::Data::new(report_basis))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/events")
                .wrap(AuthMiddleware::new(jwt_secret))
                .configure(event::init_routes),
        )
        .service(web::scope("/reports").configure(report::init_routes));
}

use actix_web::{get, web, HttpResponse, Responder};
use log::error;

use crate::{db::Store, dto::ReportQuery, models::ReportBasis, service};

/// Events grouped per gamer. `?basis=` overrides the configured relation.
#[get("/userevents")]
pub async fn user_events(
    query: web::Query<ReportQuery>,
    default_basis: web::Data<ReportBasis>,
    store: web::Data<dyn Store>,
) -> impl Responder {
    let basis = query.basis.unwrap_or(*default_basis.get_ref());
    let res = service::report::build_user_event_report(store.get_ref(), basis).await;
    match res {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(err) => {
            error!("[{:} : {:}] failed to build report: {:?}", file!(), line!(), err);
            HttpResponse::from_error(err)
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(user_events);
}

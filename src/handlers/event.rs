use actix_web::{delete, get, post, web, HttpResponse, Responder};
use log::error;

use crate::{
    db::Store,
    dto::{MessageResponse, NewEventDto},
    models::EventId,
    service::{self, auth::CurrentGamer},
};

#[get("")]
pub async fn get_all(gamer: CurrentGamer, store: web::Data<dyn Store>) -> impl Responder {
    let res = service::attendance::list_with_aggregates(store.get_ref(), gamer.0).await;
    match res {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(err) => {
            error!("[{:} : {:}] failed to list events: {:?}", file!(), line!(), err);
            HttpResponse::from_error(err)
        }
    }
}

#[get("/{id}")]
pub async fn get_by_id(
    id: web::Path<EventId>,
    gamer: CurrentGamer,
    store: web::Data<dyn Store>,
) -> impl Responder {
    let res = service::attendance::get_one(store.get_ref(), id.into_inner(), gamer.0).await;
    match res {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(err) => HttpResponse::from_error(err),
    }
}

#[post("")]
pub async fn create(
    new_event_dto: web::Json<NewEventDto>,
    gamer: CurrentGamer,
    store: web::Data<dyn Store>,
) -> impl Responder {
    let res = service::attendance::create(store.get_ref(), gamer.0, new_event_dto.into_inner()).await;
    match res {
        Ok(event) => HttpResponse::Created().json(event),
        Err(err) => {
            error!("[{:} : {:}] failed to create event: {:?}", file!(), line!(), err);
            HttpResponse::from_error(err)
        }
    }
}

#[delete("/{id}")]
pub async fn destroy(
    id: web::Path<EventId>,
    gamer: CurrentGamer,
    store: web::Data<dyn Store>,
) -> impl Responder {
    match service::attendance::delete(store.get_ref(), id.into_inner(), gamer.0).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => HttpResponse::from_error(err),
    }
}

#[get("/{id}/attendees")]
pub async fn attendees(id: web::Path<EventId>, store: web::Data<dyn Store>) -> impl Responder {
    match service::attendance::attendees(store.get_ref(), id.into_inner()).await {
        Ok(gamers) => HttpResponse::Ok().json(gamers),
        Err(err) => HttpResponse::from_error(err),
    }
}

#[post("/{id}/signup")]
pub async fn signup(
    id: web::Path<EventId>,
    gamer: CurrentGamer,
    store: web::Data<dyn Store>,
) -> impl Responder {
    let res = service::attendance::join(store.get_ref(), id.into_inner(), gamer.0).await;
    match res {
        Ok(()) => HttpResponse::Created().json(MessageResponse::new("Gamer added")),
        Err(err) => {
            error!("[{:} : {:}] signup failed: {:?}", file!(), line!(), err);
            HttpResponse::from_error(err)
        }
    }
}

#[delete("/{id}/signup")]
pub async fn leave(
    id: web::Path<EventId>,
    gamer: CurrentGamer,
    store: web::Data<dyn Store>,
) -> impl Responder {
    let res = service::attendance::leave(store.get_ref(), id.into_inner(), gamer.0).await;
    match res {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => {
            error!("[{:} : {:}] leave failed: {:?}", file!(), line!(), err);
            HttpResponse::from_error(err)
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_all)
        .service(create)
        .service(get_by_id)
        .service(destroy)
        .service(attendees)
        .service(signup)
        .service(leave);
}

use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use derive_more::{Display, Error};
use log::error;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[display(fmt = "resource not found")]
    NotFound,

    #[display(fmt = "invalid request data")]
    Invalid,

    #[display(fmt = "unauthorized")]
    Unauthorized,

    #[display(fmt = "forbidden")]
    Forbidden,

    #[display(fmt = "storage unavailable")]
    Unavailable,

    #[display(fmt = "timeout")]
    Timeout,

    #[display(fmt = "internal error")]
    InternalError,
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(serde_json::json!({ "message": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Invalid => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ServiceError::NotFound,
            // a membership insert racing an event delete lands here
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                ServiceError::NotFound
            }
            sqlx::Error::PoolTimedOut => {
                error!("[{:} : {:}] database pool timed out", file!(), line!());
                ServiceError::Timeout
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => {
                error!("[{:} : {:}] database unavailable: {:?}", file!(), line!(), err);
                ServiceError::Unavailable
            }
            other => {
                error!("[{:} : {:}] database error: {:?}", file!(), line!(), other);
                ServiceError::InternalError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(ServiceError::from(sqlx::Error::RowNotFound), ServiceError::NotFound);
    }

    #[test]
    fn pool_failures_are_not_reported_as_success_or_not_found() {
        assert_eq!(ServiceError::from(sqlx::Error::PoolTimedOut), ServiceError::Timeout);
        assert_eq!(ServiceError::from(sqlx::Error::PoolClosed), ServiceError::Unavailable);
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ServiceError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::Invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::Unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ServiceError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }
}

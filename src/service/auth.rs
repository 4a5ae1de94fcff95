use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use log::warn;

use crate::{errors::ServiceError, models::GamerId};

/// The authenticated caller, as resolved from the bearer token.
#[derive(Debug, Clone, Copy)]
pub struct GamerIdentity {
    pub gamer_id: GamerId,
}

pub struct AuthMiddleware {
    pub secret: Rc<str>,
}

impl AuthMiddleware {
    pub fn new(secret: &str) -> Self {
        Self { secret: Rc::from(secret) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = jwt::parse_request(&req, "Bearer ")
            .and_then(|token| jwt::decode_claims(&self.secret, &token));
        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(GamerIdentity {
                    gamer_id: claims.gamer_id,
                });
                Box::pin(self.service.call(req))
            }
            Err(err) => {
                warn!("rejected {} {}: {}", req.method(), req.uri(), err);
                let err: actix_web::Error = err.into();
                Box::pin(async move { Err::<ServiceResponse<B>, _>(err) })
            }
        }
    }
}

/// Handler argument yielding the caller's gamer id.
#[derive(Debug, Clone, Copy)]
pub struct CurrentGamer(pub GamerId);

impl FromRequest for CurrentGamer {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<GamerIdentity>()
                .map(|identity| CurrentGamer(identity.gamer_id))
                .ok_or(ServiceError::Unauthorized),
        )
    }
}

pub mod jwt {
    use actix_web::dev::ServiceRequest;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use log::debug;

    use crate::{dto::Claims, errors::ServiceError};

    /// Issues an HS256 token for `gamer_id` valid for `ttl_secs` seconds.
    #[cfg(test)]
    pub fn create(
        secret: &str,
        gamer_id: crate::models::GamerId,
        ttl_secs: usize,
    ) -> Result<String, ServiceError> {
        use chrono::Utc;
        use jsonwebtoken::{encode, EncodingKey, Header};

        let exp = Utc::now().timestamp() as usize + ttl_secs;
        let claims = Claims::new(gamer_id, exp);
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|_| ServiceError::InternalError)
    }

    /// Expired or tampered tokens are `Unauthorized`.
    pub fn decode_claims(secret: &str, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|err| {
            debug!("token rejected: {:?}", err);
            ServiceError::Unauthorized
        })
    }

    pub fn parse_request(req: &ServiceRequest, prefix: &str) -> Result<String, ServiceError> {
        req.headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(prefix))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ServiceError::Unauthorized)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::GamerId;

        #[test]
        fn token_round_trips_gamer_id() {
            let token = create("s3cret", GamerId(7), 60).expect("token");
            let claims = decode_claims("s3cret", &token).expect("claims");
            assert_eq!(claims.gamer_id, GamerId(7));
        }

        #[test]
        fn wrong_secret_is_unauthorized() {
            let token = create("s3cret", GamerId(7), 60).expect("token");
            assert_eq!(decode_claims("other", &token).unwrap_err(), ServiceError::Unauthorized);
        }
    }
}

use std::future::{ready, Ready};
use std::io::Write;
use std::time::Instant;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use colored::Colorize;
use env_logger::{Builder, Env};
use futures_util::future::LocalBoxFuture;
use log::{info, Level};

pub struct LoggerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LoggerMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService { service }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let line = format!("{} {}", req.method(), req.uri());
        info!("server request: {}", line);
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            info!(
                "server response: {} {} in {:?}",
                line,
                res.status(),
                started.elapsed()
            );
            Ok(res)
        })
    }
}

/// Reads `RUST_LOG`, defaulting to `info`.
pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let level = record.level().to_string();
            let level = match record.level() {
                Level::Error => level.red().bold(),
                Level::Warn => level.yellow().bold(),
                Level::Info => level.green().bold(),
                Level::Debug => level.blue().bold(),
                Level::Trace => level.magenta().bold(),
            };
            writeln!(buf, "{} [{}] - {}", level, record.target(), record.args())
        })
        .init()
}

//! Optional Prometheus middleware.
//!
//! Wraps either the Prometheus middleware or a pass-through so the app type
//! is the same whether or not metrics could be configured.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;
use tracing::warn;

/// Build Prometheus middleware serving `/metrics` for one service namespace.
///
/// Registration failures are logged and disable metrics rather than abort
/// start-up.
pub fn prometheus_for(namespace: &str) -> Option<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(namespace)
        .endpoint("/metrics")
        .build()
        .map_err(|error| warn!(%namespace, error = %error, "metrics disabled"))
        .ok()
}

#[derive(Clone)]
pub(crate) enum OptionalMetrics {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl From<Option<PrometheusMetrics>> for OptionalMetrics {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for OptionalMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(metrics) => {
                let pending = Compat::new(PrometheusMetrics::clone(metrics)).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::Disabled => {
                let passthrough = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(passthrough)) })
            }
        }
    }
}

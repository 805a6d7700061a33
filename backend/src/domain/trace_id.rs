//! Correlation identifier shared by the tracker and the user directory.
//!
//! The `Trace` middleware puts a [`TraceId`] in task-local scope for each
//! request. Errors built during that request copy it into their payload, and
//! the directory client forwards it in the [`TRACE_ID_HEADER`] so one
//! submission can be followed through both services' logs.
//!
//! Task-locals do not cross `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] to keep the identifier.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header carrying the trace identifier on requests and responses.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request as it crosses service boundaries.
///
/// # Examples
/// ```
/// use carbon_backend::TraceId;
///
/// async fn credit() {
///     let trace = TraceId::current().map(|id| id.to_string());
///     tracing::debug!(trace_id = ?trace, "crediting user total");
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// A fresh random identifier for a request that arrived without one.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// ```
    /// use carbon_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id: TraceId = "6f1c9f0e-2b54-4ac8-9f0b-2f3c4d5e6f70".parse().expect("uuid");
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim()).map(Self)
    }
}

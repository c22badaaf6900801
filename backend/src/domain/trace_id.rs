//! Request-scoped trace identifier.
//!
//! Every request handled by the [`crate::middleware::Trace`] middleware runs
//! inside a task-local scope holding a fresh [`TraceId`]. Errors built while
//! that scope is active pick the identifier up automatically, and the
//! middleware echoes it back in the `trace-id` response header.
//!
//! Task-local values do not follow `tokio::spawn` or `spawn_blocking`; wrap
//! moved work in [`TraceId::scope`] to keep the correlation.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Correlation identifier for a single request.
///
/// # Examples
/// ```
/// use blog::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the enclosing request, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

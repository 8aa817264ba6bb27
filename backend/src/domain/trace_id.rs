//! Correlation identifier carried by every request.
//!
//! The active [`TraceId`] lives in Tokio task-local storage for the duration
//! of a request, which is how [`crate::domain::Error`] picks it up without
//! the id being threaded through handlers. Task-locals do not follow
//! `tokio::spawn` or `spawn_blocking`; wrap such work in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header used both to accept a caller's identifier and to echo the active one.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// UUID naming one request in logs, response headers and error bodies.
///
/// # Examples
/// ```
/// use travel_backend::TraceId;
///
/// let id: TraceId = "6f1c2d9e-8a4b-4c3d-9e2f-1a2b3c4d5e6f".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2d9e-8a4b-4c3d-9e2f-1a2b3c4d5e6f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a caller-supplied header value when it is a UUID, otherwise mint
    /// a fresh identifier.
    pub(crate) fn from_header_or_generate(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_sets_current_and_restores_none() {
        let id = TraceId::generate();
        assert_eq!(
            TraceId::scope(id, async { TraceId::current() }).await,
            Some(id)
        );
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[case(Some("00000000-0000-0000-0000-000000000000"), true)]
    #[case(Some(" 00000000-0000-0000-0000-000000000000 "), true)]
    #[case(Some("not-a-uuid"), false)]
    #[case(None, false)]
    fn header_values_are_reused_only_when_valid(
        #[case] header: Option<&str>,
        #[case] reused: bool,
    ) {
        let id = TraceId::from_header_or_generate(header);
        assert_eq!(id == TraceId(Uuid::nil()), reused);
    }
}

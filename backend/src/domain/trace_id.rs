//! Correlation id shared by the logs and error payloads of one request.
//!
//! The id is kept in a tokio task-local. Work moved onto another task with
//! `tokio::spawn` does not see it unless wrapped in [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Random per-request identifier, rendered as a hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the enclosing [`TraceId::scope`], if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `self` as the current id.
    ///
    /// ```
    /// use pvz_backend::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(id: TraceId, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scope_sets_and_nested_scope_overrides() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (TraceId::current(), nested)
        })
        .await;

        assert_eq!(seen, (Some(outer), Some(inner)));
    }

    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_the_id() {
        let seen = TraceId::scope(TraceId::generate(), async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("task joins")
        })
        .await;

        assert_eq!(seen, None);
    }

    #[test]
    fn parses_its_own_rendering() {
        let id = TraceId::generate();
        let parsed: TraceId = id.to_string().parse().expect("valid uuid");
        assert_eq!(parsed, id);
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }
}

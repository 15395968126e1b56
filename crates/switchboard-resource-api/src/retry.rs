//! Consistency-retrying reads
//!
//! Right after a create or delete the platform may still answer inconsistently
//! for a while. The reader polls a single read call until the condition the
//! caller waits for holds, treating not-found as the only retryable outcome.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::{
    RemoteResult,
    ResourceError,
    ResourceResult,
};

/// Post-create read budget
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(8 * 60);

/// Post-delete absence budget
pub const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(180);

/// Delay policy between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub exponential: bool,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            exponential: true,
        }
    }
}

impl Backoff {
    pub fn fixed(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            max_delay: delay,
            exponential: false,
        }
    }

    fn next(&self, delay: Duration) -> Duration {
        if self.exponential {
            (delay * 2).min(self.max_delay)
        } else {
            delay
        }
    }
}

/// Outcome of one attempt
#[derive(Debug)]
pub enum ReadState<T> {
    Polling,
    Succeeded(T),
    FailedRetryable(ResourceError),
    FailedFatal(ResourceError),
}

/// Which terminal condition the caller waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFor {
    Existence,
    Absence,
}

impl WaitFor {
    fn describe(self, what: &str) -> String {
        match self {
            Self::Existence => format!("{what} to exist"),
            Self::Absence => format!("{what} to be deleted"),
        }
    }
}

/// The fetched object is the outcome; not-found means it has not propagated yet
fn classify_existence<T>(what: &str, result: RemoteResult<T>) -> ReadState<T> {
    match result {
        Ok(value) => ReadState::Succeeded(value),
        Err(err) if err.is_not_found() => {
            ReadState::FailedRetryable(ResourceError::TransientNotFound(format!("{what}: {err}")))
        }
        Err(err) => ReadState::FailedFatal(ResourceError::PermanentRemote(err)),
    }
}

/// Not-found is the outcome; a successful read means the delete has not propagated yet
fn classify_absence<T>(what: &str, result: RemoteResult<T>) -> ReadState<()> {
    match result {
        Ok(_) => ReadState::FailedRetryable(ResourceError::TransientNotFound(format!(
            "{what} still exists"
        ))),
        Err(err) if err.is_not_found() => ReadState::Succeeded(()),
        Err(err) => ReadState::FailedFatal(ResourceError::PermanentRemote(err)),
    }
}

/// Bounded retry loop around a single read call
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyReader {
    timeout: Duration,
    backoff: Backoff,
}

impl ConsistencyReader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            backoff: Backoff::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Polls until `fetch` returns the object; the freshly fetched value is returned
    pub async fn wait_for_existence<T, F, Fut>(&self, what: &str, fetch: F) -> ResourceResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
    {
        self.poll(what, WaitFor::Existence, fetch, classify_existence)
            .await
    }

    /// Polls until `fetch` reports not-found
    pub async fn wait_for_absence<T, F, Fut>(&self, what: &str, fetch: F) -> ResourceResult<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
    {
        self.poll(what, WaitFor::Absence, fetch, classify_absence)
            .await
    }

    async fn poll<T, U, F, Fut, C>(
        &self, what: &str, wait_for: WaitFor, mut fetch: F, classify: C,
    ) -> ResourceResult<U>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
        C: Fn(&str, RemoteResult<T>) -> ReadState<U>,
    {
        let started = Instant::now();
        let deadline = started + self.timeout;
        let mut delay = self.backoff.initial_delay;
        let mut attempt = 0u32;
        let mut state = ReadState::Polling;

        loop {
            match state {
                ReadState::Polling => {
                    attempt += 1;
                    state = classify(what, fetch().await);
                }
                ReadState::Succeeded(value) => return Ok(value),
                ReadState::FailedFatal(err) => return Err(err),
                ReadState::FailedRetryable(err) => {
                    let now = Instant::now();
                    if now >= deadline {
                        debug!("Giving up on {what} after {attempt} attempts: {err}");
                        return Err(ResourceError::TimeoutExceeded {
                            waiting_for: wait_for.describe(what),
                            waited: now - started,
                        });
                    }

                    let pause = delay.min(deadline - now);
                    debug!("Attempt {attempt} for {what} is retryable ({err}), retrying in {pause:?}");
                    tokio::time::sleep(pause).await;
                    delay = self.backoff.next(delay);
                    state = ReadState::Polling;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };
    use std::sync::Mutex;

    use super::*;
    use crate::error::RemoteError;

    fn scripted(
        responses: Vec<RemoteResult<&'static str>>,
    ) -> (Mutex<VecDeque<RemoteResult<&'static str>>>, AtomicUsize) {
        (Mutex::new(responses.into()), AtomicUsize::new(0))
    }

    #[tokio::test(start_paused = true)]
    async fn test_existence_after_two_not_found() {
        let (responses, calls) = scripted(vec![
            Err(RemoteError::not_found("missing")),
            Err(RemoteError::not_found("missing")),
            Ok("grammar"),
        ]);
        let reader = ConsistencyReader::new(Duration::from_secs(30));

        let value = reader
            .wait_for_existence("grammar g-1", || {
                calls.fetch_add(1, Ordering::SeqCst);
                let next = responses.lock().unwrap().pop_front().unwrap();
                async move { next }
            })
            .await
            .unwrap();

        assert_eq!(value, "grammar");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_existence_times_out() {
        let calls = AtomicUsize::new(0);
        let reader = ConsistencyReader::new(Duration::from_secs(5));

        let err = reader
            .wait_for_existence("ruleset r-1", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(RemoteError::not_found("missing")) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ResourceError::TimeoutExceeded { .. }));
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_is_not_retried() {
        let calls = AtomicUsize::new(0);
        let reader = ConsistencyReader::new(Duration::from_secs(30));

        let err = reader
            .wait_for_existence("view v-1", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(RemoteError::new(Some(403), "forbidden")) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ResourceError::PermanentRemote(_)));
        assert_eq!(err.status(), Some(403));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absence_observed_before_budget() {
        let reader = ConsistencyReader::new(DEFAULT_DELETE_TIMEOUT);
        let started = Instant::now();

        reader
            .wait_for_absence("ruleset r-1", || {
                let gone = started.elapsed() >= Duration::from_secs(170);
                async move {
                    if gone {
                        Err(RemoteError::not_found("gone"))
                    } else {
                        Ok(())
                    }
                }
            })
            .await
            .unwrap();

        assert!(started.elapsed() < DEFAULT_DELETE_TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absence_never_observed_times_out() {
        let reader = ConsistencyReader::new(DEFAULT_DELETE_TIMEOUT);
        let started = Instant::now();

        let err = reader
            .wait_for_absence("ruleset r-1", || async { Ok::<_, RemoteError>(()) })
            .await
            .unwrap_err();

        assert!(matches!(err, ResourceError::TimeoutExceeded { .. }));
        assert!(started.elapsed() >= DEFAULT_DELETE_TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absence_fails_fast_on_other_errors() {
        let calls = AtomicUsize::new(0);
        let reader = ConsistencyReader::new(DEFAULT_DELETE_TIMEOUT);

        let err = reader
            .wait_for_absence("ruleset r-1", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(RemoteError::new(Some(500), "server error")) }
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observed_absence_is_the_success_state() {
        assert!(matches!(
            classify_absence("ruleset r-1", Err::<(), _>(RemoteError::not_found("gone"))),
            ReadState::Succeeded(())
        ));
        assert!(matches!(
            classify_absence("ruleset r-1", Ok(())),
            ReadState::FailedRetryable(ResourceError::TransientNotFound(_))
        ));
        assert!(matches!(
            classify_existence("ruleset r-1", Err::<(), _>(RemoteError::not_found("missing"))),
            ReadState::FailedRetryable(ResourceError::TransientNotFound(_))
        ));
        assert!(matches!(
            classify_existence("ruleset r-1", Err::<(), _>(RemoteError::new(Some(500), "x"))),
            ReadState::FailedFatal(ResourceError::PermanentRemote(_))
        ));
    }

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = Backoff::default();
        let mut delay = backoff.initial_delay;
        for _ in 0..10 {
            delay = backoff.next(delay);
        }
        assert_eq!(delay, backoff.max_delay);
        assert_eq!(
            Backoff::fixed(Duration::from_secs(1)).next(Duration::from_secs(1)),
            Duration::from_secs(1)
        );
    }
}

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::DdapError;

const POLL_INTERVAL_SECS: u64 = 1;
const POLL_CEILING_SECS: u64 = 10 * 60;

/// Interval/ceiling contract shared by the login and authorization polls.
/// Part of the per-invocation context so tests can compress time.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub ceiling: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
            ceiling: Duration::from_secs(POLL_CEILING_SECS),
        }
    }
}

/// Repeats `attempt` until it yields a value, sleeping `interval` between
/// attempts. The deadline is fixed once when the loop starts and checked
/// before each attempt, never mid-request. Errors from `attempt` abort
/// immediately; nothing is retried.
pub(crate) async fn poll_until<T, F, Fut>(
    policy: PollPolicy,
    waiting_for: &str,
    mut attempt: F,
) -> Result<T, DdapError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, DdapError>>,
{
    let deadline = Instant::now() + policy.ceiling;
    loop {
        if Instant::now() >= deadline {
            return Err(DdapError::Timeout {
                waiting_for: waiting_for.to_string(),
                ceiling: policy.ceiling,
            });
        }
        if let Some(value) = attempt().await? {
            return Ok(value);
        }
        tokio::time::sleep(policy.interval).await;
    }
}

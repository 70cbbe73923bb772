//! 指数退避重试

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

/// 重试策略
///
/// 首次调用记为第 0 次；第 n 次失败且 n < max_retries 时，
/// 等待 `base_delay × 2^n` 后再试。总调用次数最多 `max_retries + 1`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// 第 `attempt` 次失败后的等待时间
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor)
    }

    /// 执行 `op`，失败则按策略重试，重试耗尽后返回最后一次的错误
    ///
    /// `retryable` 返回 false 的错误立即返回，不再等待
    pub async fn run_if<T, E, F, Fut, P>(&self, mut op: F, retryable: P) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_retries && retryable(&e) => {
                    let wait = self.backoff(attempt);
                    warn!(
                        "API 调用失败 (尝试 {}/{}): {}",
                        attempt + 1,
                        self.max_retries,
                        e
                    );
                    info!("{:.1} 秒后重试...", wait.as_secs_f64());
                    sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        assert_eq!(policy.backoff(0), Duration::from_secs(2));
        assert_eq!(policy.backoff(1), Duration::from_secs(4));
        assert_eq!(policy.backoff(2), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = RetryPolicy::new(100, Duration::from_secs(u64::MAX / 2));
        assert_eq!(policy.backoff(40), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_k_failures() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result: Result<&str, String> = policy
            .run_if(
                |attempt| {
                    calls.set(calls.get() + 1);
                    async move {
                        if attempt < 2 {
                            Err(format!("boom {attempt}"))
                        } else {
                            Ok("done")
                        }
                    }
                },
                |_| true,
            )
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.get(), 3);
        // 两次等待：2s + 4s
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_propagates_last_error_when_exhausted() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result: Result<(), String> = policy
            .run_if(
                |attempt| {
                    calls.set(calls.get() + 1);
                    async move { Err(format!("boom {attempt}")) }
                },
                |_| true,
            )
            .await;

        assert_eq!(result.unwrap_err(), "boom 3");
        assert_eq!(calls.get(), 4);
        // 1s + 2s + 4s
        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_returns_immediately() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result: Result<(), String> = policy
            .run_if(
                |_| {
                    calls.set(calls.get() + 1);
                    async { Err("fatal".to_string()) }
                },
                |e| e != "fatal",
            )
            .await;

        assert_eq!(result.unwrap_err(), "fatal");
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_never_sleeps() {
        let policy = RetryPolicy::new(0, Duration::from_secs(5));
        let start = Instant::now();

        let result: Result<(), String> = policy
            .run_if(|_| async { Err("once".to_string()) }, |_| true)
            .await;

        assert!(result.is_err());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}

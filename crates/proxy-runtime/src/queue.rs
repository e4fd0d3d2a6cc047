//! Paced request queue
//!
//! Remote card and image services are polite-use APIs, so requests go out one
//! at a time with a fixed delay before each and an upper bound on how long a
//! single request may take.

use std::future::Future;
use std::time::Duration;

use crate::cancel::CancelSignal;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestQueue {
    delay: Duration,
    timeout: Duration,
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

impl RequestQueue {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(delay: Duration, timeout: Duration) -> Self {
        Self { delay, timeout }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait out the delay, then run `request` under the timeout.
    ///
    /// Cancellation is checked before, during the delay and while the request
    /// is in flight. A request that is still running when cancelled is
    /// dropped.
    pub async fn run<T, F>(&self, cancel: &mut CancelSignal, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if cancel.is_cancelled() {
            return Err(RuntimeError::Cancelled);
        }

        if !self.delay.is_zero() {
            log::debug!("Waiting {:?} before next request", self.delay);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RuntimeError::Cancelled),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RuntimeError::Cancelled),
            result = tokio::time::timeout(self.timeout, request) => match result {
                Ok(result) => result,
                Err(_) => Err(RuntimeError::Timeout(self.timeout)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::cancellation;
    use tokio::time::Instant;

    #[test]
    fn test_default_pacing() {
        let queue = RequestQueue::default();
        assert_eq!(queue.delay(), Duration::from_millis(100));
        assert_eq!(queue.timeout(), Duration::from_secs(30));

        let queue = RequestQueue::new(Duration::ZERO, Duration::from_secs(5));
        assert_eq!(queue.delay(), Duration::ZERO);
        assert_eq!(queue.timeout(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_before_each_request() {
        let queue = RequestQueue::default();
        let mut cancel = CancelSignal::never();
        let start = Instant::now();

        for i in 0..3 {
            let value = queue.run(&mut cancel, async move { Ok(i) }).await.unwrap();
            assert_eq!(value, i);
        }

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let queue = RequestQueue::new(Duration::ZERO, Duration::from_secs(2));
        let mut cancel = CancelSignal::never();

        let result: Result<()> = queue
            .run(&mut cancel, std::future::pending::<Result<()>>())
            .await;
        assert!(matches!(result, Err(RuntimeError::Timeout(d)) if d == Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_error_passes_through() {
        let queue = RequestQueue::default();
        let mut cancel = CancelSignal::never();

        let result: Result<()> = queue
            .run(&mut cancel, async { Err(RuntimeError::Load("boom".into())) })
            .await;
        assert!(matches!(result, Err(RuntimeError::Load(msg)) if msg == "boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start() {
        let queue = RequestQueue::default();
        let (handle, mut cancel) = cancellation();
        handle.cancel();

        let result = queue.run(&mut cancel, async { Ok(1) }).await;
        assert!(matches!(result, Err(RuntimeError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_while_in_flight() {
        let queue = RequestQueue::new(Duration::ZERO, Duration::from_secs(60));
        let (handle, mut cancel) = cancellation();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            handle.cancel();
        });

        let result: Result<()> = queue
            .run(&mut cancel, std::future::pending::<Result<()>>())
            .await;
        assert!(matches!(result, Err(RuntimeError::Cancelled)));
    }
}

//! Fixed-schedule retry layer for outbound gateway calls.

use std::time::Duration;

use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, TransportError};

/// Ordered list of delays, one per attempt.
///
/// Before attempt `n` the retrying client sleeps for `delays[n]`, so the
/// number of delays is also the maximum number of attempts. The default is
/// the literal schedule `0s, 1s, 5s, 15s`: four attempts and at most 21
/// seconds spent in backoff.
///
/// # Example
///
/// ```
/// use cielo_gateway::transport::BackoffSchedule;
/// use std::time::Duration;
///
/// let schedule = BackoffSchedule::default();
/// assert_eq!(schedule.max_attempts(), 4);
/// assert_eq!(schedule.total_delay(), Duration::from_secs(21));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    delays: Vec<Duration>,
}

impl BackoffSchedule {
    /// Delays of the default schedule.
    pub const DEFAULT_DELAYS: [Duration; 4] = [
        Duration::from_secs(0),
        Duration::from_secs(1),
        Duration::from_secs(5),
        Duration::from_secs(15),
    ];

    /// Creates a schedule from explicit per-attempt delays.
    ///
    /// An empty schedule makes no attempt at all and every request fails
    /// with [`TransportError::NoAttempts`].
    #[must_use]
    pub const fn from_delays(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// Returns the per-attempt delays.
    #[must_use]
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Returns the maximum number of attempts.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.delays.len()
    }

    /// Returns the total time spent sleeping if every attempt fails.
    #[must_use]
    pub fn total_delay(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self::from_delays(Self::DEFAULT_DELAYS.to_vec())
    }
}

/// Outcome of the most recent unacceptable attempt.
enum LastFailure {
    Error(HttpError),
    Status(http::StatusCode),
}

/// HTTP client decorator that retries transient failures on a fixed
/// [`BackoffSchedule`].
///
/// A response is accepted as soon as an attempt completes with a status
/// below 500; client errors (4xx) are returned as-is for the caller to
/// interpret. Server errors (5xx), connection failures and timeouts are
/// retried until the schedule runs out. The decision rests on the status:
/// once a status below 500 has arrived, a failure reading its body is
/// returned without another attempt.
///
/// # Type Parameters
///
/// - `H`: The underlying single-attempt HTTP client
/// - `S`: The sleeper used for backoff delays (defaults to [`TokioSleeper`])
#[derive(Debug, Clone)]
pub struct RetryingClient<H, S = TokioSleeper> {
    inner: H,
    sleeper: S,
    schedule: BackoffSchedule,
}

impl<H> RetryingClient<H, TokioSleeper> {
    /// Wraps `inner` with the default schedule and real sleeps.
    #[must_use]
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            sleeper: TokioSleeper,
            schedule: BackoffSchedule::default(),
        }
    }
}

impl<H, S> RetryingClient<H, S> {
    /// Sets a custom sleeper for backoff delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryingClient<H, S2> {
        RetryingClient {
            inner: self.inner,
            sleeper,
            schedule: self.schedule,
        }
    }

    /// Sets the backoff schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: BackoffSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Returns the configured schedule.
    #[must_use]
    pub const fn schedule(&self) -> &BackoffSchedule {
        &self.schedule
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: HttpClient, S: Sleeper> RetryingClient<H, S> {
    /// Sends `request`, retrying per the schedule.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Exhausted`] if the last attempt failed with a
    ///   connection error or timeout
    /// - [`TransportError::ServerError`] if the last attempt returned 5xx
    /// - [`TransportError::NoAttempts`] if the schedule is empty
    /// - [`TransportError::Rejected`] if the request cannot be sent at all
    /// - [`TransportError::Incomplete`] if a status below 500 arrived but its
    ///   body could not be read
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut last_failure: Option<LastFailure> = None;

        for (index, delay) in self.schedule.delays().iter().enumerate() {
            let attempt = index + 1;
            self.sleeper.sleep(*delay).await;

            tracing::debug!(
                method = %request.method,
                url = %request.url,
                attempt,
                "Sending gateway request"
            );

            match self.inner.request(request.clone()).await {
                Ok(response) if !response.is_server_error() => return Ok(response),
                Ok(response) => {
                    tracing::warn!(
                        status = response.status.as_u16(),
                        attempt,
                        "Gateway returned a server error"
                    );
                    last_failure = Some(LastFailure::Status(response.status));
                }
                Err(e @ HttpError::Body { .. }) if !e.is_retryable() => {
                    tracing::error!(error = %e, attempt, "Response body lost after the status");
                    return Err(TransportError::Incomplete {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) if !e.is_retryable() => {
                    tracing::error!(error = %e, "Request cannot be sent");
                    return Err(TransportError::Rejected(e));
                }
                Err(e) => {
                    tracing::warn!(error = %e, attempt, "Gateway request failed");
                    last_failure = Some(LastFailure::Error(e));
                }
            }
        }

        let attempts = self.schedule.max_attempts();
        let error = match last_failure {
            Some(LastFailure::Error(source)) => TransportError::Exhausted { attempts, source },
            Some(LastFailure::Status(status)) => TransportError::ServerError { attempts, status },
            None => TransportError::NoAttempts,
        };

        tracing::error!(error = %error, url = %request.url, "Giving up on gateway request");
        Err(error)
    }
}

//! Tests for `BackoffSchedule` and `RetryingClient`.

use super::{
    BackoffSchedule, HttpClient, HttpError, HttpRequest, HttpResponse, RetryingClient,
    TransportError,
};
use crate::time::{InstantSleeper, Sleeper};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock HTTP client that returns a scripted sequence of outcomes.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: AtomicUsize::new(0),
        }
    }

    fn statuses(codes: &[u16]) -> Self {
        Self::new(codes.iter().map(|code| Ok(response(*code))).collect())
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl HttpClient for MockClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().unwrap().remove(0)
    }
}

/// Sleeper that records requested delays instead of waiting.
#[derive(Debug, Default, Clone)]
struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

fn response(code: u16) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(code).unwrap(),
        http::HeaderMap::new(),
        vec![],
    )
}

fn lost_body(code: u16) -> HttpError {
    HttpError::Body {
        status: http::StatusCode::from_u16(code).unwrap(),
        source: Box::new(std::io::Error::other("connection closed mid-body")),
    }
}

fn request() -> HttpRequest {
    HttpRequest::get(url::Url::parse("https://api.example.com/1/cardBin/411111111").unwrap())
}

fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|s| Duration::from_secs(*s)).collect()
}

mod backoff_schedule {
    use super::*;

    #[test]
    fn default_is_literal_schedule() {
        let schedule = BackoffSchedule::default();

        assert_eq!(schedule.delays(), secs(&[0, 1, 5, 15]).as_slice());
        assert_eq!(schedule.max_attempts(), 4);
    }

    #[test]
    fn default_total_backoff_is_21_seconds() {
        assert_eq!(
            BackoffSchedule::default().total_delay(),
            Duration::from_secs(21)
        );
    }

    #[test]
    fn from_delays_keeps_order() {
        let schedule = BackoffSchedule::from_delays(secs(&[3, 0, 2]));

        assert_eq!(schedule.delays(), secs(&[3, 0, 2]).as_slice());
        assert_eq!(schedule.max_attempts(), 3);
    }

    #[test]
    fn empty_schedule_allows_no_attempts() {
        let schedule = BackoffSchedule::from_delays(Vec::new());

        assert_eq!(schedule.max_attempts(), 0);
        assert_eq!(schedule.total_delay(), Duration::ZERO);
    }
}

mod retrying_client_accepts {
    use super::*;

    #[tokio::test]
    async fn first_success_needs_one_attempt() {
        let mock = Arc::new(MockClient::statuses(&[200]));
        let sleeper = RecordingSleeper::default();
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(sleeper.clone());

        let result = client.send(request()).await.unwrap();

        assert_eq!(result.status, http::StatusCode::OK);
        assert_eq!(mock.calls(), 1);
        assert_eq!(sleeper.recorded(), secs(&[0]));
    }

    #[tokio::test]
    async fn succeeds_on_fourth_attempt_after_503s() {
        let mock = Arc::new(MockClient::statuses(&[503, 503, 503, 200]));
        let sleeper = RecordingSleeper::default();
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(sleeper.clone());

        let result = client.send(request()).await.unwrap();

        assert_eq!(result.status, http::StatusCode::OK);
        assert_eq!(mock.calls(), 4);
        assert_eq!(sleeper.recorded(), secs(&[0, 1, 5, 15]));
    }

    #[tokio::test]
    async fn client_error_is_returned_without_retry() {
        let mock = Arc::new(MockClient::statuses(&[404, 200]));
        let sleeper = RecordingSleeper::default();
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(sleeper.clone());

        let result = client.send(request()).await.unwrap();

        assert_eq!(result.status, http::StatusCode::NOT_FOUND);
        assert_eq!(mock.calls(), 1);
        assert_eq!(sleeper.recorded(), secs(&[0]));
    }

    #[tokio::test]
    async fn any_status_below_500_is_accepted() {
        for code in [100, 201, 302, 400, 422, 499] {
            let mock = Arc::new(MockClient::statuses(&[code]));
            let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

            let result = client.send(request()).await.unwrap();

            assert_eq!(result.status.as_u16(), code);
            assert_eq!(mock.calls(), 1, "status {code} must not be retried");
        }
    }

    #[tokio::test]
    async fn retries_after_timeout() {
        let mock = Arc::new(MockClient::new(vec![
            Err(HttpError::Timeout),
            Ok(response(201)),
        ]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        let result = client.send(request()).await.unwrap();

        assert_eq!(result.status, http::StatusCode::CREATED);
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn retries_after_connection_error() {
        let mock = Arc::new(MockClient::new(vec![
            Err(HttpError::Connection(Box::new(std::io::Error::other(
                "connection reset",
            )))),
            Ok(response(200)),
        ]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        assert!(client.send(request()).await.is_ok());
        assert_eq!(mock.calls(), 2);
    }
}

mod retrying_client_gives_up {
    use super::*;

    #[tokio::test]
    async fn all_503_reports_status() {
        let mock = Arc::new(MockClient::statuses(&[503, 503, 503, 503]));
        let sleeper = RecordingSleeper::default();
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(sleeper.clone());

        let error = client.send(request()).await.unwrap_err();

        assert!(matches!(
            error,
            TransportError::ServerError { attempts: 4, status }
                if status == http::StatusCode::SERVICE_UNAVAILABLE
        ));
        assert_eq!(error.to_string(), "too many retries: received 503 status code");
        assert_eq!(mock.calls(), 4);
        assert_eq!(sleeper.recorded(), secs(&[0, 1, 5, 15]));
    }

    #[tokio::test]
    async fn last_error_wins_over_earlier_status() {
        let mock = Arc::new(MockClient::new(vec![
            Ok(response(500)),
            Ok(response(502)),
            Ok(response(503)),
            Err(HttpError::Timeout),
        ]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        let error = client.send(request()).await.unwrap_err();

        assert!(matches!(
            error,
            TransportError::Exhausted {
                attempts: 4,
                source: HttpError::Timeout
            }
        ));
    }

    #[tokio::test]
    async fn last_status_wins_over_earlier_error() {
        let mock = Arc::new(MockClient::new(vec![
            Err(HttpError::Timeout),
            Err(HttpError::Timeout),
            Err(HttpError::Timeout),
            Ok(response(500)),
        ]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        let error = client.send(request()).await.unwrap_err();

        assert_eq!(error.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn never_exceeds_schedule_length() {
        let mock = Arc::new(MockClient::statuses(&[500, 500, 500, 500, 200]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        assert!(client.send(request()).await.is_err());
        assert_eq!(mock.calls(), 4);
    }

    #[tokio::test]
    async fn empty_schedule_makes_no_call() {
        let mock = Arc::new(MockClient::statuses(&[200]));
        let client = RetryingClient::new(Arc::clone(&mock))
            .with_sleeper(InstantSleeper)
            .with_schedule(BackoffSchedule::from_delays(Vec::new()));

        let error = client.send(request()).await.unwrap_err();

        assert!(matches!(error, TransportError::NoAttempts));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_url_is_not_retried() {
        let mock = Arc::new(MockClient::new(vec![
            Err(HttpError::InvalidUrl("relative URL without a base".to_string())),
            Ok(response(200)),
        ]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        let error = client.send(request()).await.unwrap_err();

        assert!(matches!(error, TransportError::Rejected(HttpError::InvalidUrl(_))));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn lost_body_after_created_is_not_retried() {
        let mock = Arc::new(MockClient::new(vec![Err(lost_body(201)), Ok(response(201))]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        let error = client.send(request()).await.unwrap_err();

        assert!(matches!(
            error,
            TransportError::Incomplete {
                attempts: 1,
                source: HttpError::Body { .. }
            }
        ));
        assert_eq!(error.status(), Some(http::StatusCode::CREATED));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn lost_body_reports_the_attempt_that_got_the_status() {
        let mock = Arc::new(MockClient::new(vec![Err(HttpError::Timeout), Err(lost_body(200))]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        let error = client.send(request()).await.unwrap_err();

        assert_eq!(error.attempts(), 2);
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn lost_body_of_server_error_is_retried() {
        let mock = Arc::new(MockClient::new(vec![Err(lost_body(503)), Ok(response(200))]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(InstantSleeper);

        assert!(client.send(request()).await.is_ok());
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn custom_schedule_sets_attempt_budget() {
        let mock = Arc::new(MockClient::statuses(&[503, 503]));
        let sleeper = RecordingSleeper::default();
        let client = RetryingClient::new(Arc::clone(&mock))
            .with_sleeper(sleeper.clone())
            .with_schedule(BackoffSchedule::from_delays(secs(&[0, 2])));

        let error = client.send(request()).await.unwrap_err();

        assert_eq!(error.attempts(), 2);
        assert_eq!(sleeper.recorded(), secs(&[0, 2]));
    }
}

mod retrying_client_timing {
    use super::*;
    use crate::time::TokioSleeper;

    #[tokio::test(start_paused = true)]
    async fn real_sleeper_waits_full_schedule() {
        let mock = Arc::new(MockClient::statuses(&[503, 503, 503, 503]));
        let client = RetryingClient::new(Arc::clone(&mock)).with_sleeper(TokioSleeper);
        let started = tokio::time::Instant::now();

        let _ = client.send(request()).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(21));
        assert!(elapsed < Duration::from_secs(22));
    }
}

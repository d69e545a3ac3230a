use tracing::{debug, warn};
use url::Url;

use crate::errors::FetchError;
use crate::http::config::FetchConfig;
use crate::http::transport::{FetchResult, HttpMethod, HttpRequest, HttpTransport};
use crate::pacing::{Pacer, ThreadPacer};

/// HTTP fetcher with bounded retry and per-attempt identity rotation.
///
/// Holds no mutable state: each attempt builds its own headers from the
/// `FetchConfig` and hands them to the transport.
pub struct ResilientFetcher<T: HttpTransport> {
    transport: T,
    pacer: Box<dyn Pacer>,
}

impl<T: HttpTransport> ResilientFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pacer: Box::new(ThreadPacer),
        }
    }

    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get(&self, url: &str, config: &FetchConfig) -> Result<FetchResult, FetchError> {
        self.fetch(HttpMethod::Get, url, config)
    }

    pub fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        config: &FetchConfig,
    ) -> Result<FetchResult, FetchError> {
        self.execute(HttpMethod::Post, url, Some(body), config)
    }

    pub fn fetch(
        &self,
        method: HttpMethod,
        url: &str,
        config: &FetchConfig,
    ) -> Result<FetchResult, FetchError> {
        self.execute(method, url, None, config)
    }

    /// GET a page and return its decoded text.
    pub fn fetch_document(&self, url: &str, config: &FetchConfig) -> Result<String, FetchError> {
        self.get(url, config).map(|result| result.text())
    }

    fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
        config: &FetchConfig,
    ) -> Result<FetchResult, FetchError> {
        Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        let attempts = config.max_retries.saturating_add(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            let request = HttpRequest {
                method,
                url: url.to_string(),
                headers: config.headers_for_attempt(),
                timeout: config.timeout,
                body: body.clone(),
            };

            debug!(
                %method,
                url,
                attempt,
                attempts,
                user_agent = request.header("user-agent").unwrap_or_default(),
                "Sending request"
            );

            let error = match self.transport.send(&request) {
                Ok(result) if result.is_error_status() => FetchError::Status {
                    status: result.status,
                    url: result.url,
                },
                Ok(result) => return Ok(result),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            if attempt < attempts {
                warn!(
                    url,
                    attempt,
                    error = %error,
                    delay_ms = config.retry_delay.as_millis() as u64,
                    "Attempt failed, retrying"
                );
                self.pacer.pause(config.retry_delay);
            } else {
                warn!(url, attempts, error = %error, "All attempts failed");
            }
            last_error = Some(error);
        }

        Err(FetchError::RetriesExhausted {
            attempts,
            last: Box::new(
                last_error.unwrap_or_else(|| FetchError::Request("no attempt made".to_string())),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::identity::FixedIdentity;
    use crate::http::transport::MockHttpTransport;
    use crate::pacing::MockPacer;
    use mockall::predicate::eq;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn ok(status: u16, body: &str) -> FetchResult {
        FetchResult {
            status,
            body: body.as_bytes().to_vec(),
            headers: vec![("content-type".to_string(), "text/html".to_string())],
            url: "https://example.com/page".to_string(),
        }
    }

    fn quick_config(max_retries: u32) -> FetchConfig {
        FetchConfig::default()
            .with_max_retries(max_retries)
            .with_retry_delay(Duration::ZERO)
    }

    #[test]
    fn test_success_on_first_attempt() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(ok(200, "<html></html>")));

        let fetcher = ResilientFetcher::new(transport);
        let result = fetcher
            .get("https://example.com/page", &quick_config(3))
            .unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(result.text(), "<html></html>");
    }

    #[test]
    fn test_persistent_failure_makes_retries_plus_one_attempts() {
        for retries in [0u32, 1, 3, 5] {
            let mut transport = MockHttpTransport::new();
            transport
                .expect_send()
                .times(retries as usize + 1)
                .returning(|_| Err(FetchError::Connect("refused".to_string())));

            let fetcher = ResilientFetcher::new(transport);
            let err = fetcher
                .get("https://example.com/page", &quick_config(retries))
                .unwrap_err();

            match err {
                FetchError::RetriesExhausted { attempts, last } => {
                    assert_eq!(attempts, retries + 1);
                    assert_eq!(*last, FetchError::Connect("refused".to_string()));
                }
                other => panic!("expected RetriesExhausted, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_error_status_is_retried_then_succeeds() {
        let calls = Arc::new(Mutex::new(0));
        let seen = calls.clone();

        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(3).returning(move |_| {
            let mut n = seen.lock().unwrap();
            *n += 1;
            match *n {
                1 => Ok(ok(503, "unavailable")),
                2 => Err(FetchError::Timeout("slow".to_string())),
                _ => Ok(ok(200, "fine")),
            }
        });

        let fetcher = ResilientFetcher::new(transport);
        let result = fetcher
            .get("https://example.com/page", &quick_config(3))
            .unwrap();

        assert_eq!(result.text(), "fine");
        assert_eq!(*calls.lock().unwrap(), 3);
    }

    #[test]
    fn test_client_error_status_is_retried_like_server_error() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(3)
            .returning(|_| Ok(ok(404, "missing")));

        let fetcher = ResilientFetcher::new(transport);
        let err = fetcher
            .get("https://example.com/page", &quick_config(2))
            .unwrap_err();

        assert_eq!(
            err.root(),
            &FetchError::Status {
                status: 404,
                url: "https://example.com/page".to_string()
            }
        );
    }

    #[test]
    fn test_fixed_delay_between_attempts_only() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(4)
            .returning(|_| Err(FetchError::Timeout("slow".to_string())));

        let mut pacer = MockPacer::new();
        pacer
            .expect_pause()
            .with(eq(Duration::from_millis(250)))
            .times(3)
            .return_const(());

        let config = FetchConfig::default()
            .with_max_retries(3)
            .with_retry_delay(Duration::from_millis(250));

        let fetcher = ResilientFetcher::new(transport).with_pacer(Box::new(pacer));
        assert!(fetcher.get("https://example.com/page", &config).is_err());
    }

    #[test]
    fn test_every_attempt_draws_identity_from_pool() {
        let pool = vec!["agent-a".to_string(), "agent-b".to_string(), "agent-c".to_string()];
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(6).returning(move |req| {
            recorder
                .lock()
                .unwrap()
                .push(req.header("user-agent").unwrap_or_default().to_string());
            Err(FetchError::Connect("refused".to_string()))
        });

        let config = quick_config(5).with_identity(Arc::new(
            crate::http::identity::RandomIdentity::new(pool.clone()),
        ));

        let fetcher = ResilientFetcher::new(transport);
        let _ = fetcher.get("https://example.com/page", &config);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 6);
        for agent in seen.iter() {
            assert!(pool.contains(agent), "identity {} not in pool", agent);
        }
    }

    #[test]
    fn test_identity_selected_before_each_attempt() {
        let counter = Arc::new(Mutex::new(0));
        let selector_counter = counter.clone();
        let selector = move || {
            let mut n = selector_counter.lock().unwrap();
            *n += 1;
            format!("agent-{}", *n)
        };

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(3).returning(move |req| {
            recorder
                .lock()
                .unwrap()
                .push(req.header("user-agent").unwrap_or_default().to_string());
            Err(FetchError::Timeout("slow".to_string()))
        });

        let config = quick_config(2).with_identity(Arc::new(selector));
        let fetcher = ResilientFetcher::new(transport);
        let _ = fetcher.get("https://example.com/page", &config);

        assert_eq!(*seen.lock().unwrap(), vec!["agent-1", "agent-2", "agent-3"]);
    }

    #[test]
    fn test_identity_override_disables_rotation() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|req| req.header("user-agent") == Some("custom/2.0"))
            .times(2)
            .returning(|_| Err(FetchError::Timeout("slow".to_string())));

        let config = quick_config(1)
            .with_identity(Arc::new(FixedIdentity("pool".to_string())))
            .with_identity_override(Some("custom/2.0".to_string()));

        let fetcher = ResilientFetcher::new(transport);
        assert!(fetcher.get("https://example.com/page", &config).is_err());
    }

    #[test]
    fn test_invalid_url_is_not_retried() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(0);

        let fetcher = ResilientFetcher::new(transport);
        let err = fetcher.get("not a url", &quick_config(3)).unwrap_err();

        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_post_sends_method_and_body() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.method == HttpMethod::Post && req.body.as_deref() == Some(&b"q=rust"[..])
            })
            .times(1)
            .returning(|_| Ok(ok(201, "created")));

        let fetcher = ResilientFetcher::new(transport);
        let result = fetcher
            .post("https://example.com/form", b"q=rust".to_vec(), &quick_config(0))
            .unwrap();

        assert_eq!(result.status, 201);
    }

    #[test]
    fn test_timeout_passed_to_transport() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|req| req.timeout == Duration::from_secs(7))
            .times(1)
            .returning(|_| Ok(ok(200, "ok")));

        let fetcher = ResilientFetcher::new(transport);
        let config = quick_config(0).with_timeout(Duration::from_secs(7));
        assert!(fetcher.get("https://example.com/page", &config).is_ok());
    }
}

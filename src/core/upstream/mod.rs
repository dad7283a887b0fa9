//! Upstream backend access
//!
//! [`UpstreamClient`] posts one dialect-encoded request per call and turns whatever comes
//! back (an event-stream body or a single JSON document) into a stream of text fragments.

mod lines;
#[cfg(test)]
pub(crate) mod testing;

use crate::config::ModelConfig;
use crate::core::dialect::Dialect;
use crate::core::types::{ChatInput, GenerationParams};
use crate::utils::error::{GatewayError, Result};
use crate::utils::truncate_string;
use futures::stream::{BoxStream, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use std::time::Duration;
use tracing::{debug, error};

pub use lines::{DATA_PREFIX, DONE_SENTINEL, LineBuffer, MAX_LINE_BYTES, SseLine, classify_line};

/// Sequence of non-empty text fragments; an `Err` item ends the sequence
pub type FragmentStream = BoxStream<'static, Result<String>>;

/// Accept header sent with every upstream request
pub const ACCEPT_HINT: &str = "text/event-stream, application/json";

/// Longest upstream error body kept in error messages
const ERROR_BODY_EXCERPT: usize = 512;

/// Anything that can produce a fragment sequence for a chat request.
///
/// Implementations must not touch the network until the returned stream is first polled,
/// and must release their connection when the stream is dropped.
pub trait FragmentSource: Send + Sync {
    /// Open one fragment sequence. `streaming` asks the backend for incremental output;
    /// backends are free to ignore it and answer in one piece.
    fn stream(&self, input: &ChatInput, streaming: bool) -> FragmentStream;
}

/// HTTP client for the configured backend
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    dialect: Dialect,
    params: GenerationParams,
}

impl UpstreamClient {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Build around an existing client, sharing its connection pool
    pub fn with_client(client: reqwest::Client, config: &ModelConfig) -> Self {
        Self {
            client,
            url: config.url(),
            api_key: config.api_key().map(str::to_owned),
            dialect: config.dialect(),
            params: config.generation_params(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, body: &serde_json::Value) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_HINT)
            .json(body);

        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

impl FragmentSource for UpstreamClient {
    fn stream(&self, input: &ChatInput, streaming: bool) -> FragmentStream {
        let dialect = self.dialect;
        let url = self.url.clone();
        let request = dialect
            .encode_request(input, streaming, &self.params)
            .map(|body| self.request(&body));

        let stream = async_stream::stream! {
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            debug!(%url, %dialect, streaming, "sending upstream request");
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    error!(%url, error = %e, "upstream request failed");
                    yield Err(GatewayError::from(e));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                error!(%url, status = status.as_u16(), "upstream returned error status");
                yield Err(GatewayError::upstream_status(
                    status.as_u16(),
                    truncate_string(&body, ERROR_BODY_EXCERPT),
                ));
                return;
            }

            if !is_event_stream(response.headers()) {
                // Backend ignored the stream flag and answered in one piece
                match response.text().await {
                    Ok(body) => {
                        let text = dialect.decode_full_response(&body);
                        if !text.is_empty() {
                            yield Ok(text);
                        }
                    }
                    Err(e) => yield Err(GatewayError::from(e)),
                }
                return;
            }

            let mut lines = LineBuffer::new();
            let mut body = response.bytes_stream();
            while let Some(chunk) = body.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        error!(%url, error = %e, "upstream stream interrupted");
                        yield Err(GatewayError::from(e));
                        return;
                    }
                };
                let complete = match lines.push(&chunk) {
                    Ok(complete) => complete,
                    Err(e) => {
                        error!(%url, error = %e, "upstream line too long");
                        yield Err(e);
                        return;
                    }
                };
                for line in complete {
                    match interpret_line(dialect, &line) {
                        LineOutcome::Fragment(text) => yield Ok(text),
                        LineOutcome::Done => {
                            debug!(%url, "upstream sent end-of-stream sentinel");
                            return;
                        }
                        LineOutcome::Skip => {}
                    }
                }
            }

            if let Some(line) = lines.finish() {
                if let LineOutcome::Fragment(text) = interpret_line(dialect, &line) {
                    yield Ok(text);
                }
            }
        };

        Box::pin(stream)
    }
}

/// Result of interpreting one complete event-stream line
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineOutcome {
    Fragment(String),
    Done,
    Skip,
}

pub(crate) fn interpret_line(dialect: Dialect, line: &str) -> LineOutcome {
    match classify_line(line) {
        SseLine::Done => LineOutcome::Done,
        SseLine::Ignored => LineOutcome::Skip,
        SseLine::Data(payload) => {
            let text = dialect.decode_fragment(payload);
            if text.is_empty() {
                LineOutcome::Skip
            } else {
                LineOutcome::Fragment(text)
            }
        }
    }
}

fn is_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("text/event-stream"))
        .unwrap_or(false)
}

use crate::{
    config::Config,
    errors::{SusanError, SusanResult},
    logging::{log_request, RequestLog},
};
use chrono::Utc;
use log::warn;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

pub const GENERATE_PATH: &str = "/api/generate";

/// Shown in place of a reply when the server answered but the stream carried
/// no usable text. Silent degradation, not an error.
pub const FALLBACK_REPLY: &str =
    "I received your message but had trouble processing it. Please try again.";

/// Client for the local Ollama generate endpoint.
///
/// Ollama answers with newline-delimited JSON objects; this client reads the
/// whole body at once and stitches the `response` fields back into a single
/// display string.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    config: Config,
}

impl OllamaClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends one prompt and returns the aggregated reply.
    ///
    /// Classification is first match wins: timeout, then connection failure,
    /// then non-2xx status, then empty body. No retries.
    pub async fn generate_response(&self, prompt: &str) -> SusanResult<String> {
        let url = format!("{}{}", self.config.base_url, GENERATE_PATH);
        let payload = json!({
            "model": self.config.model,
            "prompt": prompt,
        });

        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        log_request(&RequestLog {
            timestamp: Utc::now(),
            endpoint: GENERATE_PATH.to_string(),
            prompt_chars: prompt.chars().count(),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            return Err(SusanError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        if body.is_empty() {
            return Err(SusanError::EmptyBody);
        }

        let accumulated = aggregate_stream(&body);
        if accumulated.trim().is_empty() {
            Ok(FALLBACK_REPLY.to_string())
        } else {
            Ok(accumulated)
        }
    }
}

/// Tags a reqwest failure with its kind at the point it occurred.
fn classify_transport_error(err: reqwest::Error) -> SusanError {
    if err.is_timeout() {
        SusanError::Timeout
    } else if err.is_connect() {
        SusanError::Connection(err)
    } else {
        SusanError::Request(err)
    }
}

/// Concatenates the `response` field of every parseable line, in line order.
/// Blank lines are skipped; unparseable lines are logged and skipped.
pub fn aggregate_stream(body: &str) -> String {
    let mut accumulated = String::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(data) => {
                if let Some(chunk) = data.get("response").and_then(Value::as_str) {
                    accumulated.push_str(chunk);
                }
            }
            Err(e) => warn!("Failed to parse JSON line: {} ({})", line, e),
        }
    }
    accumulated
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server_uri: &str, timeout: Duration) -> OllamaClient {
        OllamaClient::new(Config {
            base_url: server_uri.to_string(),
            model: "susan".to_string(),
            timeout,
        })
    }

    #[test]
    fn test_client_exposes_configured_target() {
        let client = client_for("http://127.0.0.1:11434", Duration::from_secs(5));
        assert_eq!(client.base_url(), "http://127.0.0.1:11434");
        assert_eq!(client.model(), "susan");
    }

    #[test]
    fn test_aggregate_stream_concatenates_in_line_order() {
        let body = "{\"response\":\"Hi\"}\n{\"response\":\" there\"}";
        assert_eq!(aggregate_stream(body), "Hi there");
    }

    #[test]
    fn test_aggregate_stream_skips_invalid_lines() {
        let body = "{\"response\":\"Hi\"}\nnot json at all\n{\"response\":\" there\"}";
        assert_eq!(aggregate_stream(body), "Hi there");
    }

    #[test]
    fn test_aggregate_stream_ignores_blank_lines_and_missing_fields() {
        let body = "\n{\"done\":true}\n\n{\"response\":\"ok\"}\n";
        assert_eq!(aggregate_stream(body), "ok");
    }

    #[tokio::test]
    async fn test_generate_response_aggregates_stream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_json(json!({"model": "susan", "prompt": "hello"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{\"response\":\"Hi\"}\n{\"response\":\" there\"}"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let reply = client.generate_response("hello").await.unwrap();
        assert_eq!(reply, "Hi there");
    }

    #[tokio::test]
    async fn test_generate_response_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.generate_response("hello").await.unwrap_err();
        assert!(matches!(err, SusanError::EmptyBody));
    }

    #[tokio::test]
    async fn test_generate_response_whitespace_only_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("{\"response\":\"  \"}\n{\"done\":true}"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let reply = client.generate_response("hello").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_generate_response_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.generate_response("hello").await.unwrap_err();
        assert!(matches!(err, SusanError::HttpStatus(503)));
    }

    #[tokio::test]
    async fn test_generate_response_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{\"response\":\"too late\"}")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_millis(200));
        let err = client.generate_response("hello").await.unwrap_err();
        assert!(matches!(err, SusanError::Timeout));
    }

    #[tokio::test]
    async fn test_generate_response_connection_failure() {
        // Nothing listens on this port.
        let client = client_for("http://127.0.0.1:9", Duration::from_secs(5));
        let err = client.generate_response("hello").await.unwrap_err();
        assert!(matches!(err, SusanError::Connection(_)));
    }
}

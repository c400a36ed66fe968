// src/logging.rs

use chrono::{DateTime, Utc};
use log::debug;
use std::fs::OpenOptions;
use std::io::Write;

pub const REQUEST_LOG_FILE: &str = "susan_requests.log";

/// One record per HTTP round trip to the inference server.
#[derive(Debug)]
pub struct RequestLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub prompt_chars: usize,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Appends a request record to the log file. Best-effort; a failure to log
/// never fails the request itself.
pub fn log_request(entry: &RequestLog) {
    let line = format!(
        "[{}] {} - {} prompt chars - Status: {} - Time: {}ms\n",
        entry.timestamp.to_rfc3339(),
        entry.endpoint,
        entry.prompt_chars,
        entry.response_status,
        entry.response_time_ms
    );

    let result = OpenOptions::new()
        .append(true)
        .create(true)
        .open(REQUEST_LOG_FILE)
        .and_then(|mut file| file.write_all(line.as_bytes()));

    if let Err(e) = result {
        debug!("could not append to {}: {}", REQUEST_LOG_FILE, e);
    }
}

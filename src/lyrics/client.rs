//! HTTP client for the lyrics lookup service

use super::LyricsRecord;
use crate::error::LookupError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Public lyrics endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://some-random-api.com/lyrics";

/// Maps a free-text title query to lyrics
#[async_trait]
pub trait LyricsLookup: Send + Sync {
    /// Look up lyrics for `query`. Every failure is reported as an `Err`;
    /// there is no retry.
    async fn lookup(&self, query: &str) -> Result<LyricsRecord, LookupError>;
}

/// Fields the service must return for a lookup to count as a hit.
///
/// Only the presence of each key is checked; values of any JSON type are
/// accepted and rendered as text.
#[derive(Debug, Deserialize)]
struct LyricsPayload {
    title: Value,
    author: Value,
    lyrics: Value,
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Client for a `GET <endpoint>?title=<query>` lyrics service
#[derive(Debug, Clone)]
pub struct HttpLyricsClient {
    client: Client,
    endpoint: String,
}

impl HttpLyricsClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(concat!("lyrics-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LyricsLookup for HttpLyricsClient {
    async fn lookup(&self, query: &str) -> Result<LyricsRecord, LookupError> {
        tracing::debug!("Lyrics lookup query: {}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("title", query)])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = parse_lyrics_response(status, &body);
        match &result {
            Ok(record) => tracing::debug!("Found lyrics: {} by {}", record.title, record.author),
            Err(e) => tracing::debug!("No lyrics for '{}': {}", query, e),
        }
        result
    }
}

/// Classify a lookup response.
///
/// Only a 2xx status with a JSON object carrying the `title`, `author` and
/// `lyrics` keys is a hit; the record is stamped with the current local time.
pub fn parse_lyrics_response(status: u16, body: &str) -> Result<LyricsRecord, LookupError> {
    if !(200..300).contains(&status) {
        return Err(LookupError::Status(status));
    }

    let payload: LyricsPayload = serde_json::from_str(body)
        .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

    Ok(LyricsRecord {
        title: value_text(payload.title),
        author: value_text(payload.author),
        lyrics: value_text(payload.lyrics),
        retrieved_at: chrono::Local::now(),
    })
}

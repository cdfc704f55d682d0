//! Wire models for the maildesk backend API.
//!
//! These mirror the backend's JSON schema field for field. Classification
//! fields are optional because ingestion stores a message before the
//! sentiment/urgency pass has run.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serde helpers for the backend's timestamps.
///
/// The backend stores naive UTC datetimes and serializes them without an
/// offset (`2024-05-01T09:30:00`). Deserialization also accepts an offset
/// form (`...Z`, `...+00:00`), normalized to UTC.
mod naive_utc {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(with_offset.naive_utc());
        }
        raw.parse::<NaiveDateTime>().map_err(de::Error::custom)
    }
}

/// A stored support email with its classification and draft reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub id: i64,
    pub message_id: String,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    #[serde(with = "naive_utc")]
    pub date: NaiveDateTime,
    pub sentiment: Option<String>,
    pub sentiment_score: Option<f64>,
    pub urgency: Option<i32>,
    pub category: Option<String>,
    pub extracted_info: Option<Value>,
    pub is_processed: bool,
    pub ai_response: Option<String>,
    pub is_response_sent: bool,
    #[serde(with = "naive_utc")]
    pub created_at: NaiveDateTime,
    #[serde(with = "naive_utc")]
    pub updated_at: NaiveDateTime,
}

/// Partial update applied by the operator from the review dashboard.
/// Unset fields are omitted from the request body and left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_response_sent: Option<bool>,
}

impl EmailUpdate {
    /// Replace the draft reply text.
    pub fn ai_response(text: impl Into<String>) -> Self {
        Self {
            ai_response: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Generic status envelope returned by trigger-style endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub count: i64,
}

/// A knowledge-base article to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewKnowledgeItem {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A stored knowledge-base article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "naive_utc")]
    pub created_at: NaiveDateTime,
    #[serde(with = "naive_utc")]
    pub updated_at: NaiveDateTime,
}

/// Aggregate mailbox statistics for the analytics page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub total_emails: i64,
    pub processed_emails: i64,
    pub pending_emails: i64,
    pub sentiment_distribution: HashMap<String, i64>,
    pub urgency_distribution: HashMap<String, i64>,
    pub category_distribution: HashMap<String, i64>,
    pub emails_last_24h: i64,
}

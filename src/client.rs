//! Typed client for the maildesk backend API.
//!
//! Every operation runs through a fresh [`RetryExecutor`] invocation, so
//! each logical call gets its own attempt budget. The per-attempt timeout
//! from the policy is applied to the request itself; the executor only
//! decides whether and when to try again.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http;
use crate::retry::notify::{RetryNotifier, TracingNotifier};
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::types::{
    AnalyticsSnapshot, Email, EmailUpdate, KnowledgeItem, NewKnowledgeItem, StatusResponse,
};

/// Resilient client for the support-ticket backend.
#[derive(Clone)]
pub struct MaildeskClient {
    http: reqwest::Client,
    config: ApiConfig,
    policy: RetryPolicy,
    notifier: Arc<dyn RetryNotifier>,
}

impl MaildeskClient {
    /// Create a client with the default retry policy and tracing-backed
    /// retry notifications.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            policy: RetryPolicy::default(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the retry notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn RetryNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The resolved backend base URL.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Trigger mailbox ingestion on the backend.
    pub async fn trigger_ingest(&self) -> Result<StatusResponse, ApiError> {
        self.request_json(Method::POST, "/fetch-emails/", &[], None)
            .await
    }

    /// List stored emails, newest first.
    pub async fn list_emails(&self, skip: u32, limit: u32) -> Result<Vec<Email>, ApiError> {
        let query = [("skip", skip.to_string()), ("limit", limit.to_string())];
        self.request_json(Method::GET, "/emails/", &query, None).await
    }

    /// Fetch one email with its classification and draft reply.
    pub async fn get_email(&self, id: i64) -> Result<Email, ApiError> {
        self.request_json(Method::GET, &format!("/emails/{id}"), &[], None)
            .await
    }

    /// Apply an operator edit to an email (typically the draft reply text).
    pub async fn update_email(&self, id: i64, update: &EmailUpdate) -> Result<Email, ApiError> {
        let body = serde_json::to_value(update)
            .map_err(|e| ApiError::transport(format!("invalid request body: {e}")))?;
        self.request_json(Method::PUT, &format!("/emails/{id}"), &[], Some(body))
            .await
    }

    /// Send the reviewed reply for an email.
    pub async fn send_response(&self, id: i64) -> Result<StatusResponse, ApiError> {
        self.request_json(Method::POST, &format!("/emails/{id}/send-response"), &[], None)
            .await
    }

    /// Fetch aggregate mailbox statistics.
    pub async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        self.request_json(Method::GET, "/analytics/", &[], None).await
    }

    /// List knowledge-base articles, optionally filtered by category.
    pub async fn list_knowledge(
        &self,
        skip: u32,
        limit: u32,
        category: Option<&str>,
    ) -> Result<Vec<KnowledgeItem>, ApiError> {
        let mut query = vec![("skip", skip.to_string()), ("limit", limit.to_string())];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }
        self.request_json(Method::GET, "/knowledge-base/", &query, None)
            .await
    }

    /// Create a knowledge-base article.
    pub async fn create_knowledge(
        &self,
        item: &NewKnowledgeItem,
    ) -> Result<KnowledgeItem, ApiError> {
        let body = serde_json::to_value(item)
            .map_err(|e| ApiError::transport(format!("invalid request body: {e}")))?;
        self.request_json(Method::POST, "/knowledge-base/", &[], Some(body))
            .await
    }

    /// Issue one logical request through the retry executor.
    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        let executor = RetryExecutor::with_notifier(self.policy.clone(), self.notifier.clone());

        executor
            .execute(|timeout: Duration| {
                tracing::debug!(%method, %url, "issuing API request");
                let mut request = self
                    .http
                    .request(method.clone(), &url)
                    .query(query)
                    .timeout(timeout);
                if let Some(body) = &body {
                    request = request.json(body);
                }
                async move { http::send_json(request).await }
            })
            .await
    }
}

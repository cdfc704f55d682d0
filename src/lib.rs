//! maildesk
//!
//! Typed, resilient client for the maildesk support-ticket backend API.
//!
//! The backend ingests support mail, classifies it, drafts replies, and
//! exposes the result over JSON/HTTP. This crate gives the operator
//! dashboard typed access to that API, with every call wrapped in a
//! deterministic exponential-backoff retry executor that reports its
//! progress through a pluggable notification sink.
//!
//! # Example
//!
//! ```rust,no_run
//! use maildesk::{ApiConfig, MaildeskClient, RetryPolicy};
//!
//! # async fn example() -> Result<(), maildesk::ApiError> {
//! let client = MaildeskClient::new(ApiConfig::resolve(None))
//!     .with_policy(RetryPolicy::new().with_max_retries(3).with_timeout(20.0));
//!
//! let inbox = client.list_emails(0, 50).await?;
//! println!("{} emails pending review", inbox.len());
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
mod http;
pub mod retry;
pub mod types;

pub use client::MaildeskClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use retry::{RetryExecutor, RetryNotifier, RetryPolicy, TracingNotifier};

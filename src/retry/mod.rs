//! Retry module
//! - policy.rs: retry policy configuration and the backoff executor
//! - notify.rs: notification sink for operator-visible retry events

pub mod notify;
pub mod policy;

pub use notify::{RetryNotifier, TracingNotifier};
pub use policy::{RetryExecutor, RetryPolicy, retry_with_backoff};

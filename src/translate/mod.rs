mod client;
mod retry;

pub use client::TranslationClient;
pub use retry::{RetryMachine, RetryPolicy, RetryState, Step, TRANSIENT_STATUSES};

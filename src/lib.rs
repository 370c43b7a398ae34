//! Terminal client that turns a post URL into a short summary via a remote
//! summarization service.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod input;
pub mod logging;
pub mod models;
pub mod network;
pub mod theme;
pub mod ui;

pub use controller::{SummaryController, COPY_FEEDBACK_WINDOW, FAILURE_FALLBACK, FALLBACK_ERROR};
pub use models::{ApiStatus, CopyFeedback, Phase, SummaryRequest};
pub use network::{ClientError, HttpSummarizationClient, SummarizationClient, SummaryOutcome};

//! Request lifecycle controller.
//!
//! Owns the single [`SummaryRequest`] and the copy confirmation. Background
//! work (the HTTP call, the copy-feedback timer, the health probe) runs on the
//! tokio runtime but never touches state directly: it reports back through a
//! channel and the owner applies those events with [`SummaryController::drain_events`]
//! or [`SummaryController::next_event`].

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::clipboard::ClipboardSink;
use crate::models::{ApiStatus, CopyFeedback, Phase, SummaryRequest};
use crate::network::{ClientError, SummarizationClient, SummaryOutcome};

/// How long "Copied!" stays up after a successful copy.
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_millis(2000);

/// Shown for transport faults that carry no detail.
pub const FALLBACK_ERROR: &str = "An error occurred. Please try again.";

/// Shown when the service reports failure without a reason.
pub const FAILURE_FALLBACK: &str = "Failed to generate summary";

#[derive(Debug)]
pub enum ControllerEvent {
    Summarized(Result<SummaryOutcome, ClientError>),
    CopyFeedbackExpired { generation: u64 },
    HealthChecked(ApiStatus),
}

pub struct SummaryController {
    request: SummaryRequest,
    feedback: CopyFeedback,
    api_status: ApiStatus,
    client: Arc<dyn SummarizationClient>,
    clipboard: Box<dyn ClipboardSink>,
    runtime: Handle,
    events_tx: UnboundedSender<ControllerEvent>,
    events_rx: UnboundedReceiver<ControllerEvent>,
    revert_task: Option<JoinHandle<()>>,
}

impl SummaryController {
    pub fn new(
        client: Arc<dyn SummarizationClient>,
        clipboard: Box<dyn ClipboardSink>,
        runtime: Handle,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            request: SummaryRequest::default(),
            feedback: CopyFeedback::default(),
            api_status: ApiStatus::Unknown,
            client,
            clipboard,
            runtime,
            events_tx,
            events_rx,
            revert_task: None,
        }
    }

    pub fn request(&self) -> &SummaryRequest {
        &self.request
    }

    pub fn phase(&self) -> &Phase {
        &self.request.phase
    }

    pub fn feedback(&self) -> CopyFeedback {
        self.feedback
    }

    pub fn api_status(&self) -> ApiStatus {
        self.api_status
    }

    /// Whether the submit trigger is enabled.
    pub fn can_submit(&self) -> bool {
        !self.request.phase.is_pending() && !self.request.url.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.request.phase.is_pending() {
            self.request.url.push(c);
        }
    }

    pub fn insert_str(&mut self, text: &str) {
        if !self.request.phase.is_pending() {
            // Pasted text can carry a trailing newline; the input is one line.
            self.request
                .url
                .extend(text.chars().filter(|c| !c.is_control()));
        }
    }

    pub fn delete_char(&mut self) {
        if !self.request.phase.is_pending() {
            self.request.url.pop();
        }
    }

    pub fn clear_url(&mut self) {
        if !self.request.phase.is_pending() {
            self.request.url.clear();
        }
    }

    /// Submits the current URL. Returns `false` without doing anything when a
    /// request is already in flight or the URL is blank.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let url = self.request.url.trim().to_string();
        info!(%url, "submitting url for summary");
        self.request.phase = Phase::Pending;

        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = client.summarize(&url).await;
            let _ = tx.send(ControllerEvent::Summarized(outcome));
        });
        true
    }

    /// Copies the summary to the clipboard. No-op unless a summary is shown.
    pub fn copy_result(&mut self) -> bool {
        let Some(summary) = self.request.result() else {
            return false;
        };
        if let Err(e) = self.clipboard.set_text(summary) {
            warn!("failed to copy summary: {:#}", e);
            return false;
        }

        if let Some(task) = self.revert_task.take() {
            task.abort();
        }
        self.feedback.copied = true;
        self.feedback.generation += 1;
        let generation = self.feedback.generation;
        let deadline = Instant::now() + COPY_FEEDBACK_WINDOW;
        let tx = self.events_tx.clone();
        self.revert_task = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(ControllerEvent::CopyFeedbackExpired { generation });
        }));
        true
    }

    /// Back to an empty form, dropping any "Copied!" confirmation. Only
    /// meaningful once a request has finished.
    pub fn reset(&mut self) -> bool {
        if !self.request.phase.is_terminal() {
            return false;
        }
        self.request = SummaryRequest::default();
        if let Some(task) = self.revert_task.take() {
            task.abort();
        }
        self.feedback.copied = false;
        // Invalidates a revert that was already in the channel.
        self.feedback.generation += 1;
        true
    }

    /// Probes the service once; the result lands as an event.
    pub fn check_health(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let status = match client.health().await {
                Ok(()) => ApiStatus::Online,
                Err(e) => {
                    warn!(error = %e, "health check failed");
                    ApiStatus::Offline
                }
            };
            let _ = tx.send(ControllerEvent::HealthChecked(status));
        });
    }

    /// Applies every event that has already arrived. Returns how many.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next event and applies it.
    pub async fn next_event(&mut self) {
        // The controller holds a sender, so the channel never closes.
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Summarized(outcome) => {
                if !self.request.phase.is_pending() {
                    warn!("dropping summary completion with no request in flight");
                    return;
                }
                self.request.phase = phase_for(outcome);
            }
            ControllerEvent::CopyFeedbackExpired { generation } => {
                if generation == self.feedback.generation {
                    self.feedback.copied = false;
                    self.revert_task = None;
                }
            }
            ControllerEvent::HealthChecked(status) => {
                info!(?status, "api health");
                self.api_status = status;
            }
        }
    }
}

fn phase_for(outcome: Result<SummaryOutcome, ClientError>) -> Phase {
    match outcome {
        Ok(SummaryOutcome::Summary(summary)) => {
            info!(chars = summary.chars().count(), "summary received");
            Phase::Succeeded { summary }
        }
        Ok(SummaryOutcome::Failure(error)) => {
            let message = non_empty(error).unwrap_or_else(|| FAILURE_FALLBACK.to_string());
            warn!(%message, "service reported failure");
            Phase::Failed { message }
        }
        Err(e) => {
            warn!(error = %e, "summarize request failed");
            let message = non_empty(e.detail().map(str::to_string))
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            Phase::Failed { message }
        }
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Lifecycle stage of the single summary request.
///
/// Terminal phases carry their payload, so a result can only exist in
/// `Succeeded` and an error message only in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded { summary: String },
    Failed { message: String },
}

impl Phase {
    pub fn is_pending(&self) -> bool {
        matches!(self, Phase::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Succeeded { .. } | Phase::Failed { .. })
    }
}

/// The one live request owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryRequest {
    pub(crate) url: String,
    pub(crate) phase: Phase,
}

impl SummaryRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn result(&self) -> Option<&str> {
        match &self.phase {
            Phase::Succeeded { summary } => Some(summary),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Transient "Copied!" confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyFeedback {
    pub(crate) copied: bool,
    // Identifies the revert currently scheduled; older reverts are stale.
    pub(crate) generation: u64,
}

impl CopyFeedback {
    pub fn copied(&self) -> bool {
        self.copied
    }
}

/// Outcome of the startup health probe, shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

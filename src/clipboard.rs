use anyhow::{Context, Result};
use arboard::Clipboard;

/// Somewhere the summary can be copied to.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. Opened lazily so a headless session only fails when
/// the user actually copies.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().context("failed to open clipboard")?);
        }
        if let Some(cb) = self.inner.as_mut() {
            cb.set_text(text.to_string())
                .context("failed to write clipboard")?;
        }
        Ok(())
    }
}

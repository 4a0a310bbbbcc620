//! Native clipboard transports for the CLI.
//!
//! 1. System clipboard via `arboard` (primary)
//! 2. OSC 52 terminal escape sequence (fallback, works over SSH)

use std::cell::RefCell;
use std::io::{IsTerminal, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use base64::Engine;

use super::{ClipboardError, ClipboardWriter, CopyFeedback, SelectionCopy};

/// The desktop clipboard.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold: Option<Duration>,
}

impl SystemClipboard {
    /// `None` when no clipboard is reachable (headless session, no display).
    pub fn detect() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(inner) => Some(Self {
                inner: Mutex::new(inner),
                hold: None,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "system clipboard unavailable");
                None
            }
        }
    }

    /// On Linux, keep serving the selection for up to `hold` after a write,
    /// or until a clipboard manager takes it over. X11 and Wayland drop the
    /// contents when the owning process exits.
    pub fn hold_for(mut self, hold: Duration) -> Self {
        self.hold = Some(hold);
        self
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn hold_deadline(hold: Option<Duration>, now: Instant) -> Option<Instant> {
    hold.and_then(|h| now.checked_add(h))
}

impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|e| ClipboardError::Rejected(format!("lock error: {e}")))?;
        #[cfg(target_os = "linux")]
        if let Some(deadline) = hold_deadline(self.hold, Instant::now()) {
            use arboard::SetExtLinux;
            return clipboard
                .set()
                .wait_until(deadline)
                .text(text)
                .map_err(|e| ClipboardError::Rejected(e.to_string()));
        }
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

/// Copies by asking the terminal to set its selection.
///
/// OSC 52 format: `ESC ] 52 ; c ; <base64-data> ESC \`, where `c` selects
/// the system clipboard.
pub struct Osc52<W: Write> {
    out: RefCell<W>,
    terminal: bool,
}

impl Osc52<std::io::Stderr> {
    /// Writes to stderr so stdout stays the bare markup. Refuses to copy
    /// when stderr is redirected.
    pub fn stderr() -> Self {
        let out = std::io::stderr();
        let terminal = out.is_terminal();
        Self::new(out).attached(terminal)
    }
}

impl<W: Write> Osc52<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            terminal: true,
        }
    }

    /// Whether `out` reaches a terminal. Detached writers never receive the
    /// escape sequence.
    pub fn attached(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> SelectionCopy for Osc52<W> {
    fn copy_selection(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.terminal {
            return Err(ClipboardError::Selection("output is not a terminal".into()));
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let mut out = self.out.borrow_mut();
        write!(out, "\x1b]52;c;{encoded}\x1b\\")
            .and_then(|()| out.flush())
            .map_err(|e| ClipboardError::Selection(e.to_string()))
    }
}

/// A textual stand-in for the copy button: the CLI prints its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabel {
    pub label: String,
    pub copied: bool,
}

impl StatusLabel {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            copied: false,
        }
    }
}

impl CopyFeedback for StatusLabel {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn set_copied(&mut self, copied: bool) {
        self.copied = copied;
    }
}

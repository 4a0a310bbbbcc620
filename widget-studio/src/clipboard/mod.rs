//! Copying the generated code, with a selection-based fallback and a
//! transient label on the copy button.
//!
//! The exporter tries the platform's async clipboard when the host has one,
//! otherwise the synchronous selection copy. A failure of whichever path ran
//! is reported once through the button label and never retried.

#[cfg(not(target_arch = "wasm32"))]
pub mod system;

use std::time::Duration;

use thiserror::Error;

/// How long the copy button shows its result before reverting.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(1600);
pub const COPIED_LABEL: &str = "Copied!";
pub const FAILED_LABEL: &str = "Failed";
/// Class toggled on the copy button while it shows success.
pub const COPIED_CLASS: &str = "copied";

#[derive(Debug, Error, PartialEq)]
pub enum ClipboardError {
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
    #[error("selection copy failed: {0}")]
    Selection(String),
}

/// The platform's asynchronous "write text to clipboard".
#[allow(async_fn_in_trait)]
pub trait ClipboardWriter {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Synchronous copy through a temporary text selection.
pub trait SelectionCopy {
    fn copy_selection(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The copy button.
pub trait CopyFeedback {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
    fn set_copied(&mut self, copied: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Clipboard,
    Selection,
}

#[derive(Debug, PartialEq)]
pub enum CopyOutcome {
    /// There was no code pane to copy from.
    NoSource,
    Copied(CopyPath),
    Failed(CopyPath, ClipboardError),
}

impl CopyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

/// Restores the copy button after [`FEEDBACK_DURATION`]. Hosts schedule it
/// fire-and-forget; a newer copy does not cancel an older revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRevert {
    original_label: String,
    pub after: Duration,
}

impl FeedbackRevert {
    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    pub fn apply<B: CopyFeedback + ?Sized>(&self, button: &mut B) {
        button.set_label(&self.original_label);
        button.set_copied(false);
    }
}

/// Flip the button to `Copied!` or `Failed`.
pub fn show_feedback<B: CopyFeedback + ?Sized>(button: &mut B, success: bool) -> FeedbackRevert {
    let original_label = button.label();
    button.set_label(if success { COPIED_LABEL } else { FAILED_LABEL });
    button.set_copied(success);
    FeedbackRevert {
        original_label,
        after: FEEDBACK_DURATION,
    }
}

pub struct ClipboardExporter<C, S> {
    primary: Option<C>,
    fallback: S,
}

impl<C: ClipboardWriter, S: SelectionCopy> ClipboardExporter<C, S> {
    /// `primary` is `None` when the host has no async clipboard.
    pub fn new(primary: Option<C>, fallback: S) -> Self {
        Self { primary, fallback }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Copy `code`, the current text of the code pane (`None` when the pane
    /// is missing). The text is captured before any await.
    pub async fn copy(&self, code: Option<&str>) -> CopyOutcome {
        let Some(code) = code else {
            return CopyOutcome::NoSource;
        };
        let text = code.to_string();

        match &self.primary {
            Some(clipboard) => match clipboard.write_text(&text).await {
                Ok(()) => CopyOutcome::Copied(CopyPath::Clipboard),
                Err(e) => {
                    tracing::warn!(error = %e, "clipboard write failed");
                    CopyOutcome::Failed(CopyPath::Clipboard, e)
                }
            },
            None => match self.fallback.copy_selection(&text) {
                Ok(()) => CopyOutcome::Copied(CopyPath::Selection),
                Err(e) => {
                    tracing::warn!(error = %e, "selection copy failed");
                    CopyOutcome::Failed(CopyPath::Selection, e)
                }
            },
        }
    }

    /// [`copy`](Self::copy), then update `button` if there is one.
    pub async fn copy_with_feedback<B: CopyFeedback + ?Sized>(
        &self,
        code: Option<&str>,
        button: Option<&mut B>,
    ) -> (CopyOutcome, Option<FeedbackRevert>) {
        let outcome = self.copy(code).await;
        if outcome == CopyOutcome::NoSource {
            return (outcome, None);
        }
        let revert = button.map(|b| show_feedback(b, outcome.is_success()));
        (outcome, revert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeClipboard {
        fail: bool,
        written: RefCell<Vec<String>>,
    }

    impl FakeClipboard {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                written: RefCell::new(Vec::new()),
            }
        }
    }

    impl ClipboardWriter for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Rejected("denied".into()));
            }
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    struct FakeSelection {
        fail: bool,
        copied: RefCell<Vec<String>>,
    }

    impl FakeSelection {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                copied: RefCell::new(Vec::new()),
            }
        }
    }

    impl SelectionCopy for FakeSelection {
        fn copy_selection(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Selection("execCommand returned false".into()));
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeButton {
        label: String,
        copied: bool,
    }

    impl CopyFeedback for FakeButton {
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

    fn button() -> FakeButton {
        FakeButton {
            label: "Copy".into(),
            copied: false,
        }
    }

    #[tokio::test]
    async fn primary_clipboard_success() {
        let exporter = ClipboardExporter::new(Some(FakeClipboard::new(false)), FakeSelection::new(false));
        let mut btn = button();
        let (outcome, revert) = exporter
            .copy_with_feedback(Some("<div></div>"), Some(&mut btn))
            .await;

        assert_eq!(outcome, CopyOutcome::Copied(CopyPath::Clipboard));
        assert_eq!(btn.label, COPIED_LABEL);
        assert!(btn.copied);
        assert!(exporter.fallback.copied.borrow().is_empty());

        let revert = revert.expect("button present");
        assert_eq!(revert.after, FEEDBACK_DURATION);
        revert.apply(&mut btn);
        assert_eq!(btn.label, "Copy");
        assert!(!btn.copied);
    }

    #[tokio::test]
    async fn primary_failure_is_reported_without_fallback() {
        let exporter = ClipboardExporter::new(Some(FakeClipboard::new(true)), FakeSelection::new(false));
        let mut btn = button();
        let (outcome, _) = exporter.copy_with_feedback(Some("x"), Some(&mut btn)).await;

        assert!(matches!(
            outcome,
            CopyOutcome::Failed(CopyPath::Clipboard, ClipboardError::Rejected(_))
        ));
        assert_eq!(btn.label, FAILED_LABEL);
        assert!(!btn.copied);
        assert!(exporter.fallback.copied.borrow().is_empty());
    }

    #[tokio::test]
    async fn missing_clipboard_uses_selection_copy() {
        let exporter: ClipboardExporter<FakeClipboard, _> =
            ClipboardExporter::new(None, FakeSelection::new(false));
        let mut btn = button();
        let (outcome, revert) = exporter
            .copy_with_feedback(Some("<button>Klik mig</button>"), Some(&mut btn))
            .await;

        assert_eq!(outcome, CopyOutcome::Copied(CopyPath::Selection));
        assert_eq!(btn.label, COPIED_LABEL);
        assert_eq!(
            exporter.fallback.copied.borrow().as_slice(),
            ["<button>Klik mig</button>".to_string()]
        );
        assert!(revert.is_some());
    }

    #[tokio::test]
    async fn both_paths_failing_is_not_fatal() {
        let exporter: ClipboardExporter<FakeClipboard, _> =
            ClipboardExporter::new(None, FakeSelection::new(true));
        let mut btn = button();
        let (outcome, _) = exporter.copy_with_feedback(Some("x"), Some(&mut btn)).await;
        assert!(!outcome.is_success());
        assert_eq!(btn.label, FAILED_LABEL);
    }

    #[tokio::test]
    async fn no_code_pane_is_a_no_op() {
        let exporter = ClipboardExporter::new(Some(FakeClipboard::new(false)), FakeSelection::new(false));
        let mut btn = button();
        let (outcome, revert) = exporter.copy_with_feedback(None, Some(&mut btn)).await;
        assert_eq!(outcome, CopyOutcome::NoSource);
        assert!(revert.is_none());
        assert_eq!(btn.label, "Copy");
        assert!(exporter.primary.as_ref().unwrap().written.borrow().is_empty());
    }

    #[tokio::test]
    async fn missing_button_still_copies() {
        let exporter = ClipboardExporter::new(Some(FakeClipboard::new(false)), FakeSelection::new(false));
        let (outcome, revert) = exporter
            .copy_with_feedback::<FakeButton>(Some("x"), None)
            .await;
        assert!(outcome.is_success());
        assert!(revert.is_none());
    }

    #[test]
    fn back_to_back_feedback_is_last_write_wins() {
        let mut btn = button();
        let first = show_feedback(&mut btn, true);
        let second = show_feedback(&mut btn, false);
        assert_eq!(btn.label, FAILED_LABEL);
        // The second revert captured the first's label.
        assert_eq!(second.original_label(), COPIED_LABEL);
        first.apply(&mut btn);
        assert_eq!(btn.label, "Copy");
    }
}

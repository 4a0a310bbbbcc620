//! Pushing rendered markup into a preview pane and a code pane.

/// A host element that can show markup.
pub trait RenderTarget {
    /// Interpret `markup` as HTML (preview).
    fn set_live_content(&mut self, markup: &str);

    /// Show `text` literally (code pane).
    fn set_text_content(&mut self, text: &str);
}

/// Target for hosts with nowhere to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detached;

impl RenderTarget for Detached {
    fn set_live_content(&mut self, _markup: &str) {}
    fn set_text_content(&mut self, _text: &str) {}
}

/// Writes each render into an optional preview and an optional code pane.
/// Absent panes are skipped.
#[derive(Debug, Clone)]
pub struct ViewUpdater<T> {
    preview: Option<T>,
    code: Option<T>,
}

impl<T> Default for ViewUpdater<T> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<T> ViewUpdater<T> {
    pub fn new(preview: Option<T>, code: Option<T>) -> Self {
        Self { preview, code }
    }

    pub fn detached() -> Self {
        Self {
            preview: None,
            code: None,
        }
    }

    pub fn preview(&self) -> Option<&T> {
        self.preview.as_ref()
    }

    pub fn code(&self) -> Option<&T> {
        self.code.as_ref()
    }
}

impl<T: RenderTarget> ViewUpdater<T> {
    pub fn update(&mut self, markup: &str) {
        if let Some(preview) = self.preview.as_mut() {
            preview.set_live_content(markup);
        }
        if let Some(code) = self.code.as_mut() {
            code.set_text_content(markup);
        }
    }
}

//! WASM bindings: the pure renderers and the in-page configurator apps.
//!
//! Build with: `wasm-pack build --target web --features wasm`

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlDocument, HtmlTextAreaElement, Window};

use crate::clipboard::{
    ClipboardError, ClipboardExporter, ClipboardWriter, CopyFeedback, FeedbackRevert,
    SelectionCopy, COPIED_CLASS,
};
use crate::layout;
use crate::studio::Studio;
use crate::view::{RenderTarget, ViewUpdater};
use crate::widget::{Action, FieldChange, Widget};
use crate::{Button, ButtonParams, Notice, NoticeState, Value};

const PREVIEW_SELECTOR: &str = "#widget-preview .section-content";
const CODE_SELECTOR: &str = "#code-output .code-content";
const COPY_BUTTON_SELECTOR: &str = ".copy-button";

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn describe(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

/// Render a notice. `state` is `{params, styles}`; missing keys take
/// their defaults, `undefined` renders the default notice.
#[wasm_bindgen(js_name = renderNotice)]
pub fn render_notice(state: JsValue) -> Result<String, JsError> {
    let state: NoticeState = if state.is_undefined() || state.is_null() {
        Notice::defaults()
    } else {
        let parsed: NoticeState = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
        Notice::validate(&parsed).map_err(js_err)?
    };
    Ok(crate::render_notice(&state))
}

/// Render a button from a (possibly partial) parameter object.
#[wasm_bindgen(js_name = renderButton)]
pub fn render_button(params: JsValue) -> Result<String, JsError> {
    let params: ButtonParams = if params.is_undefined() || params.is_null() {
        Button::defaults()
    } else {
        let parsed: ButtonParams = serde_wasm_bindgen::from_value(params).map_err(js_err)?;
        Button::validate(&parsed).map_err(js_err)?
    };
    Ok(crate::render_button(&params))
}

// ── DOM adapters ──────────────────────────────────────────────────────

struct DomTarget(Element);

impl RenderTarget for DomTarget {
    fn set_live_content(&mut self, markup: &str) {
        self.0.set_inner_html(markup);
    }

    fn set_text_content(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

struct DomElement(Element);

impl layout::Element for DomElement {
    fn toggle_class(&mut self, class: &str, force: Option<bool>) -> bool {
        let list = self.0.class_list();
        let result = match force {
            Some(force) => list.toggle_with_force(class, force),
            None => list.toggle(class),
        };
        result.unwrap_or_else(|_| list.contains(class))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_text(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

/// `navigator.clipboard`.
struct BrowserClipboard(web_sys::Clipboard);

impl BrowserClipboard {
    fn detect(window: &Window) -> Option<Self> {
        let navigator = window.navigator();
        let present = js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("clipboard"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false);
        present.then(|| Self(navigator.clipboard()))
    }
}

impl ClipboardWriter for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        JsFuture::from(self.0.write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(describe(&e)))
    }
}

/// Hidden textarea + `document.execCommand('copy')`.
struct TextareaSelection(Document);

impl SelectionCopy for TextareaSelection {
    fn copy_selection(&self, text: &str) -> Result<(), ClipboardError> {
        let fail = |e: JsValue| ClipboardError::Selection(describe(&e));
        let body = self
            .0
            .body()
            .ok_or_else(|| ClipboardError::Selection("document has no body".into()))?;
        let textarea: HtmlTextAreaElement = self
            .0
            .create_element("textarea")
            .map_err(fail)?
            .dyn_into()
            .map_err(|_| ClipboardError::Selection("textarea unavailable".into()))?;
        textarea.set_value(text);
        textarea.set_attribute("readonly", "").map_err(fail)?;
        textarea
            .set_attribute("style", "position:fixed;top:0;left:0;opacity:0")
            .map_err(fail)?;
        body.append_child(&textarea).map_err(fail)?;
        textarea.select();
        let copied = match self.0.dyn_ref::<HtmlDocument>() {
            Some(doc) => doc.exec_command("copy"),
            None => Ok(false),
        };
        textarea.remove();
        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::Selection("copy command refused".into())),
            Err(e) => Err(fail(e)),
        }
    }
}

struct ButtonFeedback(Element);

impl CopyFeedback for ButtonFeedback {
    fn label(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_label(&mut self, label: &str) {
        self.0.set_text_content(Some(label));
    }

    fn set_copied(&mut self, copied: bool) {
        let _ = self.0.class_list().toggle_with_force(COPIED_CLASS, copied);
    }
}

// ── Wiring ────────────────────────────────────────────────────────────

fn on_click<F>(target: &Element, mut callback: F)
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        callback();
    }) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
        tracing::error!(error = %describe(&e), "click listener setup failed");
    }
    closure.forget();
}

fn schedule_revert(window: &Window, revert: FeedbackRevert, button: Element) {
    let ms = i32::try_from(revert.after.as_millis()).unwrap_or(i32::MAX);
    let callback = Closure::once_into_js(move || {
        revert.apply(&mut ButtonFeedback(button));
    });
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms);
}

/// Copy the code pane's current text. The text is read before any await.
async fn copy_code(document: Document) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let code = document
        .query_selector(CODE_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.text_content());
    let button = document.query_selector(COPY_BUTTON_SELECTOR).ok().flatten();

    let exporter = ClipboardExporter::new(
        BrowserClipboard::detect(&window),
        TextareaSelection(document),
    );
    let mut feedback = button.clone().map(ButtonFeedback);
    let (outcome, revert) = exporter
        .copy_with_feedback(code.as_deref(), feedback.as_mut())
        .await;
    if let (Some(revert), Some(button)) = (revert, button) {
        schedule_revert(&window, revert, button);
    }
    outcome.is_success()
}

fn wire_copy_button(document: &Document) {
    let Some(button) = document.query_selector(COPY_BUTTON_SELECTOR).ok().flatten() else {
        return;
    };
    let document = document.clone();
    on_click(&button, move || {
        let document = document.clone();
        wasm_bindgen_futures::spawn_local(async move {
            copy_code(document).await;
        });
    });
}

fn wire_floating_controls(document: &Document) {
    let (Some(toggle), Some(panel), Some(close), Some(body)) = (
        document.get_element_by_id("floating-controls-toggle"),
        document.get_element_by_id("controls-panel"),
        document.get_element_by_id("close-controls"),
        document.body(),
    ) else {
        return;
    };
    let body: Element = body.into();
    let drawer = Rc::new(RefCell::new((
        DomElement(panel),
        DomElement(toggle.clone()),
        DomElement(body),
    )));

    let open_close = Rc::clone(&drawer);
    on_click(&toggle, move || {
        let mut guard = open_close.borrow_mut();
        let (panel, toggle, body) = &mut *guard;
        layout::toggle_controls(panel, toggle, body);
    });
    on_click(&close, move || {
        let mut guard = drawer.borrow_mut();
        let (panel, toggle, body) = &mut *guard;
        layout::set_controls_open(panel, toggle, body, false);
    });
}

// ── Apps ──────────────────────────────────────────────────────────────

type SharedStudio<W> = Rc<RefCell<Studio<W, DomTarget>>>;

struct App<W: Widget> {
    studio: SharedStudio<W>,
    document: Document,
}

impl<W: Widget + 'static> App<W> {
    /// Render the defaults into the page and wire the page chrome. Missing
    /// elements are skipped.
    fn mount() -> Result<Self, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("no document"))?;

        let find = |selector: &str| document.query_selector(selector).ok().flatten().map(DomTarget);
        let view = ViewUpdater::new(find(PREVIEW_SELECTOR), find(CODE_SELECTOR));
        let studio: SharedStudio<W> = Rc::new(RefCell::new(Studio::new(view)));

        wire_copy_button(&document);
        Self::wire_code_toggle(&document, Rc::clone(&studio));
        wire_floating_controls(&document);

        Ok(Self { studio, document })
    }

    fn wire_code_toggle(document: &Document, studio: SharedStudio<W>) {
        let (Some(section), Some(button)) = (
            document.get_element_by_id("code-output"),
            document.get_element_by_id("toggle-code-btn"),
        ) else {
            return;
        };
        let mut section = DomElement(section);
        let mut label = DomElement(button.clone());
        on_click(&button, move || {
            if layout::toggle_code_panel(&mut section, &mut label) {
                if let Ok(mut studio) = studio.try_borrow_mut() {
                    studio.render();
                }
            }
        });
    }

    fn dispatch(&self, event: impl Into<crate::widget::Event>) -> Result<(), JsError> {
        let mut studio = self.studio.try_borrow_mut().map_err(js_err)?;
        studio.dispatch(event).map(|_| ()).map_err(js_err)
    }

    fn set_field(&self, key: &str, value: JsValue) -> Result<(), JsError> {
        let value: Value = serde_wasm_bindgen::from_value(value).map_err(js_err)?;
        self.dispatch(FieldChange::new(key, value))
    }

    fn markup(&self) -> String {
        self.studio
            .try_borrow()
            .map(|s| s.markup().to_string())
            .unwrap_or_default()
    }

    fn values(&self) -> Result<JsValue, JsError> {
        let studio = self.studio.try_borrow().map_err(js_err)?;
        let values: BTreeMap<&str, Value> = studio.values().into_iter().collect();
        values
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(js_err)
    }

    fn copy(&self) -> js_sys::Promise {
        let document = self.document.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            Ok(JsValue::from_bool(copy_code(document).await))
        })
    }
}

/// The notice configurator mounted on the current page.
#[wasm_bindgen]
pub struct NoticeApp {
    inner: App<Notice>,
}

#[wasm_bindgen]
impl NoticeApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<NoticeApp, JsError> {
        Ok(Self {
            inner: App::mount()?,
        })
    }

    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&self, key: &str, value: JsValue) -> Result<(), JsError> {
        self.inner.set_field(key, value)
    }

    #[wasm_bindgen(js_name = resetToDefaults)]
    pub fn reset_to_defaults(&self) -> Result<(), JsError> {
        self.inner.dispatch(Action::ResetDefaults)
    }

    #[wasm_bindgen(js_name = resetColors)]
    pub fn reset_colors(&self) -> Result<(), JsError> {
        self.inner.dispatch(Action::ResetColors)
    }

    pub fn markup(&self) -> String {
        self.inner.markup()
    }

    pub fn values(&self) -> Result<JsValue, JsError> {
        self.inner.values()
    }

    /// Resolves to `true` when the code reached the clipboard.
    pub fn copy(&self) -> js_sys::Promise {
        self.inner.copy()
    }
}

/// The button configurator mounted on the current page.
#[wasm_bindgen]
pub struct ButtonApp {
    inner: App<Button>,
}

#[wasm_bindgen]
impl ButtonApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ButtonApp, JsError> {
        Ok(Self {
            inner: App::mount()?,
        })
    }

    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&self, key: &str, value: JsValue) -> Result<(), JsError> {
        self.inner.set_field(key, value)
    }

    #[wasm_bindgen(js_name = resetToDefaults)]
    pub fn reset_to_defaults(&self) -> Result<(), JsError> {
        self.inner.dispatch(Action::ResetDefaults)
    }

    pub fn markup(&self) -> String {
        self.inner.markup()
    }

    pub fn values(&self) -> Result<JsValue, JsError> {
        self.inner.values()
    }

    pub fn copy(&self) -> js_sys::Promise {
        self.inner.copy()
    }
}

//! The widget plugin trait and the typed edit events.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};
use crate::panel::Folder;
use crate::value::{Value, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Notice,
    Button,
}

impl WidgetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Notice => "notice",
            WidgetKind::Button => "button",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clickable panel action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ResetDefaults,
    ResetColors,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ResetDefaults => f.write_str("reset-defaults"),
            Action::ResetColors => f.write_str("reset-colors"),
        }
    }
}

/// "Set field `key` to `value`."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub key: String,
    pub value: Value,
}

impl FieldChange {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Everything a control panel can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Set(FieldChange),
    Action(Action),
}

impl From<FieldChange> for Event {
    fn from(change: FieldChange) -> Self {
        Event::Set(change)
    }
}

impl From<Action> for Event {
    fn from(action: Action) -> Self {
        Event::Action(action)
    }
}

/// A configurable widget: its snapshot, controls and renderer.
pub trait Widget {
    const KIND: WidgetKind;

    /// Everything the renderer reads.
    type State: Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + 'static;

    /// A fresh default snapshot.
    fn defaults() -> Self::State;

    /// The snapshot as ordered `(key, value)` pairs.
    fn values(state: &Self::State) -> Vec<(&'static str, Value)>;

    /// Write one field. On error `state` may be partially written; callers
    /// go through [`reduce`], which works on a copy.
    fn apply(state: &mut Self::State, key: &str, value: Value) -> Result<()>;

    fn perform(state: &mut Self::State, action: Action) -> Result<()>;

    /// Control panel layout.
    fn layout() -> Vec<Folder>;

    /// Render the HTML fragment. Pure and deterministic.
    fn render(state: &Self::State) -> String;

    /// Rebuild a deserialized snapshot by replaying its fields through
    /// [`Widget::apply`] onto the defaults, so loaded snapshots obey the
    /// same clamps and color checks as edits.
    fn validate(parsed: &Self::State) -> Result<Self::State> {
        let mut state = Self::defaults();
        for (key, value) in Self::values(parsed) {
            Self::apply(&mut state, key, value)?;
        }
        Ok(state)
    }
}

/// Produce the next snapshot for `event`, leaving `state` untouched.
pub fn reduce<W: Widget>(state: &W::State, event: &Event) -> Result<W::State> {
    let mut next = state.clone();
    match event {
        Event::Set(change) => W::apply(&mut next, &change.key, change.value.clone())?,
        Event::Action(action) => W::perform(&mut next, *action)?,
    }
    Ok(next)
}

/// The declared type of `key`, if the widget has such a field.
pub fn field_type<W: Widget>(state: &W::State, key: &str) -> Option<ValueType> {
    W::values(state)
        .into_iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.value_type())
}

pub(crate) fn unsupported<W: Widget>(action: Action) -> StudioError {
    StudioError::UnsupportedAction {
        action: action.to_string(),
        widget: W::KIND.to_string(),
    }
}

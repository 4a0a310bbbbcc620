//! Control panel schema and the binder seam.
//!
//! A widget describes its controls as a tree of [`Folder`]s. Any host that
//! can show a text field, slider, color picker, checkbox, dropdown and button
//! implements [`ControlPanel`]; [`mount`] walks the tree and binds each field
//! with its current value. Edits travel back as a single typed
//! [`Event`](crate::widget::Event), never as per-control callbacks.

use thiserror::Error;

use crate::value::{Value, ValueType};
use crate::widget::Action;

#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("panel container not found: {0}")]
    MissingContainer(String),
    #[error("field {0} is bound twice")]
    DuplicateBinding(String),
    #[error("cannot show a control for {key}: {reason}")]
    Unsupported { key: String, reason: String },
    #[error("{0}")]
    Host(String),
}

/// The interactive widget used for a field, with its options.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Text { multiline: bool, rows: u8 },
    Slider { min: f64, max: f64, step: f64 },
    Color,
    Checkbox,
    Select { options: Vec<(String, Value)> },
}

impl ControlKind {
    pub fn text() -> Self {
        ControlKind::Text {
            multiline: false,
            rows: 1,
        }
    }

    pub fn multiline(rows: u8) -> Self {
        ControlKind::Text {
            multiline: true,
            rows,
        }
    }

    pub fn slider(min: u32, max: u32, step: u32) -> Self {
        ControlKind::Slider {
            min: f64::from(min),
            max: f64::from(max),
            step: f64::from(step),
        }
    }

    /// Dropdown over pixel values, labelled by the number itself.
    pub fn pixel_options(values: &[u32]) -> Self {
        ControlKind::Select {
            options: values
                .iter()
                .map(|v| (v.to_string(), Value::from(*v)))
                .collect(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            ControlKind::Text { .. } | ControlKind::Color => ValueType::Text,
            ControlKind::Slider { .. } => ValueType::Number,
            ControlKind::Checkbox => ValueType::Bool,
            ControlKind::Select { options } => options
                .first()
                .map(|(_, v)| v.value_type())
                .unwrap_or(ValueType::Text),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::Text { multiline: true, .. } => "textarea",
            ControlKind::Text { .. } => "text",
            ControlKind::Slider { .. } => "slider",
            ControlKind::Color => "color",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Select { .. } => "select",
        }
    }
}

/// A named field bound to a control.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
}

/// A clickable action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionButton {
    pub action: Action,
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub title: &'static str,
    pub expanded: bool,
    pub bindings: Vec<Binding>,
    pub actions: Vec<ActionButton>,
    pub folders: Vec<Folder>,
}

impl Folder {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            expanded: true,
            bindings: Vec::new(),
            actions: Vec::new(),
            folders: Vec::new(),
        }
    }

    pub fn collapsed(mut self) -> Self {
        self.expanded = false;
        self
    }

    pub fn bind(mut self, key: &'static str, label: &'static str, kind: ControlKind) -> Self {
        self.bindings.push(Binding { key, label, kind });
        self
    }

    pub fn action(mut self, action: Action, title: &'static str) -> Self {
        self.actions.push(ActionButton { action, title });
        self
    }

    pub fn folder(mut self, folder: Folder) -> Self {
        self.folders.push(folder);
        self
    }

    /// Every binding in this folder and its subfolders, depth first.
    pub fn all_bindings(&self) -> Vec<&Binding> {
        let mut out: Vec<&Binding> = self.bindings.iter().collect();
        for sub in &self.folders {
            out.extend(sub.all_bindings());
        }
        out
    }
}

/// Capability set required from a control-panel host.
///
/// `path` is the chain of folder titles from the root down to the folder
/// the control lives in.
pub trait ControlPanel {
    fn add_folder(&mut self, path: &[&str], expanded: bool) -> Result<(), PanelError>;

    fn bind(&mut self, path: &[&str], binding: &Binding, current: &Value)
        -> Result<(), PanelError>;

    fn add_action(&mut self, path: &[&str], button: &ActionButton) -> Result<(), PanelError>;

    /// Push new values into the controls after a reset.
    fn refresh(&mut self, values: &[(&'static str, Value)]);
}

/// Build every folder, binding and action on `panel`. Returns the number of
/// fields bound.
pub fn mount(
    panel: &mut dyn ControlPanel,
    folders: &[Folder],
    values: &[(&'static str, Value)],
) -> Result<usize, PanelError> {
    let mut path = Vec::new();
    let mut count = 0;
    for folder in folders {
        count += mount_folder(panel, folder, values, &mut path)?;
    }
    Ok(count)
}

fn mount_folder<'a>(
    panel: &mut dyn ControlPanel,
    folder: &'a Folder,
    values: &[(&'static str, Value)],
    path: &mut Vec<&'a str>,
) -> Result<usize, PanelError> {
    path.push(folder.title);
    panel.add_folder(&path[..], folder.expanded)?;

    let mut count = 0;
    for binding in &folder.bindings {
        let current = values
            .iter()
            .find(|(k, _)| *k == binding.key)
            .map(|(_, v)| v)
            .ok_or_else(|| PanelError::Unsupported {
                key: binding.key.to_string(),
                reason: "no such field in the snapshot".to_string(),
            })?;
        panel.bind(&path[..], binding, current)?;
        count += 1;
    }
    for sub in &folder.folders {
        count += mount_folder(panel, sub, values, path)?;
    }
    for button in &folder.actions {
        panel.add_action(&path[..], button)?;
    }

    path.pop();
    Ok(count)
}

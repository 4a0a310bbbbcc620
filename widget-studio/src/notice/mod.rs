//! The notice widget: a callout box with icon, title, body, optional primary
//! action link and optional dismiss button.

mod render;
mod theme;


use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};
use crate::panel::{ControlKind, Folder};
use crate::value::{into_color, Value};
use crate::widget::{Action, Widget, WidgetKind};

pub use render::render;
pub use theme::{TypeStyle, TypeStyleTable};

/// Upper bound of the border width slider.
pub const MAX_BORDER_WIDTH: u32 = 6;

/// Choices offered by the radius dropdown.
pub const RADIUS_OPTIONS: [u32; 6] = [0, 4, 6, 8, 12, 16];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeType {
    Note,
    Warning,
    Hint,
    Question,
}

impl NoticeType {
    pub const ALL: [NoticeType; 4] = [
        NoticeType::Note,
        NoticeType::Warning,
        NoticeType::Hint,
        NoticeType::Question,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoticeType::Note => "note",
            NoticeType::Warning => "warning",
            NoticeType::Hint => "hint",
            NoticeType::Question => "question",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    fn title(self) -> &'static str {
        match self {
            NoticeType::Note => "Note",
            NoticeType::Warning => "Warning",
            NoticeType::Hint => "Hint",
            NoticeType::Question => "Question",
        }
    }
}

impl fmt::Display for NoticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NoticeParams {
    #[serde(rename = "type")]
    pub kind: NoticeType,
    pub title: String,
    pub body: String,
    pub show_icon: bool,
    pub primary_action_enabled: bool,
    pub primary_action_label: String,
    pub primary_action_url: String,
    pub primary_action_new_tab: bool,
    pub dismissible: bool,
    pub border_radius: u32,
    pub border_width: u32,
}

impl NoticeParams {
    pub fn defaults() -> Self {
        Self {
            kind: NoticeType::Note,
            title: "Important Notice".to_string(),
            body: "This is an important message that requires your attention. Please read carefully."
                .to_string(),
            show_icon: true,
            primary_action_enabled: true,
            primary_action_label: "Read more".to_string(),
            primary_action_url: "#".to_string(),
            primary_action_new_tab: false,
            dismissible: false,
            border_radius: 8,
            border_width: 2,
        }
    }
}

impl Default for NoticeParams {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Parameters plus the per-type style table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoticeState {
    pub params: NoticeParams,
    pub styles: TypeStyleTable,
}

pub struct Notice;

impl Widget for Notice {
    const KIND: WidgetKind = WidgetKind::Notice;
    type State = NoticeState;

    fn defaults() -> NoticeState {
        NoticeState {
            params: NoticeParams::defaults(),
            styles: TypeStyleTable::defaults(),
        }
    }

    fn values(state: &NoticeState) -> Vec<(&'static str, Value)> {
        let p = &state.params;
        let mut values = vec![
            ("type", Value::from(p.kind.as_str())),
            ("title", Value::from(p.title.as_str())),
            ("body", Value::from(p.body.as_str())),
            ("showIcon", Value::from(p.show_icon)),
            ("primaryActionEnabled", Value::from(p.primary_action_enabled)),
            ("primaryActionLabel", Value::from(p.primary_action_label.as_str())),
            ("primaryActionUrl", Value::from(p.primary_action_url.as_str())),
            ("primaryActionNewTab", Value::from(p.primary_action_new_tab)),
            ("dismissible", Value::from(p.dismissible)),
            ("borderRadius", Value::from(p.border_radius)),
            ("borderWidth", Value::from(p.border_width)),
        ];
        for kind in NoticeType::ALL {
            let (border_key, background_key) = color_keys(kind);
            let style = state.styles.get(kind);
            values.push((border_key, Value::from(style.border.as_str())));
            values.push((background_key, Value::from(style.background.as_str())));
        }
        values
    }

    fn apply(state: &mut NoticeState, key: &str, value: Value) -> Result<()> {
        let p = &mut state.params;
        match key {
            "type" => {
                let raw = value.into_text(key)?;
                p.kind = NoticeType::parse(&raw).ok_or_else(|| {
                    StudioError::invalid(key, format!("'{raw}' is not a notice type"))
                })?;
            }
            "title" => p.title = value.into_text(key)?,
            "body" => p.body = value.into_text(key)?,
            "showIcon" => p.show_icon = value.into_bool(key)?,
            "primaryActionEnabled" => p.primary_action_enabled = value.into_bool(key)?,
            "primaryActionLabel" => p.primary_action_label = value.into_text(key)?,
            "primaryActionUrl" => p.primary_action_url = value.into_text(key)?,
            "primaryActionNewTab" => p.primary_action_new_tab = value.into_bool(key)?,
            "dismissible" => p.dismissible = value.into_bool(key)?,
            "borderRadius" => p.border_radius = value.into_pixels(key)?,
            "borderWidth" => p.border_width = value.into_pixels(key)?.min(MAX_BORDER_WIDTH),
            _ => return apply_color(&mut state.styles, key, value),
        }
        Ok(())
    }

    fn perform(state: &mut NoticeState, action: Action) -> Result<()> {
        match action {
            Action::ResetDefaults => state.params = NoticeParams::defaults(),
            Action::ResetColors => state.styles = TypeStyleTable::defaults(),
        }
        Ok(())
    }

    fn layout() -> Vec<Folder> {
        let type_options = NoticeType::ALL
            .into_iter()
            .map(|t| (t.title().to_string(), Value::from(t.as_str())))
            .collect();

        let mut colors = Folder::new("Colors").collapsed();
        for kind in NoticeType::ALL {
            let (border_key, background_key) = color_keys(kind);
            colors = colors.folder(
                Folder::new(color_folder_title(kind))
                    .bind(border_key, "Border", ControlKind::Color)
                    .bind(background_key, "Background", ControlKind::Color),
            );
        }

        vec![
            Folder::new("Content")
                .bind("type", "type", ControlKind::Select { options: type_options })
                .bind("title", "title", ControlKind::text())
                .bind("body", "body", ControlKind::multiline(3)),
            colors,
            Folder::new("Primary Action")
                .bind("primaryActionEnabled", "Enabled", ControlKind::Checkbox)
                .bind("primaryActionLabel", "Label", ControlKind::text())
                .bind("primaryActionUrl", "URL", ControlKind::text())
                .bind("primaryActionNewTab", "New Tab", ControlKind::Checkbox),
            Folder::new("Style")
                .bind("dismissible", "Dismissible", ControlKind::Checkbox)
                .bind("showIcon", "Show Icon", ControlKind::Checkbox)
                .bind("borderRadius", "Radius", ControlKind::pixel_options(&RADIUS_OPTIONS))
                .bind(
                    "borderWidth",
                    "Border (px)",
                    ControlKind::slider(0, MAX_BORDER_WIDTH, 1),
                ),
            Folder::new("Utilities")
                .action(Action::ResetDefaults, "Reset to Defaults")
                .action(Action::ResetColors, "Reset Colors"),
        ]
    }

    fn render(state: &NoticeState) -> String {
        render(&state.params, &state.styles)
    }
}

fn color_keys(kind: NoticeType) -> (&'static str, &'static str) {
    match kind {
        NoticeType::Note => ("note.border", "note.background"),
        NoticeType::Warning => ("warning.border", "warning.background"),
        NoticeType::Hint => ("hint.border", "hint.background"),
        NoticeType::Question => ("question.border", "question.background"),
    }
}

fn color_folder_title(kind: NoticeType) -> &'static str {
    match kind {
        NoticeType::Note => "Note Colors",
        NoticeType::Warning => "Warning Colors",
        NoticeType::Hint => "Hint Colors",
        NoticeType::Question => "Question Colors",
    }
}

fn apply_color(styles: &mut TypeStyleTable, key: &str, value: Value) -> Result<()> {
    let (kind, part) = key
        .split_once('.')
        .and_then(|(kind, part)| NoticeType::parse(kind).map(|k| (k, part)))
        .ok_or_else(|| StudioError::unknown_field(key))?;
    let style = styles.get_mut(kind);
    match part {
        "border" => style.border = into_color(value, key)?,
        "background" => style.background = into_color(value, key)?,
        _ => return Err(StudioError::unknown_field(key)),
    }
    Ok(())
}

//! The settings drawer rendered as static HTML controls.

use std::collections::HashSet;

use crate::panel::{ActionButton, Binding, ControlKind, ControlPanel, PanelError};
use crate::value::Value;

use super::util::html_escape;

enum Item {
    Control { binding: Binding, value: Value },
    Action(ActionButton),
    Folder(usize),
}

struct FolderNode {
    path: Vec<String>,
    expanded: bool,
    items: Vec<Item>,
}

/// Collects folders and controls as they are mounted and writes them out
/// as nested `<details>` sections.
#[derive(Default)]
pub(super) struct HtmlPanel {
    folders: Vec<FolderNode>,
    roots: Vec<usize>,
    bound: HashSet<&'static str>,
}

impl HtmlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, path: &[&str]) -> Option<usize> {
        self.folders
            .iter()
            .position(|f| f.path.iter().map(String::as_str).eq(path.iter().copied()))
    }

    fn folder_mut(&mut self, path: &[&str]) -> Result<&mut FolderNode, PanelError> {
        let idx = self
            .find(path)
            .ok_or_else(|| PanelError::MissingContainer(path.join("/")))?;
        Ok(&mut self.folders[idx])
    }

    pub fn finish(&self) -> String {
        let mut html = String::new();
        for &idx in &self.roots {
            self.write_folder(idx, &mut html);
        }
        html
    }

    fn write_folder(&self, idx: usize, html: &mut String) {
        let folder = &self.folders[idx];
        let title = folder.path.last().map(String::as_str).unwrap_or_default();
        let open = if folder.expanded { " open" } else { "" };
        html.push_str(&format!(
            r#"<details class="pane-folder"{open}><summary>{}</summary>"#,
            html_escape(title)
        ));
        for item in &folder.items {
            match item {
                Item::Control { binding, value } => html.push_str(&control_html(binding, value)),
                Item::Action(button) => html.push_str(&format!(
                    r#"<button type="button" class="pane-action" data-action="{}">{}</button>"#,
                    button.action,
                    html_escape(button.title)
                )),
                Item::Folder(child) => self.write_folder(*child, html),
            }
        }
        html.push_str("</details>");
    }
}

impl ControlPanel for HtmlPanel {
    fn add_folder(&mut self, path: &[&str], expanded: bool) -> Result<(), PanelError> {
        let idx = self.folders.len();
        self.folders.push(FolderNode {
            path: path.iter().map(|s| s.to_string()).collect(),
            expanded,
            items: Vec::new(),
        });
        match path.split_last() {
            Some((_, [])) | None => self.roots.push(idx),
            Some((_, parent)) => self.folder_mut(parent)?.items.push(Item::Folder(idx)),
        }
        Ok(())
    }

    fn bind(&mut self, path: &[&str], binding: &Binding, current: &Value) -> Result<(), PanelError> {
        if !self.bound.insert(binding.key) {
            return Err(PanelError::DuplicateBinding(binding.key.to_string()));
        }
        self.folder_mut(path)?.items.push(Item::Control {
            binding: binding.clone(),
            value: current.clone(),
        });
        Ok(())
    }

    fn add_action(&mut self, path: &[&str], button: &ActionButton) -> Result<(), PanelError> {
        self.folder_mut(path)?.items.push(Item::Action(*button));
        Ok(())
    }

    fn refresh(&mut self, values: &[(&'static str, Value)]) {
        for folder in &mut self.folders {
            for item in &mut folder.items {
                if let Item::Control { binding, value } = item {
                    if let Some((_, v)) = values.iter().find(|(k, _)| *k == binding.key) {
                        *value = v.clone();
                    }
                }
            }
        }
    }
}

fn control_html(binding: &Binding, value: &Value) -> String {
    let key = binding.key;
    let ty = binding.kind.value_type();
    let text = html_escape(&value.to_string());
    let input = match &binding.kind {
        ControlKind::Text { multiline: true, rows } => format!(
            r#"<textarea data-key="{key}" data-type="{ty}" rows="{rows}">{text}</textarea>"#
        ),
        ControlKind::Text { .. } => {
            format!(r#"<input type="text" data-key="{key}" data-type="{ty}" value="{text}">"#)
        }
        ControlKind::Slider { min, max, step } => format!(
            r#"<input type="range" data-key="{key}" data-type="{ty}" min="{min}" max="{max}" step="{step}" value="{text}"><output>{text}</output>"#
        ),
        ControlKind::Color => {
            format!(r#"<input type="color" data-key="{key}" data-type="{ty}" value="{text}">"#)
        }
        ControlKind::Checkbox => {
            let checked = if *value == Value::Bool(true) { " checked" } else { "" };
            format!(r#"<input type="checkbox" data-key="{key}" data-type="{ty}"{checked}>"#)
        }
        ControlKind::Select { options } => {
            let mut html = format!(r#"<select data-key="{key}" data-type="{ty}">"#);
            for (label, option) in options {
                let selected = if option == value { " selected" } else { "" };
                html.push_str(&format!(
                    r#"<option value="{}"{selected}>{}</option>"#,
                    html_escape(&option.to_string()),
                    html_escape(label)
                ));
            }
            html.push_str("</select>");
            html
        }
    };
    format!(
        r#"<label class="pane-row" data-control="{}"><span class="pane-label">{}</span>{input}</label>"#,
        binding.kind.name(),
        html_escape(binding.label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::Button;
    use crate::notice::Notice;
    use crate::panel::{mount, Folder};
    use crate::widget::{Action, Widget};

    fn notice_panel() -> HtmlPanel {
        let mut panel = HtmlPanel::new();
        mount(&mut panel, &Notice::layout(), &Notice::values(&Notice::defaults())).unwrap();
        panel
    }

    #[test]
    fn every_notice_field_gets_a_control() {
        let html = notice_panel().finish();
        for (key, _) in Notice::values(&Notice::defaults()) {
            assert!(html.contains(&format!(r#"data-key="{key}""#)), "missing {key}");
        }
        assert!(html.contains(r#"data-action="reset-colors""#));
        assert!(html.contains(r#"data-action="reset-defaults""#));
    }

    #[test]
    fn nested_colors_folder_starts_closed() {
        let html = notice_panel().finish();
        assert!(html.contains(r#"<details class="pane-folder"><summary>Colors</summary><details class="pane-folder" open><summary>Note Colors</summary>"#));
    }

    #[test]
    fn current_values_are_shown() {
        let html = notice_panel().finish();
        assert!(html.contains(r#"<option value="note" selected>"#));
        assert!(html.contains(r#"<input type="checkbox" data-key="showIcon" data-type="boolean" checked>"#));
        assert!(html.contains(r#"<input type="checkbox" data-key="dismissible" data-type="boolean">"#));
        assert!(html.contains(r#"<option value="8" selected>8</option>"#));
    }

    #[test]
    fn refresh_updates_values() {
        let mut panel = HtmlPanel::new();
        mount(&mut panel, &Button::layout(), &Button::values(&Button::defaults())).unwrap();
        panel.refresh(&[("label", Value::from("<Go>"))]);
        let html = panel.finish();
        assert!(html.contains(r#"data-key="label" data-type="string" value="&lt;Go&gt;""#));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let layout = vec![Folder::new("A")
            .bind("title", "Title", ControlKind::text())
            .bind("title", "Again", ControlKind::text())];
        let mut panel = HtmlPanel::new();
        let err = mount(&mut panel, &layout, &[("title", Value::from("x"))]).unwrap_err();
        assert_eq!(err, PanelError::DuplicateBinding("title".into()));
    }

    #[test]
    fn action_without_folder_is_missing_container() {
        let mut panel = HtmlPanel::new();
        let button = ActionButton {
            action: Action::ResetDefaults,
            title: "Reset",
        };
        assert!(matches!(
            panel.add_action(&["Nowhere"], &button),
            Err(PanelError::MissingContainer(_))
        ));
    }
}

//! The button widget: a single call-to-action rendered as a `<button>`, or as
//! an `<a>` with identical styling when a link target is set.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};
use crate::markup::{html_escape, Fragment};
use crate::panel::{ControlKind, Folder};
use crate::style::{border, px_or_none, Style};
use crate::value::{into_color, Value};
use crate::widget::{unsupported, Action, Widget, WidgetKind};

pub const MAX_WIDTH: u32 = 480;
pub const MAX_HEIGHT: u32 = 120;
pub const MIN_FONT_SIZE: u32 = 10;
pub const MAX_FONT_SIZE: u32 = 40;
pub const MAX_RADIUS: u32 = 60;
pub const MAX_BORDER_WIDTH: u32 = 6;
pub const FONT_WEIGHTS: [u32; 4] = [400, 500, 600, 700];

const FONT_STACK: &str =
    "system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif";
const SHADOW: &str = "0 2px 6px rgba(0,0,0,0.15)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ButtonParams {
    pub label: String,
    pub href: String,
    pub new_tab: bool,
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub font_weight: u32,
    pub border_radius: u32,
    pub border_width: u32,
    pub border_color: String,
    pub background: String,
    pub color: String,
    pub shadow: bool,
}

impl ButtonParams {
    pub fn defaults() -> Self {
        Self {
            label: "Klik mig".to_string(),
            href: String::new(),
            new_tab: false,
            width: 160,
            height: 44,
            font_size: 16,
            font_weight: 600,
            border_radius: 8,
            border_width: 0,
            border_color: "#0550ae".to_string(),
            background: "#0969da".to_string(),
            color: "#ffffff".to_string(),
            shadow: true,
        }
    }
}

impl Default for ButtonParams {
    fn default() -> Self {
        Self::defaults()
    }
}

pub struct Button;

impl Widget for Button {
    const KIND: WidgetKind = WidgetKind::Button;
    type State = ButtonParams;

    fn defaults() -> ButtonParams {
        ButtonParams::defaults()
    }

    fn values(p: &ButtonParams) -> Vec<(&'static str, Value)> {
        vec![
            ("label", Value::from(p.label.as_str())),
            ("href", Value::from(p.href.as_str())),
            ("newTab", Value::from(p.new_tab)),
            ("width", Value::from(p.width)),
            ("height", Value::from(p.height)),
            ("fontSize", Value::from(p.font_size)),
            ("fontWeight", Value::from(p.font_weight)),
            ("borderRadius", Value::from(p.border_radius)),
            ("borderWidth", Value::from(p.border_width)),
            ("borderColor", Value::from(p.border_color.as_str())),
            ("background", Value::from(p.background.as_str())),
            ("color", Value::from(p.color.as_str())),
            ("shadow", Value::from(p.shadow)),
        ]
    }

    fn apply(p: &mut ButtonParams, key: &str, value: Value) -> Result<()> {
        match key {
            "label" => p.label = value.into_text(key)?,
            "href" => p.href = value.into_text(key)?.trim().to_string(),
            "newTab" => p.new_tab = value.into_bool(key)?,
            "width" => p.width = value.into_pixels(key)?.min(MAX_WIDTH),
            "height" => p.height = value.into_pixels(key)?.min(MAX_HEIGHT),
            "fontSize" => {
                p.font_size = value
                    .into_pixels(key)?
                    .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
            }
            "fontWeight" => {
                let weight = value.into_pixels(key)?;
                if !(100..=900).contains(&weight) || weight % 100 != 0 {
                    return Err(StudioError::invalid(
                        key,
                        format!("{weight} is not a CSS font weight"),
                    ));
                }
                p.font_weight = weight;
            }
            "borderRadius" => p.border_radius = value.into_pixels(key)?.min(MAX_RADIUS),
            "borderWidth" => p.border_width = value.into_pixels(key)?.min(MAX_BORDER_WIDTH),
            "borderColor" => p.border_color = into_color(value, key)?,
            "background" => p.background = into_color(value, key)?,
            "color" => p.color = into_color(value, key)?,
            "shadow" => p.shadow = value.into_bool(key)?,
            _ => return Err(StudioError::unknown_field(key)),
        }
        Ok(())
    }

    fn perform(state: &mut ButtonParams, action: Action) -> Result<()> {
        match action {
            Action::ResetDefaults => {
                *state = ButtonParams::defaults();
                Ok(())
            }
            Action::ResetColors => Err(unsupported::<Button>(action)),
        }
    }

    fn layout() -> Vec<Folder> {
        let weights = FONT_WEIGHTS
            .iter()
            .map(|w| (w.to_string(), Value::from(*w)))
            .collect();

        vec![
            Folder::new("Content")
                .bind("label", "Label", ControlKind::text())
                .bind("href", "Link (optional)", ControlKind::text())
                .bind("newTab", "New Tab", ControlKind::Checkbox),
            Folder::new("Size")
                .bind("width", "Width (px)", ControlKind::slider(0, MAX_WIDTH, 1))
                .bind("height", "Height (px)", ControlKind::slider(0, MAX_HEIGHT, 1))
                .bind(
                    "fontSize",
                    "Font Size",
                    ControlKind::slider(MIN_FONT_SIZE, MAX_FONT_SIZE, 1),
                )
                .bind("fontWeight", "Font Weight", ControlKind::Select { options: weights }),
            Folder::new("Style")
                .bind("background", "Background", ControlKind::Color)
                .bind("color", "Text", ControlKind::Color)
                .bind("borderRadius", "Radius", ControlKind::slider(0, MAX_RADIUS, 1))
                .bind(
                    "borderWidth",
                    "Border (px)",
                    ControlKind::slider(0, MAX_BORDER_WIDTH, 1),
                )
                .bind("borderColor", "Border Color", ControlKind::Color)
                .bind("shadow", "Shadow", ControlKind::Checkbox),
            Folder::new("Utilities").action(Action::ResetDefaults, "Reset to Defaults"),
        ]
    }

    fn render(state: &ButtonParams) -> String {
        render(state)
    }
}

/// Inline style shared by the `<button>` and `<a>` forms.
fn button_style(p: &ButtonParams) -> Style {
    Style::new()
        .with("display", "inline-block")
        .with("boxSizing", "border-box")
        .maybe("width", px_or_none(p.width))
        .maybe("height", px_or_none(p.height))
        .maybe("lineHeight", px_or_none(p.height.saturating_sub(2 * p.border_width)))
        .with("padding", "0 16px")
        .with("fontFamily", FONT_STACK)
        .with("fontSize", format!("{}px", p.font_size))
        .with("fontWeight", p.font_weight)
        .with("textAlign", "center")
        .with("textDecoration", "none")
        .with("whiteSpace", "nowrap")
        .with("border", border(p.border_width, &p.border_color))
        .with("borderRadius", format!("{}px", p.border_radius))
        .with("background", &p.background)
        .with("color", &p.color)
        .with("cursor", "pointer")
        .maybe("boxShadow", p.shadow.then_some(SHADOW))
}

/// Render the button fragment. An empty `href` yields a `<button>`.
pub fn render(p: &ButtonParams) -> String {
    let css = button_style(p).to_css();
    let label = html_escape(&p.label);

    let mut out = Fragment::new();
    if p.href.is_empty() {
        out.text_block(
            0,
            format!(r#"<button type="button" data-widget="button" style="{css}">"#),
            &label,
            "</button>",
        );
    } else {
        let target = if p.new_tab {
            r#" target="_blank" rel="noopener noreferrer""#
        } else {
            ""
        };
        out.text_block(
            0,
            format!(
                r#"<a data-widget="button" href="{}"{target} style="{css}">"#,
                html_escape(&p.href)
            ),
            &label,
            "</a>",
        );
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{reduce, Event, FieldChange};

    fn with(changes: &[(&str, Value)]) -> ButtonParams {
        let mut p = ButtonParams::defaults();
        for (key, value) in changes {
            Button::apply(&mut p, key, value.clone()).expect("apply should succeed");
        }
        p
    }

    fn style_of(html: &str) -> &str {
        let start = html.find("style=\"").expect("style attribute") + 7;
        let end = start + html[start..].find('"').expect("closing quote");
        &html[start..end]
    }

    #[test]
    fn default_button_is_a_button_element() {
        let html = render(&ButtonParams::defaults());
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(r#"<button type="button" data-widget="button" style=""#));
        assert_eq!(lines[1], "  Klik mig");
        assert_eq!(lines[2], "</button>");
        assert!(!html.contains("<a "));
        assert!(!html.contains("href"));

        let css = style_of(&html);
        assert!(css.contains("width:160px"));
        assert!(css.contains("height:44px"));
        assert!(css.contains("line-height:44px"));
        assert!(css.contains("border-radius:8px"));
        assert!(css.contains("background:#0969da"));
        assert!(css.contains("color:#ffffff"));
        assert!(css.contains("border:none"));
        assert!(css.contains("box-shadow:0 2px 6px rgba(0,0,0,0.15)"));
    }

    #[test]
    fn shadow_flag_drops_declaration() {
        let html = render(&with(&[("shadow", Value::Bool(false))]));
        assert!(!html.contains("box-shadow"));
    }

    #[test]
    fn href_renders_anchor_with_same_style() {
        let button = render(&ButtonParams::defaults());
        let link = render(&with(&[("href", Value::from("https://example.com/?a=1&b=2"))]));
        assert!(link.starts_with(r#"<a data-widget="button" href="https://example.com/?a=1&amp;b=2" style=""#));
        assert!(link.ends_with("</a>"));
        assert!(!link.contains("<button"));
        assert!(!link.contains("target="));
        assert_eq!(style_of(&button), style_of(&link));
    }

    #[test]
    fn new_tab_only_applies_to_links() {
        let button = render(&with(&[("newTab", Value::Bool(true))]));
        assert!(!button.contains("target="));

        let link = render(&with(&[
            ("href", Value::from("/signup")),
            ("newTab", Value::Bool(true)),
        ]));
        assert!(link.contains(r#"href="/signup" target="_blank" rel="noopener noreferrer" style=""#));
    }

    #[test]
    fn whitespace_href_stays_a_button() {
        let html = render(&with(&[("href", Value::from("   "))]));
        assert!(html.starts_with("<button"));
    }

    #[test]
    fn zero_sizes_suppress_declarations() {
        let html = render(&with(&[
            ("width", Value::Number(0.0)),
            ("height", Value::Number(0.0)),
        ]));
        let css = style_of(&html);
        assert!(!css.contains("width:"));
        assert!(!css.contains("height:"));
        assert!(!css.contains("line-height"));
    }

    #[test]
    fn border_width_renders_shorthand_and_shrinks_line_height() {
        let css_html = render(&with(&[("borderWidth", Value::Number(2.0))]));
        let css = style_of(&css_html);
        assert!(css.contains("border:2px solid #0550ae"));
        assert!(css.contains("line-height:40px"));
        assert!(!css.contains("border-width"));
    }

    #[test]
    fn label_is_escaped() {
        let html = render(&with(&[("label", Value::from("<b>\"Go\" & 'now'</b>"))]));
        assert!(html.contains("&lt;b&gt;&quot;Go&quot; &amp; &#39;now&#39;&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn sliders_clamp_and_weights_validate() {
        let p = with(&[
            ("width", Value::Number(9000.0)),
            ("fontSize", Value::Number(2.0)),
        ]);
        assert_eq!(p.width, MAX_WIDTH);
        assert_eq!(p.font_size, MIN_FONT_SIZE);

        let state = ButtonParams::defaults();
        for change in [
            FieldChange::new("fontWeight", Value::Number(650.0)),
            FieldChange::new("background", "blue"),
            FieldChange::new("shadow", "yes"),
            FieldChange::new("missing", 1u32),
        ] {
            assert!(reduce::<Button>(&state, &Event::Set(change)).is_err());
        }
    }

    #[test]
    fn reset_colors_is_unsupported() {
        let err = reduce::<Button>(&ButtonParams::defaults(), &Event::Action(Action::ResetColors))
            .unwrap_err();
        assert!(matches!(err, StudioError::UnsupportedAction { .. }));
        assert_eq!(err.to_string(), "reset-colors is not supported by the button widget");
    }

    #[test]
    fn reset_defaults_matches_initial_render() {
        let initial = render(&Button::defaults());
        let edited = with(&[("label", Value::from("Buy")), ("width", Value::Number(0.0))]);
        let reset = reduce::<Button>(&edited, &Event::Action(Action::ResetDefaults)).unwrap();
        assert_eq!(render(&reset), initial);
    }
}

use crate::markup::{html_escape, Fragment};
use crate::style::{border, Style};

use super::{NoticeParams, TypeStyle, TypeStyleTable};

const FONT_STACK: &str =
    "system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif";

/// Render the notice as an indented, inline-styled HTML fragment.
pub fn render(params: &NoticeParams, styles: &TypeStyleTable) -> String {
    let style = styles.get(params.kind);

    let container = Style::new()
        .with("position", "relative")
        .with("display", "block")
        .with("boxSizing", "border-box")
        .with("fontFamily", FONT_STACK)
        .with("color", "#1f2328")
        .with("lineHeight", "1.45")
        .with("padding", "16px")
        .with("background", &style.background)
        .with("border", border(params.border_width, &style.border))
        .with("borderRadius", format!("{}px", params.border_radius))
        .with("boxShadow", "0 2px 8px rgba(0,0,0,0.05)")
        .with("maxWidth", "600px")
        .with("width", "100%")
        .with("margin", 0);

    let mut out = Fragment::new();
    out.line(
        0,
        format!(
            r#"<div data-widget="notice" data-type="{}" style="{}">"#,
            params.kind,
            container.to_css()
        ),
    );
    if params.dismissible {
        out.line(1, dismiss_button());
    }
    row(&mut out, params, style);
    out.line(0, "</div>");
    out.finish()
}

fn dismiss_button() -> String {
    let css = Style::new()
        .with("position", "absolute")
        .with("top", "6px")
        .with("right", "6px")
        .with("width", "28px")
        .with("height", "28px")
        .with("border", "1px solid rgba(0,0,0,0.15)")
        .with("background", "rgba(255,255,255,0.65)")
        .with("backdropFilter", "blur(4px)")
        .with("borderRadius", "6px")
        .with("cursor", "pointer")
        .with("fontSize", "16px")
        .with("lineHeight", 1)
        .with("display", "flex")
        .with("alignItems", "center")
        .with("justifyContent", "center")
        .to_css();

    format!(
        r#"<button type="button" data-role="notice-dismiss" aria-label="Dismiss" style="{css}" onclick="this.closest('[data-widget=notice]')?.remove()">×</button>"#
    )
}

fn row(out: &mut Fragment, params: &NoticeParams, style: &TypeStyle) {
    let css = Style::new()
        .with("display", "flex")
        .with("alignItems", "flex-start")
        .with("gap", "12px")
        .to_css();

    out.line(1, format!(r#"<div data-role="row" style="{css}">"#));
    if params.show_icon {
        let icon_css = Style::new()
            .with("fontSize", "20px")
            .with("lineHeight", 1)
            .with("marginTop", "2px")
            .to_css();
        out.text_block(
            2,
            format!(r#"<div data-role="icon" style="{icon_css}">"#),
            &html_escape(&style.icon),
            "</div>",
        );
    }
    content(out, params, style);
    out.line(1, "</div>");
}

fn content(out: &mut Fragment, params: &NoticeParams, style: &TypeStyle) {
    let css = Style::new().with("flex", 1).with("minWidth", 0).to_css();
    out.line(2, format!(r#"<div data-role="content" style="{css}">"#));

    let title_css = Style::new()
        .with("margin", "0 0 8px 0")
        .with("fontWeight", 600)
        .with("fontSize", "16px")
        .with("lineHeight", 1.3)
        .to_css();
    out.text_block(
        3,
        format!(r#"<div data-role="title" style="{title_css}">"#),
        &html_escape(&params.title),
        "</div>",
    );

    let body_css = Style::new()
        .with("margin", "0 0 12px 0")
        .with("fontSize", "14px")
        .to_css();
    out.text_block(
        3,
        format!(r#"<div data-role="body" style="{body_css}">"#),
        &html_escape(&params.body),
        "</div>",
    );

    if params.primary_action_enabled {
        actions(out, params, style);
    }
    out.line(2, "</div>");
}

fn actions(out: &mut Fragment, params: &NoticeParams, style: &TypeStyle) {
    let css = Style::new()
        .with("margin", 0)
        .with("display", "flex")
        .with("gap", "8px")
        .to_css();
    out.line(3, format!(r#"<div data-role="actions" style="{css}">"#));

    let link_css = Style::new()
        .with("display", "inline-block")
        .with("fontSize", "14px")
        .with("lineHeight", 1.2)
        .with("textDecoration", "none")
        .with("padding", "6px 12px")
        .with("border", format!("1px solid {}", style.border))
        .with("background", "#ffffff")
        .with("color", &style.border)
        .with("borderRadius", "6px")
        .with("cursor", "pointer")
        .with("fontWeight", 500)
        .to_css();

    let url = if params.primary_action_url.is_empty() {
        "#"
    } else {
        params.primary_action_url.as_str()
    };
    let target = if params.primary_action_new_tab {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    out.text_block(
        4,
        format!(
            r#"<a data-role="action-primary" href="{}"{target} style="{link_css}">"#,
            html_escape(url)
        ),
        &html_escape(&params.primary_action_label),
        "</a>",
    );
    out.line(3, "</div>");
}

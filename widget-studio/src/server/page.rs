use super::css::build_css;
use super::inline_js::build_inline_js;
use super::util::html_escape;
use crate::widget::WidgetKind;

pub(super) fn build_studio_page(
    kind: WidgetKind,
    markup: &str,
    controls_html: &str,
    values_json: &str,
) -> String {
    let css = build_css();
    let inline_js = build_inline_js(values_json);
    let code = html_escape(markup);
    let controls = if controls_html.is_empty() {
        r#"<p class="pane-row">Controls unavailable.</p>"#
    } else {
        controls_html
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Widget Studio — {kind}</title>
<style>
{css}
</style>
</head>
<body>
<div class="toolbar">
  <span class="label">widget studio</span>
  <span class="kind">{kind}</span>
  <span class="error" id="edit-error" role="status"></span>
</div>
<main>
  <section id="widget-preview">
    <div class="section-header">Preview</div>
    <div class="section-content">{markup}</div>
  </section>
  <section id="code-output" aria-hidden="false">
    <div class="section-header">
      <span>HTML</span>
      <div class="actions">
        <button type="button" class="copy-button">Copy</button>
        <button type="button" id="toggle-code-btn" aria-expanded="true" aria-controls="code-output">Hide Code</button>
      </div>
    </div>
    <pre class="code-content">{code}</pre>
  </section>
</main>
<button type="button" id="floating-controls-toggle" aria-expanded="false" aria-controls="controls-panel">Settings</button>
<aside id="controls-panel" aria-label="Widget settings">
  <div class="controls-header">
    <span>Settings</span>
    <button type="button" id="close-controls" aria-label="Close settings">&times;</button>
  </div>
  {controls}
</aside>
{inline_js}
</body>
</html>"##
    )
}

pub(super) fn build_error_page(kind: WidgetKind, error: &str) -> String {
    let escaped = html_escape(error);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Widget Studio — Error</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  html, body {{ width: 100%; height: 100%; background: #f6f8fa; color: #1f2328;
    font-family: system-ui, sans-serif; }}
  .error-container {{
    max-width: 640px; margin: 80px auto; padding: 32px;
    border: 1px solid #ffcecb; border-radius: 8px; background: #ffebe9;
  }}
  .error-header {{ margin-bottom: 16px; font-size: 14px; color: #cf222e; }}
  .error-message {{
    font-family: ui-monospace, monospace; font-size: 12px; line-height: 1.7;
    white-space: pre-wrap; word-break: break-word;
    padding: 16px; background: #ffffff; border-radius: 4px;
    border-left: 3px solid #cf222e;
  }}
  .pulse {{ margin-top: 24px; font-size: 12px; color: #656d76; }}
</style>
</head>
<body>
<div class="error-container">
  <div class="error-header">{kind} snapshot could not be loaded</div>
  <div class="error-message">{escaped}</div>
  <div class="pulse">waiting for fix...</div>
</div>
</body>
</html>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_carries_fixed_dom_ids() {
        let html = build_studio_page(WidgetKind::Button, "<button>x</button>", "<details></details>", "{}");
        for id in [
            "widget-preview",
            "code-output",
            "toggle-code-btn",
            "floating-controls-toggle",
            "controls-panel",
            "close-controls",
        ] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
        assert!(html.contains(r#"<div class="section-content"><button>x</button></div>"#));
        assert!(html.contains(r#"<pre class="code-content">&lt;button&gt;x&lt;/button&gt;</pre>"#));
    }

    #[test]
    fn missing_controls_degrade() {
        let html = build_studio_page(WidgetKind::Notice, "<div></div>", "", "{}");
        assert!(html.contains("Controls unavailable."));
    }

    #[test]
    fn error_page_escapes() {
        let html = build_error_page(WidgetKind::Notice, "expected `<`");
        assert!(html.contains("expected `&lt;`"));
    }
}

pub(super) fn build_css() -> String {
    r#"* { margin: 0; padding: 0; box-sizing: border-box; }
html, body { width: 100%; min-height: 100%; background: #f6f8fa; color: #1f2328;
  font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif; font-size: 14px; }
body { transition: padding-right 0.2s; }
body.controls-open { padding-right: 340px; }

/* ── Header ──────────────────────────────────────── */
.toolbar {
  height: 44px; display: flex; align-items: center; gap: 10px; padding: 0 16px;
  border-bottom: 1px solid #d0d7de; background: #ffffff; user-select: none;
}
.toolbar .label { color: #656d76; }
.toolbar .kind { font-weight: 600; }
.toolbar .error { margin-left: auto; color: #cf222e; font-size: 12px; }

/* ── Sections ────────────────────────────────────── */
main { max-width: 760px; margin: 24px auto; padding: 0 16px; display: grid; gap: 16px; }
section { background: #ffffff; border: 1px solid #d0d7de; border-radius: 8px; overflow: hidden; }
.section-header {
  display: flex; align-items: center; gap: 8px; padding: 8px 12px;
  border-bottom: 1px solid #d0d7de; font-size: 12px; color: #656d76;
}
.section-header .actions { margin-left: auto; display: flex; gap: 6px; }
.section-header button {
  background: #f6f8fa; border: 1px solid #d0d7de; border-radius: 6px;
  padding: 3px 10px; font: inherit; cursor: pointer;
}
.section-header button:hover { background: #eaeef2; }
.copy-button.copied { color: #1a7f37; border-color: #1a7f37; }
.section-content { padding: 24px; }
#code-output.collapsed .code-content { display: none; }
.code-content {
  display: block; padding: 16px; margin: 0; overflow-x: auto; white-space: pre;
  font-family: ui-monospace, 'JetBrains Mono', monospace; font-size: 12px;
  background: #0d1117; color: #e6edf3;
}

/* ── Floating controls ───────────────────────────── */
#floating-controls-toggle {
  position: fixed; right: 16px; bottom: 16px; z-index: 20;
  padding: 10px 14px; border-radius: 20px; border: 1px solid #d0d7de;
  background: #ffffff; box-shadow: 0 2px 8px rgba(0,0,0,0.1); cursor: pointer; font: inherit;
}
#controls-panel {
  position: fixed; top: 0; right: 0; bottom: 0; width: 340px; z-index: 30;
  background: #ffffff; border-left: 1px solid #d0d7de; overflow-y: auto;
  transform: translateX(100%); transition: transform 0.2s;
}
#controls-panel.open { transform: none; }
.controls-header {
  display: flex; align-items: center; justify-content: space-between;
  padding: 10px 12px; border-bottom: 1px solid #d0d7de; font-weight: 600;
}
#close-controls { border: none; background: none; font-size: 18px; cursor: pointer; }

/* ── Panel controls ──────────────────────────────── */
.pane-folder { border-bottom: 1px solid #eaeef2; }
.pane-folder .pane-folder { margin-left: 10px; border-bottom: none; }
.pane-folder summary { padding: 8px 12px; cursor: pointer; font-weight: 600; font-size: 12px; }
.pane-row {
  display: grid; grid-template-columns: 110px 1fr auto; align-items: center; gap: 8px;
  padding: 4px 12px; font-size: 12px;
}
.pane-label { color: #656d76; }
.pane-row input[type=text], .pane-row textarea, .pane-row select {
  width: 100%; font: inherit; padding: 3px 6px; border: 1px solid #d0d7de; border-radius: 4px;
}
.pane-row output { min-width: 24px; text-align: right; color: #656d76; }
.pane-action {
  display: block; width: calc(100% - 24px); margin: 6px 12px; padding: 5px;
  font: inherit; border: 1px solid #d0d7de; border-radius: 6px; background: #f6f8fa; cursor: pointer;
}
"#
    .to_string()
}

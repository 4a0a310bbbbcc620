use crate::clipboard::{COPIED_CLASS, COPIED_LABEL, FAILED_LABEL, FEEDBACK_DURATION};

use super::util::json_inline;

pub(super) fn build_inline_js(values_json: &str) -> String {
    let feedback_ms = FEEDBACK_DURATION.as_millis();
    let copied = json_inline(COPIED_LABEL);
    let failed = json_inline(FAILED_LABEL);
    let copied_class = json_inline(COPIED_CLASS);

    format!(
        r#"<script>
(function() {{
  var values = {values_json};
  var preview = document.querySelector('#widget-preview .section-content');
  var code = document.querySelector('#code-output .code-content');
  var errorBox = document.getElementById('edit-error');

  // ── Render ──────────────────────────────────────
  function show(resp) {{
    if (preview) preview.innerHTML = resp.markup;
    if (code) code.textContent = resp.markup;
    if (errorBox) errorBox.textContent = resp.error || '';
    if (resp.values) {{
      values = resp.values;
      syncControls();
    }}
  }}

  function post(url, body) {{
    return fetch(url, {{
      method: 'POST',
      headers: {{ 'Content-Type': 'application/json' }},
      body: JSON.stringify(body)
    }}).then(function(r) {{ return r.json(); }}).then(show).catch(function(e) {{
      if (errorBox) errorBox.textContent = String(e);
    }});
  }}

  // ── Controls ────────────────────────────────────
  function readControl(el) {{
    var ty = el.getAttribute('data-type');
    if (ty === 'boolean') return el.checked;
    if (ty === 'number') return parseFloat(el.value);
    return el.value;
  }}

  function syncControls() {{
    document.querySelectorAll('[data-key]').forEach(function(el) {{
      var key = el.getAttribute('data-key');
      if (!(key in values) || el === document.activeElement) return;
      var v = values[key];
      if (el.type === 'checkbox') el.checked = !!v;
      else if (el.value !== String(v)) el.value = String(v);
      var out = el.parentNode.querySelector('output');
      if (out) out.textContent = String(v);
    }});
  }}

  document.querySelectorAll('[data-key]').forEach(function(el) {{
    var evt = (el.type === 'checkbox' || el.tagName === 'SELECT') ? 'change' : 'input';
    el.addEventListener(evt, function() {{
      var out = el.parentNode.querySelector('output');
      if (out) out.textContent = el.value;
      post('/edit', {{ key: el.getAttribute('data-key'), value: readControl(el) }});
    }});
  }});

  document.querySelectorAll('[data-action]').forEach(function(el) {{
    el.addEventListener('click', function() {{
      post('/action', {{ action: el.getAttribute('data-action') }});
    }});
  }});

  // ── Copy ────────────────────────────────────────
  function selectionCopy(text) {{
    var ta = document.createElement('textarea');
    ta.value = text;
    ta.setAttribute('readonly', '');
    ta.style.position = 'fixed';
    ta.style.opacity = '0';
    document.body.appendChild(ta);
    ta.select();
    var ok = false;
    try {{ ok = document.execCommand('copy'); }} catch (e) {{ ok = false; }}
    document.body.removeChild(ta);
    return ok;
  }}

  function feedback(button, ok) {{
    var original = button.textContent;
    button.textContent = ok ? {copied} : {failed};
    button.classList.toggle({copied_class}, ok);
    setTimeout(function() {{
      button.textContent = original;
      button.classList.remove({copied_class});
    }}, {feedback_ms});
  }}

  var copyButton = document.querySelector('.copy-button');
  if (copyButton) {{
    copyButton.addEventListener('click', function() {{
      if (!code) return;
      var text = code.textContent;
      if (navigator.clipboard && navigator.clipboard.writeText) {{
        navigator.clipboard.writeText(text).then(
          function() {{ feedback(copyButton, true); }},
          function() {{ feedback(copyButton, false); }}
        );
      }} else {{
        feedback(copyButton, selectionCopy(text));
      }}
    }});
  }}

  // ── Code toggle ─────────────────────────────────
  var codeSection = document.getElementById('code-output');
  var toggleButton = document.getElementById('toggle-code-btn');
  if (codeSection && toggleButton) {{
    toggleButton.addEventListener('click', function() {{
      var expanded = !codeSection.classList.toggle('collapsed');
      toggleButton.setAttribute('aria-expanded', String(expanded));
      codeSection.setAttribute('aria-hidden', String(!expanded));
      toggleButton.textContent = expanded ? 'Hide Code' : 'Show Code';
      if (expanded) fetch('/markup.html').then(function(r) {{ return r.text(); }}).then(function(m) {{
        if (code) code.textContent = m;
      }});
    }});
  }}

  // ── Floating controls ───────────────────────────
  var floatingToggle = document.getElementById('floating-controls-toggle');
  var panel = document.getElementById('controls-panel');
  var closeButton = document.getElementById('close-controls');
  function setControlsOpen(open) {{
    panel.classList.toggle('open', open);
    floatingToggle.setAttribute('aria-expanded', String(open));
    document.body.classList.toggle('controls-open', open);
  }}
  if (floatingToggle && panel && closeButton) {{
    floatingToggle.addEventListener('click', function() {{
      setControlsOpen(!panel.classList.contains('open'));
    }});
    closeButton.addEventListener('click', function() {{ setControlsOpen(false); }});
  }}
}})();
</script>"#
    )
}

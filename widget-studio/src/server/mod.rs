use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use notify::{Event as FsEvent, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use tower_livereload::LiveReloadLayer;
use tracing::{info, warn};

use crate::studio::Studio;
use crate::value::Value;
use crate::widget::{Action, Event, FieldChange, Widget};

mod css;
mod inline_js;
mod page;
mod panels;
pub(crate) mod util;

use panels::HtmlPanel;

struct DevState<W: Widget> {
    studio: Studio<W>,
    params_path: Option<PathBuf>,
    load_error: Option<String>,
}

type Shared<W> = Arc<Mutex<DevState<W>>>;

impl<W: Widget> DevState<W> {
    fn new(params_path: Option<PathBuf>) -> Self {
        let mut state = Self {
            studio: Studio::headless(),
            params_path,
            load_error: None,
        };
        state.reload();
        state
    }

    /// Re-read the snapshot file. A bad file keeps the last good snapshot.
    fn reload(&mut self) {
        let Some(path) = &self.params_path else {
            return;
        };
        let loaded = read_snapshot::<W>(path)
            .and_then(|snapshot| self.studio.replace_state(snapshot).map_err(|e| e.to_string()));
        match loaded {
            Ok(()) => {
                self.load_error = None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "snapshot reload failed");
                self.load_error = Some(e);
            }
        }
    }
}

fn read_snapshot<W: Widget>(path: &Path) -> Result<W::State, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("Read error: {e}"))?;
    crate::load_state::<W>(&json).map_err(|e| e.to_string())
}

/// Start the dev server for widget `W`. With `params_path`, the snapshot is
/// loaded from that JSON file and the page reloads whenever it changes.
pub async fn run_dev_server<W: Widget + 'static>(
    params_path: Option<PathBuf>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let state: Shared<W> = Arc::new(Mutex::new(DevState::new(params_path.clone())));

    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    // File watcher
    let _watcher = match &params_path {
        Some(path) => {
            let watched = path.clone();
            let watch_state = Arc::clone(&state);
            let mut watcher = notify::recommended_watcher(move |res: Result<FsEvent, _>| {
                let Ok(event) = res else { return };
                if !event.kind.is_modify() && !event.kind.is_create() {
                    return;
                }
                if !event.paths.iter().any(|p| p.file_name() == watched.file_name()) {
                    return;
                }
                if let Ok(mut s) = watch_state.lock() {
                    s.reload();
                }
                reloader.reload();
            })?;
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
            Some(watcher)
        }
        None => None,
    };

    let app = Router::new()
        .route("/", get(serve_page::<W>))
        .route("/markup.html", get(serve_markup::<W>))
        .route("/edit", post(serve_edit::<W>))
        .route("/action", post(serve_action::<W>))
        .layer(livereload)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let kind = W::KIND;
    eprintln!("widget studio dev server");
    eprintln!("  widget:  {kind}");
    if let Some(path) = &params_path {
        eprintln!("  params:  {}", path.display());
    }
    eprintln!("  studio:  http://localhost:{port}/");
    eprintln!("  markup:  http://localhost:{port}/markup.html");
    info!(%addr, widget = %kind, "dev server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Route handlers ────────────────────────────────────────────────────

/// Serve the configurator: preview, code pane and settings drawer.
async fn serve_page<W: Widget + 'static>(State(state): State<Shared<W>>) -> Html<String> {
    let s = match state.lock() {
        Ok(s) => s,
        Err(e) => return Html(page::build_error_page(W::KIND, &format!("Lock error: {e}"))),
    };
    if let Some(e) = &s.load_error {
        return Html(page::build_error_page(W::KIND, e));
    }
    let mut panel = HtmlPanel::new();
    let controls = if s.studio.attach_panel(&mut panel) {
        panel.finish()
    } else {
        String::new()
    };
    let values = util::json_inline(&util::values_map(s.studio.values()));
    Html(page::build_studio_page(
        W::KIND,
        s.studio.markup(),
        &controls,
        &values,
    ))
}

/// The bare fragment, as it would be pasted elsewhere.
async fn serve_markup<W: Widget + 'static>(State(state): State<Shared<W>>) -> Html<String> {
    Html(
        state
            .lock()
            .map(|s| s.studio.markup().to_string())
            .unwrap_or_default(),
    )
}

// ── POST /edit and /action ────────────────────────────────────────────

#[derive(Deserialize)]
struct ActionRequest {
    action: Action,
}

#[derive(Serialize)]
struct EditResponse {
    markup: String,
    values: BTreeMap<&'static str, Value>,
    error: Option<String>,
}

async fn serve_edit<W: Widget + 'static>(
    State(state): State<Shared<W>>,
    axum::Json(change): axum::Json<FieldChange>,
) -> axum::Json<EditResponse> {
    axum::Json(dispatch(&state, change))
}

async fn serve_action<W: Widget + 'static>(
    State(state): State<Shared<W>>,
    axum::Json(req): axum::Json<ActionRequest>,
) -> axum::Json<EditResponse> {
    axum::Json(dispatch(&state, req.action))
}

fn dispatch<W: Widget>(state: &Shared<W>, event: impl Into<Event>) -> EditResponse {
    let mut s = match state.lock() {
        Ok(s) => s,
        Err(e) => {
            return EditResponse {
                markup: String::new(),
                values: BTreeMap::new(),
                error: Some(format!("Lock error: {e}")),
            }
        }
    };
    let error = s.studio.dispatch(event).err().map(|e| e.to_string());
    EditResponse {
        markup: s.studio.markup().to_string(),
        values: util::values_map(s.studio.values()),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::Button;
    use crate::notice::Notice;

    fn shared<W: Widget>() -> Shared<W> {
        Arc::new(Mutex::new(DevState::new(None)))
    }

    #[test]
    fn edit_returns_fresh_markup_and_values() {
        let state = shared::<Notice>();
        let resp = dispatch(&state, FieldChange::new("title", "Edited"));
        assert!(resp.error.is_none());
        assert!(resp.markup.contains("Edited"));
        assert_eq!(resp.values["title"], Value::from("Edited"));
    }

    #[test]
    fn rejected_edit_reports_error_and_keeps_markup() {
        let state = shared::<Button>();
        let before = state.lock().unwrap().studio.markup().to_string();
        let resp = dispatch(&state, FieldChange::new("background", "blue"));
        assert!(resp.error.unwrap().contains("background"));
        assert_eq!(resp.markup, before);
    }

    #[test]
    fn unsupported_action_is_an_error_response() {
        let state = shared::<Button>();
        let resp = dispatch(&state, Action::ResetColors);
        assert!(resp.error.is_some());
    }

    #[test]
    fn request_bodies_deserialize() {
        let change: FieldChange =
            serde_json::from_str(r#"{"key":"borderWidth","value":3}"#).unwrap();
        assert_eq!(change, FieldChange::new("borderWidth", 3u32));
        let req: ActionRequest = serde_json::from_str(r#"{"action":"reset-colors"}"#).unwrap();
        assert_eq!(req.action, Action::ResetColors);
    }

    #[test]
    fn bad_snapshot_file_is_reported() {
        let dir = std::env::temp_dir().join(format!("widget-studio-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let state = DevState::<Notice>::new(Some(path.clone()));
        assert!(state.load_error.is_some());
        assert_eq!(state.studio.markup(), Notice::render(&Notice::defaults()));

        std::fs::write(&path, r#"{"params":{"title":"From disk"}}"#).unwrap();
        let mut state = state;
        state.reload();
        assert!(state.load_error.is_none());
        assert!(state.studio.markup().contains("From disk"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn snapshot_file_with_bad_color_keeps_last_good_render() {
        let dir = std::env::temp_dir().join(format!("widget-studio-color-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("button.json");
        std::fs::write(&path, r#"{"label":"Good"}"#).unwrap();

        let mut state = DevState::<Button>::new(Some(path.clone()));
        assert!(state.load_error.is_none());
        let good = state.studio.markup().to_string();

        std::fs::write(&path, r#"{"background":"x\"><script>alert(1)</script>"}"#).unwrap();
        state.reload();
        assert!(state.load_error.unwrap().contains("background"));
        assert_eq!(state.studio.markup(), good);
        assert!(!state.studio.markup().contains("<script>"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}

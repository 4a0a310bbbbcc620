pub mod button;
pub mod clipboard;
pub mod error;
pub mod layout;
pub mod markup;
pub mod notice;
pub mod panel;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod studio;
pub mod style;
pub mod value;
pub mod view;
pub mod widget;

#[cfg(feature = "wasm")]
mod wasm;

pub use button::{Button, ButtonParams};
pub use error::{Result, StudioError};
pub use notice::{Notice, NoticeParams, NoticeState, NoticeType};
pub use studio::{Studio, Update};
pub use value::{Value, ValueType};
pub use widget::{Action, Event, FieldChange, Widget, WidgetKind};

/// Render a notice snapshot to its HTML fragment.
pub fn render_notice(state: &NoticeState) -> String {
    Notice::render(state)
}

/// Render a button snapshot to its HTML fragment.
pub fn render_button(params: &ButtonParams) -> String {
    Button::render(params)
}

/// Parse a JSON snapshot for widget `W`. Missing keys take their defaults,
/// unknown keys are rejected and every field goes through [`Widget::apply`].
pub fn load_state<W: Widget>(json: &str) -> Result<W::State> {
    let parsed: W::State = serde_json::from_str(json)
        .map_err(|e| StudioError::Message(format!("invalid snapshot: {e}")))?;
    W::validate(&parsed)
}

/// Apply `key=value` to a snapshot, parsing `value` by the field's type.
pub fn apply_assignment<W: Widget>(state: &W::State, assignment: &str) -> Result<W::State> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| StudioError::Message(format!("expected key=value, got `{assignment}`")))?;
    let key = key.trim();
    let ty = widget::field_type::<W>(state, key).ok_or_else(|| StudioError::unknown_field(key))?;
    let value = Value::parse_as(ty, key, raw)?;
    widget::reduce::<W>(state, &Event::Set(FieldChange::new(key, value)))
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn default_notice_end_to_end() {
        let html = render_notice(&Notice::defaults());
        assert!(html.starts_with("<div data-widget=\"notice\""));
        assert!(html.contains("Important Notice"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn default_button_end_to_end() {
        let html = render_button(&Button::defaults());
        assert!(html.starts_with("<button type=\"button\" data-widget=\"button\""));
        assert!(html.contains("Klik mig"));
    }

    #[test]
    fn partial_snapshot_fills_defaults() {
        let state = load_state::<Notice>(r#"{"params":{"title":"Heads up"}}"#).unwrap();
        assert_eq!(state.params.title, "Heads up");
        assert_eq!(state.params.body, NoticeParams::defaults().body);

        let button = load_state::<Button>(r#"{"label":"Go","width":200}"#).unwrap();
        assert_eq!(button.label, "Go");
        assert_eq!(button.width, 200);
        assert_eq!(button.height, ButtonParams::defaults().height);
    }

    #[test]
    fn malformed_snapshot_is_a_message() {
        let err = load_state::<Button>("{").unwrap_err();
        assert!(matches!(err, StudioError::Message(_)));
    }

    #[test]
    fn snapshot_colors_must_be_hex() {
        let err = load_state::<Notice>(
            r##"{"styles":{"note":{"icon":"📝","border":"red\" onmouseover=\"alert(1)","background":"#fff"}}}"##,
        )
        .unwrap_err();
        assert!(matches!(err, StudioError::InvalidValue { ref field, .. } if field == "note.border"));

        let err = load_state::<Button>(r#"{"background":"x\"><script>alert(1)</script>"}"#)
            .unwrap_err();
        assert!(matches!(err, StudioError::InvalidValue { ref field, .. } if field == "background"));
    }

    #[test]
    fn snapshot_sliders_are_clamped() {
        let state = load_state::<Notice>(r#"{"params":{"borderWidth":99}}"#).unwrap();
        assert_eq!(state.params.border_width, notice::MAX_BORDER_WIDTH);

        let button = load_state::<Button>(r#"{"width":100000,"fontSize":2}"#).unwrap();
        assert_eq!(button.width, button::MAX_WIDTH);
        assert_eq!(button.font_size, button::MIN_FONT_SIZE);
        assert!(render_button(&button).contains("width:480px"));
    }

    #[test]
    fn snapshot_href_is_trimmed() {
        let button = load_state::<Button>(r#"{"href":"   "}"#).unwrap();
        assert_eq!(button.href, "");
        assert!(render_button(&button).starts_with("<button"));

        let link = load_state::<Button>(r#"{"href":"  /buy "}"#).unwrap();
        assert_eq!(link.href, "/buy");
    }

    #[test]
    fn snapshot_unknown_keys_are_rejected() {
        let err = load_state::<Notice>(r#"{"params":{"tittle":"typo"}}"#).unwrap_err();
        assert!(matches!(err, StudioError::Message(ref m) if m.contains("tittle")));
        assert!(load_state::<Notice>(r#"{"extra":1}"#).is_err());
        assert!(load_state::<Notice>(r##"{"styles":{"note":{"glow":"#fff"}}}"##).is_err());
        assert!(load_state::<Button>(r##"{"colour":"#000000"}"##).is_err());
    }

    #[test]
    fn default_snapshot_round_trips_through_validation() {
        let json = serde_json::to_string(&Notice::defaults()).unwrap();
        assert_eq!(load_state::<Notice>(&json).unwrap(), Notice::defaults());
        let json = serde_json::to_string(&Button::defaults()).unwrap();
        assert_eq!(load_state::<Button>(&json).unwrap(), Button::defaults());
    }

    #[test]
    fn assignments_parse_by_field_type() {
        let state = Notice::defaults();
        let state = apply_assignment::<Notice>(&state, "dismissible=true").unwrap();
        let state = apply_assignment::<Notice>(&state, "borderWidth=3").unwrap();
        let state = apply_assignment::<Notice>(&state, "title=a=b").unwrap();
        assert!(state.params.dismissible);
        assert_eq!(state.params.border_width, 3);
        assert_eq!(state.params.title, "a=b");
    }

    #[test]
    fn bad_assignments() {
        let state = Button::defaults();
        assert!(matches!(
            apply_assignment::<Button>(&state, "label"),
            Err(StudioError::Message(_))
        ));
        assert_eq!(
            apply_assignment::<Button>(&state, "nope=1"),
            Err(StudioError::unknown_field("nope"))
        );
        assert!(apply_assignment::<Button>(&state, "shadow=maybe").is_err());
    }
}

//! Panel toggles: the collapsible code pane and the floating settings drawer.
//! Open/closed state lives on the elements themselves (class presence).

pub const COLLAPSED_CLASS: &str = "collapsed";
pub const OPEN_CLASS: &str = "open";
pub const BODY_OPEN_CLASS: &str = "controls-open";

/// The slice of a DOM element these toggles need.
pub trait Element {
    /// Toggle `class`, or force it on/off; returns whether it is now present.
    fn toggle_class(&mut self, class: &str, force: Option<bool>) -> bool;
    fn has_class(&self, class: &str) -> bool;
    fn set_attribute(&mut self, name: &str, value: &str);
    fn set_text(&mut self, text: &str);
}

fn flag(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// Collapse or expand the code section. Returns `true` when it is now
/// expanded; the host re-renders so the pane shows current code.
pub fn toggle_code_panel<S, B>(section: &mut S, button: &mut B) -> bool
where
    S: Element + ?Sized,
    B: Element + ?Sized,
{
    let expanded = !section.toggle_class(COLLAPSED_CLASS, None);
    button.set_attribute("aria-expanded", flag(expanded));
    section.set_attribute("aria-hidden", flag(!expanded));
    button.set_text(if expanded { "Hide Code" } else { "Show Code" });
    expanded
}

pub fn set_controls_open<P, T, D>(panel: &mut P, toggle: &mut T, body: &mut D, open: bool)
where
    P: Element + ?Sized,
    T: Element + ?Sized,
    D: Element + ?Sized,
{
    panel.toggle_class(OPEN_CLASS, Some(open));
    toggle.set_attribute("aria-expanded", flag(open));
    body.toggle_class(BODY_OPEN_CLASS, Some(open));
}

/// Flip the settings drawer; returns the new open state.
pub fn toggle_controls<P, T, D>(panel: &mut P, toggle: &mut T, body: &mut D) -> bool
where
    P: Element + ?Sized,
    T: Element + ?Sized,
    D: Element + ?Sized,
{
    let open = !panel.has_class(OPEN_CLASS);
    set_controls_open(panel, toggle, body, open);
    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[derive(Default)]
    struct FakeElement {
        classes: BTreeSet<String>,
        attrs: BTreeMap<String, String>,
        text: String,
    }

    impl Element for FakeElement {
        fn toggle_class(&mut self, class: &str, force: Option<bool>) -> bool {
            let on = force.unwrap_or(!self.classes.contains(class));
            if on {
                self.classes.insert(class.to_string());
            } else {
                self.classes.remove(class);
            }
            on
        }
        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(class)
        }
        fn set_attribute(&mut self, name: &str, value: &str) {
            self.attrs.insert(name.to_string(), value.to_string());
        }
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }
    }

    #[test]
    fn code_toggle_syncs_aria_and_label() {
        let mut section = FakeElement::default();
        let mut button = FakeElement::default();

        assert!(!toggle_code_panel(&mut section, &mut button));
        assert!(section.has_class(COLLAPSED_CLASS));
        assert_eq!(button.attrs["aria-expanded"], "false");
        assert_eq!(section.attrs["aria-hidden"], "true");
        assert_eq!(button.text, "Show Code");

        assert!(toggle_code_panel(&mut section, &mut button));
        assert!(!section.has_class(COLLAPSED_CLASS));
        assert_eq!(button.attrs["aria-expanded"], "true");
        assert_eq!(section.attrs["aria-hidden"], "false");
        assert_eq!(button.text, "Hide Code");
    }

    #[test]
    fn drawer_open_close() {
        let mut panel = FakeElement::default();
        let mut toggle = FakeElement::default();
        let mut body = FakeElement::default();

        assert!(toggle_controls(&mut panel, &mut toggle, &mut body));
        assert!(panel.has_class(OPEN_CLASS));
        assert!(body.has_class(BODY_OPEN_CLASS));
        assert_eq!(toggle.attrs["aria-expanded"], "true");

        // close button
        set_controls_open(&mut panel, &mut toggle, &mut body, false);
        assert!(!panel.has_class(OPEN_CLASS));
        assert!(!body.has_class(BODY_OPEN_CLASS));
        assert_eq!(toggle.attrs["aria-expanded"], "false");

        assert!(toggle_controls(&mut panel, &mut toggle, &mut body));
    }
}

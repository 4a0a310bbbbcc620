//! The configurator session: one snapshot, one event entry point, one view.

use std::marker::PhantomData;

use tracing::{debug, error, warn};

use crate::error::Result;
use crate::panel::{self, ControlPanel, Folder};
use crate::value::Value;
use crate::view::{Detached, RenderTarget, ViewUpdater};
use crate::widget::{reduce, Event, Widget};

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// A single field changed; the panel already shows the new value.
    Field,
    /// An action rewrote fields behind the panel's back; call
    /// [`Studio::sync_panel`].
    Reset,
}

/// Holds the current snapshot of widget `W` and re-renders it in full after
/// every accepted event.
pub struct Studio<W: Widget, T = Detached> {
    state: W::State,
    markup: String,
    view: ViewUpdater<T>,
    _widget: PhantomData<fn() -> W>,
}

impl<W: Widget> Studio<W, Detached> {
    /// A studio with no preview or code pane.
    pub fn headless() -> Self {
        Self::new(ViewUpdater::detached())
    }
}

impl<W: Widget> Default for Studio<W, Detached> {
    fn default() -> Self {
        Self::headless()
    }
}

impl<W: Widget, T: RenderTarget> Studio<W, T> {
    /// Start from the default snapshot and render it immediately.
    pub fn new(view: ViewUpdater<T>) -> Self {
        Self::with_state(W::defaults(), view)
    }

    pub fn with_state(state: W::State, view: ViewUpdater<T>) -> Self {
        let mut studio = Self {
            state,
            markup: String::new(),
            view,
            _widget: PhantomData,
        };
        studio.render();
        studio
    }

    pub fn state(&self) -> &W::State {
        &self.state
    }

    /// The most recent render.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn values(&self) -> Vec<(&'static str, Value)> {
        W::values(&self.state)
    }

    pub fn view(&self) -> &ViewUpdater<T> {
        &self.view
    }

    pub fn layout(&self) -> Vec<Folder> {
        W::layout()
    }

    /// Apply one event. A rejected event leaves the snapshot and the view
    /// as they were.
    pub fn dispatch(&mut self, event: impl Into<Event>) -> Result<Update> {
        let event = event.into();
        let kind = W::KIND;
        let next = match reduce::<W>(&self.state, &event) {
            Ok(next) => next,
            Err(e) => {
                warn!(widget = %kind, error = %e, "edit rejected");
                return Err(e);
            }
        };
        debug!(widget = %kind, ?event, "dispatch");
        self.state = next;
        self.render();
        Ok(match event {
            Event::Set(_) => Update::Field,
            Event::Action(_) => Update::Reset,
        })
    }

    /// Swap in a whole snapshot (e.g. reloaded from disk). The snapshot is
    /// checked field by field; a rejected one leaves the studio unchanged.
    pub fn replace_state(&mut self, state: W::State) -> Result<()> {
        let kind = W::KIND;
        match W::validate(&state) {
            Ok(checked) => {
                self.state = checked;
                self.render();
                Ok(())
            }
            Err(e) => {
                warn!(widget = %kind, error = %e, "snapshot rejected");
                Err(e)
            }
        }
    }

    /// Full re-render, pushed to the view.
    pub fn render(&mut self) -> &str {
        self.markup = W::render(&self.state);
        let kind = W::KIND;
        debug!(widget = %kind, bytes = self.markup.len(), "render");
        self.view.update(&self.markup);
        &self.markup
    }

    /// Build the widget's controls on `panel`. A failing panel is logged and
    /// left as is; the studio keeps working without controls.
    pub fn attach_panel(&self, panel: &mut dyn ControlPanel) -> bool {
        let kind = W::KIND;
        match panel::mount(panel, &W::layout(), &self.values()) {
            Ok(bound) => {
                debug!(widget = %kind, bound, "control panel ready");
                true
            }
            Err(e) => {
                error!(widget = %kind, error = %e, "control panel setup failed");
                false
            }
        }
    }

    pub fn sync_panel(&self, panel: &mut dyn ControlPanel) {
        panel.refresh(&self.values());
    }
}

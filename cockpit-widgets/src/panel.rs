//! Panel capability contract.
//!
//! A panel is anything the host can mount into a layout region, render on
//! demand and dispose of. The host owns the panel box; the panel owns its own
//! state and tells the host when that state changed through [`Panel::take_redraw`].

use std::fmt;

use uuid::Uuid;

use crate::view::View;

/// Host-assigned identity of one panel instance inside a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelKey(Uuid);

impl PanelKey {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for PanelKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User-visible tab title
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelTitle {
    pub label: String,
    pub closable: bool,
}

impl PanelTitle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            closable: false,
        }
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }
}

/// Trait for components the host can place in its layout
pub trait Panel {
    /// Fixed internal identifier (not unique across instances)
    fn id(&self) -> &str;

    fn title(&self) -> &PanelTitle;

    /// Style classes for host-side theming hooks
    fn class_names(&self) -> &[String];

    /// Called by the host once the panel is attached and visible
    fn mount(&mut self);

    /// Render the current state. Must not have side effects.
    fn render(&self) -> View;

    /// Called by the host when the panel is closed or the host shuts down
    fn dispose(&mut self);

    /// Returns true once per state change since the last call
    fn take_redraw(&self) -> bool;
}

//! # MainArea - Reference Shell Layout
//!
//! Holds the panels added to the host's main area as tabs, with activation
//! history.
//!
//! ## Features
//! - Mounts panels as soon as they are attached
//! - Activation history: closing the current tab falls back to the previous one
//! - `poll()` is the host scheduler hook: renders only panels that asked for it

use crate::error::HostError;
use crate::host::{Shell, ShellArea};
use crate::panel::{Panel, PanelKey};
use crate::view::View;

struct Tab {
    key: PanelKey,
    panel: Box<dyn Panel>,
}

/// Tabbed main area with activation history
#[derive(Default)]
pub struct MainArea {
    tabs: Vec<Tab>,
    /// Currently visible tab
    current: Option<PanelKey>,
    /// Activation history stack
    history: Vec<PanelKey>,
}

impl MainArea {
    /// Create a new empty area
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring a tab to the front
    pub fn activate(&mut self, key: PanelKey) -> Result<(), HostError> {
        if !self.contains(key) {
            return Err(HostError::UnknownPanel(key));
        }
        if self.current == Some(key) {
            return Ok(()); // Already in front
        }
        self.history.push(key);
        self.current = Some(key);
        Ok(())
    }

    /// Close a tab. Disposes the panel; the previous tab in history becomes current.
    pub fn close(&mut self, key: PanelKey) -> Result<(), HostError> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.key == key)
            .ok_or(HostError::UnknownPanel(key))?;

        if !self.tabs[index].panel.title().closable {
            return Err(HostError::NotClosable(self.tabs[index].panel.title().label.clone()));
        }

        let mut tab = self.tabs.remove(index);
        tab.panel.dispose();
        ::log::info!("Closed panel {} ({})", tab.panel.id(), key);

        self.history.retain(|k| *k != key);
        if self.current == Some(key) {
            self.current = self.history.last().copied();
        }
        Ok(())
    }

    /// Dispose every panel regardless of closability (host shutdown).
    ///
    /// Returns the number of panels disposed.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.tabs.len();
        for tab in &mut self.tabs {
            tab.panel.dispose();
        }
        self.tabs.clear();
        self.history.clear();
        self.current = None;
        count
    }

    /// Render every panel whose state changed since the last poll.
    pub fn poll(&mut self) -> Vec<(PanelKey, View)> {
        self.tabs
            .iter()
            .filter(|t| t.panel.take_redraw())
            .map(|t| (t.key, t.panel.render()))
            .collect()
    }

    /// Render one panel unconditionally
    pub fn render(&self, key: PanelKey) -> Option<View> {
        self.panel(key).map(|p| p.render())
    }

    pub fn panel(&self, key: PanelKey) -> Option<&dyn Panel> {
        self.tabs.iter().find(|t| t.key == key).map(|t| t.panel.as_ref())
    }

    /// All tabs in insertion order
    pub fn panels(&self) -> impl Iterator<Item = (PanelKey, &dyn Panel)> {
        self.tabs.iter().map(|t| (t.key, t.panel.as_ref()))
    }

    pub fn contains(&self, key: PanelKey) -> bool {
        self.tabs.iter().any(|t| t.key == key)
    }

    /// Get the current tab
    pub fn current(&self) -> Option<PanelKey> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

impl Shell for MainArea {
    fn add(&mut self, mut panel: Box<dyn Panel>, area: ShellArea) -> Result<PanelKey, HostError> {
        if area != ShellArea::Main {
            return Err(HostError::UnsupportedArea(area));
        }

        let key = PanelKey::new();
        ::log::info!("Adding panel {} '{}' as {}", panel.id(), panel.title().label, key);
        panel.mount();
        self.tabs.push(Tab { key, panel });
        self.activate(key)?;
        Ok(key)
    }
}

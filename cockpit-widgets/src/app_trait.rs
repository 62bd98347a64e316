//! # ShellPlugin Trait - Plugin Interface
//!
//! This module defines the standard interface for plugins that integrate with a
//! cockpit host shell.
//!
//! ## Architecture
//!
//! Plugins are separate crates that implement the ShellPlugin trait. The host
//! collects their registrations into a [`PluginRegistry`] and, at start-up, runs
//! the activation routine of every auto-start plugin exactly once.
//!
//! ## 3-Point Coupling Pattern
//!
//! Each plugin connects to the host through exactly 3 touch points:
//! 1. Import: `use model_cockpit::ModelCockpitPlugin;`
//! 2. Register: `registry.register(ModelCockpitPlugin::registration())?;`
//! 3. Activate: the host calls `(registration.activate)(app, launcher)`
//!
//! ## Creating a New Plugin
//!
//! ```rust,ignore
//! use cockpit_widgets::{HostApp, HostError, Launcher, PluginInfo, ShellPlugin};
//!
//! pub struct MyPlugin;
//!
//! impl ShellPlugin for MyPlugin {
//!     fn info() -> PluginInfo {
//!         PluginInfo {
//!             id: "my-plugin:plugin",
//!             name: "My Plugin",
//!             description: "Does something useful",
//!             auto_start: true,
//!         }
//!     }
//!
//!     fn activate(
//!         app: &mut dyn HostApp,
//!         launcher: Option<&mut dyn Launcher>,
//!     ) -> Result<(), HostError> {
//!         // register commands, add launcher entries
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::HostError;
use crate::host::HostApp;
use crate::launcher::Launcher;

/// Metadata about a registered plugin
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginInfo {
    /// Stable unique identifier
    pub id: &'static str,
    /// Display name shown in host UI
    pub name: &'static str,
    /// Description of the plugin
    pub description: &'static str,
    /// Activate at host start without any user action
    pub auto_start: bool,
}

/// Signature of a plugin activation routine.
///
/// The launcher is optional: hosts without one pass `None`.
pub type ActivateFn = fn(&mut dyn HostApp, Option<&mut dyn Launcher>) -> Result<(), HostError>;

/// The registration object a plugin hands to the host.
#[derive(Clone, Debug)]
pub struct PluginRegistration {
    pub info: PluginInfo,
    pub activate: ActivateFn,
}

/// Trait for plugins that integrate with a cockpit host
pub trait ShellPlugin {
    /// Returns metadata about this plugin
    fn info() -> PluginInfo
    where
        Self: Sized;

    /// Wire the plugin into the host. Called once at host start.
    fn activate(app: &mut dyn HostApp, launcher: Option<&mut dyn Launcher>) -> Result<(), HostError>
    where
        Self: Sized;

    /// Bundle metadata and activation routine for the host's registry
    fn registration() -> PluginRegistration
    where
        Self: Sized,
    {
        PluginRegistration {
            info: Self::info(),
            activate: Self::activate,
        }
    }
}

/// Registry of all installed plugins
///
/// Keeps registration order, which is also activation order.
pub struct PluginRegistry {
    plugins: Vec<PluginRegistration>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub const fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    /// Register a plugin. Identifiers must be unique.
    pub fn register(&mut self, registration: PluginRegistration) -> Result<(), HostError> {
        if self.find_by_id(registration.info.id).is_some() {
            return Err(HostError::DuplicatePlugin(registration.info.id.to_string()));
        }
        ::log::debug!("Registered plugin {}", registration.info.id);
        self.plugins.push(registration);
        Ok(())
    }

    /// Plugins that must be activated at host start
    pub fn auto_start(&self) -> impl Iterator<Item = &PluginRegistration> {
        self.plugins.iter().filter(|p| p.info.auto_start)
    }

    /// Find a plugin by ID
    pub fn find_by_id(&self, id: &str) -> Option<&PluginRegistration> {
        self.plugins.iter().find(|p| p.info.id == id)
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub mod app_trait;
pub mod commands;
pub mod error;
pub mod host;
pub mod launcher;
pub mod main_area;
pub mod panel;
pub mod view;

pub use app_trait::{PluginInfo, PluginRegistration, PluginRegistry, ShellPlugin};
pub use commands::{Command, CommandHandler, CommandRegistry, Commands};
pub use error::HostError;
pub use host::{HostApp, PageConfig, Shell, ShellArea};
pub use launcher::{Launcher, LauncherItem, LauncherModel};
pub use main_area::MainArea;
pub use panel::{Panel, PanelKey, PanelTitle};
pub use view::{Badge, BadgeTone, ListRow, View};

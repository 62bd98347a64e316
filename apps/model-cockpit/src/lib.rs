pub mod screen;

use cockpit_widgets::{
    Command, HostApp, HostError, Launcher, LauncherItem, PluginInfo, Shell, ShellArea, ShellPlugin,
};

pub use screen::CockpitPanel;

pub const PLUGIN_ID: &str = "jupyterlab-paperspace-model-cockpit:plugin";
pub const COMMAND_ID: &str = "paperspace-model-cockpit:open";
pub const COMMAND_LABEL: &str = "Paperspace Model Cockpit";
pub const LAUNCHER_CATEGORY: &str = "Paperspace";
pub const LAUNCHER_RANK: i32 = 1;

pub struct ModelCockpitPlugin;

impl ShellPlugin for ModelCockpitPlugin {
    fn info() -> PluginInfo {
        PluginInfo {
            id: PLUGIN_ID,
            name: "Model Cockpit",
            description: "Install status of the models listed in models.json",
            auto_start: true,
        }
    }

    fn activate(app: &mut dyn HostApp, launcher: Option<&mut dyn Launcher>) -> Result<(), HostError> {
        let page_config = app.page_config().clone();

        app.commands().add_command(
            COMMAND_ID,
            Command::new(COMMAND_LABEL, move |shell: &mut dyn Shell| {
                let panel = CockpitPanel::new(&page_config);
                shell.add(Box::new(panel), ShellArea::Main)?;
                Ok(())
            }),
        )?;

        match launcher {
            Some(launcher) => {
                launcher.add(LauncherItem::new(COMMAND_ID, LAUNCHER_CATEGORY).with_rank(LAUNCHER_RANK));
            }
            None => ::log::info!("No launcher available; {} registered without launcher entry", COMMAND_ID),
        }

        ::log::info!("Activated {}", PLUGIN_ID);
        Ok(())
    }
}

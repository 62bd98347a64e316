//! Headless reference host.
//!
//! Activates the auto-start plugins, opens panels through the command
//! registry and prints what they render once they settle. Everything it needs
//! comes from the command line; it keeps no state between runs.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use cockpit_widgets::{
    CommandRegistry, Commands, HostApp, Launcher, LauncherModel, MainArea, PageConfig, PanelKey,
    PluginRegistry, ShellPlugin, View,
};
use model_cockpit::ModelCockpitPlugin;

use crate::render_text;

#[derive(Parser, Debug, Clone)]
#[command(name = "cockpit-shell", version, about = "Headless host for the Model Cockpit panel")]
pub struct Args {
    /// Base URL of the companion server
    #[arg(long = "base-url", value_name = "URL", default_value = "http://localhost:8888/")]
    pub base_url: String,

    /// Session cookie sent with requests
    #[arg(long, value_name = "COOKIE")]
    pub cookie: Option<String>,

    /// Execute every registered command N times instead of following the launcher
    #[arg(long, value_name = "N")]
    pub open: Option<usize>,

    /// Print commands and launcher entries, then exit
    #[arg(long = "list-commands")]
    pub list_commands: bool,

    /// Print rendered views as JSON
    #[arg(long)]
    pub json: bool,

    /// Run without a launcher
    #[arg(long = "no-launcher")]
    pub no_launcher: bool,

    /// Do not open the launcher entries at start
    #[arg(long = "no-auto-open")]
    pub no_auto_open: bool,

    /// How often the host polls panels for redraws
    #[arg(long = "poll-interval-ms", value_name = "MS", default_value_t = 50)]
    pub poll_interval_ms: u64,

    /// Stop waiting for panels after this many seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

pub struct App {
    commands: Commands,
    main_area: MainArea,
    launcher: Option<LauncherModel>,
    page_config: PageConfig,
    plugins: PluginRegistry,
    auto_open: bool,
    poll_interval: Duration,
}

impl HostApp for App {
    fn commands(&mut self) -> &mut dyn CommandRegistry {
        &mut self.commands
    }

    fn page_config(&self) -> &PageConfig {
        &self.page_config
    }
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let mut page_config = PageConfig::new(&args.base_url).context("Invalid base URL")?;
        if let Some(cookie) = &args.cookie {
            page_config = page_config.with_session_cookie(cookie.as_str());
        }

        let mut plugins = PluginRegistry::new();
        plugins.register(ModelCockpitPlugin::registration())?;
        ::log::info!("{} plugin(s) installed", plugins.len());

        Ok(Self {
            commands: Commands::new(),
            main_area: MainArea::new(),
            launcher: (!args.no_launcher).then(LauncherModel::new),
            page_config,
            plugins,
            auto_open: !args.no_auto_open,
            poll_interval: Duration::from_millis(args.poll_interval_ms.max(1)),
        })
    }

    /// Activate every auto-start plugin
    pub fn start(&mut self) -> Result<()> {
        let registrations: Vec<_> = self.plugins.auto_start().cloned().collect();
        let mut launcher = self.launcher.take();

        for registration in registrations {
            let id = registration.info.id;
            let result = (registration.activate)(
                self,
                launcher.as_mut().map(|l| l as &mut dyn Launcher),
            );
            if let Err(e) = result {
                self.launcher = launcher;
                return Err(e).with_context(|| format!("Failed to activate plugin {}", id));
            }
            ::log::info!("Plugin {} active", id);
        }

        self.launcher = launcher;
        Ok(())
    }

    /// Human-readable listing of commands and launcher entries
    pub fn describe(&self) -> String {
        let mut out = String::from("Commands:\n");
        for id in self.commands.list_commands() {
            let label = self.commands.label(id).unwrap_or_default();
            out.push_str(&format!("  {}  {}\n", id, label));
        }

        match &self.launcher {
            Some(launcher) => {
                out.push_str("Launcher:\n");
                for category in launcher.categories() {
                    for item in launcher.items_in(category) {
                        match item.rank {
                            Some(rank) => out.push_str(&format!("  {} / {} (rank {})\n", category, item.command, rank)),
                            None => out.push_str(&format!("  {} / {}\n", category, item.command)),
                        }
                    }
                }
            }
            None => out.push_str("Launcher: none\n"),
        }
        out
    }

    /// Commands to run at start.
    ///
    /// `Some(n)` runs every command `n` times. Otherwise the launcher entries
    /// run once each (every command when there is no launcher), unless
    /// auto-open is off.
    fn startup_commands(&self, count: Option<usize>) -> Vec<String> {
        let all = || self.commands.list_commands().into_iter().map(str::to_string);

        match count {
            Some(n) => all().flat_map(|id| std::iter::repeat(id).take(n)).collect(),
            None if !self.auto_open => Vec::new(),
            None => match &self.launcher {
                Some(launcher) => launcher
                    .categories()
                    .into_iter()
                    .flat_map(|category| launcher.items_in(category))
                    .map(|item| item.command.clone())
                    .collect(),
                None => all().collect(),
            },
        }
    }

    /// Execute the startup commands. Returns the keys of the panels they added.
    pub fn open_panels(&mut self, count: Option<usize>) -> Result<Vec<PanelKey>> {
        let mut keys = Vec::new();
        for id in self.startup_commands(count) {
            let before = self.main_area.len();
            self.commands
                .execute(&id, &mut self.main_area)
                .with_context(|| format!("Command {} failed", id))?;

            if self.main_area.len() > before {
                keys.extend(self.main_area.current());
            }
        }
        Ok(keys)
    }

    /// Drive the host scheduler until every panel in `keys` has settled or
    /// `timeout` elapses. Views come back in `keys` order.
    pub fn wait_settled(&mut self, keys: &[PanelKey], timeout: Duration) -> Vec<(PanelKey, View)> {
        let deadline = Instant::now() + timeout;
        let mut settled: Vec<(PanelKey, View)> = Vec::new();

        loop {
            for (key, view) in self.main_area.poll() {
                let waiting = keys.contains(&key) && !settled.iter().any(|(k, _)| *k == key);
                if waiting && !view.has_progress() {
                    settled.push((key, view));
                }
            }
            if settled.len() == keys.len() || Instant::now() >= deadline {
                break;
            }
            thread::sleep(self.poll_interval);
        }

        for key in keys {
            if settled.iter().any(|(k, _)| k == key) {
                continue;
            }
            ::log::warn!("Panel {} still loading after {:?}", key, timeout);
            if let Some(view) = self.main_area.render(*key) {
                settled.push((*key, view));
            }
        }

        settled.sort_by_key(|(key, _)| keys.iter().position(|k| k == key));
        settled
    }

    /// Dispose every open panel
    pub fn shutdown(&mut self) -> usize {
        let count = self.main_area.dispose_all();
        ::log::info!("Disposed {} panel(s)", count);
        count
    }
}

fn print_views(out: &mut impl Write, views: &[(PanelKey, View)], json: bool) -> Result<()> {
    if json {
        let payload: Vec<_> = views
            .iter()
            .map(|(key, view)| serde_json::json!({ "panel": key.to_string(), "view": view.to_json() }))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        return Ok(());
    }

    for (key, view) in views {
        writeln!(out, "== panel {} ==", key)?;
        write!(out, "{}", render_text::render(view))?;
    }
    Ok(())
}

pub fn app_main() -> Result<()> {
    let args = Args::parse();

    let mut app = App::new(&args)?;
    app.start()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.list_commands {
        write!(out, "{}", app.describe())?;
        return Ok(());
    }

    let keys = app.open_panels(args.open)?;
    if keys.is_empty() {
        ::log::info!("No panels opened");
    }

    let views = app.wait_settled(&keys, Duration::from_secs(args.timeout));
    print_views(&mut out, &views, args.json)?;

    app.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_cockpit::COMMAND_ID;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["cockpit-shell", "--base-url", "http://127.0.0.1:9/"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn started(args: &Args) -> App {
        let mut app = App::new(args).unwrap();
        app.start().unwrap();
        app
    }

    #[test]
    fn test_parse_flags() {
        let args = args(&["--cookie", "s=1", "--open", "3", "--json", "--no-launcher"]);
        assert_eq!(args.base_url, "http://127.0.0.1:9/");
        assert_eq!(args.cookie.as_deref(), Some("s=1"));
        assert_eq!(args.open, Some(3));
        assert!(args.json);
        assert!(args.no_launcher);
        assert!(!args.no_auto_open);
        assert_eq!(args.poll_interval_ms, 50);
        assert_eq!(args.timeout, 30);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["cockpit-shell"]).unwrap();
        let app = App::new(&args).unwrap();
        assert_eq!(app.page_config().base_url().as_str(), "http://localhost:8888/");
        assert_eq!(app.page_config().session_cookie(), None);
    }

    #[test]
    fn test_cookie_flag_reaches_page_config() {
        let app = App::new(&args(&["--cookie", "session=abc"])).unwrap();
        assert_eq!(app.page_config().session_cookie(), Some("session=abc"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let args = Args::try_parse_from(["cockpit-shell", "--base-url", "ftp://nope/"]).unwrap();
        assert!(App::new(&args).is_err());
    }

    #[test]
    fn test_describe_lists_command_and_launcher() {
        let app = started(&args(&[]));
        let listing = app.describe();
        assert!(listing.contains(COMMAND_ID));
        assert!(listing.contains("Paperspace / paperspace-model-cockpit:open (rank 1)"));

        let app = started(&args(&["--no-launcher"]));
        assert!(app.describe().contains("Launcher: none"));
    }

    #[test]
    fn test_startup_commands() {
        let app = started(&args(&[]));
        assert_eq!(app.startup_commands(None), vec![COMMAND_ID]);
        assert_eq!(app.startup_commands(Some(2)), vec![COMMAND_ID, COMMAND_ID]);

        let app = started(&args(&["--no-launcher"]));
        assert_eq!(app.startup_commands(None), vec![COMMAND_ID]);

        let app = started(&args(&["--no-auto-open"]));
        assert!(app.startup_commands(None).is_empty());
        assert_eq!(app.startup_commands(Some(1)), vec![COMMAND_ID]);
    }

    #[test]
    fn test_opens_panels_and_prints_settled_views() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/paperspace-model-cockpit/api/models")
            .with_status(200)
            .with_body(r#"{"models":[{"id":"m1","display_name":"Llama","version":"1.0","path":"/models/m1","installed":true}]}"#)
            .expect(2)
            .create();

        let url = server.url();
        let argv = ["cockpit-shell", "--base-url", url.as_str(), "--open", "2", "--poll-interval-ms", "5"];
        let args = Args::try_parse_from(argv).unwrap();
        let mut app = started(&args);

        let keys = app.open_panels(args.open).unwrap();
        assert_eq!(keys.len(), 2);

        let views = app.wait_settled(&keys, Duration::from_secs(10));
        assert_eq!(views.iter().map(|(k, _)| *k).collect::<Vec<_>>(), keys);

        let mut out = Vec::new();
        print_views(&mut out, &views, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("- Llama (1.0) [installed]").count(), 2);
        assert!(text.contains("[Install Selected (stub)] (disabled)"));

        assert_eq!(app.shutdown(), 2);
    }

    #[test]
    fn test_unreachable_server_prints_error() {
        let mut app = started(&args(&["--open", "1"]));
        let keys = app.open_panels(Some(1)).unwrap();
        let views = app.wait_settled(&keys, Duration::from_secs(10));

        let mut out = Vec::new();
        print_views(&mut out, &views, true).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[0]["panel"], keys[0].to_string());
        assert!(json[0]["view"].to_string().contains("Failed to load models list."));
    }
}

//! End-to-end: activate the plugin in an in-memory host, open panels through
//! the registered command and let them fetch from a mock server.

use std::io::Write;
use std::time::{Duration, Instant};

use cockpit_widgets::{
    BadgeTone, CommandRegistry, Commands, HostApp, Launcher, LauncherModel, MainArea, PageConfig,
    PanelKey, ShellPlugin, View,
};
use model_cockpit::{screen::design, ModelCockpitPlugin, COMMAND_ID};

const PATH: &str = "/paperspace-model-cockpit/api/models";

struct Host {
    commands: Commands,
    launcher: LauncherModel,
    page_config: PageConfig,
    area: MainArea,
}

impl Host {
    fn start(base_url: &str) -> Self {
        let mut host = Self {
            commands: Commands::new(),
            launcher: LauncherModel::new(),
            page_config: PageConfig::new(base_url).unwrap(),
            area: MainArea::new(),
        };
        let mut launcher = std::mem::take(&mut host.launcher);
        ModelCockpitPlugin::activate(&mut host, Some(&mut launcher as &mut dyn Launcher)).unwrap();
        host.launcher = launcher;
        host
    }

    fn open(&mut self) -> PanelKey {
        self.commands.execute(COMMAND_ID, &mut self.area).unwrap();
        self.area.current().unwrap()
    }

    /// Poll the area until the panel leaves the loading state
    fn settled_view(&mut self, key: PanelKey) -> View {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            self.area.poll();
            let view = self.area.render(key).unwrap();
            if !view.has_progress() {
                return view;
            }
            assert!(Instant::now() < deadline, "panel never settled");
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

impl HostApp for Host {
    fn commands(&mut self) -> &mut dyn CommandRegistry {
        &mut self.commands
    }

    fn page_config(&self) -> &PageConfig {
        &self.page_config
    }
}

fn serve(server: &mut mockito::ServerGuard, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("GET", PATH)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

#[test]
fn launcher_points_at_command() {
    let host = Host::start("http://127.0.0.1:9/");
    let items = host.launcher.items_in("Paperspace");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].command, COMMAND_ID);
    assert_eq!(items[0].rank, Some(1));
}

#[test]
fn success_with_models() {
    let mut server = mockito::Server::new();
    let mock = serve(
        &mut server,
        200,
        r#"{"models":[{"id":"m1","display_name":"Llama","version":"1.0","path":"/models/m1","installed":true}]}"#,
    );

    let mut host = Host::start(&server.url());
    let key = host.open();
    let view = host.settled_view(key);
    mock.assert();

    let rows = view.list_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].primary, "Llama (1.0)");
    assert_eq!(rows[0].secondary.as_deref(), Some("/models/m1"));
    let badge = rows[0].badge.as_ref().unwrap();
    assert_eq!((badge.label.as_str(), badge.tone), ("installed", BadgeTone::Success));
}

#[test]
fn success_with_empty_catalog() {
    let mut server = mockito::Server::new();
    let _mock = serve(&mut server, 200, r#"{"models":[]}"#);

    let mut host = Host::start(&server.url());
    let key = host.open();
    let view = host.settled_view(key);

    let rows = view.list_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].primary, design::EMPTY_PLACEHOLDER);
}

#[test]
fn malformed_payload_is_empty_catalog() {
    let mut server = mockito::Server::new();
    let _mock = serve(&mut server, 200, "{}");

    let mut host = Host::start(&server.url());
    let key = host.open();
    let view = host.settled_view(key);

    assert!(view.alerts().is_empty());
    assert_eq!(view.list_rows()[0].primary, design::EMPTY_PLACEHOLDER);
}

#[test]
fn server_failure_shows_error_notice_only() {
    let mut server = mockito::Server::new();
    let _mock = serve(&mut server, 500, "{\"models\": [{\"id\": \"hidden\"}]}");

    let mut host = Host::start(&server.url());
    let key = host.open();
    let view = host.settled_view(key);

    assert_eq!(view.alerts(), vec![design::ERROR_MESSAGE]);
    assert!(!view.has_list());
    assert!(!view.contains_text(design::EMPTY_PLACEHOLDER));
}

#[test]
fn non_json_body_shows_error_notice() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", PATH)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>")
        .create();

    let mut host = Host::start(&server.url());
    let key = host.open();
    let view = host.settled_view(key);
    mock.assert();

    assert_eq!(view.alerts(), vec![design::ERROR_MESSAGE]);
    assert!(!view.has_list());
}

#[test]
fn partial_descriptor_uses_fallbacks() {
    let mut server = mockito::Server::new();
    let _mock = serve(&mut server, 200, r#"{"models":[{"id":"m2","installed":false}]}"#);

    let mut host = Host::start(&server.url());
    let key = host.open();
    let view = host.settled_view(key);

    let rows = view.list_rows();
    assert_eq!(rows[0].primary, "m2 (-)");
    assert_eq!(rows[0].secondary.as_deref(), Some(""));
    assert_eq!(rows[0].badge.as_ref().map(|b| b.label.as_str()), Some("not installed"));
}

#[test]
fn each_open_panel_makes_its_own_request() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(r#"{"models":[{"id":"m1","installed":true}]}"#)
        .expect(2)
        .create();

    let mut host = Host::start(&server.url());
    let first = host.open();
    let second = host.open();
    assert_ne!(first, second);

    let a = host.settled_view(first);
    let b = host.settled_view(second);
    mock.assert();
    assert_eq!(a, b);

    // closing one leaves the other untouched
    host.area.close(first).unwrap();
    assert_eq!(host.area.render(second), Some(b));
}

#[test]
fn closing_while_loading_is_safe() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", PATH)
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(200));
            w.write_all(br#"{"models":[]}"#)
        })
        .create();

    let mut host = Host::start(&server.url());
    let key = host.open();
    host.area.close(key).unwrap();
    assert!(host.area.is_empty());

    // give the fetch time to resolve against the disposed panel
    std::thread::sleep(Duration::from_millis(400));
    assert!(host.area.poll().is_empty());
}

pub mod design;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use cockpit_data::{FetchError, FetchState, ModelsClient, ModelsResponse, ModelsSource, MODELS_ENDPOINT};
use cockpit_widgets::{PageConfig, Panel, PanelTitle, View};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Mounted,
    Disposed,
}

/// State shared between the panel and its fetch thread.
///
/// The fetch thread only holds a `Weak`; writes are dropped once the panel
/// is disposed or gone.
struct Shared {
    state: Mutex<SharedState>,
    redraw: AtomicBool,
}

struct SharedState {
    fetch: FetchState,
    disposed: bool,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: Mutex::new(SharedState {
                fetch: FetchState::Loading,
                disposed: false,
            }),
            redraw: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store the terminal state. Returns false if the update was discarded.
    fn settle(&self, instance: Uuid, next: FetchState) -> bool {
        let mut state = self.lock();
        if state.disposed {
            ::log::debug!("Cockpit panel {} disposed; discarding {} result", instance, next.name());
            return false;
        }
        if state.fetch.is_settled() {
            ::log::warn!("Cockpit panel {} already settled; ignoring {} result", instance, next.name());
            return false;
        }
        state.fetch = next;
        self.redraw.store(true, Ordering::SeqCst);
        true
    }
}

/// Source used when the endpoint could not even be derived.
struct Unreachable(FetchError);

impl ModelsSource for Unreachable {
    fn fetch_models(&self) -> Result<ModelsResponse, FetchError> {
        Err(self.0.clone())
    }
}

/// Read-only panel showing the install status of the model catalog.
///
/// Fetches once, on mount. Closing and reopening the panel is the only way
/// to fetch again.
pub struct CockpitPanel {
    instance_id: Uuid,
    title: PanelTitle,
    class_names: Vec<String>,
    source: Arc<dyn ModelsSource>,
    shared: Arc<Shared>,
    lifecycle: Lifecycle,
    #[cfg(test)]
    fetch_thread: Option<std::thread::JoinHandle<()>>,
}

impl CockpitPanel {
    /// Panel reading from `{base_url}paperspace-model-cockpit/api/models`
    pub fn new(page_config: &PageConfig) -> Self {
        let source: Arc<dyn ModelsSource> = match page_config.endpoint(MODELS_ENDPOINT) {
            Ok(endpoint) => Arc::new(
                ModelsClient::new(endpoint)
                    .with_session_cookie(page_config.session_cookie().map(str::to_string)),
            ),
            Err(e) => {
                ::log::error!("Cannot derive models endpoint: {}", e);
                Arc::new(Unreachable(FetchError::InvalidEndpoint(e.to_string())))
            }
        };
        Self::with_source(source)
    }

    /// Panel reading from an arbitrary source
    pub fn with_source(source: Arc<dyn ModelsSource>) -> Self {
        Self {
            instance_id: Uuid::now_v7(),
            title: PanelTitle::new(design::PANEL_TITLE).closable(true),
            class_names: vec![design::PANEL_CLASS.to_string()],
            source,
            shared: Arc::new(Shared::new()),
            lifecycle: Lifecycle::Idle,
            #[cfg(test)]
            fetch_thread: None,
        }
    }

    fn start_fetch(&mut self) {
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let source = Arc::clone(&self.source);
        let instance = self.instance_id;

        let spawned = std::thread::Builder::new()
            .name("model-cockpit-fetch".to_string())
            .spawn(move || {
                let result = source.fetch_models();
                match &result {
                    Ok(response) => ::log::info!(
                        "Cockpit panel {} loaded {} models ({} installed)",
                        instance,
                        response.len(),
                        response.installed_count()
                    ),
                    Err(e) => ::log::error!("Cockpit panel {} failed to load models: {}", instance, e),
                }

                let Some(shared) = weak.upgrade() else {
                    ::log::debug!("Cockpit panel {} dropped before fetch resolved", instance);
                    return;
                };
                shared.settle(instance, FetchState::settle(result));
            });

        match spawned {
            #[cfg(test)]
            Ok(handle) => self.fetch_thread = Some(handle),
            #[cfg(not(test))]
            Ok(_) => {}
            Err(e) => {
                ::log::error!("Cockpit panel {} could not start fetch thread: {}", instance, e);
                self.shared
                    .settle(instance, FetchState::settle(Err(FetchError::Transport(e.to_string()))));
            }
        }
    }

    #[cfg(test)]
    fn fetch_state(&self) -> FetchState {
        self.shared.lock().fetch.clone()
    }

    #[cfg(test)]
    fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    #[cfg(test)]
    fn join_fetch(&mut self) {
        if let Some(handle) = self.fetch_thread.take() {
            handle.join().unwrap();
        }
    }
}

impl Panel for CockpitPanel {
    fn id(&self) -> &str {
        design::PANEL_ID
    }

    fn title(&self) -> &PanelTitle {
        &self.title
    }

    fn class_names(&self) -> &[String] {
        &self.class_names
    }

    fn mount(&mut self) {
        match self.lifecycle {
            Lifecycle::Idle => {}
            Lifecycle::Mounted => {
                ::log::warn!("Cockpit panel {} already mounted", self.instance_id);
                return;
            }
            Lifecycle::Disposed => {
                ::log::warn!("Cockpit panel {} mounted after dispose; ignoring", self.instance_id);
                return;
            }
        }

        self.lifecycle = Lifecycle::Mounted;
        ::log::info!("Mounted cockpit panel {}", self.instance_id);
        // first frame shows the loading state
        self.shared.redraw.store(true, Ordering::SeqCst);
        self.start_fetch();
    }

    fn render(&self) -> View {
        design::render(&self.shared.lock().fetch)
    }

    fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.lifecycle = Lifecycle::Disposed;
        self.shared.lock().disposed = true;
        self.shared.redraw.store(false, Ordering::SeqCst);
        ::log::info!("Disposed cockpit panel {}", self.instance_id);
    }

    fn take_redraw(&self) -> bool {
        self.shared.redraw.swap(false, Ordering::SeqCst)
    }
}

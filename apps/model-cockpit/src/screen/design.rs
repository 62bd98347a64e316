//! Layout of the cockpit panel.
//!
//! `render` is a pure function of the fetch state; the panel calls it
//! whenever the host asks for a frame.

use cockpit_data::{FetchState, ModelDescriptor, ModelsResponse};
use cockpit_widgets::{BadgeTone, ListRow, View};

pub const PANEL_ID: &str = "paperspace-model-cockpit";
pub const PANEL_TITLE: &str = "Model Cockpit";
pub const PANEL_CLASS: &str = "jp-PaperspaceModelCockpit";

pub const HEADING: &str = "Paperspace Model Cockpit";
pub const DESCRIPTION: &str = "models.json based model list. Auto-install happens on server start.";
pub const INSTALL_BUTTON: &str = "Install Selected (stub)";
pub const LOADING_LABEL: &str = "Loading models...";
pub const ERROR_MESSAGE: &str = "Failed to load models list.";
pub const EMPTY_PLACEHOLDER: &str = "No models defined in models.json.";

const PROGRESS_SIZE: u32 = 18;

pub fn render(state: &FetchState) -> View {
    View::column(vec![
        View::heading(HEADING),
        View::text(DESCRIPTION),
        // reserved for the install action; never enabled
        View::button(INSTALL_BUTTON, true),
        body(state),
    ])
}

fn body(state: &FetchState) -> View {
    match state {
        FetchState::Loading => View::row(vec![
            View::Progress { size: PROGRESS_SIZE },
            View::text(LOADING_LABEL),
        ]),
        // the error detail stays in the logs
        FetchState::Error(_) => View::error(ERROR_MESSAGE),
        FetchState::Ready(response) => View::list(model_rows(response)),
    }
}

pub fn model_rows(response: &ModelsResponse) -> Vec<ListRow> {
    if response.is_empty() {
        return vec![ListRow::new(EMPTY_PLACEHOLDER)];
    }
    response.iter().map(model_row).collect()
}

pub fn model_row(model: &ModelDescriptor) -> ListRow {
    let tone = if model.installed {
        BadgeTone::Success
    } else {
        BadgeTone::Neutral
    };

    ListRow::new(model.primary_text())
        .with_key(model.id.as_str())
        .with_secondary(model.secondary_text())
        .with_badge(model.status_label(), tone)
        .with_divider()
}

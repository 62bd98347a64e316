pub mod error;
pub mod fetch_state;
pub mod models;
pub mod models_client;

pub use error::FetchError;
pub use fetch_state::FetchState;
pub use models::{ModelDescriptor, ModelsResponse};
pub use models_client::{ModelsClient, ModelsSource, MODELS_ENDPOINT};

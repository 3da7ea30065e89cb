use crate::config::Config;
use crate::pipeline::runner::Pipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub config: Config,
}

use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds only immutable, `Arc`-backed collaborators; requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Extractor + generation client. Stubbed in tests.
    pub analyzer: Analyzer,
    pub config: Config,
}

use std::sync::Arc;

use crate::config::Config;
use crate::layout::LayoutLimits;
use crate::records::RecordSet;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated.
    pub records: Arc<RecordSet>,
    pub limits: Arc<LayoutLimits>,
    pub config: Config,
}

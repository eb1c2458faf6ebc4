use crate::config::Config;
use std::sync::Arc;

/// Everything a run needs, passed explicitly to each stage.
pub struct AppState<S> {
    pub store: S,
    pub config: Arc<Config>,
}

use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::store::TransactionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub config: Arc<Config>,
    /// Client used by the seed loader.
    pub http: Client,
}

pub mod errors;
pub mod widget;

use crate::config::Config;
use crate::fetch::client::AnalyticsClient;

/// Shared application state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub client: AnalyticsClient,
}

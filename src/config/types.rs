use flavy_av::FlavyConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Engine binaries and their time budget.
    #[serde(default)]
    pub tools: FlavyConfig,
}

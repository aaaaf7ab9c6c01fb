use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shake::DEFAULT_GROWTH_INCREMENT;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Registry", inline)]
#[serde(default)]
/// Shake registry sizing and seeding.
pub struct RegistryOptions {
    /// Slots the active set grows or shrinks by at a time.
    #[schemars(title = "Growth Increment", range(min = 1))]
    pub growth_increment: usize,
    /// Fixed seed for source noise seeds. Random when absent.
    pub seed: Option<u64>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            seed: None,
        }
    }
}

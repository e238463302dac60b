use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::NeuralNetwork;

/// The unit of persistence: trainable weights, optimizer state, and the
/// policy's exploration rate. Enough to resume both decision-making and
/// training exactly where a previous process left off.
#[derive(Serialize, Deserialize)]
pub struct Checkpoint {
    pub network: NeuralNetwork,
    pub exploration_rate: f32,
}

impl Checkpoint {
    /// Serialize to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let serialized = bincode::serialize(self)?;
        fs::write(path, serialized)?;
        Ok(())
    }

    /// Deserialize from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let checkpoint: Self = bincode::deserialize(&data)?;
        Ok(checkpoint)
    }
}

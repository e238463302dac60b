//! Agent configuration: hyperparameters and board geometry, supplied by the
//! surrounding process at construction time.
//!
//! Values can come from anywhere; `from_env` covers the common deployment
//! where they arrive as environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// Hyperparameters and dimensions consumed by the agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub cols: usize,
    /// Width of the first hidden layer of the approximator.
    pub hidden_size: usize,
    /// Dropout probability applied to hidden activations during training.
    pub dropout_rate: f32,
    pub learning_rate: f32,
    /// Discount factor for bootstrapped targets.
    pub gamma: f32,
    pub batch_size: usize,
    pub epsilon_start: f32,
    /// Multiplicative decay applied once per completed training update.
    pub epsilon_decay: f32,
    pub epsilon_min: f32,
    /// Maximum number of transitions retained in replay memory.
    pub replay_capacity: usize,
    /// Checkpoint location. `None` means start from fresh weights.
    pub model_path: Option<PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            rows: 20,
            cols: 10,
            hidden_size: 512,
            dropout_rate: 0.3,
            learning_rate: 3e-4,
            gamma: 0.99,
            batch_size: 64,
            epsilon_start: 0.9,
            epsilon_decay: 0.995,
            epsilon_min: 0.01,
            replay_capacity: 100_000,
            model_path: None,
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AgentError::InvalidParameter {
                name: key.to_string(),
                reason: format!("could not parse '{}'", raw),
            }
        }),
        Err(_) => Ok(None),
    }
}

impl AgentConfig {
    /// Build a configuration from the process environment, falling back to
    /// defaults for variables that are not set. Unparseable values are an
    /// error rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = AgentConfig::default();

        if let Some(rows) = parse_var("BOARD_ROWS")? {
            config.rows = rows;
        }
        if let Some(cols) = parse_var("BOARD_COLS")? {
            config.cols = cols;
        }
        if let Some(hidden) = parse_var("HIDDEN_SIZE")? {
            config.hidden_size = hidden;
        }
        if let Some(dropout) = parse_var("DROPOUT_RATE")? {
            config.dropout_rate = dropout;
        }
        if let Some(lr) = parse_var("LEARNING_RATE")? {
            config.learning_rate = lr;
        }
        if let Some(gamma) = parse_var("DISCOUNT_FACTOR")? {
            config.gamma = gamma;
        }
        if let Some(batch) = parse_var("BATCH_SIZE")? {
            config.batch_size = batch;
        }
        if let Some(epsilon) = parse_var("EPSILON_START")? {
            config.epsilon_start = epsilon;
        }
        if let Some(decay) = parse_var("EPSILON_DECAY")? {
            config.epsilon_decay = decay;
        }
        if let Some(floor) = parse_var("EPSILON_MIN")? {
            config.epsilon_min = floor;
        }
        if let Some(capacity) = parse_var("MEMORY_SIZE")? {
            config.replay_capacity = capacity;
        }
        if let Ok(path) = env::var("MODEL_PATH") {
            config.model_path = Some(PathBuf::from(path.trim()));
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values outside their meaningful ranges.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(AgentError::invalid_parameter(
                "rows/cols",
                "board dimensions must be nonzero",
            ));
        }
        if self.hidden_size == 0 {
            return Err(AgentError::invalid_parameter(
                "hidden_size",
                "must be nonzero",
            ));
        }
        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err(AgentError::invalid_parameter(
                "dropout_rate",
                "must be in [0, 1)",
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(AgentError::invalid_parameter(
                "learning_rate",
                "must be positive and finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(AgentError::invalid_parameter(
                "gamma",
                "must be in [0, 1]",
            ));
        }
        if self.batch_size == 0 {
            return Err(AgentError::invalid_parameter(
                "batch_size",
                "must be nonzero",
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon_start) {
            return Err(AgentError::invalid_parameter(
                "epsilon_start",
                "must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon_min) {
            return Err(AgentError::invalid_parameter(
                "epsilon_min",
                "must be in [0, 1]",
            ));
        }
        if self.epsilon_min > self.epsilon_start {
            return Err(AgentError::invalid_parameter(
                "epsilon_min",
                "must not exceed epsilon_start",
            ));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(AgentError::invalid_parameter(
                "epsilon_decay",
                "must be in (0, 1]",
            ));
        }
        if self.replay_capacity < self.batch_size {
            return Err(AgentError::invalid_parameter(
                "replay_capacity",
                "must be at least batch_size",
            ));
        }
        Ok(())
    }

    /// Feature-vector length implied by the board geometry: one value per
    /// cell plus the 10-wide piece encoding.
    pub fn input_size(&self) -> usize {
        self.rows * self.cols + crate::game::PieceKind::COUNT + 3
    }
}

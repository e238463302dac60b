use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::checkpoint::Checkpoint;
use crate::error::{AgentError, Result};
use crate::network::{Activation, Layer, NeuralNetwork};
use crate::optimizer::{Adam, OptimizerWrapper};

/// Action-value approximator: maps a feature vector to one expected-return
/// estimate per discrete action.
///
/// Wraps the trainable network together with its optimizer state. Estimation
/// always runs in inference mode, so repeated calls on the same vector are
/// deterministic; only `fit_batch` enables the network's stochastic
/// regularization.
#[derive(Debug)]
pub struct ValueFunction {
    network: NeuralNetwork,
}

impl ValueFunction {
    /// Build the default approximator: three ReLU hidden layers
    /// (`hidden`, `hidden`, `hidden/2`) with dropout after the first two,
    /// and a linear output head, trained with Adam.
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        action_count: usize,
        dropout_rate: f32,
    ) -> Self {
        let half = (hidden_size / 2).max(1);
        let layers = vec![
            Layer::new(input_size, hidden_size, Activation::Relu).with_dropout(dropout_rate),
            Layer::new(hidden_size, hidden_size, Activation::Relu).with_dropout(dropout_rate),
            Layer::new(hidden_size, half, Activation::Relu),
            Layer::new(half, action_count, Activation::Linear),
        ];
        let optimizer = OptimizerWrapper::Adam(Adam::default_for(&layers));
        ValueFunction {
            network: NeuralNetwork::from_layers(layers, optimizer),
        }
    }

    /// Wrap an arbitrary network (used by tests and custom architectures).
    pub fn from_network(network: NeuralNetwork) -> Self {
        ValueFunction { network }
    }

    pub fn input_size(&self) -> usize {
        self.network.input_size()
    }

    pub fn action_count(&self) -> usize {
        self.network.output_size()
    }

    /// Action-value estimates for one state, deterministic.
    pub fn estimate(&mut self, state: ArrayView1<f32>) -> Array1<f32> {
        self.network.set_training(false);
        self.network.forward(state)
    }

    /// Action-value estimates for a batch of states, deterministic.
    pub fn estimate_batch(&mut self, states: ArrayView2<f32>) -> Array2<f32> {
        self.network.set_training(false);
        self.network.forward_batch(states)
    }

    /// One gradient step toward `targets` (training mode for this pass only).
    pub fn fit_batch(&mut self, states: ArrayView2<f32>, targets: ArrayView2<f32>, learning_rate: f32) {
        self.network.train_minibatch(states, targets, learning_rate);
    }

    /// Bundle the network (weights and optimizer state) with the policy's
    /// exploration rate into the unit of persistence.
    pub fn to_checkpoint(&self, exploration_rate: f32) -> Checkpoint {
        Checkpoint {
            network: self.network.clone(),
            exploration_rate,
        }
    }

    /// Restore from a checkpoint, returning the persisted exploration rate.
    /// Fails without touching the current network when the bundle's shape is
    /// incompatible with this approximator.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<f32> {
        if checkpoint.network.input_size() != self.input_size()
            || checkpoint.network.output_size() != self.action_count()
        {
            return Err(AgentError::config_mismatch(
                format!("network {}x{}", self.input_size(), self.action_count()),
                format!(
                    "checkpoint {}x{}",
                    checkpoint.network.input_size(),
                    checkpoint.network.output_size()
                ),
            ));
        }
        self.network = checkpoint.network;
        Ok(checkpoint.exploration_rate)
    }
}

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::network::Layer;

/// Gradient-descent update rule. Calls are keyed by layer index so stateful
/// optimizers keep their moment estimates attached to the right layer.
pub trait Optimizer {
    fn update_weights(
        &mut self,
        layer_idx: usize,
        weights: &mut Array2<f32>,
        gradients: &Array2<f32>,
        learning_rate: f32,
    );
    fn update_biases(
        &mut self,
        layer_idx: usize,
        biases: &mut Array1<f32>,
        gradients: &Array1<f32>,
        learning_rate: f32,
    );
}

/// Serializable optimizer dispatch. Part of the checkpoint, so a restored
/// network resumes with the same optimizer state it was saved with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum OptimizerWrapper {
    SGD(SGD),
    Adam(Adam),
}

impl Optimizer for OptimizerWrapper {
    fn update_weights(
        &mut self,
        layer_idx: usize,
        weights: &mut Array2<f32>,
        gradients: &Array2<f32>,
        learning_rate: f32,
    ) {
        match self {
            OptimizerWrapper::SGD(optimizer) => {
                optimizer.update_weights(layer_idx, weights, gradients, learning_rate)
            }
            OptimizerWrapper::Adam(optimizer) => {
                optimizer.update_weights(layer_idx, weights, gradients, learning_rate)
            }
        }
    }

    fn update_biases(
        &mut self,
        layer_idx: usize,
        biases: &mut Array1<f32>,
        gradients: &Array1<f32>,
        learning_rate: f32,
    ) {
        match self {
            OptimizerWrapper::SGD(optimizer) => {
                optimizer.update_biases(layer_idx, biases, gradients, learning_rate)
            }
            OptimizerWrapper::Adam(optimizer) => {
                optimizer.update_biases(layer_idx, biases, gradients, learning_rate)
            }
        }
    }
}

/// Plain stochastic gradient descent, no state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SGD;

impl SGD {
    pub fn new() -> SGD {
        SGD
    }
}

impl Default for SGD {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for SGD {
    fn update_weights(
        &mut self,
        _layer_idx: usize,
        weights: &mut Array2<f32>,
        gradients: &Array2<f32>,
        learning_rate: f32,
    ) {
        weights.zip_mut_with(gradients, |w, &g| *w -= learning_rate * g);
    }

    fn update_biases(
        &mut self,
        _layer_idx: usize,
        biases: &mut Array1<f32>,
        gradients: &Array1<f32>,
        learning_rate: f32,
    ) {
        biases.zip_mut_with(gradients, |b, &g| *b -= learning_rate * g);
    }
}

/// Adam optimizer with per-layer first and second moment estimates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Adam {
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    m_weights: Vec<Array2<f32>>,
    v_weights: Vec<Array2<f32>>,
    m_biases: Vec<Array1<f32>>,
    v_biases: Vec<Array1<f32>>,
    /// Bias-correction timestep, advanced once per full pass over the layers.
    t: usize,
    layer_count: usize,
    update_count: usize,
}

impl Adam {
    pub fn new(layers: &[Layer], beta1: f32, beta2: f32, epsilon: f32) -> Self {
        let m_weights = layers
            .iter()
            .map(|layer| Array2::<f32>::zeros(layer.weights.dim()))
            .collect();
        let v_weights = layers
            .iter()
            .map(|layer| Array2::<f32>::zeros(layer.weights.dim()))
            .collect();
        let m_biases = layers
            .iter()
            .map(|layer| Array1::<f32>::zeros(layer.biases.dim()))
            .collect();
        let v_biases = layers
            .iter()
            .map(|layer| Array1::<f32>::zeros(layer.biases.dim()))
            .collect();

        Adam {
            beta1,
            beta2,
            epsilon,
            m_weights,
            v_weights,
            m_biases,
            v_biases,
            t: 1,
            layer_count: layers.len(),
            update_count: 0,
        }
    }

    pub fn default_for(layers: &[Layer]) -> Self {
        Self::new(layers, 0.9, 0.999, 1e-8)
    }

    fn advance_timestep(&mut self) {
        // One weight and one bias update per layer completes a pass.
        self.update_count += 1;
        if self.update_count >= self.layer_count * 2 {
            self.t += 1;
            self.update_count = 0;
        }
    }
}

impl Optimizer for Adam {
    fn update_weights(
        &mut self,
        layer_idx: usize,
        weights: &mut Array2<f32>,
        gradients: &Array2<f32>,
        learning_rate: f32,
    ) {
        let m = &mut self.m_weights[layer_idx];
        let v = &mut self.v_weights[layer_idx];

        *m = &*m * self.beta1 + &(gradients * (1.0 - self.beta1));
        *v = &*v * self.beta2 + &(gradients * gradients * (1.0 - self.beta2));

        let m_hat = m.mapv(|x| x / (1.0 - self.beta1.powi(self.t as i32)));
        let v_hat = v.mapv(|x| x / (1.0 - self.beta2.powi(self.t as i32)));

        *weights -= &((&m_hat / (v_hat.mapv(f32::sqrt) + self.epsilon)) * learning_rate);
        self.advance_timestep();
    }

    fn update_biases(
        &mut self,
        layer_idx: usize,
        biases: &mut Array1<f32>,
        gradients: &Array1<f32>,
        learning_rate: f32,
    ) {
        let m = &mut self.m_biases[layer_idx];
        let v = &mut self.v_biases[layer_idx];

        *m = &*m * self.beta1 + &(gradients * (1.0 - self.beta1));
        *v = &*v * self.beta2 + &(gradients * gradients * (1.0 - self.beta2));

        let m_hat = m.mapv(|x| x / (1.0 - self.beta1.powi(self.t as i32)));
        let v_hat = v.mapv(|x| x / (1.0 - self.beta2.powi(self.t as i32)));

        *biases -= &((&m_hat / (v_hat.mapv(f32::sqrt) + self.epsilon)) * learning_rate);
        self.advance_timestep();
    }
}

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::optimizer::{Optimizer, OptimizerWrapper};

/// An enumeration of the activation functions available to network layers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Linear,
}

impl Activation {
    /// Apply the activation function to a batch of pre-activations in-place.
    fn apply_batch(&self, inputs: &mut Array2<f32>) {
        match self {
            Activation::Relu => {
                inputs.mapv_inplace(|v| v.max(0.0));
            }
            Activation::Linear => {}
        }
    }

    /// Compute the derivative of the activation function for a batch of
    /// pre-activations.
    fn derivative_batch(&self, inputs: ArrayView2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => inputs.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Linear => Array2::ones(inputs.dim()),
        }
    }
}

/// A fully connected layer: weights, biases, activation, and an optional
/// inverted-dropout stage applied after the activation while training.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Array2<f32>,
    pub biases: Array1<f32>,
    pub activation: Activation,
    /// Probability of dropping a unit during training. 0 disables dropout.
    pub dropout_rate: f32,
    #[serde(skip)]
    pre_activation_output: Option<Array2<f32>>,
    #[serde(skip)]
    inputs: Option<Array2<f32>>,
    #[serde(skip)]
    dropout_mask: Option<Array2<f32>>,
}

impl Layer {
    /// Create a new layer with the given input size, output size, and
    /// activation function. Weights are initialized uniformly in
    /// [-0.1, 0.1], biases with zeros.
    pub fn new(input_size: usize, output_size: usize, activation: Activation) -> Self {
        let weights = Array2::random((input_size, output_size), Uniform::new(-0.1, 0.1));
        let biases = Array1::zeros(output_size);
        Layer {
            weights,
            biases,
            activation,
            dropout_rate: 0.0,
            pre_activation_output: None,
            inputs: None,
            dropout_mask: None,
        }
    }

    pub fn with_dropout(mut self, dropout_rate: f32) -> Self {
        assert!(
            (0.0..1.0).contains(&dropout_rate),
            "dropout rate must be in [0, 1)"
        );
        self.dropout_rate = dropout_rate;
        self
    }

    pub fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn output_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Forward pass for a batch of input vectors, caching the intermediates
    /// the backward pass needs. Dropout fires only in training mode, with
    /// surviving units scaled by 1/(1-p) so inference needs no rescaling.
    fn forward_batch(&mut self, inputs: ArrayView2<f32>, training: bool) -> Array2<f32> {
        self.inputs = Some(inputs.to_owned());
        let mut outputs = inputs.dot(&self.weights) + &self.biases.clone().insert_axis(Axis(0));
        self.pre_activation_output = Some(outputs.clone());
        self.activation.apply_batch(&mut outputs);

        if training && self.dropout_rate > 0.0 {
            let mask = self.sample_dropout_mask(outputs.dim());
            outputs *= &mask;
            self.dropout_mask = Some(mask);
        } else {
            self.dropout_mask = None;
        }
        outputs
    }

    fn sample_dropout_mask(&self, dim: (usize, usize)) -> Array2<f32> {
        let mut rng = rand::thread_rng();
        let keep = 1.0 - self.dropout_rate;
        let scale = 1.0 / keep;
        Array2::from_shape_simple_fn(dim, || if rng.gen::<f32>() < keep { scale } else { 0.0 })
    }

    /// Compute gradients for the layer's weights and biases for a batch of
    /// output errors, using the cached forward intermediates.
    fn backward_batch(
        &self,
        output_errors: ArrayView2<f32>,
    ) -> (Array2<f32>, Array2<f32>, Array1<f32>) {
        let pre_activation_output = self
            .pre_activation_output
            .as_ref()
            .expect("no pre-activation output stored; forward_batch() must run before backward_batch()");
        let inputs = self
            .inputs
            .as_ref()
            .expect("no inputs stored; forward_batch() must run before backward_batch()");

        let mut adjusted_error = output_errors.to_owned();
        if let Some(mask) = &self.dropout_mask {
            adjusted_error *= mask;
        }
        adjusted_error *= &self.activation.derivative_batch(pre_activation_output.view());

        let weight_gradients = inputs.t().dot(&adjusted_error);
        let bias_gradients = adjusted_error.sum_axis(Axis(0));
        (adjusted_error, weight_gradients, bias_gradients)
    }
}

/// A feed-forward network of dense layers together with its optimizer state
/// and a training/inference mode flag.
///
/// The network and the optimizer serialize as one unit, so a persisted
/// network resumes training exactly where it left off.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NeuralNetwork {
    pub layers: Vec<Layer>,
    pub optimizer: OptimizerWrapper,
    training: bool,
}

impl NeuralNetwork {
    /// Create a new network with the given layer sizes, activations, and
    /// optimizer. `layer_sizes` has one more entry than `activations`.
    pub fn new(layer_sizes: &[usize], activations: &[Activation], optimizer: OptimizerWrapper) -> Self {
        assert_eq!(layer_sizes.len() - 1, activations.len());

        let layers = layer_sizes
            .windows(2)
            .zip(activations.iter())
            .map(|(window, &activation)| Layer::new(window[0], window[1], activation))
            .collect::<Vec<_>>();

        NeuralNetwork {
            layers,
            optimizer,
            training: false,
        }
    }

    /// Assemble a network from pre-built layers (used for architectures with
    /// per-layer dropout).
    pub fn from_layers(layers: Vec<Layer>, optimizer: OptimizerWrapper) -> Self {
        assert!(!layers.is_empty(), "network needs at least one layer");
        NeuralNetwork {
            layers,
            optimizer,
            training: false,
        }
    }

    /// Switch between training mode (stochastic regularization active) and
    /// inference mode (deterministic output).
    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }

    /// Forward pass for a single input vector.
    pub fn forward(&mut self, input: ArrayView1<f32>) -> Array1<f32> {
        let input = input.insert_axis(Axis(0));
        let output = self.forward_batch(input.view());
        let output_shape = output.shape()[1];
        output.into_shape((output_shape,)).expect("batch of one flattens")
    }

    /// Forward pass for a batch of input vectors.
    pub fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        let mut current_output = inputs.to_owned();
        for layer in &mut self.layers {
            current_output = layer.forward_batch(current_output.view(), self.training);
        }
        current_output
    }

    /// Backpropagate output errors through every layer, returning weight and
    /// bias gradients in layer order.
    fn backward_batch(&mut self, output_errors: ArrayView2<f32>) -> Vec<(Array2<f32>, Array1<f32>)> {
        let mut gradients: Vec<(Array2<f32>, Array1<f32>)> = Vec::new();
        let mut current_error = output_errors.to_owned();

        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            let (adjusted_error, weight_gradients, bias_gradients) =
                layer.backward_batch(current_error.view());
            gradients.push((weight_gradients, bias_gradients));

            if i != 0 {
                current_error = adjusted_error.dot(&layer.weights.t());
            }
        }

        gradients.reverse();
        gradients
    }

    /// One gradient-descent step toward `targets` under a squared-error
    /// objective. Runs the forward pass in training mode so dropout
    /// regularizes the update, then restores the previous mode.
    pub fn train_minibatch(
        &mut self,
        inputs: ArrayView2<f32>,
        targets: ArrayView2<f32>,
        learning_rate: f32,
    ) {
        let previous_mode = self.training;
        self.training = true;
        let outputs = self.forward_batch(inputs);
        let output_errors = &outputs - &targets;
        let gradients = self.backward_batch(output_errors.view());
        self.training = previous_mode;

        for (idx, (layer, (weight_gradients, bias_gradients))) in
            self.layers.iter_mut().zip(gradients).enumerate()
        {
            self.optimizer
                .update_weights(idx, &mut layer.weights, &weight_gradients, learning_rate);
            self.optimizer
                .update_biases(idx, &mut layer.biases, &bias_gradients, learning_rate);
        }
    }
}

use ndarray::ArrayView1;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{AgentError, Result};
use crate::value::ValueFunction;

/// Result of one action selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub action: usize,
    /// `1 - exploration_rate` at selection time, for both branches.
    pub confidence: f32,
}

/// Epsilon-greedy action selector with a decaying exploration rate.
///
/// The decay step is tied to completed training updates, not to decision
/// requests, so bursts of decisions without learning do not push the policy
/// toward pure exploitation.
#[derive(Debug)]
pub struct EpsilonGreedy {
    epsilon: f32,
    epsilon_decay: f32,
    epsilon_min: f32,
    rng: StdRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f32, epsilon_decay: f32, epsilon_min: f32) -> Self {
        EpsilonGreedy {
            epsilon,
            epsilon_decay,
            epsilon_min,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Overwrite the exploration rate (checkpoint restore).
    pub fn set_epsilon(&mut self, epsilon: f32) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    /// Pick an action for the encoded state: uniform over the actions with
    /// probability epsilon, otherwise the highest estimate with ties broken
    /// by lowest index.
    pub fn select(
        &mut self,
        value_fn: &mut ValueFunction,
        state: ArrayView1<f32>,
    ) -> Result<Selection> {
        let confidence = 1.0 - self.epsilon;

        let action = if self.rng.gen::<f32>() < self.epsilon {
            self.rng.gen_range(0..value_fn.action_count())
        } else {
            let estimates = value_fn.estimate(state);
            if estimates.iter().any(|v| !v.is_finite()) {
                return Err(AgentError::NumericalError(
                    "non-finite action-value estimate".to_string(),
                ));
            }
            let mut best = 0;
            for (i, &value) in estimates.iter().enumerate().skip(1) {
                if value > estimates[best] {
                    best = i;
                }
            }
            best
        };

        Ok(Selection { action, confidence })
    }

    /// Multiplicative decay toward the floor. Invoked once per completed
    /// training update.
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.epsilon_min);
    }
}

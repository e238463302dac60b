use ndarray::Array2;

use crate::error::Result;
use crate::policy::EpsilonGreedy;
use crate::replay::ReplayMemory;
use crate::value::ValueFunction;

/// Minibatch temporal-difference trainer.
///
/// Each step samples from replay memory, regresses the taken-action
/// estimates toward one-step bootstrapped targets, and decays the policy's
/// exploration rate. The same network produces both the acting estimate and
/// the bootstrap target.
#[derive(Debug)]
pub struct Trainer {
    pub gamma: f32,
    pub learning_rate: f32,
    pub batch_size: usize,
}

impl Trainer {
    pub fn new(gamma: f32, learning_rate: f32, batch_size: usize) -> Self {
        Trainer {
            gamma,
            learning_rate,
            batch_size,
        }
    }

    /// Run one training update. Returns `Ok(None)` without touching the
    /// weights while the memory holds fewer transitions than one batch —
    /// the expected state early in the agent's life, not an error.
    pub fn train_step(
        &self,
        memory: &ReplayMemory,
        value_fn: &mut ValueFunction,
        policy: &mut EpsilonGreedy,
    ) -> Result<Option<f32>> {
        if memory.len() < self.batch_size {
            return Ok(None);
        }

        let batch = memory.sample(self.batch_size);
        let state_size = value_fn.input_size();

        let mut states = Array2::zeros((batch.len(), state_size));
        let mut next_states = Array2::zeros((batch.len(), state_size));
        for (i, transition) in batch.iter().enumerate() {
            states.row_mut(i).assign(&transition.state);
            next_states.row_mut(i).assign(&transition.next_state);
        }

        let current_q = value_fn.estimate_batch(states.view());
        let next_q = value_fn.estimate_batch(next_states.view());

        // Targets start as a copy of the current estimates so the error is
        // zero everywhere except the taken action's column.
        let mut targets = current_q.clone();
        let mut squared_error = 0.0;
        for (i, transition) in batch.iter().enumerate() {
            let mut target = transition.reward;
            if !transition.done {
                let max_next = next_q
                    .row(i)
                    .iter()
                    .fold(f32::NEG_INFINITY, |max, &v| max.max(v));
                target += self.gamma * max_next;
            }
            let diff = current_q[[i, transition.action]] - target;
            squared_error += diff * diff;
            targets[[i, transition.action]] = target;
        }

        value_fn.fit_batch(states.view(), targets.view(), self.learning_rate);
        policy.decay();

        let loss = squared_error / batch.len() as f32;
        tracing::debug!(loss, epsilon = policy.epsilon(), "training step");
        Ok(Some(loss))
    }
}

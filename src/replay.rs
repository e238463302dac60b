use ndarray::Array1;
use rand::seq::index;
use rand::thread_rng;
use std::collections::VecDeque;

/// One observed state transition. Immutable once stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: Array1<f32>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Array1<f32>,
    pub done: bool,
}

/// Bounded FIFO store of past transitions.
///
/// Pushing past capacity evicts the oldest entry. Sampling draws uniformly
/// without replacement within one minibatch; consecutive minibatches are
/// independent draws. When fewer transitions are stored than requested the
/// batch comes back short — the trainer guards the size before sampling.
#[derive(Clone, Debug)]
pub struct ReplayMemory {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Self {
        ReplayMemory {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    pub fn sample(&self, batch_size: usize) -> Vec<&Transition> {
        let mut rng = thread_rng();
        let amount = batch_size.min(self.buffer.len());
        index::sample(&mut rng, self.buffer.len(), amount)
            .into_iter()
            .map(|i| &self.buffer[i])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

use ndarray::array;

use crate::replay::{ReplayMemory, Transition};

fn transition(tag: f32) -> Transition {
    Transition {
        state: array![tag],
        action: 0,
        reward: tag,
        next_state: array![tag + 1.0],
        done: false,
    }
}

#[test]
fn test_push_and_sample() {
    let mut memory = ReplayMemory::new(10);
    let stored = transition(0.5);
    memory.push(stored.clone());

    assert_eq!(memory.len(), 1);
    let sample = memory.sample(1);
    assert_eq!(sample[0], &stored);
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut memory = ReplayMemory::new(3);
    for i in 0..5 {
        memory.push(transition(i as f32));
    }

    assert_eq!(memory.len(), 3);

    let samples = memory.sample(3);
    let states: Vec<f32> = samples.iter().map(|t| t.state[0]).collect();
    assert!(states.contains(&2.0));
    assert!(states.contains(&3.0));
    assert!(states.contains(&4.0));
}

#[test]
fn test_is_empty() {
    let mut memory = ReplayMemory::new(10);
    assert!(memory.is_empty());

    memory.push(transition(0.0));
    assert!(!memory.is_empty());
}

#[test]
fn test_sample_without_replacement_within_batch() {
    let mut memory = ReplayMemory::new(10);
    for i in 0..5 {
        memory.push(transition(i as f32));
    }

    let samples = memory.sample(5);
    let mut states: Vec<f32> = samples.iter().map(|t| t.state[0]).collect();
    states.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(states, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_short_sample_when_underfilled() {
    let mut memory = ReplayMemory::new(10);
    for i in 0..3 {
        memory.push(transition(i as f32));
    }

    assert_eq!(memory.sample(10).len(), 3);
}

#[test]
fn test_sampling_reaches_post_eviction_entries() {
    // Push well past capacity so the deque's internal ring has wrapped,
    // then check every retained transition is still reachable.
    let mut memory = ReplayMemory::new(4);
    for i in 0..20 {
        memory.push(transition(i as f32));
    }

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        for sampled in memory.sample(2) {
            seen.insert(sampled.state[0] as i32);
        }
    }
    assert_eq!(seen.len(), 4);
    for tag in 16..20 {
        assert!(seen.contains(&tag));
    }
}

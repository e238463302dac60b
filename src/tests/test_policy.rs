use ndarray::array;

use crate::network::{Activation, NeuralNetwork};
use crate::optimizer::{OptimizerWrapper, SGD};
use crate::policy::EpsilonGreedy;
use crate::value::ValueFunction;

/// A linear 2-in 3-out approximator with hand-set weights, so the estimates
/// for input [1, 0] are exactly the first weight row.
fn fixed_value_function(first_row: [f32; 3]) -> ValueFunction {
    let mut network = NeuralNetwork::new(
        &[2, 3],
        &[Activation::Linear],
        OptimizerWrapper::SGD(SGD::new()),
    );
    network.layers[0].weights = array![
        [first_row[0], first_row[1], first_row[2]],
        [0.0, 0.0, 0.0]
    ];
    ValueFunction::from_network(network)
}

#[test]
fn test_zero_epsilon_exploits_deterministically() {
    let mut value_fn = fixed_value_function([0.1, 0.9, 0.5]);
    let mut policy = EpsilonGreedy::new(0.0, 0.995, 0.0);
    let state = array![1.0, 0.0];

    for _ in 0..20 {
        let selection = policy.select(&mut value_fn, state.view()).unwrap();
        assert_eq!(selection.action, 1);
        assert_eq!(selection.confidence, 1.0);
    }
}

#[test]
fn test_ties_break_toward_lowest_index() {
    let mut value_fn = fixed_value_function([0.5, 0.5, 0.2]);
    let mut policy = EpsilonGreedy::new(0.0, 0.995, 0.0);
    let state = array![1.0, 0.0];

    let selection = policy.select(&mut value_fn, state.view()).unwrap();
    assert_eq!(selection.action, 0);
}

#[test]
fn test_full_epsilon_explores_uniformly() {
    let mut value_fn = fixed_value_function([0.0, 100.0, 0.0]);
    let mut policy = EpsilonGreedy::new(1.0, 1.0, 1.0);
    let state = array![1.0, 0.0];

    let mut counts = [0usize; 3];
    for _ in 0..300 {
        let selection = policy.select(&mut value_fn, state.view()).unwrap();
        counts[selection.action] += 1;
        assert_eq!(selection.confidence, 0.0);
    }

    // Expected 100 per action; far-from-uniform draws would flag a biased
    // exploration branch.
    for &count in &counts {
        assert!(count > 50, "counts were {:?}", counts);
    }
}

#[test]
fn test_decay_respects_floor() {
    let mut policy = EpsilonGreedy::new(0.9, 0.5, 0.3);

    policy.decay();
    assert!((policy.epsilon() - 0.45).abs() < 1e-6);

    for _ in 0..100 {
        policy.decay();
    }
    assert_eq!(policy.epsilon(), 0.3);
}

#[test]
fn test_confidence_tracks_epsilon() {
    let mut value_fn = fixed_value_function([0.1, 0.9, 0.5]);
    let mut policy = EpsilonGreedy::new(0.25, 0.995, 0.01);
    let state = array![1.0, 0.0];

    let selection = policy.select(&mut value_fn, state.view()).unwrap();
    assert!((selection.confidence - 0.75).abs() < 1e-6);
}

#[test]
fn test_non_finite_estimates_are_an_error() {
    let mut value_fn = fixed_value_function([f32::NAN, 0.0, 0.0]);
    let mut policy = EpsilonGreedy::new(0.0, 0.995, 0.0);
    let state = array![1.0, 0.0];

    assert!(policy.select(&mut value_fn, state.view()).is_err());
}

#[test]
fn test_set_epsilon_clamps_to_unit_interval() {
    let mut policy = EpsilonGreedy::new(0.5, 0.995, 0.01);
    policy.set_epsilon(1.5);
    assert_eq!(policy.epsilon(), 1.0);
    policy.set_epsilon(-0.2);
    assert_eq!(policy.epsilon(), 0.0);
}

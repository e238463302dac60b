use ndarray::array;

use crate::network::{Activation, NeuralNetwork};
use crate::optimizer::{OptimizerWrapper, SGD};
use crate::policy::EpsilonGreedy;
use crate::replay::{ReplayMemory, Transition};
use crate::trainer::Trainer;
use crate::value::ValueFunction;

fn small_value_function() -> ValueFunction {
    ValueFunction::from_network(NeuralNetwork::new(
        &[2, 8, 2],
        &[Activation::Relu, Activation::Linear],
        OptimizerWrapper::SGD(SGD::new()),
    ))
}

fn transition(tag: f32, done: bool) -> Transition {
    Transition {
        state: array![tag, 1.0 - tag],
        action: (tag as usize) % 2,
        reward: tag,
        next_state: array![tag + 0.1, 0.9 - tag],
        done,
    }
}

#[test]
fn test_no_op_below_batch_size() {
    let mut value_fn = small_value_function();
    let mut policy = EpsilonGreedy::new(0.9, 0.995, 0.01);
    let trainer = Trainer::new(0.99, 0.01, 4);

    let mut memory = ReplayMemory::new(100);
    for i in 0..3 {
        memory.push(transition(i as f32 * 0.1, false));
    }

    let outcome = trainer.train_step(&memory, &mut value_fn, &mut policy).unwrap();
    assert!(outcome.is_none());

    // No decay happens without an update.
    assert_eq!(policy.epsilon(), 0.9);
}

#[test]
fn test_full_batch_returns_finite_loss_and_decays() {
    let mut value_fn = small_value_function();
    let mut policy = EpsilonGreedy::new(0.9, 0.995, 0.01);
    let trainer = Trainer::new(0.99, 0.01, 4);

    let mut memory = ReplayMemory::new(100);
    for i in 0..4 {
        memory.push(transition(i as f32 * 0.1, false));
    }

    let loss = trainer
        .train_step(&memory, &mut value_fn, &mut policy)
        .unwrap()
        .expect("full batch trains");

    assert!(loss.is_finite());
    assert!((policy.epsilon() - 0.9 * 0.995).abs() < 1e-6);
}

#[test]
fn test_decay_happens_once_per_update() {
    let mut value_fn = small_value_function();
    let mut policy = EpsilonGreedy::new(1.0, 0.9, 0.01);
    let trainer = Trainer::new(0.99, 0.001, 2);

    let mut memory = ReplayMemory::new(100);
    for i in 0..2 {
        memory.push(transition(i as f32 * 0.3, false));
    }

    for step in 1..=5 {
        trainer
            .train_step(&memory, &mut value_fn, &mut policy)
            .unwrap()
            .expect("full batch trains");
        let expected = 0.9f32.powi(step);
        assert!((policy.epsilon() - expected).abs() < 1e-5);
    }
}

#[test]
fn test_terminal_target_converges_to_reward() {
    // A single terminal transition: the bootstrapped target collapses to the
    // reward, so the taken action's estimate should converge there.
    let mut value_fn = ValueFunction::from_network(NeuralNetwork::new(
        &[2, 2],
        &[Activation::Linear],
        OptimizerWrapper::SGD(SGD::new()),
    ));
    let mut policy = EpsilonGreedy::new(0.5, 1.0, 0.5);
    let trainer = Trainer::new(0.99, 0.1, 1);

    let mut memory = ReplayMemory::new(10);
    memory.push(Transition {
        state: array![1.0, 0.0],
        action: 0,
        reward: 1.0,
        next_state: array![0.0, 0.0],
        done: true,
    });

    for _ in 0..200 {
        trainer
            .train_step(&memory, &mut value_fn, &mut policy)
            .unwrap()
            .expect("full batch trains");
    }

    let estimate = value_fn.estimate(array![1.0, 0.0].view())[0];
    assert!(
        (estimate - 1.0).abs() < 0.05,
        "estimate did not converge: {}",
        estimate
    );
}

#[test]
fn test_loss_shrinks_on_a_fixed_batch() {
    let mut value_fn = small_value_function();
    let mut policy = EpsilonGreedy::new(0.9, 1.0, 0.9);
    let trainer = Trainer::new(0.0, 0.05, 2);

    let mut memory = ReplayMemory::new(10);
    memory.push(transition(0.2, true));
    memory.push(transition(0.8, true));

    let first = trainer
        .train_step(&memory, &mut value_fn, &mut policy)
        .unwrap()
        .expect("full batch trains");
    let mut last = first;
    for _ in 0..100 {
        last = trainer
            .train_step(&memory, &mut value_fn, &mut policy)
            .unwrap()
            .expect("full batch trains");
    }

    assert!(last < first, "loss went from {} to {}", first, last);
}

use std::env;

use crate::config::AgentConfig;

#[test]
fn test_default_config_is_valid() {
    let config = AgentConfig::default();
    config.validate().expect("default config should be valid");
    assert_eq!(config.input_size(), 210);
}

#[test]
fn test_validation_rejects_zero_batch() {
    let mut config = AgentConfig::default();
    config.batch_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_negative_learning_rate() {
    let mut config = AgentConfig::default();
    config.learning_rate = -0.001;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_gamma_out_of_range() {
    let mut config = AgentConfig::default();
    config.gamma = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_epsilon_floor_above_start() {
    let mut config = AgentConfig::default();
    config.epsilon_start = 0.1;
    config.epsilon_min = 0.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_capacity_below_batch() {
    let mut config = AgentConfig::default();
    config.replay_capacity = 10;
    config.batch_size = 64;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_full_dropout() {
    let mut config = AgentConfig::default();
    config.dropout_rate = 1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_from_env_overrides_and_parse_errors() {
    // Single test for everything environment-backed: the process
    // environment is shared across the test harness's threads.
    env::set_var("BATCH_SIZE", "32");
    env::set_var("LEARNING_RATE", "0.001");
    env::set_var("MODEL_PATH", "models/agent.bin");

    let config = AgentConfig::from_env().unwrap();
    assert_eq!(config.batch_size, 32);
    assert!((config.learning_rate - 0.001).abs() < 1e-9);
    assert_eq!(
        config.model_path.as_deref(),
        Some(std::path::Path::new("models/agent.bin"))
    );
    // Untouched knobs keep their defaults.
    assert_eq!(config.replay_capacity, 100_000);

    env::set_var("BATCH_SIZE", "not-a-number");
    assert!(AgentConfig::from_env().is_err());

    env::remove_var("BATCH_SIZE");
    env::remove_var("LEARNING_RATE");
    env::remove_var("MODEL_PATH");
}

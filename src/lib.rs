//! # Tetris Agent - Reinforcement-Learning Decision Engine
//!
//! A decision engine for a falling-block puzzle game: given a snapshot of
//! the board, the active piece, and game statistics, it chooses one discrete
//! action per request and improves its policy from recorded experience.
//!
//! ## Key Pieces
//!
//! - **Featurization**: board and active piece flattened into a fixed-length
//!   vector, deterministic per snapshot
//! - **Action-value estimation**: a small fully-connected network with one
//!   output per discrete action, trained with Adam
//! - **Epsilon-greedy policy**: decaying exploration tied to training
//!   progress, not request volume
//! - **Reward shaping**: survival, line clears, stack height, holes, and
//!   game over combined into one scalar signal
//! - **Experience replay**: bounded FIFO transition store sampled uniformly
//!   for decorrelated minibatch updates
//! - **Checkpointing**: weights, optimizer state, and exploration rate
//!   round-trip through one serialized bundle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tetris_agent::agent::TetrisAgent;
//! use tetris_agent::config::AgentConfig;
//! use tetris_agent::game::GameSnapshot;
//!
//! let config = AgentConfig::from_env().unwrap();
//! let mut agent = TetrisAgent::new(&config).unwrap();
//!
//! // One decision per inbound snapshot.
//! let snapshot = GameSnapshot {
//!     board: vec![vec![0; 10]; 20],
//!     ..GameSnapshot::default()
//! };
//! let decision = agent.decide(&snapshot);
//! let _payload = serde_json::to_string(decision.descriptor()).unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - Orchestrator: decide, observe, train, checkpoint
//! - [`checkpoint`] - The persisted weights/optimizer/exploration bundle
//! - [`config`] - Hyperparameters and board geometry
//! - [`encoder`] - Snapshot featurization
//! - [`error`] - Error types and result handling
//! - [`game`] - Wire-shaped snapshot and action payload types
//! - [`network`] - The fully-connected approximator internals
//! - [`optimizer`] - SGD and Adam update rules
//! - [`policy`] - Epsilon-greedy action selection
//! - [`replay`] - Bounded experience replay
//! - [`reward`] - Reward shaping terms
//! - [`shared`] - Thread-safe agent handle
//! - [`trainer`] - Minibatch temporal-difference updates
//! - [`value`] - The action-value approximator surface

pub mod agent;
pub mod checkpoint;
pub mod config;
pub mod encoder;
pub mod error;
pub mod game;
pub mod network;
pub mod optimizer;
pub mod policy;
pub mod replay;
pub mod reward;
pub mod shared;
pub mod trainer;
pub mod value;

#[cfg(test)]
mod tests;

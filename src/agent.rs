use std::path::Path;

use tracing::{info, warn};

use crate::checkpoint::Checkpoint;
use crate::config::AgentConfig;
use crate::encoder::StateEncoder;
use crate::error::{AgentError, Result};
use crate::game::{ActionDescriptor, ActionKind, GameSnapshot, ACTION_COUNT};
use crate::policy::EpsilonGreedy;
use crate::replay::{ReplayMemory, Transition};
use crate::reward::RewardShaper;
use crate::trainer::Trainer;
use crate::value::ValueFunction;

/// Outcome of one decision request.
///
/// Every request yields a valid action descriptor; the variant records
/// whether it came from the policy or from the degraded fallback path, so
/// callers and tests can tell genuine exploitation from error recovery.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// The policy selected this action.
    Policy(ActionDescriptor),
    /// Something in the decision pipeline failed; hard drop, confidence 0.
    Fallback(ActionDescriptor),
}

impl Decision {
    pub fn descriptor(&self) -> &ActionDescriptor {
        match self {
            Decision::Policy(descriptor) | Decision::Fallback(descriptor) => descriptor,
        }
    }

    pub fn into_descriptor(self) -> ActionDescriptor {
        match self {
            Decision::Policy(descriptor) | Decision::Fallback(descriptor) => descriptor,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Fallback(_))
    }
}

/// The decision engine: featurization, action-value estimation,
/// epsilon-greedy selection, reward shaping, replay memory, and training,
/// composed behind one owner.
///
/// # Example
///
/// ```rust,no_run
/// use tetris_agent::agent::TetrisAgent;
/// use tetris_agent::config::AgentConfig;
/// use tetris_agent::game::GameSnapshot;
///
/// let config = AgentConfig::default();
/// let mut agent = TetrisAgent::new(&config).unwrap();
///
/// let snapshot = GameSnapshot {
///     board: vec![vec![0; 10]; 20],
///     ..GameSnapshot::default()
/// };
/// let decision = agent.decide(&snapshot);
/// println!("{:?}", decision.descriptor());
/// ```
#[derive(Debug)]
pub struct TetrisAgent {
    encoder: StateEncoder,
    value_fn: ValueFunction,
    policy: EpsilonGreedy,
    memory: ReplayMemory,
    shaper: RewardShaper,
    trainer: Trainer,
    restored: bool,
}

impl TetrisAgent {
    /// Build an agent with the default approximator architecture. Restores
    /// the configured checkpoint when one exists; a missing file starts
    /// fresh, a corrupt or incompatible one is logged and ignored.
    pub fn new(config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let value_fn = ValueFunction::new(
            config.input_size(),
            config.hidden_size,
            ACTION_COUNT,
            config.dropout_rate,
        );
        Self::with_value_function(config, value_fn)
    }

    /// Build an agent around a caller-supplied approximator. The
    /// approximator's input width must equal the encoder's output length and
    /// its output width the action count; a mismatch is fatal here rather
    /// than silently truncated or padded.
    pub fn with_value_function(config: &AgentConfig, value_fn: ValueFunction) -> Result<Self> {
        config.validate()?;
        let encoder = StateEncoder::new(config.rows, config.cols);

        if value_fn.input_size() != encoder.feature_len() {
            return Err(AgentError::config_mismatch(
                format!("approximator input width {}", encoder.feature_len()),
                format!("{}", value_fn.input_size()),
            ));
        }
        if value_fn.action_count() != ACTION_COUNT {
            return Err(AgentError::config_mismatch(
                format!("approximator output width {}", ACTION_COUNT),
                format!("{}", value_fn.action_count()),
            ));
        }

        let mut agent = TetrisAgent {
            encoder,
            value_fn,
            policy: EpsilonGreedy::new(
                config.epsilon_start,
                config.epsilon_decay,
                config.epsilon_min,
            ),
            memory: ReplayMemory::new(config.replay_capacity),
            shaper: RewardShaper::default(),
            trainer: Trainer::new(config.gamma, config.learning_rate, config.batch_size),
            restored: false,
        };

        if let Some(path) = &config.model_path {
            agent.restored = agent.try_restore(path);
        }
        Ok(agent)
    }

    fn try_restore(&mut self, path: &Path) -> bool {
        if !path.exists() {
            info!(path = %path.display(), "no checkpoint found, starting with fresh weights");
            return false;
        }
        match Checkpoint::load(path).and_then(|checkpoint| self.value_fn.restore(checkpoint)) {
            Ok(epsilon) => {
                self.policy.set_epsilon(epsilon);
                info!(path = %path.display(), epsilon, "checkpoint restored");
                true
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring unusable checkpoint, starting with fresh weights");
                false
            }
        }
    }

    /// Whether construction restored a checkpoint.
    pub fn restored_from_checkpoint(&self) -> bool {
        self.restored
    }

    /// Choose an action for a snapshot. Never fails: any internal error is
    /// logged and downgraded to the fallback descriptor, so every request
    /// receives a valid action.
    pub fn decide(&mut self, snapshot: &GameSnapshot) -> Decision {
        match self.try_decide(snapshot) {
            Ok(descriptor) => Decision::Policy(descriptor),
            Err(err) => {
                warn!(%err, "decision failed, falling back to hard drop");
                Decision::Fallback(ActionKind::HardDrop.descriptor(0.0))
            }
        }
    }

    fn try_decide(&mut self, snapshot: &GameSnapshot) -> Result<ActionDescriptor> {
        let features = self.encoder.encode(snapshot)?;
        let selection = self.policy.select(&mut self.value_fn, features.view())?;
        let kind = ActionKind::from_index(selection.action).ok_or_else(|| {
            AgentError::invalid_parameter("action", "selected index out of range")
        })?;
        Ok(kind.descriptor(selection.confidence))
    }

    /// Record one observed transition: shape the reward, encode both
    /// snapshots, and push the result into replay memory. Returns the shaped
    /// reward. When and how often to follow up with `train_step` is the
    /// caller's scheduling decision.
    pub fn observe(
        &mut self,
        previous: &GameSnapshot,
        action: ActionKind,
        next: &GameSnapshot,
    ) -> Result<f32> {
        // Encode first: it validates the board geometry the shaper's scans
        // rely on.
        let state = self.encoder.encode(previous)?;
        let next_state = self.encoder.encode(next)?;
        let reward = self.shaper.shape(previous, next, action);
        self.memory.push(Transition {
            state,
            action: action.index(),
            reward,
            next_state,
            done: next.stats.game_over,
        });
        Ok(reward)
    }

    /// Run one training update. `Ok(None)` while replay memory holds fewer
    /// transitions than one batch.
    pub fn train_step(&mut self) -> Result<Option<f32>> {
        self.trainer
            .train_step(&self.memory, &mut self.value_fn, &mut self.policy)
    }

    /// Persist weights, optimizer state, and exploration rate.
    pub fn save_checkpoint(&self, path: &Path) -> Result<()> {
        let checkpoint = self.value_fn.to_checkpoint(self.policy.epsilon());
        checkpoint.save(path)?;
        info!(path = %path.display(), "checkpoint saved");
        Ok(())
    }

    /// Restore weights, optimizer state, and exploration rate from a file.
    /// Unlike construction-time loading this surfaces failures to the
    /// caller.
    pub fn restore_checkpoint(&mut self, path: &Path) -> Result<()> {
        let checkpoint = Checkpoint::load(path)?;
        let epsilon = self.value_fn.restore(checkpoint)?;
        self.policy.set_epsilon(epsilon);
        info!(path = %path.display(), epsilon, "checkpoint restored");
        Ok(())
    }

    pub fn exploration_rate(&self) -> f32 {
        self.policy.epsilon()
    }

    /// Force the exploration rate (tests and evaluation runs).
    pub fn set_exploration_rate(&mut self, epsilon: f32) {
        self.policy.set_epsilon(epsilon);
    }

    /// Number of transitions currently held in replay memory.
    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    pub fn value_function_mut(&mut self) -> &mut ValueFunction {
        &mut self.value_fn
    }
}

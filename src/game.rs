//! Wire-shaped game types: the snapshot the decision engine consumes and the
//! action descriptor it produces.
//!
//! These mirror the JSON payloads exchanged with the game collaborator. The
//! transport that carries them is out of scope; this module only fixes the
//! payload shapes and the discrete action vocabulary.

use serde::{Deserialize, Serialize};

/// The seven tetromino kinds, in one-hot encoding order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    #[default]
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const COUNT: usize = 7;

    /// Slot of this kind in the one-hot piece encoding.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The active piece: kind plus position and rotation state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type", default)]
    pub kind: PieceKind,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    /// Rotation state, 0..=3.
    #[serde(default)]
    pub rotation: u8,
}

/// Cumulative game statistics reported with every snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub lines_cleared: u64,
    pub score: u64,
    pub level: u32,
    pub game_over: bool,
}

/// One snapshot of the game, as delivered per decision request.
///
/// `board` is row-major, row 0 at the top; 0 is an empty cell, any nonzero
/// value is occupied (the value may carry a color or piece id).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<i32>>,
    #[serde(default)]
    pub current_piece: Option<Piece>,
    #[serde(default)]
    pub next_pieces: Vec<PieceKind>,
    #[serde(default)]
    pub hold_piece: Option<PieceKind>,
    #[serde(default)]
    pub stats: GameStats,
}

/// The discrete actions the agent can choose between, in action-index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Left,
    Right,
    RotateCw,
    RotateCcw,
    SoftDrop,
    HardDrop,
    Hold,
}

/// Number of discrete actions, and the approximator's output width.
pub const ACTION_COUNT: usize = 7;

impl ActionKind {
    pub const ALL: [ActionKind; ACTION_COUNT] = [
        ActionKind::Left,
        ActionKind::Right,
        ActionKind::RotateCw,
        ActionKind::RotateCcw,
        ActionKind::SoftDrop,
        ActionKind::HardDrop,
        ActionKind::Hold,
    ];

    /// Map an action index back to its kind. `None` when out of range.
    pub fn from_index(index: usize) -> Option<ActionKind> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Action-specific parameter mapping attached to outbound descriptors.
    pub fn parameters(self) -> ActionParameters {
        match self {
            ActionKind::Left => ActionParameters::Move { direction: MoveDirection::Left },
            ActionKind::Right => ActionParameters::Move { direction: MoveDirection::Right },
            ActionKind::RotateCw => ActionParameters::Rotate { rotation: SpinDirection::Clockwise },
            ActionKind::RotateCcw => {
                ActionParameters::Rotate { rotation: SpinDirection::Counterclockwise }
            }
            ActionKind::SoftDrop => ActionParameters::Drop { drop_type: DropKind::SoftDrop },
            ActionKind::HardDrop => ActionParameters::Drop { drop_type: DropKind::HardDrop },
            ActionKind::Hold => ActionParameters::Empty {},
        }
    }

    /// Build the outbound descriptor for this action.
    pub fn descriptor(self, confidence: f32) -> ActionDescriptor {
        ActionDescriptor {
            action_type: self,
            parameters: self.parameters(),
            confidence,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinDirection {
    Clockwise,
    Counterclockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropKind {
    SoftDrop,
    HardDrop,
}

/// Parameter mapping whose shape depends on the action kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionParameters {
    Move { direction: MoveDirection },
    Rotate { rotation: SpinDirection },
    Drop { drop_type: DropKind },
    Empty {},
}

/// The outbound payload for one decision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub action_type: ActionKind,
    pub parameters: ActionParameters,
    /// `1 - exploration_rate` for policy decisions, 0.0 for the fallback.
    pub confidence: f32,
}

//! Featurization of game snapshots into the fixed-length vectors the
//! approximator consumes.

use ndarray::Array1;

use crate::error::{AgentError, Result};
use crate::game::{GameSnapshot, Piece, PieceKind};

/// Length of the piece sub-vector: one-hot kind plus normalized x, y, rotation.
pub const PIECE_ENCODING_LEN: usize = PieceKind::COUNT + 3;

/// Converts raw game snapshots into feature vectors.
///
/// The encoding is a deterministic function of the snapshot: the board grid
/// flattened row-major (occupancy values as-is), followed by the active-piece
/// sub-vector. A missing piece encodes as an all-zero sub-vector of the same
/// length, so the output length depends only on the board geometry.
#[derive(Clone, Copy, Debug)]
pub struct StateEncoder {
    rows: usize,
    cols: usize,
}

impl StateEncoder {
    pub fn new(rows: usize, cols: usize) -> Self {
        StateEncoder { rows, cols }
    }

    /// Output length: `rows * cols + 10`.
    pub fn feature_len(&self) -> usize {
        self.rows * self.cols + PIECE_ENCODING_LEN
    }

    /// Encode a snapshot. Fails when the board grid does not match the
    /// configured geometry; the decision path turns that into a fallback.
    pub fn encode(&self, snapshot: &GameSnapshot) -> Result<Array1<f32>> {
        if snapshot.board.len() != self.rows {
            return Err(AgentError::MalformedState(format!(
                "expected {} board rows, got {}",
                self.rows,
                snapshot.board.len()
            )));
        }

        let mut features = Vec::with_capacity(self.feature_len());
        for (i, row) in snapshot.board.iter().enumerate() {
            if row.len() != self.cols {
                return Err(AgentError::MalformedState(format!(
                    "expected {} columns in row {}, got {}",
                    self.cols,
                    i,
                    row.len()
                )));
            }
            features.extend(row.iter().map(|&cell| cell as f32));
        }

        self.encode_piece(snapshot.current_piece.as_ref(), &mut features);
        Ok(Array1::from_vec(features))
    }

    fn encode_piece(&self, piece: Option<&Piece>, out: &mut Vec<f32>) {
        match piece {
            None => out.extend(std::iter::repeat(0.0).take(PIECE_ENCODING_LEN)),
            Some(piece) => {
                let mut one_hot = [0.0f32; PieceKind::COUNT];
                one_hot[piece.kind.index()] = 1.0;
                out.extend_from_slice(&one_hot);
                out.push(piece.x as f32 / self.cols as f32);
                out.push(piece.y as f32 / self.rows as f32);
                out.push(piece.rotation as f32 / 4.0);
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::Position;

/// The result of resolving one requested move.
///
/// Every variant carries the positions that are meaningful for it, so there is
/// no need to guess whether a position is the one before or after the move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MoveOutcome {
    /// The move touched the end line. The race is over.
    Win {
        competitor: String,
        from: Position,
        to: Position,
    },
    /// The move left the track and the competitor is out of the race.
    CrashLeaveRace {
        competitor: String,
        last_position: Position,
        attempted: Position,
    },
    /// The move left the track. The competitor stays put and loses the turn.
    CrashContinueWithPenalty {
        competitor: String,
        position: Position,
        attempted: Position,
    },
    /// The destination was occupied, so the move was rejected and the same
    /// competitor has to move again.
    CollisionNotAllowed {
        competitor: String,
        position: Position,
        attempted: Position,
    },
    /// The destination was occupied, but the move went through.
    CollisionAllowed {
        competitor: String,
        from: Position,
        to: Position,
    },
    Success {
        competitor: String,
        from: Position,
        to: Position,
    },
}

/// The kind of a [`MoveOutcome`], without its data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcomeKind {
    Win,
    CrashLeaveRace,
    CrashContinueWithPenalty,
    CollisionNotAllowed,
    CollisionAllowed,
    Success,
}

impl MoveOutcome {
    pub fn kind(&self) -> MoveOutcomeKind {
        match self {
            MoveOutcome::Win { .. } => MoveOutcomeKind::Win,
            MoveOutcome::CrashLeaveRace { .. } => MoveOutcomeKind::CrashLeaveRace,
            MoveOutcome::CrashContinueWithPenalty { .. } => {
                MoveOutcomeKind::CrashContinueWithPenalty
            }
            MoveOutcome::CollisionNotAllowed { .. } => MoveOutcomeKind::CollisionNotAllowed,
            MoveOutcome::CollisionAllowed { .. } => MoveOutcomeKind::CollisionAllowed,
            MoveOutcome::Success { .. } => MoveOutcomeKind::Success,
        }
    }

    /// The name of the competitor who made the move.
    pub fn competitor(&self) -> &str {
        match self {
            MoveOutcome::Win { competitor, .. }
            | MoveOutcome::CrashLeaveRace { competitor, .. }
            | MoveOutcome::CrashContinueWithPenalty { competitor, .. }
            | MoveOutcome::CollisionNotAllowed { competitor, .. }
            | MoveOutcome::CollisionAllowed { competitor, .. }
            | MoveOutcome::Success { competitor, .. } => competitor,
        }
    }

    /// Where the competitor stands after the move, or `None` if they left the race.
    pub fn position_after(&self) -> Option<Position> {
        match *self {
            MoveOutcome::CrashLeaveRace { .. } => None,
            MoveOutcome::CrashContinueWithPenalty { position, .. }
            | MoveOutcome::CollisionNotAllowed { position, .. } => Some(position),
            MoveOutcome::Win { to, .. }
            | MoveOutcome::CollisionAllowed { to, .. }
            | MoveOutcome::Success { to, .. } => Some(to),
        }
    }

    /// Did the move hand the turn to somebody else?
    pub fn ends_turn(&self) -> bool {
        !matches!(
            self,
            MoveOutcome::CollisionNotAllowed { .. } | MoveOutcome::Win { .. }
        )
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveOutcome::Win { competitor, .. } => write!(f, "{} has won the race", competitor),
            MoveOutcome::CrashLeaveRace {
                competitor,
                attempted,
                ..
            } => write!(
                f,
                "{} crashed moving to {} and is out of the race",
                competitor, attempted
            ),
            MoveOutcome::CrashContinueWithPenalty {
                competitor,
                attempted,
                ..
            } => write!(
                f,
                "{} crashed moving to {} and loses the turn",
                competitor, attempted
            ),
            MoveOutcome::CollisionNotAllowed {
                competitor,
                attempted,
                ..
            } => write!(
                f,
                "{} cannot move to {}, it is occupied",
                competitor, attempted
            ),
            MoveOutcome::CollisionAllowed { competitor, to, .. }
            | MoveOutcome::Success { competitor, to, .. } => {
                write!(f, "{} moved to {}", competitor, to)
            }
        }
    }
}

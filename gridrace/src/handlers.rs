use tracing::debug;

use crate::race::RaceState;
use crate::{
    CollisionRule, CrashRule, IllegalRequest, InvalidRace, MoveOutcome, Position, RuleSet,
    WinRule,
};

/// One stage of move resolution.
///
/// A handler first decides whether it claims a move, and if it does, commits
/// the move's effects to the race state and produces its outcome. Handlers run
/// in the fixed order win, crash, collision. A move no handler claims is an
/// ordinary successful move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Handler {
    Win(WinRule),
    Crash(CrashRule),
    Collision(CollisionRule),
}

impl Handler {
    pub fn name(&self) -> &'static str {
        match self {
            Handler::Win(_) => "win",
            Handler::Crash(_) => "crash",
            Handler::Collision(_) => "collision",
        }
    }

    /// Does this handler claim the move from `from` to `to`?
    pub(crate) fn detect(&self, state: &RaceState, from: Position, to: Position) -> bool {
        match self {
            Handler::Win(WinRule::FirstCrossing) => state.track.crosses_end_line(from, to),
            Handler::Crash(_) => state.track.is_crashing(from, to),
            // Another competitor's marker on the destination. The track's flag
            // alone also covers the mover's own cell, so staying put only
            // collides when the cell is shared.
            Handler::Collision(_) => {
                state.roster.is_shared(to) || (from != to && state.track.is_colliding(to))
            }
        }
    }

    /// Applies the effects of a claimed move.
    pub(crate) fn commit(
        &self,
        state: &mut RaceState,
        from: Position,
        to: Position,
    ) -> Result<MoveOutcome, IllegalRequest> {
        let competitor = String::from(state.roster.current()?.name());
        let outcome = match self {
            Handler::Win(WinRule::FirstCrossing) => {
                relocate_current(state, from, to)?;
                state.winner = Some(competitor.clone());
                MoveOutcome::Win {
                    competitor,
                    from,
                    to,
                }
            }
            Handler::Crash(CrashRule::LeaveRace) => {
                let shared = state.roster.is_shared(from);
                state.roster.remove_current()?;
                if !shared && state.track.contains(from) {
                    state.track.free(from)?;
                }
                debug!(%competitor, "Removed from the race");
                MoveOutcome::CrashLeaveRace {
                    competitor,
                    last_position: from,
                    attempted: to,
                }
            }
            Handler::Crash(CrashRule::ContinueWithPenalty) => {
                state.roster.current_mut()?.reset_moves();
                state.roster.advance()?;
                MoveOutcome::CrashContinueWithPenalty {
                    competitor,
                    position: from,
                    attempted: to,
                }
            }
            Handler::Collision(CollisionRule::NotAllowed) => MoveOutcome::CollisionNotAllowed {
                competitor,
                position: from,
                attempted: to,
            },
            Handler::Collision(CollisionRule::Allowed) => {
                relocate_current(state, from, to)?;
                state.roster.advance()?;
                MoveOutcome::CollisionAllowed {
                    competitor,
                    from,
                    to,
                }
            }
        };
        Ok(outcome)
    }
}

/// The fallback for moves no handler claims.
pub(crate) fn commit_success(
    state: &mut RaceState,
    from: Position,
    to: Position,
) -> Result<MoveOutcome, IllegalRequest> {
    let competitor = String::from(state.roster.current()?.name());
    relocate_current(state, from, to)?;
    state.roster.advance()?;
    Ok(MoveOutcome::Success {
        competitor,
        from,
        to,
    })
}

// Moves the current competitor and keeps the track's occupancy in sync. A cell
// that another competitor still stands on stays occupied.
fn relocate_current(
    state: &mut RaceState,
    from: Position,
    to: Position,
) -> Result<(), IllegalRequest> {
    let shared = state.roster.is_shared(from);
    state.roster.current_mut()?.move_to(to);
    if !shared && state.track.contains(from) {
        state.track.free(from)?;
    }
    if state.track.contains(to) {
        state.track.occupy(to)?;
    }
    Ok(())
}

/// The validated handlers of a race: exactly one win, one crash and one
/// collision handler, in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerChain {
    handlers: [Handler; 3],
}

impl HandlerChain {
    /// Checks the handlers are a win, a crash and a collision handler, in that order.
    pub fn new(handlers: &[Handler]) -> Result<Self, InvalidRace> {
        let [first, second, third] = handlers else {
            return Err(InvalidRace::WrongHandlerCount {
                count: handlers.len(),
            });
        };
        if !matches!(first, Handler::Win(_)) {
            return Err(InvalidRace::HandlerOutOfOrder {
                slot: 0,
                expected: "win",
            });
        }
        if !matches!(second, Handler::Crash(_)) {
            return Err(InvalidRace::HandlerOutOfOrder {
                slot: 1,
                expected: "crash",
            });
        }
        if !matches!(third, Handler::Collision(_)) {
            return Err(InvalidRace::HandlerOutOfOrder {
                slot: 2,
                expected: "collision",
            });
        }
        Ok(Self {
            handlers: [*first, *second, *third],
        })
    }

    pub fn handlers(&self) -> &[Handler; 3] {
        &self.handlers
    }

    pub fn rules(&self) -> RuleSet {
        let mut rules = RuleSet::default();
        for handler in self.handlers {
            match handler {
                Handler::Win(rule) => rules.win = rule,
                Handler::Crash(rule) => rules.crash = rule,
                Handler::Collision(rule) => rules.collision = rule,
            }
        }
        rules
    }

    /// Runs the handlers in order. The first one to claim the move commits it,
    /// otherwise the move is an ordinary success.
    pub(crate) fn resolve(
        &self,
        state: &mut RaceState,
        from: Position,
        to: Position,
    ) -> Result<MoveOutcome, IllegalRequest> {
        for handler in &self.handlers {
            if handler.detect(state, from, to) {
                return handler.commit(state, from, to);
            }
        }
        commit_success(state, from, to)
    }
}

impl From<RuleSet> for HandlerChain {
    fn from(rules: RuleSet) -> Self {
        Self {
            handlers: [
                Handler::Win(rules.win),
                Handler::Crash(rules.crash),
                Handler::Collision(rules.collision),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_checked() {
        let rules = RuleSet::default();
        assert_eq!(
            HandlerChain::new(&rules.handlers()),
            Ok(HandlerChain::from(rules))
        );

        let swapped = [
            Handler::Crash(CrashRule::LeaveRace),
            Handler::Win(WinRule::FirstCrossing),
            Handler::Collision(CollisionRule::Allowed),
        ];
        assert_eq!(
            HandlerChain::new(&swapped),
            Err(InvalidRace::HandlerOutOfOrder {
                slot: 0,
                expected: "win"
            })
        );

        let twice = [
            Handler::Win(WinRule::FirstCrossing),
            Handler::Crash(CrashRule::LeaveRace),
            Handler::Crash(CrashRule::LeaveRace),
        ];
        assert_eq!(
            HandlerChain::new(&twice),
            Err(InvalidRace::HandlerOutOfOrder {
                slot: 2,
                expected: "collision"
            })
        );

        assert_eq!(
            HandlerChain::new(&rules.handlers()[..2]),
            Err(InvalidRace::WrongHandlerCount { count: 2 })
        );
    }

    #[test]
    fn rules_round_trip() {
        let rules = RuleSet {
            win: WinRule::FirstCrossing,
            crash: CrashRule::ContinueWithPenalty,
            collision: CollisionRule::Allowed,
        };
        assert_eq!(HandlerChain::from(rules).rules(), rules);
    }
}

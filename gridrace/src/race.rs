use tracing::debug;

use crate::{
    initial_positions, is_move_offset, Competitor, Handler, HandlerChain, IllegalRequest,
    InvalidRace, MoveOutcome, MoveWindow, Position, Roster, RuleSet, Track,
};

/// Everything the handlers read and modify while resolving a move.
#[derive(Clone, Debug)]
pub(crate) struct RaceState {
    pub(crate) track: Track,
    pub(crate) roster: Roster,
    pub(crate) winner: Option<String>,
}

/// A single race: a track, the competitors on it and the rules that decide
/// the outcome of their moves.
///
/// Moves are requested one at a time with [`Race::resolve_move`], always on
/// behalf of the current competitor. A request either produces exactly one
/// [`MoveOutcome`] or fails with an [`IllegalRequest`], in which case nothing
/// changes.
#[derive(Clone, Debug)]
pub struct Race {
    state: RaceState,
    handlers: HandlerChain,
}

impl Race {
    /// Assembles a race and places the competitors.
    ///
    /// `handlers` must be exactly one win, one crash and one collision handler,
    /// in that order.
    pub fn new(
        mut track: Track,
        competitors: Vec<Competitor>,
        handlers: &[Handler],
    ) -> Result<Self, InvalidRace> {
        let handlers = HandlerChain::new(handlers)?;
        let mut roster = Roster::new(competitors)?;
        let positions = initial_positions(&mut track, roster.len())?;
        for (idx, position) in positions.into_iter().enumerate() {
            if let Some(competitor) = roster.get_mut_at(idx) {
                competitor.move_to(position);
                debug!(competitor = competitor.name(), %position, "Placed on the track");
            }
        }
        Ok(Self {
            state: RaceState {
                track,
                roster,
                winner: None,
            },
            handlers,
        })
    }

    pub fn with_rules(
        track: Track,
        competitors: Vec<Competitor>,
        rules: RuleSet,
    ) -> Result<Self, InvalidRace> {
        Self::new(track, competitors, &rules.handlers())
    }

    pub fn track(&self) -> &Track {
        &self.state.track
    }

    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    pub fn handlers(&self) -> &[Handler; 3] {
        self.handlers.handlers()
    }

    pub fn rules(&self) -> RuleSet {
        self.handlers.rules()
    }

    /// The competitor whose turn it is.
    pub fn current_competitor(&self) -> Result<&Competitor, IllegalRequest> {
        self.state.roster.current()
    }

    /// The cells the current competitor may move to.
    pub fn current_moves(&self) -> Result<&MoveWindow, IllegalRequest> {
        Ok(self.current_competitor()?.moves())
    }

    /// The competitors still in the race, in turn order.
    pub fn competitors(&self) -> impl Iterator<Item = &Competitor> {
        self.state.roster.iter()
    }

    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.state.roster.get(name)?.position()
    }

    pub fn is_occupied(&self, position: Position) -> Result<bool, IllegalRequest> {
        self.state.track.is_occupied(position)
    }

    /// Can a competitor stand at `position`?
    pub fn is_position_legal(&self, position: Position) -> bool {
        self.state.track.contains(position)
    }

    /// Has every competitor left the race?
    pub fn all_retired(&self) -> bool {
        self.state.roster.is_empty()
    }

    pub fn winner(&self) -> Option<&str> {
        self.state.winner.as_deref()
    }

    /// Is there a winner, or nobody left to move?
    pub fn is_finished(&self) -> bool {
        self.state.winner.is_some() || self.all_retired()
    }

    /// Moves the current competitor by `offset`, which must be one of the nine
    /// offsets in [`crate::MOVE_OFFSETS`].
    pub fn resolve_move(&mut self, offset: Position) -> Result<MoveOutcome, IllegalRequest> {
        if let Some(winner) = &self.state.winner {
            return Err(IllegalRequest::RaceAlreadyWon {
                winner: winner.clone(),
            });
        }
        if !is_move_offset(offset) {
            return Err(IllegalRequest::OffsetOutsideWindow { offset });
        }
        let current = self.current_competitor()?;
        let from = current.position().ok_or_else(|| IllegalRequest::NotPlaced {
            competitor: String::from(current.name()),
        })?;
        let to = from
            .checked_add(offset)
            .ok_or(IllegalRequest::OutOfBounds { position: from })?;
        self.resolve(from, to)
    }

    /// Runs the handlers on a move of the current competitor from `from` to `to`.
    pub(crate) fn resolve(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<MoveOutcome, IllegalRequest> {
        let outcome = self.handlers.resolve(&mut self.state, from, to)?;
        debug!(
            competitor = outcome.competitor(),
            kind = ?outcome.kind(),
            %from,
            %to,
            "Resolved move"
        );
        Ok(outcome)
    }
}

use std::collections::VecDeque;
use std::path::Path;

use gridrace::{Position, Race, MOVE_OFFSETS};
use rand::rngs::StdRng;
use rand::Rng;

/// Decides the moves of the competitors.
pub trait MoveSource {
    /// The offset the current competitor of `race` moves by.
    fn next_move(&mut self, race: &Race) -> Position;
}

/// Picks one of the nine offsets uniformly at random.
pub struct RandomMoves {
    rng: StdRng,
}

impl RandomMoves {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl MoveSource for RandomMoves {
    fn next_move(&mut self, _race: &Race) -> Position {
        let row = self.rng.gen_range(0..MOVE_OFFSETS.len());
        let col = self.rng.gen_range(0..MOVE_OFFSETS[row].len());
        MOVE_OFFSETS[row][col]
    }
}

/// Plays back a fixed list of offsets, shared by all competitors in turn
/// order. Once the list runs out, everybody stays put.
#[derive(Clone, Debug, Default)]
pub struct ScriptedMoves {
    moves: VecDeque<Position>,
}

impl ScriptedMoves {
    pub fn new(moves: impl IntoIterator<Item = Position>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Reads a JSON list of `[dx, dy]` pairs.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let pairs: Vec<(i32, i32)> = serde_json::from_str(json)?;
        Ok(Self::new(pairs.into_iter().map(Position::from)))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, _race: &Race) -> Position {
        self.moves.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use gridrace::{is_move_offset, RuleSet};
    use rand::SeedableRng;

    use super::*;
    use crate::race_file::{RaceFile, OVAL_RACE};

    fn oval_race() -> Race {
        let race_file: RaceFile = OVAL_RACE.parse().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        Race::with_rules(
            race_file.track.clone(),
            race_file.competitors(&mut rng),
            RuleSet::default(),
        )
        .unwrap()
    }

    #[test]
    fn random_moves_stay_in_the_window() {
        let race = oval_race();
        let mut moves = RandomMoves::new(StdRng::seed_from_u64(42));
        for _ in 0..100 {
            assert!(is_move_offset(moves.next_move(&race)));
        }
    }

    #[test]
    fn scripted_moves_run_out() {
        let race = oval_race();
        let mut moves = ScriptedMoves::from_json("[[1, 1], [0, -1]]").unwrap();
        assert_eq!(moves.remaining(), 2);
        assert_eq!(moves.next_move(&race), Position::new(1, 1));
        assert_eq!(moves.next_move(&race), Position::new(0, -1));
        assert_eq!(moves.next_move(&race), Position::new(0, 0));
        assert!(ScriptedMoves::from_json("[[1, 1, 1]]").is_err());
    }
}

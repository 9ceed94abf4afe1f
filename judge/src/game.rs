use gridrace::{MoveOutcome, Race};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::moves::MoveSource;
use crate::recording::Recorder;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RaceResult {
    Won { name: String },
    AllRetired,
    TurnLimitReached,
}

/// Plays a race until somebody wins, nobody is left, or `max_turns` moves
/// have been requested.
///
/// Returns an error only when the move source asks for an illegal move or
/// the recording cannot be written, not when a competitor crashes.
pub fn play_race(
    race: &mut Race,
    moves: &mut dyn MoveSource,
    recorder: &mut Option<Recorder>,
    max_turns: usize,
) -> anyhow::Result<RaceResult> {
    let mut turns = 0;
    let result = loop {
        if let Some(name) = race.winner() {
            break RaceResult::Won {
                name: String::from(name),
            };
        }
        if race.all_retired() {
            break RaceResult::AllRetired;
        }
        if turns >= max_turns {
            break RaceResult::TurnLimitReached;
        }

        let offset = moves.next_move(race);
        let outcome = race.resolve_move(offset)?;
        turns += 1;
        match &outcome {
            MoveOutcome::Win { .. } => info!("{}", outcome),
            MoveOutcome::CrashLeaveRace { .. } | MoveOutcome::CrashContinueWithPenalty { .. } => {
                debug!("{}", outcome)
            }
            _ => trace!("{}", outcome),
        }
        if let Some(rec) = recorder {
            rec.store_outcome(&outcome);
        }
    };

    if let Some(rec) = recorder {
        rec.write_race_recording(race.rules(), &result)?;
    }
    debug!(turns, ?result, "Race over");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use gridrace::{CrashRule, Position, RuleSet};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::moves::{RandomMoves, ScriptedMoves};
    use crate::race_file::{RaceFile, OVAL_RACE};

    fn oval_race(rules: RuleSet) -> Race {
        let text = OVAL_RACE.replace(
            "1B 2H\nAlice:red, Bob:#00ff00\n",
            "0B 2H\nAlice:red, Bob:blue\n",
        );
        let race_file: RaceFile = text.parse().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let competitors = race_file.competitors(&mut rng);
        Race::with_rules(race_file.track.clone(), competitors, rules).unwrap()
    }

    #[test]
    fn scripted_lap() {
        let mut race = oval_race(RuleSet::default());
        // Alice drives a lap while Bob waits on the start line
        let alice = [
            (1, 1),
            (1, 1),
            (1, 0),
            (1, 0),
            (1, 0),
            (1, 0),
            (1, 0),
            (1, -1),
            (0, -1),
            (0, -1),
            (0, -1),
            (-1, -1),
            (-1, 0),
            (-1, 0),
            (-1, 0),
            (-1, 0),
            (-1, 0),
            (-1, 1),
        ];
        let script = alice
            .iter()
            .flat_map(|&alice| [Position::from(alice), Position::new(0, 0)]);
        let mut moves = ScriptedMoves::new(script);

        let result = play_race(&mut race, &mut moves, &mut None, 1000).unwrap();
        assert_eq!(
            result,
            RaceResult::Won {
                name: String::from("Alice")
            }
        );
        assert_eq!(race.position_of("Alice"), Some(Position::new(1, 2)));
    }

    #[test]
    fn everybody_crashes() {
        let mut race = oval_race(RuleSet::default());
        let mut moves = ScriptedMoves::new([Position::new(0, -1), Position::new(0, -1)]);
        let result = play_race(&mut race, &mut moves, &mut None, 1000).unwrap();
        assert_eq!(result, RaceResult::AllRetired);
    }

    #[test]
    fn turn_limit() {
        let mut race = oval_race(RuleSet {
            crash: CrashRule::ContinueWithPenalty,
            ..RuleSet::default()
        });
        let mut moves = ScriptedMoves::default();
        let result = play_race(&mut race, &mut moves, &mut None, 10).unwrap();
        assert_eq!(result, RaceResult::TurnLimitReached);
    }

    #[test]
    fn random_races_end() {
        for seed in 0..20 {
            let mut race = oval_race(RuleSet::default());
            let mut moves = RandomMoves::new(StdRng::seed_from_u64(seed));
            let result = play_race(&mut race, &mut moves, &mut None, 200).unwrap();
            if let RaceResult::Won { name } = &result {
                assert_eq!(race.winner(), Some(name.as_str()));
            }
        }
    }

    #[test]
    fn illegal_scripted_move() {
        let mut race = oval_race(RuleSet::default());
        let mut moves = ScriptedMoves::new([Position::new(3, 0)]);
        assert!(play_race(&mut race, &mut moves, &mut None, 10).is_err());
    }
}

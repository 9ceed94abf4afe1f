use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use gridrace::{MoveOutcome, RuleSet};
use serde::{Deserialize, Serialize};

use crate::game::RaceResult;

pub struct Recorder {
    num: usize,
    directory: PathBuf,
    outcomes: Vec<MoveOutcome>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            outcomes: Vec::new(),
        })
    }

    pub fn store_outcome(&mut self, outcome: &MoveOutcome) {
        self.outcomes.push(outcome.clone());
    }

    /// Writes the outcomes stored since the last recording to the next
    /// `race_NNNNNN.json` file and returns its path.
    pub fn write_race_recording(
        &mut self,
        rules: RuleSet,
        result: &RaceResult,
    ) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("race_{:0>6}.json", self.num));
        let recording = RaceRecording {
            rules,
            result: result.clone(),
            outcomes: std::mem::take(&mut self.outcomes),
        };
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceRecording {
    pub rules: RuleSet,
    pub result: RaceResult,
    pub outcomes: Vec<MoveOutcome>,
}

#[cfg(test)]
mod tests {
    use gridrace::Position;

    use super::*;

    #[test]
    fn recordings_are_numbered() {
        let directory =
            std::env::temp_dir().join(format!("gridrace-recorder-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let mut recorder = Recorder::new(directory.clone()).unwrap();

        let outcome = MoveOutcome::Success {
            competitor: String::from("Alice"),
            from: Position::new(0, 4),
            to: Position::new(1, 5),
        };
        recorder.store_outcome(&outcome);
        let first = recorder
            .write_race_recording(RuleSet::default(), &RaceResult::TurnLimitReached)
            .unwrap();
        let second = recorder
            .write_race_recording(RuleSet::default(), &RaceResult::AllRetired)
            .unwrap();
        assert_eq!(first, directory.join("race_000001.json"));
        assert_eq!(second, directory.join("race_000002.json"));

        let recording: RaceRecording =
            serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(recording.outcomes, [outcome]);
        assert_eq!(recording.result, RaceResult::TurnLimitReached);
        let recording: RaceRecording =
            serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert!(recording.outcomes.is_empty());

        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn directory_must_exist() {
        let directory = std::env::temp_dir().join("gridrace-recorder-does-not-exist");
        assert!(Recorder::new(directory).is_err());
    }
}

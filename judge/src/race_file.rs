use std::path::Path;

use gridrace::{CellRole, Color, Competitor, Position, Track, TrackCell, MIN_COMPETITORS};
use rand::Rng;

use crate::error::InvalidRaceFile;

const CIRCUIT_HEADER: &str = "::CIRCUIT";
const PLAYERS_HEADER: &str = "::PLAYERS";

/// A race as described by a race file: the track and who is racing on it.
///
/// ```text
/// ::CIRCUIT
/// @@@@@@@@@@
/// ...
/// ::PLAYERS
/// 1B 2H
/// Alice:red,Bob:#00ff00
/// ```
///
/// Row numbers are y coordinates and column numbers x coordinates.
#[derive(Clone, Debug)]
pub struct RaceFile {
    pub track: Track,
    pub humans: Vec<(String, Color)>,
    pub bots: usize,
}

impl RaceFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(text.parse::<RaceFile>()?)
    }

    /// Humans first, in file order, then the bots with random colors.
    pub fn competitors<R: Rng>(&self, rng: &mut R) -> Vec<Competitor> {
        let humans = self
            .humans
            .iter()
            .map(|(name, color)| Competitor::human(name, *color));
        let bots = (1..=self.bots).map(|i| {
            let color = Color::rgb(rng.gen(), rng.gen(), rng.gen());
            Competitor::bot(&format!("Bot {}", i), color)
        });
        humans.chain(bots).collect()
    }
}

impl std::str::FromStr for RaceFile {
    type Err = InvalidRaceFile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // (line number, content) of every non-blank line
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        match lines.next() {
            Some((_, CIRCUIT_HEADER)) => {}
            _ => {
                return Err(InvalidRaceFile::MissingSection {
                    header: CIRCUIT_HEADER,
                })
            }
        }

        let mut rows = Vec::new();
        loop {
            match lines.next() {
                Some((_, PLAYERS_HEADER)) => break,
                Some(row) => rows.push(row),
                None => {
                    return Err(InvalidRaceFile::MissingSection {
                        header: PLAYERS_HEADER,
                    })
                }
            }
        }
        let track = parse_circuit(&rows)?;

        let (bots, num_humans) = match lines.next() {
            Some((line, text)) => parse_counts(line, text)?,
            None => return Err(InvalidRaceFile::MissingPlayerCounts),
        };
        if bots + num_humans < MIN_COMPETITORS {
            return Err(InvalidRaceFile::TooFewPlayers {
                count: bots + num_humans,
            });
        }

        let humans = match lines.next() {
            Some((_, text)) => parse_humans(text)?,
            None => Vec::new(),
        };
        if humans.len() != num_humans {
            return Err(InvalidRaceFile::WrongHumanCount {
                expected: num_humans,
                found: humans.len(),
            });
        }
        if let Some((line, _)) = lines.next() {
            return Err(InvalidRaceFile::UnexpectedLine { line });
        }

        Ok(Self {
            track,
            humans,
            bots,
        })
    }
}

fn parse_circuit(rows: &[(usize, &str)]) -> Result<Track, InvalidRaceFile> {
    let Some((_, first)) = rows.first() else {
        return Err(InvalidRaceFile::EmptyCircuit);
    };
    let width = first.chars().count();

    let mut cells = Vec::new();
    let mut start_line = Vec::new();
    let mut end_line = Vec::new();
    for (y, &(line, row)) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(InvalidRaceFile::RaggedRow {
                line,
                expected: width,
                found,
            });
        }
        for (x, symbol) in row.chars().enumerate() {
            let role = CellRole::from_symbol(symbol).ok_or(InvalidRaceFile::UnknownSymbol {
                line,
                column: x + 1,
                symbol,
            })?;
            let position = Position::new(x as i32, y as i32);
            match role {
                CellRole::Void => continue,
                CellRole::Start => start_line.push(position),
                CellRole::End => end_line.push(position),
                _ => {}
            }
            cells.push(TrackCell::new(position, role));
        }
    }
    Ok(Track::new(cells, start_line, end_line)?)
}

// "2B 1H" -> (2, 1)
fn parse_counts(line: usize, text: &str) -> Result<(usize, usize), InvalidRaceFile> {
    let bad_counts = || InvalidRaceFile::BadPlayerCounts {
        line,
        text: String::from(text),
    };
    let count = |token: Option<&str>, suffix: char| {
        token
            .and_then(|token| token.strip_suffix(suffix))
            .and_then(|number| number.parse::<usize>().ok())
    };
    let mut tokens = text.split_whitespace();
    let bots = count(tokens.next(), 'B').ok_or_else(bad_counts)?;
    let humans = count(tokens.next(), 'H').ok_or_else(bad_counts)?;
    if tokens.next().is_some() {
        return Err(bad_counts());
    }
    Ok((bots, humans))
}

// "Alice:red,Bob:#00ff00"
fn parse_humans(text: &str) -> Result<Vec<(String, Color)>, InvalidRaceFile> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let bad_entry = || InvalidRaceFile::BadHumanEntry {
                entry: String::from(entry),
            };
            let (name, color) = entry.split_once(':').ok_or_else(bad_entry)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(bad_entry());
            }
            let color = color
                .trim()
                .parse::<Color>()
                .map_err(|err| InvalidRaceFile::BadHumanColor {
                    name: String::from(name),
                    err,
                })?;
            Ok((String::from(name), color))
        })
        .collect()
}

#[cfg(test)]
pub(crate) const OVAL_RACE: &str = "::CIRCUIT
@@@@@@@@@@
@@@@@@@@@@
--######@@
########@@
++######@@
@@######@@
@@@@@@@@@@
@@@@@@@@@@
::PLAYERS
1B 2H
Alice:red, Bob:#00ff00
";

#[cfg(test)]
mod tests {
    use gridrace::{CompetitorKind, InvalidTrack};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn parse_oval() {
        let race_file: RaceFile = OVAL_RACE.parse().unwrap();
        assert_eq!(
            race_file.track.start_line(),
            [Position::new(0, 4), Position::new(1, 4)]
        );
        assert_eq!(
            race_file.track.end_line(),
            [Position::new(0, 2), Position::new(1, 2)]
        );
        assert_eq!(race_file.bots, 1);
        assert_eq!(
            race_file.humans,
            [
                (String::from("Alice"), Color::RED),
                (String::from("Bob"), Color::rgb(0, 255, 0)),
            ]
        );

        let competitors = race_file.competitors(&mut StdRng::seed_from_u64(0));
        let names: Vec<_> = competitors.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Alice", "Bob", "Bot 1"]);
        assert_eq!(competitors[2].kind(), CompetitorKind::Bot);
    }

    #[test]
    fn bots_only() {
        let text = OVAL_RACE.replace("1B 2H\nAlice:red, Bob:#00ff00\n", "2B 0H\n");
        let race_file: RaceFile = text.parse().unwrap();
        assert_eq!(race_file.bots, 2);
        assert!(race_file.humans.is_empty());
    }

    #[test]
    fn format_errors() {
        let err = "::PLAYERS\n2B 0H".parse::<RaceFile>().unwrap_err();
        assert!(matches!(
            err,
            InvalidRaceFile::MissingSection { header: "::CIRCUIT" }
        ));

        let err = OVAL_RACE
            .replace("--######@@", "--######@")
            .parse::<RaceFile>()
            .unwrap_err();
        assert!(matches!(
            err,
            InvalidRaceFile::RaggedRow {
                line: 4,
                expected: 10,
                found: 9
            }
        ));

        let err = OVAL_RACE
            .replace("########@@", "####x###@@")
            .parse::<RaceFile>()
            .unwrap_err();
        assert!(matches!(
            err,
            InvalidRaceFile::UnknownSymbol {
                line: 5,
                column: 5,
                symbol: 'x'
            }
        ));

        let err = OVAL_RACE
            .replace("1B 2H", "1 bot, 2 humans")
            .parse::<RaceFile>()
            .unwrap_err();
        assert!(matches!(err, InvalidRaceFile::BadPlayerCounts { line: 11, .. }));

        let err = OVAL_RACE
            .replace("1B 2H", "1B 3H")
            .parse::<RaceFile>()
            .unwrap_err();
        assert!(matches!(
            err,
            InvalidRaceFile::WrongHumanCount {
                expected: 3,
                found: 2
            }
        ));

        let err = OVAL_RACE
            .replace("Bob:#00ff00", "Bob:chartreuse")
            .parse::<RaceFile>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Human player 'Bob' has an invalid color"
        );
        assert!(std::error::Error::source(&err).is_some());

        let err = OVAL_RACE
            .replace("1B 2H\nAlice:red, Bob:#00ff00\n", "1B 0H\n")
            .parse::<RaceFile>()
            .unwrap_err();
        assert!(matches!(err, InvalidRaceFile::TooFewPlayers { count: 1 }));
    }

    #[test]
    fn invalid_circuit() {
        let text = "::CIRCUIT\n@@@@@@@@@@\n::PLAYERS\n2B 0H\n";
        let err = text.parse::<RaceFile>().unwrap_err();
        assert!(matches!(
            err,
            InvalidRaceFile::InvalidTrack(InvalidTrack::LineTooShort { .. })
        ));
    }
}

use gridrace::{InvalidTrack, UnknownColor};

#[derive(Debug)]
/// Error type for reading a race file.
///
/// Line numbers start at 1.
pub enum InvalidRaceFile {
    MissingSection {
        header: &'static str,
    },
    EmptyCircuit,
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    UnknownSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },
    MissingPlayerCounts,
    BadPlayerCounts {
        line: usize,
        text: String,
    },
    TooFewPlayers {
        count: usize,
    },
    WrongHumanCount {
        expected: usize,
        found: usize,
    },
    BadHumanEntry {
        entry: String,
    },
    BadHumanColor {
        name: String,
        err: UnknownColor,
    },
    UnexpectedLine {
        line: usize,
    },
    InvalidTrack(InvalidTrack),
}

impl std::error::Error for InvalidRaceFile {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidRaceFile::BadHumanColor { err, .. } => Some(err),
            InvalidRaceFile::InvalidTrack(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidRaceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRaceFile::MissingSection { header } => {
                write!(f, "The race file has no '{}' section", header)
            }
            InvalidRaceFile::EmptyCircuit => write!(f, "The circuit has no rows"),
            InvalidRaceFile::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "Line {}: circuit rows must all have {} cells, but this one has {}",
                line, expected, found
            ),
            InvalidRaceFile::UnknownSymbol {
                line,
                column,
                symbol,
            } => write!(
                f,
                "Line {}, column {}: '{}' is not one of '#', '@', '+', '-', '*'",
                line, column, symbol
            ),
            InvalidRaceFile::MissingPlayerCounts => {
                write!(f, "The players section does not say how many players there are")
            }
            InvalidRaceFile::BadPlayerCounts { line, text } => write!(
                f,
                "Line {}: expected the player counts as 'xB yH', found '{}'",
                line, text
            ),
            InvalidRaceFile::TooFewPlayers { count } => write!(
                f,
                "A race needs at least {} players, the file has {}",
                gridrace::MIN_COMPETITORS,
                count
            ),
            InvalidRaceFile::WrongHumanCount { expected, found } => write!(
                f,
                "Expected {} human players, but {} are listed",
                expected, found
            ),
            InvalidRaceFile::BadHumanEntry { entry } => write!(
                f,
                "Expected a human player as 'name:color', found '{}'",
                entry
            ),
            InvalidRaceFile::BadHumanColor { name, err: _ } => {
                write!(f, "Human player '{}' has an invalid color", name)
            }
            InvalidRaceFile::UnexpectedLine { line } => {
                write!(f, "Line {}: unexpected content after the players", line)
            }
            InvalidRaceFile::InvalidTrack(_) => write!(f, "The circuit is not a valid track"),
        }
    }
}

impl From<InvalidTrack> for InvalidRaceFile {
    fn from(err: InvalidTrack) -> Self {
        InvalidRaceFile::InvalidTrack(err)
    }
}

use crate::Position;

/// Which of the two special lines of a track an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Start,
    End,
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Start => write!(f, "start line"),
            LineKind::End => write!(f, "end line"),
        }
    }
}

/// The error type for [`Track::new()`](crate::Track::new), i.e. for a track that is
/// structurally unfit for racing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidTrack {
    NoCells,
    DuplicateCell { position: Position },
    VoidCell { position: Position },
    CoordinateOutOfRange { position: Position },
    LineTooShort { line: LineKind, len: usize },
    DuplicateLinePosition { line: LineKind, position: Position },
    LineNotStraight { line: LineKind },
    LineNotContiguous { line: LineKind },
    LineOutsideTrack { line: LineKind, position: Position },
    LineCellHasWrongRole { line: LineKind, position: Position },
    StartAndEndAdjacent { start: Position, end: Position },
    NoGapBetweenStartAndEnd { gap: Position },
    NarrowPassage { position: Position },
}

impl std::error::Error for InvalidTrack {}

impl std::fmt::Display for InvalidTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTrack::NoCells => write!(f, "The track does not contain any cell"),
            InvalidTrack::DuplicateCell { position } => {
                write!(f, "The cell at {} was given more than once", position)
            }
            InvalidTrack::VoidCell { position } => write!(
                f,
                "The cell at {} is a void cell, which cannot be part of the track",
                position
            ),
            InvalidTrack::CoordinateOutOfRange { position } => write!(
                f,
                "The cell at {} is too close to the edge of the grid, coordinates must be within ±{}",
                position,
                crate::MAX_COORDINATE
            ),
            InvalidTrack::LineTooShort { line, len } => write!(
                f,
                "The {} has {} cells, but at least {} are required",
                line,
                len,
                crate::MIN_TRACK_WIDTH
            ),
            InvalidTrack::DuplicateLinePosition { line, position } => {
                write!(f, "The {} contains {} more than once", line, position)
            }
            InvalidTrack::LineNotStraight { line } => {
                write!(f, "The cells of the {} are not in a single row or column", line)
            }
            InvalidTrack::LineNotContiguous { line } => {
                write!(f, "The cells of the {} have gaps between them", line)
            }
            InvalidTrack::LineOutsideTrack { line, position } => {
                write!(f, "The {} cell {} is not part of the track", line, position)
            }
            InvalidTrack::LineCellHasWrongRole { line, position } => write!(
                f,
                "The cell {} is listed in the {}, but is not marked as such",
                position, line
            ),
            InvalidTrack::StartAndEndAdjacent { start, end } => write!(
                f,
                "The start line cell {} touches the end line cell {}, they need to be at least one cell apart",
                start, end
            ),
            InvalidTrack::NoGapBetweenStartAndEnd { gap } => write!(
                f,
                "The cell {} between the start and end line must not be part of the track",
                gap
            ),
            InvalidTrack::NarrowPassage { position } => write!(
                f,
                "The track is less than {} cells wide at {}",
                crate::MIN_TRACK_WIDTH,
                position
            ),
        }
    }
}

/// The error type for assembling a [`Race`](crate::Race).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidRace {
    InvalidTrack(InvalidTrack),
    TooFewCompetitors { count: usize },
    EmptyCompetitorName,
    DuplicateCompetitorName { name: String },
    WrongHandlerCount { count: usize },
    HandlerOutOfOrder { slot: usize, expected: &'static str },
    TrackTooSmall { competitors: usize, placed: usize },
    Placement(IllegalRequest),
}

impl From<InvalidTrack> for InvalidRace {
    fn from(err: InvalidTrack) -> Self {
        InvalidRace::InvalidTrack(err)
    }
}

impl std::error::Error for InvalidRace {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidRace::InvalidTrack(err) => Some(err),
            InvalidRace::Placement(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidRace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRace::InvalidTrack(_) => write!(f, "The track is not valid"),
            InvalidRace::TooFewCompetitors { count } => write!(
                f,
                "A race needs at least {} competitors, but {} were given",
                crate::MIN_COMPETITORS,
                count
            ),
            InvalidRace::EmptyCompetitorName => write!(f, "A competitor does not have a name"),
            InvalidRace::DuplicateCompetitorName { name } => {
                write!(f, "More than one competitor is called '{}'", name)
            }
            InvalidRace::WrongHandlerCount { count } => write!(
                f,
                "Expected exactly 3 handlers (win, crash, collision), but {} were given",
                count
            ),
            InvalidRace::HandlerOutOfOrder { slot, expected } => write!(
                f,
                "Handler number {} should be a {} handler",
                slot + 1,
                expected
            ),
            InvalidRace::TrackTooSmall {
                competitors,
                placed,
            } => write!(
                f,
                "The track is too small for {} competitors, only {} could be placed",
                competitors, placed
            ),
            InvalidRace::Placement(_) => write!(f, "A competitor could not be placed"),
        }
    }
}

/// The error type for requests that break the contract of the race engine.
///
/// These are never caused by a move that is merely bad for the player (those
/// produce a [`MoveOutcome`](crate::MoveOutcome)), and the engine state is left
/// unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalRequest {
    OffsetOutsideWindow { offset: Position },
    EmptyRoster,
    RaceAlreadyWon { winner: String },
    OutOfBounds { position: Position },
    NotOnTrack { position: Position },
    NotPlaced { competitor: String },
}

impl std::error::Error for IllegalRequest {}

impl std::fmt::Display for IllegalRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalRequest::OffsetOutsideWindow { offset } => write!(
                f,
                "The offset {} is not one of the nine candidate moves",
                offset
            ),
            IllegalRequest::EmptyRoster => {
                write!(f, "There is no competitor left in the race")
            }
            IllegalRequest::RaceAlreadyWon { winner } => {
                write!(f, "The race has already been won by {}", winner)
            }
            IllegalRequest::OutOfBounds { position } => {
                write!(f, "{} is out of the bounds of the track", position)
            }
            IllegalRequest::NotOnTrack { position } => {
                write!(f, "{} is not part of the track", position)
            }
            IllegalRequest::NotPlaced { competitor } => {
                write!(f, "{} has not been placed on the track", competitor)
            }
        }
    }
}

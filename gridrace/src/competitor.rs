use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Position;

/// The relative moves a competitor can choose from, row by row.
pub const MOVE_OFFSETS: [[Position; 3]; 3] = [
    [Position::new(-1, -1), Position::new(0, -1), Position::new(1, -1)],
    [Position::new(-1, 0), Position::new(0, 0), Position::new(1, 0)],
    [Position::new(-1, 1), Position::new(0, 1), Position::new(1, 1)],
];

/// Is `offset` one of the nine [`MOVE_OFFSETS`]?
pub fn is_move_offset(offset: Position) -> bool {
    offset.x.abs() <= 1 && offset.y.abs() <= 1
}

/// The marker a competitor is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The error type for the [`FromStr`] instance of [`Color`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl std::error::Error for UnknownColor {}

impl std::fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is neither a color name nor a color of the form #rrggbb",
            self.0
        )
    }
}

impl FromStr for Color {
    type Err = UnknownColor;

    /// Accepts a handful of color names (any case) and `#rrggbb`.
    ///
    /// ```
    /// use gridrace::Color;
    /// assert_eq!("Red".parse::<Color>(), Ok(Color::RED));
    /// assert_eq!("#0000ff".parse::<Color>(), Ok(Color::BLUE));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.strip_prefix('#') {
            let channel = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            };
            return match (hex.len(), channel(0), channel(2), channel(4)) {
                (6, Some(r), Some(g), Some(b)) => Ok(Color::rgb(r, g, b)),
                _ => Err(UnknownColor(String::from(s))),
            };
        }
        let color = match s.to_ascii_lowercase().as_str() {
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "pink" => Color::rgb(255, 192, 203),
            "brown" => Color::rgb(165, 42, 42),
            "cyan" => Color::rgb(0, 255, 255),
            "magenta" => Color::rgb(255, 0, 255),
            "black" => Color::rgb(0, 0, 0),
            "white" => Color::rgb(255, 255, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            _ => return Err(UnknownColor(String::from(s))),
        };
        Ok(color)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitorKind {
    Human,
    /// Bots choose their moves outside of the engine, just like humans do.
    Bot,
}

/// The nine cells a competitor may move to next.
///
/// Normally centered on the competitor's position. After a crash penalty it
/// is reset to the bare [`MOVE_OFFSETS`] until the next committed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveWindow {
    candidates: [[Position; 3]; 3],
}

impl Default for MoveWindow {
    fn default() -> Self {
        Self {
            candidates: MOVE_OFFSETS,
        }
    }
}

impl MoveWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates row by row.
    pub fn candidates(&self) -> &[[Position; 3]; 3] {
        &self.candidates
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.candidates.iter().flatten().copied()
    }

    pub fn recenter(&mut self, center: Position) {
        for (row, offsets) in self.candidates.iter_mut().zip(MOVE_OFFSETS) {
            for (candidate, offset) in row.iter_mut().zip(offsets) {
                *candidate = center + offset;
            }
        }
    }

    pub fn reset(&mut self) {
        self.candidates = MOVE_OFFSETS;
    }
}

/// A participant of a race.
///
/// The name is the competitor's identity: no two competitors of a race may
/// share one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Competitor {
    name: String,
    color: Color,
    kind: CompetitorKind,
    /// `None` until the race places the competitor on the start line.
    position: Option<Position>,
    moves: MoveWindow,
}

impl Competitor {
    pub fn new(name: &str, color: Color, kind: CompetitorKind) -> Self {
        Self {
            name: String::from(name),
            color,
            kind,
            position: None,
            moves: MoveWindow::new(),
        }
    }

    pub fn human(name: &str, color: Color) -> Self {
        Self::new(name, color, CompetitorKind::Human)
    }

    pub fn bot(name: &str, color: Color) -> Self {
        Self::new(name, color, CompetitorKind::Bot)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> CompetitorKind {
        self.kind
    }

    pub fn is_bot(&self) -> bool {
        self.kind == CompetitorKind::Bot
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn moves(&self) -> &MoveWindow {
        &self.moves
    }

    /// Sets the position and centers the move window on it.
    pub(crate) fn move_to(&mut self, position: Position) {
        self.position = Some(position);
        self.moves.recenter(position);
    }

    pub(crate) fn reset_moves(&mut self) {
        self.moves.reset();
    }
}

impl std::fmt::Display for Competitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at {}", self.name, position),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_the_competitor() {
        let mut competitor = Competitor::human("Ada", Color::GREEN);
        assert_eq!(competitor.moves().candidates(), &MOVE_OFFSETS);

        competitor.move_to(Position::new(5, 5));
        assert_eq!(competitor.position(), Some(Position::new(5, 5)));
        assert_eq!(
            competitor.moves().candidates()[0],
            [Position::new(4, 4), Position::new(5, 4), Position::new(6, 4)]
        );
        assert_eq!(competitor.moves().candidates()[1][1], Position::new(5, 5));

        competitor.reset_moves();
        assert_eq!(competitor.moves().candidates(), &MOVE_OFFSETS);
        assert_eq!(competitor.position(), Some(Position::new(5, 5)));
    }

    #[test]
    fn offsets() {
        assert!(MOVE_OFFSETS.iter().flatten().all(|&o| is_move_offset(o)));
        assert!(!is_move_offset(Position::new(2, 0)));
        assert!(!is_move_offset(Position::new(0, -2)));
    }

    #[test]
    fn parse_colors() {
        assert_eq!("GREEN".parse(), Ok(Color::GREEN));
        assert_eq!("#10ff0a".parse(), Ok(Color::rgb(16, 255, 10)));
        assert!("#10ff0".parse::<Color>().is_err());
        assert!("#10ff0g".parse::<Color>().is_err());
        assert!("mauve".parse::<Color>().is_err());
        assert_eq!(Color::rgb(16, 255, 10).to_string(), "#10ff0a");
    }
}

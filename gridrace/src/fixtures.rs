//! Tracks for tests, written as rows of race file symbols.

use crate::{CellRole, Competitor, InvalidTrack, Position, Track, TrackCell};

/// A two cell wide loop. The start line sits below the end line, separated by
/// a row of void cells, so that competitors have to go all the way around.
pub const OVAL: [&str; 8] = [
    "@@@@@@@@@@",
    "@@@@@@@@@@",
    "--######@@",
    "########@@",
    "++######@@",
    "@@######@@",
    "@@@@@@@@@@",
    "@@@@@@@@@@",
];

/// Row `y`, column `x`. Start and end lines are collected in row-major order.
pub fn track_from_rows(rows: &[&str]) -> Result<Track, InvalidTrack> {
    let mut cells = Vec::new();
    let mut start_line = Vec::new();
    let mut end_line = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            let position = Position::new(x as i32, y as i32);
            let role = CellRole::from_symbol(symbol).expect("unknown symbol in test track");
            match role {
                CellRole::Void => continue,
                CellRole::Start => start_line.push(position),
                CellRole::End => end_line.push(position),
                _ => {}
            }
            cells.push(TrackCell::new(position, role));
        }
    }
    Track::new(cells, start_line, end_line)
}

pub fn oval_track() -> Track {
    track_from_rows(&OVAL).unwrap()
}

pub fn humans(names: &[&str]) -> Vec<Competitor> {
    names
        .iter()
        .map(|name| Competitor::human(name, crate::Color::RED))
        .collect()
}

mod bbox;
mod cell;
mod validation;

use std::collections::HashMap;

pub use bbox::*;
pub use cell::*;

use crate::{
    line_between, IllegalRequest, InvalidTrack, Position, NEIGHBOR_OFFSETS_4, NEIGHBOR_OFFSETS_8,
};

/// The minimum width of the track, and thereby the minimum length of the
/// start and end lines.
pub const MIN_TRACK_WIDTH: usize = 2;

/// The largest absolute coordinate a track cell may have. Every cell and every
/// move destination next to it stays representable.
pub const MAX_COORDINATE: i32 = i32::MAX - 1;

/// The cells competitors can drive on, plus the start and end lines.
///
/// A track is validated once on construction and never replaced afterwards.
/// The only thing that changes during a race is which cells are occupied.
#[derive(Clone, Debug)]
pub struct Track {
    /// There is exactly one entry for every cell that is not void.
    cells: HashMap<Position, TrackCell>,
    start_line: Vec<Position>,
    end_line: Vec<Position>,
    /// The smallest area that contains all cells.
    bbox: BoundingBox,
}

impl Track {
    /// Creates a new track, checking all structural rules.
    ///
    /// The order of the start line is significant: competitors are placed on
    /// it front to back.
    pub fn new(
        cells: impl IntoIterator<Item = TrackCell>,
        start_line: Vec<Position>,
        end_line: Vec<Position>,
    ) -> Result<Self, InvalidTrack> {
        let mut cell_map = HashMap::new();
        for cell in cells {
            if cell.fixed_role() == CellRole::Void {
                return Err(InvalidTrack::VoidCell {
                    position: cell.position(),
                });
            }
            let position = cell.position();
            let in_range = |c: i32| (-MAX_COORDINATE..=MAX_COORDINATE).contains(&c);
            if !in_range(position.x) || !in_range(position.y) {
                return Err(InvalidTrack::CoordinateOutOfRange { position });
            }
            if cell_map.insert(cell.position(), cell).is_some() {
                return Err(InvalidTrack::DuplicateCell {
                    position: cell.position(),
                });
            }
        }

        validation::validate(&cell_map, &start_line, &end_line)?;

        let bbox = BoundingBox::from_positions(cell_map.keys().copied())
            .ok_or(InvalidTrack::NoCells)?;
        Ok(Self {
            cells: cell_map,
            start_line,
            end_line,
            bbox,
        })
    }

    /// The smallest area enclosing all cells of the track.
    ///
    /// Positions outside of it are not valid for any cell operation.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn start_line(&self) -> &[Position] {
        &self.start_line
    }

    pub fn end_line(&self) -> &[Position] {
        &self.end_line
    }

    /// Returns the cell at `position`, or `None` if it is not part of the track.
    pub fn get(&self, position: Position) -> Option<&TrackCell> {
        self.cells.get(&position)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    /// All cells, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = &TrackCell> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The surrounding cells (diagonals included) that are part of the track, in
    /// the fixed order of [`NEIGHBOR_OFFSETS_8`].
    pub fn neighbors_8(&self, position: Position) -> Vec<Position> {
        self.neighbors(position, &NEIGHBOR_OFFSETS_8)
    }

    /// The orthogonally adjacent cells that are part of the track, in the fixed
    /// order of [`NEIGHBOR_OFFSETS_4`].
    pub fn neighbors_4(&self, position: Position) -> Vec<Position> {
        self.neighbors(position, &NEIGHBOR_OFFSETS_4)
    }

    fn neighbors(&self, position: Position, offsets: &[Position]) -> Vec<Position> {
        offsets
            .iter()
            .filter_map(|&offset| position.checked_add(offset))
            .filter(|neighbor| self.cells.contains_key(neighbor))
            .collect()
    }

    /// Is the cell on the border of the track, i.e. is any of its 8 neighbors missing?
    pub fn is_external(&self, position: Position) -> Result<bool, IllegalRequest> {
        self.check_on_track(position)?;
        Ok(self.neighbors_8(position).len() != NEIGHBOR_OFFSETS_8.len())
    }

    pub fn is_occupied(&self, position: Position) -> Result<bool, IllegalRequest> {
        Ok(self.cell(position)?.is_occupied())
    }

    /// Marks a cell as occupied. Occupying a cell twice has no further effect.
    pub fn occupy(&mut self, position: Position) -> Result<(), IllegalRequest> {
        self.cell_mut(position)?.set_occupied(true);
        Ok(())
    }

    pub fn free(&mut self, position: Position) -> Result<(), IllegalRequest> {
        self.cell_mut(position)?.set_occupied(false);
        Ok(())
    }

    /// The first neighbor of `position` that nobody stands on.
    pub fn free_neighbor(&self, position: Position) -> Result<Option<Position>, IllegalRequest> {
        self.check_on_track(position)?;
        Ok(self
            .neighbors_8(position)
            .into_iter()
            .find(|neighbor| !self.cells[neighbor].is_occupied()))
    }

    /// Is the destination occupied? Destinations off the track never collide.
    pub fn is_colliding(&self, destination: Position) -> bool {
        self.cells
            .get(&destination)
            .is_some_and(|cell| cell.is_occupied())
    }

    /// Does moving in a straight line from `from` to `to` leave the track at any point?
    pub fn is_crashing(&self, from: Position, to: Position) -> bool {
        !self.contains(to)
            || line_between(from, to)
                .into_iter()
                .any(|position| !self.contains(position))
    }

    /// Does the straight line from `from` to `to` touch the end line?
    pub fn crosses_end_line(&self, from: Position, to: Position) -> bool {
        line_between(from, to)
            .into_iter()
            .any(|position| self.end_line.contains(&position))
    }

    fn check_on_track(&self, position: Position) -> Result<(), IllegalRequest> {
        if !self.bbox.contains(position) {
            Err(IllegalRequest::OutOfBounds { position })
        } else if !self.cells.contains_key(&position) {
            Err(IllegalRequest::NotOnTrack { position })
        } else {
            Ok(())
        }
    }

    fn cell(&self, position: Position) -> Result<&TrackCell, IllegalRequest> {
        self.check_on_track(position)?;
        Ok(&self.cells[&position])
    }

    fn cell_mut(&mut self, position: Position) -> Result<&mut TrackCell, IllegalRequest> {
        self.check_on_track(position)?;
        self.cells
            .get_mut(&position)
            .ok_or(IllegalRequest::NotOnTrack { position })
    }
}

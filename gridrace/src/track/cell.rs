use crate::Position;

/// What a cell of the grid is used for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellRole {
    /// Ordinary, drivable track.
    Track,
    /// A hole in the grid. Void cells are never part of a [`Track`](crate::Track).
    Void,
    Start,
    End,
    Wall,
    /// A competitor is standing on the cell.
    Occupied,
}

impl CellRole {
    /// Decodes the single-character notation used in race files.
    ///
    /// ```
    /// use gridrace::CellRole;
    /// assert_eq!(CellRole::from_symbol('+'), Some(CellRole::Start));
    /// assert_eq!(CellRole::from_symbol('x'), None);
    /// ```
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(CellRole::Void),
            '@' => Some(CellRole::Track),
            '+' => Some(CellRole::Start),
            '-' => Some(CellRole::End),
            '*' => Some(CellRole::Wall),
            _ => None,
        }
    }

    /// The inverse of [`Self::from_symbol()`]. Occupied cells have no file notation
    /// and are written as ordinary track.
    pub fn symbol(self) -> char {
        match self {
            CellRole::Void => '#',
            CellRole::Track | CellRole::Occupied => '@',
            CellRole::Start => '+',
            CellRole::End => '-',
            CellRole::Wall => '*',
        }
    }
}

/// A single cell of a track.
///
/// The role a cell was built with never changes. Occupancy is kept on the
/// side, so that a start cell becomes a start cell again once it is freed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrackCell {
    position: Position,
    fixed_role: CellRole,
    occupied: bool,
}

impl TrackCell {
    /// Creates a cell. A cell created as [`CellRole::Occupied`] is ordinary track
    /// that starts out occupied.
    pub fn new(position: Position, role: CellRole) -> Self {
        let (fixed_role, occupied) = match role {
            CellRole::Occupied => (CellRole::Track, true),
            role => (role, false),
        };
        Self {
            position,
            fixed_role,
            occupied,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The current role, which is [`CellRole::Occupied`] while a competitor stands here.
    pub fn role(&self) -> CellRole {
        if self.occupied {
            CellRole::Occupied
        } else {
            self.fixed_role
        }
    }

    /// The role the cell was built with.
    pub fn fixed_role(&self) -> CellRole {
        self.fixed_role
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub(crate) fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for symbol in ['#', '@', '+', '-', '*'] {
            assert_eq!(CellRole::from_symbol(symbol).unwrap().symbol(), symbol);
        }
    }

    #[test]
    fn freeing_restores_fixed_role() {
        let mut cell = TrackCell::new(Position::new(1, 1), CellRole::Start);
        cell.set_occupied(true);
        assert_eq!(cell.role(), CellRole::Occupied);
        cell.set_occupied(false);
        assert_eq!(cell.role(), CellRole::Start);
    }

    #[test]
    fn created_occupied() {
        let cell = TrackCell::new(Position::new(0, 0), CellRole::Occupied);
        assert!(cell.is_occupied());
        assert_eq!(cell.fixed_role(), CellRole::Track);
    }
}

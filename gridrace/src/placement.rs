use tracing::{debug, trace};

use crate::{InvalidRace, Position, Track};

/// Computes the starting cell of each of `competitors` competitors and marks
/// those cells as occupied.
///
/// The first competitors take the start line in order. When there are more
/// competitors than start cells, each of the others takes the first free
/// neighbor of an already placed competitor, scanning placed competitors in the
/// order they were placed. End line cells are never handed out. The i-th
/// position belongs to the i-th competitor.
///
/// On error the track's occupancy is left as it was.
pub fn initial_positions(
    track: &mut Track,
    competitors: usize,
) -> Result<Vec<Position>, InvalidRace> {
    let mut placed: Vec<Position> = track
        .start_line()
        .iter()
        .copied()
        .take(competitors)
        .collect();
    for &position in &placed {
        mark(track, position, true)?;
    }

    while placed.len() < competitors {
        let next = placed
            .iter()
            .find_map(|&position| free_neighbor_off_the_end_line(track, position));
        let Some(next) = next else {
            for &position in &placed {
                mark(track, position, false)?;
            }
            return Err(InvalidRace::TrackTooSmall {
                competitors,
                placed: placed.len(),
            });
        };
        trace!(%next, "Placing competitor next to the start line");
        mark(track, next, true)?;
        placed.push(next);
    }

    debug!(competitors, "Placed competitors");
    Ok(placed)
}

fn free_neighbor_off_the_end_line(track: &Track, position: Position) -> Option<Position> {
    track
        .neighbors_8(position)
        .into_iter()
        .find(|neighbor| !track.is_colliding(*neighbor) && !track.end_line().contains(neighbor))
}

fn mark(track: &mut Track, position: Position, occupied: bool) -> Result<(), InvalidRace> {
    let result = if occupied {
        track.occupy(position)
    } else {
        track.free(position)
    };
    result.map_err(InvalidRace::Placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::oval_track;
    use crate::IllegalRequest;

    #[test]
    fn start_line_first() {
        let mut track = oval_track();
        let positions = initial_positions(&mut track, 2).unwrap();
        assert_eq!(positions, [Position::new(0, 4), Position::new(1, 4)]);
        assert!(positions
            .iter()
            .all(|&position| track.is_occupied(position).unwrap()));
        assert!(!track.is_occupied(Position::new(0, 5)).unwrap());
    }

    #[test]
    fn overflow_goes_to_neighbors() {
        let mut track = oval_track();
        let positions = initial_positions(&mut track, 4).unwrap();
        // Neighbors of (0, 4) in order: (0, 5), (1, 5), (1, 4)
        assert_eq!(
            positions,
            [
                Position::new(0, 4),
                Position::new(1, 4),
                Position::new(0, 5),
                Position::new(1, 5),
            ]
        );
        assert!(positions
            .iter()
            .all(|&position| track.is_occupied(position).unwrap()));
    }

    #[test]
    fn end_line_is_never_handed_out() {
        let mut track = oval_track();
        let placeable = track.len() - track.end_line().len();
        let positions = initial_positions(&mut track, placeable).unwrap();
        assert_eq!(positions.len(), placeable);
        for end in track.end_line() {
            assert!(!positions.contains(end));
            assert!(!track.is_occupied(*end).unwrap());
        }
    }

    #[test]
    fn too_many_competitors() {
        let mut track = oval_track();
        let placeable = track.len() - track.end_line().len();
        assert_eq!(
            initial_positions(&mut track, placeable + 1),
            Err(InvalidRace::TrackTooSmall {
                competitors: placeable + 1,
                placed: placeable,
            })
        );
        assert!(track.cells().all(|cell| !cell.is_occupied()));
    }

    #[test]
    fn marking_a_cell_off_the_track_fails() {
        let mut track = oval_track();
        assert_eq!(
            mark(&mut track, Position::new(0, 3), true),
            Err(InvalidRace::Placement(IllegalRequest::NotOnTrack {
                position: Position::new(0, 3)
            }))
        );
    }
}

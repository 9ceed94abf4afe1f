use std::collections::{HashMap, HashSet};

use crate::{line_between, CellRole, InvalidTrack, LineKind, Position, TrackCell, MIN_TRACK_WIDTH};

/// Checks every structural rule of a track, in this order: cells, start line,
/// end line, relative placement of the two lines, narrow passages.
pub(super) fn validate(
    cells: &HashMap<Position, TrackCell>,
    start_line: &[Position],
    end_line: &[Position],
) -> Result<(), InvalidTrack> {
    if cells.is_empty() {
        return Err(InvalidTrack::NoCells);
    }
    validate_line(cells, start_line, LineKind::Start)?;
    validate_line(cells, end_line, LineKind::End)?;
    validate_line_placement(cells, start_line, end_line)?;
    check_for_narrow_passages(cells)
}

fn validate_line(
    cells: &HashMap<Position, TrackCell>,
    line: &[Position],
    kind: LineKind,
) -> Result<(), InvalidTrack> {
    // Shape
    let mut seen = HashSet::with_capacity(line.len());
    for &position in line {
        if !seen.insert(position) {
            return Err(InvalidTrack::DuplicateLinePosition {
                line: kind,
                position,
            });
        }
    }
    if let Some(&first) = line.first() {
        let same_row = line.iter().all(|p| p.y == first.y);
        let same_column = line.iter().all(|p| p.x == first.x);
        if !same_row && !same_column {
            return Err(InvalidTrack::LineNotStraight { line: kind });
        }
        let mut along: Vec<i32> = line
            .iter()
            .map(|p| if same_row { p.x } else { p.y })
            .collect();
        along.sort_unstable();
        if along.windows(2).any(|w| w[0].checked_add(1) != Some(w[1])) {
            return Err(InvalidTrack::LineNotContiguous { line: kind });
        }
    }

    // Containment
    if let Some(&position) = line.iter().find(|p| !cells.contains_key(p)) {
        return Err(InvalidTrack::LineOutsideTrack {
            line: kind,
            position,
        });
    }

    if line.len() < MIN_TRACK_WIDTH {
        return Err(InvalidTrack::LineTooShort {
            line: kind,
            len: line.len(),
        });
    }

    let expected_role = match kind {
        LineKind::Start => CellRole::Start,
        LineKind::End => CellRole::End,
    };
    for position in line {
        if cells[position].fixed_role() != expected_role {
            return Err(InvalidTrack::LineCellHasWrongRole {
                line: kind,
                position: *position,
            });
        }
    }
    Ok(())
}

fn validate_line_placement(
    cells: &HashMap<Position, TrackCell>,
    start_line: &[Position],
    end_line: &[Position],
) -> Result<(), InvalidTrack> {
    // Corresponding cells of the two lines need a void cell between them when
    // they are only one cell apart.
    for (&start, &end) in start_line.iter().zip(end_line) {
        let between = line_between(start, end);
        if between.len() <= 2 {
            return Err(InvalidTrack::StartAndEndAdjacent { start, end });
        }
        if between.len() == 3 && cells.contains_key(&between[1]) {
            return Err(InvalidTrack::NoGapBetweenStartAndEnd { gap: between[1] });
        }
    }
    for &start in start_line {
        if let Some(&end) = end_line.iter().find(|end| start.is_adjacent_to(**end)) {
            return Err(InvalidTrack::StartAndEndAdjacent { start, end });
        }
    }
    Ok(())
}

fn check_for_narrow_passages(cells: &HashMap<Position, TrackCell>) -> Result<(), InvalidTrack> {
    // Sorted, so that the reported cell does not depend on hash order
    let mut positions: Vec<Position> = cells.keys().copied().collect();
    positions.sort_unstable_by_key(|p| (p.y, p.x));

    for position in positions {
        let has = |dx, dy| {
            position
                .checked_add(Position::new(dx, dy))
                .is_some_and(|neighbor| cells.contains_key(&neighbor))
        };
        let horizontal = has(-1, 0) || has(1, 0);
        let vertical = has(0, -1) || has(0, 1);
        if !horizontal || !vertical {
            return Err(InvalidTrack::NarrowPassage { position });
        }
    }
    Ok(())
}

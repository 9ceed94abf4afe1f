use std::collections::HashMap;

use gridrace::{Position, Race};

/// Draws the track as text, two characters per cell.
///
/// Competitors are drawn as their 1-based place in the turn order, so the
/// current competitor is `1`. A cell shared by several competitors is drawn
/// as `&`.
pub fn render_race(race: &Race) -> String {
    let bbox = race.track().bbox();
    let mut markers: HashMap<Position, Vec<usize>> = HashMap::new();
    for (idx, competitor) in race.competitors().enumerate() {
        if let Some(position) = competitor.position() {
            markers.entry(position).or_default().push(idx + 1);
        }
    }

    // Draw the top of the box
    let mut result = format!("    {:<2}", bbox.x_min);
    result += "\n    ╭";
    for _ in bbox.x_min..=bbox.x_max {
        result += "──";
    }
    result += "╮\n";

    for y in bbox.y_min..=bbox.y_max {
        result += &format!("{:>3} │", y);
        for x in bbox.x_min..=bbox.x_max {
            let position = Position::new(x, y);
            if let Some(indices) = markers.get(&position) {
                match indices.as_slice() {
                    [idx] => result += &format!("{:<2}", idx),
                    _ => result += "& ",
                }
            } else if let Some(cell) = race.track().get(position) {
                result.push(cell.role().symbol());
                result.push(' ');
            } else {
                result += "  ";
            }
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in bbox.x_min..=bbox.x_max {
        result += "──";
    }
    result += "╯";
    result
}

#[cfg(test)]
mod tests {
    use gridrace::{CollisionRule, RuleSet};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::race_file::{RaceFile, OVAL_RACE};

    #[test]
    fn oval_with_competitors() {
        let race_file: RaceFile = OVAL_RACE.parse().unwrap();
        let competitors = race_file.competitors(&mut StdRng::seed_from_u64(0));
        let race =
            Race::with_rules(race_file.track.clone(), competitors, RuleSet::default()).unwrap();
        let expected = "    0 
    ╭────────────────────╮
  0 │@ @ @ @ @ @ @ @ @ @ │
  1 │@ @ @ @ @ @ @ @ @ @ │
  2 │- -             @ @ │
  3 │                @ @ │
  4 │1 2             @ @ │
  5 │3 @             @ @ │
  6 │@ @ @ @ @ @ @ @ @ @ │
  7 │@ @ @ @ @ @ @ @ @ @ │
    ╰────────────────────╯";
        assert_eq!(render_race(&race), expected);
    }

    #[test]
    fn shared_cell() {
        let race_file: RaceFile = OVAL_RACE.parse().unwrap();
        let competitors = race_file.competitors(&mut StdRng::seed_from_u64(0));
        let rules = RuleSet {
            collision: CollisionRule::Allowed,
            ..RuleSet::default()
        };
        let mut race = Race::with_rules(race_file.track.clone(), competitors, rules).unwrap();
        race.resolve_move(Position::new(1, 0)).unwrap();

        let rendered = render_race(&race);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows[6], "  4 │+ &             @ @ │");
        assert_eq!(rows[7], "  5 │2 @             @ @ │");
    }
}

use crate::Position;

/// A 2D area represented by a min + max coordinate pair.
///
/// The two coordinates form an _inclusive_ 2D range, i.e. unlike in a
/// half-open range, it's possible for a point with `x == x_max`
/// to be contained in the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.x_min
            && position.y >= self.y_min
            && position.x <= self.x_max
            && position.y <= self.y_max
    }

    pub fn singleton(position: Position) -> Self {
        Self {
            x_min: position.x,
            y_min: position.y,
            x_max: position.x,
            y_max: position.y,
        }
    }

    pub fn from_positions(mut iter: impl Iterator<Item = Position>) -> Option<Self> {
        let mut bbox = Self::singleton(iter.next()?);
        for position in iter {
            bbox.update(position);
        }
        Some(bbox)
    }

    /// Expands the bounding box to cover `position`.
    pub fn update(&mut self, position: Position) {
        self.x_min = self.x_min.min(position.x);
        self.x_max = self.x_max.max(position.x);
        self.y_min = self.y_min.min(position.y);
        self.y_max = self.y_max.max(position.y);
    }

    pub fn width(&self) -> usize {
        self.x_max.abs_diff(self.x_min) as usize + 1
    }

    pub fn height(&self) -> usize {
        self.y_max.abs_diff(self.y_min) as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_positions() {
        let bbox = BoundingBox::from_positions(
            [Position::new(2, -1), Position::new(-3, 4), Position::new(0, 0)].into_iter(),
        )
        .unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x_min: -3,
                y_min: -1,
                x_max: 2,
                y_max: 4
            }
        );
        assert_eq!((bbox.width(), bbox.height()), (6, 6));
        assert!(bbox.contains(Position::new(2, 4)));
        assert!(!bbox.contains(Position::new(3, 0)));
    }

    #[test]
    fn no_positions_no_box() {
        assert!(BoundingBox::from_positions(std::iter::empty()).is_none());
    }
}

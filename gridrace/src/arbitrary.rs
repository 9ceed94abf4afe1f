use crate::Position;

impl quickcheck::Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Keep coordinates small so that lines stay short
        let x = (u8::arbitrary(g) % 64) as i32 - 32;
        let y = (u8::arbitrary(g) % 64) as i32 - 32;
        Position::new(x, y)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            (self.x, self.y)
                .shrink()
                .map(|(x, y)| Position::new(x, y)),
        )
    }
}

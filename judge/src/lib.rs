mod error;
mod game;
mod moves;
mod race_file;
mod recording;
mod render;
pub use error::*;
pub use game::*;
pub use moves::*;
pub use race_file::*;
pub use recording::*;
pub use render::*;

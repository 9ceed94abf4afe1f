pub use competitor::*;
pub use errors::*;
pub use geometry::*;
pub use handlers::*;
pub use outcome::*;
pub use placement::*;
pub use race::*;
pub use roster::*;
pub use rules::*;
pub use track::*;

#[cfg(test)]
mod arbitrary;
mod competitor;
mod errors;
#[cfg(test)]
mod fixtures;
mod geometry;
mod handlers;
mod outcome;
mod placement;
mod race;
mod roster;
mod rules;
mod track;

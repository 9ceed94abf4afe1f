use std::collections::{HashSet, VecDeque};

use crate::{Competitor, IllegalRequest, InvalidRace, Position};

/// The minimum number of competitors a race starts with.
pub const MIN_COMPETITORS: usize = 2;

/// The competitors still in the race, in turn order.
///
/// The competitor at the front is the current one. Finishing a turn rotates
/// them to the back, leaving the race removes them, which hands the turn to the
/// next competitor as well.
#[derive(Clone, Debug)]
pub struct Roster {
    queue: VecDeque<Competitor>,
}

impl Roster {
    pub fn new(competitors: Vec<Competitor>) -> Result<Self, InvalidRace> {
        if competitors.len() < MIN_COMPETITORS {
            return Err(InvalidRace::TooFewCompetitors {
                count: competitors.len(),
            });
        }
        let mut names = HashSet::with_capacity(competitors.len());
        for competitor in &competitors {
            if competitor.name().is_empty() {
                return Err(InvalidRace::EmptyCompetitorName);
            }
            if !names.insert(competitor.name()) {
                return Err(InvalidRace::DuplicateCompetitorName {
                    name: String::from(competitor.name()),
                });
            }
        }
        Ok(Self {
            queue: VecDeque::from(competitors),
        })
    }

    pub fn current(&self) -> Result<&Competitor, IllegalRequest> {
        self.queue.front().ok_or(IllegalRequest::EmptyRoster)
    }

    pub(crate) fn current_mut(&mut self) -> Result<&mut Competitor, IllegalRequest> {
        self.queue.front_mut().ok_or(IllegalRequest::EmptyRoster)
    }

    /// Moves the current competitor to the back of the queue.
    pub(crate) fn advance(&mut self) -> Result<(), IllegalRequest> {
        let current = self.queue.pop_front().ok_or(IllegalRequest::EmptyRoster)?;
        self.queue.push_back(current);
        Ok(())
    }

    /// Takes the current competitor out of the race.
    pub(crate) fn remove_current(&mut self) -> Result<Competitor, IllegalRequest> {
        self.queue.pop_front().ok_or(IllegalRequest::EmptyRoster)
    }

    pub fn get(&self, name: &str) -> Option<&Competitor> {
        self.queue.iter().find(|c| c.name() == name)
    }

    pub(crate) fn get_mut_at(&mut self, idx: usize) -> Option<&mut Competitor> {
        self.queue.get_mut(idx)
    }

    /// Is anyone besides the current competitor standing at `position`?
    pub fn is_shared(&self, position: Position) -> bool {
        self.queue
            .iter()
            .skip(1)
            .any(|c| c.position() == Some(position))
    }

    /// The competitors in turn order, starting with the current one.
    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

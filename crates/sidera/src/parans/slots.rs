//! Fixed-size arena of star registration slots.
//!
//! Angle-event backends can only track a few user-defined fixed points at a
//! time. Stars are registered into numbered slots, searched, and the arena is
//! cleared before the next batch.

use crate::ephemeris::Equatorial;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlotError {
    #[error("All {capacity} star slots are in use")]
    Full { capacity: usize },
    #[error("Star slot capacity must be at least 1")]
    ZeroCapacity,
}

/// Index of an occupied slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredStar {
    pub star_id: String,
    pub coords: Equatorial,
}

#[derive(Debug, Clone)]
pub struct StarSlots {
    slots: Vec<Option<RegisteredStar>>,
}

impl StarSlots {
    pub fn with_capacity(capacity: usize) -> Result<Self, SlotError> {
        if capacity == 0 {
            return Err(SlotError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![None; capacity],
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Put a star in the lowest free slot
    pub fn register(&mut self, star_id: &str, coords: Equatorial) -> Result<SlotIndex, SlotError> {
        let capacity = self.capacity();
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_none())
            .ok_or(SlotError::Full { capacity })?;
        *slot = Some(RegisteredStar {
            star_id: star_id.to_string(),
            coords,
        });
        Ok(SlotIndex(index))
    }

    pub fn get(&self, index: SlotIndex) -> Option<&RegisteredStar> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    pub fn release(&mut self, index: SlotIndex) -> Option<RegisteredStar> {
        self.slots.get_mut(index.0).and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Occupied slots in index order
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &RegisteredStar)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|star| (SlotIndex(i), star)))
    }
}

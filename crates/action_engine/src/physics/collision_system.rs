//! Frame-to-frame contact tracking
//!
//! Narrow-phase results for one frame are recorded as [`CollisionPair`]s.
//! Diffing them against the previous frame yields the enter, stay and exit
//! transitions the world turns into collision callbacks.

use std::collections::HashSet;

use crate::foundation::collections::ObjectId;

/// Two objects in contact, stored in a canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Smaller id of the pair
    pub entity_a: ObjectId,
    /// Larger id of the pair
    pub entity_b: ObjectId,
}

impl CollisionPair {
    /// Create a new collision pair (always stores the smaller id first)
    pub fn new(entity_a: ObjectId, entity_b: ObjectId) -> Self {
        if entity_a <= entity_b {
            Self { entity_a, entity_b }
        } else {
            Self {
                entity_a: entity_b,
                entity_b: entity_a,
            }
        }
    }

    /// Whether `id` is one of the two objects
    pub fn involves(&self, id: ObjectId) -> bool {
        self.entity_a == id || self.entity_b == id
    }

    /// The partner of `id`, if `id` belongs to the pair
    pub fn other(&self, id: ObjectId) -> Option<ObjectId> {
        if self.entity_a == id {
            Some(self.entity_b)
        } else if self.entity_b == id {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

/// Contact sets of the current and previous frame
///
/// Pairs are kept in insertion order next to a hash set so that event
/// dispatch follows the order the collision pass found the contacts.
#[derive(Debug, Default)]
pub struct ContactTracker {
    current: Vec<CollisionPair>,
    current_set: HashSet<CollisionPair>,
    previous: Vec<CollisionPair>,
    previous_set: HashSet<CollisionPair>,
}

impl ContactTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the current contacts to the previous frame and start a new frame
    pub fn begin_frame(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        std::mem::swap(&mut self.current_set, &mut self.previous_set);
        self.current.clear();
        self.current_set.clear();
    }

    /// Record a contact for this frame; returns false if it was already recorded
    pub fn record(&mut self, a: ObjectId, b: ObjectId) -> bool {
        let pair = CollisionPair::new(a, b);
        if self.current_set.insert(pair) {
            self.current.push(pair);
            true
        } else {
            false
        }
    }

    /// Whether the pair has been recorded this frame
    pub fn contains(&self, a: ObjectId, b: ObjectId) -> bool {
        self.current_set.contains(&CollisionPair::new(a, b))
    }

    /// Pairs that started touching this frame
    pub fn entered(&self) -> Vec<CollisionPair> {
        self.current
            .iter()
            .filter(|pair| !self.previous_set.contains(pair))
            .copied()
            .collect()
    }

    /// Pairs touching in both frames
    pub fn stayed(&self) -> Vec<CollisionPair> {
        self.current
            .iter()
            .filter(|pair| self.previous_set.contains(pair))
            .copied()
            .collect()
    }

    /// Pairs that stopped touching this frame
    pub fn exited(&self) -> Vec<CollisionPair> {
        self.previous
            .iter()
            .filter(|pair| !self.current_set.contains(pair))
            .copied()
            .collect()
    }

    /// All pairs touching this frame
    pub fn current(&self) -> &[CollisionPair] {
        &self.current
    }

    /// Whether `id` touched anything this frame
    pub fn involves(&self, id: ObjectId) -> bool {
        self.current.iter().any(|pair| pair.involves(id))
    }

    /// Objects touching `id` this frame
    pub fn contacts_of(&self, id: ObjectId) -> Vec<ObjectId> {
        self.current.iter().filter_map(|pair| pair.other(id)).collect()
    }

    /// Forget every contact, including the previous frame
    pub fn clear(&mut self) {
        self.current.clear();
        self.current_set.clear();
        self.previous.clear();
        self.previous_set.clear();
    }
}

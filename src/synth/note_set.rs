#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of MIDI note numbers packed into 128 bits.
///
/// `Copy` and allocation-free, so the render thread can hand snapshots of held
/// or playing notes to observers through a ring buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoteSet(u128);

impl NoteSet {
    pub const EMPTY: NoteSet = NoteSet(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Insert `note`. Notes above 127 are ignored.
    pub fn insert(&mut self, note: u8) {
        if note < 128 {
            self.0 |= 1u128 << note;
        }
    }

    pub fn remove(&mut self, note: u8) {
        if note < 128 {
            self.0 &= !(1u128 << note);
        }
    }

    pub fn contains(&self, note: u8) -> bool {
        note < 128 && self.0 & (1u128 << note) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Notes in ascending order.
    pub fn iter(&self) -> NoteSetIter {
        NoteSetIter { bits: self.0 }
    }
}

impl FromIterator<u8> for NoteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = NoteSet::new();
        for note in iter {
            set.insert(note);
        }
        set
    }
}

impl IntoIterator for NoteSet {
    type Item = u8;
    type IntoIter = NoteSetIter;

    fn into_iter(self) -> NoteSetIter {
        self.iter()
    }
}

pub struct NoteSetIter {
    bits: u128,
}

impl Iterator for NoteSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.bits == 0 {
            return None;
        }
        let note = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_contains() {
        let mut set = NoteSet::new();
        set.insert(0);
        set.insert(64);
        set.insert(127);
        set.insert(200);

        assert_eq!(set.len(), 3);
        assert!(set.contains(127));
        assert!(!set.contains(200));

        set.remove(64);
        assert!(!set.contains(64));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 127]);
    }

    #[test]
    fn iterates_in_ascending_order() {
        let set: NoteSet = [67, 60, 64].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![60, 64, 67]);
    }
}

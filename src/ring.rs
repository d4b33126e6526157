use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use crate::error::RingError;

/// Fixed-capacity ring storing the latest samples, indexed oldest (0) to newest.
///
/// While filling, samples occupy physical slots `[0, len)` in push order. Once
/// full, `write_cursor` marks the physical slot of the oldest sample and the
/// next one to be overwritten.
pub struct SampleRing<T> {
    slots: Vec<T>,
    capacity: usize,
    write_cursor: usize,
}

impl<T> SampleRing<T> {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::ZeroCapacity);
        }
        Ok(Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            write_cursor: 0,
        })
    }

    pub fn push(&mut self, value: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.write_cursor] = value;
            self.write_cursor = (self.write_cursor + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reads the sample at `index`, where 0 is the oldest held sample.
    pub fn at(&self, index: usize) -> Result<&T, RingError> {
        let slot = self.physical_slot(index)?;
        Ok(&self.slots[slot])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, RingError> {
        let slot = self.physical_slot(index)?;
        Ok(&mut self.slots[slot])
    }

    /// Oldest to newest. Each call starts over from the current state.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Drops every held sample. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.write_cursor = 0;
    }

    fn physical_slot(&self, index: usize) -> Result<usize, RingError> {
        let len = self.slots.len();
        if index >= len {
            return Err(RingError::IndexOutOfRange { index, len });
        }
        // write_cursor stays 0 until the ring is full, so this is the identity while filling.
        Ok((self.write_cursor + index) % self.capacity)
    }
}

impl<T: Clone> SampleRing<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Index<usize> for SampleRing<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for SampleRing<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.physical_slot(index) {
            Ok(slot) => &mut self.slots[slot],
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a SampleRing<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    ring: &'a SampleRing<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front >= self.back {
            return None;
        }
        let item = self.ring.at(self.front).ok();
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.ring.at(self.back).ok()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_with(capacity: usize, values: &[i32]) -> SampleRing<i32> {
        let mut ring = SampleRing::new(capacity).unwrap();
        for &value in values {
            ring.push(value);
        }
        ring
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            SampleRing::<f32>::new(0),
            Err(RingError::ZeroCapacity)
        ));
    }

    #[test]
    fn fresh_ring_is_empty() {
        for capacity in [1, 2, 7, 800] {
            let ring = SampleRing::<f32>::new(capacity).unwrap();
            assert_eq!(ring.len(), 0);
            assert!(ring.is_empty());
            assert_eq!(ring.capacity(), capacity);
            assert!(ring.snapshot().is_empty());
        }
    }

    #[test]
    fn partial_fill_keeps_push_order() {
        let ring = ring_with(5, &[10, 20, 30]);
        assert_eq!(ring.len(), 3);
        assert!(!ring.is_full());
        for (i, expected) in [10, 20, 30].iter().enumerate() {
            assert_eq!(ring.at(i).unwrap(), expected);
        }
    }

    #[test]
    fn overflow_keeps_last_capacity_values() {
        let values: Vec<i32> = (0..23).collect();
        let ring = ring_with(5, &values);
        assert_eq!(ring.len(), 5);
        assert!(ring.is_full());
        assert_eq!(ring.snapshot(), vec![18, 19, 20, 21, 22]);
    }

    #[test]
    fn one_past_capacity_evicts_first_value() {
        let ring = ring_with(3, &[1, 2, 3, 4]);
        assert_eq!(*ring.at(0).unwrap(), 2);
        assert_eq!(*ring.at(2).unwrap(), 4);
    }

    #[test]
    fn capacity_four_scenario() {
        let mut ring = ring_with(4, &[1, 2, 3]);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.snapshot(), vec![1, 2, 3]);

        ring.push(4);
        assert_eq!(ring.snapshot(), vec![1, 2, 3, 4]);

        ring.push(5);
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.snapshot(), vec![2, 3, 4, 5]);

        ring.push(6);
        ring.push(7);
        assert_eq!(ring.snapshot(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn capacity_one_overwrites_every_push() {
        let mut ring = ring_with(1, &[10]);
        assert_eq!(ring.snapshot(), vec![10]);
        ring.push(20);
        assert_eq!(ring.snapshot(), vec![20]);
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn repeated_reads_are_stable() {
        let ring = ring_with(3, &[1, 2, 3, 4, 5]);
        for _ in 0..4 {
            assert_eq!(*ring.at(1).unwrap(), 4);
        }
    }

    #[test]
    fn out_of_range_reads_fail() {
        for values in [&[1][..], &[1, 2][..], &[1, 2, 3, 4, 5, 6][..]] {
            let ring = ring_with(4, values);
            let len = ring.len();
            assert_eq!(
                ring.at(len),
                Err(RingError::IndexOutOfRange { index: len, len })
            );
            // What a caller gets from `-1isize as usize`.
            assert!(ring.at(-1isize as usize).is_err());
        }
        let empty = SampleRing::<i32>::new(2).unwrap();
        assert!(empty.at(0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_operator_panics_past_end() {
        let ring = ring_with(2, &[1, 2, 3]);
        let _ = ring[2];
    }

    #[test]
    fn write_through_updates_logical_slot() {
        let mut ring = ring_with(3, &[1, 2, 3, 4]);
        *ring.at_mut(0).unwrap() = 20;
        ring[2] = 40;
        assert_eq!(ring.snapshot(), vec![20, 3, 40]);
    }

    #[test]
    fn iterator_is_restartable_and_reversible() {
        let ring = ring_with(3, &[1, 2, 3, 4, 5]);
        let forward: Vec<i32> = ring.iter().copied().collect();
        let again: Vec<i32> = (&ring).into_iter().copied().collect();
        let backward: Vec<i32> = ring.iter().rev().copied().collect();
        assert_eq!(forward, vec![3, 4, 5]);
        assert_eq!(forward, again);
        assert_eq!(backward, vec![5, 4, 3]);
        assert_eq!(ring.iter().len(), 3);
    }

    #[test]
    fn clear_resets_to_filling_state() {
        let mut ring = ring_with(3, &[1, 2, 3, 4]);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 3);
        ring.push(9);
        ring.push(8);
        assert_eq!(ring.snapshot(), vec![9, 8]);
    }
}

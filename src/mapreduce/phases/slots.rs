//! Write-once output slots for parallel phases
//!
//! A fixed-size array with one slot per task. Each task's result is published
//! into the slot matching its index, exactly once, after the task has handed
//! its output back across the join. The array is only read once every slot
//! has been filled.

use super::PhaseType;
use crate::mapreduce::errors::{MapReduceError, MapReduceResult};

#[derive(Debug)]
pub struct SlotArray<T> {
    phase: PhaseType,
    slots: Vec<Option<T>>,
}

impl<T> SlotArray<T> {
    /// Allocate `len` empty slots for `phase`
    pub fn new(phase: PhaseType, len: usize) -> Self {
        Self {
            phase,
            slots: (0..len).map(|_| None).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that have been published
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Publish a task's output into its slot
    pub fn publish(&mut self, index: usize, value: T) -> MapReduceResult<()> {
        let phase = self.phase;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(MapReduceError::MissingSlot { phase, index })?;

        if slot.is_some() {
            return Err(MapReduceError::SlotAlreadyPublished { phase, index });
        }
        *slot = Some(value);
        Ok(())
    }

    /// Take every slot's value in index order, failing on the first gap
    pub fn into_complete(self) -> MapReduceResult<Vec<T>> {
        let phase = self.phase;
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(MapReduceError::MissingSlot { phase, index }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_out_of_order() {
        let mut slots = SlotArray::new(PhaseType::Map, 3);
        slots.publish(2, "c").unwrap();
        slots.publish(0, "a").unwrap();
        assert!(!slots.is_complete());
        assert_eq!(slots.filled(), 2);

        slots.publish(1, "b").unwrap();
        assert!(slots.is_complete());
        assert_eq!(slots.into_complete().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_double_publish_rejected() {
        let mut slots = SlotArray::new(PhaseType::Reduce, 2);
        slots.publish(1, 10).unwrap();
        assert_eq!(
            slots.publish(1, 11),
            Err(MapReduceError::SlotAlreadyPublished {
                phase: PhaseType::Reduce,
                index: 1
            })
        );
    }

    #[test]
    fn test_out_of_range_publish_rejected() {
        let mut slots = SlotArray::new(PhaseType::Map, 1);
        assert!(slots.publish(5, ()).is_err());
    }

    #[test]
    fn test_incomplete_slots_report_gap() {
        let mut slots = SlotArray::new(PhaseType::Map, 3);
        slots.publish(0, 1).unwrap();
        slots.publish(2, 3).unwrap();
        assert_eq!(
            slots.into_complete(),
            Err(MapReduceError::MissingSlot {
                phase: PhaseType::Map,
                index: 1
            })
        );
    }

    #[test]
    fn test_zero_slots() {
        let slots: SlotArray<u8> = SlotArray::new(PhaseType::Map, 0);
        assert!(slots.is_empty());
        assert!(slots.is_complete());
        assert!(slots.into_complete().unwrap().is_empty());
    }
}

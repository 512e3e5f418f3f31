//! Relationship type → payload bit assignment
//!
//! Propagating types come first and take two bits each: the forward bit
//! (the column is the *object* of the edge, e.g. a parent) and the inverted bit
//! (the column is the *subject*, e.g. a child). Non-propagating types follow
//! with a single bit each, set on both rows of the edge.

use rustc_hash::FxHashMap;

use super::indexer::DataIndexer;
use crate::model::RelationshipType;

#[derive(Debug, Clone)]
pub struct RelationCodec {
    /// Types in bit order
    relationships: Vec<RelationshipType>,
    /// Relationship id → (first bit, propagates)
    offsets: FxHashMap<String, (u32, bool)>,
    bits_needed: u32,
}

impl RelationCodec {
    /// Build a codec over the distinct types in `relationships`.
    pub fn new<'a, I>(relationships: I) -> Self
    where
        I: IntoIterator<Item = &'a RelationshipType>,
    {
        let mut distinct: Vec<RelationshipType> = Vec::new();
        for rel in relationships {
            if !distinct.contains(rel) {
                distinct.push(rel.clone());
            }
        }
        // Stable: keeps first-seen order within each group
        distinct.sort_by_key(|rel| !rel.propagates);

        let mut offsets = FxHashMap::default();
        let mut next = 0u32;
        for rel in &distinct {
            offsets.insert(rel.id.clone(), (next, rel.propagates));
            next += if rel.propagates { 2 } else { 1 };
        }

        Self {
            relationships: distinct,
            offsets,
            bits_needed: next,
        }
    }

    /// Number of payload bits required
    pub fn bits_needed(&self) -> u32 {
        self.bits_needed
    }

    /// Highest bit index in use, `None` for an empty codec
    pub fn max_idx(&self) -> Option<u32> {
        self.bits_needed.checked_sub(1)
    }

    pub fn relationships(&self) -> &[RelationshipType] {
        &self.relationships
    }

    /// Bit for `relationship`; `inverted` selects the child-direction bit of a
    /// propagating type and is ignored for non-propagating ones.
    pub fn bit_index(&self, relationship: &RelationshipType, inverted: bool) -> Option<u32> {
        let (offset, propagates) = *self.offsets.get(&relationship.id)?;
        Some(if propagates && inverted { offset + 1 } else { offset })
    }

    pub fn is_set<D: DataIndexer>(
        &self,
        value: D,
        relationship: &RelationshipType,
        inverted: bool,
    ) -> bool {
        self.bit_index(relationship, inverted)
            .map(|bit| value.is_set(bit))
            .unwrap_or(false)
    }

    /// Relationship types whose forward bit is set in `value`.
    pub fn decode<D: DataIndexer>(&self, value: D) -> Vec<RelationshipType> {
        self.relationships
            .iter()
            .filter(|rel| self.is_set(value, rel, false))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some() -> RelationshipType {
        RelationshipType::new("some", "some relation type", false)
    }

    fn other() -> RelationshipType {
        RelationshipType::new("other", "other relation type", false)
    }

    #[test]
    fn test_bit_index_propagating() {
        let codec = RelationCodec::new(&[
            RelationshipType::is_a(),
            RelationshipType::part_of(),
            some(),
        ]);
        assert_eq!(codec.bit_index(&RelationshipType::is_a(), false), Some(0));
        assert_eq!(codec.bit_index(&RelationshipType::is_a(), true), Some(1));
        assert_eq!(codec.bit_index(&RelationshipType::part_of(), false), Some(2));
        assert_eq!(codec.bit_index(&RelationshipType::part_of(), true), Some(3));
        assert_eq!(codec.bit_index(&some(), false), Some(4));
        assert_eq!(codec.bit_index(&some(), true), Some(4));
        assert_eq!(codec.bit_index(&other(), false), None);
    }

    #[test]
    fn test_propagating_types_come_first() {
        let codec = RelationCodec::new(&[
            RelationshipType::is_a(),
            some(),
            other(),
            RelationshipType::part_of(),
        ]);
        assert_eq!(codec.bits_needed(), 6);
        assert_eq!(codec.max_idx(), Some(5));
        assert_eq!(codec.bit_index(&RelationshipType::part_of(), false), Some(2));
        assert_eq!(codec.bit_index(&other(), false), Some(5));
    }

    #[test]
    fn test_bits_needed() {
        let codec = RelationCodec::new(&[RelationshipType::is_a(), RelationshipType::part_of()]);
        assert_eq!(codec.max_idx(), Some(3));

        let codec = RelationCodec::new(&[some(), other(), some()]);
        assert_eq!(codec.bits_needed(), 2);

        let codec = RelationCodec::new(std::iter::empty::<&RelationshipType>());
        assert_eq!(codec.max_idx(), None);
    }

    #[test]
    fn test_is_set_and_decode() {
        let codec = RelationCodec::new(&[RelationshipType::is_a(), some()]);
        assert!(codec.is_set(0b01u8, &RelationshipType::is_a(), false));
        assert!(codec.is_set(0b10u8, &RelationshipType::is_a(), true));
        assert!(!codec.is_set(0b10u8, &RelationshipType::is_a(), false));
        assert!(codec.is_set(0b100u8, &some(), false));
        assert!(!codec.is_set(0b011u8, &some(), false));

        assert_eq!(codec.decode(0b101u8), vec![RelationshipType::is_a(), some()]);
        assert!(codec.decode(0b010u8).is_empty());
    }
}

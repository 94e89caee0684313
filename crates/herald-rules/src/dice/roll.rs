//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

use super::{DiceTag, SUCCESS_THRESHOLD};

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The pool this die belongs to.
    pub tag: DiceTag,
    /// The face rolled (1 to 10).
    pub value: u8,
}

impl DieResult {
    /// Whether this die counts as a success.
    pub fn is_success(&self) -> bool {
        self.value >= SUCCESS_THRESHOLD
    }
}

/// The result of rolling an entire dice pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Build a result from fixed faces, regular dice first.
    pub fn from_faces(regular: &[u8], desperation: &[u8]) -> Self {
        let tagged = |tag: DiceTag| move |value: &u8| DieResult { tag, value: *value };
        let dice = regular
            .iter()
            .map(tagged(DiceTag::Regular))
            .chain(desperation.iter().map(tagged(DiceTag::Desperation)))
            .collect();
        Self { dice }
    }

    /// Count dice with values at or above the given threshold.
    pub fn count_at_or_above(&self, threshold: u8) -> u32 {
        self.dice.iter().filter(|d| d.value >= threshold).count() as u32
    }

    /// Count dice showing exactly `face`.
    pub fn count_face(&self, face: u8) -> u32 {
        self.dice.iter().filter(|d| d.value == face).count() as u32
    }

    /// Get all die results with a specific tag.
    pub fn by_tag(&self, tag: DiceTag) -> Vec<&DieResult> {
        self.dice.iter().filter(|d| d.tag == tag).collect()
    }

    /// Count dice with a specific tag showing exactly `face`.
    pub fn count_face_by_tag(&self, tag: DiceTag, face: u8) -> u32 {
        self.by_tag(tag).iter().filter(|d| d.value == face).count() as u32
    }

    /// Faces of the dice with a specific tag, in roll order.
    pub fn values(&self, tag: DiceTag) -> Vec<u8> {
        self.by_tag(tag).iter().map(|d| d.value).collect()
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |tag| {
            self.values(tag)
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "[{}]", join(DiceTag::Regular))?;
        if !self.by_tag(DiceTag::Desperation).is_empty() {
            write!(f, " + desperation [{}]", join(DiceTag::Desperation))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_faces_tags_pools() {
        let r = RollResult::from_faces(&[2, 3, 9], &[1, 10]);
        assert_eq!(r.count(), 5);
        assert_eq!(r.values(DiceTag::Regular), vec![2, 3, 9]);
        assert_eq!(r.values(DiceTag::Desperation), vec![1, 10]);
    }

    #[test]
    fn count_at_or_above() {
        let r = RollResult::from_faces(&[5, 6, 10], &[7]);
        assert_eq!(r.count_at_or_above(SUCCESS_THRESHOLD), 3);
        assert_eq!(r.count_at_or_above(10), 1);
    }

    #[test]
    fn face_counts() {
        let r = RollResult::from_faces(&[10, 1, 10], &[1, 10]);
        assert_eq!(r.count_face(10), 3);
        assert_eq!(r.count_face_by_tag(DiceTag::Desperation, 1), 1);
        assert_eq!(r.count_face_by_tag(DiceTag::Regular, 1), 1);
    }

    #[test]
    fn die_success() {
        assert!(!DieResult { tag: DiceTag::Regular, value: 5 }.is_success());
        assert!(DieResult { tag: DiceTag::Regular, value: 6 }.is_success());
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.count(), 0);
        assert_eq!(r.count_at_or_above(1), 0);
        assert_eq!(r.to_string(), "[]");
    }

    #[test]
    fn display() {
        assert_eq!(RollResult::from_faces(&[3, 5], &[]).to_string(), "[3, 5]");
        assert_eq!(
            RollResult::from_faces(&[3], &[1, 10]).to_string(),
            "[3] + desperation [1, 10]"
        );
    }
}

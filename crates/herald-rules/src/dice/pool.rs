//! Dice pool construction and rolling.

use rand::Rng;

use super::roll::{DieResult, RollResult};
use super::{DIE_SIDES, DiceTag};

/// A collection of d10s to be rolled together.
#[derive(Debug, Clone, Default)]
pub struct DicePool {
    /// The tag of each die in the pool, in roll order.
    pub dice: Vec<DiceTag>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    /// Add `count` regular dice.
    pub fn add(self, count: u32) -> Self {
        self.add_tagged(DiceTag::Regular, count)
    }

    /// Add `count` dice with a specific tag.
    pub fn add_tagged(mut self, tag: DiceTag, count: u32) -> Self {
        for _ in 0..count {
            self.dice.push(tag);
        }
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Roll all dice in the pool using the given RNG.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> RollResult {
        let dice = self
            .dice
            .iter()
            .map(|tag| DieResult {
                tag: *tag,
                value: rng.random_range(1..=DIE_SIDES),
            })
            .collect();
        RollResult { dice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_pool() {
        let pool = DicePool::new();
        assert_eq!(pool.count(), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn add_dice() {
        let pool = DicePool::new()
            .add(3)
            .add_tagged(DiceTag::Desperation, 2);
        assert_eq!(pool.count(), 5);
        assert_eq!(
            pool.dice.iter().filter(|t| **t == DiceTag::Desperation).count(),
            2
        );
    }

    #[test]
    fn roll_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = DicePool::new().add(50).add_tagged(DiceTag::Desperation, 10);
        let result = pool.roll(&mut rng);
        assert_eq!(result.count(), 60);
        assert!(result.dice.iter().all(|d| (1..=10).contains(&d.value)));
    }

    #[test]
    fn roll_keeps_tags_in_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = DicePool::new().add(2).add_tagged(DiceTag::Desperation, 1);
        let result = pool.roll(&mut rng);
        assert_eq!(result.dice[0].tag, DiceTag::Regular);
        assert_eq!(result.dice[2].tag, DiceTag::Desperation);
    }

    #[test]
    fn same_seed_same_roll() {
        let pool = DicePool::new().add(10);
        let a = pool.roll(&mut StdRng::seed_from_u64(42));
        let b = pool.roll(&mut StdRng::seed_from_u64(42));
        assert_eq!(a.values(DiceTag::Regular), b.values(DiceTag::Regular));
    }
}

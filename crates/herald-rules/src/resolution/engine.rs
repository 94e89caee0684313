//! Rolling and evaluating a pool in one step.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::RollOutcome;
use crate::dice::{DicePool, DiceTag};
use crate::error::RulesResult;
use crate::validate::{
    DESPERATION_DICE_RANGE, DIFFICULTY_RANGE, POOL_RANGE, TENSION_RANGE, check_range,
};

/// The inputs of a single roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// Regular dice (1-100).
    pub pool: u32,
    /// Desperation dice added on top of the pool (0-10).
    pub desperation: u32,
    /// Successes needed before danger (0-6).
    pub difficulty: u32,
    /// Danger added to the difficulty (0-10).
    pub danger: u8,
}

impl RollRequest {
    /// A roll of `pool` regular dice against `difficulty`.
    pub fn new(pool: u32, difficulty: u32) -> Self {
        Self {
            pool,
            desperation: 0,
            difficulty,
            danger: 0,
        }
    }

    /// Add desperation dice.
    pub fn with_desperation(mut self, dice: u32) -> Self {
        self.desperation = dice;
        self
    }

    /// Raise the target by the current danger rating.
    pub fn with_danger(mut self, danger: u8) -> Self {
        self.danger = danger;
        self
    }

    /// Successes needed to pass.
    pub fn target(&self) -> u32 {
        self.difficulty + u32::from(self.danger)
    }

    /// Reject out-of-range inputs.
    pub fn validate(&self) -> RulesResult<()> {
        check_range("pool size", self.pool, &POOL_RANGE)?;
        check_range("desperation dice", self.desperation, &DESPERATION_DICE_RANGE)?;
        check_range("difficulty", self.difficulty, &DIFFICULTY_RANGE)?;
        check_range("danger", self.danger, &TENSION_RANGE)?;
        Ok(())
    }
}

/// Stateless roller. Each call draws from its own freshly seeded RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceEngine;

impl DiceEngine {
    /// Validate, roll and evaluate a request.
    pub fn resolve(request: &RollRequest) -> RulesResult<RollOutcome> {
        let mut rng = StdRng::from_os_rng();
        Self::resolve_with(request, &mut rng)
    }

    /// Like [`DiceEngine::resolve`] with a caller-provided RNG.
    pub fn resolve_with<R: Rng>(request: &RollRequest, rng: &mut R) -> RulesResult<RollOutcome> {
        request.validate()?;
        let roll = DicePool::new()
            .add(request.pool)
            .add_tagged(DiceTag::Desperation, request.desperation)
            .roll(rng);
        Ok(RollOutcome::evaluate(roll, request.target()))
    }
}

//! Experience cost of improvements.

/// Cost of one new specialty.
pub const SPECIALTY_COST: u32 = 3;

/// Cost of raising an attribute to `new_rating`.
pub fn attribute_cost(new_rating: u8) -> u32 {
    u32::from(new_rating) * 4
}

/// Cost of raising a skill to `new_rating`.
pub fn skill_cost(new_rating: u8) -> u32 {
    u32::from(new_rating) * 2
}

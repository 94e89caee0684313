//! Input limits and boundary checks shared by every rules operation.

use std::ops::RangeInclusive;

use crate::error::{RulesError, RulesResult};

/// Attribute ratings.
pub const ATTRIBUTE_RANGE: RangeInclusive<u8> = 1..=5;
/// Skill ratings.
pub const SKILL_RANGE: RangeInclusive<u8> = 0..=5;
/// Desperation and danger ratings.
pub const TENSION_RANGE: RangeInclusive<u8> = 0..=10;
/// Size of the regular dice pool in a single roll.
pub const POOL_RANGE: RangeInclusive<u32> = 1..=100;
/// Number of desperation dice in a single roll.
pub const DESPERATION_DICE_RANGE: RangeInclusive<u32> = 0..=10;
/// Difficulty of a single roll, before danger is added.
pub const DIFFICULTY_RANGE: RangeInclusive<u32> = 0..=6;
/// Character name length in characters.
pub const NAME_LENGTH: RangeInclusive<usize> = 2..=32;
/// Specialty name length in characters.
pub const SPECIALTY_LENGTH: RangeInclusive<usize> = 2..=50;
/// Maximum length of ambition and desire text.
pub const MAX_TEXT_LENGTH: usize = 200;
/// Equipment item name length in characters.
pub const ITEM_NAME_LENGTH: RangeInclusive<usize> = 1..=100;
/// Equipment item description length in characters.
pub const ITEM_DESCRIPTION_LENGTH: RangeInclusive<usize> = 0..=500;
/// Note title length in characters.
pub const NOTE_TITLE_LENGTH: RangeInclusive<usize> = 1..=100;
/// Note content length in characters.
pub const NOTE_CONTENT_LENGTH: RangeInclusive<usize> = 1..=2000;

/// Characters a character name may not start with.
const FORBIDDEN_NAME_PREFIXES: &[char] = &['`', '*', '_', '~', '|', '>', '@', '#'];

/// Reject `value` unless it lies inside `range`.
pub fn check_range<T>(field: &'static str, value: T, range: &RangeInclusive<T>) -> RulesResult<T>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(RulesError::validation(
            field,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ))
    }
}

/// Validate and normalize a character name. Returns the trimmed name.
pub fn check_character_name(name: &str) -> RulesResult<String> {
    let name = name.trim();
    let len = name.chars().count();
    if !NAME_LENGTH.contains(&len) {
        return Err(RulesError::validation(
            "character name",
            format!(
                "must be {} to {} characters long",
                NAME_LENGTH.start(),
                NAME_LENGTH.end()
            ),
        ));
    }
    if name.starts_with(FORBIDDEN_NAME_PREFIXES) {
        return Err(RulesError::validation(
            "character name",
            "cannot start with a formatting character",
        ));
    }
    Ok(name.to_string())
}

/// Validate free text such as an ambition or desire. Returns the trimmed text.
pub fn check_text(field: &'static str, text: &str) -> RulesResult<String> {
    let text = text.trim();
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(RulesError::validation(
            field,
            format!("must be at most {MAX_TEXT_LENGTH} characters"),
        ));
    }
    Ok(text.to_string())
}

/// Validate a specialty name. Returns the trimmed name.
pub fn check_specialty_name(name: &str) -> RulesResult<String> {
    let name = name.trim();
    let len = name.chars().count();
    if !SPECIALTY_LENGTH.contains(&len) {
        return Err(RulesError::validation(
            "specialty name",
            format!(
                "must be {} to {} characters long",
                SPECIALTY_LENGTH.start(),
                SPECIALTY_LENGTH.end()
            ),
        ));
    }
    Ok(name.to_string())
}

/// Trim `text` and reject it unless its length in characters lies inside `range`.
pub fn check_length(
    field: &'static str,
    text: &str,
    range: &RangeInclusive<usize>,
) -> RulesResult<String> {
    let text = text.trim();
    let len = text.chars().count();
    if !range.contains(&len) {
        let reason = if *range.start() == 0 {
            format!("must be at most {} characters", range.end())
        } else {
            format!("must be {} to {} characters long", range.start(), range.end())
        };
        return Err(RulesError::validation(field, reason));
    }
    Ok(text.to_string())
}

/// Lowercase `s` and drop spaces, hyphens and underscores, for catalog lookups.
pub(crate) fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

//! Argument parsers for clap's `value_parser`.

use herald_rules::{
    Adjustment, Attribute, Creed, DamageKind, Drive, Edge, Healing, OverreachChoice, Skill,
    SkillTemplate, TrackKind,
};

fn unknown(what: &str, value: &str, hint: &str) -> String {
    format!("unknown {what} '{value}' ({hint})")
}

pub fn attribute(s: &str) -> Result<Attribute, String> {
    Attribute::parse(s).ok_or_else(|| unknown("attribute", s, "e.g. strength, wits, resolve"))
}

pub fn skill(s: &str) -> Result<Skill, String> {
    Skill::parse(s).ok_or_else(|| unknown("skill", s, "see `herald catalog skills`"))
}

pub fn edge(s: &str) -> Result<Edge, String> {
    Edge::parse(s).ok_or_else(|| unknown("edge", s, "see `herald catalog edges`"))
}

pub fn creed(s: &str) -> Result<Creed, String> {
    Creed::parse(s).ok_or_else(|| unknown("creed", s, "see `herald catalog creeds`"))
}

pub fn drive(s: &str) -> Result<Drive, String> {
    Drive::parse(s).ok_or_else(|| unknown("drive", s, "see `herald catalog drives`"))
}

pub fn template(s: &str) -> Result<SkillTemplate, String> {
    SkillTemplate::parse(s).ok_or_else(|| unknown("template", s, "jack, balanced or specialist"))
}

pub fn track(s: &str) -> Result<TrackKind, String> {
    TrackKind::parse(s).ok_or_else(|| unknown("track", s, "health or willpower"))
}

pub fn damage_kind(s: &str) -> Result<DamageKind, String> {
    DamageKind::parse(s).ok_or_else(|| unknown("damage type", s, "superficial or aggravated"))
}

pub fn overreach(s: &str) -> Result<OverreachChoice, String> {
    OverreachChoice::parse(s).ok_or_else(|| unknown("choice", s, "overreach or despair"))
}

/// `strength=3`
pub fn attribute_rating(s: &str) -> Result<(Attribute, u8), String> {
    let (name, rating) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ATTRIBUTE=RATING, got '{s}'"))?;
    let rating = rating
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a rating", rating.trim()))?;
    Ok((attribute(name)?, rating))
}

/// `none` clears, anything else must name a creed.
pub fn optional_creed(s: &str) -> Result<Option<Creed>, String> {
    if s.trim().eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        creed(s).map(Some)
    }
}

/// `none` clears, anything else must name a drive.
pub fn optional_drive(s: &str) -> Result<Option<Drive>, String> {
    if s.trim().eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        drive(s).map(Some)
    }
}

/// `set N`, `add N`, `sub N` or `reset`.
pub fn adjustment(action: &str, value: Option<u8>) -> Result<Adjustment, String> {
    let need = |v: Option<u8>| v.ok_or_else(|| format!("'{action}' needs an amount"));
    match action.trim().to_lowercase().as_str() {
        "set" => Ok(Adjustment::Set(need(value)?)),
        "add" | "+" => Ok(Adjustment::Add(need(value)?)),
        "sub" | "subtract" | "-" => Ok(Adjustment::Subtract(need(value)?)),
        "reset" | "clear" => Ok(Adjustment::Reset),
        _ => Err(unknown("action", action, "set, add, sub or reset")),
    }
}

/// `superficial N`, `aggravated N` or `all`.
pub fn healing(kind: &str, amount: Option<u32>) -> Result<Healing, String> {
    if kind.trim().eq_ignore_ascii_case("all") {
        return Ok(Healing::All);
    }
    let amount = amount.ok_or_else(|| format!("healing {kind} needs an amount"))?;
    match damage_kind(kind)? {
        DamageKind::Superficial => Ok(Healing::Superficial(amount)),
        DamageKind::Aggravated => Ok(Healing::Aggravated(amount)),
    }
}

//! Closed catalogs: skills, edges and perks, creeds and drives.
//!
//! Every name that reaches the rules engine is parsed into one of these
//! types first, so an unknown skill or perk is rejected at the boundary.

pub mod edges;
pub mod hunter;
pub mod skills;

pub use edges::{Edge, EdgeCategory};
pub use hunter::{Creed, Drive};
pub use skills::{Skill, SkillCategory, SkillTemplate};

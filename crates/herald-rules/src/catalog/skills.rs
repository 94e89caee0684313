//! The 27 skills and starting skill templates.

use serde::{Deserialize, Serialize};

use crate::validate::normalize_key;

/// Skill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    /// Body and hands.
    Physical,
    /// People.
    Social,
    /// Knowledge.
    Mental,
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Physical => write!(f, "Physical"),
            Self::Social => write!(f, "Social"),
            Self::Mental => write!(f, "Mental"),
        }
    }
}

macro_rules! skills {
    ($($category:ident => [$($variant:ident => $name:literal),+ $(,)?]),+ $(,)?) => {
        /// One of the 27 skills.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Skill {
            $($(
                #[doc = $name]
                $variant,
            )+)+
        }

        impl Skill {
            /// All skills in catalog order.
            pub fn all() -> &'static [Self] {
                &[$($(Self::$variant,)+)+]
            }

            /// Display name.
            pub fn name(self) -> &'static str {
                match self {
                    $($(Self::$variant => $name,)+)+
                }
            }

            /// The category this skill belongs to.
            pub fn category(self) -> SkillCategory {
                match self {
                    $($(Self::$variant => SkillCategory::$category,)+)+
                }
            }
        }
    };
}

skills! {
    Physical => [
        Athletics => "Athletics",
        Brawl => "Brawl",
        Craft => "Craft",
        Driving => "Driving",
        Firearms => "Firearms",
        Larceny => "Larceny",
        Melee => "Melee",
        Stealth => "Stealth",
        Survival => "Survival",
    ],
    Social => [
        AnimalKen => "Animal Ken",
        Etiquette => "Etiquette",
        Insight => "Insight",
        Intimidation => "Intimidation",
        Leadership => "Leadership",
        Performance => "Performance",
        Persuasion => "Persuasion",
        Streetwise => "Streetwise",
        Subterfuge => "Subterfuge",
    ],
    Mental => [
        Academics => "Academics",
        Awareness => "Awareness",
        Finance => "Finance",
        Investigation => "Investigation",
        Medicine => "Medicine",
        Occult => "Occult",
        Politics => "Politics",
        Science => "Science",
        Technology => "Technology",
    ],
}

impl Skill {
    /// Parse a skill name. Case, spaces and underscores are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let key = normalize_key(s);
        Self::all()
            .iter()
            .copied()
            .find(|skill| normalize_key(skill.name()) == key)
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A starting spread of skill dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillTemplate {
    /// Many skills at low ratings.
    JackOfAllTrades,
    /// An even spread.
    Balanced,
    /// Few skills, one of them high.
    Specialist,
}

impl SkillTemplate {
    /// All templates.
    pub fn all() -> &'static [Self] {
        &[Self::JackOfAllTrades, Self::Balanced, Self::Specialist]
    }

    /// Parse a template name.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_key(s).as_str() {
            "jackofalltrades" | "jack" => Some(Self::JackOfAllTrades),
            "balanced" => Some(Self::Balanced),
            "specialist" => Some(Self::Specialist),
            _ => None,
        }
    }

    /// `(dots, number of skills)` pairs, highest rating first.
    pub fn distribution(self) -> &'static [(u8, usize)] {
        match self {
            Self::JackOfAllTrades => &[(3, 1), (2, 8), (1, 10)],
            Self::Balanced => &[(3, 3), (2, 5), (1, 7)],
            Self::Specialist => &[(4, 1), (3, 3), (2, 3), (1, 3)],
        }
    }

    /// Ratings this template assigns, filling skills in catalog order.
    /// Skills not listed stay at 0.
    pub fn ratings(self) -> Vec<(Skill, u8)> {
        let dots = self
            .distribution()
            .iter()
            .flat_map(|(rating, count)| std::iter::repeat_n(*rating, *count));
        Skill::all().iter().copied().zip(dots).collect()
    }
}

impl std::fmt::Display for SkillTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JackOfAllTrades => write!(f, "Jack of All Trades"),
            Self::Balanced => write!(f, "Balanced"),
            Self::Specialist => write!(f, "Specialist"),
        }
    }
}

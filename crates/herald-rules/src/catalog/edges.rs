//! Edges and the perks each one unlocks.

use serde::{Deserialize, Serialize};

use crate::validate::normalize_key;

/// Edge category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeCategory {
    /// Equipment and resources.
    Assets,
    /// Trained abilities.
    Aptitudes,
    /// Supernatural gifts.
    Endowments,
}

impl std::fmt::Display for EdgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assets => write!(f, "Assets"),
            Self::Aptitudes => write!(f, "Aptitudes"),
            Self::Endowments => write!(f, "Endowments"),
        }
    }
}

macro_rules! edges {
    ($($category:ident => [$($variant:ident => $name:literal: [$($perk:literal),+ $(,)?]),+ $(,)?]),+ $(,)?) => {
        /// One of the 17 edges.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Edge {
            $($(
                #[doc = $name]
                $variant,
            )+)+
        }

        impl Edge {
            /// All edges in catalog order.
            pub fn all() -> &'static [Self] {
                &[$($(Self::$variant,)+)+]
            }

            /// Display name.
            pub fn name(self) -> &'static str {
                match self {
                    $($(Self::$variant => $name,)+)+
                }
            }

            /// The category this edge belongs to.
            pub fn category(self) -> EdgeCategory {
                match self {
                    $($(Self::$variant => EdgeCategory::$category,)+)+
                }
            }

            /// Perks available for this edge.
            pub fn perks(self) -> &'static [&'static str] {
                match self {
                    $($(Self::$variant => &[$($perk),+],)+)+
                }
            }
        }
    };
}

edges! {
    Assets => [
        Arsenal => "Arsenal": [
            "Team Requisition", "Special Features", "Exotics", "Untraceable", "Backup Piece",
        ],
        Fleet => "Fleet": [
            "Armor", "Performance", "Surveillance", "Untraceable", "Hidden Cache", "Wagon Train",
        ],
        Ordnance => "Ordnance": [
            "Multiple Payloads", "Exotics", "Non-lethal Munitions", "Disguised Delivery",
        ],
        Library => "Library": [
            "Where They Hide", "Who They Are", "How to Halt Them", "How to Harm Them", "Binge",
            "Friendly Librarian", "Group Study", "Permanent Fixture", "How to Silence Them",
            "Pattern Analysis", "Where they Go",
        ],
        ExperimentalMedicine => "Experimental Medicine": [
            "Improved Resilience", "Phoenix Protocol", "Monstrous Enhancement",
            "Unstable Steroids",
        ],
    ],
    Aptitudes => [
        ImprovisedGear => "Improvised Gear": [
            "Frugal", "Specialization", "Mass Production", "Speed Crafting", "Made to Last",
        ],
        GlobalAccess => "Global Access": [
            "Watching Big Brother", "Money Trap", "All-Access Pass", "The Letter of the Law",
            "Digital Cannon Fodder", "Intranet Insertion", "Spoof",
        ],
        DroneJockey => "Drone Jockey": [
            "Autonomous", "Variants", "Specialist Skill", "Armaments", "Payload",
            "Electronic Shield",
        ],
        BeastWhisperer => "Beast Whisperer": [
            "Incorruptible", "Complex Commands", "Menagerie", "Incognito", "Supernatural Scent",
        ],
        Turncoat => "Turncoat": [
            "Deathbed Confession", "Stick to the Plan", "Poker Face", "We Come as a Team",
        ],
    ],
    Endowments => [
        SenseTheUnnatural => "Sense the Unnatural": [
            "Creature Specialization", "Precision", "Range", "Handfree", "Horrid Detail",
            "Network",
        ],
        RepelTheUnnatural => "Repel the Unnatural": [
            "Ward", "Damage", "Creature Specialization", "Handfree",
        ],
        ThwartTheUnnatural => "Thwart the Unnatural": [
            "Ward", "Creature Specialization", "Recognition", "Handfree", "Redirection",
        ],
        Artifact => "Artifact": [
            "Empower", "Attraction", "Detection", "Shield", "Feature Unlocked",
        ],
        CleanseTheUnnatural => "Cleanse the Unnatural": [
            "Bedside Manner", "Trace the Threads", "Inflict Stigmata", "Psychic Backlash",
        ],
        GreatDestiny => "Great Destiny": [
            "Divine Protection", "Heavenly Resolve", "Sacred Insight", "Influence Fate",
        ],
        UnnaturalChanges => "Unnatural Changes": [
            "Breadth", "Maximized Neuropathways", "Neuropathway Practive", "Handsfree",
        ],
    ],
}

impl Edge {
    /// Parse an edge name. Case, spaces and hyphens are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let key = normalize_key(s);
        Self::all()
            .iter()
            .copied()
            .find(|edge| normalize_key(edge.name()) == key)
    }

    /// Look up one of this edge's perks by name, returning its catalog spelling.
    pub fn perk(self, name: &str) -> Option<&'static str> {
        let key = normalize_key(name);
        self.perks()
            .iter()
            .copied()
            .find(|perk| normalize_key(perk) == key)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caving competency checks.
//!
//! Users record their experience per skill category as a free-text label
//! chosen from a fixed list. The coarse level is taken from the label's
//! trailing word, so `"SRT - intermediate"` ranks as `Intermediate`.
//!
//! ## Invariants
//!
//! - A label that is not in the definition table never grants competency
//! - Labels whose trailing word is not a level token rank as `None`
//! - Levels are compared by ordinal: `None < Basic < Intermediate < Advanced < Leader`

use crate::types::User;
use serde::{Deserialize, Serialize};

/// A skill category in the club's competency taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    /// Horizontal caving.
    Horizontal,
    /// Single rope technique.
    Vertical,
    /// Leading horizontal trips.
    LeadingHorizontal,
    /// Leading SRT trips.
    LeadingVertical,
}

impl SkillCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::LeadingHorizontal,
        Self::LeadingVertical,
    ];

    /// Parses a category key as stored by the backend.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            "leading_horizontal" => Some(Self::LeadingHorizontal),
            "leading_vertical" => Some(Self::LeadingVertical),
            _ => None,
        }
    }

    /// Returns the backend key for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::LeadingHorizontal => "leading_horizontal",
            Self::LeadingVertical => "leading_vertical",
        }
    }
}

/// Coarse competency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetencyLevel {
    /// No recorded experience.
    None,
    /// Has been on beginner trips.
    Basic,
    /// Comfortable on most club trips.
    Intermediate,
    /// Handles hard trips unaided.
    Advanced,
    /// Can lead others.
    Leader,
}

impl CompetencyLevel {
    /// Derives a level from a skill label's trailing word.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let token = label
            .split_whitespace()
            .next_back()
            .unwrap_or_default()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_ascii_lowercase();

        match token.as_str() {
            "basic" => Self::Basic,
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            "leader" => Self::Leader,
            _ => Self::None,
        }
    }

    /// Returns the ordinal rank (0-4).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Basic => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::Leader => 4,
        }
    }
}

/// One accepted label for a skill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDefinition {
    /// The skill this label belongs to.
    pub category: SkillCategory,
    /// The label as stored on the user's profile.
    pub label: &'static str,
    /// What the label means, for display.
    pub description: &'static str,
}

/// The fixed skill definition table.
pub const SKILL_DEFINITIONS: &[SkillDefinition] = &[
    SkillDefinition {
        category: SkillCategory::Horizontal,
        label: "No caving experience",
        description: "Has not been caving before",
    },
    SkillDefinition {
        category: SkillCategory::Horizontal,
        label: "Horizontal caving - basic",
        description: "Has done a few easy trips with guidance",
    },
    SkillDefinition {
        category: SkillCategory::Horizontal,
        label: "Horizontal caving - intermediate",
        description: "Comfortable on longer trips with climbs, squeezes and ladders",
    },
    SkillDefinition {
        category: SkillCategory::Horizontal,
        label: "Horizontal caving - advanced",
        description: "Confident on any horizontal trip, including committing ones",
    },
    SkillDefinition {
        category: SkillCategory::Vertical,
        label: "No SRT experience",
        description: "Has never used single rope technique",
    },
    SkillDefinition {
        category: SkillCategory::Vertical,
        label: "SRT - basic",
        description: "Can prusik and abseil on a straight hang",
    },
    SkillDefinition {
        category: SkillCategory::Vertical,
        label: "SRT - intermediate",
        description: "Can pass rebelays and deviations",
    },
    SkillDefinition {
        category: SkillCategory::Vertical,
        label: "SRT - advanced",
        description: "Can pass knots and perform a pick-off",
    },
    SkillDefinition {
        category: SkillCategory::LeadingHorizontal,
        label: "Horizontal seconder - intermediate",
        description: "Can second a horizontal trip",
    },
    SkillDefinition {
        category: SkillCategory::LeadingHorizontal,
        label: "Horizontal trip - leader",
        description: "Can lead horizontal trips",
    },
    SkillDefinition {
        category: SkillCategory::LeadingVertical,
        label: "SRT seconder - advanced",
        description: "Can second an SRT trip and help rig",
    },
    SkillDefinition {
        category: SkillCategory::LeadingVertical,
        label: "SRT trip - leader",
        description: "Can rig and lead SRT trips",
    },
];

/// Finds the definition for a label in a category.
#[must_use]
pub fn skill_definition(category: SkillCategory, label: &str) -> Option<&'static SkillDefinition> {
    SKILL_DEFINITIONS
        .iter()
        .find(|d| d.category == category && d.label == label)
}

/// Returns the user's recorded level in a category.
///
/// `None` when the user has no value for the category or the value is
/// not a defined label.
#[must_use]
pub fn competency_level(user: &User, category: SkillCategory) -> Option<CompetencyLevel> {
    let label = user.skills.get(&category)?;
    let definition = skill_definition(category, label)?;
    Some(CompetencyLevel::from_label(definition.label))
}

/// Checks whether a user meets a required level in a skill category.
///
/// # Arguments
///
/// * `user` - The user whose skills are checked
/// * `category` - The skill category
/// * `required` - The minimum level
///
/// # Returns
///
/// `false` if the user has no value for the category or the value has no
/// definition; otherwise whether the label's level is at least `required`.
#[must_use]
pub fn has_caving_competency(user: &User, category: SkillCategory, required: CompetencyLevel) -> bool {
    competency_level(user, category).is_some_and(|level| level.rank() >= required.rank())
}

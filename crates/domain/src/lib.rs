// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod competency;
mod error;
mod pricing;
mod signup_window;
mod types;
mod validation;
mod variation_rules;

#[cfg(test)]
mod tests;

pub use competency::{
    CompetencyLevel, SKILL_DEFINITIONS, SkillCategory, SkillDefinition, competency_level,
    has_caving_competency, skill_definition,
};
pub use error::DomainError;
pub use pricing::{effective_member_price, parse_price};
pub use signup_window::{
    SIGNUP_EPOCH, SIGNUP_FAR_FUTURE, SignupBoundary, SignupStatus, SignupTiming,
    calculate_signup_timing, format_countdown,
};
pub use types::{
    EventType, StockStatus, Trip, User, Variation, normalize_name, parse_wall_clock,
};
pub use validation::validate_trip;
pub use variation_rules::{
    ExclusionAudience, VariationAvailability, VariationExclusionRule, default_exclusion_rules,
    default_variation, selectable_variations, variation_availability,
};

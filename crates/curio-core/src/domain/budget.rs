//! Context-window budget per section.
//!
//! Enabled artifacts are concatenated into the assistant's context, so each
//! section has a recommended character ceiling.

use serde::Serialize;

use crate::domain::value_objects::Section;

/// Recommended character ceiling, `None` for collections.
pub const fn char_limit(section: Section) -> Option<usize> {
    match section {
        Section::Instructions => Some(90_000),
        Section::Prompts => Some(45_000),
        Section::ChatModes => Some(30_000),
        Section::Collections => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    /// At or above 80% of the limit.
    Approaching,
    /// At or above the limit.
    Exceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetWarning {
    pub section: Section,
    pub level: BudgetLevel,
    pub total_chars: usize,
    pub limit: usize,
}

/// Compare a section footprint against its limit.
pub fn assess(section: Section, total_chars: usize) -> Option<BudgetWarning> {
    let limit = char_limit(section)?;
    if total_chars == 0 {
        return None;
    }

    let level = if total_chars >= limit {
        BudgetLevel::Exceeded
    } else if total_chars * 5 >= limit * 4 {
        BudgetLevel::Approaching
    } else {
        return None;
    };

    Some(BudgetWarning {
        section,
        level,
        total_chars,
        limit,
    })
}

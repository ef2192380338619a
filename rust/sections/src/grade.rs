// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Concrete grades and the bottom-to-top grade schedule
//!
//! Vertical elements (walls) take the grade of their tier directly. Beams
//! and slabs use the dependent grade, roughly 70% of the wall grade rounded
//! up to the next multiple of 5 and never below M20.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest grade a dependent element may use
pub const MIN_DEPENDENT_GRADE: u32 = 20;

/// Characteristic concrete strength class, e.g. `M40`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Grade(u32);

impl Grade {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Grade for beams and slabs framing into walls of this grade:
    /// `ceil(0.7 * g / 5) * 5`, at least M20
    pub const fn dependent(self) -> Grade {
        // integer ceil(7g / 50) in u64; the result is below u32::MAX
        let stepped = ((7 * self.0 as u64).div_ceil(50) * 5) as u32;
        if stepped < MIN_DEPENDENT_GRADE {
            Grade(MIN_DEPENDENT_GRADE)
        } else {
            Grade(stepped)
        }
    }
}

impl FromStr for Grade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('M')
            .or_else(|| trimmed.strip_prefix('m'))
            .unwrap_or(trimmed)
            .trim();
        digits
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .map(Grade)
            .ok_or_else(|| Error::InvalidGrade(s.to_string()))
    }
}

impl TryFrom<String> for Grade {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Grade> for String {
    fn from(g: Grade) -> Self {
        g.to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("M{}", self.0))
    }
}

/// One band of consecutive floors sharing a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeTier {
    pub grade: Grade,
    pub floors: u32,
}

/// Summary row of a schedule with 1-based inclusive floor numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub grade: Grade,
    pub dependent: Grade,
    pub first_floor: u32,
    pub last_floor: u32,
}

/// Bottom-to-top partition of the building's stories into grade tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeSchedule {
    tiers: Vec<GradeTier>,
    total_stories: u32,
}

impl GradeSchedule {
    /// Build a schedule whose spans must add up to `total_stories`
    pub fn new(tiers: Vec<GradeTier>, total_stories: u32) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::EmptySchedule);
        }
        let covered = tiers
            .iter()
            .try_fold(0u32, |acc, t| acc.checked_add(t.floors));
        match covered {
            Some(covered) if covered == total_stories => {}
            // a sum past u32::MAX is reported saturated
            other => {
                return Err(Error::FloorCountMismatch {
                    expected: total_stories,
                    actual: other.unwrap_or(u32::MAX),
                })
            }
        }
        Ok(Self {
            tiers,
            total_stories,
        })
    }

    /// Build from parallel grade-label and floor-span lists
    pub fn from_columns<S: AsRef<str>>(
        grades: &[S],
        spans: &[u32],
        total_stories: u32,
    ) -> Result<Self> {
        if grades.len() != spans.len() {
            return Err(Error::ScheduleShapeMismatch {
                grades: grades.len(),
                spans: spans.len(),
            });
        }
        let tiers = grades
            .iter()
            .zip(spans)
            .map(|(g, &floors)| {
                Ok(GradeTier {
                    grade: g.as_ref().parse()?,
                    floors,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(tiers, total_stories)
    }

    pub fn tiers(&self) -> &[GradeTier] {
        &self.tiers
    }

    pub fn total_stories(&self) -> u32 {
        self.total_stories
    }

    /// Index of the tier holding 0-based `story`; past the top maps to the last tier
    pub fn tier_index(&self, story: u32) -> usize {
        let mut ceiling = 0;
        for (i, tier) in self.tiers.iter().enumerate() {
            ceiling += tier.floors;
            if story < ceiling {
                return i;
            }
        }
        tracing::warn!(
            story,
            total = self.total_stories,
            "Story index beyond grade schedule; using top tier"
        );
        self.tiers.len() - 1
    }

    /// Grade for walls on 0-based `story`
    pub fn wall_grade(&self, story: u32) -> Grade {
        self.tiers[self.tier_index(story)].grade
    }

    /// Grade for beams and slabs on 0-based `story`
    pub fn dependent_grade(&self, story: u32) -> Grade {
        self.wall_grade(story).dependent()
    }

    /// Tier table with 1-based floor ranges
    pub fn summary(&self) -> Vec<TierSummary> {
        let mut first = 1;
        let mut rows = Vec::with_capacity(self.tiers.len());
        for tier in &self.tiers {
            let last = first + tier.floors.saturating_sub(1);
            rows.push(TierSummary {
                grade: tier.grade,
                dependent: tier.grade.dependent(),
                first_floor: first,
                last_floor: last,
            });
            first += tier.floors;
        }
        rows
    }
}

impl fmt::Display for GradeSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Concrete grade schedule ({} floors)", self.total_stories)?;
        for row in self.summary() {
            writeln!(
                f,
                "  floors {:>3}-{:<3} walls {:<4} beams/slabs {}",
                row.first_floor, row.last_floor, row.grade, row.dependent
            )?;
        }
        Ok(())
    }
}

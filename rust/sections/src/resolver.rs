// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nearest-section lookup
//!
//! A required width and depth are matched against the catalog with the score
//! `2 * |depth - d| + |width - w|`, so depth mismatches cost twice as much as
//! width mismatches. A preferred grade narrows the candidates; when nothing
//! in that grade exists the search is repeated once over every grade.

use crate::catalog::{Catalog, SectionSpec};
use crate::error::{Error, Result};
use crate::grade::Grade;

/// Weight of a depth mismatch relative to a width mismatch
pub const DEPTH_WEIGHT: u64 = 2;

/// Best catalog entry for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMatch<'a> {
    pub section: &'a SectionSpec,
    pub score: u64,
}

impl SectionMatch<'_> {
    pub fn name(&self) -> &str {
        &self.section.name
    }

    pub fn is_exact(&self) -> bool {
        self.score == 0
    }
}

/// Score of `section` against a requested width and depth (millimetres).
///
/// Computed in `u64`, which holds the worst case of two full `u32` ranges.
#[inline]
pub fn match_score(section: &SectionSpec, width: u32, depth: u32) -> u64 {
    DEPTH_WEIGHT * u64::from(section.depth.abs_diff(depth))
        + u64::from(section.width.abs_diff(width))
}

/// Resolves required dimensions to catalog sections
#[derive(Debug, Clone, Copy)]
pub struct SectionResolver<'a> {
    catalog: &'a Catalog,
    role: Option<char>,
}

impl<'a> SectionResolver<'a> {
    /// Resolver over every section in the catalog
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            role: None,
        }
    }

    /// Resolver restricted to one role letter
    pub fn for_role(catalog: &'a Catalog, role: char) -> Self {
        Self {
            catalog,
            role: Some(role.to_ascii_uppercase()),
        }
    }

    fn candidates(&self) -> impl Iterator<Item = &'a SectionSpec> + '_ {
        self.catalog
            .iter()
            .filter(move |s| self.role.map_or(true, |r| s.role == r))
    }

    fn best(&self, width: u32, depth: u32, grade: Option<Grade>) -> Option<SectionMatch<'a>> {
        let mut best: Option<SectionMatch<'a>> = None;
        for section in self.candidates() {
            if grade.is_some() && section.grade != grade {
                continue;
            }
            let score = match_score(section, width, depth);
            // strict comparison keeps the earliest entry on ties
            if best.map_or(true, |b| score < b.score) {
                best = Some(SectionMatch { section, score });
            }
        }
        best
    }

    /// Find the closest section to `width` x `depth` millimetres
    pub fn resolve(
        &self,
        width: u32,
        depth: u32,
        preferred_grade: Option<Grade>,
    ) -> Result<SectionMatch<'a>> {
        if let Some(grade) = preferred_grade {
            if let Some(found) = self.best(width, depth, Some(grade)) {
                return Ok(found);
            }
            tracing::debug!(
                width,
                depth,
                grade = %grade,
                "No section in preferred grade; searching all grades"
            );
        }

        self.best(width, depth, None).ok_or_else(|| {
            let mut available_widths: Vec<u32> = self.candidates().map(|s| s.width).collect();
            available_widths.sort_unstable();
            available_widths.dedup();
            Error::NoMatch {
                width,
                depth,
                grade: preferred_grade,
                available_widths,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::load(["B20X75M35", "B30X75M40"]).unwrap()
    }

    #[test]
    fn test_weighted_nearest() {
        let catalog = catalog();
        let resolver = SectionResolver::new(&catalog);
        let m = resolver.resolve(240, 750, None).unwrap();
        assert_eq!(m.name(), "B20X75M35");
        assert_eq!(m.score, 40);
    }

    #[test]
    fn test_preferred_grade_filters() {
        let catalog = catalog();
        let resolver = SectionResolver::new(&catalog);
        let m = resolver.resolve(240, 750, Some(Grade::new(40))).unwrap();
        assert_eq!(m.name(), "B30X75M40");
        assert_eq!(m.score, 60);
    }

    #[test]
    fn test_missing_grade_relaxes() {
        let catalog = catalog();
        let resolver = SectionResolver::new(&catalog);
        let m = resolver.resolve(240, 750, Some(Grade::new(25))).unwrap();
        assert_eq!(m.name(), "B20X75M35");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::load(["B20X60M30", "B30X60M30"]).unwrap();
        let m = SectionResolver::new(&catalog).resolve(250, 600, None).unwrap();
        assert_eq!(m.name(), "B20X60M30");
        assert_eq!(m.score, 50);

        let reversed = Catalog::load(["B30X60M30", "B20X60M30"]).unwrap();
        let m = SectionResolver::new(&reversed).resolve(250, 600, None).unwrap();
        assert_eq!(m.name(), "B30X60M30");
    }

    #[test]
    fn test_depth_weighs_double() {
        // 50 mm off in depth (score 100) loses to 90 mm off in width (score 90)
        let catalog = Catalog::load(["B23X55M30", "B32X60M30"]).unwrap();
        let m = SectionResolver::new(&catalog).resolve(230, 600, None).unwrap();
        assert_eq!(m.name(), "B32X60M30");
        assert_eq!(m.score, 90);
    }

    #[test]
    fn test_exact_match_every_entry() {
        let catalog = Catalog::load(["B20X45M30", "B23X60M35", "B30X75M40", "B40X90M45"]).unwrap();
        let resolver = SectionResolver::new(&catalog);
        for spec in &catalog {
            let m = resolver.resolve(spec.width, spec.depth, spec.grade).unwrap();
            assert_eq!(m.name(), spec.name);
            assert!(m.is_exact());
        }
    }

    #[test]
    fn test_oversized_entry_scores_without_overflow() {
        // 4 000 000 000 mm still fits a u32 and loads
        let catalog = Catalog::load(["B20X400000000M30", "B20X60M30"]).unwrap();
        assert_eq!(catalog.len(), 2);
        let beams = SectionResolver::for_role(&catalog, 'B');
        let m = beams.resolve(200, 600, None).unwrap();
        assert_eq!(m.name(), "B20X60M30");
        assert!(m.is_exact());

        let far = catalog.get("B20X400000000M30").unwrap();
        assert_eq!(match_score(far, 200, 600), 2 * (4_000_000_000 - 600));
        assert_eq!(
            match_score(far, u32::MAX, 0),
            2 * 4_000_000_000 + u64::from(u32::MAX - 200)
        );
    }

    #[test]
    fn test_role_filter_and_no_match() {
        let catalog = Catalog::load(["C60X60M40", "B20X45M30"]).unwrap();
        let beams = SectionResolver::for_role(&catalog, 'b');
        assert_eq!(beams.resolve(600, 600, None).unwrap().name(), "B20X45M30");

        let walls = SectionResolver::for_role(&catalog, 'W');
        assert_eq!(
            walls.resolve(200, 3000, Some(Grade::new(40))),
            Err(Error::NoMatch {
                width: 200,
                depth: 3000,
                grade: Some(Grade::new(40)),
                available_widths: vec![],
            })
        );
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section catalog
//!
//! Frame sections defined in the host model are named
//! `<Role><Width>X<Depth>M<Grade>`, e.g. `B23X60M40` for a 230 x 600 mm
//! beam in M40 concrete. Width and depth are written in centimetres and may
//! carry a decimal fraction; anything after the grade is ignored.

use crate::error::{Error, Result};
use crate::grade::Grade;
use nom::{
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, satisfy},
    combinator::{map_res, opt, recognize},
    sequence::{preceded, tuple},
    IResult,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// A named cross-section with nominal dimensions in millimetres
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    pub name: String,
    /// Upper-cased role letter (`B` for beams)
    pub role: char,
    pub width: u32,
    pub depth: u32,
    pub grade: Option<Grade>,
}

/// Centimetre dimension, optionally fractional
fn dimension(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((digit1, opt(tuple((char('.'), digit1)))))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn grade_number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

fn section_name(input: &str) -> IResult<&str, (char, f64, f64, u32)> {
    tuple((
        satisfy(|c| c.is_ascii_alphabetic()),
        dimension,
        preceded(tag_no_case("x"), dimension),
        preceded(tag_no_case("m"), grade_number),
    ))(input)
}

/// Millimetres from centimetres; `None` when the result does not fit a `u32`
#[inline]
fn cm_to_mm(cm: f64) -> Option<u32> {
    let mm = (cm * 10.0).round();
    (mm.is_finite() && mm <= f64::from(u32::MAX)).then_some(mm as u32)
}

/// Parse a section name; `None` when it does not follow the naming pattern
/// or a dimension is out of range
pub fn parse_section_name(name: &str) -> Option<SectionSpec> {
    let (_rest, (role, width, depth, grade)) = section_name(name).ok()?;
    Some(SectionSpec {
        name: name.to_string(),
        role: role.to_ascii_uppercase(),
        width: cm_to_mm(width)?,
        depth: cm_to_mm(depth)?,
        grade: (grade > 0).then_some(Grade::new(grade)),
    })
}

/// Read-only index of the sections available in the host model.
///
/// Iteration follows first-insertion order, which is also the resolver's
/// tie-break order. Names that do not follow the frame pattern (area
/// sections such as `WALL200M40`) are not resolvable but are remembered so
/// callers can check that a section exists in the host.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sections: Vec<SectionSpec>,
    index: FxHashMap<String, usize>,
    defined: FxHashSet<String>,
}

impl Catalog {
    /// Build the catalog from the host's section names.
    ///
    /// Names that do not parse are ignored. A repeated name replaces the
    /// earlier entry in place. An empty result is a configuration error.
    pub fn load<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Catalog::default();
        let mut scanned = 0usize;

        for name in names {
            scanned += 1;
            let name = name.as_ref();
            catalog.defined.insert(name.to_string());
            match parse_section_name(name) {
                Some(spec) => catalog.insert(spec),
                None => tracing::debug!(name, "Ignoring section with unrecognised name"),
            }
        }

        if catalog.sections.is_empty() {
            return Err(Error::CatalogEmpty { scanned });
        }

        tracing::info!(
            sections = catalog.sections.len(),
            scanned,
            "Loaded section catalog"
        );
        Ok(catalog)
    }

    fn insert(&mut self, spec: SectionSpec) {
        match self.index.get(&spec.name) {
            Some(&i) => self.sections[i] = spec,
            None => {
                self.index.insert(spec.name.clone(), self.sections.len());
                self.sections.push(spec);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SectionSpec> {
        self.index.get(name).map(|&i| &self.sections[i])
    }

    /// Whether `name` is a resolvable frame section
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether the host defines a section called `name`, parsed or not
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionSpec> {
        self.sections.iter()
    }

    /// Sections of one role, in catalog order
    pub fn with_role(&self, role: char) -> impl Iterator<Item = &SectionSpec> + '_ {
        let role = role.to_ascii_uppercase();
        self.sections.iter().filter(move |s| s.role == role)
    }

    /// Distinct widths in ascending order
    pub fn available_widths(&self) -> Vec<u32> {
        let mut widths: Vec<u32> = self.sections.iter().map(|s| s.width).collect();
        widths.sort_unstable();
        widths.dedup();
        widths
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SectionSpec;
    type IntoIter = std::slice::Iter<'a, SectionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

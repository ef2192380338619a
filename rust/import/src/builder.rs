// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element builder
//!
//! Turns one CAD entity into resolved structural elements and hands them to
//! the model sink:
//!
//! - walls: one area per segment, extruded from the story base to its top
//! - beams: one frame per segment at the story top, sized from the catalog
//! - slabs: one area per sanitized boundary at the story top
//!
//! Each entity is processed completely before the next one.

use crate::config::{AreaSectionNaming, BeamDepths, ImportConfig, SlabThicknesses};
use crate::entity::{CadEntity, EntityGeometry};
use crate::sink::{ElementRef, ModelSink, SinkCode};
use crate::story::Story;
use planform_geometry::{
    polyline_pairs, sanitize, tessellate_boundary, LengthUnit, Point2D, Polygon, SanitizeConfig,
    Segment, Skip, MIN_SEGMENT_LENGTH_M,
};
use planform_sections::{
    beam_width, cantilever_slab_thickness, explicit_slab_thickness, is_short_wall,
    slab_thickness_for_area, wall_thickness, BeamRole, Catalog, ElementKind, GradeSchedule,
    SectionResolver, SeismicZone, SlabKind, WallType,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Role letter of beam sections in the catalog
pub const BEAM_ROLE: char = 'B';

/// Structural class of a layer, derived once from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerClass {
    Wall(WallType),
    Beam(BeamRole),
    Slab {
        kind: SlabKind,
        /// Thickness spelled out in the layer name
        explicit: Option<u32>,
    },
}

impl LayerClass {
    pub fn classify(layer: &str, kind: ElementKind) -> Option<LayerClass> {
        match kind {
            ElementKind::Wall => Some(LayerClass::Wall(WallType::from_layer_name(layer))),
            ElementKind::Beam => Some(LayerClass::Beam(BeamRole::from_layer_name(layer))),
            ElementKind::Slab => Some(LayerClass::Slab {
                kind: SlabKind::from_layer_name(layer),
                explicit: explicit_slab_thickness(layer),
            }),
            ElementKind::Ignore => None,
        }
    }

    pub fn element_kind(&self) -> ElementKind {
        match self {
            LayerClass::Wall(_) => ElementKind::Wall,
            LayerClass::Beam(_) => ElementKind::Beam,
            LayerClass::Slab { .. } => ElementKind::Slab,
        }
    }
}

/// Rule inputs shared by every element of a run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSettings {
    pub zone: SeismicZone,
    /// Floor count fed to the sizing tables
    pub floors: u32,
    pub unit: LengthUnit,
    pub sanitize: SanitizeConfig,
    pub beam_depths: BeamDepths,
    pub slab_thicknesses: SlabThicknesses,
    pub naming: AreaSectionNaming,
    pub floating_columns: bool,
}

impl BuildSettings {
    pub fn from_config(config: &ImportConfig) -> Self {
        Self {
            zone: config.seismic_zone,
            floors: config.sizing_floors(),
            unit: config.units,
            sanitize: config.sanitize_config(),
            beam_depths: config.beam_depths,
            slab_thicknesses: config.slab_thicknesses,
            naming: config.section_naming.clone(),
            floating_columns: config.floating_columns,
        }
    }

    fn min_segment_length(&self) -> f64 {
        self.unit.from_meters(MIN_SEGMENT_LENGTH_M)
    }
}

/// Geometry of a resolved element. Plan coordinates are in drawing units,
/// elevations in metres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ElementShape {
    Wall { segment: Segment, base: f64, top: f64 },
    Frame { segment: Segment, elevation: f64 },
    Slab { polygon: Polygon, elevation: f64 },
}

/// An element ready to be created in the host model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedElement {
    pub shape: ElementShape,
    pub section: String,
    /// Story name, used as the host group
    pub story: String,
}

impl ResolvedElement {
    pub fn kind(&self) -> ElementKind {
        match self.shape {
            ElementShape::Wall { .. } => ElementKind::Wall,
            ElementShape::Frame { .. } => ElementKind::Beam,
            ElementShape::Slab { .. } => ElementKind::Slab,
        }
    }

    /// Create the element in `sink` and add it to its story group
    pub fn emit<S: ModelSink>(&self, sink: &mut S, unit: LengthUnit) -> Result<(), SinkCode> {
        let k = unit.to_meters();
        let mut point = |p: Point2D, z: f64| sink.create_point(p.x * k, p.y * k, z);

        match &self.shape {
            ElementShape::Wall { segment, base, top } => {
                let corners = [
                    point(segment.start, *base)?,
                    point(segment.end, *base)?,
                    point(segment.end, *top)?,
                    point(segment.start, *top)?,
                ];
                let id = sink.create_area(&corners, &self.section)?;
                self.assign(sink, ElementRef::Area(&id));
            }
            ElementShape::Frame { segment, elevation } => {
                let start = point(segment.start, *elevation)?;
                let end = point(segment.end, *elevation)?;
                let id = sink.create_frame(&start, &end, &self.section)?;
                self.assign(sink, ElementRef::Frame(&id));
            }
            ElementShape::Slab { polygon, elevation } => {
                let corners = polygon
                    .vertices()
                    .iter()
                    .map(|&p| point(p, *elevation))
                    .collect::<Result<Vec<_>, _>>()?;
                let id = sink.create_area(&corners, &self.section)?;
                self.assign(sink, ElementRef::Area(&id));
            }
        }
        Ok(())
    }

    fn assign<S: ModelSink>(&self, sink: &mut S, element: ElementRef<'_>) {
        if let Err(code) = sink.assign_to_group(element, &self.story) {
            tracing::warn!(story = %self.story, code = code.0, "Group assignment failed");
        }
    }
}

/// Why an entity (or one segment of it) did not become an element
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElementError {
    #[error("skipped: {0}")]
    Skipped(#[from] Skip),

    #[error("{kind} layers do not accept {geometry} entities")]
    Unsupported {
        kind: ElementKind,
        geometry: &'static str,
    },

    #[error(transparent)]
    Section(#[from] planform_sections::Error),

    #[error(transparent)]
    Sink(#[from] SinkCode),
}

impl ElementError {
    /// Skips are expected for messy drawings and are not failures
    pub fn is_skip(&self) -> bool {
        matches!(self, ElementError::Skipped(_) | ElementError::Unsupported { .. })
    }
}

/// Result of one attempted element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementOutcome {
    Created { section: String },
    Skipped(ElementError),
    Failed(ElementError),
}

/// Running counts for an import pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Created elements per section name
    pub sections_used: BTreeMap<String, usize>,
}

impl ImportStats {
    pub fn record(&mut self, outcome: &ElementOutcome) {
        match outcome {
            ElementOutcome::Created { section } => {
                self.created += 1;
                *self.sections_used.entry(section.clone()).or_insert(0) += 1;
            }
            ElementOutcome::Skipped(_) => self.skipped += 1,
            ElementOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn merge(&mut self, other: &ImportStats) {
        self.created += other.created;
        self.failed += other.failed;
        self.skipped += other.skipped;
        for (section, n) in &other.sections_used {
            *self.sections_used.entry(section.clone()).or_insert(0) += n;
        }
    }

    pub fn attempted(&self) -> usize {
        self.created + self.failed + self.skipped
    }
}

/// Resolves entities against the sizing rules and catalog
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    catalog: Arc<Catalog>,
    schedule: Arc<GradeSchedule>,
    settings: BuildSettings,
    stats: ImportStats,
}

impl ElementBuilder {
    pub fn new(catalog: Arc<Catalog>, schedule: Arc<GradeSchedule>, settings: BuildSettings) -> Self {
        Self {
            catalog,
            schedule,
            settings,
            stats: ImportStats::default(),
        }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// Start a new pass with zeroed statistics
    pub fn begin_pass(&mut self) {
        self.stats = ImportStats::default();
    }

    /// Resolve an entity without touching a sink.
    ///
    /// Line work yields one result per segment, slab boundaries one per loop.
    pub fn resolve(
        &self,
        entity: &CadEntity,
        class: LayerClass,
        story: &Story,
    ) -> Vec<Result<ResolvedElement, ElementError>> {
        match class {
            LayerClass::Wall(wall_type) => self
                .segments(entity, ElementKind::Wall)
                .into_iter()
                .map(|seg| self.wall(seg?, wall_type, story))
                .collect(),
            LayerClass::Beam(role) => self
                .segments(entity, ElementKind::Beam)
                .into_iter()
                .map(|seg| self.beam(seg?, role, story))
                .collect(),
            LayerClass::Slab { kind, explicit } => self
                .polygons(entity)
                .into_iter()
                .map(|poly| self.slab(poly?, kind, explicit, story))
                .collect(),
        }
    }

    /// Resolve an entity, emit it and record the outcomes
    pub fn import_entity<S: ModelSink>(
        &mut self,
        entity: &CadEntity,
        class: LayerClass,
        story: &Story,
        sink: &mut S,
    ) -> Vec<ElementOutcome> {
        let outcomes: Vec<ElementOutcome> = self
            .resolve(entity, class, story)
            .into_iter()
            .map(|resolved| match resolved {
                Ok(element) => match element.emit(sink, self.settings.unit) {
                    Ok(()) => {
                        tracing::debug!(
                            layer = %entity.layer,
                            story = %story.name,
                            section = %element.section,
                            kind = %element.kind(),
                            "Created element"
                        );
                        ElementOutcome::Created {
                            section: element.section,
                        }
                    }
                    Err(code) => {
                        tracing::warn!(
                            layer = %entity.layer,
                            story = %story.name,
                            section = %element.section,
                            code = code.0,
                            "Model sink rejected element"
                        );
                        ElementOutcome::Failed(code.into())
                    }
                },
                Err(e) if e.is_skip() => {
                    tracing::debug!(
                        layer = %entity.layer,
                        story = %story.name,
                        reason = %e,
                        "Skipped geometry"
                    );
                    ElementOutcome::Skipped(e)
                }
                Err(e) => {
                    tracing::warn!(
                        layer = %entity.layer,
                        story = %story.name,
                        error = %e,
                        "Element failed"
                    );
                    ElementOutcome::Failed(e)
                }
            })
            .collect();

        for outcome in &outcomes {
            self.stats.record(outcome);
        }
        outcomes
    }

    /// Whether the host model defines the section `name`
    pub fn defines_section(&self, name: &str) -> bool {
        self.catalog.is_defined(name)
    }

    /// Area sections are named by convention; note when the host lacks one
    fn area_section(&self, name: String) -> String {
        if !self.defines_section(&name) {
            tracing::debug!(section = %name, "Area section not defined in host catalog");
        }
        name
    }

    fn segments(
        &self,
        entity: &CadEntity,
        kind: ElementKind,
    ) -> Vec<Result<Segment, ElementError>> {
        let min = self.settings.min_segment_length();
        match &entity.geometry {
            EntityGeometry::Line { start, end } => {
                vec![Segment::new(*start, *end, min).map_err(ElementError::from)]
            }
            EntityGeometry::Polyline {
                vertices,
                is_closed,
            } => polyline_pairs(vertices, *is_closed)
                .map(|(a, b)| Segment::new(a, b, min).map_err(ElementError::from))
                .collect(),
            EntityGeometry::Hatch { .. } => vec![Err(ElementError::Unsupported {
                kind,
                geometry: entity.geometry.type_name(),
            })],
        }
    }

    fn polygons(&self, entity: &CadEntity) -> Vec<Result<Polygon, ElementError>> {
        let config = &self.settings.sanitize;
        match &entity.geometry {
            EntityGeometry::Polyline {
                vertices,
                is_closed,
            } => {
                let mut ring = vertices.clone();
                // a flagged-closed polyline is closed regardless of the gap
                if *is_closed {
                    if let Some(&first) = vertices.first() {
                        ring.push(first);
                    }
                }
                vec![sanitize(&ring, config).map_err(ElementError::from)]
            }
            EntityGeometry::Hatch { boundaries } => boundaries
                .iter()
                .map(|edges| sanitize(&tessellate_boundary(edges), config).map_err(ElementError::from))
                .collect(),
            EntityGeometry::Line { .. } => vec![Err(ElementError::Unsupported {
                kind: ElementKind::Slab,
                geometry: entity.geometry.type_name(),
            })],
        }
    }

    fn wall(
        &self,
        segment: Segment,
        wall_type: WallType,
        story: &Story,
    ) -> Result<ResolvedElement, ElementError> {
        let s = &self.settings;
        let length_m = segment.length() * s.unit.to_meters();
        let thickness = wall_thickness(
            wall_type,
            s.zone,
            s.floors,
            is_short_wall(length_m),
            s.floating_columns,
        )?;
        let grade = self.schedule.wall_grade(story.index);
        Ok(ResolvedElement {
            shape: ElementShape::Wall {
                segment,
                base: story.elevation,
                top: story.top_elevation(),
            },
            section: self.area_section(s.naming.wall(thickness, grade)),
            story: story.name.clone(),
        })
    }

    fn beam(
        &self,
        segment: Segment,
        role: BeamRole,
        story: &Story,
    ) -> Result<ResolvedElement, ElementError> {
        let s = &self.settings;
        let width = beam_width(role, s.zone, s.floors)?;
        let depth = s.beam_depths.depth(role);
        let grade = self.schedule.dependent_grade(story.index);
        let found = SectionResolver::for_role(&self.catalog, BEAM_ROLE).resolve(width, depth, Some(grade))?;
        if !found.is_exact() {
            tracing::debug!(
                role = role.label(),
                width,
                depth,
                section = found.name(),
                score = found.score,
                "Using nearest beam section"
            );
        }
        Ok(ResolvedElement {
            shape: ElementShape::Frame {
                segment,
                elevation: story.top_elevation(),
            },
            section: found.name().to_string(),
            story: story.name.clone(),
        })
    }

    fn slab(
        &self,
        polygon: Polygon,
        kind: SlabKind,
        explicit: Option<u32>,
        story: &Story,
    ) -> Result<ResolvedElement, ElementError> {
        let s = &self.settings;
        let thickness = explicit.unwrap_or_else(|| match kind {
            SlabKind::Lobby => s.slab_thicknesses.lobby,
            SlabKind::Stair => s.slab_thicknesses.stair,
            SlabKind::Cantilever => {
                cantilever_slab_thickness(polygon.min_extent() * s.unit.to_meters())
            }
            SlabKind::Regular => slab_thickness_for_area(polygon.area_m2(s.unit)),
        });
        let grade = self.schedule.dependent_grade(story.index);
        Ok(ResolvedElement {
            section: self.area_section(s.naming.slab(thickness, grade)),
            shape: ElementShape::Slab {
                polygon,
                elevation: story.top_elevation(),
            },
            story: story.name.clone(),
        })
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import run
//!
//! Validates the whole configuration up front, then walks the stories
//! bottom-to-top and feeds every mapped entity of the story's floor plan
//! through the [`ElementBuilder`].

use crate::builder::{BuildSettings, ElementBuilder, ElementOutcome, ImportStats, LayerClass};
use crate::config::ImportConfig;
use crate::entity::{layers, CadEntity};
use crate::error::{Error, Result};
use crate::sink::ModelSink;
use crate::story::{stack_stories, Story};
use planform_sections::{Catalog, GradeSchedule};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Counts for one story
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryReport {
    pub story: String,
    pub stats: ImportStats,
}

/// An element that could not be created
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    pub story: String,
    pub layer: String,
    pub reason: String,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub stories: Vec<StoryReport>,
    pub totals: ImportStats,
    pub failures: Vec<FailureRecord>,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Imported {} elements ({} failed, {} skipped)",
            self.totals.created, self.totals.failed, self.totals.skipped
        )?;
        for story in &self.stories {
            writeln!(
                f,
                "  {:<12} created {:>4}  failed {:>3}  skipped {:>3}",
                story.story, story.stats.created, story.stats.failed, story.stats.skipped
            )?;
        }
        if !self.totals.sections_used.is_empty() {
            writeln!(f, "Sections used:")?;
            for (section, count) in &self.totals.sections_used {
                writeln!(f, "  {section:<16} {count:>5}")?;
            }
        }
        Ok(())
    }
}

/// A validated import, ready to run against drawings
#[derive(Debug)]
pub struct Importer {
    config: ImportConfig,
    catalog: Arc<Catalog>,
    schedule: Arc<GradeSchedule>,
    stories: Vec<Story>,
}

impl Importer {
    /// Validate the configuration; nothing is created if this fails
    pub fn new(config: ImportConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let schedule = config.validate()?;
        let stories = stack_stories(&config.floor_types);
        tracing::info!(
            zone = %config.seismic_zone,
            stories = stories.len(),
            sizing_floors = config.sizing_floors(),
            sections = catalog.len(),
            "Import configured"
        );
        Ok(Self {
            config,
            catalog,
            schedule: Arc::new(schedule),
            stories,
        })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn schedule(&self) -> &GradeSchedule {
        &self.schedule
    }

    /// Run the import; `drawings[i]` is the plan of floor type `i`
    pub fn run<S: ModelSink>(&self, drawings: &[Vec<CadEntity>], sink: &mut S) -> Result<ImportReport> {
        if drawings.len() != self.config.floor_types.len() {
            return Err(Error::Config(format!(
                "{} drawings supplied for {} floor types",
                drawings.len(),
                self.config.floor_types.len()
            )));
        }

        let mut builder = ElementBuilder::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.schedule),
            BuildSettings::from_config(&self.config),
        );
        builder.begin_pass();

        let layer_classes: Vec<FxHashMap<&str, LayerClass>> = self
            .config
            .floor_types
            .iter()
            .zip(drawings)
            .map(|(ft, drawing)| {
                layers(drawing)
                    .into_iter()
                    .filter_map(|layer| {
                        let class = ft
                            .layer_kind(layer)
                            .and_then(|kind| LayerClass::classify(layer, kind));
                        tracing::debug!(floor_type = %ft.name, layer, ?class, "Layer mapped");
                        class.map(|c| (layer, c))
                    })
                    .collect()
            })
            .collect();

        let mut report = ImportReport::default();
        for story in &self.stories {
            let drawing = &drawings[story.floor_type];
            let classes = &layer_classes[story.floor_type];
            let mut stats = ImportStats::default();

            for entity in drawing {
                let Some(&class) = classes.get(entity.layer.as_str()) else {
                    continue;
                };
                for outcome in builder.import_entity(entity, class, story, sink) {
                    stats.record(&outcome);
                    if let ElementOutcome::Failed(e) = outcome {
                        report.failures.push(FailureRecord {
                            story: story.name.clone(),
                            layer: entity.layer.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }

            tracing::info!(
                story = %story.name,
                elevation = story.elevation,
                created = stats.created,
                failed = stats.failed,
                skipped = stats.skipped,
                "Story imported"
            );
            report.stories.push(StoryReport {
                story: story.name.clone(),
                stats,
            });
        }

        report.totals = builder.stats().clone();
        tracing::info!(
            created = report.totals.created,
            failed = report.totals.failed,
            skipped = report.totals.skipped,
            "Import finished"
        );
        Ok(report)
    }
}

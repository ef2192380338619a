// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planform Import
//!
//! Builds structural walls, beams and slabs from CAD floor plans and sends
//! them to a structural model through the [`ModelSink`] trait.
//!
//! ```no_run
//! use planform_import::{Importer, ImportConfig, RecordingSink};
//! use planform_sections::Catalog;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ImportConfig::from_path("tower.json".as_ref())?;
//! let catalog = Arc::new(Catalog::load(["B23X60M35", "B30X60M40"])?);
//! let drawings = config
//!     .floor_types
//!     .iter()
//!     .map(|ft| planform_import::load_drawing(ft.drawing.as_deref().unwrap()))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let importer = Importer::new(config, catalog)?;
//! let mut sink = RecordingSink::new();
//! let report = importer.run(&drawings, &mut sink)?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod entity;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod story;

pub use builder::{
    BuildSettings, ElementBuilder, ElementError, ElementOutcome, ElementShape, ImportStats,
    LayerClass, ResolvedElement,
};
pub use config::{AreaSectionNaming, BeamDepths, FloorType, ImportConfig, SlabThicknesses};
pub use entity::{load_drawing, CadEntity, EntityGeometry};
pub use error::{Error, Result};
pub use pipeline::{FailureRecord, ImportReport, Importer, StoryReport};
pub use sink::{
    AreaId, ElementRef, FrameId, ModelSink, PointId, RecordingSink, ReversedWindingRetry, SinkCode,
};
pub use story::{stack_stories, story_names, Story};

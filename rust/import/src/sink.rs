// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model sink interface
//!
//! The structural analysis application is reached only through
//! [`ModelSink`]. Coordinates handed to the sink are in metres. A non-zero
//! return code is a soft failure for that element; the import keeps going.

use serde::Serialize;
use std::fmt;

/// Non-success return code from the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("model sink returned code {0}")]
pub struct SinkCode(pub i32);

macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

object_id!(
    /// Host name of a joint
    PointId
);
object_id!(
    /// Host name of an area object (wall or slab)
    AreaId
);
object_id!(
    /// Host name of a frame object (beam)
    FrameId
);

/// An element created in the host, for group assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef<'a> {
    Area(&'a AreaId),
    Frame(&'a FrameId),
}

/// Receives the resolved elements
pub trait ModelSink {
    fn create_point(&mut self, x: f64, y: f64, z: f64) -> Result<PointId, SinkCode>;

    fn create_area(&mut self, points: &[PointId], section: &str) -> Result<AreaId, SinkCode>;

    fn create_frame(
        &mut self,
        start: &PointId,
        end: &PointId,
        section: &str,
    ) -> Result<FrameId, SinkCode>;

    fn assign_to_group(&mut self, element: ElementRef<'_>, group: &str) -> Result<(), SinkCode>;
}

impl<S: ModelSink + ?Sized> ModelSink for &mut S {
    fn create_point(&mut self, x: f64, y: f64, z: f64) -> Result<PointId, SinkCode> {
        (**self).create_point(x, y, z)
    }

    fn create_area(&mut self, points: &[PointId], section: &str) -> Result<AreaId, SinkCode> {
        (**self).create_area(points, section)
    }

    fn create_frame(
        &mut self,
        start: &PointId,
        end: &PointId,
        section: &str,
    ) -> Result<FrameId, SinkCode> {
        (**self).create_frame(start, end, section)
    }

    fn assign_to_group(&mut self, element: ElementRef<'_>, group: &str) -> Result<(), SinkCode> {
        (**self).assign_to_group(element, group)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedPoint {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedArea {
    pub id: AreaId,
    pub points: Vec<PointId>,
    pub section: String,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedFrame {
    pub id: FrameId,
    pub start: PointId,
    pub end: PointId,
    pub section: String,
    pub groups: Vec<String>,
}

/// In-memory sink that records every call, serializable as a model dump
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingSink {
    pub points: Vec<RecordedPoint>,
    pub areas: Vec<RecordedArea>,
    pub frames: Vec<RecordedFrame>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(&self, id: &PointId) -> Option<&RecordedPoint> {
        self.points.iter().find(|p| &p.id == id)
    }

    /// Areas and frames per group name
    pub fn group_sizes(&self) -> std::collections::BTreeMap<&str, usize> {
        let mut sizes = std::collections::BTreeMap::new();
        let groups = self
            .areas
            .iter()
            .flat_map(|a| &a.groups)
            .chain(self.frames.iter().flat_map(|f| &f.groups));
        for g in groups {
            *sizes.entry(g.as_str()).or_insert(0) += 1;
        }
        sizes
    }
}

impl ModelSink for RecordingSink {
    fn create_point(&mut self, x: f64, y: f64, z: f64) -> Result<PointId, SinkCode> {
        let id = PointId(format!("P{}", self.points.len() + 1));
        self.points.push(RecordedPoint {
            id: id.clone(),
            x,
            y,
            z,
        });
        Ok(id)
    }

    fn create_area(&mut self, points: &[PointId], section: &str) -> Result<AreaId, SinkCode> {
        if points.len() < 3 {
            return Err(SinkCode(1));
        }
        let id = AreaId(format!("A{}", self.areas.len() + 1));
        self.areas.push(RecordedArea {
            id: id.clone(),
            points: points.to_vec(),
            section: section.to_string(),
            groups: Vec::new(),
        });
        Ok(id)
    }

    fn create_frame(
        &mut self,
        start: &PointId,
        end: &PointId,
        section: &str,
    ) -> Result<FrameId, SinkCode> {
        if start == end {
            return Err(SinkCode(1));
        }
        let id = FrameId(format!("F{}", self.frames.len() + 1));
        self.frames.push(RecordedFrame {
            id: id.clone(),
            start: start.clone(),
            end: end.clone(),
            section: section.to_string(),
            groups: Vec::new(),
        });
        Ok(id)
    }

    fn assign_to_group(&mut self, element: ElementRef<'_>, group: &str) -> Result<(), SinkCode> {
        let groups = match element {
            ElementRef::Area(id) => self.areas.iter_mut().find(|a| &a.id == id).map(|a| &mut a.groups),
            ElementRef::Frame(id) => self
                .frames
                .iter_mut()
                .find(|f| &f.id == id)
                .map(|f| &mut f.groups),
        };
        let groups = groups.ok_or(SinkCode(2))?;
        groups.push(group.to_string());
        Ok(())
    }
}

/// Sink adapter that retries a rejected area once with reversed point order.
///
/// Some hosts reject areas whose winding disagrees with their local axes.
/// The core never retries; wrap the sink in this adapter when the host
/// needs it.
#[derive(Debug, Clone, Default)]
pub struct ReversedWindingRetry<S> {
    inner: S,
}

impl<S: ModelSink> ReversedWindingRetry<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ModelSink> ModelSink for ReversedWindingRetry<S> {
    fn create_point(&mut self, x: f64, y: f64, z: f64) -> Result<PointId, SinkCode> {
        self.inner.create_point(x, y, z)
    }

    fn create_area(&mut self, points: &[PointId], section: &str) -> Result<AreaId, SinkCode> {
        match self.inner.create_area(points, section) {
            Ok(id) => Ok(id),
            Err(code) => {
                tracing::debug!(code = code.0, section, "Area rejected; retrying with reversed winding");
                let reversed: Vec<PointId> = points.iter().rev().cloned().collect();
                self.inner.create_area(&reversed, section)
            }
        }
    }

    fn create_frame(
        &mut self,
        start: &PointId,
        end: &PointId,
        section: &str,
    ) -> Result<FrameId, SinkCode> {
        self.inner.create_frame(start, end, section)
    }

    fn assign_to_group(&mut self, element: ElementRef<'_>, group: &str) -> Result<(), SinkCode> {
        self.inner.assign_to_group(element, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Host that only accepts areas whose first point id sorts before the last
    #[derive(Default)]
    struct PickySink {
        recorder: RecordingSink,
        rejected: usize,
    }

    impl ModelSink for PickySink {
        fn create_point(&mut self, x: f64, y: f64, z: f64) -> Result<PointId, SinkCode> {
            self.recorder.create_point(x, y, z)
        }

        fn create_area(&mut self, points: &[PointId], section: &str) -> Result<AreaId, SinkCode> {
            if points.first() > points.last() {
                self.rejected += 1;
                return Err(SinkCode(-1));
            }
            self.recorder.create_area(points, section)
        }

        fn create_frame(
            &mut self,
            start: &PointId,
            end: &PointId,
            section: &str,
        ) -> Result<FrameId, SinkCode> {
            self.recorder.create_frame(start, end, section)
        }

        fn assign_to_group(&mut self, element: ElementRef<'_>, group: &str) -> Result<(), SinkCode> {
            self.recorder.assign_to_group(element, group)
        }
    }

    fn square(sink: &mut impl ModelSink) -> Vec<PointId> {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| sink.create_point(x, y, 3.0).unwrap())
            .collect()
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        let pts = square(&mut sink);
        let area = sink.create_area(&pts, "SLAB150M30").unwrap();
        let frame = sink.create_frame(&pts[0], &pts[1], "B20X45M30").unwrap();
        sink.assign_to_group(ElementRef::Area(&area), "Story1").unwrap();
        sink.assign_to_group(ElementRef::Frame(&frame), "Story1").unwrap();

        assert_eq!(sink.points.len(), 4);
        assert_eq!(sink.areas[0].section, "SLAB150M30");
        assert_eq!(sink.group_sizes().get("Story1"), Some(&2));
        assert_eq!(sink.create_frame(&pts[0], &pts[0], "B20X45M30"), Err(SinkCode(1)));
        assert_eq!(
            sink.assign_to_group(ElementRef::Area(&AreaId("A99".into())), "Story1"),
            Err(SinkCode(2))
        );
    }

    #[test]
    fn test_reversed_winding_retry() {
        let mut bare = PickySink::default();
        let mut pts = square(&mut bare);
        pts.reverse();
        assert_eq!(bare.create_area(&pts, "WALL200M40"), Err(SinkCode(-1)));

        let mut wrapped = ReversedWindingRetry::new(bare);
        let id = wrapped.create_area(&pts, "WALL200M40").unwrap();
        let inner = wrapped.into_inner();
        assert_eq!(inner.rejected, 2);
        assert_eq!(inner.recorder.areas.len(), 1);
        assert_eq!(inner.recorder.areas[0].id, id);
        assert_eq!(inner.recorder.areas[0].points[0], PointId("P1".into()));
    }
}

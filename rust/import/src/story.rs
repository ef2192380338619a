// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Story stacking
//!
//! Floor types are stacked bottom-to-top in configuration order; each
//! repetition of a floor type becomes one story. Elevations are cumulative
//! story heights starting from zero.

use crate::config::FloorType;
use serde::Serialize;

/// One story of the building
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Story {
    /// 0-based position from the bottom of the building
    pub index: u32,
    pub name: String,
    /// Index of the floor type this story repeats
    pub floor_type: usize,
    /// Base elevation in metres
    pub elevation: f64,
    /// Story height in metres
    pub height: f64,
}

impl Story {
    pub fn top_elevation(&self) -> f64 {
        self.elevation + self.height
    }
}

/// Story names generated for a floor type repeated `count` times
pub fn story_names(floor_type: &str, count: u32) -> Vec<String> {
    let lower = floor_type.trim().to_ascii_lowercase();
    let prefix = match lower.as_str() {
        "basement" => "Basement",
        "podium" => "Podium",
        "edeck" | "e-deck" if count == 1 => return vec!["EDeck".to_string()],
        "edeck" | "e-deck" => "EDeck",
        "typical" => "Story",
        _ => floor_type.trim(),
    };
    (1..=count).map(|i| format!("{prefix}{i}")).collect()
}

/// Stack every floor type into stories
pub fn stack_stories(floor_types: &[FloorType]) -> Vec<Story> {
    let mut stories = Vec::new();
    let mut elevation = 0.0;
    let mut index = 0;
    for (ft_index, ft) in floor_types.iter().enumerate() {
        for name in story_names(&ft.name, ft.count) {
            stories.push(Story {
                index,
                name,
                floor_type: ft_index,
                elevation,
                height: ft.height,
            });
            elevation += ft.height;
            index += 1;
        }
    }
    stories
}

use serde::Serialize;
use std::collections::BTreeMap;

use crate::scale;

// =============================================================================
// Phase 1: Aggregation
// =============================================================================

/// Series aligned into a label x series matrix, ready for scaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutModel {
    /// Every distinct label once, in first-seen order
    pub labels: Vec<String>,
    /// Synthetic `series<index>` ids in input order
    pub series_ids: Vec<String>,
    pub series_colors: BTreeMap<String, String>,
    /// Display names for the legend, where the series had one
    pub series_names: BTreeMap<String, String>,
    /// Sparse: a series without a point for a label has no entry in that row.
    pub matrix: BTreeMap<String, BTreeMap<String, f64>>,
    /// Values as authored, for the same cells as `matrix`
    pub value_text: BTreeMap<String, BTreeMap<String, String>>,
    /// Shared scale denominator for every bar
    pub global_max: f64,
}

impl LayoutModel {
    /// Explicitly recorded value of a cell, if any.
    pub fn explicit_value(&self, label: &str, series_id: &str) -> Option<f64> {
        self.matrix.get(label)?.get(series_id).copied()
    }

    pub fn value_text(&self, label: &str, series_id: &str) -> Option<&str> {
        self.value_text.get(label)?.get(series_id).map(String::as_str)
    }

    /// Value of a cell, with absent cells reading as 0.
    pub fn value(&self, label: &str, series_id: &str) -> f64 {
        self.explicit_value(label, series_id).unwrap_or(0.0)
    }

    /// Value of a cell scaled against the global maximum.
    pub fn proportion(&self, label: &str, series_id: &str) -> f64 {
        scale::proportion(self.value(label, series_id), self.global_max)
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn series_count(&self) -> usize {
        self.series_ids.len()
    }

    pub fn color_of(&self, series_id: &str) -> Option<&str> {
        self.series_colors.get(series_id).map(String::as_str)
    }
}

// =============================================================================
// Phase 2: Compilation
// =============================================================================

/// Per-bar geometry for a grid renderer.
/// Horizontal units are label slots: group `i` is centred on `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarScene {
    pub group_count: usize,
    pub series_count: usize,
    pub global_max: f64,
    /// Caption for the value axis
    pub axis_label: Option<String>,
    /// Share of the plot width given to each label group
    pub column_fraction: f64,
    pub legend: Vec<LegendEntry>,
    pub groups: Vec<LabelGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub series_id: String,
    pub name: String,
    pub color: String,
}

/// One column group: every series' bar for a single label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelGroup {
    pub index: usize,
    pub label: String,
    pub bars: Vec<BarGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub series_id: String,
    pub color: String,
    pub value: f64,
    /// True when the series had no point for this label
    pub defaulted: bool,
    /// Tooltip text: the value as authored, absent for defaulted bars
    pub title: Option<String>,
    pub proportion: f64,
    /// Bar height as a percentage of the plot height (may be negative or over 100)
    pub height_percent: f64,
    pub x_center: f64,
    pub width: f64,
}

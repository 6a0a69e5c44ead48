use crate::error::ChartError;
use crate::ir::{BarGeometry, BarScene, LabelGroup, LayoutModel, LegendEntry};
use crate::scale::ValueScale;

/// Layout options for bar compilation
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Fraction of each label slot covered by its bars (0.0-1.0]
    pub bar_width: f64,
    /// Caption for the value axis
    pub axis_label: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            bar_width: 0.8,
            axis_label: None,
        }
    }
}

/// Compile an aggregated model into per-bar geometry
pub fn compile_layout(model: &LayoutModel, config: &LayoutConfig) -> Result<BarScene, ChartError> {
    if !(config.bar_width > 0.0 && config.bar_width <= 1.0) {
        return Err(ChartError::InvalidBarWidth(config.bar_width));
    }

    let scale = ValueScale::new(model.global_max);
    let num_series = model.series_count();
    let num_groups = model.label_count();

    // Dodge: series share the bar width side by side, centred on the slot
    let slot_width = config.bar_width / num_series.max(1) as f64;

    let legend = model
        .series_ids
        .iter()
        .map(|id| LegendEntry {
            series_id: id.clone(),
            name: model.series_names.get(id).cloned().unwrap_or_else(|| id.clone()),
            color: model.color_of(id).unwrap_or_default().to_string(),
        })
        .collect();

    let mut groups = Vec::with_capacity(num_groups);
    for (group_idx, label) in model.labels.iter().enumerate() {
        let mut bars = Vec::with_capacity(num_series);

        for (series_idx, id) in model.series_ids.iter().enumerate() {
            let explicit = model.explicit_value(label, id);
            let value = explicit.unwrap_or(0.0);
            let offset = (series_idx as f64 - (num_series as f64 - 1.0) / 2.0) * slot_width;

            bars.push(BarGeometry {
                series_id: id.clone(),
                color: model.color_of(id).unwrap_or_default().to_string(),
                value,
                defaulted: explicit.is_none(),
                title: model.value_text(label, id).map(str::to_string),
                proportion: scale.proportion(value),
                height_percent: scale.percent(value),
                x_center: group_idx as f64 + offset,
                width: slot_width,
            });
        }

        groups.push(LabelGroup {
            index: group_idx,
            label: label.clone(),
            bars,
        });
    }

    let column_fraction = if num_groups == 0 {
        0.0
    } else {
        1.0 / num_groups as f64
    };

    log::debug!(
        "compiled {} groups x {} bars (slot width {})",
        num_groups,
        num_series,
        slot_width
    );

    Ok(BarScene {
        group_count: num_groups,
        series_count: num_series,
        global_max: model.global_max,
        axis_label: config.axis_label.clone(),
        column_fraction,
        legend,
        groups,
    })
}

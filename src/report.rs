// Text and JSON output of a compiled chart

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ir::{BarScene, LayoutModel};

#[derive(Serialize)]
struct Report<'a> {
    layout: &'a LayoutModel,
    scene: &'a BarScene,
}

pub fn to_json(model: &LayoutModel, scene: &BarScene) -> Result<String> {
    serde_json::to_string_pretty(&Report { layout: model, scene }).context("Failed to serialize layout")
}

/// Plain-text grid: one row per label, one column per series.
pub fn to_table(scene: &BarScene) -> String {
    let cells: Vec<Vec<String>> = scene
        .groups
        .iter()
        .map(|group| {
            group
                .bars
                .iter()
                .map(|bar| format!("{} ({:.1}%)", bar.value, bar.height_percent))
                .collect()
        })
        .collect();

    let headers: Vec<&str> = scene.legend.iter().map(|entry| entry.name.as_str()).collect();

    let label_width = scene
        .groups
        .iter()
        .map(|g| g.label.chars().count())
        .chain(std::iter::once("label".len()))
        .max()
        .unwrap_or(0);

    let column_widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    out.push_str(&format!("{:<width$}", "label", width = label_width));
    for (header, width) in headers.iter().zip(&column_widths) {
        out.push_str(&format!("  {:>width$}", header, width = *width));
    }
    out.push('\n');

    for (group, row) in scene.groups.iter().zip(&cells) {
        out.push_str(&format!("{:<width$}", group.label, width = label_width));
        for (cell, width) in row.iter().zip(&column_widths) {
            out.push_str(&format!("  {:>width$}", cell, width = *width));
        }
        out.push('\n');
    }

    out.push('\n');
    for entry in &scene.legend {
        out.push_str(&format!("{} = {} {}\n", entry.series_id, entry.name, entry.color));
    }
    if let Some(axis_label) = &scene.axis_label {
        out.push_str(&format!("axis label: {}\n", axis_label));
    }
    out.push_str(&format!("global max: {}\n", scene.global_max));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::compiler::{compile_layout, LayoutConfig};
    use crate::model::DataSeries;

    fn make_report_input() -> (LayoutModel, BarScene) {
        let model = aggregate(&[
            DataSeries::from_pairs("#111111", [("a", 3.0), ("b", 5.0)]).with_name("q1"),
            DataSeries::from_pairs("#222222", [("b", 2.0), ("c", 4.0)]).with_name("q2"),
        ])
        .unwrap();
        let scene = compile_layout(&model, &LayoutConfig::default()).unwrap();
        (model, scene)
    }

    #[test]
    fn test_table_rows() {
        let (_, scene) = make_report_input();
        let table = to_table(&scene);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("label"));
        assert!(lines[0].contains("q1"));
        assert!(lines[1].starts_with("a"));
        assert!(lines[1].contains("3 (60.0%)"));
        assert!(lines[1].contains("0 (0.0%)"));
        assert!(lines[2].contains("5 (100.0%)"));
        assert!(table.contains("series1 = q2 #222222"));
        assert!(table.contains("global max: 5"));
        assert!(!table.contains("axis label"));
    }

    #[test]
    fn test_table_axis_label_footer() {
        let (model, _) = make_report_input();
        let config = LayoutConfig {
            axis_label: Some("Units sold".to_string()),
            ..Default::default()
        };
        let scene = compile_layout(&model, &config).unwrap();
        let table = to_table(&scene);

        assert!(table.contains("axis label: Units sold\n"));
        assert!(table.ends_with("global max: 5\n"));
    }

    #[test]
    fn test_json_shape() {
        let (model, scene) = make_report_input();
        let json = to_json(&model, &scene).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["layout"]["labels"], serde_json::json!(["a", "b", "c"]));
        assert_eq!(value["layout"]["global_max"], serde_json::json!(5.0));
        assert_eq!(value["layout"]["matrix"]["b"]["series1"], serde_json::json!(2.0));
        assert!(value["layout"]["matrix"]["a"].get("series1").is_none());
        assert_eq!(value["scene"]["group_count"], serde_json::json!(3));
        assert_eq!(value["scene"]["axis_label"], serde_json::Value::Null);
        assert_eq!(value["scene"]["groups"][1]["bars"][0]["title"], serde_json::json!("5"));
        assert_eq!(value["scene"]["groups"][0]["bars"][1]["defaulted"], serde_json::json!(true));
    }
}

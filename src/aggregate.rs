use std::collections::{BTreeMap, HashSet};

use crate::error::ChartError;
use crate::ir::LayoutModel;
use crate::model::DataSeries;

/// Identifier given to the series at `index`.
pub fn series_id(index: usize) -> String {
    format!("series{}", index)
}

/// Main entry point: align series into a label x series matrix and find the shared scale.
///
/// The input is only read. Calling this twice with the same series yields equal models.
pub fn aggregate(series: &[DataSeries]) -> Result<LayoutModel, ChartError> {
    let mut labels = Vec::new();
    let mut seen_labels: HashSet<String> = HashSet::new();
    let mut series_ids = Vec::with_capacity(series.len());
    let mut series_colors = BTreeMap::new();
    let mut series_names = BTreeMap::new();
    let mut matrix: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut value_text: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    let mut global_max: Option<f64> = None;

    for (index, s) in series.iter().enumerate() {
        // 1. Identity
        let id = series_id(index);
        series_ids.push(id.clone());
        series_colors.insert(id.clone(), s.color.clone());
        if let Some(name) = &s.name {
            series_names.insert(id.clone(), name.clone());
        }

        // 2. Resolve values (aborts on the first bad point)
        let data = s.data().map_err(|e| ChartError::ValueParse {
            label: e.label,
            series_index: index,
            text: e.text,
        })?;

        // 3. Per-series max feeds the shared scale; empty series contribute nothing
        match data.max() {
            Some(series_max) => {
                global_max = Some(global_max.map_or(series_max, |m| m.max(series_max)));
            }
            None => log::warn!("{} has no data points", id),
        }

        // 4. Merge into the label union and the sparse matrix
        for (label, value) in data.iter() {
            if seen_labels.insert(label.to_string()) {
                labels.push(label.to_string());
            }
            matrix
                .entry(label.to_string())
                .or_default()
                .insert(id.clone(), value);
        }

        // Later points overwrite earlier ones, matching the resolved values
        for point in &s.points {
            value_text
                .entry(point.label.clone())
                .or_default()
                .insert(id.clone(), point.value.source_text());
        }
    }

    let global_max = global_max.ok_or(ChartError::EmptyInput {
        series_count: series.len(),
    })?;

    log::debug!(
        "aggregated {} series over {} labels (global max {})",
        series_ids.len(),
        labels.len(),
        global_max
    );

    Ok(LayoutModel {
        labels,
        series_ids,
        series_colors,
        series_names,
        matrix,
        value_text,
        global_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataPoint;
    use pretty_assertions::assert_eq;

    fn make_series() -> Vec<DataSeries> {
        vec![
            DataSeries::from_pairs("blue", [("a", 3.0), ("b", 5.0)]),
            DataSeries::from_pairs("green", [("b", 2.0), ("c", 4.0)]),
        ]
    }

    #[test]
    fn test_aggregate_alignment() {
        let model = aggregate(&make_series()).unwrap();

        assert_eq!(model.labels, vec!["a", "b", "c"]);
        assert_eq!(model.series_ids, vec!["series0", "series1"]);
        assert_eq!(model.color_of("series0"), Some("blue"));
        assert_eq!(model.color_of("series1"), Some("green"));
        assert_eq!(model.global_max, 5.0);
    }

    #[test]
    fn test_aggregate_matrix_is_sparse() {
        let model = aggregate(&make_series()).unwrap();

        assert_eq!(model.matrix["a"].len(), 1);
        assert_eq!(model.matrix["b"].len(), 2);
        assert_eq!(model.explicit_value("a", "series1"), None);
        assert_eq!(model.value("a", "series1"), 0.0);
        assert_eq!(model.value("c", "series0"), 0.0);
        assert_eq!(model.value("c", "series1"), 4.0);
    }

    #[test]
    fn test_aggregate_labels_not_sorted() {
        let series = vec![
            DataSeries::from_pairs("red", [("z", 1.0), ("10", 2.0)]),
            DataSeries::from_pairs("red", [("2", 3.0), ("a", 4.0), ("z", 5.0)]),
        ];
        let model = aggregate(&series).unwrap();
        assert_eq!(model.labels, vec!["z", "10", "2", "a"]);
    }

    #[test]
    fn test_aggregate_duplicate_label_in_series() {
        let series = vec![DataSeries::from_pairs("red", [("a", 9.0), ("b", 1.0), ("a", 2.0)])];
        let model = aggregate(&series).unwrap();
        assert_eq!(model.labels, vec!["a", "b"]);
        assert_eq!(model.value("a", "series0"), 2.0);
        // the overwritten 9 never reaches the scale
        assert_eq!(model.global_max, 2.0);
    }

    #[test]
    fn test_aggregate_empty_series_alongside_data() {
        let series = vec![
            DataSeries::new("red"),
            DataSeries::from_pairs("blue", [("a", -3.0)]),
        ];
        let model = aggregate(&series).unwrap();
        assert_eq!(model.series_ids, vec!["series0", "series1"]);
        assert_eq!(model.labels, vec!["a"]);
        assert_eq!(model.global_max, -3.0);
        assert_eq!(model.value("a", "series0"), 0.0);
    }

    #[test]
    fn test_aggregate_all_empty() {
        let err = aggregate(&[DataSeries::new("red"), DataSeries::new("blue")]).unwrap_err();
        assert_eq!(err, ChartError::EmptyInput { series_count: 2 });

        let err = aggregate(&[]).unwrap_err();
        assert_eq!(err, ChartError::EmptyInput { series_count: 0 });
    }

    #[test]
    fn test_aggregate_parse_error_in_later_series() {
        let mut bad = DataSeries::from_pairs("red", [("a", 1.0)]);
        bad.push(DataPoint::new("q", "n/a"));
        let series = vec![DataSeries::from_pairs("blue", [("a", 1.0)]), bad];

        let err = aggregate(&series).unwrap_err();
        assert_eq!(
            err,
            ChartError::ValueParse {
                label: "q".to_string(),
                series_index: 1,
                text: "n/a".to_string(),
            }
        );
    }

    #[test]
    fn test_aggregate_text_values() {
        let series = vec![DataSeries::from_pairs("red", [("a", "1.5"), ("b", "  4 ")])];
        let model = aggregate(&series).unwrap();
        assert_eq!(model.value("a", "series0"), 1.5);
        assert_eq!(model.global_max, 4.0);
    }

    #[test]
    fn test_aggregate_keeps_authored_text() {
        let series = vec![
            DataSeries::from_pairs("red", [("a", "1.50"), ("b", "2"), ("a", " 3 ")]),
            DataSeries::from_pairs("blue", [("b", 4.0)]),
        ];
        let model = aggregate(&series).unwrap();
        assert_eq!(model.value_text("a", "series0"), Some(" 3 "));
        assert_eq!(model.value_text("b", "series1"), Some("4"));
        assert_eq!(model.value_text("a", "series1"), None);
    }

    #[test]
    fn test_aggregate_keeps_names() {
        let series = vec![
            DataSeries::from_pairs("red", [("a", 1.0)]).with_name("2023"),
            DataSeries::from_pairs("blue", [("a", 2.0)]),
        ];
        let model = aggregate(&series).unwrap();
        assert_eq!(model.series_names.get("series0").map(String::as_str), Some("2023"));
        assert_eq!(model.series_names.get("series1"), None);
    }

    #[test]
    fn test_series_id_format() {
        assert_eq!(series_id(0), "series0");
        assert_eq!(series_id(12), "series12");
    }
}

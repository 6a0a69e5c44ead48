use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::model::{DataPoint, DataSeries, PointValue};
use crate::palette::ColorPalette;

#[derive(Debug, Clone)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

/// Which columns make up the series.
///
/// With a `series` column the input is long: one row per point, grouped by that
/// column. Without it the input is wide: every value column is its own series.
#[derive(Debug, Clone)]
pub struct SeriesColumns {
    pub label: ColumnSelector,
    pub values: Vec<ColumnSelector>,
    pub series: Option<ColumnSelector>,
    pub color: Option<ColumnSelector>,
}

/// Read CSV with a header row. A file with headers only is accepted.
pub fn read_csv<R: Read>(input: R) -> Result<CsvData> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read CSV record")?;
        let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        rows.push(row);
    }

    Ok(CsvData { headers, rows })
}

pub fn read_csv_from_stdin() -> Result<CsvData> {
    read_csv(io::stdin())
}

pub fn read_csv_from_path(path: &Path) -> Result<CsvData> {
    let file = File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    read_csv(file).with_context(|| format!("Failed to read CSV from '{}'", path.display()))
}

pub fn parse_column_selector(input: &str) -> ColumnSelector {
    match input.parse::<usize>() {
        Ok(index) => ColumnSelector::Index(index),
        Err(_) => ColumnSelector::Name(input.to_string()),
    }
}

/// Find a column's position and its header as written in the file.
pub fn resolve_column(data: &CsvData, selector: &ColumnSelector) -> Result<(usize, String)> {
    match selector {
        ColumnSelector::Index(idx) => {
            if *idx >= data.headers.len() {
                return Err(anyhow!(
                    "Column index {} out of bounds (available columns: {})",
                    idx,
                    data.headers.len()
                ));
            }
            Ok((*idx, data.headers[*idx].clone()))
        }
        ColumnSelector::Name(name) => {
            let idx = data
                .headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    anyhow!(
                        "Column '{}' not found. Available columns: {}",
                        name,
                        data.headers.join(", ")
                    )
                })?;
            Ok((idx, data.headers[idx].clone()))
        }
    }
}

fn cell<'a>(row: &'a [String], row_idx: usize, column_index: usize) -> Result<&'a str> {
    row.get(column_index).map(String::as_str).ok_or_else(|| {
        anyhow!(
            "Row {} has only {} columns, expected at least {}",
            row_idx + 1,
            row.len(),
            column_index + 1
        )
    })
}

/// Turn CSV rows into series. Value cells stay as text so that a bad number is
/// reported by the aggregator together with its label and series index.
pub fn build_series(data: &CsvData, columns: &SeriesColumns, palette: &ColorPalette) -> Result<Vec<DataSeries>> {
    if columns.values.is_empty() {
        bail!("At least one value column is required");
    }

    let (label_idx, _) = resolve_column(data, &columns.label)?;
    let color_idx = match &columns.color {
        Some(sel) => Some(resolve_column(data, sel)?.0),
        None => None,
    };

    let mut series = match &columns.series {
        Some(series_sel) => {
            if columns.values.len() != 1 {
                bail!(
                    "A series column takes exactly one value column (got {})",
                    columns.values.len()
                );
            }
            let (series_idx, _) = resolve_column(data, series_sel)?;
            let (value_idx, _) = resolve_column(data, &columns.values[0])?;
            build_long(data, label_idx, value_idx, series_idx, color_idx)?
        }
        None => {
            if color_idx.is_some() && columns.values.len() > 1 {
                bail!("A color column needs a series column when several value columns are given");
            }
            build_wide(data, label_idx, &columns.values, color_idx)?
        }
    };

    let count = series.len();
    for (i, s) in series.iter_mut().enumerate() {
        if s.color.is_empty() {
            s.color = palette.series_color(i, count);
        }
    }

    log::debug!("read {} rows into {} series", data.rows.len(), count);
    Ok(series)
}

/// One row per point; rows grouped by series key in first-seen order.
fn build_long(
    data: &CsvData,
    label_idx: usize,
    value_idx: usize,
    series_idx: usize,
    color_idx: Option<usize>,
) -> Result<Vec<DataSeries>> {
    let mut series: Vec<DataSeries> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (row_idx, row) in data.rows.iter().enumerate() {
        let key = cell(row, row_idx, series_idx)?;
        let pos = match positions.get(key) {
            Some(&pos) => pos,
            None => {
                positions.insert(key.to_string(), series.len());
                series.push(DataSeries::new("").with_name(key));
                series.len() - 1
            }
        };

        let target = &mut series[pos];
        if let Some(idx) = color_idx {
            let color = cell(row, row_idx, idx)?.trim();
            if target.color.is_empty() && !color.is_empty() {
                target.color = color.to_string();
            }
        }

        let label = cell(row, row_idx, label_idx)?;
        let value = cell(row, row_idx, value_idx)?;
        target.push(DataPoint::new(label, PointValue::Text(value.to_string())));
    }

    Ok(series)
}

/// One series per value column, named after its header. Blank cells are
/// treated as missing points rather than bad values.
fn build_wide(
    data: &CsvData,
    label_idx: usize,
    values: &[ColumnSelector],
    color_idx: Option<usize>,
) -> Result<Vec<DataSeries>> {
    let mut series = Vec::with_capacity(values.len());

    for selector in values {
        let (value_idx, header) = resolve_column(data, selector)?;
        let mut s = DataSeries::new("").with_name(header);

        for (row_idx, row) in data.rows.iter().enumerate() {
            if let Some(idx) = color_idx {
                let color = cell(row, row_idx, idx)?.trim();
                if s.color.is_empty() && !color.is_empty() {
                    s.color = color.to_string();
                }
            }
            let value = cell(row, row_idx, value_idx)?;
            if value.trim().is_empty() {
                continue;
            }
            let label = cell(row, row_idx, label_idx)?;
            s.push(DataPoint::new(label, PointValue::Text(value.to_string())));
        }

        series.push(s);
    }

    Ok(series)
}

// Input value objects: data points and the series that own them

use std::collections::HashMap;
use thiserror::Error;

/// Raw value of a data point, as authored.
/// Text is only interpreted when the series data is resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PointValue {
    Number(f64),
    Text(String),
}

/// A point value that does not resolve to a finite number.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("value '{text}' for label '{label}' is not a finite number")]
pub struct PointValueError {
    pub label: String,
    pub text: String,
}

impl PointValue {
    /// Resolve to a finite `f64`. Surrounding whitespace in text is ignored;
    /// NaN and infinities are rejected, whether written as text or given as numbers.
    pub fn resolve(&self) -> Option<f64> {
        let value = match self {
            PointValue::Number(v) => *v,
            PointValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// The value as it was authored, for error reporting.
    pub fn source_text(&self) -> String {
        match self {
            PointValue::Number(v) => v.to_string(),
            PointValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for PointValue {
    fn from(value: f64) -> Self {
        PointValue::Number(value)
    }
}

impl From<&str> for PointValue {
    fn from(value: &str) -> Self {
        PointValue::Text(value.to_string())
    }
}

impl From<String> for PointValue {
    fn from(value: String) -> Self {
        PointValue::Text(value)
    }
}

/// A single labeled bar value
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: PointValue,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: impl Into<PointValue>) -> Self {
        DataPoint {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn parse_value(&self) -> Result<f64, PointValueError> {
        self.value.resolve().ok_or_else(|| PointValueError {
            label: self.label.clone(),
            text: self.value.source_text(),
        })
    }
}

/// An ordered collection of data points drawn in one color.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSeries {
    pub color: String,
    /// Display name for legends. Never used as an identifier.
    pub name: Option<String>,
    pub points: Vec<DataPoint>,
}

impl DataSeries {
    pub fn new(color: impl Into<String>) -> Self {
        DataSeries {
            color: color.into(),
            name: None,
            points: Vec::new(),
        }
    }

    /// Build a series from `(label, value)` pairs, in order.
    pub fn from_pairs<L, V, I>(color: impl Into<String>, pairs: I) -> Self
    where
        L: Into<String>,
        V: Into<PointValue>,
        I: IntoIterator<Item = (L, V)>,
    {
        let mut series = DataSeries::new(color);
        for (label, value) in pairs {
            series.push(DataPoint::new(label, value));
        }
        series
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolve the points into a label -> value mapping.
    ///
    /// Repeated labels keep the position of their first occurrence and the
    /// value of their last one. The first unparseable point aborts resolution.
    pub fn data(&self) -> Result<SeriesData, PointValueError> {
        let mut data = SeriesData::default();
        for point in &self.points {
            let value = point.parse_value()?;
            data.insert(&point.label, value);
        }
        Ok(data)
    }
}

/// Resolved numeric data of one series, keyed by label in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesData {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl SeriesData {
    fn insert(&mut self, label: &str, value: f64) {
        match self.index.get(label) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), value));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.index.get(label).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest value in the series, `None` when it has no points.
    pub fn max(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|(_, value)| *value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

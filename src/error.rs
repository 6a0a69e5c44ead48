// Error types for the aggregation engine

use thiserror::Error;

/// Errors raised while aggregating series or compiling their layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A data point's value is not a finite decimal number.
    #[error("Failed to parse value '{text}' as number for label '{label}' in series {series_index}")]
    ValueParse {
        label: String,
        series_index: usize,
        text: String,
    },

    /// No series contributed a single data point, so there is nothing to scale against.
    #[error("Cannot build a chart with no data points ({series_count} series given)")]
    EmptyInput { series_count: usize },

    #[error("Bar width ratio must be within (0, 1], got {0}")]
    InvalidBarWidth(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parse_message() {
        let err = ChartError::ValueParse {
            label: "x".to_string(),
            series_index: 2,
            text: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to parse"));
        assert!(msg.contains("'x'"));
        assert!(msg.contains("series 2"));
    }

    #[test]
    fn test_empty_input_message() {
        let err = ChartError::EmptyInput { series_count: 0 };
        assert!(err.to_string().contains("no data points"));
    }
}

// Default series colors

/// Color palette for series that don't bring their own color
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    /// Create a Category10 color palette (D3-inspired)
    /// Colors: blue, orange, green, red, purple, brown, pink, gray, olive, cyan
    pub fn category10() -> Self {
        ColorPalette {
            colors: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }

    /// Fill used when a chart has a single series
    pub fn single_series_fill() -> String {
        "#6699cc".to_string()
    }

    /// Get color for a specific index (wraps around if index > palette size)
    pub fn get_color(&self, index: usize) -> String {
        self.colors[index % self.colors.len()].clone()
    }

    /// Color for series `index` of a chart with `series_count` series
    pub fn series_color(&self, index: usize, series_count: usize) -> String {
        if series_count == 1 {
            Self::single_series_fill()
        } else {
            self.get_color(index)
        }
    }
}

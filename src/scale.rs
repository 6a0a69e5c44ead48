/// Scale `value` against the shared maximum.
///
/// The result is not clamped: negative values give negative proportions and
/// nothing stops a value from exceeding the maximum. A zero maximum maps every
/// value to 0.
pub fn proportion(value: f64, global_max: f64) -> f64 {
    if global_max == 0.0 {
        0.0
    } else {
        value / global_max
    }
}

/// Linear value scale shared by every bar of a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub max: f64,
}

impl ValueScale {
    pub fn new(max: f64) -> Self {
        ValueScale { max }
    }

    pub fn proportion(&self, value: f64) -> f64 {
        proportion(value, self.max)
    }

    /// Bar height as a percentage of the plot height.
    pub fn percent(&self, value: f64) -> f64 {
        100.0 * self.proportion(value)
    }
}

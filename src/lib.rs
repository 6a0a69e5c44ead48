// Library exports for barchart

pub mod csv_reader;
pub mod error;
pub mod model;
pub mod palette;
pub mod report;

// Pipeline phases
pub mod aggregate;
pub mod compiler;
pub mod ir;
pub mod scale;

pub use aggregate::aggregate;
pub use compiler::{compile_layout, LayoutConfig};
pub use error::ChartError;
pub use ir::{BarGeometry, BarScene, LabelGroup, LayoutModel, LegendEntry};
pub use model::{DataPoint, DataSeries, PointValue};

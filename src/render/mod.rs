//! Presentation helpers: SVG charts and CSV export of evaluated curves and grids.
//!
//! Nothing here feeds back into pricing; every function consumes finished
//! results from [`crate::grid`].

pub mod chart;
pub mod export;

pub use chart::{curve_svg, heatmap_svg, heatmap_title, profit_curve_svg, write_svg};
pub use export::{write_curve_csv, write_grid_csv, write_profit_curve_csv};

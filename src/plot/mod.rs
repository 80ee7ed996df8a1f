//! PNG rendering of the diagnostic plots.

pub mod accuracy_chart;
pub mod canvas;
pub mod decision_boundary;

pub use accuracy_chart::{render_accuracy_chart, save_accuracy_chart};
pub use decision_boundary::{DecisionGrid, grid_axis, render_decision_boundary, save_decision_boundary};

//! UI components.

pub mod explorer;
pub mod filter_panel;
pub mod force_graph;
pub mod stats_panel;

pub use explorer::Explorer;
pub use filter_panel::FilterPanel;
pub use force_graph::{ForceGraphCanvas, ViewCommand};
pub use stats_panel::{NodeInfoPanel, StatsPanel};

//! Dashboard module - card-style dashlets rendered from a configuration.

mod dashlet;

pub use dashlet::{render_dashlet, DashletConfig, DashletContent, DashletStatus, DashletView};

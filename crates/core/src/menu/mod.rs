//! Menu module - navigation menu entries and their parent/child lookup.

mod menu_model;
mod navigation;

pub use menu_model::{MenuData, MenuDataBuilder, MenuEntry, MenuNode};
pub use navigation::navigation_menu;

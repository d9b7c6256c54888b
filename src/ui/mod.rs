// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

pub use layout::{LayoutManager, LayoutMode};
pub use theme::Theme;

pub use components::{
    CommandBar, Dialog, DialogKind, InputPurpose, Panel, StatusBar, WarningScreen,
};

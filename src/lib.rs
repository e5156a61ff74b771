//! Interactive polygon drawing for map editors.
//!
//! The [`Editor`] hosts one interaction mode at a time and routes pointer,
//! touch and keyboard input to it. Modes edit features in the shared
//! [`store::FeatureStore`] and talk to the map engine through the
//! [`map::MapSurface`] trait, so the same state machine drives a real map
//! embedding, the headless CLI and the tests.

pub mod config;
pub mod context;
pub mod editor;
pub mod feature;
pub mod input;
pub mod map;
pub mod modes;
pub mod snap;
pub mod store;
pub mod ui;

pub use config::Config;
pub use editor::Editor;

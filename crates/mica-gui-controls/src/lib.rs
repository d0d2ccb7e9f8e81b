//! # mica-gui-controls
//!
//! Fluent-styled renderers for the widgets of a `mica-gui` tree.
//!
//! Renderers keep per-widget animation state between frames and forget it
//! once a widget stops being drawn. Everything is drawn through
//! [`mica_gui::DrawSurface`], so any backend that implements it works.
//!
//! ## Core Types
//!
//! - [`ControlRenderer`] - Routes every widget to its renderer for one frame
//! - [`FrameOutcome`] - Whether the host should schedule another frame
//! - [`RenderFrame`] - Per-frame context handed to each renderer
//!
//! ## State
//!
//! - [`AnimationStore`] / [`FrameStore`] - Per-widget state swept every frame
//! - [`ElevationBrushCache`] - Gradient brushes for elevation borders
//!
//! ## Extension
//!
//! - [`CustomRenderer`] - Draws `WidgetKind::Custom` widgets

mod anim;
mod button;
mod check_box;
mod dispatcher;
mod elevation;
mod frame;
mod label;
mod palette;
mod plugin;
mod radio;
mod scroll_view;
mod slider;
mod text_box;
mod toggle_switch;

// Core types
pub use dispatcher::*;
pub use frame::*;
pub use palette::*;

// State
pub use anim::*;
pub use elevation::*;

// Renderers
pub use button::*;
pub use check_box::*;
pub use label::*;
pub use radio::*;
pub use scroll_view::*;
pub use slider::*;
pub use text_box::*;
pub use toggle_switch::*;

// Extension
pub use plugin::*;

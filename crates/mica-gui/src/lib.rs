//! # mica-gui
//!
//! Backend agnostic core of a Fluent-style control layer.
//!
//! This crate owns the widget tree, the geometry shared by drawing and
//! hit-testing, the animation primitive, and input dispatch. Drawing goes
//! through the [`DrawSurface`] trait; the control renderers themselves live
//! in `mica-gui-controls`.
//!
//! ## Core Types
//!
//! - [`WidgetTree`] / [`ViewData`] - Widgets addressed by [`WidgetId`]
//! - [`ControlMetrics`] - Sizes shared by renderers and the hit-tester
//! - [`Theme`] - Resolved color tokens plus a change counter
//!
//! ## Input & Events
//!
//! - [`hit_test`] - Deepest widget under a point, scrollbars first
//! - [`EventDispatcher`] - Pointer, wheel and keyboard handling
//! - [`Interaction`] - Per-frame snapshot handed to the renderers
//!
//! ## Animation
//!
//! - [`TransitionState`] - Time-based interpolation toward a target
//! - [`Clock`] - Injected time source, [`ManualClock`] for tests

mod clock;
mod color;
mod config;
mod draw;
mod events;
mod geometry;
mod hit_test;
mod input;
mod measure;
mod primitives;
mod theme;
pub mod transition;
mod tree;

// Core types
pub use color::*;
pub use config::*;
pub use draw::*;
pub use geometry::*;
pub use measure::*;
pub use primitives::*;
pub use theme::*;
pub use tree::*;

// Animation
pub use clock::*;
pub use transition::*;

// Input & Events
pub use events::*;
pub use hit_test::*;
pub use input::*;

pub use mica_gui_macros::WithBuilders;

//! # mica-gui-winit
//!
//! Feeds winit window events into a mica-gui [`EventDispatcher`](mica_gui::EventDispatcher).
//!
//! ```ignore
//! let mut adapter = WinitInputAdapter::new(window.scale_factor());
//! // in `window_event`:
//! adapter.handle_window_event(&mut dispatcher, &mut tree, &event);
//! if dispatcher.take_redraw_request() {
//!     window.request_redraw();
//! }
//! ```

mod input;

pub use input::*;

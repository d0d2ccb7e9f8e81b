//! Winit input adapter for mica-gui
//!
//! Converts winit window events into [`EventDispatcher`] calls. Positions
//! arrive in physical pixels and are converted to DIPs with the window's
//! scale factor before they reach the dispatcher.

use mica_gui::{
    Composition, EventDispatcher, Key, Modifiers, MouseButton, NamedKey, Point, PointerKind,
    WidgetTree,
};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Ime, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{Key as WinitKey, ModifiersState};

/// Window-level input state the dispatcher does not track itself.
#[derive(Debug, Clone, Copy)]
pub struct WinitInputAdapter {
    scale_factor: f64,
    cursor: Option<Point>,
    modifiers: Modifiers,
}

impl Default for WinitInputAdapter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl WinitInputAdapter {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor: sanitize_scale(scale_factor),
            cursor: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Last cursor position in DIPs
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        Point::new(
            (position.x / self.scale_factor) as f32,
            (position.y / self.scale_factor) as f32,
        )
    }

    /// Route one window event. Returns whether it was input the UI handles.
    ///
    /// Call [`EventDispatcher::take_redraw_request`] afterwards to find out
    /// whether a frame is needed.
    pub fn handle_window_event(
        &mut self,
        dispatcher: &mut EventDispatcher,
        tree: &mut WidgetTree,
        event: &WindowEvent,
    ) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let point = self.to_logical(*position);
                self.cursor = Some(point);
                dispatcher.pointer_move(tree, point, PointerKind::Mouse);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                dispatcher.pointer_leave();
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(point) = self.cursor else {
                    return false;
                };
                let button = convert_mouse_button(*button);
                match state {
                    ElementState::Pressed => {
                        dispatcher.pointer_down(tree, point, button, PointerKind::Mouse)
                    }
                    ElementState::Released => {
                        dispatcher.pointer_up(tree, point, button, PointerKind::Mouse)
                    }
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = wheel_delta(
                    delta,
                    self.scale_factor,
                    dispatcher.metrics().input.wheel_speed,
                );
                dispatcher.wheel(tree, self.cursor, notches);
                true
            }
            WindowEvent::Touch(touch) => {
                let point = self.to_logical(touch.location);
                match touch.phase {
                    TouchPhase::Started => {
                        dispatcher.pointer_down(tree, point, MouseButton::Left, PointerKind::Touch)
                    }
                    TouchPhase::Moved => dispatcher.pointer_move(tree, point, PointerKind::Touch),
                    TouchPhase::Ended => {
                        dispatcher.pointer_up(tree, point, MouseButton::Left, PointerKind::Touch)
                    }
                    TouchPhase::Cancelled => dispatcher.reset(),
                }
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return false;
                }
                let key = convert_key(&event.logical_key);
                let consumed = dispatcher.key_down(tree, &key, self.modifiers);
                if consumed {
                    return true;
                }
                // Ctrl/Super chords are shortcuts, not text.
                if self.modifiers.ctrl || self.modifiers.super_key {
                    return false;
                }
                match &event.text {
                    Some(text) => {
                        dispatcher.text_input(tree, text);
                        true
                    }
                    None => false,
                }
            }
            WindowEvent::Ime(ime) => {
                match ime {
                    Ime::Preedit(text, cursor) => {
                        let composition = (!text.is_empty()).then(|| Composition {
                            text: text.clone(),
                            cursor: preedit_cursor(text, *cursor),
                        });
                        dispatcher.set_composition(tree, composition);
                    }
                    Ime::Commit(text) => {
                        dispatcher.set_composition(tree, None);
                        dispatcher.text_input(tree, text);
                    }
                    Ime::Disabled => dispatcher.set_composition(tree, None),
                    Ime::Enabled => return false,
                }
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = convert_modifiers(modifiers.state());
                false
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = sanitize_scale(*scale_factor);
                log::debug!("scale factor changed to {}", self.scale_factor);
                dispatcher.request_redraw();
                true
            }
            WindowEvent::Focused(false) => {
                self.modifiers = Modifiers::default();
                dispatcher.reset();
                true
            }
            _ => false,
        }
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

/// Wheel movement in notches, positive towards the end of the content.
///
/// winit reports wheel-down as a negative delta, so the sign is flipped.
/// Pixel deltas (touchpads) are converted to DIPs and then to notches of
/// `wheel_speed` DIPs.
pub fn wheel_delta(delta: &MouseScrollDelta, scale_factor: f64, wheel_speed: f32) -> Point {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Point::new(-x, -y),
        MouseScrollDelta::PixelDelta(position) => {
            let scale = sanitize_scale(scale_factor);
            let speed = if wheel_speed > 0.0 { wheel_speed } else { 1.0 };
            Point::new(
                -(position.x / scale) as f32 / speed,
                -(position.y / scale) as f32 / speed,
            )
        }
    }
}

/// Preedit cursor as a char index. winit reports byte offsets; a hidden
/// cursor is placed at the end.
fn preedit_cursor(text: &str, cursor: Option<(usize, usize)>) -> usize {
    match cursor {
        Some((_, end)) => text
            .get(..end)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| text.chars().count()),
        None => text.chars().count(),
    }
}

pub fn convert_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        super_key: state.super_key(),
    }
}

/// Convert winit MouseButton to mica-gui MouseButton
pub fn convert_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(n) => MouseButton::Other(n.min(u8::MAX as u16) as u8),
    }
}

/// Convert winit Key to mica-gui Key
pub fn convert_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => convert_named_key(named).map_or(Key::Unknown, Key::Named),
        WinitKey::Character(s) => Key::Character(s.to_string()),
        _ => Key::Unknown,
    }
}

fn convert_named_key(key: &winit::keyboard::NamedKey) -> Option<NamedKey> {
    use winit::keyboard::NamedKey as WN;

    Some(match key {
        WN::Enter => NamedKey::Enter,
        WN::Escape => NamedKey::Escape,
        WN::Backspace => NamedKey::Backspace,
        WN::Delete => NamedKey::Delete,
        WN::Tab => NamedKey::Tab,
        WN::Space => NamedKey::Space,
        WN::ArrowLeft => NamedKey::ArrowLeft,
        WN::ArrowRight => NamedKey::ArrowRight,
        WN::ArrowUp => NamedKey::ArrowUp,
        WN::ArrowDown => NamedKey::ArrowDown,
        WN::Home => NamedKey::Home,
        WN::End => NamedKey::End,
        WN::PageUp => NamedKey::PageUp,
        WN::PageDown => NamedKey::PageDown,
        WN::Shift => NamedKey::Shift,
        WN::Control => NamedKey::Control,
        WN::Alt => NamedKey::Alt,
        WN::Super => NamedKey::Super,
        _ => return None,
    })
}

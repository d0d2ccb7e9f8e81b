//! State-to-color decision tables.
//!
//! Each control kind has a normal and an accent table (accent meaning
//! "accent button", "checked" or "focused" depending on the kind). Lookup
//! order is disabled, pressed, hovered, rest.

use mica_gui::{Color, Palette, ViewData, WidgetState};

/// Fill, stroke and text color for one visual state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateColors {
    pub fill: Color,
    pub stroke: Color,
    pub text: Color,
}

impl StateColors {
    pub const fn new(fill: Color, stroke: Color, text: Color) -> Self {
        Self { fill, stroke, text }
    }

    /// Explicit widget colors win over the theme when they are visible.
    pub fn with_overrides(mut self, data: &ViewData) -> Self {
        if data.background.is_visible() {
            self.fill = data.background;
        }
        if data.border_color.is_visible() {
            self.stroke = data.border_color;
        }
        if data.foreground.is_visible() {
            self.text = data.foreground;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateColorTable {
    pub rest: StateColors,
    pub hover: StateColors,
    pub pressed: StateColors,
    pub disabled: StateColors,
}

impl StateColorTable {
    pub fn pick(&self, state: VisualState) -> StateColors {
        if state.disabled {
            self.disabled
        } else if state.pressed {
            self.pressed
        } else if state.hovered {
            self.hover
        } else {
            self.rest
        }
    }
}

/// The interaction flags a color lookup depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualState {
    pub disabled: bool,
    pub pressed: bool,
    pub hovered: bool,
}

impl VisualState {
    pub fn of(data: &ViewData, state: &WidgetState) -> Self {
        Self {
            disabled: data.disabled,
            pressed: state.pressed,
            hovered: state.hovered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindPalette {
    pub normal: StateColorTable,
    pub accent: StateColorTable,
}

impl KindPalette {
    pub fn resolve(&self, accent: bool, state: VisualState) -> StateColors {
        if accent {
            self.accent.pick(state)
        } else {
            self.normal.pick(state)
        }
    }

    fn accent_table(p: &Palette, stroke: Color) -> StateColorTable {
        StateColorTable {
            rest: StateColors::new(p.accent_fill, stroke, p.text_on_accent),
            hover: StateColors::new(p.accent_fill_hover, stroke, p.text_on_accent),
            pressed: StateColors::new(p.accent_fill_pressed, stroke, p.text_on_accent),
            disabled: StateColors::new(
                p.accent_fill_disabled,
                Color::transparent(),
                p.text_on_accent_disabled,
            ),
        }
    }

    /// Buttons and toggle buttons; accent covers checked toggle buttons.
    pub fn button(p: &Palette) -> Self {
        Self {
            normal: StateColorTable {
                rest: StateColors::new(p.control_fill, p.control_stroke, p.text_primary),
                hover: StateColors::new(p.control_fill_hover, p.control_stroke, p.text_primary),
                pressed: StateColors::new(p.control_fill_pressed, p.control_stroke, p.text_secondary),
                disabled: StateColors::new(
                    p.control_fill_disabled,
                    p.control_stroke,
                    p.text_disabled,
                ),
            },
            accent: Self::accent_table(p, p.accent_stroke),
        }
    }

    /// Check box and radio glyphs; accent is the checked state.
    pub fn check_box(p: &Palette) -> Self {
        Self {
            normal: StateColorTable {
                rest: StateColors::new(p.control_alt_fill, p.control_strong_stroke, p.text_primary),
                hover: StateColors::new(
                    p.control_alt_fill_hover,
                    p.control_strong_stroke,
                    p.text_primary,
                ),
                pressed: StateColors::new(
                    p.control_alt_fill_pressed,
                    p.control_strong_stroke_disabled,
                    p.text_primary,
                ),
                disabled: StateColors::new(
                    Color::transparent(),
                    p.control_strong_stroke_disabled,
                    p.text_disabled,
                ),
            },
            accent: {
                let mut table = Self::accent_table(p, Color::transparent());
                table.rest.text = p.text_primary;
                table.hover.text = p.text_primary;
                table.pressed.text = p.text_primary;
                table.disabled.text = p.text_disabled;
                table
            },
        }
    }

    pub fn radio(p: &Palette) -> Self {
        Self::check_box(p)
    }

    /// Toggle switch track; accent is "on".
    pub fn toggle_switch(p: &Palette) -> Self {
        Self::check_box(p)
    }

    /// Inner slider thumb; always looked up with `accent = true`.
    pub fn slider_thumb(p: &Palette) -> Self {
        let table = Self::accent_table(p, Color::transparent());
        Self {
            normal: table,
            accent: table,
        }
    }

    /// Text box chrome; accent is the focused state.
    pub fn text_box(p: &Palette) -> Self {
        let normal = StateColorTable {
            rest: StateColors::new(p.text_box_fill, p.control_stroke, p.text_primary),
            hover: StateColors::new(p.text_box_fill_hover, p.control_stroke, p.text_primary),
            pressed: StateColors::new(p.text_box_fill_hover, p.control_stroke, p.text_primary),
            disabled: StateColors::new(p.control_fill_disabled, p.control_stroke, p.text_disabled),
        };
        let focused = StateColors::new(p.text_box_fill_focused, p.control_stroke, p.text_primary);
        Self {
            normal,
            accent: StateColorTable {
                rest: focused,
                hover: focused,
                pressed: focused,
                disabled: normal.disabled,
            },
        }
    }
}

//! Resolved theme passed read-only into every frame.
//!
//! The renderer compares [`Theme::version`] against the last version it saw
//! to drop cached backend brushes after a mode or accent change.

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
    HighContrast,
}

/// Fluent color tokens for one mode/accent combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub control_fill: Color,
    pub control_fill_hover: Color,
    pub control_fill_pressed: Color,
    pub control_fill_disabled: Color,
    /// Unchecked check box / radio / toggle track
    pub control_alt_fill: Color,
    pub control_alt_fill_hover: Color,
    pub control_alt_fill_pressed: Color,

    pub accent_fill: Color,
    pub accent_fill_hover: Color,
    pub accent_fill_pressed: Color,
    pub accent_fill_disabled: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,
    pub text_on_accent: Color,
    pub text_on_accent_disabled: Color,

    /// Elevation gradient, lit edge
    pub control_stroke: Color,
    /// Elevation gradient, shaded edge
    pub control_stroke_secondary: Color,
    pub accent_stroke: Color,
    pub accent_stroke_secondary: Color,
    /// Outline of unchecked check boxes, radios and toggles
    pub control_strong_stroke: Color,
    pub control_strong_stroke_disabled: Color,

    pub slider_track: Color,
    pub slider_thumb_outer: Color,

    pub text_box_fill: Color,
    pub text_box_fill_hover: Color,
    pub text_box_fill_focused: Color,
    pub text_box_underline: Color,
    pub selection_fill: Color,

    pub scrollbar_thumb: Color,
    pub scrollbar_thumb_hover: Color,

    pub focus_stroke: Color,
    pub hover_overlay: Color,
    pub surface: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode, accent: Color) -> Self {
        match mode {
            ThemeMode::Light => Self::light(accent),
            ThemeMode::Dark => Self::dark(accent),
            ThemeMode::HighContrast => Self::high_contrast(),
        }
    }

    fn dark(accent: Color) -> Self {
        Self {
            control_fill: Color::from_argb(0x0FFF_FFFF),
            control_fill_hover: Color::from_argb(0x15FF_FFFF),
            control_fill_pressed: Color::from_argb(0x08FF_FFFF),
            control_fill_disabled: Color::from_argb(0x0BFF_FFFF),
            control_alt_fill: Color::from_argb(0x19000000),
            control_alt_fill_hover: Color::from_argb(0x0BFF_FFFF),
            control_alt_fill_pressed: Color::from_argb(0x12FF_FFFF),

            accent_fill: accent,
            accent_fill_hover: accent.scale_alpha(0.9),
            accent_fill_pressed: accent.scale_alpha(0.8),
            accent_fill_disabled: Color::from_argb(0x28FF_FFFF),

            text_primary: Color::from_argb(0xFFFF_FFFF),
            text_secondary: Color::from_argb(0xC5FF_FFFF),
            text_disabled: Color::from_argb(0x5DFF_FFFF),
            text_on_accent: Color::from_argb(0xFF00_0000),
            text_on_accent_disabled: Color::from_argb(0x87FF_FFFF),

            control_stroke: Color::from_argb(0x18FF_FFFF),
            control_stroke_secondary: Color::from_argb(0x12FF_FFFF),
            accent_stroke: Color::from_argb(0x14FF_FFFF),
            accent_stroke_secondary: Color::from_argb(0x24000000),
            control_strong_stroke: Color::from_argb(0x8BFF_FFFF),
            control_strong_stroke_disabled: Color::from_argb(0x28FF_FFFF),

            slider_track: Color::from_argb(0x8BFF_FFFF),
            slider_thumb_outer: Color::from_rgb_hex(0x454545),

            text_box_fill: Color::from_argb(0x0FFF_FFFF),
            text_box_fill_hover: Color::from_argb(0x15FF_FFFF),
            text_box_fill_focused: Color::from_argb(0xB31E_1E1E),
            text_box_underline: Color::from_argb(0x8BFF_FFFF),
            selection_fill: accent,

            scrollbar_thumb: Color::from_argb(0x8BFF_FFFF),
            scrollbar_thumb_hover: Color::from_argb(0xC5FF_FFFF),

            focus_stroke: Color::from_argb(0xFFFF_FFFF),
            hover_overlay: Color::from_argb(0x0AFF_FFFF),
            surface: Color::from_rgb_hex(0x202020),
        }
    }

    fn light(accent: Color) -> Self {
        Self {
            control_fill: Color::from_argb(0xB3FF_FFFF),
            control_fill_hover: Color::from_argb(0x80F9_F9F9),
            control_fill_pressed: Color::from_argb(0x4DF9_F9F9),
            control_fill_disabled: Color::from_argb(0x4DF9_F9F9),
            control_alt_fill: Color::from_argb(0x0500_0000),
            control_alt_fill_hover: Color::from_argb(0x0F00_0000),
            control_alt_fill_pressed: Color::from_argb(0x1800_0000),

            accent_fill: accent,
            accent_fill_hover: accent.scale_alpha(0.9),
            accent_fill_pressed: accent.scale_alpha(0.8),
            accent_fill_disabled: Color::from_argb(0x3700_0000),

            text_primary: Color::from_argb(0xE400_0000),
            text_secondary: Color::from_argb(0x9E00_0000),
            text_disabled: Color::from_argb(0x5C00_0000),
            text_on_accent: Color::from_argb(0xFFFF_FFFF),
            text_on_accent_disabled: Color::from_argb(0xFFFF_FFFF),

            control_stroke: Color::from_argb(0x0F00_0000),
            control_stroke_secondary: Color::from_argb(0x2900_0000),
            accent_stroke: Color::from_argb(0x14FF_FFFF),
            accent_stroke_secondary: Color::from_argb(0x6600_0000),
            control_strong_stroke: Color::from_argb(0x7200_0000),
            control_strong_stroke_disabled: Color::from_argb(0x3700_0000),

            slider_track: Color::from_argb(0x7200_0000),
            slider_thumb_outer: Color::from_rgb_hex(0xFFFFFF),

            text_box_fill: Color::from_argb(0xB3FF_FFFF),
            text_box_fill_hover: Color::from_argb(0x80F9_F9F9),
            text_box_fill_focused: Color::from_rgb_hex(0xFFFFFF),
            text_box_underline: Color::from_argb(0x7200_0000),
            selection_fill: accent,

            scrollbar_thumb: Color::from_argb(0x7200_0000),
            scrollbar_thumb_hover: Color::from_argb(0x9E00_0000),

            focus_stroke: Color::from_argb(0xE400_0000),
            hover_overlay: Color::from_argb(0x0600_0000),
            surface: Color::from_rgb_hex(0xF3F3F3),
        }
    }

    /// High contrast ignores the accent and uses system-style pairs.
    fn high_contrast() -> Self {
        let background = Color::black();
        let text = Color::white();
        let highlight = Color::from_rgb_hex(0x1AEBFF);
        let disabled = Color::from_rgb_hex(0x3FF23F);
        Self {
            control_fill: background,
            control_fill_hover: highlight,
            control_fill_pressed: highlight,
            control_fill_disabled: background,
            control_alt_fill: background,
            control_alt_fill_hover: background,
            control_alt_fill_pressed: background,

            accent_fill: highlight,
            accent_fill_hover: text,
            accent_fill_pressed: text,
            accent_fill_disabled: background,

            text_primary: text,
            text_secondary: text,
            text_disabled: disabled,
            text_on_accent: background,
            text_on_accent_disabled: disabled,

            control_stroke: text,
            control_stroke_secondary: text,
            accent_stroke: background,
            accent_stroke_secondary: background,
            control_strong_stroke: text,
            control_strong_stroke_disabled: disabled,

            slider_track: text,
            slider_thumb_outer: background,

            text_box_fill: background,
            text_box_fill_hover: background,
            text_box_fill_focused: background,
            text_box_underline: text,
            selection_fill: highlight,

            scrollbar_thumb: text,
            scrollbar_thumb_hover: highlight,

            focus_stroke: text,
            hover_overlay: Color::transparent(),
            surface: background,
        }
    }
}

/// Default accent, Fluent "Blue"
pub const DEFAULT_ACCENT: Color = Color::from_rgb_hex(0x0078D4);

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    mode: ThemeMode,
    accent: Color,
    palette: Palette,
    version: u64,
}

impl Theme {
    pub fn new(mode: ThemeMode, accent: Color) -> Self {
        Self {
            mode,
            accent,
            palette: Palette::for_mode(mode, accent),
            version: 0,
        }
    }

    pub fn light() -> Self {
        Self::new(ThemeMode::Light, DEFAULT_ACCENT)
    }

    pub fn dark() -> Self {
        Self::new(ThemeMode::Dark, DEFAULT_ACCENT)
    }

    pub fn high_contrast() -> Self {
        Self::new(ThemeMode::HighContrast, DEFAULT_ACCENT)
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Monotonic counter, bumped on every change
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_light(&self) -> bool {
        self.mode == ThemeMode::Light
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.rebuild();
    }

    pub fn set_accent(&mut self, accent: Color) {
        if accent == self.accent {
            return;
        }
        self.accent = accent;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.palette = Palette::for_mode(self.mode, self.accent);
        self.version += 1;
        log::debug!("theme changed to {:?}, version {}", self.mode, self.version);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

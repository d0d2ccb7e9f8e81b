//! Control metrics shared by rendering and hit-testing.
//!
//! One [`ControlMetrics`] value must be handed to both the renderer and the
//! input dispatcher so drawn and hit-tested geometry agree. Defaults follow
//! the Fluent control sizes; override fields with the generated `with_*`
//! builders.

use mica_gui_macros::WithBuilders;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct SliderMetrics {
    pub track_height: f32,
    /// Radius of the static outer thumb ring
    pub thumb_radius: f32,
    /// Inner thumb radius before the state scale is applied
    pub inner_thumb_radius: f32,
    pub normal_scale: f32,
    pub hover_scale: f32,
    pub pressed_scale: f32,
    /// Extra pointer tolerance around the thumb when starting a drag
    pub thumb_hit_slop: f32,
}

impl Default for SliderMetrics {
    fn default() -> Self {
        Self {
            track_height: 4.0,
            thumb_radius: 10.0,
            inner_thumb_radius: 7.0,
            normal_scale: 0.86,
            hover_scale: 1.0,
            pressed_scale: 0.71,
            thumb_hit_slop: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct CheckBoxMetrics {
    pub box_size: f32,
    /// Space between the box and the label
    pub gap: f32,
    pub corner_radius: f32,
    /// Box scale while pressed
    pub pressed_scale: f32,
}

impl Default for CheckBoxMetrics {
    fn default() -> Self {
        Self {
            box_size: 20.0,
            gap: 8.0,
            corner_radius: 4.0,
            pressed_scale: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct RadioMetrics {
    pub outer_size: f32,
    pub gap: f32,
    pub glyph_size: f32,
    pub glyph_hover_size: f32,
    pub glyph_pressed_size: f32,
    /// Dot shown while an unchecked radio is held down
    pub press_glyph_size: f32,
}

impl Default for RadioMetrics {
    fn default() -> Self {
        Self {
            outer_size: 20.0,
            gap: 8.0,
            glyph_size: 12.0,
            glyph_hover_size: 14.0,
            glyph_pressed_size: 10.0,
            press_glyph_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct ToggleMetrics {
    pub track_width: f32,
    pub track_height: f32,
    pub knob_size: f32,
    pub knob_hover_size: f32,
    /// Maximum knob elongation while pressed
    pub knob_press_stretch: f32,
    pub gap: f32,
}

impl Default for ToggleMetrics {
    fn default() -> Self {
        Self {
            track_width: 40.0,
            track_height: 20.0,
            knob_size: 12.0,
            knob_hover_size: 14.0,
            knob_press_stretch: 3.0,
            gap: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct TextBoxMetrics {
    pub padding_x: f32,
    pub padding_y: f32,
    pub caret_width: f32,
    pub caret_blink_interval: Duration,
    /// Accent underline thickness while focused
    pub focus_line_width: f32,
}

impl Default for TextBoxMetrics {
    fn default() -> Self {
        Self {
            padding_x: 10.0,
            padding_y: 6.0,
            caret_width: 1.0,
            caret_blink_interval: Duration::from_millis(530),
            focus_line_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct ScrollMetrics {
    pub bar_thickness: f32,
    /// Inset from the bar rectangle to its track
    pub track_padding: f32,
    pub min_thumb_length: f32,
    /// `Auto` bars appear once content exceeds the viewport by more than this
    pub auto_epsilon: f32,
}

impl Default for ScrollMetrics {
    fn default() -> Self {
        Self {
            bar_thickness: 12.0,
            track_padding: 3.0,
            min_thumb_length: 20.0,
            auto_epsilon: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct ButtonMetrics {
    /// Gap between control bounds and the focus ring
    pub focus_ring_offset: f32,
    pub focus_ring_width: f32,
    /// Length of the elevation gradient along the lit edge
    pub elevation_edge: f32,
}

impl Default for ButtonMetrics {
    fn default() -> Self {
        Self {
            focus_ring_offset: 2.0,
            focus_ring_width: 2.0,
            elevation_edge: 3.0,
        }
    }
}

/// Transition durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct AnimationTimings {
    pub color: f32,
    pub check: f32,
    pub press: f32,
    pub slider_thumb: f32,
    pub toggle: f32,
    pub hover_overlay: f32,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            color: 0.083,
            check: 0.2,
            press: 0.1,
            slider_thumb: 0.167,
            toggle: 0.2,
            hover_overlay: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct InputMetrics {
    /// DIPs scrolled per wheel notch
    pub wheel_speed: f32,
    /// Touch travel before a press turns into a pan
    pub touch_slop: f32,
    /// Arrow-key slider step as a fraction of the range, when `step` is 0
    pub keyboard_step_fraction: f32,
}

impl Default for InputMetrics {
    fn default() -> Self {
        Self {
            wheel_speed: 40.0,
            touch_slop: 8.0,
            keyboard_step_fraction: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, WithBuilders)]
pub struct ControlMetrics {
    pub slider: SliderMetrics,
    pub check_box: CheckBoxMetrics,
    pub radio: RadioMetrics,
    pub toggle: ToggleMetrics,
    pub text_box: TextBoxMetrics,
    pub scroll: ScrollMetrics,
    pub button: ButtonMetrics,
    pub timings: AnimationTimings,
    pub input: InputMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_override_nested_metrics() {
        let metrics = ControlMetrics::default()
            .with_input(InputMetrics::default().with_wheel_speed(60.0))
            .with_slider(SliderMetrics::default().with_track_height(6.0));
        assert_eq!(metrics.input.wheel_speed, 60.0);
        assert_eq!(metrics.slider.track_height, 6.0);
        assert_eq!(metrics.scroll, ScrollMetrics::default());
    }

    #[test]
    fn test_slider_scales_give_fluent_inner_sizes() {
        let s = SliderMetrics::default();
        let diameter = |scale: f32| 2.0 * s.inner_thumb_radius * scale;
        assert!((diameter(s.normal_scale) - 12.0).abs() < 0.1);
        assert!((diameter(s.hover_scale) - 14.0).abs() < 0.1);
        assert!((diameter(s.pressed_scale) - 10.0).abs() < 0.1);
    }
}

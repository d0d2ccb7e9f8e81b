//! Headless scripted session
//!
//! Builds a small form, feeds it a fixed sequence of pointer, wheel and
//! keyboard input, and renders into a recording surface after every step.
//! Virtual time advances by one 60 Hz frame at a time until animations
//! settle.
//!
//! Run with `RUST_LOG=debug` to see dispatcher and renderer logs.

use mica_gui::{
    ControlMetrics, DrawList, EventDispatcher, Key, ManualClock, Modifiers, MonospaceMeasurer,
    MouseButton, NamedKey, Point, PointerKind, Size, Theme, UiEvent, ViewData, WidgetKind,
    WidgetTree,
};
use mica_gui_controls::ControlRenderer;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);
const MAX_SETTLE_FRAMES: usize = 120;

struct Session {
    tree: WidgetTree,
    dispatcher: EventDispatcher,
    renderer: ControlRenderer,
    clock: ManualClock,
    theme: Theme,
    surface: DrawList,
}

impl Session {
    /// Render frames until nothing animates. Returns how many were drawn.
    fn settle(&mut self, step: &str) -> usize {
        let mut frames = 0;
        loop {
            self.surface.clear();
            let interaction = self.dispatcher.interaction(&self.tree);
            let outcome =
                self.renderer
                    .render_tree(&mut self.surface, &self.tree, &self.theme, &interaction);
            frames += 1;
            if !outcome.animating || frames >= MAX_SETTLE_FRAMES {
                break;
            }
            self.clock.advance(FRAME);
        }

        for event in self.dispatcher.drain_events() {
            if !matches!(event, UiEvent::HoverChanged { .. }) {
                log::info!("{step}: {event:?}");
            }
        }
        log::info!(
            "{step}: settled after {frames} frame(s), {} draw commands",
            self.surface.commands().len()
        );
        frames
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let metrics = ControlMetrics::default();
    let clock = ManualClock::new();
    let clicks = Rc::new(Cell::new(0));

    let mut tree = WidgetTree::new(ViewData::default().with_bounds(0.0, 0.0, 480.0, 360.0));
    let root = tree.root();

    let counter = clicks.clone();
    tree.append_child(
        root,
        ViewData::new(WidgetKind::Button)
            .with_bounds(20.0, 20.0, 120.0, 32.0)
            .with_text("Apply")
            .with_is_accent(true)
            .on_click(move || counter.set(counter.get() + 1)),
    )?;
    tree.append_child(
        root,
        ViewData::new(WidgetKind::CheckBox)
            .with_bounds(20.0, 64.0, 200.0, 32.0)
            .with_text("Enable sync"),
    )?;
    let slider = tree.append_child(
        root,
        ViewData::new(WidgetKind::Slider)
            .with_bounds(20.0, 108.0, 240.0, 32.0)
            .with_step(5.0)
            .on_value_changed(|value| log::info!("volume is now {value}")),
    )?;
    tree.append_child(
        root,
        ViewData::new(WidgetKind::TextBox)
            .with_bounds(20.0, 152.0, 240.0, 32.0)
            .with_placeholder("Device name")
            .on_text_changed(|text| log::info!("name is now {text:?}")),
    )?;
    let list = tree.append_child(
        root,
        ViewData::new(WidgetKind::ScrollView)
            .with_bounds(280.0, 20.0, 180.0, 200.0)
            .with_content_size(Size::new(160.0, 640.0)),
    )?;
    for row in 0..20 {
        tree.append_child(
            list,
            ViewData::new(WidgetKind::RadioButton)
                .with_bounds(0.0, row as f32 * 32.0, 160.0, 32.0)
                .with_text(format!("Channel {}", row + 1))
                .with_group_name("channel"),
        )?;
    }

    let mut session = Session {
        tree,
        dispatcher: EventDispatcher::new(metrics),
        renderer: ControlRenderer::new(metrics, MonospaceMeasurer::default())
            .with_clock(clock.clone()),
        clock,
        theme: Theme::dark(),
        surface: DrawList::new(1.0),
    };
    session.settle("initial");

    let mouse = PointerKind::Mouse;
    let left = MouseButton::Left;

    // Click the accent button
    let apply = Point::new(60.0, 36.0);
    session.dispatcher.pointer_move(&mut session.tree, apply, mouse);
    session
        .dispatcher
        .pointer_down(&mut session.tree, apply, left, mouse);
    session
        .dispatcher
        .pointer_up(&mut session.tree, apply, left, mouse);
    session.settle("button");

    // Toggle the check box
    let check = Point::new(30.0, 80.0);
    session
        .dispatcher
        .pointer_down(&mut session.tree, check, left, mouse);
    session
        .dispatcher
        .pointer_up(&mut session.tree, check, left, mouse);
    session.settle("check box");

    // Drag the slider thumb to the far end
    let thumb = Point::new(30.0, 124.0);
    session
        .dispatcher
        .pointer_down(&mut session.tree, thumb, left, mouse);
    for x in (40..=300).step_by(20) {
        session
            .dispatcher
            .pointer_move(&mut session.tree, Point::new(x as f32, 124.0), mouse);
    }
    session
        .dispatcher
        .pointer_up(&mut session.tree, Point::new(300.0, 124.0), left, mouse);
    session.settle("slider");
    if let Some(data) = session.tree.get(slider) {
        log::info!("slider value {}", data.value);
    }

    // Type into the text box
    let field = Point::new(100.0, 168.0);
    session
        .dispatcher
        .pointer_down(&mut session.tree, field, left, mouse);
    session
        .dispatcher
        .pointer_up(&mut session.tree, field, left, mouse);
    session.dispatcher.text_input(&mut session.tree, "Studio");
    session.dispatcher.key_down(
        &mut session.tree,
        &Key::Named(NamedKey::Backspace),
        Modifiers::default(),
    );
    session.settle("text box");

    // Scroll the list and pick a channel
    let over_list = Point::new(360.0, 120.0);
    session
        .dispatcher
        .wheel(&mut session.tree, Some(over_list), Point::new(0.0, 3.0));
    session
        .dispatcher
        .pointer_down(&mut session.tree, over_list, left, mouse);
    session
        .dispatcher
        .pointer_up(&mut session.tree, over_list, left, mouse);
    session.settle("scroll view");
    if let Some(data) = session.tree.get(list) {
        log::info!("list scrolled to {}", data.scroll_y);
    }

    // Keyboard focus traversal
    session
        .dispatcher
        .key_down(&mut session.tree, &Key::Named(NamedKey::Tab), Modifiers::default());
    session.settle("tab");

    log::info!("apply clicked {} time(s)", clicks.get());
    Ok(())
}

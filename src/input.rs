use egui::{Context, PointerButton, Pos2, Rect};

use crate::renderer::DrawingObserver;
use crate::state::EditorState;
use crate::surface::Point;

/// Pointer events in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed on the canvas
    PointerDown { position: Point },
    /// Pointer moved, with or without the button held
    PointerMove { position: Point },
    /// Primary button released after a press on the canvas
    PointerUp { position: Point },
    /// Pointer left the canvas
    PointerLeave,
}

/// Gesture lifecycle of the input controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// The newest committed drawable is still growing.
    Drawing,
}

impl EditorState {
    pub fn handle_event(&mut self, event: InputEvent, observer: &mut dyn DrawingObserver) {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position, observer),
            InputEvent::PointerMove { position } => self.pointer_move(position, observer),
            InputEvent::PointerUp { position } => self.pointer_up(position, observer),
            InputEvent::PointerLeave => self.pointer_leave(observer),
        }
    }

    /// Begin a gesture. The new drawable is committed right away so it shows
    /// while it grows.
    pub fn pointer_down(&mut self, position: Point, observer: &mut dyn DrawingObserver) {
        if self.gesture == Gesture::Drawing {
            log::warn!("pointer down while already drawing, ignored");
            return;
        }
        let drawable = self.tool.begin(position);
        log::debug!("gesture begin: {} at {position:?}", drawable.kind());
        self.history.commit(drawable);
        self.gesture = Gesture::Drawing;
        self.notify(observer);
    }

    pub fn pointer_move(&mut self, position: Point, observer: &mut dyn DrawingObserver) {
        if self.gesture == Gesture::Drawing {
            if let Some(drawable) = self.history.last_mut() {
                drawable.extend(position);
            }
        }
        self.preview = Some(self.tool.preview_at(position));
        self.notify(observer);
    }

    /// End the gesture. The drawable is final from here on.
    pub fn pointer_up(&mut self, _position: Point, observer: &mut dyn DrawingObserver) {
        if self.gesture != Gesture::Drawing {
            return;
        }
        self.gesture = Gesture::Idle;
        self.preview = None;

        if self.discard_degenerate_strokes
            && self
                .history
                .committed()
                .last()
                .is_some_and(|drawable| drawable.is_degenerate())
        {
            self.history.discard_last();
            log::debug!("gesture end: degenerate stroke discarded");
        } else {
            log::debug!("gesture end: {} committed", self.history.committed().len());
        }

        self.history.clear_redo();
        self.notify(observer);
    }

    /// Hide the preview when the pointer leaves the canvas. A live gesture
    /// only ends on pointer-up.
    pub fn pointer_leave(&mut self, observer: &mut dyn DrawingObserver) {
        if self.gesture == Gesture::Drawing || self.preview.is_none() {
            return;
        }
        self.preview = None;
        self.notify(observer);
    }
}

/// Turns raw egui input into [`InputEvent`]s for the canvas.
///
/// Raw events are walked in the order egui received them so a press, the
/// moves and the release of one frame keep their order.
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    pointer_inside: bool,
    primary_down: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            pointer_inside: false,
            primary_down: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn local(&self, pos: Pos2) -> Point {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Translate one raw egui event.
    pub fn translate(&mut self, event: &egui::Event, events: &mut Vec<InputEvent>) {
        match event {
            egui::Event::PointerMoved(pos) => {
                let inside = self.canvas_rect.contains(*pos);
                if inside || self.primary_down {
                    events.push(InputEvent::PointerMove {
                        position: self.local(*pos),
                    });
                } else if self.pointer_inside {
                    events.push(InputEvent::PointerLeave);
                }
                self.pointer_inside = inside;
            }
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed && !self.primary_down && self.canvas_rect.contains(*pos) {
                    self.primary_down = true;
                    events.push(InputEvent::PointerDown {
                        position: self.local(*pos),
                    });
                } else if !*pressed && self.primary_down {
                    self.primary_down = false;
                    events.push(InputEvent::PointerUp {
                        position: self.local(*pos),
                    });
                    if !self.canvas_rect.contains(*pos) {
                        events.push(InputEvent::PointerLeave);
                    }
                }
            }
            egui::Event::PointerGone => {
                if self.pointer_inside && !self.primary_down {
                    events.push(InputEvent::PointerLeave);
                }
                self.pointer_inside = false;
            }
            _ => {}
        }
    }

    /// Process this frame's raw egui input.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        ctx.input(|input| {
            for event in &input.raw.events {
                self.translate(event, &mut events);
            }
        });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SketchConfig;
    use crate::drawable::Drawable;
    use crate::renderer::Scene;
    use egui::{Modifiers, pos2, vec2};

    fn press(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_stamp_scenario() {
        let mut editor = EditorState::new(&SketchConfig::default());
        let mut ignore = |_: Scene<'_>| {};
        editor.select_sticker(1, &mut ignore);

        editor.pointer_down(pos2(10.0, 10.0), &mut ignore);
        editor.pointer_move(pos2(12.0, 10.0), &mut ignore);
        editor.pointer_move(pos2(25.0, 10.0), &mut ignore);
        editor.pointer_up(pos2(25.0, 10.0), &mut ignore);

        let committed = editor.history().committed();
        assert_eq!(committed.len(), 1);
        match &committed[0] {
            Drawable::StampTrail(trail) => {
                assert_eq!(trail.points(), &[pos2(10.0, 10.0), pos2(25.0, 10.0)]);
            }
            other => panic!("expected a stamp trail, got {other:?}"),
        }
    }

    #[test]
    fn test_idle_move_only_updates_preview() {
        let mut editor = EditorState::new(&SketchConfig::default());
        let mut calls = 0;
        editor.pointer_move(pos2(3.0, 3.0), &mut |_: Scene<'_>| calls += 1);
        assert_eq!(calls, 1);
        assert!(editor.history().committed().is_empty());
        assert!(editor.preview().is_some());
    }

    #[test]
    fn test_pointer_up_clears_preview_and_returns_to_idle() {
        let mut editor = EditorState::new(&SketchConfig::default());
        let mut ignore = |_: Scene<'_>| {};
        editor.pointer_down(pos2(0.0, 0.0), &mut ignore);
        editor.pointer_move(pos2(1.0, 1.0), &mut ignore);
        assert_eq!(editor.gesture(), Gesture::Drawing);
        assert!(editor.preview().is_some());

        editor.pointer_up(pos2(1.0, 1.0), &mut ignore);
        assert_eq!(editor.gesture(), Gesture::Idle);
        assert!(editor.preview().is_none());

        // The finished stroke no longer grows
        editor.pointer_move(pos2(9.0, 9.0), &mut ignore);
        assert_eq!(editor.history().committed()[0].points().len(), 2);
    }

    #[test]
    fn test_leave_hides_preview_only_when_idle() {
        let mut editor = EditorState::new(&SketchConfig::default());
        let mut ignore = |_: Scene<'_>| {};
        editor.pointer_down(pos2(0.0, 0.0), &mut ignore);
        editor.pointer_move(pos2(1.0, 1.0), &mut ignore);
        editor.pointer_leave(&mut ignore);
        assert!(editor.preview().is_some());

        editor.pointer_up(pos2(1.0, 1.0), &mut ignore);
        editor.pointer_move(pos2(2.0, 2.0), &mut ignore);
        editor.pointer_leave(&mut ignore);
        assert!(editor.preview().is_none());
    }

    #[test]
    fn test_degenerate_stroke_discarded_when_configured() {
        let config = SketchConfig {
            discard_degenerate_strokes: true,
            ..SketchConfig::default()
        };
        let mut editor = EditorState::new(&config);
        let mut ignore = |_: Scene<'_>| {};
        editor.pointer_down(pos2(5.0, 5.0), &mut ignore);
        editor.pointer_up(pos2(5.0, 5.0), &mut ignore);
        assert!(editor.history().committed().is_empty());
        assert!(!editor.history().can_redo());

        editor.select_sticker(0, &mut ignore);
        editor.pointer_down(pos2(5.0, 5.0), &mut ignore);
        editor.pointer_up(pos2(5.0, 5.0), &mut ignore);
        assert_eq!(editor.history().committed().len(), 1);
    }

    #[test]
    fn test_undo_mid_gesture_stops_growth() {
        let mut editor = EditorState::new(&SketchConfig::default());
        let mut ignore = |_: Scene<'_>| {};
        editor.pointer_down(pos2(0.0, 0.0), &mut ignore);
        editor.pointer_up(pos2(0.0, 0.0), &mut ignore);
        editor.pointer_down(pos2(1.0, 1.0), &mut ignore);
        editor.undo(&mut ignore);
        assert_eq!(editor.gesture(), Gesture::Idle);

        editor.pointer_move(pos2(2.0, 2.0), &mut ignore);
        assert_eq!(editor.history().committed()[0].points(), &[pos2(0.0, 0.0)]);
    }

    #[test]
    fn test_redo_mid_gesture_keeps_drawing() {
        let mut editor = EditorState::new(&SketchConfig::default());
        let mut calls = 0;
        let mut ignore = |_: Scene<'_>| {};
        editor.pointer_down(pos2(0.0, 0.0), &mut ignore);
        editor.pointer_move(pos2(5.0, 5.0), &mut ignore);

        editor.redo(&mut |_: Scene<'_>| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(editor.gesture(), Gesture::Drawing);
        assert!(editor.preview().is_some());

        editor.pointer_move(pos2(9.0, 9.0), &mut ignore);
        assert_eq!(
            editor.history().committed()[0].points(),
            &[pos2(0.0, 0.0), pos2(5.0, 5.0), pos2(9.0, 9.0)]
        );
    }

    #[test]
    fn test_clear_mid_gesture_ends_it() {
        let mut editor = EditorState::new(&SketchConfig::default());
        let mut ignore = |_: Scene<'_>| {};
        editor.pointer_down(pos2(0.0, 0.0), &mut ignore);
        editor.pointer_move(pos2(5.0, 5.0), &mut ignore);

        let mut seen = None;
        editor.clear_all(&mut |scene: Scene<'_>| {
            seen = Some((scene.drawables.len(), scene.preview.is_some()));
        });
        assert_eq!(seen, Some((0, false)));
        assert_eq!(editor.gesture(), Gesture::Idle);

        editor.pointer_move(pos2(9.0, 9.0), &mut ignore);
        assert!(editor.history().committed().is_empty());
        assert!(!editor.history().can_redo());
    }

    #[test]
    fn test_handler_orders_frame_events() {
        let rect = Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 200.0));
        let mut handler = InputHandler::new(rect);
        let mut events = Vec::new();
        for event in [
            egui::Event::PointerMoved(pos2(110.0, 60.0)),
            press(pos2(110.0, 60.0), true),
            egui::Event::PointerMoved(pos2(400.0, 60.0)),
            press(pos2(400.0, 60.0), false),
            egui::Event::PointerMoved(pos2(410.0, 60.0)),
        ] {
            handler.translate(&event, &mut events);
        }

        assert_eq!(
            events,
            vec![
                InputEvent::PointerMove { position: pos2(10.0, 10.0) },
                InputEvent::PointerDown { position: pos2(10.0, 10.0) },
                InputEvent::PointerMove { position: pos2(300.0, 10.0) },
                InputEvent::PointerUp { position: pos2(300.0, 10.0) },
                InputEvent::PointerLeave,
            ]
        );
    }

    #[test]
    fn test_handler_ignores_press_outside_canvas() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(50.0, 50.0));
        let mut handler = InputHandler::new(rect);
        let mut events = Vec::new();
        handler.translate(&press(pos2(80.0, 10.0), true), &mut events);
        handler.translate(&press(pos2(80.0, 10.0), false), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_handler_reports_leave() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(50.0, 50.0));
        let mut handler = InputHandler::new(rect);
        let mut events = Vec::new();
        handler.translate(&egui::Event::PointerMoved(pos2(10.0, 10.0)), &mut events);
        handler.translate(&egui::Event::PointerMoved(pos2(90.0, 10.0)), &mut events);
        assert_eq!(events.last(), Some(&InputEvent::PointerLeave));
    }
}

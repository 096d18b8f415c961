use egui::{Color32, pos2, vec2};
use noted::surface::{RecordingSurface, SurfaceOp};
use noted::{Drawable, EditorState, InputEvent, Scene, SketchConfig, renderer};

// Observer that repaints a recording surface, like the on-screen renderer does
struct Recorder {
    surface: RecordingSurface,
    repaints: usize,
}

impl Recorder {
    fn new() -> Self {
        Self {
            surface: RecordingSurface::new(vec2(256.0, 256.0)),
            repaints: 0,
        }
    }
}

impl noted::DrawingObserver for Recorder {
    fn drawing_changed(&mut self, scene: Scene<'_>) {
        renderer::redraw(&mut self.surface, scene);
        self.repaints += 1;
    }
}

fn draw_stroke(editor: &mut EditorState, recorder: &mut Recorder, from: f32, to: f32) {
    editor.pointer_down(pos2(from, from), recorder);
    editor.pointer_move(pos2(to, to), recorder);
    editor.pointer_up(pos2(to, to), recorder);
}

#[test]
fn test_committed_count_matches_gestures() {
    let mut editor = EditorState::new(&SketchConfig::default());
    let mut recorder = Recorder::new();

    for i in 0..4 {
        editor.pointer_down(pos2(i as f32, 0.0), &mut recorder);
        for step in 0..i {
            editor.pointer_move(pos2(i as f32, step as f32 * 3.0), &mut recorder);
        }
        editor.pointer_up(pos2(0.0, 0.0), &mut recorder);
        assert_eq!(editor.history().committed().len(), i + 1);
        assert!(editor.history().redo_buffer().is_empty());
    }
}

#[test]
fn test_undo_twice_then_clear() {
    let mut editor = EditorState::new(&SketchConfig::default());
    let mut recorder = Recorder::new();
    for i in 0..3 {
        draw_stroke(&mut editor, &mut recorder, i as f32 * 10.0, i as f32 * 10.0 + 5.0);
    }

    editor.undo(&mut recorder);
    editor.undo(&mut recorder);
    assert_eq!(editor.history().committed().len(), 1);
    assert_eq!(editor.history().redo_buffer().len(), 2);

    editor.clear_all(&mut recorder);
    assert!(editor.history().committed().is_empty());
    assert!(editor.history().redo_buffer().is_empty());

    let repaints = recorder.repaints;
    editor.redo(&mut recorder);
    assert!(editor.history().committed().is_empty());
    assert_eq!(recorder.repaints, repaints, "no-op redo does not repaint");
}

#[test]
fn test_new_gesture_after_undo_drops_redo() {
    let mut editor = EditorState::new(&SketchConfig::default());
    let mut recorder = Recorder::new();
    draw_stroke(&mut editor, &mut recorder, 0.0, 5.0);
    draw_stroke(&mut editor, &mut recorder, 10.0, 15.0);
    editor.undo(&mut recorder);
    assert!(editor.history().can_redo());

    editor.pointer_down(pos2(50.0, 50.0), &mut recorder);
    assert!(!editor.history().can_redo());
    editor.pointer_up(pos2(50.0, 50.0), &mut recorder);

    editor.redo(&mut recorder);
    assert_eq!(editor.history().committed().len(), 2);
}

#[test]
fn test_undo_redo_round_trip_restores_stacks() {
    let mut editor = EditorState::new(&SketchConfig::default());
    let mut recorder = Recorder::new();
    draw_stroke(&mut editor, &mut recorder, 0.0, 5.0);
    draw_stroke(&mut editor, &mut recorder, 10.0, 15.0);
    editor.undo(&mut recorder);

    let committed = editor.history().committed().to_vec();
    let redo = editor.history().redo_buffer().to_vec();
    editor.undo(&mut recorder);
    editor.redo(&mut recorder);
    assert_eq!(editor.history().committed(), committed.as_slice());
    assert_eq!(editor.history().redo_buffer(), redo.as_slice());
}

#[test]
fn test_partial_stroke_visible_while_drawing() {
    let mut editor = EditorState::new(&SketchConfig::default());
    let mut recorder = Recorder::new();

    editor.pointer_down(pos2(0.0, 0.0), &mut recorder);
    editor.pointer_move(pos2(4.0, 4.0), &mut recorder);

    let visible = recorder.surface.visible_ops();
    assert!(
        visible
            .iter()
            .any(|op| matches!(op, SurfaceOp::Polyline { points, .. } if points.len() == 2))
    );
    // Pen tip preview on top
    assert!(matches!(visible.last(), Some(SurfaceOp::Circle { .. })));
}

#[test]
fn test_single_point_stroke_leaves_no_mark() {
    let mut editor = EditorState::new(&SketchConfig::default());
    let mut recorder = Recorder::new();
    editor.pointer_down(pos2(8.0, 8.0), &mut recorder);
    editor.pointer_up(pos2(8.0, 8.0), &mut recorder);

    assert_eq!(editor.history().committed().len(), 1);
    assert!(matches!(recorder.surface.visible_ops(), [SurfaceOp::Clear(_)]));
}

#[test]
fn test_stamp_trail_spacing_through_events() {
    let mut editor = EditorState::new(&SketchConfig::default());
    let mut recorder = Recorder::new();
    editor.select_sticker(0, &mut recorder);

    let events = [
        InputEvent::PointerDown { position: pos2(10.0, 10.0) },
        InputEvent::PointerMove { position: pos2(12.0, 10.0) },
        InputEvent::PointerMove { position: pos2(25.0, 10.0) },
        InputEvent::PointerMove { position: pos2(30.0, 14.0) },
        InputEvent::PointerMove { position: pos2(30.0, 21.0) },
        InputEvent::PointerUp { position: pos2(30.0, 21.0) },
    ];
    for event in events {
        editor.handle_event(event, &mut recorder);
    }

    let Drawable::StampTrail(trail) = &editor.history().committed()[0] else {
        panic!("expected a stamp trail");
    };
    assert_eq!(trail.color(), noted::tools::PREVIEW_COLOR);
    assert_eq!(
        trail.points(),
        &[pos2(10.0, 10.0), pos2(25.0, 10.0), pos2(30.0, 21.0)]
    );
    for pair in trail.points().windows(2) {
        let close_x = (pair[1].x - pair[0].x).abs() <= trail.spacing();
        let close_y = (pair[1].y - pair[0].y).abs() <= trail.spacing();
        assert!(!(close_x && close_y));
    }

    let glyphs = recorder
        .surface
        .visible_ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Glyph { .. }))
        .count();
    assert_eq!(glyphs, 3);
}

#[test]
fn test_strokes_keep_their_own_color() {
    let mut editor = EditorState::with_seed(&SketchConfig::default(), 3);
    let mut recorder = Recorder::new();
    draw_stroke(&mut editor, &mut recorder, 0.0, 5.0);
    editor.select_pen(noted::Pen::Thick, &mut recorder);
    draw_stroke(&mut editor, &mut recorder, 10.0, 15.0);

    let strokes: Vec<&noted::Stroke> = editor
        .history()
        .committed()
        .iter()
        .filter_map(|drawable| match drawable {
            Drawable::Stroke(stroke) => Some(stroke),
            Drawable::StampTrail(_) => None,
        })
        .collect();
    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[0].color(), Color32::WHITE);
    assert_eq!(strokes[0].thickness(), SketchConfig::default().start_thickness);
    assert_eq!(strokes[1].color(), editor.tool().color());
    assert_eq!(strokes[1].thickness(), 2.5);

    let drawn: Vec<Color32> = recorder
        .surface
        .visible_ops()
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::Polyline { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(drawn, vec![strokes[0].color(), strokes[1].color()]);
}

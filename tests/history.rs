use egui::{Color32, Pos2};
use inkverse::history::SnapshotHistory;
use inkverse::session::EditorSession;

fn draw_stroke(session: &mut EditorSession, from: Pos2, to: Pos2) {
    session.pointer_down(from);
    session.pointer_move(to);
    session.pointer_up();
}

#[test]
fn undo_then_redo_restores_the_exact_composite() {
    let mut session = EditorSession::new(64, 64);
    draw_stroke(&mut session, Pos2::new(5.0, 5.0), Pos2::new(40.0, 40.0));
    let drawn = session.composite().clone();

    assert!(session.undo());
    assert_ne!(session.composite(), &drawn);

    assert!(session.redo());
    // pixel-identical to the state immediately before the undo
    assert_eq!(session.composite(), &drawn);
}

#[test]
fn capture_after_undo_truncates_the_redo_branch() {
    let mut session = EditorSession::new(32, 32);
    draw_stroke(&mut session, Pos2::new(2.0, 2.0), Pos2::new(20.0, 2.0));
    draw_stroke(&mut session, Pos2::new(2.0, 10.0), Pos2::new(20.0, 10.0));
    // baseline + two strokes
    assert_eq!(session.history().len(), 3);

    assert!(session.undo());
    assert_eq!(session.history().cursor(), Some(1));

    draw_stroke(&mut session, Pos2::new(2.0, 20.0), Pos2::new(20.0, 20.0));
    // the branch past the cursor was discarded before appending
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.history().cursor(), Some(2));
    assert!(!session.redo());
}

#[test]
fn undo_stops_at_the_baseline_entry() {
    let mut session = EditorSession::new(16, 16);
    assert!(!session.undo());
    draw_stroke(&mut session, Pos2::new(2.0, 2.0), Pos2::new(10.0, 10.0));
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.composite().pixel(6, 6), Color32::WHITE);
}

#[test]
fn redo_is_a_noop_at_the_newest_entry() {
    let mut session = EditorSession::new(16, 16);
    assert!(!session.redo());
    draw_stroke(&mut session, Pos2::new(2.0, 2.0), Pos2::new(10.0, 10.0));
    assert!(!session.redo());
}

#[test]
fn clearing_the_active_layer_is_undoable() {
    let mut session = EditorSession::new(32, 32);
    draw_stroke(&mut session, Pos2::new(4.0, 4.0), Pos2::new(28.0, 28.0));
    let drawn = session.composite().clone();

    session.clear_active_layer();
    assert_eq!(session.composite().pixel(16, 16), Color32::WHITE);

    assert!(session.undo());
    assert_eq!(session.composite(), &drawn);
}

#[test]
fn every_stroke_appends_one_entry() {
    let mut session = EditorSession::new(16, 16);
    for i in 0..5 {
        draw_stroke(
            &mut session,
            Pos2::new(1.0, i as f32 * 3.0),
            Pos2::new(14.0, i as f32 * 3.0),
        );
    }
    // baseline + five strokes; the sequence is unbounded by design
    assert_eq!(session.history().len(), 6);
}

#[test]
fn empty_history_has_no_cursor_and_ignores_stepping() {
    let mut history = SnapshotHistory::new();
    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

use std::thread;
use std::time::Duration;

use tuiloop::{AppContext, Application, ConfigError, Handler, RuntimeConfig, RuntimeError};
use tuitree::widgets::{Frame, Label, Panel};
use tuitree::{
    ControlEvent, ControlId, DrawingContext, KeyCode, KeyEvent, KeyModifiers, Layout, Measurable,
    MemoryConsole, Orientation, PaintScope, Paintable, Point, Widget,
};

fn app() -> Application<MemoryConsole> {
    Application::new(MemoryConsole::new(20, 6), RuntimeConfig::new()).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// A framed window holding two focusable labels.
fn open_window(cx: &mut AppContext) -> (ControlId, ControlId, ControlId) {
    let window = Frame::new("main").create(&mut cx.tree).unwrap();
    cx.tree.set_width(window, Some(10)).unwrap();
    cx.tree.set_height(window, Some(2)).unwrap();
    let column = cx
        .tree
        .create_container(Panel::new(), Layout::Stack(Orientation::Vertical));
    cx.tree.add_content(window, column).unwrap();
    let a = cx.tree.create(Label::new("first").tab_stop(0));
    let b = cx.tree.create(Label::new("second").tab_stop(0));
    cx.tree.add_content(column, a).unwrap();
    cx.tree.add_content(column, b).unwrap();
    cx.show_window(window).unwrap();
    (window, a, b)
}

#[derive(Default)]
struct Recorder {
    events: Vec<ControlEvent>,
}

impl Handler for Recorder {
    fn on_key(&mut self, cx: &mut AppContext, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('q') {
            if let Some(top) = cx.top_window() {
                cx.close_window(top).unwrap();
            }
            return true;
        }
        false
    }

    fn on_control_event(&mut self, _cx: &mut AppContext, event: ControlEvent) {
        self.events.push(event);
    }
}

// ============================================================================
// Windows
// ============================================================================

#[test]
fn test_show_window_focuses_first_control() {
    let mut app = app();
    let (_, a, _) = open_window(app.context_mut());

    assert_eq!(app.context().focus.focused(), Some(a));
    app.tick(&mut Recorder::default()).unwrap();
    assert_eq!(app.console().row_text(0), "┌─ main ───┐        ");
    assert_eq!(app.console().row_text(1), "│first     │        ");
}

#[test]
fn test_closing_last_window_stops_loop() {
    let mut app = app();
    let (window, _, _) = open_window(app.context_mut());
    app.console_mut().push_key(key(KeyCode::Char('q')));

    app.run(&mut Recorder::default()).unwrap();

    let cx = app.context();
    assert!(!cx.is_running());
    assert!(cx.windows().is_empty());
    assert!(!cx.tree.contains(window));
    assert_eq!(cx.tree.len(), 1);
    assert_eq!(cx.focus.focused(), None);
}

#[test]
fn test_closing_unknown_window_fails() {
    let mut app = app();
    let stray = app.context_mut().tree.create(Label::new("x"));
    let result = app.context_mut().close_window(stray);
    assert!(matches!(result, Err(RuntimeError::Tree(_))));
    assert!(app.context().is_running());
}

#[test]
fn test_failed_close_keeps_window_open() {
    let mut app = app();
    let cx = app.context_mut();
    let (window, _, _) = open_window(cx);
    let desktop = cx.desktop();
    cx.tree.remove_content(desktop, window).unwrap();

    assert!(cx.close_window(window).is_err());
    assert_eq!(cx.windows(), &[window]);
    assert!(cx.tree.contains(window));
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_tab_moves_focus_within_top_window() {
    let mut app = app();
    let (_, a, b) = open_window(app.context_mut());
    let mut recorder = Recorder::default();

    app.console_mut().push_key(key(KeyCode::Tab));
    assert!(app.tick(&mut recorder).unwrap());
    assert_eq!(app.context().focus.focused(), Some(b));

    app.console_mut().push_key(key(KeyCode::BackTab));
    assert!(app.tick(&mut recorder).unwrap());
    assert_eq!(app.context().focus.focused(), Some(a));

    assert_eq!(
        recorder.events,
        vec![
            ControlEvent::FocusEnter(a),
            ControlEvent::FocusLeave(a),
            ControlEvent::FocusEnter(b),
            ControlEvent::FocusLeave(b),
            ControlEvent::FocusEnter(a),
        ]
    );
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn test_actions_from_other_threads_run_on_next_tick() {
    let mut app = app();
    let (_, a, _) = open_window(app.context_mut());
    let sender = app.context().sender();

    thread::spawn(move || {
        sender.post(move |cx| {
            Label::set_text(&mut cx.tree, a, "posted").unwrap();
        });
    })
    .join()
    .unwrap();

    app.tick(&mut Recorder::default()).unwrap();
    assert_eq!(app.console().row_text(1), "│posted    │        ");
}

#[test]
fn test_stop_from_action_ends_loop() {
    let mut app = app();
    open_window(app.context_mut());
    app.context().sender().post(|cx| cx.stop());

    assert!(!app.tick(&mut Recorder::default()).unwrap());
}

#[test]
fn test_process_pending_is_reentrant() {
    let mut app = app();
    app.context().post(|cx| {
        cx.post(|cx| cx.stop());
        assert_eq!(cx.process_pending(), 1);
    });

    assert_eq!(app.context_mut().process_pending(), 1);
    assert!(!app.context().is_running());
}

// ============================================================================
// Errors and configuration
// ============================================================================

struct Exploding;

impl Measurable for Exploding {}

impl Paintable for Exploding {
    fn on_paint(&self, _ctx: &mut DrawingContext, _scope: &PaintScope<'_>) -> tuitree::Result<()> {
        panic!("boom");
    }
}

impl Widget for Exploding {}

#[test]
fn test_paint_panic_becomes_error() {
    let mut app = app();
    let cx = app.context_mut();
    let bomb = cx.tree.create(Exploding);
    cx.tree.set_width(bomb, Some(3)).unwrap();
    cx.tree.set_height(bomb, Some(1)).unwrap();
    cx.tree.set_position(bomb, Point::new(2, 2)).unwrap();
    cx.show_window(bomb).unwrap();

    let result = app.tick(&mut Recorder::default());

    match result {
        Err(RuntimeError::PaintPanicked { message }) => assert_eq!(message, "boom"),
        other => panic!("expected a paint panic, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = RuntimeConfig::new().poll_timeout(Duration::ZERO);
    let result = Application::new(MemoryConsole::new(4, 4), config);
    assert!(matches!(
        result,
        Err(RuntimeError::Config(ConfigError::ZeroPollTimeout))
    ));
}

#[test]
fn test_cursor_visibility_follows_config() {
    let app = app();
    assert!(!app.console().cursor_visible());

    let config = RuntimeConfig::new().cursor_visible(true);
    let app = Application::new(MemoryConsole::new(4, 4), config).unwrap();
    assert!(app.console().cursor_visible());
}

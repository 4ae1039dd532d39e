// Example: Desktop
//
// One framed window on a canvas desktop:
// - Grid layout with separator lines
// - Tab / Shift+Tab focus cycling between labels
// - A background thread posting clock updates through the action queue
// - "q" closes the window, which ends the loop
//
// Set TUILOOP_LOG_FILE to capture logs (the terminal itself is in use).

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tuiloop::{AppContext, Application, Handler, RuntimeConfig, init_logging};
use tuitree::widgets::{Frame, Label, Panel};
use tuitree::{
    Color, ControlId, CrosstermConsole, GridCell, GridDefinition, KeyCode, KeyEvent, Layout, Point,
    TrackSize,
};

struct Desktop;

impl Handler for Desktop {
    fn on_key(&mut self, cx: &mut AppContext, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                if let Some(top) = cx.top_window() {
                    if let Err(e) = cx.close_window(top) {
                        log::error!("close failed: {e}");
                        cx.stop();
                    }
                }
                true
            }
            _ => false,
        }
    }
}

fn build_window(cx: &mut AppContext) -> tuiloop::Result<ControlId> {
    let window = Frame::new("tuiloop").create(&mut cx.tree)?;
    cx.tree.set_position(window, Point::new(2, 1))?;
    cx.tree.set_width(window, Some(40))?;
    cx.tree.set_height(window, Some(5))?;

    let grid = GridDefinition::new()
        .columns([TrackSize::Percent(40), TrackSize::AutoSize])
        .rows([TrackSize::Absolute(1), TrackSize::Absolute(1)])
        .with_lines();
    let body = cx.tree.create_container(Panel::new(), Layout::Grid(grid));
    cx.tree.add_content(window, body)?;

    let cells = [
        (Label::new("clock"), GridCell::new(0, 0)),
        (Label::new("--").tab_stop(0), GridCell::new(0, 1)),
        (Label::new("keys"), GridCell::new(1, 0)),
        (Label::new("tab, q").tab_stop(0), GridCell::new(1, 1)),
    ];
    let mut clock = None;
    for (label, cell) in cells {
        let id = cx.tree.create(label);
        cx.tree.set_grid_cell(id, cell)?;
        cx.tree.add_content(body, id)?;
        if cell == GridCell::new(0, 1) {
            clock = Some(id);
        }
    }

    cx.show_window(window)?;
    Ok(clock.unwrap_or(window))
}

fn seconds_since_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn main() -> tuiloop::Result<()> {
    let config = RuntimeConfig::from_env()?.colors(Color::DarkBlue, Color::White);
    init_logging(&config)?;

    let mut app = Application::new(CrosstermConsole::new()?, config)?;
    let clock = build_window(app.context_mut())?;

    let sender = app.context().sender();
    thread::spawn(move || {
        loop {
            let now = seconds_since_epoch();
            let posted = sender.post(move |cx| {
                let text = format!("{:02}:{:02}:{:02}", now / 3600 % 24, now / 60 % 60, now % 60);
                if cx.tree.contains(clock) {
                    if let Err(e) = Label::set_text(&mut cx.tree, clock, text) {
                        log::warn!("clock update failed: {e}");
                    }
                }
            });
            if !posted {
                break;
            }
            thread::sleep(Duration::from_secs(1));
        }
    });

    app.run(&mut Desktop)
}

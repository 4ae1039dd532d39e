//! Application context and the event loop.

use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{debug, info, warn};
use tuitree::widgets::Panel;
use tuitree::{
    Console, ControlEvent, ControlId, ControlTree, Error as TreeError, FocusState, FrameStats,
    KeyCode, KeyEvent, Layout, Renderer,
};

use crate::config::RuntimeConfig;
use crate::error::{extract_panic_message, Result, RuntimeError};
use crate::queue::{self, ActionQueue, ActionSender};

/// Everything loop callbacks may touch: the control tree, focus, the
/// window stack and the action queue.
///
/// The tree's root is a canvas-laid-out desktop that fills the screen;
/// windows are its children, later ones on top.
pub struct AppContext {
    pub tree: ControlTree,
    pub focus: FocusState,
    desktop: ControlId,
    windows: Vec<ControlId>,
    running: bool,
    sender: ActionSender,
    queue: ActionQueue,
}

impl AppContext {
    pub fn new() -> Result<Self> {
        let mut tree = ControlTree::new();
        let desktop = tree.create_container(Panel::new(), Layout::Canvas);
        tree.set_auto_size(desktop, false)?;
        tree.set_root(desktop)?;
        let (sender, queue) = queue::channel();
        Ok(Self {
            tree,
            focus: FocusState::new(),
            desktop,
            windows: Vec::new(),
            running: true,
            sender,
            queue,
        })
    }

    /// The root control.
    pub fn desktop(&self) -> ControlId {
        self.desktop
    }

    /// Open windows, bottom first.
    pub fn windows(&self) -> &[ControlId] {
        &self.windows
    }

    pub fn top_window(&self) -> Option<ControlId> {
        self.windows.last().copied()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// A handle other threads use to post actions.
    pub fn sender(&self) -> ActionSender {
        self.sender.clone()
    }

    /// Queue an action from the loop thread itself.
    pub fn post(&self, action: impl FnOnce(&mut AppContext) + Send + 'static) {
        self.sender.post(action);
    }

    /// Put a detached control on the desktop as the new top window and move
    /// focus into it.
    pub fn show_window(&mut self, window: ControlId) -> Result<()> {
        self.tree.add_content(self.desktop, window)?;
        self.windows.push(window);
        info!("window {window:?} opened ({} open)", self.windows.len());
        self.focus.blur(&mut self.tree)?;
        self.focus.focus_next(&mut self.tree, window)?;
        Ok(())
    }

    /// Remove and destroy a window. Closing the last one stops the loop.
    pub fn close_window(&mut self, window: ControlId) -> Result<()> {
        let Some(index) = self.windows.iter().position(|w| *w == window) else {
            let message = format!("{window:?} is not an open window");
            return Err(TreeError::InvariantViolation(message).into());
        };
        self.tree.remove_content(self.desktop, window)?;
        self.windows.remove(index);
        self.focus.forget_detached(&self.tree);
        self.tree.destroy(window)?;
        info!("window {window:?} closed ({} open)", self.windows.len());

        match self.top_window() {
            Some(top) => {
                if self.focus.focused().is_none() {
                    self.focus.focus_next(&mut self.tree, top)?;
                }
            }
            None => self.stop(),
        }
        Ok(())
    }

    /// Move focus forward within the top window.
    pub fn focus_next(&mut self) -> Result<Option<ControlId>> {
        match self.top_window() {
            Some(top) => Ok(self.focus.focus_next(&mut self.tree, top)?),
            None => Ok(None),
        }
    }

    /// Move focus backward within the top window.
    pub fn focus_prev(&mut self) -> Result<Option<ControlId>> {
        match self.top_window() {
            Some(top) => Ok(self.focus.focus_prev(&mut self.tree, top)?),
            None => Ok(None),
        }
    }

    /// Run every queued action, including ones queued while draining.
    ///
    /// Safe to call from inside an action. Returns how many actions ran.
    pub fn process_pending(&mut self) -> usize {
        let mut count = 0;
        while let Some(action) = self.queue.try_next() {
            action(self);
            count += 1;
        }
        count
    }
}

/// Host callbacks for the loop.
pub trait Handler {
    /// Handle a key press. Return true to consume it; unconsumed Tab and
    /// Shift+Tab move focus.
    fn on_key(&mut self, cx: &mut AppContext, key: KeyEvent) -> bool {
        let _ = (cx, key);
        false
    }

    /// Focus notifications, delivered after the key that caused them.
    fn on_control_event(&mut self, cx: &mut AppContext, event: ControlEvent) {
        let _ = (cx, event);
    }
}

/// A console, a renderer and an [`AppContext`] driven by one loop.
pub struct Application<C: Console> {
    console: C,
    renderer: Renderer,
    context: AppContext,
    config: RuntimeConfig,
}

impl<C: Console> Application<C> {
    pub fn new(mut console: C, config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        console.set_cursor_visible(config.cursor_visible)?;
        Ok(Self {
            console,
            renderer: Renderer::new(config.colors),
            context: AppContext::new()?,
            config,
        })
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Render one frame, turning a panicking paint callback into an error.
    pub fn render(&mut self) -> Result<FrameStats> {
        let renderer = &mut self.renderer;
        let tree = &mut self.context.tree;
        let console = &mut self.console;
        match catch_unwind(AssertUnwindSafe(|| renderer.render_frame(tree, console))) {
            Ok(stats) => Ok(stats?),
            Err(panic) => {
                let message = extract_panic_message(panic.as_ref());
                warn!("paint panicked: {message}");
                Err(RuntimeError::PaintPanicked { message })
            }
        }
    }

    /// One loop iteration: drain actions, render, wait for a key, dispatch.
    ///
    /// Returns false once the loop should stop.
    pub fn tick(&mut self, handler: &mut impl Handler) -> Result<bool> {
        self.context.process_pending();
        if !self.context.is_running() {
            return Ok(false);
        }

        self.render()?;

        if self.console.key_available(self.config.poll_timeout)? {
            if let Some(key) = self.console.read_key()? {
                self.dispatch_key(handler, key)?;
            }
        }
        for event in self.context.tree.take_events() {
            handler.on_control_event(&mut self.context, event);
        }
        Ok(self.context.is_running())
    }

    /// Run until the last window closes or a callback stops the loop.
    pub fn run(&mut self, handler: &mut impl Handler) -> Result<()> {
        info!("event loop started");
        while self.tick(handler)? {}
        info!("event loop stopped");
        Ok(())
    }

    fn dispatch_key(&mut self, handler: &mut impl Handler, key: KeyEvent) -> Result<()> {
        if handler.on_key(&mut self.context, key) {
            return Ok(());
        }
        match key.code {
            KeyCode::Tab => {
                self.context.focus_next()?;
            }
            KeyCode::BackTab => {
                self.context.focus_prev()?;
            }
            _ => debug!("unhandled key {key:?}"),
        }
        Ok(())
    }
}

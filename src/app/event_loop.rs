use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Size;

use crate::app::{App, InputTracker, Message, Model, update};
use crate::editor::GridEditor;

/// Fixed-rate tick schedule on a millisecond clock.
///
/// When the loop falls behind, missed ticks are dropped rather than replayed.
pub(super) struct TickClock {
    interval_ms: u64,
    next_due_ms: u64,
}

impl TickClock {
    pub(super) fn new(interval: Duration) -> Self {
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX).max(1);
        Self {
            interval_ms,
            next_due_ms: interval_ms,
        }
    }

    /// Returns true once per elapsed interval.
    pub(super) const fn take_due(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms += self.interval_ms;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + self.interval_ms;
        }
        true
    }

    /// How long to wait for input before the next tick is due.
    pub(super) const fn wait_ms(&self, now_ms: u64) -> u64 {
        self.next_due_ms.saturating_sub(now_ms)
    }
}

/// Run `restore` if `result` is an error, so the terminal is usable again
/// before the error is reported.
pub(super) fn restore_on_err<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the map holds unknown tiles, or if terminal
    /// initialization or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Build the session before touching the terminal so load errors print cleanly
        let editor = GridEditor::new(&self.map, self.options)
            .with_context(|| format!("Failed to open map {}", self.map_name))?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - tilevim requires an interactive terminal")?;
        let (size, reports_release) =
            restore_on_err(Self::prepare_terminal(&terminal), ratatui::restore)?;
        tracing::info!(
            map = %self.map_name,
            width = size.width,
            height = size.height,
            reports_release,
            "terminal ready"
        );

        let mut model = Model::new(editor, self.map_name.clone(), (size.width, size.height));
        model.status_visible = self.status_visible;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        let result = Self::event_loop(
            &mut terminal,
            model,
            InputTracker::new(reports_release),
            TickClock::new(self.tick_interval),
        );

        // Restore terminal
        if reports_release && let Err(err) = execute!(stdout(), PopKeyboardEnhancementFlags) {
            tracing::warn!(%err, "failed to pop keyboard enhancement flags");
        }
        ratatui::restore();

        let model = result?;
        tracing::info!(ticks = model.tick_count, "session closed");
        Ok(())
    }

    /// Query the terminal size and enable key release reporting if the
    /// terminal supports it.
    fn prepare_terminal(terminal: &DefaultTerminal) -> Result<(Size, bool)> {
        let size = terminal.size().context("Failed to query terminal size")?;

        let reports_release = matches!(
            crossterm::terminal::supports_keyboard_enhancement(),
            Ok(true)
        );
        if reports_release {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .context("Failed to enable keyboard enhancement")?;
        }
        Ok((size, reports_release))
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        mut model: Model,
        mut tracker: InputTracker,
        mut clock: TickClock,
    ) -> Result<Model> {
        let start = Instant::now();
        let now_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        loop {
            if model.needs_render {
                terminal.draw(|frame| Self::view(&model, frame))?;
                model.needs_render = false;
            }

            // Handle events until the next tick is due
            let wait = Duration::from_millis(clock.wait_ms(now_ms()));
            if event::poll(wait)? {
                if let Some(msg) = Self::handle_event(&event::read()?, &model, &mut tracker) {
                    tracing::debug!(?msg, "message");
                    model = update(model, msg);
                }
                while event::poll(Duration::ZERO)? {
                    if let Some(msg) = Self::handle_event(&event::read()?, &model, &mut tracker) {
                        tracing::debug!(?msg, "message");
                        model = update(model, msg);
                    }
                }
            }

            if clock.take_due(now_ms()) {
                let keys = tracker.end_tick();
                model = update(model, Message::Tick(keys));
            }

            if model.should_quit {
                break;
            }
        }
        Ok(model)
    }
}

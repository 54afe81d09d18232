use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::text::Line;
use throbber_widgets_tui::ThrobberState;

use super::UiConfig;
use super::event::AppEvent;
use super::input::QueryInput;
use super::preview::{PreviewLoaded, PreviewWorker};
use super::theme::Theme;
use crate::Result;
use crate::search::{Debouncer, ResultSet, SearchController, SearchSession};

const PREVIEW_PAGE: u16 = 5;

/// Whether the event loop should keep going after an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Quit,
}

/// File currently shown in the preview pane.
#[derive(Debug)]
pub(crate) struct Preview {
	pub(crate) path: PathBuf,
	pub(crate) lines: Option<Vec<Line<'static>>>,
	pub(crate) scroll: u16,
}

impl Preview {
	fn max_scroll(&self) -> u16 {
		let lines = self.lines.as_ref().map_or(0, Vec::len);
		u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
	}

	fn scroll_down(&mut self, amount: u16) {
		self.scroll = self.scroll.saturating_add(amount).min(self.max_scroll());
	}

	fn scroll_up(&mut self, amount: u16) {
		self.scroll = self.scroll.saturating_sub(amount);
	}
}

/// Interactive search state.
pub struct App {
	pub(crate) controller: SearchController,
	pub(crate) results: ResultSet,
	pub(crate) input: QueryInput,
	pub(crate) cursor: usize,
	pub(crate) preview: Option<Preview>,
	pub(crate) awaiting_debounce: bool,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) theme: Theme,
	previews: PreviewWorker,
	events_tx: Sender<AppEvent>,
	events_rx: Receiver<AppEvent>,
}

impl App {
	pub fn new(config: &UiConfig) -> Result<Self> {
		let (events_tx, events_rx) = mpsc::channel();
		let session = SearchSession::new(&config.search, events_tx.clone())?;
		let debouncer = Debouncer::new(config.debounce, events_tx.clone());
		let controller = SearchController::new(config.root.clone(), session, debouncer);
		let results = ResultSet::new(controller.session().result_cap());
		let previews = PreviewWorker::spawn(events_tx.clone())?;

		let mut app = Self {
			controller,
			results,
			input: QueryInput::new(config.max_query_len),
			cursor: 0,
			preview: None,
			awaiting_debounce: false,
			throbber_state: ThrobberState::default(),
			theme: Theme::default(),
			previews,
			events_tx,
			events_rx,
		};

		for ch in config.initial_query.chars() {
			app.input.insert(ch);
		}
		if !app.input.is_empty() {
			let query = app.input.value().to_string();
			if let Some(id) = app.controller.start_now(&query) {
				app.results.begin(id);
			}
		}

		Ok(app)
	}

	/// Sender for feeding events into this app from other threads.
	#[must_use]
	pub fn events(&self) -> Sender<AppEvent> {
		self.events_tx.clone()
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		self.controller.root()
	}

	#[must_use]
	pub fn query(&self) -> &str {
		self.input.value()
	}

	#[must_use]
	pub fn results(&self) -> &ResultSet {
		&self.results
	}

	#[must_use]
	pub fn selected(&self) -> Option<&Path> {
		self.results.paths().get(self.cursor).map(PathBuf::as_path)
	}

	#[must_use]
	pub fn is_previewing(&self) -> bool {
		self.preview.is_some()
	}

	/// `true` from the keystroke until the summary of the resulting search.
	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.awaiting_debounce || self.results.is_searching()
	}

	pub(crate) fn tick(&mut self) {
		if self.is_searching() {
			self.throbber_state.calc_next();
		}
	}

	/// Handle every event that is already queued without blocking.
	pub fn pump_events(&mut self) -> Flow {
		loop {
			match self.events_rx.try_recv() {
				Ok(event) => {
					if self.handle_event(event) == Flow::Quit {
						return Flow::Quit;
					}
				}
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => return Flow::Continue,
			}
		}
	}

	pub(crate) fn recv_timeout(&self, timeout: std::time::Duration) -> Option<AppEvent> {
		self.events_rx.recv_timeout(timeout).ok()
	}

	pub fn handle_event(&mut self, event: AppEvent) -> Flow {
		match event {
			AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
				return self.handle_key(key);
			}
			AppEvent::Input(_) => {}
			AppEvent::Search(event) => {
				if self.results.apply(event) {
					self.clamp_cursor();
				}
			}
			AppEvent::Debounce(fired) => {
				if let Some(id) = self.controller.on_debounce_fired(fired) {
					self.awaiting_debounce = false;
					self.results.begin(id);
					self.cursor = 0;
				}
			}
			AppEvent::Preview(loaded) => self.apply_preview(loaded),
		}
		Flow::Continue
	}

	pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Char('c') if ctrl => return self.quit(),
			KeyCode::Esc => {
				if self.preview.take().is_none() {
					return self.quit();
				}
			}
			KeyCode::Down => self.move_down(1),
			KeyCode::Up => self.move_up(1),
			KeyCode::PageDown => self.scroll_preview_down(),
			KeyCode::Char('d') if ctrl => self.scroll_preview_down(),
			KeyCode::PageUp => self.scroll_preview_up(),
			KeyCode::Char('u') if ctrl => self.scroll_preview_up(),
			KeyCode::Enter => self.open_preview(),
			_ if self.is_previewing() => {}
			_ => self.edit_query(key),
		}
		Flow::Continue
	}

	fn quit(&mut self) -> Flow {
		self.controller.cancel_current();
		Flow::Quit
	}

	fn move_down(&mut self, amount: u16) {
		match &mut self.preview {
			Some(preview) => preview.scroll_down(amount),
			None => {
				if self.cursor + 1 < self.results.len() {
					self.cursor += 1;
				}
			}
		}
	}

	fn move_up(&mut self, amount: u16) {
		match &mut self.preview {
			Some(preview) => preview.scroll_up(amount),
			None => self.cursor = self.cursor.saturating_sub(1),
		}
	}

	fn scroll_preview_down(&mut self) {
		if let Some(preview) = &mut self.preview {
			preview.scroll_down(PREVIEW_PAGE);
		}
	}

	fn scroll_preview_up(&mut self) {
		if let Some(preview) = &mut self.preview {
			preview.scroll_up(PREVIEW_PAGE);
		}
	}

	fn open_preview(&mut self) {
		if self.is_previewing() {
			return;
		}
		let Some(path) = self.selected().map(Path::to_path_buf) else {
			return;
		};
		let is_file = fs::metadata(&path).is_ok_and(|meta| !meta.is_dir());
		if !is_file {
			return;
		}

		self.previews.request(path.clone());
		self.preview = Some(Preview {
			path,
			lines: None,
			scroll: 0,
		});
	}

	fn apply_preview(&mut self, loaded: PreviewLoaded) {
		if let Some(preview) = &mut self.preview
			&& preview.path == loaded.path
			&& preview.lines.is_none()
		{
			preview.lines = Some(loaded.lines);
		}
	}

	fn edit_query(&mut self, key: KeyEvent) {
		let changed = match key.code {
			KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
				self.input.insert(ch)
			}
			KeyCode::Backspace => self.input.backspace(),
			KeyCode::Delete => self.input.delete(),
			KeyCode::Left => {
				self.input.move_left();
				false
			}
			KeyCode::Right => {
				self.input.move_right();
				false
			}
			KeyCode::Home => {
				self.input.move_home();
				false
			}
			KeyCode::End => {
				self.input.move_end();
				false
			}
			_ => false,
		};

		if changed {
			self.query_changed();
		}
	}

	fn query_changed(&mut self) {
		let query = self.input.value().to_string();
		self.controller.on_query_changed(&query);
		if query.is_empty() {
			self.awaiting_debounce = false;
			self.results.clear();
			self.cursor = 0;
		} else {
			self.awaiting_debounce = true;
		}
	}

	fn clamp_cursor(&mut self) {
		self.cursor = self.cursor.min(self.results.len().saturating_sub(1));
	}

	pub(crate) fn shutdown(&self) {
		self.controller.cancel_current();
	}
}

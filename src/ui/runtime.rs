use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use ratatui::DefaultTerminal;
use ratatui::crossterm::event;

use super::event::AppEvent;
use super::state::Flow;
use super::{App, UiConfig};
use crate::Result;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Run the interactive finder until the user quits.
pub fn run(config: UiConfig) -> Result<()> {
	let mut app = App::new(&config)?;
	let mut terminal = ratatui::init();
	let result = terminal
		.clear()
		.map_err(Into::into)
		.and_then(|()| app.run(&mut terminal));
	ratatui::restore();
	app.shutdown();
	result
}

impl App {
	/// Pump the event channel and redraw until a key asks to quit.
	pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
		let input_running = Arc::new(AtomicBool::new(true));
		let input_flag = Arc::clone(&input_running);
		let input_tx = self.events();

		let input_thread = thread::spawn(move || -> std::io::Result<()> {
			while input_flag.load(Ordering::Relaxed) {
				if event::poll(INPUT_POLL)? {
					let event = event::read()?;
					if input_tx.send(AppEvent::Input(event)).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let result = self.event_loop(terminal);

		input_running.store(false, Ordering::Relaxed);
		match input_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		result
	}

	fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
		loop {
			self.tick();
			terminal.draw(|frame| self.draw(frame))?;

			if let Some(event) = self.recv_timeout(FRAME_INTERVAL)
				&& self.handle_event(event) == Flow::Quit
			{
				return Ok(());
			}
			if self.pump_events() == Flow::Quit {
				return Ok(());
			}
		}
	}
}

use ratatui::style::{Color, Modifier, Style};

/// Colours used by the terminal front end.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	pub title: Style,
	pub result: Style,
	pub selected: Style,
	pub border: Style,
	pub prompt: Style,
	pub empty: Style,
}

impl Theme {
	#[must_use]
	pub fn title_style(&self) -> Style {
		self.title
	}

	#[must_use]
	pub fn result_style(&self) -> Style {
		self.result
	}

	#[must_use]
	pub fn selected_style(&self) -> Style {
		self.selected
	}

	#[must_use]
	pub fn border_style(&self) -> Style {
		self.border
	}

	#[must_use]
	pub fn prompt_style(&self) -> Style {
		self.prompt
	}

	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			title: Style::new()
				.fg(Color::Indexed(205))
				.add_modifier(Modifier::BOLD),
			result: Style::new().fg(Color::Indexed(86)),
			selected: Style::new()
				.fg(Color::Rgb(0x12, 0x34, 0x56))
				.bg(Color::Rgb(0x66, 0x66, 0x66))
				.add_modifier(Modifier::BOLD),
			border: Style::new().fg(Color::Indexed(62)),
			prompt: Style::new().fg(Color::Indexed(205)),
			empty: Style::new().fg(Color::DarkGray),
		}
	}
}

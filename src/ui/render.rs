use ratatui::{
	Frame,
	layout::{Constraint, Direction, Layout, Position, Rect},
	text::{Line, Span, Text},
	widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use super::format::format_result_path;
use super::{App, VISIBLE_RESULTS};

const TITLE: &str = "File Finder";
const PROMPT: &str = "> ";
const PLACEHOLDER: &str = "Type to search...";

impl App {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(1),
				Constraint::Length(1),
				Constraint::Length(1),
				Constraint::Length(1),
				Constraint::Min(3),
				Constraint::Length(1),
			])
			.split(frame.area());

		frame.render_widget(
			Paragraph::new(Span::styled(TITLE, self.theme.title_style())),
			layout[0],
		);
		self.render_input(frame, layout[2]);

		let body = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
			.split(layout[4]);
		self.render_results(frame, body[0]);
		self.render_preview(frame, body[1]);

		frame.render_widget(
			Paragraph::new(Span::styled(self.help_line(), self.theme.empty_style())),
			layout[5],
		);
	}

	fn render_input(&self, frame: &mut Frame, area: Rect) {
		let prompt = Span::styled(PROMPT, self.theme.prompt_style());
		let line = if self.input.is_empty() {
			Line::from(vec![
				prompt,
				Span::styled(PLACEHOLDER, self.theme.empty_style()),
			])
		} else {
			Line::from(vec![prompt, Span::raw(self.input.value())])
		};
		frame.render_widget(Paragraph::new(line), area);

		if !self.is_previewing() {
			let before_cursor: String = self
				.input
				.value()
				.chars()
				.take(self.input.cursor())
				.collect();
			let offset = (PROMPT.width() + before_cursor.width()) as u16;
			let x = area
				.x
				.saturating_add(offset)
				.min(area.right().saturating_sub(1));
			frame.set_cursor_position(Position::new(x, area.y));
		}
	}

	fn render_results(&self, frame: &mut Frame, area: Rect) {
		let lines = self.result_lines(area.width as usize, area.height as usize);
		frame.render_widget(Paragraph::new(lines), area);
	}

	pub(crate) fn result_lines(&self, width: usize, height: usize) -> Vec<Line<'_>> {
		let mut lines = Vec::new();
		let found = self.results.len();

		if self.is_searching() {
			let mut header = Line::default();
			header.spans.push(Throbber::default().to_symbol_span(&self.throbber_state));
			header.spans.push(Span::raw(format!("Searching... {found} found")));
			lines.push(header);
		} else if found > 0 {
			lines.push(Line::from(format!("Found {found} results:")));
		} else if !self.input.is_empty() {
			lines.push(Line::styled("No results found", self.theme.empty_style()));
			return lines;
		} else {
			return lines;
		}

		let rows = VISIBLE_RESULTS.min(height.saturating_sub(2)).max(1);
		let start = (self.cursor + 1).saturating_sub(rows);
		let end = (start + rows).min(found);
		let path_width = width.saturating_sub(2);
		for (index, path) in self.results.paths()[start..end].iter().enumerate() {
			let selected = start + index == self.cursor;
			let (prefix, style) = if selected {
				("> ", self.theme.selected_style())
			} else {
				("  ", self.theme.result_style())
			};
			let text = format_result_path(path, self.root(), path_width);
			lines.push(Line::styled(format!("{prefix}{text}"), style));
		}
		if found > end {
			lines.push(Line::styled(
				format!("  ... and {} more", found - end),
				self.theme.empty_style(),
			));
		}

		lines
	}

	fn render_preview(&self, frame: &mut Frame, area: Rect) {
		let Some(preview) = &self.preview else {
			frame.render_widget(
				Paragraph::new(Span::styled(
					"  Press Enter to preview file",
					self.theme.empty_style(),
				)),
				area,
			);
			return;
		};

		let title = format_result_path(
			&preview.path,
			self.root(),
			area.width.saturating_sub(4) as usize,
		);
		let block = Block::default()
			.borders(Borders::ALL)
			.border_type(BorderType::Rounded)
			.border_style(self.theme.border_style())
			.title(title);
		let content = match &preview.lines {
			Some(lines) => Text::from(lines.clone()),
			None => Text::raw("Loading..."),
		};
		let paragraph = Paragraph::new(content)
			.block(block)
			.wrap(Wrap { trim: false })
			.scroll((preview.scroll, 0));
		frame.render_widget(paragraph, area);
	}

	fn help_line(&self) -> String {
		let esc = if self.is_previewing() {
			"close preview"
		} else {
			"quit"
		};
		format!("Esc: {esc} | ↑/↓: navigate | Enter: preview")
	}
}

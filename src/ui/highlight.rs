//! Syntax highlighting for previews.
//!
//! bat picks the syntax from the file name and renders ANSI-coloured text,
//! which is converted back into ratatui spans here.

use std::io::Cursor;
use std::path::Path;

use bat::assets::HighlightingAssets;
use bat::config::{Config, VisibleLines};
use bat::controller::Controller;
use bat::input::Input;
use bat::line_range::LineRanges;
use bat::style::StyleComponents;
use log::debug;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const THEME: &str = "OneHalfDark";
/// Longest preview rendered; anything beyond is cut with a marker line.
pub const MAX_PREVIEW_LINES: usize = 5_000;
const TRUNCATED: &str = "... (truncated)";

/// Owns bat's syntax and theme sets, which are expensive to load.
pub struct Highlighter {
	assets: HighlightingAssets,
}

impl Highlighter {
	pub fn new() -> Self {
		Self {
			assets: HighlightingAssets::from_binary(),
		}
	}

	/// Highlight `content` using the syntax matching `path`. Falls back to
	/// unstyled lines when bat cannot render it.
	pub fn highlight(&self, path: &Path, content: &str) -> Vec<Line<'static>> {
		let config = Config {
			colored_output: true,
			true_color: true,
			style_components: StyleComponents::default(),
			theme: THEME.to_string(),
			visible_lines: VisibleLines::Ranges(LineRanges::all()),
			term_width: 120,
			tab_width: 4,
			..Default::default()
		};
		let controller = Controller::new(&config, &self.assets);
		let input = Input::from_reader(Box::new(Cursor::new(content.to_string())))
			.with_name(Some(path));

		let mut rendered = String::new();
		match controller.run(vec![input], Some(&mut rendered)) {
			Ok(true) => collect_lines(rendered.lines().map(parse_ansi_line)),
			Ok(false) => {
				debug!("bat reported errors while highlighting {}", path.display());
				plain_lines(content)
			}
			Err(err) => {
				debug!("highlighting {} failed: {err}", path.display());
				plain_lines(content)
			}
		}
	}
}

impl Default for Highlighter {
	fn default() -> Self {
		Self::new()
	}
}

/// Unstyled lines of `content`, cut at [`MAX_PREVIEW_LINES`].
pub fn plain_lines(content: &str) -> Vec<Line<'static>> {
	collect_lines(content.lines().map(|line| Line::raw(line.to_string())))
}

fn collect_lines(lines: impl Iterator<Item = Line<'static>>) -> Vec<Line<'static>> {
	let mut collected: Vec<Line<'static>> = lines.take(MAX_PREVIEW_LINES + 1).collect();
	if collected.len() > MAX_PREVIEW_LINES {
		collected.truncate(MAX_PREVIEW_LINES);
		collected.push(Line::raw(TRUNCATED));
	}
	collected
}

/// Split one line of SGR-coloured text into styled spans.
fn parse_ansi_line(line: &str) -> Line<'static> {
	let mut spans = Vec::new();
	let mut text = String::new();
	let mut style = Style::default();
	let mut chars = line.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch != '\x1b' {
			text.push(ch);
			continue;
		}
		if !text.is_empty() {
			spans.push(Span::styled(std::mem::take(&mut text), style));
		}
		if chars.next_if_eq(&'[').is_none() {
			continue;
		}
		let mut params = String::new();
		while let Some(c) = chars.next_if(|c| c.is_ascii_digit() || *c == ';') {
			params.push(c);
		}
		// Only SGR sequences carry styling; others are dropped.
		if chars.next() == Some('m') {
			style = apply_sgr(&params, style);
		}
	}

	if !text.is_empty() {
		spans.push(Span::styled(text, style));
	}
	Line::from(spans)
}

fn apply_sgr(params: &str, mut style: Style) -> Style {
	let codes: Vec<u16> = params
		.split(';')
		.map(|code| code.parse().unwrap_or(0))
		.collect();
	let mut codes = codes.into_iter();

	while let Some(code) = codes.next() {
		style = match code {
			0 => Style::default(),
			1 => style.add_modifier(Modifier::BOLD),
			2 => style.add_modifier(Modifier::DIM),
			3 => style.add_modifier(Modifier::ITALIC),
			4 => style.add_modifier(Modifier::UNDERLINED),
			22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
			23 => style.remove_modifier(Modifier::ITALIC),
			24 => style.remove_modifier(Modifier::UNDERLINED),
			30..=37 => style.fg(Color::Indexed((code - 30) as u8)),
			90..=97 => style.fg(Color::Indexed((code - 90 + 8) as u8)),
			40..=47 => style.bg(Color::Indexed((code - 40) as u8)),
			100..=107 => style.bg(Color::Indexed((code - 100 + 8) as u8)),
			39 => style.fg(Color::Reset),
			49 => style.bg(Color::Reset),
			38 => match extended_color(&mut codes) {
				Some(color) => style.fg(color),
				None => style,
			},
			48 => match extended_color(&mut codes) {
				Some(color) => style.bg(color),
				None => style,
			},
			_ => style,
		};
	}
	style
}

/// Read the `5;N` or `2;R;G;B` tail of a 38/48 sequence.
fn extended_color(codes: &mut impl Iterator<Item = u16>) -> Option<Color> {
	let channel = |value: u16| u8::try_from(value).ok();
	match codes.next()? {
		5 => Some(Color::Indexed(channel(codes.next()?)?)),
		2 => {
			let r = channel(codes.next()?)?;
			let g = channel(codes.next()?)?;
			let b = channel(codes.next()?)?;
			Some(Color::Rgb(r, g, b))
		}
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn text(line: &Line<'_>) -> String {
		line.spans.iter().map(|span| span.content.as_ref()).collect()
	}

	#[test]
	fn truecolor_sequences_become_span_styles() {
		let line = parse_ansi_line("\x1b[38;2;1;2;3mfn\x1b[0m main\x1b[1;38;5;42m!");
		assert_eq!(line.spans.len(), 3);
		assert_eq!(line.spans[0].content, "fn");
		assert_eq!(line.spans[0].style.fg, Some(Color::Rgb(1, 2, 3)));
		assert_eq!(line.spans[1].content, " main");
		assert_eq!(line.spans[1].style, Style::default());
		assert_eq!(line.spans[2].style.fg, Some(Color::Indexed(42)));
		assert!(line.spans[2].style.add_modifier.contains(Modifier::BOLD));
	}

	#[test]
	fn rust_sources_are_coloured_by_extension() {
		let highlighter = Highlighter::new();
		let lines = highlighter.highlight(Path::new("main.rs"), "fn main() {}\n");

		assert!(text(&lines[0]).contains("fn main() {}"));
		assert!(lines[0].spans.iter().any(|span| span.style.fg.is_some()));
	}

	#[test]
	fn long_content_is_truncated_with_a_marker() {
		let content = "x\n".repeat(MAX_PREVIEW_LINES + 10);
		let lines = plain_lines(&content);

		assert_eq!(lines.len(), MAX_PREVIEW_LINES + 1);
		assert_eq!(lines.last().map(text).as_deref(), Some(TRUNCATED));
	}
}

use std::path::Path;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Render `path` relative to `root` and keep its tail when it is wider than
/// `max_width` columns, prefixing the result with `...`.
#[must_use]
pub fn format_result_path(path: &Path, root: &Path, max_width: usize) -> String {
	let relative = path.strip_prefix(root).unwrap_or(path);
	let display = relative.display().to_string();
	if display.width() <= max_width {
		return display;
	}

	let budget = max_width.saturating_sub(ELLIPSIS.len());
	let mut used = 0;
	let mut start = display.len();
	for (index, ch) in display.char_indices().rev() {
		let width = ch.width().unwrap_or(0);
		if used + width > budget {
			break;
		}
		used += width;
		start = index;
	}

	format!("{ELLIPSIS}{}", &display[start..])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_paths_are_shown_relative_to_root() {
		let formatted = format_result_path(Path::new("/work/src/lib.rs"), Path::new("/work"), 40);
		assert_eq!(formatted, "src/lib.rs");
	}

	#[test]
	fn long_paths_keep_their_tail() {
		let formatted = format_result_path(
			Path::new("/work/very/deeply/nested/file.rs"),
			Path::new("/work"),
			12,
		);
		assert_eq!(formatted, "...d/file.rs");
		assert_eq!(formatted.width(), 12);
	}

	#[test]
	fn wide_characters_are_measured_by_columns() {
		let formatted = format_result_path(Path::new("数据/文件.txt"), Path::new("/elsewhere"), 9);
		assert!(formatted.starts_with(ELLIPSIS));
		assert!(formatted.width() <= 9);
		assert!(formatted.ends_with(".txt"));
	}
}

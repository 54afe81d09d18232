use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

/// Trim and deduplicate directory names, dropping empty entries.
pub(super) fn sanitize_dir_names(values: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut cleaned = Vec::new();
	for value in values {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			continue;
		}
		if seen.insert(trimmed.to_string()) {
			cleaned.push(trimmed.to_string());
		}
	}
	cleaned
}

/// Shorten `path` with `~` when it lives under the home directory.
pub(super) fn display_root(path: &Path) -> String {
	if let Some(home_os) = env::var_os("HOME") {
		let home = PathBuf::from(home_os);
		if let Ok(rel) = path.strip_prefix(&home) {
			if rel.components().next().is_none() {
				return "~".to_string();
			}
			let sep = std::path::MAIN_SEPARATOR;
			return format!("~{}{}", sep, rel.display());
		}
	}
	path.display().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dir_names_are_cleaned_and_deduplicated() {
		let cleaned = sanitize_dir_names(vec![
			" target ".into(),
			"target".into(),
			"".into(),
			"dist".into(),
		]);
		assert_eq!(cleaned, vec!["target", "dist"]);
	}

	#[test]
	fn paths_outside_home_are_unchanged() {
		let path = Path::new("/definitely/not/home/project");
		let shown = display_root(path);
		assert!(shown.ends_with("project"));
	}
}

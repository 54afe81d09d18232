use anyhow::Result;

use crate::workflow::HeadlessOutcome;

/// Print one matching path per line followed by a summary line.
pub(crate) fn print_plain(outcome: &HeadlessOutcome) {
	for path in &outcome.matches {
		println!("{path}");
	}
	if outcome.total == 0 {
		println!("No results found");
	} else {
		println!("Found {} results", outcome.total);
	}
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &HeadlessOutcome) -> Result<String> {
	Ok(serde_json::to_string_pretty(outcome)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &HeadlessOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

// src/report.rs
// =============================================================================
// Renders the sorted visits, either as one text line per URL or as JSON.
// Input order is kept as-is: sorting already happened in the dispatcher.
// =============================================================================

use anyhow::Result;

use crate::fetch::Visit;

// "<url> <n> bytes", plus "(<error>)" when the visit failed
pub fn format_visit(visit: &Visit) -> String {
    match &visit.error {
        Some(error) => format!("{} {} bytes ({})", visit.url, visit.body_size, error),
        None => format!("{} {} bytes", visit.url, visit.body_size),
    }
}

pub fn render_text(visits: &[Visit]) -> String {
    visits
        .iter()
        .map(|visit| format_visit(visit) + "\n")
        .collect()
}

pub fn render_json(visits: &[Visit]) -> Result<String> {
    Ok(serde_json::to_string_pretty(visits)?)
}

/// Prints the visits to stdout
pub fn print_results(visits: &[Visit], json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(visits)?);
    } else {
        print!("{}", render_text(visits));
    }
    Ok(())
}

//! Terminal formatting for status results

use crate::status::{PollError, PollerStats, Recommendation, StatusPayload};
use colored::Colorize;
use std::fmt::Write;

fn priority_label(priority: &str) -> colored::ColoredString {
    match priority.to_uppercase().as_str() {
        "HIGH" => priority.red().bold(),
        "MEDIUM" => priority.yellow(),
        "LOW" => priority.green(),
        _ => priority.normal(),
    }
}

fn format_recommendation(output: &mut String, rec: &Recommendation) {
    writeln!(output, "  [{}] {}", priority_label(&rec.priority), rec.message).unwrap();
    if !rec.action.is_empty() {
        writeln!(output, "        {}", rec.action.dimmed()).unwrap();
    }
}

/// Format one poll result as human-readable text.
pub fn format_status(result: &Result<StatusPayload, PollError>) -> String {
    let mut output = String::new();

    match result {
        Ok(payload) if payload.success => {
            writeln!(output, "Environment: {}", "OK".green()).unwrap();
            let recs = payload.recommendations();
            if !recs.is_empty() {
                writeln!(output, "Recommendations:").unwrap();
                for rec in &recs {
                    format_recommendation(&mut output, rec);
                }
            }
        }
        Ok(_) => {
            writeln!(output, "Environment: {}", "reported failure".yellow()).unwrap();
        }
        Err(e) => {
            writeln!(output, "Environment: {} ({})", "unavailable".red(), e).unwrap();
        }
    }

    output
}

/// Format poller counters.
pub fn format_stats(stats: &PollerStats) -> String {
    let last = stats
        .last_poll_time
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "Polls: {} ({} failed), last at {}",
        stats.cycles, stats.failures, last
    )
}

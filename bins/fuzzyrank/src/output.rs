//! Terminal output for ranked results

use fuzzyrank_search::{RankStats, SearchResult};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::time::Duration;

/// Print ranked records as numbered lines
pub fn print_results(results: &[SearchResult<Value>], show_scores: bool) {
    if results.is_empty() {
        eprintln!("{} {}", "⚠".yellow(), "No matching records");
        return;
    }

    let width = results.len().to_string().len();
    for (position, result) in results.iter().enumerate() {
        let rank = format!("{:>width$}.", position + 1, width = width);
        if show_scores {
            println!(
                "{} {} {} {}",
                rank.dimmed(),
                format!("{:>7.2}", result.score).green(),
                result.matched_fields.join(",").cyan(),
                result.item
            );
        } else {
            println!("{} {}", rank.dimmed(), result.item);
        }
    }
}

/// Print a one-line summary of a ranking pass to stderr
pub fn print_summary(stats: &RankStats, elapsed: Duration) {
    eprintln!(
        "{} {} of {} records matched, {} shown ({})",
        "ℹ".blue(),
        stats.matches,
        stats.candidates,
        stats.returned,
        format_duration(elapsed)
    );
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros < 1_000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1_000.0)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration(Duration::from_micros(12_300)), "12.3ms");
        assert_eq!(format_duration(Duration::from_millis(2_500)), "2.50s");
    }
}

//! Display formatting for aggregate metrics and the election news feed.

use nation_proto::ElectionResult;

/// Percentage with one decimal, e.g. `73.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Proportional bar width for a percentage metric. Deliberately not
/// clamped: a value above 100 overflows the bar, which is accepted
/// behavior, not an error. Renderers may clamp for display.
pub fn bar_width(value: f64) -> f64 {
    value
}

/// Currency with two decimals, e.g. `$1000.00`.
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Styling class of a news entry. `Alert` (a freshly elected leader)
/// takes precedence over `Social` for styling, but not for the line
/// format, which depends only on the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsTone {
    Alert,
    Social,
    Plain,
}

pub fn news_tone(result: &ElectionResult) -> NewsTone {
    if result.winner_name == "New Leader" {
        NewsTone::Alert
    } else if result.outcome == "Social Feedback" {
        NewsTone::Social
    } else {
        NewsTone::Plain
    }
}

/// News feed line. Social feedback entries use the quoted-reason
/// narrative form; every other outcome uses the tabular vote form.
/// Either way the line leads with the state reference, truncated the
/// way the original feed truncates it.
pub fn news_line(result: &ElectionResult) -> String {
    let tag: String = result
        .state_id
        .as_deref()
        .unwrap_or("?")
        .chars()
        .take(10)
        .collect();
    if result.outcome == "Social Feedback" {
        let reason = result.reason.as_deref().unwrap_or("");
        format!("{tag}: \"{reason}\" — {}", result.winner_name)
    } else {
        format!(
            "{tag}: {} ({} vs {})",
            result.outcome, result.incumbent_votes, result.challenger_votes
        )
    }
}

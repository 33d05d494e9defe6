//! Narrative rendering for weekly and monthly reports.
//!
//! # Responsibility
//! - Render the metrics bundle plus a small set of raw records into the
//!   short-status, long-form and slide-bullet artifact texts.
//!
//! # Invariants
//! - Rendering is a deterministic template fill: fixed inputs produce
//!   byte-identical text.
//! - Grouped metrics are traversed through ordered maps only.

use crate::model::entry::Entry;
use crate::model::records::Deal;
use crate::report::metrics::MetricsBundle;
use crate::report::window::ReportWindow;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Rendered weekly artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyNarrative {
    pub week_start: NaiveDate,
    /// Short bullet list for chat status posts.
    pub teams_text: String,
    pub subject: String,
    /// Six-section long-form body.
    pub email_body: String,
    /// Condensed 4-line slide rendering.
    pub slide_bullets: String,
}

/// Rendered monthly artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyNarrative {
    /// `YYYY-MM` period key.
    pub month_key: String,
    pub teams_text: String,
    pub subject: String,
    pub email_body: String,
    pub slide_bullets: String,
}

/// Formats one deal for the "deal movement" listing.
///
/// Callers pass the next-step date explicitly; deals without one never reach
/// this listing.
pub fn deal_line(deal: &Deal, next_step_date: NaiveDate) -> String {
    format!(
        "- {}: stage {}; next: {} ({next_step_date})",
        deal.name, deal.stage, deal.next_step
    )
}

/// Renders the weekly artifact set.
///
/// `deal_lines` is the bounded "top N" listing of deals whose next-step date
/// falls in the window, already formatted and capped by the caller.
pub fn render_weekly(
    entries: &[Entry],
    metrics: &MetricsBundle,
    deal_lines: &[String],
    window: &ReportWindow,
) -> WeeklyNarrative {
    let total_mins: i64 = entries.iter().map(|entry| entry.duration_min).sum();
    let cadence_pct = percent(metrics.cadence_completion_rate);

    let mut bullets = vec![
        format!(
            "{} entries logged; {} mins tracked across {} accounts.",
            entries.len(),
            total_mins,
            metrics.accounts_touched
        ),
        format!(
            "{} deals touched; cadence completion at {}%.",
            metrics.deals_touched, cadence_pct
        ),
        format!(
            "{} assets produced; {} follow-ups created ({} closed).",
            metrics.assets_created, metrics.followups_created, metrics.followups_closed
        ),
    ];
    if metrics.influenced_value != 0.0 {
        bullets.push(format!(
            "${:.0} influenced pipeline tracked.",
            metrics.influenced_value
        ));
    }

    let teams_text = bullets
        .iter()
        .map(|bullet| format!("- {bullet}"))
        .collect::<Vec<_>>()
        .join("\n");
    let subject = format!("Weekly Update – Week of {}", window.start.format("%b %d"));

    let mut body_lines = vec!["1) Highlights".to_string()];
    body_lines.extend(bullets.iter().take(3).map(|bullet| format!("- {bullet}")));
    body_lines.push("\n2) Deals & pipeline movement".to_string());
    if deal_lines.is_empty() {
        body_lines.push("- No deal updates logged.".to_string());
    } else {
        body_lines.extend(deal_lines.iter().cloned());
    }
    body_lines.push("\n3) Enablement & assets produced".to_string());
    body_lines.push(format!("- Assets created: {}", metrics.assets_created));
    body_lines.push("\n4) Co-sell touchpoints".to_string());
    body_lines.push(format!(
        "- Entries tagged co-sell/talk track: {}",
        count_note_matches(entries, "talk track")
    ));
    body_lines.push("\n5) Risks/blockers".to_string());
    body_lines.push(format!(
        "- Blockers flagged: {}",
        count_note_matches(entries, "blocker")
    ));
    body_lines.push("\n6) Next week focus".to_string());
    body_lines.push("- Progress top active deals and close open follow-ups.".to_string());

    let slide_bullets = [
        format!(
            "• {} worklog updates / {}h logged",
            entries.len(),
            total_mins / 60
        ),
        format!(
            "• {} deals active, {}/{} follow-ups closed",
            metrics.deals_touched, metrics.followups_closed, metrics.followups_created
        ),
        format!("• Cadence completion {cadence_pct}%"),
        "• Focus: move next steps and reduce blockers".to_string(),
    ]
    .join("\n");

    WeeklyNarrative {
        week_start: window.start,
        teams_text,
        subject,
        email_body: body_lines.join("\n"),
        slide_bullets,
    }
}

/// Renders the monthly artifact set.
pub fn render_monthly(
    entries: &[Entry],
    metrics: &MetricsBundle,
    window: &ReportWindow,
) -> MonthlyNarrative {
    let total_mins: i64 = entries.iter().map(|entry| entry.duration_min).sum();

    let highlights = [
        format!(
            "{} total entries, {}h logged",
            entries.len(),
            total_mins / 60
        ),
        format!(
            "{} accounts and {} deals touched",
            metrics.accounts_touched, metrics.deals_touched
        ),
        format!("{} assets created and reused", metrics.assets_created),
        format!(
            "Cadence completion: {}%",
            percent(metrics.cadence_completion_rate)
        ),
        format!(
            "Follow-ups: {} closed / {} created",
            metrics.followups_closed, metrics.followups_created
        ),
    ];

    let teams_text = highlights
        .iter()
        .map(|highlight| format!("- {highlight}"))
        .collect::<Vec<_>>()
        .join("\n");
    let subject = format!("Monthly Summary – {}", window.start.format("%B %Y"));

    // Proof statements are only emitted for this fixed keyword set.
    let corpus = entries
        .iter()
        .map(|entry| entry.raw_note.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let proof: Vec<String> = ["faster", "safer", "performance", "cost"]
        .iter()
        .filter(|keyword| corpus.contains(*keyword))
        .map(|keyword| format!("- Proof ({keyword}): observed in logged updates."))
        .collect();

    let mut body_lines = vec!["Top 5 highlights".to_string()];
    body_lines.extend(highlights.iter().map(|highlight| format!("- {highlight}")));
    body_lines.push("\nMetrics".to_string());
    body_lines.push(format!(
        "- Counts by type: {}",
        format_count_map(&metrics.entry_counts_by_type)
    ));
    body_lines.push(format!(
        "- Hours by play: {}",
        format_hours_map(&metrics.hours_by_play)
    ));
    body_lines.push("\nProof statements".to_string());
    if proof.is_empty() {
        body_lines.push("- No explicit proof statements logged this month.".to_string());
    } else {
        body_lines.extend(proof);
    }
    body_lines.push("\nWin story status".to_string());
    body_lines.push(if corpus.contains("win story") {
        "- drafted".to_string()
    } else {
        "- not drafted".to_string()
    });
    body_lines.push("\nNext month priorities".to_string());
    body_lines.push(
        "- Advance pipeline pods, complete enablement plan, and publish one win story.".to_string(),
    );

    let slide_bullets = highlights
        .iter()
        .take(5)
        .map(|highlight| format!("• {highlight}"))
        .collect::<Vec<_>>()
        .join("\n");

    MonthlyNarrative {
        month_key: window.month_key(),
        teams_text,
        subject,
        email_body: body_lines.join("\n"),
        slide_bullets,
    }
}

/// Truncating percent conversion, matching the status-line convention.
fn percent(rate: f64) -> i64 {
    (rate * 100.0) as i64
}

fn count_note_matches(entries: &[Entry], needle: &str) -> usize {
    entries
        .iter()
        .filter(|entry| entry.raw_note.to_lowercase().contains(needle))
        .count()
}

fn format_count_map(map: &BTreeMap<String, i64>) -> String {
    if map.is_empty() {
        return "none".to_string();
    }
    map.iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_hours_map(map: &BTreeMap<String, f64>) -> String {
    if map.is_empty() {
        return "none".to_string();
    }
    map.iter()
        .map(|(key, value)| format!("{key}={value:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

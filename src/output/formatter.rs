use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use super::band::{BandConfig, RiskBand};
use crate::record::OfficialRecord;
use crate::scoring::ScoringResult;

pub const DISCLAIMER: &str =
    "Results flag anomalies for review. They do not constitute legal proof.";

/// An official with its scoring result for display
pub struct ScoredOfficial<'a> {
    pub record: &'a OfficialRecord,
    pub result: &'a ScoringResult,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals and a percent sign
pub fn format_score(score: f64) -> String {
    format!("{:.2}%", score)
}

/// Turn an indicator column name into a readable label.
/// "DENUNCIAS_SCORE" -> "Denuncias", "RIESGO_PATRIMONIAL_CALCULADO" -> "Riesgo Patrimonial (Calc)"
pub fn indicator_label(name: &str) -> String {
    name.replace("_SCORE", "")
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .replace("Calculado", "(Calc)")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

// Index " 1.": 3, score "100.00%": 7, band "MODERATE": 8
const INDEX_WIDTH: usize = 3;
const SCORE_WIDTH: usize = 7;
const BAND_WIDTH: usize = 8;

/// Characters left for the name column once the fixed columns and the id are
/// laid out. None means no limit (not a terminal).
fn name_width(term_width: Option<usize>, id: &str) -> Option<usize> {
    let fixed = INDEX_WIDTH + 1 + SCORE_WIDTH + 1 + BAND_WIDTH + 2 * 3 + id.chars().count();
    match term_width {
        Some(width) if width > fixed + 10 => Some(width - fixed),
        Some(_) => Some(20),
        None => None,
    }
}

/// Text bar for a 0-100 value
fn value_bar(value: f64, width: usize) -> String {
    let ratio = (value / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width.saturating_sub(filled)))
}

fn paint_band(text: &str, band: RiskBand) -> String {
    match band {
        RiskBand::Low => text.green().to_string(),
        RiskBand::Moderate => text.yellow().to_string(),
        RiskBand::High => text.red().bold().to_string(),
    }
}

/// Format officials as a table with columns: Index, Score, Band, Name, Role, ID
/// No headers (minimal format)
pub fn format_scored_table(officials: &[ScoredOfficial], bands: &BandConfig, use_colors: bool) -> String {
    if officials.is_empty() {
        return "No officials found.".to_string();
    }

    let term_width = get_terminal_width();

    let separator = "  ";

    officials
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(scored.result.score), width = SCORE_WIDTH);
            let band = bands.classify(scored.result.score);
            let band_padded = format!("{:<width$}", band.label(), width = BAND_WIDTH);
            let veto_mark = if scored.result.is_vetoed() { "!" } else { " " };

            let who = if scored.record.role.is_empty() {
                scored.record.display_name().to_string()
            } else {
                format!("{} ({})", scored.record.display_name(), scored.record.role)
            };

            let who = match name_width(term_width, &scored.record.id) {
                Some(max) => truncate_text(&who, max),
                None => who,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    veto_mark.red(),
                    separator,
                    paint_band(&band_padded, band),
                    separator,
                    who,
                    separator,
                    scored.record.id.dimmed(),
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}",
                    index_str,
                    score_padded,
                    veto_mark,
                    separator,
                    band_padded,
                    separator,
                    who,
                    separator,
                    scored.record.id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detailed multi-line view of one official: score, band, veto and the
/// per-indicator breakdown
pub fn format_breakdown(scored: &ScoredOfficial, bands: &BandConfig, use_colors: bool) -> String {
    let record = scored.record;
    let result = scored.result;
    let band = bands.classify(result.score);

    let mut lines = Vec::new();

    let heading = if record.role.is_empty() {
        format!("{} [{}]", record.display_name(), record.id)
    } else {
        format!("{} | {} [{}]", record.display_name(), record.role, record.id)
    };
    lines.push(if use_colors { heading.bold().to_string() } else { heading });

    let score_line = format!("  Risk index: {}  {}", format_score(result.score), band.label());
    lines.push(if use_colors { paint_band(&score_line, band) } else { score_line });
    lines.push(format!("  {}", band.message()));

    if let Some(ref name) = result.vetoed_by {
        let veto = format!(
            "  Veto: {} reached the critical threshold (weighted sum {:.2})",
            indicator_label(name),
            result.weighted_sum
        );
        lines.push(if use_colors { veto.red().to_string() } else { veto });
    }
    if result.rows > 1 {
        lines.push(format!("  Averaged over {} rows", result.rows));
    }

    lines.push(String::new());
    lines.push("  Indicator                     Value  Weight  Contrib".to_string());

    for c in &result.contributions {
        let label = truncate_text(&indicator_label(&c.name), 26);
        let marker = if c.critical { "*" } else { " " };
        let line = match c.value {
            Some(value) => format!(
                "  {}{:<27} {:>6.1}  {:>5.0}%  {:>7.2}  {}",
                marker,
                label,
                value,
                c.weight * 100.0,
                c.contribution,
                value_bar(value, 10)
            ),
            None => format!(
                "  {}{:<27} {:>6}  {:>5.0}%  {:>7}",
                marker,
                label,
                "-",
                c.weight * 100.0,
                "-"
            ),
        };
        lines.push(if use_colors && c.value.is_none() {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    lines.push(String::new());
    lines.push("  * critical indicator".to_string());
    lines.push(format!("  {}", DISCLAIMER));

    lines.join("\n")
}

/// Format officials as tab-separated values for scripting
/// Columns: id, name, role, score, band, vetoed_by (no headers, no colors)
pub fn format_tsv(officials: &[ScoredOfficial], bands: &BandConfig) -> String {
    officials
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{:.2}\t{}\t{}",
                scored.record.id,
                scored.record.name,
                scored.record.role,
                scored.result.score,
                bands.classify(scored.result.score).label(),
                scored.result.vetoed_by.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonOfficial<'a> {
    id: &'a str,
    name: &'a str,
    role: &'a str,
    band: RiskBand,
    #[serde(flatten)]
    result: &'a ScoringResult,
}

/// Format officials as a pretty-printed JSON array
pub fn format_json(officials: &[ScoredOfficial], bands: &BandConfig) -> anyhow::Result<String> {
    let rows: Vec<JsonOfficial> = officials
        .iter()
        .map(|scored| JsonOfficial {
            id: &scored.record.id,
            name: &scored.record.name,
            role: &scored.record.role,
            band: bands.classify(scored.result.score),
            result: scored.result,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

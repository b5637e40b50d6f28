//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the models and pipelines stay free of presentation concerns
//! - money rounding happens only here and in exports

use crate::app::pipeline::{ExtractionOutcome, ProjectionRun};
use crate::cli::EstimateArgs;
use crate::data::InputTables;
use crate::domain::Tier;
use crate::models::round_cents;

const ROLE_WIDTH: usize = 28;
const MONEY_WIDTH: usize = 18;

/// Projected salaries, one row per role.
pub fn format_projection_table(run: &ProjectionRun) -> String {
    let mut out = String::new();

    out.push_str(&format!("Predicted Salaries for {}:\n", run.year));
    let headers: Vec<String> = Tier::ALL.iter().map(|t| t.column(run.year)).collect();
    out.push_str(
        format!(
            "{:<rw$} {:>mw$} {:>mw$} {:>mw$}",
            "Role",
            headers[0],
            headers[1],
            headers[2],
            rw = ROLE_WIDTH,
            mw = MONEY_WIDTH,
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:-<rw$} {:-<mw$} {:-<mw$} {:-<mw$}\n",
        "",
        "",
        "",
        "",
        rw = ROLE_WIDTH,
        mw = MONEY_WIDTH,
    ));

    for row in &run.rows {
        out.push_str(&format!(
            "{:<rw$} {:>mw$.2} {:>mw$.2} {:>mw$.2}\n",
            truncate(&row.role, ROLE_WIDTH),
            round_cents(row.entry_level),
            round_cents(row.mid_level),
            round_cents(row.senior_level),
            rw = ROLE_WIDTH,
            mw = MONEY_WIDTH,
        ));
    }
    for failure in &run.failures {
        out.push_str(&format!(
            "{:<rw$} (projection failed: {})\n",
            truncate(&failure.role, ROLE_WIDTH),
            failure.reason,
            rw = ROLE_WIDTH,
        ));
    }
    if run.rows.is_empty() && run.failures.is_empty() {
        out.push_str("(no roles)\n");
    }

    out
}

/// Where each input table came from.
pub fn format_sources(tables: &InputTables) -> String {
    let mut out = String::new();
    out.push_str("Data sources:\n");
    out.push_str(&format!("- salary     : {}\n", tables.salaries.describe()));
    out.push_str(&format!("- demand     : {}\n", tables.demand.describe()));
    out.push_str(&format!("- geographic : {}\n", tables.geographic.describe()));
    out.push_str(&format!("- skills     : {}\n", tables.skills.describe()));
    out
}

/// Extracted postings, one row per input text.
pub fn format_postings(outcomes: &[ExtractionOutcome]) -> String {
    let mut out = String::new();
    out.push_str("Extracted Posting Data:\n");
    out.push_str(
        format!("{:>3} {:<24} {:<16} {:<32}", "#", "Role", "Level", "SalaryRange").trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{:-<3} {:-<24} {:-<16} {:-<32}\n", "", "", "", ""));

    for (idx, outcome) in outcomes.iter().enumerate() {
        let line = match outcome {
            ExtractionOutcome::Extracted(p) => format!(
                "{:>3} {:<24} {:<16} {:<32}",
                idx + 1,
                truncate(&p.role, 24),
                truncate(&p.level, 16),
                p.salary_range.as_deref().unwrap_or("-"),
            ),
            ExtractionOutcome::Unavailable(reason) => {
                format!("{:>3} (unavailable: {reason})", idx + 1)
            }
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

pub fn format_estimate(args: &EstimateArgs, estimate: f64) -> String {
    format!(
        "Regression estimate: {:.2} (base={:.2}, experience={}, skills_premium={}, location_factor={})",
        round_cents(estimate),
        args.base,
        args.experience,
        args.skills_premium,
        args.location_factor
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

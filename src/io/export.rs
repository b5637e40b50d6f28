//! Export projections to CSV.
//!
//! One line per role and tier, meant to be easy to consume in spreadsheets.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::ProjectionRun;
use crate::domain::Tier;
use crate::error::AppError;
use crate::models::round_cents;

/// Write `role,tier,base,year,projected` rows to a CSV file.
pub fn write_projections_csv(path: &Path, run: &ProjectionRun) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "role,tier,base,year,projected")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (base, row) in run.projected() {
        for tier in Tier::ALL {
            writeln!(
                file,
                "{},{},{:.2},{},{:.2}",
                csv_field(&row.role),
                tier.display_name(),
                base.salary(tier),
                run.year,
                round_cents(row.salary(tier)),
            )
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_projection_with_tables;
    use crate::data::{InputTables, Sourced};
    use crate::domain::{ProjectionConfig, RoleSalaryBase, TableUrls, TierMarkdowns};

    fn config() -> ProjectionConfig {
        ProjectionConfig {
            urls: TableUrls {
                salary: String::new(),
                demand: String::new(),
                geographic: String::new(),
                skills: String::new(),
            },
            offline: true,
            timeout_secs: 1,
            base_year: 2024,
            inflation_rate: 0.025,
            markdowns: TierMarkdowns::default(),
            growth_period_years: 1,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn writes_one_line_per_role_and_tier() {
        let run = run_projection_with_tables(&config(), InputTables::from_fallbacks("test")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_projections_csv(&path, &run).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "role,tier,base,year,projected");
        assert_eq!(lines.len(), 1 + 2 * 3);
        assert!(lines[1].starts_with("Data Analyst,Entry-Level,70000.00,2025,"));
        assert!(lines[6].starts_with("Data Scientist,Senior-Level,150000.00,2025,"));
    }

    #[test]
    fn skipped_role_keeps_bases_aligned() {
        let mut tables = InputTables::from_fallbacks("test");
        tables.salaries = Sourced::Remote(vec![
            RoleSalaryBase {
                role: "Intern".into(),
                entry_level: 0.0,
                mid_level: 10.0,
                senior_level: 10.0,
            },
            RoleSalaryBase {
                role: "Data Analyst".into(),
                entry_level: 70_000.0,
                mid_level: 95_000.0,
                senior_level: 120_000.0,
            },
        ]);
        let run = run_projection_with_tables(&config(), tables).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_projections_csv(&path, &run).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 3);
        assert!(lines[1].starts_with("Data Analyst,Entry-Level,70000.00,2025,"));
    }

    #[test]
    fn quotes_fields_with_commas() {
        assert_eq!(csv_field("Analyst, Data"), "\"Analyst, Data\"");
        assert_eq!(csv_field("Data Analyst"), "Data Analyst");
    }
}

//! Graded cohort report, the headless counterpart of the card grid.

use crate::domain::catcher::CatcherSummary;
use crate::domain::grading::Tier;
use crate::domain::metrics::{CohortGrader, Metric, MetricGrades};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct GradedRow {
    pub id: i64,
    pub game_pk: i64,
    pub player_name: String,
    pub matchup: String,
    pub called_strike_rate: f64,
    pub shadow_zone_pitches: u32,
    pub extra_strikes: i64,
    pub lost_strikes: i64,
    pub net_impact: i64,
    pub grades: MetricGrades,
}

impl GradedRow {
    fn new(catcher: &CatcherSummary, grades: MetricGrades) -> Self {
        Self {
            id: catcher.id,
            game_pk: catcher.game_pk,
            player_name: catcher.player_name.clone(),
            matchup: catcher.matchup.clone(),
            called_strike_rate: catcher.called_strike_rate,
            shadow_zone_pitches: catcher.shadow_zone_pitches,
            extra_strikes: catcher.extra_strikes,
            lost_strikes: catcher.lost_strikes,
            net_impact: catcher.net_impact(),
            grades,
        }
    }
}

/// Grades every catcher against the whole cohort. With `sort_by`, rows are
/// ordered best first on that metric; otherwise cohort order is kept.
pub fn build_report(cohort: &[CatcherSummary], sort_by: Option<Metric>) -> Vec<GradedRow> {
    let grader = CohortGrader::new(cohort);
    let mut rows: Vec<(f64, GradedRow)> = cohort
        .iter()
        .map(|c| {
            let key = sort_by.map(|m| m.graded_value(c)).unwrap_or(0.0);
            (key, GradedRow::new(c, grader.grades_for(c)))
        })
        .collect();

    if sort_by.is_some() {
        // Stable, so ties keep cohort order.
        rows.sort_by(|a, b| b.0.total_cmp(&a.0));
    }

    rows.into_iter().map(|(_, row)| row).collect()
}

fn tier_cell(value: String, tier: Tier) -> String {
    format!("{} ({})", value, tier.label())
}

/// Fixed-width text table.
pub fn render_table(rows: &[GradedRow]) -> String {
    let headers = [
        "Catcher".to_string(),
        "Matchup".to_string(),
        Metric::CalledStrikeRate.label().to_string(),
        Metric::ExtraStrikes.label().to_string(),
        Metric::LostStrikes.label().to_string(),
        Metric::NetImpact.label().to_string(),
    ];

    let body: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.player_name.clone(),
                r.matchup.clone(),
                tier_cell(
                    format!("{:.1}%", r.called_strike_rate * 100.0),
                    r.grades.called_strike_rate,
                ),
                tier_cell(format!("+{}", r.extra_strikes), r.grades.extra_strikes),
                tier_cell(format!("-{}", r.lost_strikes), r.grades.lost_strikes),
                tier_cell(format!("{:+}", r.net_impact), r.grades.net_impact),
            ]
        })
        .collect();

    let mut widths = headers.each_ref().map(|h| h.chars().count());
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String; 6]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&headers));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in &body {
        out.push_str(&format_line(row));
        out.push('\n');
    }
    out
}

pub fn write_json<W: Write>(rows: &[GradedRow], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, rows).context("Failed to write JSON report")
}

pub fn write_csv<W: Write>(rows: &[GradedRow], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "id",
        "game_pk",
        "player_name",
        "matchup",
        "called_strike_rate",
        "called_strike_rate_tier",
        "shadow_zone_pitches",
        "extra_strikes",
        "extra_strikes_tier",
        "lost_strikes",
        "lost_strikes_tier",
        "net_impact",
        "net_impact_tier",
    ])?;

    for r in rows {
        csv.write_record([
            r.id.to_string(),
            r.game_pk.to_string(),
            r.player_name.clone(),
            r.matchup.clone(),
            format!("{:.3}", r.called_strike_rate),
            r.grades.called_strike_rate.label().to_string(),
            r.shadow_zone_pitches.to_string(),
            r.extra_strikes.to_string(),
            r.grades.extra_strikes.label().to_string(),
            r.lost_strikes.to_string(),
            r.grades.lost_strikes.label().to_string(),
            r.net_impact.to_string(),
            r.grades.net_impact.label().to_string(),
        ])?;
    }

    csv.flush().context("Failed to flush CSV report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catcher::sample_catcher;

    fn cohort() -> Vec<CatcherSummary> {
        vec![
            sample_catcher(1, 2, 3, 0.31),
            sample_catcher(2, 7, 0, 0.52),
            sample_catcher(3, 0, 5, 0.22),
        ]
    }

    #[test]
    fn test_report_keeps_cohort_order_without_sort() {
        let rows = build_report(&cohort(), None);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_by_lost_strikes_puts_fewest_first() {
        let rows = build_report(&cohort(), Some(Metric::LostStrikes));
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(rows[0].grades.lost_strikes, Tier::Best);
        assert_eq!(rows[2].grades.lost_strikes, Tier::Worst);
    }

    #[test]
    fn test_table_has_header_and_one_line_per_row() {
        let table = render_table(&build_report(&cohort(), None));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Catcher"));
        assert!(lines[3].contains("+7 (Best)"));
        assert!(lines[3].contains("-0 (Best)"));
    }

    #[test]
    fn test_csv_output() {
        let mut buf = Vec::new();
        write_csv(&build_report(&cohort(), None), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("id,game_pk,player_name"));
        assert_eq!(
            lines.next().unwrap(),
            "1,700001,Catcher 1,NYY vs BOS,0.310,Poor,40,2,Poor,3,Average,-1,Poor"
        );
    }

    #[test]
    fn test_json_output_contains_tiers() {
        let mut buf = Vec::new();
        write_json(&build_report(&cohort(), None), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[1]["grades"]["net_impact"], "Best");
        assert_eq!(value[2]["net_impact"], -5);
    }
}

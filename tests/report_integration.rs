use chrono::NaiveDate;
use framing_summary::application::report::{build_report, render_table, write_csv};
use framing_summary::domain::grading::{Tier, grade};
use framing_summary::domain::metrics::{CohortGrader, Metric};
use framing_summary::domain::ports::StatsService;
use framing_summary::infrastructure::mock::MockStatsService;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
}

#[tokio::test]
async fn test_sorted_report_over_sample_cohort() {
    let catchers = MockStatsService::new().fetch_catchers(date()).await.unwrap();

    let rows = build_report(&catchers, Some(Metric::LostStrikes));

    assert_eq!(rows.len(), catchers.len());
    let lost: Vec<i64> = rows.iter().map(|r| r.lost_strikes).collect();
    let mut expected = lost.clone();
    expected.sort();
    assert_eq!(lost, expected);
    assert_eq!(rows.first().unwrap().grades.lost_strikes, Tier::Best);
    assert_eq!(rows.last().unwrap().grades.lost_strikes, Tier::Worst);

    let table = render_table(&rows);
    assert_eq!(table.lines().count(), rows.len() + 2);

    let mut csv = Vec::new();
    write_csv(&rows, &mut csv).unwrap();
    assert_eq!(String::from_utf8(csv).unwrap().lines().count(), rows.len() + 1);
}

#[tokio::test]
async fn test_policy_matches_reverse_scale_on_sample_cohort() {
    let catchers = MockStatsService::new().fetch_catchers(date()).await.unwrap();
    let grader = CohortGrader::new(&catchers);
    let raw_lost: Vec<f64> = catchers.iter().map(|c| c.lost_strikes as f64).collect();

    for c in &catchers {
        let legacy = grade(-(c.lost_strikes as f64), &raw_lost.iter().map(|v| -v).collect::<Vec<_>>(), false);
        assert_eq!(grader.grade(Metric::LostStrikes, c), legacy);
        assert_eq!(
            grade(c.lost_strikes as f64, &raw_lost, true),
            legacy,
            "reverse-scale path disagrees for {}",
            c.player_name
        );
    }
}

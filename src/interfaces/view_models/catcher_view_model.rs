use crate::domain::catcher::{CardKey, CatcherSummary};
use crate::domain::dates::format_for_display;
use crate::domain::grading::Tier;
use crate::domain::metrics::{CohortGrader, Metric, MetricGrades};
use chrono::NaiveDate;

/// One graded number, as shown on a card tile or in the detail header.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
    pub caption: Option<String>,
    pub tier: Tier,
}

pub struct CatcherCardViewModel {
    pub key: CardKey,
    pub player_id: i64,
    pub name: String,
    pub matchup: String,
    pub tiles: Vec<MetricTile>,
}

pub struct DetailViewModel {
    pub key: CardKey,
    pub player_id: i64,
    pub title: String,
    pub subtitle: String,
    pub stats: Vec<MetricTile>,
}

/// A bar in the cohort net-impact chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NetImpactBar {
    pub name: String,
    pub value: i64,
    pub tier: Tier,
    pub selected: bool,
}

pub struct CatcherViewModel;

impl CatcherViewModel {
    fn tiles(catcher: &CatcherSummary, grades: &MetricGrades, borderline_caption: &str) -> Vec<MetricTile> {
        Metric::ALL
            .iter()
            .map(|&metric| MetricTile {
                label: metric.label(),
                value: metric.format_value(catcher),
                caption: (metric == Metric::CalledStrikeRate).then(|| {
                    format!("({} {})", catcher.shadow_zone_pitches, borderline_caption)
                }),
                tier: grades.get(metric),
            })
            .collect()
    }

    pub fn card(catcher: &CatcherSummary, grader: &CohortGrader) -> CatcherCardViewModel {
        let grades = grader.grades_for(catcher);
        CatcherCardViewModel {
            key: catcher.key(),
            player_id: catcher.id,
            name: catcher.player_name.clone(),
            matchup: catcher.matchup.clone(),
            tiles: Self::tiles(catcher, &grades, "borderline pitches"),
        }
    }

    /// `fallback_date` is used when the payload carries no date of its own.
    pub fn detail(catcher: &CatcherSummary, grades: &MetricGrades, fallback_date: NaiveDate) -> DetailViewModel {
        let date = if catcher.date.trim().is_empty() {
            format_for_display(fallback_date)
        } else {
            catcher.date.clone()
        };

        DetailViewModel {
            key: catcher.key(),
            player_id: catcher.id,
            title: format!("{} - Game Summary", catcher.player_name),
            subtitle: format!("{} • {}", catcher.matchup, date),
            stats: Self::tiles(catcher, grades, "borderline"),
        }
    }

    pub fn cohort_heading(date: NaiveDate) -> String {
        format!("Catchers - {}", format_for_display(date))
    }

    pub fn cohort_count(count: usize) -> String {
        format!("{} catchers with called pitch data", count)
    }

    /// Net impact per catcher, sorted high to low, graded against the cohort.
    pub fn net_impact_bars(cohort: &[CatcherSummary], grader: &CohortGrader, selected: CardKey) -> Vec<NetImpactBar> {
        let mut bars: Vec<NetImpactBar> = cohort
            .iter()
            .map(|c| NetImpactBar {
                name: c.player_name.clone(),
                value: c.net_impact(),
                tier: grader.grade(Metric::NetImpact, c),
                selected: c.key() == selected,
            })
            .collect();
        bars.sort_by(|a, b| b.value.cmp(&a.value));
        bars
    }
}

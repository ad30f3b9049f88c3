//! Which direction is "better" for each framing metric, and how it is graded.
//!
//! Lower-is-better metrics are negated here, once, and then graded on the
//! natural scale. Nothing in production passes `reverse_scale = true`.

use crate::domain::catcher::CatcherSummary;
use crate::domain::grading::{Tier, grade};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CalledStrikeRate,
    ExtraStrikes,
    LostStrikes,
    NetImpact,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::CalledStrikeRate,
        Metric::ExtraStrikes,
        Metric::LostStrikes,
        Metric::NetImpact,
    ];

    pub fn direction(self) -> Direction {
        match self {
            Metric::LostStrikes => Direction::LowerIsBetter,
            Metric::CalledStrikeRate | Metric::ExtraStrikes | Metric::NetImpact => {
                Direction::HigherIsBetter
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::CalledStrikeRate => "Shadow Zone CS%",
            Metric::ExtraStrikes => "Extra Strikes",
            Metric::LostStrikes => "Lost Strikes",
            Metric::NetImpact => "Net Impact",
        }
    }

    /// Field-style name used in reports and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Metric::CalledStrikeRate => "called_strike_rate",
            Metric::ExtraStrikes => "extra_strikes",
            Metric::LostStrikes => "lost_strikes",
            Metric::NetImpact => "net_impact",
        }
    }

    pub fn raw_value(self, catcher: &CatcherSummary) -> f64 {
        match self {
            Metric::CalledStrikeRate => catcher.called_strike_rate,
            Metric::ExtraStrikes => catcher.extra_strikes as f64,
            Metric::LostStrikes => catcher.lost_strikes as f64,
            Metric::NetImpact => catcher.net_impact() as f64,
        }
    }

    /// The value on a higher-is-better scale.
    pub fn graded_value(self, catcher: &CatcherSummary) -> f64 {
        let raw = self.raw_value(catcher);
        match self.direction() {
            Direction::HigherIsBetter => raw,
            Direction::LowerIsBetter => -raw,
        }
    }

    pub fn cohort_values(self, cohort: &[CatcherSummary]) -> Vec<f64> {
        cohort.iter().map(|c| self.graded_value(c)).collect()
    }

    pub fn format_value(self, catcher: &CatcherSummary) -> String {
        match self {
            Metric::CalledStrikeRate => format!("{:.1}%", catcher.called_strike_rate * 100.0),
            Metric::ExtraStrikes => format!("+{}", catcher.extra_strikes),
            Metric::LostStrikes => format!("-{}", catcher.lost_strikes),
            Metric::NetImpact => format!("{:+}", catcher.net_impact()),
        }
    }

    /// One-off grade against `cohort`. Use [`CohortGrader`] when grading many catchers.
    pub fn grade(self, catcher: &CatcherSummary, cohort: &[CatcherSummary]) -> Tier {
        grade(self.graded_value(catcher), &self.cohort_values(cohort), false)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four tiers shown on a catcher card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGrades {
    pub called_strike_rate: Tier,
    pub extra_strikes: Tier,
    pub lost_strikes: Tier,
    pub net_impact: Tier,
}

impl MetricGrades {
    pub fn for_catcher(catcher: &CatcherSummary, cohort: &[CatcherSummary]) -> Self {
        CohortGrader::new(cohort).grades_for(catcher)
    }

    pub fn get(&self, metric: Metric) -> Tier {
        match metric {
            Metric::CalledStrikeRate => self.called_strike_rate,
            Metric::ExtraStrikes => self.extra_strikes,
            Metric::LostStrikes => self.lost_strikes,
            Metric::NetImpact => self.net_impact,
        }
    }
}

/// Cohort value vectors for every metric, collected once per cohort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortGrader {
    values: [Vec<f64>; 4],
}

impl CohortGrader {
    pub fn new(cohort: &[CatcherSummary]) -> Self {
        Self {
            values: Metric::ALL.map(|m| m.cohort_values(cohort)),
        }
    }

    fn slot(metric: Metric) -> usize {
        match metric {
            Metric::CalledStrikeRate => 0,
            Metric::ExtraStrikes => 1,
            Metric::LostStrikes => 2,
            Metric::NetImpact => 3,
        }
    }

    pub fn cohort_values(&self, metric: Metric) -> &[f64] {
        &self.values[Self::slot(metric)]
    }

    pub fn grade(&self, metric: Metric, catcher: &CatcherSummary) -> Tier {
        grade(metric.graded_value(catcher), self.cohort_values(metric), false)
    }

    pub fn grades_for(&self, catcher: &CatcherSummary) -> MetricGrades {
        MetricGrades {
            called_strike_rate: self.grade(Metric::CalledStrikeRate, catcher),
            extra_strikes: self.grade(Metric::ExtraStrikes, catcher),
            lost_strikes: self.grade(Metric::LostStrikes, catcher),
            net_impact: self.grade(Metric::NetImpact, catcher),
        }
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    /// Accepts the field-style key, with dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Metric::ALL.iter().map(|m| m.key()).collect();
                anyhow::anyhow!("Unknown metric '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catcher::sample_catcher;

    fn cohort() -> Vec<CatcherSummary> {
        vec![
            sample_catcher(1, 0, 4, 0.30),
            sample_catcher(2, 2, 3, 0.45),
            sample_catcher(3, 5, 2, 0.50),
            sample_catcher(4, 8, 1, 0.62),
            sample_catcher(5, 10, 0, 0.71),
        ]
    }

    #[test]
    fn test_only_lost_strikes_is_lower_is_better() {
        assert_eq!(Metric::LostStrikes.direction(), Direction::LowerIsBetter);
        for m in [Metric::CalledStrikeRate, Metric::ExtraStrikes, Metric::NetImpact] {
            assert_eq!(m.direction(), Direction::HigherIsBetter);
        }
    }

    #[test]
    fn test_fewest_lost_strikes_grades_best() {
        let cohort = cohort();
        assert_eq!(Metric::LostStrikes.grade(&cohort[4], &cohort), Tier::Best);
        assert_eq!(Metric::LostStrikes.grade(&cohort[0], &cohort), Tier::Worst);
    }

    #[test]
    fn test_negation_policy_matches_reverse_scale_path() {
        // Legacy call sites graded lost strikes with a reversed scale over raw counts.
        let cohort = cohort();
        let raw: Vec<f64> = cohort.iter().map(|c| c.lost_strikes as f64).collect();
        for c in &cohort {
            let legacy = grade(c.lost_strikes as f64, &raw, true);
            assert_eq!(Metric::LostStrikes.grade(c, &cohort), legacy);
        }
    }

    #[test]
    fn test_card_grades_for_top_catcher() {
        let cohort = cohort();
        let grades = MetricGrades::for_catcher(&cohort[4], &cohort);
        assert_eq!(grades.called_strike_rate, Tier::Best);
        assert_eq!(grades.extra_strikes, Tier::Best);
        assert_eq!(grades.lost_strikes, Tier::Best);
        assert_eq!(grades.net_impact, Tier::Best);
        assert_eq!(grades.get(Metric::NetImpact), Tier::Best);
    }

    #[test]
    fn test_middle_catcher_is_average_on_extra_strikes() {
        let cohort = cohort();
        let grader = CohortGrader::new(&cohort);
        assert_eq!(grader.grade(Metric::ExtraStrikes, &cohort[2]), Tier::Average);
        assert_eq!(grader.cohort_values(Metric::LostStrikes), &[-4.0, -3.0, -2.0, -1.0, -0.0]);
    }

    #[test]
    fn test_zero_variance_lost_strikes_is_neutral() {
        let cohort = vec![
            sample_catcher(1, 0, 1, 0.3),
            sample_catcher(2, 3, 1, 0.4),
            sample_catcher(3, 6, 1, 0.5),
        ];
        let grader = CohortGrader::new(&cohort);
        for c in &cohort {
            assert_eq!(grader.grade(Metric::LostStrikes, c), Tier::Neutral);
        }
    }

    #[test]
    fn test_single_catcher_cohort_is_neutral_everywhere() {
        let cohort = vec![sample_catcher(1, 4, 2, 0.5)];
        let grades = MetricGrades::for_catcher(&cohort[0], &cohort);
        for m in Metric::ALL {
            assert_eq!(grades.get(m), Tier::Neutral);
        }
    }

    #[test]
    fn test_format_values() {
        let c = sample_catcher(1, 3, 5, 0.4567);
        assert_eq!(Metric::CalledStrikeRate.format_value(&c), "45.7%");
        assert_eq!(Metric::ExtraStrikes.format_value(&c), "+3");
        assert_eq!(Metric::LostStrikes.format_value(&c), "-5");
        assert_eq!(Metric::NetImpact.format_value(&c), "-2");

        let even = sample_catcher(2, 2, 2, 0.0);
        assert_eq!(Metric::NetImpact.format_value(&even), "+0");
    }

    #[test]
    fn test_metric_parses_from_key() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!("net-impact".parse::<Metric>().unwrap(), Metric::NetImpact);
        assert_eq!(" Lost_Strikes ".parse::<Metric>().unwrap(), Metric::LostStrikes);

        let err = "framing".parse::<Metric>().unwrap_err().to_string();
        assert!(err.contains("called_strike_rate, extra_strikes, lost_strikes, net_impact"));
    }
}

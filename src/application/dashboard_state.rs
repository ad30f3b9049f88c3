//! Dashboard session state.
//!
//! All mutable dashboard state lives in [`DashboardState`] and changes only
//! through its transition methods. Every fetch is issued a [`Ticket`] from a
//! single monotonically increasing counter; a completion is applied only if
//! its ticket is still the one pending for that kind of request, so a slow
//! response for an old date or an old catcher can never overwrite newer state.

use crate::domain::catcher::{CardKey, CatcherSummary, Cohort};
use crate::domain::errors::StatsServiceError;
use crate::domain::metrics::{CohortGrader, MetricGrades};
use crate::domain::plot::PlotImage;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

pub const NO_DATA_MESSAGE: &str =
    "No catcher data found for this date. Try a different date when MLB games were played.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortRequest {
    pub ticket: Ticket,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub ticket: Ticket,
    pub catcher_id: i64,
    pub game_pk: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotState {
    Loading,
    Ready(Arc<PlotImage>),
    Failed(String),
    /// The user closed the plot area after a failure.
    Dismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub catcher: CatcherSummary,
    pub grades: MetricGrades,
    pub plot: PlotState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Summary,
    Detail,
}

/// User-facing text for a failed cohort or plot fetch.
pub fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<StatsServiceError>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", err),
    }
}

#[derive(Debug)]
pub struct DashboardState {
    date: NaiveDate,
    cohort: Option<Arc<Cohort>>,
    grader: CohortGrader,
    loading: bool,
    error: Option<String>,
    selection: Option<Selection>,
    next_ticket: u64,
    pending_cohort: Option<Ticket>,
    pending_plot: Option<Ticket>,
}

impl DashboardState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            cohort: None,
            grader: CohortGrader::default(),
            loading: false,
            error: None,
            selection: None,
            next_ticket: 0,
            pending_cohort: None,
            pending_plot: None,
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    // --- Accessors ---

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn cohort(&self) -> Option<&Arc<Cohort>> {
        self.cohort.as_ref()
    }

    pub fn catchers(&self) -> &[CatcherSummary] {
        self.cohort.as_deref().map(Cohort::catchers).unwrap_or(&[])
    }

    pub fn grader(&self) -> &CohortGrader {
        &self.grader
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn view(&self) -> View {
        if self.selection.is_some() {
            View::Detail
        } else {
            View::Summary
        }
    }

    // --- Transitions ---

    /// Switches to `date`, dropping the current cohort and selection.
    pub fn request_date(&mut self, date: NaiveDate) -> CohortRequest {
        let ticket = self.issue_ticket();
        self.date = date;
        self.cohort = None;
        self.grader = CohortGrader::default();
        self.selection = None;
        self.pending_plot = None;
        self.error = None;
        self.loading = true;
        self.pending_cohort = Some(ticket);
        CohortRequest { ticket, date }
    }

    /// Re-fetches the current date.
    pub fn refresh(&mut self) -> CohortRequest {
        self.request_date(self.date)
    }

    /// Applies a cohort fetch result. Returns false if the ticket is stale.
    pub fn apply_cohort(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<CatcherSummary>, String>,
    ) -> bool {
        if self.pending_cohort != Some(ticket) {
            debug!(?ticket, pending = ?self.pending_cohort, "Discarding stale cohort response");
            return false;
        }

        self.pending_cohort = None;
        self.loading = false;

        match result {
            Ok(catchers) => {
                self.error = catchers.is_empty().then(|| NO_DATA_MESSAGE.to_string());
                self.grader = CohortGrader::new(&catchers);
                self.cohort = Some(Arc::new(Cohort::new(self.date, catchers)));
            }
            Err(message) => {
                self.error = Some(message);
                self.grader = CohortGrader::default();
                self.cohort = Some(Arc::new(Cohort::empty(self.date)));
            }
        }
        true
    }

    /// Opens the detail view for a catcher in the loaded cohort.
    pub fn select_catcher(&mut self, key: CardKey) -> Option<PlotRequest> {
        let catcher = self.cohort.as_deref()?.find(key)?.clone();
        let ticket = self.issue_ticket();
        let grades = self.grader.grades_for(&catcher);

        let request = PlotRequest {
            ticket,
            catcher_id: catcher.id,
            game_pk: catcher.game_pk,
            date: self.date,
        };

        self.selection = Some(Selection {
            catcher,
            grades,
            plot: PlotState::Loading,
        });
        self.pending_plot = Some(ticket);
        Some(request)
    }

    /// Applies a plot fetch result. Returns false if the ticket is stale.
    pub fn apply_plot(&mut self, ticket: Ticket, result: Result<PlotImage, String>) -> bool {
        if self.pending_plot != Some(ticket) {
            debug!(?ticket, pending = ?self.pending_plot, "Discarding stale plot response");
            return false;
        }
        self.pending_plot = None;

        let Some(selection) = self.selection.as_mut() else {
            return false;
        };
        selection.plot = match result {
            Ok(plot) => PlotState::Ready(Arc::new(plot)),
            Err(message) => PlotState::Failed(format!("Failed to generate plot: {}", message)),
        };
        true
    }

    /// Returns to the card grid. Any plot still in flight is ignored on arrival.
    pub fn back_to_summary(&mut self) {
        self.selection = None;
        self.pending_plot = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Closes the plot area of the detail view. A plot still loading is left alone.
    pub fn dismiss_plot(&mut self) -> bool {
        match self.selection.as_mut() {
            Some(selection) if selection.plot != PlotState::Loading => {
                selection.plot = PlotState::Dismissed;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catcher::sample_catcher;
    use crate::domain::grading::Tier;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn cohort() -> Vec<CatcherSummary> {
        vec![
            sample_catcher(1, 0, 3, 0.2),
            sample_catcher(2, 4, 1, 0.4),
            sample_catcher(3, 9, 0, 0.6),
        ]
    }

    #[test]
    fn test_request_date_enters_loading() {
        let mut state = DashboardState::new(day(14));
        let req = state.request_date(day(15));

        assert_eq!(req.date, day(15));
        assert_eq!(state.date(), day(15));
        assert!(state.is_loading());
        assert!(state.cohort().is_none());
        assert_eq!(state.view(), View::Summary);
    }

    #[test]
    fn test_apply_cohort_replaces_state() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));

        assert!(state.apply_cohort(req.ticket, Ok(cohort())));
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.catchers().len(), 3);
        assert_eq!(state.cohort().unwrap().date(), day(15));
    }

    #[test]
    fn test_stale_cohort_response_is_discarded() {
        let mut state = DashboardState::new(day(1));
        let old = state.request_date(day(14));
        let new = state.request_date(day(15));

        assert!(state.apply_cohort(new.ticket, Ok(cohort())));
        // The slower, older request lands afterwards and must not win.
        assert!(!state.apply_cohort(old.ticket, Ok(vec![sample_catcher(99, 1, 1, 0.5)])));

        assert_eq!(state.date(), day(15));
        assert_eq!(state.catchers().len(), 3);
        assert!(state.catchers().iter().all(|c| c.id != 99));
    }

    #[test]
    fn test_older_response_arriving_first_is_discarded_and_loading_continues() {
        let mut state = DashboardState::new(day(1));
        let old = state.request_date(day(14));
        let new = state.request_date(day(15));

        assert!(!state.apply_cohort(old.ticket, Ok(cohort())));
        assert!(state.is_loading());
        assert!(state.cohort().is_none());

        assert!(state.apply_cohort(new.ticket, Ok(vec![])));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_empty_cohort_sets_no_data_message() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Ok(vec![]));

        assert_eq!(state.error(), Some(NO_DATA_MESSAGE));
        assert!(state.cohort().unwrap().is_empty());
    }

    #[test]
    fn test_failed_cohort_keeps_message_and_empties_cards() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Err("Failed to fetch data".to_string()));

        assert_eq!(state.error(), Some("Failed to fetch data"));
        assert!(state.catchers().is_empty());
    }

    #[test]
    fn test_select_catcher_grades_against_loaded_cohort() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Ok(cohort()));

        let key = state.catchers()[2].key();
        let plot_req = state.select_catcher(key).expect("catcher is in cohort");

        assert_eq!(plot_req.catcher_id, 3);
        assert_eq!(plot_req.date, day(15));
        assert_eq!(state.view(), View::Detail);

        let selection = state.selection().unwrap();
        assert_eq!(selection.plot, PlotState::Loading);
        assert_eq!(selection.grades.net_impact, Tier::Best);
        assert_eq!(selection.grades.lost_strikes, Tier::Best);
    }

    #[test]
    fn test_select_unknown_catcher_is_ignored() {
        let mut state = DashboardState::new(day(15));
        assert!(state.select_catcher(CardKey { player_id: 1, game_pk: 1 }).is_none());

        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Ok(cohort()));
        assert!(state.select_catcher(CardKey { player_id: 1, game_pk: 1 }).is_none());
        assert_eq!(state.view(), View::Summary);
    }

    #[test]
    fn test_plot_for_previous_selection_is_discarded() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Ok(cohort()));

        let first = state.select_catcher(state.catchers()[0].key()).unwrap();
        state.back_to_summary();
        let second = state.select_catcher(state.catchers()[1].key()).unwrap();

        let png = PlotImage::new("image/png", vec![0x89, b'P', b'N', b'G']);
        assert!(!state.apply_plot(first.ticket, Ok(png.clone())));
        assert_eq!(state.selection().unwrap().plot, PlotState::Loading);

        assert!(state.apply_plot(second.ticket, Ok(png)));
        assert!(matches!(state.selection().unwrap().plot, PlotState::Ready(_)));
        assert_eq!(state.selection().unwrap().catcher.id, 2);
    }

    #[test]
    fn test_plot_failure_is_reported_on_selection() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Ok(cohort()));
        let plot_req = state.select_catcher(state.catchers()[0].key()).unwrap();

        state.apply_plot(plot_req.ticket, Err("No data found for this catcher/game".to_string()));
        assert_eq!(
            state.selection().unwrap().plot,
            PlotState::Failed(
                "Failed to generate plot: No data found for this catcher/game".to_string()
            )
        );
    }

    #[test]
    fn test_dismissed_plot_failure_stays_closed() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Ok(cohort()));
        let plot_req = state.select_catcher(state.catchers()[0].key()).unwrap();

        assert!(!state.dismiss_plot());
        assert_eq!(state.selection().unwrap().plot, PlotState::Loading);

        state.apply_plot(plot_req.ticket, Err("Failed to fetch data".to_string()));
        assert!(state.dismiss_plot());
        assert_eq!(state.selection().unwrap().plot, PlotState::Dismissed);
        assert_eq!(state.view(), View::Detail);

        // Nothing is in flight any more, so a duplicate completion cannot reopen it.
        assert!(!state.apply_plot(plot_req.ticket, Err("late".to_string())));
        assert_eq!(state.selection().unwrap().plot, PlotState::Dismissed);
    }

    #[test]
    fn test_dismiss_plot_without_selection_is_ignored() {
        let mut state = DashboardState::new(day(15));
        assert!(!state.dismiss_plot());
        assert_eq!(state.view(), View::Summary);
    }

    #[test]
    fn test_date_change_clears_selection_and_pending_plot() {
        let mut state = DashboardState::new(day(15));
        let req = state.request_date(day(15));
        state.apply_cohort(req.ticket, Ok(cohort()));
        let plot_req = state.select_catcher(state.catchers()[0].key()).unwrap();

        state.request_date(day(16));
        assert!(state.selection().is_none());
        assert!(!state.apply_plot(plot_req.ticket, Err("late".to_string())));
    }

    #[test]
    fn test_failure_message_uses_typed_errors() {
        let err: anyhow::Error = StatsServiceError::Transport {
            reason: "refused".to_string(),
        }
        .into();
        assert!(failure_message(&err).starts_with("Failed to connect to backend"));

        let other = anyhow::anyhow!("boom").context("Failed to decode plot image");
        assert_eq!(failure_message(&other), "Failed to decode plot image: boom");
    }
}

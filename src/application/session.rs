use crate::application::client::{DashboardClient, DashboardEvent};
use crate::application::dashboard_state::DashboardState;
use crate::domain::catcher::CardKey;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info};

/// Something the view layer has to react to beyond re-reading the state.
#[derive(Debug)]
pub enum SessionUpdate {
    Log(String),
    Headshot { player_id: i64, bytes: Option<Vec<u8>> },
}

/// Glues [`DashboardState`] transitions to the fetches they trigger.
pub struct DashboardSession {
    state: DashboardState,
    client: DashboardClient,
    requested_headshots: HashSet<i64>,
}

impl DashboardSession {
    pub fn new(initial_date: NaiveDate, client: DashboardClient) -> Self {
        Self {
            state: DashboardState::new(initial_date),
            client,
            requested_headshots: HashSet::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn client(&self) -> &DashboardClient {
        &self.client
    }

    /// Loads the cohort for the initial date.
    pub fn start(&mut self) {
        let request = self.state.refresh();
        self.client.request_cohort(request);
    }

    pub fn change_date(&mut self, date: NaiveDate) {
        info!("Date selected: {}", date);
        let request = self.state.request_date(date);
        self.client.request_cohort(request);
    }

    pub fn refresh(&mut self) {
        let request = self.state.refresh();
        self.client.request_cohort(request);
    }

    pub fn select(&mut self, key: CardKey) {
        if let Some(request) = self.state.select_catcher(key) {
            info!("Catcher selected: {}", key);
            self.client.request_plot(request);
        }
    }

    pub fn back(&mut self) {
        self.state.back_to_summary();
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    pub fn dismiss_plot(&mut self) {
        self.state.dismiss_plot();
    }

    /// Drains every pending completion into the state.
    pub fn pump(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();
        while let Some(event) = self.client.poll_next() {
            if let Some(update) = self.apply(event) {
                updates.push(update);
            }
        }
        updates
    }

    /// Applies one event. Exposed so callers that block on
    /// [`DashboardClient::wait_next`] can feed it back in.
    pub fn apply(&mut self, event: DashboardEvent) -> Option<SessionUpdate> {
        match event {
            DashboardEvent::CohortLoaded { ticket, result } => {
                if self.state.apply_cohort(ticket, result) {
                    self.request_missing_headshots();
                }
                None
            }
            DashboardEvent::PlotLoaded { ticket, result } => {
                self.state.apply_plot(ticket, result);
                None
            }
            DashboardEvent::HeadshotLoaded { player_id, bytes } => {
                debug!(player_id, found = bytes.is_some(), "Headshot fetch finished");
                Some(SessionUpdate::Headshot { player_id, bytes })
            }
            DashboardEvent::Log(line) => Some(SessionUpdate::Log(line)),
        }
    }

    fn request_missing_headshots(&mut self) {
        let missing: Vec<i64> = self
            .state
            .catchers()
            .iter()
            .map(|c| c.id)
            .filter(|id| self.requested_headshots.insert(*id))
            .collect();
        self.client.request_headshots(missing);
    }
}

use crate::application::dashboard_state::{CohortRequest, PlotRequest, Ticket, failure_message};
use crate::domain::catcher::CatcherSummary;
use crate::domain::plot::PlotImage;
use crate::domain::ports::{HeadshotSource, StatsService};
use crossbeam_channel::{Receiver, Sender};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

const HEADSHOT_CONCURRENCY: usize = 4;

/// Completions delivered back to the UI thread
#[derive(Debug)]
pub enum DashboardEvent {
    CohortLoaded {
        ticket: Ticket,
        result: Result<Vec<CatcherSummary>, String>,
    },
    PlotLoaded {
        ticket: Ticket,
        result: Result<PlotImage, String>,
    },
    HeadshotLoaded {
        player_id: i64,
        bytes: Option<Vec<u8>>,
    },
    Log(String),
}

/// Runs fetches on a background tokio runtime and hands results back over a
/// channel the UI drains once per frame.
pub struct DashboardClient {
    runtime: Handle,
    stats: Arc<dyn StatsService>,
    headshots: Arc<dyn HeadshotSource>,
    event_tx: Sender<DashboardEvent>,
    event_rx: Receiver<DashboardEvent>,
    log_rx: Option<Receiver<String>>,
}

impl DashboardClient {
    pub fn new(
        runtime: Handle,
        stats: Arc<dyn StatsService>,
        headshots: Arc<dyn HeadshotSource>,
    ) -> Self {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        Self {
            runtime,
            stats,
            headshots,
            event_tx,
            event_rx,
            log_rx: None,
        }
    }

    /// Also surface formatted log lines through [`DashboardClient::poll_next`].
    pub fn with_log_channel(mut self, log_rx: Receiver<String>) -> Self {
        self.log_rx = Some(log_rx);
        self
    }

    /// Poll for the next completed fetch or log line. Never blocks.
    pub fn poll_next(&mut self) -> Option<DashboardEvent> {
        if let Ok(event) = self.event_rx.try_recv() {
            return Some(event);
        }

        if let Some(log_rx) = &self.log_rx {
            if let Ok(line) = log_rx.try_recv() {
                return Some(DashboardEvent::Log(line));
            }
        }

        None
    }

    /// Blocks up to `timeout` for the next fetch completion. Log lines are not returned.
    pub fn wait_next(&self, timeout: std::time::Duration) -> Option<DashboardEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    // --- Command Methods ---

    pub fn request_cohort(&self, request: CohortRequest) {
        let stats = self.stats.clone();
        let tx = self.event_tx.clone();

        self.runtime.spawn(async move {
            let result = stats
                .fetch_catchers(request.date)
                .await
                .map_err(|e| {
                    warn!("Cohort fetch for {} failed: {:#}", request.date, e);
                    failure_message(&e)
                });
            let _ = tx.send(DashboardEvent::CohortLoaded {
                ticket: request.ticket,
                result,
            });
        });
    }

    pub fn request_plot(&self, request: PlotRequest) {
        let stats = self.stats.clone();
        let tx = self.event_tx.clone();

        self.runtime.spawn(async move {
            let result = stats
                .fetch_plot(request.catcher_id, request.game_pk, request.date)
                .await
                .map_err(|e| {
                    warn!(
                        "Plot fetch for catcher {} game {} failed: {:#}",
                        request.catcher_id, request.game_pk, e
                    );
                    failure_message(&e)
                });
            let _ = tx.send(DashboardEvent::PlotLoaded {
                ticket: request.ticket,
                result,
            });
        });
    }

    /// Downloads headshots a few at a time. Each one is reported as it lands.
    pub fn request_headshots(&self, player_ids: Vec<i64>) {
        if player_ids.is_empty() {
            return;
        }

        let headshots = self.headshots.clone();
        let tx = self.event_tx.clone();
        info!("Fetching {} headshots", player_ids.len());

        self.runtime.spawn(async move {
            futures_util::stream::iter(player_ids)
                .map(|player_id| {
                    let headshots = headshots.clone();
                    async move { (player_id, headshots.fetch_headshot(player_id).await) }
                })
                .buffer_unordered(HEADSHOT_CONCURRENCY)
                .for_each(|(player_id, bytes)| {
                    let _ = tx.send(DashboardEvent::HeadshotLoaded { player_id, bytes });
                    futures_util::future::ready(())
                })
                .await;
        });
    }
}

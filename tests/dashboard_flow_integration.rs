use chrono::NaiveDate;
use framing_summary::application::client::DashboardClient;
use framing_summary::application::dashboard_state::{DashboardState, NO_DATA_MESSAGE, PlotState, View};
use framing_summary::application::session::{DashboardSession, SessionUpdate};
use framing_summary::domain::catcher::CatcherSummary;
use framing_summary::domain::grading::Tier;
use framing_summary::domain::metrics::Metric;
use framing_summary::domain::ports::{HeadshotSource, StatsService};
use framing_summary::infrastructure::mock::{MockStatsService, NoHeadshots};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
}

fn session(runtime: &Runtime, stats: MockStatsService, date: NaiveDate) -> DashboardSession {
    let stats: Arc<dyn StatsService> = Arc::new(stats);
    let headshots: Arc<dyn HeadshotSource> = Arc::new(NoHeadshots);
    DashboardSession::new(date, DashboardClient::new(runtime.handle().clone(), stats, headshots))
}

/// Feeds completions into the session until `done` holds or the deadline passes.
fn drive_until(session: &mut DashboardSession, done: impl Fn(&DashboardState) -> bool) -> Vec<SessionUpdate> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut updates = Vec::new();
    while !done(session.state()) {
        assert!(Instant::now() < deadline, "timed out waiting for dashboard state");
        if let Some(event) = session.client().wait_next(Duration::from_millis(50)) {
            updates.extend(session.apply(event));
        }
    }
    updates
}

/// Applies whatever else arrives within `window`.
fn drain_for(session: &mut DashboardSession, window: Duration) -> Vec<SessionUpdate> {
    let deadline = Instant::now() + window;
    let mut updates = Vec::new();
    while Instant::now() < deadline {
        if let Some(event) = session.client().wait_next(Duration::from_millis(20)) {
            updates.extend(session.apply(event));
        }
    }
    updates
}

#[test]
fn test_initial_load_grades_sample_cohort() {
    let runtime = Runtime::new().unwrap();
    let mut session = session(&runtime, MockStatsService::new(), day(15));

    session.start();
    assert!(session.state().is_loading());
    drive_until(&mut session, |s| !s.is_loading());

    let state = session.state();
    assert_eq!(state.view(), View::Summary);
    assert!(state.error().is_none());
    assert_eq!(state.catchers().len(), 8);
    assert!(state.catchers().iter().all(|c| c.date == "2025-07-15"));

    // Best and worst net impact in the sample cohort land on the scale ends
    let grader = state.grader();
    let by_net = |pick: fn(&CatcherSummary, &CatcherSummary) -> bool| {
        state
            .catchers()
            .iter()
            .fold(None::<&CatcherSummary>, |acc, c| match acc {
                Some(a) if !pick(c, a) => Some(a),
                _ => Some(c),
            })
            .unwrap()
    };
    let best = by_net(|c, a| c.net_impact() > a.net_impact());
    let worst = by_net(|c, a| c.net_impact() < a.net_impact());
    assert_eq!(grader.grade(Metric::NetImpact, best), Tier::Best);
    assert_eq!(grader.grade(Metric::NetImpact, worst), Tier::Worst);
}

#[test]
fn test_headshots_requested_once_per_player() {
    let runtime = Runtime::new().unwrap();
    let mut session = session(&runtime, MockStatsService::new(), day(15));

    session.start();
    let mut updates = drive_until(&mut session, |s| !s.is_loading());
    updates.extend(drain_for(&mut session, Duration::from_millis(300)));

    // Same players again on refresh: nothing new to fetch
    session.refresh();
    drive_until(&mut session, |s| !s.is_loading());
    updates.extend(drain_for(&mut session, Duration::from_millis(300)));

    let headshots: Vec<i64> = updates
        .iter()
        .filter_map(|u| match u {
            SessionUpdate::Headshot { player_id, bytes } => {
                assert!(bytes.is_none());
                Some(*player_id)
            }
            SessionUpdate::Log(_) => None,
        })
        .collect();
    assert_eq!(headshots.len(), 8);
}

#[test]
fn test_select_catcher_loads_plot_and_back_returns_to_grid() {
    let runtime = Runtime::new().unwrap();
    let mut session = session(&runtime, MockStatsService::new(), day(15));
    session.start();
    drive_until(&mut session, |s| !s.is_loading());

    let target = session.state().catchers()[2].clone();
    session.select(target.key());

    let selection = session.state().selection().unwrap();
    assert_eq!(selection.catcher.id, target.id);
    assert_eq!(selection.plot, PlotState::Loading);
    assert_eq!(session.state().view(), View::Detail);

    drive_until(&mut session, |s| {
        matches!(s.selection().map(|sel| &sel.plot), Some(PlotState::Ready(_)))
    });
    match &session.state().selection().unwrap().plot {
        PlotState::Ready(plot) => assert!(plot.is_png()),
        other => panic!("unexpected plot state: {:?}", other),
    }

    session.back();
    assert_eq!(session.state().view(), View::Summary);
    assert_eq!(session.state().catchers().len(), 8);
}

#[test]
fn test_slow_response_for_previous_date_is_discarded() {
    let runtime = Runtime::new().unwrap();
    let stats = MockStatsService::new().with_delay(day(14), Duration::from_millis(300));
    let mut session = session(&runtime, stats, day(15));

    session.change_date(day(14));
    session.change_date(day(15));
    drive_until(&mut session, |s| !s.is_loading());

    assert_eq!(session.state().date(), day(15));
    assert_eq!(session.state().catchers().len(), 8);

    // The day-14 response lands afterwards and must not replace day 15
    drain_for(&mut session, Duration::from_millis(600));
    assert_eq!(session.state().date(), day(15));
    assert!(
        session
            .state()
            .catchers()
            .iter()
            .all(|c| c.date == "2025-07-15")
    );
    assert!(!session.state().is_loading());
}

#[test]
fn test_empty_cohort_shows_no_data_message() {
    let runtime = Runtime::new().unwrap();
    let stats = MockStatsService::new().with_cohort(day(16), vec![]);
    let mut session = session(&runtime, stats, day(16));

    session.start();
    drive_until(&mut session, |s| !s.is_loading());

    assert!(session.state().catchers().is_empty());
    assert_eq!(session.state().error(), Some(NO_DATA_MESSAGE));

    session.dismiss_error();
    assert!(session.state().error().is_none());
}

#[test]
fn test_offline_backend_shows_connection_error() {
    let runtime = Runtime::new().unwrap();
    let mut session = session(&runtime, MockStatsService::offline(), day(15));

    session.start();
    drive_until(&mut session, |s| !s.is_loading());

    assert!(session.state().catchers().is_empty());
    assert_eq!(
        session.state().error(),
        Some("Failed to connect to backend. Make sure the stats server is running.")
    );
}

#[test]
fn test_mock_health_reports_ok() {
    let health = tokio_test::block_on(MockStatsService::new().health()).unwrap();
    assert!(health.is_ok());
    assert!(health.timestamp.is_some());
}

pub mod client;
pub mod dashboard_state;
pub mod report;
pub mod session;

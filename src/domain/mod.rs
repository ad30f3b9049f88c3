pub mod catcher;
pub mod dates;
pub mod errors;
pub mod grading;
pub mod metrics;
pub mod plot;
pub mod ports;

pub mod core;
pub mod factory;
pub mod headshots;
pub mod mock;
pub mod plot_decoder;
pub mod statcast_api;

pub use factory::ServiceFactory;
pub use statcast_api::HttpStatsService;

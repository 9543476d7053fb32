pub mod service;

mod errors;
pub mod models;
pub mod repository;

pub use errors::StatsError;
pub use models::*;
pub use repository::{FileStatisticsRepository, InMemoryStatisticsRepository, StatisticsRepository};
pub use service::{StatisticService, StatisticsStore};

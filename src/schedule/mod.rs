/// Schedule snapshot plumbing
///
/// Fetching, caching, and serving the rotation schedule snapshot the
/// search engine reads.

pub mod cache;
pub mod config;
pub mod models;
pub mod source;
pub mod store;

pub use cache::FileCache;
pub use config::ScheduleConfig;
pub use models::{Rule, ScheduleIndex, Stage, TimeSlot, VersusSchedules, Weapon};
pub use source::{HttpScheduleSource, ScheduleSource};
pub use store::{ScheduleStore, StoreStatus};

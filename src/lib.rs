/// splat-rotations library
///
/// Query-resolution core for a Splatoon 3 schedule lookup assistant:
/// shorthand text in, matching rotation slots out.

pub mod core;
pub mod error;
pub mod schedule;

// Re-exports for convenience
pub use crate::core::mode::{get_mode, Mode, ModeId, RuleKey};
pub use crate::core::parser::{parse, SearchQuery};
pub use crate::core::search::{search, SearchResult};
pub use error::{Result, ScheduleError};
pub use schedule::config::ScheduleConfig;
pub use schedule::store::ScheduleStore;

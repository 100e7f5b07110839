// Service exports
pub mod cache;
pub mod postgres;
pub mod ranking;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use postgres::{PostgresError, PostgresStore};
pub use ranking::{score_candidate, SkillRanker};

pub mod filter;
pub mod ids;
pub mod tune;

pub use filter::AttributeFilter;
pub use ids::TuneId;
pub use tune::TuneRecord;

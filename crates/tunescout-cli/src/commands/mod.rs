pub mod config;
pub mod describe;
pub mod query;
pub mod rank;

pub use describe::describe_corpus;
pub use query::run_query;
pub use rank::run_rank;

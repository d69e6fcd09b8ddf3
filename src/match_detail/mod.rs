pub mod aggregator;

pub use aggregator::{MatchDetailAggregator, MatchDetailBundle};

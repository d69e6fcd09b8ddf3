pub mod cache;
pub mod refresher;

pub use cache::{LiveMatchCache, LiveMatches};
pub use refresher::RefresherHandle;

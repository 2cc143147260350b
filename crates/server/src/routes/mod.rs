pub mod health;
pub mod search;

pub use health::health;
pub use search::{ai_search, ai_search_resources};

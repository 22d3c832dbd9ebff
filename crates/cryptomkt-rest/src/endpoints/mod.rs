//! API endpoint implementations

pub mod account;
pub mod market;
pub mod orders;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use orders::OrderEndpoints;

/// Page size sent with every paginated request
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

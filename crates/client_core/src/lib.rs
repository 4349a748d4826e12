pub mod api;
pub mod metrics;
pub mod orders;
pub mod session;

pub use api::ApiClient;
pub use metrics::{EarningsSummary, DELIVERY_REWARD};
pub use orders::OrdersViewModel;
pub use session::{Session, SessionManager, AUTH_TOKEN_KEY, AUTH_USER_KEY};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

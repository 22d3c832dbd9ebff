//! Private account endpoints

use cryptomkt_auth::Credentials;
use tracing::{debug, instrument};

use crate::error::RestResult;
use crate::executor::{EndpointCall, RequestExecutor};
use crate::types::BalanceResponse;

/// Account endpoints (requires authentication)
pub struct AccountEndpoints<'a> {
    executor: &'a RequestExecutor,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor, credentials: &'a Credentials) -> Self {
        Self {
            executor,
            credentials,
        }
    }

    /// Get the balance of every wallet
    #[instrument(skip(self))]
    pub async fn balance(&self) -> RestResult<BalanceResponse> {
        debug!("Fetching wallet balances");
        self.executor
            .fetch(&EndpointCall::private_get("balance"), Some(self.credentials))
            .await
    }
}

use url::Url;

use crate::CosmosError;

/// Largest page `tx_search` will return
pub const MAX_PAGE_SIZE: u8 = 100;

/// Cosmos RPC connection configuration
#[derive(Debug, Clone)]
pub struct ConnectionConf {
    /// The RPC url to connect to
    rpc_url: Url,
    /// Transactions requested per tx_search page
    page_size: u8,
}

impl ConnectionConf {
    /// Create a new connection configuration
    pub fn new(rpc_url: &str, page_size: u32) -> Result<Self, CosmosError> {
        let rpc_url = Url::parse(rpc_url).map_err(|e| CosmosError::InvalidRpcUrl {
            url: rpc_url.to_owned(),
            reason: e.to_string(),
        })?;
        let page_size = u8::try_from(page_size)
            .ok()
            .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
            .ok_or(CosmosError::InvalidPageSize(page_size))?;
        Ok(Self { rpc_url, page_size })
    }

    /// Get the RPC url
    pub fn get_rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Get the tx_search page size
    pub fn get_page_size(&self) -> u8 {
        self.page_size
    }
}

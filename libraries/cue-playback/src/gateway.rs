//! Catalogue gateway
//!
//! The synchronizer never fetches by itself. A gateway answers the
//! [`PageRequest`]s it issues; the HTTP implementation lives in
//! `cue-catalogue`.

use crate::catalogue::{CatalogueQuery, MasterList, PageData};
#[cfg(feature = "runtime")]
use crate::catalogue::{CatalogueUpdate, PageRequest};
use crate::error::GatewayError;
use async_trait::async_trait;

/// Source of catalogue pages and master lists
#[async_trait]
pub trait CatalogueGateway: Send + Sync {
    /// Fetch one page of rows under `query`
    async fn fetch_page(&self, query: &CatalogueQuery, page: u32)
        -> Result<PageData, GatewayError>;

    /// Fetch the full ordered id sequence under `query`
    async fn fetch_master(&self, query: &CatalogueQuery) -> Result<MasterList, GatewayError>;
}

/// Perform every fetch `request` needs
///
/// The page and master list are fetched concurrently when both are needed.
#[cfg(feature = "runtime")]
pub async fn fetch_update<G>(
    gateway: &G,
    request: &PageRequest,
) -> Result<CatalogueUpdate, GatewayError>
where
    G: CatalogueGateway + ?Sized,
{
    if request.include_master {
        let (page, master) = tokio::join!(
            gateway.fetch_page(&request.query, request.page),
            gateway.fetch_master(&request.query)
        );
        Ok(CatalogueUpdate {
            page: page?,
            master: Some(master?),
        })
    } else {
        Ok(CatalogueUpdate {
            page: gateway.fetch_page(&request.query, request.page).await?,
            master: None,
        })
    }
}

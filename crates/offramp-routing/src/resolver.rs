//! Route resolution for one cash-out attempt.
//!
//! Direct mapping first: when the partner can receive the escrowed
//! (chain, token) as-is, no bridging happens. Otherwise bridging is
//! mandatory and always targets the fixed fallback asset — USDC on
//! Optimism — regardless of which other candidates the venue returned.
//! The candidate list and the contract version act purely as eligibility
//! gates.

use std::sync::Arc;

use tracing::{debug, info};

use offramp_types::{
    OfframpError, PartnerAssetMap, PaymentLink, Result, RouteRequest, SettlementRoute,
    TokenAddress, ChainId, constants,
};

use crate::venue::{BridgingVenue, eligible_options};
use crate::version::check_min_version;

/// Decides whether a claimed asset settles directly or via the fallback
/// bridge.
pub struct RouteResolver {
    assets: PartnerAssetMap,
    venue: Arc<dyn BridgingVenue>,
    testnet: bool,
}

impl RouteResolver {
    #[must_use]
    pub fn new(assets: PartnerAssetMap, venue: Arc<dyn BridgingVenue>, testnet: bool) -> Self {
        Self {
            assets,
            venue,
            testnet,
        }
    }

    /// Resolve the settlement route for a funded link.
    ///
    /// `contract_version` is the escrow contract version on the source
    /// chain; it gates the cross-chain path only.
    ///
    /// # Errors
    /// - [`OfframpError::RouteUnavailable`] when no eligible bridging target
    ///   exists for the source chain
    /// - [`OfframpError::ContractVersionTooOld`] when the escrow contract
    ///   predates cross-chain claims
    /// - [`OfframpError::FallbackRouteMissing`] when the venue cannot route
    ///   to the fallback asset
    pub async fn resolve(
        &self,
        link: &PaymentLink,
        contract_version: &str,
    ) -> Result<SettlementRoute> {
        if let Some((chain_name, currency)) = self.assets.names_for(&link.chain_id, &link.token_address) {
            debug!(chain = chain_name, currency, "direct settlement mapping found");
            return Ok(SettlementRoute::Direct {
                chain_name: chain_name.to_string(),
                currency: currency.to_string(),
            });
        }

        // No direct mapping: bridging to the fallback asset is mandatory.
        let options = self
            .venue
            .chain_options(&link.chain_id, link.token_type(), self.testnet)
            .await?;
        let eligible = eligible_options(options, &link.chain_id);
        if eligible.is_empty() {
            return Err(OfframpError::RouteUnavailable(link.chain_id.clone()));
        }

        check_min_version(constants::MIN_XCHAIN_CONTRACT_VERSION, contract_version)?;

        let dest_chain_id = ChainId::new(constants::OPTIMISM_CHAIN_ID);
        let dest_token = TokenAddress::new(constants::USDC_ADDRESS_OPTIMISM);
        let request = RouteRequest {
            source_token: link.token_address.clone(),
            source_chain_id: link.chain_id.clone(),
            dest_token: dest_token.clone(),
            dest_chain_id: dest_chain_id.clone(),
            token_decimals: link.token_decimals,
            token_amount: link.token_amount.clone(),
            sender_address: link.sender_address.clone(),
        };
        let route = self
            .venue
            .compute_route(&request)
            .await?
            .ok_or(OfframpError::FallbackRouteMissing)?;

        let (chain_name, currency) = self
            .assets
            .names_for(&dest_chain_id, &dest_token)
            .ok_or_else(|| {
                OfframpError::Configuration("fallback asset missing from partner asset map".into())
            })?;

        info!(
            source_chain = %link.chain_id,
            route_id = %route.route_id,
            "bridging to fallback asset"
        );
        Ok(SettlementRoute::Bridged {
            chain_name: chain_name.to_string(),
            currency: currency.to_string(),
            dest_chain_id,
            dest_token,
            route,
        })
    }
}

//! # Domain Value Objects

use serde::{Deserialize, Serialize};

/// Identifier of a settlement domain (chain) in a cross-domain route.
pub type DomainId = u32;

/// What the renter must escrow at rental creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowPolicy {
    /// Collateral only (`cost * collateral_ratio`).
    #[default]
    CollateralOnly,
    /// Lease cost plus collateral.
    CostPlusCollateral,
}

impl std::str::FromStr for EscrowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "collateral" | "collateral-only" | "collateral_only" => Ok(Self::CollateralOnly),
            "cost-plus-collateral" | "cost_plus_collateral" => Ok(Self::CostPlusCollateral),
            other => Err(format!("unknown escrow policy: {other}")),
        }
    }
}

/// Observable lifecycle of a rental.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalStatus {
    /// Swaps accepted.
    Active,
    /// Past `end_time` but not yet settled. Swaps rejected.
    Expired,
    /// Settled. Terminal.
    Ended,
}

/// Source and destination of a cross-domain swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossDomainRoute {
    /// Domain the input comes from.
    pub source_domain: DomainId,
    /// Domain the output goes to.
    pub dest_domain: DomainId,
}

impl CrossDomainRoute {
    /// Source and destination differ.
    pub fn is_cross_domain(&self) -> bool {
        self.source_domain != self.dest_domain
    }
}

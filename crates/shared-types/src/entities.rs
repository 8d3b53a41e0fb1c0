//! # Core Identifiers and Amounts
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `TokenId`
//! - **Records**: `ChannelId`, `PoolId`, `RentalId`
//! - **Value**: `Amount` (U256 base units), basis-point helpers

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte hash (keccak256 in this system).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address identifying a participant.
///
/// Derived from the last 20 bytes of keccak256(uncompressed secp256k1 pubkey).
pub type Address = [u8; 20];

/// Asset identifier (token contract address).
pub type TokenId = Address;

/// Opaque 32-byte channel identifier.
pub type ChannelId = Hash;

/// Pool identifier.
pub type PoolId = u64;

/// Rental identifier.
pub type RentalId = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Non-negative amount in the fixed base unit.
pub type Amount = U256;

/// Basis-point denominator (10000 = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Compute `amount * bps / 10000`, rounding down.
///
/// Returns `None` on overflow of the intermediate product.
pub fn bps_of(amount: Amount, bps: u64) -> Option<Amount> {
    amount
        .checked_mul(U256::from(bps))
        .map(|scaled| scaled / U256::from(BPS_DENOMINATOR))
}

/// Short hex form of an id for log fields (`0xabcd…ef01`).
pub fn short_hex(bytes: &[u8]) -> String {
    if bytes.len() <= 4 {
        return format!("0x{}", hex::encode(bytes));
    }
    format!(
        "0x{}…{}",
        hex::encode(&bytes[..2]),
        hex::encode(&bytes[bytes.len() - 2..])
    )
}

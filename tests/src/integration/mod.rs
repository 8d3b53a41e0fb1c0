//! # Integration Flows
//!
//! Cross-subsystem flows through a fully wired node:
//!
//! - `channel_flow` - open → update → close, replay and intent separation
//! - `rental_flow` - lease lifecycle, fee accrual, direct and channel settlement
//! - `dispute_flow` - unilateral exits through the dispute window
//! - `persistence_flow` - snapshot, restart, continue
//! - `concurrency` - independent progress of unrelated records

pub mod channel_flow;
pub mod concurrency;
pub mod dispute_flow;
pub mod persistence_flow;
pub mod rental_flow;

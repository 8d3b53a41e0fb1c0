//! # Liquidity Lease Runtime
//!
//! Builds and runs a Liquidity Lease node.
//!
//! ## Modular Structure
//!
//! - `config` - `LeaseConfig` with environment overrides and validation
//! - `telemetry` - `tracing-subscriber` installation
//! - `container` - every subsystem wired behind its port
//! - `persistence` - JSON snapshots of the durable record set
//! - `demo` - scripted end-to-end lease
//!
//! ## Startup Sequence
//!
//! 1. Load and validate configuration
//! 2. Install logging
//! 3. Build the container
//! 4. Restore the last snapshot, if any
//! 5. Run the demo lease
//! 6. Save a snapshot

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod container;
pub mod demo;
pub mod persistence;
pub mod telemetry;

pub use config::{ConfigError, LeaseConfig, StorageConfig, TelemetryConfig};
pub use container::LeaseContainer;
pub use demo::{run_demo, DemoReport};
pub use persistence::{LeaseSnapshot, PersistenceError, SnapshotStore, SNAPSHOT_VERSION};
pub use telemetry::{init_logging, TelemetryError};

//! Multi-target content distribution core.
//!
//! One piece of content goes out to N independent external destinations,
//! each reachable only through a fragile UI-driving automation adapter.
//! This crate owns everything between the caller and those adapters:
//! structural content validation, target resolution, concurrent or
//! sequential fan-out with per-target failure isolation, partial-failure
//! aggregation, selective retry, and the persisted session store that
//! remembers per-target authentication state across invocations.
//!
//! Adapters are external: they implement [`PlatformAdapter`] and are
//! registered in an [`AdapterRegistry`] at startup. The orchestrator calls
//! only through that contract and never special-cases a destination.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use crier::{AdapterRegistry, Content, DispatchMode, DistributionConfig, Orchestrator, SessionStore};
//! # async fn demo(registry: AdapterRegistry) -> crier::Result<()> {
//! let store = Arc::new(SessionStore::open_default()?);
//! let config = DistributionConfig::load_default()?;
//! let orchestrator = Orchestrator::new(registry, store, config);
//!
//! let result = orchestrator
//!     .distribute(&Content::text("hello"), None, DispatchMode::Concurrent)
//!     .await?;
//! assert_eq!(result.overall_success, result.success_count > 0);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod content;
pub mod error;
pub mod orchestrator;
pub mod retry;
pub mod session;

pub use adapter::{
	AdapterRegistry, AuthenticateOptions, Capabilities, CapabilityLimits, PlatformAdapter,
	SubmitReceipt,
};
pub use config::{DistributionConfig, TargetConfig};
pub use content::{Content, ContentKind, ValidationReport, validate};
pub use error::{Error, Result};
pub use orchestrator::{AggregateResult, DispatchMode, Orchestrator, PostOutcome};
pub use retry::RetryCoordinator;
pub use session::{Credential, ObservedContext, SessionRecord, SessionStore, Viewport};

//! Cirrus Cloud
//!
//! Provider-neutral plumbing shared by cirrus resource implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  orchestrator                    │
//! └─────────────────┬───────────────────────────────┘
//!                   │ resource type name
//! ┌─────────────────▼───────────────────────────────┐
//! │                 cirrus-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ResourceRegistry → ResourceHandler<C>    │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ ResourceData │  │   MutexKv    │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │ client C (e.g. cirrus-aws ResolvedSession)
//! ┌───────▼───────┐
//! │   cloud API   │
//! └───────────────┘
//! ```

pub mod error;
pub mod mutex_kv;
pub mod resource;

// Re-exports
pub use error::{CloudError, Result};
pub use mutex_kv::MutexKv;
pub use resource::{ResourceData, ResourceHandler, ResourceRegistry};

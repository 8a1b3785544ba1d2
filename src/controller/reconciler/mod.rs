//! # Reconciler
//!
//! Core reconciliation logic for `FallbackOrigin` resources.
//!
//! The reconciler:
//! - Watches cluster-scoped `FallbackOrigin` resources
//! - Holds a finalizer so the Cloudflare fallback origin is released on delete
//! - Runs the managed resource lifecycle (connect, observe, create/update/delete)
//! - Records `atProvider`, conditions and the external name on the resource
//!
//! ## Reconciliation Flow
//!
//! 1. Add the finalizer if missing
//! 2. Resolve ProviderConfig credentials and build a Cloudflare client
//! 3. Observe the zone's fallback origin
//! 4. Create it when absent, update it when the origin differs
//! 5. Update status and requeue after the poll interval

pub mod reconcile;
pub mod status;
pub mod types;

pub use reconcile::reconcile;
pub use types::{Reconciler, ReconcilerError};

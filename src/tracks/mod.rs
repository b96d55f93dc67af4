//! # Tracks Module
//!
//! Client-side cache and synchronization layer between the UI and the
//! paginated Jamendo search API.
//!
//! ```text
//! settled input ──▶ SearchSession ──▶ SyncController ──▶ CatalogApi
//!                                          │
//!                                          ▼
//!                       Store (TracksState, request ledger)
//!                          │                     │
//!                          ▼                     ▼
//!                      selectors           snapshot (prune/restore)
//! ```
//!
//! - [`keys`] - request keys for the ledger
//! - [`state`] - normalized state, actions and the reducer
//! - [`store`] - dispatching store with subscriptions
//! - [`selectors`] - pure and memoized read-side projections
//! - [`controller`] - fetch-or-skip decisions, offline handling, commits
//! - [`snapshot`] - bounded persistence with a 30 minute freshness window
//! - [`session`] - search input and paging on top of the controller
//! - [`connectivity`] - reachability signal
//! - [`messages`] - ledger messages for catalog failures

pub mod connectivity;
pub mod controller;
pub mod keys;
pub mod messages;
pub mod selectors;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod store;

pub use connectivity::{Connectivity, NetState, NetworkProbe};
pub use controller::{FetchOutcome, SyncController};
pub use keys::{detail_key, list_key};
pub use session::{SearchSession, SearchView};
pub use snapshot::{PersistStorage, PersistableSnapshot, SnapshotError, SnapshotManager};
pub use state::{Action, CacheMeta, QueryMeta, RequestStatus, TracksState};
pub use store::{SharedStore, Store, SubscriptionId};

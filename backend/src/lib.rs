//! Carbon footprint tracking backend.
//!
//! Two services share this crate: `carbon-track` (submissions, history and
//! leaderboards) and `user-directory` (registration and user totals). Both are
//! built from the domain services in [`domain`], exposed through the actix
//! handlers in [`inbound`], and backed by the adapters in [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;

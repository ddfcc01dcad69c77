//! Bookswap backend.
//!
//! Students publish used books and notes as listings, browse a feed of what
//! is still on offer and ask owners for items. Owners approve or reject those
//! requests from their inbox.
//!
//! The crate is laid out hexagonally: [`domain`] holds the types, services
//! and ports; [`inbound::http`] adapts the driving ports to actix-web; and
//! [`outbound::memory`] implements the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
pub use settings::AppSettings;

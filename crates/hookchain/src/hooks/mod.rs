//! Hook system — registry, dispatcher, and registration records.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{CallerInfo, EventInfo, ListingRow, Priority, RegisteredListener};
pub use dispatcher::Dispatcher;
pub use registry::HookRegistry;

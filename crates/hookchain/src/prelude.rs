//! Prelude for convenient imports.

pub use hookchain_core::config::dispatcher::DispatcherConfig;
pub use hookchain_core::{ErrorKind, HookError, HookResult};

pub use crate::hooks::definitions::{EventInfo, ListingRow, Priority};
pub use crate::hooks::dispatcher::Dispatcher;
pub use crate::invocation::Invocation;
pub use crate::listener::Listener;
pub use crate::request::HookRequest;
pub use crate::value::{Truthy, Value};

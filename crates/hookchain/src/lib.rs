//! # hookchain
//!
//! Priority-ordered, chainable hook dispatcher. Provides:
//!
//! - Listener registration by hook name with priority ordering
//! - Output chaining: each listener receives the previous listener's output
//! - Wildcard hook names (`user.*`) compiled once at registration
//! - Per-dispatch `stop` and a run-once fallback [`Invocation`]
//! - One-shot mocks for tests
//! - Introspection of registered hooks for diagnostic listings

pub mod hooks;
pub mod invocation;
pub mod listener;
pub mod pattern;
pub mod prelude;
pub mod request;
pub mod value;

pub use hooks::definitions::{CallerInfo, EventInfo, ListingRow, Priority, RegisteredListener};
pub use hooks::dispatcher::Dispatcher;
pub use hooks::registry::HookRegistry;
pub use invocation::Invocation;
pub use listener::Listener;
pub use pattern::HookPattern;
pub use request::HookRequest;
pub use value::{Truthy, Value};

pub use hookchain_core::{ErrorKind, HookError, HookResult};

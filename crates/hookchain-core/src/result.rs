//! Convenience result type alias for hookchain.

use crate::error::HookError;

/// A specialized `Result` type for hook registration and dispatch.
///
/// Listener and fallback callables return this type as well, so a failing
/// listener can use `?` on anything that converts into [`HookError`].
pub type HookResult<T> = Result<T, HookError>;

//! The listener interface.

use hookchain_core::HookResult;

use crate::invocation::Invocation;
use crate::value::Value;

/// A callable bound to a hook name and priority.
///
/// `previous` is the output of the listener before this one (or the
/// wrapped content for the first listener). `params` are the caller's
/// arguments, and `wildcards` holds the text captured by each `*` when the
/// hook was reached through a pattern. The returned value becomes the
/// `previous` of the next listener.
pub trait Listener: Send + Sync {
    /// Handles one step of a dispatch.
    fn handle(
        &self,
        invocation: &Invocation,
        previous: Value,
        params: &[Value],
        wildcards: &[String],
    ) -> HookResult<Value>;
}

impl<F> Listener for F
where
    F: Fn(&Invocation, Value, &[Value], &[String]) -> HookResult<Value> + Send + Sync,
{
    fn handle(
        &self,
        invocation: &Invocation,
        previous: Value,
        params: &[Value],
        wildcards: &[String],
    ) -> HookResult<Value> {
        self(invocation, previous, params, wildcards)
    }
}

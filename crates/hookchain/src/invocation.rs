//! Run-once wrapper around a dispatch fallback.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hookchain_core::HookResult;

use crate::value::Value;

/// Signature of a fallback callable.
pub type FallbackFn = dyn Fn(&[Value]) -> HookResult<Value> + Send + Sync;

/// A fallback callable plus its default arguments, executed at most once.
///
/// One `Invocation` is created per dispatch and handed to every listener in
/// the chain. A listener may run the fallback itself (for example to wrap
/// the default output); once it has run, the dispatcher's own attempt is a
/// no-op returning `Null`.
pub struct Invocation {
    target: Option<Arc<FallbackFn>>,
    defaults: Vec<Value>,
    has_run: AtomicBool,
}

impl Invocation {
    /// Wraps `target`, called with `defaults` unless overridden.
    pub fn new<F>(target: F, defaults: Vec<Value>) -> Self
    where
        F: Fn(&[Value]) -> HookResult<Value> + Send + Sync + 'static,
    {
        Self::from_shared(Arc::new(target), defaults)
    }

    /// Wraps an already shared fallback.
    pub fn from_shared(target: Arc<FallbackFn>, defaults: Vec<Value>) -> Self {
        Self {
            target: Some(target),
            defaults,
            has_run: AtomicBool::new(false),
        }
    }

    /// An invocation with nothing to run. Calling it yields `Null`.
    pub fn empty() -> Self {
        Self {
            target: None,
            defaults: Vec::new(),
            has_run: AtomicBool::new(false),
        }
    }

    /// Runs the fallback if it has not run yet.
    ///
    /// Non-empty `args` replace the stored defaults. Every call after the
    /// first returns `Null` without running anything.
    pub fn call(&self, args: Option<&[Value]>) -> HookResult<Value> {
        if self.has_run.swap(true, Ordering::AcqRel) {
            return Ok(Value::Null);
        }

        let Some(target) = &self.target else {
            return Ok(Value::Null);
        };

        let args = match args {
            Some(args) if !args.is_empty() => args,
            _ => self.defaults.as_slice(),
        };

        target(args)
    }

    /// Re-arms the invocation for exactly one more execution.
    pub fn reset(&self) {
        self.has_run.store(false, Ordering::Release);
    }

    /// Returns whether the fallback has already been consumed.
    pub fn has_run(&self) -> bool {
        self.has_run.load(Ordering::Acquire)
    }

    /// Returns whether there is a callable behind this invocation.
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// The default arguments the fallback will receive.
    pub fn defaults(&self) -> &[Value] {
        &self.defaults
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("has_target", &self.has_target())
            .field("defaults", &self.defaults)
            .field("has_run", &self.has_run())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn counting(counter: Arc<AtomicUsize>) -> Invocation {
        Invocation::new(
            move |args: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(json!(args))
            },
            vec![json!("default")],
        )
    }

    #[test]
    fn test_runs_at_most_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let invocation = counting(counter.clone());

        assert_eq!(invocation.call(None).unwrap(), json!(["default"]));
        assert_eq!(invocation.call(None).unwrap(), Value::Null);
        assert_eq!(invocation.call(Some(&[json!(1)])).unwrap(), Value::Null);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(invocation.has_run());
    }

    #[test]
    fn test_override_args() {
        let invocation = counting(Arc::new(AtomicUsize::new(0)));
        assert_eq!(
            invocation.call(Some(&[json!("a"), json!("b")])).unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_empty_override_uses_defaults() {
        let invocation = counting(Arc::new(AtomicUsize::new(0)));
        assert_eq!(invocation.call(Some(&[])).unwrap(), json!(["default"]));
    }

    #[test]
    fn test_reset_allows_one_more_run() {
        let counter = Arc::new(AtomicUsize::new(0));
        let invocation = counting(counter.clone());

        invocation.call(None).unwrap();
        invocation.reset();
        assert!(!invocation.has_run());
        assert_eq!(invocation.call(None).unwrap(), json!(["default"]));
        assert_eq!(invocation.call(None).unwrap(), Value::Null);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_invocation_returns_null() {
        let invocation = Invocation::empty();
        assert!(!invocation.has_target());
        assert_eq!(invocation.call(None).unwrap(), Value::Null);
        assert!(invocation.has_run());
    }
}

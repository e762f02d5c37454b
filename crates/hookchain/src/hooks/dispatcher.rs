//! Hook dispatcher — resolves a hook name and runs its listener chain.
//!
//! For every `get`:
//! - A pending one-shot mock short-circuits the chain when it is truthy.
//! - Listeners run in priority order, each receiving the previous output.
//! - `stop` ends the chain before the next listener.
//! - A falsy final output falls back to the request's fallback, once.
//!
//! The lock is never held while a listener runs, so listeners may call
//! back into the dispatcher.

use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, warn};
use uuid::Uuid;

use hookchain_core::config::dispatcher::DispatcherConfig;
use hookchain_core::{HookError, HookResult};

use super::definitions::{CallerInfo, EventInfo, ListingRow, Priority, RegisteredListener};
use super::registry::{HookRegistry, ResolvedChain};
use crate::invocation::Invocation;
use crate::listener::Listener;
use crate::request::HookRequest;
use crate::value::{Truthy, Value};

/// A dispatch currently running on some thread.
struct DispatchFrame {
    id: Uuid,
    hook: String,
    matched: String,
    stop_requested: bool,
}

struct DispatcherState {
    registry: HookRegistry,
    /// Per-thread stack of running dispatches, innermost last.
    in_flight: HashMap<ThreadId, Vec<DispatchFrame>>,
    mocks: HashMap<String, Value>,
    testing: bool,
}

/// Pops its frame when the chain finishes, fails, or unwinds.
struct FrameGuard<'a> {
    dispatcher: &'a Dispatcher,
    thread: ThreadId,
    id: Uuid,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.dispatcher.lock();
        if let Some(frames) = state.in_flight.get_mut(&self.thread) {
            frames.retain(|f| f.id != self.id);
            if frames.is_empty() {
                state.in_flight.remove(&self.thread);
            }
        }
    }
}

/// Registers listeners and dispatches hooks to them.
///
/// Construct one per application and share it (usually in an `Arc`).
/// Listeners that need to call [`Dispatcher::stop`] should capture a
/// `Weak` handle to avoid a reference cycle.
pub struct Dispatcher {
    config: DispatcherConfig,
    state: Mutex<DispatcherState>,
}

impl Dispatcher {
    /// Creates a dispatcher with no listeners.
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            state: Mutex::new(DispatcherState {
                registry: HookRegistry::new(config.wildcards),
                in_flight: HashMap::new(),
                mocks: HashMap::new(),
                testing: false,
            }),
            config,
        }
    }

    /// The configuration this dispatcher was built with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, DispatcherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Registration ──

    /// Registers a closure under `hook`.
    ///
    /// `caller` labels the registering component for introspection; the
    /// source location of this call is recorded alongside it. `None`
    /// priority places the listener after all explicit priorities.
    /// Registering an explicit priority that is already taken replaces the
    /// previous listener in that slot.
    #[track_caller]
    pub fn listen<F>(
        &self,
        hook: impl Into<String>,
        caller: impl Into<String>,
        priority: Option<i64>,
        listener: F,
    ) where
        F: Fn(&Invocation, Value, &[Value], &[String]) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.listen_with(hook, caller, priority, Arc::new(listener));
    }

    /// Registers a shared [`Listener`] implementation under `hook`.
    #[track_caller]
    pub fn listen_with(
        &self,
        hook: impl Into<String>,
        caller: impl Into<String>,
        priority: Option<i64>,
        listener: Arc<dyn Listener>,
    ) {
        let location = Location::caller();
        let caller = CallerInfo {
            label: caller.into(),
            file: location.file().to_string(),
            line: location.line(),
            registered_at: Utc::now(),
        };

        self.lock()
            .registry
            .register(&hook.into(), Priority::from(priority), listener, caller);
    }

    /// Removes every listener of `hook`. Returns whether it had any.
    pub fn remove_hook(&self, hook: &str) -> bool {
        self.lock().registry.remove_hook(hook)
    }

    /// Removes every listener registered with the caller label `caller`.
    pub fn remove_caller(&self, caller: &str) -> usize {
        self.lock().registry.remove_caller(caller)
    }

    // ── Dispatch ──

    /// Produces the value of a hook.
    ///
    /// Listener and fallback errors abort the dispatch and are returned
    /// unchanged. An unknown hook is not an error; it simply has no
    /// listeners.
    pub fn get(&self, request: impl Into<HookRequest>) -> HookResult<Value> {
        let HookRequest {
            hook,
            params,
            fallback,
            content,
        } = request.into();

        let invocation = match fallback {
            Some(fallback) => Invocation::from_shared(fallback, params.clone()),
            None => Invocation::empty(),
        };

        if let Some(mock) = self.take_mock(&hook) {
            if mock.is_truthy() {
                debug!(hook = %hook, "Returning mocked value");
                return Ok(mock);
            }
            debug!(hook = %hook, "Ignoring falsy mock");
        }

        let mut output = if content.is_empty() {
            Value::Null
        } else {
            Value::String(content)
        };

        let chain = self.lock().registry.resolve(&hook);
        if let Some(chain) = chain {
            output = self.run_chain(&hook, chain, &invocation, output, &params)?;
        } else {
            debug!(hook = %hook, "No listeners for hook");
        }

        if !output.is_truthy() {
            output = invocation.call(None)?;
        }

        Ok(output)
    }

    fn run_chain(
        &self,
        hook: &str,
        chain: ResolvedChain,
        invocation: &Invocation,
        mut output: Value,
        params: &[Value],
    ) -> HookResult<Value> {
        let frame = self.enter(hook, &chain.matched);

        debug!(
            hook = %hook,
            matched = %chain.matched,
            dispatch_id = %frame.id,
            listener_count = chain.listeners.len(),
            "Dispatching hook"
        );

        for (index, (listener, caller)) in chain.listeners.iter().enumerate() {
            if self.take_stop(&frame) {
                debug!(
                    hook = %hook,
                    dispatch_id = %frame.id,
                    skipped = chain.listeners.len() - index,
                    "Dispatch stopped"
                );
                break;
            }

            output = listener
                .handle(invocation, output, params, &chain.wildcards)
                .inspect_err(|e| {
                    warn!(
                        hook = %hook,
                        caller = %caller,
                        dispatch_id = %frame.id,
                        error = %e,
                        "Hook listener failed"
                    );
                })?;
        }

        Ok(output)
    }

    fn enter(&self, hook: &str, matched: &str) -> FrameGuard<'_> {
        let thread = thread::current().id();
        let id = Uuid::now_v7();

        self.lock()
            .in_flight
            .entry(thread)
            .or_default()
            .push(DispatchFrame {
                id,
                hook: hook.to_string(),
                matched: matched.to_string(),
                stop_requested: false,
            });

        FrameGuard {
            dispatcher: self,
            thread,
            id,
        }
    }

    /// Consumes a stop request aimed at `frame`, if any.
    fn take_stop(&self, frame: &FrameGuard<'_>) -> bool {
        self.lock()
            .in_flight
            .get_mut(&frame.thread)
            .and_then(|frames| frames.iter_mut().find(|f| f.id == frame.id))
            .is_some_and(|f| std::mem::take(&mut f.stop_requested))
    }

    /// Halts the remaining listeners of the running dispatch of `hook`.
    ///
    /// Targets the innermost dispatch on the calling thread whose requested
    /// or matched name is `hook`; a listener already running is not
    /// interrupted. With no such dispatch the call does nothing; later
    /// dispatches are never affected.
    pub fn stop(&self, hook: &str) {
        let thread = thread::current().id();
        let mut state = self.lock();

        let frame = state.in_flight.get_mut(&thread).and_then(|frames| {
            frames
                .iter_mut()
                .rev()
                .find(|f| f.hook == hook || f.matched == hook)
        });

        match frame {
            Some(frame) => {
                frame.stop_requested = true;
                debug!(hook = %hook, dispatch_id = %frame.id, "Stop requested");
            }
            None => {
                debug!(hook = %hook, "Stop requested with no running dispatch, ignoring");
            }
        }
    }

    // ── Mocks ──

    /// Makes the next `get` of `hook` return `value` without running the
    /// chain. Falsy values are consumed but ignored by `get`.
    pub fn mock(&self, hook: impl Into<String>, value: Value) {
        let hook = hook.into();

        if !self.config.allow_mocks {
            warn!(hook = %hook, "Mocks are disabled, ignoring mock");
            return;
        }

        debug!(hook = %hook, "Mock registered");
        let mut state = self.lock();
        state.testing = true;
        state.mocks.insert(hook, value);
    }

    fn take_mock(&self, hook: &str) -> Option<Value> {
        let mut state = self.lock();
        if !state.testing {
            return None;
        }
        state.mocks.remove(hook)
    }

    /// Returns whether any mock has ever been registered.
    pub fn is_testing(&self) -> bool {
        self.lock().testing
    }

    /// Drops all pending mocks. Testing mode stays on.
    pub fn clear_mocks(&self) {
        self.lock().mocks.clear();
    }

    // ── Introspection ──

    /// Names of all hooks with at least one listener, lexically sorted.
    pub fn hooks(&self) -> Vec<String> {
        self.lock().registry.hook_names()
    }

    /// Priority and registration site of each listener of `hook`, in
    /// execution order.
    pub fn events(&self, hook: &str) -> HookResult<Vec<EventInfo>> {
        self.lock()
            .registry
            .events(hook)
            .ok_or_else(|| HookError::not_found(format!("Hook '{hook}' is not registered")))
    }

    /// The registration table, or only the entry for `hook`. Empty when
    /// `hook` has no listeners.
    pub fn listeners(&self, hook: Option<&str>) -> IndexMap<String, Vec<RegisteredListener>> {
        self.lock().registry.listeners(hook)
    }

    /// Returns whether `hook` has listeners registered under exactly that name.
    pub fn has_listeners(&self, hook: &str) -> bool {
        self.lock().registry.has_listeners(hook)
    }

    /// Number of listeners registered under exactly `hook`.
    pub fn listener_count(&self, hook: &str) -> usize {
        self.lock().registry.listener_count(hook)
    }

    /// One row per listener, sorted by hook name then execution order.
    pub fn listing(&self) -> Vec<ListingRow> {
        let state = self.lock();
        state
            .registry
            .hook_names()
            .into_iter()
            .flat_map(|hook| {
                state
                    .registry
                    .events(&hook)
                    .unwrap_or_default()
                    .into_iter()
                    .map(move |event| ListingRow {
                        hook: hook.clone(),
                        priority: event.priority,
                        caller: event.caller.label,
                        location: format!("{}:{}", event.caller.file, event.caller.line),
                    })
            })
            .collect()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::default())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("hooks", &self.hooks())
            .field("testing", &self.is_testing())
            .finish()
    }
}

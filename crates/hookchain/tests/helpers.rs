//! Shared helpers for dispatcher integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use hookchain::prelude::*;
use serde_json::json;

/// Records the order in which listeners ran.
#[derive(Clone, Default)]
pub struct Trace {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: &str) {
        self.calls.lock().unwrap().push(label.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Registers a listener that records `label` and passes `previous` through
/// with `label` appended.
#[track_caller]
pub fn append(dispatcher: &Dispatcher, hook: &str, priority: Option<i64>, label: &'static str, trace: &Trace) {
    let trace = trace.clone();
    dispatcher.listen(hook, "tests", priority, move |_, previous, _, _| {
        trace.push(label);
        let previous = previous.as_str().unwrap_or_default().to_string();
        Ok(json!(format!("{previous}{label}")))
    });
}

/// A fallback returning `value` regardless of its arguments.
pub fn fallback_to(value: Value) -> impl Fn(&[Value]) -> HookResult<Value> + Send + Sync + 'static {
    move |_| Ok(value.clone())
}

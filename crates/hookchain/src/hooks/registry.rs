//! Hook registry — listeners registered by hook name with priority ordering.
//!
//! The registry is plain data; the dispatcher owns it behind its lock.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{info, warn};

use super::definitions::{CallerInfo, EventInfo, Priority, RegisteredListener};
use crate::listener::Listener;
use crate::pattern::HookPattern;

/// Entry in the hook registry.
struct ListenerEntry {
    priority: Priority,
    listener: Arc<dyn Listener>,
    caller: CallerInfo,
}

/// All listeners of one hook name, kept sorted by priority.
struct HookEntry {
    pattern: Option<HookPattern>,
    listeners: Vec<ListenerEntry>,
}

/// Listeners selected for one dispatch.
pub(crate) struct ResolvedChain {
    /// Registered name that matched (the pattern source for wildcard hits).
    pub matched: String,
    /// Listeners in execution order, with the label of their caller.
    pub listeners: Vec<(Arc<dyn Listener>, String)>,
    /// Text captured by each `*` of the matching pattern.
    pub wildcards: Vec<String>,
}

/// Registry of listeners organized by hook name.
///
/// Hook names keep their registration order, which is the order wildcard
/// patterns are tried in.
pub struct HookRegistry {
    hooks: IndexMap<String, HookEntry>,
    wildcards: bool,
}

impl HookRegistry {
    /// Creates an empty registry. With `wildcards` off, names containing `*`
    /// are ordinary names.
    pub fn new(wildcards: bool) -> Self {
        Self {
            hooks: IndexMap::new(),
            wildcards,
        }
    }

    /// Registers a listener.
    ///
    /// An explicit priority already taken on this hook is overwritten; the
    /// last registration wins. Default-priority listeners are appended.
    pub fn register(
        &mut self,
        hook: &str,
        priority: Priority,
        listener: Arc<dyn Listener>,
        caller: CallerInfo,
    ) {
        let wildcards = self.wildcards;
        let entry = self.hooks.entry(hook.to_string()).or_insert_with(|| HookEntry {
            pattern: compile_pattern(hook, wildcards),
            listeners: Vec::new(),
        });

        info!(
            hook = %hook,
            caller = %caller.label,
            priority = %priority,
            "Hook listener registered"
        );

        let record = ListenerEntry {
            priority,
            listener,
            caller,
        };

        if priority.is_explicit() {
            if let Some(existing) = entry.listeners.iter_mut().find(|e| e.priority == priority) {
                *existing = record;
                return;
            }
        }

        entry.listeners.push(record);
        // Stable sort keeps registration order inside the default slot
        entry.listeners.sort_by_key(|e| e.priority);
    }

    /// Removes every listener of `hook`. Returns whether it was registered.
    pub fn remove_hook(&mut self, hook: &str) -> bool {
        let removed = self.hooks.shift_remove(hook).is_some();
        if removed {
            info!(hook = %hook, "Hook removed");
        }
        removed
    }

    /// Removes every listener registered under the caller label `label`.
    /// Returns how many listeners were dropped.
    pub fn remove_caller(&mut self, label: &str) -> usize {
        let mut removed = 0;

        for entry in self.hooks.values_mut() {
            let before = entry.listeners.len();
            entry.listeners.retain(|e| e.caller.label != label);
            removed += before - entry.listeners.len();
        }

        self.hooks.retain(|_, entry| !entry.listeners.is_empty());

        info!(caller = %label, removed, "Listeners unregistered for caller");
        removed
    }

    /// Selects the chain for `hook`: the exact name if registered, else the
    /// first pattern in registration order that matches the whole name.
    pub(crate) fn resolve(&self, hook: &str) -> Option<ResolvedChain> {
        if let Some(entry) = self.hooks.get(hook) {
            return Some(ResolvedChain {
                matched: hook.to_string(),
                listeners: snapshot(entry),
                wildcards: Vec::new(),
            });
        }

        self.hooks.iter().find_map(|(name, entry)| {
            let wildcards = entry.pattern.as_ref()?.captures(hook)?;
            Some(ResolvedChain {
                matched: name.clone(),
                listeners: snapshot(entry),
                wildcards,
            })
        })
    }

    /// Returns whether any listener is registered under exactly `hook`.
    pub fn has_listeners(&self, hook: &str) -> bool {
        self.hooks
            .get(hook)
            .is_some_and(|entry| !entry.listeners.is_empty())
    }

    /// Returns the number of listeners registered under exactly `hook`.
    pub fn listener_count(&self, hook: &str) -> usize {
        self.hooks.get(hook).map_or(0, |entry| entry.listeners.len())
    }

    /// Returns all registered hook names, lexically sorted.
    pub fn hook_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .hooks
            .iter()
            .filter(|(_, entry)| !entry.listeners.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Priority and caller of each listener of `hook`, in execution order.
    pub fn events(&self, hook: &str) -> Option<Vec<EventInfo>> {
        self.hooks.get(hook).map(|entry| {
            entry
                .listeners
                .iter()
                .map(|e| EventInfo {
                    priority: e.priority,
                    caller: e.caller.clone(),
                })
                .collect()
        })
    }

    /// The registration table, or the slice for one hook.
    pub fn listeners(&self, hook: Option<&str>) -> IndexMap<String, Vec<RegisteredListener>> {
        self.hooks
            .iter()
            .filter(|(name, _)| hook.is_none_or(|h| h == name.as_str()))
            .map(|(name, entry)| {
                let listeners = entry
                    .listeners
                    .iter()
                    .map(|e| RegisteredListener {
                        priority: e.priority,
                        caller: e.caller.clone(),
                        listener: e.listener.clone(),
                    })
                    .collect();
                (name.clone(), listeners)
            })
            .collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

fn snapshot(entry: &HookEntry) -> Vec<(Arc<dyn Listener>, String)> {
    entry
        .listeners
        .iter()
        .map(|e| (e.listener.clone(), e.caller.label.clone()))
        .collect()
}

fn compile_pattern(hook: &str, wildcards: bool) -> Option<HookPattern> {
    if !wildcards || !HookPattern::is_pattern(hook) {
        return None;
    }

    match HookPattern::compile(hook) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!(hook = %hook, error = %e, "Wildcard pattern rejected, matching exactly");
            None
        }
    }
}

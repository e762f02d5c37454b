//! Arguments of a single dispatch.

use std::fmt;
use std::sync::Arc;

use hookchain_core::HookResult;

use crate::invocation::FallbackFn;
use crate::value::Value;

/// What to dispatch: hook name, caller parameters, an optional fallback,
/// and optional wrapped content.
///
/// `&str` and `String` convert into a bare request, so
/// `dispatcher.get("greeting")` works without the builder.
#[derive(Clone)]
pub struct HookRequest {
    /// Hook name to resolve.
    pub hook: String,
    /// Parameters passed to every listener and, by default, to the fallback.
    pub params: Vec<Value>,
    /// Used when the chain yields a falsy value.
    pub fallback: Option<Arc<FallbackFn>>,
    /// Content the chain starts from, such as a rendered template block.
    pub content: String,
}

impl HookRequest {
    /// Creates a request with no parameters, fallback or content.
    pub fn new(hook: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            params: Vec::new(),
            fallback: None,
            content: String::new(),
        }
    }

    /// Replaces the parameter list.
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    /// Appends one parameter.
    pub fn with_param(mut self, param: Value) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the fallback.
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&[Value]) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Sets a fallback that is already shared, e.g. reused for both halves
    /// of a wrapped template block.
    pub fn with_shared_fallback(mut self, fallback: Arc<FallbackFn>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Sets the wrapped content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

impl From<&str> for HookRequest {
    fn from(hook: &str) -> Self {
        Self::new(hook)
    }
}

impl From<String> for HookRequest {
    fn from(hook: String) -> Self {
        Self::new(hook)
    }
}

impl fmt::Debug for HookRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRequest")
            .field("hook", &self.hook)
            .field("params", &self.params)
            .field("has_fallback", &self.fallback.is_some())
            .field("content", &self.content)
            .finish()
    }
}

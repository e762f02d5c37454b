//! Wildcard hook name patterns.
//!
//! A registered hook name containing `*` is a pattern. Each `*` matches any
//! substring, including an empty one; every other character is literal.
//! Matching is anchored to the whole name.

use regex::Regex;

/// A compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct HookPattern {
    source: String,
    regex: Regex,
}

impl HookPattern {
    /// Returns whether `name` should be treated as a pattern.
    pub fn is_pattern(name: &str) -> bool {
        name.contains('*')
    }

    /// Compiles `name` into an anchored matcher.
    pub fn compile(name: &str) -> Result<Self, regex::Error> {
        let body = name
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("(.*)");
        let regex = Regex::new(&format!("^{body}$"))?;

        Ok(Self {
            source: name.to_string(),
            regex,
        })
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Matches `name`, returning the text captured by each `*` in order.
    pub fn captures(&self, name: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(name)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }

    /// Returns whether `name` matches.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

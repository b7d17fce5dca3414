//! Command registry and longest-prefix resolution.

use tracing::debug;

use crate::command::Handler;
use crate::error::{Error, Result};

struct Entry {
    name: String,
    path: Vec<String>,
    handler: Handler,
}

/// Handlers keyed by whitespace-tokenized command paths, in registration
/// order, plus an optional root handler.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
    root: Option<Handler>,
}

/// Outcome of resolving an input against the registry.
#[derive(Debug)]
pub struct Resolution<'a> {
    /// Registered name, or `None` when the root handler was chosen
    pub name: Option<&'a str>,
    /// Number of leading tokens that named the command
    pub consumed: usize,
    pub handler: &'a Handler,
}

impl Resolution<'_> {
    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`. An all-whitespace name sets the root
    /// handler; registering an existing path replaces it in place.
    pub fn insert(&mut self, name: &str, handler: Handler) {
        let path: Vec<String> = name.split_whitespace().map(str::to_string).collect();
        if path.is_empty() {
            debug!("registered root handler");
            self.root = Some(handler);
            return;
        }

        let name = path.join(" ");
        debug!(command = %name, params = handler.params().len(), "registered command");
        match self.entries.iter_mut().find(|e| e.path == path) {
            Some(entry) => entry.handler = handler,
            None => self.entries.push(Entry { name, path, handler }),
        }
    }

    pub fn root(&self) -> Option<&Handler> {
        self.root.as_ref()
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.handler))
    }

    /// Pick the registered path matching the most leading tokens.
    ///
    /// Ties keep the earliest registration. Falls back to the root handler,
    /// then fails with [`Error::UnknownCommand`].
    pub fn resolve(&self, tokens: &[String]) -> Result<Resolution<'_>> {
        let mut best: Option<&Entry> = None;

        for entry in &self.entries {
            if entry.path.len() > tokens.len() {
                continue;
            }
            let matches = entry.path.iter().zip(tokens).all(|(want, got)| want == got);
            if matches && entry.path.len() > best.map_or(0, |b| b.path.len()) {
                best = Some(entry);
            }
        }

        if let Some(entry) = best {
            debug!(command = %entry.name, consumed = entry.path.len(), "resolved command");
            return Ok(Resolution {
                name: Some(&entry.name),
                consumed: entry.path.len(),
                handler: &entry.handler,
            });
        }

        match &self.root {
            Some(root) => {
                debug!("no command matched, using root handler");
                Ok(Resolution {
                    name: None,
                    consumed: 0,
                    handler: root,
                })
            }
            None => Err(Error::UnknownCommand(
                tokens.first().cloned().unwrap_or_default(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::kind::Kind;
    use proptest::prelude::*;

    fn handler(arity: usize) -> Handler {
        let mut cmd = Command::new("x");
        for _ in 0..arity {
            cmd = cmd.arg(Kind::String);
        }
        cmd.action(|_, _| {}).into_handler().unwrap().1
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn longest_prefix_wins_regardless_of_order() {
        let mut registry = Registry::new();
        registry.insert("file copy", handler(2));
        registry.insert("file", handler(1));

        let hit = registry.resolve(&tokens(&["file", "copy", "a", "b"])).unwrap();
        assert_eq!(hit.name, Some("file copy"));
        assert_eq!(hit.consumed, 2);

        let hit = registry.resolve(&tokens(&["file", "a"])).unwrap();
        assert_eq!(hit.name, Some("file"));
        assert_eq!(hit.consumed, 1);
    }

    #[test]
    fn tokens_must_match_exactly() {
        let mut registry = Registry::new();
        registry.insert("copy", handler(0));
        let err = registry.resolve(&tokens(&["cop"])).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(ref c) if c == "cop"));
    }

    #[test]
    fn path_longer_than_input_is_skipped() {
        let mut registry = Registry::new();
        registry.insert("a b c", handler(0));
        assert!(registry.resolve(&tokens(&["a", "b"])).is_err());
    }

    #[test]
    fn root_is_fallback() {
        let mut registry = Registry::new();
        registry.insert("add", handler(2));
        registry.insert("", handler(1));
        let hit = registry.resolve(&tokens(&["unknown"])).unwrap();
        assert!(hit.is_root());
        assert_eq!(hit.consumed, 0);
    }

    #[test]
    fn whitespace_is_normalized_and_reregistration_replaces() {
        let mut registry = Registry::new();
        registry.insert("remote  add", handler(1));
        registry.insert("list", handler(0));
        registry.insert(" remote add ", handler(3));

        let names: Vec<&str> = registry.commands().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["remote add", "list"]);
        let hit = registry.resolve(&tokens(&["remote", "add"])).unwrap();
        assert_eq!(hit.handler.params().len(), 3);
    }

    proptest! {
        #[test]
        fn two_token_path_beats_its_prefix(
            a in "[a-z]{1,8}",
            b in "[a-z]{1,8}",
            rest in prop::collection::vec("[a-z0-9]{1,5}", 0..4),
            short_first in any::<bool>(),
        ) {
            let mut registry = Registry::new();
            let long = format!("{} {}", a, b);
            if short_first {
                registry.insert(&a, handler(0));
                registry.insert(&long, handler(0));
            } else {
                registry.insert(&long, handler(0));
                registry.insert(&a, handler(0));
            }
            let mut input = vec![a.clone(), b.clone()];
            input.extend(rest);
            let hit = registry.resolve(&input).unwrap();
            prop_assert_eq!(hit.name, Some(long.as_str()));
            prop_assert_eq!(hit.consumed, 2);
        }
    }
}

//! Server-advertised actions
//!
//! Each hydrated resource carries the set of actions the server considered
//! legal at the time it rendered the document. That set is the only source
//! of truth for whether a verb may run; nothing here models lifecycle states.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Action names this crate knows how to invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Start,
    Stop,
    Restart,
    Purge,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Start, Action::Stop, Action::Restart, Action::Purge];

    /// Wire name used as the key in a document's `actions` object
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Restart => "restart",
            Action::Purge => "purge",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action: {}", s))
    }
}

/// Invocation target recorded for an action. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.is_empty() {
            None
        } else {
            Some(Self(url))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from action to endpoint, as last reported by the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMap {
    entries: BTreeMap<Action, Endpoint>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a document's `actions` object.
    ///
    /// Unknown action names are skipped. Empty or non-string values count
    /// as "not permitted" and leave no entry.
    pub fn from_wire(value: Option<&Value>) -> Self {
        let mut map = Self::new();

        let Some(Value::Object(actions)) = value else {
            return map;
        };

        for (name, target) in actions {
            let Ok(action) = name.parse::<Action>() else {
                tracing::trace!("ignoring unsupported action: {}", name);
                continue;
            };
            if let Some(url) = target.as_str() {
                map.insert(action, url);
            }
        }

        map
    }

    /// Record an endpoint for an action. An empty endpoint clears the entry.
    pub fn insert(&mut self, action: Action, url: impl Into<String>) {
        match Endpoint::new(url) {
            Some(endpoint) => {
                self.entries.insert(action, endpoint);
            },
            None => {
                self.entries.remove(&action);
            },
        }
    }

    pub fn is_available(&self, action: Action) -> bool {
        self.entries.contains_key(&action)
    }

    pub fn endpoint(&self, action: Action) -> Option<&Endpoint> {
        self.entries.get(&action)
    }

    /// Available actions, in declaration order
    pub fn available(&self) -> impl Iterator<Item = Action> + '_ {
        self.entries.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<S: Into<String>> FromIterator<(Action, S)> for ActionMap {
    fn from_iter<I: IntoIterator<Item = (Action, S)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (action, url) in iter {
            map.insert(action, url);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!("migrate".parse::<Action>().is_err());
    }

    #[test]
    fn test_from_wire_skips_unknown_and_empty() {
        let map = ActionMap::from_wire(Some(&json!({
            "start": "http://rancher/v1/containers/1i1/?action=start",
            "stop": "",
            "restart": null,
            "migrate": "http://rancher/v1/containers/1i1/?action=migrate"
        })));

        assert_eq!(map.len(), 1);
        assert!(map.is_available(Action::Start));
        assert!(!map.is_available(Action::Stop));
        assert!(!map.is_available(Action::Restart));
        assert_eq!(
            map.endpoint(Action::Start).map(Endpoint::as_str),
            Some("http://rancher/v1/containers/1i1/?action=start")
        );
    }

    #[test]
    fn test_from_wire_missing_or_wrong_shape() {
        assert!(ActionMap::from_wire(None).is_empty());
        assert!(ActionMap::from_wire(Some(&json!(null))).is_empty());
        assert!(ActionMap::from_wire(Some(&json!(["start"]))).is_empty());
    }

    #[test]
    fn test_insert_empty_clears_entry() {
        let mut map: ActionMap = [(Action::Purge, "http://x/?action=purge")].into_iter().collect();
        assert!(map.is_available(Action::Purge));

        map.insert(Action::Purge, "");
        assert!(!map.is_available(Action::Purge));
    }

    #[test]
    fn test_available_order() {
        let map: ActionMap = [(Action::Purge, "p"), (Action::Start, "s")].into_iter().collect();
        let available: Vec<_> = map.available().collect();
        assert_eq!(available, vec![Action::Start, Action::Purge]);
    }
}

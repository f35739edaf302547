//! Migration chains
//!
//! A [`MigrationChain`] holds the steps that bring a tree written by an
//! older version of a config object up to its current version. Steps are
//! pure tree-to-tree transforms; they are walked greedily from the embedded
//! version until the target version is reached.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::value::Tree;
use crate::version::ConfigVersion;

type Transform = Box<dyn Fn(Tree) -> Tree + Send + Sync>;

/// A single `from -> to` migration step
pub struct MigrationStep {
    from: ConfigVersion,
    to: ConfigVersion,
    transform: Transform,
}

impl MigrationStep {
    pub fn new(
        from: impl Into<ConfigVersion>,
        to: impl Into<ConfigVersion>,
        transform: impl Fn(Tree) -> Tree + Send + Sync + 'static,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            transform: Box::new(transform),
        }
    }

    pub fn from_version(&self) -> &ConfigVersion {
        &self.from
    }

    pub fn to_version(&self) -> &ConfigVersion {
        &self.to
    }

    /// Apply this step's transform
    pub fn apply(&self, tree: Tree) -> Tree {
        (self.transform)(tree)
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// Ordered set of migration steps, in registration order
#[derive(Debug, Default)]
pub struct MigrationChain {
    steps: Vec<MigrationStep>,
}

impl MigrationChain {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Register a step. Chain connectivity is only checked when a
    /// migration is actually needed.
    pub fn add(
        &mut self,
        from: impl Into<ConfigVersion>,
        to: impl Into<ConfigVersion>,
        transform: impl Fn(Tree) -> Tree + Send + Sync + 'static,
    ) {
        self.steps.push(MigrationStep::new(from, to, transform));
    }

    pub fn push(&mut self, step: MigrationStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[MigrationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Indices of the steps the walk from `from` would take, in application
    /// order. `None` if the walk does not end at `to`.
    ///
    /// The walk keeps taking steps until none leaves the current version,
    /// so a step registered past `to` makes the walk overshoot and fail.
    /// When several steps share a `from` version the first registered one
    /// wins. Each step is taken at most once, so cyclic chains terminate.
    pub fn path(&self, from: &ConfigVersion, to: &ConfigVersion) -> Option<Vec<usize>> {
        let mut used = vec![false; self.steps.len()];
        let mut path = Vec::new();
        let mut current = from;

        while let Some((i, step)) = self
            .steps
            .iter()
            .enumerate()
            .find(|(i, step)| !used[*i] && &step.from == current)
        {
            used[i] = true;
            path.push(i);
            current = &step.to;
        }

        (current == to).then_some(path)
    }

    /// Migrate `tree` from version `from` to version `to`.
    ///
    /// The path is resolved before any transform runs, so a failure leaves
    /// no partially migrated state behind.
    pub fn resolve(
        &self,
        type_name: &str,
        tree: Tree,
        from: &ConfigVersion,
        to: &ConfigVersion,
    ) -> Result<Tree> {
        let Some(path) = self.path(from, to) else {
            if from.compare(to) == Some(std::cmp::Ordering::Greater) {
                warn!(type_name, %from, %to, "config was written by a newer version");
            }
            return Err(ConfigError::MigrationFailed {
                type_name: type_name.to_string(),
                from: from.clone(),
                to: to.clone(),
            });
        };

        let mut tree = tree;
        for i in path {
            let step = &self.steps[i];
            debug!(type_name, from = %step.from, to = %step.to, "applying migration step");
            tree = step.apply(tree);
        }

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn tree(value: Value) -> Tree {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn set(key: &'static str, value: i64) -> impl Fn(Tree) -> Tree + Send + Sync {
        move |mut t: Tree| {
            t.insert(key.to_string(), Value::from(value));
            t
        }
    }

    #[test]
    fn test_linear_chain() {
        let mut chain = MigrationChain::new();
        chain.add("1", "2", set("b", 2));
        chain.add("2", "3", set("c", 3));

        let out = chain
            .resolve("T", tree(json!({"a": 1})), &"1".into(), &"3".into())
            .unwrap();
        assert_eq!(Value::Object(out), json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn test_out_of_order_registration() {
        let mut chain = MigrationChain::new();
        chain.add("2", "3", set("c", 3));
        chain.add("1", "2", set("b", 2));

        assert_eq!(chain.path(&"1".into(), &"3".into()), Some(vec![1, 0]));
    }

    #[test]
    fn test_first_registered_step_wins() {
        let mut chain = MigrationChain::new();
        chain.add("1", "2", set("x", 1));
        chain.add("1", "3", set("x", 2));
        chain.add("2", "3", set("y", 1));

        let out = chain
            .resolve("T", Tree::new(), &"1".into(), &"3".into())
            .unwrap();
        assert_eq!(Value::Object(out), json!({"x": 1, "y": 1}));
    }

    #[test]
    fn test_empty_chain_fails() {
        let chain = MigrationChain::new();
        let err = chain
            .resolve("T", Tree::new(), &"1".into(), &"2".into())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MigrationFailed { .. }));
    }

    #[test]
    fn test_chain_stops_short() {
        let mut chain = MigrationChain::new();
        chain.add("1", "2", set("b", 2));

        let err = chain
            .resolve("Thing", Tree::new(), &"1".into(), &"3".into())
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to migrate Thing from version 1 to version 3");
    }

    #[test]
    fn test_step_past_target_fails() {
        let mut chain = MigrationChain::new();
        chain.add("1", "2", set("b", 2));
        chain.add("2", "3", set("c", 3));

        assert_eq!(chain.path(&"1".into(), &"2".into()), None);
        let err = chain
            .resolve("T", Tree::new(), &"1".into(), &"2".into())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MigrationFailed { .. }));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut chain = MigrationChain::new();
        chain.add("1", "2", set("b", 2));
        chain.add("2", "1", set("b", 1));

        assert_eq!(chain.path(&"1".into(), &"3".into()), None);
    }
}

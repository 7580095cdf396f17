//! The rule registry.

use crate::Rule;
use crate::rules::default_rules;
use geocheck_core::{Category, RuleMetadata};
use std::collections::HashMap;

/// The set of rules known to an engine, keyed by rule id.
///
/// Iteration order is registration order. Registering a rule whose id is already
/// present replaces the earlier rule in place.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    index: HashMap<String, usize>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule, replacing any rule with the same id.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let id = rule.metadata().id.clone();
        match self.index.get(&id) {
            Some(&pos) => self.rules[pos] = rule,
            None => {
                self.index.insert(id, self.rules.len());
                self.rules.push(rule);
            }
        }
    }

    /// Registers a rule and returns the registry, for chained construction.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.register(Box::new(rule));
        self
    }

    /// Looks up a rule by id.
    pub fn get_rule(&self, rule_id: &str) -> Option<&dyn Rule> {
        self.index.get(rule_id).map(|&pos| self.rules[pos].as_ref())
    }

    /// All rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn get_rules_by_category(&self, category: Category) -> Vec<&dyn Rule> {
        self.rules()
            .filter(|rule| rule.metadata().category == category)
            .collect()
    }

    /// Rule ids in registration order.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules().map(|rule| rule.metadata().id.as_str()).collect()
    }

    /// Metadata of every rule, sorted by rule id.
    pub fn get_documentation(&self) -> Vec<&RuleMetadata> {
        let mut docs: Vec<&RuleMetadata> = self.rules().map(|rule| rule.metadata()).collect();
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        docs
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds a registry populated with every built-in rule.
pub fn build_default_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    for rule in default_rules() {
        registry.register(rule);
    }
    registry
}

use anyhow::{Context, Result};
use geocheck_core::{Category, RuleMetadata};
use geocheck_validator::build_default_registry;

use crate::output;

pub fn execute(category: Option<&str>, format: &str) -> Result<()> {
    let registry = build_default_registry();

    let rules: Vec<&RuleMetadata> = match category {
        Some(name) => {
            let category: Category = name.parse().context("Invalid --category")?;
            let mut rules: Vec<&RuleMetadata> = registry
                .get_rules_by_category(category)
                .into_iter()
                .map(|rule| rule.metadata())
                .collect();
            rules.sort_by(|a, b| a.id.cmp(&b.id));
            rules
        }
        None => registry.get_documentation(),
    };

    output::print_rule_catalogue(&rules, format)
}

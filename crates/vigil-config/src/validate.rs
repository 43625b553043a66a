use crate::config::Config;
use anyhow::{bail, Result};

pub fn validate_config(config: &Config) -> Result<()> {
    // Validate bounds
    if config.scan.rule_budget_ms == 0 || config.scan.rule_budget_ms > 60_000 {
        bail!("Invalid config field 'scan.rule_budget_ms': must be between 1 and 60000 (60s)");
    }

    if config.scan.max_matches_per_rule == 0 || config.scan.max_matches_per_rule > 100_000 {
        bail!("Invalid config field 'scan.max_matches_per_rule': must be between 1 and 100,000");
    }

    if let Some(size) = config.scan.max_file_size {
        if size == 0 || size > 500 * 1024 * 1024 {
            bail!("Invalid config field 'scan.max_file_size': must be between 1 and 524288000 (500MB)");
        }
    }

    for (id, rule) in &config.rules {
        if let Some(pattern) = &rule.pattern {
            if pattern.is_empty() {
                bail!("Rule '{}' has empty pattern", id);
            }
            if pattern.len() > 1024 {
                bail!(
                    "Rule '{}' has a pattern exceeding the maximum length of 1024 characters (current: {}). Consider simplifying or splitting the regex.",
                    id, pattern.len()
                );
            }
            // Validate regex compilation
            if let Err(e) = regex::Regex::new(pattern) {
                bail!("Rule '{}' has invalid regex: {}", id, e);
            }
        }

        if let Some(severity) = &rule.severity {
            match severity.to_lowercase().as_str() {
                "low" | "medium" | "high" => {}
                _ => bail!(
                    "Invalid config field 'severity' for rule '{}': {}. Must be one of: low, medium, high",
                    id,
                    severity
                ),
            }
        }

        if let Some(category) = &rule.category {
            if category.is_empty() {
                bail!("Rule '{}' has empty category", id);
            }
        }
    }

    Ok(())
}

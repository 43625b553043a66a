use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScanConfig {
    /// Wall-clock budget per rule per document, in milliseconds.
    #[serde(default = "default_rule_budget_ms")]
    pub rule_budget_ms: u64,
    /// Upper bound on matches collected per rule per document.
    #[serde(default = "default_max_matches_per_rule")]
    pub max_matches_per_rule: usize,
    #[serde(default = "default_true")]
    pub parallel: bool,
    pub max_file_size: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rule_budget_ms: default_rule_budget_ms(),
            max_matches_per_rule: default_max_matches_per_rule(),
            parallel: true,
            max_file_size: None, // Default handled at usage site
        }
    }
}

fn default_rule_budget_ms() -> u64 {
    200
}

fn default_max_matches_per_rule() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn merge(&mut self, other: Config) {
        // Scalars: override if other diverges from the default
        if other.scan.rule_budget_ms != default_rule_budget_ms() {
            self.scan.rule_budget_ms = other.scan.rule_budget_ms;
        }
        if other.scan.max_matches_per_rule != default_max_matches_per_rule() {
            self.scan.max_matches_per_rule = other.scan.max_matches_per_rule;
        }
        // parallel default is true. If other is false, override.
        if !other.scan.parallel {
            self.scan.parallel = false;
        }
        if let Some(val) = other.scan.max_file_size {
            self.scan.max_file_size = Some(val);
        }

        // Merge Rules (Override/Insert)
        for (id, rule) in other.rules {
            self.rules.insert(id, rule);
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub pattern: Option<String>,
    pub category: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub remediation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_scalars() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.scan.rule_budget_ms = 50;
        other.scan.parallel = false;
        other.scan.max_file_size = Some(2048);

        base.merge(other);

        assert_eq!(base.scan.rule_budget_ms, 50);
        assert!(!base.scan.parallel);
        assert_eq!(base.scan.max_file_size, Some(2048));
        // Untouched field keeps its default
        assert_eq!(base.scan.max_matches_per_rule, 1000);
    }

    #[test]
    fn test_merge_inserts_rules() {
        let mut base = Config::default();
        base.rules.insert(
            "random.math_random".to_string(),
            RuleConfig {
                enabled: false,
                pattern: None,
                category: None,
                severity: None,
                description: None,
                remediation: None,
            },
        );

        let mut other = Config::default();
        other.rules.insert(
            "custom.tls_disabled".to_string(),
            RuleConfig {
                enabled: true,
                pattern: Some(r"verify\s*=\s*False".to_string()),
                category: Some("hardcoded password".to_string()),
                severity: Some("medium".to_string()),
                description: None,
                remediation: None,
            },
        );

        base.merge(other);

        assert_eq!(base.rules.len(), 2);
        assert!(!base.rules["random.math_random"].enabled);
        assert!(base.rules["custom.tls_disabled"].pattern.is_some());
    }
}

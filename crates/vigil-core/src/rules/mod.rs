use crate::model::{Category, Severity};
use regex::Regex;
use thiserror::Error;
use vigil_config::Config;

pub mod builtin;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule '{id}' has invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{id}' has invalid severity '{severity}' (expected low, medium or high)")]
    InvalidSeverity { id: String, severity: String },

    #[error("rule '{id}' names unknown category '{category}'")]
    UnknownCategory { id: String, category: String },

    #[error("rule '{id}' defines a new matcher without a category")]
    MissingCategory { id: String },

    #[error("rule '{id}' has no pattern and does not match any registered rule")]
    UnknownRule { id: String },
}

/// One detection rule: a compiled matcher plus the severity tier and report
/// templates that ride along with every match it produces.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub id: String,
    pub category: Category,
    pub matcher: Regex,
    pub severity_tier: Severity,
    pub description: String,
    pub remediation: String,
}

/// Builds the full registry: builtin rules in table order, each with any
/// config override applied, followed by config-defined rules sorted by id.
/// Malformed entries fail here, before any document is scanned.
pub fn get_all_rules(config: &Config) -> Result<Vec<PatternRule>, RuleError> {
    let mut rules = builtin::get_default_rules();

    // Apply overrides to builtin rules first, keeping table order.
    for rule in &mut rules {
        if let Some(rule_conf) = config.rules.get(&rule.id) {
            if let Some(pattern) = &rule_conf.pattern {
                rule.matcher = compile_pattern(&rule.id, pattern)?;
            }
            if let Some(severity) = &rule_conf.severity {
                rule.severity_tier = parse_severity(&rule.id, severity)?;
            }
            if let Some(category) = &rule_conf.category {
                rule.category = parse_category(&rule.id, category)?;
            }
            if let Some(description) = &rule_conf.description {
                rule.description = description.clone();
            }
            if let Some(remediation) = &rule_conf.remediation {
                rule.remediation = remediation.clone();
            }
        }
    }

    // New rules from config, sorted by id so registry order is stable.
    let mut custom_ids: Vec<&String> = config
        .rules
        .keys()
        .filter(|id| !rules.iter().any(|r| &r.id == *id))
        .collect();
    custom_ids.sort();

    for id in custom_ids {
        let rule_conf = &config.rules[id];
        let Some(pattern) = &rule_conf.pattern else {
            return Err(RuleError::UnknownRule { id: id.clone() });
        };
        let category = match &rule_conf.category {
            Some(name) => parse_category(id, name)?,
            None => return Err(RuleError::MissingCategory { id: id.clone() }),
        };
        let severity_tier = match &rule_conf.severity {
            Some(severity) => parse_severity(id, severity)?,
            None => category.severity_tier(),
        };

        rules.push(PatternRule {
            id: id.clone(),
            category,
            matcher: compile_pattern(id, pattern)?,
            severity_tier,
            description: rule_conf
                .description
                .clone()
                .unwrap_or_else(|| category.description().to_string()),
            remediation: rule_conf
                .remediation
                .clone()
                .unwrap_or_else(|| category.remediation().to_string()),
        });
    }

    // Disabled rules drop out last, so their overrides were still validated.
    rules.retain(|r| config.rules.get(&r.id).map(|rc| rc.enabled).unwrap_or(true));

    Ok(rules)
}

fn compile_pattern(id: &str, pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        id: id.to_string(),
        source,
    })
}

fn parse_severity(id: &str, severity: &str) -> Result<Severity, RuleError> {
    match severity.to_lowercase().as_str() {
        "low" => Ok(Severity::Low),
        "medium" => Ok(Severity::Medium),
        "high" => Ok(Severity::High),
        _ => Err(RuleError::InvalidSeverity {
            id: id.to_string(),
            severity: severity.to_string(),
        }),
    }
}

fn parse_category(id: &str, category: &str) -> Result<Category, RuleError> {
    Category::from_name(category).ok_or_else(|| RuleError::UnknownCategory {
        id: id.to_string(),
        category: category.to_string(),
    })
}

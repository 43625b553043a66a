use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// The canonical vulnerability categories. Severity tiers and report
/// templates are exhaustive per-variant tables, so adding a category is a
/// compile-time change and no lookup can fall through to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Category {
    #[serde(rename = "hardcoded secret")]
    HardcodedSecret,
    #[serde(rename = "SQL injection")]
    SqlInjection,
    #[serde(rename = "command injection")]
    CommandInjection,
    #[serde(rename = "XSS")]
    CrossSiteScripting,
    #[serde(rename = "weak cryptographic hash")]
    WeakHash,
    #[serde(rename = "hardcoded password")]
    HardcodedPassword,
    #[serde(rename = "insecure randomness")]
    InsecureRandom,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::HardcodedSecret,
        Category::SqlInjection,
        Category::CommandInjection,
        Category::CrossSiteScripting,
        Category::WeakHash,
        Category::HardcodedPassword,
        Category::InsecureRandom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::HardcodedSecret => "hardcoded secret",
            Category::SqlInjection => "SQL injection",
            Category::CommandInjection => "command injection",
            Category::CrossSiteScripting => "XSS",
            Category::WeakHash => "weak cryptographic hash",
            Category::HardcodedPassword => "hardcoded password",
            Category::InsecureRandom => "insecure randomness",
        }
    }

    /// Case-insensitive lookup by canonical name, for config-supplied rules.
    pub fn from_name(name: &str) -> Option<Category> {
        let lower = name.to_lowercase();
        Category::ALL
            .iter()
            .find(|c| c.name().to_lowercase() == lower)
            .copied()
    }

    pub fn severity_tier(&self) -> Severity {
        match self {
            Category::HardcodedSecret => Severity::High,
            Category::SqlInjection => Severity::High,
            Category::CommandInjection => Severity::High,
            Category::CrossSiteScripting => Severity::Medium,
            Category::WeakHash => Severity::Medium,
            Category::HardcodedPassword => Severity::Medium,
            Category::InsecureRandom => Severity::Low,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::HardcodedSecret => "Hardcoded credential or API secret embedded in source",
            Category::SqlInjection => "SQL query assembled with string interpolation",
            Category::CommandInjection => "Shell command built from interpolated input",
            Category::CrossSiteScripting => {
                "Unsafe DOM or markup sink that can execute injected content"
            }
            Category::WeakHash => "Cryptographically broken digest algorithm",
            Category::HardcodedPassword => "Password or connection string embedded in source",
            Category::InsecureRandom => {
                "Non-cryptographic randomness used where security may depend on it"
            }
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            Category::HardcodedSecret => {
                "Move secrets to environment variables or a secret manager and rotate the exposed value"
            }
            Category::SqlInjection => {
                "Use parameterized queries or prepared statements instead of string building"
            }
            Category::CommandInjection => {
                "Avoid shell invocation with untrusted input; pass argument vectors or use a safe process API"
            }
            Category::CrossSiteScripting => {
                "Escape or sanitize untrusted data before rendering; prefer safe DOM APIs such as textContent"
            }
            Category::WeakHash => {
                "Replace MD5/SHA-1 with SHA-256 or stronger; use a dedicated password hash for credentials"
            }
            Category::HardcodedPassword => {
                "Load credentials from configuration or a secret store; never commit them to the repository"
            }
            Category::InsecureRandom => {
                "Use a cryptographically secure random source for tokens, session ids and keys"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One document handed to the engine: `(documentId, sourceText, languageHint)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub language: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Finding {
    pub category: Category,
    pub severity_tier: Severity,
    /// 1-based line of the match in the source document.
    pub line: usize,
    /// Matched text, truncated to a bounded length.
    pub excerpt: String,
    pub description: String,
    pub remediation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScanMetadata {
    pub language: String,
    pub scan_timestamp: DateTime<Utc>,
    pub line_count: usize,
    /// Rules that gave up early on this document (budget or match cap).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScanResult {
    /// Findings in discovery order, stable for a given input.
    pub findings: Vec<Finding>,
    /// Saturating aggregate in [0,100].
    pub risk_score: u32,
    pub severity_counts: SeverityCounts,
    pub metadata: ScanMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SkippedDocument {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BatchSummary {
    pub total_files: usize,
    pub total_findings: usize,
    pub high_risk_file_count: usize,
    pub average_risk_score: u32,
}

/// Per-document results keyed by document id. Serializes as a JSON map whose
/// key order is insertion order (= batch input order), which a plain HashMap
/// or BTreeMap would not preserve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerFileResults(Vec<(String, ScanResult)>);

impl PerFileResults {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, id: String, result: ScanResult) {
        self.0.push((id, result));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, ScanResult)> {
        self.0.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ScanResult> {
        self.0.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }
}

impl FromIterator<(String, ScanResult)> for PerFileResults {
    fn from_iter<I: IntoIterator<Item = (String, ScanResult)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for PerFileResults {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, result) in &self.0 {
            map.serialize_entry(id, result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PerFileResults {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PerFileVisitor;

        impl<'de> Visitor<'de> for PerFileVisitor {
            type Value = PerFileResults;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of document id to scan result")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, ScanResult>()? {
                    entries.push(entry);
                }
                Ok(PerFileResults(entries))
            }
        }

        deserializer.deserialize_map(PerFileVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BatchReport {
    pub per_file: PerFileResults,
    pub summary: BatchSummary,
    pub recommendations: Vec<String>,
    /// Documents that could not be scanned, with the reason each was skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDocument>,
}

use crate::utils::error::AggregateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 人物識別碼，永遠大於 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(u64);

impl Identifier {
    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// `{base}/people/{id}`，base 結尾的 `/` 會先去掉
    pub fn root(base_url: &str, id: Identifier) -> Self {
        Self(format!("{}/people/{}", base_url.trim_end_matches('/'), id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `people/{id}` 的回應內容；`films` 為必填欄位
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrimaryRecord {
    pub name: String,
    pub films: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependentRecord {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub name: String,
    pub titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub id: Identifier,
    pub error: AggregateError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEntry {
    Aggregate { id: Identifier, aggregate: Aggregate },
    Failed(BatchFailure),
}

impl BatchEntry {
    pub fn id(&self) -> Identifier {
        match self {
            BatchEntry::Aggregate { id, .. } => *id,
            BatchEntry::Failed(failure) => failure.id,
        }
    }

    pub fn aggregate(&self) -> Option<&Aggregate> {
        match self {
            BatchEntry::Aggregate { aggregate, .. } => Some(aggregate),
            BatchEntry::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&BatchFailure> {
        match self {
            BatchEntry::Aggregate { .. } => None,
            BatchEntry::Failed(failure) => Some(failure),
        }
    }
}

/// 與輸入識別碼一一對應、順序相同的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    entries: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn new(entries: Vec<BatchEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.aggregate().is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

use crate::domain::model::{BatchEntry, BatchResult};
use crate::utils::error::{AggregateReason, AppError, FetchErrorKind, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum EntryReport<'a> {
    Ok {
        id: u64,
        name: &'a str,
        titles: &'a [String],
    },
    Failed {
        id: u64,
        reason: AggregateReason,
        kind: Option<FetchErrorKind>,
        code: Option<u16>,
        address: Option<&'a str>,
        message: String,
    },
}

impl<'a> From<&'a BatchEntry> for EntryReport<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        match entry {
            BatchEntry::Aggregate { id, aggregate } => EntryReport::Ok {
                id: id.get(),
                name: &aggregate.name,
                titles: &aggregate.titles,
            },
            BatchEntry::Failed(failure) => {
                let fetch_error = failure.error.fetch_error();
                EntryReport::Failed {
                    id: failure.id.get(),
                    reason: failure.error.reason(),
                    kind: fetch_error.map(|e| e.kind()),
                    code: fetch_error.and_then(|e| e.status_code()),
                    address: fetch_error.map(|e| e.address()),
                    message: failure.error.to_string(),
                }
            }
        }
    }
}

/// 依輸入順序輸出 JSON 陣列
pub fn render(result: &BatchResult, pretty: bool) -> Result<Vec<u8>> {
    let entries: Vec<EntryReport<'_>> = result.entries().iter().map(EntryReport::from).collect();
    let bytes = if pretty {
        serde_json::to_vec_pretty(&entries)?
    } else {
        serde_json::to_vec(&entries)?
    };
    Ok(bytes)
}

#[derive(Debug, Serialize)]
struct RejectionReport {
    status: &'static str,
    message: String,
}

/// 整批被拒絕時輸出的單一結構化錯誤
pub fn render_rejection(error: &AppError, pretty: bool) -> Result<Vec<u8>> {
    let report = RejectionReport {
        status: "rejected",
        message: error.to_string(),
    };
    let bytes = if pretty {
        serde_json::to_vec_pretty(&report)?
    } else {
        serde_json::to_vec(&report)?
    };
    Ok(bytes)
}

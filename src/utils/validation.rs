use crate::domain::model::Identifier;
use crate::utils::error::{AppError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 將輸入解讀為整數；`"2.0"` 視為 2，`"1.5"`、`"abc"` 則否
fn interpret_integer(raw: &str) -> Option<i128> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i128>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= u64::MAX as f64 {
        Some(value as i128)
    } else {
        None
    }
}

/// 全部元素皆為互不重複、落在 u64 範圍內的正整數時才回傳 true
pub fn validate<S: AsRef<str>>(raw: &[S]) -> bool {
    let mut seen = HashSet::new();
    raw.iter().all(|item| match interpret_integer(item.as_ref()) {
        Some(value) => value > 0 && value <= u64::MAX as i128 && seen.insert(value),
        None => false,
    })
}

/// 驗證並轉換成識別碼；任何一個不合法就整批拒絕
pub fn parse_identifiers<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Identifier>> {
    let raw: Vec<&str> = raw.iter().map(|item| item.as_ref()).collect();
    if !validate(raw.as_slice()) {
        return Err(AppError::Validation {
            message: format!(
                "expected unique integers greater than 0, got [{}]",
                raw.join(", ")
            ),
        });
    }

    raw.iter()
        .map(|item| {
            interpret_integer(item)
                .and_then(|value| u64::try_from(value).ok())
                .and_then(Identifier::new)
                .ok_or_else(|| AppError::Validation {
                    message: format!("'{}' is not a valid identifier", item),
                })
        })
        .collect()
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AppError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AppError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

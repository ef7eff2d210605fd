//! Revision, module type, yang-version, belongs-to, generated-from and plain text fields

use chrono::{Datelike, NaiveDate};

use super::failure::{Resolution, ResolveFailure};
use crate::features::parsing::Statement;
use crate::shared::models::{GeneratedFrom, ModuleType};

/// First `revision` argument, validated as a calendar date.
///
/// `YYYY-02-29` in a non-leap year is clamped to `YYYY-02-28`.
pub fn resolve_revision(root: &Statement) -> Resolution<String> {
    let raw = root
        .find_child("revision")
        .and_then(Statement::arg)
        .ok_or(ResolveFailure::NotFound)?;
    normalize_revision(raw)
}

/// Validate a `YYYY-MM-DD` revision string
pub fn normalize_revision(raw: &str) -> Resolution<String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }

    let parts: Vec<&str> = trimmed.split('-').collect();
    if let [year, month, day] = parts.as_slice() {
        if let (Ok(year), Ok(2), Ok(29)) = (
            year.parse::<i32>(),
            month.parse::<u32>(),
            day.parse::<u32>(),
        ) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, 2, 28) {
                if !is_leap_year(date.year()) {
                    return Ok(date.format("%Y-%m-%d").to_string());
                }
            }
        }
    }

    Err(ResolveFailure::Malformed(trimmed.to_string()))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Root keyword as a [`ModuleType`]
pub fn resolve_module_type(root: &Statement) -> ModuleType {
    ModuleType::from_keyword(&root.keyword)
}

/// `yang-version` argument; `1` is reported as `1.0`
pub fn resolve_yang_version(root: &Statement) -> Resolution<String> {
    let raw = root
        .child_arg("yang-version")
        .ok_or(ResolveFailure::NotFound)?
        .trim();
    match raw {
        "1" | "1.0" => Ok("1.0".to_string()),
        "1.1" => Ok("1.1".to_string()),
        other => Err(ResolveFailure::Malformed(other.to_string())),
    }
}

/// `belongs-to` target of a submodule
pub fn resolve_belongs_to(root: &Statement) -> Resolution<String> {
    if resolve_module_type(root) != ModuleType::Submodule {
        return Err(ResolveFailure::NotFound);
    }
    root.child_arg("belongs-to")
        .map(str::to_string)
        .ok_or(ResolveFailure::NotFound)
}

/// SMI-derived namespaces are `mib`, Cisco-named modules `native`
pub fn resolve_generated_from(name: &str, namespace: Option<&str>) -> GeneratedFrom {
    if namespace.map(|ns| ns.contains(":smi")).unwrap_or(false) {
        GeneratedFrom::Mib
    } else if name.to_lowercase().contains("cisco") {
        GeneratedFrom::Native
    } else {
        GeneratedFrom::NotApplicable
    }
}

/// Argument of a direct text child (`reference`, `description`, `contact`, ...)
pub fn resolve_text(root: &Statement, keyword: &str) -> Resolution<String> {
    root.child_arg(keyword)
        .map(str::to_string)
        .ok_or(ResolveFailure::NotFound)
}

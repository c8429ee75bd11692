// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of command results.

use std::collections::BTreeMap;

use provisio_core::{HealthStatus, ProvisionError, UserRecord};
use serde::Serialize;
use serde_json::{json, Value};

/// Pretty JSON for stdout.
pub fn to_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// One object per platform: `{"users": [...]}` or `{"error": ..., "retryable": ...}`.
pub fn list_all_json(results: &BTreeMap<String, Result<Vec<UserRecord>, ProvisionError>>) -> Value {
    let map = results
        .iter()
        .map(|(id, result)| {
            let value = match result {
                Ok(users) => json!({ "users": users }),
                Err(e) => json!({ "error": e.to_string(), "retryable": e.is_retryable() }),
            };
            (id.clone(), value)
        })
        .collect::<serde_json::Map<_, _>>();
    Value::Object(map)
}

/// Print health results with optional colors.
pub fn print_health_summary(statuses: &BTreeMap<String, HealthStatus>, use_color: bool) {
    println!();
    println!("  provisio health");
    println!("  {}", "-".repeat(35));

    for (id, status) in statuses {
        let (tag, detail) = match status {
            HealthStatus::Healthy => ("ok", None),
            HealthStatus::Degraded(detail) => ("degraded", Some(detail.as_str())),
            HealthStatus::Unhealthy(detail) => ("fail", Some(detail.as_str())),
        };

        if use_color {
            use colored::Colorize;
            let marker = match status {
                HealthStatus::Healthy => "✓".green(),
                HealthStatus::Degraded(_) => "!".yellow(),
                HealthStatus::Unhealthy(_) => "✗".red(),
            };
            println!("    {marker} {id:<20} {}", detail.unwrap_or(tag));
        } else {
            println!(
                "    [{}] {id:<20} {}",
                tag.to_uppercase(),
                detail.unwrap_or(tag)
            );
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_all_separates_users_and_errors() {
        let mut results = BTreeMap::new();
        results.insert(
            "chat".to_string(),
            Ok(vec![UserRecord {
                id: "u1".into(),
                username: "ada".into(),
                status: true,
                ..Default::default()
            }]),
        );
        results.insert(
            "registry".to_string(),
            Err(ProvisionError::no_response("registry")),
        );

        let value = list_all_json(&results);
        assert_eq!(value["chat"]["users"][0]["username"], "ada");
        assert_eq!(value["registry"]["retryable"], true);
        assert!(value["registry"]["error"]
            .as_str()
            .unwrap()
            .contains("no response"));
    }

    #[test]
    fn health_serializes_with_state_tag() {
        let mut statuses = BTreeMap::new();
        statuses.insert("chat".to_string(), HealthStatus::Healthy);
        statuses.insert("s3".to_string(), HealthStatus::Unhealthy("down".into()));
        let value: Value = serde_json::from_str(&to_pretty(&statuses)).unwrap();
        assert_eq!(value["chat"]["state"], "healthy");
        assert_eq!(value["s3"]["detail"], "down");
    }
}

//! Variable bag construction for placeholder expansion.
//!
//! This is the only place in the rendering pipeline that reads the clock;
//! everything downstream takes the frozen timestamp from here, which keeps
//! [`crate::render_at`] deterministic.

use chrono::{DateTime, Datelike, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::recipient::Recipient;

/// Build the canonical substitution variables for a recipient at a frozen
/// point in time.
///
/// Always produces `first_name`, `last_name`, `email`, `user_id` (null when
/// absent), `full_name`, `current_date` ("Monday, January 5, 2025"),
/// `current_year` and `current_month`. `extras` entries merge last and
/// override any same-named derived key: caller-supplied context always wins.
pub fn build_vars_at(
    recipient: &Recipient,
    extras: &HashMap<String, Value>,
    now: DateTime<Utc>,
) -> HashMap<String, Value> {
    let mut vars = HashMap::new();

    vars.insert("first_name".to_string(), json!(recipient.first_name));
    vars.insert("last_name".to_string(), json!(recipient.last_name));
    vars.insert("email".to_string(), json!(recipient.email));
    vars.insert(
        "user_id".to_string(),
        recipient.user_id.map_or(Value::Null, |id| json!(id)),
    );
    vars.insert("full_name".to_string(), json!(recipient.full_name()));

    vars.insert(
        "current_date".to_string(),
        json!(now.format("%A, %B %-d, %Y").to_string()),
    );
    vars.insert("current_year".to_string(), json!(now.year()));
    vars.insert(
        "current_month".to_string(),
        json!(now.format("%B").to_string()),
    );

    for (key, value) in extras {
        vars.insert(key.clone(), value.clone());
    }

    vars
}

/// [`build_vars_at`] with the current wall-clock time.
pub fn build_vars(recipient: &Recipient, extras: &HashMap<String, Value>) -> HashMap<String, Value> {
    build_vars_at(recipient, extras, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frozen() -> DateTime<Utc> {
        // A Sunday.
        Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_derived_keys() {
        let recipient = Recipient::new("ana@example.com", "Ana", "Lee").user_id(12);
        let vars = build_vars_at(&recipient, &HashMap::new(), frozen());

        assert_eq!(vars["first_name"], json!("Ana"));
        assert_eq!(vars["full_name"], json!("Ana Lee"));
        assert_eq!(vars["user_id"], json!(12));
        assert_eq!(vars["current_date"], json!("Sunday, January 5, 2025"));
        assert_eq!(vars["current_year"], json!(2025));
        assert_eq!(vars["current_month"], json!("January"));
    }

    #[test]
    fn test_missing_user_id_is_null() {
        let recipient = Recipient::new("ana@example.com", "Ana", "Lee");
        let vars = build_vars_at(&recipient, &HashMap::new(), frozen());
        assert_eq!(vars["user_id"], Value::Null);
    }

    #[test]
    fn test_extras_override_derived() {
        let recipient = Recipient::new("ana@example.com", "Ana", "Lee");
        let mut extras = HashMap::new();
        extras.insert("first_name".to_string(), json!("Overridden"));
        extras.insert("company_name".to_string(), json!("Acme"));

        let vars = build_vars_at(&recipient, &extras, frozen());
        assert_eq!(vars["first_name"], json!("Overridden"));
        assert_eq!(vars["company_name"], json!("Acme"));
    }
}

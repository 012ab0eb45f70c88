use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod cart;
pub mod comments;
pub mod couriers;
pub mod deliveries;
pub mod orders;
pub mod promotions;

/// Treat missing, blank and whitespace-only strings as `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}

/// Collapse whitespace runs into single spaces and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize an optional field, mapping blank results to an empty string.
pub(crate) fn sanitize_optional(input: Option<&str>) -> String {
    input.map(sanitize_inline_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_whitespace_and_controls() {
        assert_eq!(sanitize_inline_text("  Ana \t\n Cruz\u{7}  "), "Ana Cruz");
        assert_eq!(sanitize_optional(None), "");
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        value: Option<String>,
    }

    #[test]
    fn blank_strings_deserialize_as_none() {
        let probe: Probe = serde_json::from_str(r#"{"value": "   "}"#).unwrap();
        assert!(probe.value.is_none());

        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert!(probe.value.is_none());

        let probe: Probe = serde_json::from_str(r#"{"value": "x"}"#).unwrap();
        assert_eq!(probe.value.as_deref(), Some("x"));
    }
}

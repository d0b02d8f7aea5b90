//! Helpers for turning `validator` output into user-facing messages.

use validator::ValidationErrors;

/// Flatten field-level validation errors into a single message,
/// one `field: message` fragment per failed rule.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let fragments: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{:?}", e.code));
                format!("{}: {}", field, msg)
            })
        })
        .collect();

    if fragments.is_empty() {
        "Validation failed".to_string()
    } else {
        fragments.join("; ")
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Subject {
        #[validate(range(min = 1, message = "order must be ≥ 1"))]
        order: u32,
    }

    #[test]
    fn describes_field_errors() {
        let err = Subject { order: 0 }.validate().unwrap_err();
        let msg = describe_validation_errors(&err);
        assert!(msg.contains("order"));
        assert!(msg.contains("≥ 1"));
    }

    #[test]
    fn valid_subject_has_no_errors() {
        assert!(Subject { order: 3 }.validate().is_ok());
    }
}

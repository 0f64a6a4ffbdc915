use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error("Invalid accession '{0}'. Accessions cannot contain whitespace.")]
    InvalidAccession(String),
}

/// Splits `KEY=VALUE` at the first `=`, trimming both sides.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            input: input.to_string(),
        });
    }
    Ok((key, value))
}

/// Parses a comma-separated accession list such as `PF04650,PS50847`.
pub fn parse_accession_list(input: &str) -> Result<Vec<String>, ParseError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.chars().any(char::is_whitespace) {
                Err(ParseError::InvalidAccession(s.to_string()))
            } else {
                Ok(s.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_splits_at_first_equals() {
        assert_eq!(
            parse_key_value("paths.output-dir=a=b").unwrap(),
            ("paths.output-dir", "a=b")
        );
        assert_eq!(
            parse_key_value(" thresholds.min-rsa = 0.5 ").unwrap(),
            ("thresholds.min-rsa", "0.5")
        );
    }

    #[test]
    fn key_value_rejects_malformed_input() {
        assert_eq!(
            parse_key_value("no-equals"),
            Err(ParseError::InvalidKeyValue("no-equals".to_string()))
        );
        assert!(matches!(
            parse_key_value("=1"),
            Err(ParseError::EmptyComponent {
                component: "key",
                ..
            })
        ));
        assert!(matches!(
            parse_key_value("a="),
            Err(ParseError::EmptyComponent {
                component: "value",
                ..
            })
        ));
    }

    #[test]
    fn accession_list_ignores_blank_entries() {
        assert_eq!(
            parse_accession_list("PF04650, PS50847,,").unwrap(),
            ["PF04650", "PS50847"]
        );
        assert!(parse_accession_list("").unwrap().is_empty());
    }

    #[test]
    fn accession_list_rejects_embedded_whitespace() {
        assert_eq!(
            parse_accession_list("PF 04650"),
            Err(ParseError::InvalidAccession("PF 04650".to_string()))
        );
    }
}

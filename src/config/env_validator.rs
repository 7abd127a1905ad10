//! Environment variable validation with helpful error messages
//!
//! Invalid values print a warning and fall back to the value already resolved
//! from lower-priority layers.

use std::io::Write;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    expected: &'a str,
}

impl<'a> EnvVarValidator<'a> {
    /// Create a new validator for the given environment variable
    pub fn new(var_name: &'a str, expected: &'a str) -> Self {
        Self { var_name, expected }
    }

    /// Parse a value, returning default if invalid (with warning on stderr)
    pub fn parse<T, F>(&self, value: &str, parser: F, default: T) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        self.parse_with_writer(value, parser, default, &mut std::io::stderr())
    }

    /// Parse with a custom writer (for testing)
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        default: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                let _ = writeln!(
                    writer,
                    "Warning: Invalid {} value '{}'",
                    self.var_name, value
                );
                let _ = writeln!(writer, "Expected: {}", self.expected);
                default
            }
        }
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("latency_ms", "latency_ms"), 0);
    }

    #[test]
    fn test_levenshtein_typos() {
        assert_eq!(levenshtein("latncy_ms", "latency_ms"), 1);
        assert_eq!(levenshtein("timeout", "timeout_ms"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_env_validator_valid_value() {
        let validator = EnvVarValidator::new("TEST_VAR", "a number");
        let result = validator.parse("42", |s| s.parse::<u64>().ok(), 0);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_env_validator_invalid_value_returns_default() {
        let validator = EnvVarValidator::new("TEST_VAR", "a number");
        let mut output = Vec::new();
        let result =
            validator.parse_with_writer("soon", |s| s.parse::<u64>().ok(), 7, &mut output);
        assert_eq!(result, 7);
    }

    #[test]
    fn test_env_validator_warning_message() {
        let validator = EnvVarValidator::new("FSLISTENER_TEST", "a duration in milliseconds");
        let mut output = Vec::new();
        validator.parse_with_writer("1.5s", |s| s.parse::<u64>().ok(), 0, &mut output);

        let msg = String::from_utf8(output).unwrap();
        assert!(msg.contains("Warning:"));
        assert!(msg.contains("FSLISTENER_TEST"));
        assert!(msg.contains("'1.5s'"));
        assert!(msg.contains("Expected: a duration in milliseconds"));
    }

    #[test]
    fn test_env_validator_valid_value_is_silent() {
        let validator = EnvVarValidator::new("TEST_VAR", "a number");
        let mut output = Vec::new();
        validator.parse_with_writer("3", |s| s.parse::<u64>().ok(), 0, &mut output);
        assert!(output.is_empty());
    }
}

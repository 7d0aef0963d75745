use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A one-line alert shown above or below a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub severity: Severity,
    pub message: String,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// The calculation banner prefixes the resolved message.
    pub fn calculation_failed(message: &str) -> Self {
        Self::error(format!("Calculation Failed: {message}"))
    }
}

impl fmt::Display for Banner {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let tag = match self.severity {
            Severity::Success => "[ok]",
            Severity::Error => "[error]",
        };
        write!(f, "{tag} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn calculation_banner_prefixes_message() {
        assert_eq!(
            Banner::calculation_failed("X").to_string(),
            "[error] Calculation Failed: X"
        );
    }

    #[test]
    fn success_banner_is_tagged() {
        assert_eq!(Banner::success("done").to_string(), "[ok] done");
    }
}

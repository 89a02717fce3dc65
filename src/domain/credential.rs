use std::fmt;

/// Number of trailing characters left visible when a credential is displayed.
const VISIBLE_SUFFIX: usize = 4;

/// The secret key under test.
///
/// Lives for a single validation run. `Debug` and `Display` never reveal the
/// full secret, so the value can be passed to `tracing` fields safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Builds a credential from raw input, trimming surrounding whitespace.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw secret, for the authorization header and the report echo.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Key prefix plus the last four characters, e.g. `sk_live_…abcd`.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= VISIBLE_SUFFIX * 2 {
            return "…".to_string();
        }
        let prefix: String = match self.0.rfind('_') {
            Some(idx) if idx + 1 < self.0.len() - VISIBLE_SUFFIX => self.0[..=idx].to_string(),
            _ => String::new(),
        };
        let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
        format!("{prefix}…{suffix}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

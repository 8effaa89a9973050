use serde::{Deserialize, Serialize};

/// Response language requested by the client.
///
/// Unknown codes fall back to English rather than failing the request.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Lenient parse: accepts `en`, `hi`, `hindi`, `english` (any case); anything else is `En`.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
            Some("hi") | Some("hindi") | Some("hi-in") => Language::Hi,
            _ => Language::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Name used when instructing the text generator.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Language::from_code(None), Language::En);
        assert_eq!(Language::from_code(Some("fr")), Language::En);
        assert_eq!(Language::from_code(Some(" HI ")), Language::Hi);
        assert_eq!(Language::from_code(Some("hindi")), Language::Hi);
    }
}

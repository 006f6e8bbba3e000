//! Locale tags for locale-sensitive casing.
//!
//! Only casing-relevant locale groups are distinguished. Every other valid
//! tag falls back to default Unicode case mapping, so a text flow never fails
//! on an unrecognized locale.

use std::str::FromStr;

use compact_str::CompactString;

/// Casing group resolved from a BCP 47 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Default Unicode casing
    #[default]
    Und,
    /// Turkish and Azerbaijani (dotted and dotless I)
    Turkic,
}

/// Error type for parsing a Locale from a malformed tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLocaleError;

impl std::fmt::Display for ParseLocaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid locale tag")
    }
}

impl std::error::Error for ParseLocaleError {}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        let primary = s.split(['-', '_']).next().unwrap_or("");
        if primary.is_empty()
            || primary.len() > 8
            || !primary.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err(ParseLocaleError);
        }
        match primary {
            "tr" | "az" => Ok(Self::Turkic),
            _ => Ok(Self::Und),
        }
    }
}

impl Locale {
    /// Try to parse a locale from a tag (case-insensitive)
    #[inline]
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Resolve a tag, falling back to default casing when malformed.
    pub fn from_tag(tag: &str) -> Self {
        match tag.parse() {
            Ok(locale) => locale,
            Err(_) => {
                tracing::debug!("malformed locale tag: {}", tag);
                Self::default()
            }
        }
    }

    /// Canonical code of the casing group
    #[inline]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Und => "und",
            Self::Turkic => "tr",
        }
    }

    /// Uppercase `text` under this locale's casing rules.
    pub fn uppercase(self, text: &str) -> String {
        match self {
            Self::Und => text.to_uppercase(),
            Self::Turkic => {
                let mut out = String::with_capacity(text.len());
                for c in text.chars() {
                    match c {
                        'i' => out.push('İ'),
                        'ı' => out.push('I'),
                        _ => out.extend(c.to_uppercase()),
                    }
                }
                out
            }
        }
    }

    /// Lowercase `text` under this locale's casing rules.
    pub fn lowercase(self, text: &str) -> String {
        match self {
            Self::Und => text.to_lowercase(),
            Self::Turkic => {
                let mut out = String::with_capacity(text.len());
                for c in text.chars() {
                    match c {
                        'I' => out.push('ı'),
                        'İ' => out.push('i'),
                        _ => out.extend(c.to_lowercase()),
                    }
                }
                out
            }
        }
    }
}

impl serde::Serialize for Locale {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Locale {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = CompactString::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Locale::parse("tr"), Some(Locale::Turkic));
        assert_eq!(Locale::parse("TR-tr"), Some(Locale::Turkic));
        assert_eq!(Locale::parse("az_AZ"), Some(Locale::Turkic));
        assert_eq!(Locale::parse("en-US"), Some(Locale::Und));
        assert_eq!(Locale::parse("und"), Some(Locale::Und));
        assert_eq!(Locale::parse(""), None);
        assert_eq!(Locale::parse("not a tag"), None);
    }

    #[test]
    fn test_from_tag_falls_back() {
        assert_eq!(Locale::from_tag("123"), Locale::Und);
        assert_eq!(Locale::from_tag("ja-JP"), Locale::Und);
        assert_eq!(Locale::from_tag("tr-TR"), Locale::Turkic);
    }

    #[test]
    fn test_turkic_casing() {
        let tr = Locale::Turkic;
        assert_eq!(tr.uppercase("istanbul"), "İSTANBUL");
        assert_eq!(tr.uppercase("kılıç"), "KILIÇ");
        assert_eq!(tr.lowercase("İSTANBUL"), "istanbul");
        assert_eq!(tr.lowercase("KIRK"), "kırk");
    }

    #[test]
    fn test_default_casing() {
        assert_eq!(Locale::Und.uppercase("istanbul"), "ISTANBUL");
        assert_eq!(Locale::Und.lowercase("STRASSE"), "strasse");
    }

    #[test]
    fn test_code() {
        assert_eq!(Locale::Und.code(), "und");
        assert_eq!(Locale::Turkic.code(), "tr");
    }
}

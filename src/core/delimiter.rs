//! Delimiter resolution.
//!
//! An input either has no header, in which case `,` and `\n` separate
//! numbers, or starts with `//` and a header line declaring its own
//! delimiters:
//!
//! ```text
//! //;\n1;2                 one single-character delimiter
//! //[***][%%]\n1***2%%3    any number of bracketed delimiters
//! ```
//!
//! [`StrategyKind::select`] decides which form an input uses and
//! [`StrategyKind::resolve`] turns it into a [`DelimiterStrategy`] carrying the
//! delimiters and the offset where the body starts.

use crate::utils::error::{CalcError, Result};

const HEADER_MARKER: &str = "//";
const DEFAULT_DELIMITERS: [&str; 2] = [",", "\n"];

/// Delimiters in declaration order. Earlier entries win ties when two
/// delimiters match at the same body position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimiterSet(Vec<String>);

impl DelimiterSet {
    /// Builds a set of custom delimiters.
    ///
    /// The set must not be empty, and no delimiter may be empty, a single
    /// digit, or the minus sign. Longer delimiters may contain digits; the
    /// earliest-match scan still splits on them.
    pub fn new(delimiters: Vec<String>) -> Result<Self> {
        if delimiters.is_empty() {
            return Err(header_error("no delimiter declared"));
        }
        for delimiter in &delimiters {
            if delimiter.is_empty() {
                return Err(header_error("empty delimiter"));
            }
            if delimiter == "-" || is_single_digit(delimiter) {
                return Err(header_error(format!(
                    "delimiter {:?} would be read as part of a number",
                    delimiter
                )));
            }
        }
        Ok(Self(delimiters))
    }

    /// The subset of `,` and `\n` that occurs in `raw`.
    fn defaults_in(raw: &str) -> Self {
        Self(
            DEFAULT_DELIMITERS
                .iter()
                .filter(|d| raw.contains(**d))
                .map(|d| d.to_string())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// No header; `,` and `\n` separate numbers.
    Default,
    /// `//X\n` declares the single character `X`.
    SingleCustom,
    /// `//[d1][d2]...\n` declares one or more delimiters of any length.
    MultiCustom,
}

impl StrategyKind {
    /// Picks the strategy for `raw`. Never fails; malformed headers are
    /// reported by [`StrategyKind::resolve`].
    pub fn select(raw: &str) -> Self {
        match raw.strip_prefix(HEADER_MARKER) {
            None => StrategyKind::Default,
            Some(rest) => {
                let header = rest.find('\n').map_or(rest, |end| &rest[..end]);
                if header.contains('[') {
                    StrategyKind::MultiCustom
                } else {
                    StrategyKind::SingleCustom
                }
            }
        }
    }

    pub fn resolve_delimiters(self, raw: &str) -> Result<DelimiterSet> {
        match self {
            StrategyKind::Default => Ok(DelimiterSet::defaults_in(raw)),
            StrategyKind::SingleCustom => {
                let header = header_line(raw)?;
                let mut chars = header.chars();
                match (chars.next(), chars.next()) {
                    (Some(delimiter), None) => DelimiterSet::new(vec![delimiter.to_string()]),
                    (None, _) => Err(header_error("no delimiter declared")),
                    (Some(_), Some(_)) => Err(header_error(format!(
                        "{:?} is not a single character; wrap longer delimiters in brackets",
                        header
                    ))),
                }
            }
            StrategyKind::MultiCustom => {
                let header = header_line(raw)?;
                DelimiterSet::new(bracketed(header))
            }
        }
    }

    /// Byte offset in `raw` where the body begins.
    pub fn body_start(self, raw: &str) -> Result<usize> {
        match self {
            StrategyKind::Default => Ok(0),
            StrategyKind::SingleCustom | StrategyKind::MultiCustom => {
                let header = header_line(raw)?;
                Ok(HEADER_MARKER.len() + header.len() + 1)
            }
        }
    }

    pub fn resolve(self, raw: &str) -> Result<DelimiterStrategy> {
        let delimiters = self.resolve_delimiters(raw)?;
        let strategy = match self {
            StrategyKind::Default => DelimiterStrategy::Default { delimiters },
            StrategyKind::SingleCustom => DelimiterStrategy::SingleCustom {
                delimiters,
                body_start: self.body_start(raw)?,
            },
            StrategyKind::MultiCustom => DelimiterStrategy::MultiCustom {
                delimiters,
                body_start: self.body_start(raw)?,
            },
        };
        Ok(strategy)
    }
}

/// A resolved strategy: the delimiters to split on and where the body starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelimiterStrategy {
    Default {
        delimiters: DelimiterSet,
    },
    SingleCustom {
        delimiters: DelimiterSet,
        body_start: usize,
    },
    MultiCustom {
        delimiters: DelimiterSet,
        body_start: usize,
    },
}

impl DelimiterStrategy {
    pub fn from_input(raw: &str) -> Result<Self> {
        let kind = StrategyKind::select(raw);
        tracing::debug!("Selected {:?} delimiter strategy", kind);
        kind.resolve(raw)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            DelimiterStrategy::Default { .. } => StrategyKind::Default,
            DelimiterStrategy::SingleCustom { .. } => StrategyKind::SingleCustom,
            DelimiterStrategy::MultiCustom { .. } => StrategyKind::MultiCustom,
        }
    }

    pub fn delimiters(&self) -> &DelimiterSet {
        match self {
            DelimiterStrategy::Default { delimiters }
            | DelimiterStrategy::SingleCustom { delimiters, .. }
            | DelimiterStrategy::MultiCustom { delimiters, .. } => delimiters,
        }
    }

    pub fn body_start(&self) -> usize {
        match self {
            DelimiterStrategy::Default { .. } => 0,
            DelimiterStrategy::SingleCustom { body_start, .. }
            | DelimiterStrategy::MultiCustom { body_start, .. } => *body_start,
        }
    }

    /// The part of `raw` after the header. Empty if `raw` is shorter than
    /// the input this strategy was resolved from.
    pub fn body<'a>(&self, raw: &'a str) -> &'a str {
        raw.get(self.body_start()..).unwrap_or("")
    }
}

/// Header text between `//` and the terminating newline.
fn header_line(raw: &str) -> Result<&str> {
    let rest = raw
        .strip_prefix(HEADER_MARKER)
        .ok_or_else(|| header_error("input does not start with //"))?;
    rest.find('\n')
        .map(|end| &rest[..end])
        .ok_or_else(|| header_error("header is not terminated by a newline"))
}

/// `[` opens a new token, dropping any unclosed one; `]` emits it.
/// Characters outside brackets are ignored.
fn bracketed(header: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current: Option<String> = None;

    for c in header.chars() {
        match c {
            '[' => current = Some(String::new()),
            ']' => {
                if let Some(token) = current.take() {
                    tokens.push(token);
                }
            }
            _ => {
                if let Some(token) = current.as_mut() {
                    token.push(c);
                }
            }
        }
    }

    tokens
}

fn is_single_digit(delimiter: &str) -> bool {
    let mut chars = delimiter.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

fn header_error(reason: impl Into<String>) -> CalcError {
    CalcError::HeaderError {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delimiters(raw: &str) -> Vec<String> {
        DelimiterStrategy::from_input(raw)
            .unwrap()
            .delimiters()
            .as_slice()
            .to_vec()
    }

    #[test]
    fn test_select_strategy() {
        assert_eq!(StrategyKind::select("1,2"), StrategyKind::Default);
        assert_eq!(StrategyKind::select(""), StrategyKind::Default);
        assert_eq!(StrategyKind::select("/1,2"), StrategyKind::Default);
        assert_eq!(StrategyKind::select("//;\n1;2"), StrategyKind::SingleCustom);
        assert_eq!(
            StrategyKind::select("//[***][%%%][$$$]\n1***2%%%3$$$4"),
            StrategyKind::MultiCustom
        );
        assert_eq!(StrategyKind::select("//[\n1[2"), StrategyKind::MultiCustom);
    }

    #[test]
    fn test_bracket_in_body_does_not_select_multi() {
        assert_eq!(StrategyKind::select("//;\n1;2["), StrategyKind::SingleCustom);
    }

    #[test]
    fn test_default_delimiters_only_include_present_ones() {
        assert_eq!(delimiters("1,2"), vec![","]);
        assert_eq!(delimiters("1\n2"), vec!["\n"]);
        assert_eq!(delimiters("3,4\n6"), vec![",", "\n"]);
        assert!(DelimiterStrategy::from_input("5")
            .unwrap()
            .delimiters()
            .is_empty());
    }

    #[test]
    fn test_single_custom_delimiter() {
        let strategy = DelimiterStrategy::from_input("//;\n1;2").unwrap();
        assert_eq!(strategy.kind(), StrategyKind::SingleCustom);
        assert_eq!(strategy.delimiters().as_slice(), &[";".to_string()]);
        assert_eq!(strategy.body_start(), 4);
        assert_eq!(strategy.body("//;\n1;2"), "1;2");
    }

    #[test]
    fn test_multi_custom_delimiters_keep_header_order() {
        assert_eq!(
            delimiters("//[***][%%%][$$$]\n1***2%%%3$$$4"),
            vec!["***", "%%%", "$$$"]
        );
        assert_eq!(delimiters("//[a][bb][ccc]\n"), vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn test_multi_custom_ignores_text_outside_brackets() {
        assert_eq!(delimiters("//x[;]y[::]z\n1;2::3"), vec![";", "::"]);
        assert_eq!(delimiters("//[ab[cd]\n1cd2"), vec!["cd"]);
    }

    #[test]
    fn test_multi_custom_body_start() {
        let raw = "//[==-][&&$]\n2==-3";
        let strategy = DelimiterStrategy::from_input(raw).unwrap();
        assert_eq!(strategy.body(raw), "2==-3");
    }

    #[test]
    fn test_unicode_single_delimiter() {
        let raw = "//é\n1é2";
        let strategy = DelimiterStrategy::from_input(raw).unwrap();
        assert_eq!(strategy.delimiters().as_slice(), &["é".to_string()]);
        assert_eq!(strategy.body(raw), "1é2");
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        for raw in [
            "//;",
            "//",
            "//\n1",
            "//;;\n1;2",
            "//5\n152",
            "//-\n1-2",
            "//[]\n12",
            "//[\n1[2",
            "//[**]",
            "//[7]\n172",
        ] {
            let result = DelimiterStrategy::from_input(raw);
            assert!(
                matches!(result, Err(CalcError::HeaderError { .. })),
                "expected header error for {:?}, got {:?}",
                raw,
                result
            );
        }
    }

    #[test]
    fn test_delimiter_set_rejects_empty() {
        assert!(DelimiterSet::new(vec![]).is_err());
        assert!(DelimiterSet::new(vec![String::new()]).is_err());
        assert!(DelimiterSet::new(vec!["--".to_string()]).is_ok());
    }

    #[test]
    fn test_longer_delimiters_may_contain_digits() {
        assert_eq!(delimiters("//[x1]\n2x13"), vec!["x1"]);
        assert_eq!(delimiters("//[a][2b]\n1a32b4"), vec!["a", "2b"]);
        assert!(DelimiterSet::new(vec!["1".to_string()]).is_err());
    }
}

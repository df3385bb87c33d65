use crate::core::delimiter::{DelimiterSet, DelimiterStrategy};
use crate::domain::model::NumberList;
use crate::utils::error::{CalcError, Result};

/// Resolves the delimiters of `raw` and extracts its numbers.
pub fn parse(raw: &str) -> Result<NumberList> {
    let strategy = DelimiterStrategy::from_input(raw)?;
    extract(raw, &strategy)
}

/// Splits the body of `raw` on the strategy's delimiters and parses every
/// token, keeping body order.
pub fn extract(raw: &str, strategy: &DelimiterStrategy) -> Result<NumberList> {
    let body = strategy.body(raw);
    let numbers = Tokens::new(body, strategy.delimiters())
        .map(parse_token)
        .collect::<Result<NumberList>>()?;

    tracing::debug!(
        "Extracted {} numbers using {} delimiter(s)",
        numbers.len(),
        strategy.delimiters().len()
    );
    Ok(numbers)
}

pub fn parse_token(token: &str) -> Result<i64> {
    token.parse::<i64>().map_err(|_| CalcError::ParseError {
        token: token.to_string(),
    })
}

/// Tokens of a body, in order.
///
/// Each step cuts at the earliest delimiter occurrence after the cursor; on a
/// tie the delimiter declared first wins. A trailing empty remainder yields
/// no token, while an empty token between two delimiters is returned as is.
pub struct Tokens<'a> {
    body: &'a str,
    delimiters: &'a [String],
    /// Next known occurrence of each delimiter, `None` once exhausted.
    next_match: Vec<Option<usize>>,
    cursor: usize,
    finished: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(body: &'a str, delimiters: &'a DelimiterSet) -> Self {
        let delimiters = delimiters.as_slice();
        let next_match = delimiters.iter().map(|d| body.find(d.as_str())).collect();
        Self {
            body,
            delimiters,
            next_match,
            cursor: 0,
            finished: false,
        }
    }

    fn earliest_match(&mut self) -> Option<(usize, usize)> {
        let cursor = self.cursor;
        let mut best: Option<(usize, usize)> = None;

        for (index, delimiter) in self.delimiters.iter().enumerate() {
            let slot = &mut self.next_match[index];
            if matches!(*slot, Some(position) if position < cursor) {
                *slot = self.body[cursor..]
                    .find(delimiter.as_str())
                    .map(|offset| cursor + offset);
            }
            if let Some(position) = *slot {
                if best.map_or(true, |(best_position, _)| position < best_position) {
                    best = Some((position, index));
                }
            }
        }

        best
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.finished {
            return None;
        }

        let start = self.cursor;
        match self.earliest_match() {
            Some((position, index)) => {
                self.cursor = position + self.delimiters[index].len();
                Some(&self.body[start..position])
            }
            None => {
                self.finished = true;
                let rest = &self.body[start..];
                (!rest.is_empty()).then_some(rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_delimiters() {
        assert_eq!(parse("1,2").unwrap(), vec![1, 2]);
        assert_eq!(parse("3,4\n6\n7").unwrap(), vec![3, 4, 6, 7]);
        assert_eq!(parse("5").unwrap(), vec![5]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("//;\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_custom_delimiter() {
        assert_eq!(parse("//;\n1;2").unwrap(), vec![1, 2]);
        assert_eq!(parse("//*\n4*3*2").unwrap(), vec![4, 3, 2]);
    }

    #[test]
    fn test_parse_custom_delimiters() {
        assert_eq!(
            parse("//[***][%%%][$$$]\n1***2%%%3$$$4").unwrap(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(
            parse("//[==-][&&$]\n2==-3==-6&&$8&&$9").unwrap(),
            vec![2, 3, 6, 8, 9]
        );
    }

    #[test]
    fn test_negatives_are_extracted_not_rejected() {
        assert_eq!(parse("-1,2,-3").unwrap(), vec![-1, 2, -3]);
    }

    #[test]
    fn test_trailing_delimiter_is_ignored() {
        assert_eq!(parse("1,2,").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_adjacent_delimiters_fail() {
        let err = parse("1,\n2").unwrap_err();
        assert!(matches!(err, CalcError::ParseError { ref token } if token.is_empty()));
    }

    #[test]
    fn test_non_numeric_token_fails() {
        let err = parse("1,x,3").unwrap_err();
        assert!(matches!(err, CalcError::ParseError { ref token } if token == "x"));

        // ';' is not a default delimiter
        assert!(parse("1;2").is_err());
    }

    #[test]
    fn test_out_of_range_token_fails() {
        assert!(parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_tie_goes_to_first_declared_delimiter() {
        // "*" matches at the same position as "**" and is declared first,
        // leaving an empty token between the two stars.
        assert!(parse("//[*][**]\n1**2").is_err());
        assert_eq!(parse("//[**][*]\n1**2*3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_earliest_position_beats_declaration_order() {
        assert_eq!(parse("//[;;][:]\n1:2;;3:4").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_overlapping_occurrences_are_rescanned() {
        // cached positions behind the cursor must be looked up again
        let set = DelimiterSet::new(vec!["aa".to_string(), "b".to_string()]).unwrap();
        let tokens: Vec<&str> = Tokens::new("1b2aa3", &set).collect();
        assert_eq!(tokens, vec!["1", "2", "3"]);

        let set = DelimiterSet::new(vec!["ab".to_string(), "b".to_string()]).unwrap();
        let tokens: Vec<&str> = Tokens::new("1b2ab3b4", &set).collect();
        assert_eq!(tokens, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_many_tokens_do_not_recurse() {
        let input = vec!["1"; 50_000].join(",");
        assert_eq!(parse(&input).unwrap().len(), 50_000);
    }
}

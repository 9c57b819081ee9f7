//! Quote-aware splitting of command-line-like strings.
//!
//! Expanded recipe strings need to become argument vectors, and a plain
//! whitespace split would tear apart arguments that were quoted precisely to
//! contain spaces. [`split_quoted`] splits on single spaces while re-joining
//! runs delimited by a configurable set of quote characters.

use thiserror::Error;

/// A quote character was opened and never closed.
///
/// The tokens accumulated before the failure are carried along so callers can
/// still use them diagnostically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid quoting, no closing `{quote}` char found")]
pub struct UnterminatedQuote {
    /// The quote character that was left open.
    pub quote: char,
    /// The tokens split off before the open quote was detected.
    pub tokens: Vec<String>,
}

// Conversion from UnterminatedQuote to the main Error type
impl From<UnterminatedQuote> for crate::Error {
    fn from(err: UnterminatedQuote) -> Self {
        crate::Error::Tokenize(err)
    }
}

/// Splits `source` on single spaces, honoring quoted substrings.
///
/// A token whose first character is one of `quote_chars` opens a quoted run;
/// the run accumulates (space-joined) until a token ends with the *same*
/// character, and the accumulated text, quote characters stripped, becomes one
/// token. There is no escaping: a quote character cannot appear verbatim
/// inside a token it delimits. Quote detection looks at whole Unicode code
/// points, never at raw bytes.
///
/// With `accept_empty_arguments` set to false, tokens that are empty or
/// all-whitespace after quote stripping are discarded.
///
/// ```
/// # use proptree::tokenize::split_quoted;
/// let tokens = split_quoted(r#"This 'is an' "Hello World!" example"#, "'\"", false)?;
/// assert_eq!(tokens, ["This", "is an", "Hello World!", "example"]);
/// # Ok::<(), proptree::tokenize::UnterminatedQuote>(())
/// ```
///
/// # Errors
///
/// [`UnterminatedQuote`] when the input ends inside a quoted run; the error
/// carries the offending quote character and the tokens gathered so far.
pub fn split_quoted(
    source: &str,
    quote_chars: &str,
    accept_empty_arguments: bool,
) -> Result<Vec<String>, UnterminatedQuote> {
    let mut tokens = Vec::new();
    let mut open_quote: Option<char> = None;
    let mut quoted = String::new();

    for piece in source.split(' ') {
        let mut piece = piece;

        let quote = match open_quote {
            Some(quote) => quote,
            None => {
                let first = piece.chars().next();
                let Some(quote) = first.filter(|c| quote_chars.contains(*c)) else {
                    if accept_empty_arguments || !piece.trim().is_empty() {
                        tokens.push(piece.to_string());
                    }
                    continue;
                };
                piece = &piece[quote.len_utf8()..];
                quoted.clear();
                open_quote = Some(quote);
                quote
            }
        };

        match piece.chars().next_back() {
            Some(last) if last == quote => {
                quoted.push_str(&piece[..piece.len() - last.len_utf8()]);
                if accept_empty_arguments || !quoted.trim().is_empty() {
                    tokens.push(quoted.clone());
                }
                open_quote = None;
            }
            _ => {
                quoted.push_str(piece);
                quoted.push(' ');
            }
        }
    }

    if let Some(quote) = open_quote {
        return Err(UnterminatedQuote { quote, tokens });
    }

    Ok(tokens)
}

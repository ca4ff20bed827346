use super::FormatError;

/// A lexical unit of a molecular formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An element symbol: one uppercase letter followed by any lowercase letters (e.g. `Na`).
    Element(String),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// A run of decimal digits acting as a multiplier for the preceding item.
    Multiplier(u32),
}

/// A token together with the byte offset at which it starts in the formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Splits a formula into element symbols, parentheses and digit runs.
///
/// The tokenizer is purely lexical: it does not check that parentheses are
/// balanced or that multipliers have something to apply to. Those rules
/// belong to the parser.
///
/// # Errors
///
/// Returns [`FormatError::UnexpectedCharacter`] for any character outside
/// `[A-Za-z0-9()]` and for a lowercase letter that does not continue an
/// element symbol, and [`FormatError::MultiplierOverflow`] when a digit run
/// does not fit in a `u32`.
pub fn tokenize(formula: &str) -> Result<Vec<Spanned>, FormatError> {
    let mut tokens = Vec::new();
    let mut chars = formula.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        let token = match c {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            'A'..='Z' => {
                let mut symbol = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !next.is_ascii_lowercase() {
                        break;
                    }
                    symbol.push(next);
                    chars.next();
                }
                Token::Element(symbol)
            }
            '0'..='9' => {
                let mut digits = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    digits.push(next);
                    chars.next();
                }
                let value = digits
                    .parse::<u32>()
                    .map_err(|_| FormatError::MultiplierOverflow { digits })?;
                Token::Multiplier(value)
            }
            other => {
                return Err(FormatError::UnexpectedCharacter {
                    character: other,
                    position,
                });
            }
        };
        tokens.push(Spanned { token, position });
    }

    Ok(tokens)
}

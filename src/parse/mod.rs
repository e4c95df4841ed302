mod error;
mod grammar;

pub use error::ParseError;

use crate::logging::pandatex_log;
use crate::Expr;

/// Deepest parenthesis nesting accepted by [`parse`].
pub const MAX_NESTING: usize = 128;

/// Parse the text form of a filter into an [`Expr`].
///
/// ```
/// use pandatex::{parse, CompareOp, Expr};
///
/// let expr = parse::parse("value < 5").unwrap();
/// assert_eq!(expr, Expr::compare("value", CompareOp::Lt, 5_i64));
/// ```
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid filter expression or
/// nests parentheses deeper than [`MAX_NESTING`].
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;
    check_nesting(input)
        .and_then(|()| {
            grammar::parse_filter
                .parse(input)
                .map_err(|e| ParseError::new(e.inner().to_string(), e.offset()))
        })
        .map_err(|err| {
            pandatex_log!(
                log::Level::Debug,
                "parse_failed",
                "offset={} input_len={}",
                err.offset(),
                input.len(),
            );
            err
        })
}

/// Reject over-deep nesting up front so the recursive grammar cannot exhaust
/// the stack. Parentheses inside strings and comments are not counted.
fn check_nesting(input: &str) -> Result<(), ParseError> {
    let mut depth = 0_usize;
    let mut chars = input.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => {
                let mut escaped = false;
                for (_, c) in chars.by_ref() {
                    match (escaped, c) {
                        (false, '"') => break,
                        (false, '\\') => escaped = true,
                        _ => escaped = false,
                    }
                }
            }
            '#' => {
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(ParseError::new(
                        format!("nesting deeper than {MAX_NESTING} levels"),
                        offset,
                    ));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

use winnow::ascii::till_line_ending;
use winnow::combinator::{
    alt, cut_err, delimited, not, opt, preceded, repeat, separated, terminated,
};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::{CompareOp, Expr, Key, Value};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers & keywords -------------------------------------------------

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_ident_char),
    )
        .take()
        .parse_next(input)
}

/// `lower` or `upper`, not followed by another identifier character.
fn keyword<'i>(
    lower: &'static str,
    upper: &'static str,
) -> impl Parser<&'i str, &'i str, ErrMode<ContextError>> {
    terminated(alt((lower, upper)), not(take_while(1.., is_ident_char)))
}

// -- Literals ---------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        match any.parse_next(input)? {
            '"' => return Ok(s),
            '\\' => match any.parse_next(input)? {
                '"' => s.push('"'),
                '\\' => s.push('\\'),
                'n' => s.push('\n'),
                't' => s.push('\t'),
                other => {
                    s.push('\\');
                    s.push(other);
                }
            },
            c => s.push(c),
        }
    }
}

fn number(input: &mut &str) -> ModalResult<Value> {
    let text = (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
        opt((
            one_of(['e', 'E']),
            opt(one_of(['+', '-'])),
            take_while(1.., |c: char| c.is_ascii_digit()),
        )),
    )
        .take()
        .parse_next(input)?;
    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ErrMode::from_input(input).cut())
    } else {
        text.parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ErrMode::from_input(input).cut())
    }
}

fn literal(input: &mut &str) -> ModalResult<Value> {
    ws.parse_next(input)?;
    alt((
        string_literal.map(Value::String),
        keyword("true", "TRUE").value(Value::Bool(true)),
        keyword("false", "FALSE").value(Value::Bool(false)),
        number,
    ))
    .context(StrContext::Expected(StrContextValue::Description("literal")))
    .parse_next(input)
}

/// A column or row key: an int, a string, or a parenthesised tuple of keys.
fn key_literal(input: &mut &str) -> ModalResult<Key> {
    ws.parse_next(input)?;
    alt((
        tuple_key,
        string_literal.map(Key::Str),
        number.verify_map(|v| match v {
            Value::Int(i) => Some(Key::Int(i)),
            _ => None,
        }),
    ))
    .context(StrContext::Expected(StrContextValue::Description("key")))
    .parse_next(input)
}

fn tuple_key(input: &mut &str) -> ModalResult<Key> {
    '('.parse_next(input)?;
    let levels: Vec<Key> = cut_err(separated(0.., key_literal, (ws, ','))).parse_next(input)?;
    cut_err((ws, ')')).parse_next(input)?;
    Ok(Key::Tuple(levels))
}

// -- Comparison operators ---------------------------------------------------

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    ws.parse_next(input)?;
    alt((
        ">=".value(CompareOp::Gte),
        ">".value(CompareOp::Gt),
        "<=".value(CompareOp::Lte),
        "<".value(CompareOp::Lt),
        "==".value(CompareOp::Eq),
        "!=".value(CompareOp::Neq),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "comparison operator",
    )))
    .parse_next(input)
}

// -- Expressions (precedence: OR < AND < primary) ---------------------------

fn primary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((
        delimited('(', cut_err(expr), (ws, cut_err(')'))),
        keyword("all", "ALL").value(Expr::All),
        keyword("none", "NONE").value(Expr::None),
        comparison,
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "expression",
    )))
    .parse_next(input)
}

fn comparison(input: &mut &str) -> ModalResult<Expr> {
    let attr = ident.parse_next(input)?;
    let op = cut_err(compare_op).parse_next(input)?;
    ws.parse_next(input)?;
    let result = cut_err(alt((
        tuple_key.map(|key| Expr::CompareKey {
            attr: attr.to_owned(),
            op,
            key,
        }),
        literal.map(|value| Expr::Compare {
            attr: attr.to_owned(),
            op,
            value,
        }),
    )))
    .parse_next(input);
    result
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = primary(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("and", "AND")), cut_err(primary))).parse_next(input)?;
    Ok(join(first, rest, Expr::And))
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("or", "OR")), cut_err(and_expr))).parse_next(input)?;
    Ok(join(first, rest, Expr::Or))
}

fn join(first: Expr, rest: Vec<Expr>, wrap: fn(Vec<Expr>) -> Expr) -> Expr {
    if rest.is_empty() {
        return first;
    }
    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(first);
    items.extend(rest);
    wrap(items)
}

fn expr(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    or_expr(input)
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_filter(input: &mut &str) -> ModalResult<Expr> {
    terminated(expr, ws).parse_next(input)
}

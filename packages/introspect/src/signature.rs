//! Best-effort recovery of a function's parameter list from its source text.
//!
//! Only the shape of the list matters: how many top-level parameters there
//! are and whether one of them is a rest parameter. Default values,
//! destructuring patterns and comments are skipped over.

use logos::Logos;
use thiserror::Error;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
enum Token<'src> {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,

    #[token("...")]
    Ellipsis,

    #[token("=>")]
    Arrow,

    #[token("=")]
    Assign,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice())]
    Ident(&'src str),

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    #[regex(r"`([^`\\]|\\.)*`")]
    Str,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignatureError {
    #[error("Function source is empty")]
    Empty,

    #[error("No parameter list found in function source")]
    MissingParameterList,

    #[error("Unbalanced parameter list starting at token {0}")]
    Unbalanced(usize),
}

/// Shape of a declared parameter list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterList {
    pub count: usize,
    pub rest: bool,
}

impl ParameterList {
    pub fn fixed(count: usize) -> Self {
        Self { count, rest: false }
    }
}

/// Parse the parameter list out of a function's source text.
///
/// Handles declarations, expressions, methods, getters and arrow functions,
/// including the parenthesis-free `x => ...` form. Characters the lexer does
/// not know are treated as opaque tokens.
pub fn parse_parameters(source: &str) -> Result<ParameterList, SignatureError> {
    let tokens: Vec<Option<Token<'_>>> = Token::lexer(source).map(Result::ok).collect();

    if tokens.is_empty() {
        return Err(SignatureError::Empty);
    }

    let mut start = 0;
    // `async x => ...` and `async (x) => ...`, but not a parameter named async
    if tokens.first() == Some(&Some(Token::Ident("async")))
        && tokens.get(1) != Some(&Some(Token::Arrow))
    {
        start = 1;
    }

    if let (Some(Some(Token::Ident(_))), Some(Some(Token::Arrow))) =
        (tokens.get(start), tokens.get(start + 1))
    {
        return Ok(ParameterList::fixed(1));
    }

    let open = tokens[start..]
        .iter()
        .position(|token| token == &Some(Token::LParen))
        .map(|offset| start + offset)
        .ok_or(SignatureError::MissingParameterList)?;

    let mut depth = 0usize;
    let mut count = 0usize;
    let mut rest = false;
    let mut current_has_tokens = false;

    for token in &tokens[open + 1..] {
        match token {
            Some(Token::LParen | Token::LBracket | Token::LBrace) => {
                depth += 1;
                current_has_tokens = true;
            }
            Some(Token::RParen) if depth == 0 => {
                if current_has_tokens {
                    count += 1;
                }
                return Ok(ParameterList { count, rest });
            }
            Some(Token::RParen | Token::RBracket | Token::RBrace) => {
                depth = depth.saturating_sub(1);
            }
            Some(Token::Comma) if depth == 0 => {
                if current_has_tokens {
                    count += 1;
                }
                current_has_tokens = false;
            }
            Some(Token::Ellipsis) if depth == 0 && !current_has_tokens => {
                rest = true;
                current_has_tokens = true;
            }
            _ => current_has_tokens = true,
        }
    }

    Err(SignatureError::Unbalanced(open))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_declaration() {
        assert_eq!(
            parse_parameters("function open(url, options) { return url; }"),
            Ok(ParameterList::fixed(2))
        );
    }

    #[test]
    fn test_no_parameters() {
        assert_eq!(parse_parameters("function () {}"), Ok(ParameterList::fixed(0)));
        assert_eq!(parse_parameters("() => {}"), Ok(ParameterList::fixed(0)));
    }

    #[test]
    fn test_native_code() {
        assert_eq!(
            parse_parameters("function push() { [native code] }"),
            Ok(ParameterList::fixed(0))
        );
    }

    #[test]
    fn test_arrow_without_parens() {
        assert_eq!(parse_parameters("value => value * 2"), Ok(ParameterList::fixed(1)));
        assert_eq!(parse_parameters("async value => value"), Ok(ParameterList::fixed(1)));
        assert_eq!(parse_parameters("async => 1"), Ok(ParameterList::fixed(1)));
    }

    #[test]
    fn test_async_arrow() {
        assert_eq!(
            parse_parameters("async (a, b) => { await a; }"),
            Ok(ParameterList::fixed(2))
        );
    }

    #[test]
    fn test_method_shorthand() {
        assert_eq!(parse_parameters("set(key, value) { this[key] = value; }"), Ok(ParameterList::fixed(2)));
    }

    #[test]
    fn test_defaults_and_destructuring() {
        assert_eq!(
            parse_parameters("function (a, { b, c } = {}, [d, e], f = (1, 2)) {}"),
            Ok(ParameterList::fixed(4))
        );
    }

    #[test]
    fn test_strings_and_comments_hide_punctuation() {
        assert_eq!(
            parse_parameters("function (a = ')', /* b, c */ d = \"(\") {}"),
            Ok(ParameterList::fixed(2))
        );
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(parse_parameters("function (a, b,) {}"), Ok(ParameterList::fixed(2)));
    }

    #[test]
    fn test_rest_parameter() {
        assert_eq!(
            parse_parameters("function (first, ...rest) {}"),
            Ok(ParameterList { count: 2, rest: true })
        );
        assert_eq!(
            parse_parameters("(...args) => args"),
            Ok(ParameterList { count: 1, rest: true })
        );
    }

    #[test]
    fn test_spread_in_default_is_not_rest() {
        assert_eq!(
            parse_parameters("function (a = [...xs]) {}"),
            Ok(ParameterList::fixed(1))
        );
    }

    #[test]
    fn test_unparseable_sources() {
        assert_eq!(parse_parameters(""), Err(SignatureError::Empty));
        assert_eq!(parse_parameters("[object Function]"), Err(SignatureError::MissingParameterList));
        assert_eq!(parse_parameters("function (a, b"), Err(SignatureError::Unbalanced(1)));
    }
}

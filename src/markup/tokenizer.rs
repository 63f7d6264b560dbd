//! logos-based markup tokenizer.
//!
//! Two lexers cooperate: [`Token`] splits a template into tags, comments and
//! text; [`AttrToken`] splits the inside of an opening tag into names, `=` and
//! quoted values. Attribute values containing `>` are not supported.

use logos::{Lexer, Logos};

/// Top-level markup token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `<!-- ... -->`, consumed through the closing `-->`.
    #[token("<!--", skip_comment)]
    Comment,

    /// Opening or self-closing tag: `<th scope="col">`, `<br/>`.
    #[regex(r"<[a-zA-Z][^<>]*>")]
    OpenTag,

    /// Closing tag: `</th>`.
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\r\n]*>")]
    CloseTag,

    /// Character data between tags.
    #[regex(r"[^<]+")]
    Text,
}

/// Bump the lexer past the end of a comment. Unterminated comments are errors.
fn skip_comment(lex: &mut Lexer<Token>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

/// Token inside an opening tag, after the tag name.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum AttrToken {
    /// Attribute name or unquoted value.
    #[regex(r#"[^ \t\r\n\f"'=<>/]+"#)]
    Name,

    /// `=`
    #[token("=")]
    Eq,

    /// `"value"`
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// `'value'`
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// `/` (self-closing marker).
    #[token("/")]
    Slash,
}

/// Tokenize a template into `(Token, byte offset, slice)` triples.
///
/// Input that fails to lex is reported as `Err(offset)`.
pub fn tokenize(input: &str) -> Vec<Result<(Token, usize, &str), usize>> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, span.start, &input[span])),
            Err(()) => Err(span.start),
        })
        .collect()
}

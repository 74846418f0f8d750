use logos::Logos;

use crate::error::{ParseError, Span};

/// The kinds of lexical token in the language.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// `Newline`, `Semicolon` and the two malformed-literal kinds are consumed by
/// [`Lexer`] and never reach the parser.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum TokenKind {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// A number cut off after its exponent marker, such as `1e` or `2.5E+`.
    #[regex(r"[0-9]+(\.[0-9]+)?[eE][+-]?")]
    #[regex(r"\.[0-9]+[eE][+-]?")]
    MalformedExponent,
    /// String literal tokens, `"..."` or `'...'`, escapes resolved.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\]|\\.)*'", parse_string)]
    Str(String),
    /// A string literal missing its closing quote.
    #[regex(r#""([^"\\]|\\.)*"#)]
    #[regex(r"'([^'\\]|\\.)*")]
    UnterminatedString,
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `when`
    #[token("when")]
    When,
    /// Identifier tokens; variable or function names such as `x` or `round`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    PipePipe,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `..=`
    #[token("..=")]
    DotDotEq,
    /// `..`
    #[token("..")]
    DotDot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `?`
    #[token("?")]
    Question,
    /// `:`
    #[token(":")]
    Colon,
    /// `;` statement separator.
    #[token(";")]
    Semicolon,
    /// Line break statement separator.
    #[token("\n")]
    Newline,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "{s:?}"),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::Bool(b) => return write!(f, "{b}"),
            Self::MalformedExponent => "malformed number",
            Self::UnterminatedString => "unterminated string",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::For => "for",
            Self::In => "in",
            Self::When => "when",
            Self::Comment => "comment",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::AndAnd => "&&",
            Self::PipePipe => "||",
            Self::Bang => "!",
            Self::Equals => "=",
            Self::DotDotEq => "..=",
            Self::DotDot => "..",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Newline => "newline",
            Self::Ignored => "whitespace",
        };
        write!(f, "{text}")
    }
}

/// A token together with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was lexed, including any literal payload.
    pub kind:      TokenKind,
    /// Byte range of the token in the source.
    pub span:      Span,
    /// Whether a `;` or line break occurred between the previous token and
    /// this one.
    pub separated: bool,
}

/// Lazy tokenizer over a source string.
///
/// Each call to [`Lexer::next_token`] skips whitespace, comments and
/// statement separators and returns the next token, or `None` once the
/// input is exhausted.
///
/// # Example
/// ```
/// use reckon::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("a = 1; b");
/// let kinds: Vec<TokenKind> = lexer.by_ref().map(|t| t.unwrap().kind).collect();
/// assert_eq!(kinds,
///            vec![TokenKind::Identifier("a".into()),
///                 TokenKind::Equals,
///                 TokenKind::Number(1.0),
///                 TokenKind::Identifier("b".into())]);
/// ```
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner: TokenKind::lexer(source) }
    }

    /// Length of the source in bytes, the offset of end-of-input errors.
    #[must_use]
    pub fn source_len(&self) -> usize {
        self.inner.source().len()
    }

    /// Returns the next token, or `None` at the end of input.
    ///
    /// # Errors
    /// Returns a lexical `ParseError` for a character that starts no token,
    /// a number with a dangling exponent, or an unterminated string.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        let mut separated = false;

        while let Some(result) = self.inner.next() {
            let span = Span::from(self.inner.span());
            match result {
                Ok(TokenKind::Newline | TokenKind::Semicolon) => separated = true,
                Ok(TokenKind::MalformedExponent) => return Err(ParseError::MalformedExponent { span }),
                Ok(TokenKind::UnterminatedString) => {
                    return Err(ParseError::UnterminatedString { span });
                },
                Ok(kind) => return Ok(Some(Token { kind, span, separated })),
                Err(()) => {
                    let character = self.inner.slice().chars().next().unwrap_or('\u{fffd}');
                    return Err(ParseError::UnexpectedCharacter { character, span });
                },
            }
        }

        Ok(None)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Parses a number literal from the current token slice.
///
/// Returns `None` (a lexing error) only if the slice is not a valid `f64`,
/// which the regex rules out.
fn parse_number(lex: &mut logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a string literal and resolves its escapes.
///
/// Unknown escapes stand for the escaped character itself.
fn parse_string(lex: &mut logos::Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some(other) => value.push(other),
            None => {},
        }
    }
    value
}

/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &mut logos::Lexer<TokenKind>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

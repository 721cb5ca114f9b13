use std::fmt;

use timon_ast::UnitWord;
use timon_value::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timedelta, Timelike};

/// All lexical tokens of the Timon language (§3).
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    // Literals.
    Number(i64),
    Str(String),
    DateLit(NaiveDate),
    TimeLit(NaiveTime),
    DatetimeLit(NaiveDateTime),
    TimedeltaLit(Timedelta),
    Ident(String),

    // Keywords.
    Fun,
    Var,
    If,
    Else,
    From,
    To,
    By,
    As,
    Print,
    Return,
    /// One of the seven field/step-unit keywords (`years` .. `seconds`).
    Unit(UnitWord),

    // Punctuation.
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,

    // Operators.
    Assign,
    Eq,
    NotEq,
    Gt,
    Ge,
    Lt,
    Le,
    Add,
    Minus,
    Mul,
    Div,
    And,
    Or,
    Not,

    Eof,
}

impl Token {
    /// Matches an identifier's text against the keyword table, returning
    /// the keyword token if it matches or `None` if `name` is a plain
    /// identifier.
    pub(crate) fn keyword_from_ident(name: &str) -> Option<Token> {
        if let Some(unit) = UnitWord::from_str(name) {
            return Some(Token::Unit(unit));
        }
        Some(match name {
            "fun" => Token::Fun,
            "var" => Token::Var,
            "if" => Token::If,
            "else" => Token::Else,
            "from" => Token::From,
            "to" => Token::To,
            "by" => Token::By,
            "as" => Token::As,
            "print" => Token::Print,
            "return" => Token::Return,
            _ => return None,
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::DateLit(d) => write!(f, "{:02}.{:02}.{:04}", d.day(), d.month(), d.year()),
            Token::TimeLit(t) => write!(f, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second()),
            Token::DatetimeLit(dt) => write!(
                f,
                "{:02}.{:02}.{:04}~{:02}:{:02}:{:02}",
                dt.day(),
                dt.month(),
                dt.year(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            Token::TimedeltaLit(td) => td.fmt(f),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Fun => write!(f, "fun"),
            Token::Var => write!(f, "var"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::From => write!(f, "from"),
            Token::To => write!(f, "to"),
            Token::By => write!(f, "by"),
            Token::As => write!(f, "as"),
            Token::Print => write!(f, "print"),
            Token::Return => write!(f, "return"),
            Token::Unit(u) => write!(f, "{u}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Assign => write!(f, "="),
            Token::Eq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
            Token::Gt => write!(f, ">"),
            Token::Ge => write!(f, ">="),
            Token::Lt => write!(f, "<"),
            Token::Le => write!(f, "<="),
            Token::Add => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Mul => write!(f, "*"),
            Token::Div => write!(f, "/"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::Not => write!(f, "!"),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}

/// A short, one-word name for a token kind, used in "expected X, found Y"
/// syntax error messages where printing the literal payload would be noisy.
pub fn describe(token: &Token) -> String {
    match token {
        Token::Number(_) => "a number literal".into(),
        Token::Str(_) => "a string literal".into(),
        Token::DateLit(_) => "a date literal".into(),
        Token::TimeLit(_) => "a time literal".into(),
        Token::DatetimeLit(_) => "a datetime literal".into(),
        Token::TimedeltaLit(_) => "a timedelta literal".into(),
        Token::Ident(name) => format!("identifier '{name}'"),
        Token::Eof => "end of input".into(),
        other => format!("'{other}'"),
    }
}

/// A stable, all-caps tag for a token's kind, independent of its payload.
/// Used by the CLI's `lexer` stage, which prints one `KIND` (plus payload)
/// per token rather than the article-prefixed prose `describe` produces.
pub fn kind_name(token: &Token) -> &'static str {
    match token {
        Token::Number(_) => "NUMBER",
        Token::Str(_) => "STRING",
        Token::DateLit(_) => "DATE",
        Token::TimeLit(_) => "TIME",
        Token::DatetimeLit(_) => "DATETIME",
        Token::TimedeltaLit(_) => "TIMEDELTA",
        Token::Ident(_) => "IDENT",
        Token::Fun => "FUN",
        Token::Var => "VAR",
        Token::If => "IF",
        Token::Else => "ELSE",
        Token::From => "FROM",
        Token::To => "TO",
        Token::By => "BY",
        Token::As => "AS",
        Token::Print => "PRINT",
        Token::Return => "RETURN",
        Token::Unit(_) => "UNIT",
        Token::LParen => "LPAREN",
        Token::RParen => "RPAREN",
        Token::LBrace => "LBRACE",
        Token::RBrace => "RBRACE",
        Token::Comma => "COMMA",
        Token::Dot => "DOT",
        Token::Assign => "ASSIGN",
        Token::Eq => "EQ",
        Token::NotEq => "NOTEQ",
        Token::Gt => "GT",
        Token::Ge => "GE",
        Token::Lt => "LT",
        Token::Le => "LE",
        Token::Add => "ADD",
        Token::Minus => "MINUS",
        Token::Mul => "MUL",
        Token::Div => "DIV",
        Token::And => "AND",
        Token::Or => "OR",
        Token::Not => "NOT",
        Token::Eof => "EOF",
    }
}

/// The token's literal payload, if printing one adds information beyond the
/// kind tag alone (a bare `(` needs no payload; `NUMBER 42` does).
pub fn payload(token: &Token) -> Option<String> {
    match token {
        Token::Number(_)
        | Token::Str(_)
        | Token::DateLit(_)
        | Token::TimeLit(_)
        | Token::DatetimeLit(_)
        | Token::TimedeltaLit(_)
        | Token::Ident(_)
        | Token::Unit(_) => Some(token.to_string()),
        _ => None,
    }
}

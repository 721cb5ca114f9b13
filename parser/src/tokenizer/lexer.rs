//! The Timon lexer: a lazy pull iterator over the source text, modeled on
//! `leo_parser`'s `tokenizer::lexer` — `Tokenizer::next_token` classifies and
//! consumes exactly one token per call from a `&str` cursor, rather than
//! pre-splitting the whole file into a token stream up front.

use timon_errors::Error;
use timon_span::{Position, Span};
use timon_value::{NaiveDate, NaiveDateTime, NaiveTime, Timedelta};

use super::token::Token;

pub struct Tokenizer<'a> {
    source: &'a str,
    pos: Position,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: Position::start() }
    }

    fn remaining(&self) -> &'a str {
        &self.source[self.pos.offset as usize..]
    }

    fn bump_bytes(&mut self, len: usize) {
        let consumed = &self.remaining()[..len];
        for c in consumed.chars() {
            self.pos = self.pos.advance(c);
        }
    }

    fn skip_trivia(&mut self) -> timon_errors::Result<()> {
        loop {
            let rest = self.remaining();
            let Some(c) = rest.chars().next() else { break };
            if c.is_whitespace() {
                self.pos = self.pos.advance(c);
                continue;
            }
            if c == '#' {
                let start = self.pos;
                self.pos = self.pos.advance(c);
                loop {
                    match self.remaining().chars().next() {
                        Some('#') => {
                            self.pos = self.pos.advance('#');
                            break;
                        }
                        Some(c) => self.pos = self.pos.advance(c),
                        None => return Err(Error::lex(Span::at(start), "unterminated comment")),
                    }
                }
                continue;
            }
            break;
        }
        Ok(())
    }

    /// Advances past and returns the next token along with its span.
    pub fn next_token(&mut self) -> timon_errors::Result<(Token, Span)> {
        self.skip_trivia()?;
        let start = self.pos;
        if self.remaining().is_empty() {
            return Ok((Token::Eof, Span::at(start)));
        }
        let (len, token) = eat_one(self.remaining()).map_err(|message| Error::lex(Span::at(start), message))?;
        self.bump_bytes(len);
        tracing::trace!(%start, ?token, "lexed token");
        Ok((token, Span::new(start, self.pos)))
    }
}

/// Lexes the full source into a token stream, including the trailing `Eof`.
pub fn tokenize_all(source: &str) -> timon_errors::Result<Vec<(Token, Span)>> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();
    loop {
        let (token, span) = tokenizer.next_token()?;
        let is_eof = token == Token::Eof;
        tokens.push((token, span));
        if is_eof {
            return Ok(tokens);
        }
    }
}

/// Classifies and measures exactly one token at the start of `input`,
/// returning its byte length and value. `input` is never empty.
fn eat_one(input: &str) -> Result<(usize, Token), String> {
    let c = input.chars().next().unwrap();

    if c.is_ascii_digit() {
        if let Some((len, date)) = try_date(input)? {
            let after = &input[len..];
            if let Some(rest) = after.strip_prefix('~') {
                return match try_time(rest)? {
                    Some((time_len, time)) => {
                        Ok((len + 1 + time_len, Token::DatetimeLit(NaiveDateTime::new(date, time))))
                    }
                    None => Err("expected 'HH:MM:SS' after '~' in datetime literal".to_string()),
                };
            }
            return Ok((len, Token::DateLit(date)));
        }
        if let Some((len, time)) = try_time(input)? {
            return Ok((len, Token::TimeLit(time)));
        }
        return try_number(input);
    }

    match c {
        '"' => try_string(input),
        '\'' => try_timedelta(input),
        c if c.is_ascii_alphabetic() || c == '_' => {
            let (len, name) = take_identifier(input);
            let token = Token::keyword_from_ident(&name).unwrap_or(Token::Ident(name));
            Ok((len, token))
        }
        '(' => Ok((1, Token::LParen)),
        ')' => Ok((1, Token::RParen)),
        '{' => Ok((1, Token::LBrace)),
        '}' => Ok((1, Token::RBrace)),
        ',' => Ok((1, Token::Comma)),
        '.' => Ok((1, Token::Dot)),
        '+' => Ok((1, Token::Add)),
        '-' => Ok((1, Token::Minus)),
        '*' => Ok((1, Token::Mul)),
        '/' => Ok((1, Token::Div)),
        '&' => Ok((1, Token::And)),
        '|' => Ok((1, Token::Or)),
        '=' => Ok(if input[1..].starts_with('=') { (2, Token::Eq) } else { (1, Token::Assign) }),
        '!' => Ok(if input[1..].starts_with('=') { (2, Token::NotEq) } else { (1, Token::Not) }),
        '>' => Ok(if input[1..].starts_with('=') { (2, Token::Ge) } else { (1, Token::Gt) }),
        '<' => Ok(if input[1..].starts_with('=') { (2, Token::Le) } else { (1, Token::Lt) }),
        other => Err(format!("unexpected character '{other}'")),
    }
}

fn digits_at(input: &str, offset: usize, n: usize) -> bool {
    input.as_bytes().get(offset..offset + n).is_some_and(|b| b.iter().all(u8::is_ascii_digit))
}

/// Matches the fixed `DD.MM.YYYY` shape at the start of `input`. Returns
/// `Ok(None)` (not a lex error) if the shape simply doesn't match here, since
/// a bare number followed by `.` is a legal token sequence of its own (e.g.
/// field access chained off a parenthesized numeric expression).
fn try_date(input: &str) -> Result<Option<(usize, NaiveDate)>, String> {
    if input.len() < 10
        || !digits_at(input, 0, 2)
        || input.as_bytes()[2] != b'.'
        || !digits_at(input, 3, 2)
        || input.as_bytes()[5] != b'.'
        || !digits_at(input, 6, 4)
        || input.as_bytes().get(10).is_some_and(u8::is_ascii_digit)
    {
        return Ok(None);
    }
    let day: u32 = input[0..2].parse().unwrap();
    let month: u32 = input[3..5].parse().unwrap();
    let year: i32 = input[6..10].parse().unwrap();
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("'{}' is not a valid calendar date", &input[0..10]))?;
    Ok(Some((10, date)))
}

/// Matches the fixed `HH:MM:SS` shape at the start of `input`.
fn try_time(input: &str) -> Result<Option<(usize, NaiveTime)>, String> {
    if input.len() < 8
        || !digits_at(input, 0, 2)
        || input.as_bytes()[2] != b':'
        || !digits_at(input, 3, 2)
        || input.as_bytes()[5] != b':'
        || !digits_at(input, 6, 2)
        || input.as_bytes().get(8).is_some_and(u8::is_ascii_digit)
    {
        return Ok(None);
    }
    let hour: u32 = input[0..2].parse().unwrap();
    let min: u32 = input[3..5].parse().unwrap();
    let sec: u32 = input[6..8].parse().unwrap();
    let time = NaiveTime::from_hms_opt(hour, min, sec)
        .ok_or_else(|| format!("'{}' is not a valid time of day", &input[0..8]))?;
    Ok(Some((8, time)))
}

fn try_number(input: &str) -> Result<(usize, Token), String> {
    let len = input.chars().take_while(char::is_ascii_digit).count();
    let digits = &input[..len];
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(format!("number literal '{digits}' has a leading zero"));
    }
    let n: i64 = digits.parse().map_err(|_| format!("integer literal '{digits}' is out of range"))?;
    Ok((len, Token::Number(n)))
}

fn try_string(input: &str) -> Result<(usize, Token), String> {
    let mut idx = 1; // past opening '"'
    let mut s = String::new();
    loop {
        let rest = &input[idx..];
        let c = rest.chars().next().ok_or("unterminated string literal")?;
        match c {
            '\n' => return Err("string literal contains a newline".to_string()),
            '"' => {
                idx += 1;
                break;
            }
            '\\' => {
                let escaped = rest[1..].chars().next().ok_or("unterminated string literal")?;
                if escaped != '"' {
                    return Err(format!("invalid escape sequence '\\{escaped}' in string literal"));
                }
                s.push('"');
                idx += 2;
            }
            other => {
                s.push(other);
                idx += other.len_utf8();
            }
        }
    }
    Ok((idx, Token::Str(s)))
}

/// Matches `'<n><unit>...'` with units drawn from `Y M W D h m s`, strictly
/// ordered and each usable at most once (§3).
fn try_timedelta(input: &str) -> Result<(usize, Token), String> {
    const ORDER: [char; 7] = ['Y', 'M', 'W', 'D', 'h', 'm', 's'];
    let mut values = [0i64; 7];
    let mut idx = 1; // past opening quote
    let mut allowed_from = 0usize;

    loop {
        let rest = &input[idx..];
        let digit_len = rest.chars().take_while(char::is_ascii_digit).count();
        if digit_len == 0 {
            return Err("malformed timedelta literal".to_string());
        }
        let digits = &rest[..digit_len];
        let n: i64 = digits.parse().map_err(|_| format!("timedelta component '{digits}' is out of range"))?;
        idx += digit_len;

        let unit = input[idx..].chars().next().ok_or("unterminated timedelta literal")?;
        let slot = ORDER.iter().position(|&u| u == unit).ok_or_else(|| format!("invalid timedelta unit '{unit}'"))?;
        if slot < allowed_from {
            return Err(format!("timedelta unit '{unit}' is out of order or repeated"));
        }
        values[slot] = n;
        allowed_from = slot + 1;
        idx += unit.len_utf8();

        match input[idx..].chars().next() {
            Some('\'') => {
                idx += 1;
                break;
            }
            Some(d) if d.is_ascii_digit() => continue,
            _ => return Err("malformed timedelta literal".to_string()),
        }
    }

    let td = Timedelta::new(values[0], values[1], values[2], values[3], values[4], values[5], values[6]);
    Ok((idx, Token::TimedeltaLit(td)))
}

fn take_identifier(input: &str) -> (usize, String) {
    let len = input
        .char_indices()
        .take_while(|&(i, c)| if i == 0 { c.is_ascii_alphabetic() || c == '_' } else { c.is_ascii_alphanumeric() || c == '_' })
        .count();
    (len, input[..len].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize_all(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn lexes_keywords_and_identifiers() {
        assert_eq!(kinds("fun foo"), vec![Token::Fun, Token::Ident("foo".into()), Token::Eof]);
    }

    #[test]
    fn lexes_number_literal() {
        assert_eq!(kinds("0"), vec![Token::Number(0), Token::Eof]);
        assert_eq!(kinds("42"), vec![Token::Number(42), Token::Eof]);
    }

    #[test]
    fn rejects_leading_zero_number() {
        assert!(tokenize_all("007").is_err());
    }

    #[test]
    fn lexes_date_time_and_datetime_literals() {
        assert_eq!(
            kinds("31.01.2024"),
            vec![Token::DateLit(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()), Token::Eof]
        );
        assert_eq!(kinds("23:59:59"), vec![Token::TimeLit(NaiveTime::from_hms_opt(23, 59, 59).unwrap()), Token::Eof]);
        assert_eq!(
            kinds("31.01.2024~23:59:59"),
            vec![
                Token::DatetimeLit(NaiveDateTime::new(
                    NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                    NaiveTime::from_hms_opt(23, 59, 59).unwrap()
                )),
                Token::Eof
            ]
        );
    }

    #[test]
    fn number_dot_number_is_not_mistaken_for_a_date() {
        assert_eq!(
            kinds("31.5"),
            vec![Token::Number(31), Token::Dot, Token::Number(5), Token::Eof]
        );
    }

    #[test]
    fn lexes_timedelta_literal_in_order() {
        assert_eq!(kinds("'1Y2M3D'"), vec![Token::TimedeltaLit(Timedelta::new(1, 2, 0, 3, 0, 0, 0)), Token::Eof]);
    }

    #[test]
    fn rejects_out_of_order_timedelta_units() {
        assert!(tokenize_all("'3D2M'").is_err());
    }

    #[test]
    fn rejects_repeated_timedelta_units() {
        assert!(tokenize_all("'1Y2Y'").is_err());
    }

    #[test]
    fn lexes_string_literal_with_escaped_quote() {
        assert_eq!(kinds(r#""a\"b""#), vec![Token::Str("a\"b".into()), Token::Eof]);
    }

    #[test]
    fn lexes_operators_including_two_char_forms() {
        assert_eq!(
            kinds("== != >= <= > < = + - * / & | !"),
            vec![
                Token::Eq,
                Token::NotEq,
                Token::Ge,
                Token::Le,
                Token::Gt,
                Token::Lt,
                Token::Assign,
                Token::Add,
                Token::Minus,
                Token::Mul,
                Token::Div,
                Token::And,
                Token::Or,
                Token::Not,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn skips_hash_delimited_comments() {
        assert_eq!(kinds("1 # a comment # 2"), vec![Token::Number(1), Token::Number(2), Token::Eof]);
    }

    #[test]
    fn unterminated_comment_is_a_lex_error() {
        assert!(tokenize_all("1 # oops").is_err());
    }

    #[test]
    fn field_words_lex_as_unit_keywords_not_identifiers() {
        assert_eq!(kinds("years"), vec![Token::Unit(timon_ast::UnitWord::Years), Token::Eof]);
    }

    #[test]
    fn span_tracks_line_and_column() {
        let tokens = tokenize_all("1\n22").unwrap();
        assert_eq!(tokens[0].1.start.line, 1);
        assert_eq!(tokens[1].1.start.line, 2);
        assert_eq!(tokens[1].1.start.column, 1);
    }
}

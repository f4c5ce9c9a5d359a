//! Small css tokenizer for building test fixtures. Covers the token kinds the
//! grammar cares about; numbers keep their source text as value.

use crate::parser::css_token::{Position, Token, TokenType};

pub(crate) fn lex(css: &str) -> Vec<Token> {
    let normalized = css.replace("\r\n", "\n").replace(['\r', '\u{c}'], "\n");
    let mut lexer = Lexer {
        chars: normalized.chars().collect(),
        idx: 0,
        line: 1,
        col: 0,
        tokens: Vec::new(),
    };
    lexer.run();
    return lexer.tokens;
}

struct Lexer {
    chars: Vec<char>,
    idx: usize,
    line: u32,
    col: u32,
    tokens: Vec<Token>,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c as u32 >= 0x80
}

fn is_name(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

impl Lexer {
    fn peek(&self, n: usize) -> char {
        self.chars.get(self.idx + n).copied().unwrap_or('\0')
    }

    fn at_end(&self) -> bool {
        self.idx >= self.chars.len()
    }

    fn bump(&mut self) -> char {
        let c = self.peek(0);
        self.idx += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        c
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.col)
    }

    fn push(&mut self, token_type: TokenType, value: &str, pos: Position) {
        self.tokens.push(Token::new(token_type, value, pos));
    }

    fn valid_escape(&self, n: usize) -> bool {
        self.peek(n) == '\\' && self.peek(n + 1) != '\n' && self.idx + n + 1 < self.chars.len()
    }

    fn starts_ident(&self, n: usize) -> bool {
        let c = self.peek(n);
        if c == '-' {
            let next = self.peek(n + 1);
            return is_name_start(next) || next == '-' || self.valid_escape(n + 1);
        }
        is_name_start(c) || self.valid_escape(n)
    }

    fn starts_number(&self) -> bool {
        let c = self.peek(0);
        match c {
            '0'..='9' => true,
            '.' => self.peek(1).is_ascii_digit(),
            '+' | '-' => {
                self.peek(1).is_ascii_digit() || (self.peek(1) == '.' && self.peek(2).is_ascii_digit())
            }
            _ => false,
        }
    }

    fn escape(&mut self) -> char {
        self.bump();
        if !self.peek(0).is_ascii_hexdigit() {
            return self.bump();
        }
        let mut hex = String::new();
        while hex.len() < 6 && self.peek(0).is_ascii_hexdigit() {
            hex.push(self.bump());
        }
        if is_whitespace(self.peek(0)) {
            self.bump();
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|v| *v != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}')
    }

    fn name(&mut self) -> String {
        let mut name = String::new();
        loop {
            if is_name(self.peek(0)) && !self.at_end() {
                name.push(self.bump());
            } else if self.valid_escape(0) {
                let c = self.escape();
                name.push(c);
            } else {
                return name;
            }
        }
    }

    fn string(&mut self, quote: char) -> String {
        self.bump();
        let mut value = String::new();
        while !self.at_end() {
            let c = self.peek(0);
            if c == quote {
                self.bump();
                break;
            } else if c == '\n' {
                break;
            } else if c == '\\' {
                if self.peek(1) == '\n' {
                    self.bump();
                    self.bump();
                } else if self.idx + 1 >= self.chars.len() {
                    self.bump();
                } else {
                    let c = self.escape();
                    value.push(c);
                }
            } else {
                value.push(self.bump());
            }
        }
        value
    }

    fn number(&mut self, pos: Position) {
        let mut repr = String::new();
        if matches!(self.peek(0), '+' | '-') {
            repr.push(self.bump());
        }
        while self.peek(0).is_ascii_digit() {
            repr.push(self.bump());
        }
        if self.peek(0) == '.' && self.peek(1).is_ascii_digit() {
            repr.push(self.bump());
            while self.peek(0).is_ascii_digit() {
                repr.push(self.bump());
            }
        }
        let exponent = matches!(self.peek(0), 'e' | 'E')
            && (self.peek(1).is_ascii_digit()
                || (matches!(self.peek(1), '+' | '-') && self.peek(2).is_ascii_digit()));
        if exponent {
            repr.push(self.bump());
            repr.push(self.bump());
            while self.peek(0).is_ascii_digit() {
                repr.push(self.bump());
            }
        }
        if self.peek(0) == '%' {
            repr.push(self.bump());
            self.push(TokenType::Percentage, &repr, pos);
        } else if self.starts_ident(0) {
            repr.push_str(&self.name());
            self.push(TokenType::Dimension, &repr, pos);
        } else {
            self.push(TokenType::Number, &repr, pos);
        }
    }

    fn ident_like(&mut self, pos: Position) {
        let name = self.name();
        if self.peek(0) != '(' {
            self.push(TokenType::Ident, &name, pos);
            return;
        }
        self.bump();
        if !name.eq_ignore_ascii_case("url") {
            self.push(TokenType::FunctionToken, &name, pos);
            return;
        }
        let mut ahead = 0;
        while is_whitespace(self.peek(ahead)) {
            ahead += 1;
        }
        if matches!(self.peek(ahead), '"' | '\'') {
            self.push(TokenType::FunctionToken, &name, pos);
            return;
        }
        while is_whitespace(self.peek(0)) {
            self.bump();
        }
        let mut url = String::new();
        while !self.at_end() && self.peek(0) != ')' {
            if self.valid_escape(0) {
                let c = self.escape();
                url.push(c);
            } else {
                url.push(self.bump());
            }
        }
        self.bump();
        self.push(TokenType::Url, url.trim_end(), pos);
    }

    fn run(&mut self) {
        while !self.at_end() {
            let pos = self.pos();
            let c = self.peek(0);
            if c == '/' && self.peek(1) == '*' {
                self.bump();
                self.bump();
                while !self.at_end() && !(self.peek(0) == '*' && self.peek(1) == '/') {
                    self.bump();
                }
                self.bump();
                self.bump();
                continue;
            }
            if is_whitespace(c) {
                while is_whitespace(self.peek(0)) {
                    self.bump();
                }
                self.push(TokenType::Whitespace, "", pos);
                continue;
            }
            let two = (c, self.peek(1));
            let matcher = match two {
                ('~', '=') => Some(TokenType::IncludeMatch),
                ('|', '=') => Some(TokenType::DashMatch),
                ('^', '=') => Some(TokenType::PrefixMatch),
                ('$', '=') => Some(TokenType::SuffixMatch),
                ('*', '=') => Some(TokenType::SubstringMatch),
                ('|', '|') => Some(TokenType::Column),
                _ => None,
            };
            if let Some(token_type) = matcher {
                self.bump();
                self.bump();
                self.push(token_type, "", pos);
                continue;
            }
            if c == '<' && self.peek(1) == '!' && self.peek(2) == '-' && self.peek(3) == '-' {
                (0..4).for_each(|_| {
                    self.bump();
                });
                self.push(TokenType::Cdo, "", pos);
                continue;
            }
            if c == '-' && self.peek(1) == '-' && self.peek(2) == '>' {
                (0..3).for_each(|_| {
                    self.bump();
                });
                self.push(TokenType::Cdc, "", pos);
                continue;
            }
            match c {
                '"' | '\'' => {
                    let value = self.string(c);
                    self.push(TokenType::String, &value, pos);
                }
                '#' if is_name(self.peek(1)) || self.valid_escape(1) => {
                    self.bump();
                    let name = self.name();
                    self.push(TokenType::Hash, &name, pos);
                }
                '@' if self.starts_ident(1) => {
                    self.bump();
                    let name = self.name();
                    self.push(TokenType::AtKeyword, &name, pos);
                }
                _ if self.starts_number() => self.number(pos),
                _ if self.starts_ident(0) => self.ident_like(pos),
                '(' | ')' | '[' | ']' | '{' | '}' | ':' | ';' | ',' => {
                    self.bump();
                    let token_type = match c {
                        '(' => TokenType::OpenParen,
                        ')' => TokenType::CloseParen,
                        '[' => TokenType::OpenSquare,
                        ']' => TokenType::CloseSquare,
                        '{' => TokenType::OpenCurly,
                        '}' => TokenType::CloseCurly,
                        ':' => TokenType::Colon,
                        ';' => TokenType::Semicolon,
                        _ => TokenType::Comma,
                    };
                    self.push(token_type, "", pos);
                }
                _ => {
                    self.bump();
                    self.push(TokenType::Delim, &c.to_string(), pos);
                }
            }
        }
        let pos = self.pos();
        self.tokens.push(Token::eof(pos));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(css: &str) -> Vec<(TokenType, String)> {
        lex(css)
            .into_iter()
            .map(|t| (t.token_type, t.value.to_string()))
            .collect()
    }

    #[test]
    fn lexes_fixture_kinds() {
        use TokenType::*;
        let s = |v: &str| v.to_string();
        assert_eq!(
            kinds("@media (min-width: 12cm) { a.b #c { x: url(a.png) 50% -1 } }"),
            vec![
                (AtKeyword, s("media")),
                (Whitespace, s("")),
                (OpenParen, s("")),
                (Ident, s("min-width")),
                (Colon, s("")),
                (Whitespace, s("")),
                (Dimension, s("12cm")),
                (CloseParen, s("")),
                (Whitespace, s("")),
                (OpenCurly, s("")),
                (Whitespace, s("")),
                (Ident, s("a")),
                (Delim, s(".")),
                (Ident, s("b")),
                (Whitespace, s("")),
                (Hash, s("c")),
                (Whitespace, s("")),
                (OpenCurly, s("")),
                (Whitespace, s("")),
                (Ident, s("x")),
                (Colon, s("")),
                (Whitespace, s("")),
                (Url, s("a.png")),
                (Whitespace, s("")),
                (Percentage, s("50%")),
                (Whitespace, s("")),
                (Number, s("-1")),
                (Whitespace, s("")),
                (CloseCurly, s("")),
                (Whitespace, s("")),
                (CloseCurly, s("")),
                (EofToken, s("")),
            ]
        );
    }

    #[test]
    fn quoted_url_is_a_function() {
        use TokenType::*;
        let s = |v: &str| v.to_string();
        assert_eq!(
            kinds("url( 'x\\000026y')"),
            vec![
                (FunctionToken, s("url")),
                (Whitespace, s("")),
                (String, s("x&y")),
                (CloseParen, s("")),
                (EofToken, s("")),
            ]
        );
    }

    #[test]
    fn positions() {
        let tokens = lex("a\r\n  b/* c */<!---->");
        let positions: Vec<_> = tokens.iter().map(|t| (t.pos.line, t.pos.col)).collect();
        assert_eq!(positions, vec![(1, 0), (1, 1), (2, 2), (2, 10), (2, 14), (2, 17)]);
        assert_eq!(tokens[3].token_type, TokenType::Cdo);
        assert_eq!(tokens[4].token_type, TokenType::Cdc);
    }
}

use crate::{Span, Token};

#[derive(Debug)]
pub struct Scanner {
    source: Vec<char>,
    pos: usize,
    ch: char,
}

impl Scanner {
    pub fn new(source: &str) -> Scanner {
        let source: Vec<char> = source.chars().collect();
        let ch = source.first().copied().unwrap_or('\0');
        Scanner { source, pos: 0, ch }
    }

    fn advance(&mut self) {
        self.pos += 1;
        if self.is_end() {
            self.ch = '\0';
            return;
        }

        self.ch = self.source[self.pos];
    }

    fn is_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn is_digit(&self, ch: char) -> bool {
        ch.is_ascii_digit()
    }

    fn is_alpha(&self, ch: char) -> bool {
        ch == '_' || ch.is_ascii_alphabetic()
    }

    fn is_alphanumeric(&self, ch: char) -> bool {
        self.is_digit(ch) || self.is_alpha(ch)
    }

    fn span(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    fn peek(&self) -> char {
        self.source.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        loop {
            while !self.is_end() && self.ch.is_whitespace() {
                self.advance();
            }
            // line comment
            if self.ch == '/' && self.peek() == '/' {
                while !self.is_end() && self.ch != '\n' {
                    self.advance();
                }
                continue;
            }
            break;
        }
    }

    fn read_digit(&mut self) -> Token {
        let start = self.pos;
        let mut res = vec![];
        while !self.is_end() && self.is_digit(self.ch) {
            res.push(self.ch);
            self.advance();
        }

        if self.ch == '.' && self.is_digit(self.peek()) {
            res.push(self.ch);
            self.advance();

            while !self.is_end() && self.is_digit(self.ch) {
                res.push(self.ch);
                self.advance();
            }

            return Token::float_const(res.into_iter().collect(), self.span(start));
        }

        Token::int_const(res.into_iter().collect(), self.span(start))
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        let mut res = vec![];
        while !self.is_end() && self.is_alphanumeric(self.ch) {
            res.push(self.ch);
            self.advance();
        }

        let value: String = res.into_iter().collect();
        let span = self.span(start);

        match value.as_str() {
            "record" => Token::record(span),
            "let" => Token::let_token(span),
            "uses" => Token::uses(span),
            "true" => Token::true_token(span),
            "false" => Token::false_token(span),
            "null" => Token::null(span),
            _ => Token::identifier(value, span),
        }
    }

    fn read_string(&mut self) -> Token {
        let start = self.pos;
        let mut out = vec![];
        // opening quote
        self.advance();
        while self.ch != '"' {
            if self.is_end() {
                return Token::illegal("unterminated string".to_string(), self.span(start));
            }
            if self.ch == '\\' {
                self.advance();
                out.push(self.normalize_escape(self.ch));
            } else {
                out.push(self.ch);
            }
            self.advance();
        }
        // closing quote
        self.advance();
        Token::string_const(out.into_iter().collect(), self.span(start))
    }

    fn normalize_escape(&self, ch: char) -> char {
        match ch {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            _ => ch,
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let curr_ch = self.ch;

        if self.is_end() {
            return Token::eof(self.span(start));
        }
        if self.is_digit(curr_ch) {
            return self.read_digit();
        }
        if self.is_alpha(curr_ch) {
            return self.read_identifier();
        }
        if curr_ch == '"' {
            return self.read_string();
        }

        if (curr_ch == '=' || curr_ch == '!') && self.peek() == '=' {
            self.advance();
            self.advance();
            return match curr_ch {
                '=' => Token::equal_equal(self.span(start)),
                _ => Token::not_equal(self.span(start)),
            };
        }

        self.advance();
        let span = self.span(start);
        match curr_ch {
            '-' => Token::minus(span),
            '=' => Token::assign(span),
            '(' => Token::left_paren(span),
            ')' => Token::right_paren(span),
            ',' => Token::comma(span),
            ':' => Token::colon(span),
            ';' => Token::semi_colon(span),
            '.' => Token::dot(span),
            _ => Token::illegal(curr_ch.to_string(), span),
        }
    }
}

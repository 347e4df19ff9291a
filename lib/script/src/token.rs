use crate::Span;

macro_rules! impl_token {
    ($_meth:ident, $tok:ident) => {
        pub fn $_meth(span: Span) -> Token {
            Token {
                token_type: TokenType::$tok,
                value: TokenType::$tok.to_string(),
                span,
            }
        }
    };
}

macro_rules! impl_value_token {
    ($_meth:ident, $tok:ident) => {
        pub fn $_meth(value: String, span: Span) -> Token {
            Token {
                token_type: TokenType::$tok,
                value,
                span,
            }
        }
    };
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TokenType {
    Identifier,
    IntConst,
    FloatConst,
    StringConst,

    // keywords
    Record,
    Let,
    Uses,
    True,
    False,
    Null,

    Minus,
    Assign,
    EqualEqual,
    NotEqual,

    LeftParen,
    RightParen,
    Comma,
    Colon,
    SemiColon,
    Dot,

    Illegal,
    EOF,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub span: Span,
}

impl Token {
    impl_value_token!(identifier, Identifier);
    impl_value_token!(int_const, IntConst);
    impl_value_token!(float_const, FloatConst);
    impl_value_token!(string_const, StringConst);
    impl_value_token!(illegal, Illegal);

    impl_token!(record, Record);
    impl_token!(let_token, Let);
    impl_token!(uses, Uses);
    impl_token!(true_token, True);
    impl_token!(false_token, False);
    impl_token!(null, Null);

    impl_token!(minus, Minus);
    impl_token!(assign, Assign);
    impl_token!(equal_equal, EqualEqual);
    impl_token!(not_equal, NotEqual);

    impl_token!(left_paren, LeftParen);
    impl_token!(right_paren, RightParen);
    impl_token!(comma, Comma);
    impl_token!(colon, Colon);
    impl_token!(semi_colon, SemiColon);
    impl_token!(dot, Dot);

    impl_token!(eof, EOF);

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::EOF
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::StringConst => write!(f, r#""{}""#, self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Identifier => write!(f, "IDENTIFIER"),
            TokenType::IntConst => write!(f, "INTCONST"),
            TokenType::FloatConst => write!(f, "FLOATCONST"),
            TokenType::StringConst => write!(f, "STRINGCONST"),
            TokenType::Record => write!(f, "record"),
            TokenType::Let => write!(f, "let"),
            TokenType::Uses => write!(f, "uses"),
            TokenType::True => write!(f, "true"),
            TokenType::False => write!(f, "false"),
            TokenType::Null => write!(f, "null"),
            TokenType::Minus => write!(f, "-"),
            TokenType::Assign => write!(f, "="),
            TokenType::EqualEqual => write!(f, "=="),
            TokenType::NotEqual => write!(f, "!="),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::Comma => write!(f, ","),
            TokenType::Colon => write!(f, ":"),
            TokenType::SemiColon => write!(f, ";"),
            TokenType::Dot => write!(f, "."),
            TokenType::Illegal => write!(f, "ILLEGAL"),
            TokenType::EOF => write!(f, "EOF"),
        }
    }
}

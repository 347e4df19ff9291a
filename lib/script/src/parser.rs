use record::Value;

use crate::{
    ast::{Argument, Expression, Identifier, LetStmt, Program, RecordDecl, SetProperty, Statement},
    ParserError, Scanner, Span, Token, TokenType,
};

const RECOVER_SET: [TokenType; 2] = [TokenType::Record, TokenType::Let];

#[derive(Debug)]
pub struct Parser {
    scanner: Scanner,
    prev_token: Token,
    curr_token: Token,
    peek_token: Token,
}

type ParseResult<T> = Result<T, ParserError>;

impl Parser {
    pub fn new(mut scanner: Scanner) -> Parser {
        let curr_token = scanner.next_token();
        let peek_token = scanner.next_token();
        Parser {
            scanner,
            prev_token: Token::eof(Span::default()),
            curr_token,
            peek_token,
        }
    }

    pub fn parse(&mut self) -> (Program, Vec<ParserError>) {
        let mut program = Vec::new();
        let mut errors = Vec::new();
        while !self.is_end() {
            match self.statement() {
                Ok(stmt) => program.push(stmt),
                Err(err) => {
                    self.sync();
                    errors.push(err);
                }
            }
        }
        (program, errors)
    }

    fn sync(&mut self) {
        self.advance();

        while !self.is_end() {
            if self.prev_token.token_type == TokenType::SemiColon {
                return;
            }

            if RECOVER_SET.contains(&self.curr_token.token_type) {
                return;
            }
            self.advance();
        }
    }

    fn matches(&mut self, types: &[TokenType]) -> bool {
        for token_type in types.iter() {
            if *token_type == self.curr_token.token_type {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.curr_token.token_type == token_type
    }

    fn check_peek(&self, token_type: TokenType) -> bool {
        self.peek_token.token_type == token_type
    }

    fn advance(&mut self) -> Token {
        self.prev_token = self.curr_token.clone();
        self.curr_token = self.peek_token.clone();
        self.peek_token = self.scanner.next_token();

        self.prev_token.clone()
    }

    fn is_end(&self) -> bool {
        self.curr_token.is_eof()
    }

    fn eat(&mut self, token_type: TokenType, msg: &str) -> ParseResult<Token> {
        if self.curr_token.token_type == token_type {
            return Ok(self.advance());
        }

        if self.check(TokenType::Illegal) {
            return Err(ParserError::Illegal(self.curr_token.clone()));
        }

        let tok = match self.curr_token.is_eof() {
            true => self.prev_token.clone(),
            false => self.curr_token.clone(),
        };

        Err(ParserError::ExpectedToken(msg.to_string(), tok))
    }

    fn identifier(&mut self, msg: &str) -> ParseResult<Identifier> {
        let tok = self.eat(TokenType::Identifier, msg)?;
        Ok(Identifier::new(tok.value, tok.span))
    }

    fn statement(&mut self) -> ParseResult<Statement> {
        let stmt = if self.matches(&[TokenType::Record]) {
            self.record_declaration()?
        } else if self.matches(&[TokenType::Let]) {
            self.let_statement()?
        } else {
            self.expression_statement()?
        };

        if !self.is_end() {
            self.eat(TokenType::SemiColon, "Expected ';' after statement")?;
        }
        Ok(stmt)
    }

    fn record_declaration(&mut self) -> ParseResult<Statement> {
        let start = self.prev_token.span;
        let name = self.identifier("Expected record name")?;

        let fields = if self.check(TokenType::LeftParen) {
            Some(self.identifier_list("Expected field name")?)
        } else {
            None
        };

        let types = if self.matches(&[TokenType::Colon]) {
            Some(self.identifier_list("Expected type name")?)
        } else {
            None
        };

        let uses = if self.matches(&[TokenType::Uses]) {
            let mut caps = vec![self.identifier("Expected capability name")?];
            while self.matches(&[TokenType::Comma]) {
                caps.push(self.identifier("Expected capability name")?);
            }
            Some(caps)
        } else {
            None
        };

        Ok(Statement::Record(RecordDecl {
            name,
            fields,
            types,
            uses,
            span: start.extend(self.prev_token.span),
        }))
    }

    /// `(a, b, c)`, possibly empty.
    fn identifier_list(&mut self, msg: &str) -> ParseResult<Vec<Identifier>> {
        self.eat(TokenType::LeftParen, "Expected '('")?;
        let mut idents = vec![];
        if !self.check(TokenType::RightParen) {
            loop {
                idents.push(self.identifier(msg)?);
                if !self.matches(&[TokenType::Comma]) {
                    break;
                }
            }
        }
        self.eat(TokenType::RightParen, "Expected ')'")?;
        Ok(idents)
    }

    fn let_statement(&mut self) -> ParseResult<Statement> {
        let name = self.identifier("Expected identifier after let")?;
        self.eat(TokenType::Assign, "Expected '=' after let name")?;
        let value = self.expression()?;
        Ok(Statement::Let(LetStmt { name, value }))
    }

    fn expression_statement(&mut self) -> ParseResult<Statement> {
        let expr = self.expression()?;

        if self.check(TokenType::Assign) {
            let assign = self.advance();
            let value = self.expression()?;
            return match expr {
                Expression::GetProperty(get) => match *get.object {
                    Expression::Variable(object) => Ok(Statement::SetProperty(SetProperty {
                        span: object.span.extend(value.span()),
                        object,
                        name: get.name,
                        value,
                    })),
                    _ => Err(ParserError::ExpectedToken(
                        "Can only assign to a property of a variable".to_string(),
                        assign,
                    )),
                },
                _ => Err(ParserError::ExpectedToken(
                    "Invalid assignment target".to_string(),
                    assign,
                )),
            };
        }

        Ok(Statement::Expression(expr))
    }

    fn expression(&mut self) -> ParseResult<Expression> {
        self.equality()
    }

    fn equality(&mut self) -> ParseResult<Expression> {
        let mut expr = self.property()?;
        while self.matches(&[TokenType::EqualEqual, TokenType::NotEqual]) {
            let negated = self.prev_token.token_type == TokenType::NotEqual;
            let right = self.property()?;
            expr = Expression::create_equality(expr, right, negated);
        }
        Ok(expr)
    }

    fn property(&mut self) -> ParseResult<Expression> {
        let mut expr = self.primary()?;
        while self.matches(&[TokenType::Dot]) {
            let name = self.identifier("Expected property name after '.'")?;
            expr = Expression::create_get_property(expr, name);
        }
        Ok(expr)
    }

    fn call(&mut self, callee: Identifier) -> ParseResult<Expression> {
        let paren = self.eat(TokenType::LeftParen, "Expected '('")?;
        let mut args = vec![];

        if !self.check(TokenType::RightParen) && !self.is_end() {
            loop {
                args.push(self.argument()?);
                if !self.matches(&[TokenType::Comma]) {
                    break;
                }
            }
        }

        if !self.matches(&[TokenType::RightParen]) {
            return Err(ParserError::ExpectedToken(
                "Unterminated call".to_string(),
                paren,
            ));
        }

        let span = callee.span.extend(self.prev_token.span);
        Ok(Expression::create_call(callee, args, span))
    }

    fn argument(&mut self) -> ParseResult<Argument> {
        if self.check(TokenType::Identifier) && self.check_peek(TokenType::Assign) {
            let name = self.identifier("Expected argument name")?;
            self.advance();
            return Ok(Argument::Keyword(name, self.expression()?));
        }
        Ok(Argument::Positional(self.expression()?))
    }

    fn primary(&mut self) -> ParseResult<Expression> {
        let token = self.curr_token.clone();
        match token.token_type {
            TokenType::IntConst | TokenType::FloatConst => {
                self.advance();
                let value = self.number(&token, false)?;
                Ok(Expression::create_literal(value, token.span))
            }
            TokenType::Minus => {
                self.advance();
                let number = self.curr_token.clone();
                match number.token_type {
                    TokenType::IntConst | TokenType::FloatConst => {
                        self.advance();
                        let value = self.number(&number, true)?;
                        Ok(Expression::create_literal(value, token.span.extend(number.span)))
                    }
                    _ => Err(ParserError::ExpectedToken(
                        "Expected number after '-'".to_string(),
                        number,
                    )),
                }
            }
            TokenType::StringConst => {
                self.advance();
                Ok(Expression::create_literal(
                    Value::String(token.value),
                    token.span,
                ))
            }
            TokenType::True | TokenType::False => {
                self.advance();
                let v = token.token_type == TokenType::True;
                Ok(Expression::create_literal(Value::Bool(v), token.span))
            }
            TokenType::Null => {
                self.advance();
                Ok(Expression::create_literal(Value::Null, token.span))
            }
            TokenType::Identifier => {
                self.advance();
                let ident = Identifier::new(token.value, token.span);
                if self.check(TokenType::LeftParen) {
                    return self.call(ident);
                }
                Ok(Expression::create_variable(ident))
            }
            TokenType::Illegal => Err(ParserError::Illegal(token)),
            _ => Err(ParserError::UnexpectedToken(token)),
        }
    }

    fn number(&self, token: &Token, negative: bool) -> ParseResult<Value> {
        let text = match negative {
            true => format!("-{}", token.value),
            false => token.value.clone(),
        };
        let value = match token.token_type {
            TokenType::IntConst => text.parse().map(Value::Int).ok(),
            _ => text.parse().map(Value::Float).ok(),
        };
        value.ok_or_else(|| ParserError::InvalidNumber(token.clone()))
    }
}

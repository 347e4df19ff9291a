use record::Value;

use crate::Span;

pub type Program = Vec<Statement>;

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(value: impl Into<String>, span: Span) -> Identifier {
        Identifier {
            value: value.into(),
            span,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Record(RecordDecl),
    Let(LetStmt),
    SetProperty(SetProperty),
    Expression(Expression),
}

/// `record Name(fields): (types) uses capabilities`. Every part after the name
/// is optional; a missing `uses` clause enables all capabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    pub name: Identifier,
    pub fields: Option<Vec<Identifier>>,
    pub types: Option<Vec<Identifier>>,
    pub uses: Option<Vec<Identifier>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetProperty {
    pub object: Identifier,
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value, Span),
    Variable(Identifier),
    Call(Call),
    GetProperty(GetProperty),
    Equality(Equality),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Identifier,
    pub args: Vec<Argument>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Positional(Expression),
    Keyword(Identifier, Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetProperty {
    pub object: Box<Expression>,
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equality {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub negated: bool,
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(_, span) => *span,
            Expression::Variable(ident) => ident.span,
            Expression::Call(call) => call.span,
            Expression::GetProperty(get) => get.object.span().extend(get.name.span),
            Expression::Equality(eq) => eq.left.span().extend(eq.right.span()),
        }
    }

    pub fn create_literal(value: Value, span: Span) -> Expression {
        Expression::Literal(value, span)
    }

    pub fn create_variable(name: Identifier) -> Expression {
        Expression::Variable(name)
    }

    pub fn create_call(callee: Identifier, args: Vec<Argument>, span: Span) -> Expression {
        Expression::Call(Call { callee, args, span })
    }

    pub fn create_get_property(object: Expression, name: Identifier) -> Expression {
        Expression::GetProperty(GetProperty {
            object: Box::new(object),
            name,
        })
    }

    pub fn create_equality(left: Expression, right: Expression, negated: bool) -> Expression {
        Expression::Equality(Equality {
            left: Box::new(left),
            right: Box::new(right),
            negated,
        })
    }
}

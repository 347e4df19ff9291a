use std::{collections::HashMap, sync::Arc};

use log::debug;

use record::{Args, Capabilities, Capability, Instance, RecordClass, Value, ValueType};

use crate::{
    ast::{Argument, Call, Equality, Expression, GetProperty, Identifier, Program, RecordDecl, SetProperty, Statement},
    ScriptError, Span,
};

/// Anything a name can be bound to, or an expression can produce.
#[derive(Debug, Clone)]
pub enum Object {
    Value(Value),
    Instance(Instance),
    Class(Arc<RecordClass>),
    Unit,
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Value(a), Object::Value(b)) => a == b,
            (Object::Instance(a), Object::Instance(b)) => a == b,
            (Object::Class(a), Object::Class(b)) => Arc::ptr_eq(a, b),
            (Object::Unit, Object::Unit) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Value(v) => write!(f, "{}", v),
            Object::Instance(i) => write!(f, "{}", i),
            Object::Class(c) => write!(f, "<record {}>", c.name()),
            Object::Unit => write!(f, "Unit"),
        }
    }
}

type SessionResult = Result<Object, ScriptError>;

/// Evaluates statements against a set of bindings that lives as long as the
/// session, so a repl can declare a class on one line and use it on the next.
#[derive(Debug, Default)]
pub struct Session {
    bindings: HashMap<String, Object>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn get(&self, name: &str) -> Option<&Object> {
        self.bindings.get(name)
    }

    /// Runs every statement in order and returns the value of the last one.
    /// The first error stops the run.
    pub fn run(&mut self, program: &Program) -> SessionResult {
        let mut res = Object::Unit;
        for stmt in program {
            res = self.run_statement(stmt)?;
        }
        Ok(res)
    }

    pub fn run_statement(&mut self, stmt: &Statement) -> SessionResult {
        match stmt {
            Statement::Record(decl) => self.eval_record_declaration(decl),
            Statement::Let(stmt) => {
                let value = self.expression(&stmt.value)?;
                self.define(&stmt.name, value);
                Ok(Object::Unit)
            }
            Statement::SetProperty(set) => self.eval_set_property(set),
            Statement::Expression(expr) => self.expression(expr),
        }
    }

    fn define(&mut self, name: &Identifier, value: Object) {
        debug!("define {} = {}", name, value);
        self.bindings.insert(name.value.to_string(), value);
    }

    fn eval_record_declaration(&mut self, decl: &RecordDecl) -> SessionResult {
        let mut builder = RecordClass::builder(decl.name.value.to_string());

        if let Some(fields) = &decl.fields {
            builder = builder.fields(fields.iter().map(|f| f.value.to_string()));
        }

        if let Some(types) = &decl.types {
            let types = types
                .iter()
                .map(|t| {
                    ValueType::from_name(&t.value)
                        .ok_or_else(|| ScriptError::UnknownType(t.value.to_string(), t.span))
                })
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.types(types);
        }

        let capabilities = match &decl.uses {
            Some(uses) => uses
                .iter()
                .map(|cap| match cap.value.as_str() {
                    "fixed" => Ok(Capability::FixedFields),
                    "typed" => Ok(Capability::TypeChecked),
                    "immutable" => Ok(Capability::WriteOnce),
                    _ => Err(ScriptError::UnknownCapability(cap.value.to_string(), cap.span)),
                })
                .collect::<Result<Capabilities, _>>()?,
            None => Capabilities::all(),
        };

        let class = builder.capabilities(capabilities).build();
        self.define(&decl.name, Object::Class(class));
        Ok(Object::Unit)
    }

    fn eval_set_property(&mut self, set: &SetProperty) -> SessionResult {
        let value = self.expression(&set.value)?;
        let value = field_value(value, set.value.span())?;

        match self.bindings.get_mut(&set.object.value) {
            Some(Object::Instance(instance)) => {
                instance
                    .set(&set.name.value, value.clone())
                    .map_err(|e| ScriptError::Record(e, set.span))?;
                Ok(Object::Value(value))
            }
            Some(_) => Err(ScriptError::NotARecord(
                set.name.value.to_string(),
                set.object.span,
            )),
            None => Err(ScriptError::UnknownName(
                set.object.value.to_string(),
                set.object.span,
            )),
        }
    }

    fn expression(&mut self, expr: &Expression) -> SessionResult {
        match expr {
            Expression::Literal(v, _) => Ok(Object::Value(v.clone())),
            Expression::Variable(name) => match self.bindings.get(&name.value) {
                Some(obj) => Ok(obj.clone()),
                None => Err(ScriptError::UnknownName(name.value.to_string(), name.span)),
            },
            Expression::Call(call) => self.eval_call(call),
            Expression::GetProperty(get) => self.eval_get_property(get),
            Expression::Equality(eq) => self.eval_equality(eq),
        }
    }

    fn eval_call(&mut self, call: &Call) -> SessionResult {
        let class = match self.bindings.get(&call.callee.value) {
            Some(Object::Class(class)) => class.clone(),
            Some(_) => {
                return Err(ScriptError::NotCallable(
                    call.callee.value.to_string(),
                    call.callee.span,
                ))
            }
            None => {
                return Err(ScriptError::UnknownName(
                    call.callee.value.to_string(),
                    call.callee.span,
                ))
            }
        };

        let mut args = Args::default();
        for arg in &call.args {
            match arg {
                Argument::Positional(expr) => {
                    let value = self.expression(expr)?;
                    args.positional.push(field_value(value, expr.span())?);
                }
                Argument::Keyword(name, expr) => {
                    let value = self.expression(expr)?;
                    let value = field_value(value, expr.span())?;
                    args.keyword.push((name.value.to_string(), value));
                }
            }
        }

        class
            .construct(args)
            .map(Object::Instance)
            .map_err(|e| ScriptError::Record(e, call.span))
    }

    fn eval_get_property(&mut self, get: &GetProperty) -> SessionResult {
        match self.expression(&get.object)? {
            Object::Instance(instance) => match instance.get(&get.name.value) {
                Some(v) => Ok(Object::Value(v.clone())),
                None => Err(ScriptError::NoSuchProperty(
                    get.name.value.to_string(),
                    get.name.span,
                )),
            },
            _ => Err(ScriptError::NotARecord(
                get.name.value.to_string(),
                get.object.span(),
            )),
        }
    }

    fn eval_equality(&mut self, eq: &Equality) -> SessionResult {
        let left = self.expression(&eq.left)?;
        let right = self.expression(&eq.right)?;
        Ok(Object::Value(Value::Bool((left == right) != eq.negated)))
    }
}

/// Only plain values can be stored in a record field.
fn field_value(obj: Object, span: Span) -> Result<Value, ScriptError> {
    match obj {
        Object::Value(v) => Ok(v),
        _ => Err(ScriptError::RecordAsArgument(span)),
    }
}

#[cfg(test)]
mod tests {
    use record::{ConfigurationError, RecordError, Value, ValueType};

    use super::{Object, Session};
    use crate::{parse_panic, ScriptError, Span};
    use pretty_assertions::assert_eq;

    const PERSON: &str = "record Person(name, age): (string, int) uses fixed, typed, immutable;";

    fn run(source: &str) -> Result<Object, ScriptError> {
        let program = parse_panic(source);
        Session::new().run(&program)
    }

    fn run_ok(source: &str) -> String {
        match run(source) {
            Ok(obj) => obj.to_string(),
            Err(err) => panic!("{}", err),
        }
    }

    #[test]
    fn construct_and_render() {
        assert_eq!(
            run_ok(&format!(r#"{PERSON} Person("Alice", 25)"#)),
            "Person(name=Alice, age=25)"
        );
        assert_eq!(
            run_ok(&format!(r#"{PERSON} let alice = Person("Alice", 25); alice.name"#)),
            "Alice"
        );
    }

    #[test]
    fn type_mismatch() {
        let err = run(&format!(r#"{PERSON} Person("Bob", 22.5)"#)).unwrap_err();
        assert_eq!(
            err,
            ScriptError::Record(
                RecordError::Mismatch {
                    value: Value::Float(22.5),
                    expected: ValueType::Int,
                    actual: ValueType::Float,
                },
                Span::default()
            )
        );
    }

    #[test]
    fn reassignment_fails_and_keeps_value() {
        let program = parse_panic(&format!(r#"{PERSON} let alice = Person("Alice", 25)"#));
        let mut session = Session::new();
        session.run(&program).unwrap();

        assert!(matches!(session.get("alice"), Some(Object::Instance(_))));

        let err = session.run(&parse_panic("alice.age = 26")).unwrap_err();
        assert_eq!(err.to_string(), "Person class is immutable");
        assert_eq!(
            session.run(&parse_panic("alice.age")).unwrap(),
            Object::Value(Value::Int(25))
        );
    }

    #[test]
    fn equality() {
        let src = format!(
            r#"{PERSON}
            let a = Person("Alice", 25);
            let b = Person("Alice", 25);
            record Twin(name, age) uses fixed, immutable;
            let t = Twin("Alice", 25);"#
        );
        assert_eq!(run_ok(&format!("{src} a == b")), "true");
        assert_eq!(run_ok(&format!("{src} a != b")), "false");
        assert_eq!(run_ok(&format!("{src} a == t")), "false");
        assert_eq!(run_ok(&format!("{src} a.age == 25")), "true");
        assert_eq!(run_ok(&format!("{src} t == t")), "true");
        assert_eq!(run_ok(&format!("{src} t")), "Twin(name=Alice, age=25)");
    }

    #[test]
    fn records_without_uses_are_typed() {
        let err = run(r#"record Twin(name, age); Twin("Alice", 25)"#).unwrap_err();
        assert_eq!(err.to_string(), "Twin does not define its types");
        assert_eq!(
            run_ok(r#"record Twin(name, age): (string, int); Twin("Alice", 25)"#),
            "Twin(name=Alice, age=25)"
        );
    }

    #[test]
    fn missing_declarations_surface_at_construction() {
        assert_eq!(run_ok("record Tag uses fixed"), "Unit");
        let err = run("record Tag uses fixed; Tag()").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Record(
                ConfigurationError::MissingFields("Tag".to_string()).into(),
                Span::default()
            )
        );
    }

    #[test]
    fn declaration_errors() {
        assert_eq!(
            run("record P(x): (integer)").unwrap_err(),
            ScriptError::UnknownType("integer".to_string(), Span::default())
        );
        assert_eq!(
            run("record P(x) uses frozen").unwrap_err(),
            ScriptError::UnknownCapability("frozen".to_string(), Span::default())
        );
    }

    #[test]
    fn runtime_errors() {
        assert!(matches!(run("nobody"), Err(ScriptError::UnknownName(..))));
        assert!(matches!(run("let x = 1; x(2)"), Err(ScriptError::NotCallable(..))));
        assert!(matches!(run("let x = 1; x.y"), Err(ScriptError::NotARecord(..))));
        assert!(matches!(
            run(&format!(r#"{PERSON} let a = Person("A", 1); Person(a, 1)"#)),
            Err(ScriptError::RecordAsArgument(..))
        ));
        assert!(matches!(
            run(&format!(r#"{PERSON} let a = Person("A"); a.age"#)),
            Err(ScriptError::NoSuchProperty(..))
        ));
    }

    #[test]
    fn mutable_record_without_write_once() {
        assert_eq!(
            run_ok("record Counter(count) uses fixed; let c = Counter(1); c.count = 2; c"),
            "Counter(count=2)"
        );
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Float,
    String,
    Bool,
    Null,
    Any,
}

/// Arguments handed to a record constructor. Keyword arguments travel the whole
/// construction chain but no step consumes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub positional: Vec<Value>,
    pub keyword: Vec<(String, Value)>,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Null => ValueType::Null,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

/// Floats that carry the same bits are equal, so a value holding NaN still
/// equals itself and records stay reflexive.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl ValueType {
    /// Runtime isinstance test. There is no implicit widening between numbers.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueType::Any => true,
            t => *t == value.value_type(),
        }
    }

    pub fn from_name(name: &str) -> Option<ValueType> {
        match name {
            "int" => Some(ValueType::Int),
            "float" => Some(ValueType::Float),
            "string" => Some(ValueType::String),
            "bool" => Some(ValueType::Bool),
            "null" => Some(ValueType::Null),
            "any" => Some(ValueType::Any),
            _ => None,
        }
    }
}

impl Args {
    pub fn new(positional: Vec<Value>) -> Args {
        Args {
            positional,
            keyword: vec![],
        }
    }

    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Args {
        self.keyword.push((name.into(), value.into()));
        self
    }
}

macro_rules! impl_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v.into())
            }
        }
    };
}

impl_from!(i64, Int);
impl_from!(i32, Int);
impl_from!(f64, Float);
impl_from!(bool, Bool);
impl_from!(String, String);
impl_from!(&str, String);

/// Builds [`Args`] from positional literals: `args!("Alice", 25)`.
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::default()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::Args::new(vec![$($crate::Value::from($arg)),+])
    };
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            // keep the decimal point so 25.0 never reads like an int
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Null => write!(f, "null"),
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::String => write!(f, "string"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Null => write!(f, "null"),
            ValueType::Any => write!(f, "any"),
        }
    }
}

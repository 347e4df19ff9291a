use std::{collections::HashMap, sync::Arc};

use log::trace;

use crate::{Capability, RecordClass, RecordError, Value};

/// An instance of a [`RecordClass`]. An attribute is present in `values` once
/// it has been assigned, which is all write-once needs to know.
#[derive(Clone)]
pub struct Instance {
    class: Arc<RecordClass>,
    values: HashMap<String, Value>,
}

impl Instance {
    pub(crate) fn new(class: Arc<RecordClass>) -> Instance {
        Instance {
            class,
            values: HashMap::new(),
        }
    }

    pub fn class(&self) -> &Arc<RecordClass> {
        &self.class
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Declared fields in declared order, with their value if one was assigned.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.class
            .fields()
            .unwrap_or_default()
            .iter()
            .map(move |f| (f.as_str(), self.values.get(f)))
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), RecordError> {
        let class = &self.class;
        if class.has(Capability::FixedFields) && !class.declares(name) {
            return Err(RecordError::UnknownField {
                class: class.name().to_string(),
                field: name.to_string(),
            });
        }
        if class.has(Capability::WriteOnce) && self.values.contains_key(name) {
            return Err(RecordError::Immutable(class.name().to_string()));
        }

        trace!("{}.{} = {}", class.name(), name, value);
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn sorted_values(&self) -> Vec<(&String, &Value)> {
        let mut values: Vec<_> = self.values.iter().collect();
        values.sort_by(|a, b| a.0.cmp(b.0));
        values
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.class, &other.class) {
            return false;
        }
        match self.class.fields() {
            Some(_) => self.fields().eq(other.fields()),
            None => self.values == other.values,
        }
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let out: Vec<String> = match self.class.fields() {
            Some(_) => self
                .fields()
                .map(|(name, value)| match value {
                    Some(v) => format!("{}={}", name, v),
                    None => format!("{}=<unset>", name),
                })
                .collect(),
            None => self
                .sorted_values()
                .into_iter()
                .map(|(name, v)| format!("{}={}", name, v))
                .collect(),
        };
        write!(f, "{}({})", self.class.name(), out.join(", "))
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{args, Capabilities, Capability, ErrorKind, RecordClass, RecordError, Value, ValueType};
    use pretty_assertions::assert_eq;

    fn person() -> Arc<RecordClass> {
        RecordClass::builder("Person")
            .fields(["name", "age"])
            .types([ValueType::String, ValueType::Int])
            .capabilities(Capabilities::all())
            .build()
    }

    #[test]
    fn reassignment_is_rejected_and_value_kept() {
        let mut alice = person().construct(args!("Alice", 25)).unwrap();
        let err = alice.set("age", Value::Int(26)).unwrap_err();
        assert_eq!(err, RecordError::Immutable("Person".to_string()));
        assert_eq!(err.kind(), ErrorKind::Immutability);
        assert_eq!(alice.get("age"), Some(&Value::Int(25)));
    }

    #[test]
    fn unset_field_can_be_written_once() {
        let mut bob = person().construct(args!("Bob")).unwrap();
        bob.set("age", Value::Int(30)).unwrap();
        assert!(bob.set("age", Value::Int(31)).is_err());
        assert_eq!(bob.to_string(), "Person(name=Bob, age=30)");
    }

    #[test]
    fn undeclared_fields_are_rejected() {
        let mut alice = person().construct(args!("Alice", 25)).unwrap();
        assert_eq!(
            alice.set("email", Value::from("a@b.c")).unwrap_err(),
            RecordError::UnknownField {
                class: "Person".to_string(),
                field: "email".to_string(),
            }
        );
        assert_eq!(
            alice.set("email", Value::Null).unwrap_err().kind(),
            ErrorKind::Attribute
        );
    }

    #[test]
    fn without_write_once_fields_can_change() {
        let class = RecordClass::builder("Counter")
            .fields(["count"])
            .with(Capability::FixedFields)
            .build();
        let mut counter = class.construct(args!(1)).unwrap();
        counter.set("count", Value::Int(2)).unwrap();
        assert_eq!(counter.get("count"), Some(&Value::Int(2)));
    }

    #[test]
    fn equality_is_field_wise_within_a_class() {
        let class = person();
        let a = class.construct(args!("Alice", 25)).unwrap();
        let b = class.construct(args!("Alice", 25)).unwrap();
        let c = class.construct(args!("Alice", 26)).unwrap();

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
    }

    #[test]
    fn nan_fields_keep_equality_reflexive() {
        let class = RecordClass::builder("Measure")
            .fields(["x"])
            .types([ValueType::Float])
            .capabilities(Capabilities::all())
            .build();
        let m = class.construct(args!(f64::NAN)).unwrap();
        assert_eq!(m, m);
        assert_eq!(m, m.clone());
        assert_ne!(m, class.construct(args!(1.5)).unwrap());
    }

    #[test]
    fn different_classes_are_never_equal() {
        let a = person().construct(args!("Alice", 25)).unwrap();
        let b = person().construct(args!("Alice", 25)).unwrap();
        assert_ne!(a, b);

        let employee = RecordClass::builder("Employee")
            .fields(["name", "age"])
            .with(Capability::FixedFields)
            .build();
        let e = employee.construct(args!("Alice", 25)).unwrap();
        assert_ne!(a, e);
    }

    #[test]
    fn render_without_field_declaration() {
        let class = RecordClass::builder("Bag").with(Capability::WriteOnce).build();
        let mut bag = class.construct(args!()).unwrap();
        bag.set("b", Value::Int(2)).unwrap();
        bag.set("a", Value::Bool(true)).unwrap();
        assert_eq!(bag.to_string(), "Bag(a=true, b=2)");
        assert_eq!(format!("{:?}", bag), bag.to_string());
        assert!(bag.set("a", Value::Null).is_err());
    }
}

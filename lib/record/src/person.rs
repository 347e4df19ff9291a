use std::sync::{Arc, OnceLock};

use crate::{Args, Capabilities, Instance, RecordClass, RecordError, ValueType};

static PERSON: OnceLock<Arc<RecordClass>> = OnceLock::new();

/// A person record: a `string` name and an `int` age, fixed, typed and
/// write-once.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    name: String,
    age: i64,
}

impl Person {
    pub fn class() -> Arc<RecordClass> {
        PERSON
            .get_or_init(|| {
                RecordClass::builder("Person")
                    .fields(["name", "age"])
                    .types([ValueType::String, ValueType::Int])
                    .capabilities(Capabilities::all())
                    .build()
            })
            .clone()
    }

    pub fn new(args: Args) -> Result<Person, RecordError> {
        let instance = Person::class().construct(args)?;
        Person::try_from(&instance)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }
}

impl TryFrom<&Instance> for Person {
    type Error = RecordError;

    fn try_from(instance: &Instance) -> Result<Self, Self::Error> {
        let field = |name: &str, expected: ValueType| match instance.get(name) {
            Some(v) if expected.accepts(v) => Ok(v),
            Some(v) => Err(RecordError::mismatch(v, expected)),
            None => Err(RecordError::Unset {
                class: instance.class().name().to_string(),
                field: name.to_string(),
            }),
        };

        let name = field("name", ValueType::String)?.as_str().unwrap_or_default();
        let age = field("age", ValueType::Int)?.as_int().unwrap_or_default();

        Ok(Person {
            name: name.to_string(),
            age,
        })
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Person(name={}, age={})", self.name, self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::Person;
    use crate::{args, Capability, ErrorKind, RecordClass, RecordError, Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn alice() {
        let alice = Person::new(args!("Alice", 25)).unwrap();
        assert_eq!(alice.name(), "Alice");
        assert_eq!(alice.age(), 25);
        assert_eq!(alice.to_string(), "Person(name=Alice, age=25)");
    }

    #[test]
    fn bob_with_a_float_age() {
        let err = Person::new(args!("Bob", 22.5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "22.5 should be of type int. Got type float");
    }

    #[test]
    fn alice_is_immutable() {
        let mut alice = Person::class().construct(args!("Alice", 25)).unwrap();
        let err = alice.set("age", Value::Int(26)).unwrap_err();
        assert_eq!(err.to_string(), "Person class is immutable");
        assert_eq!(alice.to_string(), "Person(name=Alice, age=25)");
    }

    #[test]
    fn instances_share_the_class() {
        let a = Person::class().construct(args!("Alice", 25)).unwrap();
        let b = Person::class().construct(args!("Alice", 25)).unwrap();
        assert_eq!(a, b);
        assert_eq!(Person::try_from(&a).unwrap(), Person::new(args!("Alice", 25)).unwrap());
    }

    #[test]
    fn missing_age_cannot_become_a_person() {
        let err = Person::new(args!("Carol")).unwrap_err();
        assert_eq!(
            err,
            RecordError::Unset {
                class: "Person".to_string(),
                field: "age".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Person.age was never assigned");
        assert_eq!(err.kind(), ErrorKind::Attribute);
    }

    #[test]
    fn untyped_instance_with_a_string_age() {
        let class = RecordClass::builder("Person")
            .fields(["name", "age"])
            .with(Capability::FixedFields)
            .build();
        let dave = class.construct(args!("Dave", "old")).unwrap();
        let err = Person::try_from(&dave).unwrap_err();
        assert_eq!(err.to_string(), "old should be of type int. Got type string");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

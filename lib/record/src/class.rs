use std::sync::Arc;

use log::info;

use crate::{chain, Args, Instance, RecordError, Value, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    FixedFields,
    TypeChecked,
    WriteOnce,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    fixed_fields: bool,
    type_checked: bool,
    write_once: bool,
}

impl Capabilities {
    pub fn all() -> Capabilities {
        Capabilities {
            fixed_fields: true,
            type_checked: true,
            write_once: true,
        }
    }

    pub fn insert(&mut self, capability: Capability) {
        match capability {
            Capability::FixedFields => self.fixed_fields = true,
            Capability::TypeChecked => self.type_checked = true,
            Capability::WriteOnce => self.write_once = true,
        }
    }

    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::FixedFields => self.fixed_fields,
            Capability::TypeChecked => self.type_checked,
            Capability::WriteOnce => self.write_once,
        }
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut caps = Capabilities::default();
        for cap in iter {
            caps.insert(cap);
        }
        caps
    }
}

/// A record class: a name, the optional field and type declarations, and the
/// capabilities its instances are built with.
///
/// Declarations are not validated when the class is built. A class that uses
/// a capability without the declaration it needs fails on its first
/// construction.
#[derive(Debug, PartialEq)]
pub struct RecordClass {
    name: String,
    fields: Option<Vec<String>>,
    types: Option<Vec<ValueType>>,
    capabilities: Capabilities,
}

#[derive(Debug)]
pub struct RecordClassBuilder {
    name: String,
    fields: Option<Vec<String>>,
    types: Option<Vec<ValueType>>,
    capabilities: Capabilities,
}

impl RecordClass {
    pub fn builder(name: impl Into<String>) -> RecordClassBuilder {
        RecordClassBuilder {
            name: name.into(),
            fields: None,
            types: None,
            capabilities: Capabilities::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn types(&self) -> Option<&[ValueType]> {
        self.types.as_deref()
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn declares(&self, field: &str) -> bool {
        match &self.fields {
            Some(fields) => fields.iter().any(|f| f == field),
            None => false,
        }
    }

    /// Runs the construction chain. Either every step succeeds and a complete
    /// instance is returned, or the first error aborts construction.
    pub fn construct(self: &Arc<Self>, args: Args) -> Result<Instance, RecordError> {
        let mut instance = Instance::new(Arc::clone(self));
        for step in chain::steps(self) {
            step.construct(self, &mut instance, &args)?;
        }
        Ok(instance)
    }

    pub fn construct_positional(
        self: &Arc<Self>,
        positional: Vec<Value>,
    ) -> Result<Instance, RecordError> {
        self.construct(Args::new(positional))
    }
}

impl RecordClassBuilder {
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = ValueType>,
    {
        self.types = Some(types.into_iter().collect());
        self
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn build(self) -> Arc<RecordClass> {
        info!(
            "declared record class {} (fields: {:?}, types: {:?})",
            self.name, self.fields, self.types
        );
        Arc::new(RecordClass {
            name: self.name,
            fields: self.fields,
            types: self.types,
            capabilities: self.capabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Capabilities, Capability, RecordClass};
    use crate::{args, ConfigurationError, ErrorKind, RecordError, Value, ValueType};
    use pretty_assertions::assert_eq;

    fn person() -> std::sync::Arc<RecordClass> {
        RecordClass::builder("Person")
            .fields(["name", "age"])
            .types([ValueType::String, ValueType::Int])
            .capabilities(Capabilities::all())
            .build()
    }

    #[test]
    fn construct_assigns_fields_in_order() {
        let alice = person().construct(args!("Alice", 25)).unwrap();
        assert_eq!(alice.get("name"), Some(&Value::from("Alice")));
        assert_eq!(alice.get("age"), Some(&Value::Int(25)));
        assert_eq!(alice.to_string(), "Person(name=Alice, age=25)");
    }

    #[test]
    fn first_mismatch_is_reported() {
        let err = person().construct(args!(1, 22.5)).unwrap_err();
        assert_eq!(
            err,
            RecordError::Mismatch {
                value: Value::Int(1),
                expected: ValueType::String,
                actual: ValueType::Int,
            }
        );

        let err = person().construct(args!("Bob", 22.5)).unwrap_err();
        assert_eq!(err.to_string(), "22.5 should be of type int. Got type float");
    }

    #[test]
    fn missing_declarations_fail_at_construction() {
        let class = RecordClass::builder("Point")
            .with(Capability::FixedFields)
            .build();
        assert_eq!(
            class.construct(args!(1, 2)).unwrap_err(),
            RecordError::from(ConfigurationError::MissingFields("Point".to_string()))
        );

        let class = RecordClass::builder("Point")
            .fields(["x", "y"])
            .with(Capability::FixedFields)
            .with(Capability::TypeChecked)
            .build();
        let err = class.construct(args!(1, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Point does not define its types");
    }

    #[test]
    fn misaligned_declarations_are_rejected() {
        let class = RecordClass::builder("Point")
            .fields(["x", "y"])
            .types([ValueType::Int])
            .capabilities(Capabilities::all())
            .build();
        assert_eq!(
            class.construct(args!(1, 2)).unwrap_err(),
            RecordError::Configuration(ConfigurationError::Misaligned {
                class: "Point".to_string(),
                fields: 2,
                types: 1,
            })
        );
    }

    #[test]
    fn capabilities_from_iter() {
        let caps: Capabilities = [Capability::WriteOnce, Capability::FixedFields]
            .into_iter()
            .collect();
        assert!(caps.contains(Capability::WriteOnce));
        assert!(caps.contains(Capability::FixedFields));
        assert!(!caps.contains(Capability::TypeChecked));
    }

    #[test]
    fn typed_only_class_validates_without_assigning() {
        let class = RecordClass::builder("Pair")
            .types([ValueType::Int, ValueType::Int])
            .with(Capability::TypeChecked)
            .build();
        let pair = class
            .construct_positional(vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(pair.get("x"), None);
        assert!(class.construct(args!(1, "two")).is_err());
    }
}

use log::debug;

use crate::{Args, Capability, ConfigurationError, Instance, RecordClass, RecordError};

type StepResult = Result<(), RecordError>;

/// One step of the construction chain. A step either validates the arguments
/// or writes into the instance, never both.
pub trait Construct {
    fn name(&self) -> &'static str;

    fn construct(&self, class: &RecordClass, instance: &mut Instance, args: &Args) -> StepResult;
}

/// End of every chain. Accepts and discards anything.
#[derive(Debug)]
pub struct Base;

/// Fields and types are paired by position, so both declarations must have
/// the same length.
#[derive(Debug)]
pub struct Align;

#[derive(Debug)]
pub struct TypeCheck;

#[derive(Debug)]
pub struct AssignFields;

/// The steps a class runs, in order. Validation always precedes assignment,
/// whatever order the capabilities were declared in.
pub fn steps(class: &RecordClass) -> Vec<Box<dyn Construct>> {
    let mut steps: Vec<Box<dyn Construct>> = vec![];
    if class.has(Capability::FixedFields) && class.has(Capability::TypeChecked) {
        steps.push(Box::new(Align));
    }
    if class.has(Capability::TypeChecked) {
        steps.push(Box::new(TypeCheck));
    }
    if class.has(Capability::FixedFields) {
        steps.push(Box::new(AssignFields));
    }
    steps.push(Box::new(Base));
    steps
}

impl Construct for Base {
    fn name(&self) -> &'static str {
        "base"
    }

    fn construct(&self, class: &RecordClass, _: &mut Instance, args: &Args) -> StepResult {
        if !args.keyword.is_empty() {
            debug!(
                "{}: {} keyword arguments passed through unused",
                class.name(),
                args.keyword.len()
            );
        }
        Ok(())
    }
}

impl Construct for Align {
    fn name(&self) -> &'static str {
        "align"
    }

    fn construct(&self, class: &RecordClass, _: &mut Instance, _: &Args) -> StepResult {
        // a missing declaration is reported by the step that needs it
        if let (Some(fields), Some(types)) = (class.fields(), class.types()) {
            if fields.len() != types.len() {
                return Err(ConfigurationError::Misaligned {
                    class: class.name().to_string(),
                    fields: fields.len(),
                    types: types.len(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Construct for TypeCheck {
    fn name(&self) -> &'static str {
        "type check"
    }

    fn construct(&self, class: &RecordClass, _: &mut Instance, args: &Args) -> StepResult {
        let types = class
            .types()
            .ok_or_else(|| ConfigurationError::MissingTypes(class.name().to_string()))?;

        for (expected, arg) in types.iter().zip(&args.positional) {
            if !expected.accepts(arg) {
                debug!("{}: {} rejected, expected {}", class.name(), arg, expected);
                return Err(RecordError::mismatch(arg, *expected));
            }
        }
        debug!("{}: {} arguments passed {}", class.name(), args.positional.len(), self.name());
        Ok(())
    }
}

impl Construct for AssignFields {
    fn name(&self) -> &'static str {
        "assign fields"
    }

    fn construct(&self, class: &RecordClass, instance: &mut Instance, args: &Args) -> StepResult {
        let fields = class
            .fields()
            .ok_or_else(|| ConfigurationError::MissingFields(class.name().to_string()))?;

        for (field, arg) in fields.iter().zip(&args.positional) {
            instance.set(field, arg.clone())?;
        }
        if args.positional.len() > fields.len() {
            debug!(
                "{}: ignored {} extra positional arguments",
                class.name(),
                args.positional.len() - fields.len()
            );
        }
        Ok(())
    }
}

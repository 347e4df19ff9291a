//! Record classes built from three capabilities: fixed fields, constructor
//! type checking and write-once attributes.

mod chain;
mod class;
mod instance;
mod person;
mod record_error;
mod value;

pub use chain::{Construct, steps};
pub use class::*;
pub use instance::*;
pub use person::*;
pub use record_error::*;
pub use value::*;

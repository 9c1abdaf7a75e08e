pub mod form;
pub mod prelude;

pub use form::{FieldTable, FormController, FormError, FormModel, FormResult};

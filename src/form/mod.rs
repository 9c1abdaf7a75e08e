mod binding;
mod controller;
mod focus;
mod map;
mod validation;
mod value;


pub use controller::{
    FieldKey, FormController, FormError, FormId, FormOptions, FormResult, FormSnapshot,
    SubmitState,
};
pub use focus::{FocusHandlers, FocusRouter};
pub use formstate_derive::FormModel;
pub use map::FieldMap;
pub use validation::{FieldLens, FieldRule, FieldTable, FormModel, ValidationError};
pub use value::{FieldKind, FieldType, FieldValue, FileRef};

pub use crate::form::{
    FieldKey, FieldKind, FieldLens, FieldMap, FieldTable, FieldType, FieldValue, FileRef,
    FocusHandlers, FocusRouter, FormController, FormError, FormModel, FormOptions, FormResult,
    FormSnapshot, SubmitState, ValidationError,
};
pub use rust_decimal::Decimal;

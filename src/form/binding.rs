use rust_decimal::Decimal;

use super::controller::{FormController, FormResult, resolve_key};
use super::validation::{FormModel, ValidationError};
use super::value::{FieldValue, FileRef};

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn set_text(&self, name: impl AsRef<str>, value: impl Into<String>) -> FormResult<()> {
        self.change_field(name, FieldValue::Text(value.into()))
    }

    pub fn set_select(&self, name: impl AsRef<str>, value: impl Into<String>) -> FormResult<()> {
        self.change_field(name, FieldValue::Text(value.into()))
    }

    pub fn set_number(&self, name: impl AsRef<str>, value: Decimal) -> FormResult<()> {
        self.change_field(name, FieldValue::Number(value))
    }

    pub fn set_checked(&self, name: impl AsRef<str>, checked: bool) -> FormResult<()> {
        self.change_field(name, FieldValue::Bool(checked))
    }

    /// A cleared file input stores [`FileRef::empty`].
    pub fn set_file(&self, name: impl AsRef<str>, file: Option<FileRef>) -> FormResult<()> {
        self.change_field(name, FieldValue::File(file.unwrap_or_else(FileRef::empty)))
    }

    pub fn set_file_list(
        &self,
        name: impl AsRef<str>,
        files: impl IntoIterator<Item = FileRef>,
    ) -> FormResult<()> {
        self.change_field(name, FieldValue::FileList(files.into_iter().collect()))
    }

    pub fn change_handler(
        &self,
        name: &str,
    ) -> FormResult<impl Fn(FieldValue) -> FormResult<()> + Clone + Send + Sync + use<T, E>> {
        let key = resolve_key::<T>(name)?;
        let controller = self.clone();
        Ok(move |raw: FieldValue| controller.change_key(key, raw))
    }

    pub fn visible_error(&self, name: impl AsRef<str>) -> FormResult<Option<E>> {
        let key = resolve_key::<T>(name.as_ref())?;
        let snapshot = self.snapshot()?;
        if !snapshot.touched.get(key).copied().unwrap_or(false) {
            return Ok(None);
        }
        Ok(snapshot.errors.get(key).cloned().flatten())
    }

    pub fn visible_error_message(&self, name: impl AsRef<str>) -> FormResult<Option<String>> {
        Ok(self
            .visible_error(name)?
            .as_ref()
            .map(ValidationError::message))
    }
}

use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;

use super::controller::{FieldKey, FormError, FormResult};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Bool,
    File,
    FileList,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Bool => "boolean",
            FieldKind::File => "file",
            FieldKind::FileList => "file list",
        })
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FileRef {
    name: String,
    size: u64,
    media_type: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type_str(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.size == 0
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Bool(bool),
    File(FileRef),
    FileList(Vec<FileRef>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::File(_) => FieldKind::File,
            FieldValue::FileList(_) => FieldKind::FileList,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<FileRef> for FieldValue {
    fn from(value: FileRef) -> Self {
        FieldValue::File(value)
    }
}

impl From<Vec<FileRef>> for FieldValue {
    fn from(value: Vec<FileRef>) -> Self {
        FieldValue::FileList(value)
    }
}

pub trait FieldType: Clone + PartialEq + Send + Sync + 'static {
    const KIND: FieldKind;

    fn into_field_value(self) -> FieldValue;

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue>;

    fn decode(key: FieldKey, value: FieldValue) -> FormResult<Self> {
        Self::from_field_value(value).map_err(|found| FormError::KindMismatch {
            field: key,
            expected: Self::KIND,
            found: found.kind(),
        })
    }
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Text(text) => Ok(text),
            other => Err(other),
        }
    }
}

impl FieldType for Decimal {
    const KIND: FieldKind = FieldKind::Number;

    fn into_field_value(self) -> FieldValue {
        FieldValue::Number(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Number(number) => Ok(number),
            other => Err(other),
        }
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn into_field_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Bool(flag) => Ok(flag),
            other => Err(other),
        }
    }
}

impl FieldType for FileRef {
    const KIND: FieldKind = FieldKind::File;

    fn into_field_value(self) -> FieldValue {
        FieldValue::File(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::File(file) => Ok(file),
            other => Err(other),
        }
    }
}

impl FieldType for Vec<FileRef> {
    const KIND: FieldKind = FieldKind::FileList;

    fn into_field_value(self) -> FieldValue {
        FieldValue::FileList(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::FileList(files) => Ok(files),
            other => Err(other),
        }
    }
}

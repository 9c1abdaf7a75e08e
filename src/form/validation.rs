use std::collections::BTreeMap;
use std::sync::Arc;

use super::controller::{FieldKey, FormController, FormResult, resolve_key, write_lock};
use super::map::FieldMap;
use super::value::{FieldType, FieldValue};

pub trait ValidationError: Clone + std::fmt::Debug + Send + Sync + 'static {
    fn message(&self) -> String;

    fn is_empty(&self) -> bool {
        self.message().is_empty()
    }
}

impl ValidationError for String {
    fn message(&self) -> String {
        self.clone()
    }

    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

impl ValidationError for &'static str {
    fn message(&self) -> String {
        (*self).to_string()
    }

    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

pub trait FieldLens<T>: Copy + Send + Sync + 'static {
    type Value: FieldType;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

pub trait FormModel: Clone + Send + Sync + 'static {
    type Fields;

    fn fields() -> Self::Fields;
    fn field_keys() -> &'static [FieldKey];
    fn read_field(&self, key: FieldKey) -> Option<FieldValue>;
    fn write_field(&mut self, key: FieldKey, value: FieldValue) -> FormResult<()>;
}

pub trait FieldRule<T, L, E>: Send + Sync
where
    L: FieldLens<T>,
    E: ValidationError,
{
    fn check(&self, value: &L::Value, model: &T) -> Option<E>;
}

impl<T, L, E, F> FieldRule<T, L, E> for F
where
    L: FieldLens<T>,
    E: ValidationError,
    F: for<'a> Fn(&'a L::Value, &'a T) -> Option<E> + Send + Sync,
{
    fn check(&self, value: &L::Value, model: &T) -> Option<E> {
        (self)(value, model)
    }
}

pub(super) type RuleFn<T, E> = Arc<dyn Fn(&T) -> Option<E> + Send + Sync>;
pub(super) type TransformFn<T> =
    Arc<dyn Fn(FieldValue, &T) -> FormResult<FieldValue> + Send + Sync>;

pub struct FieldTable<T, E = String> {
    rules: BTreeMap<FieldKey, Vec<RuleFn<T, E>>>,
    transforms: BTreeMap<FieldKey, Vec<TransformFn<T>>>,
}

impl<T, E> Default for FieldTable<T, E> {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            transforms: BTreeMap::new(),
        }
    }
}

impl<T, E> FieldTable<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule<L, R>(mut self, lens: L, rule: R) -> Self
    where
        L: FieldLens<T>,
        R: FieldRule<T, L, E> + 'static,
    {
        let wrapped: RuleFn<T, E> = Arc::new(move |model: &T| rule.check(lens.get(model), model));
        self.rules.entry(lens.key()).or_default().push(wrapped);
        self
    }

    pub fn transform<L, F>(mut self, lens: L, transform: F) -> Self
    where
        L: FieldLens<T>,
        F: Fn(L::Value, &T) -> L::Value + Send + Sync + 'static,
    {
        let key = lens.key();
        let wrapped: TransformFn<T> = Arc::new(move |raw: FieldValue, model: &T| {
            let value = L::Value::decode(key, raw)?;
            Ok(transform(value, model).into_field_value())
        });
        self.transforms.entry(key).or_default().push(wrapped);
        self
    }

    pub fn has_rule(&self, key: FieldKey) -> bool {
        self.rules.contains_key(&key)
    }

    pub fn has_transform(&self, key: FieldKey) -> bool {
        self.transforms.contains_key(&key)
    }

    pub(super) fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.rules.keys().chain(self.transforms.keys()).copied()
    }

    pub(super) fn apply_transforms(
        &self,
        key: FieldKey,
        raw: FieldValue,
        model: &T,
    ) -> FormResult<FieldValue> {
        let Some(transforms) = self.transforms.get(&key) else {
            return Ok(raw);
        };
        transforms
            .iter()
            .try_fold(raw, |value, transform| transform(value, model))
    }

    /// Runs every rule against `model`. An error with an empty message counts
    /// as no error.
    pub(super) fn evaluate(&self, model: &T) -> FieldMap<Option<E>> {
        FieldMap::from_keys(T::field_keys(), |key| {
            self.rules
                .get(&key)
                .into_iter()
                .flatten()
                .find_map(|rule| rule(model).filter(|error| !error.is_empty()))
        })
    }
}

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn set<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = resolve_key::<T>(lens.key().as_str())?;
        self.commit(key, false, "writing form model", |model| {
            lens.set(model, value);
            Ok(())
        })
    }

    pub fn set_field(&self, name: impl AsRef<str>, value: FieldValue) -> FormResult<()> {
        let key = resolve_key::<T>(name.as_ref())?;
        self.commit(key, false, "writing form field", |model| {
            model.write_field(key, value)
        })
    }

    pub fn change<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        self.change_key(lens.key(), value.into_field_value())
    }

    pub fn change_field(&self, name: impl AsRef<str>, raw: FieldValue) -> FormResult<()> {
        let key = resolve_key::<T>(name.as_ref())?;
        self.change_key(key, raw)
    }

    pub fn table(&self) -> &FieldTable<T, E> {
        &self.table
    }

    pub(super) fn change_key(&self, key: FieldKey, raw: FieldValue) -> FormResult<()> {
        self.commit(key, true, "applying field change", |model| {
            let stored = self.table.apply_transforms(key, raw, model)?;
            model.write_field(key, stored)
        })
    }

    fn commit(
        &self,
        key: FieldKey,
        touch: bool,
        context: &'static str,
        apply: impl FnOnce(&mut T) -> FormResult<()>,
    ) -> FormResult<()> {
        let mut state = write_lock(&self.state, context)?;
        apply(&mut state.model).inspect_err(|error| log::warn!("{}: {error}", state.id))?;
        if touch {
            if let Some(touched) = state.touched.get_mut(key) {
                *touched = true;
            }
        }
        state.errors = self.table.evaluate(&state.model);
        state.publish();
        log::trace!(
            "{}: field `{key}` updated (touched: {touch}, revision {})",
            state.id,
            state.revision
        );
        Ok(())
    }
}

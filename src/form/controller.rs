use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::focus::FocusRouter;
use super::map::FieldMap;
use super::validation::{FieldTable, FormModel, ValidationError};
use super::value::{FieldKind, FieldValue};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

impl Display for FormId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "form#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Validating,
    Accepted,
    Rejected,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormOptions {
    pub focus_first_error_on_submit: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            focus_first_error_on_submit: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormSnapshot<T, E> {
    pub model: T,
    pub touched: FieldMap<bool>,
    pub errors: FieldMap<Option<E>>,
    pub submit_state: SubmitState,
    pub submit_count: u32,
    pub revision: u64,
    pub is_dirty: bool,
    pub is_disabled: bool,
}

impl<T, E> FormSnapshot<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn is_pristine(&self) -> bool {
        !self.is_dirty
    }

    pub fn has_error(&self, name: impl AsRef<str>) -> bool {
        self.errors.get(name).is_some_and(Option::is_some)
    }

    pub fn first_error(&self) -> Option<FieldKey> {
        self.errors.find_key(Option::is_some)
    }

    pub fn field_values(&self) -> FormResult<FieldMap<FieldValue>> {
        FieldMap::try_from_keys(T::field_keys(), |key| {
            self.model
                .read_field(key)
                .ok_or_else(|| FormError::UnknownField(key.as_str().to_string()))
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    UnknownField(String),
    KindMismatch {
        field: FieldKey,
        expected: FieldKind,
        found: FieldKind,
    },
    DuplicateField(FieldKey),
    StatePoisoned(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::UnknownField(name) => write!(f, "unknown form field `{name}`"),
            FormError::KindMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "field `{field}` holds a {expected} value, got a {found} value"
            ),
            FormError::DuplicateField(field) => {
                write!(f, "field `{field}` is declared more than once")
            }
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(super) struct FormState<T, E> {
    pub(super) id: FormId,
    pub(super) initial_model: T,
    pub(super) model: T,
    pub(super) touched: FieldMap<bool>,
    pub(super) errors: FieldMap<Option<E>>,
    pub(super) submit_state: SubmitState,
    pub(super) submit_count: u32,
    pub(super) revision: u64,
    pub(super) published: Arc<FormSnapshot<T, E>>,
}

impl<T, E> FormState<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    fn new(initial: T, errors: FieldMap<Option<E>>) -> Self {
        let touched = FieldMap::from_keys(T::field_keys(), |_| false);
        let published = Arc::new(FormSnapshot {
            model: initial.clone(),
            touched: touched.clone(),
            errors: errors.clone(),
            submit_state: SubmitState::Idle,
            submit_count: 0,
            revision: 0,
            is_dirty: false,
            is_disabled: errors.values().any(Option::is_some),
        });
        Self {
            id: FormId::next(),
            initial_model: initial.clone(),
            model: initial,
            touched,
            errors,
            submit_state: SubmitState::Idle,
            submit_count: 0,
            revision: 0,
            published,
        }
    }

    pub(super) fn publish(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.published = Arc::new(FormSnapshot {
            model: self.model.clone(),
            touched: self.touched.clone(),
            errors: self.errors.clone(),
            submit_state: self.submit_state,
            submit_count: self.submit_count,
            revision: self.revision,
            is_dirty: self.touched.values().any(|touched| *touched),
            is_disabled: self.errors.values().any(Option::is_some),
        });
    }
}

#[derive(Clone)]
pub struct FormController<T, E = String>
where
    T: FormModel,
    E: ValidationError,
{
    pub(super) options: FormOptions,
    pub(super) table: Arc<FieldTable<T, E>>,
    pub(super) state: Arc<RwLock<FormState<T, E>>>,
    pub(super) focus_router: Arc<RwLock<Option<Arc<dyn FocusRouter>>>>,
}

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn new(initial: T, table: FieldTable<T, E>) -> FormResult<Self> {
        Self::with_options(initial, table, FormOptions::default())
    }

    pub fn with_options(
        initial: T,
        table: FieldTable<T, E>,
        options: FormOptions,
    ) -> FormResult<Self> {
        let keys = T::field_keys();
        for (index, key) in keys.iter().enumerate() {
            if keys[..index].contains(key) {
                return Err(FormError::DuplicateField(*key));
            }
        }
        if let Some(key) = table.keys().find(|key| !keys.contains(key)) {
            return Err(FormError::UnknownField(key.as_str().to_string()));
        }

        let errors = table.evaluate(&initial);
        let state = FormState::new(initial, errors);
        log::debug!(
            "{}: created with {} fields, {} invalid",
            state.id,
            keys.len(),
            state.errors.values().filter(|error| error.is_some()).count()
        );
        Ok(Self {
            options,
            table: Arc::new(table),
            state: Arc::new(RwLock::new(state)),
            focus_router: Arc::new(RwLock::new(None)),
        })
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn set_focus_router(&self, router: impl FocusRouter + 'static) -> FormResult<()> {
        let mut slot = write_lock(&self.focus_router, "installing focus router")?;
        *slot = Some(Arc::new(router));
        Ok(())
    }

    pub fn clear_focus_router(&self) -> FormResult<()> {
        write_lock(&self.focus_router, "clearing focus router")?.take();
        Ok(())
    }

    pub fn focus(&self, name: impl AsRef<str>) -> FormResult<bool> {
        let key = resolve_key::<T>(name.as_ref())?;
        let router = read_lock(&self.focus_router, "reading focus router")?.clone();
        let Some(router) = router else {
            return Ok(false);
        };
        router.focus(key);
        Ok(true)
    }

    /// `on_valid` runs after the state lock is released and may call back
    /// into the controller.
    pub fn submit(&self, on_valid: impl FnOnce(&T)) -> FormResult<SubmitState> {
        let (id, outcome, first_error, model) = {
            let mut state = write_lock(&self.state, "preparing submit")?;
            state.submit_state = SubmitState::Validating;
            state.submit_count = state.submit_count.saturating_add(1);
            for touched in state.touched.values_mut() {
                *touched = true;
            }
            state.errors = self.table.evaluate(&state.model);

            let first_error = state.errors.find_key(Option::is_some);
            let outcome = if first_error.is_some() {
                SubmitState::Rejected
            } else {
                SubmitState::Accepted
            };
            state.submit_state = outcome;
            state.publish();
            (state.id, outcome, first_error, state.model.clone())
        };

        match first_error {
            Some(key) => {
                log::debug!("{id}: submit rejected, first invalid field `{key}`");
                if self.options.focus_first_error_on_submit {
                    self.focus(key)?;
                }
            }
            None => {
                log::debug!("{id}: submit accepted");
                on_valid(&model);
            }
        }
        Ok(outcome)
    }

    pub fn reset(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.model = state.initial_model.clone();
        for touched in state.touched.values_mut() {
            *touched = false;
        }
        state.errors = self.table.evaluate(&state.model);
        state.submit_state = SubmitState::Idle;
        state.publish();
        log::debug!("{}: reset to initial values", state.id);
        Ok(())
    }

    pub fn reset_field(&self, name: impl AsRef<str>) -> FormResult<()> {
        let key = resolve_key::<T>(name.as_ref())?;
        let mut state = write_lock(&self.state, "resetting field")?;
        let initial_value = state
            .initial_model
            .read_field(key)
            .ok_or_else(|| FormError::UnknownField(key.as_str().to_string()))?;
        state.model.write_field(key, initial_value)?;
        if let Some(touched) = state.touched.get_mut(key) {
            *touched = false;
        }
        state.errors = self.table.evaluate(&state.model);
        state.publish();
        log::trace!("{}: reset field `{key}`", state.id);
        Ok(())
    }

    pub fn snapshot(&self) -> FormResult<Arc<FormSnapshot<T, E>>> {
        Ok(read_lock(&self.state, "reading form snapshot")?
            .published
            .clone())
    }

    pub fn values(&self) -> FormResult<T> {
        Ok(self.snapshot()?.model.clone())
    }

    pub fn value(&self, name: impl AsRef<str>) -> FormResult<FieldValue> {
        let key = resolve_key::<T>(name.as_ref())?;
        self.snapshot()?
            .model
            .read_field(key)
            .ok_or_else(|| FormError::UnknownField(key.as_str().to_string()))
    }

    pub fn errors(&self) -> FormResult<FieldMap<Option<E>>> {
        Ok(self.snapshot()?.errors.clone())
    }

    pub fn error(&self, name: impl AsRef<str>) -> FormResult<Option<E>> {
        let key = resolve_key::<T>(name.as_ref())?;
        Ok(self.snapshot()?.errors.get(key).cloned().flatten())
    }

    pub fn has_error(&self, name: impl AsRef<str>) -> FormResult<bool> {
        Ok(self.error(name)?.is_some())
    }

    pub fn first_error(&self) -> FormResult<Option<FieldKey>> {
        Ok(self.snapshot()?.first_error())
    }

    pub fn touched(&self) -> FormResult<FieldMap<bool>> {
        Ok(self.snapshot()?.touched.clone())
    }

    pub fn is_touched(&self, name: impl AsRef<str>) -> FormResult<bool> {
        let key = resolve_key::<T>(name.as_ref())?;
        Ok(self.snapshot()?.touched.get(key).copied().unwrap_or(false))
    }

    pub fn dirty(&self) -> FormResult<bool> {
        Ok(self.snapshot()?.is_dirty)
    }

    pub fn pristine(&self) -> FormResult<bool> {
        Ok(self.snapshot()?.is_pristine())
    }

    pub fn disabled(&self) -> FormResult<bool> {
        Ok(self.snapshot()?.is_disabled)
    }

    pub fn submit_state(&self) -> FormResult<SubmitState> {
        Ok(self.snapshot()?.submit_state)
    }

    pub fn submit_count(&self) -> FormResult<u32> {
        Ok(self.snapshot()?.submit_count)
    }
}

pub(super) fn resolve_key<T: FormModel>(name: &str) -> FormResult<FieldKey> {
    T::field_keys()
        .iter()
        .copied()
        .find(|key| key.as_str() == name)
        .ok_or_else(|| {
            log::warn!("rejected operation on unknown form field `{name}`");
            FormError::UnknownField(name.to_string())
        })
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}

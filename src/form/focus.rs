use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::controller::{FieldKey, FormResult, read_lock, write_lock};

pub trait FocusRouter: Send + Sync {
    fn focus(&self, key: FieldKey);
}

impl<F> FocusRouter for F
where
    F: Fn(FieldKey) + Send + Sync,
{
    fn focus(&self, key: FieldKey) {
        (self)(key)
    }
}

type FocusHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Default)]
pub struct FocusHandlers {
    handlers: Arc<RwLock<BTreeMap<FieldKey, FocusHandler>>>,
}

impl FocusHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        key: FieldKey,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> FormResult<()> {
        let mut handlers = write_lock(&self.handlers, "registering focus handler")?;
        handlers.insert(key, Arc::new(handler));
        Ok(())
    }

    pub fn unregister(&self, key: FieldKey) -> FormResult<bool> {
        let mut handlers = write_lock(&self.handlers, "unregistering focus handler")?;
        Ok(handlers.remove(&key).is_some())
    }

    pub fn contains(&self, key: FieldKey) -> FormResult<bool> {
        Ok(read_lock(&self.handlers, "reading focus handlers")?.contains_key(&key))
    }
}

impl FocusRouter for FocusHandlers {
    fn focus(&self, key: FieldKey) {
        let handler = match self.handlers.read() {
            Ok(guard) => guard.get(&key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(&key).cloned(),
        };
        match handler {
            Some(handler) => handler(),
            None => log::debug!("no focus handler registered for field `{key}`"),
        }
    }
}

use super::controller::FieldKey;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMap<V> {
    entries: Vec<(FieldKey, V)>,
}

impl<V> FieldMap<V> {
    pub(crate) fn from_keys(keys: &[FieldKey], mut value: impl FnMut(FieldKey) -> V) -> Self {
        Self {
            entries: keys.iter().map(|key| (*key, value(*key))).collect(),
        }
    }

    pub(crate) fn try_from_keys<Err>(
        keys: &[FieldKey],
        mut value: impl FnMut(FieldKey) -> Result<V, Err>,
    ) -> Result<Self, Err> {
        let entries = keys
            .iter()
            .map(|key| value(*key).map(|value| (*key, value)))
            .collect::<Result<Vec<_>, Err>>()?;
        Ok(Self { entries })
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&V> {
        let name = name.as_ref();
        self.entries
            .iter()
            .find_map(|(key, value)| (key.as_str() == name).then_some(value))
    }

    pub(crate) fn get_mut(&mut self, key: FieldKey) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find_map(|(entry, value)| (*entry == key).then_some(value))
    }

    pub fn contains_key(&self, name: impl AsRef<str>) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &V)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn find_key(&self, predicate: impl Fn(&V) -> bool) -> Option<FieldKey> {
        self.entries
            .iter()
            .find_map(|(key, value)| predicate(value).then_some(*key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! The caller's configuration choices.

use device::{Catalog, SettingId, SettingValue};
use heapless::LinearMap;

/// Insertion-ordered map of setting → chosen value.
///
/// Capacity equals the number of settings, so every setting fits at once.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SelectionSet {
    values: LinearMap<SettingId, SettingValue, { SettingId::COUNT }>,
}

impl SelectionSet {
    /// Empty selection: every DEVCFG bit stays erased.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every catalog setting at its documented default.
    pub fn with_defaults(catalog: &Catalog) -> Self {
        catalog.iter().map(|s| (s.id, s.default)).collect()
    }

    /// Choose `value` for `id`, returning the previous choice.
    pub fn insert(&mut self, id: SettingId, value: SettingValue) -> Option<SettingValue> {
        // A full map already holds every key, so insert replaces and never fails.
        self.values.insert(id, value).unwrap_or(None)
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, id: SettingId, value: SettingValue) -> Self {
        self.insert(id, value);
        self
    }

    /// Chosen value of `id`.
    pub fn get(&self, id: SettingId) -> Option<&SettingValue> {
        self.values.get(&id)
    }

    /// Drop the choice for `id`.
    pub fn remove(&mut self, id: SettingId) -> Option<SettingValue> {
        self.values.remove(&id)
    }

    /// Choices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SettingId, SettingValue)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }

    /// Number of chosen settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is chosen.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(SettingId, SettingValue)> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = (SettingId, SettingValue)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<(SettingId, SettingValue)> for SelectionSet {
    fn extend<I: IntoIterator<Item = (SettingId, SettingValue)>>(&mut self, iter: I) {
        for (id, value) in iter {
            self.insert(id, value);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use device::PIC32MZ_EF;

    #[test]
    fn defaults_cover_whole_catalog() {
        let set = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
        assert_eq!(set.len(), SettingId::COUNT);
        assert_eq!(set.get(SettingId::Fpllmult), Some(&SettingValue::Number(50)));
        assert_eq!(set.get(SettingId::Fnosc), Some(&SettingValue::Symbol("SPLL")));
    }

    #[test]
    fn insert_replaces_and_keeps_position() {
        let mut set = SelectionSet::new()
            .with(SettingId::Fnosc, SettingValue::Symbol("FRC"))
            .with(SettingId::Fpllmult, SettingValue::Number(40));
        let prev = set.insert(SettingId::Fnosc, SettingValue::Symbol("SPLL"));
        assert_eq!(prev, Some(SettingValue::Symbol("FRC")));
        let order: Vec<_> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(order, [SettingId::Fnosc, SettingId::Fpllmult]);
    }

    #[test]
    fn filling_every_setting_twice_never_overflows() {
        let mut set = SelectionSet::new();
        for _ in 0..2 {
            for id in SettingId::ALL {
                set.insert(id, SettingValue::Number(0));
            }
        }
        assert_eq!(set.len(), SettingId::COUNT);
    }
}

//! The owner property store contract.

use indexmap::IndexMap;

use crate::value::PropertyValue;

/// String-keyed, indexable storage for computed property values.
///
/// Owning objects implement this so that `add` and `regenerate` can write
/// results back under the model's property name (`owner[propname] = value`).
pub trait PropertyStore {
    /// Read a stored property.
    ///
    /// Returns `None` if nothing has been written under `name`.
    fn property(&self, name: &str) -> Option<&PropertyValue>;

    /// Write a property, replacing any previous value.
    fn set_property(&mut self, name: &str, value: PropertyValue);

    /// Remove a property, returning its last value.
    fn remove_property(&mut self, name: &str) -> Option<PropertyValue>;

    /// Names of all stored properties, in first-write order.
    fn property_names(&self) -> Vec<String>;
}

/// The default [`PropertyStore`]: an insertion-ordered map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    values: IndexMap<String, PropertyValue>,
}

impl PropertyMap {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether a property is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate `(name, value)` pairs in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PropertyStore for PropertyMap {
    fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) {
        self.values.insert(name.to_string(), value);
    }

    fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.values.shift_remove(name)
    }

    fn property_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_first_write_position() {
        let mut store = PropertyMap::new();
        store.set_property("pore.diameter", vec![1.0].into());
        store.set_property("pore.volume", vec![2.0].into());
        store.set_property("pore.diameter", vec![3.0].into());
        assert_eq!(store.property_names(), vec!["pore.diameter", "pore.volume"]);
        assert_eq!(
            store.property("pore.diameter"),
            Some(&PropertyValue::Float(vec![3.0]))
        );
    }

    proptest::proptest! {
        #[test]
        fn names_follow_first_write(writes in proptest::collection::vec(0usize..6, 0..40)) {
            let mut store = PropertyMap::new();
            let mut expected: Vec<String> = Vec::new();
            for (i, w) in writes.iter().enumerate() {
                let name = format!("pore.p{w}");
                if !expected.contains(&name) {
                    expected.push(name.clone());
                }
                store.set_property(&name, vec![i as f64].into());
            }
            proptest::prop_assert_eq!(store.property_names(), expected);
        }
    }

    #[test]
    fn remove_returns_last_value() {
        let mut store = PropertyMap::new();
        store.set_property("throat.length", vec![0.5].into());
        assert!(store.remove_property("throat.length").is_some());
        assert!(store.is_empty());
        assert!(store.remove_property("throat.length").is_none());
    }
}

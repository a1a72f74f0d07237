use super::AttributeValue;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Attribute mapping of a feature, ordered by key.
#[derive(Clone, Default, PartialEq)]
pub struct FeatureProperties {
	properties: BTreeMap<String, AttributeValue>,
}

impl FeatureProperties {
	#[must_use]
	pub fn new() -> FeatureProperties {
		FeatureProperties {
			properties: BTreeMap::new(),
		}
	}
	pub fn insert<T>(&mut self, key: String, value: T)
	where
		AttributeValue: From<T>,
	{
		self.properties.insert(key, AttributeValue::from(value));
	}
	pub fn remove(&mut self, key: &str) {
		self.properties.remove(key);
	}
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&AttributeValue> {
		self.properties.get(key)
	}
	pub fn iter(&self) -> btree_map::Iter<'_, String, AttributeValue> {
		self.properties.iter()
	}
	#[must_use]
	pub fn len(&self) -> usize {
		self.properties.len()
	}
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}
}

impl<'a> IntoIterator for &'a FeatureProperties {
	type Item = (&'a String, &'a AttributeValue);
	type IntoIter = btree_map::Iter<'a, String, AttributeValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.iter()
	}
}

impl From<Vec<(&str, AttributeValue)>> for FeatureProperties {
	fn from(value: Vec<(&str, AttributeValue)>) -> Self {
		FeatureProperties {
			properties: value.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
		}
	}
}

impl FromIterator<(String, AttributeValue)> for FeatureProperties {
	fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
		FeatureProperties {
			properties: BTreeMap::from_iter(iter),
		}
	}
}

impl Debug for FeatureProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.properties.iter()).finish()
	}
}

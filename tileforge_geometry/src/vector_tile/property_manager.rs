//! Deduplicated key and value tables of a layer.
//!
//! Features reference their attributes as pairs of indices (`tags`) into these tables.

use super::{AttributeValue, FeatureProperties};
use anyhow::{Context, Result, anyhow};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// An insertion-ordered list of unique entries with index lookup.
#[derive(Clone, PartialEq)]
pub struct LookupTable<T>
where
	T: Clone + Eq + Hash,
{
	pub list: Vec<T>,
	map: HashMap<T, u32>,
}

impl<T> LookupTable<T>
where
	T: Clone + Debug + Eq + Hash,
{
	/// Returns the index of `entry`, appending it first if it is new.
	pub fn add(&mut self, entry: &T) -> u32 {
		if let Some(index) = self.map.get(entry) {
			return *index;
		}
		let index = self.list.len() as u32;
		self.map.insert(entry.clone(), index);
		self.list.push(entry.clone());
		index
	}

	pub fn find(&self, entry: &T) -> Result<u32> {
		self
			.map
			.get(entry)
			.ok_or_else(|| anyhow!("entry '{entry:?}' not found"))
			.copied()
	}

	pub fn get(&self, index: u32) -> Option<&T> {
		self.list.get(index as usize)
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		self.list.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.list.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.list.is_empty()
	}
}

impl<T: Clone + Debug + Eq + Hash> Default for LookupTable<T> {
	fn default() -> LookupTable<T> {
		LookupTable {
			list: Vec::new(),
			map: HashMap::new(),
		}
	}
}

impl<T> Debug for LookupTable<T>
where
	T: Clone + Debug + Eq + Hash,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.list).finish()
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyManager {
	pub key: LookupTable<String>,
	pub val: LookupTable<AttributeValue>,
}

impl PropertyManager {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds both tables in a single pass, keeping first-seen order.
	pub fn from_properties<'a, I>(properties_iter: I) -> Self
	where
		I: IntoIterator<Item = &'a FeatureProperties>,
	{
		let mut manager = PropertyManager::new();
		for properties in properties_iter {
			for (key, value) in properties {
				manager.key.add(key);
				manager.val.add(value);
			}
		}
		manager
	}

	pub fn iter_key(&self) -> impl Iterator<Item = &String> + '_ {
		self.key.iter()
	}

	pub fn iter_val(&self) -> impl Iterator<Item = &AttributeValue> + '_ {
		self.val.iter()
	}

	/// Translates properties into `[key_index, value_index, …]` without modifying the tables.
	///
	/// # Errors
	///
	/// Fails if a key or value is not part of the tables.
	pub fn lookup_tag_ids(&self, properties: &FeatureProperties) -> Result<Vec<u32>> {
		let mut tag_ids = Vec::with_capacity(properties.len() * 2);
		for (key, value) in properties {
			tag_ids.push(self.key.find(key).context("Failed to find property key")?);
			tag_ids.push(self.val.find(value).context("Failed to find property value")?);
		}
		Ok(tag_ids)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn props(entries: Vec<(&str, AttributeValue)>) -> FeatureProperties {
		FeatureProperties::from(entries)
	}

	#[test]
	fn lookup_table_deduplicates() {
		let mut table = LookupTable::<String>::default();
		assert_eq!(table.add(&"a".to_string()), 0);
		assert_eq!(table.add(&"b".to_string()), 1);
		assert_eq!(table.add(&"a".to_string()), 0);
		assert_eq!(table.len(), 2);
		assert_eq!(table.get(1), Some(&"b".to_string()));
		assert!(table.get(2).is_none());
		assert!(table.find(&"c".to_string()).is_err());
	}

	#[test]
	fn tables_keep_first_seen_order() {
		let manager = PropertyManager::from_properties(&[
			props(vec![("kind", AttributeValue::from("road")), ("lanes", AttributeValue::from(2u8))]),
			props(vec![("kind", AttributeValue::from("rail")), ("lanes", AttributeValue::from(2u8))]),
			props(vec![("bridge", AttributeValue::from(true)), ("kind", AttributeValue::from("road"))]),
		]);

		assert_eq!(manager.key.list, vec!["kind", "lanes", "bridge"]);
		assert_eq!(
			manager.val.list,
			vec![
				AttributeValue::from("road"),
				AttributeValue::from(2u8),
				AttributeValue::from("rail"),
				AttributeValue::from(true),
			]
		);
	}

	#[test]
	fn same_number_with_different_kinds_is_kept_apart() {
		let manager = PropertyManager::from_properties(&[props(vec![
			("a", AttributeValue::from(7i16)),
			("b", AttributeValue::from(7i64)),
			("c", AttributeValue::from(7u64)),
			("d", AttributeValue::from(7u16)),
		])]);
		assert_eq!(manager.val.len(), 3);
	}

	#[test]
	fn opaque_values_compare_by_bytes() {
		let manager = PropertyManager::from_properties(&[props(vec![
			("a", AttributeValue::Opaque(vec![1, 2])),
			("b", AttributeValue::Opaque(vec![1, 2])),
			("c", AttributeValue::Opaque(vec![2, 1])),
		])]);
		assert_eq!(manager.val.len(), 2);
	}

	#[test]
	fn lookup_tag_ids() -> Result<()> {
		let features = [
			props(vec![("kind", AttributeValue::from("road"))]),
			props(vec![("kind", AttributeValue::from("rail")), ("name", AttributeValue::from("road"))]),
		];
		let manager = PropertyManager::from_properties(&features);
		assert_eq!(manager.lookup_tag_ids(&features[0])?, vec![0, 0]);
		assert_eq!(manager.lookup_tag_ids(&features[1])?, vec![0, 1, 1, 0]);

		let unknown = props(vec![("other", AttributeValue::from(1u8))]);
		assert!(manager.lookup_tag_ids(&unknown).is_err());
		Ok(())
	}
}

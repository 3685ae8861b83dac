use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Number;

use crate::features::libcal::RoomItemId;

#[derive(Debug, Clone, PartialEq)]
pub struct CapacityRecord {
    pub room_item_id: RoomItemId,
    pub capacity: Number,
}

/// Capacities keyed by room item id, serialised as a JSON object with the
/// key order a JavaScript object gives: array-index keys (`"0"`, `"27"`, no
/// leading zeros, below 2^32 - 1) ascending by value, then every other key
/// in the order it was first recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapacityMap {
    records: Vec<CapacityRecord>,
}

impl CapacityMap {
    pub fn get(&self, id: &str) -> Option<&Number> {
        self.records
            .iter()
            .find(|record| record.room_item_id.as_str() == id)
            .map(|record| &record.capacity)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapacityRecord> {
        self.records.iter()
    }

    fn insert(&mut self, record: CapacityRecord) {
        match self
            .records
            .iter_mut()
            .find(|existing| existing.room_item_id == record.room_item_id)
        {
            Some(existing) => existing.capacity = record.capacity,
            None => self.records.push(record),
        }
    }
}

impl FromIterator<CapacityRecord> for CapacityMap {
    fn from_iter<I: IntoIterator<Item = CapacityRecord>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut map, record| {
            map.insert(record);
            map
        })
    }
}

impl Serialize for CapacityMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (mut indexed, named): (Vec<_>, Vec<_>) = self
            .records
            .iter()
            .map(|record| (array_index(record.room_item_id.as_str()), record))
            .partition(|(index, _)| index.is_some());
        indexed.sort_by_key(|(index, _)| *index);

        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (_, record) in indexed.into_iter().chain(named) {
            map.serialize_entry(record.room_item_id.as_str(), &record.capacity)?;
        }
        map.end()
    }
}

const MAX_ARRAY_INDEX: u64 = u32::MAX as u64 - 1;

fn array_index(key: &str) -> Option<u64> {
    if key.is_empty() || !key.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u64>()
        .ok()
        .filter(|index| *index <= MAX_ARRAY_INDEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, capacity: i64) -> CapacityRecord {
        CapacityRecord {
            room_item_id: RoomItemId::from(id),
            capacity: Number::from(capacity),
        }
    }

    #[test]
    fn numeric_ids_serialise_in_ascending_order() {
        let map: CapacityMap = vec![record("20", 4), record("3", 12)].into_iter().collect();
        let json = serde_json::to_string(&map).expect("serialise");
        assert_eq!(json, r#"{"3":12,"20":4}"#);
    }

    #[test]
    fn index_keys_come_before_named_keys() {
        let map: CapacityMap = vec![
            record("lab-b", 1),
            record("27", 2),
            record("007", 3),
            record("9", 4),
            record("lab-a", 5),
            record("4294967295", 6),
            record("0", 7),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&map).expect("serialise");
        assert_eq!(
            json,
            r#"{"0":7,"9":4,"27":2,"lab-b":1,"007":3,"lab-a":5,"4294967295":6}"#
        );
    }

    #[test]
    fn repeated_id_keeps_first_position_and_last_value() {
        let map: CapacityMap = vec![record("1", 4), record("2", 6), record("1", 8)]
            .into_iter()
            .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("1"), Some(&Number::from(8)));
        let json = serde_json::to_string(&map).expect("serialise");
        assert_eq!(json, r#"{"1":8,"2":6}"#);
    }
}

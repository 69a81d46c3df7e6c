use crate::SyncMultimap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

/// Serializes as a map of each key to its value sequence, so `a -> 1, 2`
/// becomes `{"a": [1, 2]}`.
impl<K, V, H> Serialize for SyncMultimap<K, V, H>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let table = self.table.lock();

        let mut map = serializer.serialize_map(Some(table.count))?;

        for entry in table.buckets.iter().flatten() {
            map.serialize_entry(&entry.key, &entry.values)?;
        }

        map.end()
    }
}

impl<'de, K, V, S> Deserialize<'de> for SyncMultimap<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor<K, V, S> {
            marker: PhantomData<SyncMultimap<K, V, S>>,
        }

        impl<'de, K, V, S> Visitor<'de> for MapVisitor<K, V, S>
        where
            K: Deserialize<'de> + Eq + Hash,
            V: Deserialize<'de>,
            S: BuildHasher + Default,
        {
            type Value = SyncMultimap<K, V, S>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of keys to value sequences")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut values = SyncMultimap::with_hasher(S::default());

                while let Some((key, entry_values)) = map.next_entry::<K, Vec<V>>()? {
                    let table = values.table.get_mut();

                    table.grow_if_needed(&values.hash_builder);
                    table.add_all(&values.hash_builder, key, entry_values);
                }

                Ok(values)
            }
        }

        let visitor = MapVisitor {
            marker: PhantomData,
        };

        deserializer.deserialize_map(visitor)
    }
}

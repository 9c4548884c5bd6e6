use core::fmt;
use core::hash::BuildHasher;
use core::marker::PhantomData;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use crate::LongMap;
use crate::map::DEFAULT_CAPACITY;

struct LongMapVisitor<V, S> {
    marker: PhantomData<fn() -> LongMap<V, S>>,
}

impl<'de, V, S> Visitor<'de> for LongMapVisitor<V, S>
where
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = LongMap<V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map keyed by 64-bit integers")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let capacity = access.size_hint().unwrap_or(DEFAULT_CAPACITY);
        let mut map = LongMap::with_capacity_and_hasher(capacity, S::default());

        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }

        Ok(map)
    }
}

impl<'de, V, S> Deserialize<'de> for LongMap<V, S>
where
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(LongMapVisitor {
            marker: PhantomData,
        })
    }
}

impl<V, S> Serialize for LongMap<V, S>
where
    V: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;

        for (key, value) in self.iter() {
            map.serialize_entry(&key, value)?;
        }

        map.end()
    }
}

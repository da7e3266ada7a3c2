//! Serialization support for `QuickFilter` using serde.
//!
//! The default format is the tuple `(capacity, words)`. Deserialization runs
//! the words through [`QuickFilter::from_words`], so malformed input is
//! rejected rather than breaking the filter's invariants.

use alloc::vec::Vec;
use core::fmt;

use serde::{
    Deserialize, Serialize,
    de::{self, SeqAccess, Visitor},
    ser::SerializeTuple,
};

use crate::QuickFilter;

impl Serialize for QuickFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.capacity)?;
        tup.serialize_element(self.as_words())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for QuickFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct QuickFilterVisitor;

        impl<'de> Visitor<'de> for QuickFilterVisitor {
            type Value = QuickFilter;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a capacity followed by a sequence of u64 words")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let capacity: usize = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let words: Vec<u64> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                QuickFilter::from_words(capacity, words).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_tuple(2, QuickFilterVisitor)
    }
}

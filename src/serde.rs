//! Alternative serde formats for [`QuickFilter`], for use with
//! `#[serde(with = "...")]`.

use core::fmt;

use serde::{
    Deserializer, Serialize, Serializer,
    de::{self, DeserializeSeed, SeqAccess, Visitor},
    ser::SerializeTuple,
};

use crate::QuickFilter;

/// Module for serializing and deserializing [`QuickFilter`] as its capacity
/// followed by the ascending list of set indices.
///
/// This is more compact than the word format for sparse filters and is
/// readable in text formats.
///
/// ```
/// # use serde::{Deserialize, Serialize};
/// use quickfilter::{QuickFilter, quickfilter};
///
/// #[derive(Serialize, Deserialize)]
/// struct Pass {
///     #[serde(with = "quickfilter::serde::sorted_set")]
///     matches: QuickFilter,
/// }
///
/// let pass = Pass { matches: quickfilter![10; 2, 7] };
/// let json = serde_json::to_string(&pass).unwrap();
/// assert_eq!(json, r#"{"matches":[10,[2,7]]}"#);
/// ```
pub mod sorted_set {
    use super::*;

    struct SortedIndices<'a>(&'a QuickFilter);

    impl Serialize for SortedIndices<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_seq(self.0.iter())
        }
    }

    /// Serialize the [`QuickFilter`] as `(capacity, [index, ...])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(filter: &QuickFilter, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&filter.cap())?;
        tup.serialize_element(&SortedIndices(filter))?;
        tup.end()
    }

    /// Reads the index list into a filter of a known capacity.
    struct IndicesSeed(usize);

    impl<'de> DeserializeSeed<'de> for IndicesSeed {
        type Value = QuickFilter;

        fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(self)
        }
    }

    impl<'de> Visitor<'de> for IndicesSeed {
        type Value = QuickFilter;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "a sorted sequence of indices below {}", self.0)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut filter = QuickFilter::try_new(self.0).map_err(|err| {
                de::Error::custom(format_args!(
                    "cannot allocate filter of capacity {}: {err}",
                    self.0
                ))
            })?;
            let mut last = None;
            while let Some(index) = seq.next_element::<usize>()? {
                if let Some(last) = last
                    && last >= index
                {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Unsigned(index as u64),
                        &"sorted sequence",
                    ));
                }
                last = Some(index);
                filter.try_add(index).map_err(de::Error::custom)?;
            }
            Ok(filter)
        }
    }

    /// Deserialize a [`QuickFilter`] from `(capacity, [index, ...])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the indices are not strictly ascending, if an
    /// index is not below the capacity, if the capacity is too large to
    /// allocate, or if deserialization fails.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<QuickFilter, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SortedSetVisitor;

        impl<'de> Visitor<'de> for SortedSetVisitor {
            type Value = QuickFilter;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a capacity followed by a sorted sequence of indices")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let capacity: usize = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                seq.next_element_seed(IndicesSeed(capacity))?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))
            }
        }

        deserializer.deserialize_tuple(2, SortedSetVisitor)
    }
}

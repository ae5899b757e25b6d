//! Tri-state field presence for partial updates

use serde::{Deserialize, Deserializer};

/// A field of a partial update payload
///
/// Distinguishes a key that was left out of the JSON body from one that was
/// sent as `null`. Fields must carry `#[serde(default)]` so that a missing key
/// deserializes to [`Patch::Missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The key was not present; keep the stored value
    Missing,
    /// The key was present with `null`; clear the stored value
    Null,
    /// The key carried a value; overwrite the stored value
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<T> Patch<T> {
    /// Convert into an `Option`, folding `Missing` and `Null` together
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(value) => Some(value),
            Patch::Missing | Patch::Null => None,
        }
    }

    /// Merge this patch over a stored nullable value
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *target = None,
            Patch::Value(value) => *target = Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

//! # Bracket Options
//!
//! Some elimination types accept additional configuration that changes the shape of the
//! generated [`Bracket`]. Examples are a match for the third place in a single elimination
//! bracket or dropping the reset match of the grand finals in a double elimination bracket.
//!
//! Options are plain key-value pairs. [`TournamentOptions`] describes the accepted keys together
//! with their names and default values, [`TournamentOptionValues`] only carries values and is
//! validated against the [`TournamentOptions`] of an elimination type using
//! [`TournamentOptionValues::merge`].
//!
//! [`Bracket`]: crate::Bracket
use std::collections::btree_map::{BTreeMap, Iter};
use std::fmt::{self, Display, Formatter};

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown key {0}")]
    UnknownKey(String),
}

/// A list of options accepted by an elimination type. `TournamentOptions` includes the names
/// and default values of all options. [`TournamentOptionValues`] should be used when just
/// expecting a list of key-value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TournamentOptions(BTreeMap<String, TournamentOption>);

impl TournamentOptions {
    /// Creates a new [`Builder`].
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the option with the given `key`. Returns `None` if the given key does not exist.
    pub fn get(&self, key: &str) -> Option<&TournamentOption> {
        self.0.get(key)
    }

    /// Inserts a new [`TournamentOption`] with the provided `key`, overwriting the previous value
    /// if it exists.
    pub fn insert<K>(&mut self, key: K, option: TournamentOption)
    where
        K: ToString,
    {
        self.0.insert(key.to_string(), option);
    }

    /// Returns an iterator over all [`TournamentOption`]s, ordered by key.
    pub fn iter(&self) -> Iter<'_, String, TournamentOption> {
        self.0.iter()
    }
}

impl From<TournamentOptions> for TournamentOptionValues {
    fn from(options: TournamentOptions) -> Self {
        Self(
            options
                .0
                .into_iter()
                .map(|(key, option)| (key, option.value))
                .collect(),
        )
    }
}

/// A list of option values for a bracket which only contains the values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TournamentOptionValues(BTreeMap<String, OptionValue>);

impl TournamentOptionValues {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the [`OptionValue`] with the given `key`. Returns `None` if no value exist for the
    /// given `key`.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn take(&mut self, key: &str) -> Option<OptionValue> {
        self.0.remove(key)
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: ToString,
        V: Into<OptionValue>,
    {
        self.0.insert(key.to_string(), value.into());
    }

    /// Validates the keys against the accepted `options` and fills all missing values with
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns an [`enum@Error`] if a key is not accepted by `options`.
    pub fn merge(mut self, options: TournamentOptions) -> Result<Self, Error> {
        if let Some(key) = self.0.keys().find(|key| !options.0.contains_key(*key)) {
            return Err(Error::UnknownKey(key.to_owned()));
        }

        for (key, option) in options.0.into_iter() {
            self.0.entry(key).or_insert(option.value);
        }

        Ok(self)
    }
}

impl<K, V> FromIterator<(K, V)> for TournamentOptionValues
where
    K: ToString,
    V: Into<OptionValue>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.to_string(), value.into()))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TournamentOption {
    pub name: String,
    pub value: OptionValue,
}

/// The value of a [`TournamentOption`]. All options of a bracket are switches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    Bool(bool),
}

impl OptionValue {
    /// Returns the contained value as a `bool`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use knockout_core::options::OptionValue;
    /// assert!(OptionValue::Bool(true).as_bool());
    /// ```
    #[inline]
    pub fn as_bool(self) -> bool {
        match self {
            Self::Bool(value) => value,
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
        }
    }
}

impl From<bool> for OptionValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A builder for [`TournamentOptions`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    options: TournamentOptions,
}

impl Builder {
    /// Inserts a new [`TournamentOption`]. If the `key` already exists, it is overwritten.
    pub fn option<T, V>(mut self, key: &'static str, name: T, value: V) -> Self
    where
        T: ToString,
        V: Into<OptionValue>,
    {
        self.options.insert(
            key,
            TournamentOption {
                name: name.to_string(),
                value: value.into(),
            },
        );
        self
    }

    /// Consumes the `Builder`, returning the collected [`TournamentOptions`].
    #[inline]
    pub fn build(self) -> TournamentOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, OptionValue, TournamentOptionValues, TournamentOptions};

    fn options() -> TournamentOptions {
        TournamentOptions::builder()
            .option("third_place_match", "Include a match for the third place", false)
            .build()
    }

    #[test]
    fn test_merge_defaults() {
        let values = TournamentOptionValues::new().merge(options()).unwrap();

        assert_eq!(
            values.get("third_place_match"),
            Some(&OptionValue::Bool(false))
        );
    }

    #[test]
    fn test_merge_keeps_values() {
        let mut values = TournamentOptionValues::new();
        values.set("third_place_match", true);

        let values = values.merge(options()).unwrap();
        assert_eq!(
            values.get("third_place_match"),
            Some(&OptionValue::Bool(true))
        );
    }

    #[test]
    fn test_merge_unknown_key() {
        let values: TournamentOptionValues = [("swiss_rounds", true)].into_iter().collect();

        assert_eq!(
            values.merge(options()),
            Err(Error::UnknownKey(String::from("swiss_rounds")))
        );
    }

    #[test]
    fn test_options_into_values() {
        let options = options();
        let (key, option) = options.iter().next().unwrap();
        assert_eq!(key, "third_place_match");
        assert_eq!(option.name, "Include a match for the third place");

        let mut values = TournamentOptionValues::from(options);
        assert_eq!(
            values.take("third_place_match"),
            Some(OptionValue::Bool(false))
        );
        assert_eq!(values.get("third_place_match"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_option_value_serde() {
        use serde_test::{assert_de_tokens_error, assert_tokens, Token};

        assert_tokens(&OptionValue::Bool(true), &[Token::Bool(true)]);
        assert_de_tokens_error::<OptionValue>(
            &[Token::U64(1)],
            "data did not match any variant of untagged enum OptionValue",
        );
    }
}

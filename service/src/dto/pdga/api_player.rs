use log::debug;
use serde::Deserialize;

use crate::dto::RawResult;

/// A score row as the PDGA live api sends it.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ApiPlayer {
    pub name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub running_place: Option<u16>,
    #[serde(default)]
    pub to_par: Option<i16>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub grand_total: u16,
    #[serde(default, deserialize_with = "bool_from_int")]
    pub completed: bool,
}

pub(crate) mod serde_things {
    use serde::de::Visitor;
    use serde::{de, Deserializer};
    use std::fmt;
    use std::marker::PhantomData;
    use std::str::FromStr;

    /// Numbers arrive as ints, numeric strings or null. Null becomes the default.
    pub(crate) fn flexible_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64> + TryFrom<u64> + FromStr + Default,
    {
        struct FlexibleNumberVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for FlexibleNumberVisitor<T>
        where
            T: TryFrom<i64> + TryFrom<u64> + FromStr + Default,
        {
            type Value = T;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a string containing a number")
            }

            fn visit_i64<E>(self, value: i64) -> Result<T, E>
            where
                E: de::Error,
            {
                T::try_from(value).map_err(|_| E::custom(format!("number out of range: {value}")))
            }

            fn visit_u64<E>(self, value: u64) -> Result<T, E>
            where
                E: de::Error,
            {
                T::try_from(value).map_err(|_| E::custom(format!("number out of range: {value}")))
            }

            fn visit_str<E>(self, value: &str) -> Result<T, E>
            where
                E: de::Error,
            {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(T::default());
                }
                value
                    .parse::<T>()
                    .map_err(|_| E::custom(format!("not a number: {value}")))
            }

            fn visit_unit<E>(self) -> Result<T, E>
            where
                E: de::Error,
            {
                Ok(T::default())
            }

            fn visit_none<E>(self) -> Result<T, E>
            where
                E: de::Error,
            {
                Ok(T::default())
            }
        }

        deserializer.deserialize_any(FlexibleNumberVisitor(PhantomData))
    }

    pub(crate) fn bool_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BoolFromInt;

        impl<'de> Visitor<'de> for BoolFromInt {
            type Value = bool;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or a number")
            }

            fn visit_bool<E>(self, value: bool) -> Result<bool, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<bool, E>
            where
                E: de::Error,
            {
                Ok(value == 1)
            }

            fn visit_u64<E>(self, value: u64) -> Result<bool, E>
            where
                E: de::Error,
            {
                Ok(value == 1)
            }

            fn visit_unit<E>(self) -> Result<bool, E>
            where
                E: de::Error,
            {
                Ok(false)
            }
        }
        deserializer.deserialize_any(BoolFromInt)
    }
}

use serde_things::{bool_from_int, flexible_number};

impl ApiPlayer {
    /// Players without a running place are not in the field yet.
    pub(crate) fn into_raw_result(self) -> Option<RawResult> {
        match self.running_place {
            Some(place) if place >= 1 => Some(RawResult {
                name: self.name,
                first_name: self.first_name,
                last_name: self.last_name,
                place,
                to_par: self.to_par.unwrap_or_default(),
                total: self.grand_total,
                completed: self.completed,
            }),
            _ => {
                debug!("Skipping {} without a running place", self.name);
                None
            }
        }
    }
}

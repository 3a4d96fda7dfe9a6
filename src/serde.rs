//! `serde` support: a ratio is written as a struct `Ratio` with fields
//! `numerator` and `denominator`, each in its backend's own serde form.
//!
//! Reading restores the pair through [`Ratio::assign_parts`], so stored
//! values need not be reduced, and a zero denominator is rejected.

use crate::backend::IntegerBackend;
use crate::ratio::Ratio;
use core::fmt;
use core::marker::PhantomData;
use serde::de::{self, Deserialize, Deserializer, Error as DeError, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeStruct, Serializer};

const NAME: &str = "Ratio";
const FIELDS: &[&str] = &["numerator", "denominator"];

impl<T> Serialize for Ratio<T>
where
    T: IntegerBackend + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct(NAME, 2)?;
        state.serialize_field("numerator", self.numer())?;
        state.serialize_field("denominator", self.denom())?;
        state.end()
    }
}

impl<'de, T> Deserialize<'de> for Ratio<T>
where
    T: IntegerBackend + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (numer, denom) = deserializer.deserialize_struct(NAME, FIELDS, PartsVisitor(PhantomData))?;
        Ratio::from_parts(numer, denom).map_err(DeError::custom)
    }

    fn deserialize_in_place<D: Deserializer<'de>>(deserializer: D, place: &mut Self) -> Result<(), D::Error> {
        let (numer, denom) = deserializer.deserialize_struct(NAME, FIELDS, PartsVisitor(PhantomData))?;
        place.assign_parts(numer, denom).map_err(DeError::custom)
    }
}

enum Field {
    Numerator,
    Denominator,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("`numerator` or `denominator`")
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Field, E> {
                match value {
                    "numerator" => Ok(Field::Numerator),
                    "denominator" => Ok(Field::Denominator),
                    _ => Err(DeError::unknown_field(value, FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

/// Reads the raw, not yet canonical, component pair.
struct PartsVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for PartsVisitor<T>
where
    T: IntegerBackend + Deserialize<'de>,
{
    type Value = (T, T);

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("struct Ratio")
    }

    fn visit_seq<V: SeqAccess<'de>>(self, mut seq: V) -> Result<(T, T), V::Error> {
        let numer = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let denom = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        Ok((numer, denom))
    }

    fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> Result<(T, T), V::Error> {
        let mut numer = None;
        let mut denom = None;
        while let Some(key) = map.next_key()? {
            match key {
                Field::Numerator => {
                    if numer.is_some() {
                        return Err(de::Error::duplicate_field("numerator"));
                    }
                    numer = Some(map.next_value()?);
                }
                Field::Denominator => {
                    if denom.is_some() {
                        return Err(de::Error::duplicate_field("denominator"));
                    }
                    denom = Some(map.next_value()?);
                }
            }
        }
        let numer = numer.ok_or_else(|| de::Error::missing_field("numerator"))?;
        let denom = denom.ok_or_else(|| de::Error::missing_field("denominator"))?;
        Ok((numer, denom))
    }
}

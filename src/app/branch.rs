use std::fmt::Formatter;

use log::warn;
use serde::de::{Error, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::app::coordinates::Coordinates;

/// Anything that can be ranked by distance from a device location.
pub trait Geolocated {
    /// Usable coordinates of the record, `None` when it has no geolocation or
    /// its geolocation cannot be parsed.
    fn coordinates(&self) -> Option<Coordinates>;
}

impl Geolocated for Coordinates {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(*self)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Branch {
    pub identification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub postal_address: PostalAddress,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PostalAddress {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address_line: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeoLocation {
    #[serde(rename = "GeographicCoordinates")]
    pub geographic_coordinates: GeographicCoordinates,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeographicCoordinates {
    #[serde(rename = "Latitude", default)]
    pub latitude: Degrees,
    #[serde(rename = "Longitude", default)]
    pub longitude: Degrees,
}

/// A latitude or longitude as published by a directory: either a JSON number
/// or a numeric string such as `"51.50853"`. Any other JSON value (`null`,
/// booleans, arrays, objects) or a missing field is kept as `Missing` so the
/// branch is skipped rather than failing the whole directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Degrees {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Degrees {
    /// Finite decimal degrees, or `None` for a missing value or text that is
    /// not a number.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Degrees::Number(value) => *value,
            Degrees::Text(text) => text.trim().parse::<f64>().ok()?,
            Degrees::Missing => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Degrees {
    fn from(value: f64) -> Self {
        Degrees::Number(value)
    }
}

impl From<&str> for Degrees {
    fn from(value: &str) -> Self {
        Degrees::Text(value.to_string())
    }
}

impl Serialize for Degrees {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Degrees::Number(value) => serializer.serialize_f64(*value),
            Degrees::Text(text) => serializer.serialize_str(text),
            Degrees::Missing => serializer.serialize_unit(),
        }
    }
}

struct DegreesVisitor;

impl<'de> Visitor<'de> for DegreesVisitor {
    type Value = Degrees;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(formatter, "A number or a string representing decimal degrees")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Degrees::Number(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Degrees::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Degrees::Number(v as f64))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Degrees::Text(v.to_string()))
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Degrees::Missing)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Degrees::Missing)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Degrees::Missing)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Degrees::Missing)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Degrees::Missing)
    }
}

impl<'de> Deserialize<'de> for Degrees {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(DegreesVisitor)
    }
}

impl GeographicCoordinates {
    pub fn parse(&self) -> Option<Coordinates> {
        Some(Coordinates::new(
            self.latitude.parse()?,
            self.longitude.parse()?,
        ))
    }
}

impl Branch {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.identification)
    }
}

impl Geolocated for Branch {
    fn coordinates(&self) -> Option<Coordinates> {
        let geo_location = self.postal_address.geo_location.as_ref()?;
        let coordinates = geo_location.geographic_coordinates.parse();
        if coordinates.is_none() {
            warn!(
                "Skipping branch {} with unparseable coordinates {:?}",
                self.identification, geo_location.geographic_coordinates
            );
        }
        coordinates
    }
}

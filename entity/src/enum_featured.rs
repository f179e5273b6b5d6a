use std::fmt::Display;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// Marks the cover photo of a property. The stored documents use the
// strings "Sim" and "Nao"; anything else in a legacy document reads as "Nao".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Featured {
    Sim,
    #[default]
    Nao,
}

impl Featured {
    pub fn is_featured(&self) -> bool {
        matches!(self, Featured::Sim)
    }
}

impl FromStr for Featured {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "Sim" | "sim" => Ok(Featured::Sim),
            _ => Ok(Featured::default()),
        }
    }
}

impl Display for Featured {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Featured::Sim => "Sim",
            Featured::Nao => "Nao",
        };
        write!(f, "{text}")
    }
}

impl Serialize for Featured {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Featured {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(|s| s.parse::<Featured>().unwrap_or_default())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_known_values() {
        assert_eq!("Sim".parse::<Featured>(), Ok(Featured::Sim));
        assert_eq!("Nao".parse::<Featured>(), Ok(Featured::Nao));
    }

    #[test]
    fn parse_unknown_defaults_to_nao() {
        assert_eq!("Yes".parse::<Featured>(), Ok(Featured::Nao));
        assert_eq!("".parse::<Featured>(), Ok(Featured::Nao));
    }

    #[test]
    fn deserialize_tolerates_non_strings() {
        let featured: Featured = serde_json::from_value(Value::Null).unwrap();
        assert_eq!(featured, Featured::Nao);
        let featured: Featured = serde_json::from_value(Value::Bool(true)).unwrap();
        assert_eq!(featured, Featured::Nao);
    }

    #[test]
    fn serialize_as_wire_string() {
        assert_eq!(serde_json::to_value(Featured::Sim).unwrap(), "Sim");
        assert_eq!(serde_json::to_value(Featured::Nao).unwrap(), "Nao");
    }
}

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// Commercial status of a property listing. The only value the photo core
// acts on is "Vendido": sold listings must show their cover photo first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PropertyStatus {
    #[default]
    Venda,
    Locacao,
    Lancamento,
    Vendido,
}

impl PropertyStatus {
    pub fn is_sold(&self) -> bool {
        matches!(self, PropertyStatus::Vendido)
    }
}

impl FromStr for PropertyStatus {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "Venda" => Ok(PropertyStatus::Venda),
            "Locação" | "Locacao" => Ok(PropertyStatus::Locacao),
            "Lançamento" | "Lancamento" => Ok(PropertyStatus::Lancamento),
            "Vendido" => Ok(PropertyStatus::Vendido),
            _ => Ok(PropertyStatus::default()),
        }
    }
}

impl Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            PropertyStatus::Venda => "Venda",
            PropertyStatus::Locacao => "Locação",
            PropertyStatus::Lancamento => "Lançamento",
            PropertyStatus::Vendido => "Vendido",
        };
        write!(f, "{text}")
    }
}

impl Serialize for PropertyStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(|s| s.parse::<PropertyStatus>().unwrap_or_default())
            .unwrap_or_default())
    }
}

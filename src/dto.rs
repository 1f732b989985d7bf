use crate::dedup::HIGH_ACCURACY_THRESHOLD;
use serde::{de, Deserialize, Serialize};
use std::fmt;

/// One contact row as supplied by the input file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Record {
    #[serde(rename = "contactID")]
    pub id: i64,
    #[serde(rename = "name")]
    pub given_name: String,
    #[serde(rename = "name1")]
    pub family_name: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl Record {
    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accuracy {
    High,
    Low,
}

impl Accuracy {
    pub fn classify(score: f64) -> Accuracy {
        if score >= HIGH_ACCURACY_THRESHOLD {
            Accuracy::High
        } else {
            Accuracy::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Accuracy::High => "High",
            Accuracy::Low => "Low",
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Accuracy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

struct AccuracyVisitor;

impl<'de> de::Visitor<'de> for AccuracyVisitor {
    type Value = Accuracy;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("\"High\" or \"Low\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            "High" => Ok(Accuracy::High),
            "Low" => Ok(Accuracy::Low),
            value => Err(de::Error::custom(format!("unknown accuracy '{value}'"))),
        }
    }
}

impl<'de> de::Deserialize<'de> for Accuracy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(AccuracyVisitor)
    }
}

/// A classified pair of records from the same cluster.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MatchResult {
    #[serde(rename = "Source Contact ID")]
    pub source_id: i64,
    #[serde(rename = "Match Contact ID")]
    pub match_id: i64,
    #[serde(rename = "Accuracy")]
    pub accuracy: Accuracy,
    #[serde(rename = "Score")]
    pub score: f64,
}

//! Read-side record shapes. Every nested field is optional and decoded
//! leniently so one malformed attribute never drops a whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub address_line: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub area: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SalaryRecord {
    #[serde(deserialize_with = "lenient::number")]
    pub min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CriteriaRecord {
    #[serde(deserialize_with = "lenient::number")]
    pub min_result: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub max_backlog: Option<f64>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub passout_year: Vec<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub branch: Option<String>,
}

/// Company address: either a reference id or the inline address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AddressRef {
    Id(String),
    Inline(LocationRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompanyRecord {
    #[serde(rename = "_id", deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub logo: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub contact: Option<String>,
    #[serde(deserialize_with = "lenient::nested")]
    pub address: Option<AddressRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OfferRecord {
    #[serde(rename = "_id", deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::nested")]
    pub company: Option<CompanyRecord>,
    #[serde(deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient::nested")]
    pub location: Option<LocationRecord>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_opening: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub drive: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub offer_type: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub sector: Option<String>,
    #[serde(deserialize_with = "lenient::nested")]
    pub salary: Option<SalaryRecord>,
    #[serde(deserialize_with = "lenient::nested")]
    pub criteria: Option<CriteriaRecord>,
    #[serde(deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
}

impl OfferRecord {
    /// Role, openings and salary present; incomplete records are still shown.
    pub fn is_complete(&self) -> bool {
        self.role.as_deref().is_some_and(|role| !role.trim().is_empty())
            && self.total_opening.is_some_and(|n| n > 0.0)
            && self.salary.is_some()
    }
}

/// Prefixes `https://` when the URL carries no scheme. Blank input yields `None`.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed.trim_start_matches('/')))
    }
}

mod lenient {
    use super::*;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.and_then(|value| as_number(&value)))
    }

    pub fn numbers<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i64>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(as_number)
                .filter(|n| n.fract() == 0.0)
                .map(|n| n as i64)
                .collect(),
            Some(single) => as_number(&single).map(|n| n as i64).into_iter().collect(),
            None => Vec::new(),
        })
    }

    pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn nested<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(Option::<Value>::deserialize(d)?.and_then(|value| serde_json::from_value(value).ok()))
    }

    fn as_number(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|n| n.is_finite())
    }
}

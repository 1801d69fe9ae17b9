//! Serde helpers for the loosely typed fields of the PVE API.
//!
//! The upstream encodes numbers as strings in places (`loadavg`, occasionally
//! `vmid`), booleans as `0`/`1`, and lists as comma-separated strings
//! (`content`, `nodes`). These helpers accept every observed form.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Unsigned(n) => Some(*n as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Non-negative integer view; negatives clamp to zero.
    fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Unsigned(n) => Some(*n),
            Scalar::Text(s) if s.trim().chars().all(|c| c.is_ascii_digit()) => {
                s.trim().parse::<u64>().ok()
            }
            other => other.as_f64().filter(|f| f.is_finite()).map(|f| f.max(0.0) as u64),
        }
    }

    fn as_flag(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Text(s) => matches!(s.trim(), "1" | "true" | "yes" | "on"),
            other => other.as_f64().is_some_and(|f| f != 0.0),
        }
    }
}

/// `Option<u64>` from a number or numeric string. Unparseable values become `None`.
pub mod opt_u64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Scalar>::deserialize(deserializer)?;
        Ok(value.and_then(|v| v.as_u64()))
    }
}

/// `Option<f64>` from a number or numeric string.
pub mod opt_f64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Scalar>::deserialize(deserializer)?;
        Ok(value.and_then(|v| v.as_f64()).filter(|f| f.is_finite()))
    }
}

/// `Option<bool>` from `true`/`false`, `0`/`1` or their string forms.
pub mod opt_flag {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Scalar>::deserialize(deserializer)?;
        Ok(value.map(|v| v.as_flag()))
    }
}

/// `Option<String>` from a string or a number; keeps large ids exact.
pub mod opt_id_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Scalar>::deserialize(deserializer)?;
        Ok(value.map(|v| match v {
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(f) if f.fract() == 0.0 => format!("{:.0}", f),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(s) => s,
        }))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListForm {
    Items(Vec<String>),
    Joined(String),
}

/// `Option<Vec<String>>` from an array or a comma-separated string.
/// Blank items are dropped; an absent field stays `None`.
pub mod opt_list {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<ListForm>::deserialize(deserializer)?;
        Ok(value.map(|form| {
            let items = match form {
                ListForm::Items(items) => items,
                ListForm::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            };
            items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        }))
    }
}

/// `Option<[f64; 3]>` load averages from numbers or numeric strings.
pub mod opt_loadavg {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<[f64; 3]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Vec<Scalar>>::deserialize(deserializer)?;
        Ok(value.map(|items| {
            let mut load = [0.0; 3];
            for (slot, item) in load.iter_mut().zip(items.iter()) {
                *slot = item.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0);
            }
            load
        }))
    }
}

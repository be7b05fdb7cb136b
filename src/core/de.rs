use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyNumber {
    F64(f64),
    Text(String),
}

/// Accepts a JSON number, a numeric string, or `null`.
///
/// Non-numeric strings and non-finite values decode as `None`, so a bad field
/// reads as absent instead of failing the whole record.
pub(crate) fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<AnyNumber>::deserialize(deserializer)? {
        Some(AnyNumber::F64(f)) => Some(f),
        Some(AnyNumber::Text(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        None => None,
    };
    Ok(parsed.filter(|f| f.is_finite()))
}

/// Same as [`de_opt_f64`] but for integer identifiers; fractional values are rejected.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?.and_then(|f| {
        if f.fract() == 0.0 && f.abs() < 9.0e15 {
            Some(f as i64)
        } else {
            None
        }
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyScalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

/// Accepts a string or a number and keeps it as text (dates, periods, quarters).
pub(crate) fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<AnyScalar>::deserialize(deserializer)? {
        Some(AnyScalar::Text(s)) => Some(s),
        Some(AnyScalar::Number(n)) => Some(n.to_string()),
        Some(AnyScalar::Bool(b)) => Some(b.to_string()),
        None => None,
    })
}

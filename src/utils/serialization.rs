// Canonical JSON encoding used for content addressing
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Serialize named fields as a compact JSON object with keys sorted by name.
///
/// Two field sets with the same names and values always produce the same
/// bytes, whatever order the fields were supplied in.
pub fn canonical_json<'a, I>(fields: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, Value)>,
{
    let sorted: BTreeMap<&str, Value> = fields.into_iter().collect();
    Ok(serde_json::to_vec(&sorted)?)
}

/// Pretty JSON for display purposes
pub fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

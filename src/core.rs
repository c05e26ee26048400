//! Core traits and types for record comparison.
//!
//! This module defines:
//! - [`FieldValue`]: The tagged value read out of a record field (number or text).
//! - [`FieldAccessor`]: The trait records implement so they can be sorted and searched.
//! - [`compare_field`]: The shared comparator used by both sort and search.
//! - [`Probe`]: Synthetic single-field record used as the search target.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A single field value, either numeric or textual.
///
/// Numbers compare arithmetically against numbers. Any other pairing
/// (including a missing field) falls back to case-folded text comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(Cow<'a, str>),
}

impl<'a> FieldValue<'a> {
    /// Creates a text value borrowing from `text`.
    pub fn text(text: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(text))
    }

    /// Reborrows the value without copying any owned text.
    pub fn as_borrowed(&self) -> FieldValue<'_> {
        match self {
            FieldValue::Number(n) => FieldValue::Number(*n),
            FieldValue::Text(s) => FieldValue::Text(Cow::Borrowed(s.as_ref())),
        }
    }

    /// Detaches the value from any borrowed storage.
    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            FieldValue::Number(n) => FieldValue::Number(n),
            FieldValue::Text(s) => FieldValue::Text(Cow::Owned(s.into_owned())),
        }
    }

    /// Returns the numeric payload, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => f.write_str(&render_number(*n)),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue<'_> {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

/// A trait for reading one named field out of a record without copying it.
///
/// Returning `None` marks the field as missing or null; the comparator treats
/// that as empty text and never fails on it.
///
/// # Examples
///
/// ```
/// use shelfsort::core::{FieldAccessor, FieldValue};
///
/// struct Crate {
///     label: String,
///     weight: f64,
/// }
///
/// impl FieldAccessor for Crate {
///     fn field(&self, key: &str) -> Option<FieldValue<'_>> {
///         match key {
///             "label" => Some(FieldValue::text(&self.label)),
///             "weight" => Some(FieldValue::Number(self.weight)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait FieldAccessor {
    /// Returns the value stored under `key`, or `None` when it is absent.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for &T {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }
}

/// Sort direction relative to the comparator's ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares two records on the field named `key`.
///
/// 1. **Numeric path**: both values are numbers, compared exactly (no epsilon).
///    A NaN on either side compares `Equal`.
/// 2. **Text path**: anything else. Both sides are rendered as text, lower-cased
///    character by character and compared by code point, without allocating.
///    A missing field reads as `""`; a number reads as its [`Display`](fmt::Display)
///    form (`5`, `2.5`, `1e+21`, `NaN`).
///
/// The result is a total order as long as every record holds the same kind of
/// value under `key` (and no NaN).
///
/// # Examples
///
/// ```
/// use shelfsort::core::{compare_field, Record};
/// use std::cmp::Ordering;
///
/// let a = Record::new().with("name", "apple");
/// let b = Record::new().with("name", "Banana");
/// assert_eq!(compare_field(&a, &b, "name"), Ordering::Less);
///
/// let c = Record::new().with("price", 10.0);
/// let d = Record::new().with("price", 9.5);
/// assert_eq!(compare_field(&c, &d, "price"), Ordering::Greater);
/// ```
pub fn compare_field<A, B>(a: &A, b: &B, key: &str) -> Ordering
where
    A: FieldAccessor + ?Sized,
    B: FieldAccessor + ?Sized,
{
    compare_values(a.field(key).as_ref(), b.field(key).as_ref())
}

/// Compares two already-extracted field values. See [`compare_field`].
pub fn compare_values(a: Option<&FieldValue<'_>>, b: Option<&FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        _ => compare_folded(&text_of(a), &text_of(b)),
    }
}

/// Case-insensitive code point comparison.
///
/// Folding is per character, so it matches `str::to_lowercase` everywhere
/// except the word-final form of Greek capital sigma.
fn compare_folded(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn text_of<'v>(value: Option<&'v FieldValue<'_>>) -> Cow<'v, str> {
    match value {
        None => Cow::Borrowed(""),
        Some(FieldValue::Text(s)) => Cow::Borrowed(s.as_ref()),
        Some(FieldValue::Number(n)) => Cow::Owned(render_number(*n)),
    }
}

/// Renders a number as text: plain decimal in `[1e-6, 1e21)`, exponent form
/// with a signed power outside it, `NaN` / `Infinity` spelled out and no
/// negative zero.
fn render_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exponent = format!("{n:e}");
    match exponent.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exponent,
    }
}

/// Synthetic single-field record, used to reuse the comparator during search.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe<'k, 'v> {
    key: &'k str,
    value: FieldValue<'v>,
}

impl<'k, 'v> Probe<'k, 'v> {
    pub fn new(key: &'k str, value: FieldValue<'v>) -> Self {
        Self { key, value }
    }
}

impl FieldAccessor for Probe<'_, '_> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (key == self.key).then(|| self.value.as_borrowed())
    }
}

/// A loosely-typed record: an ordered map from field name to value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue<'static>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<'a>(mut self, key: &str, value: impl Into<FieldValue<'a>>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<'a>(&mut self, key: &str, value: impl Into<FieldValue<'a>>) {
        let value: FieldValue<'a> = value.into();
        self.fields.insert(key.to_string(), value.into_owned());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue<'static>> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldAccessor for Record {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.fields.get(key).map(FieldValue::as_borrowed)
    }
}

// JSON documents: only objects carry fields. Null reads as missing, booleans
// and nested structures fall back to their JSON text.
impl FieldAccessor for Value {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match self.as_object()?.get(key)? {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => Some(FieldValue::text(s)),
            Value::Bool(b) => Some(FieldValue::Text(Cow::Borrowed(if *b {
                "true"
            } else {
                "false"
            }))),
            other => Some(FieldValue::Text(Cow::Owned(other.to_string()))),
        }
    }
}

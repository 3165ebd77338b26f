//! # Envelope Codec
//!
//! The tagged, versioned key/value container every value travels in.
//!
//! ## Wire Shape
//!
//! ```text
//! Envelope {
//!     class:   "SkuDetailsParams",     // checked on every typed decode
//!     version: 1,                      // stamped, never validated
//!     fields:  { name -> FieldValue }  // one kind per field
//! }
//! ```
//!
//! Nested structures recurse through [`FieldValue::Envelope`] and
//! [`FieldValue::EnvelopeList`]. Lists keep their order exactly; nothing in
//! this module reorders or deduplicates.

use crate::errors::CodecError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Current protocol version, stamped on every envelope.
///
/// Decoders do not check it. Peers on different versions will decode each
/// other's envelopes as long as the tags and field kinds line up.
pub const PROTOCOL_VERSION: u32 = 1;

/// Opaque reference to a callback exported by some transport.
///
/// The token itself carries no capability; only the [`HandleTransport`]
/// that issued it can turn it back into something callable.
///
/// [`HandleTransport`]: crate::transport::HandleTransport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleToken(Uuid);

impl HandleToken {
    /// Issue a fresh, unique token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing identifier.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HandleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a [`FieldValue`], used in decode errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Str,
    Int,
    StrList,
    Envelope,
    EnvelopeList,
    Handle,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Str => "string",
            FieldKind::Int => "integer",
            FieldKind::StrList => "string list",
            FieldKind::Envelope => "envelope",
            FieldKind::EnvelopeList => "envelope list",
            FieldKind::Handle => "handle",
        };
        f.write_str(name)
    }
}

/// A single envelope field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A string leaf. `None` is an explicit null.
    Str(Option<String>),
    /// A 32-bit integer leaf.
    Int(i32),
    /// An ordered list of strings.
    StrList(Vec<String>),
    /// A single nested envelope.
    Envelope(Box<Envelope>),
    /// An ordered, homogeneous list of nested envelopes.
    EnvelopeList(Vec<Envelope>),
    /// An opaque remote callback reference.
    Handle(HandleToken),
}

impl FieldValue {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::StrList(_) => FieldKind::StrList,
            FieldValue::Envelope(_) => FieldKind::Envelope,
            FieldValue::EnvelopeList(_) => FieldKind::EnvelopeList,
            FieldValue::Handle(_) => FieldKind::Handle,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(Some(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(Some(value.to_string()))
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        FieldValue::Str(value)
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        FieldValue::Str(value.map(str::to_string))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::StrList(value)
    }
}

impl From<Envelope> for FieldValue {
    fn from(value: Envelope) -> Self {
        FieldValue::Envelope(Box::new(value))
    }
}

impl From<Vec<Envelope>> for FieldValue {
    fn from(value: Vec<Envelope>) -> Self {
        FieldValue::EnvelopeList(value)
    }
}

impl From<HandleToken> for FieldValue {
    fn from(value: HandleToken) -> Self {
        FieldValue::Handle(value)
    }
}

/// A tagged, versioned key/value container.
///
/// Envelopes are plain values: build one with [`make_envelope`], hand it to
/// the transport, and decode it once on the other side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    class: String,
    version: u32,
    fields: BTreeMap<String, FieldValue>,
}

impl Envelope {
    /// Create an empty envelope stamped with `class_tag` and
    /// [`PROTOCOL_VERSION`].
    #[must_use]
    pub fn new(class_tag: impl Into<String>) -> Self {
        Self {
            class: class_tag.into(),
            version: PROTOCOL_VERSION,
            fields: BTreeMap::new(),
        }
    }

    /// The class tag stamped at construction.
    #[must_use]
    pub fn class_tag(&self) -> &str {
        &self.class
    }

    /// The protocol version stamped at construction.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of payload fields (the class and version headers excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over the payload field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Assign a field, replacing any previous value under the same name.
    pub fn put(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Raw access to a field, whatever its kind.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Fail with [`CodecError::FormatMismatch`] unless the tag matches.
    pub fn check(&self, expected_tag: &str) -> Result<(), CodecError> {
        check_envelope(self, expected_tag)
    }

    /// Required, non-null string.
    pub fn get_str(&self, field: &str) -> Result<&str, CodecError> {
        match self.require(field)? {
            FieldValue::Str(Some(value)) => Ok(value),
            FieldValue::Str(None) => Err(CodecError::missing(field)),
            other => Err(wrong_kind(field, FieldKind::Str, other)),
        }
    }

    /// Nullable string: absent fields and explicit nulls both read as `None`.
    pub fn get_optional_str(&self, field: &str) -> Result<Option<&str>, CodecError> {
        match self.fields.get(field) {
            None | Some(FieldValue::Str(None)) => Ok(None),
            Some(FieldValue::Str(Some(value))) => Ok(Some(value)),
            Some(other) => Err(wrong_kind(field, FieldKind::Str, other)),
        }
    }

    pub fn get_int(&self, field: &str) -> Result<i32, CodecError> {
        match self.require(field)? {
            FieldValue::Int(value) => Ok(*value),
            other => Err(wrong_kind(field, FieldKind::Int, other)),
        }
    }

    pub fn get_str_list(&self, field: &str) -> Result<&[String], CodecError> {
        match self.require(field)? {
            FieldValue::StrList(values) => Ok(values),
            other => Err(wrong_kind(field, FieldKind::StrList, other)),
        }
    }

    /// Nullable string list: an absent field reads as `None`.
    pub fn get_optional_str_list(&self, field: &str) -> Result<Option<&[String]>, CodecError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(FieldValue::StrList(values)) => Ok(Some(values)),
            Some(other) => Err(wrong_kind(field, FieldKind::StrList, other)),
        }
    }

    pub fn get_envelope(&self, field: &str) -> Result<&Envelope, CodecError> {
        match self.require(field)? {
            FieldValue::Envelope(nested) => Ok(nested),
            other => Err(wrong_kind(field, FieldKind::Envelope, other)),
        }
    }

    pub fn get_envelope_list(&self, field: &str) -> Result<&[Envelope], CodecError> {
        match self.require(field)? {
            FieldValue::EnvelopeList(nested) => Ok(nested),
            other => Err(wrong_kind(field, FieldKind::EnvelopeList, other)),
        }
    }

    pub fn get_handle(&self, field: &str) -> Result<HandleToken, CodecError> {
        match self.require(field)? {
            FieldValue::Handle(token) => Ok(*token),
            other => Err(wrong_kind(field, FieldKind::Handle, other)),
        }
    }

    fn require(&self, field: &str) -> Result<&FieldValue, CodecError> {
        self.fields
            .get(field)
            .ok_or_else(|| CodecError::missing(field))
    }
}

fn wrong_kind(field: &str, expected: FieldKind, found: &FieldValue) -> CodecError {
    CodecError::WrongFieldKind {
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Create an envelope with the given class tag and the current protocol
/// version, then let `populate` assign its fields.
pub fn make_envelope<F>(class_tag: &str, populate: F) -> Envelope
where
    F: FnOnce(&mut Envelope),
{
    let mut envelope = Envelope::new(class_tag);
    populate(&mut envelope);
    envelope
}

/// Check that `envelope` carries `expected_tag`.
///
/// Must be the first step of every typed decode. The version header is not
/// inspected.
pub fn check_envelope(envelope: &Envelope, expected_tag: &str) -> Result<(), CodecError> {
    if envelope.class != expected_tag {
        return Err(CodecError::FormatMismatch {
            expected: expected_tag.to_string(),
            found: envelope.class.clone(),
        });
    }
    Ok(())
}

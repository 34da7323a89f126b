//! Explicit schema metadata tables.
//!
//! Every resource shape is described once as a [`Schema`]: an ordered list of
//! [`FieldDef`]s whose [`FieldKind`] is either a scalar, a singular nested
//! schema, or a list of a nested schema. Schemas are built at first use and live
//! for the rest of the process, so nested references are `&'static Schema`.

use crate::record::Record;
use crate::value::{Value, ValueKind};
use std::fmt;
use std::str::FromStr;

/// Value transformation attached to a field (render hint) or to a schema root
/// (default encoder for a runtime value kind).
pub type Transform = fn(&Value) -> Value;

/// Named alternate display transformation a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderHint {
    /// Console table / card rendering
    Table,
}

impl FromStr for RenderHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(RenderHint::Table),
            _ => Err(format!("Unknown render hint: {}", s)),
        }
    }
}

impl fmt::Display for RenderHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderHint::Table => write!(f, "table"),
        }
    }
}

/// Closed set of string values accepted by an enum-typed field.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDef {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

impl EnumDef {
    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(&value)
    }

    /// Message for a value outside the enum, listing every accepted member.
    pub fn invalid_message(&self, value: &str) -> String {
        let members: Vec<String> = self.members.iter().map(|m| format!("'{}'", m)).collect();
        format!(
            "'{}' is not a valid {}. Expected one of [{}]",
            value,
            self.name,
            members.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Enum(&'static EnumDef),
    StringList,
    IntegerList,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Scalar(ScalarType),
    /// Singular nested schema; flattened into dotted paths
    Nested(&'static Schema),
    /// Repeated nested schema; always kept as one opaque path
    NestedList(&'static Schema),
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
    pub description: Option<&'static str>,
    pub example: Option<&'static str>,
    hints: Vec<(RenderHint, Transform)>,
}

impl FieldDef {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            alias: None,
            kind,
            required: false,
            max_length: None,
            description: None,
            example: None,
            hints: Vec::new(),
        }
    }

    pub fn scalar(name: &'static str, ty: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(ty))
    }

    pub fn string(name: &'static str) -> Self {
        Self::scalar(name, ScalarType::String)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::scalar(name, ScalarType::Integer)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::scalar(name, ScalarType::Boolean)
    }

    pub fn datetime(name: &'static str) -> Self {
        Self::scalar(name, ScalarType::DateTime)
    }

    pub fn enumeration(name: &'static str, def: &'static EnumDef) -> Self {
        Self::scalar(name, ScalarType::Enum(def))
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::scalar(name, ScalarType::StringList)
    }

    pub fn nested(name: &'static str, schema: &'static Schema) -> Self {
        Self::new(name, FieldKind::Nested(schema))
    }

    pub fn nested_list(name: &'static str, schema: &'static Schema) -> Self {
        Self::new(name, FieldKind::NestedList(schema))
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn example(mut self, example: &'static str) -> Self {
        self.example = Some(example);
        self
    }

    pub fn hint(mut self, hint: RenderHint, transform: Transform) -> Self {
        self.hints.push((hint, transform));
        self
    }

    /// Transformation registered for `hint`, if the field declares one.
    pub fn render_with(&self, hint: RenderHint) -> Option<Transform> {
        self.hints
            .iter()
            .find(|(h, _)| *h == hint)
            .map(|(_, transform)| *transform)
    }

    /// Key this field is published under by the API.
    pub fn key(&self, by_alias: bool) -> &'static str {
        match (by_alias, self.alias) {
            (true, Some(alias)) => alias,
            _ => self.name,
        }
    }

    pub fn matches_key(&self, key: &str) -> bool {
        self.name == key || self.alias == Some(key)
    }
}

#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldDef>,
    encoders: Vec<(ValueKind, Transform)>,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            name,
            fields,
            encoders: Vec::new(),
        }
    }

    /// Register the default encoder used for values of `kind` when formatting
    /// records rooted at this schema.
    pub fn with_encoder(mut self, kind: ValueKind, encoder: Transform) -> Self {
        self.encoders.push((kind, encoder));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position and definition of the field with canonical name `name`.
    pub fn lookup(&self, name: &str) -> Option<(usize, &FieldDef)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }

    pub fn encoder_for(&self, kind: ValueKind) -> Option<Transform> {
        self.encoders
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, encoder)| *encoder)
    }

    /// Canonical all-absent instance of this schema. Stands in for a missing
    /// optional sub-record so field metadata below it can still be resolved.
    pub fn placeholder(&'static self) -> Record {
        Record::empty(self)
    }
}

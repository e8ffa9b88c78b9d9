use indexmap::IndexMap;
use serde::Deserialize;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    /// Anything else a hand-maintained spec may carry (`file`, typos, ...).
    #[serde(other)]
    Unknown,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The first non-null type, which is the one parameters are typed by.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
        }
    }
}

/// A dereferenced JSON Schema object, reduced to what operation
/// normalization reads.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,

    pub description: Option<String>,

    pub properties: IndexMap<String, Schema>,

    pub required: Vec<String>,

    #[serde(rename = "allOf")]
    pub all_of: Vec<Schema>,
}

impl Schema {
    /// Own properties followed by those contributed through `allOf`, in
    /// declaration order. Later declarations of a name do not replace earlier ones.
    pub fn collect_properties(&self) -> IndexMap<String, Schema> {
        let mut props = self.properties.clone();
        for part in &self.all_of {
            for (name, schema) in part.collect_properties() {
                props.entry(name).or_insert(schema);
            }
        }
        props
    }

    /// Required property names, including those declared inside `allOf` members.
    pub fn collect_required(&self) -> Vec<String> {
        let mut required = self.required.clone();
        for part in &self.all_of {
            for name in part.collect_required() {
                if !required.contains(&name) {
                    required.push(name);
                }
            }
        }
        required
    }
}

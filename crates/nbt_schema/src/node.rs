//! Schema nodes describing the expected shape of a tag tree

use bon::Builder;
use derive_more::Display;
use nbt_tag::{TagCompound, TagList, TagNode, TagType};
use tracing::warn;

use crate::error::{Error, Result};

bitflags::bitflags! {
    /// Flags changing how a missing tag is treated
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SchemaOptions: u8 {
        /// The tag may be absent
        const OPTIONAL = 1 << 0;
        /// A missing tag is created from the schema default when repairing
        const CREATE_ON_MISSING = 1 << 1;
    }
}

impl Default for SchemaOptions {
    fn default() -> Self {
        SchemaOptions::empty()
    }
}

/// One node of a schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Scalar(SchemaScalar),
    String(SchemaString),
    Array(SchemaArray),
    List(SchemaList),
    Compound(SchemaCompound),
}

/// A single numeric value of an exact type
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SchemaScalar {
    #[builder(into)]
    pub name: String,

    pub tag_type: TagType,

    #[builder(default)]
    pub options: SchemaOptions,
}

/// A string, optionally fixed to one value or bounded in length
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SchemaString {
    #[builder(into)]
    pub name: String,

    #[builder(default)]
    pub options: SchemaOptions,

    /// The only accepted value
    #[builder(into)]
    pub value: Option<String>,

    /// Longest accepted value, in characters
    pub max_length: Option<usize>,
}

/// Element type of an array schema
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    #[display("bytes")]
    Bytes,
    #[display("ints")]
    Ints,
}

impl ArrayKind {
    pub fn tag_type(self) -> TagType {
        match self {
            ArrayKind::Bytes => TagType::ByteArray,
            ArrayKind::Ints => TagType::IntArray,
        }
    }
}

/// A byte or int array, optionally of an exact length
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SchemaArray {
    #[builder(into)]
    pub name: String,

    pub kind: ArrayKind,

    #[builder(default)]
    pub options: SchemaOptions,

    /// Exact number of elements
    pub length: Option<usize>,
}

/// A list of one element type
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SchemaList {
    #[builder(into)]
    pub name: String,

    pub element_type: TagType,

    #[builder(default)]
    pub options: SchemaOptions,

    /// Exact number of elements
    pub length: Option<usize>,

    /// Schema every element must match
    #[builder(into)]
    pub subschema: Option<Box<SchemaNode>>,
}

/// A compound with named children
///
/// Children keep their declaration order, which is also the order of a default tree.
#[derive(Debug, Clone, PartialEq, Default, Builder)]
pub struct SchemaCompound {
    #[builder(into, default)]
    pub name: String,

    #[builder(default)]
    pub options: SchemaOptions,

    #[builder(default)]
    children: Vec<SchemaNode>,
}

impl SchemaNode {
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Scalar(s) => &s.name,
            SchemaNode::String(s) => &s.name,
            SchemaNode::Array(s) => &s.name,
            SchemaNode::List(s) => &s.name,
            SchemaNode::Compound(s) => &s.name,
        }
    }

    pub fn options(&self) -> SchemaOptions {
        match self {
            SchemaNode::Scalar(s) => s.options,
            SchemaNode::String(s) => s.options,
            SchemaNode::Array(s) => s.options,
            SchemaNode::List(s) => s.options,
            SchemaNode::Compound(s) => s.options,
        }
    }

    /// The tag type a matching node has
    pub fn tag_type(&self) -> TagType {
        match self {
            SchemaNode::Scalar(s) => s.tag_type,
            SchemaNode::String(_) => TagType::String,
            SchemaNode::Array(s) => s.kind.tag_type(),
            SchemaNode::List(_) => TagType::List,
            SchemaNode::Compound(_) => TagType::Compound,
        }
    }

    /// Build the smallest tree that matches this schema.
    ///
    /// Scalars are zero, strings hold the fixed value or nothing, arrays and lists hold
    /// `length` default elements, and compounds hold the default of every child.
    pub fn build_default_tree(&self) -> TagNode {
        match self {
            SchemaNode::Scalar(s) => TagNode::default_of(s.tag_type),
            SchemaNode::String(s) => TagNode::String(s.value.clone().unwrap_or_default()),
            SchemaNode::Array(s) => {
                let len = s.length.unwrap_or(0);
                match s.kind {
                    ArrayKind::Bytes => TagNode::ByteArray(vec![0; len]),
                    ArrayKind::Ints => TagNode::IntArray(vec![0; len]),
                }
            }
            SchemaNode::List(s) => TagNode::List(s.build_default_list()),
            SchemaNode::Compound(s) => TagNode::Compound(s.build_default_compound()),
        }
    }
}

impl SchemaList {
    fn build_default_list(&self) -> TagList {
        let len = match self.element_type {
            // a list of end tags can not be written
            TagType::End => 0,
            _ => self.length.unwrap_or(0),
        };

        let item = match &self.subschema {
            Some(sub) => sub.build_default_tree(),
            None => TagNode::default_of(self.element_type),
        };

        if item.tag_type() != self.element_type {
            warn!(
                name = %self.name,
                expected = %self.element_type,
                found = %item.tag_type(),
                "subschema default does not match the list element type, leaving the list empty"
            );
            return TagList::new(self.element_type);
        }

        TagList::with_items(self.element_type, vec![item; len])
            .unwrap_or_else(|_| TagList::new(self.element_type))
    }
}

impl SchemaCompound {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a child, replacing any child with the same name in place
    pub fn with(mut self, child: impl Into<SchemaNode>) -> Self {
        let child = child.into();
        match self.children.iter_mut().find(|c| c.name() == child.name()) {
            Some(existing) => *existing = child,
            None => self.children.push(child),
        }
        self
    }

    /// Add a child, failing with [`Error::DuplicateChild`] if the name is taken
    pub fn add(&mut self, child: impl Into<SchemaNode>) -> Result<()> {
        let child = child.into();
        if self.get(child.name()).is_some() {
            return Err(Error::DuplicateChild(child.name().to_owned()));
        }

        self.children.push(child);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|c| c.name() == name)
    }

    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaNode> {
        self.children.iter()
    }

    /// Combine with `overlay` into a new schema.
    ///
    /// Children of `overlay` replace same named children of `self` at their position.
    /// The remaining children of `overlay` follow, in their own order. Name and options
    /// are taken from `self`.
    pub fn merge_into(&self, overlay: &SchemaCompound) -> SchemaCompound {
        let mut children: Vec<SchemaNode> = self
            .children
            .iter()
            .map(|c| overlay.get(c.name()).unwrap_or(c).clone())
            .collect();

        children.extend(
            overlay
                .children
                .iter()
                .filter(|c| self.get(c.name()).is_none())
                .cloned(),
        );

        SchemaCompound {
            name: self.name.clone(),
            options: self.options,
            children,
        }
    }

    fn build_default_compound(&self) -> TagCompound {
        self.children
            .iter()
            .map(|c| (c.name().to_owned(), c.build_default_tree()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SchemaCompound {
    type Item = &'a SchemaNode;
    type IntoIter = std::slice::Iter<'a, SchemaNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl From<SchemaScalar> for SchemaNode {
    fn from(value: SchemaScalar) -> Self {
        SchemaNode::Scalar(value)
    }
}

impl From<SchemaString> for SchemaNode {
    fn from(value: SchemaString) -> Self {
        SchemaNode::String(value)
    }
}

impl From<SchemaArray> for SchemaNode {
    fn from(value: SchemaArray) -> Self {
        SchemaNode::Array(value)
    }
}

impl From<SchemaList> for SchemaNode {
    fn from(value: SchemaList) -> Self {
        SchemaNode::List(value)
    }
}

impl From<SchemaCompound> for SchemaNode {
    fn from(value: SchemaCompound) -> Self {
        SchemaNode::Compound(value)
    }
}

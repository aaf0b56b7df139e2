//! JSON rendering of tag trees
//!
//! Nodes serialize to their natural JSON shape: numbers, strings, arrays for lists and
//! both array types, and objects for compounds. Types are not preserved, so the output
//! is meant for reading and diffing rather than for loading back.

use ::serde::ser::{SerializeMap, SerializeSeq};
use ::serde::{Serialize, Serializer};

use crate::compound::TagCompound;
use crate::error::Result;
use crate::list::TagList;
use crate::tag::TagNode;
use crate::tree::NbtTree;

impl Serialize for TagNode {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TagNode::End => serializer.serialize_unit(),
            TagNode::Byte(v) => serializer.serialize_i8(*v),
            TagNode::Short(v) => serializer.serialize_i16(*v),
            TagNode::Int(v) => serializer.serialize_i32(*v),
            TagNode::Long(v) => serializer.serialize_i64(*v),
            TagNode::Float(v) => serializer.serialize_f32(*v),
            TagNode::Double(v) => serializer.serialize_f64(*v),
            TagNode::ByteArray(v) => serializer.collect_seq(v),
            TagNode::String(v) => serializer.serialize_str(v),
            TagNode::List(v) => v.serialize(serializer),
            TagNode::Compound(v) => v.serialize(serializer),
            TagNode::IntArray(v) => serializer.collect_seq(v),
        }
    }
}

impl Serialize for TagList {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for node in self {
            seq.serialize_element(node)?;
        }
        seq.end()
    }
}

impl Serialize for TagCompound {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for NbtTree {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}

/// Render a node as compact JSON
pub fn to_json_string(node: &TagNode) -> Result<String> {
    Ok(serde_json::to_string(node)?)
}

/// Render a node as indented JSON
pub fn to_json_string_pretty(node: &TagNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_str_eq;

    use crate::compound::TagCompound;
    use crate::error::Result;
    use crate::list::TagList;
    use crate::serde::to_json_string;
    use crate::tag::TagNode;
    use crate::types::TagType;

    #[test]
    fn compound_to_json() -> Result<()> {
        let mut pos = TagList::new(TagType::Double);
        pos.push(1.5f64)?;
        pos.push(-2.0f64)?;

        let mut compound = TagCompound::new();
        compound.insert("id", "minecraft:pig");
        compound.insert("Pos", pos);
        compound.insert("Data", TagNode::ByteArray(vec![0, 255]));
        compound.insert("Age", TagNode::Short(-3));

        let json = to_json_string(&TagNode::Compound(compound))?;

        assert_str_eq!(
            json,
            r#"{"id":"minecraft:pig","Pos":[1.5,-2.0],"Data":[0,255],"Age":-3}"#
        );

        Ok(())
    }
}

//! The tag tree value type

use std::fmt;

use crate::compound::TagCompound;
use crate::error::{Error, Result};
use crate::list::TagList;
use crate::types::TagType;

/// A single node of an NBT tree
///
/// Compounds and lists own their children, so cloning a node is a deep copy of the
/// whole subtree.
///
/// ```
/// use nbt_tag::{TagCompound, TagNode, TagType};
///
/// let mut compound = TagCompound::new();
/// compound.insert("hp", TagNode::Short(20));
///
/// let node = TagNode::from(compound);
/// let hp = node.to_compound()?.try_get("hp")?;
///
/// assert_eq!(hp.tag_type(), TagType::Short);
/// assert_eq!(hp.to_int()?, 20);
/// assert!(hp.to_byte().is_err());
/// # Ok::<(), nbt_tag::error::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TagNode {
    /// Sentinel with no payload
    #[default]
    End,
    /// Signed 8 bit integer
    Byte(i8),
    /// Signed 16 bit integer
    Short(i16),
    /// Signed 32 bit integer
    Int(i32),
    /// Signed 64 bit integer
    Long(i64),
    /// 32 bit float
    Float(f32),
    /// 64 bit float
    Double(f64),
    /// Raw bytes
    ByteArray(Vec<u8>),
    /// Text
    String(String),
    /// Homogeneous list of unnamed nodes
    List(TagList),
    /// Named child nodes
    Compound(TagCompound),
    /// 32 bit integers
    IntArray(Vec<i32>),
}

/// A mutable view into the payload of a [`TagNode`]
///
/// The view can change the value held by a node but never its type, which is what
/// [`TagList`] hands out so that its elements stay homogeneous.
#[derive(Debug)]
pub enum TagValueMut<'a> {
    /// Sentinel with no payload
    End,
    /// Signed 8 bit integer
    Byte(&'a mut i8),
    /// Signed 16 bit integer
    Short(&'a mut i16),
    /// Signed 32 bit integer
    Int(&'a mut i32),
    /// Signed 64 bit integer
    Long(&'a mut i64),
    /// 32 bit float
    Float(&'a mut f32),
    /// 64 bit float
    Double(&'a mut f64),
    /// Raw bytes
    ByteArray(&'a mut Vec<u8>),
    /// Text
    String(&'a mut String),
    /// Homogeneous list of unnamed nodes
    List(&'a mut TagList),
    /// Named child nodes
    Compound(&'a mut TagCompound),
    /// 32 bit integers
    IntArray(&'a mut Vec<i32>),
}

impl TagNode {
    /// The type discriminant of this node
    pub fn tag_type(&self) -> TagType {
        match self {
            TagNode::End => TagType::End,
            TagNode::Byte(_) => TagType::Byte,
            TagNode::Short(_) => TagType::Short,
            TagNode::Int(_) => TagType::Int,
            TagNode::Long(_) => TagType::Long,
            TagNode::Float(_) => TagType::Float,
            TagNode::Double(_) => TagType::Double,
            TagNode::ByteArray(_) => TagType::ByteArray,
            TagNode::String(_) => TagType::String,
            TagNode::List(_) => TagType::List,
            TagNode::Compound(_) => TagType::Compound,
            TagNode::IntArray(_) => TagType::IntArray,
        }
    }

    /// A zero valued node of the given type.
    ///
    /// Lists are created empty with a value type of [`TagType::End`].
    pub fn default_of(tag_type: TagType) -> TagNode {
        match tag_type {
            TagType::End => TagNode::End,
            TagType::Byte => TagNode::Byte(0),
            TagType::Short => TagNode::Short(0),
            TagType::Int => TagNode::Int(0),
            TagType::Long => TagNode::Long(0),
            TagType::Float => TagNode::Float(0.0),
            TagType::Double => TagNode::Double(0.0),
            TagType::ByteArray => TagNode::ByteArray(Vec::new()),
            TagType::String => TagNode::String(String::new()),
            TagType::List => TagNode::List(TagList::new(TagType::End)),
            TagType::Compound => TagNode::Compound(TagCompound::new()),
            TagType::IntArray => TagNode::IntArray(Vec::new()),
        }
    }

    /// Whether the matching `to_*` conversion for `tag_type` would succeed
    pub fn is_castable_to(&self, tag_type: TagType) -> bool {
        self.tag_type().widens_to(tag_type)
    }

    /// A mutable view of the payload that can not change the node's type
    pub fn value_mut(&mut self) -> TagValueMut<'_> {
        match self {
            TagNode::End => TagValueMut::End,
            TagNode::Byte(v) => TagValueMut::Byte(v),
            TagNode::Short(v) => TagValueMut::Short(v),
            TagNode::Int(v) => TagValueMut::Int(v),
            TagNode::Long(v) => TagValueMut::Long(v),
            TagNode::Float(v) => TagValueMut::Float(v),
            TagNode::Double(v) => TagValueMut::Double(v),
            TagNode::ByteArray(v) => TagValueMut::ByteArray(v),
            TagNode::String(v) => TagValueMut::String(v),
            TagNode::List(v) => TagValueMut::List(v),
            TagNode::Compound(v) => TagValueMut::Compound(v),
            TagNode::IntArray(v) => TagValueMut::IntArray(v),
        }
    }

    fn invalid_cast(&self, to: TagType) -> Error {
        Error::InvalidCast {
            from: self.tag_type(),
            to,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            TagNode::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            TagNode::Byte(v) => Some(i16::from(*v)),
            TagNode::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            TagNode::Byte(v) => Some(i32::from(*v)),
            TagNode::Short(v) => Some(i32::from(*v)),
            TagNode::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            TagNode::Byte(v) => Some(i64::from(*v)),
            TagNode::Short(v) => Some(i64::from(*v)),
            TagNode::Int(v) => Some(i64::from(*v)),
            TagNode::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            TagNode::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            TagNode::Float(v) => Some(f64::from(*v)),
            TagNode::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagNode::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            TagNode::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            TagNode::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TagList> {
        match self {
            TagNode::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut TagList> {
        match self {
            TagNode::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&TagCompound> {
        match self {
            TagNode::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut TagCompound> {
        match self {
            TagNode::Compound(v) => Some(v),
            _ => None,
        }
    }

    /// View the node as a byte, failing with [`Error::InvalidCast`] otherwise
    pub fn to_byte(&self) -> Result<i8> {
        self.as_byte()
            .ok_or_else(|| self.invalid_cast(TagType::Byte))
    }

    /// View the node as a short, widening a byte
    pub fn to_short(&self) -> Result<i16> {
        self.as_short()
            .ok_or_else(|| self.invalid_cast(TagType::Short))
    }

    /// View the node as an int, widening a byte or short
    pub fn to_int(&self) -> Result<i32> {
        self.as_int().ok_or_else(|| self.invalid_cast(TagType::Int))
    }

    /// View the node as a long, widening any narrower integer
    pub fn to_long(&self) -> Result<i64> {
        self.as_long()
            .ok_or_else(|| self.invalid_cast(TagType::Long))
    }

    pub fn to_float(&self) -> Result<f32> {
        self.as_float()
            .ok_or_else(|| self.invalid_cast(TagType::Float))
    }

    /// View the node as a double, widening a float
    pub fn to_double(&self) -> Result<f64> {
        self.as_double()
            .ok_or_else(|| self.invalid_cast(TagType::Double))
    }

    pub fn to_str(&self) -> Result<&str> {
        self.as_str()
            .ok_or_else(|| self.invalid_cast(TagType::String))
    }

    pub fn to_byte_array(&self) -> Result<&[u8]> {
        self.as_byte_array()
            .ok_or_else(|| self.invalid_cast(TagType::ByteArray))
    }

    pub fn to_int_array(&self) -> Result<&[i32]> {
        self.as_int_array()
            .ok_or_else(|| self.invalid_cast(TagType::IntArray))
    }

    pub fn to_list(&self) -> Result<&TagList> {
        self.as_list()
            .ok_or_else(|| self.invalid_cast(TagType::List))
    }

    pub fn to_list_mut(&mut self) -> Result<&mut TagList> {
        let from = self.tag_type();
        self.as_list_mut().ok_or(Error::InvalidCast {
            from,
            to: TagType::List,
        })
    }

    pub fn to_compound(&self) -> Result<&TagCompound> {
        self.as_compound()
            .ok_or_else(|| self.invalid_cast(TagType::Compound))
    }

    pub fn to_compound_mut(&mut self) -> Result<&mut TagCompound> {
        let from = self.tag_type();
        self.as_compound_mut().ok_or(Error::InvalidCast {
            from,
            to: TagType::Compound,
        })
    }
}

impl<'a> TagValueMut<'a> {
    /// The type discriminant of the viewed node
    pub fn tag_type(&self) -> TagType {
        match self {
            TagValueMut::End => TagType::End,
            TagValueMut::Byte(_) => TagType::Byte,
            TagValueMut::Short(_) => TagType::Short,
            TagValueMut::Int(_) => TagType::Int,
            TagValueMut::Long(_) => TagType::Long,
            TagValueMut::Float(_) => TagType::Float,
            TagValueMut::Double(_) => TagType::Double,
            TagValueMut::ByteArray(_) => TagType::ByteArray,
            TagValueMut::String(_) => TagType::String,
            TagValueMut::List(_) => TagType::List,
            TagValueMut::Compound(_) => TagType::Compound,
            TagValueMut::IntArray(_) => TagType::IntArray,
        }
    }

    pub fn into_list(self) -> Option<&'a mut TagList> {
        match self {
            TagValueMut::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_compound(self) -> Option<&'a mut TagCompound> {
        match self {
            TagValueMut::Compound(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for TagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagNode::End => Ok(()),
            TagNode::Byte(v) => write!(f, "{v}"),
            TagNode::Short(v) => write!(f, "{v}"),
            TagNode::Int(v) => write!(f, "{v}"),
            TagNode::Long(v) => write!(f, "{v}"),
            TagNode::Float(v) => write!(f, "{v}"),
            TagNode::Double(v) => write!(f, "{v}"),
            TagNode::ByteArray(v) => write!(f, "[{} bytes]", v.len()),
            TagNode::String(v) => f.write_str(v),
            TagNode::List(v) => write!(f, "[{} entries]", v.len()),
            TagNode::Compound(v) => write!(f, "{{{} entries}}", v.len()),
            TagNode::IntArray(v) => write!(f, "[{} integers]", v.len()),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TagNode {
                fn from(value: $ty) -> Self {
                    TagNode::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => ByteArray,
    String => String,
    TagList => List,
    TagCompound => Compound,
    Vec<i32> => IntArray,
}

impl From<&str> for TagNode {
    fn from(value: &str) -> Self {
        TagNode::String(value.to_owned())
    }
}

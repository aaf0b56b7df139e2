//! Hooks for reacting to verification failures

use derive_more::Display;
use nbt_tag::{TagNode, TagType};
use tracing::debug;

use crate::node::SchemaNode;

/// How the verifier should treat a failure after a handler saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagEventCode {
    /// No opinion, the failure stands
    #[default]
    Next,
    /// Ignore the failure
    Pass,
    /// The failure stands
    Fail,
}

/// What kind of mismatch was found
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagEventKind {
    #[display("missing tag")]
    MissingTag,
    #[display("invalid tag type")]
    InvalidTagType,
    #[display("invalid tag value")]
    InvalidTagValue,
}

/// A single verification failure
#[derive(Debug, Clone, Copy)]
pub struct TagEvent<'a> {
    pub kind: TagEventKind,
    /// Name of the schema node, which is also the expected tag name
    pub name: &'a str,
    pub schema: &'a SchemaNode,
    /// The offending tag, absent for [`TagEventKind::MissingTag`]
    pub tag: Option<&'a TagNode>,
}

/// Receives verification failures
///
/// Every method defaults to [`TagEventCode::Next`], so a handler only overrides the
/// events it cares about.
pub trait VerifierEvents {
    fn missing_tag(&mut self, _event: &TagEvent<'_>) -> TagEventCode {
        TagEventCode::Next
    }

    fn invalid_tag_type(&mut self, _event: &TagEvent<'_>) -> TagEventCode {
        TagEventCode::Next
    }

    fn invalid_tag_value(&mut self, _event: &TagEvent<'_>) -> TagEventCode {
        TagEventCode::Next
    }
}

impl<E: VerifierEvents + ?Sized> VerifierEvents for &mut E {
    fn missing_tag(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        (**self).missing_tag(event)
    }

    fn invalid_tag_type(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        (**self).invalid_tag_type(event)
    }

    fn invalid_tag_value(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        (**self).invalid_tag_value(event)
    }
}

/// Logs every failure through `tracing` and lets it stand
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEvents;

impl VerifierEvents for LoggingEvents {
    fn missing_tag(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        debug!(name = event.name, expected = %event.schema.tag_type(), "missing tag");
        TagEventCode::Next
    }

    fn invalid_tag_type(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        debug!(
            name = event.name,
            expected = %event.schema.tag_type(),
            found = ?event.tag.map(TagNode::tag_type),
            "invalid tag type"
        );
        TagEventCode::Next
    }

    fn invalid_tag_value(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        debug!(
            name = event.name,
            value = ?event.tag.map(ToString::to_string),
            "invalid tag value"
        );
        TagEventCode::Next
    }
}

/// An owned record of one failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierIssue {
    pub kind: TagEventKind,
    pub name: String,
    pub expected: TagType,
    pub found: Option<TagType>,
}

impl From<&TagEvent<'_>> for VerifierIssue {
    fn from(event: &TagEvent<'_>) -> Self {
        Self {
            kind: event.kind,
            name: event.name.to_owned(),
            expected: event.schema.tag_type(),
            found: event.tag.map(TagNode::tag_type),
        }
    }
}

/// Records every failure for later reporting
#[derive(Debug, Clone, Default)]
pub struct CollectingEvents {
    pub issues: Vec<VerifierIssue>,
}

impl CollectingEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerifierEvents for CollectingEvents {
    fn missing_tag(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        self.issues.push(event.into());
        TagEventCode::Next
    }

    fn invalid_tag_type(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        self.issues.push(event.into());
        TagEventCode::Next
    }

    fn invalid_tag_value(&mut self, event: &TagEvent<'_>) -> TagEventCode {
        self.issues.push(event.into());
        TagEventCode::Next
    }
}

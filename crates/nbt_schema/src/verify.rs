//! Matching tag trees against schemas

use nbt_tag::{TagNode, TagValueMut};
use tracing::{instrument, trace};

use crate::events::{LoggingEvents, TagEvent, TagEventCode, TagEventKind, VerifierEvents};
use crate::node::{SchemaNode, SchemaOptions};

/// Verify `tag` against `schema`, logging failures
pub fn verify(tag: &TagNode, schema: &SchemaNode) -> bool {
    NbtVerifier::new(schema).verify(tag)
}

/// Create missing tags marked [`SchemaOptions::CREATE_ON_MISSING`], then verify
pub fn verify_and_create(tag: &mut TagNode, schema: &SchemaNode) -> bool {
    NbtVerifier::new(schema).verify_and_create(tag)
}

/// Checks tag trees against one schema and reports failures to `E`
///
/// Verification does not stop at the first failure, so a handler sees all of them.
///
/// ```
/// use nbt_schema::events::CollectingEvents;
/// use nbt_schema::{NbtVerifier, SchemaCompound, SchemaNode, SchemaScalar};
/// use nbt_tag::{TagCompound, TagNode, TagType};
///
/// let schema = SchemaNode::from(
///     SchemaCompound::new("").with(SchemaScalar::builder().name("hp").tag_type(TagType::Short).build()),
/// );
///
/// let mut verifier = NbtVerifier::with_events(&schema, CollectingEvents::new());
/// assert!(!verifier.verify(&TagNode::Compound(TagCompound::new())));
/// assert_eq!(verifier.events().issues.len(), 1);
/// ```
pub struct NbtVerifier<'s, E: VerifierEvents = LoggingEvents> {
    schema: &'s SchemaNode,
    events: E,
}

impl<'s> NbtVerifier<'s> {
    pub fn new(schema: &'s SchemaNode) -> Self {
        Self::with_events(schema, LoggingEvents)
    }
}

impl<'s, E: VerifierEvents> NbtVerifier<'s, E> {
    pub fn with_events(schema: &'s SchemaNode, events: E) -> Self {
        Self { schema, events }
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn into_events(self) -> E {
        self.events
    }

    /// Whether `tag` matches the schema.
    ///
    /// A missing tag only passes when it is [`SchemaOptions::OPTIONAL`]; use
    /// [`NbtVerifier::verify_and_create`] to fill in creatable tags first.
    #[instrument(skip_all, fields(schema = self.schema.name()))]
    pub fn verify(&mut self, tag: &TagNode) -> bool {
        let schema = self.schema;
        self.check(tag, schema)
    }

    /// Insert the default tree of every missing tag marked
    /// [`SchemaOptions::CREATE_ON_MISSING`], then verify the result
    #[instrument(skip_all, fields(schema = self.schema.name()))]
    pub fn verify_and_create(&mut self, tag: &mut TagNode) -> bool {
        create_missing(tag.value_mut(), self.schema);
        self.verify(tag)
    }

    fn check(&mut self, tag: &TagNode, schema: &SchemaNode) -> bool {
        match schema {
            SchemaNode::Scalar(s) => {
                tag.tag_type() == s.tag_type
                    || self.report(TagEventKind::InvalidTagType, schema, Some(tag))
            }
            SchemaNode::String(s) => {
                let Some(text) = tag.as_str() else {
                    return self.report(TagEventKind::InvalidTagType, schema, Some(tag));
                };

                let mut pass = true;
                if s.max_length.is_some_and(|max| text.chars().count() > max) {
                    pass &= self.report(TagEventKind::InvalidTagValue, schema, Some(tag));
                }
                if s.value.as_deref().is_some_and(|value| value != text) {
                    pass &= self.report(TagEventKind::InvalidTagValue, schema, Some(tag));
                }
                pass
            }
            SchemaNode::Array(s) => {
                let len = match tag {
                    TagNode::ByteArray(v) if tag.tag_type() == s.kind.tag_type() => v.len(),
                    TagNode::IntArray(v) if tag.tag_type() == s.kind.tag_type() => v.len(),
                    _ => return self.report(TagEventKind::InvalidTagType, schema, Some(tag)),
                };

                s.length.map_or(true, |expected| expected == len)
                    || self.report(TagEventKind::InvalidTagValue, schema, Some(tag))
            }
            SchemaNode::List(s) => {
                let Some(list) = tag.as_list() else {
                    return self.report(TagEventKind::InvalidTagType, schema, Some(tag));
                };

                let mut pass = true;
                if !list.is_empty() && list.value_type() != s.element_type {
                    pass &= self.report(TagEventKind::InvalidTagValue, schema, Some(tag));
                }
                if s.length.is_some_and(|expected| expected != list.len()) {
                    pass &= self.report(TagEventKind::InvalidTagValue, schema, Some(tag));
                }
                if let Some(sub) = &s.subschema {
                    for item in list {
                        pass &= self.check(item, sub);
                    }
                }
                pass
            }
            SchemaNode::Compound(s) => {
                let Some(compound) = tag.as_compound() else {
                    return self.report(TagEventKind::InvalidTagType, schema, Some(tag));
                };

                let mut pass = true;
                for child in s {
                    pass &= match compound.get(child.name()) {
                        Some(value) => self.check(value, child),
                        None if child.options().contains(SchemaOptions::OPTIONAL) => true,
                        None => self.report(TagEventKind::MissingTag, child, None),
                    };
                }
                pass
            }
        }
    }

    /// Hand a failure to the handler, returning whether it was forgiven
    fn report(&mut self, kind: TagEventKind, schema: &SchemaNode, tag: Option<&TagNode>) -> bool {
        let event = TagEvent {
            kind,
            name: schema.name(),
            schema,
            tag,
        };

        let code = match kind {
            TagEventKind::MissingTag => self.events.missing_tag(&event),
            TagEventKind::InvalidTagType => self.events.invalid_tag_type(&event),
            TagEventKind::InvalidTagValue => self.events.invalid_tag_value(&event),
        };

        code == TagEventCode::Pass
    }
}

fn create_missing(value: TagValueMut<'_>, schema: &SchemaNode) {
    match (value, schema) {
        (TagValueMut::Compound(compound), SchemaNode::Compound(s)) => {
            for child in s {
                match compound.get_mut(child.name()) {
                    Some(existing) => create_missing(existing.value_mut(), child),
                    None if child.options().contains(SchemaOptions::CREATE_ON_MISSING) => {
                        trace!(name = child.name(), "creating missing tag");
                        compound.insert(child.name(), child.build_default_tree());
                    }
                    None => {}
                }
            }
        }
        (TagValueMut::List(list), SchemaNode::List(s)) => {
            if let Some(sub) = &s.subschema {
                for item in list.iter_mut() {
                    create_missing(item, sub);
                }
            }
        }
        _ => {}
    }
}

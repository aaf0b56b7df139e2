use nbt_schema::{
    verify, CollectingEvents, NbtVerifier, SchemaCompound, SchemaList, SchemaNode, SchemaOptions,
    SchemaScalar, SchemaString,
};
use nbt_tag::{TagCompound, TagList, TagNode, TagType};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing_test::traced_test;

fn hp_schema() -> SchemaNode {
    SchemaNode::from(
        SchemaCompound::new("").with(
            SchemaScalar::builder()
                .name("hp")
                .tag_type(TagType::Short)
                .build(),
        ),
    )
}

fn entity_schema() -> SchemaNode {
    let item = SchemaCompound::new("")
        .with(
            SchemaScalar::builder()
                .name("Count")
                .tag_type(TagType::Byte)
                .build(),
        )
        .with(
            SchemaScalar::builder()
                .name("Damage")
                .tag_type(TagType::Short)
                .options(SchemaOptions::CREATE_ON_MISSING)
                .build(),
        );

    SchemaNode::from(
        SchemaCompound::new("")
            .with(SchemaString::builder().name("id").value("Chest").build())
            .with(
                SchemaList::builder()
                    .name("Items")
                    .element_type(TagType::Compound)
                    .subschema(SchemaNode::from(item))
                    .options(SchemaOptions::CREATE_ON_MISSING)
                    .build(),
            ),
    )
}

#[traced_test]
#[test]
fn rejects_wrong_type_and_missing_tag() {
    let schema = hp_schema();

    let mut wrong = TagCompound::new();
    wrong.insert("hp", "oops");
    assert!(!verify(&TagNode::Compound(wrong), &schema));

    assert!(!verify(&TagNode::Compound(TagCompound::new()), &schema));

    let mut right = TagCompound::new();
    right.insert("hp", TagNode::Short(20));
    assert!(verify(&TagNode::Compound(right), &schema));
}

#[traced_test]
#[test]
fn repairs_nested_list_entries() -> Result<(), nbt_tag::error::Error> {
    let schema = entity_schema();

    let mut stack = TagCompound::new();
    stack.insert("Count", TagNode::Byte(64));

    let mut items = TagList::new(TagType::Compound);
    items.push(stack)?;

    let mut chest = TagCompound::new();
    chest.insert("id", "Chest");
    chest.insert("Items", items);
    let mut tag = TagNode::Compound(chest);

    let mut verifier = NbtVerifier::with_events(&schema, CollectingEvents::new());
    assert!(!verifier.verify(&tag));
    assert!(verifier.verify_and_create(&mut tag));

    let damage = tag.to_compound()?.try_get("Items")?.to_list()?.try_get(0)?;
    assert_eq!(damage.to_compound()?.try_get("Damage")?, &TagNode::Short(0));

    let issues = verifier.into_events().issues;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "Damage");

    Ok(())
}

#[traced_test]
#[test]
fn creates_whole_missing_list() -> Result<(), nbt_tag::error::Error> {
    let schema = entity_schema();

    let mut chest = TagCompound::new();
    chest.insert("id", "Chest");
    let mut tag = TagNode::Compound(chest);

    assert!(nbt_schema::verify_and_create(&mut tag, &schema));
    assert!(tag.to_compound()?.try_get("Items")?.to_list()?.is_empty());

    Ok(())
}

fn child(index: usize, tag_type: TagType, options: SchemaOptions) -> SchemaNode {
    SchemaNode::from(
        SchemaScalar::builder()
            .name(format!("field{index}"))
            .tag_type(tag_type)
            .options(options)
            .build(),
    )
}

fn scalar_type() -> impl Strategy<Value = TagType> {
    prop_oneof![
        Just(TagType::Byte),
        Just(TagType::Short),
        Just(TagType::Int),
        Just(TagType::Long),
        Just(TagType::Float),
        Just(TagType::Double),
        Just(TagType::String),
    ]
}

fn names(schema: &SchemaCompound) -> Vec<String> {
    schema.iter().map(|c| c.name().to_owned()).collect()
}

fn group(names: &[String], prefix: &str) -> Vec<String> {
    names
        .iter()
        .filter(|n| n.starts_with(prefix))
        .cloned()
        .collect()
}

fn named_group(prefix: &str, count: usize) -> SchemaCompound {
    let mut schema = SchemaCompound::new(prefix);
    for i in 0..count {
        schema = schema.with(
            SchemaScalar::builder()
                .name(format!("{prefix}{i}"))
                .tag_type(TagType::Int)
                .build(),
        );
    }
    schema
}

proptest! {
    #[test]
    fn create_pass_makes_tree_verify(
        types in prop::collection::vec(scalar_type(), 1..12),
        present in prop::collection::vec(any::<bool>(), 12),
    ) {
        let mut schema = SchemaCompound::new("");
        let mut tag = TagCompound::new();

        for (i, tag_type) in types.iter().enumerate() {
            let node = child(i, *tag_type, SchemaOptions::CREATE_ON_MISSING);
            if present[i] {
                tag.insert(node.name(), node.build_default_tree());
            }
            schema = schema.with(node);
        }

        let schema = SchemaNode::from(schema);
        let mut tag = TagNode::Compound(tag);
        let all_present = present[..types.len()].iter().all(|p| *p);

        prop_assert_eq!(verify(&tag, &schema), all_present);
        prop_assert!(nbt_schema::verify_and_create(&mut tag, &schema));
        prop_assert!(verify(&tag, &schema));
    }

    #[test]
    fn disjoint_merges_keep_group_order(a in 0usize..6, b in 0usize..6, c in 0usize..6) {
        let base = named_group("base", a);
        let left = named_group("left", b);
        let right = named_group("right", c);

        let one = names(&base.merge_into(&left).merge_into(&right));
        let two = names(&base.merge_into(&right).merge_into(&left));

        for prefix in ["base", "left", "right"] {
            prop_assert_eq!(group(&one, prefix), group(&two, prefix));
        }

        let mut one_sorted = one.clone();
        one_sorted.sort();
        let mut two_sorted = two.clone();
        two_sorted.sort();
        prop_assert_eq!(one_sorted, two_sorted);
        prop_assert_eq!(one.len(), a + b + c);
    }
}

use nbt_tag::{error::Error, NbtTree, TagCompound, TagList, TagNode, TagType};
use pretty_assertions::assert_str_eq;
use proptest::prelude::*;
use tracing_test::traced_test;

fn leaf() -> impl Strategy<Value = TagNode> {
    prop_oneof![
        any::<i8>().prop_map(TagNode::Byte),
        any::<i16>().prop_map(TagNode::Short),
        any::<i32>().prop_map(TagNode::Int),
        any::<i64>().prop_map(TagNode::Long),
        // NaN never compares equal, keep floats finite
        (-1e30f32..1e30f32).prop_map(TagNode::Float),
        (-1e300f64..1e300f64).prop_map(TagNode::Double),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(TagNode::ByteArray),
        ".{0,12}".prop_map(TagNode::String),
        prop::collection::vec(any::<i32>(), 0..8).prop_map(TagNode::IntArray),
    ]
}

fn node() -> impl Strategy<Value = TagNode> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|items| {
                let value_type = items.first().map_or(TagType::End, TagNode::tag_type);
                let items = items
                    .into_iter()
                    .filter(|i| i.tag_type() == value_type)
                    .collect();
                TagNode::List(TagList::with_items(value_type, items).unwrap())
            }),
            prop::collection::vec((".{0,8}", inner), 0..6)
                .prop_map(|entries| TagNode::Compound(entries.into_iter().collect())),
        ]
    })
}

#[derive(Debug, Clone)]
enum CompoundOp {
    Add(u8),
    Remove(u8),
    Rename(u8, u8),
}

fn compound_op() -> impl Strategy<Value = CompoundOp> {
    prop_oneof![
        (0u8..6).prop_map(CompoundOp::Add),
        (0u8..6).prop_map(CompoundOp::Remove),
        (0u8..6, 0u8..6).prop_map(|(a, b)| CompoundOp::Rename(a, b)),
    ]
}

proptest! {
    #[test]
    fn any_tree_survives_write_then_read(
        name in ".{0,8}",
        entries in prop::collection::vec((".{0,8}", node()), 0..8),
    ) {
        let tree = NbtTree::with_root(name, entries.into_iter().collect());

        let mut bytes = Vec::new();
        tree.write_to(&mut bytes).unwrap();

        prop_assert_eq!(NbtTree::read_from(&bytes[..]).unwrap(), tree);
    }

    #[test]
    fn failed_push_leaves_list_unchanged(nodes in prop::collection::vec(leaf(), 0..32)) {
        let mut list = TagList::new(TagType::Int);

        for node in nodes {
            let before = list.len();
            let is_int = node.tag_type() == TagType::Int;

            match list.push(node) {
                Ok(()) => prop_assert!(is_int),
                Err(Error::TypeMismatch { .. }) => {
                    prop_assert!(!is_int);
                    prop_assert_eq!(list.len(), before);
                }
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }

            prop_assert_eq!(list.value_type(), TagType::Int);
        }
    }

    #[test]
    fn compound_keys_stay_unique(ops in prop::collection::vec(compound_op(), 0..48)) {
        let mut compound = TagCompound::new();

        for op in ops {
            match op {
                CompoundOp::Add(k) => {
                    let existed = compound.contains_key(&k.to_string());
                    let result = compound.add(k.to_string(), TagNode::Byte(k as i8));
                    prop_assert_eq!(result.is_err(), existed);
                }
                CompoundOp::Remove(k) => {
                    compound.remove(&k.to_string());
                }
                CompoundOp::Rename(a, b) => {
                    let _ = compound.rename(&a.to_string(), b.to_string());
                }
            }

            let mut keys: Vec<_> = compound.keys().cloned().collect();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), compound.len());
        }
    }
}

#[traced_test]
#[test]
fn nested_document_bytes() -> Result<(), Error> {
    let mut item = TagCompound::new();
    item.insert("id", TagNode::Short(1));

    let mut items = TagList::new(TagType::Compound);
    items.push(item)?;

    let mut tree = NbtTree::new("");
    tree.root.insert("Items", items);
    tree.root.insert("Blocks", TagNode::ByteArray(vec![7, 8]));
    tree.root.insert("Heights", TagNode::IntArray(vec![-1]));

    let mut bytes = Vec::new();
    tree.write_to(&mut bytes)?;

    #[rustfmt::skip]
    let expected = [
        // root compound with an empty name
        0x0A, 0x00, 0x00,
        // "Items": list of one compound
        0x09, 0x00, 0x05, b'I', b't', b'e', b'm', b's',
        0x0A, 0x00, 0x00, 0x00, 0x01,
        0x02, 0x00, 0x02, b'i', b'd', 0x00, 0x01,
        0x00,
        // "Blocks": byte array
        0x07, 0x00, 0x06, b'B', b'l', b'o', b'c', b'k', b's',
        0x00, 0x00, 0x00, 0x02, 0x07, 0x08,
        // "Heights": int array
        0x0B, 0x00, 0x07, b'H', b'e', b'i', b'g', b'h', b't', b's',
        0x00, 0x00, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF,
        // end of root
        0x00,
    ];

    assert_str_eq!(format!("{:02X?}", bytes), format!("{:02X?}", expected));

    Ok(())
}

#[traced_test]
#[test]
fn nul_in_names_uses_two_bytes() -> Result<(), Error> {
    let mut tree = NbtTree::new("a\0");
    tree.root.insert("b", TagNode::Byte(0));

    let mut bytes = Vec::new();
    tree.write_to(&mut bytes)?;

    assert_str_eq!(
        format!("{:02X?}", &bytes[..6]),
        format!("{:02X?}", [0x0Au8, 0x00, 0x03, b'a', 0xC0, 0x80])
    );
    assert_eq!(NbtTree::read_from(&bytes[..])?, tree);

    Ok(())
}

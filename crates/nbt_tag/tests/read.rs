use std::io::Write;

use flate2::{write::GzEncoder, Compression};
use nbt_tag::{error::Error, CompressionMethod, NbtFile, NbtTree, TagNode, TagType};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

#[rustfmt::skip]
const LEVEL: [u8; 64] = [
    0x0A, 0x00, 0x00,
    0x0A, 0x00, 0x04, b'D', b'a', b't', b'a',
        0x04, 0x00, 0x04, b'S', b'e', b'e', b'd',
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x30, 0x39,
        0x06, 0x00, 0x01, b'T',
        0x3F, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x09, 0x00, 0x03, b'P', b'o', b's',
        0x05, 0x00, 0x00, 0x00, 0x02,
        0x3F, 0x80, 0x00, 0x00,
        0xC0, 0x00, 0x00, 0x00,
        0x08, 0x00, 0x01, b'N', 0x00, 0x00,
    0x00,
    0x00,
];

#[traced_test]
#[test]
fn read_nested_level() -> Result<(), Error> {
    let tree = NbtTree::read_from(&LEVEL[..])?;
    assert_eq!(tree.name, "");

    let data = tree.root.try_get("Data")?.to_compound()?;
    assert_eq!(data.try_get("Seed")?.to_long()?, 12345);
    assert_eq!(data.try_get("T")?.to_double()?, 1.5);
    assert_eq!(data.try_get("N")?.to_str()?, "");

    let pos = data.try_get("Pos")?.to_list()?;
    assert_eq!(pos.value_type(), TagType::Float);
    let values: Vec<f32> = pos.iter().filter_map(TagNode::as_float).collect();
    assert_eq!(values, [1.0f32, -2.0]);

    let keys: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Seed", "T", "Pos", "N"]);

    Ok(())
}

#[traced_test]
#[test]
fn read_gzip_file_bytes() -> Result<(), Error> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&LEVEL)?;
    let bytes = encoder.finish()?;

    let file = NbtFile::from_bytes(&bytes)?;
    assert_eq!(file.compression, CompressionMethod::GZip);
    assert_eq!(file.tree, NbtTree::read_from(&LEVEL[..])?);

    Ok(())
}

#[traced_test]
#[test]
fn read_truncated_level() {
    for len in [1, 10, 30, 63] {
        let result = NbtTree::read_from(&LEVEL[..len]);
        assert!(
            matches!(result, Err(Error::UnexpectedEndOfStream)),
            "prefix of {len} bytes gave {result:?}"
        );
    }
}

#[traced_test]
#[test]
fn read_negative_list_count() {
    #[rustfmt::skip]
    let bytes = [
        0x0A, 0x00, 0x00,
        0x09, 0x00, 0x01, b'L', 0x01, 0x80, 0x00, 0x00, 0x00,
        0x00,
    ];

    let result = NbtTree::read_from(&bytes[..]);
    assert!(matches!(result, Err(Error::NegativeLength(-2147483648))));
}

#[traced_test]
#[test]
fn read_invalid_list_element_type() {
    #[rustfmt::skip]
    let bytes = [
        0x0A, 0x00, 0x00,
        0x09, 0x00, 0x01, b'L', 0x2A, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];

    let result = NbtTree::read_from(&bytes[..]);
    assert!(matches!(result, Err(Error::InvalidTagType(0x2A))));
}

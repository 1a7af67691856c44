use anni_wire::{Field, Kind, Record, Shape};

mod common;

use common::{Everything, Point, Track};

fn sample() -> Everything {
    Everything {
        tiny: i8::MIN,
        byte: u8::MAX,
        short: -12345,
        word: 0xbeef,
        int: i32::MIN + 1,
        uint: 0xdead_beef,
        real: -3.5,
        long: i64::MAX,
        ulong: u64::MAX - 7,
        digest: [0xee; 16],
        corners: [Point { x: 0.0, y: 1.5 }, Point { x: -2.25, y: 1e-3 }],
        payload: b"fLaC".to_vec(),
        tracks: vec![
            Track {
                index: 1,
                offset: 0,
                isrc: *b"JPPC01234567",
            },
            Track {
                index: 2,
                offset: 44100 * 180,
                isrc: *b"JPPC01234568",
            },
        ],
        origin: Point { x: 10.0, y: -10.0 },
    }
}

#[test]
fn every_kind_round_trips() {
    let value = sample();
    let (bytes, decoded) = common::encode_and_decode(&value);
    assert_eq!(decoded, value);
    assert_eq!(bytes.len(), anni_wire::encoded_len(&value).unwrap());
}

#[test]
fn layout_follows_declaration_order() {
    let value = sample();
    let bytes = anni_wire::encode(&value).unwrap();

    // 9 primitives: 1 + 1 + 2 + 2 + 4 + 4 + 4 + 8 + 8
    let primitives = 34;
    assert_eq!(bytes[0], 0x80);
    assert_eq!(bytes[1], 0xff);
    assert_eq!(&bytes[4..6], &[0xef, 0xbe]);

    let digest = primitives;
    assert_eq!(&bytes[digest..digest + 16], &[0xee; 16]);

    // two points, no array prefix
    let corners = digest + 16;
    assert_eq!(&bytes[corners + 4..corners + 8], &1.5f32.to_le_bytes());

    let payload = corners + 16;
    assert_eq!(&bytes[payload..payload + 8], &[4, 0, 0, 0, b'f', b'L', b'a', b'C']);

    let tracks = payload + 8;
    assert_eq!(&bytes[tracks..tracks + 4], &[2, 0, 0, 0]);
    // u16 + i64 + [u8; 12] per track
    let second = tracks + 4 + 22;
    assert_eq!(&bytes[second..second + 2], &[2, 0]);
    assert_eq!(&bytes[second + 10..second + 22], b"JPPC01234568");

    let origin = second + 22;
    assert_eq!(bytes.len(), origin + 8);
}

#[test]
fn decode_reuses_destination() {
    let value = sample();
    let bytes = anni_wire::encode(&value).unwrap();

    let mut dest = sample();
    dest.tracks.push(Track::default());
    dest.payload = vec![0; 100];
    dest.long = 0;
    anni_wire::decode(&bytes, &mut dest).unwrap();
    assert_eq!(dest, value);
}

#[derive(Record, Default, Debug, PartialEq)]
struct Matrix {
    rows: Vec<[i16; 3]>,
    cells: [[u8; 2]; 2],
    nested: Vec<Vec<u32>>,
}

#[test]
fn nested_containers_round_trip() {
    let value = Matrix {
        rows: vec![[1, -2, 3], [i16::MAX, 0, i16::MIN]],
        cells: [[1, 2], [3, 4]],
        nested: vec![vec![], vec![7], vec![8, 9]],
    };
    let (bytes, decoded) = common::encode_and_decode(&value);
    assert_eq!(decoded, value);
    assert_eq!(&bytes[..4], &[2, 0, 0, 0]);
    assert_eq!(&bytes[16..20], &[1, 2, 3, 4]);
}

#[derive(Record, Default, Debug, PartialEq)]
struct Node {
    id: u32,
    children: Vec<Node>,
}

#[test]
fn recursive_records() {
    let tree = Node {
        id: 1,
        children: vec![
            Node {
                id: 2,
                children: vec![],
            },
            Node {
                id: 3,
                children: vec![Node {
                    id: 4,
                    children: vec![],
                }],
            },
        ],
    };
    let (bytes, decoded) = common::encode_and_decode(&tree);
    assert_eq!(decoded, tree);
    assert_eq!(bytes.len(), 4 * 8);
    assert!(Node::SHAPE.fixed_size().is_none());
}

#[derive(Record, Default, Debug, PartialEq)]
struct Tagged(u8, [u8; 3]);

#[derive(Record, Default, Debug, PartialEq)]
struct Empty;

#[derive(Record, Default, Debug, PartialEq)]
struct Wrapper<T> {
    inner: T,
    count: u16,
}

#[test]
fn tuple_unit_and_generic_records() {
    let (bytes, decoded) = common::encode_and_decode(&Tagged(7, *b"abc"));
    assert_eq!(bytes, [7, b'a', b'b', b'c']);
    assert_eq!(decoded, Tagged(7, *b"abc"));

    let (bytes, _) = common::encode_and_decode(&Empty);
    assert!(bytes.is_empty());

    let value = Wrapper {
        inner: Tagged(1, [2, 3, 4]),
        count: 5,
    };
    let (bytes, decoded) = common::encode_and_decode(&value);
    assert_eq!(bytes, [1, 2, 3, 4, 5, 0]);
    assert_eq!(decoded, value);
}

#[derive(Record, Default, Debug, PartialEq)]
struct Bag<T> {
    items: Vec<T>,
    spare: [T; 1],
}

#[test]
fn generic_sequence_elements() {
    let value = Bag {
        items: vec![Point { x: 1.0, y: 2.0 }],
        spare: [Point::default()],
    };
    let (bytes, decoded) = common::encode_and_decode(&value);
    assert_eq!(bytes.len(), 4 + 8 + 8);
    assert_eq!(decoded, value);

    let (bytes, _) = common::encode_and_decode(&Bag::<u16> {
        items: vec![7, 8],
        spare: [9],
    });
    assert_eq!(bytes, [2, 0, 0, 0, 7, 0, 8, 0, 9, 0]);
}

#[test]
fn descriptors_match_declarations() {
    let value = sample();
    let fields = value.fields();
    assert_eq!(fields.len(), 14);
    assert_eq!(fields[0].name, "tiny");
    assert!(matches!(fields[0].shape(), Shape::Primitive(Kind::Int8)));
    assert!(matches!(fields[9].shape(), Shape::FixedArray { len: 16, .. }));
    assert_eq!(fields[12].shape().to_string(), "[Track]");
    assert_eq!(fields[13].shape().kind(), Some(Kind::Struct));

    assert_eq!(Track::SHAPE.fixed_size(), Some(22));
    assert_eq!(Tagged::SHAPE.fields()[1].name, "1");
    assert_eq!(Everything::SHAPE.name(), "Everything");
}

#[test]
fn independent_calls_across_threads() {
    let value = sample();
    let expected = anni_wire::encode(&value).unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let bytes = anni_wire::encode(&value).unwrap();
                assert_eq!(bytes, expected);
                let mut decoded = Everything::default();
                anni_wire::decode(&bytes, &mut decoded).unwrap();
                assert_eq!(decoded, value);
            });
        }
    });
}

#![allow(dead_code)]

use anni_wire::{Field, Record};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Encodes `value`, decodes the bytes into a fresh default value and
/// returns it together with the encoding.
pub fn encode_and_decode<T: Field + Default>(value: &T) -> (Vec<u8>, T) {
    init_logger();
    let bytes = anni_wire::encode(value).expect("Failed to encode value.");
    let mut decoded = T::default();
    anni_wire::decode_exact(&bytes, &mut decoded).expect("Failed to decode value.");
    (bytes, decoded)
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Pair {
    pub a: i32,
    pub b: u8,
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Bytes {
    pub s: Vec<u8>,
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Fixed {
    pub f: [u8; 4],
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Track {
    pub index: u16,
    pub offset: i64,
    pub isrc: [u8; 12],
}

/// Exercises every supported kind at least once.
#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Everything {
    pub tiny: i8,
    pub byte: u8,
    pub short: i16,
    pub word: u16,
    pub int: i32,
    pub uint: u32,
    pub real: f32,
    pub long: i64,
    pub ulong: u64,
    pub digest: [u8; 16],
    pub corners: [Point; 2],
    pub payload: Vec<u8>,
    pub tracks: Vec<Track>,
    pub origin: Point,
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct WithString {
    pub id: u32,
    pub name: String,
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct TrailingWide {
    pub head: u32,
    pub tail: i64,
}

//! Writes one of every supported value shape into a stream and reads everything back through
//! different backends, checking the byte layout of the stream header along the way.

use std::collections::BTreeMap;
use std::f32::consts::PI as PI_F32;
use std::f64::consts::PI;

use hex_literal::hex;
use leb_wrap::prelude::*;
use tempdir::TempDir;

const MAGIC: [u8; 8] = *b"leb.wrap";
const VERSION: u8 = 1;
const ARRAY_SIZE: usize = 8;
const FIBONACCI_COUNT: usize = 64;
const PATTERN: u64 = 0xfea_c9c0;

/// Boolean or number, number is only present on the wire for kind 2.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Variant {
    Boolean(bool),
    Number(u32),
}

impl Encode for Variant {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), LebWrapError> {
        match self {
            Variant::Boolean(b) => wr.write_u8(*b as u8),
            Variant::Number(n) => {
                wr.write_u8(2)?;
                wr.write_u32(*n)
            }
        }
    }
}

impl Decode for Variant {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, LebWrapError> {
        match rd.read_u8()? {
            0 => Ok(Variant::Boolean(false)),
            1 => Ok(Variant::Boolean(true)),
            2 => Ok(Variant::Number(rd.read_u32()?)),
            other => Err(LebWrapError::UnknownDiscriminant(other)),
        }
    }
}

struct Fixture {
    ints: [i32; ARRAY_SIZE],
    integers: Vec<i32>,
    pairs: Vec<(u32, f32)>,
    map: BTreeMap<u32, String>,
    variants: Vec<Variant>,
}

fn sequence(index: usize) -> i32 {
    ((index as u64 * 539_871_334) % 2_395_983) as i32
}

impl Fixture {
    fn new() -> Self {
        let mut ints = [0; ARRAY_SIZE];
        let mut pairs = Vec::new();
        let mut map = BTreeMap::new();
        let mut variants = Vec::new();
        for i in 0..ARRAY_SIZE {
            ints[i] = sequence(i);
            pairs.push((i as u32, sequence(i) as f32));
            map.insert(i as u32, format!("{{{i}==0x{i:08x}}}"));
            if i % 9 == 0 {
                variants.push(Variant::Boolean(true));
            } else if i % 2 == 0 {
                variants.push(Variant::Boolean(false));
            } else {
                variants.push(Variant::Number(i as u32));
            }
        }
        Fixture {
            ints,
            integers: ints.to_vec(),
            pairs,
            map,
            variants,
        }
    }
}

macro_rules! write_integers {
    ($wr:expr, $($ty:ty),*) => {
        $(
            $wr.put(&(0 as $ty))?;
            $wr.put(&(PATTERN as $ty))?;
        )*
    };
}

macro_rules! read_integers {
    ($rd:expr, $($ty:ty),*) => {
        $(
            assert!($rd.decode_eq(&(0 as $ty)).unwrap(), "wrong {}", stringify!($ty));
            assert!($rd.decode_eq(&(PATTERN as $ty)).unwrap(), "wrong {}", stringify!($ty));
        )*
    };
}

fn write_everything<W: Writer>(wr: &mut W, fx: &Fixture) -> Result<(), LebWrapError> {
    wr.put(&MAGIC)?;
    wr.put(&VERSION)?;

    wr.put(&FIBONACCI_COUNT)?;
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..FIBONACCI_COUNT {
        wr.put(&a)?;
        (a, b) = (b, a + b);
    }

    wr.put(&true)?;
    wr.put(&false)?;

    write_integers!(wr, i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

    wr.put(&0.0f32)?;
    wr.put(&PI_F32)?;
    wr.put(&0.0f64)?;
    wr.put(&PI)?;

    wr.put(&fx.ints)?;
    wr.put(&fx.integers)?;

    wr.put("narrow")?;
    wr.write_wide_str("wide ünïcödé")?;
    wr.put(&String::from("owned"))?;

    wr.put(&fx.pairs)?;
    wr.put(&fx.map)?;

    wr.put(&Variant::Boolean(false))?;
    wr.put(&Variant::Boolean(true))?;
    wr.put(&Variant::Number(0x31337))?;
    wr.put(&fx.variants)?;
    wr.flush()
}

fn read_everything<R: Reader>(rd: &mut R, fx: &Fixture) {
    let magic: [u8; 8] = rd.read_value().unwrap();
    assert_eq!(magic, MAGIC, "wrong magic number");
    assert_eq!(rd.read_u8().unwrap(), VERSION, "wrong version");

    let count: usize = rd.read_value().unwrap();
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..count {
        assert!(rd.decode_eq(&a).unwrap(), "wrong Fibonacci number");
        (a, b) = (b, a + b);
    }

    assert!(rd.read_bool().unwrap());
    assert!(!rd.read_bool().unwrap());

    read_integers!(rd, i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

    assert!(rd.decode_eq(&0.0f32).unwrap());
    assert!(rd.decode_eq(&PI_F32).unwrap());
    assert!(rd.decode_eq(&0.0f64).unwrap());
    assert!(rd.decode_eq(&PI).unwrap());

    let ints: [i32; ARRAY_SIZE] = rd.read_value().unwrap();
    assert_eq!(ints, fx.ints);
    let integers: Vec<i32> = rd.read_value().unwrap();
    assert_eq!(integers, fx.integers);

    assert_eq!(rd.read_string().unwrap(), "narrow");
    assert_eq!(rd.read_wide_string().unwrap(), "wide ünïcödé");
    assert!(rd.decode_eq(&String::from("owned")).unwrap());

    assert!(rd.decode_eq(&fx.pairs).unwrap(), "wrong pairs");
    assert!(rd.decode_eq(&fx.map).unwrap(), "wrong map");

    assert_eq!(rd.read_value::<Variant>().unwrap(), Variant::Boolean(false));
    assert_eq!(rd.read_value::<Variant>().unwrap(), Variant::Boolean(true));
    assert_eq!(rd.read_value::<Variant>().unwrap(), Variant::Number(0x31337));
    let variants: Vec<Variant> = rd.read_value().unwrap();
    assert_eq!(variants, fx.variants);

    assert!(rd.read_u8().unwrap_err().is_end_of_stream());
}

#[test]
fn memory_round_trip() {
    let fx = Fixture::new();
    let mut buf = Vec::new();
    write_everything(&mut buf, &fx).unwrap();

    // magic, version, count 64 and the first ten Fibonacci numbers
    assert_eq!(
        &buf[..20],
        hex!("6c 65 62 2e 77 72 61 70 01 40 00 01 01 02 03 05 08 0d 15 22")
    );

    let mut rd = SliceReader::new(&buf);
    read_everything(&mut rd, &fx);
}

#[test]
fn file_round_trip() {
    let fx = Fixture::new();
    let dir = TempDir::new("leb_wrap_compat").unwrap();
    let path = dir.path().join("temporary.data");

    let mut wr = FileWriter::create(&path).unwrap();
    write_everything(&mut wr, &fx).unwrap();
    drop(wr);

    let mut rd = BufferedReader::new(FileReader::open(&path).unwrap());
    read_everything(&mut rd, &fx);
}

#[test]
fn small_window() {
    let fx = Fixture::new();
    let mut buf = Vec::new();
    write_everything(&mut buf, &fx).unwrap();

    for capacity in [1, 2, 7, 64] {
        let mut rd = BufferedReader::with_capacity(&buf[..], capacity).unwrap();
        read_everything(&mut rd, &fx);
    }
}

#[test]
fn stream_round_trip() {
    let fx = Fixture::new();
    let mut wr = IoWriter::new(Vec::new());
    write_everything(&mut wr, &fx).unwrap();
    let bytes = wr.into_inner();

    let mut rd = IoReader::new(std::io::Cursor::new(bytes));
    read_everything(&mut rd, &fx);
}

#[test]
fn variant_wire_shape() {
    let mut buf = Vec::new();
    buf.put(&[Variant::Boolean(true), Variant::Number(0x31337)])
        .unwrap();
    assert_eq!(buf, hex!("01 02 b7 a6 0c"));

    let mut rd = &hex!("03")[..];
    assert!(matches!(
        rd.read_value::<Variant>(),
        Err(LebWrapError::UnknownDiscriminant(3))
    ));
}

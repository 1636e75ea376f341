use crate::*;
use crate::order::swap_groups;
use crate::order::words_from_target;
use crate::order::words_to_target;

const ADDR: u32 = 0x8200_0000;

fn encode_one(arg: Argument) -> Result<String> {
    let target = Target::Address(ADDR);
    let args = [arg];
    Call::new(ThreadContext::System, &target, WireTag::Int32, 0, &args).encode()
}

/// Strips the fixed header of a one-argument call, leaving the argument text.
fn arg_text(cmd: &str) -> &str {
    let head = "consolefeatures ver=2 type=1 system as=0 params=\"A\\82000000\\A\\1\\";
    assert!(cmd.starts_with(head), "unexpected header in {}", cmd);
    &cmd[head.len()..cmd.len() - 1]
}

// ============================================================================
//  TYPE REGISTRY
// ============================================================================

#[test]
fn test_wire_tag_numbers_are_fixed() {
    let expected = [
        (WireTag::Void, 0),
        (WireTag::Int32, 1),
        (WireTag::Utf8Text, 2),
        (WireTag::Float, 3),
        (WireTag::Byte, 4),
        (WireTag::Int32Array, 5),
        (WireTag::Float32Array, 6),
        (WireTag::ByteArray, 7),
        (WireTag::Uint64, 8),
        (WireTag::Uint64Array, 9),
    ];
    for (tag, code) in expected {
        assert_eq!(tag.code(), code);
        assert_eq!(WireTag::from_u32(code), Some(tag));
    }
    assert_eq!(WireTag::from_u32(10), None);
}

#[test]
fn test_array_tags() {
    let arrays = [WireTag::Int32Array, WireTag::Float32Array, WireTag::ByteArray, WireTag::Uint64Array];
    for tag in arrays {
        assert!(tag.is_array(), "{}", tag);
    }
    for tag in [WireTag::Void, WireTag::Int32, WireTag::Utf8Text, WireTag::Float, WireTag::Byte, WireTag::Uint64] {
        assert!(!tag.is_array(), "{}", tag);
    }
}

#[test]
fn test_argument_tags_ignore_result_type() {
    assert_eq!(Argument::Uint32(7).tag(), WireTag::Int32);
    assert_eq!(Argument::Bool(true).tag(), WireTag::Int32);
    assert_eq!(Argument::Byte(1).tag(), WireTag::Int32);
    assert_eq!(Argument::Float64(1.0).tag(), WireTag::Float);
    assert_eq!(Argument::Text("x".into()).tag(), WireTag::ByteArray);
    assert_eq!(Argument::Float32Array(vec![]).tag(), WireTag::ByteArray);
    assert_eq!(Argument::from(5i64).tag(), WireTag::Uint64);
}

#[test]
fn test_permitted_result_types() {
    use crate::Kind::*;
    for kind in [Bool, U8, I16, U16, I32, U32, I64, U64, F32, F64, Text] {
        assert!(ResultType::Scalar(kind).is_permitted(), "{:?}", kind);
        assert!(ResultType::Array(kind).is_permitted(), "{:?}[]", kind);
    }
    assert!(ResultType::Void.is_permitted());
    assert!(!ResultType::Scalar(I8).is_permitted());
    assert!(!ResultType::Array(I8).is_permitted());
}

#[test]
fn test_result_wire_tags() {
    use crate::Kind::*;
    assert_eq!(ResultType::Scalar(U16).wire_tag(), WireTag::Int32);
    assert_eq!(ResultType::Array(I32).wire_tag(), WireTag::Int32Array);
    assert_eq!(ResultType::Scalar(Text).wire_tag(), WireTag::Utf8Text);
    assert_eq!(ResultType::Scalar(F64).wire_tag(), WireTag::Float);
    assert_eq!(ResultType::Array(F32).wire_tag(), WireTag::Float32Array);
    assert_eq!(ResultType::Scalar(U8).wire_tag(), WireTag::Byte);
    assert_eq!(ResultType::Array(U8).wire_tag(), WireTag::ByteArray);
    assert_eq!(ResultType::Scalar(I64).wire_tag(), WireTag::Uint64);
    assert_eq!(ResultType::Array(U64).wire_tag(), WireTag::Uint64Array);
    assert_eq!(ResultType::Void.wire_tag(), WireTag::Void);
}

// ============================================================================
//  ARGUMENT ENCODING
// ============================================================================

#[test]
fn test_encode_integers() -> Result<()> {
    assert_eq!(arg_text(&encode_one(Argument::Int32(-5))?), "1\\-5\\");
    assert_eq!(arg_text(&encode_one(Argument::Int32(0))?), "1\\0\\");
    assert_eq!(arg_text(&encode_one(Argument::Uint32(u32::MAX))?), "1\\-1\\");
    assert_eq!(arg_text(&encode_one(Argument::Uint32(0x8000_0000))?), "1\\-2147483648\\");
    assert_eq!(arg_text(&encode_one(Argument::Byte(255))?), "1\\255\\");
    Ok(())
}

#[test]
fn test_encode_bool_uses_slash() -> Result<()> {
    assert_eq!(arg_text(&encode_one(Argument::Bool(true))?), "1/1\\");
    assert_eq!(arg_text(&encode_one(Argument::Bool(false))?), "1/0\\");
    Ok(())
}

#[test]
fn test_encode_floats_invariant_decimal() -> Result<()> {
    assert_eq!(arg_text(&encode_one(Argument::Float32(1.5))?), "3\\1.5\\");
    assert_eq!(arg_text(&encode_one(Argument::Float32(-0.25))?), "3\\-0.25\\");
    assert_eq!(arg_text(&encode_one(Argument::Float64(0.1))?), "3\\0.1\\");
    assert_eq!(arg_text(&encode_one(Argument::Float64(100.0))?), "3\\100\\");
    Ok(())
}

#[test]
fn test_encode_int_array_little_endian() -> Result<()> {
    let cmd = encode_one(Argument::Int32Array(vec![1, -1]))?;
    assert_eq!(arg_text(&cmd), "7/8\\01000000FFFFFFFF\\");

    let cmd = encode_one(Argument::Uint32Array(vec![0x1234_5678]))?;
    assert_eq!(arg_text(&cmd), "7/4\\78563412\\");
    Ok(())
}

#[test]
fn test_encode_float_array_big_endian() -> Result<()> {
    let cmd = encode_one(Argument::Float32Array(vec![1.0, -2.0]))?;
    assert_eq!(arg_text(&cmd), "7/8\\3F800000C0000000\\");
    Ok(())
}

#[test]
fn test_encode_byte_array() -> Result<()> {
    let cmd = encode_one(Argument::ByteArray(vec![0x00, 0xAB, 0x7F]))?;
    assert_eq!(arg_text(&cmd), "7/3\\00AB7F\\");

    let cmd = encode_one(Argument::ByteArray(vec![]))?;
    assert_eq!(arg_text(&cmd), "7/0\\\\");
    Ok(())
}

#[test]
fn test_encode_text_low_bytes() -> Result<()> {
    assert_eq!(arg_text(&encode_one(Argument::Text("abc".into()))?), "7/3\\616263\\");
    assert_eq!(arg_text(&encode_one(Argument::Text(String::new()))?), "7/0\\\\");
    // U+0141 keeps only its low byte.
    assert_eq!(arg_text(&encode_one(Argument::Text("\u{141}".into()))?), "7/1\\41\\");
    Ok(())
}

#[test]
fn test_encode_text_per_utf16_unit() -> Result<()> {
    // U+1F600 is the surrogate pair D83D DE00: two units, two bytes.
    assert_eq!(low_bytes("a\u{1F600}"), vec![0x61, 0x3D, 0x00]);
    assert_eq!(arg_text(&encode_one(Argument::Text("a\u{1F600}".into()))?), "7/3\\613D00\\");
    Ok(())
}

#[test]
fn test_encode_fallback_bits() -> Result<()> {
    assert_eq!(arg_text(&encode_one(Argument::RawBits64(u64::MAX))?), "8\\18446744073709551615\\");
    assert_eq!(arg_text(&encode_one(Argument::from(-1i16))?), "8\\18446744073709551615\\");
    assert_eq!(arg_text(&encode_one(Argument::from(65535u16))?), "8\\65535\\");
    Ok(())
}

#[test]
fn test_args_macro() {
    let args = crate::args![1u32, "hi", true, 2.5f64];
    assert_eq!(args, vec![
        Argument::Uint32(1),
        Argument::Text("hi".into()),
        Argument::Bool(true),
        Argument::Float64(2.5),
    ]);
    assert!(crate::args![].is_empty());
}

// ============================================================================
//  CALL FRAMES
// ============================================================================

#[test]
fn test_call_frame_address() -> Result<()> {
    let target = Target::Address(0x8243_1A30);
    let args = crate::args![3u32, true];
    let cmd = Call::new(ThreadContext::System, &target, WireTag::Int32, 0, &args).encode()?;
    assert_eq!(
        cmd,
        "consolefeatures ver=2 type=1 system as=0 params=\"A\\82431A30\\A\\2\\1\\3\\1/1\\\""
    );
    Ok(())
}

#[test]
fn test_call_frame_ordinal_title_thread() -> Result<()> {
    let target = Target::ordinal("xam.xex", 401);
    let cmd = Call::new(ThreadContext::Title, &target, WireTag::Int32Array, 4, &[]).encode()?;
    assert_eq!(
        cmd,
        "consolefeatures ver=2 type=5 module=\"xam.xex\" ord=401 as=4 params=\"A\\0\\A\\0\\\""
    );
    Ok(())
}

#[test]
fn test_argument_count_boundary() {
    let target = Target::Address(ADDR);
    let args: Vec<Argument> = (0..MAX_ARGUMENTS as i32).map(Argument::Int32).collect();
    let cmd = Call::new(ThreadContext::System, &target, WireTag::Void, 0, &args).encode();
    assert!(cmd.is_ok());
    assert!(cmd.unwrap_or_default().contains("\\A\\37\\"));

    let args: Vec<Argument> = (0..=MAX_ARGUMENTS as i32).map(Argument::Int32).collect();
    let cmd = Call::new(ThreadContext::System, &target, WireTag::Void, 0, &args).encode();
    assert_eq!(cmd, Err(Error::TooManyArguments(38)));
}

#[test]
fn test_feature_frames() {
    let cmd = FeatureCall::new(Feature::CpuKey).encode();
    assert_eq!(cmd, "consolefeatures ver=2 type=10 params=\"A\\0\\A\\0\\\"");

    let cmd = FeatureCall::new(Feature::ResolveFunction).text("xam.xex").uint(401).encode();
    assert_eq!(
        cmd,
        "consolefeatures ver=2 type=9 params=\"A\\0\\A\\2\\2/7\\78616D2E786578\\1\\401\\\""
    );

    let cmd = FeatureCall::new(Feature::ConstantMemorySet)
        .at(0x8200_00FF)
        .uint(0xFFFF_FFFF)
        .int(0)
        .int(0)
        .int(1)
        .uint(0x4156_07E6)
        .encode();
    assert_eq!(
        cmd,
        "consolefeatures ver=2 type=18 params=\"A\\820000FF\\A\\5\\1\\-1\\1\\0\\1\\0\\1\\1\\1\\1096157158\\\""
    );
}

#[test]
fn test_feature_unsigned_stays_unsigned() {
    let cmd = FeatureCall::new(Feature::Notify).text("x").unsigned(0xFFFF_FFFF).encode();
    assert_eq!(cmd, "consolefeatures ver=2 type=12 params=\"A\\0\\A\\2\\2/1\\78\\1\\4294967295\\\"");

    let cmd = FeatureCall::new(Feature::ResolveFunction).uint(0x8000_0001).unsigned(0x8000_0001).encode();
    assert!(cmd.ends_with("\\1\\-2147483647\\1\\2147483649\\\""), "{}", cmd);
}

#[test]
fn test_poll_frame() {
    assert_eq!(poll_command(0x1234_ABCD), "consolefeatures buf_addr=0x1234ABCD");
    assert_eq!(poll_command(0x10), "consolefeatures buf_addr=0x10");
}

// ============================================================================
//  REPLY DECODING
// ============================================================================

fn decode(reply: &str, ty: ResultType, count: u32) -> Result<Value> {
    decode_reply(reply, ty.wire_tag(), ty, count)
}

#[test]
fn test_decode_int32_widths() -> Result<()> {
    use crate::Kind::*;
    assert_eq!(decode("200- FFFFFFFE", ResultType::Scalar(I32), 0)?, Value::I32(-2));
    assert_eq!(decode("200- FFFFFFFE", ResultType::Scalar(U32), 0)?, Value::U32(0xFFFF_FFFE));
    assert_eq!(decode("200- FFFE", ResultType::Scalar(I16), 0)?, Value::I16(-2));
    assert_eq!(decode("200- FFFFFFFE", ResultType::Scalar(I16), 0)?, Value::I16(-2));
    assert_eq!(decode("200- 1F", ResultType::Scalar(U16), 0)?, Value::U16(31));
    assert_eq!(decode("200- 0", ResultType::Scalar(I32), 0)?, Value::I32(0));
    Ok(())
}

#[test]
fn test_decode_text() -> Result<()> {
    let ty = ResultType::Scalar(Kind::Text);
    assert_eq!(decode("200- hello world", ty, 0)?, Value::Text("hello world".into()));
    assert_eq!(decode("200- ", ty, 0)?, Value::Text(String::new()));

    let chars = decode("200- ok", ty, 0)?.into_chars();
    assert_eq!(chars, Some(vec!['o', 'k']));
    Ok(())
}

#[test]
fn test_decode_float_and_byte() -> Result<()> {
    assert_eq!(decode("200- 1.5", ResultType::Scalar(Kind::F32), 0)?, Value::F32(1.5));
    assert_eq!(decode("200- -3.25", ResultType::Scalar(Kind::F64), 0)?, Value::F64(-3.25));

    let byte = decode("200- 41", ResultType::Scalar(Kind::U8), 0)?;
    assert_eq!(byte, Value::U8(0x41));
    assert_eq!(byte.as_char(), Some('A'));
    Ok(())
}

#[test]
fn test_decode_uint64_reinterprets_signed() -> Result<()> {
    let reply = "200- FFFFFFFFFFFFFFFF";
    assert_eq!(decode(reply, ResultType::Scalar(Kind::I64), 0)?, Value::I64(-1));
    assert_eq!(decode(reply, ResultType::Scalar(Kind::U64), 0)?, Value::U64(u64::MAX));
    assert_eq!(decode("200- 0", ResultType::Scalar(Kind::Bool), 0)?, Value::Bool(false));
    assert_eq!(decode("200- 1", ResultType::Scalar(Kind::Bool), 0)?, Value::Bool(true));
    Ok(())
}

#[test]
fn test_decode_int_array_sized_by_declared_count() -> Result<()> {
    let reply = "200- 1,2,3,4,5,6,7,8,9,A;";
    let value = decode(reply, ResultType::Array(Kind::I32), 10)?;
    assert_eq!(value, Value::I32Array(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));

    let value = decode("200- FFFFFFFF,10;", ResultType::Array(Kind::U16), 2)?;
    assert_eq!(value, Value::U16Array(vec![0xFFFF, 0x10]));
    Ok(())
}

#[test]
fn test_decode_partial_arrays_stop_at_terminator() -> Result<()> {
    let value = decode("200- 1.5,2.5;", ResultType::Array(Kind::F32), 4)?;
    assert_eq!(value, Value::F32Array(vec![1.5, 2.5]));

    let value = decode("200- 1,2,255;", ResultType::Array(Kind::U8), 8)?;
    assert_eq!(value, Value::U8Array(vec![1, 2, 255]));

    let value = decode("200- ;", ResultType::Array(Kind::U64), 3)?;
    assert_eq!(value, Value::U64Array(vec![]));
    Ok(())
}

#[test]
fn test_decode_array_ignores_surplus() -> Result<()> {
    let value = decode("200- 1,2,3;", ResultType::Array(Kind::U8), 2)?;
    assert_eq!(value, Value::U8Array(vec![1, 2]));
    Ok(())
}

#[test]
fn test_decode_uint64_array_signed() -> Result<()> {
    let reply = "200- 1,18446744073709551615;";
    assert_eq!(decode(reply, ResultType::Array(Kind::I64), 2)?, Value::I64Array(vec![1, -1]));
    assert_eq!(decode("200- 0,7;", ResultType::Array(Kind::Bool), 2)?, Value::BoolArray(vec![false, true]));
    Ok(())
}

#[test]
fn test_decode_void_ignores_payload() -> Result<()> {
    assert_eq!(decode("200- anything at all", ResultType::Void, 0)?, Value::Void);
    assert_eq!(decode("", ResultType::Void, 0)?, Value::Void);
    Ok(())
}

#[test]
fn test_decoded_value_shape() -> Result<()> {
    use crate::Kind::*;
    for ty in [ResultType::Scalar(I16), ResultType::Scalar(U64), ResultType::Scalar(Text)] {
        let value = decode("200- 1", ty, 0)?;
        assert_eq!(value.result_type(), ty);
        assert_eq!(value.len(), None);
    }
    for ty in [ResultType::Array(U32), ResultType::Array(Bool), ResultType::Array(Text)] {
        let value = decode("200- 1,0,1;", ty, 3)?;
        assert_eq!(value.result_type(), ty);
        assert_eq!(value.len(), Some(3));
    }
    assert_eq!(Value::Void.result_type(), ResultType::Void);
    assert_eq!(Value::Void.len(), None);
    Ok(())
}

#[test]
fn test_decode_malformed() {
    let cases: [(&str, ResultType, u32); 6] = [
        ("200- zz", ResultType::Scalar(Kind::I32), 0),
        ("no-space", ResultType::Scalar(Kind::U32), 0),
        ("200- 1,,2;", ResultType::Array(Kind::U8), 3),
        ("200- 300;", ResultType::Array(Kind::U8), 1),
        ("200- one", ResultType::Scalar(Kind::F32), 0),
        ("200- 100", ResultType::Scalar(Kind::U8), 0),
    ];
    for (reply, ty, count) in cases {
        match decode(reply, ty, count) {
            Err(Error::MalformedResponse(_)) => {}
            other => panic!("expected MalformedResponse for {:?}, got {:?}", reply, other),
        }
    }
}

#[test]
fn test_decode_tag_type_mismatch() {
    let result = decode_reply("200- 1", WireTag::ByteArray, ResultType::Scalar(Kind::U8), 0);
    assert!(matches!(result, Err(Error::MalformedResponse(_))));
}

// ============================================================================
//  BYTE ORDER
// ============================================================================

#[test]
fn test_swap_groups_rejects_ragged_buffer() {
    let mut buf = [1u8, 2, 3, 4, 5];
    assert_eq!(swap_groups(&mut buf, 4), Err(Error::InvalidBufferShape { len: 5, width: 4 }));
    assert_eq!(buf, [1, 2, 3, 4, 5]);
}

#[test]
fn test_swap_groups_in_place() -> Result<()> {
    let mut buf = [1u8, 2, 3, 4, 5, 6, 7, 8];
    swap_groups(&mut buf, 2)?;
    assert_eq!(buf, [2, 1, 4, 3, 6, 5, 8, 7]);
    swap_groups(&mut buf, 8)?;
    assert_eq!(buf, [7, 8, 5, 6, 3, 4, 1, 2]);
    Ok(())
}

#[test]
fn test_words_are_big_endian_on_target() -> Result<()> {
    assert_eq!(words_to_target(&[0x1234_5678u32])?, vec![0x12, 0x34, 0x56, 0x78]);
    assert_eq!(words_to_target(&[1.0f32])?, vec![0x3F, 0x80, 0x00, 0x00]);

    let words: Vec<i16> = words_from_target(vec![0xFF, 0xFE, 0x00, 0x01])?;
    assert_eq!(words, vec![-2, 1]);

    let ragged: Result<Vec<u64>> = words_from_target(vec![0; 12]);
    assert_eq!(ragged, Err(Error::InvalidBufferShape { len: 12, width: 8 }));
    Ok(())
}

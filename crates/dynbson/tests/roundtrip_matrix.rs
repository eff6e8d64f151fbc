use dynbson::{Array, Decoder, Document, Encoder, FieldValue, Key, Value};

fn round_trip(array: &Array) -> Array {
    let doc = Encoder::new().encode(array).expect("encode must succeed");
    Decoder::new().decode(&doc).expect("decode must succeed")
}

#[test]
fn scalar_map_round_trips() {
    let mut array = Array::new();
    array.insert("null", Value::Null);
    array.insert("int", Value::Int(-40));
    array.insert("float", Value::Float(2.5));
    array.insert("bool", Value::Bool(true));
    array.insert("str", Value::Str("héllo".into()));
    assert_eq!(round_trip(&array), array);
}

#[test]
fn empty_array_round_trips_as_empty_document() {
    let mut encoder = Encoder::new();
    let doc = encoder.encode(&Array::new()).unwrap();
    assert_eq!(doc.as_bytes(), &[5, 0, 0, 0, 0]);

    let decoded = Decoder::new().decode(&doc).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn empty_array_short_circuits_count() {
    let mut encoder = Encoder::new();
    let mut builder = dynbson::DocumentBuilder::new();
    let appended = encoder.encode_into(&mut builder, &Array::new()).unwrap();
    assert_eq!(appended, 0);
    assert!(builder.is_empty());
}

#[test]
fn encode_into_reports_visited_entries() {
    let mut array = Array::new();
    array.insert("a", Value::Int(1));
    array.insert("b", Value::Opaque("resource"));
    array.insert("c", Value::Int(3));

    let mut encoder = Encoder::new();
    let mut builder = dynbson::DocumentBuilder::new();
    let visited = encoder.encode_into(&mut builder, &array).unwrap();
    // skipped entries still count as visited
    assert_eq!(visited, 3);
    assert_eq!(builder.len(), 2);
}

#[test]
fn field_order_is_preserved() {
    let mut array = Array::new();
    array.insert("zebra", Value::Int(1));
    array.insert("alpha", Value::Int(2));
    array.push(Value::Int(3));
    array.insert("mike", Value::Int(4));

    let doc = Encoder::new().encode(&array).unwrap();
    let names: Vec<String> = doc
        .fields()
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, ["zebra", "alpha", "0", "mike"]);

    let back = Decoder::new().decode(&doc).unwrap();
    let keys: Vec<Key> = back.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(
        keys,
        [
            Key::Str("zebra".into()),
            Key::Str("alpha".into()),
            Key::Index(0),
            Key::Str("mike".into()),
        ]
    );
}

#[test]
fn integers_narrow_to_32_bits() {
    let mut array = Array::new();
    array.insert("fits", Value::Int(i64::from(i32::MAX)));
    array.insert("wraps", Value::Int(4_294_967_296));
    array.insert("negative", Value::Int(-4_294_967_295));

    let doc = Encoder::new().encode(&array).unwrap();
    let fields = doc.fields().unwrap();
    assert_eq!(fields[0].1, FieldValue::Int32(i32::MAX));
    // 2^32 wraps to 0, 2^32 - 1 below zero wraps to 1
    assert_eq!(fields[1].1, FieldValue::Int32(0));
    assert_eq!(fields[2].1, FieldValue::Int32(1));

    let back = Decoder::new().decode(&doc).unwrap();
    assert_eq!(back.get_str("wraps"), Some(&Value::Int(0)));
}

#[test]
fn in_range_integers_round_trip_exactly() {
    let mut array = Array::new();
    array.insert("min", Value::Int(i64::from(i32::MIN)));
    array.insert("max", Value::Int(i64::from(i32::MAX)));
    array.insert("zero", Value::Int(0));
    assert_eq!(round_trip(&array), array);
}

#[test]
fn floats_round_trip_bit_exact() {
    let mut array = Array::new();
    array.insert("pi", Value::Float(std::f64::consts::PI));
    array.insert("tiny", Value::Float(f64::MIN_POSITIVE));
    array.insert("huge", Value::Float(f64::MAX));
    array.insert("neg", Value::Float(-0.0));
    let back = round_trip(&array);
    assert_eq!(back, array);

    // float equality treats -0.0 as 0.0; compare raw bits for the sign
    match back.get_str("neg") {
        Some(Value::Float(f)) => assert_eq!(f.to_bits(), (-0.0f64).to_bits()),
        other => panic!("expected a float back, got {other:?}"),
    }
}

#[test]
fn nested_arrays_encode_as_object_fields() {
    let mut inner = Array::new();
    inner.push(Value::Int(2));
    inner.push(Value::Int(3));
    let mut array = Array::new();
    array.insert("a", Value::Int(1));
    array.insert("list", Value::Array(inner));

    let doc = Encoder::new().encode(&array).unwrap();
    let fields = doc.fields().unwrap();
    // the nested value carries the object tag even for a pure list
    let nested = match &fields[1].1 {
        FieldValue::Document(doc) => doc.clone(),
        other => panic!("expected object field, got {other:?}"),
    };
    let names: Vec<String> = nested
        .fields()
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, ["0", "1"]);

    assert_eq!(round_trip(&array), array);
}

#[test]
fn decoder_accepts_array_tag_for_nested_documents() {
    // produced by a foreign writer that uses the array tag
    let mut inner = dynbson::DocumentBuilder::new();
    inner.append_i32("0", 5);
    let mut outer = dynbson::DocumentBuilder::new();
    outer.append_array("list", &inner.finalize());
    let doc = outer.finalize();

    let array = Decoder::new().decode(&doc).unwrap();
    let inner = match array.get_str("list") {
        Some(Value::Array(inner)) => inner,
        other => panic!("expected array, got {other:?}"),
    };
    assert_eq!(inner.get_index(0), Some(&Value::Int(5)));
}

#[test]
fn deep_nesting_round_trips() {
    let mut array = Array::new();
    array.insert("leaf", Value::Int(0));
    for level in 1..40 {
        let mut outer = Array::new();
        outer.insert("level", Value::Int(level));
        outer.insert("child", Value::Array(array));
        array = outer;
    }
    assert_eq!(round_trip(&array), array);
}

#[test]
fn decode_bytes_validates_the_frame() {
    let mut decoder = Decoder::new();
    assert!(decoder.decode_bytes(&[5, 0, 0, 0, 0]).unwrap().is_empty());
    assert!(decoder.decode_bytes(&[9, 0, 0, 0, 0]).is_err());
}

#[test]
fn documents_round_trip_through_bytes() {
    let mut array = Array::new();
    array.insert("k", Value::Str("v".into()));
    let doc = Encoder::new().encode(&array).unwrap();
    let reparsed = Document::from_bytes(doc.as_bytes().to_vec()).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(Decoder::new().decode(&reparsed).unwrap(), array);
}

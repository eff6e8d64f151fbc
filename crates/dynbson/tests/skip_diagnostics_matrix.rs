use dynbson::{
    Array, Decoder, Diagnostic, DocumentBuilder, Encoder, Key, ObjectId, Value,
};

#[test]
fn opaque_values_are_skipped_with_a_diagnostic() {
    let mut array = Array::new();
    array.insert("a", Value::Int(1));
    array.insert("conn", Value::Opaque("resource"));
    array.insert("b", Value::Int(2));

    let mut encoder = Encoder::new();
    let doc = encoder.encode(&array).unwrap();

    let names: Vec<String> = doc
        .fields()
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, ["a", "b"]);

    assert_eq!(
        encoder.diagnostics,
        [Diagnostic::UnsupportedElement {
            key: Key::Str("conn".into()),
            kind: "resource",
        }]
    );
    assert_eq!(
        encoder.diagnostics[0].to_string(),
        "array=>bson: type resource not supported"
    );
}

#[test]
fn skipped_entries_still_count_as_visited() {
    let mut array = Array::new();
    array.push(Value::Opaque("closure"));
    array.push(Value::Opaque("closure"));
    array.push(Value::Int(9));

    let mut encoder = Encoder::new();
    let mut builder = DocumentBuilder::new();
    let visited = encoder.encode_into(&mut builder, &array).unwrap();
    assert_eq!(visited, 3);
    assert_eq!(builder.len(), 1);
    assert_eq!(encoder.diagnostics.len(), 2);
}

#[test]
fn unrepresentable_fields_are_skipped_with_diagnostics() {
    let mut builder = DocumentBuilder::new();
    builder.append_i64("big", 1 << 40);
    builder.append_i32("keep", 7);
    builder.append_timestamp("optime", 1, 2);
    builder.append_symbol("sym", "s");
    builder.append_code("js", "f()");
    builder.append_decimal128("dec", &[0; 16]);
    builder.append_min_key("low");
    builder.append_max_key("high");
    let doc = builder.finalize();

    let mut decoder = Decoder::new();
    let array = decoder.decode(&doc).unwrap();

    assert_eq!(array.len(), 1);
    assert_eq!(array.get_str("keep"), Some(&Value::Int(7)));

    let skipped: Vec<(String, u8)> = decoder
        .diagnostics
        .iter()
        .map(|d| match d {
            Diagnostic::UnsupportedField { name, element_type } => {
                (name.clone(), *element_type)
            }
            other => panic!("unexpected diagnostic {other:?}"),
        })
        .collect();
    assert_eq!(
        skipped,
        [
            ("big".to_owned(), 0x12),
            ("optime".to_owned(), 0x11),
            ("sym".to_owned(), 0x0e),
            ("js".to_owned(), 0x0d),
            ("dec".to_owned(), 0x13),
            ("low".to_owned(), 0xff),
            ("high".to_owned(), 0x7f),
        ]
    );
    assert_eq!(
        decoder.diagnostics[0].to_string(),
        "bson=>array: type 0x12 not supported"
    );
}

#[test]
fn code_with_scope_and_db_pointer_are_skipped() {
    let mut scope = DocumentBuilder::new();
    scope.append_i32("x", 1);
    let scope = scope.finalize();

    let mut builder = DocumentBuilder::new();
    builder.append_code_with_scope("cws", "g()", &scope);
    builder.append_db_pointer(
        "ptr",
        "db.coll",
        &ObjectId::from_hex("507f191e810c19729de860ea").unwrap(),
    );
    builder.append_bool("keep", true);
    let doc = builder.finalize();

    let mut decoder = Decoder::new();
    let array = decoder.decode(&doc).unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array.get_str("keep"), Some(&Value::Bool(true)));
    assert_eq!(decoder.diagnostics.len(), 2);
}

#[test]
fn undefined_decodes_as_null_without_diagnostic() {
    let mut builder = DocumentBuilder::new();
    builder.append_undefined("ghost");
    let doc = builder.finalize();

    let mut decoder = Decoder::new();
    let array = decoder.decode(&doc).unwrap();
    assert_eq!(array.get_str("ghost"), Some(&Value::Null));
    assert!(decoder.diagnostics.is_empty());
}

#[test]
fn diagnostics_accumulate_across_conversions() {
    let mut encoder = Encoder::new();
    let mut array = Array::new();
    array.push(Value::Opaque("resource"));
    encoder.encode(&array).unwrap();
    encoder.encode(&array).unwrap();
    assert_eq!(encoder.diagnostics.len(), 2);
}

#[test]
fn nested_skips_surface_on_the_same_instance() {
    let mut inner = Array::new();
    inner.insert("deep", Value::Opaque("resource"));
    let mut array = Array::new();
    array.insert("outer", Value::Array(inner));

    let mut encoder = Encoder::new();
    encoder.encode(&array).unwrap();
    assert_eq!(
        encoder.diagnostics,
        [Diagnostic::UnsupportedElement {
            key: Key::Str("deep".into()),
            kind: "resource",
        }]
    );
}

//! Integration tests for the extraction engine.

use serde::Deserialize;
use serde_json::{json, Value};
use targo::{
    extract, getargs, getargs_in, Behavior, ExtractError, Extraction, Transform, Type,
    TypeRegistry, ValueKind,
};

fn named(name: &str) -> Behavior {
    Behavior::named(name)
}

// =============================================================================
// ORDERING
// =============================================================================

#[test]
fn default_options_return_args_in_order() {
    let args = extract([named("foo"), named("bar")])
        .from([json!("arg1"), json!("arg2")])
        .unwrap();

    assert_eq!(args["foo"], "arg1");
    assert_eq!(args["bar"], "arg2");
}

#[test]
fn left_over_args_are_dropped() {
    let args = extract([named("foo"), named("bar")])
        .from([json!("arg1"), json!("arg2"), json!("arg3")])
        .unwrap();

    assert_eq!(args.len(), 2);
    assert!(args.values().all(|v| v != "arg3"));
}

#[test]
fn list_holds_an_array() {
    let args = extract([named("foo"), named("rest").list(true)])
        .from([json!("arg1"), json!("arg2"), json!("arg3")])
        .unwrap();

    assert_eq!(args["foo"], "arg1");
    assert_eq!(args["rest"], json!(["arg2", "arg3"]));
}

#[test]
fn earlier_descriptor_claims_shared_candidate() {
    let args = extract([
        named("first").kind(ValueKind::String),
        named("second").kind(ValueKind::String),
    ])
    .from([json!("only")])
    .unwrap();

    assert_eq!(args["first"], "only");
    assert_eq!(args["second"], Value::Null);
}

// =============================================================================
// TEST PREDICATES
// =============================================================================

#[test]
fn test_function_sorts_parameters() {
    let args = extract([
        named("foo").kind(ValueKind::String),
        named("bar").kind(ValueKind::Object),
        named("baz").kind(ValueKind::Number).list(true),
    ])
    .from([json!(10), json!({"callback": true}), json!(20), json!("foo")])
    .unwrap();

    assert_eq!(args["foo"], "foo");
    assert_eq!(args["bar"], json!({"callback": true}));
    assert_eq!(args["baz"], json!([10, 20]));
}

#[test]
fn bucketing_does_not_depend_on_position() {
    let types = || {
        extract([
            named("name").kind(ValueKind::String),
            named("flag").kind(ValueKind::Bool),
            named("nums").kind(ValueKind::Number).list(true),
        ])
    };

    let a = types()
        .from([json!("x"), json!(1), json!(true), json!(2)])
        .unwrap();
    let b = types()
        .from([json!(1), json!(2), json!(true), json!("x")])
        .unwrap();
    let c = types()
        .from([json!(true), json!(1), json!("x"), json!(2)])
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a["nums"], json!([1, 2]));
}

#[test]
fn test_returns_only_first_item_when_not_a_list() {
    let args = extract([named("foo").kind(ValueKind::String)])
        .from([json!(10), json!("arg1"), json!(20), json!("arg2")])
        .unwrap();

    assert_eq!(args["foo"], "arg1");
}

#[test]
fn guarded_descriptor_without_match_is_null() {
    let args = extract([named("any"), named("cb").kind(ValueKind::Object)])
        .from([json!("a"), json!("b")])
        .unwrap();

    assert_eq!(args["any"], "a");
    assert!(args.contains_key("cb"));
    assert_eq!(args["cb"], Value::Null);
}

#[test]
fn default_value_applies_when_nothing_matches() {
    let args = extract([named("render").kind(ValueKind::Bool).default_value(true)])
        .from([json!("nope")])
        .unwrap();

    assert_eq!(args["render"], true);
}

#[test]
fn test_sees_earlier_fields() {
    let args = extract([
        named("mode").kind(ValueKind::String),
        named("size").test(|v, result| result["mode"] == "sized" && v.is_number()),
    ])
    .from([json!(3), json!("sized")])
    .unwrap();

    assert_eq!(args["size"], 3);
}

// =============================================================================
// PARSE
// =============================================================================

#[test]
fn parse_function_modifies_arguments() {
    let args = extract([named("foo").parse(|v, _| json!(format!("{}bar", v.as_str().unwrap())))])
        .from([json!("foo")])
        .unwrap();

    assert_eq!(args["foo"], "foobar");
}

#[test]
fn parse_function_allows_object_decomposition() {
    let args = extract([named("foo").parse(|v, result| {
        result.insert("bar".into(), v["bar"].clone());
        result.insert("baz".into(), v["baz"].clone());
        v
    })])
    .from([json!({"bar": "bar", "baz": "baz"})])
    .unwrap();

    assert_eq!(args["foo"], json!({"bar": "bar", "baz": "baz"}));
    assert_eq!(args["bar"], "bar");
    assert_eq!(args["baz"], "baz");
}

#[test]
fn builtin_transform_collapses_flag() {
    let args = extract([named("msg").kind(ValueKind::String), named("flag").transform(Transform::Bool)])
        .from([json!("hi"), json!(0)])
        .unwrap();

    assert_eq!(args["flag"], false);
}

// =============================================================================
// NAMES & ERRORS
// =============================================================================

#[test]
fn strings_as_types() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            "foo",
            Behavior::new()
                .equals("foo")
                .parse(|v, _| json!(format!("{}bar", v.as_str().unwrap()))),
        )
        .unwrap();

    let args = extract(["foo"])
        .using(&registry)
        .from([json!(10), json!("foo"), json!(20)])
        .unwrap();

    assert_eq!(args["foo"], "foobar");
}

#[test]
fn unknown_name_is_type_not_found() {
    let registry = TypeRegistry::new();
    let err = getargs_in(&registry, ["missing"], [json!(1)]).unwrap_err();

    assert!(matches!(err, ExtractError::TypeNotFound { ref name } if name == "missing"));
    assert_eq!(err.to_string(), "Type \"missing\" not found");
}

#[test]
fn nameless_descriptor_is_no_name() {
    let err = getargs([Behavior::new().kind(ValueKind::String)], [json!("x")]).unwrap_err();
    assert!(matches!(err, ExtractError::NoName { .. }));
}

#[test]
fn mixed_references() {
    let mut registry = TypeRegistry::new();
    registry
        .register("count", Behavior::new().kind(ValueKind::Integer))
        .unwrap();
    let callback = Type::new("callback", Behavior::new().kind(ValueKind::Object)).unwrap();

    let args = Extraction::new()
        .with(&callback)
        .with("count")
        .with(named("rest").list(true))
        .using(&registry)
        .from([json!("a"), json!(5), json!({}), json!("b")])
        .unwrap();

    assert_eq!(args["callback"], json!({}));
    assert_eq!(args["count"], 5);
    assert_eq!(args["rest"], json!(["a", "b"]));
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

#[test]
fn curried_and_single_call_forms_agree() {
    let types = || {
        vec![
            named("foo").kind(ValueKind::String),
            named("rest").list(true),
        ]
    };
    let raw = || vec![json!(1), json!("s"), json!(2)];

    let curried = extract(types()).from(raw()).unwrap();
    let single = getargs(types(), raw()).unwrap();
    let again = extract(types()).from(raw()).unwrap();

    assert_eq!(curried, single);
    assert_eq!(curried, again);
}

#[test]
fn from_into_deserializes_record() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Call {
        path: String,
        verbose: bool,
        rest: Vec<i64>,
    }

    let call: Call = extract([
        named("path").kind(ValueKind::String),
        named("verbose").kind(ValueKind::Bool).default_value(false),
        named("rest").kind(ValueKind::Integer).list(true).default_value(json!([])),
    ])
    .from_into([json!(3), json!("/tmp"), json!(4)])
    .unwrap();

    assert_eq!(
        call,
        Call {
            path: "/tmp".into(),
            verbose: false,
            rest: vec![3, 4],
        }
    );
}

#[test]
fn from_into_reports_shape_mismatch() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Strict {
        count: u32,
    }

    let err = extract([named("count")])
        .from_into::<Strict, _>([json!("not a number")])
        .unwrap_err();

    assert!(matches!(err, ExtractError::Convert(_)));
}

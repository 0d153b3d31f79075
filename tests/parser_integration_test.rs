//! Integration tests for isdataat option parsing.

use isdataat::{parse, parse_with_config, Criterion, KeywordConfig, ParseError, ISDATAAT_MAX};

#[test]
fn test_every_bound_offset_parses_as_absolute() {
    for n in (0..=ISDATAAT_MAX).step_by(97).chain([0, 1, ISDATAAT_MAX]) {
        let criterion = parse(&n.to_string()).unwrap();
        assert_eq!(criterion, Criterion::absolute(n), "offset {n}");
    }
}

#[test]
fn test_offsets_above_max_are_out_of_range() {
    for n in [65536u64, 70000, 1_000_000, 4_294_967_295, 4_294_967_296, 9_999_999_999] {
        match parse(&n.to_string()) {
            Err(ParseError::OutOfRange { value, min, max }) => {
                assert_eq!(value, n);
                assert_eq!(min, 0);
                assert_eq!(max, ISDATAAT_MAX);
            }
            other => panic!("Expected OutOfRange for {n}, got {other:?}"),
        }
    }
}

#[test]
fn test_flag_combinations() {
    assert_eq!(parse("30, relative").unwrap(), Criterion::relative(30, false));
    assert_eq!(
        parse("30,relative, rawbytes ").unwrap(),
        Criterion::relative(30, true)
    );
    assert_eq!(
        parse("30,relative,rawbytes").unwrap(),
        Criterion::relative(30, true)
    );
    assert!(matches!(parse("30,rawbytes"), Err(ParseError::Malformed(_))));
}

#[test]
fn test_rejected_inputs() {
    let inputs = [
        "",
        " ",
        "\t\n",
        "abc",
        "-5",
        "5.0",
        "0x10",
        "12345678901",
        "relative",
        "relative,30",
        "30,relative rawbytes",
        "30 , rawbytes , relative",
    ];
    for input in inputs {
        assert!(
            matches!(parse(input), Err(ParseError::Malformed(_))),
            "input {input:?} should be malformed"
        );
    }
}

#[test]
fn test_custom_bounds_apply_to_relative_options() {
    let config = KeywordConfig::new(1, 1500);
    assert_eq!(
        parse_with_config("1500, relative", &config).unwrap(),
        Criterion::relative(1500, false)
    );
    assert!(matches!(
        parse_with_config("0, relative", &config),
        Err(ParseError::OutOfRange { value: 0, min: 1, max: 1500 })
    ));
}

#[test]
fn test_parses_are_independent_values() {
    let mut first = parse("42,relative").unwrap();
    let second = parse("42,relative").unwrap();
    assert_eq!(first, second);

    first = Criterion::absolute(1);
    assert_ne!(first, second);
    assert_eq!(second, Criterion::relative(42, false));
}

#[test]
fn test_criterion_json_round_trip() {
    let criterion = parse("30,relative,rawbytes").unwrap();
    let json = serde_json::to_string(&criterion).unwrap();
    assert_eq!(json, r#"{"offset":30,"relative":true,"rawbytes":true}"#);

    let decoded: Criterion = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, criterion);

    let invalid = serde_json::from_str::<Criterion>(r#"{"offset":30,"rawbytes":true}"#);
    assert!(invalid.is_err());
}

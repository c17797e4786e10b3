use super::*;

#[test]
fn exact_requirement_must_match_measured_value() {
    assert!(is_measure_spec_compatible(
        SizeSpec::Exactly(100),
        SizeSpec::Exactly(100),
        100
    ));
    assert!(!is_measure_spec_compatible(
        SizeSpec::Exactly(100),
        SizeSpec::Exactly(101),
        100
    ));
}

#[test]
fn at_most_accepts_anything_that_still_fits() {
    assert!(is_measure_spec_compatible(
        SizeSpec::Exactly(100),
        SizeSpec::AtMost(150),
        100
    ));
    assert!(is_measure_spec_compatible(
        SizeSpec::AtMost(300),
        SizeSpec::AtMost(120),
        100
    ));
    assert!(!is_measure_spec_compatible(
        SizeSpec::AtMost(300),
        SizeSpec::AtMost(90),
        100
    ));
}

#[test]
fn unspecified_is_always_compatible() {
    assert!(is_measure_spec_compatible(
        SizeSpec::Exactly(10),
        SizeSpec::Unspecified,
        10_000
    ));
}

#[test]
fn identical_requests_are_compatible_regardless_of_result() {
    assert!(is_measure_spec_compatible(
        SizeSpec::AtMost(50),
        SizeSpec::AtMost(50),
        50
    ));
}

#[test]
fn constraints_check_both_axes() {
    let c = SizeConstraints::exactly(100, 200);
    let measured = MeasuredSize::new(100, 200);
    assert!(c.is_compatible(measured, SizeSpec::AtMost(150), SizeSpec::Exactly(200)));
    assert!(!c.is_compatible(measured, SizeSpec::AtMost(150), SizeSpec::Exactly(199)));
}

#[test]
fn size_spec_json_shape_is_tagged() {
    let v = serde_json::to_value(SizeSpec::AtMost(12)).unwrap();
    assert_eq!(v, serde_json::json!({ "mode": "at_most", "size": 12 }));
    let u: SizeSpec = serde_json::from_value(serde_json::json!({ "mode": "unspecified" })).unwrap();
    assert_eq!(u, SizeSpec::Unspecified);
}

#[test]
fn size_specs_parse_from_cli_strings() {
    assert_eq!("exactly:100".parse::<SizeSpec>().unwrap(), SizeSpec::Exactly(100));
    assert_eq!("AT_MOST:150".parse::<SizeSpec>().unwrap(), SizeSpec::AtMost(150));
    assert_eq!("unspecified".parse::<SizeSpec>().unwrap(), SizeSpec::Unspecified);
    assert!("exactly".parse::<SizeSpec>().is_err());
    assert!("exactly:-3".parse::<SizeSpec>().is_err());
    assert!("unspecified:3".parse::<SizeSpec>().is_err());
    assert!("sideways:3".parse::<SizeSpec>().is_err());
}

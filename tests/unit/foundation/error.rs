use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MountPlanError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MountPlanError::consistency("x")
            .to_string()
            .contains("consistency violation:")
    );
    assert!(
        MountPlanError::usage("x")
            .to_string()
            .contains("usage error:")
    );
    assert!(
        MountPlanError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MountPlanError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: MountPlanError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, MountPlanError::Serde(_)));
}

use super::*;

const DOC: &str = r#"{
    "root_component": { "id": 1, "name": "Root", "global_key": "root" },
    "component_tree_id": 9,
    "size_constraints": {
        "width": { "mode": "exactly", "size": 320 },
        "height": { "mode": "unspecified" }
    },
    "source": "set_root_async",
    "root": {
        "bounds": { "x0": 0.0, "y0": 0.0, "x1": 320.0, "y1": 480.0 },
        "children": [
            { "bounds": { "x0": 0.0, "y0": 0.0, "x1": 320.0, "y1": 40.0 }, "has_content": true }
        ]
    }
}"#;

#[test]
fn request_carries_document_fields() {
    let doc = TreeDocument::from_reader(DOC.as_bytes()).unwrap();
    let req = doc.request();
    assert_eq!(req.component_tree_id, 9);
    assert_eq!(req.source, RenderSource::SetRootAsync);
    assert_eq!(req.root.children.len(), 1);
    assert_eq!(
        req.size_constraints,
        SizeConstraints::new(
            crate::foundation::measure::SizeSpec::Exactly(320),
            crate::foundation::measure::SizeSpec::Unspecified
        )
    );
    assert_eq!(req.opts, ReduceOpts::default());
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = TreeDocument::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("validation error: parse tree document JSON"));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = TreeDocument::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

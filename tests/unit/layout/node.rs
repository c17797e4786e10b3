use super::*;

#[test]
fn resolve_nested_follows_chained_delegation() {
    let leaf = LayoutNode::new(Rect::new(0.0, 0.0, 5.0, 5.0)).content();
    let holder = LayoutNode::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .delegating_to(LayoutNode::new(Rect::ZERO).delegating_to(leaf.clone()));
    assert!(holder.is_nested_tree_holder());
    assert_eq!(holder.resolve_nested(), &leaf);
}

#[test]
fn json_defaults_fill_missing_fields() {
    let node: LayoutNode = serde_json::from_value(serde_json::json!({
        "bounds": { "x0": 0.0, "y0": 0.0, "x1": 10.0, "y1": 20.0 },
        "has_content": true,
    }))
    .unwrap();
    assert!(node.has_content);
    assert!(!node.needs_host);
    assert!(node.children.is_empty());
    assert_eq!(node.bounds.height(), 20.0);
}

#[test]
fn visibility_defaults_request_on_visible_only() {
    let v = VisibilityDecl::default();
    assert!(v.on_visible);
    assert!(!v.on_invisible);
}

#[test]
fn layout_root_skips_root_holder() {
    let root = LayoutNode::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .delegating_to(LayoutNode::new(Rect::new(0.0, 0.0, 10.0, 10.0)).content());
    let nested = root.nested_tree.as_deref().unwrap();
    assert!(root.is_layout_root(nested));
    assert!(!root.is_layout_root(&root));

    let plain = LayoutNode::new(Rect::ZERO);
    assert!(plain.is_layout_root(&plain));
    assert!(!plain.is_layout_root(&plain.clone()));
}

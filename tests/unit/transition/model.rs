use super::*;

fn comp() -> ComponentInfo {
    ComponentInfo::new(7, "Card", "root,card")
}

#[test]
fn optimistic_transitions_are_also_declared() {
    let mut data = TransitionData::default();
    assert!(data.is_empty());
    let t = Transition::for_id(TransitionId::global("a"), &[AnimatedProperty::X], 200);
    data.add_optimistic(t.clone());
    assert_eq!(data.transitions, vec![t.clone()]);
    assert_eq!(data.optimistic_transitions, vec![t]);
    assert!(!data.is_empty());
}

#[test]
fn dependency_creator_sees_previous_deps() {
    let twd = TransitionWithDependency::new(
        "k",
        comp(),
        serde_json::json!(2),
        |prev: Option<&serde_json::Value>,
         deps: &serde_json::Value|
         -> anyhow::Result<Option<Transition>> {
            Ok((prev != Some(deps)).then(|| {
                Transition::for_id(TransitionId::global("k"), &[AnimatedProperty::Alpha], 100)
            }))
        },
    );
    let same = TransitionWithDependency::new(
        "k",
        comp(),
        serde_json::json!(2),
        |_: Option<&serde_json::Value>, _: &serde_json::Value| -> anyhow::Result<Option<Transition>> {
            Ok(None)
        },
    );
    let older = TransitionWithDependency::new(
        "k",
        comp(),
        serde_json::json!(1),
        |_: Option<&serde_json::Value>, _: &serde_json::Value| -> anyhow::Result<Option<Transition>> {
            Ok(None)
        },
    );
    assert!(twd.create_transition(Some(&same)).unwrap().is_none());
    assert!(twd.create_transition(Some(&older)).unwrap().is_some());
    assert!(twd.create_transition(None).unwrap().is_some());
}

#[test]
fn scoped_source_errors_propagate_to_caller() {
    let src = ScopedTransitionSource::new("root", comp(), |_: &ComponentInfo| -> anyhow::Result<Option<Transition>> {
        Err(anyhow::anyhow!("bad transition"))
    });
    let err = src.create_transition().unwrap_err();
    assert!(err.to_string().contains("bad transition"));
    assert!(format!("{src:?}").contains("Card"));
}

#[test]
fn transition_json_omits_unset_endpoints() {
    let t = Transition::for_id(TransitionId::global("a"), &[AnimatedProperty::Width], 50);
    let v = serde_json::to_value(&t).unwrap();
    assert!(v.get("appear_from").is_none());
    let t = t.appearing_from(0.0);
    assert_eq!(t.appear_from, Some(0.0));
}

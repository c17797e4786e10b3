use super::*;

fn item(seq: u32, unit_type: OutputUnitType) -> AnimatableItem {
    AnimatableItem {
        id: RenderUnitId::new(unit_type, seq),
        absolute_bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
        unit_type,
        transition_id: Some(TransitionId::global("t")),
    }
}

#[test]
fn roles_are_exclusive() {
    let mut g = AffinityGroup::new();
    g.add(AffinityRole::Content, item(1, OutputUnitType::Content))
        .unwrap();
    assert!(
        g.add(AffinityRole::Content, item(2, OutputUnitType::Content))
            .is_err()
    );
    g.add(AffinityRole::Host, item(3, OutputUnitType::Host)).unwrap();
    assert_eq!(g.len(), 2);
    assert_eq!(g.get(AffinityRole::Content).unwrap().id.sequence(), 1);
}

#[test]
fn most_relevant_prefers_content() {
    let mut g = AffinityGroup::new();
    g.add(AffinityRole::Border, item(4, OutputUnitType::Border))
        .unwrap();
    assert_eq!(g.most_relevant().unwrap().unit_type, OutputUnitType::Border);
    g.add(AffinityRole::Content, item(5, OutputUnitType::Content))
        .unwrap();
    assert_eq!(g.most_relevant().unwrap().unit_type, OutputUnitType::Content);
}

#[test]
fn iteration_is_in_role_order() {
    let mut g = AffinityGroup::new();
    g.add(AffinityRole::Border, 3).unwrap();
    g.add(AffinityRole::Content, 1).unwrap();
    let roles = g.roles().collect::<Vec<_>>();
    assert_eq!(roles, vec![AffinityRole::Content, AffinityRole::Border]);
    assert!(AffinityGroup::<u8>::new().is_empty());
}

#[test]
fn unit_types_map_to_matching_roles() {
    assert_eq!(
        AffinityRole::for_unit_type(OutputUnitType::Host),
        AffinityRole::Host
    );
    assert_eq!(
        AffinityRole::for_unit_type(OutputUnitType::Border),
        AffinityRole::Border
    );
}

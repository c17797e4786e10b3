use super::*;

#[test]
fn type_tag_lives_in_high_bits() {
    let id = RenderUnitId::new(OutputUnitType::Host, 42);
    assert_eq!(id.type_tag(), 3);
    assert_eq!(id.sequence(), 42);
    assert_eq!(id.unit_type(), Some(OutputUnitType::Host));
    assert_eq!(type_from_id(id.0), 3);
    assert_eq!(id.0, (3u64 << 32) | 42);
}

#[test]
fn root_host_is_zero_and_untyped_sequence() {
    assert!(ROOT_HOST_ID.is_root_host());
    assert_eq!(ROOT_HOST_ID.sequence(), 0);
    assert!(!RenderUnitId::new(OutputUnitType::Border, 1).is_root_host());
}

#[test]
fn root_host_decodes_as_host_despite_zero_tag() {
    assert_eq!(ROOT_HOST_ID.type_tag(), 0);
    assert_eq!(type_from_id(ROOT_HOST_ID.0), 0);
    assert_eq!(ROOT_HOST_ID.unit_type(), Some(OutputUnitType::Host));
    assert_eq!(
        RenderUnitId::new(OutputUnitType::Content, 1).unit_type(),
        Some(OutputUnitType::Content)
    );
}

#[test]
fn unknown_tags_do_not_map_to_a_unit_type() {
    assert_eq!(RenderUnitId(9u64 << 32).unit_type(), None);
}

#[test]
fn generator_is_monotonic_and_resettable() {
    let ids = LayoutStateIdGenerator::new();
    let a = ids.next_id();
    let b = ids.next_id();
    assert_eq!(a, LayoutStateId(1));
    assert!(b > a);
    ids.reset();
    assert_eq!(ids.next_id(), LayoutStateId(1));
}

#[test]
fn generator_hands_out_unique_ids_across_threads() {
    let ids = LayoutStateIdGenerator::new();
    let mut all = std::thread::scope(|s| {
        let handles = (0..4)
            .map(|_| s.spawn(|| (0..100).map(|_| ids.next_id()).collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 400);
}

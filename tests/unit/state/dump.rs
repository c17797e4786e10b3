use super::*;
use crate::{
    foundation::{core::Rect, ids::LayoutStateIdGenerator, measure::SizeConstraints},
    layout::{
        node::{ComponentInfo, LayoutNode},
        request::{DiagnosticsConfig, ReduceOpts, ReduceRequest},
    },
    reduce::builder::reduce_with_ids,
};

fn state(diagnostics: DiagnosticsConfig) -> LayoutState {
    let root = LayoutNode::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .with_component(ComponentInfo::new(1, "Root", "r"))
        .content();
    let req = ReduceRequest::new(
        &root,
        ComponentInfo::new(1, "Root", "r"),
        1,
        SizeConstraints::unspecified(),
    )
    .with_opts(ReduceOpts {
        diagnostics,
        ..ReduceOpts::default()
    });
    reduce_with_ids(&req, &LayoutStateIdGenerator::new())
        .unwrap()
        .commit()
}

#[test]
fn dump_lists_units_with_hosts() {
    let s = state(DiagnosticsConfig {
        debug_mode: true,
        end_to_end_test_run: false,
    });
    let dump = s.dump_mount_sequence().unwrap();
    let content = s.mountable_output_at(1).id;
    assert_eq!(
        dump,
        format!(
            "LayoutState w/ 2 mountable outputs, root: Root\n  [0] id: 0, host: -1, component: Root\n  [1] id: {content}, host: 0, component: Root\n"
        )
    );
}

#[test]
fn dump_is_allowed_in_end_to_end_runs() {
    let s = state(DiagnosticsConfig {
        debug_mode: false,
        end_to_end_test_run: true,
    });
    assert!(s.dump_mount_sequence().is_ok());
}

#[test]
fn dump_outside_debug_is_a_usage_error() {
    let s = state(DiagnosticsConfig {
        debug_mode: false,
        end_to_end_test_run: false,
    });
    let err = s.dump_mount_sequence().unwrap_err();
    assert!(matches!(err, MountPlanError::Usage(_)));
}

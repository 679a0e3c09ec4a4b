//! End to end runs: identity resolution, walk and transfer together

mod support;

use std::ops::ControlFlow;

use common::identity::{resolve_identity, IdentityError};
use common::inspect::Inspector;
use common::permission::{PermissionIdentity, Role};
use common::prefix::PathPrefix;
use common::testkit::Call;
use common::transfer::Transferor;
use common::walker::Walker;

use support::{scenario_drive, TARGET, TARGET_EMAIL};

#[tokio::test]
async fn test_resolve_identity() {
    let s = scenario_drive();

    let identity = resolve_identity(&s.drive, TARGET_EMAIL).await.unwrap();
    assert_eq!(identity, PermissionIdentity::from(TARGET));
    assert_eq!(
        s.drive.calls(),
        vec![Call::PermissionIdForEmail(TARGET_EMAIL.to_string())]
    );
}

#[tokio::test]
async fn test_resolve_identity_failure() {
    let s = scenario_drive();

    let err = resolve_identity(&s.drive, "nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::Lookup { ref email, .. } if email == "nobody@example.com"));
}

#[tokio::test]
async fn test_resolve_identity_rejects_blank_email() {
    let s = scenario_drive();

    let err = resolve_identity(&s.drive, "  ").await.unwrap_err();
    assert!(matches!(err, IdentityError::EmptyEmail));
    assert!(s.drive.calls().is_empty());
}

#[tokio::test]
async fn test_run_inserts_ownership_below_path() {
    let s = scenario_drive();
    let prefix = PathPrefix::parse("A").unwrap();
    let identity = resolve_identity(&s.drive, TARGET_EMAIL).await.unwrap();

    let mut transferor = Transferor::new(&s.drive, identity.clone());
    let flow = Walker::new(&s.drive, &prefix).walk(&mut transferor).await;
    assert_eq!(flow, ControlFlow::Continue(()));

    let owned = s.drive.owned_by(&identity);
    assert!(owned.contains(&s.a));
    assert!(owned.contains(&s.a_file));
    assert!(owned.contains(&s.b));
    assert!(owned.contains(&s.b_file));
    assert!(!owned.contains(&s.z));
    assert!(!owned.contains(&s.z_file));

    let report = transferor.report();
    // the second visit of B reuses the record fetched before descending
    assert_eq!(report.created, 4);
    assert_eq!(report.done, 1);
    assert_eq!(report.already_owned, 0);
    assert_eq!(report.failed, 0);
    assert!(!report.stopped_at_root);
}

#[tokio::test]
async fn test_run_stops_after_top_level_update() {
    let s = scenario_drive();
    for id in [&s.a, &s.a_file, &s.b, &s.b_file, &s.z, &s.z_file] {
        s.drive.grant(id, TARGET, Role::Writer);
    }
    let prefix = PathPrefix::parse("A").unwrap();
    let identity = PermissionIdentity::from(TARGET);

    let mut transferor = Transferor::new(&s.drive, identity.clone());
    let flow = Walker::new(&s.drive, &prefix).walk(&mut transferor).await;

    assert_eq!(flow, ControlFlow::Break(()));
    assert!(transferor.report().stopped_at_root);

    // the top level folder is the very last thing touched
    let calls = s.drive.calls();
    match calls.last() {
        Some(Call::UpdatePermission { node_id, .. }) => assert_eq!(node_id, &s.a),
        other => panic!("expected the last call to update A, got {:?}", other),
    }
    assert!(!calls.contains(&Call::GetNode(s.z.clone())));
}

#[tokio::test]
async fn test_descendants_change_before_top_level() {
    let s = scenario_drive();
    for id in [&s.a, &s.a_file, &s.b, &s.b_file] {
        s.drive.grant(id, TARGET, Role::Writer);
    }
    let prefix = PathPrefix::parse("A").unwrap();

    let mut transferor = Transferor::new(&s.drive, PermissionIdentity::from(TARGET));
    let _ = Walker::new(&s.drive, &prefix).walk(&mut transferor).await;

    let updated: Vec<String> = s
        .drive
        .mutations()
        .into_iter()
        .filter_map(|c| match c {
            Call::UpdatePermission { node_id, .. } => Some(node_id),
            _ => None,
        })
        .collect();
    assert_eq!(updated, vec![s.a_file, s.b.clone(), s.b_file, s.b, s.a]);
}

#[tokio::test]
async fn test_second_visit_of_folder_updates_again() {
    let s = scenario_drive();
    let prefix = PathPrefix::parse("A").unwrap();
    let identity = PermissionIdentity::from(TARGET);

    let mut transferor = Transferor::new(&s.drive, identity.clone());
    let _ = Walker::new(&s.drive, &prefix).walk(&mut transferor).await;

    let for_b: Vec<Call> = s
        .drive
        .calls()
        .into_iter()
        .filter(|c| match c {
            Call::GetPermission { node_id, .. }
            | Call::UpdatePermission { node_id, .. }
            | Call::InsertPermission { node_id, .. } => node_id == &s.b,
            _ => false,
        })
        .collect();
    assert_eq!(for_b.len(), 4);
    assert!(matches!(for_b[0], Call::GetPermission { .. }));
    assert!(matches!(for_b[1], Call::InsertPermission { .. }));
    assert!(matches!(for_b[2], Call::GetPermission { .. }));
    assert!(matches!(for_b[3], Call::UpdatePermission { .. }));
}

#[tokio::test]
async fn test_rerun_is_a_no_op() {
    let s = scenario_drive();
    let prefix = PathPrefix::parse("A").unwrap();
    let identity = PermissionIdentity::from(TARGET);

    let mut first = Transferor::new(&s.drive, identity.clone());
    let _ = Walker::new(&s.drive, &prefix).walk(&mut first).await;
    s.drive.clear_calls();

    let mut second = Transferor::new(&s.drive, identity).show_already_owned(false);
    let _ = Walker::new(&s.drive, &prefix).walk(&mut second).await;

    assert!(s.drive.mutations().is_empty());
    assert_eq!(second.report().already_owned, second.report().total());
}

#[tokio::test]
async fn test_dry_run_never_mutates() {
    let s = scenario_drive();
    let prefix = PathPrefix::parse("A").unwrap();

    let mut inspector = Inspector::new(PermissionIdentity::from(TARGET));
    let flow = Walker::new(&s.drive, &prefix).walk(&mut inspector).await;

    assert_eq!(flow, ControlFlow::Continue(()));
    assert_eq!(inspector.visited(), 5);
    assert_eq!(inspector.untitled(), 0);
    assert!(s.drive.mutations().is_empty());
}

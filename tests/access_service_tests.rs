use async_trait::async_trait;
use cim_domain_approval::{
    AccessDecision, AccessRequest, AccessService, AccessServiceConfig, ApprovalError,
    ApprovalResult, ApprovalStatus, DenyReason, DerivedStatus, GroupApprovalStatus, GroupKey,
    GroupParent, GroupSendingStatus, InMemoryWorkItemStore, MatrixHandle, MembershipResolver,
    Milestone, Permission, PermissionRule, Quarter, RecordingAuditSink, Role, RuleKey,
    SendingStatus, StaticMembership, StaticRuleSource, View, WorkItem, WorkItemStore,
};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Store {}

    #[async_trait]
    impl WorkItemStore for Store {
        async fn fetch_items(&self, group: &GroupKey) -> ApprovalResult<Vec<WorkItem>>;
    }
}

mock! {
    pub Membership {}

    #[async_trait]
    impl MembershipResolver for Membership {
        async fn resolve_role(
            &self,
            identity: &str,
            group: &GroupKey,
        ) -> ApprovalResult<Option<Role>>;
    }
}

fn quarter() -> Quarter {
    Quarter::new(2025, 1).unwrap()
}

fn proposal(id: &str) -> GroupKey {
    GroupKey::proposal(id, quarter(), "ACME")
}

fn sent_approved() -> DerivedStatus {
    DerivedStatus::new(GroupSendingStatus::Sent, GroupApprovalStatus::Approved, true)
}

fn rules() -> Vec<PermissionRule> {
    vec![
        PermissionRule::new(
            RuleKey::new(Role::new("Approver"), &sent_approved(), View::Cost, Milestone::Draft),
            Permission::View,
        ),
        PermissionRule::new(
            RuleKey::new(
                Role::finance_operations(),
                &sent_approved(),
                View::Invoice,
                Milestone::Final,
            ),
            Permission::Edit,
        ),
    ]
}

fn approved_items(group: &GroupKey, approval: ApprovalStatus) -> Vec<WorkItem> {
    vec![
        WorkItem::new(group.clone(), SendingStatus::Sent, ApprovalStatus::Approved, true),
        WorkItem::new(group.clone(), SendingStatus::Sent, approval, true),
    ]
}

async fn fixture() -> (AccessService, Arc<RecordingAuditSink>) {
    let store = InMemoryWorkItemStore::new();
    store
        .extend(approved_items(&proposal("P-1"), ApprovalStatus::Approved))
        .await;
    store
        .extend(approved_items(&proposal("P-2"), ApprovalStatus::PartiallyApproved))
        .await;

    let membership = StaticMembership::new();
    membership
        .grant(
            "ana@example.com",
            GroupParent::Proposal("P-1".to_string()),
            Role::new("Approver"),
        )
        .await;
    membership.grant_finance_operations("ops@example.com").await;

    let matrix = MatrixHandle::load(&StaticRuleSource::new(rules())).unwrap();
    let audit = Arc::new(RecordingAuditSink::new());
    let service = AccessService::new(Arc::new(store), Arc::new(membership), matrix)
        .with_audit_sink(audit.clone())
        .with_config(AccessServiceConfig {
            audit_grants: true,
            audit_denials: true,
        });
    (service, audit)
}

#[tokio::test]
async fn member_with_rule_is_granted() {
    let (service, audit) = fixture().await;
    let outcome = service
        .check_access(
            "ana@example.com",
            &proposal("P-1"),
            &AccessRequest::new(View::Cost, false, Permission::View),
        )
        .await
        .unwrap();

    assert!(outcome.is_granted());
    assert_eq!(outcome.role, Some(Role::new("Approver")));
    assert_eq!(outcome.derived, Some(sent_approved()));

    let records = audit.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].identity, "ana@example.com");
}

#[tokio::test]
async fn caller_without_membership_is_denied() {
    let (service, audit) = fixture().await;
    let outcome = service
        .check_access(
            "ana@example.com",
            &proposal("P-2"),
            &AccessRequest::new(View::Cost, false, Permission::View),
        )
        .await
        .unwrap();

    assert_eq!(outcome.decision, AccessDecision::Denied(DenyReason::NoRole));
    assert_eq!(outcome.derived, None);
    assert_eq!(audit.records().len(), 1);
}

#[tokio::test]
async fn empty_group_is_denied_without_error() {
    let (service, _) = fixture().await;
    let outcome = service
        .check_access(
            "ops@example.com",
            &proposal("P-404"),
            &AccessRequest::new(View::Invoice, true, Permission::View),
        )
        .await
        .unwrap();

    assert_eq!(outcome.decision, AccessDecision::Denied(DenyReason::UnknownGroup));
    assert_eq!(outcome.role, Some(Role::finance_operations()));
}

#[tokio::test]
async fn finance_operations_at_final_sees_remapped_status() {
    let (service, _) = fixture().await;
    let request = AccessRequest::new(View::Invoice, true, Permission::Edit);

    let outcome = service
        .check_access("ops@example.com", &proposal("P-2"), &request)
        .await
        .unwrap();
    assert!(outcome.is_granted());
    assert_eq!(outcome.milestone, Milestone::Final);
    assert_eq!(outcome.derived, Some(sent_approved()));

    let draft = service.derived_status(&proposal("P-2"), false).await.unwrap();
    assert_eq!(draft.map(|d| d.approval), Some(GroupApprovalStatus::Mixed));
    assert_eq!(service.derived_status(&proposal("P-404"), true).await.unwrap(), None);
}

#[tokio::test]
async fn check_many_keeps_input_order() {
    let (service, _) = fixture().await;
    let groups = vec![proposal("P-2"), proposal("P-404"), proposal("P-1")];
    let outcomes = service
        .check_many(
            "ops@example.com",
            &groups,
            &AccessRequest::new(View::Invoice, true, Permission::View),
        )
        .await
        .unwrap();

    let keys: Vec<&GroupKey> = outcomes.iter().map(|o| &o.group).collect();
    assert_eq!(keys, groups.iter().collect::<Vec<_>>());
    let granted: Vec<bool> = outcomes.iter().map(|o| o.is_granted()).collect();
    assert_eq!(granted, vec![true, false, true]);
}

#[tokio::test]
async fn reload_takes_effect_for_new_checks() {
    let (service, _) = fixture().await;
    let request = AccessRequest::new(View::Cost, false, Permission::View);
    assert!(service
        .check_access("ana@example.com", &proposal("P-1"), &request)
        .await
        .unwrap()
        .is_granted());

    service
        .matrix()
        .reload(&StaticRuleSource::new(rules().into_iter().skip(1).collect()))
        .await
        .unwrap();

    assert!(!service
        .check_access("ana@example.com", &proposal("P-1"), &request)
        .await
        .unwrap()
        .is_granted());
}

#[tokio::test]
async fn grants_are_not_audited_by_default() {
    let store = InMemoryWorkItemStore::new();
    store
        .extend(approved_items(&proposal("P-1"), ApprovalStatus::Approved))
        .await;
    let membership = StaticMembership::new();
    membership
        .grant_everywhere("ana@example.com", Role::new("Approver"))
        .await;
    let audit = Arc::new(RecordingAuditSink::new());
    let service = AccessService::new(
        Arc::new(store),
        Arc::new(membership),
        MatrixHandle::load(&StaticRuleSource::new(rules())).unwrap(),
    )
    .with_audit_sink(audit.clone());

    let granted = service
        .check_access(
            "ana@example.com",
            &proposal("P-1"),
            &AccessRequest::new(View::Cost, false, Permission::View),
        )
        .await
        .unwrap();
    assert!(granted.is_granted());
    assert!(audit.records().is_empty());

    let denied = service
        .check_access(
            "ana@example.com",
            &proposal("P-1"),
            &AccessRequest::new(View::Cost, false, Permission::Edit),
        )
        .await
        .unwrap();
    assert!(!denied.is_granted());
    assert_eq!(audit.records().len(), 1);
}

#[tokio::test]
async fn store_failure_is_returned_as_error() {
    let mut store = MockStore::new();
    store
        .expect_fetch_items()
        .returning(|_| Err(ApprovalError::collaborator("WorkItemStore", "timeout")));

    let mut membership = MockMembership::new();
    membership
        .expect_resolve_role()
        .times(1)
        .returning(|_, _| Ok(Some(Role::new("Approver"))));

    let service = AccessService::new(
        Arc::new(store),
        Arc::new(membership),
        MatrixHandle::load(&StaticRuleSource::new(rules())).unwrap(),
    );

    let err = service
        .check_access(
            "ana@example.com",
            &proposal("P-1"),
            &AccessRequest::new(View::Cost, false, Permission::View),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApprovalError::CollaboratorError { .. }));
}

#[tokio::test]
async fn store_is_not_queried_without_membership() {
    let mut store = MockStore::new();
    store.expect_fetch_items().never();

    let mut membership = MockMembership::new();
    membership.expect_resolve_role().returning(|_, _| Ok(None));

    let service = AccessService::new(
        Arc::new(store),
        Arc::new(membership),
        MatrixHandle::load(&StaticRuleSource::new(rules())).unwrap(),
    );

    let outcome = service
        .check_access(
            "stranger@example.com",
            &proposal("P-1"),
            &AccessRequest::new(View::Cost, false, Permission::View),
        )
        .await
        .unwrap();
    assert_eq!(outcome.decision, AccessDecision::Denied(DenyReason::NoRole));
}

#[tokio::test]
async fn check_many_aborts_on_first_store_failure() {
    let mut store = MockStore::new();
    store.expect_fetch_items().returning(|group| {
        if group.parent.id() == "P-2" {
            Err(ApprovalError::collaborator("WorkItemStore", "timeout"))
        } else {
            Ok(approved_items(group, ApprovalStatus::Approved))
        }
    });

    let mut membership = MockMembership::new();
    membership
        .expect_resolve_role()
        .returning(|_, _| Ok(Some(Role::new("Approver"))));

    let service = AccessService::new(
        Arc::new(store),
        Arc::new(membership),
        MatrixHandle::load(&StaticRuleSource::new(rules())).unwrap(),
    );

    let groups = vec![proposal("P-1"), proposal("P-2"), proposal("P-3")];
    let err = service
        .check_many(
            "ana@example.com",
            &groups,
            &AccessRequest::new(View::Cost, false, Permission::View),
        )
        .await
        .unwrap_err();
    assert_eq!(err, ApprovalError::collaborator("WorkItemStore", "timeout"));
}

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cim_domain_approval::{
    AccessRequest, ApprovalStatus, DerivedStatus, GroupApprovalStatus, GroupEvaluator, GroupKey,
    GroupSendingStatus, Milestone, Permission, PermissionMatrix, PermissionRule, Quarter, Role,
    RuleKey, SendingStatus, StatusAggregator, View, WorkItem,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_items(count: usize, seed: u64) -> Vec<WorkItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    let group = GroupKey::project("PRJ-BENCH", Quarter::new(2025, 1).unwrap(), "ACME");
    (0..count)
        .map(|_| {
            let sending = match rng.gen_range(0..3) {
                0 => SendingStatus::Pending,
                1 => SendingStatus::Excluded,
                _ => SendingStatus::Sent,
            };
            let approval = match rng.gen_range(0..4) {
                0 => ApprovalStatus::Pending,
                1 => ApprovalStatus::Rejected,
                2 => ApprovalStatus::Approved,
                _ => ApprovalStatus::PartiallyApproved,
            };
            WorkItem::new(group.clone(), sending, approval, rng.gen_bool(0.8))
        })
        .collect()
}

/// Every (role, status, view, milestone) combination for a handful of roles
fn full_matrix(roles: &[&str]) -> PermissionMatrix {
    let sending = [
        GroupSendingStatus::Pending,
        GroupSendingStatus::Excluded,
        GroupSendingStatus::Sent,
        GroupSendingStatus::InReview,
        GroupSendingStatus::Mixed,
    ];
    let approval = [
        GroupApprovalStatus::Pending,
        GroupApprovalStatus::Rejected,
        GroupApprovalStatus::Approved,
        GroupApprovalStatus::Mixed,
    ];
    let views = [View::Cost, View::ProjectSummary, View::Invoice, View::SummaryAmounts];

    let mut rules = Vec::new();
    for role in roles {
        for s in sending {
            for a in approval {
                for submitted in [false, true] {
                    for view in views {
                        for milestone in [Milestone::Draft, Milestone::Final] {
                            let derived = DerivedStatus::new(s, a, submitted);
                            rules.push(PermissionRule::new(
                                RuleKey::new(Role::new(*role), &derived, view, milestone),
                                Permission::View,
                            ));
                        }
                    }
                }
            }
        }
    }
    PermissionMatrix::from_rules(rules).unwrap()
}

fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let aggregator = StatusAggregator::new();

    for size in [10, 100, 1_000, 10_000] {
        let items = random_items(size, 7);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| aggregator.aggregate(black_box(items)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_evaluate(c: &mut Criterion) {
    let matrix = full_matrix(&["Approver", "FinOps", "Viewer", "Auditor"]);
    let evaluator = GroupEvaluator::new(&matrix);
    let items = random_items(250, 11);
    let role = Role::finance_operations();
    let request = AccessRequest::new(View::Invoice, true, Permission::View);

    c.bench_function("evaluate_250_items", |b| {
        b.iter(|| {
            evaluator
                .evaluate(black_box(&items), &role, &request)
                .unwrap()
        });
    });
}

criterion_group!(benches, benchmark_aggregate, benchmark_evaluate);
criterion_main!(benches);

//! Reconciliation benchmarks. Run with: cargo bench --bench access_bench
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use ideabox_core::access::{derive_permissions, derive_roles, flatten_permissions, AccessSelection, RoleCatalog};
use ideabox_core::model::{Permission, PermissionId, Role, RoleId};

/// `roles` roles of `per_role` permissions each, overlapping by half with the next role.
fn catalog(roles: u64, per_role: u64) -> Vec<Role> {
    (0..roles)
        .map(|r| {
            let start = r * per_role / 2;
            let permissions = (start..start + per_role).map(|p| Permission::new(p + 1, format!("perm-{p}"))).collect();
            Role::new(r + 1, format!("role-{r}"), permissions)
        })
        .collect()
}

fn bench_catalog(c: &mut Criterion) {
    let mut g = c.benchmark_group("access_catalog"); g.measurement_time(Duration::from_secs(5));
    for &n in &[5u64, 50, 200] {
        let roles = catalog(n, 10);
        g.throughput(Throughput::Elements(n));
        g.bench_with_input(BenchmarkId::new("flatten", n), &roles, |b, roles| b.iter(|| black_box(flatten_permissions(roles))));
        g.bench_with_input(BenchmarkId::new("index", n), &roles, |b, roles| b.iter(|| black_box(RoleCatalog::new(roles.clone()))));
    }
    g.finish();
}

fn bench_passes(c: &mut Criterion) {
    let mut g = c.benchmark_group("access_passes"); g.measurement_time(Duration::from_secs(5));
    for &n in &[5u64, 50, 200] {
        let catalog = RoleCatalog::new(catalog(n, 10));
        let roles: Vec<RoleId> = (1..=n).step_by(2).map(RoleId).collect();
        let permissions = derive_permissions(&roles, &catalog);
        let trimmed: Vec<PermissionId> = permissions.iter().copied().skip(1).collect();
        g.bench_with_input(BenchmarkId::new("derive_permissions", n), &roles, |b, roles| b.iter(|| black_box(derive_permissions(roles, &catalog))));
        g.bench_with_input(BenchmarkId::new("derive_roles", n), &trimmed, |b, trimmed| b.iter(|| black_box(derive_roles(trimmed, &catalog, &roles))));
    }
    g.finish();
}

fn bench_toggles(c: &mut Criterion) {
    let mut g = c.benchmark_group("access_toggles"); g.measurement_time(Duration::from_secs(5));
    let catalog = Arc::new(RoleCatalog::new(catalog(50, 10)));
    g.bench_function("toggle_role_pair", |b| {
        let mut selection = AccessSelection::new(Arc::clone(&catalog));
        b.iter(|| { black_box(selection.toggle_role(RoleId(7))); black_box(selection.toggle_role(RoleId(7))); });
    });
    g.bench_function("toggle_permission_pair", |b| {
        let mut selection = AccessSelection::new(Arc::clone(&catalog));
        b.iter(|| { black_box(selection.toggle_permission(PermissionId(33))); black_box(selection.toggle_permission(PermissionId(33))); });
    });
    g.finish();
}

criterion_group!(benches, bench_catalog, bench_passes, bench_toggles);
criterion_main!(benches);

//! Tracing overhead benchmarks.
//!
//! Measures the per-call cost of `zeFenceQueryStatus` called directly,
//! through the traced wrapper with no tracers, and with one and four
//! enabled tracers.

use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use criterion::measurement::WallTime;
use criterion::{
    BenchmarkGroup, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use zetrace_abi::fence_api::ze_fence_query_status_tracing;
use zetrace_abi::{
    driver_init_with_mode, reset_for_tests, zet_tracer_exp_create, zet_tracer_exp_set_enabled,
    zet_tracer_exp_set_epilogues, zet_tracer_exp_set_prologues,
};
use zetrace_core::api::{FenceQueryStatusParams, PfnFenceQueryStatus};
use zetrace_core::handle::FenceHandle;
use zetrace_core::{
    DdiTable, InstanceData, TracerDesc, TracerHandle, TracingMode, ZeCallbacks, ZeResult,
};

#[derive(Default)]
struct BenchStats {
    samples_ns_per_op: Vec<f64>,
    total_iters: u64,
    total_ns: u128,
}

impl BenchStats {
    fn record(&mut self, iters: u64, dur: Duration) {
        let ns = dur.as_nanos();
        self.total_iters = self.total_iters.saturating_add(iters);
        self.total_ns = self.total_ns.saturating_add(ns);
        self.samples_ns_per_op.push(ns as f64 / iters as f64);
    }

    fn report(&self, bench_label: &str) {
        let mut samples = self.samples_ns_per_op.clone();
        if samples.is_empty() {
            return;
        }
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let p50 = percentile_sorted(&samples, 0.50);
        let p99 = percentile_sorted(&samples, 0.99);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let throughput_ops_s = if self.total_ns == 0 {
            0.0
        } else {
            (self.total_iters as f64) / (self.total_ns as f64 / 1e9)
        };

        println!(
            "TRACING_BENCH bench={} samples={} p50_ns_op={:.3} p99_ns_op={:.3} mean_ns_op={:.3} throughput_ops_s={:.3}",
            bench_label,
            samples.len(),
            p50,
            p99,
            mean,
            throughput_ops_s
        );
    }
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p));
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

unsafe extern "C" fn query_status(_h_fence: FenceHandle) -> ZeResult {
    ZeResult::Success
}

struct CallCount(AtomicU64);

fn count_prologue(
    _params: &mut FenceQueryStatusParams,
    _result: ZeResult,
    user: Option<&(dyn Any + Send + Sync)>,
    instance: &mut InstanceData,
) {
    if let Some(count) = user.and_then(|u| u.downcast_ref::<CallCount>()) {
        count.0.fetch_add(1, Ordering::Relaxed);
    }
    instance.set(0u64);
}

fn count_epilogue(
    _params: &mut FenceQueryStatusParams,
    _result: ZeResult,
    _user: Option<&(dyn Any + Send + Sync)>,
    instance: &mut InstanceData,
) {
    black_box(instance.take::<u64>());
}

/// Fresh driver with tracing up and `tracers` enabled tracers on
/// `zeFenceQueryStatus`.
fn install(tracers: usize) {
    reset_for_tests();
    let real = DdiTable {
        fence_query_status: Some(query_status),
        ..DdiTable::EMPTY
    };
    assert_eq!(
        driver_init_with_mode(real, TracingMode::Enabled),
        ZeResult::Success
    );
    let prologues = ZeCallbacks {
        fence_query_status: Some(count_prologue),
        ..ZeCallbacks::EMPTY
    };
    let epilogues = ZeCallbacks {
        fence_query_status: Some(count_epilogue),
        ..ZeCallbacks::EMPTY
    };
    for _ in 0..tracers {
        let desc = TracerDesc::with_user_data(Arc::new(CallCount(AtomicU64::new(0))));
        let mut handle = TracerHandle::NULL;
        assert_eq!(zet_tracer_exp_create(&desc, &mut handle), ZeResult::Success);
        assert_eq!(zet_tracer_exp_set_prologues(handle, &prologues), ZeResult::Success);
        assert_eq!(zet_tracer_exp_set_epilogues(handle, &epilogues), ZeResult::Success);
        assert_eq!(zet_tracer_exp_set_enabled(handle, true), ZeResult::Success);
    }
}

fn measure(
    group: &mut BenchmarkGroup<'_, WallTime>,
    label: &str,
    call: PfnFenceQueryStatus,
) {
    // `zeFenceQueryStatus` takes no pointers, so every call below is sound.
    let fence = FenceHandle::from_addr(0x1000);
    for _ in 0..10_000 {
        black_box(unsafe { call(black_box(fence)) });
    }

    let stats = RefCell::new(BenchStats::default());
    group.bench_function(BenchmarkId::new("fence_query_status", label), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                black_box(unsafe { call(black_box(fence)) });
            }
            let dur = start.elapsed().max(Duration::from_nanos(1));
            stats.borrow_mut().record(iters, dur);
            dur
        });
    });
    stats.borrow().report(label);
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    install(0);
    measure(&mut group, "direct", query_status);
    measure(&mut group, "traced_0", ze_fence_query_status_tracing);

    install(1);
    measure(&mut group, "traced_1", ze_fence_query_status_tracing);

    install(4);
    measure(&mut group, "traced_4", ze_fence_query_status_tracing);

    group.finish();
    reset_for_tests();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(1))
        .measurement_time(Duration::from_secs(2))
        .sample_size(100);
    targets = bench_dispatch
);
criterion_main!(benches);

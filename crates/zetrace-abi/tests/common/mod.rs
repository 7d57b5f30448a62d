#![allow(dead_code)]

//! Shared fixtures for the traced entry point tests.
//!
//! All tests in a binary share the process-wide driver state, so each test
//! holds the guard from [`acquire_test_guard`] and starts from
//! [`init_traced_driver`].

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use zetrace_abi::{
    driver_init_with_mode, reset_for_tests, zet_tracer_exp_create, zet_tracer_exp_set_enabled,
    zet_tracer_exp_set_epilogues, zet_tracer_exp_set_prologues,
};
use zetrace_core::{
    DdiTable, InstanceData, TracerDesc, TracerHandle, TracingMode, ZeCallbacks, ZeResult,
};

static TEST_GUARD_HELD: AtomicBool = AtomicBool::new(false);

pub struct TestGuard;

impl Drop for TestGuard {
    fn drop(&mut self) {
        TEST_GUARD_HELD.store(false, Ordering::Release);
    }
}

pub fn acquire_test_guard() -> TestGuard {
    loop {
        if TEST_GUARD_HELD
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            return TestGuard;
        }
        std::thread::yield_now();
    }
}

/// Fresh driver with `real` installed and the tracing layer up.
pub fn init_traced_driver(real: DdiTable) {
    reset_for_tests();
    assert_eq!(
        driver_init_with_mode(real, TracingMode::Enabled),
        ZeResult::Success
    );
}

/// Tracer user data. Each callback checks the value it expects to find,
/// then adds `base`.
#[derive(Debug)]
pub struct TracerCounter {
    pub base: i32,
    pub value: AtomicI32,
    pub has_prologue: bool,
    pub has_epilogue: bool,
}

impl TracerCounter {
    fn new(base: i32, has_prologue: bool, has_epilogue: bool) -> Arc<Self> {
        Arc::new(Self {
            base,
            value: AtomicI32::new(base),
            has_prologue,
            has_epilogue,
        })
    }

    pub fn get(&self) -> i32 {
        self.value.load(Ordering::SeqCst)
    }
}

/// Carried from a counting prolog to its epilog.
#[derive(Debug, PartialEq, Eq)]
pub struct InstanceTag(pub i32);

fn counter(user: Option<&(dyn Any + Send + Sync)>) -> &TracerCounter {
    user.and_then(|u| u.downcast_ref::<TracerCounter>())
        .expect("tracer user data must be a TracerCounter")
}

/// Prolog for any entry point: expects the untouched base value.
pub fn counting_prologue<P>(
    _params: &mut P,
    result: ZeResult,
    user: Option<&(dyn Any + Send + Sync)>,
    instance: &mut InstanceData,
) {
    assert_eq!(result, ZeResult::Success, "prologs see SUCCESS");
    let c = counter(user);
    assert!(instance.is_empty(), "slot starts empty");
    assert_eq!(c.get(), c.base);
    c.value.fetch_add(c.base, Ordering::SeqCst);
    if c.has_epilogue {
        instance.set(InstanceTag(c.base));
    }
}

/// Epilog for any entry point: expects the value left by its own prolog
/// (if any), and that prolog's instance data.
pub fn counting_epilogue<P>(
    _params: &mut P,
    _result: ZeResult,
    user: Option<&(dyn Any + Send + Sync)>,
    instance: &mut InstanceData,
) {
    let c = counter(user);
    if c.has_prologue {
        assert_eq!(c.get(), 2 * c.base);
        assert_eq!(instance.take::<InstanceTag>(), Some(InstanceTag(c.base)));
    } else {
        assert_eq!(c.get(), c.base);
        assert!(instance.is_empty(), "epilog-only tracer gets an empty slot");
    }
    c.value.fetch_add(c.base, Ordering::SeqCst);
}

/// One tracer with both a prolog and an epilog, user data base 1.
pub struct SingleTracer {
    pub handle: TracerHandle,
    pub counter: Arc<TracerCounter>,
}

impl SingleTracer {
    pub fn install(prologues: &ZeCallbacks, epilogues: &ZeCallbacks) -> Self {
        let counter = TracerCounter::new(1, true, true);
        let handle = create_tracer(counter.clone());
        assert_eq!(
            zet_tracer_exp_set_prologues(handle, prologues),
            ZeResult::Success
        );
        assert_eq!(
            zet_tracer_exp_set_epilogues(handle, epilogues),
            ZeResult::Success
        );
        assert_eq!(zet_tracer_exp_set_enabled(handle, true), ZeResult::Success);
        Self { handle, counter }
    }

    /// Prolog and epilog each ran exactly once.
    pub fn assert_ran_once(&self) {
        assert_eq!(self.counter.get(), 3);
    }
}

/// Four tracers with user data bases `{1, 11, 21, 31}`:
///
/// - tracer 0: prolog and epilog
/// - tracer 1: prolog only
/// - tracer 2: epilog only
/// - tracer 3: prolog and epilog
pub struct MultiTracerFixture {
    pub handles: [TracerHandle; 4],
    pub counters: [Arc<TracerCounter>; 4],
}

impl MultiTracerFixture {
    pub const BASES: [i32; 4] = [1, 11, 21, 31];
    pub const EXPECTED: [i32; 4] = [3, 22, 42, 93];

    /// `prologues[i]` / `epilogues[i]` are only installed where tracer `i`
    /// has that role.
    pub fn install(prologues: [ZeCallbacks; 4], epilogues: [ZeCallbacks; 4]) -> Self {
        let roles = [(true, true), (true, false), (false, true), (true, true)];
        let counters: [Arc<TracerCounter>; 4] = std::array::from_fn(|i| {
            TracerCounter::new(Self::BASES[i], roles[i].0, roles[i].1)
        });
        let handles: [TracerHandle; 4] =
            std::array::from_fn(|i| create_tracer(counters[i].clone()));
        for i in 0..4 {
            if roles[i].0 {
                assert_eq!(
                    zet_tracer_exp_set_prologues(handles[i], &prologues[i]),
                    ZeResult::Success
                );
            }
            if roles[i].1 {
                assert_eq!(
                    zet_tracer_exp_set_epilogues(handles[i], &epilogues[i]),
                    ZeResult::Success
                );
            }
            assert_eq!(zet_tracer_exp_set_enabled(handles[i], true), ZeResult::Success);
        }
        Self { handles, counters }
    }

    /// Same generic callbacks on every tracer.
    pub fn install_uniform(prologues: ZeCallbacks, epilogues: ZeCallbacks) -> Self {
        Self::install([prologues; 4], [epilogues; 4])
    }

    pub fn values(&self) -> [i32; 4] {
        std::array::from_fn(|i| self.counters[i].get())
    }

    pub fn validate(&self) {
        assert_eq!(self.values(), Self::EXPECTED);
    }
}

fn create_tracer(counter: Arc<TracerCounter>) -> TracerHandle {
    let mut handle = TracerHandle::NULL;
    assert_eq!(
        zet_tracer_exp_create(&TracerDesc::with_user_data(counter), &mut handle),
        ZeResult::Success
    );
    assert!(!handle.is_null());
    handle
}

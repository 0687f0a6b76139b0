use super::*;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

fn from_outcome(outcome: Result<i32, String>) -> IOResult<i32, String> {
    IOResult::from_result(outcome)
}

fn counted<T, E>(counter: &Arc<AtomicUsize>, outcome: Result<T, E>) -> IOResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    let counter = counter.clone();
    IOResult::from_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        outcome.clone()
    })
}

fn recorded(
    log: &Arc<Mutex<Vec<&'static str>>>,
    name: &'static str,
) -> IOResult<&'static str, String> {
    let log = log.clone();
    IOResult::from_fn(move || {
        log.lock().unwrap().push(name);
        Ok(name)
    })
}

fn outcome_strategy() -> impl Strategy<Value = Result<i32, String>> {
    prop_oneof![
        any::<i32>().prop_map(Ok),
        "[a-z]{1,6}".prop_map(Err),
    ]
}

// ========== Construction ==========

#[test]
fn test_construction_is_lazy() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = counted(&runs, Ok::<_, String>(1)).map(|x| x + 1);
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    assert_eq!(io.run(), Ok(2));
    assert_eq!(io.run(), Ok(2));
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_constructors() {
    assert_eq!(IOResult::<_, String>::of(1).run(), Ok(1));
    assert_eq!(IOResult::<i32, _>::left("e").run(), Err("e"));
    assert_eq!(IOResult::<_, String>::from_result(Ok(3)).run(), Ok(3));
    assert_eq!(
        IOResult::from_either(Either::<&str, i32>::left("left")).run(),
        Err("left")
    );
    assert_eq!(IOResult::from_option(Some(4), || "none").run(), Ok(4));
    assert_eq!(IOResult::<_, String>::from_io(IO::of(5)).run(), Ok(5));
    assert_eq!(
        IOResult::try_catch(|| "x".parse::<u8>(), |_| "not a number").run(),
        Err("not a number")
    );
}

#[test]
fn test_run_either() {
    assert_eq!(IOResult::<_, String>::pure(1).run_either(), Either::right(1));
    assert_eq!(IOResult::<i32, _>::fail("e").run_either(), Either::left("e"));
}

#[test]
fn test_debug_hides_body() {
    let io = IOResult::<i32, String>::pure(1);
    assert_eq!(format!("{:?}", io), r#"IOResult { run_fn: "<function>" }"#);
}

// ========== Combinators ==========

#[test]
fn test_map_skipped_on_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let io = {
        let calls = calls.clone();
        IOResult::<i32, _>::fail("e").map(move |x| {
            calls.fetch_add(1, Ordering::SeqCst);
            x
        })
    };
    assert_eq!(io.run(), Err("e"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_error_channel_combinators() {
    let io = IOResult::<i32, _>::fail("abc").map_err(str::len);
    assert_eq!(io.run(), Err(3));

    let io = IOResult::<i32, &str>::pure(2).bimap(str::len, |x| x * 10);
    assert_eq!(io.run(), Ok(20));

    let io = IOResult::<i32, &str>::pure(2).swap();
    assert_eq!(io.run(), Err(2));
}

#[test]
fn test_alt_is_lazy() {
    let fallback_runs = Arc::new(AtomicUsize::new(0));
    let fallback = counted(&fallback_runs, Ok::<_, &str>(0));

    assert_eq!(IOResult::pure(1).alt(fallback.clone()).run(), Ok(1));
    assert_eq!(fallback_runs.load(Ordering::SeqCst), 0);

    assert_eq!(IOResult::fail("e").alt(fallback).run(), Ok(0));
    assert_eq!(fallback_runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fold_and_get_or_else() {
    let describe = |io: IOResult<i32, &'static str>| io.fold(|e| e.len() as i32, |v| v * 2).run();
    assert_eq!(describe(IOResult::pure(4)), 8);
    assert_eq!(describe(IOResult::fail("four")), 4);

    assert_eq!(IOResult::<i32, &str>::fail("x").get_or_else(|_| -1).run(), -1);
}

#[test]
fn test_tap_and_tap_err_observe() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let ok = {
        let seen = seen.clone();
        IOResult::<i32, i32>::pure(1).tap(move |v| seen.lock().unwrap().push(*v))
    };
    let err = {
        let seen = seen.clone();
        IOResult::<i32, i32>::fail(-1).tap_err(move |e| seen.lock().unwrap().push(*e))
    };

    assert_eq!(ok.run(), Ok(1));
    assert_eq!(err.run(), Err(-1));
    assert_eq!(*seen.lock().unwrap(), vec![1, -1]);
}

#[test]
fn test_and_then_first_failure_fails_whole() {
    let io = IOResult::<i32, &str>::pure(1).and_then_first(|_| IOResult::<(), _>::fail("audit"));
    assert_eq!(io.run(), Err("audit"));
}

#[test]
fn test_filter_or_else() {
    let positive = |io: IOResult<i32, String>| {
        io.filter_or_else(|n| *n > 0, |n| format!("{} is not positive", n))
            .run()
    };
    assert_eq!(positive(IOResult::pure(3)), Ok(3));
    assert_eq!(positive(IOResult::pure(-3)), Err("-3 is not positive".into()));
}

#[test]
fn test_flatten() {
    let nested = IOResult::<_, String>::pure(IOResult::pure(9));
    assert_eq!(nested.flatten().run(), Ok(9));
}

// ========== Apply joins ==========

#[test]
fn test_ap_of_double_and_21_is_42() {
    let double = IOResult::<_, String>::from_fn(|| Ok(|x: i32| x * 2));
    assert_eq!(double.ap(IOResult::of(21)).run(), Ok(42));
}

#[test]
fn test_parallel_ap_reports_function_error() {
    let broken = IOResult::<fn(i32) -> i32, _>::left("errA");
    assert_eq!(broken.ap(IOResult::of(21)).run(), Err("errA"));
}

#[test]
fn test_parallel_precedence_both_fail() {
    let f_runs = Arc::new(AtomicUsize::new(0));
    let a_runs = Arc::new(AtomicUsize::new(0));
    let cf = counted::<fn(i32) -> i32, _>(&f_runs, Err("E1"));
    let ca = counted(&a_runs, Err::<i32, _>("E2"));

    assert_eq!(apply_parallel(cf, ca).run(), Err("E1"));
    assert_eq!(f_runs.load(Ordering::SeqCst), 1);
    assert_eq!(a_runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_parallel_precedence_value_fails() {
    let cf = IOResult::<fn(i32) -> i32, _>::from_fn(|| Ok(|x| x + 1));
    let ca = IOResult::<i32, _>::fail("E2");
    assert_eq!(apply_parallel(cf, ca).run(), Err("E2"));
}

#[test]
fn test_parallel_runs_sides_concurrently() {
    // Each side waits for the other, so a sequential join would deadlock.
    let barrier = Arc::new(Barrier::new(2));
    let cf = {
        let barrier = barrier.clone();
        IOResult::<_, String>::from_fn(move || {
            barrier.wait();
            Ok(|x: i32| x + 1)
        })
    };
    let ca = {
        let barrier = barrier.clone();
        IOResult::from_fn(move || {
            barrier.wait();
            Ok(1)
        })
    };

    assert_eq!(apply_parallel(cf, ca).run(), Ok(2));
}

#[test]
fn test_parallel_runs_function_side_on_another_thread() {
    let caller = thread::current().id();
    let cf = IOResult::<_, String>::from_fn(move || {
        let here = thread::current().id();
        Ok(move |there: thread::ThreadId| (here, there))
    });
    let ca = IOResult::from_fn(|| Ok(thread::current().id()));

    let (f_thread, a_thread) = cf.ap(ca).run().unwrap();
    assert_ne!(f_thread, caller);
    assert_eq!(a_thread, caller);
}

#[test]
fn test_sequential_skips_value_after_function_error() {
    let a_runs = Arc::new(AtomicUsize::new(0));
    let cf = IOResult::<fn(i32) -> i32, _>::fail("E1");
    let ca = counted(&a_runs, Ok::<_, &str>(21));

    assert_eq!(apply_sequential(cf, ca).run(), Err("E1"));
    assert_eq!(a_runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_sequential_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let cf = recorded(&log, "f").map(|_| |a: &'static str| a);
    let ca = recorded(&log, "a");

    assert_eq!(cf.ap_seq(ca).run(), Ok("a"));
    assert_eq!(*log.lock().unwrap(), vec!["f", "a"]);
}

#[test]
fn test_zip_and_keep_one_side() {
    let left = IOResult::<_, String>::pure(1);
    let right = IOResult::pure("b");

    assert_eq!(left.clone().zip(right.clone()).run(), Ok((1, "b")));
    assert_eq!(left.clone().zip_seq(right.clone()).run(), Ok((1, "b")));
    assert_eq!(left.clone().ap_first(right.clone()).run(), Ok(1));
    assert_eq!(left.clone().ap_first_seq(right.clone()).run(), Ok(1));
    assert_eq!(left.clone().ap_second(right.clone()).run(), Ok("b"));
    assert_eq!(left.ap_second_seq(right).run(), Ok("b"));
}

#[test]
fn test_ap_second_parallel_still_runs_failed_left() {
    let right_runs = Arc::new(AtomicUsize::new(0));
    let left = IOResult::<(), _>::fail("left");
    let right = counted(&right_runs, Ok::<_, &str>(1));

    assert_eq!(left.clone().ap_second(right.clone()).run(), Err("left"));
    assert_eq!(right_runs.load(Ordering::SeqCst), 1);

    assert_eq!(left.ap_second_seq(right).run(), Err("left"));
    assert_eq!(right_runs.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "function side exploded")]
fn test_parallel_resumes_panic_from_function_side() {
    let cf = IOResult::<fn(i32) -> i32, String>::from_fn(|| panic!("function side exploded"));
    let _ = cf.ap(IOResult::pure(1)).run();
}

// ========== Traversals ==========

#[test]
fn test_traverse_seq_visits_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let io = traverse_vec_seq(vec!["a", "b", "c"], |name| recorded(&log, name));

    assert_eq!(io.run(), Ok(vec!["a", "b", "c"]));
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_traverse_seq_stops_at_first_error() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = traverse_vec_seq(vec![1, 2, 3, 4], |n| {
        counted(&runs, if n == 2 { Err(format!("bad {}", n)) } else { Ok(n) })
    });

    assert_eq!(io.run(), Err("bad 2".to_string()));
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_traverse_par_runs_everything_and_reports_lowest_index() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = traverse_vec_par(0..6, |n| {
        counted(&runs, if n % 2 == 1 { Err(n) } else { Ok(n) })
    });

    assert_eq!(io.run(), Err(1));
    assert_eq!(runs.load(Ordering::SeqCst), 6);
}

#[test]
fn test_traverse_par_preserves_order() {
    let io = traverse_vec(vec![30u64, 10, 20], |ms| {
        IOResult::<_, String>::pure(ms).delay(Duration::from_millis(ms))
    });
    assert_eq!(io.run(), Ok(vec![30, 10, 20]));
}

#[test]
fn test_traverse_empty() {
    assert_eq!(traverse_vec(Vec::<i32>::new(), IOResult::<i32, String>::pure).run(), Ok(vec![]));
    assert_eq!(sequence_vec_seq(Vec::<IOResult<i32, String>>::new()).run(), Ok(vec![]));
}

#[test]
fn test_traverse_with_index() {
    let label = |i: usize, s: &str| IOResult::<_, String>::pure(format!("{}:{}", i, s));

    let par = traverse_vec_with_index_par(vec!["x", "y"], label);
    let seq = traverse_vec_with_index_seq(vec!["x", "y"], label);

    assert_eq!(par.run(), Ok(vec!["0:x".to_string(), "1:y".to_string()]));
    assert_eq!(seq.run(), Ok(vec!["0:x".to_string(), "1:y".to_string()]));
}

#[test]
fn test_sequence_vec_reruns_elements() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = sequence_vec(vec![counted(&runs, Ok::<_, ()>(1)), counted(&runs, Ok(2))]);

    assert_eq!(io.run(), Ok(vec![1, 2]));
    assert_eq!(io.run(), Ok(vec![1, 2]));
    assert_eq!(runs.load(Ordering::SeqCst), 4);
}

#[test]
fn test_traverse_map_keeps_keys() {
    let prices = HashMap::from([("apple", 3), ("pear", 4)]);
    let io = traverse_map(prices, |p| IOResult::<_, String>::pure(p * 100));

    let expected = HashMap::from([("apple", 300), ("pear", 400)]);
    assert_eq!(io.run(), Ok(expected.clone()));
    let quoted = HashMap::from([
        ("apple", IOResult::<_, String>::pure(300)),
        ("pear", IOResult::pure(400)),
    ]);
    assert_eq!(sequence_map_seq(quoted).run(), Ok(expected));
}

#[test]
fn test_traverse_map_error() {
    let map = HashMap::from([(1, Ok(1)), (2, Err("two")), (3, Ok(3))]);

    let runs = Arc::new(AtomicUsize::new(0));
    let par = traverse_map_par(map.clone(), |r| counted(&runs, r));
    assert_eq!(par.run(), Err("two"));
    assert_eq!(runs.load(Ordering::SeqCst), 3);

    let seq = traverse_map_seq(map, IOResult::from_result);
    assert_eq!(seq.run(), Err("two"));
    assert_eq!(
        sequence_map(HashMap::from([(1, IOResult::<i32, &str>::fail("only"))])).run(),
        Err("only")
    );
    assert_eq!(
        sequence_map_par(HashMap::<u8, IOResult<i32, &str>>::new()).run(),
        Ok(HashMap::new())
    );
}

// ========== Large inputs ==========

const LARGE: usize = 10_000;

#[test]
fn test_traverse_vec_seq_large_input() {
    let io = traverse_vec_seq(0..LARGE, |i| IOResult::<_, String>::pure(i * 2));
    let out = io.run().unwrap();

    assert_eq!(out.len(), LARGE);
    assert_eq!(out[0], 0);
    assert_eq!(out[LARGE - 1], (LARGE - 1) * 2);
}

#[test]
fn test_traverse_vec_seq_large_input_stops_at_first_error() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = traverse_vec_seq(0..LARGE, |i| {
        let outcome = if i == 9_000 { Err(i) } else { Ok(i) };
        counted(&runs, outcome)
    });

    assert_eq!(io.run(), Err(9_000));
    assert_eq!(runs.load(Ordering::SeqCst), 9_001);
}

#[test]
fn test_traverse_vec_par_large_input() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = traverse_vec_par(0..LARGE, |i| counted::<_, String>(&runs, Ok(i)));
    let out = io.run().unwrap();

    assert_eq!(out.len(), LARGE);
    assert_eq!(out, (0..LARGE).collect::<Vec<_>>());
    assert_eq!(runs.load(Ordering::SeqCst), LARGE);
}

#[test]
fn test_traverse_vec_par_large_input_reports_lowest_index_error() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = sequence_vec_par((0..LARGE).map(|i| {
        let outcome = if i == 3_000 || i == 7_000 || i == LARGE - 1 {
            Err(i)
        } else {
            Ok(i)
        };
        counted(&runs, outcome)
    }));

    assert_eq!(io.run(), Err(3_000));
    assert_eq!(runs.load(Ordering::SeqCst), LARGE);
}

#[test]
fn test_traverse_map_large_input() {
    let prices: HashMap<usize, usize> = (0..LARGE).map(|i| (i, i + 1)).collect();

    let par = traverse_map_par(prices.clone(), |p| IOResult::<_, String>::pure(p * 10));
    let par = par.run().unwrap();
    assert_eq!(par.len(), LARGE);
    assert_eq!(par[&42], 430);

    let seq = traverse_map_seq(prices, |p| IOResult::<_, String>::pure(p * 10));
    assert_eq!(seq.run().unwrap(), par);
}

#[test]
fn test_large_traversal_dropped_without_running() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = traverse_vec_seq(0..LARGE, |i| counted::<_, ()>(&runs, Ok(i)));
    drop(io);

    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

// ========== Memoization ==========

#[test]
fn test_memoize_runs_once_across_threads() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = {
        let runs = runs.clone();
        IOResult::<_, String>::from_fn(move || {
            thread::sleep(Duration::from_millis(10));
            Ok(runs.fetch_add(1, Ordering::SeqCst) + 100)
        })
    }
    .memoize();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| io.run())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|r| *r == Ok(100)));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_memoize_caches_errors() {
    let runs = Arc::new(AtomicUsize::new(0));
    let io = counted(&runs, Err::<i32, _>("failed once")).memoize();

    for _ in 0..5 {
        assert_eq!(io.run(), Err("failed once"));
    }
    assert_eq!(io.clone().run(), Err("failed once"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// ========== Scenarios ==========

#[test]
fn test_with_resource_failed_acquire_never_uses_or_releases() {
    let uses = Arc::new(AtomicUsize::new(0));
    let releases = Arc::new(AtomicUsize::new(0));
    let io = {
        let uses = uses.clone();
        let releases = releases.clone();
        with_resource(
            IOResult::<String, _>::fail("boom".to_string()),
            move |_: &String| {
                uses.fetch_add(1, Ordering::SeqCst);
                IOResult::pure(())
            },
            move |_| {
                releases.fetch_add(1, Ordering::SeqCst);
                IOResult::pure(())
            },
        )
    };

    assert_eq!(io.run(), Err("boom".to_string()));
    assert_eq!(uses.load(Ordering::SeqCst), 0);
    assert_eq!(releases.load(Ordering::SeqCst), 0);
}

// ========== Laws ==========

proptest! {
    #[test]
    fn prop_functor_identity(outcome in outcome_strategy()) {
        prop_assert_eq!(from_outcome(outcome.clone()).map(|x| x).run(), outcome);
    }

    #[test]
    fn prop_functor_composition(outcome in outcome_strategy()) {
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x.wrapping_sub(7);

        let composed = from_outcome(outcome.clone()).map(move |x| g(f(x)));
        let chained = from_outcome(outcome).map(f).map(g);
        prop_assert_eq!(composed.run(), chained.run());
    }

    #[test]
    fn prop_monad_left_identity(a in any::<i32>()) {
        let f = |x: i32| {
            if x % 3 == 0 {
                IOResult::fail(format!("{} divisible", x))
            } else {
                IOResult::pure(x.wrapping_add(1))
            }
        };
        prop_assert_eq!(IOResult::pure(a).and_then(f).run(), f(a).run());
    }

    #[test]
    fn prop_monad_right_identity(outcome in outcome_strategy()) {
        let m = from_outcome(outcome);
        prop_assert_eq!(m.clone().and_then(IOResult::pure).run(), m.run());
    }

    #[test]
    fn prop_monad_associativity(outcome in outcome_strategy()) {
        let f = |x: i32| {
            if x < 0 { IOResult::fail("negative".to_string()) } else { IOResult::pure(x / 2) }
        };
        let g = |x: i32| IOResult::<i32, String>::pure(x.wrapping_add(10));

        let left = from_outcome(outcome.clone()).and_then(f).and_then(g);
        let right = from_outcome(outcome).and_then(move |x| f(x).and_then(g));
        prop_assert_eq!(left.run(), right.run());
    }

    #[test]
    fn prop_parallel_precedence(f_outcome in outcome_strategy(), a_outcome in outcome_strategy()) {
        let cf = from_outcome(f_outcome.clone()).map(|k| move |a: i32| a.wrapping_add(k));
        let ca = from_outcome(a_outcome.clone());

        let expected = match (f_outcome, a_outcome) {
            (Err(e1), _) => Err(e1),
            (Ok(_), Err(e2)) => Err(e2),
            (Ok(k), Ok(a)) => Ok(a.wrapping_add(k)),
        };
        prop_assert_eq!(apply_parallel(cf.clone(), ca.clone()).run(), expected.clone());
        prop_assert_eq!(apply_sequential(cf, ca).run(), expected);
    }

    #[test]
    fn prop_memoize_replays_first_outcome(outcome in outcome_strategy(), n in 1usize..10) {
        let runs = Arc::new(AtomicUsize::new(0));
        let io = counted(&runs, outcome.clone()).memoize();
        for _ in 0..n {
            prop_assert_eq!(io.run(), outcome.clone());
        }
        prop_assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn prop_traversals_agree_without_errors(xs in prop::collection::vec(any::<i16>(), 0..12)) {
        let double = |x: i16| IOResult::<_, String>::pure(i32::from(x) * 2);
        let expected: Vec<i32> = xs.iter().map(|x| i32::from(*x) * 2).collect();

        prop_assert_eq!(traverse_vec_par(xs.clone(), double).run(), Ok(expected.clone()));
        prop_assert_eq!(traverse_vec_seq(xs, double).run(), Ok(expected));
    }
}

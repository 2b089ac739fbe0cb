//! Stress Tests - Concurrent Access to One Naming Tree
//!
//! These tests run many threads against shared contexts to check that:
//! - Concurrent binds of distinct names all land
//! - Exactly one of several racing binds of the same name wins
//! - Deep resolution never deadlocks against binds in the contexts it crosses
//! - Shared iterators deliver each binding exactly once

mod common;

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;

use common::*;
use cosnaming::{NamingContextExt, NamingContextHandle, NamingError, ObjectRef};

/// Test: many threads binding disjoint names into one context
#[test]
fn test_concurrent_disjoint_binds() {
    init_logging();

    const THREADS: usize = 16;
    const BINDS_PER_THREAD: usize = 200;

    let service = service();
    let barrier = Arc::new(Barrier::new(THREADS));
    let failures = Arc::new(ThreadFailures::new());
    let start = Instant::now();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let root = service.root();
            let barrier = barrier.clone();
            let failures = failures.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..BINDS_PER_THREAD {
                    let id = format!("t{}_{}", t, i);
                    if let Err(e) = root.bind(&ids(&[id.as_str()]), ObjectRef::object("IDL:X:1.0")) {
                        failures.record(format!("{}: {}", id, e));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    failures.assert_none();
    assert_eq!(
        service.root_context().binding_count().unwrap(),
        THREADS * BINDS_PER_THREAD
    );
    assert!(start.elapsed() < STRESS_TIMEOUT);
}

/// Test: racing binds of a single name; exactly one may succeed
#[test]
fn test_racing_binds_single_winner() {
    init_logging();

    const THREADS: usize = 12;

    let service = service();
    let barrier = Arc::new(Barrier::new(THREADS));
    let winners = Arc::new(Mutex::new(Vec::new()));
    let failures = Arc::new(ThreadFailures::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let root = service.root();
            let barrier = barrier.clone();
            let winners = winners.clone();
            let failures = failures.clone();
            thread::spawn(move || {
                let obj = ObjectRef::object(format!("IDL:Racer{}:1.0", t));
                barrier.wait();
                match root.bind(&ids(&["contested"]), obj.clone()) {
                    Ok(()) => winners.lock().push(obj),
                    Err(NamingError::AlreadyBound(_)) => {}
                    Err(e) => failures.record(e.to_string()),
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    failures.assert_none();
    let winners = winners.lock();
    assert_eq!(winners.len(), 1);
    assert_eq!(service.resolve_str("contested").unwrap(), winners[0]);
}

/// Test: deep resolution while other threads mutate every level
#[test]
fn test_resolve_while_mutating_path() {
    init_logging();

    const DEPTH: usize = 6;
    const READERS: usize = 8;
    const WRITERS: usize = 4;
    const ITERATIONS: usize = 300;

    let service = service();
    let root = service.root();
    let mut levels = vec![root.clone()];
    let mut path = Vec::new();
    for level in 0..DEPTH {
        let id = format!("l{}", level);
        let ctx = levels[level].bind_new_context(&ids(&[id.as_str()])).unwrap();
        path.push(id);
        levels.push(ctx);
    }
    let leaf = ObjectRef::object("IDL:Leaf:1.0");
    levels[DEPTH].bind(&ids(&["leaf"]), leaf.clone()).unwrap();
    let leaf_path = format!("{}/leaf", path.join("/"));

    let barrier = Arc::new(Barrier::new(READERS + WRITERS));
    let failures = Arc::new(ThreadFailures::new());
    let mut handles = Vec::new();

    for _ in 0..READERS {
        let root = root.clone();
        let leaf = leaf.clone();
        let leaf_path = leaf_path.clone();
        let barrier = barrier.clone();
        let failures = failures.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS {
                match root.resolve_str(&leaf_path) {
                    Ok(found) if found == leaf => {}
                    Ok(other) => failures.record(format!("resolved to {:?}", other)),
                    Err(e) => failures.record(e.to_string()),
                }
            }
        }));
    }

    for w in 0..WRITERS {
        let levels = levels.clone();
        let barrier = barrier.clone();
        let failures = failures.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..ITERATIONS {
                let ctx = &levels[i % levels.len()];
                let name = ids(&[format!("noise{}_{}", w, i).as_str()]);
                let result = ctx
                    .bind(&name, ObjectRef::object("IDL:Noise:1.0"))
                    .and_then(|_| ctx.unbind(&name));
                if let Err(e) = result {
                    failures.record(e.to_string());
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    failures.assert_none();
    for ctx in &levels[..DEPTH] {
        assert_eq!(ctx.list(10).unwrap().bindings.len(), 1);
    }
}

/// Test: threads sharing one iterator never see a binding twice
#[test]
fn test_shared_iterator_delivers_once() {
    init_logging();

    const BINDINGS: usize = 500;
    const THREADS: usize = 8;

    let service = service();
    let root = service.root();
    for i in 0..BINDINGS {
        root.bind(&ids(&[format!("b{}", i).as_str()]), ObjectRef::object("IDL:X:1.0"))
            .unwrap();
    }

    let list = Arc::new(root.list(0).unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let list = list.clone();
            let barrier = barrier.clone();
            let seen = seen.clone();
            thread::spawn(move || {
                barrier.wait();
                loop {
                    let batch = if t % 2 == 0 {
                        let (binding, more) = list.iterator.next_one().unwrap();
                        if more { vec![binding] } else { Vec::new() }
                    } else {
                        list.iterator.next_n(7).unwrap().0
                    };
                    if batch.is_empty() {
                        break;
                    }
                    let mut seen = seen.lock();
                    seen.extend(batch.into_iter().map(|b| b.component().unwrap().id.clone()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let seen = seen.lock();
    let unique: HashSet<_> = seen.iter().cloned().collect();
    assert_eq!(seen.len(), BINDINGS);
    assert_eq!(unique.len(), BINDINGS);
}

/// Test: concurrent bind_new_context under the same name leaves no strays
#[test]
fn test_racing_bind_new_context() {
    init_logging();

    const THREADS: usize = 10;

    let service = service();
    let barrier = Arc::new(Barrier::new(THREADS));
    let created = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let root = service.root();
            let barrier = barrier.clone();
            let created = created.clone();
            thread::spawn(move || {
                barrier.wait();
                if let Ok(ctx) = root.bind_new_context(&ids(&["dir"])) {
                    created.lock().push(ctx);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let created = created.lock();
    assert_eq!(created.len(), 1);
    let bound = service.resolve_str("dir").unwrap().narrow_context().unwrap();
    assert_eq!(bound, created[0]);
}

//! Concurrent access tests for [`InMemoryServerRegistry`].
//!
//! Threads interleave writes and reads on the same registry; the catalog must
//! stay consistent and readers must only ever see fully applied patches.

use crate::in_memory::helpers::{TestRegistry, id, players, record, registry};
use matchmaking::server_registry::{
    domain::{ServerPatch, ServerRecord, ServerState, ServerType},
    ports::{ServerRegistry, ServerRegistryError},
};
use rstest::rstest;
use serde_json::{Map, json};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

const THREADS: usize = 8;
const IDS_PER_THREAD: usize = 16;
const ITERATIONS: usize = 2_000;

fn assert_all_match(found: &[ServerRecord], server_type: ServerType, players_needed: i64) {
    for server in found {
        assert_eq!(server.server_type(), server_type);
        assert_eq!(server.state(), ServerState::Free);
        assert!(server.remaining_capacity() >= players_needed);
    }
}

#[rstest]
fn count_matches_adds_minus_removes(registry: TestRegistry) {
    let live_sets: Vec<HashSet<String>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|worker| {
                let shared = &registry;
                scope.spawn(move || {
                    let mut live = HashSet::new();
                    for step in 0..ITERATIONS {
                        let slot = (step * 13 + worker) % IDS_PER_THREAD;
                        let name = format!("w{worker}-s{slot}");
                        match (step * 7 + worker) % 5 {
                            0 | 1 => {
                                shared.add(record(&name, 1, ServerState::Free, 8, step % 10));
                                live.insert(name);
                            }
                            2 => {
                                shared.remove(&id(&name));
                                live.remove(&name);
                            }
                            3 => {
                                let found = shared.find(ServerType::new(1), 2);
                                assert_all_match(&found, ServerType::new(1), 2);
                            }
                            _ => {
                                let snapshot = shared.list();
                                assert!(snapshot.len() <= THREADS * IDS_PER_THREAD);
                            }
                        }
                    }
                    live
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker should not panic"))
            .collect()
    });

    let expected: HashSet<String> = live_sets.into_iter().flatten().collect();
    let stored: HashSet<String> = registry
        .list()
        .iter()
        .map(|server| server.identifier().to_string())
        .collect();

    assert_eq!(registry.len(), expected.len());
    assert_eq!(stored, expected);
}

#[rstest]
fn overlapping_identifiers_keep_the_catalog_intact(registry: TestRegistry) {
    let shared_ids: Vec<String> = (0..4).map(|slot| format!("shared-{slot}")).collect();

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let shared = &registry;
            let names = &shared_ids;
            scope.spawn(move || {
                for step in 0..ITERATIONS {
                    let name = &names[(step + worker) % names.len()];
                    match (step + worker) % 4 {
                        0 => shared.add(record(name, 2, ServerState::Free, 4, step % 6)),
                        1 => {
                            shared.remove(&id(name));
                        }
                        2 => {
                            let outcome = shared.update(
                                &id(name),
                                &ServerPatch::new().with_players(players(step % 5)),
                            );
                            assert!(
                                matches!(outcome, Ok(_) | Err(ServerRegistryError::NotFound(_))),
                                "unexpected update outcome: {outcome:?}"
                            );
                        }
                        _ => {
                            let found = shared.find(ServerType::new(2), 1);
                            assert_all_match(&found, ServerType::new(2), 1);
                        }
                    }
                }
            });
        }
    });

    let snapshot = registry.list();
    assert_eq!(snapshot.len(), registry.len());
    assert!(registry.len() <= shared_ids.len());
    for server in &snapshot {
        assert!(shared_ids.contains(&server.identifier().to_string()));
    }
}

fn version_patch(version: &str, state: ServerState, players_max: u32, connected: usize) -> ServerPatch {
    let mut extras = Map::new();
    extras.insert("version".to_owned(), json!(version));
    ServerPatch::new()
        .with_state(state)
        .with_players_max(players_max)
        .with_players(players(connected))
        .with_extras(extras)
}

fn assert_single_version(server: &ServerRecord) {
    let version = server
        .extras()
        .get("version")
        .and_then(serde_json::Value::as_str);
    match version {
        Some("a") => {
            assert_eq!(server.state(), ServerState::Free);
            assert_eq!(server.players_max(), 10);
            assert_eq!(server.players().len(), 1);
        }
        Some("b") => {
            assert_eq!(server.state(), ServerState::Busy);
            assert_eq!(server.players_max(), 20);
            assert_eq!(server.players().len(), 2);
        }
        other => panic!("unexpected version marker {other:?}"),
    }
}

#[rstest]
fn readers_never_observe_interleaved_patches(registry: TestRegistry) {
    let patch_a = version_patch("a", ServerState::Free, 10, 1);
    let patch_b = version_patch("b", ServerState::Busy, 20, 2);
    registry.add(record("arena", 5, ServerState::Startup, 0, 0));
    registry
        .update(&id("arena"), &patch_a)
        .expect("seed patch should apply");
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        scope.spawn(|| {
            for step in 0..ITERATIONS * 4 {
                let patch = if step % 2 == 0 { &patch_b } else { &patch_a };
                registry
                    .update(&id("arena"), patch)
                    .expect("patch should apply");
            }
            done.store(true, Ordering::Release);
        });

        for _ in 0..THREADS - 1 {
            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    for server in registry.list() {
                        assert_single_version(&server);
                    }
                    if let Some(server) = registry.get(&id("arena")) {
                        assert_single_version(&server);
                    }
                    for server in registry.find(ServerType::new(5), 0) {
                        assert_single_version(&server);
                        assert_eq!(server.players_max(), 10);
                    }
                }
            });
        }
    });

    let last = registry.get(&id("arena")).expect("record should exist");
    assert_single_version(&last);
    assert_eq!(last.state(), ServerState::Free);
}

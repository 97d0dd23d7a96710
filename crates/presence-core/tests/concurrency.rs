//! Store behavior under many concurrent callers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use futures_util::future::join_all;
use presence_core::PresenceStore;

const TASKS: usize = 32;
const ROUNDS: usize = 200;

fn is_strictly_sorted(v: &[String]) -> bool {
    v.windows(2).all(|w| w[0] < w[1])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_connects_on_one_user_are_not_lost() {
    let store = Arc::new(PresenceStore::new());

    let connects = (0..TASKS).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..ROUNDS {
                store.connect("alice");
            }
        })
    });
    for r in join_all(connects).await {
        r.unwrap();
    }

    // every connect except the final one must be matched before alice leaves
    let disconnects = (0..TASKS).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let n = if i == 0 { ROUNDS - 1 } else { ROUNDS };
            for _ in 0..n {
                store.disconnect("alice");
            }
        })
    });
    for r in join_all(disconnects).await {
        r.unwrap();
    }

    assert_eq!(store.online_users(), vec!["alice"]);
    store.disconnect("alice");
    assert!(store.online_users().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn balanced_sessions_leave_nobody_online() {
    let store = Arc::new(PresenceStore::new());

    let tasks = (0..TASKS).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let user = format!("user-{}", i % 8);
            for _ in 0..ROUNDS {
                let listed = store.connect(&user);
                assert!(listed.contains(&user));
                assert!(is_strictly_sorted(&listed));
                store.set_typing(&user, true);
                store.disconnect(&user);
            }
        })
    });
    for r in join_all(tasks).await {
        r.unwrap();
    }

    assert!(store.online_users().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_see_duplicates_or_disorder() {
    let store = Arc::new(PresenceStore::new());

    let writers = (0..8).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for round in 0..ROUNDS {
                let user = format!("w{}-{}", i, round % 5);
                store.connect(&user);
                store.set_typing(&user, round % 2 == 0);
                if round % 3 == 0 {
                    store.disconnect(&user);
                }
            }
        })
    });
    let readers = (0..8).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..ROUNDS {
                assert!(is_strictly_sorted(&store.online_users()));
                assert!(is_strictly_sorted(&store.typing_users()));
                let snap = store.snapshot();
                assert!(is_strictly_sorted(&snap.online));
                assert!(is_strictly_sorted(&snap.typing));
            }
        })
    });

    for r in join_all(writers.chain(readers)).await {
        r.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn disconnect_never_leaves_orphan_typing() {
    let store = Arc::new(PresenceStore::new());

    let tasks = (0..TASKS).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let user = format!("u{}", i % 4);
            for _ in 0..ROUNDS {
                store.connect(&user);
                store.set_typing(&user, true);
                store.disconnect(&user);
                let snap = store.snapshot();
                for typing in &snap.typing {
                    assert!(
                        snap.online.contains(typing),
                        "{typing} typing while offline"
                    );
                }
            }
        })
    });
    for r in join_all(tasks).await {
        r.unwrap();
    }

    assert!(store.typing_users().is_empty());
}

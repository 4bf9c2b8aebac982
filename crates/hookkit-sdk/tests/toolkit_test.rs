//! Integration tests for a toolkit instance as a hook plugin uses it.
//!
//! Filesystem effects are confined to temp dirs by pointing the toolkit's
//! address prefix and proc root at them.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use hookkit_common::config::ToolkitConfig;
use hookkit_common::error::HookkitError;
use hookkit_common::types::{ContainerConfigDocument, ContainerRuntimeState};
use hookkit_sdk::{HookUtils, NamespaceKind};
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;

fn toolkit_in(dir: &std::path::Path, container: &str) -> HookUtils {
    let settings = ToolkitConfig {
        address_file_prefix: dir.join("net/"),
        proc_root: dir.join("proc"),
    };
    HookUtils::new(Some(ContainerConfigDocument::new(container))).with_config(settings)
}

// ── Network info ─────────────────────────────────────────────────────

#[test]
fn network_info_reads_published_address_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let utils = toolkit_in(dir.path(), "web-1");
    utils
        .mkdir_recursive(&dir.path().join("net"), Mode::from_bits_truncate(0o755))
        .expect("mkdir");
    utils
        .write_text_file(
            &dir.path().join("net/web-1"),
            "10.0.0.5/veth123",
            OFlag::O_CREAT | OFlag::O_TRUNC,
            Mode::from_bits_truncate(0o644),
        )
        .expect("publish");

    let info = utils
        .get_container_network_info()
        .expect("lookup")
        .expect("file present");
    assert_eq!(info.ip_address, "10.0.0.5");
    assert_eq!(info.veth_name, "veth123");
}

#[test]
fn network_info_without_veth_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("net")).expect("mkdir");
    std::fs::write(dir.path().join("net/web-1"), "10.0.0.5").expect("publish");

    let utils = toolkit_in(dir.path(), "web-1");
    let err = utils.get_container_network_info().expect_err("no veth");
    assert!(matches!(err, HookkitError::Parse { .. }));
}

#[test]
fn network_info_before_network_plugin_ran() {
    let dir = tempfile::tempdir().expect("tempdir");
    let utils = toolkit_in(dir.path(), "web-1");
    assert!(utils.get_container_network_info().expect("lookup").is_none());
}

// ── Config mutation ──────────────────────────────────────────────────

#[test]
fn mutations_survive_hand_back_in_order() {
    let utils = HookUtils::new(Some(ContainerConfigDocument::new("c1")));
    utils.add_environment_var("A=1").expect("env");
    utils
        .add_mount("/host/a", "/a", "bind", ["rbind", "ro"])
        .expect("mount");
    utils.add_environment_var("B=2").expect("env");
    utils.add_environment_var("A=1").expect("env dup");
    utils
        .add_mount("/host/a", "/a", "bind", ["rbind", "ro"])
        .expect("mount dup");

    let doc = utils.into_document().expect("document");
    assert_eq!(doc.process.env, vec!["A=1", "B=2"]);
    assert_eq!(doc.mounts.len(), 2);
    assert_eq!(doc.mounts[0], doc.mounts[1]);
}

#[test]
fn concurrent_hooks_do_not_lose_updates() {
    let utils = Arc::new(HookUtils::new(Some(ContainerConfigDocument::new("c1"))));

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let utils = Arc::clone(&utils);
            thread::spawn(move || {
                for j in 0..25 {
                    utils
                        .add_mount(format!("/src/{i}/{j}"), "/dst", "bind", ["rbind"])
                        .expect("mount");
                    utils
                        .add_environment_var(format!("VAR_{i}_{j}=x"))
                        .expect("env");
                    utils.add_environment_var("SHARED=1").expect("env");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker");
    }

    let (mounts, env) = utils
        .with_document(|d| (d.mounts.len(), d.process.env.clone()))
        .expect("document");
    assert_eq!(mounts, 200);
    assert_eq!(env.len(), 201);
    assert_eq!(env.iter().filter(|e| *e == "SHARED=1").count(), 1);
}

#[test]
fn unbound_toolkit_reports_failures() {
    let utils = HookUtils::new(None);
    assert!(utils.add_mount("/a", "/b", "bind", ["ro"]).is_err());
    assert!(utils.add_environment_var("A=1").is_err());
    assert!(utils.get_container_id().is_err());
    assert!(utils.get_container_network_info().is_err());
    assert_eq!(utils.get_container_pid(), None);
}

// ── Files ────────────────────────────────────────────────────────────

#[test]
fn mkdir_recursive_twice_leaves_tree_with_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let utils = HookUtils::new(None);
    let target = dir.path().join("a/b/c");
    let mode = Mode::from_bits_truncate(0o711);

    utils.mkdir_recursive(&target, mode).expect("first");
    utils.mkdir_recursive(&target, mode).expect("second");

    for sub in ["a", "a/b", "a/b/c"] {
        let meta = std::fs::metadata(dir.path().join(sub)).expect("exists");
        assert!(meta.is_dir());
        assert_eq!(meta.permissions().mode() & 0o777, 0o711);
    }
}

// ── Namespaces ───────────────────────────────────────────────────────

#[test]
fn namespace_entry_rejects_unsupported_kinds() {
    let calls = AtomicUsize::new(0);
    let state = ContainerRuntimeState::with_pid(std::process::id());
    let utils = HookUtils::with_state(None, state);

    for kind in [NamespaceKind::Pid, NamespaceKind::User, NamespaceKind::Uts] {
        let result = utils.run_in_container_namespace(kind, || {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        });
        assert!(result.is_err());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
#[ignore = "requires CAP_SYS_ADMIN"]
fn namespace_entry_returns_callback_result() {
    let state = ContainerRuntimeState::with_pid(std::process::id());
    let utils = HookUtils::with_state(Some(ContainerConfigDocument::new("c1")), state);

    for kind in [NamespaceKind::Ipc, NamespaceKind::Net, NamespaceKind::Mount] {
        let calls = AtomicUsize::new(0);
        let result = utils
            .run_in_container_namespace(kind, || {
                calls.fetch_add(1, Ordering::SeqCst);
                false
            })
            .expect("enter");
        assert!(!result);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    // The caller's own thread is untouched and the lock is free again.
    utils.add_environment_var("AFTER=1").expect("env");
}

//! File operations through the capability traits, in memory

use crate::common::*;
use attest::{CancellationToken, FileError};
use std::path::Path;

#[tokio::test]
async fn precancelled_append_performs_no_write() {
    let rt = test_runtime();
    rt.cancel();

    let err = ops::append_lines(&rt, "/audit.log", &lines(&["entry"]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FileErrorKind::Canceled);
    assert_eq!(rt.file().write_count(), 0);
    assert!(!rt.file().exists("/audit.log"));
}

#[tokio::test]
async fn read_lines_on_missing_path() {
    let rt = test_runtime();
    let err = ops::read_lines(&rt, "/does/not/exist").await.unwrap_err();
    assert_eq!(err.kind(), FileErrorKind::NotFound);
    assert!(matches!(err, FileError::NotFound { ref path } if path == Path::new("/does/not/exist")));
}

#[tokio::test]
async fn permission_denied_is_reported() {
    let rt = test_runtime();
    rt.file().insert("/etc/shadow", "root:x");
    rt.file().deny("/etc/shadow");

    let err = ops::read_text(&rt, "/etc/shadow").await.unwrap_err();
    assert_eq!(err.kind(), FileErrorKind::PermissionDenied);

    let err = ops::write_text(&rt, "/etc/shadow", "pwned").await.unwrap_err();
    assert_eq!(err.kind(), FileErrorKind::PermissionDenied);
    assert_eq!(rt.file().contents("/etc/shadow").unwrap(), b"root:x");
}

#[tokio::test]
async fn copy_without_overwrite_keeps_target() {
    let rt = test_runtime();
    ops::write_text(&rt, "/a.txt", "fresh").await.unwrap();
    ops::write_text(&rt, "/b.txt", "stale").await.unwrap();

    let err = ops::copy(&rt, "/a.txt", "/b.txt", false).await.unwrap_err();
    assert_eq!(err.kind(), FileErrorKind::AlreadyExists);
    assert_eq!(ops::read_text(&rt, "/b.txt").await.unwrap(), "stale");

    ops::copy(&rt, "/a.txt", "/b.txt", true).await.unwrap();
    assert_eq!(ops::read_text(&rt, "/b.txt").await.unwrap(), "fresh");
}

#[tokio::test]
async fn copy_then_delete_is_two_steps() {
    let rt = test_runtime();
    ops::write_lines(&rt, "/inbox/1.msg", &lines(&["hi"]))
        .await
        .unwrap();

    ops::copy(&rt, "/inbox/1.msg", "/archive/1.msg", false)
        .await
        .unwrap();
    ops::delete(&rt, "/inbox/1.msg").await.unwrap();

    assert!(!rt.file().exists("/inbox/1.msg"));
    assert_eq!(
        ops::read_lines(&rt, "/archive/1.msg").await.unwrap(),
        lines(&["hi"])
    );
    // deleting again is fine
    ops::delete(&rt, "/inbox/1.msg").await.unwrap();
}

#[tokio::test]
async fn cancellation_mid_stream() {
    let rt = test_runtime();
    let token = CancellationToken::new();
    let child = rt.child().with_token(token.clone());

    let mut writer = ops::create_text(&child, "/stream.txt").await.unwrap();
    writer.write_line("kept", child.cancel_token()).await.unwrap();
    token.cancel();

    let err = writer
        .write_line("dropped", child.cancel_token())
        .await
        .unwrap_err();
    assert!(err.is_canceled());
    assert_eq!(rt.file().contents("/stream.txt").unwrap(), b"kept\n");
    assert!(!rt.is_cancelled());
}

#[tokio::test]
async fn sibling_scopes_are_independent() {
    let rt = test_runtime();
    let first = rt.child();
    let second = rt.child();
    first.cancel();

    assert!(ops::write_text(&first, "/x", "1").await.unwrap_err().is_canceled());
    ops::write_text(&second, "/x", "2").await.unwrap();
    assert_eq!(ops::read_text(&rt, "/x").await.unwrap(), "2");
}

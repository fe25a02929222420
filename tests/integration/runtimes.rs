//! One operation, written once, against both runtimes

use crate::common::*;
use std::path::Path;

/// Move `lines` from a journal into an archive, leaving the journal empty.
async fn rotate_journal<RT>(rt: &RT, root: &Path, lines: &[String]) -> FileResult<Vec<String>>
where
    RT: HasFile + HasCancel + HasEncoding,
{
    let journal = root.join("journal.log");
    let archive = root.join("journal.1.log");

    ops::append_lines(rt, &journal, lines).await?;
    ops::copy(rt, &journal, &archive, true).await?;
    ops::delete(rt, &journal).await?;
    ops::read_lines(rt, &archive).await
}

#[tokio::test]
async fn rotate_on_live_runtime() {
    let fx = LiveFixture::new();
    let input = lines(&["boot", "ready"]);

    let archived = rotate_journal(&fx.rt, fx.root(), &input).await.unwrap();

    assert_eq!(archived, input);
    assert!(!fx.path("journal.log").exists());
    assert_eq!(
        std::fs::read(fx.path("journal.1.log")).unwrap(),
        b"boot\nready\n"
    );
}

#[tokio::test]
async fn rotate_on_test_runtime() {
    let rt = test_runtime();
    let input = lines(&["boot", "ready"]);

    let archived = rotate_journal(&rt, Path::new("/var/log"), &input)
        .await
        .unwrap();

    assert_eq!(archived, input);
    assert!(!rt.file().exists("/var/log/journal.log"));
    assert_eq!(
        rt.file().contents("/var/log/journal.1.log").unwrap(),
        b"boot\nready\n"
    );
}

#[tokio::test]
async fn cancelled_runtimes_agree() {
    let fx = LiveFixture::new();
    fx.rt.cancel();
    let live = rotate_journal(&fx.rt, fx.root(), &lines(&["x"])).await;

    let mem = test_runtime();
    mem.cancel();
    let simulated = rotate_journal(&mem, Path::new("/"), &lines(&["x"])).await;

    assert_eq!(live.unwrap_err().kind(), FileErrorKind::Canceled);
    assert_eq!(simulated.unwrap_err().kind(), FileErrorKind::Canceled);
    assert!(!fx.path("journal.log").exists());
    assert_eq!(mem.file().write_count(), 0);
}

#[tokio::test]
async fn missing_file_agrees() {
    let fx = LiveFixture::new();
    let mem = test_runtime();

    let live = ops::read_lines(&fx.rt, fx.path("absent.txt")).await;
    let simulated = ops::read_lines(&mem, "/absent.txt").await;

    assert_eq!(live.unwrap_err().kind(), FileErrorKind::NotFound);
    assert_eq!(simulated.unwrap_err().kind(), FileErrorKind::NotFound);
}

#[tokio::test]
async fn live_runtime_from_config_file() {
    let fx = LiveFixture::new();
    let config_path = fx.path(attest::CONFIG_FILE_NAME);
    std::fs::write(&config_path, "encoding = \"latin1\"\nbuffer_size = 16\n").unwrap();

    let config = RuntimeConfig::load_or_default(fx.root()).unwrap();
    let rt = LiveRuntime::from_config(&config).unwrap();
    ops::write_text(&rt, fx.path("menu.txt"), "café").await.unwrap();

    assert_eq!(
        std::fs::read(fx.path("menu.txt")).unwrap(),
        vec![b'c', b'a', b'f', 0xE9]
    );
    assert_eq!(rt.file().buffer_size(), 16);
}

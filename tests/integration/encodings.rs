//! Non-UTF-8 text through the full stack

use crate::common::*;
use encoding_rs::{SHIFT_JIS, UTF_16BE, UTF_16LE, WINDOWS_1252};

#[tokio::test]
async fn latin1_round_trip_on_disk() {
    let fx = LiveFixture::new().with_encoding(WINDOWS_1252);
    let path = fx.path("names.txt");
    let names = lines(&["Zoë", "François", "Søren"]);

    ops::write_lines(&fx.rt, &path, &names).await.unwrap();

    let raw = std::fs::read(&path).unwrap();
    assert!(std::str::from_utf8(&raw).is_err());
    assert_eq!(ops::read_lines(&fx.rt, &path).await.unwrap(), names);
}

#[tokio::test]
async fn utf16_round_trip_in_memory() {
    let rt = test_runtime().with_encoding(UTF_16LE);
    let text = "snowman ☃ and clef 𝄞";

    ops::write_text(&rt, "/u16.txt", text).await.unwrap();

    let raw = rt.file().contents("/u16.txt").unwrap();
    assert_eq!(&raw[..2], &[b's', 0x00]);
    assert_eq!(ops::read_text(&rt, "/u16.txt").await.unwrap(), text);
}

#[tokio::test]
async fn utf16_with_bom_is_read() {
    let rt = test_runtime().with_encoding(UTF_16BE);
    rt.file()
        .insert("/bom.txt", vec![0xFE, 0xFF, 0x00, b'o', 0x00, b'k', 0x00, b'\n']);

    assert_eq!(ops::read_lines(&rt, "/bom.txt").await.unwrap(), lines(&["ok"]));
}

#[tokio::test]
async fn unmappable_character_is_encoding_error() {
    let rt = test_runtime().with_encoding(WINDOWS_1252);

    let err = ops::write_lines(&rt, "/greek.txt", &lines(&["ok", "αβγ"]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FileErrorKind::Encoding);
    assert!(err.to_string().contains("windows-1252"));
    assert_eq!(rt.file().write_count(), 0);
}

#[tokio::test]
async fn malformed_bytes_are_encoding_error() {
    let fx = LiveFixture::new();
    let path = fx.path("binary.dat");
    std::fs::write(&path, [0x00, 0x9F, 0xFF, 0xC0]).unwrap();

    let err = ops::read_text(&fx.rt, &path).await.unwrap_err();
    assert_eq!(err.kind(), FileErrorKind::Encoding);
}

#[tokio::test]
async fn shift_jis_streaming() {
    let fx = LiveFixture::new().with_encoding(SHIFT_JIS);
    let path = fx.path("jp.txt");

    let mut writer = ops::create_text(&fx.rt, &path).await.unwrap();
    writer.write_line("こんにちは", fx.rt.cancel_token()).await.unwrap();
    writer.write_line("世界", fx.rt.cancel_token()).await.unwrap();
    writer.close().await.unwrap();

    let mut reader = ops::open_text(&fx.rt, &path).await.unwrap();
    let mut read = Vec::new();
    while let Some(line) = reader.read_line(fx.rt.cancel_token()).await.unwrap() {
        read.push(line);
    }
    assert_eq!(read, lines(&["こんにちは", "世界"]));
}

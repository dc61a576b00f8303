// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn write_message_adds_length_prefix() {
    let data = b"test data";

    let mut buffer = Vec::new();
    write_message(&mut buffer, data).await.unwrap();

    let len = u32::from_be_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]) as usize;
    assert_eq!(len, data.len());
    assert_eq!(&buffer[4..], data);
}

#[tokio::test]
async fn read_back_written_frame() {
    let mut buffer = Vec::new();
    write_message(&mut buffer, b"hello world").await.unwrap();

    let mut cursor = std::io::Cursor::new(buffer);
    let read_back = read_message(&mut cursor).await.unwrap();
    assert_eq!(read_back, b"hello world");
}

#[tokio::test]
async fn empty_stream_is_connection_closed() {
    let mut cursor = std::io::Cursor::new(Vec::<u8>::new());
    let err = read_message(&mut cursor).await.unwrap_err();
    assert!(matches!(err, WireError::ConnectionClosed));
}

#[tokio::test]
async fn oversized_length_is_rejected() {
    let mut buffer = ((MAX_FRAME_LEN + 1) as u32).to_be_bytes().to_vec();
    buffer.extend_from_slice(b"x");
    let mut cursor = std::io::Cursor::new(buffer);
    let err = read_message(&mut cursor).await.unwrap_err();
    assert!(matches!(err, WireError::FrameTooLarge(_)));
}

#[test]
fn decode_rejects_garbage() {
    let result: Result<serde_json::Value, _> = decode(b"{not json");
    assert!(matches!(result, Err(WireError::Json(_))));
}

//! Tests for opening a header block (status, preamble, single-frame blocks)

use h2_header_writer::{
    begin_response, begin_trailers, FieldEncoder, HeaderCursor, HeaderSet, ResponseHeaders,
    WriteResult,
};

use crate::decode_block;

#[test]
fn test_status_only_response() {
    let headers = ResponseHeaders::new();
    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    let mut encoder = FieldEncoder::new();
    let mut buf = [0u8; 64];

    let (len, result) = begin_response(200, &mut cursor, &mut encoder, &mut buf).unwrap();
    assert_eq!(result, WriteResult::Done);
    assert_eq!(&buf[..len], &[0x88]); // :status 200, static index 8
}

#[test]
fn test_all_table_resident_statuses_are_one_byte() {
    for (status, expected) in [
        (200u16, 0x88u8),
        (204, 0x89),
        (206, 0x8A),
        (304, 0x8B),
        (400, 0x8C),
        (404, 0x8D),
        (500, 0x8E),
    ] {
        let headers = ResponseHeaders::new();
        let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
        let mut encoder = FieldEncoder::new();
        let mut buf = [0u8; 8];

        let (len, _) = begin_response(status, &mut cursor, &mut encoder, &mut buf).unwrap();
        assert_eq!(len, 1, "status {}", status);
        assert_eq!(buf[0], expected, "status {}", status);
    }
}

#[test]
fn test_uncommon_status_is_literal() {
    let headers = ResponseHeaders::new();
    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    let mut encoder = FieldEncoder::new();
    let mut buf = [0u8; 16];

    let (len, result) = begin_response(451, &mut cursor, &mut encoder, &mut buf).unwrap();
    assert_eq!(result, WriteResult::Done);
    // Without-indexing literal against the :status name (index 8)
    assert_eq!(&buf[..len], &[0x08, 0x03, b'4', b'5', b'1']);

    let decoded = decode_block(&buf[..len]);
    assert_eq!(decoded, vec![(":status".to_string(), "451".to_string())]);
}

#[test]
fn test_full_block_decodes_in_order() {
    let mut headers = ResponseHeaders::new();
    headers.append("content-type", "text/html");
    headers.append("server", "unit-test");
    headers.append("x-request-id", "abc-123");

    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    let mut encoder = FieldEncoder::new();
    let mut buf = [0u8; 256];

    let (len, result) = begin_response(200, &mut cursor, &mut encoder, &mut buf).unwrap();
    assert_eq!(result, WriteResult::Done);

    let decoded = decode_block(&buf[..len]);
    assert_eq!(
        decoded,
        vec![
            (":status".to_string(), "200".to_string()),
            ("content-type".to_string(), "text/html".to_string()),
            ("server".to_string(), "unit-test".to_string()),
            ("x-request-id".to_string(), "abc-123".to_string()),
        ]
    );
}

#[test]
fn test_trailers_carry_no_status() {
    let mut trailers = ResponseHeaders::new();
    trailers.append("grpc-status", "0");
    trailers.append("grpc-message", "ok");

    let mut cursor = HeaderCursor::new(HeaderSet::Trailers(&trailers));
    let mut encoder = FieldEncoder::new();
    let mut buf = [0u8; 128];

    let (len, result) = begin_trailers(&mut cursor, &mut encoder, &mut buf).unwrap();
    assert_eq!(result, WriteResult::Done);

    let decoded = decode_block(&buf[..len]);
    assert_eq!(
        decoded,
        vec![
            ("grpc-status".to_string(), "0".to_string()),
            ("grpc-message".to_string(), "ok".to_string()),
        ]
    );
}

#[test]
fn test_empty_trailers_write_nothing() {
    let trailers = ResponseHeaders::new();
    let mut cursor = HeaderCursor::new(HeaderSet::Trailers(&trailers));
    let mut encoder = FieldEncoder::new();
    let mut buf = [0u8; 64];

    let (len, result) = begin_trailers(&mut cursor, &mut encoder, &mut buf).unwrap();
    assert_eq!(result, WriteResult::Done);
    assert_eq!(len, 0);
}

#[test]
fn test_size_update_leads_the_block() {
    let mut headers = ResponseHeaders::new();
    headers.append("content-type", "text/plain");

    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    let mut encoder = FieldEncoder::new();
    encoder.set_max_table_size(256);
    let mut buf = [0u8; 128];

    let (len, result) = begin_response(200, &mut cursor, &mut encoder, &mut buf).unwrap();
    assert_eq!(result, WriteResult::Done);
    // Size update instruction first, then the status byte
    assert_eq!(&buf[..4], &[0x3F, 0xE1, 0x01, 0x88]);

    let decoded = decode_block(&buf[..len]);
    assert_eq!(decoded.len(), 2);
}

#[test]
fn test_size_update_not_repeated_on_next_block() {
    let mut headers = ResponseHeaders::new();
    headers.append("server", "unit");

    let mut encoder = FieldEncoder::new();
    encoder.set_max_table_size(256);
    let mut buf = [0u8; 128];

    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    begin_response(200, &mut cursor, &mut encoder, &mut buf).unwrap();

    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    let (_, result) = begin_response(200, &mut cursor, &mut encoder, &mut buf).unwrap();
    assert_eq!(result, WriteResult::Done);
    assert_eq!(buf[0], 0x88); // straight to :status
}

#[test]
fn test_empty_buffer_is_fatal() {
    let headers = ResponseHeaders::new();
    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    let mut encoder = FieldEncoder::new();
    let mut buf = [0u8; 0];

    let result = begin_response(200, &mut cursor, &mut encoder, &mut buf);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains(":status"));
}

#[test]
fn test_buffer_too_small_for_size_update_is_fatal() {
    let headers = ResponseHeaders::new();
    let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
    let mut encoder = FieldEncoder::new();
    encoder.set_max_table_size(256); // three-byte instruction
    let mut buf = [0u8; 2];

    let result = begin_response(200, &mut cursor, &mut encoder, &mut buf);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("size update"));
}

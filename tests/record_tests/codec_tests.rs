//! Record Codec Tests
//!
//! Tests for person record encoding and decoding.

use personkv::record::{decode, encode, Person, MIN_RECORD_LEN};
use personkv::PersonKvError;

// =============================================================================
// Helper Functions
// =============================================================================

fn ana() -> Person {
    Person::new("11122233344", "Ana", "01/01/2000", "11999990000").unwrap()
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_layout() {
    let encoded = encode(&ana()).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(b"11122233344");
    expected.push(3);
    expected.extend_from_slice(b"Ana");
    expected.extend_from_slice(b"01/01/2000");
    expected.extend_from_slice(b"11999990000");

    assert_eq!(encoded, expected);
    assert_eq!(encoded.len(), 36);
}

#[test]
fn test_encode_empty_name() {
    let person = Person::new("00000000000", "", "31/12/1999", "00000000000").unwrap();
    let encoded = encode(&person).unwrap();

    assert_eq!(encoded.len(), MIN_RECORD_LEN);
    assert_eq!(encoded[11], 0);
}

#[test]
fn test_encode_name_too_long() {
    let mut person = ana();
    person.name = vec![b'x'; 256];

    match encode(&person) {
        Err(PersonKvError::NameTooLong(256)) => {}
        other => panic!("Expected NameTooLong, got {:?}", other),
    }
}

#[test]
fn test_encode_max_name() {
    let mut person = ana();
    person.name = vec![b'x'; 255];

    let encoded = encode(&person).unwrap();
    assert_eq!(encoded.len(), 33 + 255);
    assert_eq!(encoded[11], 255);
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_round_trip() {
    let people = vec![
        ana(),
        Person::new("99988877766", "", "xx/yy/zzzz", "+5511999999").unwrap(),
        Person::new("12345678901", "José da Silva Júnior", "15/08/1975", "62987654321").unwrap(),
        Person {
            cpf: [0xFF; 11],
            name: (0..=254).collect(),
            birth_date: [0x00; 10],
            phone: [0x80; 11],
        },
    ];

    for person in people {
        let decoded = decode(&encode(&person).unwrap()).unwrap();
        assert_eq!(decoded, person);
    }
}

#[test]
fn test_decode_accepts_arbitrary_bytes() {
    // Field contents are never validated
    let mut bytes = vec![0u8; 11];
    bytes.push(2);
    bytes.extend_from_slice(&[0xC3, 0x28]);
    bytes.extend_from_slice(&[0xFF; 21]);

    let person = decode(&bytes).unwrap();
    assert_eq!(person.cpf, [0u8; 11]);
    assert_eq!(person.name, vec![0xC3, 0x28]);
    assert_eq!(person.birth_date, [0xFF; 10]);
    assert_eq!(person.phone, [0xFF; 11]);
}

#[test]
fn test_decode_short_header() {
    match decode(b"11122233344") {
        Err(PersonKvError::MalformedRecord { expected: 12, available: 11 }) => {}
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_decode_short_body() {
    let encoded = encode(&ana()).unwrap();

    match decode(&encoded[..encoded.len() - 1]) {
        Err(PersonKvError::MalformedRecord { expected: 36, available: 35 }) => {}
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_decode_ignores_trailing_bytes() {
    let mut encoded = encode(&ana()).unwrap();
    encoded.extend_from_slice(b"garbage");

    assert_eq!(decode(&encoded).unwrap(), ana());
}

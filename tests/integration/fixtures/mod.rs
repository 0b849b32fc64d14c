// Golden fixtures: RFC-style documents and diagrams with known decodings
// WHY: expected values are written out by hand so a decoder change shows up as a diff

#![allow(dead_code)]

use rfcsift::{Field, Paragraph};

/// Trimmed-down RFC 792 with title page, page furniture, an echo diagram and references
pub const ICMP_ECHO_DOCUMENT: &str = include_str!("../../fixtures/icmp_echo.txt");

/// RFC 791 internet header diagram
pub const IPV4_HEADER_DIAGRAM: &str = r#"    0                   1                   2                   3
    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |Version|  IHL  |Type of Service|          Total Length         |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |         Identification        |Flags|      Fragment Offset    |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |  Time to Live |    Protocol   |         Header Checksum       |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |                       Source Address                          |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |                    Destination Address                        |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |                    Options                    |    Padding    |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
"#;

/// RFC 792 destination unreachable diagram; the last row is an annotated width
pub const UNREACHABLE_DIAGRAM: &str = r#"    0                   1                   2                   3
    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |     Type      |     Code      |          Checksum             |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |                             unused                            |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |      Internet Header + 64 bits of Original Data Datagram      |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
"#;

/// Topics left after the default section focus, in document order
pub const ICMP_ECHO_TOPICS: &[&str] = &[
    "Introduction",
    "Message Formats",
    "Echo or Echo Reply Message",
    "References",
];

/// Fields of the ICMP echo diagram
pub fn icmp_echo_fields() -> Vec<Field> {
    vec![
        Field::fixed("type", 8),
        Field::fixed("code", 8),
        Field::fixed("checksum", 16),
        Field::fixed("identifier", 16),
        Field::fixed("sequence number", 16),
        Field::variable("data"),
    ]
}

/// Field names described below the echo diagram; "Description" is a heading
pub const ICMP_ECHO_DESCRIBED: &[&str] = &[
    "addresses",
    "type",
    "code",
    "checksum",
    "identifier",
    "sequence number",
];

/// Sentence records produced from ICMP_ECHO_DOCUMENT
pub const ICMP_ECHO_SENTENCE_COUNT: usize = 11;

pub fn ipv4_header_fields() -> Vec<Field> {
    vec![
        Field::fixed("version", 4),
        Field::fixed("ihl", 4),
        Field::fixed("type of service", 8),
        Field::fixed("total length", 16),
        Field::fixed("identification", 16),
        Field::fixed("flags", 3),
        Field::fixed("fragment offset", 13),
        Field::fixed("time to live", 8),
        Field::fixed("protocol", 8),
        Field::fixed("header checksum", 16),
        Field::fixed("source address", 32),
        Field::fixed("destination address", 32),
        Field::fixed("options", 24),
        Field::fixed("padding", 8),
    ]
}

pub fn unreachable_fields() -> Vec<Field> {
    vec![
        Field::fixed("type", 8),
        Field::fixed("code", 8),
        Field::fixed("checksum", 16),
        Field::fixed("unused", 32),
        Field::fixed("internet header + 64 bits of original data datagram", 224),
    ]
}

/// Indented outline with two nesting levels, no boilerplate
pub const OUTLINE_TEXT: &str = "Overview\n\n   First paragraph line\n   second line\n\n\n   after a gap\n\nDetails\n      deeper body\n\nReferences\n   none\n";

pub fn outline_paragraphs() -> Vec<Paragraph> {
    vec![
        Paragraph::new("Overview", "   First paragraph line\n   second line\n\n   after a gap"),
        Paragraph::new("Details", "      deeper body"),
        Paragraph::new("References", "   none"),
    ]
}

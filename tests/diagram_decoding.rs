use rfcsift::diagram::{decode, render_diagram, strip_diagram, DecoderConfig, DiagramDecoder, Field, FieldLayout, WidthOverride};

#[path = "integration/fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

const RULER: &str = "+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+";

#[test]
fn test_ipv4_header() {
    let fields = decode(IPV4_HEADER_DIAGRAM);
    assert_eq!(fields, ipv4_header_fields());

    let layout = FieldLayout::from_fields(&fields);
    assert_eq!(layout.total_bits(), 192);
    assert_eq!(layout.rows(32), 6);
    assert_eq!(layout.byte_len(), 24);

    let offsets: Vec<(&str, u32)> = layout
        .fields()
        .iter()
        .map(|f| (f.name.as_str(), f.offset))
        .take(7)
        .collect();
    assert_eq!(
        offsets,
        [
            ("version", 0),
            ("ihl", 4),
            ("type of service", 8),
            ("total length", 16),
            ("identification", 32),
            ("flags", 48),
            ("fragment offset", 51),
        ]
    );
}

#[test]
fn test_annotated_width_with_internet_header() {
    assert_eq!(decode(UNREACHABLE_DIAGRAM), unreachable_fields());
}

#[test]
fn test_overrides_can_be_replaced() {
    let decoder = DiagramDecoder::new(DecoderConfig { width_overrides: Vec::new() }).unwrap();
    let fields = decoder.decode(UNREACHABLE_DIAGRAM);
    assert_eq!(fields.last().and_then(|f| f.bit_width), Some(64));

    let config = DecoderConfig {
        width_overrides: vec![WidthOverride { phrase: "original data".to_string(), extra_bits: 8 }],
    };
    let fields = DiagramDecoder::new(config).unwrap().decode(UNREACHABLE_DIAGRAM);
    assert_eq!(fields.last().and_then(|f| f.bit_width), Some(72));
}

#[test]
fn test_three_cell_row_fits_ruler() {
    let body = format!("{RULER}\n| Type (8)   | Code (8)    |   Checksum (16)           |\n{RULER}\n");
    let fields = decode(&body);
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["type (8)", "code (8)", "checksum (16)"]);

    let total: u32 = fields.iter().filter_map(|f| f.bit_width).sum();
    assert!(total <= 32, "widths sum to {total}");
}

#[test]
fn test_options_and_padding_tail_is_variable() {
    let body = format!(
        "{RULER}\n|          Source Port          |       Destination Port        |\n{RULER}\n| Options and Padding ...\n{RULER}\n"
    );
    let fields = decode(&body);
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[2], Field::variable("options and padding"));
    assert!(FieldLayout::from_fields(&fields).has_variable_tail());
}

#[test]
fn test_repeated_field_names_survive_in_order() {
    let body = format!("{RULER}\n|   Reserved    |   Reserved    |      Length                   |\n{RULER}\n");
    assert_eq!(
        decode(&body),
        vec![Field::fixed("reserved", 8), Field::fixed("reserved", 8), Field::fixed("length", 16)]
    );
}

#[test]
fn test_multiple_diagrams_keep_the_last() {
    let body = format!("{IPV4_HEADER_DIAGRAM}\n   Some prose between diagrams.\n\n{UNREACHABLE_DIAGRAM}");
    assert_eq!(decode(&body), unreachable_fields());
}

#[test]
fn test_render_round_trip() {
    for fields in [icmp_echo_fields(), ipv4_header_fields(), unreachable_fields()] {
        let rendered = render_diagram(&fields, 32);
        assert_eq!(decode(&rendered), fields, "round trip failed for:\n{rendered}");
    }
}

#[test]
fn test_render_round_trip_narrow_rows() {
    let fields = ipv4_header_fields();
    let rendered = render_diagram(&fields, 16);
    assert_eq!(decode(&rendered), fields);
}

#[test]
fn test_strip_diagram_leaves_descriptions() {
    let body = format!("{UNREACHABLE_DIAGRAM}\n   IP Fields:\n\n   Destination Address\n\n      The source network and address.\n");
    let rest = strip_diagram(&body).expect("body has a ruler");
    assert!(rest.starts_with("\n   IP Fields:\n"));
    assert!(!rest.contains('+'));
}

#[test]
fn test_garbage_is_not_a_diagram() {
    for body in ["", "\n\n", "| a | b |", "+-", "++++", "-+-+-+-+\n| x |"] {
        assert!(decode(body).is_empty(), "decoded fields from {body:?}");
    }
}

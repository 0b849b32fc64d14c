// WHY: decoded schemas are consumed as bit offsets by header emitters, and
// rendering them back to ASCII keeps the decoder honest

use serde::{Deserialize, Serialize};

use super::Field;

/// A fixed-width field with its starting bit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedField {
    pub name: String,
    pub offset: u32,
    pub bit_width: u32,
}

/// Bit offsets for a decoded field sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    fields: Vec<PlacedField>,
    total_bits: u32,
    variable_tail: Option<String>,
}

impl FieldLayout {
    /// Place fields front to back; the first variable field ends the fixed part
    pub fn from_fields(fields: &[Field]) -> Self {
        let mut layout = Self::default();

        for field in fields {
            let Some(bit_width) = field.bit_width else {
                layout.variable_tail = Some(field.name.clone());
                break;
            };
            layout.fields.push(PlacedField {
                name: field.name.clone(),
                offset: layout.total_bits,
                bit_width,
            });
            layout.total_bits = layout.total_bits.saturating_add(bit_width);
        }

        layout
    }

    pub fn fields(&self) -> &[PlacedField] {
        &self.fields
    }

    /// Bits covered by the fixed-width part
    pub fn total_bits(&self) -> u32 {
        self.total_bits
    }

    pub fn has_variable_tail(&self) -> bool {
        self.variable_tail.is_some()
    }

    pub fn variable_tail(&self) -> Option<&str> {
        self.variable_tail.as_deref()
    }

    /// Rows of `bits_per_row` needed for the fixed part
    pub fn rows(&self, bits_per_row: u32) -> u32 {
        if bits_per_row == 0 {
            return 0;
        }
        self.total_bits.div_ceil(bits_per_row)
    }

    /// Fixed-part length in whole bytes
    pub fn byte_len(&self) -> u32 {
        self.total_bits.div_ceil(8)
    }
}

/// Render fields as an RFC-style diagram, two columns per bit
///
/// Fixed fields are packed greedily into rows of `bits_per_row`; a field
/// wider than a row gets a row to itself. Each variable field is written
/// as an unterminated `| name ...` row. Names wider than their cell make
/// the cell wider and no longer decode to the same width.
pub fn render_diagram(fields: &[Field], bits_per_row: u32) -> String {
    let bits_per_row = bits_per_row.max(1);
    let ruler = ruler(bits_per_row);

    let mut out = bit_numbers(bits_per_row);
    out.push_str(&ruler);
    out.push('\n');

    let mut row = String::new();
    let mut row_bits = 0u32;

    for field in fields {
        match field.bit_width {
            Some(width) => {
                if row_bits > 0 && row_bits.saturating_add(width) > bits_per_row {
                    finish_row(&mut out, &mut row, &ruler);
                    row_bits = 0;
                }
                if row.is_empty() {
                    row.push('|');
                }
                push_cell(&mut row, &field.name, width);
                row_bits = row_bits.saturating_add(width);
                if row_bits >= bits_per_row {
                    finish_row(&mut out, &mut row, &ruler);
                    row_bits = 0;
                }
            }
            None => {
                if !row.is_empty() {
                    finish_row(&mut out, &mut row, &ruler);
                    row_bits = 0;
                }
                out.push_str("| ");
                out.push_str(&field.name);
                out.push(' ');
                out.push_str(super::CONTINUATION_MARKER);
                out.push('\n');
                out.push_str(&ruler);
                out.push('\n');
            }
        }
    }

    if !row.is_empty() {
        finish_row(&mut out, &mut row, &ruler);
    }
    out
}

fn ruler(bits_per_row: u32) -> String {
    let mut ruler = "+-".repeat(bits_per_row as usize);
    ruler.push('+');
    ruler
}

/// The two numbering lines printed above RFC diagrams
fn bit_numbers(bits_per_row: u32) -> String {
    let mut tens = String::from(" ");
    let mut ones = String::from(" ");
    for bit in 0..bits_per_row {
        if bit > 0 {
            tens.push(' ');
            ones.push(' ');
        }
        tens.push(if bit % 10 == 0 { digit(bit / 10 % 10) } else { ' ' });
        ones.push(digit(bit % 10));
    }
    format!("{}\n{}\n", tens.trim_end(), ones)
}

fn digit(value: u32) -> char {
    char::from_digit(value, 10).unwrap_or('?')
}

fn push_cell(row: &mut String, name: &str, bit_width: u32) {
    let columns = (bit_width as usize * 2).saturating_sub(1);
    let name_len = name.chars().count();
    let left = columns.saturating_sub(name_len) / 2;
    let right = columns.saturating_sub(name_len + left);

    row.extend(std::iter::repeat(' ').take(left));
    row.push_str(name);
    row.extend(std::iter::repeat(' ').take(right));
    row.push('|');
}

fn finish_row(out: &mut String, row: &mut String, ruler: &str) {
    out.push_str(row);
    out.push('\n');
    out.push_str(ruler);
    out.push('\n');
    row.clear();
}

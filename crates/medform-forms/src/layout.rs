//! Row packing.
//!
//! Arranges an ordered field list into display rows of bounded width. Packing
//! is greedy, stateless, and order-preserving: concatenating the rows yields
//! the input order exactly.

use crate::fields::FieldDescriptor;

/// Default number of width units per row.
pub const DEFAULT_ROW_CAPACITY: u8 = 3;

/// One display row.
pub type Row<'a> = Vec<&'a FieldDescriptor>;

/// Returns the width a field occupies, clamped to `1..=capacity`.
pub fn effective_width(field: &FieldDescriptor, capacity: u8) -> u8 {
    let capacity = capacity.max(1);
    field.width.clamp(1, capacity)
}

/// Packs fields into rows whose summed effective width is at most `capacity`.
///
/// A field that does not fit closes the current row and starts the next one.
/// A field wider than the capacity is clamped and therefore fills a row of its
/// own. An empty input yields no rows.
pub fn pack_rows<'a, I>(fields: I, capacity: u8) -> Vec<Row<'a>>
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    let capacity = capacity.max(1);
    let mut rows = Vec::new();
    let mut current: Row<'a> = Vec::new();
    let mut used: u16 = 0;

    for field in fields {
        let width = effective_width(field, capacity);
        if !current.is_empty() && used + u16::from(width) > u16::from(capacity) {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(field);
        used += u16::from(width);
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

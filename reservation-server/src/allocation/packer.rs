//! Greedy Table Packer
//!
//! Walks free tables in ascending seat order and accumulates until the party
//! is covered. Not a global minimum-waste search: for tables `[2, 4, 6]` and
//! a party of 3 the result is `[2, 4]`, never `[6]`. The output is always a
//! prefix of the input order.

use serde::{Deserialize, Serialize};
use shared::models::DiningTable;

/// Table as it appears in an allocation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub id: i64,
    pub name: String,
    pub seats: i32,
}

impl From<&DiningTable> for TableRef {
    fn from(table: &DiningTable) -> Self {
        Self {
            id: table.id,
            name: table.name.clone(),
            seats: table.seats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Packing {
    pub tables: Vec<TableRef>,
    pub total_seats: i32,
}

impl Packing {
    /// Ids in allocation order; the first is the primary table
    pub fn table_ids(&self) -> Vec<i64> {
        self.tables.iter().map(|t| t.id).collect()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }
}

/// No combination of the offered tables covers the party
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infeasible {
    pub party_size: i32,
    /// Sum of seats over every table that was offered
    pub available_seats: i32,
}

/// Accumulate `free` (already sorted ascending) until `party_size` is reached
pub fn pack(party_size: i32, free: &[&DiningTable]) -> Result<Packing, Infeasible> {
    accumulate(party_size, free.iter().copied())
}

/// Keep `anchor` as the primary table and top it up from `free`
///
/// Used when a specific destination table was requested but cannot seat the
/// party alone. `free` is expected in ascending order; the anchor is skipped
/// if it also appears there.
pub fn pack_anchored(
    party_size: i32,
    anchor: &DiningTable,
    free: &[&DiningTable],
) -> Result<Packing, Infeasible> {
    let rest = free.iter().copied().filter(|t| t.id != anchor.id);
    accumulate(party_size, std::iter::once(anchor).chain(rest))
}

fn accumulate<'a>(
    party_size: i32,
    tables: impl Iterator<Item = &'a DiningTable>,
) -> Result<Packing, Infeasible> {
    let mut picked = Vec::new();
    let mut total = 0;

    for table in tables {
        picked.push(TableRef::from(table));
        total += table.seats;
        if total >= party_size {
            return Ok(Packing {
                tables: picked,
                total_seats: total,
            });
        }
    }

    Err(Infeasible {
        party_size,
        available_seats: total,
    })
}

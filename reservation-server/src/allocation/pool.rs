//! Table Pool Resolver

use shared::models::DiningTable;

/// Tables that may be allocated for a restaurant, smallest first
///
/// Keeps active tables with `Available` status, optionally restricted to one
/// zone. Sorting ascending by seats steers the packer towards many small
/// tables; equal seat counts keep floor-plan order (`display_order`, then
/// input order).
pub fn eligible_tables(
    restaurant_id: i64,
    tables: &[DiningTable],
    zone_filter: Option<i64>,
) -> Vec<&DiningTable> {
    let mut pool: Vec<&DiningTable> = tables
        .iter()
        .filter(|t| t.restaurant_id == restaurant_id && t.is_eligible())
        .filter(|t| zone_filter.is_none_or(|zone| t.zone_id == Some(zone)))
        .collect();
    pool.sort_by_key(|t| (t.seats, t.display_order));
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableStatus;

    fn table(id: i64, seats: i32, zone: Option<i64>, status: TableStatus) -> DiningTable {
        DiningTable {
            id,
            restaurant_id: 1,
            name: format!("T{}", id),
            seats,
            zone_id: zone,
            status,
            is_active: true,
            display_order: id as i32,
        }
    }

    #[test]
    fn test_excludes_blocked_unavailable_and_inactive() {
        let mut inactive = table(4, 2, None, TableStatus::Available);
        inactive.is_active = false;
        let tables = vec![
            table(1, 4, None, TableStatus::Available),
            table(2, 2, None, TableStatus::Blocked),
            table(3, 6, None, TableStatus::Unavailable),
            inactive,
        ];
        let ids: Vec<i64> = eligible_tables(1, &tables, None).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_sorted_by_seats_with_stable_ties() {
        let tables = vec![
            table(1, 6, None, TableStatus::Available),
            table(2, 2, None, TableStatus::Available),
            table(3, 4, None, TableStatus::Available),
            table(4, 2, None, TableStatus::Available),
        ];
        let ids: Vec<i64> = eligible_tables(1, &tables, None).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_zone_filter_and_restaurant_scope() {
        let mut other = table(9, 2, Some(10), TableStatus::Available);
        other.restaurant_id = 2;
        let tables = vec![
            table(1, 4, Some(10), TableStatus::Available),
            table(2, 2, Some(20), TableStatus::Available),
            table(3, 2, None, TableStatus::Available),
            other,
        ];
        let ids: Vec<i64> = eligible_tables(1, &tables, Some(10))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }
}

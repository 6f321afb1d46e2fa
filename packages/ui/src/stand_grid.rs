//! Four-column layout of the market map.
//!
//! Blocks are ordered naturally (`A`, `B`, ..., `B2`, `B10`) and dealt to the
//! columns round-robin. Inside a block the stands follow their natural
//! number, so `A-2` comes before `A-10`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use api::models::StandMapItem;

pub const GRID_COLUMNS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct BlockGroup {
    pub block: String,
    pub stands: Vec<StandMapItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StandGrid {
    pub columns: [Vec<BlockGroup>; GRID_COLUMNS],
}

impl StandGrid {
    pub fn layout(stands: &[StandMapItem]) -> Self {
        let mut columns: [Vec<BlockGroup>; GRID_COLUMNS] = Default::default();
        for (i, group) in group_by_block(stands).into_iter().enumerate() {
            columns[i % GRID_COLUMNS].push(group);
        }
        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    pub fn stand_count(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .map(|group| group.stands.len())
            .sum()
    }
}

/// Shorthand for `StandGrid::layout(stands).columns`.
pub fn layout_columns(stands: &[StandMapItem]) -> [Vec<BlockGroup>; GRID_COLUMNS] {
    StandGrid::layout(stands).columns
}

fn group_by_block(stands: &[StandMapItem]) -> Vec<BlockGroup> {
    let mut by_block: BTreeMap<String, Vec<StandMapItem>> = BTreeMap::new();
    for stand in stands {
        let block = stand.block.trim().to_uppercase();
        by_block.entry(block).or_default().push(stand.clone());
    }

    let mut groups: Vec<BlockGroup> = by_block
        .into_iter()
        .map(|(block, mut stands)| {
            stands.sort_by(|a, b| natural_cmp(&a.number, &b.number).then(a.id.cmp(&b.id)));
            BlockGroup { block, stands }
        })
        .collect();
    groups.sort_by(|a, b| natural_cmp(&a.block, &b.block));
    groups
}

/// Compare strings treating runs of ASCII digits as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.trim().chars().peekable();
    let mut b = b.trim().chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left = take_number(&mut a);
                let right = take_number(&mut b);
                let ord = compare_digits(&left, &right);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits
}

// Digit strings of any length, without overflowing an integer type.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::StandStatus;
    use rstest::rstest;

    fn stand(id: i64, block: &str, number: &str) -> StandMapItem {
        StandMapItem {
            id,
            block: block.into(),
            number: number.into(),
            business_name: None,
            category: None,
            status: StandStatus::Activo,
        }
    }

    fn codes(group: &BlockGroup) -> Vec<String> {
        group.stands.iter().map(StandMapItem::code).collect()
    }

    #[rstest]
    #[case("2", "10", Ordering::Less)]
    #[case("10", "2", Ordering::Greater)]
    #[case("B2", "B10", Ordering::Less)]
    #[case("a", "B", Ordering::Less)]
    #[case("007", "7", Ordering::Equal)]
    #[case("7", "7A", Ordering::Less)]
    #[case("", "1", Ordering::Less)]
    fn test_natural_cmp(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(natural_cmp(a, b), expected);
    }

    #[test]
    fn test_empty_input_gives_four_empty_columns() {
        let grid = StandGrid::layout(&[]);
        assert_eq!(grid.columns.len(), GRID_COLUMNS);
        assert!(grid.is_empty());
        assert_eq!(grid.stand_count(), 0);
    }

    #[test]
    fn test_blocks_dealt_round_robin() {
        let stands = vec![
            stand(1, "E", "1"),
            stand(2, "A", "1"),
            stand(3, "C", "1"),
            stand(4, "B", "1"),
            stand(5, "D", "1"),
        ];
        let columns = layout_columns(&stands);
        let blocks: Vec<Vec<&str>> = columns
            .iter()
            .map(|col| col.iter().map(|g| g.block.as_str()).collect())
            .collect();
        assert_eq!(blocks, vec![vec!["A", "E"], vec!["B"], vec!["C"], vec!["D"]]);
    }

    #[test]
    fn test_stands_in_natural_order_within_block() {
        let stands = vec![
            stand(1, "A", "10"),
            stand(2, "a", "2"),
            stand(3, "A", "1"),
        ];
        let grid = StandGrid::layout(&stands);
        assert_eq!(grid.columns[0].len(), 1);
        assert_eq!(codes(&grid.columns[0][0]), vec!["A-1", "a-2", "A-10"]);
        assert_eq!(grid.stand_count(), 3);
        assert!(grid.columns[1].is_empty());
    }

    #[test]
    fn test_numeric_blocks_sorted_naturally() {
        let stands = vec![stand(1, "10", "1"), stand(2, "2", "1"), stand(3, "1", "1")];
        let grid = StandGrid::layout(&stands);
        assert_eq!(grid.columns[0][0].block, "1");
        assert_eq!(grid.columns[1][0].block, "2");
        assert_eq!(grid.columns[2][0].block, "10");
    }
}

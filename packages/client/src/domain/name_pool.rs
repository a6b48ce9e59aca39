//! Pool of whimsical display names offered on first run.

use rand::{Rng, seq::SliceRandom};

/// Names suggested to users who have not picked one yet
pub const NAME_POOL: &[&str] = &[
    "Wacky Walrus",
    "Silly Salamander",
    "Bumbling Bee",
    "Giggling Goblin",
    "Mystic Marshmallow",
    "Nifty Narwhal",
    "Quirky Quokka",
    "Jolly Jellyfish",
    "Fuzzy Fandango",
    "Zany Zebra",
    "Prancing Pegasus",
    "Loony Llama",
    "Snazzy Sasquatch",
    "Dapper Dragon",
    "Merry Mermaid",
    "Bizarre Banshee",
    "Whimsical Wizard",
    "Perky Penguin",
    "Kooky Kangaroo",
    "Vexing Vortex",
];

/// Pick a name uniformly at random. `None` only for an empty pool.
pub fn pick_name<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> Option<&'a str> {
    pool.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_pick_name_from_pool() {
        // テスト項目: 選ばれる名前は常にプールの中の名前
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            // when (操作):
            let name = pick_name(NAME_POOL, &mut rng);

            // then (期待する結果):
            assert!(name.is_some_and(|name| NAME_POOL.contains(&name)));
        }
    }

    #[test]
    fn test_pick_name_is_deterministic_for_seed() {
        // テスト項目: 同じシードの乱数源からは同じ名前が選ばれる
        // given (前提条件):
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        // then (期待する結果):
        assert_eq!(pick_name(NAME_POOL, &mut rng1), pick_name(NAME_POOL, &mut rng2));
    }

    #[test]
    fn test_pick_name_covers_pool() {
        // テスト項目: 十分な回数選べばプール全体が選ばれうる（一様選択）
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(1);

        // when (操作):
        let picked: HashSet<&str> = (0..2_000)
            .filter_map(|_| pick_name(NAME_POOL, &mut rng))
            .collect();

        // then (期待する結果):
        assert_eq!(picked.len(), NAME_POOL.len());
    }

    #[test]
    fn test_pick_name_empty_pool() {
        // テスト項目: 空のプールからは何も選ばれない
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(0);

        // when (操作):
        let name = pick_name(&[], &mut rng);

        // then (期待する結果):
        assert!(name.is_none());
    }

    #[test]
    fn test_pool_names_are_unique() {
        // テスト項目: プールに重複した名前はない
        // when (操作):
        let unique: HashSet<&&str> = NAME_POOL.iter().collect();

        // then (期待する結果):
        assert_eq!(unique.len(), 20);
    }
}

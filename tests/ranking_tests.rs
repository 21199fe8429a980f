//! Ranking tests - file-backed persistence through the facade crate

use std::fs;
use std::path::PathBuf;

use puzzle15::core::Game;
use puzzle15::ranking::{JsonFileStore, Ranking, RankingEntry, RankingStore};
use puzzle15::types::{RANKING_KEY, RANKING_LIMIT};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("puzzle15-ranking-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_ranking_persists_across_instances() {
    let dir = scratch_dir("persist");

    let mut ranking = Ranking::new(JsonFileStore::new(&dir));
    ranking.record("00:40", 80);
    ranking.record("00:20", 35);

    let reopened = Ranking::new(JsonFileStore::new(&dir));
    assert_eq!(
        reopened.top(RANKING_LIMIT),
        vec![RankingEntry::new("00:20", 35), RankingEntry::new("00:40", 80)]
    );

    let raw = fs::read_to_string(dir.join(format!("{}.json", RANKING_KEY))).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed[0]["moves"], 35);
    assert_eq!(parsed[0]["time"], "00:20");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_file_reads_as_empty() {
    let dir = scratch_dir("corrupt");
    let mut store = JsonFileStore::new(&dir);
    store.set_raw(RANKING_KEY, "[{\"time\":").unwrap();

    let mut ranking = Ranking::new(store);
    assert!(ranking.load().is_empty());

    // The next record replaces the corrupt value.
    ranking.record("00:09", 14);
    assert_eq!(ranking.load().len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_only_best_five_are_kept() {
    let dir = scratch_dir("limit");
    let mut ranking = Ranking::new(JsonFileStore::new(&dir));
    for moves in [60, 50, 40, 30, 20, 10, 70] {
        ranking.record("00:30", moves);
    }

    let moves: Vec<u32> = ranking.load().iter().map(|e| e.moves).collect();
    assert_eq!(moves, vec![10, 20, 30, 40, 50]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_completion_stats_format_entry() {
    let game = Game::new(1);
    let entry = RankingEntry::new(game.stats().time(), game.stats().moves());
    assert_eq!(entry, RankingEntry::new("00:00", 0));
}

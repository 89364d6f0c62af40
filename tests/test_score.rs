use void_raiders::score::{insert_high_score, load_high_scores, ScoreManager};

#[test]
fn missing_file_is_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let scores = ScoreManager::open(dir.path().join("nope.json"));
    assert_eq!(scores.score, 0);
    assert!(scores.high_scores.is_empty());
}

#[test]
fn corrupt_file_is_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("high_scores.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_high_scores(&path).is_empty());

    std::fs::write(&path, r#"{"scores": [1, 2]}"#).unwrap();
    assert!(load_high_scores(&path).is_empty());
}

#[test]
fn loaded_table_is_sorted_and_capped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("high_scores.json");
    std::fs::write(&path, "[3, 90, 7, 45, 12, 60, 1]").unwrap();
    assert_eq!(load_high_scores(&path), vec![90, 60, 45, 12, 7]);
}

#[test]
fn add_score_accumulates_and_can_go_negative() {
    let dir = tempfile::tempdir().unwrap();
    let mut scores = ScoreManager::open(dir.path().join("high_scores.json"));
    scores.add_score(10);
    scores.add_score(10);
    assert_eq!(scores.score, 20);
    scores.add_score(-35);
    assert_eq!(scores.score, -15);
    scores.reset();
    assert_eq!(scores.score, 0);
}

#[test]
fn insert_keeps_highest_first() {
    let mut table = vec![50, 200, 75];
    insert_high_score(&mut table, 300);
    assert_eq!(table, vec![300, 200, 75, 50]);
}

#[test]
fn insert_drops_the_lowest_past_five() {
    let mut table = vec![500, 400, 300, 200, 100];
    insert_high_score(&mut table, 250);
    assert_eq!(table, vec![500, 400, 300, 250, 200]);

    // A score below the whole table doesn't make the cut.
    insert_high_score(&mut table, 5);
    assert_eq!(table, vec![500, 400, 300, 250, 200]);
}

#[test]
fn save_writes_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("high_scores.json");
    std::fs::write(&path, "[50, 200, 75]").unwrap();

    let mut scores = ScoreManager::open(&path);
    assert_eq!(scores.high_scores, vec![200, 75, 50]);
    scores.score = 300;
    scores.save_high_score().unwrap();

    let on_disk: Vec<i64> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, vec![300, 200, 75, 50]);
    assert_eq!(scores.high_scores, on_disk);
}

#[test]
fn save_into_missing_directory_fails_but_keeps_memory_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut scores = ScoreManager::open(dir.path().join("no_such_dir").join("scores.json"));
    scores.score = 42;
    assert!(scores.save_high_score().is_err());
    assert_eq!(scores.high_scores, vec![42]);
}

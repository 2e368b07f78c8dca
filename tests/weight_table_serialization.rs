//! Persistence of weight tables and saved bots

use std::path::PathBuf;

use dropfour::{
    adapters::{InMemoryRepository, MsgPackRepository},
    app::BotConfig,
    bot::{LearningBot, LearningRule, SavedBot, TrainingMetadata, WeightStore, WeightTable},
    connect4::{Board, Outcome, PlayedMove},
    ports::WeightTableRepository,
};
use tempfile::TempDir;

fn trained_table() -> WeightTable {
    let mut table = WeightTable::new();
    let boards = [
        Board::new(),
        Board::from_moves(&[3]).unwrap(),
        Board::from_moves(&[3, 3, 4]).unwrap(),
    ];
    for (i, board) in boards.iter().enumerate() {
        for column in 0..7 {
            table
                .adjust(board, column, 0.1 * (i * 7 + column) as f64 - 1.0 / 3.0)
                .unwrap();
        }
    }
    table
}

#[test]
fn test_msgpack_roundtrip_is_bit_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("weights.msgpack");
    let table = trained_table();

    let repo = MsgPackRepository::new();
    repo.save(&table, &path).unwrap();
    assert!(path.exists());
    let loaded = repo.load(&path).unwrap();

    assert_eq!(loaded.len(), table.len());
    for (key, weights) in table.iter() {
        let restored = loaded.weights_by_key(key).expect("key survives");
        for (a, b) in weights.iter().zip(restored) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let repo = MsgPackRepository::new();
    assert!(repo.load(&temp_dir.path().join("absent.msgpack")).is_err());
}

#[test]
fn test_in_memory_repository_shares_storage() {
    let repo = InMemoryRepository::new();
    let clone = repo.clone();
    let path = PathBuf::from("tables/a");
    repo.save(&trained_table(), &path).unwrap();

    assert_eq!(clone.count().unwrap(), 1);
    assert_eq!(clone.load(&path).unwrap(), trained_table());
    clone.clear().unwrap();
    assert!(!repo.contains(&path).unwrap());
}

#[test]
fn test_saved_bot_keeps_weights_and_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bot.msgpack");

    let config = BotConfig::new()
        .with_exploration(12.5)
        .with_seed(8)
        .with_rule(LearningRule::GameResult);
    let mut bot = LearningBot::new(&config).unwrap();
    bot.learn(&[PlayedMove::new(Board::new(), 2)], Outcome::Win, true)
        .unwrap();

    let metadata = TrainingMetadata {
        games_trained: Some(1),
        opponents: vec!["minimax-5".to_string()],
        seed: Some(8),
        rows: Some(6),
    };
    SavedBot::from_bot(&bot, metadata.clone())
        .save_to_file(&path)
        .unwrap();

    let saved = SavedBot::load_from_file(&path).unwrap();
    assert_eq!(saved.metadata, metadata);
    assert_eq!(saved.config, config);

    let restored = saved.to_bot().unwrap();
    assert_eq!(restored.exploration(), 12.5);
    assert_eq!(restored.table(), bot.table());
    assert_eq!(
        restored.weights_for(&Board::new()).unwrap()[2],
        10.0
    );
}

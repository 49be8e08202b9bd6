use arcana_core::{
  catalog::{Style, Tradition},
  deck::Deck,
  snapshot::{RESTORE_WINDOW_MS, Snapshot},
};
use serde::{Deserialize, Serialize};

use crate::{Error, Medium, MemoryMedium, Preferences, Result, SqliteMedium, Storage, keys};

fn memory() -> Storage<MemoryMedium> { Storage::new(MemoryMedium::new()) }

fn sqlite() -> Storage<SqliteMedium> { Storage::new(SqliteMedium::open_in_memory().unwrap()) }

fn snapshot(timestamp: i64) -> Snapshot {
  let deck = Deck::from_names((0..78).map(|i| format!("Card {i}"))).unwrap();
  Snapshot {
    author: "Soror N.".into(),
    deck,
    dossier: "A seeker of quiet thresholds.".into(),
    portrait: Some("data:image/png;base64,AA==".into()),
    tradition: Tradition::Hermetic,
    style: Style::Crowley,
    eros: false,
    timestamp,
  }
}

/// A medium whose every operation fails.
struct FailingMedium;

impl Medium for FailingMedium {
  fn read(&self, _: &str) -> Result<Option<String>> { Err(Error::Unavailable("disk gone".into())) }
  fn write(&self, _: &str, _: &str) -> Result<()> { Err(Error::Unavailable("quota exceeded".into())) }
  fn delete(&self, _: &str) -> Result<()> { Err(Error::Unavailable("disk gone".into())) }
  fn clear(&self) -> Result<()> { Err(Error::Unavailable("disk gone".into())) }
}

/// A medium that reads and deletes normally but rejects every write.
struct ReadOnlyMedium(MemoryMedium);

impl Medium for ReadOnlyMedium {
  fn read(&self, key: &str) -> Result<Option<String>> { self.0.read(key) }
  fn write(&self, _: &str, _: &str) -> Result<()> { Err(Error::Unavailable("quota exceeded".into())) }
  fn delete(&self, key: &str) -> Result<()> { self.0.delete(key) }
  fn clear(&self) -> Result<()> { self.0.clear() }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
  name:  String,
  count: u32,
}

// ─── Storage ─────────────────────────────────────────────────────────────────

#[test]
fn set_then_get_returns_equal_value() {
  let store = memory();
  let value = Sample { name: "tower".into(), count: 16 };
  assert!(store.set("sample", &value));
  assert_eq!(store.get("sample", Sample { name: String::new(), count: 0 }), value);
}

#[test]
fn unset_key_yields_default() {
  let store = memory();
  assert_eq!(store.get("missing", 42u32), 42);
  assert!(!store.contains("missing"));
}

#[test]
fn unparseable_value_yields_default() {
  let medium = MemoryMedium::new();
  medium.write("sample", "{ not json").unwrap();
  let store = Storage::new(medium);
  assert_eq!(store.get("sample", 7u32), 7);
  assert!(store.contains("sample"));
}

#[test]
fn failing_medium_degrades_without_raising() {
  let store = Storage::new(FailingMedium);
  assert!(!store.set("k", &1u32));
  assert_eq!(store.get("k", 5u32), 5);
  assert!(!store.remove("k"));
  assert!(!store.clear());
  assert!(store.load_snapshot().is_none());
  assert_eq!(store.preferences(), Preferences::default());
}

#[test]
fn rejected_write_is_not_readable() {
  let store = Storage::new(ReadOnlyMedium(MemoryMedium::new()));
  assert!(!store.set("k", &1u32));
  assert!(!store.contains("k"));
  assert_eq!(store.get("k", 5u32), 5);
  assert!(!store.save_snapshot(&snapshot(1_000)));
  assert!(store.load_snapshot().is_none());
}

#[test]
fn rejected_overwrite_keeps_the_previous_value() {
  let medium = MemoryMedium::new();
  medium.write("k", "3").unwrap();
  let store = Storage::new(ReadOnlyMedium(medium));
  assert!(!store.set("k", &9u32));
  assert_eq!(store.get("k", 0u32), 3);
}

#[test]
fn remove_and_clear() {
  let store = memory();
  store.set("a", &1u8);
  store.set("b", &2u8);
  assert!(store.remove("a"));
  assert_eq!(store.get("a", 0u8), 0);
  assert_eq!(store.get("b", 0u8), 2);
  assert!(store.clear());
  assert!(!store.contains("b"));
}

// ─── SQLite medium ───────────────────────────────────────────────────────────

#[test]
fn sqlite_round_trip_and_overwrite() {
  let store = sqlite();
  assert!(store.set("k", "first"));
  assert!(store.set("k", "second"));
  assert_eq!(store.get("k", String::new()), "second");
  assert!(store.remove("k"));
  assert_eq!(store.get("k", String::from("gone")), "gone");
}

#[test]
fn sqlite_persists_across_reopen() {
  let dir = std::env::temp_dir().join(format!("arcana-store-{}", std::process::id()));
  let path = dir.join("nested").join("arcana.db");
  {
    let store = Storage::new(SqliteMedium::open(&path).unwrap());
    assert!(store.mark_tutorial_seen());
  }
  let store = Storage::new(SqliteMedium::open(&path).unwrap());
  assert!(store.tutorial_seen());
  let _ = std::fs::remove_dir_all(dir);
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[test]
fn snapshot_save_load_clear() {
  let store = sqlite();
  assert!(store.load_snapshot().is_none());

  let snap = snapshot(1_760_000_000_000);
  assert!(store.save_snapshot(&snap));
  assert_eq!(store.load_snapshot(), Some(snap));
  assert!(store.contains(keys::SAVED_DECK));

  assert!(store.clear_snapshot());
  assert!(store.load_snapshot().is_none());
}

#[test]
fn stale_snapshot_is_kept_but_not_restorable() {
  let store = memory();
  let now = 1_760_000_000_000;
  store.save_snapshot(&snapshot(now - RESTORE_WINDOW_MS));
  assert!(store.load_snapshot().is_some());
  assert!(store.restorable_snapshot(now).is_none());

  store.save_snapshot(&snapshot(now - 1_000));
  assert!(store.restorable_snapshot(now).is_some());
}

#[test]
fn preferences_and_tutorial_flag() {
  let store = memory();
  assert_eq!(store.preferences(), Preferences::default());
  assert!(!store.tutorial_seen());

  let prefs = Preferences { tradition: Tradition::Marseille, style: Style::Glitch, eros: true };
  assert!(store.save_preferences(&prefs));
  assert_eq!(store.preferences(), prefs);

  store.mark_tutorial_seen();
  assert!(store.tutorial_seen());
}

#[test]
fn snapshot_json_uses_camel_case_cards() {
  let store = memory();
  store.save_snapshot(&snapshot(0));
  let raw: serde_json::Value = store.get(keys::SAVED_DECK, serde_json::Value::Null);
  assert_eq!(raw["deck"].as_array().map(Vec::len), Some(78));
  assert!(raw["deck"][0].get("imageUrl").is_some());
  assert_eq!(raw["style"], "crowley");
}

#[test]
fn keys_are_independent() {
  let store = memory();
  for (i, key) in keys::ALL.iter().enumerate() {
    assert!(key.starts_with("arcana_"));
    store.set(key, &i);
  }
  assert!(store.remove(keys::AUDIO_ENABLED));
  assert_eq!(store.get(keys::PREFERENCES, 99usize), 2);
  assert!(!store.contains(keys::AUDIO_ENABLED));
}

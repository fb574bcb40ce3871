use chrono::{Duration, TimeZone, Utc};
use ideabox_core::{
    IdeaFilter, IdeaId, IdeaInput, IdeaPatch, IdeaRepository, IdeaStatus, KeyValueStore,
    KvIdeaRepository, ManualClock, MemoryStore, RepoError, SqliteStore, StorageError,
    ValidationError, IDEAS_KEY,
};
use std::collections::HashSet;
use std::rc::Rc;

fn input(title: &str, tags: &[&str]) -> IdeaInput {
    IdeaInput {
        category: "Tools".to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        ..IdeaInput::new(title, format!("{title} description"))
    }
}

#[test]
fn fresh_storage_seeds_five_samples_exactly_once() {
    let mut store = MemoryStore::new();

    let first = KvIdeaRepository::new(&mut store).list().unwrap();
    assert_eq!(first.len(), 5);
    let ids: Vec<_> = first.iter().map(|idea| idea.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

    let mut repo = KvIdeaRepository::new(&mut store);
    let second = repo.list().unwrap();
    assert_eq!(first, second);

    for idea in &first {
        repo.delete(&idea.id).unwrap();
    }
    assert!(repo.list().unwrap().is_empty());
    drop(repo);
    assert!(KvIdeaRepository::new(&mut store).list().unwrap().is_empty());
}

#[test]
fn create_assigns_unique_ids_and_equal_timestamps() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());

    let mut ids = HashSet::new();
    for idx in 0..50 {
        let idea = repo.create(&input(&format!("idea {idx}"), &[])).unwrap();
        assert_eq!(idea.created_at, idea.updated_at);
        assert!(ids.insert(idea.id));
    }

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 55);
    let unique: HashSet<_> = listed.iter().map(|idea| idea.id.clone()).collect();
    assert_eq!(unique.len(), listed.len());
}

#[test]
fn list_after_create_contains_record_in_insertion_order() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());
    let created = repo
        .create(&IdeaInput {
            priority: "high".to_string(),
            notes: Some("call the supplier".to_string()),
            ..input("Solar kiosk", &["energy", "retail"])
        })
        .unwrap();

    let listed = repo.list().unwrap();
    let last = listed.last().unwrap();
    assert_eq!(last, &created);
    assert_eq!(last.title, "Solar kiosk");
    assert_eq!(last.tags, vec!["energy".to_string(), "retail".to_string()]);
    assert_eq!(last.notes.as_deref(), Some("call the supplier"));
    assert_eq!(repo.list().unwrap(), listed);
}

#[test]
fn duplicate_tags_are_deduplicated_on_create() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());
    let created = repo
        .create(&IdeaInput {
            title: "A".to_string(),
            description: "B".to_string(),
            category: "C".to_string(),
            status: "draft".to_string(),
            priority: "low".to_string(),
            tags: vec!["x".to_string(), "x".to_string()],
            ..IdeaInput::default()
        })
        .unwrap();
    assert_eq!(created.tags, vec!["x".to_string()]);
}

#[test]
fn create_rejects_invalid_input_without_writing() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());
    let before = repo.list().unwrap();

    let err = repo.create(&IdeaInput::new("", "B")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("title"))
    ));

    let err = repo
        .create(&IdeaInput {
            status: "blocked".to_string(),
            ..input("t", &[])
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidStatus(_))
    ));

    assert_eq!(repo.list().unwrap(), before);
}

#[test]
fn update_merges_fields_and_refreshes_updated_at() {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let clock = Rc::new(ManualClock::new(start));
    let mut repo = KvIdeaRepository::new(MemoryStore::new()).with_clock(Rc::clone(&clock));

    let created = repo.create(&input("Bike share", &["mobility"])).unwrap();
    clock.advance(Duration::minutes(10));

    let updated = repo
        .update(
            &created.id,
            IdeaPatch {
                title: Some("Cargo bike share".to_string()),
                tags: Some(vec!["mobility".to_string(), "logistics".to_string()]),
                ..IdeaPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, start);
    assert_eq!(updated.updated_at, start + Duration::minutes(10));
    assert_eq!(updated.title, "Cargo bike share");
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.category, created.category);
    assert_eq!(updated.status, created.status);
    assert_eq!(repo.get(&created.id).unwrap().unwrap(), updated);
}

#[test]
fn update_never_moves_updated_at_backwards() {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let clock = Rc::new(ManualClock::new(start));
    let mut repo = KvIdeaRepository::new(MemoryStore::new()).with_clock(Rc::clone(&clock));
    let created = repo.create(&input("t", &[])).unwrap();

    clock.set(start - Duration::days(1));
    let updated = repo
        .update(&created.id, IdeaPatch::status(IdeaStatus::Archived))
        .unwrap();
    assert!(updated.created_at <= updated.updated_at);
    assert_eq!(updated.updated_at, start);
}

#[test]
fn update_missing_id_returns_not_found() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());
    let missing = IdeaId::from("nonexistent-id");
    let err = repo
        .update(
            &missing,
            IdeaPatch {
                title: Some("Z".to_string()),
                ..IdeaPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn update_rejects_blanking_required_fields() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());
    let err = repo
        .update(
            &IdeaId::from("1"),
            IdeaPatch {
                description: Some("  ".to_string()),
                ..IdeaPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(!repo.get(&IdeaId::from("1")).unwrap().unwrap().description.is_empty());
}

#[test]
fn delete_is_idempotent() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());
    let id = IdeaId::from("2");

    repo.delete(&id).unwrap();
    assert!(repo.get(&id).unwrap().is_none());
    repo.delete(&id).unwrap();
    assert!(repo.get(&id).unwrap().is_none());
    repo.delete(&IdeaId::from("nonexistent-id")).unwrap();
    assert_eq!(repo.list().unwrap().len(), 4);
}

#[test]
fn search_matches_title_description_and_tags_case_insensitively() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new()).with_seed_samples(false);
    repo.create(&input("Rooftop Garden", &[])).unwrap();
    repo.create(&input("Tool library", &["GARDEN tools"])).unwrap();
    repo.create(&IdeaInput::new("Seed swap", "community garden exchange"))
        .unwrap();
    repo.create(&input("Chess club", &[])).unwrap();

    let titles: Vec<_> = repo
        .search("GaRdEn")
        .unwrap()
        .into_iter()
        .map(|idea| idea.title)
        .collect();
    assert_eq!(titles, vec!["Rooftop Garden", "Tool library", "Seed swap"]);

    assert_eq!(repo.search("").unwrap(), repo.list().unwrap());
    assert!(repo.search("zzz").unwrap().is_empty());
}

#[test]
fn filter_by_status_uses_seeded_labels() {
    let mut repo = KvIdeaRepository::new(MemoryStore::new());
    let drafts = repo
        .filter(&IdeaFilter::by_status(IdeaStatus::Draft))
        .unwrap();
    let ids: Vec<_> = drafts.iter().map(|idea| idea.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4"]);

    let tagged = repo.filter(&IdeaFilter::by_tag("AI")).unwrap();
    assert_eq!(tagged.len(), 3);
}

#[test]
fn persisted_collection_uses_camel_case_field_names() {
    let mut store = MemoryStore::new();
    KvIdeaRepository::new(&mut store)
        .create(&IdeaInput {
            target_market: Some("students".to_string()),
            status: "in-progress".to_string(),
            ..input("Flashcards", &[])
        })
        .unwrap();

    let raw = store.get(IDEAS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let last = value.as_array().unwrap().last().unwrap();
    assert!(last.get("createdAt").is_some());
    assert!(last.get("updatedAt").is_some());
    assert_eq!(last["targetMarket"], "students");
    assert_eq!(last["status"], "in-progress");
    assert_eq!(last["priority"], "medium");
}

#[test]
fn corrupt_collection_surfaces_as_io_error() {
    let mut store = MemoryStore::new();
    store.set(IDEAS_KEY, "{not json").unwrap();

    let err = KvIdeaRepository::new(&mut store).list().unwrap_err();
    assert!(matches!(err, RepoError::Io(StorageError::Corrupt { .. })));
}

#[test]
fn quota_exceeded_write_surfaces_as_io_error_and_keeps_old_data() {
    let mut seeded = MemoryStore::new();
    KvIdeaRepository::new(&mut seeded).list().unwrap();
    let quota = seeded.used_bytes() + 16;

    let mut store = MemoryStore::with_quota(quota);
    let mut repo = KvIdeaRepository::new(&mut store);
    assert_eq!(repo.list().unwrap().len(), 5);

    let err = repo
        .create(&input("An idea too large for the remaining quota", &[]))
        .unwrap_err();
    assert!(matches!(err, RepoError::Io(StorageError::QuotaExceeded { .. })));
    assert_eq!(repo.list().unwrap().len(), 5);
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ideabox.db");

    let created = {
        let mut repo = KvIdeaRepository::new(SqliteStore::open(&path).unwrap());
        repo.create(&input("Persisted", &["disk"])).unwrap()
    };

    let mut repo = KvIdeaRepository::new(SqliteStore::open(&path).unwrap());
    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 6);
    assert_eq!(repo.get(&created.id).unwrap().unwrap(), created);
}

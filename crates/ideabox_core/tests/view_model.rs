use ideabox_core::{
    IdeaFilter, IdeaId, IdeaInput, IdeaPatch, IdeaRepository, IdeaStatus, IdeaStore,
    IdeasSnapshot, KvIdeaRepository, MemoryStore,
};
use std::cell::RefCell;
use std::rc::Rc;

fn mounted() -> IdeaStore<KvIdeaRepository<MemoryStore>> {
    IdeaStore::mounted(KvIdeaRepository::new(MemoryStore::new()))
}

#[test]
fn created_idea_is_published_before_call_returns() {
    let seen: Rc<RefCell<Vec<IdeasSnapshot>>> = Rc::default();
    let mut store = mounted();
    let sink = Rc::clone(&seen);
    store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

    let created = store
        .create_idea(&IdeaInput::new("Night market app", "Map of stalls"))
        .unwrap();

    assert!(store.ideas().contains(&created));
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].ideas.len(), 6);
    assert_eq!(seen[0].error, None);
}

#[test]
fn update_and_status_change_flow_through_snapshot() {
    let mut store = mounted();
    let id = IdeaId::from("1");

    let updated = store
        .update_idea(
            &id,
            IdeaPatch {
                category: Some("Logistics".to_string()),
                ..IdeaPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.category, "Logistics");

    let changed = store.change_status(&id, IdeaStatus::Archived).unwrap();
    assert_eq!(changed.status, IdeaStatus::Archived);
    let published = store.ideas().iter().find(|idea| idea.id == id).unwrap();
    assert_eq!(published, &changed);
}

#[test]
fn quota_failure_sets_error_and_keeps_collection() {
    let mut seeded = MemoryStore::new();
    KvIdeaRepository::new(&mut seeded).list().unwrap();
    let quota = seeded.used_bytes();

    let mut store = IdeaStore::mounted(KvIdeaRepository::new(MemoryStore::with_quota(quota)));
    let before = store.ideas().to_vec();
    assert_eq!(before.len(), 5);

    let created = store.create_idea(&IdeaInput::new("Too big", "Does not fit"));
    assert!(created.is_none());
    assert!(store.last_error().is_some());
    assert_eq!(store.ideas(), before.as_slice());
    assert!(!store.is_loading());
}

#[test]
fn unknown_ids_are_not_errors_for_get_and_delete() {
    let mut store = mounted();
    let missing = IdeaId::from("nonexistent-id");

    assert_eq!(store.get_idea(&missing), None);
    assert!(store.delete_idea(&missing));
    assert_eq!(store.last_error(), None);
    assert_eq!(store.ideas().len(), 5);
}

#[test]
fn update_of_missing_id_reports_not_found() {
    let mut store = mounted();
    let result = store.update_idea(
        &IdeaId::from("nonexistent-id"),
        IdeaPatch {
            title: Some("Z".to_string()),
            ..IdeaPatch::default()
        },
    );
    assert!(result.is_none());
    assert!(store.last_error().unwrap().contains("nonexistent-id"));
}

#[test]
fn search_and_filter_read_through_repository() {
    let mut store = mounted();

    let hits = store.search_ideas("ai");
    assert!(hits.iter().any(|idea| idea.id.as_str() == "3"));
    assert_eq!(store.search_ideas(""), store.ideas().to_vec());

    let drafts = store.filter_ideas(&IdeaFilter::by_status(IdeaStatus::Draft));
    assert_eq!(drafts.len(), 2);
}

#[test]
fn stats_follow_published_snapshot() {
    let mut store = mounted();
    assert_eq!(store.stats().total, 5);

    store.delete_idea(&IdeaId::from("3"));
    let stats = store.stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.completion_rate, 0);

    let mut repo = store.into_repository();
    assert_eq!(repo.list().unwrap().len(), 4);
}

//! End-to-end store behavior as seen by an outside observer

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use infinicube::prelude::*;

fn watch(store: &mut CubeStore) -> Arc<Mutex<Vec<StoreEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    for event_type in [
        EventType::CubeCreated,
        EventType::SelectionChanged,
        EventType::CubeDeleted,
        EventType::CubeUpdated,
    ] {
        let sink = Arc::clone(&seen);
        store.observe(event_type, move |event| sink.lock().unwrap().push(event.clone()));
    }
    seen
}

#[test]
fn create_select_delete_lifecycle() {
    let mut store = CubeStore::new();
    let events = watch(&mut store);

    let id = store.create(Vec3::zeros(), CubeOptions::new());
    let cubes = store.list();
    assert_eq!(cubes.len(), 1);
    assert_eq!(cubes[0].id, id);
    assert_eq!(cubes[0].position, Vec3::zeros());
    assert_eq!(cubes[0].size, CubeSize::Uniform(1.0));

    store.select(&id);
    assert!(store.is_selected(&id));

    store.delete(&id);
    assert!(store.list().is_empty());
    assert_eq!(store.selected(), None);

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            StoreEvent::Created(cubes[0].clone()),
            StoreEvent::SelectionChanged(Some(cubes[0].clone())),
            StoreEvent::SelectionChanged(None),
            StoreEvent::Deleted(id),
        ]
    );
}

#[test]
fn ids_stay_unique_under_churn() {
    let mut store = CubeStore::new();
    let mut ever_issued = HashSet::new();
    for round in 0..50 {
        let id = store.create(Vec3::zeros(), CubeOptions::new());
        assert!(ever_issued.insert(id.clone()));
        if round % 2 == 0 {
            store.delete(&id);
        }
        if round % 10 == 9 {
            store.clear();
        }
    }
    let live: HashSet<_> = store.iter().map(|cube| cube.id.clone()).collect();
    assert_eq!(live.len(), store.len());
}

#[test]
fn selecting_missing_cube_reports_empty_selection() {
    let mut store = CubeStore::new();
    let id = store.create(Vec3::zeros(), CubeOptions::new());
    store.select(&id);
    let events = watch(&mut store);

    store.select(&CubeId::new("cube-0-missing"));

    assert_eq!(store.selected_id(), None);
    assert_eq!(*events.lock().unwrap(), vec![StoreEvent::SelectionChanged(None)]);
}

#[test]
fn clear_fires_one_deselect_and_no_deletions() {
    let mut store = CubeStore::new();
    for _ in 0..4 {
        store.create(Vec3::zeros(), CubeOptions::new());
    }
    let deletions = Arc::new(Mutex::new(0_usize));
    let counter = Arc::clone(&deletions);
    store.observe(EventType::CubeDeleted, move |_| *counter.lock().unwrap() += 1);
    let events = watch(&mut store);

    store.clear();

    assert!(store.is_empty());
    assert_eq!(*deletions.lock().unwrap(), 0);
    assert_eq!(*events.lock().unwrap(), vec![StoreEvent::SelectionChanged(None)]);
}

struct Swallow;

impl EventHandler for Swallow {
    fn on_event(&mut self, _event: &StoreEvent) -> bool {
        true
    }
}

#[test]
fn consuming_handler_stops_later_handlers() {
    let mut store = CubeStore::new();
    let reached = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&reached);

    let swallow = store.subscribe(EventType::CubeCreated, Box::new(Swallow));
    store.observe(EventType::CubeCreated, move |_| *flag.lock().unwrap() = true);

    store.create(Vec3::zeros(), CubeOptions::new());
    assert!(!*reached.lock().unwrap());

    assert!(store.unsubscribe(swallow));
    store.create(Vec3::zeros(), CubeOptions::new());
    assert!(*reached.lock().unwrap());
}

#[test]
fn shared_store_serializes_callers() {
    let shared = CubeStore::new().into_shared();
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    infinicube::scene::lock_shared(&shared).create(Vec3::zeros(), CubeOptions::new());
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let store = infinicube::scene::lock_shared(&shared);
    assert_eq!(store.len(), 100);
    let ids: HashSet<_> = store.iter().map(|cube| cube.id.clone()).collect();
    assert_eq!(ids.len(), 100);
}

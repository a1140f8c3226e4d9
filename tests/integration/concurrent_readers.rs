use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crate::support::Fixture;

#[test]
fn readers_never_observe_a_partial_index() {
    let fixture = Fixture::new();
    let names: Vec<String> = (0..200).map(|i| format!("Goblin {}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    fixture.world("alpha", "Alpha").container("alpha", &name_refs[..100]);
    fixture.world("beta", "Beta").container("beta", &name_refs[100..]);

    let service = Arc::new(fixture.service());
    let done = Arc::new(AtomicBool::new(false));
    let observed = Arc::new(AtomicUsize::new(0));

    let mut readers = Vec::new();
    for _ in 0..4 {
        let service = Arc::clone(&service);
        let done = Arc::clone(&done);
        let observed = Arc::clone(&observed);
        readers.push(thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                let snapshot = service.snapshot();
                let len = snapshot.len();
                assert!(len == 0 || len == 200, "saw partial index of {} entries", len);
                if len == 200 {
                    assert_eq!(snapshot.search_actor("goblin 150").unwrap().world, "Beta");
                }
                observed.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    for _ in 0..10 {
        let report = service.build_index().unwrap();
        assert_eq!(report.entries.len(), 200);
    }
    done.store(true, Ordering::SeqCst);

    for reader in readers {
        reader.join().unwrap();
    }
    assert!(observed.load(Ordering::SeqCst) > 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_builds_leave_a_complete_index() {
    let fixture = Fixture::new();
    fixture.world("alpha", "Alpha").container("alpha", &["Goblin", "Orc"]);
    fixture.world("beta", "Beta").container("beta", &["Wolf"]);
    let service = fixture.service();

    let (a, b) = tokio::join!(
        service.build_index_concurrent(),
        service.build_index_concurrent()
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.entries, b.entries);
    assert!(a.installed || b.installed);
    assert_eq!(service.snapshot().len(), 3);
}

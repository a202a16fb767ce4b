use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use photo_collage::collage::Collage;
use photo_collage::config::Configuration;
use photo_collage::repository::PhotoRepository;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::tempdir;

/// Hands out the given paths in order, forever.
struct ListRepository {
    paths: Vec<PathBuf>,
    idx: usize,
}

impl PhotoRepository for ListRepository {
    fn has_photos(&self) -> bool {
        !self.paths.is_empty()
    }

    fn next_photo_path(&mut self) -> Option<PathBuf> {
        let out = self.paths.get(self.idx)?.clone();
        self.idx = (self.idx + 1) % self.paths.len();
        Some(out)
    }
}

/// Wraps a [`ListRepository`] whose availability can be switched off.
struct SwitchableRepository {
    inner: ListRepository,
    available: Arc<AtomicBool>,
}

impl PhotoRepository for SwitchableRepository {
    fn has_photos(&self) -> bool {
        self.available.load(Ordering::SeqCst) && self.inner.has_photos()
    }

    fn next_photo_path(&mut self) -> Option<PathBuf> {
        self.inner.next_photo_path()
    }
}

fn collage_with(paths: Vec<PathBuf>, number_of_photos: usize) -> Collage {
    let cfg = Configuration {
        number_of_photos,
        ..Configuration::default()
    };
    Collage::new(&cfg, Box::new(ListRepository { paths, idx: 0 }))
}

fn keys(collage: &Collage) -> Vec<(u64, bool)> {
    collage
        .window()
        .iter()
        .map(|p| (p.sequence, p.removed))
        .collect()
}

#[test]
fn rolling_window_scenario_with_three_photos() {
    let tmp = tempdir().unwrap();
    let paths: Vec<PathBuf> = (1..=5)
        .map(|i| {
            let p = tmp.path().join(format!("p{i}.jpg"));
            fs::write(&p, format!("photo-{i}")).unwrap();
            p
        })
        .collect();
    let mut collage = collage_with(paths, 3);

    for _ in 0..3 {
        assert!(collage.advance().unwrap());
    }
    assert_eq!(keys(&collage), vec![(1, false), (2, false), (3, false)]);

    assert!(collage.advance().unwrap());
    assert_eq!(
        keys(&collage),
        vec![(1, true), (2, false), (3, false), (4, false)]
    );

    assert!(collage.advance().unwrap());
    assert_eq!(
        keys(&collage),
        vec![(2, true), (3, false), (4, false), (5, false)]
    );

    let newest = collage.window().iter().last().unwrap();
    assert_eq!(newest.extension, ".jpg");
    assert_eq!(STANDARD.decode(&newest.data).unwrap(), b"photo-5");
}

#[test]
fn sequence_numbers_have_no_gaps_and_window_stays_bounded() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("a.png");
    let b = tmp.path().join("b.png");
    fs::write(&a, b"a").unwrap();
    fs::write(&b, b"b").unwrap();
    let mut collage = collage_with(vec![a, b], 2);

    let mut seen = Vec::new();
    for _ in 0..25 {
        collage.advance().unwrap();
        assert!(collage.window().len() <= 3);
        seen.push(collage.window().iter().last().unwrap().sequence);
    }
    assert_eq!(seen, (1..=25).collect::<Vec<u64>>());
    assert_eq!(collage.last_sequence(), 25);

    let frame = collage.snapshot();
    assert_eq!(frame.photos.len(), 3);
    assert_eq!(frame.fading().map(|p| p.sequence), Some(23));
    assert_eq!(frame.visible().count(), 2);
}

#[test]
fn empty_source_is_a_silent_noop() {
    let mut collage = collage_with(Vec::new(), 3);
    for _ in 0..3 {
        assert!(!collage.advance().unwrap());
    }
    assert!(collage.window().is_empty());
    assert_eq!(collage.last_sequence(), 0);
}

#[test]
fn source_running_dry_leaves_window_untouched() {
    let tmp = tempdir().unwrap();
    let paths: Vec<PathBuf> = (1..=4)
        .map(|i| {
            let p = tmp.path().join(format!("p{i}.jpg"));
            fs::write(&p, format!("photo-{i}")).unwrap();
            p
        })
        .collect();
    let available = Arc::new(AtomicBool::new(true));
    let cfg = Configuration {
        number_of_photos: 3,
        ..Configuration::default()
    };
    let mut collage = Collage::new(
        &cfg,
        Box::new(SwitchableRepository {
            inner: ListRepository { paths, idx: 0 },
            available: available.clone(),
        }),
    );
    for _ in 0..4 {
        assert!(collage.advance().unwrap());
    }
    let before = collage.window().snapshot();
    assert_eq!(
        keys(&collage),
        vec![(1, true), (2, false), (3, false), (4, false)]
    );

    available.store(false, Ordering::SeqCst);
    for _ in 0..3 {
        assert!(!collage.advance().unwrap());
    }
    assert_eq!(collage.window().snapshot(), before);
    assert_eq!(collage.last_sequence(), 4);

    available.store(true, Ordering::SeqCst);
    assert!(collage.advance().unwrap());
    assert_eq!(collage.last_sequence(), 5);
    assert_eq!(
        keys(&collage),
        vec![(2, true), (3, false), (4, false), (5, false)]
    );
}

#[test]
fn huge_photo_count_builds_without_preallocating() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("only.jpg");
    fs::write(&p, b"x").unwrap();
    let mut collage = collage_with(vec![p], 1 << 40);
    assert_eq!(collage.window().visible(), 1 << 40);
    for _ in 0..5 {
        assert!(collage.advance().unwrap());
    }
    assert_eq!(collage.window().len(), 5);
    assert!(collage.window().iter().all(|p| !p.removed));
}

#[test]
fn unreadable_photo_propagates_without_consuming_a_sequence() {
    let tmp = tempdir().unwrap();
    let good = tmp.path().join("good.jpg");
    fs::write(&good, b"ok").unwrap();
    let missing = tmp.path().join("missing.jpg");
    let mut collage = collage_with(vec![good, missing.clone()], 3);

    assert!(collage.advance().unwrap());
    let err = collage.advance().unwrap_err();
    match err {
        photo_collage::Error::Read { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(collage.last_sequence(), 1);
    assert_eq!(collage.window().len(), 1);

    // The next call moves on to the readable photo again.
    assert!(collage.advance().unwrap());
    assert_eq!(collage.last_sequence(), 2);
}

#[test]
fn snapshot_carries_presentation_settings() {
    let cfg = Configuration {
        is_grayscale: true,
        opacity: 0.25,
        maximum_size: 320,
        ..Configuration::default()
    };
    let collage = Collage::new(
        &cfg,
        Box::new(ListRepository {
            paths: Vec::new(),
            idx: 0,
        }),
    );
    let frame = collage.snapshot();
    assert!(frame.photos.is_empty());
    assert!(frame.presentation.is_grayscale);
    assert!((frame.presentation.opacity - 0.25).abs() < f64::EPSILON);
    assert_eq!(frame.presentation.maximum_size, 320);
}

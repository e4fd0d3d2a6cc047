use proxy_deck::{Deck, EntryDetails};
use proxy_layout::{GuideStyle, PageLayoutConfig, PrintDocument};
use proxy_runtime::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Clone, Copy)]
enum Behaviour {
    Bytes(&'static [u8]),
    Fail,
    Hang,
}

#[derive(Default)]
struct MockLoader {
    behaviours: HashMap<String, Behaviour>,
    calls: Mutex<Vec<String>>,
}

impl MockLoader {
    fn with(mut self, source: &str, behaviour: Behaviour) -> Self {
        self.behaviours.insert(source.to_string(), behaviour);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImageLoader for MockLoader {
    async fn load(&self, source: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(source.to_string());
        match self.behaviours.get(source).copied() {
            Some(Behaviour::Bytes(bytes)) => Ok(bytes.to_vec()),
            Some(Behaviour::Fail) | None => Err(RuntimeError::Load(format!("no image at {}", source))),
            Some(Behaviour::Hang) => std::future::pending().await,
        }
    }
}

impl ImageLoader for &MockLoader {
    async fn load(&self, source: &str) -> Result<Vec<u8>> {
        (**self).load(source).await
    }
}

/// Keeps the laid out document instead of serializing it
#[derive(Default)]
struct CollectSink {
    documents: Vec<PrintDocument>,
}

impl DocumentSink for CollectSink {
    type Output = usize;

    async fn emit(&mut self, document: PrintDocument) -> Result<usize> {
        let pages = document.page_count();
        self.documents.push(document);
        Ok(pages)
    }
}

/// One row of three 30x30 items per page
fn three_per_page() -> PageLayoutConfig {
    PageLayoutConfig {
        page_width_pt: 100.0,
        page_height_pt: 40.0,
        item_width_pt: 30.0,
        item_height_pt: 30.0,
        spacing_pt: 0.0,
        padding_pt: 5.0,
        guide_style: GuideStyle::BorderLines,
        ..Default::default()
    }
}

fn two_card_deck() -> Deck {
    Deck::new()
        .apply_quantity_change(EntryDetails::new("A", "Alpha").with_image_url("img/a"), 2)
        .apply_quantity_change(EntryDetails::new("B", "Beta").with_image_url("img/b"), 3)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<ProxyUpdate>) -> Vec<ProxyUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_expands_and_paginates_deck() {
    let loader = MockLoader::default()
        .with("img/a", Behaviour::Bytes(b"a"))
        .with("img/b", Behaviour::Bytes(b"b"));
    let coordinator = PrintCoordinator::new(&loader, three_per_page());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = CollectSink::default();

    let outcome = coordinator
        .run(&two_card_deck(), &mut sink, &tx, &mut CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PrintOutcome::Emitted {
            output: 2,
            pages: 2,
            placements: 5,
            failed_images: Vec::new(),
        }
    );

    let document = &sink.documents[0];
    let ids: Vec<Vec<&str>> = document
        .pages
        .iter()
        .map(|p| {
            p.items
                .iter()
                .map(|i| i.placement.entry_id.as_str())
                .collect()
        })
        .collect();
    assert_eq!(ids, vec![vec!["A", "A", "B"], vec!["B", "B"]]);

    // Each distinct source is fetched once
    assert_eq!(loader.calls(), vec!["img/a", "img/b"]);

    let updates = drain(&mut rx);
    assert_eq!(updates[0], ProxyUpdate::ResolveStarted { sources: 2 });
    assert!(updates.contains(&ProxyUpdate::Progress {
        completed: 1,
        total: 2,
        percent: 50
    }));
    assert!(updates.contains(&ProxyUpdate::Progress {
        completed: 2,
        total: 2,
        percent: 100
    }));
    assert_eq!(
        updates.last(),
        Some(&ProxyUpdate::Emitted {
            pages: 2,
            placements: 5
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_image_leaves_blank_slot() {
    let loader = MockLoader::default()
        .with("img/a", Behaviour::Bytes(b"a"))
        .with("img/b", Behaviour::Fail);
    let coordinator = PrintCoordinator::new(&loader, three_per_page());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = CollectSink::default();

    let outcome = coordinator
        .run(&two_card_deck(), &mut sink, &tx, &mut CancelSignal::never())
        .await
        .unwrap();

    match outcome {
        PrintOutcome::Emitted {
            placements,
            failed_images,
            ..
        } => {
            assert_eq!(placements, 5);
            assert_eq!(failed_images, vec!["img/b"]);
        }
        other => panic!("Expected emitted document, got {:?}", other),
    }

    let document = &sink.documents[0];
    let blanks = document
        .pages
        .iter()
        .flat_map(|p| &p.items)
        .filter(|i| i.image.is_none())
        .count();
    assert_eq!(blanks, 3);

    let updates = drain(&mut rx);
    assert!(
        updates
            .iter()
            .any(|u| matches!(u, ProxyUpdate::ImageFailed { source, .. } if source == "img/b"))
    );
}

#[tokio::test(start_paused = true)]
async fn test_hung_image_times_out() {
    let loader = MockLoader::default()
        .with("img/a", Behaviour::Hang)
        .with("img/b", Behaviour::Bytes(b"b"));
    let queue = RequestQueue::new(Duration::from_millis(100), Duration::from_secs(5));
    let coordinator = PrintCoordinator::new(&loader, three_per_page()).with_queue(queue);
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut sink = CollectSink::default();

    let outcome = coordinator
        .run(&two_card_deck(), &mut sink, &tx, &mut CancelSignal::never())
        .await
        .unwrap();

    match outcome {
        PrintOutcome::Emitted { failed_images, .. } => assert_eq!(failed_images, vec!["img/a"]),
        other => panic!("Expected emitted document, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_requests_are_paced() {
    let loader = MockLoader::default()
        .with("img/a", Behaviour::Bytes(b"a"))
        .with("img/b", Behaviour::Bytes(b"b"));
    let coordinator = PrintCoordinator::new(&loader, three_per_page());
    let (tx, _rx) = mpsc::unbounded_channel();
    let start = tokio::time::Instant::now();

    coordinator
        .run(
            &two_card_deck(),
            &mut CollectSink::default(),
            &tx,
            &mut CancelSignal::never(),
        )
        .await
        .unwrap();

    assert!(start.elapsed() >= RequestQueue::DEFAULT_DELAY * 2);
}

#[tokio::test(start_paused = true)]
async fn test_empty_deck_emits_nothing() {
    let loader = MockLoader::default();
    let coordinator = PrintCoordinator::new(&loader, three_per_page());
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut sink = CollectSink::default();

    let outcome = coordinator
        .run(&Deck::new(), &mut sink, &tx, &mut CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(outcome, PrintOutcome::Empty);
    assert!(sink.documents.is_empty());
    assert!(loader.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_invalid_config_rejected_before_fetching() {
    let loader = MockLoader::default().with("img/a", Behaviour::Bytes(b"a"));
    let config = PageLayoutConfig {
        item_width_pt: 10_000.0,
        ..Default::default()
    };
    let coordinator = PrintCoordinator::new(&loader, config);
    let (tx, _rx) = mpsc::unbounded_channel();

    let result = coordinator
        .run(
            &two_card_deck(),
            &mut CollectSink::default(),
            &tx,
            &mut CancelSignal::never(),
        )
        .await;

    assert!(matches!(result, Err(RuntimeError::Layout(_))));
    assert!(loader.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_resolution() {
    let loader = MockLoader::default()
        .with("img/a", Behaviour::Bytes(b"a"))
        .with("img/b", Behaviour::Hang);
    let queue = RequestQueue::new(Duration::from_millis(100), Duration::from_secs(600));
    let coordinator = PrintCoordinator::new(&loader, three_per_page()).with_queue(queue);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (handle, mut cancel) = cancellation();
    let mut sink = CollectSink::default();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.cancel();
    });

    let result = coordinator
        .run(&two_card_deck(), &mut sink, &tx, &mut cancel)
        .await;

    assert!(matches!(result, Err(RuntimeError::Cancelled)));
    assert!(sink.documents.is_empty());
    assert_eq!(drain(&mut rx).last(), Some(&ProxyUpdate::Cancelled));
}

#[tokio::test]
async fn test_pdf_bytes_sink() {
    let img = image::RgbImage::from_pixel(8, 11, image::Rgb([10, 120, 200]));
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let png: &'static [u8] = Box::leak(png.into_boxed_slice());

    let loader = MockLoader::default()
        .with("img/a", Behaviour::Bytes(png))
        .with("img/b", Behaviour::Bytes(png));
    let queue = RequestQueue::new(Duration::ZERO, Duration::from_secs(5));
    let coordinator =
        PrintCoordinator::new(&loader, PageLayoutConfig::default()).with_queue(queue);
    let (tx, _rx) = mpsc::unbounded_channel();

    let outcome = coordinator
        .run(
            &two_card_deck(),
            &mut PdfBytesSink,
            &tx,
            &mut CancelSignal::never(),
        )
        .await
        .unwrap();

    let PrintOutcome::Emitted { output, pages, .. } = outcome else {
        panic!("Expected emitted document");
    };
    assert_eq!(pages, 1);
    let doc = lopdf::Document::load_mem(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

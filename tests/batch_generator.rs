use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use viewgen::{
    AngleCatalog, BatchGenerator, EncodedImage, GeneratorConfig, ImageEndpoint, Result,
    SourceImage, ViewGenError, ViewSpec,
};

#[derive(Clone)]
enum Reply {
    Image(&'static str),
    Fail(&'static str),
    NoImage,
}

/// Answers each directive with a scripted reply after a scripted delay.
#[derive(Default)]
struct ScriptedEndpoint {
    script: HashMap<String, (u64, Reply)>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    completion_order: Mutex<Vec<String>>,
}

impl ScriptedEndpoint {
    fn new() -> Self {
        Self::default()
    }

    fn on(mut self, directive: &str, delay_ms: u64, reply: Reply) -> Self {
        self.script.insert(directive.to_string(), (delay_ms, reply));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn completion_order(&self) -> Vec<String> {
        self.completion_order.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEndpoint for ScriptedEndpoint {
    async fn generate(&self, _source: &SourceImage, directive: &str) -> Result<EncodedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let (delay_ms, reply) = self
            .script
            .get(directive)
            .cloned()
            .unwrap_or((0, Reply::Fail("unscripted directive")));
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completion_order
            .lock()
            .unwrap()
            .push(directive.to_string());

        match reply {
            Reply::Image(tag) => Ok(EncodedImage::new("image/png", tag)),
            Reply::Fail(reason) => Err(ViewGenError::RequestError(reason.to_string())),
            Reply::NoImage => Err(ViewGenError::NoImage {
                directive: directive.to_string(),
            }),
        }
    }
}

fn source() -> SourceImage {
    SourceImage::from_bytes(b"not really a png", "image/png")
}

fn four_views() -> AngleCatalog {
    AngleCatalog::from_specs(vec![
        ViewSpec::new("right", "go right"),
        ViewSpec::new("left", "go left"),
        ViewSpec::new("behind", "go behind"),
        ViewSpec::new("above", "go above"),
    ])
}

fn image(tag: &str) -> EncodedImage {
    EncodedImage::new("image/png", tag)
}

#[tokio::test]
async fn test_successes_keep_catalog_order_not_completion_order() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 80, Reply::Image("right"))
        .on("go left", 5, Reply::Fail("left failed"))
        .on("go behind", 60, Reply::Fail("behind failed"))
        .on("go above", 10, Reply::Image("above"));
    let generator = BatchGenerator::new(&endpoint);

    let images = generator
        .generate_views(&source(), &four_views())
        .await
        .unwrap();

    assert_eq!(images, vec![image("right"), image("above")]);
    assert_eq!(endpoint.completion_order()[0], "go left");
    assert_eq!(endpoint.completion_order()[3], "go right");
}

#[tokio::test]
async fn test_all_failures_report_first_in_catalog_order() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 40, Reply::Fail("right exploded"))
        .on("go left", 1, Reply::Fail("left exploded"))
        .on("go behind", 2, Reply::Fail("behind exploded"))
        .on("go above", 3, Reply::Fail("above exploded"));
    let generator = BatchGenerator::new(&endpoint);

    let err = generator
        .generate_views(&source(), &four_views())
        .await
        .unwrap_err();

    assert!(err.is_batch_failure());
    assert!(err.to_string().contains("right exploded"));
    assert_eq!(endpoint.calls(), 4);
}

#[tokio::test]
async fn test_missing_image_failure_names_directive() {
    let endpoint = ScriptedEndpoint::new().on("go right", 0, Reply::NoImage);
    let catalog = AngleCatalog::from_specs(vec![ViewSpec::new("right", "go right")]);

    let err = BatchGenerator::new(&endpoint)
        .generate_views(&source(), &catalog)
        .await
        .unwrap_err();

    match err {
        ViewGenError::AllViewsFailed(reason) => assert!(reason.contains("go right")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_single_view_catalog() {
    let endpoint = ScriptedEndpoint::new().on("go above", 0, Reply::Image("above"));
    let catalog = AngleCatalog::from_specs(vec![ViewSpec::new("above", "go above")]);

    let images = BatchGenerator::new(&endpoint)
        .generate_views(&source(), &catalog)
        .await
        .unwrap();

    assert_eq!(images, vec![image("above")]);
}

#[tokio::test]
async fn test_partial_failure_is_silent_on_success_path() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 0, Reply::Fail("right failed"))
        .on("go left", 0, Reply::NoImage)
        .on("go behind", 0, Reply::Fail("behind failed"))
        .on("go above", 0, Reply::Image("above"));

    let result = BatchGenerator::new(&endpoint)
        .generate_views(&source(), &four_views())
        .await;

    // Three failures vanish: the caller only sees the one view that worked.
    assert_eq!(result.unwrap(), vec![image("above")]);
}

#[tokio::test]
async fn test_settle_reports_every_view() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 30, Reply::Image("right"))
        .on("go left", 0, Reply::Fail("left failed"))
        .on("go behind", 10, Reply::NoImage)
        .on("go above", 20, Reply::Image("above"));

    let report = BatchGenerator::new(&endpoint)
        .settle(&source(), &four_views())
        .await;

    assert_eq!(report.len(), 4);
    let indices: Vec<usize> = report.outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(report.successes().count(), 2);
    assert_eq!(report.outcomes[1].failure_reason(), Some("Request error: left failed"));
    assert!(report.outcomes[2]
        .failure_reason()
        .unwrap()
        .contains("go behind"));

    let labels: Vec<&str> = report.labeled_images().iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, vec!["right", "above"]);
}

#[tokio::test]
async fn test_requests_are_dispatched_together() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 150, Reply::Image("right"))
        .on("go left", 150, Reply::Image("left"))
        .on("go behind", 150, Reply::Image("behind"))
        .on("go above", 150, Reply::Image("above"));

    let started = Instant::now();
    let images = BatchGenerator::new(&endpoint)
        .generate_views(&source(), &four_views())
        .await
        .unwrap();

    assert_eq!(images.len(), 4);
    assert_eq!(endpoint.peak_in_flight(), 4);
    assert!(started.elapsed() < Duration::from_millis(550));
}

#[tokio::test]
async fn test_waits_for_slow_view_after_others_fail() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 0, Reply::Fail("right failed"))
        .on("go left", 0, Reply::Fail("left failed"))
        .on("go behind", 0, Reply::Fail("behind failed"))
        .on("go above", 100, Reply::Image("above"));

    let images = BatchGenerator::new(&endpoint)
        .generate_views(&source(), &four_views())
        .await
        .unwrap();

    assert_eq!(images, vec![image("above")]);
    assert_eq!(endpoint.completion_order().len(), 4);
}

#[tokio::test]
async fn test_repeated_batches_issue_fresh_calls() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 0, Reply::Image("right"))
        .on("go left", 0, Reply::Image("left"))
        .on("go behind", 0, Reply::Image("behind"))
        .on("go above", 0, Reply::Image("above"));
    let generator = BatchGenerator::new(&endpoint);
    let catalog = four_views();

    let first = generator.generate_views(&source(), &catalog).await.unwrap();
    let second = generator.generate_views(&source(), &catalog).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(endpoint.calls(), 8);
}

#[tokio::test]
async fn test_concurrency_cap_still_settles_all_in_order() {
    let endpoint = ScriptedEndpoint::new()
        .on("go right", 40, Reply::Image("right"))
        .on("go left", 10, Reply::Image("left"))
        .on("go behind", 30, Reply::Fail("behind failed"))
        .on("go above", 5, Reply::Image("above"));
    let generator =
        BatchGenerator::with_config(&endpoint, GeneratorConfig::new().with_max_concurrency(2));

    let images = generator
        .generate_views(&source(), &four_views())
        .await
        .unwrap();

    assert_eq!(images, vec![image("right"), image("left"), image("above")]);
    assert_eq!(endpoint.calls(), 4);
    assert!(endpoint.peak_in_flight() <= 2);
}

#[tokio::test]
async fn test_empty_catalog_fails_with_generic_reason() {
    let endpoint = ScriptedEndpoint::new();

    let err = BatchGenerator::new(&endpoint)
        .generate_views(&source(), &AngleCatalog::from_specs(Vec::new()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), viewgen::models::ALL_FAILED_REASON);
    assert_eq!(endpoint.calls(), 0);
}

#[tokio::test]
async fn test_shared_endpoint_behind_arc() {
    let endpoint = Arc::new(ScriptedEndpoint::new().on("go right", 0, Reply::Image("right")));
    let catalog = AngleCatalog::from_specs(vec![ViewSpec::new("right", "go right")]);

    let images = BatchGenerator::new(endpoint.clone())
        .generate_views(&source(), &catalog)
        .await
        .unwrap();

    assert_eq!(images, vec![image("right")]);
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
async fn test_standard_catalog_sends_four_directives() {
    let catalog = AngleCatalog::standard();
    let mut endpoint = ScriptedEndpoint::new();
    for (i, spec) in catalog.iter().enumerate() {
        let reply = if i % 2 == 0 {
            Reply::Image("even")
        } else {
            Reply::Fail("odd")
        };
        endpoint = endpoint.on(&spec.directive, 0, reply);
    }

    let report = BatchGenerator::new(&endpoint)
        .settle(&source(), &catalog)
        .await;

    let labels: Vec<&str> = report.labeled_images().iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, vec!["from the right", "from behind"]);
    assert_eq!(endpoint.calls(), 4);
}

//! Tests de la boucle du carrousel, horloge tokio en pause

use async_trait::async_trait;
use digsigncarousel::{
    CarouselClient, CarouselError, EffectiveSettings, Element, FeedFetcher, HtmlRenderer, Phase,
    RenderPlan, Result, SlideRenderer, View,
};
use digsignfeed::{FeedUpdate, SettingsPatch, Slide};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::{Instant, sleep};

#[derive(Clone)]
enum Step {
    Ok(FeedUpdate),
    Fail,
    Delayed(Duration, FeedUpdate),
}

/// Rejoue une liste de réponses, la dernière étant répétée
struct ScriptedFetcher {
    steps: Vec<Step>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedFetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<FeedUpdate> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps[call.min(self.steps.len() - 1)].clone();
        match step {
            Step::Ok(update) => Ok(update),
            Step::Fail => Err(CarouselError::Unavailable("scripted failure".to_string())),
            Step::Delayed(delay, update) => {
                sleep(delay).await;
                Ok(update)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Apply(usize),
    Placeholder(String),
    Activate(usize, u64),
}

/// Enregistre les appels avec leur date (secondes depuis le début)
struct RecordingRenderer {
    start: Instant,
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingRenderer {
    fn new() -> (Self, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                start: Instant::now(),
                events: Arc::clone(&events),
            },
            events,
        )
    }
}

impl SlideRenderer for RecordingRenderer {
    fn apply(&mut self, plan: &RenderPlan) {
        let event = match &plan.view {
            View::Placeholder(p) => Event::Placeholder(p.text()),
            View::Slides { slides, .. } => Event::Apply(slides.len()),
        };
        self.events.lock().unwrap().push(event);
    }

    fn activate(&mut self, index: usize) {
        let elapsed = self.start.elapsed().as_secs();
        self.events
            .lock()
            .unwrap()
            .push(Event::Activate(index, elapsed));
    }
}

fn slides(n: usize, with_codes: bool) -> Vec<Slide> {
    (0..n)
        .map(|i| {
            Slide::image(
                format!("https://example.org/media/{}.webp", i),
                Some(format!("Item {}", i)),
                format!("https://example.org/news/{}", i),
            )
            .with_code(with_codes.then(|| format!("https://example.org/qr/qr-{}.png", i)))
        })
        .collect()
}

fn update(n: usize, settings: SettingsPatch) -> FeedUpdate {
    FeedUpdate {
        slides: Some(slides(n, true)),
        settings: Some(settings),
    }
}

fn client<R: SlideRenderer>(fetcher: Arc<ScriptedFetcher>, renderer: R) -> CarouselClient<R> {
    CarouselClient::new(fetcher, renderer, EffectiveSettings::default(), "news")
}

#[tokio::test(start_paused = true)]
async fn test_rotation_follows_slide_delay() {
    let fetcher = ScriptedFetcher::new(vec![Step::Ok(update(
        3,
        SettingsPatch {
            refresh_interval: Some(60.0),
            slide_delay: Some(5.0),
            ..Default::default()
        },
    ))]);
    let (renderer, events) = RecordingRenderer::new();

    client(fetcher.clone(), renderer)
        .run_until(sleep(Duration::from_secs(22)))
        .await;

    let events = events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            Event::Placeholder("Loading content...".to_string()),
            Event::Apply(3),
            Event::Activate(1, 5),
            Event::Activate(2, 10),
            Event::Activate(0, 15),
            Event::Activate(1, 20),
        ]
    );
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_last_slides() {
    let ok = Step::Ok(update(2, SettingsPatch::default()));
    let fetcher = ScriptedFetcher::new(vec![ok.clone(), ok.clone(), ok, Step::Fail]);
    let (renderer, events) = RecordingRenderer::new();

    let client = client(fetcher.clone(), renderer)
        .run_until(sleep(Duration::from_secs(42)))
        .await;

    // Requêtes à 0, 10, 20, 30 et 40 s, échecs à partir de 30 s
    assert_eq!(fetcher.calls(), 5);
    assert_eq!(client.state().phase(), Phase::Rotating);
    assert_eq!(client.state().slides().len(), 2);

    let events = events.lock().unwrap().clone();
    // Chargement puis trois mises à jour, rien pour les échecs
    let applied: Vec<&Event> = events
        .iter()
        .filter(|e| !matches!(e, Event::Activate(..)))
        .collect();
    assert_eq!(applied.len(), 4);
    assert!(!events.iter().any(|e| matches!(e, Event::Placeholder(t) if t.starts_with("Failed"))));

    // La rotation continue toutes les 5 s après l'échec de 30 s
    let after_failure: Vec<(usize, u64)> = events
        .iter()
        .filter_map(|e| match e {
            Event::Activate(index, at) if *at > 30 => Some((*index, *at)),
            _ => None,
        })
        .collect();
    assert_eq!(after_failure.len(), 2);
    assert_eq!(after_failure[0].1, 35);
    assert_eq!(after_failure[1].1, 40);
    assert_ne!(after_failure[0].0, after_failure[1].0);
}

#[tokio::test(start_paused = true)]
async fn test_failure_after_empty_feed_shows_message() {
    let fetcher = ScriptedFetcher::new(vec![
        Step::Ok(FeedUpdate {
            slides: Some(Vec::new()),
            settings: None,
        }),
        Step::Fail,
    ]);

    let client = client(fetcher, HtmlRenderer::new())
        .run_until(sleep(Duration::from_secs(12)))
        .await;

    assert_eq!(client.state().phase(), Phase::Error);
    assert_eq!(
        client.renderer().placeholder_text(),
        Some("Failed to load content.")
    );
}

#[tokio::test(start_paused = true)]
async fn test_first_failure_shows_message() {
    let fetcher = ScriptedFetcher::new(vec![Step::Fail]);

    let client = client(fetcher.clone(), HtmlRenderer::new())
        .run_until(sleep(Duration::from_secs(25)))
        .await;

    assert_eq!(fetcher.calls(), 3);
    assert_eq!(client.state().phase(), Phase::Error);
    assert_eq!(
        client.renderer().placeholder_text(),
        Some("Failed to load content.")
    );
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    // La première réponse arrive après la seconde
    let fetcher = ScriptedFetcher::new(vec![
        Step::Delayed(Duration::from_secs(15), update(3, SettingsPatch::default())),
        Step::Ok(update(1, SettingsPatch::default())),
    ]);

    let client = client(fetcher.clone(), HtmlRenderer::new())
        .run_until(sleep(Duration::from_secs(17)))
        .await;

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(client.state().slides().len(), 1);
    assert_eq!(client.state().phase(), Phase::Showing);
    assert_eq!(client.renderer().slide_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_codes_toggle_hides_overlays() {
    let fetcher = ScriptedFetcher::new(vec![
        Step::Ok(update(
            2,
            SettingsPatch {
                enable_qrcodes: Some(true),
                ..Default::default()
            },
        )),
        Step::Ok(update(
            2,
            SettingsPatch {
                enable_qrcodes: Some(false),
                ..Default::default()
            },
        )),
    ]);

    let client = client(fetcher, HtmlRenderer::new())
        .run_until(sleep(Duration::from_secs(12)))
        .await;

    assert!(!client.state().settings().codes_enabled);
    for element in client.renderer().elements() {
        assert!(matches!(
            element,
            Element::Slide {
                code_visible: Some(false),
                ..
            }
        ));
    }
    assert!(client.renderer().markup().contains("display: none"));
}

#[tokio::test(start_paused = true)]
async fn test_poll_rearmed_on_refresh_change() {
    let fetcher = ScriptedFetcher::new(vec![Step::Ok(update(
        1,
        SettingsPatch {
            refresh_interval: Some(30.0),
            ..Default::default()
        },
    ))]);

    let client = client(fetcher.clone(), HtmlRenderer::new())
        .run_until(sleep(Duration::from_secs(65)))
        .await;

    // 0, 30 et 60 s au lieu de toutes les 10 s
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(client.state().poll_period(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_empty_feed_shows_category() {
    let fetcher = ScriptedFetcher::new(vec![Step::Ok(FeedUpdate {
        slides: Some(Vec::new()),
        settings: None,
    })]);

    let client = client(fetcher, HtmlRenderer::new())
        .run_until(sleep(Duration::from_secs(3)))
        .await;

    assert_eq!(client.state().phase(), Phase::Empty);
    assert_eq!(
        client.renderer().placeholder_text(),
        Some("No content found for category \"news\".")
    );
    assert_eq!(client.state().rotation(), None);
}

//! Boucle du carrousel
//!
//! [`CarouselClient`] drives a [`CarouselState`] with two tokio intervals,
//! one for slide rotation and one for feed polling. Fetches run in spawned
//! tasks and report back over a channel tagged with a request generation,
//! so a slow response never overwrites a newer one.

use crate::error::Result;
use crate::fetch::FeedFetcher;
use crate::render::SlideRenderer;
use crate::settings::EffectiveSettings;
use crate::state::{CarouselState, RenderPlan, TimerCommand};
use digsignfeed::FeedUpdate;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

type FetchOutcome = (u64, Result<FeedUpdate>);

fn interval_from(start: Instant, period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn apply_timer(timer: &mut Option<Interval>, command: TimerCommand) {
    match command {
        TimerCommand::Keep => {}
        TimerCommand::Cancel => *timer = None,
        TimerCommand::Arm(period) => *timer = Some(interval_from(Instant::now() + period, period)),
    }
}

/// Attend le prochain tick, ou indéfiniment sans minuteur
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Client du carrousel
pub struct CarouselClient<R: SlideRenderer> {
    fetcher: Arc<dyn FeedFetcher>,
    renderer: R,
    state: CarouselState,
    request_generation: u64,
    applied_generation: u64,
}

impl<R: SlideRenderer> CarouselClient<R> {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        renderer: R,
        settings: EffectiveSettings,
        category: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            state: CarouselState::new(settings, category),
            request_generation: 0,
            applied_generation: 0,
        }
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Numéro de la prochaine requête
    pub fn next_generation(&mut self) -> u64 {
        self.request_generation += 1;
        self.request_generation
    }

    fn transition<T>(&mut self, f: impl FnOnce(CarouselState) -> (CarouselState, T)) -> T {
        let placeholder = CarouselState::new(self.state.settings().clone(), String::new());
        let current = std::mem::replace(&mut self.state, placeholder);
        let (next, output) = f(current);
        self.state = next;
        output
    }

    /// Applique le résultat de la requête `generation`
    ///
    /// Results older than the last applied response are dropped. Returns the
    /// plan handed to the renderer, if any, so the caller can update timers.
    pub fn handle_fetch_result(
        &mut self,
        generation: u64,
        result: Result<FeedUpdate>,
    ) -> Option<RenderPlan> {
        if generation < self.applied_generation {
            debug!(
                generation,
                applied = self.applied_generation,
                "Discarding stale feed response"
            );
            return None;
        }

        let plan = match result {
            Ok(update) => {
                self.applied_generation = generation;
                let plan = self.transition(|state| state.reconcile(&update));
                debug!(
                    generation,
                    slides = self.state.slides().len(),
                    "Feed update applied"
                );
                Some(plan)
            }
            Err(e) => {
                warn!("Failed to fetch slides: {}", e);
                self.transition(|state| state.fetch_failed())
            }
        };

        if let Some(plan) = &plan {
            self.renderer.apply(plan);
        }
        plan
    }

    /// Avance la rotation d'une diapositive
    pub fn handle_tick(&mut self) -> Option<usize> {
        let active = self.transition(|state| state.tick());
        if let Some(index) = active {
            self.renderer.activate(index);
        }
        active
    }

    fn spawn_fetch(&mut self, tx: &mpsc::UnboundedSender<FetchOutcome>) {
        let generation = self.next_generation();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch().await;
            // Le récepteur peut être fermé après l'arrêt
            let _ = tx.send((generation, result));
        });
    }

    /// Fait tourner le carrousel jusqu'à `shutdown`
    ///
    /// The first fetch happens immediately, then every refresh interval.
    pub async fn run_until<F>(mut self, shutdown: F) -> Self
    where
        F: Future<Output = ()>,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

        let initial = self.state.initial_plan();
        self.renderer.apply(&initial);

        let mut rotation: Option<Interval> = None;
        let mut poll = Some(interval_from(Instant::now(), self.state.poll_period()));

        info!(
            period = ?self.state.poll_period(),
            "Carousel started"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                Some((generation, result)) = rx.recv() => {
                    if let Some(plan) = self.handle_fetch_result(generation, result) {
                        apply_timer(&mut rotation, plan.rotation);
                        apply_timer(&mut poll, plan.poll);
                    }
                }
                _ = next_tick(&mut rotation) => {
                    self.handle_tick();
                }
                _ = next_tick(&mut poll) => {
                    self.spawn_fetch(&tx);
                }
            }
        }

        info!("Carousel stopped");
        self
    }
}

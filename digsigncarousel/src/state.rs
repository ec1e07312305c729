//! Machine à états du carrousel
//!
//! Transitions are pure: they take the current [`CarouselState`] and return
//! the next one with a [`RenderPlan`] describing what the renderer and the
//! timers must do. Nothing here touches a clock or a display.

use crate::settings::EffectiveSettings;
use digsignfeed::{FeedUpdate, Slide};
use std::time::Duration;

/// Texte affiché à la place des diapositives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    Failed,
    NoContent(String),
}

impl Placeholder {
    pub fn text(&self) -> String {
        match self {
            Placeholder::Loading => "Loading content...".to_string(),
            Placeholder::Failed => "Failed to load content.".to_string(),
            Placeholder::NoContent(category) => {
                format!("No content found for category \"{}\".", category)
            }
        }
    }
}

/// Contenu à afficher, remplacé en entier à chaque plan
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Placeholder(Placeholder),
    Slides {
        slides: Vec<Slide>,
        active: usize,
        codes_visible: bool,
    },
}

/// Action sur un minuteur périodique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Laisser le minuteur tel quel
    Keep,
    /// Arrêter le minuteur
    Cancel,
    /// Remplacer le minuteur par un nouveau de cette période
    Arm(Duration),
}

/// Résultat d'une transition
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub view: View,
    pub rotation: TimerCommand,
    pub poll: TimerCommand,
}

/// Phase courante du carrousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Aucune réponse reçue
    Loading,
    /// Échec avant toute réponse réussie
    Error,
    /// Dernière réponse vide
    Empty,
    /// Une diapositive affichée, pas de rotation
    Showing,
    /// Deux diapositives ou plus, rotation armée
    Rotating,
}

/// État du carrousel côté client
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    category: String,
    slides: Vec<Slide>,
    active_index: usize,
    settings: EffectiveSettings,
    rotation: Option<Duration>,
    poll_period: Duration,
    ever_loaded: bool,
    placeholder: Option<Placeholder>,
}

impl CarouselState {
    pub fn new(settings: EffectiveSettings, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slides: Vec::new(),
            active_index: 0,
            poll_period: settings.refresh_interval,
            settings,
            rotation: None,
            ever_loaded: false,
            placeholder: Some(Placeholder::Loading),
        }
    }

    /// Plan du chargement de la page: placeholder et premier armement du poll
    pub fn initial_plan(&self) -> RenderPlan {
        RenderPlan {
            view: View::Placeholder(Placeholder::Loading),
            rotation: TimerCommand::Keep,
            poll: TimerCommand::Arm(self.poll_period),
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn settings(&self) -> &EffectiveSettings {
        &self.settings
    }

    /// Période du minuteur de rotation armé, s'il y en a un
    pub fn rotation(&self) -> Option<Duration> {
        self.rotation
    }

    pub fn poll_period(&self) -> Duration {
        self.poll_period
    }

    /// Vrai dès qu'une liste non vide a été affichée
    pub fn ever_loaded(&self) -> bool {
        self.ever_loaded
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match (&self.placeholder, self.slides.len()) {
            (Some(Placeholder::Loading), _) => Phase::Loading,
            (Some(Placeholder::Failed), _) => Phase::Error,
            (Some(Placeholder::NoContent(_)), _) => Phase::Empty,
            (None, n) if n >= 2 => Phase::Rotating,
            (None, _) => Phase::Showing,
        }
    }

    /// Applique une réponse réussie
    ///
    /// Settings are patched first, then the slide list is replaced as a
    /// whole. The active index is reset to 0 when out of range and the
    /// rotation timer is re-created (or cancelled below two slides). The
    /// poll timer is re-armed only when the refresh interval changed.
    pub fn reconcile(mut self, update: &FeedUpdate) -> (Self, RenderPlan) {
        let change = self.settings.apply(&update.settings());
        self.slides = update.slides().to_vec();
        if !self.slides.is_empty() {
            self.ever_loaded = true;
        }

        let poll = if change.refresh_interval {
            self.poll_period = self.settings.refresh_interval;
            TimerCommand::Arm(self.poll_period)
        } else {
            TimerCommand::Keep
        };

        if self.slides.is_empty() {
            let placeholder = Placeholder::NoContent(self.category.clone());
            self.placeholder = Some(placeholder.clone());
            self.rotation = None;
            let plan = RenderPlan {
                view: View::Placeholder(placeholder),
                rotation: TimerCommand::Cancel,
                poll,
            };
            return (self, plan);
        }

        self.placeholder = None;
        if self.active_index >= self.slides.len() {
            self.active_index = 0;
        }

        let rotation = if self.slides.len() >= 2 {
            self.rotation = Some(self.settings.slide_delay);
            TimerCommand::Arm(self.settings.slide_delay)
        } else {
            self.rotation = None;
            TimerCommand::Cancel
        };

        let plan = RenderPlan {
            view: View::Slides {
                slides: self.slides.clone(),
                active: self.active_index,
                codes_visible: self.settings.codes_enabled,
            },
            rotation,
            poll,
        };
        (self, plan)
    }

    /// Applique un échec de récupération
    ///
    /// Slides and timers are left alone. Until a non-empty slide list has
    /// been shown, the placeholder becomes the failure message.
    pub fn fetch_failed(mut self) -> (Self, Option<RenderPlan>) {
        if self.ever_loaded {
            return (self, None);
        }
        self.placeholder = Some(Placeholder::Failed);
        let plan = RenderPlan {
            view: View::Placeholder(Placeholder::Failed),
            rotation: TimerCommand::Keep,
            poll: TimerCommand::Keep,
        };
        (self, Some(plan))
    }

    /// Avance d'une diapositive, cycliquement
    ///
    /// Returns the new active index, or `None` when no rotation is armed.
    pub fn tick(mut self) -> (Self, Option<usize>) {
        if self.rotation.is_none() || self.slides.len() < 2 {
            return (self, None);
        }
        self.active_index = (self.active_index + 1) % self.slides.len();
        let active = self.active_index;
        (self, Some(active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digsignfeed::{SettingsPatch, SlideKind};

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| {
                Slide::image(
                    format!("https://example.org/{}.webp", i),
                    Some(format!("Slide {}", i)),
                    format!("https://example.org/news/{}", i),
                )
                .with_code(Some(format!("https://example.org/qr-{}.png", i)))
            })
            .collect()
    }

    fn update(n: usize) -> FeedUpdate {
        FeedUpdate {
            slides: Some(slides(n)),
            settings: None,
        }
    }

    fn state() -> CarouselState {
        CarouselState::new(EffectiveSettings::default(), "news")
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(
            state.initial_plan(),
            RenderPlan {
                view: View::Placeholder(Placeholder::Loading),
                rotation: TimerCommand::Keep,
                poll: TimerCommand::Arm(Duration::from_secs(10)),
            }
        );
    }

    #[test]
    fn test_empty_feed_shows_placeholder_without_rotation() {
        let (state, _) = state().reconcile(&update(3));
        let (state, plan) = state.reconcile(&update(0));

        assert_eq!(
            plan.view,
            View::Placeholder(Placeholder::NoContent("news".to_string()))
        );
        assert_eq!(plan.rotation, TimerCommand::Cancel);
        assert_eq!(state.rotation(), None);
        assert_eq!(state.phase(), Phase::Empty);
        assert_eq!(
            state.placeholder().unwrap().text(),
            "No content found for category \"news\"."
        );
    }

    #[test]
    fn test_single_slide_is_static() {
        let (state, plan) = state().reconcile(&update(1));
        assert_eq!(plan.rotation, TimerCommand::Cancel);
        assert_eq!(state.rotation(), None);
        assert_eq!(state.phase(), Phase::Showing);
        match plan.view {
            View::Slides { slides, active, .. } => {
                assert_eq!(slides.len(), 1);
                assert_eq!(active, 0);
            }
            other => panic!("unexpected view {:?}", other),
        }

        let (state, advanced) = state.tick();
        assert_eq!(advanced, None);
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn test_rotation_wraps() {
        let (mut state, plan) = state().reconcile(&update(3));
        assert_eq!(plan.rotation, TimerCommand::Arm(Duration::from_secs(5)));
        assert_eq!(state.phase(), Phase::Rotating);

        let mut seen = Vec::new();
        for _ in 0..4 {
            let (next, active) = state.tick();
            seen.push(active.unwrap());
            state = next;
        }
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_active_index_clamped() {
        let (mut state, _) = state().reconcile(&update(5));
        for _ in 0..4 {
            state = state.tick().0;
        }
        assert_eq!(state.active_index(), 4);

        let (state, plan) = state.reconcile(&update(2));
        assert_eq!(state.active_index(), 0);
        assert!(matches!(plan.view, View::Slides { active: 0, .. }));
    }

    #[test]
    fn test_active_index_kept_when_in_range() {
        let (state, _) = state().reconcile(&update(3));
        let state = state.tick().0;
        let (state, plan) = state.reconcile(&update(3));
        assert_eq!(state.active_index(), 1);
        assert!(matches!(plan.view, View::Slides { active: 1, .. }));
        // La rotation est recréée à chaque reconcile
        assert_eq!(plan.rotation, TimerCommand::Arm(Duration::from_secs(5)));
    }

    #[test]
    fn test_partial_settings_only_change_rotation() {
        let (state, _) = state().reconcile(&update(3));
        let (state, plan) = state.reconcile(&FeedUpdate {
            slides: Some(slides(3)),
            settings: Some(SettingsPatch {
                slide_delay: Some(3.0),
                ..Default::default()
            }),
        });

        assert_eq!(plan.rotation, TimerCommand::Arm(Duration::from_secs(3)));
        assert_eq!(plan.poll, TimerCommand::Keep);
        assert_eq!(state.settings().refresh_interval, Duration::from_secs(10));
        assert!(state.settings().codes_enabled);
    }

    #[test]
    fn test_poll_rearmed_on_refresh_change() {
        let (state, plan) = state().reconcile(&FeedUpdate {
            slides: Some(slides(2)),
            settings: Some(SettingsPatch {
                refresh_interval: Some(30.0),
                ..Default::default()
            }),
        });
        assert_eq!(plan.poll, TimerCommand::Arm(Duration::from_secs(30)));
        assert_eq!(state.poll_period(), Duration::from_secs(30));

        let (_, plan) = state.reconcile(&FeedUpdate {
            slides: Some(slides(2)),
            settings: Some(SettingsPatch {
                refresh_interval: Some(30.0),
                ..Default::default()
            }),
        });
        assert_eq!(plan.poll, TimerCommand::Keep);
    }

    #[test]
    fn test_codes_toggle_applies_on_next_reconcile() {
        let (state, plan) = state().reconcile(&update(2));
        assert!(matches!(plan.view, View::Slides { codes_visible: true, .. }));

        let (_, plan) = state.reconcile(&FeedUpdate {
            slides: Some(slides(2)),
            settings: Some(SettingsPatch {
                enable_qrcodes: Some(false),
                ..Default::default()
            }),
        });
        assert!(matches!(plan.view, View::Slides { codes_visible: false, .. }));
    }

    #[test]
    fn test_failure_before_first_load() {
        let (state, plan) = state().fetch_failed();
        assert_eq!(state.phase(), Phase::Error);
        let plan = plan.unwrap();
        assert_eq!(plan.view, View::Placeholder(Placeholder::Failed));
        assert_eq!(plan.rotation, TimerCommand::Keep);
        assert_eq!(plan.poll, TimerCommand::Keep);

        // Une réponse réussie remplace le message d'erreur
        let (state, _) = state.reconcile(&update(2));
        assert_eq!(state.phase(), Phase::Rotating);
    }

    #[test]
    fn test_failure_after_load_changes_nothing() {
        let (state, _) = state().reconcile(&update(3));
        let before = state.clone();
        let (after, plan) = state.fetch_failed();
        assert_eq!(plan, None);
        assert_eq!(after, before);
        assert_eq!(after.rotation(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_failure_after_empty_feed_shows_message() {
        let (state, _) = state().reconcile(&update(0));
        assert!(!state.ever_loaded());
        let (state, plan) = state.fetch_failed();
        assert_eq!(
            plan.map(|p| p.view),
            Some(View::Placeholder(Placeholder::Failed))
        );
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.placeholder(), Some(&Placeholder::Failed));
    }

    #[test]
    fn test_failure_after_slides_then_empty_keeps_no_content() {
        let (state, _) = state().reconcile(&update(2));
        let (state, _) = state.reconcile(&update(0));
        let (state, plan) = state.fetch_failed();
        assert_eq!(plan, None);
        assert_eq!(state.phase(), Phase::Empty);
    }

    #[test]
    fn test_slide_order_preserved() {
        let mut mixed = slides(2);
        mixed.insert(1, Slide::html("<p>x</p>", None, "https://example.org/news/x"));
        let (state, _) = state().reconcile(&FeedUpdate {
            slides: Some(mixed),
            settings: None,
        });
        let kinds: Vec<_> = state.slides().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SlideKind::Image, SlideKind::Html, SlideKind::Image]);
    }
}

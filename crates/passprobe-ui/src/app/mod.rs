//! Application wiring for the PassProbe inspector.

mod narrator;
mod style;
mod view;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use iced::widget::canvas;
use iced::window;
use iced::{application, Error as IcedError, Size, Task, Theme};
use log::{debug, info, warn};
use passprobe_client::AnalysisClient;
use passprobe_core::history::{HistoryEntry, HistoryStore};
use passprobe_core::{radar_axes, AnalysisResult, PassprobeConfig, CONFIG_PATH_ENV};
use tokio::time as tokio_time;

use narrator::{attack_script, breach_failure, breach_intro, breach_report, Narration};

const HISTORY_VIEW_LIMIT: usize = 5;

/// Launch the Iced application with the PassProbe theme and state.
pub fn run() -> iced::Result {
    configure_runtime_environment();
    passprobe_core::logging::init("info");
    run_with_render_profiles()
}

fn run_with_render_profiles() -> iced::Result {
    for (index, profile) in RENDER_PROFILES.iter().enumerate() {
        if index > 0 {
            warn!("Falling back to render profile `{}`.", profile.name);
        } else {
            info!("Launching PassProbe with render profile `{}`.", profile.name);
        }
        apply_render_profile(profile);
        match run_inspector() {
            Ok(()) => return Ok(()),
            Err(err) if is_surface_timeout(&err) && index + 1 < RENDER_PROFILES.len() => {
                warn!(
                    "Render profile `{}` hit a surface timeout; trying next fallback.",
                    profile.name
                );
                continue;
            }
            Err(err) => return Err(err),
        }
    }
    unreachable!("render profile loop must return before exhausting profiles");
}

fn run_inspector() -> iced::Result {
    application("PassProbe", PassprobeUi::update, PassprobeUi::view)
        .antialiasing(true)
        .window(window::Settings {
            size: Size::new(1180.0, 780.0),
            ..window::Settings::default()
        })
        .theme(PassprobeUi::theme)
        .run_with(PassprobeUi::init)
}

fn configure_runtime_environment() {
    use std::env;

    if env::var_os("ICED_PRESENT_MODE").is_none() {
        env::set_var("ICED_PRESENT_MODE", "fifo");
    }
    if env::var_os("WGPU_POWER_PREF").is_none() {
        env::set_var("WGPU_POWER_PREF", "low_power");
    }
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info,wgpu_hal::vulkan::conv=error");
    }
}

fn apply_render_profile(profile: &RenderProfile) {
    for (key, value) in profile.env {
        std::env::set_var(key, value);
    }
}

fn is_surface_timeout(err: &IcedError) -> bool {
    err.to_string().contains("Timeout when presenting surface")
}

struct RenderProfile {
    name: &'static str,
    env: &'static [(&'static str, &'static str)],
}

const RENDER_PROFILES: &[RenderProfile] = &[
    RenderProfile {
        name: "default",
        env: &[],
    },
    RenderProfile {
        name: "fallback-adapter",
        env: &[
            ("WGPU_FORCE_FALLBACK_ADAPTER", "1"),
            ("ICED_PRESENT_MODE", "fifo"),
            ("WGPU_POWER_PREF", "low_power"),
        ],
    },
];

/// Application state backing the inspector.
struct PassprobeUi {
    config: PassprobeConfig,
    client: Option<AnalysisClient>,
    history: HistoryStore,
    password: String,
    password_visible: bool,
    light_theme: bool,
    /// Bumped on every keystroke; debounce timers carry the revision they
    /// were scheduled under and are ignored once it moves on.
    input_revision: u64,
    /// Bumped per pipeline run; stale async results are discarded on arrival.
    pipeline_generation: u64,
    analyzing: bool,
    generating: bool,
    snapshot: Option<AnalysisResult>,
    /// Password the in-flight run was issued for.
    run_password: String,
    /// Password the current snapshot describes; feeds the heatmap.
    analyzed_password: String,
    radar_axes: [f32; 4],
    radar_cache: canvas::Cache,
    attack: Narration,
    breach: Narration,
    breach_dispatched: bool,
    breach_password: String,
    history_open: bool,
    history_view: Vec<HistoryEntry>,
    status_line: String,
    last_error: Option<String>,
}

/// Messages produced by Iced interactions and background tasks.
#[derive(Debug, Clone)]
enum Message {
    PasswordChanged(String),
    DebounceElapsed(u64),
    AnalysisFinished(u64, Result<AnalysisResult, String>),
    AttackTick(u64),
    BreachTick(u64),
    LeakCheckFinished(u64, Result<Vec<String>, String>),
    ToggleVisibility,
    ToggleTheme,
    GeneratePassword,
    GeneratePassphrase,
    GenerateFinished(Result<String, String>),
    ToggleHistory,
}

impl PassprobeUi {
    fn init() -> (Self, Task<Message>) {
        let requested_path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PassprobeConfig::default_path());

        let config = match PassprobeConfig::load_or_bootstrap(&requested_path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "failed to load configuration at {}: {err}; using defaults",
                    requested_path.display()
                );
                let mut config = PassprobeConfig::default();
                config.path = requested_path;
                config
            }
        };

        (Self::with_config(config), Task::none())
    }

    fn with_config(config: PassprobeConfig) -> Self {
        let history = HistoryStore::open(&config.history);
        info!("history store at {}", history.path().display());

        let client = match AnalysisClient::new(
            &config.base_url(),
            Duration::from_secs(config.service.timeout_secs),
        ) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("could not build analysis client: {err}");
                None
            }
        };

        Self {
            config,
            client,
            history,
            password: String::new(),
            password_visible: false,
            light_theme: false,
            input_revision: 0,
            pipeline_generation: 0,
            analyzing: false,
            generating: false,
            snapshot: None,
            run_password: String::new(),
            analyzed_password: String::new(),
            radar_axes: [0.0; 4],
            radar_cache: canvas::Cache::new(),
            attack: Narration::default(),
            breach: Narration::default(),
            breach_dispatched: false,
            breach_password: String::new(),
            history_open: false,
            history_view: Vec::new(),
            status_line: "Type a password to inspect it.".into(),
            last_error: None,
        }
    }

    fn theme(&self) -> Theme {
        if self.light_theme {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PasswordChanged(value) => {
                self.password = value;
                self.input_revision += 1;
                if self.password.is_empty() {
                    // Prior results stay on screen; nothing new to analyse.
                    return Task::none();
                }
                let revision = self.input_revision;
                let delay = Duration::from_millis(self.config.input.debounce_ms);
                Task::future(async move {
                    tokio_time::sleep(delay).await;
                    Message::DebounceElapsed(revision)
                })
            }
            Message::DebounceElapsed(revision) => {
                if revision != self.input_revision || self.password.is_empty() {
                    return Task::none();
                }
                self.start_run()
            }
            Message::AnalysisFinished(generation, result) => {
                if generation != self.pipeline_generation {
                    debug!("discarding stale analysis result for run {generation}");
                    return Task::none();
                }
                self.analyzing = false;
                match result {
                    Ok(result) => self.apply_snapshot(generation, result),
                    Err(err) => {
                        warn!("analysis run {generation} failed: {err}");
                        self.status_line = "Analysis failed.".into();
                        self.last_error = Some(err);
                        Task::none()
                    }
                }
            }
            Message::AttackTick(generation) => {
                let next = self.attack.tick(generation);
                self.attack_tick_task(generation, next)
            }
            Message::BreachTick(generation) => {
                let next = self.breach.tick(generation);
                if next.is_some() {
                    return self.breach_tick_task(generation, next);
                }
                if generation == self.breach.generation()
                    && self.breach.is_exhausted()
                    && !self.breach_dispatched
                {
                    return self.dispatch_leak_check(generation);
                }
                Task::none()
            }
            Message::LeakCheckFinished(generation, result) => {
                if generation != self.breach.generation() {
                    debug!("discarding stale leak-check result for run {generation}");
                    return Task::none();
                }
                let script = match result {
                    Ok(similar) => breach_report(&similar),
                    Err(err) => {
                        warn!("leak check for run {generation} failed: {err}");
                        breach_failure(&err)
                    }
                };
                let next = self.breach.resume(generation, script);
                self.breach_tick_task(generation, next)
            }
            Message::ToggleVisibility => {
                self.password_visible = !self.password_visible;
                Task::none()
            }
            Message::ToggleTheme => {
                self.light_theme = !self.light_theme;
                self.radar_cache.clear();
                Task::none()
            }
            Message::GeneratePassword => self.request_generated(GenerateKind::Password),
            Message::GeneratePassphrase => self.request_generated(GenerateKind::Passphrase),
            Message::GenerateFinished(result) => {
                self.generating = false;
                match result {
                    Ok(secret) => {
                        self.password = secret;
                        self.password_visible = true;
                        // Generated secrets skip the debounce window.
                        self.input_revision += 1;
                        self.start_run()
                    }
                    Err(err) => {
                        warn!("generation request failed: {err}");
                        self.status_line = "Generation failed.".into();
                        self.last_error = Some(err);
                        Task::none()
                    }
                }
            }
            Message::ToggleHistory => {
                self.history_open = !self.history_open;
                if self.history_open {
                    self.history_view = self.history.recent(HISTORY_VIEW_LIMIT);
                }
                Task::none()
            }
        }
    }

    /// Issue a new pipeline run for the current password.
    fn start_run(&mut self) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            self.status_line = "Analysis service unavailable.".into();
            self.last_error = Some("analysis client could not be constructed".into());
            return Task::none();
        };

        self.pipeline_generation += 1;
        let generation = self.pipeline_generation;
        self.analyzing = true;
        self.run_password = self.password.clone();
        self.status_line = "Analyzing password...".into();
        debug!("pipeline run {generation} issued");

        let password = self.run_password.clone();
        Task::perform(
            async move {
                client
                    .analyze(&password)
                    .await
                    .map_err(|err| err.to_string())
            },
            move |result| Message::AnalysisFinished(generation, result),
        )
    }

    /// Land a successful analysis: swap the snapshot for every visual sink in
    /// one assignment, record history once, and start both narrators.
    fn apply_snapshot(&mut self, generation: u64, result: AnalysisResult) -> Task<Message> {
        self.last_error = None;
        self.status_line = "Analysis complete.".into();
        self.analyzed_password = self.run_password.clone();
        self.radar_axes = radar_axes(&result.breakdown);
        self.radar_cache.clear();

        let entry = HistoryEntry::now(self.analyzed_password.clone(), result.score);
        if let Err(err) = self.history.append(entry) {
            warn!("could not persist history entry: {err}");
        }
        if self.history_open {
            self.history_view = self.history.recent(HISTORY_VIEW_LIMIT);
        }

        self.snapshot = Some(result);

        let attack_next = self
            .attack
            .begin(generation, attack_script(&self.analyzed_password));
        self.breach_password = self.analyzed_password.clone();
        self.breach_dispatched = false;
        let breach_next = self.breach.begin(generation, breach_intro());

        Task::batch(vec![
            self.attack_tick_task(generation, attack_next),
            self.breach_tick_task(generation, breach_next),
        ])
    }

    fn dispatch_leak_check(&mut self, generation: u64) -> Task<Message> {
        self.breach_dispatched = true;
        self.breach.hold(generation);

        let Some(client) = self.client.clone() else {
            let next = self
                .breach
                .resume(generation, breach_failure("analysis client unavailable"));
            return self.breach_tick_task(generation, next);
        };

        let password = self.breach_password.clone();
        Task::perform(
            async move {
                client
                    .leak_check(&password)
                    .await
                    .map_err(|err| err.to_string())
            },
            move |result| Message::LeakCheckFinished(generation, result),
        )
    }

    fn request_generated(&mut self, kind: GenerateKind) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            self.status_line = "Analysis service unavailable.".into();
            self.last_error = Some("analysis client could not be constructed".into());
            return Task::none();
        };
        self.generating = true;
        self.status_line = match kind {
            GenerateKind::Password => "Generating password...".into(),
            GenerateKind::Passphrase => "Generating passphrase...".into(),
        };
        Task::perform(
            async move {
                let result = match kind {
                    GenerateKind::Password => client.generate().await,
                    GenerateKind::Passphrase => client.generate_passphrase().await,
                };
                result.map_err(|err| err.to_string())
            },
            Message::GenerateFinished,
        )
    }

    fn attack_tick_task(&self, generation: u64, delay: Option<Duration>) -> Task<Message> {
        match delay {
            Some(delay) => Task::future(async move {
                tokio_time::sleep(delay).await;
                Message::AttackTick(generation)
            }),
            None => Task::none(),
        }
    }

    fn breach_tick_task(&self, generation: u64, delay: Option<Duration>) -> Task<Message> {
        match delay {
            Some(delay) => Task::future(async move {
                tokio_time::sleep(delay).await;
                Message::BreachTick(generation)
            }),
            None => Task::none(),
        }
    }

    fn view(&self) -> iced::Element<'_, Message> {
        view::render(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenerateKind {
    Password,
    Passphrase,
}

use super::*;
use passprobe_core::analysis::Breakdown;
use tempfile::TempDir;

fn test_ui() -> (PassprobeUi, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = PassprobeConfig::default();
    config.history.path = Some(dir.path().join("history.json"));
    config.input.debounce_ms = 10;
    (PassprobeUi::with_config(config), dir)
}

fn sample_result(score: u8) -> AnalysisResult {
    AnalysisResult {
        score,
        crack_time: "3 centuries".into(),
        breach: "Not found in known breaches".into(),
        feedback: vec!["Add more symbols".into()],
        breakdown: Breakdown {
            length: 6.0,
            symbols: 1.0,
            entropy: 3.0,
            uniqueness: 4.0,
        },
    }
}

fn start_run(ui: &mut PassprobeUi, password: &str) -> u64 {
    let _ = ui.update(Message::PasswordChanged(password.to_string()));
    let _ = ui.update(Message::DebounceElapsed(ui.input_revision));
    ui.pipeline_generation
}

#[test]
fn debounce_coalesces_rapid_edits() {
    let (mut ui, _dir) = test_ui();
    let _ = ui.update(Message::PasswordChanged("a".into()));
    let first_revision = ui.input_revision;
    let _ = ui.update(Message::PasswordChanged("ab".into()));
    assert_eq!(ui.pipeline_generation, 0);

    // The superseded timer fires and does nothing.
    let _ = ui.update(Message::DebounceElapsed(first_revision));
    assert_eq!(ui.pipeline_generation, 0);
    assert!(!ui.analyzing);

    let _ = ui.update(Message::DebounceElapsed(ui.input_revision));
    assert_eq!(ui.pipeline_generation, 1);
    assert!(ui.analyzing);
    assert_eq!(ui.run_password, "ab");
}

#[test]
fn empty_password_never_starts_a_run() {
    let (mut ui, _dir) = test_ui();
    let _ = ui.update(Message::PasswordChanged(String::new()));
    let _ = ui.update(Message::DebounceElapsed(ui.input_revision));
    assert_eq!(ui.pipeline_generation, 0);
    assert!(!ui.analyzing);
    assert!(ui.snapshot.is_none());
}

#[test]
fn clearing_the_field_keeps_previous_results() {
    let (mut ui, _dir) = test_ui();
    let generation = start_run(&mut ui, "hunter2");
    let _ = ui.update(Message::AnalysisFinished(generation, Ok(sample_result(80))));
    assert!(ui.snapshot.is_some());

    let _ = ui.update(Message::PasswordChanged(String::new()));
    assert!(ui.snapshot.is_some());
    assert_eq!(ui.analyzed_password, "hunter2");
}

#[test]
fn successful_analysis_lands_snapshot_history_and_narrators() {
    let (mut ui, _dir) = test_ui();
    let generation = start_run(&mut ui, "hunter2");
    let _ = ui.update(Message::AnalysisFinished(generation, Ok(sample_result(85))));

    assert!(!ui.analyzing);
    let snapshot = ui.snapshot.as_ref().expect("snapshot");
    assert_eq!(snapshot.score, 85);
    assert_eq!(ui.analyzed_password, "hunter2");
    assert_eq!(ui.history.len(), 1);

    // length 6 saturates, symbols 1 rescales to 2.5, the rest pass through.
    assert_eq!(ui.radar_axes[0], 5.0);
    assert!((ui.radar_axes[1] - 2.5).abs() < f32::EPSILON);
    assert!((ui.radar_axes[2] - 3.0).abs() < f32::EPSILON);
    assert!((ui.radar_axes[3] - 4.0).abs() < f32::EPSILON);

    assert_eq!(ui.attack.generation(), generation);
    assert_eq!(
        ui.attack.lines().first().map(|(_, text)| text.as_str()),
        Some("Simulating brute-force attack...")
    );
    assert_eq!(ui.breach.generation(), generation);
    assert!(ui.breach.lines().is_empty());
    assert!(!ui.breach_dispatched);
}

#[test]
fn stale_analysis_result_is_discarded() {
    let (mut ui, _dir) = test_ui();
    let first = start_run(&mut ui, "old-pass");
    let second = start_run(&mut ui, "new-pass");
    assert_ne!(first, second);

    let _ = ui.update(Message::AnalysisFinished(first, Ok(sample_result(20))));
    assert!(ui.snapshot.is_none());
    assert!(ui.history.is_empty());
    assert!(ui.analyzing);
}

#[test]
fn failed_analysis_keeps_previous_snapshot_and_skips_history() {
    let (mut ui, _dir) = test_ui();
    let generation = start_run(&mut ui, "hunter2");
    let _ = ui.update(Message::AnalysisFinished(generation, Ok(sample_result(60))));
    assert_eq!(ui.history.len(), 1);

    let generation = start_run(&mut ui, "hunter3");
    let _ = ui.update(Message::AnalysisFinished(
        generation,
        Err("network error: connection refused".into()),
    ));
    let snapshot = ui.snapshot.as_ref().expect("previous snapshot retained");
    assert_eq!(snapshot.score, 60);
    assert_eq!(ui.history.len(), 1);
    assert!(ui.last_error.is_some());
}

#[test]
fn each_success_appends_exactly_one_history_entry() {
    let (mut ui, _dir) = test_ui();
    for (password, score) in [("one", 10u8), ("two", 90u8)] {
        let generation = start_run(&mut ui, password);
        let _ = ui.update(Message::AnalysisFinished(generation, Ok(sample_result(score))));
    }
    assert_eq!(ui.history.len(), 2);
    let recent = ui.history.recent(5);
    assert_eq!(recent[0].password, "two");
    assert_eq!(recent[0].score, 90);
    assert_eq!(recent[1].password, "one");
}

#[test]
fn generated_secret_starts_a_run_without_debounce() {
    let (mut ui, _dir) = test_ui();
    let _ = ui.update(Message::GenerateFinished(Ok("x9$Lq!e2".into())));
    assert_eq!(ui.password, "x9$Lq!e2");
    assert!(ui.password_visible);
    assert_eq!(ui.pipeline_generation, 1);
    assert!(ui.analyzing);
}

#[test]
fn breach_intro_drains_then_dispatches_leak_check_once() {
    let (mut ui, _dir) = test_ui();
    let generation = start_run(&mut ui, "hunter2");
    let _ = ui.update(Message::AnalysisFinished(generation, Ok(sample_result(50))));

    let _ = ui.update(Message::BreachTick(generation));
    assert!(!ui.breach_dispatched);
    let _ = ui.update(Message::BreachTick(generation));
    assert!(ui.breach_dispatched);
    assert_eq!(ui.breach.lines().len(), 2);

    // Extra ticks while held must not re-dispatch or advance.
    let _ = ui.update(Message::BreachTick(generation));
    assert_eq!(ui.breach.lines().len(), 2);
}

#[test]
fn leak_check_match_report_is_narrated() {
    let (mut ui, _dir) = test_ui();
    let generation = start_run(&mut ui, "password1");
    let _ = ui.update(Message::AnalysisFinished(generation, Ok(sample_result(15))));
    let _ = ui.update(Message::BreachTick(generation));
    let _ = ui.update(Message::BreachTick(generation));

    let _ = ui.update(Message::LeakCheckFinished(
        generation,
        Ok(vec!["passw0rd".into()]),
    ));
    while ui.breach.next_delay().is_some() {
        let _ = ui.update(Message::BreachTick(generation));
    }

    let lines: Vec<&str> = ui
        .breach
        .lines()
        .iter()
        .map(|(_, text)| text.as_str())
        .collect();
    assert_eq!(lines[2], "MATCH FOUND ⚠️");
    assert_eq!(lines[4], "➜ passw0rd ❌");
}

#[test]
fn leak_check_failure_settles_with_a_failure_line() {
    let (mut ui, _dir) = test_ui();
    let generation = start_run(&mut ui, "hunter2");
    let _ = ui.update(Message::AnalysisFinished(generation, Ok(sample_result(50))));
    let _ = ui.update(Message::BreachTick(generation));
    let _ = ui.update(Message::BreachTick(generation));

    let _ = ui.update(Message::LeakCheckFinished(generation, Err("boom".into())));
    while ui.breach.next_delay().is_some() {
        let _ = ui.update(Message::BreachTick(generation));
    }

    let lines: Vec<&str> = ui
        .breach
        .lines()
        .iter()
        .map(|(_, text)| text.as_str())
        .collect();
    assert_eq!(lines[2], "Breach scan unavailable: boom");
    assert_eq!(lines[3], "Scan aborted.");
    assert!(ui.breach.is_exhausted());
}

#[test]
fn stale_leak_check_result_is_ignored() {
    let (mut ui, _dir) = test_ui();
    let first = start_run(&mut ui, "old-pass");
    let _ = ui.update(Message::AnalysisFinished(first, Ok(sample_result(50))));
    let _ = ui.update(Message::BreachTick(first));
    let _ = ui.update(Message::BreachTick(first));

    let second = start_run(&mut ui, "new-pass");
    let _ = ui.update(Message::AnalysisFinished(second, Ok(sample_result(70))));

    let _ = ui.update(Message::LeakCheckFinished(first, Ok(vec!["leak".into()])));
    assert!(ui.breach.lines().is_empty());
    assert_eq!(ui.breach.generation(), second);
}

#[test]
fn new_run_resets_both_narrations() {
    let (mut ui, _dir) = test_ui();
    let first = start_run(&mut ui, "old-pass");
    let _ = ui.update(Message::AnalysisFinished(first, Ok(sample_result(50))));
    for _ in 0..3 {
        let _ = ui.update(Message::AttackTick(first));
    }
    assert!(ui.attack.lines().len() > 1);

    let second = start_run(&mut ui, "new-pass");
    let _ = ui.update(Message::AnalysisFinished(second, Ok(sample_result(70))));
    assert_eq!(ui.attack.lines().len(), 1);
    assert!(ui.breach.lines().is_empty());

    // Leftover ticks from the first run arrive late and change nothing.
    let _ = ui.update(Message::AttackTick(first));
    assert_eq!(ui.attack.lines().len(), 1);
}

#[test]
fn history_overlay_shows_recent_entries() {
    let (mut ui, _dir) = test_ui();
    for index in 0..7u8 {
        let generation = start_run(&mut ui, &format!("pw{index}"));
        let _ = ui.update(Message::AnalysisFinished(
            generation,
            Ok(sample_result(index * 10)),
        ));
    }

    let _ = ui.update(Message::ToggleHistory);
    assert!(ui.history_open);
    assert_eq!(ui.history_view.len(), HISTORY_VIEW_LIMIT);
    assert_eq!(ui.history_view[0].password, "pw6");

    let _ = ui.update(Message::ToggleHistory);
    assert!(!ui.history_open);
}

//! Time-staggered console narrations for the attack log and breach terminal.
//!
//! A narration owns a queue of delayed lines and a generation number. Ticks
//! arriving with a stale generation mutate nothing, which is the whole
//! cancellation story: starting a new run bumps the generation and the old
//! run's pending timers die quietly on arrival.

use std::collections::VecDeque;
use std::time::Duration;

pub(super) const ATTACK_INTERVAL_MS: u64 = 400;
pub(super) const BREACH_INTERVAL_MS: u64 = 140;
pub(super) const BREACH_LIST_INTERVAL_MS: u64 = 120;

/// Canned guesses tried before the probed password itself.
pub(super) const ATTACK_WORDLIST: [&str; 5] =
    ["123456", "password", "admin123", "qwerty", "letmein"];

/// Visual severity of one narrated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SimLevel {
    Info,
    Probe,
    Match,
    Safe,
    Failure,
}

/// One console line and the pause that precedes it. Zero-delay lines ride
/// the tick of the line before them.
#[derive(Debug, Clone)]
pub(super) struct TimedLine {
    pub(super) delay: Duration,
    pub(super) level: SimLevel,
    pub(super) text: String,
}

impl TimedLine {
    fn new(delay_ms: u64, level: SimLevel, text: impl Into<String>) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            level,
            text: text.into(),
        }
    }

    fn immediate(level: SimLevel, text: impl Into<String>) -> Self {
        Self::new(0, level, text)
    }
}

/// Script for the simulated brute-force attack. Entirely local; the final
/// verdict lands on the same tick as the last attempt.
pub(super) fn attack_script(password: &str) -> Vec<TimedLine> {
    let mut lines = vec![TimedLine::immediate(
        SimLevel::Info,
        "Simulating brute-force attack...",
    )];
    for guess in ATTACK_WORDLIST {
        lines.push(TimedLine::new(
            ATTACK_INTERVAL_MS,
            SimLevel::Probe,
            format!("{guess} ❌"),
        ));
    }
    lines.push(TimedLine::new(
        ATTACK_INTERVAL_MS,
        SimLevel::Probe,
        format!("{password} ❌"),
    ));
    lines.push(TimedLine::immediate(SimLevel::Safe, "(Not cracked)"));
    lines
}

/// Breach-terminal opening, narrated before the leak-check round trip.
pub(super) fn breach_intro() -> Vec<TimedLine> {
    vec![
        TimedLine::new(
            BREACH_INTERVAL_MS,
            SimLevel::Info,
            "Initializing breach database scan...",
        ),
        TimedLine::new(
            BREACH_INTERVAL_MS,
            SimLevel::Info,
            "Checking in breached passwords...",
        ),
    ]
}

/// Breach-terminal conclusion once the leak-check answer is in.
pub(super) fn breach_report(similar: &[String]) -> Vec<TimedLine> {
    if similar.is_empty() {
        return vec![
            TimedLine::new(
                BREACH_INTERVAL_MS,
                SimLevel::Safe,
                "No direct match in breach dataset ✅",
            ),
            TimedLine::new(
                BREACH_INTERVAL_MS,
                SimLevel::Info,
                "Running brute-force estimation...",
            ),
            TimedLine::new(
                BREACH_INTERVAL_MS,
                SimLevel::Safe,
                "This password would take YEARS to crack 🔒",
            ),
        ];
    }

    let mut lines = vec![
        TimedLine::new(BREACH_INTERVAL_MS, SimLevel::Match, "MATCH FOUND ⚠️"),
        TimedLine::new(
            BREACH_INTERVAL_MS,
            SimLevel::Info,
            "Similar leaked passwords detected:",
        ),
    ];
    for entry in similar {
        lines.push(TimedLine::new(
            BREACH_LIST_INTERVAL_MS,
            SimLevel::Probe,
            format!("➜ {entry} ❌"),
        ));
    }
    lines.push(TimedLine::new(
        BREACH_INTERVAL_MS,
        SimLevel::Match,
        "Pattern-based password — cracked instantly ❌",
    ));
    lines
}

/// Conclusion when the leak check itself fails. The narration settles with
/// an explicit failure line rather than stalling silently.
pub(super) fn breach_failure(error: &str) -> Vec<TimedLine> {
    vec![
        TimedLine::new(
            BREACH_INTERVAL_MS,
            SimLevel::Failure,
            format!("Breach scan unavailable: {error}"),
        ),
        TimedLine::immediate(SimLevel::Info, "Scan aborted."),
    ]
}

/// Driver for one narrated console region.
#[derive(Debug, Default)]
pub(super) struct Narration {
    generation: u64,
    queue: VecDeque<TimedLine>,
    lines: Vec<(SimLevel, String)>,
    waiting: bool,
}

impl Narration {
    /// Start a fresh narration under `generation`, clearing the region.
    /// Leading zero-delay lines appear immediately; the returned duration,
    /// if any, is the pause before the next tick.
    pub(super) fn begin(&mut self, generation: u64, script: Vec<TimedLine>) -> Option<Duration> {
        self.generation = generation;
        self.queue = script.into();
        self.lines.clear();
        self.waiting = false;
        self.emit_ready();
        self.next_delay()
    }

    /// Deliver one tick. Stale generations and held narrations are no-ops.
    pub(super) fn tick(&mut self, generation: u64) -> Option<Duration> {
        if generation != self.generation || self.waiting {
            return None;
        }
        if let Some(line) = self.queue.pop_front() {
            self.lines.push((line.level, line.text));
        }
        self.emit_ready();
        self.next_delay()
    }

    /// Pause after the queue drains, keeping the generation live while an
    /// external result is awaited.
    pub(super) fn hold(&mut self, generation: u64) {
        if generation == self.generation {
            self.waiting = true;
        }
    }

    /// Continue a held narration with a follow-up script.
    pub(super) fn resume(&mut self, generation: u64, script: Vec<TimedLine>) -> Option<Duration> {
        if generation != self.generation {
            return None;
        }
        self.waiting = false;
        self.queue.extend(script);
        self.emit_ready();
        self.next_delay()
    }

    pub(super) fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn lines(&self) -> &[(SimLevel, String)] {
        &self.lines
    }

    pub(super) fn is_exhausted(&self) -> bool {
        self.queue.is_empty() && !self.waiting
    }

    /// Pause before the next queued line, if any.
    pub(super) fn next_delay(&self) -> Option<Duration> {
        if self.waiting {
            return None;
        }
        self.queue.front().map(|line| line.delay)
    }

    fn emit_ready(&mut self) {
        while matches!(self.queue.front(), Some(line) if line.delay.is_zero()) {
            if let Some(line) = self.queue.pop_front() {
                self.lines.push((line.level, line.text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(narration: &Narration) -> Vec<&str> {
        narration
            .lines()
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
    }

    fn drive_to_end(narration: &mut Narration, generation: u64) {
        while narration.next_delay().is_some() {
            narration.tick(generation);
        }
    }

    #[test]
    fn attack_seed_line_appears_immediately() {
        let mut narration = Narration::default();
        let delay = narration.begin(1, attack_script("hunter2"));
        assert_eq!(texts(&narration), vec!["Simulating brute-force attack..."]);
        assert_eq!(delay, Some(Duration::from_millis(ATTACK_INTERVAL_MS)));
    }

    #[test]
    fn attack_verdict_rides_the_final_attempt_tick() {
        let mut narration = Narration::default();
        narration.begin(1, attack_script("hunter2"));
        for _ in 0..5 {
            narration.tick(1);
        }
        assert!(!texts(&narration).contains(&"(Not cracked)"));

        // Sixth tick delivers the probed password and the verdict together.
        let next = narration.tick(1);
        let lines = texts(&narration);
        assert_eq!(lines[lines.len() - 2], "hunter2 ❌");
        assert_eq!(lines[lines.len() - 1], "(Not cracked)");
        assert_eq!(next, None);
        assert!(narration.is_exhausted());
    }

    #[test]
    fn attack_sequence_is_wordlist_then_password() {
        let mut narration = Narration::default();
        narration.begin(7, attack_script("s3cret!"));
        drive_to_end(&mut narration, 7);
        assert_eq!(
            texts(&narration),
            vec![
                "Simulating brute-force attack...",
                "123456 ❌",
                "password ❌",
                "admin123 ❌",
                "qwerty ❌",
                "letmein ❌",
                "s3cret! ❌",
                "(Not cracked)",
            ]
        );
    }

    #[test]
    fn stale_generation_ticks_mutate_nothing() {
        let mut narration = Narration::default();
        narration.begin(1, attack_script("old"));
        narration.tick(1);
        let before = narration.lines().len();

        narration.begin(2, attack_script("new"));
        assert_eq!(narration.tick(1), None);
        assert_eq!(narration.lines().len(), 1);
        assert_ne!(narration.lines().len(), before + 1);
        assert_eq!(narration.generation(), 2);
    }

    #[test]
    fn begin_clears_previous_lines() {
        let mut narration = Narration::default();
        narration.begin(1, attack_script("first"));
        drive_to_end(&mut narration, 1);
        assert_eq!(narration.lines().len(), 8);

        narration.begin(2, attack_script("second"));
        assert_eq!(texts(&narration), vec!["Simulating brute-force attack..."]);
    }

    #[test]
    fn breach_intro_then_hold_then_match_report() {
        let mut narration = Narration::default();
        let delay = narration.begin(3, breach_intro());
        assert_eq!(delay, Some(Duration::from_millis(BREACH_INTERVAL_MS)));
        assert!(narration.lines().is_empty());

        narration.tick(3);
        narration.tick(3);
        assert_eq!(
            texts(&narration),
            vec![
                "Initializing breach database scan...",
                "Checking in breached passwords...",
            ]
        );
        assert_eq!(narration.next_delay(), None);

        narration.hold(3);
        assert!(!narration.is_exhausted());
        assert_eq!(narration.tick(3), None);

        let similar = vec!["passw0rd".to_string(), "password1".to_string()];
        let delay = narration.resume(3, breach_report(&similar));
        assert_eq!(delay, Some(Duration::from_millis(BREACH_INTERVAL_MS)));
        drive_to_end(&mut narration, 3);

        let lines = texts(&narration);
        assert_eq!(lines[2], "MATCH FOUND ⚠️");
        assert_eq!(lines[3], "Similar leaked passwords detected:");
        assert_eq!(lines[4], "➜ passw0rd ❌");
        assert_eq!(lines[5], "➜ password1 ❌");
        assert_eq!(lines[6], "Pattern-based password — cracked instantly ❌");
        assert!(narration.is_exhausted());
    }

    #[test]
    fn breach_empty_result_reports_safe() {
        let mut narration = Narration::default();
        narration.begin(4, breach_intro());
        drive_to_end(&mut narration, 4);
        narration.hold(4);
        narration.resume(4, breach_report(&[]));
        drive_to_end(&mut narration, 4);

        let lines = texts(&narration);
        assert_eq!(lines[2], "No direct match in breach dataset ✅");
        assert_eq!(lines[3], "Running brute-force estimation...");
        assert_eq!(lines[4], "This password would take YEARS to crack 🔒");
    }

    #[test]
    fn breach_failure_settles_instead_of_stalling() {
        let mut narration = Narration::default();
        narration.begin(5, breach_intro());
        drive_to_end(&mut narration, 5);
        narration.hold(5);

        narration.resume(5, breach_failure("network error: connection refused"));
        drive_to_end(&mut narration, 5);
        let lines = texts(&narration);
        assert_eq!(
            lines[2],
            "Breach scan unavailable: network error: connection refused"
        );
        assert_eq!(lines[3], "Scan aborted.");
        assert!(narration.is_exhausted());
    }

    #[test]
    fn resume_with_stale_generation_is_ignored() {
        let mut narration = Narration::default();
        narration.begin(1, breach_intro());
        drive_to_end(&mut narration, 1);
        narration.hold(1);

        narration.begin(2, breach_intro());
        assert_eq!(narration.resume(1, breach_report(&[])), None);
        assert!(narration.lines().is_empty());
    }

    #[test]
    fn breach_list_entries_use_the_faster_cadence() {
        let similar = vec!["abc".to_string()];
        let script = breach_report(&similar);
        assert_eq!(
            script[2].delay,
            Duration::from_millis(BREACH_LIST_INTERVAL_MS)
        );
        assert_eq!(script[0].delay, Duration::from_millis(BREACH_INTERVAL_MS));
    }
}

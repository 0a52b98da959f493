//! Analysis snapshot model and the pure presentation math derived from it.

use serde::{Deserialize, Serialize};

/// Axis labels for the breakdown radar, in draw order.
pub const RADAR_LABELS: [&str; 4] = ["Length", "Symbols", "Entropy", "Uniqueness"];

/// Ceiling shared by every radar axis.
pub const RADAR_MAX: f32 = 5.0;

/// Punctuation set the heatmap highlights as symbols.
const HEAT_SYMBOLS: &str = "!@#$%^&*";

/// Four-axis categorical score backing the radar chart.
///
/// Entropy and uniqueness arrive from the service already normalised to
/// `0..=5`; length and symbols are raw counts that [`radar_axes`] rescales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub length: f32,
    pub symbols: f32,
    pub entropy: f32,
    pub uniqueness: f32,
}

/// Immutable result of one `/analyze` exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub crack_time: String,
    pub breach: String,
    #[serde(default)]
    pub feedback: Vec<String>,
    pub breakdown: Breakdown,
}

/// Qualitative strength bucket for the meter. Exactly one applies per score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthClass {
    Weak,
    Medium,
    Strong,
}

impl StrengthClass {
    pub fn for_score(score: u8) -> Self {
        if score < 40 {
            StrengthClass::Weak
        } else if score < 70 {
            StrengthClass::Medium
        } else {
            StrengthClass::Strong
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthClass::Weak => "WEAK",
            StrengthClass::Medium => "MEDIUM",
            StrengthClass::Strong => "STRONG",
        }
    }
}

/// Normalised radar axis values in [`RADAR_LABELS`] order, clamped to
/// `0..=RADAR_MAX`. Length counts saturate at 5 characters, symbol counts at
/// 2; entropy and uniqueness pass through.
pub fn radar_axes(breakdown: &Breakdown) -> [f32; 4] {
    let length = (breakdown.length / 5.0 * RADAR_MAX).clamp(0.0, RADAR_MAX);
    let symbols = (breakdown.symbols / 2.0 * RADAR_MAX).clamp(0.0, RADAR_MAX);
    [
        length,
        symbols,
        breakdown.entropy.clamp(0.0, RADAR_MAX),
        breakdown.uniqueness.clamp(0.0, RADAR_MAX),
    ]
}

/// Visual risk bucket for a single password character.
///
/// Purely presentational; never treat this as a security classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatClass {
    Digit,
    Symbol,
    Uppercase,
    Other,
}

impl HeatClass {
    /// Classify one character. Fixed precedence, first match wins:
    /// digit, then symbol, then ASCII uppercase, then everything else.
    /// Independent of the character's position in the password.
    pub fn of(ch: char) -> Self {
        if ch.is_ascii_digit() {
            HeatClass::Digit
        } else if HEAT_SYMBOLS.contains(ch) {
            HeatClass::Symbol
        } else if ch.is_ascii_uppercase() {
            HeatClass::Uppercase
        } else {
            HeatClass::Other
        }
    }
}

//! Scoring engine: base credits, combo and speed bonuses, penalties,
//! end-of-run bonuses, grading, and the immutable score history.
//!
//! Timing-sensitive logic (combo window, speed-bonus window) works on
//! millisecond timestamps passed in by the caller, so the engine feeds it
//! simulation time and tests feed it literal values.

use reverie_core::constants::*;
use reverie_core::enums::{Grade, ScoreReason};
use reverie_core::events::{BonusDetail, GameEvent, ScoreEvent};
use reverie_core::state::{DetailedStats, FinalScoreView, GameState, ScoreReport};

/// Running aggregates derived incrementally from score events.
#[derive(Debug, Clone)]
pub struct ScoringStats {
    pub fragments_collected: u32,
    pub times_caught: u32,
    /// Shortest interval between consecutive pickups. None until the
    /// second pickup.
    pub fastest_collection_ms: Option<u64>,
    pub total_collection_ms: u64,
    pub average_collection_ms: f64,
    /// True until the first capture penalty.
    pub perfect_run: bool,
}

impl Default for ScoringStats {
    fn default() -> Self {
        Self {
            fragments_collected: 0,
            times_caught: 0,
            fastest_collection_ms: None,
            total_collection_ms: 0,
            average_collection_ms: 0.0,
            perfect_run: true,
        }
    }
}

/// Consumes fragment-collection and penalty events, computes bonuses, and
/// keeps the append-only score history. All credits flow into `GameState`
/// through its methods, never by direct field writes.
#[derive(Debug)]
pub struct ScoringSystem {
    history: Vec<ScoreEvent>,
    multiplier: f64,
    combo_count: u32,
    last_score_time_ms: u64,
    last_fragment_time_ms: u64,
    collection_intervals_ms: Vec<u64>,
    stats: ScoringStats,
}

impl ScoringSystem {
    /// `now_ms` seeds the fragment-interval clock; pass the current
    /// scoring-clock reading at construction.
    pub fn new(now_ms: u64) -> Self {
        Self {
            history: Vec::new(),
            multiplier: 1.0,
            combo_count: 0,
            last_score_time_ms: 0,
            last_fragment_time_ms: now_ms,
            collection_intervals_ms: Vec::new(),
            stats: ScoringStats::default(),
        }
    }

    /// Credit `base_points` for `reason`, applying the multiplier and —
    /// for fragment pickups — the speed and combo bonuses in the
    /// documented order. Returns the points actually credited.
    ///
    /// The combo bonus uses the streak value in force before this pickup
    /// extends it, so a streak pays out from its third pickup onward.
    pub fn add_score(
        &mut self,
        state: &mut GameState,
        base_points: i64,
        reason: ScoreReason,
        apply_bonuses: bool,
        now_ms: u64,
    ) -> i64 {
        let mut total = base_points as f64 * self.multiplier;
        let mut bonus_details = Vec::new();

        if apply_bonuses && reason == ScoreReason::DreamFragment {
            let prior_fragments = self.stats.fragments_collected;
            let prior_combo = self.combo_count;
            self.handle_fragment_collection(now_ms);

            let since_last = now_ms.saturating_sub(self.last_fragment_time_ms);
            if since_last < SPEED_BONUS_WINDOW_MS && prior_fragments > 0 {
                let speed_bonus = (SPEED_BONUS as f64
                    * (SPEED_BONUS_WINDOW_MS - since_last) as f64
                    / SPEED_BONUS_WINDOW_MS as f64)
                    .max(0.0);
                total += speed_bonus;
                bonus_details.push(BonusDetail::Speed {
                    points: speed_bonus.round() as i64,
                });
            }

            if prior_combo > 1 {
                let combo_bonus = COMBO_BONUS * (prior_combo as i64 - 1);
                total += combo_bonus as f64;
                bonus_details.push(BonusDetail::Combo {
                    combo: prior_combo,
                    points: combo_bonus,
                });
            }

            self.last_fragment_time_ms = now_ms;
        }

        let total = total.round() as i64;
        let event = ScoreEvent {
            points: total,
            base_points,
            reason,
            bonus_details,
            timestamp_ms: now_ms,
            multiplier: self.multiplier,
            combo: self.combo_count,
        };
        self.history.push(event.clone());
        state.add_score(total, reason);
        self.last_score_time_ms = now_ms;
        state.trigger_event(&GameEvent::ScoreAdded { event });
        total
    }

    /// Update the streak counter and collection-interval aggregates for
    /// one fragment pickup.
    fn handle_fragment_collection(&mut self, now_ms: u64) {
        self.stats.fragments_collected += 1;

        if now_ms.saturating_sub(self.last_score_time_ms) < COMBO_WINDOW_MS {
            self.combo_count += 1;
        } else {
            self.combo_count = 1;
        }

        if self.stats.fragments_collected > 1 {
            let interval = now_ms.saturating_sub(self.last_fragment_time_ms);
            self.collection_intervals_ms.push(interval);
            self.stats.total_collection_ms += interval;
            self.stats.fastest_collection_ms = Some(
                self.stats
                    .fastest_collection_ms
                    .map_or(interval, |best| best.min(interval)),
            );
            self.stats.average_collection_ms =
                self.stats.total_collection_ms as f64 / self.collection_intervals_ms.len() as f64;
        }
    }

    /// Charge a penalty, clamped at a score floor of zero. A capture
    /// reason breaks the combo and forfeits the perfect run. Returns the
    /// points actually charged.
    pub fn subtract_score(
        &mut self,
        state: &mut GameState,
        points: i64,
        reason: ScoreReason,
        now_ms: u64,
    ) -> i64 {
        let penalty = points.abs();
        state.subtract_score(penalty, reason);

        let event = ScoreEvent {
            points: -penalty,
            base_points: -penalty,
            reason,
            bonus_details: Vec::new(),
            timestamp_ms: now_ms,
            multiplier: self.multiplier,
            combo: self.combo_count,
        };
        self.history.push(event.clone());
        state.trigger_event(&GameEvent::ScoreSubtracted { event });

        if reason.is_capture() {
            self.stats.times_caught += 1;
            self.stats.perfect_run = false;
            self.combo_count = 0;
        }
        penalty
    }

    // --- End-of-run bonuses ---

    pub fn calculate_time_bonus(&self, state: &GameState) -> i64 {
        (state.time_left() * TIME_BONUS_MULTIPLIER as f64).round() as i64
    }

    pub fn calculate_perfect_run_bonus(&self) -> i64 {
        if self.stats.perfect_run && self.stats.times_caught == 0 {
            PERFECT_RUN_BONUS
        } else {
            0
        }
    }

    /// Base score plus time and perfect-run bonuses, as a breakdown.
    pub fn final_score(&self, state: &GameState) -> FinalScoreView {
        let base_score = state.score();
        let time_bonus = self.calculate_time_bonus(state);
        let perfect_run_bonus = self.calculate_perfect_run_bonus();
        FinalScoreView {
            final_score: base_score + time_bonus + perfect_run_bonus,
            base_score,
            time_bonus,
            perfect_run_bonus,
            fragments_collected: self.stats.fragments_collected,
            times_caught: self.stats.times_caught,
        }
    }

    /// Grade band over the maximum achievable score.
    pub fn performance_grade(&self, state: &GameState) -> Grade {
        let max_possible = state.total_fragments() as i64 * FRAGMENT_VALUE
            + START_TIME_SECS as i64 * TIME_BONUS_MULTIPLIER
            + PERFECT_RUN_BONUS;
        let percentage = self.final_score(state).final_score as f64 / max_possible as f64 * 100.0;

        if percentage >= 90.0 {
            Grade::S
        } else if percentage >= 80.0 {
            Grade::A
        } else if percentage >= 70.0 {
            Grade::B
        } else if percentage >= 60.0 {
            Grade::C
        } else if percentage >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// Everything the end screen shows.
    pub fn detailed_stats(&self, state: &GameState) -> DetailedStats {
        let grade = self.performance_grade(state);
        DetailedStats {
            breakdown: self.final_score(state),
            grade,
            grade_description: grade.description().to_string(),
            average_fragment_secs: self.stats.average_collection_ms / 1000.0,
            fastest_fragment_secs: self.stats.fastest_collection_ms.map(|ms| ms as f64 / 1000.0),
            max_combo: self.history.iter().map(|e| e.combo).max().unwrap_or(0),
            total_score_events: self.history.len(),
            efficiency_pct: self.stats.fragments_collected as f64
                / state.total_fragments() as f64
                * 100.0,
        }
    }

    /// Exportable record of the run.
    pub fn score_report(&self, state: &GameState) -> ScoreReport {
        ScoreReport {
            history: self.history.clone(),
            fragments_collected: self.stats.fragments_collected,
            times_caught: self.stats.times_caught,
            perfect_run: self.stats.perfect_run,
            final_score: state.score(),
            time_left: state.time_left(),
            game_won: state.is_won(),
        }
    }

    // --- Queries ---

    pub fn history(&self) -> &[ScoreEvent] {
        &self.history
    }

    pub fn stats(&self) -> &ScoringStats {
        &self.stats
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Restore all scoring state for a fresh run.
    pub fn reset(&mut self, now_ms: u64) {
        self.history.clear();
        self.multiplier = 1.0;
        self.combo_count = 0;
        self.last_score_time_ms = 0;
        self.last_fragment_time_ms = now_ms;
        self.collection_intervals_ms.clear();
        self.stats = ScoringStats::default();
    }
}

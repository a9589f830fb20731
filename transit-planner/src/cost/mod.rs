//! Multi-modal costing model.
//!
//! Converts raw distances into durations and fares, in two layers:
//!
//! 1. **Road-network inflation** — a great-circle distance understates real
//!    travel distance because it ignores street topology, so a per-mode
//!    multiplier converts it into an estimated route distance. Bus-leg
//!    distances are already along-route and are not inflated.
//! 2. **Speed model** — corrected distance over a per-mode average speed,
//!    with a time-of-day multiplier on motorized durations to approximate
//!    peak-hour congestion.
//!
//! Every function here is pure: the same inputs (including the departure
//! time) always produce the same outputs. All constants are heuristic and
//! live in [`CostConfig`] rather than being hard-coded at call sites.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A mode of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// On foot.
    Walking,
    /// Bicycle. Costed for duration only; the planner never assigns it.
    Cycling,
    /// Cycle rickshaw.
    Rickshaw,
    /// Motorbike taxi.
    MotorbikeTaxi,
    /// Bus, along a fixed route.
    Bus,
}

impl Mode {
    /// Returns true for motorized road travel subject to congestion.
    pub fn is_motorized(self) -> bool {
        matches!(self, Mode::Rickshaw | Mode::MotorbikeTaxi | Mode::Bus)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Walking => "walking",
            Mode::Cycling => "cycling",
            Mode::Rickshaw => "rickshaw",
            Mode::MotorbikeTaxi => "motorbike-taxi",
            Mode::Bus => "bus",
        };
        f.write_str(s)
    }
}

/// Where a distance figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceSource {
    /// An external road-routing service supplied real path geometry.
    RoadRouter,
    /// Great-circle distance corrected by the road-network inflation factor.
    CorrectedGreatCircle,
}

/// A costed leg: distance, duration, and (for hired modes) a fare.
///
/// Value object, recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    /// Estimated route distance, metres.
    pub distance_m: f64,
    /// Estimated duration, minutes.
    pub duration_mins: f64,
    /// Fare in currency units; `None` for un-hired modes.
    pub fare: Option<f64>,
    /// Travel mode.
    pub mode: Mode,
    /// Provenance of the distance figure.
    pub source: DistanceSource,
}

impl CostEstimate {
    /// Wraps figures obtained from an authoritative road-routing service.
    pub fn from_road_router(
        distance_m: f64,
        duration_mins: f64,
        fare: Option<f64>,
        mode: Mode,
    ) -> Self {
        Self {
            distance_m,
            duration_mins,
            fare,
            mode,
            source: DistanceSource::RoadRouter,
        }
    }
}

/// Piecewise fare: a flagfall plus a per-kilometre rate, floored at a
/// minimum for very short trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareTable {
    /// Fixed starting amount.
    pub flagfall: f64,
    /// Rate per kilometre of corrected distance.
    pub per_km: f64,
    /// Minimum charge.
    pub minimum: f64,
}

impl FareTable {
    /// Fare for a corrected distance in metres.
    pub fn fare(&self, corrected_m: f64) -> f64 {
        (self.flagfall + self.per_km * corrected_m / 1_000.0).max(self.minimum)
    }
}

/// Time-of-day congestion profile for motorized modes.
///
/// The multiplier applies to duration only, never to distance.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficProfile {
    /// Half-open peak hour windows `[start, end)` on the 24-hour clock.
    pub peak_hours: Vec<(u32, u32)>,
    /// Duration multiplier during peak windows.
    pub peak_factor: f64,
}

impl TrafficProfile {
    /// Multiplier for the given departure time.
    pub fn factor_at(&self, departure: NaiveDateTime) -> f64 {
        let hour = departure.hour();
        let peak = self
            .peak_hours
            .iter()
            .any(|&(start, end)| hour >= start && hour < end);
        if peak { self.peak_factor } else { 1.0 }
    }
}

impl Default for TrafficProfile {
    fn default() -> Self {
        Self {
            // Morning and evening rush.
            peak_hours: vec![(8, 10), (17, 20)],
            peak_factor: 1.5,
        }
    }
}

/// Advisory last-mile thresholds: distances up to each bound suggest the
/// corresponding mode. UI hints, not hard constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionThresholds {
    /// Up to this distance, walk.
    pub walk_max_m: f64,
    /// Up to this distance, take a rickshaw.
    pub rickshaw_max_m: f64,
    /// Up to this distance, take a motorbike taxi.
    pub motorbike_max_m: f64,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            walk_max_m: 500.0,
            rickshaw_max_m: 2_000.0,
            motorbike_max_m: 5_000.0,
        }
    }
}

/// Tunable parameters of the costing model.
///
/// The inflation factors and speeds are hand-tuned heuristics, not
/// measurements; treat them as configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CostConfig {
    /// Inflation factor for walking distances.
    pub walking_inflation: f64,
    /// Inflation factor for cycling distances.
    pub cycling_inflation: f64,
    /// Inflation factor for motorized road distances.
    pub road_inflation: f64,

    /// Average walking speed, km/h.
    pub walking_kmh: f64,
    /// Average cycling speed, km/h.
    pub cycling_kmh: f64,
    /// Average rickshaw speed, km/h.
    pub rickshaw_kmh: f64,
    /// Average motorbike-taxi speed, km/h.
    pub motorbike_kmh: f64,
    /// Average bus speed on dense urban corridors, km/h.
    pub bus_kmh: f64,

    /// Congestion profile applied to motorized durations.
    pub traffic: TrafficProfile,
    /// Fixed interchange wait added to a bus leg that requires a transfer,
    /// minutes.
    pub transfer_penalty_mins: f64,

    /// Flat fare for a bus leg.
    pub bus_base_fare: f64,
    /// Rickshaw fare table.
    pub rickshaw_fares: FareTable,
    /// Motorbike-taxi fare table.
    pub motorbike_fares: FareTable,

    /// Last-mile mode suggestion thresholds.
    pub suggestion: SuggestionThresholds,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            walking_inflation: 1.3,
            cycling_inflation: 1.2,
            road_inflation: 1.4,
            walking_kmh: 5.0,
            cycling_kmh: 12.0,
            rickshaw_kmh: 18.0,
            motorbike_kmh: 25.0,
            bus_kmh: 30.0,
            traffic: TrafficProfile::default(),
            transfer_penalty_mins: 10.0,
            bus_base_fare: 25.0,
            rickshaw_fares: FareTable {
                flagfall: 30.0,
                per_km: 12.0,
                minimum: 30.0,
            },
            motorbike_fares: FareTable {
                flagfall: 40.0,
                per_km: 15.0,
                minimum: 50.0,
            },
            suggestion: SuggestionThresholds::default(),
        }
    }
}

/// The one source of truth for distance, duration, and fare estimation.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    config: CostConfig,
}

impl CostModel {
    /// Creates a model with the given configuration.
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Converts a straight-line distance into an estimated route distance
    /// by applying the mode's road-network inflation factor.
    ///
    /// Bus distances are computed along the route and pass through
    /// unchanged.
    pub fn corrected_distance(&self, distance_m: f64, mode: Mode) -> f64 {
        let factor = match mode {
            Mode::Walking => self.config.walking_inflation,
            Mode::Cycling => self.config.cycling_inflation,
            Mode::Rickshaw | Mode::MotorbikeTaxi => self.config.road_inflation,
            Mode::Bus => 1.0,
        };
        distance_m * factor
    }

    /// Estimated duration in minutes for travelling `distance_m`
    /// (straight-line for non-bus modes, along-route for bus) departing at
    /// the given time.
    pub fn estimate_duration(
        &self,
        distance_m: f64,
        mode: Mode,
        departure: NaiveDateTime,
    ) -> f64 {
        let corrected = self.corrected_distance(distance_m, mode);
        let base_mins = corrected / 1_000.0 / self.speed_kmh(mode) * 60.0;
        if mode.is_motorized() {
            base_mins * self.config.traffic.factor_at(departure)
        } else {
            base_mins
        }
    }

    /// Duration of a bus leg of the given along-route distance, adding the
    /// interchange penalty when the leg involves a transfer.
    pub fn bus_leg_duration(
        &self,
        distance_m: f64,
        departure: NaiveDateTime,
        requires_transfer: bool,
    ) -> f64 {
        let ride = self.estimate_duration(distance_m, Mode::Bus, departure);
        if requires_transfer {
            ride + self.config.transfer_penalty_mins
        } else {
            ride
        }
    }

    /// Estimated fare for a leg, or `None` for un-hired modes.
    pub fn estimate_fare(&self, distance_m: f64, mode: Mode) -> Option<f64> {
        match mode {
            Mode::Walking | Mode::Cycling => None,
            Mode::Bus => Some(self.config.bus_base_fare),
            Mode::Rickshaw => {
                let corrected = self.corrected_distance(distance_m, mode);
                Some(self.config.rickshaw_fares.fare(corrected))
            }
            Mode::MotorbikeTaxi => {
                let corrected = self.corrected_distance(distance_m, mode);
                Some(self.config.motorbike_fares.fare(corrected))
            }
        }
    }

    /// Full cost estimate for a leg, tagged as a locally corrected
    /// great-circle figure.
    pub fn estimate(&self, distance_m: f64, mode: Mode, departure: NaiveDateTime) -> CostEstimate {
        CostEstimate {
            distance_m: self.corrected_distance(distance_m, mode),
            duration_mins: self.estimate_duration(distance_m, mode, departure),
            fare: self.estimate_fare(distance_m, mode),
            mode,
            source: DistanceSource::CorrectedGreatCircle,
        }
    }

    /// Advisory last-mile mode for a straight-line distance.
    pub fn suggest_mode(&self, distance_m: f64) -> Mode {
        let t = &self.config.suggestion;
        if distance_m <= t.walk_max_m {
            Mode::Walking
        } else if distance_m <= t.rickshaw_max_m {
            Mode::Rickshaw
        } else if distance_m <= t.motorbike_max_m {
            Mode::MotorbikeTaxi
        } else {
            Mode::Bus
        }
    }

    fn speed_kmh(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Walking => self.config.walking_kmh,
            Mode::Cycling => self.config.cycling_kmh,
            Mode::Rickshaw => self.config.rickshaw_kmh,
            Mode::MotorbikeTaxi => self.config.motorbike_kmh,
            Mode::Bus => self.config.bus_kmh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    fn model() -> CostModel {
        CostModel::default()
    }

    #[test]
    fn inflation_factors() {
        let m = model();
        assert_eq!(m.corrected_distance(1_000.0, Mode::Walking), 1_300.0);
        assert_eq!(m.corrected_distance(1_000.0, Mode::Cycling), 1_200.0);
        assert_eq!(m.corrected_distance(1_000.0, Mode::Rickshaw), 1_400.0);
        assert_eq!(m.corrected_distance(1_000.0, Mode::MotorbikeTaxi), 1_400.0);
        // Bus distances are already along-route.
        assert_eq!(m.corrected_distance(1_000.0, Mode::Bus), 1_000.0);
    }

    #[test]
    fn walking_duration_off_peak_equals_peak() {
        let m = model();
        let off = m.estimate_duration(1_000.0, Mode::Walking, at(12));
        let peak = m.estimate_duration(1_000.0, Mode::Walking, at(8));
        assert_eq!(off, peak);
        // 1.3 km at 5 km/h = 15.6 minutes.
        assert!((off - 15.6).abs() < 1e-9, "got {off}");
    }

    #[test]
    fn motorized_duration_inflated_at_peak() {
        let m = model();
        let off = m.estimate_duration(5_000.0, Mode::Bus, at(12));
        let morning = m.estimate_duration(5_000.0, Mode::Bus, at(8));
        let evening = m.estimate_duration(5_000.0, Mode::Bus, at(18));

        assert!((morning - off * 1.5).abs() < 1e-9);
        assert!((evening - off * 1.5).abs() < 1e-9);
        // 5 km at 30 km/h = 10 minutes off-peak.
        assert!((off - 10.0).abs() < 1e-9, "got {off}");
    }

    #[test]
    fn peak_window_boundaries() {
        let m = model();
        let profile = &m.config().traffic;
        assert_eq!(profile.factor_at(at(7)), 1.0);
        assert_eq!(profile.factor_at(at(8)), 1.5);
        assert_eq!(profile.factor_at(at(9)), 1.5);
        assert_eq!(profile.factor_at(at(10)), 1.0);
        assert_eq!(profile.factor_at(at(17)), 1.5);
        assert_eq!(profile.factor_at(at(19)), 1.5);
        assert_eq!(profile.factor_at(at(20)), 1.0);
    }

    #[test]
    fn transfer_penalty_added_once() {
        let m = model();
        let direct = m.bus_leg_duration(6_000.0, at(12), false);
        let with_transfer = m.bus_leg_duration(6_000.0, at(12), true);
        assert!((with_transfer - direct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn bus_fare_is_flat() {
        let m = model();
        assert_eq!(m.estimate_fare(1_000.0, Mode::Bus), Some(25.0));
        assert_eq!(m.estimate_fare(20_000.0, Mode::Bus), Some(25.0));
    }

    #[test]
    fn unhired_modes_have_no_fare() {
        let m = model();
        assert_eq!(m.estimate_fare(1_000.0, Mode::Walking), None);
        assert_eq!(m.estimate_fare(1_000.0, Mode::Cycling), None);
    }

    #[test]
    fn rickshaw_and_motorbike_fares_distinct_and_floored() {
        let m = model();

        // 2.5 km rickshaw: corrected 3.5 km -> 30 + 12*3.5 = 72.
        let rickshaw = m.estimate_fare(2_500.0, Mode::Rickshaw).unwrap();
        assert!((rickshaw - 72.0).abs() < 1e-9, "got {rickshaw}");

        // 6 km motorbike: corrected 8.4 km -> 40 + 15*8.4 = 166.
        let motorbike = m.estimate_fare(6_000.0, Mode::MotorbikeTaxi).unwrap();
        assert!((motorbike - 166.0).abs() < 1e-9, "got {motorbike}");

        assert_ne!(rickshaw, motorbike);
        assert!(rickshaw >= m.config().rickshaw_fares.minimum);
        assert!(motorbike >= m.config().motorbike_fares.minimum);
    }

    #[test]
    fn very_short_trips_hit_minimum_fare() {
        let m = model();
        let fare = m.estimate_fare(50.0, Mode::MotorbikeTaxi).unwrap();
        assert_eq!(fare, m.config().motorbike_fares.minimum);
    }

    #[test]
    fn estimate_assembles_all_fields() {
        let m = model();
        let est = m.estimate(2_000.0, Mode::Rickshaw, at(12));

        assert_eq!(est.mode, Mode::Rickshaw);
        assert_eq!(est.source, DistanceSource::CorrectedGreatCircle);
        assert_eq!(est.distance_m, 2_800.0);
        assert!(est.fare.is_some());
        assert!(est.duration_mins > 0.0);
    }

    #[test]
    fn road_router_provenance() {
        let est = CostEstimate::from_road_router(3_120.0, 14.0, Some(60.0), Mode::Rickshaw);
        assert_eq!(est.source, DistanceSource::RoadRouter);
        assert_eq!(est.distance_m, 3_120.0);
    }

    #[test]
    fn mode_suggestion_thresholds() {
        let m = model();
        assert_eq!(m.suggest_mode(300.0), Mode::Walking);
        assert_eq!(m.suggest_mode(500.0), Mode::Walking);
        assert_eq!(m.suggest_mode(1_500.0), Mode::Rickshaw);
        assert_eq!(m.suggest_mode(4_000.0), Mode::MotorbikeTaxi);
        assert_eq!(m.suggest_mode(8_000.0), Mode::Bus);
    }

    #[test]
    fn mode_serde_kebab_case() {
        let json = serde_json::to_string(&Mode::MotorbikeTaxi).unwrap();
        assert_eq!(json, "\"motorbike-taxi\"");
        let mode: Mode = serde_json::from_str("\"rickshaw\"").unwrap();
        assert_eq!(mode, Mode::Rickshaw);
    }
}

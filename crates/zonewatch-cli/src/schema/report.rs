use std::path::PathBuf;

use serde::Serialize;
use zonewatch_analysis::{
    entry_frequency::RoundEntries,
    entry_time::{EntrySample, EntryTime},
};
use zonewatch_core::{ClockTime, Side};
use zonewatch_stats::{density::Bounds, descriptive::DescriptiveStats};

#[derive(Debug, Clone, Serialize)]
pub struct EntryFrequencyReport {
    pub team: String,
    pub side: Side,
    pub rounds_entered: usize,
    pub rounds_total: usize,
    pub frequency: f64,
}

impl EntryFrequencyReport {
    pub fn new(team: &str, side: Side, entries: RoundEntries, frequency: f64) -> Self {
        Self {
            team: team.to_owned(),
            side,
            rounds_entered: entries.entered,
            rounds_total: entries.total,
            frequency,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryTimeReport {
    pub team: String,
    pub side: Side,
    pub area_name: String,
    pub min_players: usize,
    /// `MM:SS`, or the no-data text
    pub average: String,
    pub average_seconds: Option<u32>,
    /// Spread of the per-round first entries
    pub spread: Option<EntryTimeSpread>,
    pub rounds: Vec<EntrySample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntryTimeSpread {
    pub earliest: ClockTime,
    pub latest: ClockTime,
    pub median: ClockTime,
    pub std_dev_seconds: f64,
}

impl EntryTimeSpread {
    fn from_samples(samples: &[EntrySample]) -> Option<Self> {
        let stats = DescriptiveStats::new(
            samples
                .iter()
                .map(|s| f64::from(s.clock_time.as_seconds())),
        )?;
        Some(Self {
            earliest: ClockTime::from_mean_seconds(stats.min)?,
            latest: ClockTime::from_mean_seconds(stats.max)?,
            median: ClockTime::from_mean_seconds(stats.median)?,
            std_dev_seconds: stats.std_dev,
        })
    }
}

impl EntryTimeReport {
    pub fn new(
        team: &str,
        side: Side,
        area_name: &str,
        min_players: usize,
        rounds: Vec<EntrySample>,
    ) -> Self {
        let average = EntryTime::from_samples(&rounds);
        let average_seconds = match average {
            EntryTime::At(time) => Some(time.as_seconds()),
            EntryTime::NoData => None,
        };
        Self {
            team: team.to_owned(),
            side,
            area_name: area_name.to_owned(),
            min_players,
            average: average.to_string(),
            average_seconds,
            spread: EntryTimeSpread::from_samples(&rounds),
            rounds,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapReport {
    pub title: String,
    pub points: usize,
    /// `[x_min, x_max, y_min, y_max]` in projected coordinates
    pub viewport: Option<[f64; 4]>,
    /// Density below which the transparent share of the mass lies
    pub level: Option<f64>,
    pub image: PathBuf,
}

pub fn bounds_array(bounds: Bounds) -> [f64; 4] {
    [bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(round_num: u32, seconds: u32) -> EntrySample {
        EntrySample {
            round_num,
            area_name: "BombsiteB".into(),
            clock_time: ClockTime::from_seconds(seconds),
        }
    }

    #[test]
    fn test_entry_time_report() {
        let report = EntryTimeReport::new(
            "Team2",
            Side::T,
            "BombsiteB",
            2,
            vec![sample(1, 45), sample(2, 30), sample(3, 61)],
        );
        assert_eq!(report.average, "00:45");
        assert_eq!(report.average_seconds, Some(45));
        let spread = report.spread.unwrap();
        assert_eq!(spread.earliest, ClockTime::from_seconds(30));
        assert_eq!(spread.latest, ClockTime::from_seconds(61));
        assert_eq!(spread.median, ClockTime::from_seconds(45));
    }

    #[test]
    fn test_entry_time_report_without_rounds() {
        let report = EntryTimeReport::new("Team2", Side::T, "BombsiteB", 2, vec![]);
        assert_eq!(report.average, "No average time found");
        assert_eq!(report.average_seconds, None);
        assert!(report.spread.is_none());
    }
}

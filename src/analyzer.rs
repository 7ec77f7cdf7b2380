//! Performance analyzer.
//!
//! Consumes a time-ordered series of scored events and summarizes trend,
//! consistency, strong and weak activity areas, and the learner's most
//! active hour. Read-only; callers should pass an internally consistent
//! view so in-flight updates do not leak into a trend computation.

use chrono::Timelike;

use crate::config::AnalyzerParams;
use crate::types::{PerformanceAnalysis, PerformanceSample, Trend};

/// Summarizes `samples`. Empty input returns the documented zero-state
/// rather than an error.
pub fn analyze(params: &AnalyzerParams, samples: &[PerformanceSample]) -> PerformanceAnalysis {
    if samples.is_empty() {
        return PerformanceAnalysis::default();
    }

    let scores: Vec<f64> = samples.iter().map(|s| s.score).collect();
    let average = mean(&scores);

    let recent_start = scores.len().saturating_sub(params.recent_window);
    let recent_average = mean(&scores[recent_start..]);

    let trend = classify_trend(params, &scores);
    let consistency = (100.0 - population_std_dev(&scores)).max(0.0).round() as u32;
    let (strong_areas, weak_areas) = activity_areas(params, samples);
    let most_active_time = most_active_time(samples);

    let analysis = PerformanceAnalysis {
        average_score: round1(average),
        recent_average_score: round1(recent_average),
        trend,
        consistency,
        strong_areas,
        weak_areas,
        most_active_time,
        average_session_length: 0.0,
    };

    tracing::debug!(
        samples = samples.len(),
        trend = analysis.trend.as_str(),
        average = analysis.average_score,
        "performance analysis complete"
    );

    analysis
}

/// Splits the series at floor(n/2); the extra sample of an odd-length
/// series lands in the newer half. Empty halves contribute a mean of 0
/// so a single-sample series never divides by zero.
fn classify_trend(params: &AnalyzerParams, scores: &[f64]) -> Trend {
    let mid = scores.len() / 2;
    let older_avg = mean(&scores[..mid]);
    let newer_avg = mean(&scores[mid..]);

    if newer_avg - older_avg > params.trend_delta {
        Trend::Improving
    } else if older_avg - newer_avg > params.trend_delta {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Groups samples by activity type, in first-seen order, and buckets each
/// group by its mean score. Groups between the weak and strong thresholds
/// get no verdict.
fn activity_areas(
    params: &AnalyzerParams,
    samples: &[PerformanceSample],
) -> (Vec<String>, Vec<String>) {
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    for sample in samples {
        match groups.iter_mut().find(|(name, _, _)| *name == sample.activity_type) {
            Some((_, sum, count)) => {
                *sum += sample.score;
                *count += 1;
            }
            None => groups.push((sample.activity_type.as_str(), sample.score, 1)),
        }
    }

    let mut strong = Vec::new();
    let mut weak = Vec::new();
    for (name, sum, count) in groups {
        let group_mean = sum / count as f64;
        if group_mean >= params.strong_area_min {
            strong.push(name.to_string());
        } else if group_mean < params.weak_area_max {
            weak.push(name.to_string());
        }
    }
    (strong, weak)
}

/// Peak hour-of-day across all sample timestamps, rendered on a 12-hour
/// clock. Ties break to the hour encountered first while building the
/// histogram; kept for behavioral compatibility with existing consumers.
fn most_active_time(samples: &[PerformanceSample]) -> String {
    let mut histogram: Vec<(u32, u32)> = Vec::new();
    for sample in samples {
        let hour = sample.timestamp.hour();
        match histogram.iter_mut().find(|(h, _)| *h == hour) {
            Some((_, count)) => *count += 1,
            None => histogram.push((hour, 1)),
        }
    }

    let mut peak: Option<(u32, u32)> = None;
    for &(hour, count) in &histogram {
        if peak.map_or(true, |(_, best)| count > best) {
            peak = Some((hour, count));
        }
    }

    match peak {
        Some((hour, _)) => format_hour_12(hour),
        None => "N/A".to_string(),
    }
}

fn format_hour_12(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let clock = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{clock}:00 {suffix}")
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

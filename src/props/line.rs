use crate::props::{NormalizedPoint, PropType, Stats};

/// Round a raw line to the half point below it: 83.2 and 83.9 both become
/// 83.5, 84.0 becomes 84.5. Sportsbook lines always end in `.5` so a result
/// can never push.
pub fn snap_line_value(raw: f64) -> f64 {
    raw.floor() + 0.5
}

/// Percentage position of `value` on a track ending at `max`, kept off the
/// very edges so markers stay visible.
pub fn marker_position(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.5;
    }
    (value / max * 100.0).clamp(0.5, 99.5)
}

/// Bounds and step size of the line slider for one prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Marker positions (0-100) on the line track.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackMarkers {
    pub high: f64,
    pub low: f64,
    pub average: f64,
    pub line: f64,
}

impl LineRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn for_prop(prop: PropType) -> Self {
        match prop {
            PropType::PassingYards => Self::new(0.5, 449.5, 5.0),
            PropType::RushingYards | PropType::ReceivingYards => Self::new(0.5, 199.5, 5.0),
            PropType::TotalYards => Self::new(0.5, 499.5, 5.0),
            PropType::PassingTd
            | PropType::RushingTd
            | PropType::ReceivingTd
            | PropType::TotalTd => Self::new(0.5, 5.5, 1.0),
            PropType::Completions => Self::new(0.5, 44.5, 1.0),
            PropType::Attempts => Self::new(0.5, 59.5, 1.0),
            PropType::Receptions => Self::new(0.5, 14.5, 1.0),
            PropType::Targets => Self::new(0.5, 19.5, 1.0),
            PropType::Interceptions => Self::new(0.5, 4.5, 1.0),
            PropType::Sacks => Self::new(0.5, 7.5, 1.0),
            PropType::Unsupported => Self::new(0.5, 99.5, 1.0),
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move the line by `steps` slider notches. The result is in range and
    /// ends in `.5`.
    pub fn adjust(&self, current: f64, steps: i32) -> f64 {
        snap_line_value(self.clamp(current + f64::from(steps) * self.step))
    }

    /// Turn typed input into a valid line. Anything that does not parse to a
    /// finite number lands on the minimum.
    pub fn sanitize(&self, input: &str) -> f64 {
        match input.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => snap_line_value(self.clamp(v)),
            _ => self.min,
        }
    }

    /// Starting line for a freshly added prop: the half point under the mean
    /// of every game with a positive value, across all fetched seasons.
    pub fn default_line(&self, points: &[NormalizedPoint]) -> f64 {
        let played: Vec<f64> = points.iter().map(|p| p.value).filter(|v| *v > 0.0).collect();
        if played.is_empty() {
            return snap_line_value(self.clamp(0.5));
        }
        let mean = played.iter().sum::<f64>() / played.len() as f64;
        snap_line_value(self.clamp(snap_line_value(mean)))
    }

    pub fn markers(&self, stats: &Stats, line: f64) -> TrackMarkers {
        TrackMarkers {
            high: marker_position(stats.high, self.max),
            low: marker_position(stats.low, self.max),
            average: marker_position(stats.average, self.max),
            line: marker_position(line, self.max),
        }
    }
}

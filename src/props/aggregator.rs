use crate::props::PropType;
use nfl_api::GameRecord;

/// One game's value for a single prop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedPoint {
    pub week: u8,
    pub season: u16,
    pub value: f64,
}

/// Pull the prop's value out of every record. Input order is preserved and
/// zero-value games are kept; the calculator decides what counts.
pub fn extract_values(records: &[GameRecord], prop: PropType) -> Vec<NormalizedPoint> {
    records
        .iter()
        .map(|record| NormalizedPoint {
            week: record.week,
            season: record.season,
            value: prop.value_for(record),
        })
        .collect()
}

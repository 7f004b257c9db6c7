use serde::Serialize;

pub const WATTS_PER_KILOWATT: u32 = 1_000;
pub const HOURS_PER_DAY: u32 = 24;
pub const HOURS_PER_YEAR: u32 = 8_760;

/// A temperature carried in both units, exactly as the source reports it.
///
/// The source provides a Celsius and a Fahrenheit column for every
/// temperature; both are copied verbatim and no conversion is performed
/// between them, so any inconsistency in the source survives into the
/// snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TemperaturePair {
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl TemperaturePair {
    pub fn new(celsius: f64, fahrenheit: f64) -> Self {
        Self {
            celsius,
            fahrenheit,
        }
    }
}

pub fn watts_to_kilowatts(watts: f64) -> f64 {
    watts / WATTS_PER_KILOWATT as f64
}

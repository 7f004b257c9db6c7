use crate::core::transform::SystemPerformance;
use serde::Serialize;

/// This module derives the per-building comparison figures between the two
/// candidate systems: the shared geothermal network ("geo") and the
/// standalone air-source heat pump baseline ("air").

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingEfficiency {
    pub geo_efficiency: f64,
    pub air_efficiency: f64,
    pub efficiency_gain_percent: f64,
    /// Positive when the network candidate draws less electricity than the
    /// standalone candidate for the same thermal service.
    pub energy_savings_w: f64,
}

/// Relative COP gain of the network candidate over the baseline, in percent.
///
/// The division is left raw: a zero baseline COP yields ±infinity, or NaN
/// when both COPs are zero. These propagate as ordinary floats; display
/// layers are responsible for guarding them (e.g. rendering "N/A").
pub(crate) fn cop_gain_percent(geo_cop: f64, air_cop: f64) -> f64 {
    (geo_cop - air_cop) / air_cop * 100.
}

pub fn building_efficiency(geo: &SystemPerformance, air: &SystemPerformance) -> BuildingEfficiency {
    BuildingEfficiency {
        geo_efficiency: geo.cop,
        air_efficiency: air.cop,
        efficiency_gain_percent: cop_gain_percent(geo.cop, air.cop),
        energy_savings_w: air.electric_w - geo.electric_w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::*;

    fn performance(cop: f64, electric_w: f64) -> SystemPerformance {
        SystemPerformance { cop, electric_w }
    }

    #[rstest]
    fn test_efficiency_gain_round_trip() {
        let efficiency = building_efficiency(&performance(4.0, 400.), &performance(2.0, 900.));
        assert_relative_eq!(efficiency.efficiency_gain_percent, 100.0);
        assert_relative_eq!(efficiency.geo_efficiency, 4.0);
        assert_relative_eq!(efficiency.air_efficiency, 2.0);
    }

    #[rstest]
    fn test_energy_savings() {
        let efficiency = building_efficiency(&performance(4.5, 400.), &performance(2.8, 1000.));
        assert_relative_eq!(efficiency.energy_savings_w, 600.);
    }

    #[rstest]
    fn test_negative_savings_when_network_draws_more() {
        let efficiency = building_efficiency(&performance(3.0, 700.), &performance(3.2, 650.));
        assert_relative_eq!(efficiency.energy_savings_w, -50.);
    }

    #[rstest]
    fn test_zero_baseline_cop_yields_infinite_gain() {
        let efficiency = building_efficiency(&performance(4.0, 400.), &performance(0., 0.));
        assert!(efficiency.efficiency_gain_percent.is_infinite());
        assert!(efficiency.efficiency_gain_percent.is_sign_positive());
    }

    #[rstest]
    fn test_both_cops_zero_yields_nan_gain() {
        let efficiency = building_efficiency(&performance(0., 0.), &performance(0., 0.));
        assert!(efficiency.efficiency_gain_percent.is_nan());
    }
}

use crate::core::efficiency::cop_gain_percent;
use crate::core::transform::BuildingSnapshot;
use crate::schema::BuildingId;
use indexmap::IndexMap;
use serde::Serialize;

/// System-wide aggregates for one hour, reduced from all of the hour's
/// building snapshots. Recomputed whenever the snapshots are rebuilt and
/// never mutated independently of them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub total_geo_electric: f64,
    pub total_air_electric: f64,
    /// Sum of |load| across buildings, always non-negative.
    pub total_load: f64,
    /// Sum of negative (heating) loads, so itself non-positive.
    pub heating_load: f64,
    /// Sum of positive (cooling) loads.
    pub cooling_load: f64,
    pub total_building_load: f64,
    pub avg_geo_cop: f64,
    pub avg_air_cop: f64,
    pub system_efficiency_gain: f64,
    pub total_energy_savings: f64,
    /// Same value as `total_energy_savings`; kept as a distinct field because
    /// downstream consumers address it by this name.
    pub peak_demand_reduction: f64,
}

/// Pure reduction over the hour's buildings. Order-independent arithmetic;
/// load signs pass through unconverted. The aggregate COP divisions are left
/// raw, so an hour where one candidate draws nothing yields infinity or NaN,
/// matching the per-building policy.
pub fn system_metrics(buildings: &IndexMap<BuildingId, BuildingSnapshot>) -> SystemMetrics {
    let mut total_geo_electric = 0.;
    let mut total_air_electric = 0.;
    let mut total_load = 0.;
    let mut heating_load = 0.;
    let mut cooling_load = 0.;

    for building in buildings.values() {
        total_geo_electric += building.geo.electric_w;
        total_air_electric += building.air.electric_w;
        total_load += building.load_w.abs();
        if building.load_w < 0. {
            heating_load += building.load_w;
        } else if building.load_w > 0. {
            cooling_load += building.load_w;
        }
    }

    let avg_geo_cop = total_load / total_geo_electric;
    let avg_air_cop = total_load / total_air_electric;
    let total_energy_savings = total_air_electric - total_geo_electric;

    SystemMetrics {
        total_geo_electric,
        total_air_electric,
        total_load,
        heating_load,
        cooling_load,
        total_building_load: heating_load + cooling_load,
        avg_geo_cop,
        avg_air_cop,
        system_efficiency_gain: cop_gain_percent(avg_geo_cop, avg_air_cop),
        total_energy_savings,
        peak_demand_reduction: total_energy_savings,
    }
}

use crate::schema::BuildingId;
use serde::Serialize;

/// The static catalogue of physical network assets: the three geothermal
/// borefields. These figures are reference data, not derived from the hourly
/// readings; consumers combine them with per-hour system metrics for
/// scenario arithmetic (utilization vs capacity, incremental asset value).

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub asset_type: &'static str,
    pub capacity_w: f64,
    pub utilization_percent: f64,
    /// Average COP of the borefield's heat exchange.
    pub efficiency_cop: f64,
    pub annual_savings: f64,
    /// Annual savings with the network effect multiplier applied.
    pub network_value: f64,
    pub payback_years: f64,
    pub installation_cost: f64,
    pub maintenance_cost: f64,
    pub ground_temp_f: f64,
}

const GEOTHERMAL_HEAT_EXCHANGER: &str = "Geothermal Heat Exchanger";

/// The borefield catalogue, sorted descending by network value for
/// presentation.
pub fn asset_valuation() -> Vec<AssetRecord> {
    let mut borefields = vec![
        AssetRecord {
            id: "borefield_1",
            name: "Borefield 1",
            asset_type: GEOTHERMAL_HEAT_EXCHANGER,
            capacity_w: 500_000.,
            utilization_percent: 75.,
            efficiency_cop: 4.8,
            annual_savings: 180_000.,
            network_value: 216_000.,
            payback_years: 8.3,
            installation_cost: 1_500_000.,
            maintenance_cost: 25_000.,
            ground_temp_f: 54.,
        },
        AssetRecord {
            id: "borefield_2",
            name: "Borefield 2",
            asset_type: GEOTHERMAL_HEAT_EXCHANGER,
            capacity_w: 750_000.,
            utilization_percent: 82.,
            efficiency_cop: 4.9,
            annual_savings: 275_000.,
            network_value: 330_000.,
            payback_years: 7.8,
            installation_cost: 2_100_000.,
            maintenance_cost: 35_000.,
            ground_temp_f: 55.,
        },
        AssetRecord {
            id: "borefield_3",
            name: "Borefield 3",
            asset_type: GEOTHERMAL_HEAT_EXCHANGER,
            capacity_w: 600_000.,
            utilization_percent: 68.,
            efficiency_cop: 4.7,
            annual_savings: 195_000.,
            network_value: 234_000.,
            payback_years: 9.1,
            installation_cost: 1_800_000.,
            maintenance_cost: 30_000.,
            ground_temp_f: 53.,
        },
    ];
    borefields.sort_by(|a, b| b.network_value.total_cmp(&a.network_value));
    borefields
}

/// Fixed affiliation of each building to the borefield serving it, following
/// the network's flow order. The hourly engine never consumes this; it
/// exists so consumers can group buildings by asset with stable ids.
pub fn borefield_for(building: BuildingId) -> Option<&'static str> {
    match building.index() {
        1..=3 => Some("borefield_1"),
        4..=15 => Some("borefield_2"),
        16..=36 => Some("borefield_3"),
        _ => None,
    }
}

/// Display name of a building in the network directory. Buildings 1-5 are
/// the named civic and commercial sites; 6-36 are the residences Res 1 to
/// Res 31. Anything outside the reference network falls back to a generic
/// label.
pub fn directory_name(building: BuildingId) -> String {
    match building.index() {
        1 => "Fire Dept".to_string(),
        2 => "Gulf".to_string(),
        3 => "Corner Cabinet".to_string(),
        4 => "Public School".to_string(),
        5 => "Housing Dept".to_string(),
        n @ 6..=36 => format!("Res {}", n - 5),
        n => format!("Building {n}"),
    }
}

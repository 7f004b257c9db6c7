use crate::core::aggregate::{system_metrics, SystemMetrics};
use crate::core::efficiency::{building_efficiency, BuildingEfficiency};
use crate::core::units::TemperaturePair;
use crate::errors::DataLoadError;
use crate::ingest::RawRow;
use crate::schema::{
    BuildingId, BuildingSchema, HOUR_COLUMN, OUTDOOR_TEMP_C_COLUMN, OUTDOOR_TEMP_F_COLUMN,
};
use indexmap::IndexMap;
use serde::Serialize;

/// How the transformer treats a per-building field whose cell is absent or
/// non-numeric. The default substitutes `0.0` so one malformed row does not
/// abort the rest of the dataset; strict mode fails the load instead.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MissingFieldPolicy {
    #[default]
    DefaultZero,
    Fail,
}

/// One candidate system's raw figures for one building in one hour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemPerformance {
    pub cop: f64,
    pub electric_w: f64,
}

/// One building's state for one hour. Built fresh per hour and never mutated
/// after construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSnapshot {
    pub inlet_temp: TemperaturePair,
    /// Signed thermal load in watts: negative = heating, positive = cooling.
    /// This sign convention is load-bearing throughout the aggregates.
    pub load_w: f64,
    pub geo: SystemPerformance,
    pub air: SystemPerformance,
    pub efficiency: BuildingEfficiency,
}

/// The complete state of the network for one simulated hour.
///
/// `buildings` holds exactly the roster's members, in roster order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourSnapshot {
    pub hour: u32,
    pub outdoor_temp: TemperaturePair,
    pub buildings: IndexMap<BuildingId, BuildingSnapshot>,
    pub system_metrics: SystemMetrics,
}

/// Builds one hour's snapshot from one raw record. Pure and deterministic:
/// the same record and schema always produce the same snapshot.
pub fn transform_row(
    row: &RawRow,
    schema: &BuildingSchema,
    policy: MissingFieldPolicy,
) -> Result<HourSnapshot, DataLoadError> {
    // The hour is structural: a row whose hour cannot be read has no key in
    // the dataset, so it is an error under either policy.
    let hour = row
        .get(HOUR_COLUMN)
        .ok_or_else(|| DataLoadError::MissingField {
            row: row.position(),
            column: HOUR_COLUMN.to_string(),
        })? as u32;

    // Both temperature columns are copied verbatim; no unit conversion here.
    let outdoor_temp = TemperaturePair::new(
        field(row, OUTDOOR_TEMP_C_COLUMN, policy)?,
        field(row, OUTDOOR_TEMP_F_COLUMN, policy)?,
    );

    let mut buildings = IndexMap::with_capacity(schema.roster().len());
    for id in schema.roster() {
        buildings.insert(*id, building_snapshot(row, *id, policy)?);
    }

    let system_metrics = system_metrics(&buildings);

    Ok(HourSnapshot {
        hour,
        outdoor_temp,
        buildings,
        system_metrics,
    })
}

fn building_snapshot(
    row: &RawRow,
    id: BuildingId,
    policy: MissingFieldPolicy,
) -> Result<BuildingSnapshot, DataLoadError> {
    let value = |suffix: &str| field(row, &id.column(suffix), policy);

    let inlet_temp = TemperaturePair::new(value("inlet_temp_c")?, value("inlet_temp_f")?);
    let load_w = value("load_w")?;
    let geo = SystemPerformance {
        cop: value("geo_cop")?,
        electric_w: value("geo_electric_w")?,
    };
    let air = SystemPerformance {
        cop: value("air_cop")?,
        electric_w: value("air_electric_w")?,
    };

    Ok(BuildingSnapshot {
        inlet_temp,
        load_w,
        geo,
        air,
        efficiency: building_efficiency(&geo, &air),
    })
}

fn field(row: &RawRow, column: &str, policy: MissingFieldPolicy) -> Result<f64, DataLoadError> {
    match row.get(column) {
        Some(value) => Ok(value),
        None => match policy {
            MissingFieldPolicy::DefaultZero => Ok(0.),
            MissingFieldPolicy::Fail => Err(DataLoadError::MissingField {
                row: row.position(),
                column: column.to_string(),
            }),
        },
    }
}

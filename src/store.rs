use crate::core::transform::{transform_row, HourSnapshot, MissingFieldPolicy};
use crate::core::units::HOURS_PER_YEAR;
use crate::errors::DataLoadError;
use crate::ingest::read_raw_table;
use crate::schema::{BuildingId, BuildingSchema};
use serde::Serialize;
use std::io::Read;
use tracing::{debug, info, warn};

/// Configuration for a dataset load.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    pub missing_fields: MissingFieldPolicy,
}

/// The full processed year: one snapshot per source row, in row order.
///
/// A load either succeeds completely or publishes nothing, so a value of
/// this type is always a fully processed dataset; there is no partially
/// loaded state to guard against. Reloading the same source produces an
/// equal value, since nothing accumulates across loads.
#[derive(Clone, Debug, PartialEq)]
pub struct HourlyDataset {
    schema: BuildingSchema,
    hours: Vec<HourSnapshot>,
    /// Whether the `hour` values form the contiguous run 1..=N matching
    /// array position, allowing direct indexing in lookups.
    dense: bool,
}

impl HourlyDataset {
    pub fn load(source: impl Read) -> Result<Self, DataLoadError> {
        Self::load_with_options(source, LoadOptions::default())
    }

    pub fn load_with_options(
        source: impl Read,
        options: LoadOptions,
    ) -> Result<Self, DataLoadError> {
        let table = read_raw_table(source)?;
        let schema = BuildingSchema::discover(table.column_names())?;
        if options.missing_fields == MissingFieldPolicy::Fail {
            schema.validate(table.column_names())?;
        }

        let hours = table
            .rows()
            .map(|row| transform_row(&row, &schema, options.missing_fields))
            .collect::<Result<Vec<_>, _>>()?;

        let dense = hours
            .iter()
            .enumerate()
            .all(|(idx, snapshot)| snapshot.hour == idx as u32 + 1);
        if !dense {
            debug!("hour values are not a contiguous 1..=N run; lookups will search");
        }
        if hours.len() > HOURS_PER_YEAR as usize {
            warn!(
                rows = hours.len(),
                "source holds more rows than hours in a year"
            );
        }
        info!(
            hours = hours.len(),
            buildings = schema.roster().len(),
            "loaded hourly dataset"
        );

        Ok(Self {
            schema,
            hours,
            dense,
        })
    }

    pub fn roster(&self) -> &[BuildingId] {
        self.schema.roster()
    }

    pub fn schema(&self) -> &BuildingSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &HourSnapshot> {
        self.hours.iter()
    }

    /// The snapshot whose `hour` field equals `hour`, or `None` when no such
    /// hour exists. Never fabricates a default snapshot for absent hours.
    pub fn hour(&self, hour: u32) -> Option<&HourSnapshot> {
        if self.dense {
            if hour < 1 {
                return None;
            }
            self.hours.get(hour as usize - 1)
        } else {
            self.hours.iter().find(|snapshot| snapshot.hour == hour)
        }
    }

    /// A lazy projection of every hour's aggregates in dataset order, for
    /// trend charts and report totals. Restartable: each call starts over
    /// from the first hour, independent of any session cursor.
    pub fn time_series(&self) -> impl Iterator<Item = TimeSeriesPoint> + '_ {
        self.hours.iter().map(|snapshot| TimeSeriesPoint {
            hour: snapshot.hour,
            outdoor_temp_c: snapshot.outdoor_temp.celsius,
            geo_total: snapshot.system_metrics.total_geo_electric,
            air_total: snapshot.system_metrics.total_air_electric,
            savings: snapshot.system_metrics.total_energy_savings,
            geo_cop: snapshot.system_metrics.avg_geo_cop,
            air_cop: snapshot.system_metrics.avg_air_cop,
        })
    }

    /// A flattened, presentation-ready view of one hour's buildings, one
    /// entry per roster member in roster order. `None` when the hour is not
    /// in the dataset.
    pub fn building_network(&self, hour: u32) -> Option<Vec<BuildingNetworkEntry>> {
        let snapshot = self.hour(hour)?;
        Some(
            snapshot
                .buildings
                .iter()
                .map(|(id, building)| BuildingNetworkEntry {
                    id: *id,
                    name: format!("Building {}", id.index()),
                    kind: if building.load_w < 0. {
                        BuildingKind::HeatSink
                    } else {
                        BuildingKind::HeatSource
                    },
                    temperature_c: building.inlet_temp.celsius,
                    load_w: building.load_w.abs(),
                    geo_cop: building.geo.cop,
                    air_cop: building.air.cop,
                    energy_savings_w: building.efficiency.energy_savings_w,
                    efficiency_gain_percent: building.efficiency.efficiency_gain_percent,
                })
                .collect(),
        )
    }
}

/// One hour's entry in the system-wide trend projection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub hour: u32,
    pub outdoor_temp_c: f64,
    pub geo_total: f64,
    pub air_total: f64,
    pub savings: f64,
    pub geo_cop: f64,
    pub air_cop: f64,
}

/// How a building participates in the network for a given hour, classified
/// by its load sign: a heating building sinks heat from the loop, a cooling
/// building sources heat into it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    HeatSink,
    HeatSource,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingNetworkEntry {
    pub id: BuildingId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BuildingKind,
    pub temperature_c: f64,
    /// Absolute load in watts; the sign lives in `kind`.
    pub load_w: f64,
    pub geo_cop: f64,
    pub air_cop: f64,
    pub energy_savings_w: f64,
    pub efficiency_gain_percent: f64,
}

/// A caller-owned cursor over one dataset.
///
/// Each consumer holds its own session, so independent views stepping
/// through hours cannot interfere with one another; the dataset itself
/// carries no mutable state.
#[derive(Clone, Debug)]
pub struct Session<'a> {
    dataset: &'a HourlyDataset,
    current_hour: u32,
}

impl<'a> Session<'a> {
    pub fn new(dataset: &'a HourlyDataset) -> Self {
        Self {
            dataset,
            current_hour: 1,
        }
    }

    /// Stores the cursor without range-checking it; a query for an hour
    /// outside the dataset yields `None` rather than failing at set time.
    pub fn set_current_hour(&mut self, hour: u32) {
        self.current_hour = hour;
    }

    pub fn current_hour(&self) -> u32 {
        self.current_hour
    }

    pub fn current_hour_data(&self) -> Option<&'a HourSnapshot> {
        self.dataset.hour(self.current_hour)
    }

    pub fn building_network_data(&self) -> Option<Vec<BuildingNetworkEntry>> {
        self.dataset.building_network(self.current_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const SINGLE_BUILDING_HEADER: &str = "hour,outdoor_air_temp_c,outdoor_air_temp_f,b_1_inlet_temp_c,b_1_inlet_temp_f,b_1_load_w,b_1_geo_cop,b_1_geo_electric_w,b_1_air_cop,b_1_air_electric_w";

    /// Two hours of a single building: heating in hour 1, cooling in hour 2.
    #[fixture]
    fn two_hour_source() -> String {
        format!(
            "{SINGLE_BUILDING_HEADER}\n\
             1,-3.5,25.7,11.8,53.2,-2000,5.0,400,2.2,900\n\
             2,8.0,46.4,13.1,55.6,1500,5.0,300,3.0,500\n"
        )
    }

    #[fixture]
    fn dataset(two_hour_source: String) -> HourlyDataset {
        HourlyDataset::load(two_hour_source.as_bytes()).unwrap()
    }

    #[rstest]
    fn test_lookup_returns_matching_hour(dataset: HourlyDataset) {
        for hour in [1, 2] {
            assert_eq!(dataset.hour(hour).unwrap().hour, hour);
        }
    }

    #[rstest]
    fn test_lookup_is_not_found_outside_range(dataset: HourlyDataset) {
        assert!(dataset.hour(0).is_none());
        assert!(dataset.hour(3).is_none());
    }

    #[rstest]
    fn test_lookup_searches_when_hours_are_sparse() {
        let source = format!(
            "{SINGLE_BUILDING_HEADER}\n\
             1,-3.5,25.7,11.8,53.2,-2000,5.0,400,2.2,900\n\
             5,8.0,46.4,13.1,55.6,1500,5.0,300,3.0,500\n"
        );
        let dataset = HourlyDataset::load(source.as_bytes()).unwrap();
        assert_eq!(dataset.hour(5).unwrap().hour, 5);
        assert!(dataset.hour(2).is_none());
    }

    #[rstest]
    fn test_time_series_reflects_whole_dataset(dataset: HourlyDataset) {
        let series = dataset.time_series().collect::<Vec<_>>();
        assert_eq!(series.len(), 2);

        // single-building dataset: building totals equal system totals
        assert_relative_eq!(series[0].geo_total, 400.);
        assert_relative_eq!(series[0].air_total, 900.);
        assert_relative_eq!(series[0].savings, 500.);
        assert_relative_eq!(series[1].geo_total, 300.);
        assert_relative_eq!(series[1].air_total, 500.);
        assert_relative_eq!(series[1].savings, 200.);

        assert_relative_eq!(series[0].geo_cop, 2000. / 400.);
        assert_relative_eq!(series[1].air_cop, 1500. / 500.);
    }

    #[rstest]
    fn test_time_series_is_restartable(dataset: HourlyDataset) {
        let first = dataset.time_series().collect::<Vec<_>>();
        let second = dataset.time_series().collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_aggregate_consistency_holds_for_every_hour(dataset: HourlyDataset) {
        for snapshot in dataset.snapshots() {
            let metrics = &snapshot.system_metrics;
            assert_relative_eq!(
                metrics.total_building_load,
                metrics.heating_load + metrics.cooling_load
            );
            let absolute_sum: f64 = snapshot
                .buildings
                .values()
                .map(|building| building.load_w.abs())
                .sum();
            assert_relative_eq!(metrics.total_load, absolute_sum);
        }
    }

    #[rstest]
    fn test_reload_is_idempotent(two_hour_source: String) {
        let first = HourlyDataset::load(two_hour_source.as_bytes()).unwrap();
        let second = HourlyDataset::load(two_hour_source.as_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_building_network_view(dataset: HourlyDataset) {
        let network = dataset.building_network(1).unwrap();
        assert_eq!(network.len(), 1);
        let entry = &network[0];
        assert_eq!(entry.id, BuildingId::new(1));
        assert_eq!(entry.name, "Building 1");
        assert_eq!(entry.kind, BuildingKind::HeatSink);
        assert_relative_eq!(entry.load_w, 2000.);
        assert_relative_eq!(entry.energy_savings_w, 500.);

        let network = dataset.building_network(2).unwrap();
        assert_eq!(network[0].kind, BuildingKind::HeatSource);
        assert!(dataset.building_network(3).is_none());
    }

    #[rstest]
    fn test_session_cursor_defaults_to_first_hour(dataset: HourlyDataset) {
        let session = Session::new(&dataset);
        assert_eq!(session.current_hour(), 1);
        assert_eq!(session.current_hour_data().unwrap().hour, 1);
    }

    #[rstest]
    fn test_session_cursor_is_unvalidated_until_queried(dataset: HourlyDataset) {
        let mut session = Session::new(&dataset);
        session.set_current_hour(9000);
        assert_eq!(session.current_hour(), 9000);
        assert!(session.current_hour_data().is_none());
        assert!(session.building_network_data().is_none());

        session.set_current_hour(2);
        assert_eq!(session.current_hour_data().unwrap().hour, 2);
    }

    #[rstest]
    fn test_sessions_do_not_interfere(dataset: HourlyDataset) {
        let mut first = Session::new(&dataset);
        let second = Session::new(&dataset);
        first.set_current_hour(2);
        assert_eq!(first.current_hour_data().unwrap().hour, 2);
        assert_eq!(second.current_hour_data().unwrap().hour, 1);
    }
}

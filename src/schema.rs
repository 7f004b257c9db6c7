use crate::errors::DataLoadError;
use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

pub const HOUR_COLUMN: &str = "hour";
pub const OUTDOOR_TEMP_C_COLUMN: &str = "outdoor_air_temp_c";
pub const OUTDOOR_TEMP_F_COLUMN: &str = "outdoor_air_temp_f";

/// The per-building field suffixes the source is expected to provide, i.e.
/// the columns `b_<N>_<suffix>` for every building N.
pub const BUILDING_FIELD_SUFFIXES: [&str; 7] = [
    "inlet_temp_c",
    "inlet_temp_f",
    "load_w",
    "geo_cop",
    "geo_electric_w",
    "air_cop",
    "air_electric_w",
];

/// Identifier of one building in the network, rendered as `b_<N>`.
///
/// Ordering is by the numeric index, so `b_2` sorts before `b_10`. The index
/// also determines the building's borefield affiliation and display name,
/// which are fixed lookups owned by the asset catalogue.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BuildingId(u32);

impl BuildingId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    /// The source column name holding the given field for this building,
    /// e.g. `b_4_load_w`.
    pub fn column(&self, suffix: &str) -> String {
        format!("{self}_{suffix}")
    }
}

impl Display for BuildingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "b_{}", self.0)
    }
}

impl Serialize for BuildingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, Error)]
#[error("`{0}` is not a building id of the form b_<N>")]
pub struct InvalidBuildingId(String);

impl FromStr for BuildingId {
    type Err = InvalidBuildingId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("b_")
            .and_then(|index| index.parse::<u32>().ok())
            .map(BuildingId)
            .ok_or_else(|| InvalidBuildingId(s.to_string()))
    }
}

/// Matches column names of the form `b_<N>_<suffix>` and extracts the id.
fn building_id_of_column(column: &str) -> Option<BuildingId> {
    let (index, suffix) = column.strip_prefix("b_")?.split_once('_')?;
    if suffix.is_empty() {
        return None;
    }
    index.parse::<u32>().ok().map(BuildingId)
}

/// The set of buildings discovered in a source header, in roster order.
///
/// Discovery scans the header once for `b_<N>_<suffix>` columns; the roster
/// is the distinct set of ids sorted ascending by index, and it fixes the
/// iteration order for every map and aggregation built from the source.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingSchema {
    roster: Vec<BuildingId>,
}

impl BuildingSchema {
    pub fn discover<'a>(columns: impl IntoIterator<Item = &'a str>) -> Result<Self, DataLoadError> {
        let roster = columns
            .into_iter()
            .filter_map(building_id_of_column)
            .unique()
            .sorted()
            .collect::<Vec<_>>();
        if roster.is_empty() {
            return Err(DataLoadError::NoBuildings);
        }
        Ok(Self { roster })
    }

    pub fn from_roster(roster: Vec<BuildingId>) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &[BuildingId] {
        &self.roster
    }

    /// Checks that the header carries every column this schema expects: the
    /// hour and outdoor temperature columns plus all per-building fields.
    /// Reports the first missing column.
    pub fn validate<'a>(
        &self,
        columns: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), DataLoadError> {
        let present = columns.into_iter().collect::<Vec<_>>();
        for required in [HOUR_COLUMN, OUTDOOR_TEMP_C_COLUMN, OUTDOOR_TEMP_F_COLUMN] {
            if !present.contains(&required) {
                return Err(DataLoadError::MissingColumn(required.to_string()));
            }
        }
        for building in &self.roster {
            for suffix in BUILDING_FIELD_SUFFIXES {
                let column = building.column(suffix);
                if !present.iter().any(|c| **c == column) {
                    return Err(DataLoadError::MissingColumn(column));
                }
            }
        }
        Ok(())
    }
}

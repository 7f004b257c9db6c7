use crate::store::HourlyDataset;
use anyhow::bail;
use csv::WriterBuilder;
use std::io::Write;

/// Writes the whole-dataset trend projection as CSV: a headings row, a units
/// row, then one record per hour.
pub fn write_time_series_csv(writer: impl Write, dataset: &HourlyDataset) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record([
        "Hour",
        "Outdoor temp",
        "Network electric",
        "ASHP electric",
        "Energy savings",
        "Network COP",
        "ASHP COP",
    ])?;
    writer.write_record([
        "[count]", "[deg C]", "[W]", "[W]", "[W]", "[ratio]", "[ratio]",
    ])?;

    for point in dataset.time_series() {
        writer.write_record(&[
            point.hour.to_string(),
            point.outdoor_temp_c.to_string(),
            point.geo_total.to_string(),
            point.air_total.to_string(),
            point.savings.to_string(),
            point.geo_cop.to_string(),
            point.air_cop.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes one hour's per-building summary as CSV, in roster order.
pub fn write_building_network_csv(
    writer: impl Write,
    dataset: &HourlyDataset,
    hour: u32,
) -> anyhow::Result<()> {
    let Some(entries) = dataset.building_network(hour) else {
        bail!("hour {hour} is not present in the dataset");
    };

    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record([
        "Building",
        "Name",
        "Type",
        "Inlet temp",
        "Load",
        "Network COP",
        "ASHP COP",
        "Energy savings",
        "Efficiency gain",
    ])?;
    writer.write_record([
        "[id]", "", "", "[deg C]", "[W]", "[ratio]", "[ratio]", "[W]", "[%]",
    ])?;

    for entry in entries {
        writer.write_record(&[
            entry.id.to_string(),
            entry.name.clone(),
            match entry.kind {
                crate::store::BuildingKind::HeatSink => "heat_sink".to_string(),
                crate::store::BuildingKind::HeatSource => "heat_source".to_string(),
            },
            entry.temperature_c.to_string(),
            entry.load_w.to_string(),
            entry.geo_cop.to_string(),
            entry.air_cop.to_string(),
            entry.energy_savings_w.to_string(),
            entry.efficiency_gain_percent.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HourlyDataset;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn dataset() -> HourlyDataset {
        let source = "\
hour,outdoor_air_temp_c,outdoor_air_temp_f,b_1_inlet_temp_c,b_1_inlet_temp_f,b_1_load_w,b_1_geo_cop,b_1_geo_electric_w,b_1_air_cop,b_1_air_electric_w
1,-3.5,25.7,11.8,53.2,-2000,5,400,2.2,900
2,8,46.4,13.1,55.6,1500,5,300,3,500
";
        HourlyDataset::load(source.as_bytes()).unwrap()
    }

    #[rstest]
    fn test_time_series_csv_layout(dataset: HourlyDataset) {
        let mut buffer = vec![];
        write_time_series_csv(&mut buffer, &dataset).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        let lines = written.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Hour,Outdoor temp,Network electric,ASHP electric,Energy savings,Network COP,ASHP COP"
        );
        assert_eq!(lines[1], "[count],[deg C],[W],[W],[W],[ratio],[ratio]");
        assert!(
            lines[2].starts_with("1,-3.5,400,900,500,5,2.2222"),
            "unexpected record: {}",
            lines[2]
        );
        assert_eq!(lines[3], "2,8,300,500,200,5,3");
    }

    #[rstest]
    fn test_building_network_csv_layout(dataset: HourlyDataset) {
        let mut buffer = vec![];
        write_building_network_csv(&mut buffer, &dataset, 1).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        let lines = written.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 3);
        assert!(
            lines[2].starts_with("b_1,Building 1,heat_sink,11.8,2000,5,2.2,500,127.27"),
            "unexpected record: {}",
            lines[2]
        );
    }

    #[rstest]
    fn test_building_network_csv_rejects_absent_hour(dataset: HourlyDataset) {
        let mut buffer = vec![];
        assert!(write_building_network_csv(&mut buffer, &dataset, 10).is_err());
    }
}

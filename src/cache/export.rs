use crate::database::{TRAFFIC_DATA_COLUMNS, TrafficDataEntity};

/// 把交通数据行序列化为 CSV，即使没有数据也输出表头
pub fn traffic_data_to_csv(rows: &[TrafficDataEntity]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(TRAFFIC_DATA_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    // 所有字段都来自 String/数值，输出一定是合法 UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_still_has_header() {
        let csv = traffic_data_to_csv(&[]).unwrap();
        assert_eq!(csv, format!("{}\n", TRAFFIC_DATA_COLUMNS.join(",")));
    }

    #[test]
    fn rows_follow_declaration_order() {
        let row = TrafficDataEntity {
            id: 7,
            count_point_id: Some(501),
            year: Some(2019),
            region_name: Some("South West".into()),
            latitude: Some(50.5),
            all_motor_vehicles: Some(1234),
            ..Default::default()
        };
        let csv = traffic_data_to_csv(&[row]).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,Count_point_id,Year,Region_id"));

        let cells: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(cells.len(), TRAFFIC_DATA_COLUMNS.len());
        assert_eq!(&cells[..5], &["7", "501", "2019", "", "South West"]);
        assert_eq!(cells[16], "50.5");
        assert_eq!(cells[35], "1234");
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        let row = TrafficDataEntity {
            id: 1,
            road_name: Some("A38, Bristol Road".into()),
            ..Default::default()
        };
        let csv = traffic_data_to_csv(&[row]).unwrap();
        assert!(csv.contains("\"A38, Bristol Road\""));
    }
}

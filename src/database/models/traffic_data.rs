// 交通计数实体
// 由离线导入填充，API 只读

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// CSV 表头，顺序与字段声明顺序一致
pub const TRAFFIC_DATA_COLUMNS: [&str; 36] = [
    "id",
    "Count_point_id",
    "Year",
    "Region_id",
    "Region_name",
    "Region_ons_code",
    "Local_authority_id",
    "Local_authority_name",
    "Local_authority_code",
    "Road_name",
    "Road_category",
    "Road_type",
    "Start_junction_road_name",
    "End_junction_road_name",
    "Easting",
    "Northing",
    "Latitude",
    "Longitude",
    "Link_length_km",
    "Link_length_miles",
    "Estimation_method",
    "Estimation_method_detailed",
    "direction_of_travel",
    "Pedal_cycles",
    "Two_wheeled_motor_vehicles",
    "Cars_and_taxis",
    "Buses_and_coaches",
    "LGVs",
    "HGVs_2_rigid_axle",
    "HGVs_3_rigid_axle",
    "HGVs_4_or_more_rigid_axle",
    "HGVs_3_or_4_articulated_axle",
    "HGVs_5_articulated_axle",
    "HGVs_6_articulated_axle",
    "All_HGVs",
    "All_motor_vehicles",
];

/// 一行英国道路交通计数数据，概念上以 (计数点, 年份) 为键
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TrafficDataEntity {
    pub id: i32,
    #[serde(rename = "Count_point_id")]
    pub count_point_id: Option<i32>,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
    #[serde(rename = "Region_id")]
    pub region_id: Option<i32>,
    #[serde(rename = "Region_name")]
    pub region_name: Option<String>,
    #[serde(rename = "Region_ons_code")]
    pub region_ons_code: Option<String>,
    #[serde(rename = "Local_authority_id")]
    pub local_authority_id: Option<i32>,
    #[serde(rename = "Local_authority_name")]
    pub local_authority_name: Option<String>,
    #[serde(rename = "Local_authority_code")]
    pub local_authority_code: Option<String>,
    #[serde(rename = "Road_name")]
    pub road_name: Option<String>,
    #[serde(rename = "Road_category")]
    pub road_category: Option<String>,
    #[serde(rename = "Road_type")]
    pub road_type: Option<String>,
    #[serde(rename = "Start_junction_road_name")]
    pub start_junction_road_name: Option<String>,
    #[serde(rename = "End_junction_road_name")]
    pub end_junction_road_name: Option<String>,
    #[serde(rename = "Easting")]
    pub easting: Option<i32>,
    #[serde(rename = "Northing")]
    pub northing: Option<i32>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Link_length_km")]
    pub link_length_km: Option<f64>,
    #[serde(rename = "Link_length_miles")]
    pub link_length_miles: Option<f64>,
    #[serde(rename = "Estimation_method")]
    pub estimation_method: Option<String>,
    #[serde(rename = "Estimation_method_detailed")]
    pub estimation_method_detailed: Option<String>,
    #[serde(rename = "direction_of_travel")]
    pub direction_of_travel: Option<String>,
    #[serde(rename = "Pedal_cycles")]
    pub pedal_cycles: Option<i32>,
    #[serde(rename = "Two_wheeled_motor_vehicles")]
    pub two_wheeled_motor_vehicles: Option<i32>,
    #[serde(rename = "Cars_and_taxis")]
    pub cars_and_taxis: Option<i32>,
    #[serde(rename = "Buses_and_coaches")]
    pub buses_and_coaches: Option<i32>,
    #[serde(rename = "LGVs")]
    pub lgvs: Option<i32>,
    #[serde(rename = "HGVs_2_rigid_axle")]
    pub hgvs_2_rigid_axle: Option<i32>,
    #[serde(rename = "HGVs_3_rigid_axle")]
    pub hgvs_3_rigid_axle: Option<i32>,
    #[serde(rename = "HGVs_4_or_more_rigid_axle")]
    pub hgvs_4_or_more_rigid_axle: Option<i32>,
    #[serde(rename = "HGVs_3_or_4_articulated_axle")]
    pub hgvs_3_or_4_articulated_axle: Option<i32>,
    #[serde(rename = "HGVs_5_articulated_axle")]
    pub hgvs_5_articulated_axle: Option<i32>,
    #[serde(rename = "HGVs_6_articulated_axle")]
    pub hgvs_6_articulated_axle: Option<i32>,
    #[serde(rename = "All_HGVs")]
    pub all_hgvs: Option<i32>,
    #[serde(rename = "All_motor_vehicles")]
    pub all_motor_vehicles: Option<i32>,
}

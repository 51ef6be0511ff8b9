//! Farmer-facing records: linked IoT devices, edge sensor readings and
//! farm-plan enquiries.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Device as listed on the "My Farm" page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IotDevice {
    pub id: i64,
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub allocated: Option<String>,
}

impl IotDevice {
    /// Device name, or the device id when the name is unset.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.device_id)
    }
}

/// Device detail joined with its farm and crop, as served by
/// `/api/device/iot/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetail {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "deviceID", default)]
    pub device_id: String,
    #[serde(rename = "deviceName", default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub allocated: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(rename = "soilType", default)]
    pub soil_type: Option<String>,
    #[serde(rename = "soilWaterLevel", default)]
    pub soil_water_level: Option<f64>,
    #[serde(rename = "farmImageUrl", default)]
    pub farm_image_url: Option<String>,
    #[serde(rename = "cropName", default)]
    pub crop_name: Option<String>,
    #[serde(rename = "cropType", default)]
    pub crop_type: Option<String>,
    #[serde(rename = "cropImageUrl", default)]
    pub crop_image_url: Option<String>,
}

/// One edge-sensor sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub soil_moisture: f64,
    #[serde(default)]
    pub water_level: f64,
    #[serde(default)]
    pub plant_status: String,
    #[serde(default)]
    pub pest_level: f64,
    #[serde(default)]
    pub plant_health_index: f64,
    #[serde(default)]
    pub timestamp: String,
}

impl SensorReading {
    /// Parses `timestamp` as RFC 3339, falling back to a zone-less
    /// `YYYY-MM-DD HH:MM:SS` which is read as UTC.
    pub fn recorded_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.timestamp)
    }

    /// Short label for tables; the raw value is shown if it does not parse.
    pub fn display_time(&self) -> String {
        display_timestamp(&self.timestamp)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

fn display_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

// =========================================================
// AI detection events
// =========================================================

/// Something the on-device camera model recognised, with the stored
/// snapshot and clip. Newest first as served by the edge service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub id: i64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(rename = "snapshotPath", default)]
    pub snapshot_path: Option<String>,
    #[serde(rename = "clipPath", default)]
    pub clip_path: Option<String>,
}

impl DetectionEvent {
    pub fn display_time(&self) -> String {
        display_timestamp(&self.timestamp)
    }

    /// Absolute snapshot URL under `base`.
    pub fn snapshot_url(&self, base: &str) -> Option<String> {
        media_url(base, self.snapshot_path.as_deref()?)
    }

    /// Absolute clip URL under `base`.
    pub fn clip_url(&self, base: &str) -> Option<String> {
        media_url(base, self.clip_path.as_deref()?)
    }
}

/// Joins a media path stored relative to the service root onto its base URL.
fn media_url(base: &str, path: &str) -> Option<String> {
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}", base.trim_end_matches('/'), path))
}

// =========================================================
// Farm plan
// =========================================================

/// Crops the farm-plan page can recommend, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropKind {
    Rice,
    Wheat,
    Apple,
    Olive,
}

impl CropKind {
    pub const ALL: [CropKind; 4] = [CropKind::Rice, CropKind::Wheat, CropKind::Apple, CropKind::Olive];

    /// Name shown on the advisor cards.
    pub fn label(&self) -> &'static str {
        match self {
            CropKind::Rice => "Rice",
            CropKind::Wheat => "Wheat",
            CropKind::Apple => "Apple",
            CropKind::Olive => "Olive",
        }
    }
}

/// Conditions used for the recommendation: °C, relative humidity in percent
/// and volumetric soil moisture as a fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowingConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

/// Every crop whose band contains the given conditions.
pub fn recommend_crops(c: GrowingConditions) -> Vec<CropKind> {
    let GrowingConditions {
        temperature: t,
        humidity: h,
        soil_moisture: m,
    } = c;

    CropKind::ALL
        .into_iter()
        .filter(|crop| match crop {
            CropKind::Rice => t > 25.0 && h > 60.0 && m > 0.2,
            CropKind::Wheat => (10.0..=25.0).contains(&t) && h <= 60.0 && m <= 0.2,
            CropKind::Apple => (15.0..=25.0).contains(&t) && h >= 50.0 && m > 0.15,
            CropKind::Olive => (18.0..=28.0).contains(&t) && h <= 50.0 && m <= 0.15,
        })
        .collect()
}

/// Enquiry submitted from the farm-plan page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmPlanQuery {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(temperature: f64, humidity: f64, soil_moisture: f64) -> GrowingConditions {
        GrowingConditions {
            temperature,
            humidity,
            soil_moisture,
        }
    }

    #[test]
    fn hot_and_wet_recommends_rice_only() {
        assert_eq!(recommend_crops(conditions(30.0, 80.0, 0.3)), vec![CropKind::Rice]);
    }

    #[test]
    fn mild_dry_conditions_can_match_several_crops() {
        // wheat and olive overlap at 20°C, 50% humidity, 0.1 moisture
        assert_eq!(
            recommend_crops(conditions(20.0, 50.0, 0.1)),
            vec![CropKind::Wheat, CropKind::Olive]
        );
    }

    #[test]
    fn band_edges_are_inclusive_where_documented() {
        assert_eq!(
            recommend_crops(conditions(25.0, 60.0, 0.2)),
            vec![CropKind::Wheat, CropKind::Apple]
        );
        assert!(recommend_crops(conditions(40.0, 10.0, 0.0)).is_empty());
    }

    #[test]
    fn sensor_timestamps_parse_in_both_formats() {
        let mut reading: SensorReading = serde_json::from_str(
            r#"{"id":1,"device_id":"d","temperature":24.1,"humidity":55,"soil_moisture":0.3,
                "water_level":12,"plant_status":"healthy","pest_level":0,
                "plant_health_index":0.9,"timestamp":"2024-05-01T10:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(reading.display_time(), "2024-05-01 10:15");

        reading.timestamp = "2024-05-01 10:15:30".into();
        assert!(reading.recorded_at().is_some());

        reading.timestamp = "yesterday".into();
        assert_eq!(reading.display_time(), "yesterday");
    }

    #[test]
    fn detection_media_paths_resolve_against_the_service_root() {
        let event: DetectionEvent = serde_json::from_str(
            r#"{"id":4,"timestamp":"2024-05-01T10:15:00Z","labels":["person","dog"],
                "snapshotPath":"snapshots/4.jpg","clipPath":""}"#,
        )
        .unwrap();
        assert_eq!(event.labels, vec!["person", "dog"]);
        assert_eq!(event.display_time(), "2024-05-01 10:15");
        assert_eq!(
            event.snapshot_url("http://edge.test/").as_deref(),
            Some("http://edge.test/snapshots/4.jpg")
        );
        assert_eq!(event.clip_url("http://edge.test"), None);

        let bare: DetectionEvent = serde_json::from_str(r#"{"id":5}"#).unwrap();
        assert!(bare.labels.is_empty());
        assert_eq!(bare.snapshot_url("http://edge.test"), None);
    }

    #[test]
    fn device_name_falls_back_to_id() {
        let device: IotDevice = serde_json::from_str(r#"{"id":1,"deviceID":"709db414"}"#).unwrap();
        assert_eq!(device.display_name(), "709db414");
    }
}

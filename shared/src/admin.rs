//! Back-office records (users, crops, farms, devices, support queries).

use serde::{Deserialize, Serialize};

use crate::Role;

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "userType", default)]
    pub user_type: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Editable user fields, used by both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub email: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "userType")]
    pub user_type: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&AdminUser> for UserInput {
    fn from(user: &AdminUser) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            location: user.location.clone(),
            user_type: user.user_type.clone(),
            role: user.role.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Dial prefixes offered by the user forms, in lookup order.
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("+91", "India"),
    ("+49", "Germany"),
    ("+1", "USA"),
    ("+31", "Netherlands"),
];

pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Joins a dial prefix and a local number; a blank local number means "no phone".
pub fn compose_phone(country_code: &str, local: &str) -> Option<String> {
    let local = local.trim();
    if local.is_empty() || country_code.is_empty() {
        return None;
    }
    Some(format!("{country_code}{local}"))
}

/// Splits a stored number back into (prefix, local part).
///
/// Numbers without a known prefix keep the default prefix and are returned
/// whole as the local part.
pub fn split_phone(phone: &str) -> (&'static str, String) {
    COUNTRY_CODES
        .iter()
        .find(|(code, _)| phone.starts_with(code))
        .map(|(code, _)| (*code, phone[code.len()..].to_string()))
        .unwrap_or((DEFAULT_COUNTRY_CODE, phone.to_string()))
}

// =========================================================
// Crops
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(rename = "pricePerUnit", default)]
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropInput {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "pricePerUnit", skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&Crop> for CropInput {
    fn from(crop: &Crop) -> Self {
        Self {
            name: crop.name.clone(),
            kind: crop.kind.clone(),
            season: crop.season.clone(),
            unit: crop.unit.clone(),
            price_per_unit: crop.price_per_unit,
            notes: crop.notes.clone(),
        }
    }
}

// =========================================================
// Farms
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: i64,
    #[serde(rename = "soilType", default)]
    pub soil_type: String,
    #[serde(rename = "soilWaterLevel", default)]
    pub soil_water_level: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(rename = "cropID", default)]
    pub crop_id: Option<i64>,
    #[serde(rename = "farmImageUrl", default)]
    pub farm_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmInput {
    #[serde(rename = "soilType")]
    pub soil_type: String,
    #[serde(rename = "soilWaterLevel", skip_serializing_if = "Option::is_none")]
    pub soil_water_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(rename = "cropID", skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<i64>,
    #[serde(rename = "farmImageUrl", skip_serializing_if = "Option::is_none")]
    pub farm_image_url: Option<String>,
}

impl From<&Farm> for FarmInput {
    fn from(farm: &Farm) -> Self {
        Self {
            soil_type: farm.soil_type.clone(),
            soil_water_level: farm.soil_water_level,
            temperature: farm.temperature,
            humidity: farm.humidity,
            crop_id: farm.crop_id,
            farm_image_url: farm.farm_image_url.clone(),
        }
    }
}

// =========================================================
// Devices
// =========================================================

pub const DEVICE_ALLOCATIONS: &[&str] = &["Yes", "No"];
pub const DEVICE_STATUSES: &[&str] = &["Active", "Inactive", "Deprovisioned"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub allocated: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "userID", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "farmID", default)]
    pub farm_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInput {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub name: String,
    pub allocated: Option<String>,
    pub status: String,
}

impl From<&Device> for DeviceInput {
    fn from(device: &Device) -> Self {
        Self {
            device_id: device.device_id.clone(),
            name: device.name.clone(),
            allocated: device.allocated.clone(),
            status: device.status.clone(),
        }
    }
}

// =========================================================
// Support queries
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportQuery {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportQueryInput {
    pub email: String,
    pub message: String,
    pub status: String,
}

impl From<&SupportQuery> for SupportQueryInput {
    fn from(query: &SupportQuery) -> Self {
        Self {
            email: query.email.clone(),
            message: query.message.clone(),
            status: query.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_composed_only_with_a_local_number() {
        assert_eq!(compose_phone("+49", "1701234567").as_deref(), Some("+491701234567"));
        assert_eq!(compose_phone("+49", "   "), None);
    }

    #[test]
    fn split_phone_recognises_known_prefixes() {
        assert_eq!(split_phone("+919876543210"), ("+91", "9876543210".to_string()));
        assert_eq!(split_phone("+15551234"), ("+1", "5551234".to_string()));
        assert_eq!(split_phone("+31612345678"), ("+31", "612345678".to_string()));
        assert_eq!(split_phone("0301234"), ("+91", "0301234".to_string()));
    }

    #[test]
    fn user_input_uses_backend_field_names() {
        let input = UserInput {
            email: "a@x.com".into(),
            name: "A".into(),
            location: "Pune".into(),
            user_type: "farmer".into(),
            role: Role::User,
            phone: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["userType"], "farmer");
        assert_eq!(json["role"], "user");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn crop_decodes_with_nullable_fields() {
        let crop: Crop = serde_json::from_str(
            r#"{"id":3,"name":"Rice","type":null,"season":"Kharif","imageUrl":null,
                "unit":"kg","pricePerUnit":21.5,"notes":null}"#,
        )
        .unwrap();
        assert_eq!(crop.kind, None);
        assert_eq!(crop.price_per_unit, Some(21.5));
        let input = CropInput::from(&crop);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["pricePerUnit"], 21.5);
        assert!(json.get("type").is_none());
    }
}

//! Form checks run before a request is sent, and the inline banner model.

use farmvizion_shared::{
    CropInput, DeviceInput, FarmInput, FarmPlanQuery, SupportQueryInput, UserInput,
};

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields.";
pub const CROP_NAME_REQUIRED: &str = "Crop name is required.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long.";
pub const QUERY_STATUS_REQUIRED: &str = "Query status is required.";
pub const SOIL_TYPE_REQUIRED: &str = "Soil type is required.";

pub const MIN_PASSWORD_LEN: usize = 8;

/// Inline banner: green for success, red for failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(msg: impl Into<String>) -> Self {
        Notice::Success(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Notice::Error(msg.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn check_new_user(user: &UserInput, password: &str) -> Result<(), &'static str> {
    if blank(&user.email) || blank(&user.name) || password.is_empty() {
        return Err(REQUIRED_FIELDS);
    }
    Ok(())
}

pub fn check_user_update(user: &UserInput) -> Result<(), &'static str> {
    if blank(&user.email) || blank(&user.name) {
        return Err(REQUIRED_FIELDS);
    }
    Ok(())
}

pub fn check_new_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    Ok(())
}

pub fn check_crop(crop: &CropInput) -> Result<(), &'static str> {
    if blank(&crop.name) {
        return Err(CROP_NAME_REQUIRED);
    }
    Ok(())
}

pub fn check_farm(farm: &FarmInput) -> Result<(), &'static str> {
    if blank(&farm.soil_type) {
        return Err(SOIL_TYPE_REQUIRED);
    }
    Ok(())
}

pub fn check_device(device: &DeviceInput) -> Result<(), &'static str> {
    if blank(&device.device_id) || blank(&device.name) {
        return Err(REQUIRED_FIELDS);
    }
    Ok(())
}

pub fn check_query_update(query: &SupportQueryInput) -> Result<(), &'static str> {
    if blank(&query.status) {
        return Err(QUERY_STATUS_REQUIRED);
    }
    Ok(())
}

pub fn check_device_link(device_id: &str, api_key: &str) -> Result<(), &'static str> {
    if blank(device_id) || blank(api_key) {
        return Err("Device ID and API key are required.");
    }
    Ok(())
}

pub fn check_farm_plan_query(query: &FarmPlanQuery) -> Result<(), &'static str> {
    if blank(&query.name) || blank(&query.email) {
        return Err(REQUIRED_FIELDS);
    }
    Ok(())
}

/// Parses an optional numeric input; blank means "not set".
pub fn parse_optional<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| "Please enter a valid number.")
}

/// Blank input becomes `None`.
pub fn optional_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, name: &str) -> UserInput {
        UserInput {
            email: email.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_user_needs_email_name_and_password() {
        assert_eq!(check_new_user(&user("a@x.com", "A"), "pw"), Ok(()));
        assert_eq!(check_new_user(&user("", "A"), "pw"), Err(REQUIRED_FIELDS));
        assert_eq!(check_new_user(&user("a@x.com", " "), "pw"), Err(REQUIRED_FIELDS));
        assert_eq!(check_new_user(&user("a@x.com", "A"), ""), Err(REQUIRED_FIELDS));
        assert_eq!(check_user_update(&user("a@x.com", "A")), Ok(()));
    }

    #[test]
    fn test_admin_password_minimum() {
        assert_eq!(check_new_password("1234567"), Err(PASSWORD_TOO_SHORT));
        assert_eq!(check_new_password("12345678"), Ok(()));
        assert_eq!(check_new_password(""), Err(PASSWORD_TOO_SHORT));
    }

    #[test]
    fn test_record_checks() {
        assert_eq!(check_crop(&CropInput::default()), Err(CROP_NAME_REQUIRED));
        assert_eq!(check_farm(&FarmInput::default()), Err(SOIL_TYPE_REQUIRED));
        assert_eq!(
            check_query_update(&SupportQueryInput::default()),
            Err(QUERY_STATUS_REQUIRED)
        );
        let device = DeviceInput {
            device_id: "dev-1".into(),
            name: "Field sensor".into(),
            allocated: Some("Yes".into()),
            status: "Active".into(),
        };
        assert_eq!(check_device(&device), Ok(()));
        assert!(check_device_link("dev-1", "").is_err());
    }

    #[test]
    fn test_optional_inputs() {
        assert_eq!(parse_optional::<f64>(""), Ok(None));
        assert_eq!(parse_optional::<f64>(" 21.5 "), Ok(Some(21.5)));
        assert!(parse_optional::<i64>("abc").is_err());
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" Kharif "), Some("Kharif".to_string()));
    }

    #[test]
    fn test_notice_kinds() {
        assert!(Notice::error("x").is_error());
        assert_eq!(Notice::success("Saved").message(), "Saved");
    }
}

//! Endpoint catalogue: every backend call the client makes, described as a
//! request type bound to its response type, path and method.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Ack, AdminUser, AuthResponse, Crop, CropInput, DetectionEvent, Device, DeviceDetail,
    DeviceInput, Farm, FarmInput, FarmPlanQuery, IotDevice, SensorReading, SupportQuery,
    SupportQueryInput, UserInput, HEADER_API_KEY, HEADER_DEVICE_ID,
};

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, possibly with an `{id}` placeholder.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Concrete path for this request.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }

    /// Extra headers besides content type and authorization.
    fn headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

fn with_id(template: &str, id: impl std::fmt::Display) -> String {
    template.replace("{id}", &id.to_string())
}

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Exchange a Google Identity Services credential (an ID token) for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthRequest {
    pub credential: String,
}

impl ApiRequest for GoogleAuthRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/auth/google";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Exchange a phone number, already verified by the OTP provider, for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneAuthRequest {
    pub phone: String,
}

impl ApiRequest for PhoneAuthRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/auth/phone";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestResetRequest {
    pub email: String,
}

impl ApiRequest for RequestResetRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/request-reset";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/reset-password";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Admin: users
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Vec<AdminUser>;
    const PATH: &'static str = "/api/admin/users";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub user: UserInput,
    pub password: String,
}

impl ApiRequest for CreateUserRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/users";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub user: UserInput,
}

impl ApiRequest for UpdateUserRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/users/{id}";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub id: i64,
}

impl ApiRequest for DeleteUserRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/users/{id}";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

/// Admin-initiated password reset for another account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminResetPasswordRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

impl ApiRequest for AdminResetPasswordRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/users/{id}/reset-password";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

// =========================================================
// Admin: crops
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCropsRequest;

impl ApiRequest for ListCropsRequest {
    type Response = Vec<Crop>;
    const PATH: &'static str = "/api/admin/crops";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCropRequest {
    #[serde(flatten)]
    pub crop: CropInput,
}

impl ApiRequest for CreateCropRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/crops";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCropRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub crop: CropInput,
}

impl ApiRequest for UpdateCropRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/crops/{id}";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCropRequest {
    pub id: i64,
}

impl ApiRequest for DeleteCropRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/crops/{id}";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

// =========================================================
// Admin: farms
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFarmsRequest;

impl ApiRequest for ListFarmsRequest {
    type Response = Vec<Farm>;
    const PATH: &'static str = "/api/admin/farms";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFarmRequest {
    #[serde(flatten)]
    pub farm: FarmInput,
}

impl ApiRequest for CreateFarmRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/farm/create";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFarmRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub farm: FarmInput,
}

impl ApiRequest for UpdateFarmRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/farm/{id}";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFarmRequest {
    pub id: i64,
}

impl ApiRequest for DeleteFarmRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/farm/{id}";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

// =========================================================
// Admin: devices
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDevicesRequest;

impl ApiRequest for ListDevicesRequest {
    type Response = Vec<Device>;
    const PATH: &'static str = "/api/admin/devices";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeviceRequest {
    pub id: i64,
    #[serde(flatten)]
    pub device: DeviceInput,
}

impl ApiRequest for UpdateDeviceRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/device/{id}";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDeviceRequest {
    pub id: i64,
}

impl ApiRequest for DeleteDeviceRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/device/{id}";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

// =========================================================
// Admin: support queries
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQueriesRequest;

impl ApiRequest for ListQueriesRequest {
    type Response = Vec<SupportQuery>;
    const PATH: &'static str = "/api/admin/list/queries";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQueryRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub query: SupportQueryInput,
}

impl ApiRequest for UpdateQueryRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/query/{id}";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteQueryRequest {
    pub id: i64,
}

impl ApiRequest for DeleteQueryRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/admin/query/{id}";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

// =========================================================
// Farmer devices
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListIotDevicesRequest;

impl ApiRequest for ListIotDevicesRequest {
    type Response = Vec<IotDevice>;
    const PATH: &'static str = "/api/device/list/iot";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDeviceRequest {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl ApiRequest for LinkDeviceRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/device/link/iot";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDetailRequest {
    pub id: String,
}

impl ApiRequest for DeviceDetailRequest {
    type Response = DeviceDetail;
    const PATH: &'static str = "/api/device/iot/{id}";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_id(Self::PATH, &self.id)
    }
}

// =========================================================
// Edge sensors (device credentials, no bearer token)
// =========================================================

/// Per-device key pair the edge service checks instead of a bearer token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceCredentials {
    pub device_id: String,
    pub api_key: String,
}

impl DeviceCredentials {
    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (HEADER_DEVICE_ID, self.device_id.clone()),
            (HEADER_API_KEY, self.api_key.clone()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestSensorRequest(pub DeviceCredentials);

impl ApiRequest for LatestSensorRequest {
    type Response = SensorReading;
    const PATH: &'static str = "/api/edge/sensors/latest";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn headers(&self) -> Vec<(&'static str, String)> {
        self.0.headers()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorHistoryRequest(pub DeviceCredentials);

impl ApiRequest for SensorHistoryRequest {
    type Response = Vec<SensorReading>;
    const PATH: &'static str = "/api/edge/sensors/history";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn headers(&self) -> Vec<(&'static str, String)> {
        self.0.headers()
    }
}

// =========================================================
// AI detection events (device credentials)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDetectionsRequest(pub DeviceCredentials);

impl ApiRequest for ListDetectionsRequest {
    type Response = Vec<DetectionEvent>;
    const PATH: &'static str = "/api/edge/get/detected";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn headers(&self) -> Vec<(&'static str, String)> {
        self.0.headers()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDetectionRequest {
    #[serde(skip)]
    pub credentials: DeviceCredentials,
    pub id: i64,
}

impl ApiRequest for DeleteDetectionRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/delete/detected/{id}";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        self.credentials.headers()
    }
}

/// Clears every stored detection of the device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAllDetectionsRequest(pub DeviceCredentials);

impl ApiRequest for DeleteAllDetectionsRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/delete/detected";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn headers(&self) -> Vec<(&'static str, String)> {
        self.0.headers()
    }
}

// =========================================================
// Farm plan
// =========================================================

impl ApiRequest for FarmPlanQuery {
    type Response = Ack;
    const PATH: &'static str = "/api/farm/create/query";
    const METHOD: HttpMethod = HttpMethod::Post;
}

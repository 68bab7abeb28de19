//! Authentication device definition

use crate::resource::{Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Second factor device registered to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub user: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub mode: DeviceMode,
    /// Phone number for call and message devices
    #[serde(default)]
    pub number: Option<String>,
    /// WebAuthn relying party
    #[serde(default)]
    pub wan_rp_id: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
}

impl Device {
    /// Only phone devices can receive a test alert
    pub fn supports_test_alert(&self) -> bool {
        self.mode == DeviceMode::Phone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Webauthn,
    U2f,
    Call,
    Message,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Webauthn => write!(f, "WebAuthn"),
            DeviceType::U2f => write!(f, "U2F"),
            DeviceType::Call => write!(f, "Call"),
            DeviceType::Message => write!(f, "SMS"),
            DeviceType::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceMode {
    Secondary,
    Phone,
    #[serde(other)]
    Unknown,
}

/// Editable device fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEdit {
    Name(String),
}

impl Resource for Device {
    type Edit = DeviceEdit;

    const KIND: ResourceKind = ResourceKind::Device;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, edit: DeviceEdit) {
        match edit {
            DeviceEdit::Name(name) => self.name = name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_device() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "id": "dev-1",
            "name": "phone",
            "type": "message",
            "mode": "phone",
            "number": "+15550100"
        }))
        .unwrap();

        assert_eq!(device.device_type, DeviceType::Message);
        assert_eq!(device.device_type.to_string(), "SMS");
        assert!(device.supports_test_alert());
    }

    #[test]
    fn test_unknown_device_type() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "id": "dev-2",
            "name": "key",
            "type": "smartcard",
            "mode": "secondary"
        }))
        .unwrap();

        assert_eq!(device.device_type, DeviceType::Unknown);
        assert!(!device.supports_test_alert());
    }
}

use serde::{Deserialize, Serialize};

/// Kind of capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Camera,
    Microphone,
}

/// A capture device visible to the platform.
///
/// Immutable snapshot, replaced wholesale on every enumeration. The id
/// is opaque and stable only within one platform session. `label` may
/// be empty before access has been granted (platform privacy behavior);
/// callers re-enumerate after a successful access request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub id: String,
    pub kind: DeviceKind,
    pub label: String,
    pub is_default: bool,
}

impl DeviceDescriptor {
    pub fn new(id: impl Into<String>, kind: DeviceKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            is_default: false,
        }
    }
}

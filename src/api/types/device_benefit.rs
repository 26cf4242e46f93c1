use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Class of hardware a benefit quota applies to
///
/// Values the portal introduces later are kept verbatim in `Other`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceClass {
    AppleTv,
    Watch,
    Ipad,
    Ipod,
    Iphone,
    Other(String),
}

impl DeviceClass {
    /// The exact string the portal uses for this class
    pub fn as_str(&self) -> &str {
        match self {
            DeviceClass::AppleTv => "AppleTV",
            DeviceClass::Watch => "WATCH",
            DeviceClass::Ipad => "IPAD",
            DeviceClass::Ipod => "IPOD",
            DeviceClass::Iphone => "IPHONE",
            DeviceClass::Other(s) => s.as_str(),
        }
    }

    /// Lower-case device type tag matching this class
    pub fn device_type(&self) -> Option<&'static str> {
        match self {
            DeviceClass::AppleTv => Some("tvOS"),
            DeviceClass::Watch => Some("watch"),
            DeviceClass::Ipad => Some("ipad"),
            DeviceClass::Ipod => Some("ipod"),
            DeviceClass::Iphone => Some("iphone"),
            DeviceClass::Other(_) => None,
        }
    }

    /// Everything except TVs can be used in iOS provisioning profiles
    pub fn supports_ios_profiles(&self) -> bool {
        *self != DeviceClass::AppleTv
    }
}

impl Default for DeviceClass {
    fn default() -> Self {
        DeviceClass::Other(String::new())
    }
}

impl From<&str> for DeviceClass {
    fn from(s: &str) -> Self {
        match s {
            "AppleTV" => DeviceClass::AppleTv,
            "WATCH" => DeviceClass::Watch,
            "IPAD" => DeviceClass::Ipad,
            "IPOD" => DeviceClass::Ipod,
            "IPHONE" => DeviceClass::Iphone,
            other => DeviceClass::Other(other.to_string()),
        }
    }
}

impl From<String> for DeviceClass {
    fn from(s: String) -> Self {
        DeviceClass::from(s.as_str())
    }
}

impl From<DeviceClass> for String {
    fn from(class: DeviceClass) -> Self {
        class.as_str().to_string()
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Device slot quota for one class of devices in the account
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct DeviceBenefit {
    #[serde(rename = "benefitId")]
    pub id: String,
    #[serde(rename = "maxQuantity")]
    pub max: i64,
    #[serde(rename = "availableQuantity")]
    pub available: i64,
    pub platform: String,
    #[serde(rename = "deviceClassEnum")]
    pub device_class: DeviceClass,
    pub device_type: Option<String>,
}

impl DeviceBenefit {
    /// Build a benefit from one raw portal object
    ///
    /// Missing or mistyped keys fall back to empty values instead of failing.
    /// Quantities may come as numbers or numeric strings.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let device_class = DeviceClass::from(read_string(raw, "deviceClassEnum"));
        let device_type = match raw.get("deviceType").and_then(Value::as_str) {
            Some(t) => Some(t.to_string()),
            None => device_class.device_type().map(str::to_string),
        };
        DeviceBenefit {
            id: read_string(raw, "benefitId"),
            max: read_quantity(raw, "maxQuantity"),
            available: read_quantity(raw, "availableQuantity"),
            platform: read_string(raw, "platform"),
            device_class,
            device_type,
        }
    }

    /// No slots left for this class
    pub fn is_full(&self) -> bool {
        self.available == 0
    }

    /// No slots used for this class
    pub fn is_empty(&self) -> bool {
        self.available == self.max
    }

    /// Number of slots already taken
    pub fn used(&self) -> i64 {
        (self.max - self.available).max(0)
    }

    /// First benefit of the given class
    pub fn select<'a>(
        candidates: &'a [DeviceBenefit],
        class: &DeviceClass,
    ) -> Option<&'a DeviceBenefit> {
        candidates.iter().find(|b| &b.device_class == class)
    }

    /// Apple TV benefit
    pub fn select_apple_tv(candidates: &[DeviceBenefit]) -> Option<&DeviceBenefit> {
        DeviceBenefit::select(candidates, &DeviceClass::AppleTv)
    }

    /// Apple Watch benefit
    pub fn select_watch(candidates: &[DeviceBenefit]) -> Option<&DeviceBenefit> {
        DeviceBenefit::select(candidates, &DeviceClass::Watch)
    }

    /// iPad benefit
    pub fn select_ipad(candidates: &[DeviceBenefit]) -> Option<&DeviceBenefit> {
        DeviceBenefit::select(candidates, &DeviceClass::Ipad)
    }

    /// iPhone benefit
    pub fn select_iphone(candidates: &[DeviceBenefit]) -> Option<&DeviceBenefit> {
        DeviceBenefit::select(candidates, &DeviceClass::Iphone)
    }

    /// iPod touch benefit
    pub fn select_ipod_touch(candidates: &[DeviceBenefit]) -> Option<&DeviceBenefit> {
        DeviceBenefit::select(candidates, &DeviceClass::Ipod)
    }

    /// All benefits usable in iOS provisioning profiles, in input order
    pub fn select_ios_profile_devices(candidates: &[DeviceBenefit]) -> Vec<&DeviceBenefit> {
        // filter on the class, device_type of a TV is "tvOS"
        candidates
            .iter()
            .filter(|b| b.device_class.supports_ios_profiles())
            .collect()
    }
}

impl From<Map<String, Value>> for DeviceBenefit {
    fn from(raw: Map<String, Value>) -> Self {
        DeviceBenefit::from_raw(&raw)
    }
}

fn read_string(raw: &Map<String, Value>, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn read_quantity(raw: &Map<String, Value>, key: &str) -> i64 {
    match raw.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

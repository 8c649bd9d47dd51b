//! Device records returned by the AirGradient API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Fields of a device object that are numeric but are not measurements
const NON_READING_FIELDS: &[&str] = &["locationId", "wifi", "firmwareVersion"];

/// One device (AirGradient "location") with its current measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Display name chosen by the user in the dashboard
    #[serde(rename = "locationName", default)]
    pub location_name: String,
    /// Every other field of the API object, verbatim
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DeviceRecord {
    /// Create a record with a name and no readings
    #[must_use]
    pub fn new(location_name: impl Into<String>) -> Self {
        Self {
            location_name: location_name.into(),
            fields: Map::new(),
        }
    }

    /// Add a numeric field
    #[must_use]
    pub fn with_reading(mut self, name: impl Into<String>, value: f64) -> Self {
        if let Some(number) = serde_json::Number::from_f64(value) {
            self.fields.insert(name.into(), Value::Number(number));
        }
        self
    }

    /// Current value of a measurement, if the device reports it
    #[must_use]
    pub fn reading(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(Value::as_f64)
    }

    /// Carbon dioxide concentration in ppm
    #[must_use]
    pub fn rco2(&self) -> Option<f64> {
        self.reading("rco2")
    }

    /// All numeric measurements keyed by API field name
    ///
    /// Null and non-numeric fields (timestamps, serial numbers, LED mode)
    /// are not readings and are skipped.
    #[must_use]
    pub fn current_readings(&self) -> BTreeMap<String, f64> {
        self.fields
            .iter()
            .filter(|(name, _)| !NON_READING_FIELDS.contains(&name.as_str()))
            .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
            .collect()
    }
}

/// Ordered result of one device listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceList {
    /// Display names, in API order
    pub names: Vec<String>,
    /// Raw records, in API order
    pub devices: Vec<DeviceRecord>,
}

impl DeviceList {
    /// Build from decoded records, preserving order
    #[must_use]
    pub fn from_records(devices: Vec<DeviceRecord>) -> Self {
        let names = devices.iter().map(|d| d.location_name.clone()).collect();
        Self { names, devices }
    }

    /// Number of devices
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the account has no devices
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Whether the account has exactly one device
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.devices.len() == 1
    }

    /// Select a device by its 1-based position
    ///
    /// Zero, negative, and past-the-end positions return `None`.
    #[must_use]
    pub fn get(&self, index: i64) -> Option<&DeviceRecord> {
        if index < 1 {
            return None;
        }
        let position = usize::try_from(index - 1).ok()?;
        self.devices.get(position)
    }
}

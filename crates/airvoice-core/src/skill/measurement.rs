//! Measurements a READY user can ask about

use crate::request::intents;
use airvoice_devices::DeviceRecord;

/// A queryable measurement, tied to one intent and one API field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Carbon dioxide (`rco2`, ppm)
    CarbonDioxide,
    /// PM2.5 (`pm02`, µg/m³)
    ParticulateMatter,
    /// Temperature (`atmp`, °C)
    Temperature,
    /// Relative humidity (`rhum`, %)
    Humidity,
}

impl Measurement {
    /// Every measurement, in the order help text lists them
    pub const ALL: [Measurement; 4] = [
        Self::CarbonDioxide,
        Self::ParticulateMatter,
        Self::Temperature,
        Self::Humidity,
    ];

    /// Measurement requested by an intent
    #[must_use]
    pub fn from_intent(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.intent_name() == name)
    }

    /// Intent that asks for this measurement
    #[must_use]
    pub fn intent_name(&self) -> &'static str {
        match self {
            Self::CarbonDioxide => intents::CARBON_DIOXIDE,
            Self::ParticulateMatter => intents::PARTICULATE_MATTER,
            Self::Temperature => intents::TEMPERATURE,
            Self::Humidity => intents::HUMIDITY,
        }
    }

    /// AirGradient API field carrying the value
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::CarbonDioxide => "rco2",
            Self::ParticulateMatter => "pm02",
            Self::Temperature => "atmp",
            Self::Humidity => "rhum",
        }
    }

    /// Spoken name
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CarbonDioxide => "carbon dioxide",
            Self::ParticulateMatter => "PM2.5",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
        }
    }

    /// Sentence stating a value
    #[must_use]
    pub fn speak(&self, value: f64) -> String {
        let value = format_value(value);
        match self {
            Self::CarbonDioxide => format!("It is currently {} ppm. ", value),
            Self::ParticulateMatter => {
                format!("PM2.5 is currently {} micrograms per cubic meter. ", value)
            }
            Self::Temperature => format!("It is currently {} degrees Celsius. ", value),
            Self::Humidity => format!("Relative humidity is currently {} percent. ", value),
        }
    }

    /// Sentence describing this measurement on a device
    #[must_use]
    pub fn describe(&self, device: &DeviceRecord) -> String {
        match device.reading(self.field()) {
            Some(value) => self.speak(value),
            None => format!(
                "{} isn't reporting {} right now. ",
                device.location_name,
                self.label()
            ),
        }
    }
}

/// Whole numbers are spoken without a decimal part
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_intent() {
        assert_eq!(
            Measurement::from_intent("carbonDioxide"),
            Some(Measurement::CarbonDioxide)
        );
        assert_eq!(
            Measurement::from_intent("humidity"),
            Some(Measurement::Humidity)
        );
        assert_eq!(Measurement::from_intent("AMAZON.HelpIntent"), None);
    }

    #[test]
    fn test_speak_carbon_dioxide() {
        assert_eq!(
            Measurement::CarbonDioxide.speak(734.0),
            "It is currently 734 ppm. "
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(21.5), "21.5");
        assert_eq!(format_value(40.0), "40");
        assert_eq!(format_value(-3.0), "-3");
    }

    #[test]
    fn test_describe_missing_reading() {
        let device = DeviceRecord::new("Garage").with_reading("rco2", 500.0);
        assert_eq!(
            Measurement::Temperature.describe(&device),
            "Garage isn't reporting temperature right now. "
        );
        assert_eq!(
            Measurement::CarbonDioxide.describe(&device),
            "It is currently 500 ppm. "
        );
    }
}

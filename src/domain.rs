use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// one sensor observation, as posted by a node and as kept in the backing file
///
/// wire format:
///     {"timestamp": "2024-05-01T12:00:00Z", "temp": 24.3, "dust": 87, "humidity": 71}
///
/// `temp`, `dust` and `humidity` are required. dust and humidity are whole
/// numbers; a fractional value is rejected rather than truncated.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SensorReading {
    /// when the reading was taken (any rfc 3339 offset, normalised to utc)
    ///
    /// nodes may omit it; the hub stamps the time of receipt before storing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// temperature in celsius
    pub temp: f64,

    /// dust concentration (sensor units)
    pub dust: i64,

    /// relative humidity (0-100%)
    pub humidity: i64,
}

impl SensorReading {
    /// fill in the timestamp with `now` if the node did not send one
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        if self.timestamp.is_none() {
            self.timestamp = Some(now);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_reading_with_offset_timestamp() {
        let reading: SensorReading = serde_json::from_str(
            r#"{"timestamp":"2024-05-01T14:00:00+02:00","temp":24.3,"dust":87,"humidity":71}"#,
        )
        .unwrap();

        assert_eq!(
            reading.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(reading.temp, 24.3);
        assert_eq!(reading.dust, 87);
        assert_eq!(reading.humidity, 71);
    }

    #[test]
    fn timestamp_is_optional() {
        let reading: SensorReading =
            serde_json::from_str(r#"{"temp":21.0,"dust":50,"humidity":60}"#).unwrap();
        assert!(reading.timestamp.is_none());
    }

    #[test]
    fn rejects_missing_required_field() {
        let result = serde_json::from_str::<SensorReading>(r#"{"dust":50,"humidity":60}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_fractional_humidity() {
        let result =
            serde_json::from_str::<SensorReading>(r#"{"temp":21.0,"dust":50,"humidity":60.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_string_temperature() {
        let result =
            serde_json::from_str::<SensorReading>(r#"{"temp":"hot","dust":50,"humidity":60}"#);
        assert!(result.is_err());
    }

    #[test]
    fn stamping_keeps_an_existing_timestamp() {
        let taken = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let reading = SensorReading { timestamp: Some(taken), temp: 20.0, dust: 1, humidity: 2 };
        assert_eq!(reading.stamped(later).timestamp, Some(taken));

        let reading = SensorReading { timestamp: None, temp: 20.0, dust: 1, humidity: 2 };
        assert_eq!(reading.stamped(later).timestamp, Some(later));
    }
}

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use fractic_server_error::ServerError;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidIsoDateTime;

/// Date-time stored as RFC 3339 text with millisecond precision and a `Z`
/// suffix (ex. `2024-12-15T19:30:00.000Z`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ISODateTimeModel(DateTime<Utc>);

impl FromStr for ISODateTimeModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = DateTime::parse_from_rfc3339(s)
            .map_err(|e| InvalidIsoDateTime::with_debug(s, &e))?;
        Ok(ISODateTimeModel(d.with_timezone(&Utc)))
    }
}

impl<'de> Deserialize<'de> for ISODateTimeModel {
    fn deserialize<D>(deserializer: D) -> Result<ISODateTimeModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ISODateTimeModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ISODateTimeModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for ISODateTimeModel {
    fn from(d: DateTime<Utc>) -> Self {
        ISODateTimeModel(d)
    }
}

impl From<ISODateTimeModel> for DateTime<Utc> {
    fn from(m: ISODateTimeModel) -> Self {
        m.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn parses_utc_and_offset_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 12, 15, 19, 30, 0).unwrap();
        let zulu: DateTime<Utc> = ISODateTimeModel::from_str("2024-12-15T19:30:00.000Z")
            .unwrap()
            .into();
        let offset: DateTime<Utc> = ISODateTimeModel::from_str("2024-12-16T04:30:00+09:00")
            .unwrap()
            .into();
        assert_eq!(zulu, expected);
        assert_eq!(offset, expected);
    }

    #[test]
    fn rejects_non_iso_text() {
        assert!(ISODateTimeModel::from_str("Dec 15, 2024").is_err());
        assert!(ISODateTimeModel::from_str("2024-12-15").is_err());
        assert!(serde_json::from_str::<ISODateTimeModel>("\"yesterday\"").is_err());
    }

    #[test]
    fn serializes_with_millis_and_zulu() {
        let model = ISODateTimeModel::from(Utc.with_ymd_and_hms(2024, 12, 15, 19, 30, 0).unwrap());
        assert_eq!(
            serde_json::to_string(&model).unwrap(),
            "\"2024-12-15T19:30:00.000Z\""
        );
    }
}

use crate::{Error, Result};
use chrono::DateTime;
use url::Url;

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const UNKNOWN: &str = "unknown";

/// Time-shifted slice of a live manifest, already formatted for the upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveWindow {
    pub begin: Option<String>,
    pub end: Option<String>,
}

impl LiveWindow {
    /// Build from `begin` and `end` query values holding unix epoch seconds.
    /// Empty values count as absent.
    pub fn from_query(begin: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            begin: parse_param("begin", begin)?,
            end: parse_param("end", end)?,
        })
    }

    /// Without a begin instant the upstream serves its live edge.
    pub fn is_live_edge(&self) -> bool {
        self.begin.is_none()
    }

    /// Point a `master` manifest url at its time-shifted `manifest` variant.
    pub fn apply(&self, url: &Url) -> Url {
        let mut url = url.clone();

        if let Some(begin) = &self.begin {
            let path = url.path().replacen("master", "manifest", 1);
            url.set_path(&path);
            url.query_pairs_mut()
                .append_pair("begin", begin)
                .append_pair("end", self.end.as_deref().unwrap_or(UNKNOWN));
        }

        url
    }
}

/// Compact ISO-8601 UTC timestamp (`20231114T221320Z`) for unix epoch seconds.
pub fn format_timestamp(secs: i64) -> Option<String> {
    DateTime::from_timestamp(secs, 0).map(|x| x.format(TIMESTAMP_FORMAT).to_string())
}

fn parse_param(name: &'static str, value: Option<&str>) -> Result<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|x| !x.is_empty()) else {
        return Ok(None);
    };

    value
        .parse::<i64>()
        .ok()
        .and_then(format_timestamp)
        .map(Some)
        .ok_or_else(|| Error::InvalidParameter {
            name,
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "https://bpprod4linear.akamaized.net/bpk-tv/ch244/output/master.mpd";

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0).unwrap(), "19700101T000000Z");
        assert_eq!(format_timestamp(1700000000).unwrap(), "20231114T221320Z");
        assert_eq!(format_timestamp(1709164800).unwrap(), "20240229T000000Z");
        assert!(format_timestamp(i64::MAX).is_none());
    }

    #[test]
    fn test_live_edge_untouched() {
        let window = LiveWindow::from_query(None, Some("")).unwrap();
        assert!(window.is_live_edge());
        assert_eq!(window.apply(&MASTER.parse().unwrap()).as_str(), MASTER);
    }

    #[test]
    fn test_begin_and_end() {
        let window = LiveWindow::from_query(Some("1700000000"), Some("1700003600")).unwrap();
        assert_eq!(
            window.apply(&MASTER.parse().unwrap()).as_str(),
            "https://bpprod4linear.akamaized.net/bpk-tv/ch244/output/manifest.mpd?begin=20231114T221320Z&end=20231114T231320Z"
        );
    }

    #[test]
    fn test_missing_end_is_unknown() {
        let window = LiveWindow::from_query(Some("0"), None).unwrap();
        assert_eq!(
            window.apply(&MASTER.parse().unwrap()).as_str(),
            "https://bpprod4linear.akamaized.net/bpk-tv/ch244/output/manifest.mpd?begin=19700101T000000Z&end=unknown"
        );
    }

    #[test]
    fn test_end_alone_is_ignored() {
        let window = LiveWindow::from_query(None, Some("1700000000")).unwrap();
        assert_eq!(window.apply(&MASTER.parse().unwrap()).as_str(), MASTER);
    }

    #[test]
    fn test_existing_query_kept() {
        let window = LiveWindow::from_query(Some("1700000000"), None).unwrap();
        let url = window.apply(&format!("{MASTER}?token=abc").parse().unwrap());
        assert_eq!(
            url.query(),
            Some("token=abc&begin=20231114T221320Z&end=unknown")
        );
    }

    #[test]
    fn test_invalid_timestamp() {
        assert!(matches!(
            LiveWindow::from_query(Some("yesterday"), None),
            Err(Error::InvalidParameter { name: "begin", .. })
        ));
        assert!(matches!(
            LiveWindow::from_query(Some("0"), Some("99999999999999999")),
            Err(Error::InvalidParameter { name: "end", .. })
        ));
    }
}

//! The six fixed metrics published by the telemetry channel

/// A metric plotted on the dashboard.
///
/// The mapping to `field1`..`field6` is a convention of the channel and is
/// treated as a fixed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Pm25,
    Pm10,
    Ozone,
    Humidity,
    Temperature,
    Co,
}

impl Metric {
    /// Display order of the dashboard panels
    pub const ALL: [Metric; 6] = [
        Metric::Pm25,
        Metric::Pm10,
        Metric::Ozone,
        Metric::Humidity,
        Metric::Temperature,
        Metric::Co,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Pm25 => "PM2.5",
            Metric::Pm10 => "PM10",
            Metric::Ozone => "Ozone",
            Metric::Humidity => "Humidity",
            Metric::Temperature => "Temperature",
            Metric::Co => "CO",
        }
    }

    /// Feed field carrying this metric
    pub fn source_field(self) -> &'static str {
        match self {
            Metric::Pm25 => "field1",
            Metric::Pm10 => "field2",
            Metric::Ozone => "field3",
            Metric::Humidity => "field4",
            Metric::Temperature => "field5",
            Metric::Co => "field6",
        }
    }

    /// URL-safe identifier, used for `/charts/{slug}.svg`
    pub fn slug(self) -> &'static str {
        match self {
            Metric::Pm25 => "pm25",
            Metric::Pm10 => "pm10",
            Metric::Ozone => "ozone",
            Metric::Humidity => "humidity",
            Metric::Temperature => "temperature",
            Metric::Co => "co",
        }
    }

    /// Id of the graph panel on the dashboard page
    pub fn dom_id(self) -> String {
        format!("{}-graph", self.slug())
    }

    pub fn from_slug(slug: &str) -> Option<Metric> {
        Metric::ALL
            .into_iter()
            .find(|m| m.slug().eq_ignore_ascii_case(slug))
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_field_mapping() {
        let fields: Vec<&str> = Metric::ALL.iter().map(|m| m.source_field()).collect();
        assert_eq!(fields, vec!["field1", "field2", "field3", "field4", "field5", "field6"]);

        let names: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["PM2.5", "PM10", "Ozone", "Humidity", "Temperature", "CO"]);
    }

    #[test]
    fn test_slug_lookup() {
        assert_eq!(Metric::from_slug("pm25"), Some(Metric::Pm25));
        assert_eq!(Metric::from_slug("CO"), Some(Metric::Co));
        assert_eq!(Metric::from_slug("pm2.5"), None);
        assert_eq!(Metric::Temperature.dom_id(), "temperature-graph");
    }
}

use crate::entities::{course_entity, weather_log_entity};
use crate::models::CourseSummary;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// `true` skips the cached reading and fetches a fresh one. Any other
    /// value is ignored.
    pub refresh: Option<String>,
}

impl WeatherQuery {
    pub fn force_refresh(&self) -> bool {
        self.refresh.as_deref().map(str::trim) == Some("true")
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherHistoryQuery {
    /// Days to look back, 1 to 30. Defaults to 7, also when not a number.
    pub days: Option<String>,
}

impl WeatherHistoryQuery {
    pub fn days(&self) -> Option<i64> {
        self.days.as_deref().and_then(|d| d.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeatherResponse {
    pub id: i32,
    pub course_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseSummary>,
    pub date: NaiveDate,
    /// Celsius
    pub temperature: Option<f64>,
    pub humidity: Option<i32>,
    /// km/h
    pub wind_speed: Option<f64>,
    #[schema(example = "E")]
    pub wind_direction: String,
    pub weather_condition: String,
    /// mm
    pub precipitation: Option<f64>,
    /// km
    pub visibility: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherResponse {
    pub fn with_course(mut self, course: &course_entity::Model) -> Self {
        self.course = Some(course.clone().into());
        self
    }
}

impl From<weather_log_entity::Model> for WeatherResponse {
    fn from(m: weather_log_entity::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            course: None,
            date: m.date,
            temperature: m.temperature,
            humidity: m.humidity,
            wind_speed: m.wind_speed,
            wind_direction: m.wind_direction,
            weather_condition: m.weather_condition,
            precipitation: m.precipitation,
            visibility: m.visibility,
            fetched_at: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refresh(value: Option<&str>) -> bool {
        WeatherQuery {
            refresh: value.map(str::to_string),
        }
        .force_refresh()
    }

    fn days(value: Option<&str>) -> Option<i64> {
        WeatherHistoryQuery {
            days: value.map(str::to_string),
        }
        .days()
    }

    #[test]
    fn test_only_true_forces_refresh() {
        assert!(refresh(Some("true")));
        assert!(!refresh(None));
        assert!(!refresh(Some("false")));
        assert!(!refresh(Some("1")));
        assert!(!refresh(Some("yes")));
        assert!(!refresh(Some("")));
    }

    #[test]
    fn test_unparseable_days_falls_back_to_default() {
        assert_eq!(days(Some("14")), Some(14));
        assert_eq!(days(Some("-3")), Some(-3));
        assert_eq!(days(Some("abc")), None);
        assert_eq!(days(Some("7.5")), None);
        assert_eq!(days(Some("")), None);
        assert_eq!(days(None), None);
    }
}

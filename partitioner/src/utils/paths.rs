use chrono::NaiveDate;

pub struct PathBuilder {
    table_location: String,
    date: NaiveDate,
    hour: u32,
    minute: u32,
}

impl PathBuilder {
    pub fn new(table_location: &str, date: NaiveDate) -> Self {
        Self {
            table_location: table_location.to_string(),
            date,
            hour: 0,
            minute: 0,
        }
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = hour;
        self
    }

    pub fn with_minute(mut self, minute: u32) -> Self {
        self.minute = minute;
        self
    }

    pub fn date_value(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn hour_value(&self) -> String {
        format!("{:02}", self.hour)
    }

    pub fn minute_value(&self) -> String {
        format!("{:02}", self.minute)
    }

    pub fn build_partition_values(&self) -> [String; 3] {
        [self.date_value(), self.hour_value(), self.minute_value()]
    }

    /// `{table_location}/{YYYY-MM-DD}/{HH}/{MM}`; the table location is used as-is.
    pub fn build_location(&self) -> String {
        format!(
            "{}/{}/{:02}/{:02}",
            self.table_location,
            self.date_value(),
            self.hour,
            self.minute
        )
    }
}

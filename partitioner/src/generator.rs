use chrono::{Days, NaiveDate};
use common::Result;

use crate::models::{PartitionDescriptor, StorageDescriptor, TableMetadata};
use crate::utils::paths::PathBuilder;

pub const HOURS_PER_DAY: usize = 24;
pub const MINUTES_PER_HOUR: usize = 60;
pub const PARTITIONS_PER_DAY: usize = HOURS_PER_DAY * MINUTES_PER_HOUR;

/// Produces one partition per minute for every day in
/// `[start_date, start_date + num_days)`, ordered by day, hour, then minute.
#[derive(Debug, Clone)]
pub struct PartitionGenerator {
    start_date: NaiveDate,
    num_days: u32,
    template: StorageDescriptor,
}

impl PartitionGenerator {
    pub fn new(start_date: NaiveDate, num_days: u32, template: StorageDescriptor) -> Result<Self> {
        if start_date
            .checked_add_days(Days::new(u64::from(num_days)))
            .is_none()
        {
            return Err(common::Error::InvalidInput(format!(
                "{} days from {} is outside the supported calendar range",
                num_days, start_date
            )));
        }

        Ok(Self {
            start_date,
            num_days,
            template,
        })
    }

    pub fn for_table(start_date: NaiveDate, num_days: u32, table: &TableMetadata) -> Result<Self> {
        Self::new(start_date, num_days, table.storage.clone())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// First day not covered.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Days::new(u64::from(self.num_days))
    }

    pub fn partition_count(&self) -> usize {
        self.num_days as usize * PARTITIONS_PER_DAY
    }

    /// Restartable: every call walks the range from the beginning.
    pub fn iter(&self) -> PartitionIter<'_> {
        PartitionIter {
            generator: self,
            position: 0,
            total: self.partition_count(),
        }
    }

    pub fn generate(&self) -> Vec<PartitionDescriptor> {
        self.iter().collect()
    }

    fn descriptor_at(&self, index: usize) -> PartitionDescriptor {
        let day = index / PARTITIONS_PER_DAY;
        let hour = (index / MINUTES_PER_HOUR) % HOURS_PER_DAY;
        let minute = index % MINUTES_PER_HOUR;

        let date = self.start_date + Days::new(day as u64);
        let path = PathBuilder::new(&self.template.location, date)
            .with_hour(hour as u32)
            .with_minute(minute as u32);

        PartitionDescriptor {
            values: path.build_partition_values(),
            storage: StorageDescriptor {
                location: path.build_location(),
                input_format: self.template.input_format.clone(),
                output_format: self.template.output_format.clone(),
                serde_info: self.template.serde_info.clone(),
            },
        }
    }
}

impl<'a> IntoIterator for &'a PartitionGenerator {
    type Item = PartitionDescriptor;
    type IntoIter = PartitionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct PartitionIter<'a> {
    generator: &'a PartitionGenerator,
    position: usize,
    total: usize,
}

impl Iterator for PartitionIter<'_> {
    type Item = PartitionDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.total {
            return None;
        }
        let descriptor = self.generator.descriptor_at(self.position);
        self.position += 1;
        Some(descriptor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PartitionIter<'_> {}

/// Materialized form of [`PartitionGenerator`].
pub fn generate_partition_inputs(
    start_date: NaiveDate,
    num_days: u32,
    template: &StorageDescriptor,
) -> Result<Vec<PartitionDescriptor>> {
    Ok(PartitionGenerator::new(start_date, num_days, template.clone())?.generate())
}

pub mod registration;
pub use registration::{PartitionRegistrationService, RegistrationRequest, RegistrationSummary};

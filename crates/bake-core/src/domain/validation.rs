use crate::domain::{
    entities::{FinderDescriptor, GeneratedArtifactSet, Statement},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_statement(statement: &Statement) -> Result<(), DomainError> {
        statement.validate()
    }

    pub fn validate_finder(name: &str, descriptor: &FinderDescriptor) -> Result<(), DomainError> {
        crate::domain::entities::finder::validate_name(name)?;
        descriptor.validate()
    }

    pub fn validate_artifact_set(set: &GeneratedArtifactSet) -> Result<(), DomainError> {
        set.validate()
    }
}

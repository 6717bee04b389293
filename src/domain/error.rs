use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Region lookup failed: {message}")]
    RegionLookup { message: String },

    #[error("Billing query failed: {message}")]
    BillingQuery { message: String },

    #[error("Inventory error: {service} - {message}")]
    Inventory { service: String, message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn region_lookup(message: impl Into<String>) -> Self {
        Self::RegionLookup {
            message: message.into(),
        }
    }

    pub fn billing_query(message: impl Into<String>) -> Self {
        Self::BillingQuery {
            message: message.into(),
        }
    }

    pub fn inventory(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inventory {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

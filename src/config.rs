//! Originator identity used for every generated file.

use crate::error::Result;
use crate::field::{check_digits, check_text};
use log::debug;

pub const ENV_COMPANY_NAME: &str = "ACH_COMPANY_NAME";
pub const ENV_COMPANY_ID: &str = "ACH_COMPANY_ID";
pub const ENV_ROUTING_NUMBER: &str = "ACH_ROUTING_NUMBER";
pub const ENV_IMMEDIATE_DESTINATION: &str = "ACH_IMMEDIATE_DESTINATION";
pub const ENV_DESTINATION_NAME: &str = "ACH_DESTINATION_NAME";
pub const ENV_ORIGIN_NAME: &str = "ACH_ORIGIN_NAME";
pub const ENV_ENTRY_DESCRIPTION: &str = "ACH_ENTRY_DESCRIPTION";

const DEFAULT_COMPANY_NAME: &str = "TEST COMPANY";
const DEFAULT_COMPANY_ID: &str = "COMPANY123";
const DEFAULT_ROUTING_NUMBER: &str = "123456789";
const DEFAULT_ENTRY_DESCRIPTION: &str = "PAYROLL";
const DEFAULT_INDIVIDUAL_NAME: &str = "CUSTOMER";

/// Company and bank identifiers written into the header and control records.
///
/// Passed explicitly to the assembler, so different originators can
/// generate files side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginatorConfig {
    /// Company name in the batch header (max 16).
    pub company_name: String,

    /// Company identification (max 10).
    pub company_id: String,

    /// Originating bank routing number (9 digits).
    pub routing_number: String,

    /// Immediate destination in the file header (max 10).
    pub immediate_destination: String,

    /// Immediate destination name (max 23).
    pub destination_name: String,

    /// Immediate origin name (max 23).
    pub origin_name: String,

    /// Company entry description (max 9).
    pub entry_description: String,

    /// Name written for entries that carry none (max 22).
    pub default_individual_name: String,
}

impl OriginatorConfig {
    /// Creates a configuration, deriving the file header names and
    /// destination from the company identity.
    pub fn new(
        company_name: impl Into<String>,
        company_id: impl Into<String>,
        routing_number: impl Into<String>,
    ) -> Self {
        let company_name = company_name.into();
        let routing_number = routing_number.into();
        OriginatorConfig {
            immediate_destination: routing_number.clone(),
            destination_name: company_name.clone(),
            origin_name: company_name.clone(),
            company_name,
            company_id: company_id.into(),
            routing_number,
            entry_description: DEFAULT_ENTRY_DESCRIPTION.to_string(),
            default_individual_name: DEFAULT_INDIVIDUAL_NAME.to_string(),
        }
    }

    /// Reads the configuration from `ACH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for absent or blank keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = OriginatorConfig::new(
            get(ENV_COMPANY_NAME).unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
            get(ENV_COMPANY_ID).unwrap_or_else(|| DEFAULT_COMPANY_ID.to_string()),
            get(ENV_ROUTING_NUMBER).unwrap_or_else(|| DEFAULT_ROUTING_NUMBER.to_string()),
        );
        if let Some(destination) = get(ENV_IMMEDIATE_DESTINATION) {
            config.immediate_destination = destination;
        }
        if let Some(name) = get(ENV_DESTINATION_NAME) {
            config.destination_name = name;
        }
        if let Some(name) = get(ENV_ORIGIN_NAME) {
            config.origin_name = name;
        }
        if let Some(description) = get(ENV_ENTRY_DESCRIPTION) {
            config.entry_description = description;
        }

        config.validate()?;
        debug!(
            "Loaded originator config for {} ({})",
            config.company_name, config.company_id
        );
        Ok(config)
    }

    /// Checks every identifier against the width of the slot it lands in.
    pub fn validate(&self) -> Result<()> {
        check_text("company name", &self.company_name, 16)?;
        check_text("company id", &self.company_id, 10)?;
        check_digits("originating routing number", &self.routing_number, 9)?;
        check_text("immediate destination", &self.immediate_destination, 10)?;
        check_text("destination name", &self.destination_name, 23)?;
        check_text("origin name", &self.origin_name, 23)?;
        check_text("entry description", &self.entry_description, 9)?;
        check_text("default individual name", &self.default_individual_name, 22)?;
        Ok(())
    }

    /// The 8-digit originating DFI identification.
    ///
    /// Only meaningful for a validated config, which [`FileAssembler::new`]
    /// guarantees.
    ///
    /// [`FileAssembler::new`]: crate::assembler::FileAssembler::new
    pub fn originating_dfi(&self) -> &str {
        self.routing_number.get(..8).unwrap_or(&self.routing_number)
    }
}

impl Default for OriginatorConfig {
    fn default() -> Self {
        OriginatorConfig::new(
            DEFAULT_COMPANY_NAME,
            DEFAULT_COMPANY_ID,
            DEFAULT_ROUTING_NUMBER,
        )
    }
}

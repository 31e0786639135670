//! Company entity type - partner companies on either end of a waybill

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::validate::ValidationError;

/// Contact details for a company
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyContact {
    /// Contact person name
    pub name: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal pincode
    pub pincode: String,

    /// Phone number
    pub phone: String,
}

impl CompanyContact {
    /// Check minimum-length constraints on every field
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_min("contact.name", &self.name, 2)?;
        ValidationError::require_min("contact.address", &self.address, 5)?;
        ValidationError::require_min("contact.city", &self.city, 2)?;
        ValidationError::require_numeric("contact.pincode", &self.pincode)?;
        ValidationError::require_min("contact.pincode", &self.pincode, 6)?;
        ValidationError::require_numeric("contact.phone", &self.phone)?;
        ValidationError::require_min("contact.phone", &self.phone, 10)?;
        Ok(())
    }
}

/// A Company entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: EntityId,

    /// Short company code
    pub company_code: String,

    /// Registered company name
    pub company_name: String,

    /// Contact details
    pub contact: CompanyContact,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Company {
    const PREFIX: &'static str = "CMP";
    const STORE_KEY: &'static str = "companies";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.company_name
    }

    fn status(&self) -> &str {
        "active"
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Company {
    /// Register a new company
    pub fn new(
        company_code: impl Into<String>,
        company_name: impl Into<String>,
        contact: CompanyContact,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Cmp),
            company_code: company_code.into(),
            company_name: company_name.into(),
            contact,
            created: Utc::now(),
        }
    }

    /// Check schema constraints
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_min("company_code", &self.company_code, 2)?;
        ValidationError::require_min("company_name", &self.company_name, 3)?;
        self.contact.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contact() -> CompanyContact {
        CompanyContact {
            name: "S. Patel".to_string(),
            address: "14 MG Road".to_string(),
            city: "Pune".to_string(),
            pincode: "411001".to_string(),
            phone: "9822012345".to_string(),
        }
    }

    #[test]
    fn test_company_validate() {
        let cmp = Company::new("ACME", "Acme Freight Pvt Ltd", sample_contact());
        assert!(cmp.validate().is_ok());
        assert!(cmp.id.to_string().starts_with("CMP-"));
    }

    #[test]
    fn test_company_rejects_short_pincode() {
        let mut contact = sample_contact();
        contact.pincode = "411".to_string();
        let cmp = Company::new("ACME", "Acme Freight Pvt Ltd", contact);
        assert!(cmp.validate().is_err());
    }

    #[test]
    fn test_company_rejects_alpha_phone() {
        let mut contact = sample_contact();
        contact.phone = "98220ABCDE".to_string();
        let cmp = Company::new("ACME", "Acme Freight Pvt Ltd", contact);
        assert!(matches!(
            cmp.validate(),
            Err(ValidationError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_company_roundtrip() {
        let cmp = Company::new("ACME", "Acme Freight Pvt Ltd", sample_contact());
        let json = serde_json::to_string(&cmp).unwrap();
        let parsed: Company = serde_json::from_str(&json).unwrap();
        assert_eq!(cmp.id, parsed.id);
        assert_eq!(parsed.contact.city, "Pune");
    }
}

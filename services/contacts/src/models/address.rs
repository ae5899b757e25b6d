//! Address model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::Patch;
use crate::validation::{ValidationErrors, Validator};

const STREET_MAX: usize = 200;
const CITY_MAX: usize = 100;
const PROVINCE_MAX: usize = 100;
const COUNTRY_MAX: usize = 100;
const POSTAL_CODE_MAX: usize = 10;

/// Address entity, owned by exactly one contact
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Address {
    pub id: i64,
    pub contact_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New address creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
}

/// Address update payload
#[derive(Debug, Clone, PartialEq)]
pub struct AddressChanges {
    pub street: Patch<String>,
    pub city: Patch<String>,
    pub province: Patch<String>,
    pub country: String,
    pub postal_code: Patch<String>,
}

impl AddressChanges {
    /// Merge the changes over a stored address
    pub fn apply(self, address: &mut Address) {
        self.street.apply_to(&mut address.street);
        self.city.apply_to(&mut address.city);
        self.province.apply_to(&mut address.province);
        address.country = self.country;
        self.postal_code.apply_to(&mut address.postal_code);
    }
}

/// Request for address creation; every field is mandatory
#[derive(Debug, Deserialize)]
pub struct CreateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl CreateAddressRequest {
    pub fn validate(self) -> Result<NewAddress, ValidationErrors> {
        let mut validator = Validator::new();
        let street = validator.required("street", self.street, STREET_MAX);
        let city = validator.required("city", self.city, CITY_MAX);
        let province = validator.required("province", self.province, PROVINCE_MAX);
        let country = validator.required("country", self.country, COUNTRY_MAX);
        let postal_code = validator.required("postal_code", self.postal_code, POSTAL_CODE_MAX);
        validator.finish()?;

        Ok(NewAddress {
            street,
            city,
            province,
            country,
            postal_code,
        })
    }
}

/// Request for address update; only `country` is mandatory
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAddressRequest {
    #[serde(default)]
    pub street: Patch<String>,
    #[serde(default)]
    pub city: Patch<String>,
    #[serde(default)]
    pub province: Patch<String>,
    #[serde(default)]
    pub country: Patch<String>,
    #[serde(default)]
    pub postal_code: Patch<String>,
}

impl UpdateAddressRequest {
    pub fn validate(self) -> Result<AddressChanges, ValidationErrors> {
        let mut validator = Validator::new();
        let street = validator.optional_patch("street", self.street, STREET_MAX);
        let city = validator.optional_patch("city", self.city, CITY_MAX);
        let province = validator.optional_patch("province", self.province, PROVINCE_MAX);
        let country = validator.required_patch("country", self.country, COUNTRY_MAX);
        let postal_code =
            validator.optional_patch("postal_code", self.postal_code, POSTAL_CODE_MAX);
        validator.finish()?;

        Ok(AddressChanges {
            street,
            city,
            province,
            country,
            postal_code,
        })
    }
}

/// Response for address operations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressResponse {
    pub id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            city: address.city,
            province: address.province,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_every_field() {
        let request = CreateAddressRequest {
            street: Some("test".to_string()),
            city: None,
            province: Some("test".to_string()),
            country: Some(String::new()),
            postal_code: Some("123456789012".to_string()),
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.get("city").unwrap(), ["The city field is required."]);
        assert_eq!(
            errors.get("country").unwrap(),
            ["The country field is required."]
        );
        assert_eq!(
            errors.get("postal_code").unwrap(),
            ["The postal code field must not be greater than 10 characters."]
        );
        assert!(errors.get("street").is_none());
    }

    #[test]
    fn test_update_keeps_unsent_fields() {
        let mut stored = Address {
            id: 1,
            contact_id: 1,
            street: Some("Jalan".to_string()),
            city: Some("Jakarta".to_string()),
            province: Some("DKI".to_string()),
            country: "Indonesia".to_string(),
            postal_code: Some("12345".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let request: UpdateAddressRequest =
            serde_json::from_str(r#"{"country": "Malaysia", "city": "Kuala Lumpur", "province": null}"#)
                .unwrap();
        request.validate().unwrap().apply(&mut stored);

        assert_eq!(stored.street.as_deref(), Some("Jalan"));
        assert_eq!(stored.city.as_deref(), Some("Kuala Lumpur"));
        assert_eq!(stored.province, None);
        assert_eq!(stored.country, "Malaysia");
        assert_eq!(stored.postal_code.as_deref(), Some("12345"));
    }

    #[test]
    fn test_update_requires_country() {
        let request: UpdateAddressRequest =
            serde_json::from_str(r#"{"street": "update", "postal_code": "22222"}"#).unwrap();

        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.get("country").unwrap(),
            ["The country field is required."]
        );
    }
}

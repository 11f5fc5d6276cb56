use serde::Serialize;

use crate::intake::fields::{
    parse_count, FieldDescriptor, FieldErrors, FieldKind, SectionDescriptor, ValidationError,
    Validator,
};

/// Postal address section shared by the profile and company wizards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSection {
    pub address_line: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

/// Nested address block sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPayload {
    pub address_line: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: u32,
}

impl AddressSection {
    pub const NAME: &'static str = "address";

    pub fn descriptor(title: &'static str) -> SectionDescriptor {
        SectionDescriptor::new(
            Self::NAME,
            title,
            vec![
                FieldDescriptor::text("address_line", "Address Line"),
                FieldDescriptor::text("area", "Area"),
                FieldDescriptor::text("city", "City"),
                FieldDescriptor::text("state", "State"),
                FieldDescriptor::text("country", "Country"),
                FieldDescriptor::new(
                    "pincode",
                    "Pincode",
                    FieldKind::Integer,
                    Validator::Custom(std::sync::Arc::new(|raw| {
                        parse_pincode(raw).map(|pin| pin.to_string())
                    })),
                ),
            ],
        )
    }

    pub fn value(&self, key: &str) -> Option<String> {
        let value = match key {
            "address_line" => &self.address_line,
            "area" => &self.area,
            "city" => &self.city,
            "state" => &self.state,
            "country" => &self.country,
            "pincode" => &self.pincode,
            _ => return None,
        };
        Some(value.clone())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let slot = match key {
            "address_line" => &mut self.address_line,
            "area" => &mut self.area,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "country" => &mut self.country,
            "pincode" => &mut self.pincode,
            other => return Err(ValidationError::new(format!("Unknown address field `{other}`"))),
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Converts the section into its payload block, recording coercion failures.
    pub fn to_payload(&self, errors: &mut FieldErrors) -> AddressPayload {
        let pincode = match parse_pincode(&self.pincode) {
            Ok(pin) => pin,
            Err(message) => {
                errors.push(Self::NAME, "pincode", message);
                0
            }
        };
        AddressPayload {
            address_line: self.address_line.trim().to_string(),
            area: self.area.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            country: self.country.trim().to_string(),
            pincode,
        }
    }
}

fn parse_pincode(raw: &str) -> Result<u32, String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() || compact.len() > 10 {
        return Err("Enter a numeric postal code".to_string());
    }
    parse_count(&compact).map_err(|_| "Enter a numeric postal code".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pincode_with_inner_space_is_accepted() {
        let section = AddressSection {
            pincode: "395 009".into(),
            ..AddressSection::default()
        };
        let mut errors = FieldErrors::new();
        assert_eq!(section.to_payload(&mut errors).pincode, 395009);
        assert!(errors.is_empty());
    }

    #[test]
    fn non_numeric_pincode_is_reported_not_zeroed_silently() {
        let section = AddressSection {
            pincode: "SURAT".into(),
            ..AddressSection::default()
        };
        let mut errors = FieldErrors::new();
        section.to_payload(&mut errors);
        assert_eq!(errors.for_field("pincode"), Some("Enter a numeric postal code"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut section = AddressSection::default();
        assert!(section.set_value("zip", "1").is_err());
        assert_eq!(section.value("zip"), None);
    }
}

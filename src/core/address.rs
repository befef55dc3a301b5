//! The postal address as entered in the input form.

use std::fmt;

/// Address fields collected by the input form. Any subset may be filled in;
/// the display string joins the non-empty parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl InputAddress {
    /// True when every field is empty. An empty address is never submitted
    /// to the fetch collaborator.
    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.postal_code.is_empty()
    }
}

impl fmt::Display for InputAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.street, &self.city, &self.state, &self.postal_code]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(street: &str, city: &str, state: &str, postal_code: &str) -> InputAddress {
        InputAddress {
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            postal_code: postal_code.to_string(),
        }
    }

    #[test]
    fn is_empty_requires_all_fields_empty() {
        assert!(InputAddress::default().is_empty());
        assert!(!addr("123 Main St", "", "", "").is_empty());
        assert!(!addr("", "Richmond", "", "").is_empty());
        assert!(!addr("", "", "VA", "").is_empty());
        assert!(!addr("", "", "", "23220").is_empty());
        assert!(!addr("123 Main St", "Richmond", "VA", "23220").is_empty());
    }

    #[test]
    fn display_joins_all_fields() {
        assert_eq!(
            addr("123 Main St", "Richmond", "VA", "23220").to_string(),
            "123 Main St, Richmond, VA, 23220"
        );
    }

    #[test]
    fn display_omits_empty_fields() {
        assert_eq!(
            addr("", "Richmond", "VA", "23220").to_string(),
            "Richmond, VA, 23220"
        );
        assert_eq!(
            addr("123 Main St", "", "VA", "23220").to_string(),
            "123 Main St, VA, 23220"
        );
        assert_eq!(
            addr("123 Main St", "Richmond", "", "23220").to_string(),
            "123 Main St, Richmond, 23220"
        );
        assert_eq!(
            addr("123 Main St", "Richmond", "VA", "").to_string(),
            "123 Main St, Richmond, VA"
        );
        assert_eq!(
            addr("123 Main St", "", "", "23220").to_string(),
            "123 Main St, 23220"
        );
        assert_eq!(addr("", "Richmond", "VA", "").to_string(), "Richmond, VA");
    }

    #[test]
    fn display_single_field() {
        assert_eq!(addr("123 Main St", "", "", "").to_string(), "123 Main St");
        assert_eq!(addr("", "Richmond", "", "").to_string(), "Richmond");
        assert_eq!(addr("", "", "VA", "").to_string(), "VA");
        assert_eq!(addr("", "", "", "23220").to_string(), "23220");
    }

    #[test]
    fn display_empty_address_is_empty_string() {
        assert_eq!(InputAddress::default().to_string(), "");
    }
}

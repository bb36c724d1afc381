//! Normalized customer type.

use serde::{Deserialize, Serialize};

/// A logged-in customer.
///
/// Read-only projection of gateway account data; held in memory by the
/// session container for the current page lifecycle only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl Customer {
    /// Name to greet the customer with: "First Last" when either name is
    /// set, otherwise the email address.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => String::new(),
        };

        if name.trim().is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(first: Option<&str>, last: Option<&str>) -> Customer {
        Customer {
            id: "gid://shopify/Customer/1".to_string(),
            email: "pat@example.com".to_string(),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            phone: None,
        }
    }

    #[test]
    fn test_display_name_joins_names() {
        assert_eq!(customer(Some("Pat"), Some("Reyes")).display_name(), "Pat Reyes");
        assert_eq!(customer(Some("Pat"), None).display_name(), "Pat");
        assert_eq!(customer(None, Some("Reyes")).display_name(), "Reyes");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(customer(None, None).display_name(), "pat@example.com");
    }
}

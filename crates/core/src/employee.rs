/// Placeholder shown when a profile field has no value on file.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Core identity fields for a worker, as resolved from the HR system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub first_name: String,
    pub country: String,
}

/// Emergency contact details on file for a worker. All fields are optional;
/// display accessors fall back to [`NOT_AVAILABLE`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmergencyContactSnapshot {
    pub formatted_name: Option<String>,
    pub formatted_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl EmergencyContactSnapshot {
    pub fn is_empty(&self) -> bool {
        self.formatted_name.is_none()
            && self.formatted_address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }

    pub fn name(&self) -> &str {
        self.formatted_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// The HR system formats addresses with embedded newlines; flatten them
    /// to a comma-separated line for chat display.
    pub fn address(&self) -> String {
        match self.formatted_address.as_deref() {
            Some(address) => address.replace('\n', ", "),
            None => NOT_AVAILABLE.to_owned(),
        }
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::{EmergencyContactSnapshot, NOT_AVAILABLE};

    #[test]
    fn missing_fields_fall_back_to_not_available() {
        let snapshot = EmergencyContactSnapshot {
            formatted_name: Some("Jordan Reyes".to_owned()),
            formatted_address: None,
            phone: None,
            email: None,
        };

        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.name(), "Jordan Reyes");
        assert_eq!(snapshot.address(), NOT_AVAILABLE);
        assert_eq!(snapshot.phone(), NOT_AVAILABLE);
        assert_eq!(snapshot.email(), NOT_AVAILABLE);
    }

    #[test]
    fn multi_line_addresses_flatten_for_chat() {
        let snapshot = EmergencyContactSnapshot {
            formatted_address: Some("42 Sunrise Lane\nSan Jose, CA 95112\nUnited States of America".to_owned()),
            ..EmergencyContactSnapshot::default()
        };

        assert_eq!(
            snapshot.address(),
            "42 Sunrise Lane, San Jose, CA 95112, United States of America"
        );
    }

    #[test]
    fn empty_snapshot_reports_no_contact_on_file() {
        assert!(EmergencyContactSnapshot::default().is_empty());
    }
}

//! Helpline directory

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HelplineContact {
    pub name: &'static str,
    pub number: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HelplineGroup {
    pub category: &'static str,
    pub contacts: Vec<HelplineContact>,
}

const fn contact(name: &'static str, number: &'static str) -> HelplineContact {
    HelplineContact { name, number }
}

/// Fixed public helpline numbers, grouped for display
pub fn helpline_directory() -> Vec<HelplineGroup> {
    vec![
        HelplineGroup {
            category: "Emergency Services",
            contacts: vec![
                contact("Police", "100"),
                contact("Fire", "101"),
                contact("Ambulance", "102"),
                contact("Disaster Management", "108"),
            ],
        },
        HelplineGroup {
            category: "Municipal Services",
            contacts: vec![
                contact("Water Supply", "1800-425-1234"),
                contact("Waste Management", "1800-425-5369"),
                contact("Property Tax", "1800-425-4567"),
                contact("Birth/Death Certificates", "1800-425-4567"),
            ],
        },
        HelplineGroup {
            category: "Public Utilities",
            contacts: vec![
                contact("Electricity", "1912"),
                contact("Gas Leak", "1906"),
                contact("Telecom Services", "198"),
                contact("Postal Services", "1800-266-6868"),
            ],
        },
        HelplineGroup {
            category: "Health & Social Services",
            contacts: vec![
                contact("Child Helpline", "1098"),
                contact("Women Helpline", "1091"),
                contact("Senior Citizen Helpline", "14567"),
                contact("Mental Health Support", "1800-599-0019"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_shape() {
        let groups = helpline_directory();
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.contacts.len() == 4));
        assert_eq!(groups[0].contacts[0].number, "100");
    }
}

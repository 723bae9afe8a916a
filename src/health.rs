//! Static display data for the suggestions panel: seasonal disease
//! records, the monsoon alert, and the quick-action shortcuts. All
//! hardcoded; this app has no clinical data source behind it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl Risk {
    pub fn label(&self) -> &'static str {
        match self {
            Risk::Low => "low risk",
            Risk::Medium => "medium risk",
            Risk::High => "high risk",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DiseaseInfo {
    pub name: &'static str,
    pub symptoms: &'static [&'static str],
    pub prevention: &'static [&'static str],
    pub risk: Risk,
}

pub const DISEASES: &[DiseaseInfo] = &[
    DiseaseInfo {
        name: "Dengue",
        symptoms: &["High fever", "Severe headache", "Joint pain", "Rash"],
        prevention: &["Eliminate stagnant water", "Use mosquito nets", "Wear long sleeves"],
        risk: Risk::High,
    },
    DiseaseInfo {
        name: "Malaria",
        symptoms: &["Fever", "Chills", "Sweating", "Fatigue"],
        prevention: &["Use bed nets", "Apply repellent", "Take antimalarial drugs"],
        risk: Risk::Medium,
    },
];

pub const MONSOON_ALERT_TITLE: &str = "Rainy Season Alert";
pub const MONSOON_ALERT_BODY: &str =
    "Increased risk of water-borne diseases during monsoon season.";

pub const QUICK_ACTIONS: &[&str] = &[
    "Schedule Vaccination",
    "Emergency Contacts",
    "Health Checkup",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_labels() {
        assert_eq!(Risk::High.label(), "high risk");
        assert_eq!(Risk::Medium.label(), "medium risk");
        assert_eq!(Risk::Low.label(), "low risk");
    }

    #[test]
    fn test_disease_records_are_complete() {
        assert_eq!(DISEASES.len(), 2);
        for disease in DISEASES {
            assert!(!disease.symptoms.is_empty());
            assert!(!disease.prevention.is_empty());
        }
        assert_eq!(DISEASES[0].name, "Dengue");
        assert_eq!(DISEASES[0].risk, Risk::High);
    }
}

//! Display language and the localized strings owned by the core

use serde::{Deserialize, Serialize};

use crate::models::ComplaintStatus;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Bn,
    Te,
}

impl Language {
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
            Language::Te => "te",
        }
    }

    /// Resolve a language code, falling back to English
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hi" => Language::Hi,
            "bn" => Language::Bn,
            "te" => Language::Te,
            _ => Language::En,
        }
    }
}

/// Localized name of a lifecycle stage
pub fn stage_label(lang: Language, status: ComplaintStatus) -> &'static str {
    use ComplaintStatus::*;
    match (lang, status) {
        (Language::En, Registered) => "Registered",
        (Language::En, Assigned) => "Assigned",
        (Language::En, InProgress) => "In Progress",
        (Language::En, Resolved) => "Resolved",

        (Language::Hi, Registered) => "पंजीकृत",
        (Language::Hi, Assigned) => "सौंपा गया",
        (Language::Hi, InProgress) => "प्रगति में",
        (Language::Hi, Resolved) => "हल हो गई",

        (Language::Bn, Registered) => "নিবন্ধিত",
        (Language::Bn, Assigned) => "নিযুক্ত",
        (Language::Bn, InProgress) => "চলমান",
        (Language::Bn, Resolved) => "সমাধান হয়েছে",

        (Language::Te, Registered) => "నమోదు చేయబడింది",
        (Language::Te, Assigned) => "కేటాయించబడింది",
        (Language::Te, InProgress) => "ప్రోగ్రెస్‌లో ఉంది",
        (Language::Te, Resolved) => "పరిష్కరించబడింది",
    }
}

/// Placeholder for a stage that is done but whose record has not arrived yet
pub fn processing_label(lang: Language) -> &'static str {
    match lang {
        Language::En => "Processing...",
        Language::Hi => "प्रक्रिया में...",
        Language::Bn => "প্রক্রিয়াকরণ চলছে...",
        Language::Te => "ప్రాసెస్ అవుతోంది...",
    }
}

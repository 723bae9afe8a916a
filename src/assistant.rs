//! Canned response engine for the medical assistant.
//!
//! Replies are chosen by case-insensitive substring search over an ordered
//! rule table; the first matching rule wins. There is no language model
//! behind this, only fixed guidance strings.

pub const GREETING: &str =
    "Hello! I'm SwasthyaAI, your medical assistant. How can I help you today?";

pub const DENGUE_INFO: &str = "Dengue is a mosquito-borne viral infection. Common symptoms include high fever, severe headache, pain behind eyes, muscle and joint pains. Prevention includes eliminating mosquito breeding sites and using protective clothing. Seek immediate medical attention if you experience warning signs.";

pub const MALARIA_INFO: &str = "Malaria is caused by parasites transmitted through infected mosquito bites. Symptoms include fever, chills, and flu-like illness. Prevention includes using bed nets, antimalarial medication, and mosquito repellent. Early diagnosis and treatment are crucial.";

pub const VACCINE_INFO: &str = "I can help you schedule vaccinations. Please specify which vaccine you need, or visit the Vaccine Scheduler tab for more options. Remember to keep your vaccination records updated.";

pub const FEVER_ADVICE: &str = "Fever can be a symptom of various conditions. Monitor your temperature, stay hydrated, and rest. If fever persists above 102°F (38.9°C) for more than 3 days, or if you experience severe symptoms, please consult a healthcare provider immediately.";

pub const FALLBACK: &str = "Thank you for your question. I'm here to provide health information and guidance. For specific medical concerns, please consult with a qualified healthcare provider. How else can I assist you today?";

/// Keyword rules in priority order. Evaluated top to bottom, first match wins.
const RULES: &[(&str, &str)] = &[
    ("dengue", DENGUE_INFO),
    ("malaria", MALARIA_INFO),
    ("vaccine", VACCINE_INFO),
    ("fever", FEVER_ADVICE),
];

/// Pick a reply for the given user input.
pub fn respond(input: &str) -> &'static str {
    let input = input.to_lowercase();
    for (keyword, response) in RULES {
        if input.contains(keyword) {
            return response;
        }
    }
    FALLBACK
}

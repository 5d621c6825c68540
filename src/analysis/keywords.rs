use lazy_static::lazy_static;

use super::models::Activity;

// Order matters: extraction walks these tables top to bottom.
lazy_static! {
    pub static ref SYMPTOM_KEYWORDS: Vec<(&'static str, Vec<&'static str>)> = vec![
        ("fever", vec!["fever", "temperature", "hot", "burning up"]),
        ("headache", vec!["headache", "head hurts", "head pain", "head aching"]),
        ("muscle pain", vec!["muscle", "body ache", "muscles aching", "body pain"]),
        ("fatigue", vec!["tired", "weak", "exhausted", "fatigue", "no energy"]),
        ("rash", vec!["rash", "spots", "skin marks", "bumps"]),
        ("cough", vec!["cough", "coughing"]),
        ("sore throat", vec!["throat", "swallow hurts"]),
        ("diarrhea", vec!["diarrhea", "loose stool", "stomach runs"]),
        ("nausea", vec!["nausea", "feel sick", "vomit", "throw up"]),
    ];

    pub static ref LOCATIONS: Vec<&'static str> = vec![
        "durban",
        "johannesburg",
        "cape town",
        "pretoria",
        "limpopo",
        "mpumalanga",
        "kwazulu-natal",
        "mozambique",
        "zimbabwe",
        "botswana",
    ];

    pub static ref ACTIVITY_PATTERNS: Vec<(Activity, Vec<&'static str>)> = vec![
        (Activity::Sexual, vec!["unprotected sex", "had sex", "sexual", "intercourse"]),
        (Activity::Travel, vec!["travel", "trip", "vacation", "went to", "visited"]),
        (Activity::Food, vec!["ate", "eating", "food", "meal"]),
        (Activity::Mosquito, vec!["mosquito", "bitten", "bugs", "insects"]),
    ];
}


pub const EMERGENCY_PHRASES: [&str; 4] = [
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "unconscious",
];

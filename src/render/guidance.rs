use lazy_static::lazy_static;
use std::collections::HashMap;


pub const GENERIC_GUIDANCE: &str =
    "Standard treatment available at primary healthcare clinics. Severe cases should be referred.";

lazy_static! {
    static ref GUIDANCE: HashMap<&'static str, &'static str> = HashMap::from([
        (
            "hiv",
            "ART medications available at all public clinics. CD4 testing requires referral.",
        ),
        (
            "aids",
            "Advanced care available at district hospitals. Support groups widely available.",
        ),
        (
            "malnutrition",
            "Nutritional supplements at primary clinics. Severe cases to district hospitals.",
        ),
        (
            "asthma",
            "Inhalers available at clinics. Emergency care at community health centers.",
        ),
        (
            "gonorrhea",
            "Treatment available at all clinics. Partner notification services provided.",
        ),
    ]);
}


/// Where to get care for a disease in the local public health system.
pub fn local_guidance(disease_name: &str) -> &'static str {
    GUIDANCE
        .get(disease_name.to_lowercase().as_str())
        .copied()
        .unwrap_or(GENERIC_GUIDANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_disease_guidance() {
        assert!(local_guidance("HIV").starts_with("ART medications"));
        assert!(local_guidance("gonorrhea").contains("Partner notification"));
    }

    #[test]
    fn test_unknown_disease_gets_generic_line() {
        assert_eq!(local_guidance("Cholera"), GENERIC_GUIDANCE);
        assert_eq!(local_guidance(""), GENERIC_GUIDANCE);
    }
}

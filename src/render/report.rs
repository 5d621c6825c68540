use crate::conversation::ConversationSummary;


const HEAVY_RULE_WIDTH: usize = 60;
const LIGHT_RULE_WIDTH: usize = 40;


fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}


fn push_section(report: &mut Vec<String>, title: &str, items: impl IntoIterator<Item = String>) {
    let items: Vec<String> = items.into_iter().collect();
    if items.is_empty() {
        return;
    }
    report.push(format!("{title}:"));
    report.push("-".repeat(LIGHT_RULE_WIDTH));
    report.extend(items.into_iter().map(|item| format!("• {item}")));
    report.push(String::new());
}


/// Plain-text consultation report for the clinician. Empty sections are skipped.
pub fn format_medical_report(summary: &ConversationSummary, session_id: &str) -> String {
    let heavy = "=".repeat(HEAVY_RULE_WIDTH);
    let mut report = vec![
        heavy.clone(),
        "MEDICAL CONSULTATION SUMMARY".to_string(),
        heavy.clone(),
        String::new(),
        format!("Session ID: {session_id}"),
        format!("Date & Time: {}", summary.timestamp.format("%Y-%m-%d %H:%M:%S")),
        format!("Total Exchanges: {}", summary.total_messages),
        String::new(),
    ];

    push_section(
        &mut report,
        "SYMPTOMS IDENTIFIED",
        summary.symptoms_identified.iter().map(|s| capitalize(s)),
    );
    push_section(
        &mut report,
        "MEDICATIONS DISCUSSED",
        summary.medications_discussed.iter().map(|m| capitalize(m)),
    );
    push_section(&mut report, "KEY POINTS", summary.key_points.iter().cloned());
    push_section(
        &mut report,
        "AI RECOMMENDATIONS FOR DOCTOR",
        summary.doctor_recommendations.iter().cloned(),
    );

    report.push(heavy.clone());
    report.push("NOTE: This is an AI-generated summary.".to_string());
    report.push("Please verify all information with the patient.".to_string());
    report.push(heavy);

    report.join("\n")
}

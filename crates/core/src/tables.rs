//! Static lookup tables shared by the dialog handlers: display labels and
//! slot names for the missing-data checklist, phone country codes, check-in
//! choices, and the keyword scan that offers alternate utterances when an
//! intent cannot be fulfilled.

/// Display label for a missing-data checklist flag.
pub fn missing_item_label(flag: &str) -> Option<&'static str> {
    match flag {
        "Check_Home_Email" => Some("Home Email"),
        "Check_Home_Phone" => Some("Home Phone Number"),
        _ => None,
    }
}

/// Slot that collects the value for a missing-data checklist flag.
pub fn missing_item_slot(flag: &str) -> Option<&'static str> {
    match flag {
        "Check_Home_Email" => Some("Email"),
        "Check_Home_Phone" => Some("Phone"),
        _ => None,
    }
}

/// Phone country code prefix keyed by the worker's country, in the
/// `{code_id}:{number}` form the HR system expects.
pub fn phone_country_code(country: &str) -> Option<&'static str> {
    match country {
        "USA" => Some("USA_1"),
        _ => None,
    }
}

/// Work style for a check-in menu choice (lowercased letter).
pub fn work_style(choice: &str) -> Option<&'static str> {
    match choice {
        "a" => Some("Working from home"),
        "b" => Some("Working from office"),
        "c" => Some("Working from client location"),
        "d" => Some("On Personal Time Off"),
        _ => None,
    }
}

/// City for a check-in location menu choice (lowercased letter). The final
/// letter of the menu is reserved for a free-text location and is handled by
/// the caller.
pub fn location(choice: &str) -> Option<&'static str> {
    match choice {
        "a" => Some("Bengaluru"),
        "b" => Some("Hyderabad"),
        "c" => Some("Pune"),
        "d" => Some("Chennai"),
        "e" => Some("Gurugram"),
        "f" => Some("Mumbai"),
        "g" => Some("Kolkata"),
        "h" => Some("Noida"),
        "i" => Some("New Delhi"),
        _ => None,
    }
}

/// HR-system state reference for a lowercased state name.
pub fn state_reference(state: &str) -> Option<&'static str> {
    match state {
        "california" => Some("USA-CA"),
        _ => None,
    }
}

/// Related-person relationship type id for a lowercased relation word.
pub fn relation_type_id(relation: &str) -> Option<&'static str> {
    match relation {
        "spouse" => Some("620.3"),
        "child" => Some("620.6"),
        _ => None,
    }
}

/// Keyword-to-suggestion table scanned in order; the last keyword contained
/// in the transcript wins.
const SUGGESTED_UTTERANCES: &[(&str, &[&str])] = &[
    (
        "lgbt",
        &[
            "What are LGBT community Policies",
            "What are the policies related to the LGBT community",
        ],
    ),
    (
        "pwd",
        &[
            "How to declare the Disability details",
            "How to raise a transportation request for Person with Disability",
        ],
    ),
    (
        "disability",
        &[
            "How to declare the Disability details",
            "How to raise a transportation request for Person with Disability",
        ],
    ),
    ("policies", &["I would like to know about the company policies"]),
    ("policy", &["I would like to know about the company policies"]),
    ("insurance", &["How update my insurance policy", "How to enroll for insurance"]),
    ("medical", &["How update my insurance policy", "How to enroll for insurance"]),
    ("dependant", &["How can I add my dependents for insurance"]),
    ("name", &["Change my preferred name"]),
    ("title", &["Change my business title", "Change my title"]),
    ("missing", &["Is my personal information missing"]),
    ("email", &["Change my email address", "Update my email"]),
];

/// Alternate utterances to suggest when the transcript of an unfulfilled
/// request mentions a known topic.
pub fn suggestions_for(transcript: &str) -> Option<&'static [&'static str]> {
    let transcript = transcript.to_lowercase();
    SUGGESTED_UTTERANCES
        .iter()
        .filter(|(keyword, _)| transcript.contains(keyword))
        .last()
        .map(|(_, suggestions)| *suggestions)
}

use std::collections::BTreeMap;

use thiserror::Error;

use crate::tables;

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("stored checklist is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Ordered list of profile fields a worker still needs to fill in, derived
/// from the missing-data custom report and carried across turns as a session
/// attribute.
///
/// The session encoding is a JSON object keyed by 1-based position, e.g.
/// `{"1":"Check_Home_Email","2":"Check_Home_Phone"}`, so a transcript of the
/// conversation shows the same numbering the user saw in the menu.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissingChecklist {
    items: Vec<String>,
}

impl MissingChecklist {
    /// Builds the checklist from a missing-data report row. A field is
    /// missing when its flag value is `"1"`. The report's own employee id
    /// column is skipped, namespace prefixes are stripped, and flags without
    /// a display label are ignored rather than surfaced half-broken.
    pub fn from_report_flags<'a, I>(flags: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut items = Vec::new();
        for (name, value) in flags {
            if value != "1" {
                continue;
            }
            let name = name.split_once(':').map_or(name, |(_, local)| local);
            if name == "Employee_ID" {
                continue;
            }
            if tables::missing_item_label(name).is_some() {
                items.push(name.to_owned());
            }
        }
        Self { items }
    }

    pub fn from_session_value(raw: &str) -> Result<Self, ChecklistError> {
        let numbered: BTreeMap<String, String> = serde_json::from_str(raw)?;
        let mut ordered: Vec<(usize, String)> = numbered
            .into_iter()
            .map(|(position, flag)| (position.parse::<usize>().unwrap_or(usize::MAX), flag))
            .collect();
        ordered.sort_by_key(|(position, _)| *position);
        Ok(Self { items: ordered.into_iter().map(|(_, flag)| flag).collect() })
    }

    pub fn to_session_value(&self) -> Result<String, ChecklistError> {
        let numbered: BTreeMap<String, &str> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, flag)| ((index + 1).to_string(), flag.as_str()))
            .collect();
        Ok(serde_json::to_string(&numbered)?)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The flag the conversation is currently collecting a value for.
    pub fn head(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }

    /// Removes the flag that was just updated and returns it.
    pub fn pop_head(&mut self) -> Option<String> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Numbered menu of the outstanding items, one `"{n}. {label}"` line per
    /// item, matching the numbering used in the session encoding.
    pub fn numbered_lines(&self) -> String {
        let mut lines = String::new();
        for (index, flag) in self.items.iter().enumerate() {
            if let Some(label) = tables::missing_item_label(flag) {
                lines.push_str(&(index + 1).to_string());
                lines.push_str(". ");
                lines.push_str(label);
                lines.push('\n');
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::MissingChecklist;

    #[test]
    fn report_flags_filter_on_the_missing_marker() {
        let checklist = MissingChecklist::from_report_flags([
            ("wd:Employee_ID", "21072"),
            ("wd:Check_Home_Email", "1"),
            ("wd:Check_Home_Phone", "0"),
        ]);

        assert_eq!(checklist.len(), 1);
        assert_eq!(checklist.head(), Some("Check_Home_Email"));
    }

    #[test]
    fn employee_id_and_unknown_flags_are_skipped() {
        let checklist = MissingChecklist::from_report_flags([
            ("wd:Employee_ID", "1"),
            ("wd:Check_Work_Badge", "1"),
            ("wd:Check_Home_Phone", "1"),
        ]);

        assert_eq!(checklist.len(), 1);
        assert_eq!(checklist.head(), Some("Check_Home_Phone"));
    }

    #[test]
    fn session_encoding_is_a_numbered_map() {
        let checklist = MissingChecklist::from_report_flags([
            ("wd:Check_Home_Email", "1"),
            ("wd:Check_Home_Phone", "1"),
        ]);

        let raw = checklist.to_session_value().expect("encode");
        assert_eq!(raw, r#"{"1":"Check_Home_Email","2":"Check_Home_Phone"}"#);

        let restored = MissingChecklist::from_session_value(&raw).expect("decode");
        assert_eq!(restored, checklist);
    }

    #[test]
    fn pop_head_walks_items_in_menu_order() {
        let mut checklist = MissingChecklist::from_report_flags([
            ("wd:Check_Home_Email", "1"),
            ("wd:Check_Home_Phone", "1"),
        ]);

        assert_eq!(checklist.pop_head().as_deref(), Some("Check_Home_Email"));
        assert_eq!(checklist.head(), Some("Check_Home_Phone"));
        assert_eq!(checklist.pop_head().as_deref(), Some("Check_Home_Phone"));
        assert!(checklist.is_empty());
        assert_eq!(checklist.pop_head(), None);
    }

    #[test]
    fn numbered_lines_match_the_session_numbering() {
        let checklist = MissingChecklist::from_report_flags([
            ("wd:Check_Home_Email", "1"),
            ("wd:Check_Home_Phone", "1"),
        ]);

        assert_eq!(checklist.numbered_lines(), "1. Home Email\n2. Home Phone Number\n");
    }

    #[test]
    fn malformed_session_values_are_rejected() {
        let error = MissingChecklist::from_session_value("not-json").expect_err("reject");
        assert!(error.to_string().contains("not valid JSON"));
    }
}

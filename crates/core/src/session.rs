use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Session attribute keys carried between dialog turns.
///
/// Identity keys describe the employee behind the conversation and survive a
/// cancelled update. Transaction keys track an in-flight multi-turn update and
/// are dropped when that update finishes or is abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKey {
    EmpId,
    FirstName,
    EmpCountry,
    CompanyName,
    ChatbotName,
    Url,
    MissingPersonalInfo,
    UpdateInProgress,
    UpdateMissingDataChoice,
    CustomLocation,
    UpdateDetails,
}

impl SessionKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmpId => "emp_id",
            Self::FirstName => "first_name",
            Self::EmpCountry => "emp_country",
            Self::CompanyName => "company_name",
            Self::ChatbotName => "chatbot_name",
            Self::Url => "url",
            Self::MissingPersonalInfo => "missing_personal_info",
            Self::UpdateInProgress => "update_in_progress",
            Self::UpdateMissingDataChoice => "update_missing_data_choice",
            Self::CustomLocation => "custom_location",
            Self::UpdateDetails => "update_details",
        }
    }

    const TRANSACTION: [SessionKey; 6] = [
        Self::Url,
        Self::MissingPersonalInfo,
        Self::UpdateInProgress,
        Self::UpdateMissingDataChoice,
        Self::CustomLocation,
        Self::UpdateDetails,
    ];
}

/// Marker value used for boolean-ish session flags such as
/// `update_in_progress` and `custom_location`.
pub const MARKER_SET: &str = "1";

/// String-to-string attribute bag round-tripped through the dialog platform on
/// every turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionAttributes(BTreeMap<String, String>);

impl SessionAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SessionKey) -> Option<&str> {
        self.0.get(key.as_str()).map(String::as_str)
    }

    pub fn set(&mut self, key: SessionKey, value: impl Into<String>) {
        self.0.insert(key.as_str().to_owned(), value.into());
    }

    /// Removes the key entirely. Cleared attributes are dropped from the
    /// response payload rather than echoed back as empty strings.
    pub fn remove(&mut self, key: SessionKey) -> Option<String> {
        self.0.remove(key.as_str())
    }

    pub fn contains(&self, key: SessionKey) -> bool {
        self.0.contains_key(key.as_str())
    }

    pub fn is_marked(&self, key: SessionKey) -> bool {
        self.get(key) == Some(MARKER_SET)
    }

    pub fn mark(&mut self, key: SessionKey) {
        self.set(key, MARKER_SET);
    }

    /// Drops every transaction key while leaving identity keys intact. Used
    /// when a multi-turn update completes or the user cancels out of it.
    pub fn clear_transaction_state(&mut self) {
        for key in SessionKey::TRANSACTION {
            self.0.remove(key.as_str());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for SessionAttributes {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Slot values for the current intent. Unfilled slots are kept in the map and
/// serialized as explicit nulls, which the dialog platform requires when
/// delegating or eliciting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotValues(BTreeMap<String, Option<String>>);

impl SlotValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.as_deref())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), Some(value.into()));
    }

    /// Resets the slot to unfilled. The key stays in the map so the wire
    /// payload carries `"name": null`.
    pub fn clear(&mut self, name: impl Into<String>) {
        self.0.insert(name.into(), None);
    }

    pub fn is_filled(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl From<BTreeMap<String, Option<String>>> for SlotValues {
    fn from(map: BTreeMap<String, Option<String>>) -> Self {
        Self(map)
    }
}

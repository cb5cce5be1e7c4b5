use std::collections::HashMap;

use crate::QuestionId;

/// Placeholder shown for a question that has no answer.
pub const NO_ANSWER: &str = "Sin respuesta";

/// Answers captured from one validation of the form.
///
/// Keys are question ids in their decimal string form. A new map is built
/// on every validation; maps are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Responses {
    values: HashMap<String, String>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Record the answer for a question.
    pub fn insert(&mut self, id: QuestionId, value: impl Into<String>) {
        self.values.insert(id.to_string(), value.into());
    }

    /// Get the answer for a question.
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.get_str(&id.to_string())
    }

    /// Get the answer stored under a raw key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check if an answer exists for a question.
    pub fn contains(&self, id: QuestionId) -> bool {
        self.values.contains_key(&id.to_string())
    }

    /// The answer for a question, or [`NO_ANSWER`] when it is missing or empty.
    pub fn answer_or_placeholder(&self, id: QuestionId) -> &str {
        match self.get(id) {
            Some(answer) if !answer.is_empty() => answer,
            _ => NO_ANSWER,
        }
    }

    /// Get an iterator over all key-answer pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Responses
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Responses {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

use serde::{Deserialize, Serialize};

/// A keyboard the user has used with a writing system, identified by layout name and locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnownKeyboard {
    pub layout: String,
    pub locale: String,
}

impl KnownKeyboard {
    pub fn new(layout: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            locale: locale.into(),
        }
    }
}

//! Incident classification enums and display helpers.
//!
//! Each enum stores a short code in the database (`"MED"`, `"INPR"`, ...) and
//! carries a human-readable label for clients. Codes are the wire format in
//! both JSON and SQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A stored code that does not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

/// One selectable option of a choice field, as offered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! define_choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $variant:ident = ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $code)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The stored code.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Options for a select field, in declaration order.
            pub fn choices() -> Vec<Choice> {
                Self::ALL
                    .iter()
                    .map(|v| Choice {
                        value: v.as_str(),
                        label: v.label(),
                    })
                    .collect()
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(code: &str) -> Result<Self, Self::Err> {
                match code {
                    $( $code => Ok($name::$variant), )+
                    other => Err(UnknownChoice {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownChoice;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

define_choice_enum! {
    /// What kind of incident was reported.
    Category("category") {
        It = ("IT", "IT / Security"),
        Safety = ("SAFETY", "Health & Safety"),
        Hr = ("HR", "HR / Conduct"),
        Data = ("DATA", "Data Protection"),
        Other = ("OTHER", "Other"),
    }
}

define_choice_enum! {
    /// How serious an incident is.
    Severity("severity") {
        Low = ("LOW", "Low"),
        Medium = ("MED", "Medium"),
        High = ("HIGH", "High"),
        Critical = ("CRIT", "Critical"),
    }
}

define_choice_enum! {
    /// Where an incident is in its lifecycle.
    Status("status") {
        Open = ("OPEN", "Open"),
        InProgress = ("INPR", "In progress"),
        Resolved = ("RES", "Resolved"),
        Closed = ("CLOSED", "Closed"),
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Open
    }
}

/// Maximum stored length of an incident title, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Short display form of an incident, e.g. `"Server down (Medium)"`.
pub fn incident_display(title: &str, severity: Severity) -> String {
    format!("{title} ({})", severity.label())
}

/// Short display form of a comment, e.g. `"Comment by alice on Server down (Medium)"`.
pub fn comment_display(author: &str, incident: &str) -> String {
    format!("Comment by {author} on {incident}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_stored_values() {
        assert_eq!(Severity::Medium.as_str(), "MED");
        assert_eq!(Severity::Critical.as_str(), "CRIT");
        assert_eq!(Status::InProgress.as_str(), "INPR");
        assert_eq!(Status::Resolved.as_str(), "RES");
        assert_eq!(Category::Safety.as_str(), "SAFETY");
    }

    #[test]
    fn defaults() {
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Severity::default(), Severity::Medium);
        assert_eq!(Status::default(), Status::Open);
    }

    #[test]
    fn parse_rejects_labels_and_lowercase() {
        assert_eq!("HIGH".parse::<Severity>(), Ok(Severity::High));
        let err = "High".parse::<Severity>().unwrap_err();
        assert_eq!(err.kind, "severity");
        assert_eq!(err.value, "High");
        assert!("it".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"INPR\"");
        let parsed: Category = serde_json::from_str("\"DATA\"").unwrap();
        assert_eq!(parsed, Category::Data);
    }

    #[test]
    fn choices_keep_declaration_order() {
        let values: Vec<_> = Category::choices().iter().map(|c| c.value).collect();
        assert_eq!(values, ["IT", "SAFETY", "HR", "DATA", "OTHER"]);
        assert_eq!(Severity::choices()[1].label, "Medium");
    }

    #[test]
    fn display_strings() {
        assert_eq!(
            incident_display("Server down", Severity::Medium),
            "Server down (Medium)"
        );
        assert_eq!(
            comment_display("alice", "Server down (Medium)"),
            "Comment by alice on Server down (Medium)"
        );
    }
}

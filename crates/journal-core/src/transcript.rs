//! The persisted transcript model.
//!
//! A session transcript is an ordered list of [`ChatTurn`]s. Each turn is
//! tagged with a [`Role`] and carries one or more content [`Part`]s - plain
//! text or a tool invocation record. The whole list is replaced wholesale on
//! each persist; [`validate_transcript`] guards every write.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TranscriptError;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One content part of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// Plain text, rendered as markdown by the client.
    Text { text: String },
    /// A tool invocation and (once available) its output.
    ToolInvocation {
        /// Call id assigned by the completion engine.
        id: String,
        /// Name of the invoked tool.
        name: String,
        /// Arguments the engine supplied.
        arguments: Value,
        /// Tool output, absent while the call is in flight.
        #[serde(skip_serializing_if = "Option::is_none")]
        output: Option<Value>,
    },
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl ChatTurn {
    /// Create a user turn with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Create an assistant turn with a single text part.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Concatenated text content of this turn, ignoring tool parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::ToolInvocation { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Structurally validate a transcript before it is persisted.
///
/// Rejects malformed transcripts outright rather than truncating them:
/// every turn must have at least one part, text parts must be non-empty,
/// and tool invocations must carry a call id and tool name.
pub fn validate_transcript(turns: &[ChatTurn]) -> Result<(), TranscriptError> {
    for (index, turn) in turns.iter().enumerate() {
        if turn.parts.is_empty() {
            return Err(TranscriptError::EmptyTurn { index });
        }
        for part in &turn.parts {
            match part {
                Part::Text { text } => {
                    if text.trim().is_empty() {
                        return Err(TranscriptError::EmptyText { index });
                    }
                }
                Part::ToolInvocation { id, name, .. } => {
                    if id.is_empty() {
                        return Err(TranscriptError::IncompleteToolInvocation {
                            index,
                            field: "a call id",
                        });
                    }
                    if name.is_empty() {
                        return Err(TranscriptError::IncompleteToolInvocation {
                            index,
                            field: "a tool name",
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_transcript() {
        let turns = vec![
            ChatTurn::user("Hello"),
            ChatTurn {
                role: Role::Assistant,
                parts: vec![
                    Part::ToolInvocation {
                        id: "call-1".to_string(),
                        name: "query_entries".to_string(),
                        arguments: json!({"days": 1}),
                        output: Some(json!({"success": true, "entries": [], "count": 0})),
                    },
                    Part::Text {
                        text: "Nothing saved yet today.".to_string(),
                    },
                ],
            },
        ];
        assert!(validate_transcript(&turns).is_ok());
    }

    #[test]
    fn test_empty_turn_rejected() {
        let turns = vec![ChatTurn {
            role: Role::User,
            parts: vec![],
        }];
        assert_eq!(
            validate_transcript(&turns),
            Err(TranscriptError::EmptyTurn { index: 0 })
        );
    }

    #[test]
    fn test_empty_text_rejected() {
        let turns = vec![ChatTurn::user("  ")];
        assert_eq!(
            validate_transcript(&turns),
            Err(TranscriptError::EmptyText { index: 0 })
        );
    }

    #[test]
    fn test_tool_invocation_without_id_rejected() {
        let turns = vec![ChatTurn {
            role: Role::Assistant,
            parts: vec![Part::ToolInvocation {
                id: String::new(),
                name: "save_entry".to_string(),
                arguments: json!({}),
                output: None,
            }],
        }];
        assert!(matches!(
            validate_transcript(&turns),
            Err(TranscriptError::IncompleteToolInvocation { index: 0, .. })
        ));
    }

    #[test]
    fn test_role_serde_round_trip() {
        let turn = ChatTurn::user("hi");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains(r#""role":"user""#));
        let back: ChatTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }

    #[test]
    fn test_turn_text_skips_tool_parts() {
        let turn = ChatTurn {
            role: Role::Assistant,
            parts: vec![
                Part::Text {
                    text: "Saved. ".to_string(),
                },
                Part::ToolInvocation {
                    id: "call-1".to_string(),
                    name: "save_entry".to_string(),
                    arguments: json!({}),
                    output: None,
                },
                Part::Text {
                    text: "Anything else?".to_string(),
                },
            ],
        };
        assert_eq!(turn.text(), "Saved. Anything else?");
    }
}

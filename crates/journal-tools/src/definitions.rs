//! Tool schemas advertised to the completion engine.

use journal_core::ToolDefinition;
use serde_json::json;

/// The three journal tools, in the order they are advertised.
pub fn definitions() -> Vec<ToolDefinition> {
    vec![save_entry(), query_entries(), analyze_journal()]
}

fn save_entry() -> ToolDefinition {
    ToolDefinition {
        name: "save_entry".to_string(),
        description: "Create a journal entry, or update an existing one when \
                      entry_id is given. Use markdown for the content and \
                      always include a short summary, a mood, and 1-3 tags."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "entry_id": {
                    "type": "string",
                    "description": "Id of an existing entry to update. Omit to create a new entry."
                },
                "content": {
                    "type": "string",
                    "description": "The journal entry body, markdown prose."
                },
                "summary": {
                    "type": "string",
                    "description": "One-line summary of the entry, at most 100 characters."
                },
                "entry_date": {
                    "type": "string",
                    "description": "Calendar date (YYYY-MM-DD) the entry belongs to. Defaults to today."
                },
                "mood": {
                    "type": "string",
                    "enum": ["very_sad", "sad", "neutral", "happy", "very_happy"],
                    "description": "The mood expressed in the entry."
                },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "1-3 short lowercase labels."
                }
            },
            "required": ["content"]
        }),
    }
}

fn query_entries() -> ToolDefinition {
    ToolDefinition {
        name: "query_entries".to_string(),
        description: "Search past journal entries. Filters combine: days \
                      limits how far back to look, search matches entry text, \
                      tag matches an exact tag. Returns summaries unless \
                      include_content is true."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "days": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 90,
                    "description": "How many days back to look, counting today. 1 means today only."
                },
                "search": {
                    "type": "string",
                    "description": "Case-insensitive substring to find in entry content."
                },
                "tag": {
                    "type": "string",
                    "description": "Exact tag to filter by."
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 20,
                    "description": "Maximum entries to return. Defaults to 10."
                },
                "include_content": {
                    "type": "boolean",
                    "description": "Include full entry content instead of summaries only."
                }
            }
        }),
    }
}

fn analyze_journal() -> ToolDefinition {
    ToolDefinition {
        name: "analyze_journal".to_string(),
        description: "Compute journaling statistics over a period: entry \
                      count, writing streak, average entry length, mood \
                      distribution and tags in use."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "period": {
                    "type": "string",
                    "enum": ["week", "month", "all"],
                    "description": "The analysis window."
                }
            },
            "required": ["period"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_tools_advertised() {
        let defs = definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["save_entry", "query_entries", "analyze_journal"]);
    }

    #[test]
    fn test_schemas_are_objects_with_properties() {
        for def in definitions() {
            assert_eq!(def.parameters["type"], "object");
            assert!(def.parameters["properties"].is_object(), "{}", def.name);
        }
    }
}

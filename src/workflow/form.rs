use serde_json::{json, Value};

/// One input field of the configuration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Block Kit block id, e.g. `case_subject_block`.
    pub block_id: &'static str,
    /// Block Kit action id, e.g. `case_subject_input`.
    pub action_id: &'static str,
    /// Name of the input binding this field feeds, e.g. `case_subject`.
    pub binding: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub multiline: bool,
}

/// The fixed three-field form shown when a user configures the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDescriptor {
    pub fields: [FormField; 3],
}

impl FormDescriptor {
    /// The case form. Pure function of no input: every invocation gets the
    /// same descriptor regardless of history.
    pub fn case_form() -> Self {
        Self {
            fields: [
                FormField {
                    block_id: "case_subject_block",
                    action_id: "case_subject_input",
                    binding: "case_subject",
                    label: "Case Subject",
                    placeholder: "Enter case subject",
                    multiline: false,
                },
                FormField {
                    block_id: "case_description_block",
                    action_id: "case_description_input",
                    binding: "case_description",
                    label: "Case Description",
                    placeholder: "Enter case description",
                    multiline: true,
                },
                FormField {
                    block_id: "case_priority_block",
                    action_id: "case_priority_input",
                    binding: "case_priority",
                    // Hint only. The value is never validated against this
                    // set; Salesforce is the sole validator.
                    placeholder: "High/Medium/Low",
                    label: "Case Priority",
                    multiline: false,
                },
            ],
        }
    }

    /// Render the descriptor as Block Kit `input` blocks for `views.open`.
    pub fn to_blocks(&self) -> Vec<Value> {
        self.fields
            .iter()
            .map(|field| {
                let mut element = json!({
                    "type": "plain_text_input",
                    "action_id": field.action_id,
                    "placeholder": {"type": "plain_text", "text": field.placeholder},
                });
                if field.multiline {
                    element["multiline"] = json!(true);
                }
                json!({
                    "type": "input",
                    "block_id": field.block_id,
                    "element": element,
                    "label": {"type": "plain_text", "text": field.label},
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_form_is_stable_across_calls() {
        assert_eq!(FormDescriptor::case_form(), FormDescriptor::case_form());
    }

    #[test]
    fn renders_three_input_blocks() {
        let blocks = FormDescriptor::case_form().to_blocks();
        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            assert_eq!(block["type"], "input");
            assert_eq!(block["element"]["type"], "plain_text_input");
        }
        // Only the description is multi-line.
        assert_eq!(blocks[0]["element"].get("multiline"), None);
        assert_eq!(blocks[1]["element"]["multiline"], serde_json::json!(true));
        assert_eq!(blocks[2]["element"]["placeholder"]["text"], "High/Medium/Low");
    }
}

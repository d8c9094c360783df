/// Instruction sent as the system message on every request.
///
/// Defines the JSON-only output contract, the `Itinerary` and
/// `ItineraryEvent` schemas, the allowed event types and one worked example.
pub const SYSTEM_PROMPT: &str = include_str!("system_prompt.txt");

#[cfg(test)]
mod tests {
    use super::SYSTEM_PROMPT;
    use crate::itinerary::types::EventType;
    use serde_json::Value;

    const EXAMPLE_MARKER: &str = "Your EXACT and ONLY response must be this JSON:";

    #[test]
    fn one_shot_example_is_valid_itinerary_json() {
        let start = SYSTEM_PROMPT
            .find(EXAMPLE_MARKER)
            .expect("prompt should contain the worked example")
            + EXAMPLE_MARKER.len();
        let example: Value =
            serde_json::from_str(SYSTEM_PROMPT[start..].trim()).expect("example should parse");

        assert_eq!(example["id"], "itinerary-1700000000000");
        assert_eq!(example["events"][0]["coordinates"][0], 49.0097);
        assert_eq!(example["events"][0]["coordinates"][1], 2.5479);
    }

    #[test]
    fn prompt_text_opens_with_a_blank_line() {
        assert!(SYSTEM_PROMPT.starts_with("\nYou are an autonomous AI agent"));
    }

    #[test]
    fn prompt_lists_every_event_type() {
        for kind in EventType::ALL {
            assert!(
                SYSTEM_PROMPT.contains(&format!("\"{}\"", kind.as_str())),
                "missing event type {}",
                kind.as_str()
            );
        }
    }

    #[test]
    fn prompt_forbids_markdown_fencing() {
        assert!(SYSTEM_PROMPT.contains("ONLY a valid JSON object"));
        assert!(SYSTEM_PROMPT.contains("```json"));
    }
}

use serde::{Deserialize, Serialize};

use crate::error::Result;

const APOLOGY: &str = "抱歉，暂时无法完成分析。请稍后再试。";

/// The three-part reflection the page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StructuredReply {
    pub plant_mirroring: String,
    pub emotional_reflection: String,
    pub nature_guidance: String,
}

impl StructuredReply {
    /// Shown in place of a reply when a submission fails.
    pub fn apology() -> Self {
        Self {
            plant_mirroring: APOLOGY.to_string(),
            emotional_reflection: String::new(),
            nature_guidance: String::new(),
        }
    }
}

/// Removes one leading "```json" (or bare "```") and one trailing "```", then trims.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Parses the model's text, fenced or not. Field values are not checked for emptiness.
pub fn parse(text: &str) -> Result<StructuredReply> {
    Ok(serde_json::from_str(strip_code_fences(text))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const BARE: &str = r#"{"plantMirroring":"叶子在慢慢舒展","emotionalReflection":"你似乎很平静","natureGuidance":"摸一摸叶片吧"}"#;

    fn expected() -> StructuredReply {
        StructuredReply {
            plant_mirroring: "叶子在慢慢舒展".into(),
            emotional_reflection: "你似乎很平静".into(),
            nature_guidance: "摸一摸叶片吧".into(),
        }
    }

    #[test]
    fn parses_bare_json() {
        assert_eq!(parse(BARE).unwrap(), expected());
    }

    #[test]
    fn fenced_and_bare_parse_identically() {
        let fenced = format!("```json\n{BARE}\n```");
        assert_eq!(parse(&fenced).unwrap(), expected());

        let plain_fence = format!("\n```\n{BARE}\n```\n");
        assert_eq!(parse(&plain_fence).unwrap(), expected());
    }

    #[test]
    fn fence_stripping_is_idempotent() {
        let fenced = format!("  ```json\n{BARE}\n```  ");
        let once = strip_code_fences(&fenced);
        assert_eq!(once, BARE);
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn reencoded_reply_round_trips() {
        let json = serde_json::to_string_pretty(&expected()).unwrap();
        let fenced = format!("```json\n{json}\n```");
        assert_eq!(parse(&fenced).unwrap(), expected());
    }

    #[test]
    fn empty_values_are_accepted() {
        let reply = parse(r#"{"plantMirroring":"","emotionalReflection":"","natureGuidance":""}"#)
            .unwrap();
        assert!(reply.plant_mirroring.is_empty());
    }

    #[test]
    fn prose_fails() {
        let err = parse("I'm sorry, I can't see a plant here.").unwrap_err();
        assert!(matches!(err, Error::MalformedReply(_)));
    }

    #[test]
    fn missing_or_extra_keys_fail() {
        assert!(parse(r#"{"plantMirroring":"a","emotionalReflection":"b"}"#).is_err());
        assert!(parse(
            r#"{"plantMirroring":"a","emotionalReflection":"b","natureGuidance":"c","mood":"d"}"#
        )
        .is_err());
    }

    #[test]
    fn apology_leaves_other_fields_empty() {
        let apology = StructuredReply::apology();
        assert_eq!(apology.plant_mirroring, APOLOGY);
        assert!(apology.emotional_reflection.is_empty());
        assert!(apology.nature_guidance.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(expected()).unwrap();
        assert_eq!(value["plantMirroring"], "叶子在慢慢舒展");
        assert_eq!(value["natureGuidance"], "摸一摸叶片吧");
    }
}

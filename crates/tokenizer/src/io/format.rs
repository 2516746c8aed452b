//! Format definitions for model metadata files.
//!
//! A HuggingFace model directory carries its special-token roles next to
//! `tokenizer.json`, in `tokenizer_config.json` and `special_tokens_map.json`.
//! Both use the same keys; only the ones read here are modelled.

use autotok_core::{SpecialRole, SpecialTokens};
use serde::Deserialize;

/// Serialized tokenizer pipeline.
pub const TOKENIZER_FILE: &str = "tokenizer.json";
/// Tokenizer configuration, including role tokens.
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";
/// Role tokens only; takes precedence over the configuration.
pub const SPECIAL_TOKENS_MAP_FILE: &str = "special_tokens_map.json";

/// A role token, either bare or in added-token form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// `"bos_token": "<s>"`
    Plain(String),
    /// `"bos_token": { "content": "<s>", "lstrip": false, ... }`
    Added { content: String },
}

impl TokenValue {
    /// Token text.
    pub fn content(&self) -> &str {
        match self {
            TokenValue::Plain(content) | TokenValue::Added { content } => content,
        }
    }
}

/// Role tokens as found in `tokenizer_config.json` or `special_tokens_map.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialTokensMap {
    #[serde(default)]
    pub unk_token: Option<TokenValue>,
    #[serde(default)]
    pub sep_token: Option<TokenValue>,
    #[serde(default)]
    pub mask_token: Option<TokenValue>,
    #[serde(default)]
    pub bos_token: Option<TokenValue>,
    #[serde(default)]
    pub eos_token: Option<TokenValue>,
    #[serde(default)]
    pub pad_token: Option<TokenValue>,
    #[serde(default)]
    pub cls_token: Option<TokenValue>,
    #[serde(default)]
    pub additional_special_tokens: Option<Vec<TokenValue>>,
}

impl SpecialTokensMap {
    fn role(&self, role: SpecialRole) -> Option<&TokenValue> {
        match role {
            SpecialRole::Unk => self.unk_token.as_ref(),
            SpecialRole::Sep => self.sep_token.as_ref(),
            SpecialRole::Mask => self.mask_token.as_ref(),
            SpecialRole::Bos => self.bos_token.as_ref(),
            SpecialRole::Eos => self.eos_token.as_ref(),
            SpecialRole::Pad => self.pad_token.as_ref(),
            SpecialRole::Cls => self.cls_token.as_ref(),
        }
    }

    /// Copy every role set here onto `special`.
    pub fn apply_to(&self, special: &mut SpecialTokens) {
        for role in SpecialRole::ALL {
            if let Some(value) = self.role(role) {
                special.set(role, value.content());
            }
        }
    }

    /// Additional special tokens, in file order.
    pub fn additional(&self) -> impl Iterator<Item = &str> + '_ {
        self.additional_special_tokens
            .iter()
            .flatten()
            .map(TokenValue::content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_forms() {
        let json = r#"{
            "model_max_length": 512,
            "bos_token": "<s>",
            "eos_token": {"content": "</s>", "lstrip": false, "rstrip": false},
            "pad_token": null,
            "additional_special_tokens": ["<extra_0>", {"content": "<extra_1>"}]
        }"#;

        let map: SpecialTokensMap = serde_json::from_str(json).unwrap();
        let mut special = SpecialTokens::default();
        map.apply_to(&mut special);

        assert_eq!(special.bos.as_deref(), Some("<s>"));
        assert_eq!(special.eos.as_deref(), Some("</s>"));
        assert!(special.pad.is_none());
        assert_eq!(map.additional().collect::<Vec<_>>(), vec!["<extra_0>", "<extra_1>"]);
    }

    #[test]
    fn test_later_map_overrides() {
        let config: SpecialTokensMap =
            serde_json::from_str(r#"{"unk_token": "<unk>", "cls_token": "<cls>"}"#).unwrap();
        let map: SpecialTokensMap = serde_json::from_str(r#"{"unk_token": "[UNK]"}"#).unwrap();

        let mut special = SpecialTokens::default();
        config.apply_to(&mut special);
        map.apply_to(&mut special);

        assert_eq!(special.unk.as_deref(), Some("[UNK]"));
        assert_eq!(special.cls.as_deref(), Some("<cls>"));
    }

    #[test]
    fn test_null_additional_tokens() {
        let map: SpecialTokensMap =
            serde_json::from_str(r#"{"additional_special_tokens": null}"#).unwrap();
        assert_eq!(map.additional().count(), 0);
    }
}

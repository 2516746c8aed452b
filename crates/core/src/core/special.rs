//! Special-token roles and the reconciliation of model roles with defaults.
//!
//! A wrapped model may leave any of the seven roles undefined. Construction
//! of the facade computes the missing assignments with [`reconcile`], which
//! prefers a sibling role the model already has (`bos` from `cls`, `eos`
//! from `sep`, and so on) before falling back to a hardcoded default.

use serde::Deserialize;
use std::fmt;

/// One of the seven special-token roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialRole {
    Unk,
    Sep,
    Mask,
    Bos,
    Eos,
    Pad,
    Cls,
}

impl SpecialRole {
    /// All roles, in reconciliation order.
    pub const ALL: [SpecialRole; 7] = [
        SpecialRole::Unk,
        SpecialRole::Sep,
        SpecialRole::Mask,
        SpecialRole::Bos,
        SpecialRole::Eos,
        SpecialRole::Pad,
        SpecialRole::Cls,
    ];

    /// Short role name (`"bos"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialRole::Unk => "unk",
            SpecialRole::Sep => "sep",
            SpecialRole::Mask => "mask",
            SpecialRole::Bos => "bos",
            SpecialRole::Eos => "eos",
            SpecialRole::Pad => "pad",
            SpecialRole::Cls => "cls",
        }
    }

    /// Attribute name used in HuggingFace config files (`"bos_token"`).
    pub fn config_key(&self) -> &'static str {
        match self {
            SpecialRole::Unk => "unk_token",
            SpecialRole::Sep => "sep_token",
            SpecialRole::Mask => "mask_token",
            SpecialRole::Bos => "bos_token",
            SpecialRole::Eos => "eos_token",
            SpecialRole::Pad => "pad_token",
            SpecialRole::Cls => "cls_token",
        }
    }
}

impl fmt::Display for SpecialRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token string assigned to each special role, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialTokens {
    pub unk: Option<String>,
    pub sep: Option<String>,
    pub mask: Option<String>,
    pub bos: Option<String>,
    pub eos: Option<String>,
    pub pad: Option<String>,
    pub cls: Option<String>,
}

impl SpecialTokens {
    /// Token assigned to `role`.
    pub fn get(&self, role: SpecialRole) -> Option<&str> {
        self.slot(role).as_deref()
    }

    /// Assign `token` to `role`, replacing any previous value.
    pub fn set(&mut self, role: SpecialRole, token: impl Into<String>) {
        *self.slot_mut(role) = Some(token.into());
    }

    /// Clear `role`.
    pub fn unset(&mut self, role: SpecialRole) {
        *self.slot_mut(role) = None;
    }

    /// Iterate over the assigned roles in [`SpecialRole::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (SpecialRole, &str)> + '_ {
        SpecialRole::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|token| (role, token)))
    }

    /// Number of assigned roles.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if no role is assigned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `token` is assigned to any role.
    pub fn contains(&self, token: &str) -> bool {
        self.iter().any(|(_, t)| t == token)
    }

    /// Overwrite roles with every role assigned in `other`.
    pub fn merge(&mut self, other: &SpecialTokens) {
        for (role, token) in other.iter() {
            self.set(role, token);
        }
    }

    fn slot(&self, role: SpecialRole) -> &Option<String> {
        match role {
            SpecialRole::Unk => &self.unk,
            SpecialRole::Sep => &self.sep,
            SpecialRole::Mask => &self.mask,
            SpecialRole::Bos => &self.bos,
            SpecialRole::Eos => &self.eos,
            SpecialRole::Pad => &self.pad,
            SpecialRole::Cls => &self.cls,
        }
    }

    fn slot_mut(&mut self, role: SpecialRole) -> &mut Option<String> {
        match role {
            SpecialRole::Unk => &mut self.unk,
            SpecialRole::Sep => &mut self.sep,
            SpecialRole::Mask => &mut self.mask,
            SpecialRole::Bos => &mut self.bos,
            SpecialRole::Eos => &mut self.eos,
            SpecialRole::Pad => &mut self.pad,
            SpecialRole::Cls => &mut self.cls,
        }
    }
}

/// Fallback token for each role when neither the model nor a sibling role
/// provides one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecialTokenDefaults {
    pub unk: String,
    pub sep: String,
    pub mask: String,
    pub bos: String,
    pub eos: String,
    pub pad: String,
    pub cls: String,
}

impl Default for SpecialTokenDefaults {
    fn default() -> Self {
        Self {
            unk: "[UNK]".to_string(),
            sep: "[SEP]".to_string(),
            mask: "[MASK]".to_string(),
            bos: "[CLS]".to_string(),
            eos: "[SEP]".to_string(),
            pad: "[PAD]".to_string(),
            cls: "[CLS]".to_string(),
        }
    }
}

impl SpecialTokenDefaults {
    /// Default token for `role`.
    pub fn get(&self, role: SpecialRole) -> &str {
        match role {
            SpecialRole::Unk => &self.unk,
            SpecialRole::Sep => &self.sep,
            SpecialRole::Mask => &self.mask,
            SpecialRole::Bos => &self.bos,
            SpecialRole::Eos => &self.eos,
            SpecialRole::Pad => &self.pad,
            SpecialRole::Cls => &self.cls,
        }
    }

    /// Replace the default for `role`.
    pub fn set(&mut self, role: SpecialRole, token: impl Into<String>) {
        let token = token.into();
        match role {
            SpecialRole::Unk => self.unk = token,
            SpecialRole::Sep => self.sep = token,
            SpecialRole::Mask => self.mask = token,
            SpecialRole::Bos => self.bos = token,
            SpecialRole::Eos => self.eos = token,
            SpecialRole::Pad => self.pad = token,
            SpecialRole::Cls => self.cls = token,
        }
    }
}

/// Compute the assignments for every role `existing` leaves undefined.
///
/// Roles the model already defines are absent from the result. Sibling
/// lookups read `existing` only, never an assignment made earlier in the
/// same call, and an empty sibling counts as undefined.
pub fn reconcile(existing: &SpecialTokens, defaults: &SpecialTokenDefaults) -> SpecialTokens {
    let sibling = |role: SpecialRole| existing.get(role).filter(|t| !t.is_empty());

    let mut missing = SpecialTokens::default();
    for role in SpecialRole::ALL {
        if existing.get(role).is_some() {
            continue;
        }
        let fallback = match role {
            SpecialRole::Sep => sibling(SpecialRole::Eos),
            SpecialRole::Bos => sibling(SpecialRole::Cls),
            SpecialRole::Eos => sibling(SpecialRole::Sep),
            SpecialRole::Cls => sibling(SpecialRole::Bos),
            SpecialRole::Unk | SpecialRole::Mask | SpecialRole::Pad => None,
        };
        missing.set(role, fallback.unwrap_or_else(|| defaults.get(role)));
    }
    missing
}

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// What a mention points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    Everyone,
    Here,
    User,
    Role,
    Channel,
}

impl MentionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MentionKind::Everyone => "everyone",
            MentionKind::Here => "here",
            MentionKind::User => "user",
            MentionKind::Role => "role",
            MentionKind::Channel => "channel",
        }
    }
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up extra data for an id-carrying mention.
///
/// `Ok(Some(value))` is attached to the mention node as `extra`; `Ok(None)`
/// leaves `extra` null. An error aborts the transform.
pub trait MentionResolver {
    fn resolve(&self, kind: MentionKind, id: &str) -> anyhow::Result<Option<Value>>;
}

/// Resolver that never enriches mentions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMentions;

impl MentionResolver for NoMentions {
    fn resolve(&self, _kind: MentionKind, _id: &str) -> anyhow::Result<Option<Value>> {
        Ok(None)
    }
}

impl<F> MentionResolver for F
where
    F: Fn(MentionKind, &str) -> anyhow::Result<Option<Value>>,
{
    fn resolve(&self, kind: MentionKind, id: &str) -> anyhow::Result<Option<Value>> {
        self(kind, id)
    }
}

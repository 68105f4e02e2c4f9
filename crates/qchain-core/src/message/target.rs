use std::fmt;

/// Conversation kind a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Group,
    Friend,
    Temp,
    Stranger,
}

/// Contact a chain is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Group(i64),
    Friend(i64),
    /// Group member reached through a temporary session.
    Temp { group: i64, member: i64 },
    Stranger(i64),
}

impl Target {
    /// Id the message is addressed to (group code or user uin).
    pub fn id(&self) -> i64 {
        match *self {
            Target::Group(id) | Target::Friend(id) | Target::Stranger(id) => id,
            Target::Temp { member, .. } => member,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Target::Group(_))
    }

    pub fn source_kind(&self) -> SourceKind {
        match self {
            Target::Group(_) => SourceKind::Group,
            Target::Friend(_) => SourceKind::Friend,
            Target::Temp { .. } => SourceKind::Temp,
            Target::Stranger(_) => SourceKind::Stranger,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Group(id) => write!(f, "group({id})"),
            Target::Friend(id) => write!(f, "friend({id})"),
            Target::Temp { group, member } => write!(f, "temp({member}@{group})"),
            Target::Stranger(id) => write!(f, "stranger({id})"),
        }
    }
}

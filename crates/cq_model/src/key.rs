use std::fmt;

const ANSWER_PREFIX: &str = "A:";
const CHARACTER_PREFIX: &str = "C:";

/// A node identifier in the shared embedding space.
///
/// Keys are stored as flat strings in the artifacts; this type gives the
/// two families structure. The encoded forms are `A:<label>:<axis>` and
/// `C:<name>`. Answer labels may themselves contain arbitrary text (for
/// example `Don't Know`), so answer keys are split from the right: the
/// axis id is everything after the last `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// An answer option on one statement axis.
    Answer { label: String, axis: String },
    /// A character.
    Character(String),
}

impl NodeKey {
    pub fn answer(label: impl Into<String>, axis: impl Into<String>) -> Self {
        NodeKey::Answer {
            label: label.into(),
            axis: axis.into(),
        }
    }

    pub fn character(name: impl Into<String>) -> Self {
        NodeKey::Character(name.into())
    }

    /// Parse an encoded key; `None` if it belongs to neither family.
    pub fn parse(key: &str) -> Option<Self> {
        if let Some(rest) = key.strip_prefix(ANSWER_PREFIX) {
            let (label, axis) = rest.rsplit_once(':')?;
            Some(NodeKey::answer(label, axis))
        } else if let Some(name) = key.strip_prefix(CHARACTER_PREFIX) {
            Some(NodeKey::character(name))
        } else {
            None
        }
    }

    /// True for keys in the `C:` family.
    pub fn is_character_key(key: &str) -> bool {
        key.starts_with(CHARACTER_PREFIX)
    }

    /// Strip the `C:` prefix from an encoded key, if present.
    pub fn character_name(key: &str) -> Option<&str> {
        key.strip_prefix(CHARACTER_PREFIX)
    }

    /// Encoded string form, as stored in the artifacts.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Answer { label, axis } => write!(f, "{ANSWER_PREFIX}{label}:{axis}"),
            NodeKey::Character(name) => write!(f, "{CHARACTER_PREFIX}{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_key_roundtrip() {
        let key = NodeKey::answer("Agree", "Q7");
        assert_eq!(key.encode(), "A:Agree:Q7");
        assert_eq!(NodeKey::parse("A:Agree:Q7"), Some(key));
    }

    #[test]
    fn answer_label_may_contain_colons_and_apostrophes() {
        let key = NodeKey::answer("Don't Know", "Q12");
        assert_eq!(key.encode(), "A:Don't Know:Q12");
        assert_eq!(NodeKey::parse("A:Don't Know:Q12"), Some(key));

        // Axis is always the segment after the last colon.
        let odd = NodeKey::parse("A:a:b:Q1").expect("parses");
        assert_eq!(odd, NodeKey::answer("a:b", "Q1"));
    }

    #[test]
    fn character_key_roundtrip() {
        let key = NodeKey::character("Alice");
        assert_eq!(key.encode(), "C:Alice");
        assert_eq!(NodeKey::parse("C:Alice"), Some(key));
        assert_eq!(NodeKey::character_name("C:Alice"), Some("Alice"));
        assert!(NodeKey::is_character_key("C:Alice"));
        assert!(!NodeKey::is_character_key("A:Agree:Q1"));
    }

    #[test]
    fn foreign_keys_rejected() {
        assert_eq!(NodeKey::parse("X:whatever"), None);
        assert_eq!(NodeKey::parse("A:missing-axis"), None);
        assert_eq!(NodeKey::character_name("A:Agree:Q1"), None);
    }
}

//! Permission tokens gating center-screen notifications

use crate::damage::PlayerId;
use crate::host::PermissionProvider;

/// One configured token, classified by its prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionToken {
    /// `@name`
    Capability(String),
    /// `#name`
    Group(String),
    /// Anything else, checked as a command override
    Override(String),
}

impl PermissionToken {
    /// `None` for an empty token
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(name) = token.strip_prefix('@') {
            Some(Self::Capability(name.to_string()))
        } else if let Some(name) = token.strip_prefix('#') {
            Some(Self::Group(name.to_string()))
        } else if token.is_empty() {
            None
        } else {
            Some(Self::Override(token.to_string()))
        }
    }

    pub fn is_granted<P: PermissionProvider + ?Sized>(&self, provider: &P, id: PlayerId) -> bool {
        match self {
            Self::Capability(name) => provider.has_capability(id, name),
            Self::Group(name) => provider.in_group(id, name),
            Self::Override(name) => provider.has_override(id, name),
        }
    }
}

pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<PermissionToken> {
    tokens
        .iter()
        .filter_map(|t| PermissionToken::parse(t.as_ref()))
        .collect()
}

/// Any matching token grants access; no tokens lets everyone through
pub fn has_any_permission<P: PermissionProvider + ?Sized>(
    tokens: &[PermissionToken],
    provider: &P,
    id: PlayerId,
) -> bool {
    tokens.is_empty() || tokens.iter().any(|token| token.is_granted(provider, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyGroup(&'static str);

    impl PermissionProvider for OnlyGroup {
        fn has_capability(&self, _id: PlayerId, _capability: &str) -> bool {
            false
        }

        fn in_group(&self, _id: PlayerId, group: &str) -> bool {
            group == self.0
        }

        fn has_override(&self, _id: PlayerId, _command: &str) -> bool {
            false
        }
    }

    #[test]
    fn prefixes_select_the_variant() {
        assert_eq!(
            PermissionToken::parse("@myplugin/can-see"),
            Some(PermissionToken::Capability("myplugin/can-see".into()))
        );
        assert_eq!(
            PermissionToken::parse("#admins"),
            Some(PermissionToken::Group("admins".into()))
        );
        assert_eq!(
            PermissionToken::parse("can-see-override"),
            Some(PermissionToken::Override("can-see-override".into()))
        );
        assert_eq!(PermissionToken::parse(""), None);
    }

    #[test]
    fn any_match_grants_access() {
        let tokens = parse_tokens(&["@root", "#vip", "css_damage"]);

        assert!(has_any_permission(&tokens, &OnlyGroup("vip"), PlayerId(1)));
        assert!(!has_any_permission(&tokens, &OnlyGroup("staff"), PlayerId(1)));
    }

    #[test]
    fn empty_list_lets_everyone_through() {
        let tokens = parse_tokens::<&str>(&[]);
        assert!(has_any_permission(&tokens, &OnlyGroup("nobody"), PlayerId(1)));

        let blank = parse_tokens(&["", "  "]);
        assert!(blank.is_empty());
    }
}

//! Runtime environment restrictions

use crate::types::ProviderType;

/// Runtime the session runs in, fixed for the session's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Every provider is usable
    #[default]
    Standard,
    /// Session-based providers are unusable (e.g. Safari, which blocks the
    /// cross-site cookies the web-app session relies on)
    Restricted,
}

impl Environment {
    /// Classify a browser user agent. Safari (but not Chrome, Chromium or
    /// Android browsers, which also mention Safari) is restricted.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        let is_safari = ua.contains("safari")
            && !ua.contains("chrome")
            && !ua.contains("chromium")
            && !ua.contains("android");
        if is_safari {
            Environment::Restricted
        } else {
            Environment::Standard
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, Environment::Restricted)
    }

    /// Whether `provider` can be chosen in this environment
    pub fn allows(&self, provider: ProviderType) -> bool {
        match self {
            Environment::Standard => true,
            Environment::Restricted => !provider.requires_session_features(),
        }
    }

    /// Providers the user can choose from, in display order
    pub fn selectable_providers(&self) -> Vec<ProviderType> {
        ProviderType::ALL
            .into_iter()
            .filter(|p| self.allows(*p))
            .collect()
    }

    /// Provider the session starts on, given the persisted active provider.
    ///
    /// A persisted provider that is not selectable here is replaced by the
    /// first selectable one.
    pub fn initial_provider(&self, persisted: ProviderType) -> ProviderType {
        if self.allows(persisted) {
            return persisted;
        }
        self.selectable_providers()
            .into_iter()
            .next()
            .unwrap_or(ProviderType::OfficialApi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_allows_everything() {
        let env = Environment::Standard;
        assert_eq!(env.selectable_providers(), ProviderType::ALL.to_vec());
        assert_eq!(env.initial_provider(ProviderType::ChatWebApp), ProviderType::ChatWebApp);
    }

    #[test]
    fn test_restricted_forces_official_api() {
        let env = Environment::Restricted;
        assert_eq!(env.selectable_providers(), vec![ProviderType::OfficialApi]);
        assert!(!env.allows(ProviderType::ChatWebApp));
        assert_eq!(env.initial_provider(ProviderType::ChatWebApp), ProviderType::OfficialApi);
        assert_eq!(env.initial_provider(ProviderType::OfficialApi), ProviderType::OfficialApi);
    }

    #[test]
    fn test_from_user_agent() {
        let safari = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                      (KHTML, like Gecko) Version/16.5 Safari/605.1.15";
        let chrome = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                      (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";
        let android = "Mozilla/5.0 (Linux; Android 13) AppleWebKit/537.36 Version/4.0 Safari/537.36";
        let firefox = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

        assert_eq!(Environment::from_user_agent(safari), Environment::Restricted);
        assert_eq!(Environment::from_user_agent(chrome), Environment::Standard);
        assert_eq!(Environment::from_user_agent(android), Environment::Standard);
        assert_eq!(Environment::from_user_agent(firefox), Environment::Standard);
        assert!(Environment::from_user_agent(safari).is_restricted());
    }
}

//! Provider tags and static provider metadata

use serde::{Deserialize, Serialize};

/// Which backend generates completions
///
/// The serialized names match records written by earlier releases
/// (`"chatgpt"` for the web-app session, `"gpt3"` for the keyed API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProviderType {
    /// Hosted chat web-app session
    #[serde(rename = "chatgpt")]
    ChatWebApp,
    /// Directly-keyed official API
    #[serde(rename = "gpt3")]
    OfficialApi,
}

impl ProviderType {
    /// Every provider, in display order
    pub const ALL: [ProviderType; 2] = [ProviderType::ChatWebApp, ProviderType::OfficialApi];

    /// Stable identifier, identical to the serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::ChatWebApp => "chatgpt",
            ProviderType::OfficialApi => "gpt3",
        }
    }

    /// Whether the provider authenticates with a user-supplied API key
    pub fn requires_credential(&self) -> bool {
        match self {
            ProviderType::ChatWebApp => false,
            ProviderType::OfficialApi => true,
        }
    }

    /// Whether the provider needs a model picked from the allowed list
    pub fn requires_model(&self) -> bool {
        match self {
            ProviderType::ChatWebApp => false,
            ProviderType::OfficialApi => true,
        }
    }

    /// Whether the provider depends on browser session features that a
    /// restricted environment does not offer
    pub fn requires_session_features(&self) -> bool {
        match self {
            ProviderType::ChatWebApp => true,
            ProviderType::OfficialApi => false,
        }
    }

    /// Static description of this provider
    pub fn metadata(&self) -> ProviderMetadata {
        match self {
            ProviderType::ChatWebApp => ProviderMetadata {
                id: *self,
                display_name: "ChatGPT webapp",
                description: "The API that powers ChatGPT webapp, free, but sometimes unstable",
                api_host_placeholder: None,
                api_path_placeholder: None,
                api_key_placeholder: None,
                api_key_url: None,
            },
            ProviderType::OfficialApi => ProviderMetadata {
                id: *self,
                display_name: "OpenAI API",
                description: "OpenAI official API, more stable, charge by usage",
                api_host_placeholder: Some("api.openai.com"),
                api_path_placeholder: Some("/v1/chat/completions"),
                api_key_placeholder: Some("sk-********"),
                api_key_url: Some("https://platform.openai.com/account/api-keys"),
            },
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider metadata (static information shown next to the provider choice)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    /// Provider this entry describes
    pub id: ProviderType,
    /// Display name
    pub display_name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Hint shown in an empty API host field
    pub api_host_placeholder: Option<&'static str>,
    /// Hint shown in an empty API path field
    pub api_path_placeholder: Option<&'static str>,
    /// Hint shown in an empty API key field
    pub api_key_placeholder: Option<&'static str>,
    /// Where users create or look up their API key
    pub api_key_url: Option<&'static str>,
}

/// Models offered when the host does not supply its own list
pub const DEFAULT_MODELS: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-0301",
    "gpt-3.5-turbo-0613",
    "gpt-3.5-turbo-16k",
    "text-davinci-003",
];

/// `DEFAULT_MODELS` as owned strings
pub fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_per_provider() {
        assert!(ProviderType::OfficialApi.requires_credential());
        assert!(ProviderType::OfficialApi.requires_model());
        assert!(!ProviderType::OfficialApi.requires_session_features());

        assert!(!ProviderType::ChatWebApp.requires_credential());
        assert!(!ProviderType::ChatWebApp.requires_model());
        assert!(ProviderType::ChatWebApp.requires_session_features());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&ProviderType::ChatWebApp).unwrap(), "\"chatgpt\"");
        assert_eq!(serde_json::to_string(&ProviderType::OfficialApi).unwrap(), "\"gpt3\"");

        let parsed: ProviderType = serde_json::from_str("\"gpt3\"").unwrap();
        assert_eq!(parsed, ProviderType::OfficialApi);

        for provider in ProviderType::ALL {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider));
        }
    }

    #[test]
    fn test_metadata() {
        let api = ProviderType::OfficialApi.metadata();
        assert_eq!(api.display_name, "OpenAI API");
        assert_eq!(api.api_host_placeholder, Some("api.openai.com"));

        let webapp = ProviderType::ChatWebApp.metadata();
        assert_eq!(webapp.id, ProviderType::ChatWebApp);
        assert!(webapp.api_key_url.is_none());
    }

    #[test]
    fn test_default_models() {
        let models = default_models();
        assert_eq!(models.len(), 5);
        assert_eq!(models[0], "gpt-3.5-turbo");
        assert!(models.contains(&"gpt-3.5-turbo-16k".to_string()));
    }
}

use serde_json::json;

use super::*;
use test_utils::builder::TestBuilder;

fn provider(name: &str, kind: ProviderKind) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        kind,
        client_id: format!("{}-client", name),
        client_secret: format!("{}-secret", name),
        auth_url: format!("https://{}.example.com/authorize", name),
        token_url: format!("https://{}.example.com/token", name),
        userinfo_url: format!("https://{}.example.com/userinfo", name),
        scopes: vec!["openid".to_string(), "email".to_string()],
        display_name: name.to_uppercase(),
        button: None,
    }
}

fn registry() -> AuthProviderRegistry {
    AuthProviderRegistry::new(vec![
        provider("google", ProviderKind::OpenIdConnect),
        provider("facebook", ProviderKind::OAuth2),
    ])
}

/// Tests listing providers in configuration order.
///
/// Expected: both providers with their type names
#[test]
fn lists_configured_providers() {
    let providers = registry().list();

    let names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["google", "facebook"]);
    assert_eq!(providers[0].kind, "OpenIDConnect");
    assert_eq!(providers[1].kind, "OAuth2");
}

/// Tests that selecting a provider records it in the session.
///
/// Expected: current() returns the selected provider
#[tokio::test]
async fn select_binds_provider_to_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();
    let provider_session = ProviderSession::new(session);
    let registry = registry();

    registry.select(&provider_session, "Facebook").await?;
    let current = registry.current(&provider_session).await?;

    assert_eq!(current.name(), "facebook");
    assert!(matches!(current, AuthHandler::OAuth2(_)));

    Ok(())
}

/// Tests selecting a provider that is not configured.
///
/// Expected: Err(UnknownProvider) and nothing bound to the session
#[tokio::test]
async fn rejects_unknown_provider() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();
    let provider_session = ProviderSession::new(session);

    let registry = registry();

    let result = registry.select(&provider_session, "github").await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UnknownProvider(name))) if name == "github"
    ));
    assert!(provider_session.get_provider().await?.is_none());

    Ok(())
}

/// Tests asking for the current provider before any login started.
///
/// Expected: Err(NoProviderInSession)
#[tokio::test]
async fn current_requires_bound_provider() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let registry = registry();
    let provider_session = ProviderSession::new(session);

    let result = registry.current(&provider_session).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NoProviderInSession))
    ));

    Ok(())
}

/// Tests the authorization URL carries the client, redirect and scopes.
///
/// Expected: URL on the provider's auth endpoint with a state parameter
#[test]
fn builds_authorization_url() {
    let registry = registry();
    let handler = registry.handler("google").unwrap();

    let (url, csrf) = handler
        .authorize_url("https://api.example.org/api/auth/callback")
        .unwrap();

    assert_eq!(url.host_str(), Some("google.example.com"));
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(query.contains(&("client_id".to_string(), "google-client".to_string())));
    assert!(query.contains(&("scope".to_string(), "openid email".to_string())));
    assert!(query.contains(&("state".to_string(), csrf.secret().clone())));
}

/// Tests identity extraction for both provider kinds.
///
/// Expected: subject from `sub` or `id`, name falling back to the email
#[test]
fn extracts_identity_by_provider_kind() {
    let registry = registry();
    let google = registry.handler("google").unwrap();
    let facebook = registry.handler("facebook").unwrap();

    let oidc = google
        .identity(&json!({"sub": "g-1", "email": "a@example.com", "name": "A"}))
        .unwrap();
    assert_eq!(oidc.subject, "g-1");
    assert_eq!(oidc.name, "A");

    let oauth = facebook
        .identity(&json!({"id": 42, "email": "b@example.com"}))
        .unwrap();
    assert_eq!(oauth.subject, "42");
    assert_eq!(oauth.name, "b@example.com");

    assert!(matches!(
        facebook.identity(&json!({"id": 1})),
        Err(AuthError::MissingEmail)
    ));
}

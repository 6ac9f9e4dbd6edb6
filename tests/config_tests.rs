use std::collections::HashMap;
use weekly_poll::core::config::{
    AppConfig, DEFAULT_STRAWPOLL_API_URL, NotifyConfig, PollSettings, WeekStart,
};
use weekly_poll::errors::PollError;

fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, PollError> {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

const EMAIL_VARS: &[(&str, &str)] = &[
    ("SMTP_HOST", "smtp.example.com"),
    ("SMTP_USERNAME", "bot@example.com"),
    ("SMTP_PASSWORD", "pw"),
    ("RECIPIENT_EMAIL", "team@example.com"),
];

const GITHUB_VARS: &[(&str, &str)] = &[
    ("GITHUB_TOKEN", "ghp_test"),
    ("GITHUB_REPO_OWNER", "octo"),
    ("GITHUB_REPO_NAME", "polls"),
];

#[test]
fn test_missing_api_key_fails_first() {
    let err = load(&[]).unwrap_err();
    match err {
        PollError::ConfigMissing(key) => assert_eq!(key, "STRAWPOLL_API_KEY"),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_api_key_counts_as_missing() {
    let err = load(&[("STRAWPOLL_API_KEY", "  ")]).unwrap_err();
    assert!(err.is_config());
    assert_eq!(
        err.to_string(),
        "Missing required configuration: STRAWPOLL_API_KEY"
    );
}

#[test]
fn test_defaults_select_email_and_publish() {
    let mut vars = vec![("STRAWPOLL_API_KEY", "key")];
    vars.extend_from_slice(EMAIL_VARS);
    vars.extend_from_slice(GITHUB_VARS);
    let config = load(&vars).unwrap();

    assert_eq!(config.strawpoll_api_url, DEFAULT_STRAWPOLL_API_URL);
    assert_eq!(config.poll, PollSettings::PUBLISH);
    assert_eq!(config.poll.week_start, WeekStart::Next);
    let NotifyConfig::Email(email) = &config.notify else {
        panic!("expected email notification");
    };
    assert_eq!(email.smtp_port, 587);
    assert_eq!(email.from.to_string(), "bot@example.com");
    assert_eq!(email.to.to_string(), "team@example.com");
    let github = config.publish.expect("publish enabled by default");
    assert_eq!(github.base_branch, "main");
    assert_eq!(github.api_url, "https://api.github.com");
}

#[test]
fn test_publish_on_requires_github_token() {
    let mut vars = vec![("STRAWPOLL_API_KEY", "key"), ("NOTIFY_VIA", "none")];
    vars.push(("GITHUB_REPO_OWNER", "octo"));
    let err = load(&vars).unwrap_err();
    assert!(matches!(err, PollError::ConfigMissing(ref k) if k == "GITHUB_TOKEN"));
}

#[test]
fn test_whatsapp_requires_all_twilio_keys() {
    let err = load(&[
        ("STRAWPOLL_API_KEY", "key"),
        ("NOTIFY_VIA", "whatsapp"),
        ("PUBLISH_RECORD", "off"),
        ("TWILIO_ACCOUNT_SID", "AC123"),
        ("TWILIO_AUTH_TOKEN", "tok"),
    ])
    .unwrap_err();
    assert!(matches!(err, PollError::ConfigMissing(ref k) if k == "TWILIO_WHATSAPP_NUMBER"));
}

#[test]
fn test_whatsapp_without_publish_uses_chat_profile() {
    let config = load(&[
        ("STRAWPOLL_API_KEY", "key"),
        ("NOTIFY_VIA", "WhatsApp"),
        ("PUBLISH_RECORD", "off"),
        ("TWILIO_ACCOUNT_SID", "AC123"),
        ("TWILIO_AUTH_TOKEN", "tok"),
        ("TWILIO_WHATSAPP_NUMBER", "+14155238886"),
        ("RECIPIENT_WHATSAPP_NUMBER", "+491701234567"),
        ("TWILIO_API_URL", "http://localhost:9999/"),
    ])
    .unwrap();
    assert_eq!(config.poll, PollSettings::CHAT);
    assert!(config.publish.is_none());
    let NotifyConfig::WhatsApp(wa) = &config.notify else {
        panic!("expected WhatsApp notification");
    };
    assert_eq!(wa.api_url, "http://localhost:9999");
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = load(&[("STRAWPOLL_API_KEY", "key"), ("NOTIFY_VIA", "pigeon")]).unwrap_err();
    assert!(matches!(err, PollError::ConfigInvalid { ref key, .. } if key == "NOTIFY_VIA"));

    let err = load(&[
        ("STRAWPOLL_API_KEY", "key"),
        ("NOTIFY_VIA", "none"),
        ("PUBLISH_RECORD", "maybe"),
    ])
    .unwrap_err();
    assert!(matches!(err, PollError::ConfigInvalid { ref key, .. } if key == "PUBLISH_RECORD"));

    let err = load(&[("STRAWPOLL_API_KEY", "key"), ("STRAWPOLL_API_URL", "not a url")])
        .unwrap_err();
    assert!(matches!(err, PollError::ConfigInvalid { ref key, .. } if key == "STRAWPOLL_API_URL"));

    let mut vars = vec![("STRAWPOLL_API_KEY", "key"), ("PUBLISH_RECORD", "off")];
    vars.extend_from_slice(EMAIL_VARS);
    vars.push(("SMTP_PORT", "smtp"));
    let err = load(&vars).unwrap_err();
    assert!(matches!(err, PollError::ConfigInvalid { ref key, .. } if key == "SMTP_PORT"));
}

#[test]
fn test_invalid_recipient_email_is_rejected() {
    let err = load(&[
        ("STRAWPOLL_API_KEY", "key"),
        ("PUBLISH_RECORD", "off"),
        ("SMTP_HOST", "smtp.example.com"),
        ("SMTP_USERNAME", "bot@example.com"),
        ("SMTP_PASSWORD", "pw"),
        ("RECIPIENT_EMAIL", "nobody"),
    ])
    .unwrap_err();
    assert!(matches!(err, PollError::ConfigInvalid { ref key, .. } if key == "RECIPIENT_EMAIL"));
}

#[test]
fn test_email_from_is_parsed_once_into_a_mailbox() {
    let mut vars = vec![
        ("STRAWPOLL_API_KEY", "key"),
        ("PUBLISH_RECORD", "off"),
        ("EMAIL_FROM", "Poll Bot <polls@example.com>"),
    ];
    vars.extend_from_slice(EMAIL_VARS);
    let config = load(&vars).unwrap();

    let NotifyConfig::Email(email) = &config.notify else {
        panic!("expected email notification");
    };
    assert_eq!(email.from.name.as_deref(), Some("Poll Bot"));
    assert_eq!(email.from.email.to_string(), "polls@example.com");
    assert_eq!(email.to.email.to_string(), "team@example.com");
}

#[test]
fn test_invalid_sender_email_is_rejected() {
    let mut vars = vec![
        ("STRAWPOLL_API_KEY", "key"),
        ("PUBLISH_RECORD", "off"),
        ("EMAIL_FROM", "not an address"),
    ];
    vars.extend_from_slice(EMAIL_VARS);
    let err = load(&vars).unwrap_err();
    assert!(matches!(err, PollError::ConfigInvalid { ref key, .. } if key == "EMAIL_FROM"));
}

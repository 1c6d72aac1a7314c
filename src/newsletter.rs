use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::info;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

#[derive(Debug, Error, PartialEq)]
pub enum NewsletterError {
    #[error("Please enter your email address.")]
    EmailRequired,

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

impl Subscription {
    pub fn welcome_message(&self) -> String {
        format!(
            "Welcome to Rare Beauty! We've sent a confirmation to {}",
            self.email
        )
    }
}

#[tracing::instrument(fields(feature = "newsletter"))]
pub fn validate_subscription(email: &str) -> Result<Subscription, NewsletterError> {
    if email.trim().is_empty() {
        return Err(NewsletterError::EmailRequired);
    }
    if !EMAIL.is_match(email) {
        return Err(NewsletterError::InvalidEmail);
    }

    info!("newsletter subscription accepted");
    Ok(Subscription {
        email: email.to_owned(),
        subscribed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::assert_ok;

    #[test]
    fn blank_email_is_required() {
        assert_eq!(
            validate_subscription("   ").unwrap_err(),
            NewsletterError::EmailRequired
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in &["plainaddress", "a@b", "a b@x.com", "@x.com", "a@x."] {
            assert_eq!(
                validate_subscription(email).unwrap_err(),
                NewsletterError::InvalidEmail,
                "{} should be rejected",
                email
            );
        }
    }

    #[test]
    fn accepts_plausible_addresses() {
        let subscription = assert_ok!(validate_subscription("ada@example.co.uk"));
        assert_eq!(subscription.email, "ada@example.co.uk");
        assert!(subscription.welcome_message().contains("ada@example.co.uk"));
    }
}

//! Transport registry for the search connection.
//!
//! The transport names a fixed, compiled-in decoration applied to every
//! outgoing search request. Deployments select one by key; an unknown key
//! is a configuration error that aborts startup rather than falling back
//! to anything.

use std::fmt;
use std::str::FromStr;

use crate::config::SearchConfig;
use crate::sigv4::SigV4Signer;
use crate::SearchError;

pub const TRANSPORT_DEFAULT: &str = "default";
pub const TRANSPORT_AWS_SIGV4: &str = "aws-sigv4";

/// Every key the registry recognizes, for error messages.
pub const KNOWN_TRANSPORTS: &[&str] = &[TRANSPORT_DEFAULT, TRANSPORT_AWS_SIGV4];

/// A recognized transport key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Default,
    AwsSigV4,
}

impl FromStr for TransportKind {
    type Err = SearchError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            TRANSPORT_DEFAULT => Ok(Self::Default),
            TRANSPORT_AWS_SIGV4 => Ok(Self::AwsSigV4),
            other => Err(SearchError::Config(format!(
                "unknown search transport {other:?}; known transports: {}",
                KNOWN_TRANSPORTS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str(TRANSPORT_DEFAULT),
            Self::AwsSigV4 => f.write_str(TRANSPORT_AWS_SIGV4),
        }
    }
}

/// A built transport, ready to decorate requests.
#[derive(Debug, Clone)]
pub enum Transport {
    /// Plain HTTP, no request signing.
    Default,
    /// AWS SigV4-signed requests, for managed clusters behind IAM.
    AwsSigV4(SigV4Signer),
}

impl Transport {
    /// Build the transport the config names. Unset credential fields never
    /// participate in the build; the SigV4 transport requires the full
    /// credential triple and treats a partial one as a configuration error
    /// instead of a silently unsigned client.
    pub fn build(config: &SearchConfig) -> Result<Self, SearchError> {
        let kind = match config.transport.as_deref() {
            None => TransportKind::Default,
            Some(key) => key.parse()?,
        };

        match kind {
            TransportKind::Default => Ok(Self::Default),
            TransportKind::AwsSigV4 => match (
                &config.aws_access_key_id,
                &config.aws_secret_access_key,
                &config.aws_region,
            ) {
                (Some(key), Some(secret), Some(region)) => {
                    Ok(Self::AwsSigV4(SigV4Signer::new(key, secret, region)))
                }
                _ => Err(SearchError::Config(format!(
                    "transport {TRANSPORT_AWS_SIGV4:?} requires SEARCH_AWS_ACCESS_KEY_ID, \
                     SEARCH_AWS_SECRET_ACCESS_KEY and SEARCH_AWS_REGION to all be set"
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigv4_config() -> SearchConfig {
        SearchConfig {
            host: Some("http://localhost:9200".to_string()),
            transport: Some(TRANSPORT_AWS_SIGV4.to_string()),
            aws_access_key_id: Some("key".to_string()),
            aws_secret_access_key: Some("secret".to_string()),
            aws_region: Some("us-east-1".to_string()),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn unset_transport_builds_the_default() {
        let config = SearchConfig::default();
        assert!(matches!(Transport::build(&config), Ok(Transport::Default)));
    }

    #[test]
    fn unknown_keys_fail_naming_the_registry() {
        let err = "elasticsearch2".parse::<TransportKind>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("elasticsearch2"), "{message}");
        assert!(message.contains("default"), "{message}");
        assert!(message.contains("aws-sigv4"), "{message}");
    }

    #[test]
    fn sigv4_requires_the_full_credential_triple() {
        assert!(matches!(
            Transport::build(&sigv4_config()),
            Ok(Transport::AwsSigV4(_))
        ));

        for strip in 0..3 {
            let mut config = sigv4_config();
            match strip {
                0 => config.aws_access_key_id = None,
                1 => config.aws_secret_access_key = None,
                _ => config.aws_region = None,
            }
            let err = Transport::build(&config).unwrap_err();
            assert!(matches!(err, SearchError::Config(_)), "{err}");
        }
    }

    #[test]
    fn kinds_round_trip_through_their_keys() {
        for kind in [TransportKind::Default, TransportKind::AwsSigV4] {
            assert_eq!(kind.to_string().parse::<TransportKind>().unwrap(), kind);
        }
    }
}

// granskare-config/src/validation.rs
//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across configuration modules.

use ipnetwork::IpNetwork;
use validator::ValidationError;

/// Validate that the provided CIDR list does not contain any invalid ranges.
pub fn validate_cidr_list(cidrs: &[IpNetwork]) -> Result<(), ValidationError> {
    if cidrs.iter().any(|n| match n {
        IpNetwork::V4(net) => net.ip().octets() == [0, 0, 0, 0],
        IpNetwork::V6(_) => false,
    }) {
        return Err(ValidationError::new("invalid_cidr"));
    }
    Ok(())
}

/// Splits a comma-separated home-network list into CIDR blocks.
///
/// Malformed entries are reported and skipped; a bad optional field must
/// never abort the run.
pub fn parse_home_net(raw: &str) -> Vec<IpNetwork> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<IpNetwork>() {
            Ok(net) => Some(net),
            Err(e) => {
                tracing::warn!("ignoring malformed home_net entry '{token}': {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_list_parses_in_order() {
        let nets = parse_home_net("192.168.1.0/24, 10.0.0.0/8");
        assert_eq!(nets.len(), 2);
        assert_eq!(nets[0].to_string(), "192.168.1.0/24");
        assert_eq!(nets[1].to_string(), "10.0.0.0/8");
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let nets = parse_home_net("192.168.1.0/24,not-a-cidr,172.16.0.0/12");
        assert_eq!(nets.len(), 2);
    }

    #[test]
    fn empty_tokens_are_ignored() {
        assert!(parse_home_net(" , ,").is_empty());
    }

    #[test]
    fn zero_network_fails_cidr_validation() {
        let cidrs = vec!["0.0.0.0/0".parse().unwrap()];
        assert!(validate_cidr_list(&cidrs).is_err());
    }
}

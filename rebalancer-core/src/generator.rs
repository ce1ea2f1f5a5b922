use crate::{
    address::{decode_and_pad_address, decode_token_id},
    parse_amount, GenerateError, OutboundMessage, Route, RouteSet,
};

/// Builds the outbound transfers that fulfil a set of routes.
///
/// Messages come out in route order, one per route. Any route that cannot be
/// turned into a message fails the whole batch.
#[derive(Debug, Clone)]
pub struct MessageGenerator {
    multisig_address: String,
}

impl MessageGenerator {
    /// Generate messages sent by `multisig_address`
    pub fn new(multisig_address: impl Into<String>) -> Self {
        Self {
            multisig_address: multisig_address.into(),
        }
    }

    /// One outbound message per route
    pub fn generate(&self, route_set: &RouteSet) -> Result<Vec<OutboundMessage>, GenerateError> {
        route_set
            .routes
            .iter()
            .map(|route| self.message(route))
            .collect()
    }

    /// The outbound message fulfilling a single route
    pub fn message(&self, route: &Route) -> Result<OutboundMessage, GenerateError> {
        let tx_id = || route.source_tx_id.clone();
        let info = route
            .route_info
            .as_ref()
            .ok_or_else(|| GenerateError::MissingRouteInfo { tx_id: tx_id() })?;

        let amount = route.effective_amount();
        let amount = parse_amount(amount).ok_or_else(|| GenerateError::InvalidAmount {
            amount: amount.to_owned(),
            tx_id: tx_id(),
        })?;
        let token_id = decode_token_id(&info.token_id)
            .map_err(|source| GenerateError::InvalidTokenId {
                tx_id: tx_id(),
                source,
            })?;
        let recipient = decode_and_pad_address(&info.recipient).map_err(|source| {
            GenerateError::InvalidRecipient {
                tx_id: tx_id(),
                source,
            }
        })?;

        Ok(OutboundMessage {
            sender: self.multisig_address.clone(),
            token_id,
            destination_domain: info.destination_domain,
            recipient,
            amount,
            hook_metadata: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;
    use crate::{AddressError, RouteInfo};

    const MULTISIG: &str = "celestia1multisig";
    const TOKEN_ID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
    const RECIPIENT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0";

    fn route(tx_id: &str, domain: u32, amount: &str, amount_override: Option<&str>) -> Route {
        Route {
            source_tx_id: tx_id.to_owned(),
            source_height: 1,
            sender: "celestia1user".to_owned(),
            amount: amount.to_owned(),
            denom: "utia".to_owned(),
            raw_metadata: None,
            route_info: Some(RouteInfo::new(
                domain,
                RECIPIENT.to_owned(),
                TOKEN_ID.to_owned(),
                amount_override.map(str::to_owned),
            )),
        }
    }

    fn route_set(routes: Vec<Route>) -> RouteSet {
        let mut set = RouteSet::new(MULTISIG);
        routes.into_iter().for_each(|r| set.push(r));
        set
    }

    #[test]
    fn generates_message_for_route() {
        // Given
        let set = route_set(vec![route("AA", 1380012617, "1000000", None)]);

        // When
        let messages = MessageGenerator::new(MULTISIG).generate(&set).unwrap();

        // Then
        assert_eq!(messages.len(), 1);
        let message = &messages[0];
        assert_eq!(message.sender, MULTISIG);
        assert_eq!(message.destination_domain, 1380012617);
        assert_eq!(message.amount, BigUint::from(1_000_000u32));
        assert_eq!(message.token_id.as_bytes().len(), 32);
        assert_eq!(message.recipient.as_bytes().len(), 32);
        assert_eq!(message.token_id.to_canonical_hex(), TOKEN_ID);
        assert_eq!(
            message.recipient.to_canonical_hex(),
            "0x000000000000000000000000742d35cc6634c0532925a3b844bc9e7595f0beb0"
        );
        assert_eq!(message.hook_metadata, None);
    }

    #[test]
    fn uses_override_amount() {
        let set = route_set(vec![route("AA", 137, "1000000", Some("250000"))]);

        let messages = MessageGenerator::new(MULTISIG).generate(&set).unwrap();

        assert_eq!(messages[0].amount, BigUint::from(250_000u32));
    }

    #[test]
    fn keeps_route_order() {
        let set = route_set(vec![
            route("AA", 1380012617, "1", None),
            route("BB", 137, "2", None),
            route("CC", 137, "2", None),
        ]);

        let messages = MessageGenerator::new(MULTISIG).generate(&set).unwrap();

        let domains: Vec<_> = messages.iter().map(|m| m.destination_domain).collect();
        assert_eq!(domains, [1380012617, 137, 137]);
        assert_eq!(messages[1], messages[2]);
    }

    #[test]
    fn missing_route_info_fails() {
        let mut bad = route("BB", 137, "1", None);
        bad.route_info = None;
        let set = route_set(vec![route("AA", 137, "1", None), bad]);

        let result = MessageGenerator::new(MULTISIG).generate(&set);

        assert_eq!(
            result,
            Err(GenerateError::MissingRouteInfo {
                tx_id: "BB".to_owned()
            })
        );
    }

    #[test]
    fn invalid_amount_fails() {
        let set = route_set(vec![route("AA", 137, "12abc", None)]);

        let result = MessageGenerator::new(MULTISIG).generate(&set);

        assert_eq!(
            result,
            Err(GenerateError::InvalidAmount {
                amount: "12abc".to_owned(),
                tx_id: "AA".to_owned()
            })
        );
    }

    #[test]
    fn short_token_id_fails() {
        let mut bad = route("AA", 137, "1", None);
        bad.route_info.as_mut().unwrap().token_id = "0xabcd".to_owned();

        let result = MessageGenerator::new(MULTISIG).message(&bad);

        assert_eq!(
            result,
            Err(GenerateError::InvalidTokenId {
                tx_id: "AA".to_owned(),
                source: AddressError::InvalidTokenId(2)
            })
        );
    }

    #[test]
    fn bad_recipient_fails() {
        let mut bad = route("AA", 137, "1", None);
        bad.route_info.as_mut().unwrap().recipient = "celestia1nope".to_owned();

        let result = MessageGenerator::new(MULTISIG).message(&bad);

        assert!(matches!(
            result,
            Err(GenerateError::InvalidRecipient {
                source: AddressError::InvalidBech32(_),
                ..
            })
        ));
    }
}

use serde::{Deserialize, Serialize};

use crate::{
    address::{canonical_hex, normalize_hex},
    KnownDomain, OutboundMessage, Route, RouteSet,
};

/// Messages found in a candidate transaction, together with everything in it
/// that could not be read as an outbound transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateMessages {
    /// Outbound transfers in container order
    pub messages: Vec<OutboundMessage>,
    /// Findings about entries that were ignored while decoding
    pub warnings: Vec<String>,
}

impl From<Vec<OutboundMessage>> for CandidateMessages {
    fn from(messages: Vec<OutboundMessage>) -> Self {
        Self {
            messages,
            warnings: Vec::new(),
        }
    }
}

/// Outcome of checking a candidate message set against a route set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True iff `errors` is empty
    pub valid: bool,
    /// Routes satisfied by a candidate message
    pub matched_count: usize,
    /// Routes in the route set
    pub total_routes: usize,
    /// Findings that make the candidate unacceptable
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Findings worth a look that do not fail verification
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Checks that a candidate message set fulfils every route exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteVerifier;

impl RouteVerifier {
    /// Whether `message` fulfils `route`: same domain, same effective amount,
    /// same token id and the same recipient once both are canonicalized.
    pub fn matches(message: &OutboundMessage, route: &Route) -> bool {
        let Some(info) = &route.route_info else {
            return false;
        };
        if message.destination_domain != info.destination_domain {
            return false;
        }
        if message.amount.to_str_radix(10) != route.effective_amount() {
            return false;
        }
        if normalize_hex(&message.token_id.to_canonical_hex()) != normalize_hex(&info.token_id) {
            return false;
        }
        canonical_hex(&info.recipient)
            .map(|expected| expected == message.recipient.to_canonical_hex())
            .unwrap_or(false)
    }

    /// Check `candidates` against `route_set`.
    ///
    /// Every route has to be satisfied by its own message; a message is
    /// claimed by the first unmatched route it satisfies. All findings are
    /// collected, nothing short circuits.
    pub fn verify(&self, route_set: &RouteSet, candidates: &CandidateMessages) -> VerificationReport {
        let messages = &candidates.messages;
        let mut errors = Vec::new();
        let mut warnings = candidates.warnings.clone();

        if messages.len() != route_set.len() {
            errors.push(format!(
                "message count mismatch: {} routes but {} messages",
                route_set.len(),
                messages.len()
            ));
        }

        for (index, message) in messages.iter().enumerate() {
            if message.sender != route_set.multisig_address {
                warnings.push(format!(
                    "message {index}: sender {} is not the multisig {}",
                    message.sender, route_set.multisig_address
                ));
            }
        }

        let mut claimed = vec![false; messages.len()];
        let mut matched_count = 0;
        for (index, route) in route_set.routes.iter().enumerate() {
            let Some(info) = &route.route_info else {
                errors.push(format!(
                    "route {index} (tx {}): missing route info",
                    route.source_tx_id
                ));
                continue;
            };
            let found = messages
                .iter()
                .zip(claimed.iter())
                .position(|(message, claimed)| !claimed && Self::matches(message, route));
            match found {
                Some(position) => {
                    claimed[position] = true;
                    matched_count += 1;
                }
                None => errors.push(format!(
                    "route {index} (tx {}): no matching message for domain {}, amount {}, recipient {}",
                    route.source_tx_id,
                    KnownDomain::describe(info.destination_domain),
                    route.effective_amount(),
                    info.recipient
                )),
            }
        }

        for (index, message) in messages.iter().enumerate() {
            if !claimed[index] {
                warnings.push(format!(
                    "message {index} to domain {} for amount {} does not fulfil any route",
                    KnownDomain::describe(message.destination_domain),
                    message.amount
                ));
            }
        }

        VerificationReport {
            valid: errors.is_empty(),
            matched_count,
            total_routes: route_set.len(),
            errors,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests;

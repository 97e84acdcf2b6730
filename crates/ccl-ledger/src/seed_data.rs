//! Fixture records written by `initLedger`.

/// An asset created at bootstrap under `key`.
#[derive(Clone, Copy, Debug)]
pub struct SeedAsset {
    pub key: &'static str,
    pub description: &'static str,
    pub location: &'static str,
    pub holder: &'static str,
}

/// A participant created at bootstrap.
#[derive(Clone, Copy, Debug)]
pub struct SeedParticipant {
    pub role: &'static str,
    pub description: &'static str,
}

pub const SEED_ASSETS: [SeedAsset; 10] = [
    asset("1", "Apples", "67.0006, -70.5476", "Producer"),
    asset("2", "Oranges", "91.2395, -49.4594", "Freight Forwarder"),
    asset("3", "Avocados", "58.0148, 59.01391", "Customs"),
    asset("4", "Pineapples", "-45.0945, 0.7949", "Producer"),
    asset("5", "Olives", "-107.6043, 19.5003", "Shipper"),
    asset("6", "Mangos", "-155.2304, -15.8723", "Distributor"),
    asset("7", "Grapefruits", "103.8842, 22.1277", "Customs"),
    asset("8", "Watermelons", "-132.3207, -34.0983", "Freight Forwarder"),
    asset("9", "Bananas", "153.0054, 12.6429", "Shipper"),
    asset("10", "Clementines", "51.9435, 8.2735", "Retailer"),
];

pub const SEED_PARTICIPANTS: [SeedParticipant; 6] = [
    participant("Producer", "Farmer / Goods producer"),
    participant("Freight Forwarder", "Logistics"),
    participant("Customs", ""),
    participant("Shipper", ""),
    participant("Distributor", "Fruits distributor"),
    participant("Retailer", "Large grocery store"),
];

const fn asset(
    key: &'static str,
    description: &'static str,
    location: &'static str,
    holder: &'static str,
) -> SeedAsset {
    SeedAsset {
        key,
        description,
        location,
        holder,
    }
}

const fn participant(role: &'static str, description: &'static str) -> SeedParticipant {
    SeedParticipant { role, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_seed_holder_is_a_participant() {
        let roles: HashSet<_> = SEED_PARTICIPANTS.iter().map(|p| p.role).collect();
        for asset in &SEED_ASSETS {
            assert!(roles.contains(asset.holder), "{} has no participant", asset.holder);
        }
    }

    #[test]
    fn seed_keys_are_unique() {
        let keys: HashSet<_> = SEED_ASSETS.iter().map(|a| a.key).collect();
        assert_eq!(keys.len(), SEED_ASSETS.len());
    }
}

use super::gateway::OrderServiceGateway;
use contracts::domain::a003_dealer::UNKNOWN_DEALER;
use std::collections::HashMap;

/// Справочник имён дилеров одного снимка заказа
///
/// Каждый ID запрашивается один раз. Справочник живёт вместе со снимком,
/// при перечитывании заказа строится заново.
#[derive(Debug, Clone, Default)]
pub struct DealerDirectory {
    names: HashMap<String, String>,
}

impl DealerDirectory {
    pub async fn load<I>(gateway: &dyn OrderServiceGateway, dealer_ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut names = HashMap::new();

        for dealer_id in dealer_ids {
            if dealer_id.is_empty() || names.contains_key(&dealer_id) {
                continue;
            }
            let name = match gateway.get_dealer_by_id(&dealer_id).await {
                Ok(dealer) => dealer.display_name(),
                Err(e) => {
                    tracing::warn!("Dealer {} lookup failed: {}", dealer_id, e);
                    UNKNOWN_DEALER.to_string()
                }
            };
            names.insert(dealer_id, name);
        }

        Self { names }
    }

    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    pub fn name_of(&self, dealer_id: &str) -> &str {
        self.names
            .get(dealer_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DEALER)
    }
}

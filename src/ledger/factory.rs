use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;
use crate::ledger::service::Ledger;

pub fn create_ledger(config: &Configuration, via: GatewayPublisherVia) -> Ledger {
    let publisher = create_publisher(via);
    Ledger::new(config, publisher)
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;
    use crate::gateway::GatewayPublisherVia;
    use crate::ledger::factory::create_ledger;

    #[test]
    fn test_should_create_ledger() {
        for via in [GatewayPublisherVia::Log, GatewayPublisherVia::Memory] {
            let ledger = create_ledger(&Configuration::new("City Library"), via);
            assert_eq!("City Library", ledger.name());
            assert!(ledger.items().is_empty());
        }
    }
}

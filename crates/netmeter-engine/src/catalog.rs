//! Built-in Neutron resource catalog
//!
//! Network resource types metered from Neutron notifications, in
//! registration (match priority) order.

use crate::routing::{DescriptorRegistry, ResourceDescriptor, Transform};
use crate::transforms::BANDWIDTH_EVENT_TYPE;
use netmeter_common::RegistryError;

/// Core resources, named after themselves
const CORE_RESOURCES: &[&str] = &["network", "subnet", "port", "router"];

/// Advanced services: (resource name, counter name)
const SERVICE_RESOURCES: &[(&str, &str)] = &[
    ("pool", "network.services.lb.pool"),
    ("vip", "network.services.lb.vip"),
    ("member", "network.services.lb.member"),
    ("health_monitor", "network.services.lb.health_monitor"),
    ("firewall", "network.services.firewall"),
    ("firewall_policy", "network.services.firewall.policy"),
    ("firewall_rule", "network.services.firewall.rule"),
    ("vpnservice", "network.services.vpn"),
    ("ipsecpolicy", "network.services.vpn.ipsecpolicy"),
    ("ikepolicy", "network.services.vpn.ikepolicy"),
    ("ipsec_site_connection", "network.services.vpn.connections"),
];

/// Registry with every Neutron resource type
pub fn neutron_registry() -> Result<DescriptorRegistry, RegistryError> {
    let mut builder = DescriptorRegistry::builder();

    for name in CORE_RESOURCES {
        builder = builder.register(ResourceDescriptor::generic(name)?)?;
    }

    builder = builder
        .register(
            ResourceDescriptor::generic("floatingip")?
                .with_counter_name("ip.floating")
                .with_unit("ip"),
        )?
        .register(ResourceDescriptor::custom(
            "bandwidth",
            &[BANDWIDTH_EVENT_TYPE],
            Transform::Bandwidth,
        )?)?;

    for (name, counter) in SERVICE_RESOURCES {
        builder = builder.register(ResourceDescriptor::generic(name)?.with_counter_name(*counter))?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_order() {
        let registry = neutron_registry().unwrap();
        assert_eq!(registry.len(), 17);

        let names: Vec<_> = registry.iter().map(|d| d.resource_name()).take(6).collect();
        assert_eq!(
            names,
            vec!["network", "subnet", "port", "router", "floatingip", "bandwidth"]
        );
    }

    #[test]
    fn test_floatingip_overrides() {
        let registry = neutron_registry().unwrap();
        let floatingip = registry.get("floatingip").unwrap();
        assert_eq!(floatingip.counter_name(), "ip.floating");
        assert_eq!(floatingip.unit(), "ip");
    }

    #[test]
    fn test_service_counters_keep_default_unit() {
        let registry = neutron_registry().unwrap();
        let policy = registry.get("firewall_policy").unwrap();
        assert_eq!(policy.counter_name(), "network.services.firewall.policy");
        assert_eq!(policy.unit(), "firewall_policy");

        let connections = registry.get("ipsec_site_connection").unwrap();
        assert_eq!(connections.counter_name(), "network.services.vpn.connections");
    }

    #[test]
    fn test_bandwidth_only_claims_meter_events() {
        let registry = neutron_registry().unwrap();
        let bandwidth = registry.get("bandwidth").unwrap();
        assert_eq!(bandwidth.transform(), Transform::Bandwidth);
        assert!(bandwidth.matches("l3.meter"));
        assert!(!bandwidth.matches("bandwidth.exists"));
    }

    #[test]
    fn test_event_types_cover_every_resource() {
        let registry = neutron_registry().unwrap();
        let event_types = registry.event_types();
        assert_eq!(event_types.len(), 16 * 3 + 1);
        assert!(event_types.contains(&"health_monitor.update.*".to_string()));
        assert!(event_types.contains(&"l3.meter".to_string()));
    }
}

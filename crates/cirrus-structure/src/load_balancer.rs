//! Load balancer health checks, access logs, backends and policies

use crate::api::{
    AccessLog, BackendServerDescription, HealthCheck, Instance, PolicyAttribute,
    PolicyAttributeDescription,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `health_check` block of a load balancer resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthCheckBlock {
    pub target: String,
    pub interval: i32,
    pub timeout: i32,
    pub healthy_threshold: i32,
    pub unhealthy_threshold: i32,
}

/// `access_logs` block of a load balancer resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessLogBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i32>,
    #[serde(default)]
    pub enabled: bool,
}

/// `policy_attribute` block of a load balancer policy resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyAttributeBlock {
    pub name: String,
    pub value: String,
}

pub fn expand_health_check(block: &HealthCheckBlock) -> HealthCheck {
    HealthCheck {
        target: block.target.clone(),
        interval: block.interval,
        timeout: block.timeout,
        healthy_threshold: block.healthy_threshold,
        unhealthy_threshold: block.unhealthy_threshold,
    }
}

/// Health check as a single-element block list
pub fn flatten_health_check(check: &HealthCheck) -> Vec<HealthCheckBlock> {
    vec![HealthCheckBlock {
        target: check.target.clone(),
        interval: check.interval,
        timeout: check.timeout,
        healthy_threshold: check.healthy_threshold,
        unhealthy_threshold: check.unhealthy_threshold,
    }]
}

/// Access log settings as a block list; empty when the balancer reports none
pub fn flatten_access_log(log: Option<&AccessLog>) -> Vec<AccessLogBlock> {
    log.map(|log| AccessLogBlock {
        bucket: log.s3_bucket_name.clone(),
        bucket_prefix: log.s3_bucket_prefix.clone(),
        interval: log.emit_interval,
        enabled: log.enabled,
    })
    .into_iter()
    .collect()
}

/// Map each backend instance port to its policy names, sorted
///
/// Entries for the same port are merged.
pub fn flatten_backend_policies(
    backends: &[BackendServerDescription],
) -> BTreeMap<i32, Vec<String>> {
    let mut policies: BTreeMap<i32, Vec<String>> = BTreeMap::new();
    for backend in backends {
        policies
            .entry(backend.instance_port)
            .or_default()
            .extend(backend.policy_names.iter().cloned());
    }
    for names in policies.values_mut() {
        names.sort();
    }
    policies
}

pub fn expand_instances(ids: &[String]) -> Vec<Instance> {
    ids.iter()
        .map(|id| Instance {
            instance_id: id.clone(),
        })
        .collect()
}

pub fn flatten_instances(instances: &[Instance]) -> Vec<String> {
    instances.iter().map(|i| i.instance_id.clone()).collect()
}

pub fn expand_policy_attributes(configured: &[PolicyAttributeBlock]) -> Vec<PolicyAttribute> {
    configured
        .iter()
        .map(|attr| PolicyAttribute {
            attribute_name: attr.name.clone(),
            attribute_value: attr.value.clone(),
        })
        .collect()
}

/// Convert described policy attributes into blocks
///
/// Missing names or values become empty strings.
pub fn flatten_policy_attributes(list: &[PolicyAttributeDescription]) -> Vec<PolicyAttributeBlock> {
    list.iter()
        .map(|attr| PolicyAttributeBlock {
            name: attr.attribute_name.clone().unwrap_or_default(),
            value: attr.attribute_value.clone().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_round_trip() {
        let check = HealthCheck {
            target: "HTTP:8000/".to_string(),
            interval: 30,
            timeout: 5,
            healthy_threshold: 10,
            unhealthy_threshold: 2,
        };

        let blocks = flatten_health_check(&check);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].target, "HTTP:8000/");
        assert_eq!(expand_health_check(&blocks[0]), check);
    }

    #[test]
    fn test_flatten_access_log() {
        let log = AccessLog {
            enabled: true,
            s3_bucket_name: Some("logs".to_string()),
            s3_bucket_prefix: None,
            emit_interval: Some(60),
        };

        let blocks = flatten_access_log(Some(&log));
        assert_eq!(
            blocks,
            vec![AccessLogBlock {
                bucket: Some("logs".to_string()),
                bucket_prefix: None,
                interval: Some(60),
                enabled: true,
            }]
        );

        assert!(flatten_access_log(None).is_empty());
    }

    #[test]
    fn test_backend_policies_are_sorted_per_port() {
        let backends = vec![
            BackendServerDescription {
                instance_port: 443,
                policy_names: vec!["zeta".to_string(), "alpha".to_string()],
            },
            BackendServerDescription {
                instance_port: 80,
                policy_names: vec!["proxy".to_string()],
            },
            BackendServerDescription {
                instance_port: 443,
                policy_names: vec!["mid".to_string()],
            },
        ];

        let policies = flatten_backend_policies(&backends);
        assert_eq!(policies[&443], vec!["alpha", "mid", "zeta"]);
        assert_eq!(policies[&80], vec!["proxy"]);
    }

    #[test]
    fn test_backend_policy_order_does_not_depend_on_input_order() {
        let forward = vec![BackendServerDescription {
            instance_port: 8443,
            policy_names: vec!["b".to_string(), "a".to_string(), "c".to_string()],
        }];
        let reverse = vec![BackendServerDescription {
            instance_port: 8443,
            policy_names: vec!["c".to_string(), "a".to_string(), "b".to_string()],
        }];

        assert_eq!(
            flatten_backend_policies(&forward),
            flatten_backend_policies(&reverse)
        );
    }

    #[test]
    fn test_instances() {
        let ids = vec!["i-1".to_string(), "i-2".to_string()];
        let instances = expand_instances(&ids);
        assert_eq!(instances[1].instance_id, "i-2");
        assert_eq!(flatten_instances(&instances), ids);
    }

    #[test]
    fn test_policy_attributes() {
        let configured = vec![PolicyAttributeBlock {
            name: "ProxyProtocol".to_string(),
            value: "true".to_string(),
        }];
        let expanded = expand_policy_attributes(&configured);
        assert_eq!(expanded[0].attribute_name, "ProxyProtocol");

        let described = vec![PolicyAttributeDescription {
            attribute_name: Some("ProxyProtocol".to_string()),
            attribute_value: Some("true".to_string()),
        }];
        assert_eq!(flatten_policy_attributes(&described), configured);
    }
}

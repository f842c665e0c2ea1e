//! Typed API shapes
//!
//! Request/response structures of the compute (FCU/EC2) and load balancer
//! (LBU/ELB) APIs that the mapper produces and consumes. Field names serialize
//! to the API's own member names so a shape can be logged or diffed against a
//! raw response.

use serde::{Deserialize, Serialize};

// --- Load balancer -------------------------------------------------------

/// A load balancer listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listener {
    pub instance_port: i32,
    pub instance_protocol: String,
    pub load_balancer_port: i32,
    pub protocol: String,
    #[serde(
        rename = "SSLCertificateId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ssl_certificate_id: Option<String>,
}

/// A listener as returned by DescribeLoadBalancers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListenerDescription {
    pub listener: Listener,
    #[serde(default)]
    pub policy_names: Vec<String>,
}

/// Health check settings of a load balancer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthCheck {
    pub target: String,
    pub interval: i32,
    pub timeout: i32,
    pub healthy_threshold: i32,
    pub unhealthy_threshold: i32,
}

/// Access log settings of a load balancer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessLog {
    pub enabled: bool,
    #[serde(default)]
    pub s3_bucket_name: Option<String>,
    #[serde(default)]
    pub s3_bucket_prefix: Option<String>,
    #[serde(default)]
    pub emit_interval: Option<i32>,
}

/// Policies attached to one backend instance port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackendServerDescription {
    pub instance_port: i32,
    #[serde(default)]
    pub policy_names: Vec<String>,
}

/// A backend instance registered with a load balancer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    pub instance_id: String,
}

/// A policy attribute sent with CreateLoadBalancerPolicy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyAttribute {
    pub attribute_name: String,
    pub attribute_value: String,
}

/// A policy attribute as returned by DescribeLoadBalancerPolicies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyAttributeDescription {
    #[serde(default)]
    pub attribute_name: Option<String>,
    #[serde(default)]
    pub attribute_value: Option<String>,
}

// --- Compute -------------------------------------------------------------

/// The security group that owns a set of rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
    #[serde(default)]
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl SecurityGroup {
    /// Whether the group lives in a VPC (networked) rather than in classic mode
    pub fn is_vpc(&self) -> bool {
        self.vpc_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// An ingress or egress permission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpPermission {
    pub ip_protocol: String,
    #[serde(default)]
    pub from_port: Option<i32>,
    #[serde(default)]
    pub to_port: Option<i32>,
    #[serde(default)]
    pub user_id_group_pairs: Vec<UserIdGroupPair>,
    #[serde(default)]
    pub ip_ranges: Vec<IpRange>,
    #[serde(default)]
    pub prefix_list_ids: Vec<PrefixListId>,
}

/// A peer security group inside a permission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserIdGroupPair {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
}

/// A security group as referenced from another object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupIdentifier {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpRange {
    pub cidr_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrefixListId {
    pub prefix_list_id: String,
}

/// A private address of a network interface, as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterfacePrivateIpAddress {
    pub private_ip_address: String,
    #[serde(default)]
    pub primary: bool,
}

/// A private address requested for a network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrivateIpAddressSpecification {
    pub private_ip_address: String,
    pub primary: bool,
}

/// Attachment of a network interface to an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterfaceAttachment {
    pub attachment_id: String,
    #[serde(default)]
    pub instance_id: Option<String>,
    pub device_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

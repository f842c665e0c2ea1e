//! Security group rules
//!
//! Peers of a rule are CIDR blocks, prefix lists, or other security groups.
//! Group peers are written either as a bare identifier (`sg-1234`) or qualified
//! with the owning account (`123456789012/sg-1234`). In a VPC the identifier is
//! a group id; in classic mode it is a group name.

use crate::api::{
    GroupIdentifier, IpPermission, IpRange, PrefixListId, SecurityGroup, UserIdGroupPair,
};
use crate::error::{MapperError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Protocol value meaning "all protocols"
pub const ALL_PROTOCOLS: &str = "-1";

/// Direction of a security group rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ingress,
    Egress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ingress => write!(f, "ingress"),
            Direction::Egress => write!(f, "egress"),
        }
    }
}

/// A peer security group, optionally qualified with its owner account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReference {
    pub owner_id: Option<String>,
    pub group: String,
}

impl GroupReference {
    /// Parse `group` or `owner/group`
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split('/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(group)) => Self {
                owner_id: Some(owner.to_string()).filter(|o| !o.is_empty()),
                group: group.to_string(),
            },
            _ => Self {
                owner_id: None,
                group: raw.to_string(),
            },
        }
    }
}

impl fmt::Display for GroupReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner_id {
            Some(owner) => write!(f, "{}/{}", owner, self.group),
            None => write!(f, "{}", self.group),
        }
    }
}

/// `ingress` / `egress` block of a security group resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpPermissionBlock {
    pub from_port: i32,
    pub to_port: i32,
    pub protocol: String,
    #[serde(default)]
    pub cidr_blocks: Vec<String>,
    #[serde(default)]
    pub prefix_list_ids: Vec<String>,
    #[serde(default)]
    pub security_groups: BTreeSet<String>,
    #[serde(default, rename = "self")]
    pub self_reference: bool,
}

/// Standalone security group rule resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityGroupRuleBlock {
    #[serde(rename = "type")]
    pub direction: Direction,
    pub from_port: i32,
    pub to_port: i32,
    pub protocol: String,
    #[serde(default)]
    pub cidr_blocks: Vec<String>,
    #[serde(default)]
    pub prefix_list_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_security_group_id: Option<String>,
    #[serde(default, rename = "self")]
    pub self_reference: bool,
}

impl SecurityGroupRuleBlock {
    fn permission(&self) -> IpPermissionBlock {
        IpPermissionBlock {
            from_port: self.from_port,
            to_port: self.to_port,
            protocol: self.protocol.clone(),
            cidr_blocks: self.cidr_blocks.clone(),
            prefix_list_ids: self.prefix_list_ids.clone(),
            security_groups: self.source_security_group_id.iter().cloned().collect(),
            self_reference: self.self_reference,
        }
    }
}

/// Convert configured ingress/egress blocks into API permissions of `group`
pub fn expand_ip_permissions(
    group: &SecurityGroup,
    configured: &[IpPermissionBlock],
) -> Result<Vec<IpPermission>> {
    configured
        .iter()
        .map(|block| expand_ip_permission(group, block))
        .collect()
}

/// Convert a standalone rule into its direction and API permission
pub fn expand_security_group_rule(
    group: &SecurityGroup,
    rule: &SecurityGroupRuleBlock,
) -> Result<(Direction, IpPermission)> {
    let permission = expand_ip_permission(group, &rule.permission())?;
    Ok((rule.direction, permission))
}

fn expand_ip_permission(group: &SecurityGroup, block: &IpPermissionBlock) -> Result<IpPermission> {
    // The API silently drops ports on "-1" rules; make the user say 0 explicitly.
    if block.protocol == ALL_PROTOCOLS && (block.from_port != 0 || block.to_port != 0) {
        return Err(MapperError::InvalidProtocolPortCombination {
            from_port: block.from_port,
            to_port: block.to_port,
        });
    }

    let vpc = group.is_vpc();

    let mut peers: Vec<&str> = block.security_groups.iter().map(String::as_str).collect();
    if block.self_reference {
        peers.push(if vpc {
            group.group_id.as_str()
        } else {
            group.group_name.as_str()
        });
    }

    let user_id_group_pairs = peers
        .into_iter()
        .map(|raw| {
            let reference = GroupReference::parse(raw);
            if vpc {
                UserIdGroupPair {
                    user_id: reference.owner_id,
                    group_id: Some(reference.group),
                    group_name: None,
                }
            } else {
                UserIdGroupPair {
                    user_id: reference.owner_id,
                    group_id: None,
                    group_name: Some(reference.group),
                }
            }
        })
        .collect();

    Ok(IpPermission {
        ip_protocol: block.protocol.clone(),
        from_port: Some(block.from_port),
        to_port: Some(block.to_port),
        user_id_group_pairs,
        ip_ranges: block
            .cidr_blocks
            .iter()
            .map(|cidr| IpRange {
                cidr_ip: cidr.clone(),
            })
            .collect(),
        prefix_list_ids: block
            .prefix_list_ids
            .iter()
            .map(|id| PrefixListId {
                prefix_list_id: id.clone(),
            })
            .collect(),
    })
}

/// Convert peer groups of a permission into group identifiers
///
/// Peers owned by `owner_id` (the caller's own account) are written without
/// an owner prefix; cross-account peers keep it. A peer with a populated name
/// is a classic group and is identified by that name.
pub fn flatten_security_group_references(
    pairs: &[UserIdGroupPair],
    owner_id: Option<&str>,
) -> Vec<GroupIdentifier> {
    pairs
        .iter()
        .map(|pair| {
            let foreign_owner = pair
                .user_id
                .as_deref()
                .filter(|user| !user.is_empty() && owner_id != Some(*user));

            let vpc = pair.group_name.as_deref().is_none_or(str::is_empty);
            let id = if vpc {
                pair.group_id.clone()
            } else {
                pair.group_name.clone()
            };

            let id = match (foreign_owner, id) {
                (Some(owner), Some(id)) => Some(format!("{}/{}", owner, id)),
                (_, id) => id,
            };

            if vpc {
                GroupIdentifier {
                    group_id: id,
                    group_name: None,
                }
            } else {
                GroupIdentifier {
                    group_id: pair.group_id.clone(),
                    group_name: id,
                }
            }
        })
        .collect()
}

/// Convert API permissions of `group` back into ingress/egress blocks
///
/// A peer that is the group itself becomes `self = true`.
pub fn flatten_ip_permissions(
    group: &SecurityGroup,
    permissions: &[IpPermission],
) -> Vec<IpPermissionBlock> {
    let vpc = group.is_vpc();
    let own_identifier = if vpc {
        group.group_id.as_str()
    } else {
        group.group_name.as_str()
    };

    permissions
        .iter()
        .map(|permission| {
            let mut security_groups = BTreeSet::new();
            let mut self_reference = false;

            let references =
                flatten_security_group_references(&permission.user_id_group_pairs, group.owner_id.as_deref());
            for reference in references {
                let identifier = if vpc {
                    reference.group_id
                } else {
                    reference.group_name
                };
                match identifier {
                    Some(id) if id == own_identifier => self_reference = true,
                    Some(id) => {
                        security_groups.insert(id);
                    }
                    None => {}
                }
            }

            IpPermissionBlock {
                from_port: permission.from_port.unwrap_or(0),
                to_port: permission.to_port.unwrap_or(0),
                protocol: permission.ip_protocol.clone(),
                cidr_blocks: permission
                    .ip_ranges
                    .iter()
                    .map(|range| range.cidr_ip.clone())
                    .collect(),
                prefix_list_ids: permission
                    .prefix_list_ids
                    .iter()
                    .map(|prefix| prefix.prefix_list_id.clone())
                    .collect(),
                security_groups,
                self_reference,
            }
        })
        .collect()
}

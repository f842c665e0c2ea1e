//! Bridges between mapper shapes and compute SDK types
//!
//! The mapper works on its own API shapes; these conversions carry them into
//! `AuthorizeSecurityGroupIngress`-style requests and bring described
//! permissions back for flattening.

use aws_sdk_ec2::types as ec2;
use cirrus_structure::api::{IpPermission, IpRange, PrefixListId, UserIdGroupPair};

/// Request form of an expanded permission
pub fn ip_permission_to_sdk(permission: &IpPermission) -> ec2::IpPermission {
    ec2::IpPermission::builder()
        .ip_protocol(&permission.ip_protocol)
        .set_from_port(permission.from_port)
        .set_to_port(permission.to_port)
        .set_user_id_group_pairs(Some(
            permission
                .user_id_group_pairs
                .iter()
                .map(|pair| {
                    ec2::UserIdGroupPair::builder()
                        .set_user_id(pair.user_id.clone())
                        .set_group_id(pair.group_id.clone())
                        .set_group_name(pair.group_name.clone())
                        .build()
                })
                .collect(),
        ))
        .set_ip_ranges(Some(
            permission
                .ip_ranges
                .iter()
                .map(|range| ec2::IpRange::builder().cidr_ip(&range.cidr_ip).build())
                .collect(),
        ))
        .set_prefix_list_ids(Some(
            permission
                .prefix_list_ids
                .iter()
                .map(|id| {
                    ec2::PrefixListId::builder()
                        .prefix_list_id(&id.prefix_list_id)
                        .build()
                })
                .collect(),
        ))
        .build()
}

/// Mapper form of a described permission
///
/// Entries the API returned without their key field (no CIDR, no prefix list
/// id) are dropped.
pub fn ip_permission_from_sdk(permission: &ec2::IpPermission) -> IpPermission {
    IpPermission {
        ip_protocol: permission.ip_protocol().unwrap_or_default().to_string(),
        from_port: permission.from_port(),
        to_port: permission.to_port(),
        user_id_group_pairs: permission
            .user_id_group_pairs()
            .iter()
            .map(|pair| UserIdGroupPair {
                user_id: pair.user_id().map(str::to_string),
                group_id: pair.group_id().map(str::to_string),
                group_name: pair.group_name().map(str::to_string),
            })
            .collect(),
        ip_ranges: permission
            .ip_ranges()
            .iter()
            .filter_map(|range| range.cidr_ip())
            .map(|cidr| IpRange {
                cidr_ip: cidr.to_string(),
            })
            .collect(),
        prefix_list_ids: permission
            .prefix_list_ids()
            .iter()
            .filter_map(|id| id.prefix_list_id())
            .map(|id| PrefixListId {
                prefix_list_id: id.to_string(),
            })
            .collect(),
    }
}

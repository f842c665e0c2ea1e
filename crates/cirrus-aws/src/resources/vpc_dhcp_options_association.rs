//! `osc_vpc_dhcp_options_association`
//!
//! Attaches a DHCP option set to a VPC. There is no disassociate call: delete
//! re-associates the VPC with the region's default option set instead.

use crate::session::ResolvedSession;
use async_trait::async_trait;
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use cirrus_cloud::mutex_kv;
use cirrus_cloud::{CloudError, ResourceData, ResourceHandler, Result};

pub const RESOURCE_TYPE: &str = "osc_vpc_dhcp_options_association";

/// Option set id that makes the API pick the default set
const DEFAULT_DHCP_OPTIONS_ID: &str = "default";

const VPC_NOT_FOUND: &str = "InvalidVpcID.NotFound";

/// Key and values of one entry of a DHCP option set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpConfiguration {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpOptionSet {
    pub id: String,
    pub configurations: Vec<DhcpConfiguration>,
}

impl From<&aws_sdk_ec2::types::DhcpOptions> for DhcpOptionSet {
    fn from(options: &aws_sdk_ec2::types::DhcpOptions) -> Self {
        Self {
            id: options.dhcp_options_id().unwrap_or_default().to_string(),
            configurations: options
                .dhcp_configurations()
                .iter()
                .map(|c| DhcpConfiguration {
                    key: c.key().unwrap_or_default().to_string(),
                    values: c
                        .values()
                        .iter()
                        .map(|v| v.value().unwrap_or_default().to_string())
                        .collect(),
                })
                .collect(),
        }
    }
}

impl DhcpOptionSet {
    /// Whether this is a provider-created default set
    fn is_default(&self) -> bool {
        self.configurations.iter().any(|c| {
            let first = c.values.first().map(String::as_str);
            match c.key.as_str() {
                "domain-name" => first.is_some_and(|v| v.contains(".compute.internal")),
                "domain-name-servers" => first == Some("OutscaleProvidedDNS"),
                "ntp-servers" => first == Some(""),
                _ => false,
            }
        })
    }
}

/// Id of the first default option set, or the `default` placeholder
pub fn default_dhcp_options_id(sets: &[DhcpOptionSet]) -> String {
    sets.iter()
        .find(|set| set.is_default())
        .map(|set| set.id.clone())
        .unwrap_or_else(|| DEFAULT_DHCP_OPTIONS_ID.to_string())
}

pub fn association_id(dhcp_options_id: &str, vpc_id: &str) -> String {
    format!("{}-{}", dhcp_options_id, vpc_id)
}

fn api_error<E>(action: &str, err: &E) -> CloudError
where
    E: std::error::Error,
{
    CloudError::ApiError(format!("{}: {}", action, DisplayErrorContext(err)))
}

pub struct VpcDhcpOptionsAssociation;

impl VpcDhcpOptionsAssociation {
    async fn associate(
        client: &aws_sdk_ec2::Client,
        dhcp_options_id: &str,
        vpc_id: &str,
    ) -> Result<()> {
        client
            .associate_dhcp_options()
            .dhcp_options_id(dhcp_options_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| api_error("AssociateDhcpOptions", &e))?;
        Ok(())
    }
}

#[async_trait]
impl ResourceHandler<ResolvedSession> for VpcDhcpOptionsAssociation {
    fn resource_type(&self) -> &str {
        RESOURCE_TYPE
    }

    async fn create(&self, session: &ResolvedSession, data: &mut ResourceData) -> Result<()> {
        let vpc_id = data.require_str("vpc_id")?;
        let dhcp_options_id = data.require_str("dhcp_options_id")?;

        tracing::info!(
            "Creating DHCP Options association: {} => {}",
            vpc_id,
            dhcp_options_id
        );

        let _guard = mutex_kv::global().lock(&vpc_id).await;
        Self::associate(session.compute(), &dhcp_options_id, &vpc_id).await?;

        data.set_id(association_id(&dhcp_options_id, &vpc_id));
        tracing::info!("Association ID: {}", data.id);
        Ok(())
    }

    async fn read(&self, session: &ResolvedSession, data: &mut ResourceData) -> Result<()> {
        let vpc_id = data.require_str("vpc_id")?;
        let dhcp_options_id = data.require_str("dhcp_options_id")?;

        let output = match session.compute().describe_vpcs().vpc_ids(&vpc_id).send().await {
            Ok(output) => output,
            Err(e) if e.code() == Some(VPC_NOT_FOUND) => {
                tracing::info!("VPC {} is gone, dropping the association", vpc_id);
                data.clear_id();
                return Ok(());
            }
            Err(e) => return Err(api_error("DescribeVpcs", &e)),
        };

        let Some(vpc) = output.vpcs().first() else {
            tracing::info!("VPC {} is gone, dropping the association", vpc_id);
            data.clear_id();
            return Ok(());
        };

        if vpc.vpc_id() != Some(vpc_id.as_str())
            || vpc.dhcp_options_id() != Some(dhcp_options_id.as_str())
        {
            tracing::info!("DHCP Options association {} is gone", data.id);
            data.clear_id();
        }

        Ok(())
    }

    /// Associations cannot be modified in place; associate again
    async fn update(&self, session: &ResolvedSession, data: &mut ResourceData) -> Result<()> {
        self.create(session, data).await
    }

    async fn delete(&self, session: &ResolvedSession, data: &mut ResourceData) -> Result<()> {
        let vpc_id = data.require_str("vpc_id")?;
        let dhcp_options_id: Option<String> = data.get("dhcp_options_id")?;

        let output = session
            .compute()
            .describe_dhcp_options()
            .send()
            .await
            .map_err(|e| api_error("Error retrieving DHCP Options", &e))?;

        let sets: Vec<DhcpOptionSet> = output.dhcp_options().iter().map(Into::into).collect();
        let default_id = default_dhcp_options_id(&sets);

        tracing::info!(
            "Disassociating DHCP Options Set {} from VPC {} (using {})",
            dhcp_options_id.as_deref().unwrap_or("<unknown>"),
            vpc_id,
            default_id
        );

        let _guard = mutex_kv::global().lock(&vpc_id).await;
        Self::associate(session.compute(), &default_id, &vpc_id).await?;

        data.clear_id();
        Ok(())
    }
}

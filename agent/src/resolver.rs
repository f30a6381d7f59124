use anyhow::{Context, Result};
use common::NameErrorPolicy;
use log::{debug, warn};

use crate::collectors::ComputeProvider;

pub const NAME_TAG: &str = "Name";

/// Value of the instance's `Name` tag, or an empty string when it has none.
pub async fn resolve_name<P>(provider: &P, resource_id: &str) -> Result<String>
where
    P: ComputeProvider + ?Sized,
{
    let tags = provider
        .describe_instance_tags(resource_id)
        .await
        .with_context(|| format!("looking up name of {}", resource_id))?;

    let name = tags.get(NAME_TAG).cloned().unwrap_or_default();
    debug!("{} resolved to {:?}", resource_id, name);
    Ok(name)
}

/// Applies `policy` to a lookup failure: `Abort` propagates it, `Unnamed`
/// logs it and yields an empty name.
pub async fn resolve_name_with_policy<P>(
    provider: &P,
    resource_id: &str,
    policy: NameErrorPolicy,
) -> Result<String>
where
    P: ComputeProvider + ?Sized,
{
    match resolve_name(provider, resource_id).await {
        Ok(name) => Ok(name),
        Err(e) if policy == NameErrorPolicy::Unnamed => {
            warn!("Printing {} without a name: {:#}", resource_id, e);
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

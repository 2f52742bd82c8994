//! Convention-derived relations between a device and its services.
//!
//! A device `D` is served by `D-AGENT`, `D-PRODUCER` and `D-SUPERVISOR`.
//! A service counts as deployed only while its UUID is among the assets
//! currently referencing `D`. The index is rebuilt from the registry on
//! every listing; deployments change underneath us.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::registry::{Registry, RegistryError};
use crate::types::AssetUuid;

/// Label shown for a service that is not deployed.
pub const NOT_DEPLOYED: &str = "NOT DEPLOYED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildRole {
    Agent,
    Producer,
    Supervisor,
}

impl ChildRole {
    pub const ALL: [ChildRole; 3] = [Self::Agent, Self::Producer, Self::Supervisor];

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Agent => "AGENT",
            Self::Producer => "PRODUCER",
            Self::Supervisor => "SUPERVISOR",
        }
    }

    /// UUID the service for `device` is expected to carry.
    pub fn child_uuid(&self, device: &AssetUuid) -> AssetUuid {
        device.with_suffix(self.suffix())
    }
}

/// Whether a convention-derived service exists for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Deployment {
    Deployed { uuid: AssetUuid },
    NotDeployed,
}

impl Deployment {
    pub fn label(&self) -> &str {
        match self {
            Self::Deployed { uuid } => uuid.as_str(),
            Self::NotDeployed => NOT_DEPLOYED,
        }
    }

    pub fn is_deployed(&self) -> bool {
        matches!(self, Self::Deployed { .. })
    }
}

/// Set of UUIDs referencing one asset, at the time it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIndex {
    owner: AssetUuid,
    below: BTreeSet<AssetUuid>,
}

impl ReferenceIndex {
    pub fn new(owner: AssetUuid, below: BTreeSet<AssetUuid>) -> Self {
        Self { owner, below }
    }

    /// Query the registry for the assets currently referencing `owner`.
    pub async fn fetch(
        registry: &dyn Registry,
        owner: &AssetUuid,
    ) -> Result<Self, RegistryError> {
        let below = registry.fetch_referencing_uuids(owner).await?;
        Ok(Self::new(owner.clone(), below))
    }

    pub fn owner(&self) -> &AssetUuid {
        &self.owner
    }

    pub fn referencing(&self) -> &BTreeSet<AssetUuid> {
        &self.below
    }

    pub fn contains(&self, uuid: &AssetUuid) -> bool {
        self.below.contains(uuid)
    }

    pub fn deployment(&self, role: ChildRole) -> Deployment {
        let child = role.child_uuid(&self.owner);
        if self.contains(&child) {
            Deployment::Deployed { uuid: child }
        } else {
            Deployment::NotDeployed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(s: &str) -> AssetUuid {
        AssetUuid::parse(s).unwrap()
    }

    #[test]
    fn child_uuids_follow_suffix_convention() {
        let dev = uuid("PROVER3018");
        assert_eq!(ChildRole::Agent.child_uuid(&dev), uuid("PROVER3018-AGENT"));
        assert_eq!(
            ChildRole::Producer.child_uuid(&dev),
            uuid("PROVER3018-PRODUCER")
        );
        assert_eq!(
            ChildRole::Supervisor.child_uuid(&dev),
            uuid("PROVER3018-SUPERVISOR")
        );
    }

    #[test]
    fn only_referencing_children_are_deployed() {
        let dev = uuid("D");
        let index = ReferenceIndex::new(dev, BTreeSet::from([uuid("D-AGENT"), uuid("OTHER")]));

        assert_eq!(
            index.deployment(ChildRole::Agent),
            Deployment::Deployed {
                uuid: uuid("D-AGENT")
            }
        );
        assert_eq!(index.deployment(ChildRole::Producer), Deployment::NotDeployed);
        assert_eq!(
            index.deployment(ChildRole::Supervisor),
            Deployment::NotDeployed
        );
    }

    #[test]
    fn child_of_another_device_does_not_count() {
        let index = ReferenceIndex::new(uuid("D"), BTreeSet::from([uuid("E-AGENT")]));
        assert!(!index.deployment(ChildRole::Agent).is_deployed());
    }

    #[test]
    fn deployment_labels() {
        let deployed = Deployment::Deployed {
            uuid: uuid("D-AGENT"),
        };
        assert_eq!(deployed.label(), "D-AGENT");
        assert_eq!(Deployment::NotDeployed.label(), "NOT DEPLOYED");
    }
}

pub mod api;
pub mod config;
pub mod dates;
pub mod handlers;
pub mod pagination;
pub mod params;
pub mod resource;
pub mod schema;
pub mod transformer;

use async_trait::async_trait;
use teamdeck::credentials::{credential_descriptor, CredentialDescriptor};
use teamdeck::{InputItem, NodeOutput, RequestHelper, TeamdeckError};
use tracing::debug;

use self::params::ItemParameters;
use self::resource::{OperationKind, ResourceKind};
use self::schema::{node_description, NODE_NAME};
use crate::node::{HandlerOutput, ItemOutcome, ItemProcessor, Node};
use crate::runners::{run_batch, ExecutionError};
use crate::types::NodeDescription;

/// Teamdeck node: projects, time entries and bookings over the Teamdeck
/// REST API.
#[derive(Clone, Copy, Debug, Default)]
pub struct TeamdeckNode;

impl TeamdeckNode {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Node for TeamdeckNode {
    fn name(&self) -> &str {
        NODE_NAME
    }

    fn description(&self) -> NodeDescription {
        node_description()
    }

    fn credential(&self) -> CredentialDescriptor {
        credential_descriptor()
    }

    async fn execute(
        &self,
        helper: &dyn RequestHelper,
        items: &[InputItem],
        continue_on_fail: bool,
    ) -> Result<NodeOutput, ExecutionError> {
        run_batch(self, helper, items, continue_on_fail).await
    }
}

#[async_trait]
impl ItemProcessor for TeamdeckNode {
    async fn process(
        &self,
        helper: &dyn RequestHelper,
        item_index: usize,
        item: &InputItem,
    ) -> Result<ItemOutcome, TeamdeckError> {
        let params = ItemParameters::from_item(item)?;
        let resource: ResourceKind =
            params
                .resource
                .parse()
                .map_err(|_| TeamdeckError::UnknownResource {
                    resource: params.resource.clone(),
                    item_index,
                })?;
        let operation: OperationKind =
            params
                .operation
                .parse()
                .map_err(|_| TeamdeckError::UnknownOperation {
                    operation: params.operation.clone(),
                    item_index,
                })?;
        let pass_through = params.pass_through()?;

        debug!(item_index, resource = %resource, operation = %operation, "Dispatching item");
        let output = dispatch(helper, resource, operation, &params).await?;
        Ok(ItemOutcome {
            output,
            pass_through,
        })
    }
}

/// Routes a decoded item to the handler of its resource.
pub(crate) async fn dispatch(
    helper: &dyn RequestHelper,
    resource: ResourceKind,
    operation: OperationKind,
    params: &ItemParameters,
) -> Result<HandlerOutput, TeamdeckError> {
    match resource {
        ResourceKind::Project => handlers::project::handle(helper, operation, params).await,
        ResourceKind::TimeEntry => handlers::time_entry::handle(helper, operation, params).await,
        ResourceKind::Booking => handlers::booking::handle(helper, operation, params).await,
    }
}

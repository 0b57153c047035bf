use async_trait::async_trait;
use serde_json::Value;
use teamdeck::credentials::CredentialDescriptor;
use teamdeck::{InputItem, NodeOutput, RequestHelper, TeamdeckError};

use crate::runners::ExecutionError;
use crate::types::NodeDescription;

/// Node interface for workflow-host integrations.
///
/// A node is stateless: credentials and the HTTP transport live in the
/// [`RequestHelper`] the host passes in, and every input item carries its
/// own resolved parameters.
///
/// # Lifecycle
/// 1. Host calls `description()` and renders the properties as a form
/// 2. Host resolves the form values for each input item
/// 3. Host calls `execute()` once with the whole batch
/// 4. Node returns one or two output channels
///
/// # Example
/// ```no_run
/// use teamdeck_node::registry::find_node;
/// use teamdeck::InputItem;
/// # async fn run(helper: &dyn teamdeck::RequestHelper) -> anyhow::Result<()> {
/// let node = find_node("teamdeck").ok_or_else(|| anyhow::anyhow!("not registered"))?;
/// let items = vec![InputItem::default()];
/// let output = node.execute(helper, &items, true).await?;
/// println!("{}", output.to_channels()?);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Node: Send + Sync {
    /// Unique identifier, e.g. "teamdeck".
    fn name(&self) -> &str;

    /// Static property schema shown by the host.
    fn description(&self) -> NodeDescription;

    /// Credential type the node authenticates with.
    fn credential(&self) -> CredentialDescriptor;

    /// Processes the batch in order, one item at a time.
    ///
    /// With `continue_on_fail` a failing item becomes an error record and the
    /// batch goes on; otherwise the first failure aborts the run.
    async fn execute(
        &self,
        helper: &dyn RequestHelper,
        items: &[InputItem],
        continue_on_fail: bool,
    ) -> Result<NodeOutput, ExecutionError>;
}

/// Raw result of one handler call, before records are built.
#[derive(Debug, PartialEq)]
pub enum HandlerOutput {
    /// create/get/update/delete: exactly one record.
    Single(Value),
    /// getAll: one record per fetched entity, in upstream order.
    Many(Vec<Value>),
}

/// Everything the runner needs to emit the records of one item.
#[derive(Debug)]
pub struct ItemOutcome {
    pub output: HandlerOutput,
    pub pass_through: Option<Value>,
}

/// Per-item step driven by the batch runner.
#[async_trait]
pub trait ItemProcessor: Send + Sync {
    async fn process(
        &self,
        helper: &dyn RequestHelper,
        item_index: usize,
        item: &InputItem,
    ) -> Result<ItemOutcome, TeamdeckError>;
}

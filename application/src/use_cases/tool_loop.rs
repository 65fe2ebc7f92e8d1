//! Native tool use loop shared by the math and physics handlers.
//!
//! Send the prompt with tool declarations; while the model answers with tool
//! calls, execute them all in parallel and send the results back. Only text
//! from a response without tool calls counts as the answer; narration that
//! accompanies tool calls ("Let me look that up...") is discarded.

use crate::ports::llm_gateway::{GatewayError, LlmSession, ToolResultMessage};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::tool_helpers::tool_args_preview;
use tracing::{debug, warn};
use tutor_domain::tool::entities::ToolCall;

/// Result of a completed tool loop.
#[derive(Debug, Clone, Default)]
pub struct ToolLoopOutcome {
    /// Text of the final tool-free response (may be empty).
    pub final_text: String,
    /// Number of tool turns executed.
    pub turns: usize,
    /// Tool calls that succeeded, in execution order.
    pub successful_calls: Vec<ToolCall>,
    /// The model was still requesting tools when `max_turns` ran out.
    pub hit_turn_limit: bool,
}

/// Run the send → execute tools → send results cycle.
///
/// Tool failures are fed back to the model with `is_error` set; only
/// gateway failures abort the loop. Stops after `max_turns` tool turns even
/// if the model keeps asking for tools, with `hit_turn_limit` set.
pub async fn run_tool_loop(
    session: &dyn LlmSession,
    prompt: &str,
    tools: &[serde_json::Value],
    executor: &dyn ToolExecutorPort,
    max_turns: usize,
) -> Result<ToolLoopOutcome, GatewayError> {
    let mut outcome = ToolLoopOutcome::default();

    let mut response = session.send_with_tools(prompt, tools).await?;

    loop {
        let tool_calls = response.tool_calls();
        if tool_calls.is_empty() {
            let text = response.text_content();
            if !text.trim().is_empty() {
                outcome.final_text = text;
            }
            break;
        }

        if outcome.turns >= max_turns {
            warn!("Tool loop exceeded max_tool_turns ({})", max_turns);
            outcome.hit_turn_limit = true;
            break;
        }
        outcome.turns += 1;

        for call in &tool_calls {
            debug!(
                "Tool turn {}: {}({})",
                outcome.turns,
                call.tool_name,
                tool_args_preview(call)
            );
        }

        let futures = tool_calls.iter().map(|call| executor.execute(call));
        let results: Vec<_> = futures::future::join_all(futures).await;

        let mut tool_result_messages = Vec::new();
        for (call, result) in tool_calls.iter().zip(results) {
            let is_error = !result.is_success();
            if is_error {
                debug!(
                    "Tool '{}' failed: {}",
                    call.tool_name,
                    result.model_facing_text()
                );
            } else {
                outcome.successful_calls.push(call.clone());
            }

            match call.native_id.clone() {
                Some(native_id) => tool_result_messages.push(ToolResultMessage {
                    tool_use_id: native_id,
                    tool_name: call.tool_name.clone(),
                    output: result.model_facing_text(),
                    is_error,
                }),
                None => warn!(
                    "Missing native_id for tool call '{}'; skipping result.",
                    call.tool_name
                ),
            }
        }

        debug!(
            "Tool turn {}/{}: sending {} tool results",
            outcome.turns,
            max_turns,
            tool_result_messages.len()
        );

        response = session.send_tool_results(&tool_result_messages).await?;
    }

    Ok(outcome)
}
